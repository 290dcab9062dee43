//! Catalog fabric environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fabric a dataset belongs to, recorded as the third component of a
/// dataset URN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    #[default]
    Prod,
    Dev,
    Test,
    Qa,
    Uat,
    Stg,
}

const ENVIRONMENT_VALUES: &[&str] = &["PROD", "DEV", "TEST", "QA", "UAT", "STG"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid environment '{raw}'; expected one of: {expected:?}")]
pub struct EnvironmentParseError {
    raw: String,
    expected: &'static [&'static str],
}

impl Environment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Prod => "PROD",
            Environment::Dev => "DEV",
            Environment::Test => "TEST",
            Environment::Qa => "QA",
            Environment::Uat => "UAT",
            Environment::Stg => "STG",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, EnvironmentParseError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PROD" => Ok(Environment::Prod),
            "DEV" => Ok(Environment::Dev),
            "TEST" => Ok(Environment::Test),
            "QA" => Ok(Environment::Qa),
            "UAT" => Ok(Environment::Uat),
            "STG" | "STAGING" => Ok(Environment::Stg),
            _ => Err(EnvironmentParseError {
                raw: raw.trim().to_string(),
                expected: ENVIRONMENT_VALUES,
            }),
        }
    }
}

impl FromStr for Environment {
    type Err = EnvironmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::parse(s)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
