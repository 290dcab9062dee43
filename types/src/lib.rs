//! Core domain types for termlift.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application: URN construction, the catalog fabric environment, and
//! glossary category paths.

mod category;
mod environment;
mod urn;

pub use category::{CategoryPath, DEFAULT_CATEGORY};
pub use environment::{Environment, EnvironmentParseError};
pub use urn::{DatasetUrn, NodeUrn, TermUrn, UrnError};
