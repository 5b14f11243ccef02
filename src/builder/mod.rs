//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder for machines, the validation
//! errors shared with the table constructors, and the [`id_enum!`](crate::id_enum)
//! macro for naming dense state and event ids.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
