//! Domain layer for skybrief
//!
//! Value objects passed between the geocoding, weather and rewriting clients,
//! and the single failure shape every client returns.

pub mod errors;
pub mod value_objects;

pub use errors::{ErrorKind, ToolError, ToolResult};
pub use value_objects::*;
