//! Cora Common - Shared types and schemas for the Cora support service
//!
//! Holds everything both `corad` and `coractl` need to agree on: the wire
//! DTOs, the error type, and the static customer directory. No daemon state
//! lives here.

pub mod directory;
pub mod error;
pub mod types;

pub use directory::*;
pub use error::*;
pub use types::*;
