//! Request types for HTTP handlers.

mod drinks;
mod paths;

pub use drinks::*;
pub use paths::*;
