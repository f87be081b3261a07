//! Response types for HTTP handlers.

mod drinks;
mod error_response;
mod monitors;

pub use drinks::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
