//! Handler error types and conversions from lower layers.

mod http_error;
mod store_error;

pub use http_error::{Error, ErrorKind, Result};
