//! Wire types and errors shared by the `demo-api` server and its tests.

pub mod error;
pub mod protocol;

pub use error::ApiError;
