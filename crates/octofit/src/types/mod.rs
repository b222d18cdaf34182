//! Request bodies and query parameters accepted by the API handlers.

mod queries;
mod requests;

pub use queries::*;
pub use requests::*;
