//! API request and response wrappers

pub mod json;
pub mod response;

pub use json::ValidJson;
pub use response::DataResponse;
