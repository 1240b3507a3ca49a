//! Request extractors shared by the resource handlers.

mod json_body;

pub use json_body::JsonBody;
