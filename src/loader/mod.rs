pub mod openapi;

pub use openapi::load_openapi;
