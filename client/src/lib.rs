pub mod client;
pub mod config;
pub mod error;
pub mod request;

// Re-export commonly used types
pub use client::{API_KEY_HEADER, PostmanClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorDetail, ErrorResponse, PostmanError, RequestError};
pub use request::{MethodSet, NoMethod, NoOutput, PostmanRequest};
