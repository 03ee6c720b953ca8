pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewRegister, Register, Specie};
