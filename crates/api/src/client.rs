//! Stateless request builder / response parser for the sightings backend.
//!
//! Each operation is a `build_*` / `parse_*` pair: `build_*` produces an
//! [`HttpRequest`] value, the host performs the round-trip, and `parse_*`
//! consumes the [`HttpResponse`]. Keeping the client free of I/O lets the
//! same code drive both the wasm executor and native integration tests.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{NewRegister, Register, Specie};

/// Stateless client for the sightings backend; holds only the base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {backUrl}/registers` — every sighting record.
    pub fn build_list_registers(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/registers", self.base_url))
    }

    pub fn parse_list_registers(&self, response: HttpResponse) -> Result<Vec<Register>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// `GET {backUrl}/species` — the selectable species list.
    pub fn build_list_species(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/species", self.base_url))
    }

    pub fn parse_list_species(&self, response: HttpResponse) -> Result<Vec<Specie>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// `POST {backUrl}/register` — submit a draft under a bearer token.
    pub fn build_create_register(
        &self,
        draft: &NewRegister,
        token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::post(format!("{}/register", self.base_url), body)
            .with_header("authorization", format!("Bearer {token}")))
    }

    /// The backend's create response body is never read; any 2xx is success.
    pub fn parse_create_register(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
