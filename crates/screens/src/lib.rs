//! Screen logic as plain state machines.
//!
//! Each screen consumes events (user input, resolved positions, finished
//! requests) and returns the effects the host must perform. The machines do
//! no I/O themselves, so every behavior here runs under plain `cargo test`;
//! the wasm app is reduced to executing effects and painting state.

pub mod map_view;
pub mod register_form;

pub use map_view::{MAP_ZOOM, MapView, MapViewEffect, Marker};
pub use register_form::{Dropdown, Field, FormEffect, RegisterForm, SelectedSpecie};

use api::ApiError;

/// Navigation targets the screens can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    SpecieDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SpecieDetail(id) => format!("/specie/{id}"),
        }
    }
}

/// The read-failure alert, status code verbatim ("Erro 500").
pub(crate) fn fetch_alert_text(err: &ApiError) -> String {
    match err.status() {
        Some(status) => format!("Erro {status}"),
        None => format!("Erro ({err})"),
    }
}
