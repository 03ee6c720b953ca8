//! One-shot device geolocation.

use foundation::LatLon;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Ask the device for its position once; `on_resolved` runs when it answers.
///
/// Denial and failure are absorbed without a callback: the requesting screen
/// keeps its loading gate, with no fallback position and no timeout.
pub fn request_current_position(on_resolved: fn(LatLon)) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(geolocation) = window.navigator().geolocation() else {
        return;
    };

    let success = Closure::once(move |position: web_sys::GeolocationPosition| {
        let coords = position.coords();
        on_resolved(LatLon::new(coords.latitude(), coords.longitude()));
    });
    if geolocation
        .get_current_position(success.as_ref().unchecked_ref())
        .is_ok()
    {
        // The browser owns the callback's lifetime now.
        success.forget();
    }
}
