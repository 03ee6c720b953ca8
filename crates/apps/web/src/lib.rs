//! Browser app: owns the session contexts and the two screens, executes
//! their effects, and paints their state into the host page.
//!
//! The host page wires DOM events to the exported functions; all state lives
//! in a thread-local here. Network and geolocation callbacks re-enter
//! through the same exports' helpers, so nothing holds the state borrow
//! across an await.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use api::{ApiClient, NewRegister};
use foundation::LatLon;
use screens::{Field, FormEffect, MapView, MapViewEffect, RegisterForm, Route};
use session::{AuthToken, Session, Subscription, User};

mod dom;
mod geoloc;
mod net;

struct App {
    client: ApiClient,
    session: Session,
    map: Option<MapView>,
    form: Option<RegisterForm>,
    map_position_sub: Option<Subscription<Option<LatLon>>>,
    form_user_sub: Option<Subscription<Option<User>>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Initialize the app against a backend base URL. Call once, before any
/// screen is opened.
#[wasm_bindgen]
pub fn boot(back_url: &str) {
    APP.with(|cell| {
        *cell.borrow_mut() = Some(App {
            client: ApiClient::new(back_url),
            session: Session::new(),
            map: None,
            form: None,
            map_position_sub: None,
            form_user_sub: None,
        });
    });
}

// ---- shared context updates (owned by the surrounding application) ----

#[wasm_bindgen]
pub fn set_user(name: &str) {
    let Some(user) = with_app(|app| app.session.user.clone()) else {
        return;
    };
    user.set(Some(User::named(name)));
}

#[wasm_bindgen]
pub fn set_token(token: &str) {
    let Some(cell) = with_app(|app| app.session.token.clone()) else {
        return;
    };
    cell.set(Some(AuthToken::new(token)));
}

#[wasm_bindgen]
pub fn set_shared_position(lat_deg: f64, lon_deg: f64) {
    let Some(cell) = with_app(|app| app.session.position.clone()) else {
        return;
    };
    cell.set(Some(LatLon::new(lat_deg, lon_deg)));
}

// ---- map screen ----

#[wasm_bindgen]
pub fn open_map() {
    let effects = with_app(|app| {
        app.form = None;
        app.form_user_sub = None;

        let (map, effects) = MapView::start(app.session.position.get());
        app.map = Some(map);
        // A position arriving later through the shared context feeds the
        // screen the same way a device reading does.
        app.map_position_sub = Some(app.session.position.subscribe(|position| {
            if let Some(p) = *position {
                on_map_position(p);
            }
        }));
        effects
    });
    if let Some(effects) = effects {
        run_map_effects(effects);
    }
    render_map();
}

#[wasm_bindgen]
pub fn map_specie_clicked(specie_id: f64) {
    let effects = with_app(|app| {
        app.map
            .as_ref()
            .map(|map| map.specie_activated(specie_id as i64))
    })
    .flatten();
    if let Some(effects) = effects {
        run_map_effects(effects);
    }
}

fn on_map_position(position: LatLon) {
    let effects =
        with_app(|app| app.map.as_mut().map(|map| map.position_resolved(position))).flatten();
    if let Some(effects) = effects {
        run_map_effects(effects);
    }
    render_map();
}

fn run_map_effects(effects: Vec<MapViewEffect>) {
    for effect in effects {
        match effect {
            MapViewEffect::RequestDevicePosition => {
                geoloc::request_current_position(on_map_position);
            }
            MapViewEffect::FetchRegisters => fetch_registers(),
            MapViewEffect::Alert(text) => dom::alert(&text),
            MapViewEffect::Navigate(route) => navigate(route),
            MapViewEffect::Log(message) => dom::log(&message),
        }
    }
}

fn fetch_registers() {
    let Some(client) = with_app(|app| app.client.clone()) else {
        return;
    };
    spawn_local(async move {
        let request = client.build_list_registers();
        let result = match net::execute(request).await {
            Ok(response) => client.parse_list_registers(response),
            Err(err) => Err(err),
        };
        let effects =
            with_app(|app| app.map.as_mut().map(|map| map.registers_loaded(result))).flatten();
        if let Some(effects) = effects {
            run_map_effects(effects);
        }
        render_map();
    });
}

fn render_map() {
    with_app(|app| dom::render_map(app.map.as_ref()));
}

// ---- register form screen ----

#[wasm_bindgen]
pub fn open_form() {
    let effects = with_app(|app| {
        app.map = None;
        app.map_position_sub = None;

        let user = app.session.user.get().unwrap_or_else(User::guest);
        let (form, effects) = RegisterForm::mount(&user);
        app.form = Some(form);
        // The guard re-runs whenever the identity context changes.
        app.form_user_sub = Some(app.session.user.subscribe(|user| {
            on_form_user_changed(user.clone().unwrap_or_else(User::guest));
        }));
        effects
    });
    if let Some(effects) = effects {
        run_form_effects(effects);
    }
    render_form();
}

#[wasm_bindgen]
pub fn form_field_edited(field: &str, value: String) {
    let Some(field) = parse_field(field) else {
        return;
    };
    // The input already displays what the user typed; no repaint needed.
    with_app(|app| {
        if let Some(form) = app.form.as_mut() {
            form.field_edited(field, value);
        }
    });
}

#[wasm_bindgen]
pub fn form_dropdown_toggled() {
    with_app(|app| {
        if let Some(form) = app.form.as_mut() {
            form.dropdown_toggled();
        }
    });
    render_form();
}

#[wasm_bindgen]
pub fn form_specie_selected(specie_id: f64) {
    with_app(|app| {
        if let Some(form) = app.form.as_mut() {
            form.specie_selected(specie_id as i64);
        }
    });
    render_form();
}

/// The host page suppresses the browser's default submission and enforces
/// its `required` fields before calling this.
#[wasm_bindgen]
pub fn form_submit() {
    let effects = with_app(|app| app.form.as_mut().map(RegisterForm::submit_requested)).flatten();
    if let Some(effects) = effects {
        run_form_effects(effects);
    }
    render_form();
}

fn on_form_user_changed(user: User) {
    let effects =
        with_app(|app| app.form.as_mut().map(|form| form.user_changed(&user))).flatten();
    if let Some(effects) = effects {
        run_form_effects(effects);
    }
}

fn on_form_position(position: LatLon) {
    with_app(|app| {
        if let Some(form) = app.form.as_mut() {
            form.position_resolved(position);
        }
    });
    render_form();
}

fn run_form_effects(effects: Vec<FormEffect>) {
    for effect in effects {
        match effect {
            FormEffect::Navigate(route) => navigate(route),
            FormEffect::RequestDevicePosition => {
                geoloc::request_current_position(on_form_position);
            }
            FormEffect::FetchSpecies => fetch_species(),
            FormEffect::SubmitRegister(draft) => submit_register(draft),
            FormEffect::Alert(text) => dom::alert(&text),
        }
    }
}

fn fetch_species() {
    let Some(client) = with_app(|app| app.client.clone()) else {
        return;
    };
    spawn_local(async move {
        let request = client.build_list_species();
        let result = match net::execute(request).await {
            Ok(response) => client.parse_list_species(response),
            Err(err) => Err(err),
        };
        let effects =
            with_app(|app| app.form.as_mut().map(|form| form.species_loaded(result))).flatten();
        if let Some(effects) = effects {
            run_form_effects(effects);
        }
        render_form();
    });
}

fn submit_register(draft: NewRegister) {
    let Some((client, token)) = with_app(|app| (app.client.clone(), app.session.token.get()))
    else {
        return;
    };
    let token = token.map(|t| t.as_str().to_string()).unwrap_or_default();
    spawn_local(async move {
        let result = match client.build_create_register(&draft, &token) {
            Ok(request) => match net::execute(request).await {
                Ok(response) => client.parse_create_register(response),
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };
        let effects =
            with_app(|app| app.form.as_mut().map(|form| form.submit_finished(result))).flatten();
        if let Some(effects) = effects {
            run_form_effects(effects);
        }
        render_form();
    });
}

fn render_form() {
    with_app(|app| dom::render_form(app.form.as_ref()));
}

// ---- navigation ----

fn navigate(route: Route) {
    match route {
        Route::Home => {
            if let Some(window) = web_sys::window() {
                if let Ok(history) = window.history() {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&route.path()));
                }
            }
            open_map();
        }
        // The species detail screen lives outside this app.
        Route::SpecieDetail(_) => {
            if let Some(window) = web_sys::window() {
                let _ = window.location().assign(&route.path());
            }
        }
    }
}

fn parse_field(name: &str) -> Option<Field> {
    match name {
        "title" => Some(Field::Title),
        "longitude" => Some(Field::Longitude),
        "latitude" => Some(Field::Latitude),
        "observations" => Some(Field::Observations),
        _ => None,
    }
}
