//! Paints screen state into the host page.
//!
//! Rendering is wholesale: each repaint rebuilds the screen's container from
//! the machine's current state. The host page owns event wiring (it calls
//! back into the exports), popup visibility, and styling.

use foundation::{TileCoord, Viewport};
use screens::{Dropdown, MAP_ZOOM, MapView, Marker, RegisterForm};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement};

const MAP_CONTAINER_ID: &str = "map";
const FORM_CONTAINER_ID: &str = "register-form";
const BASEMAP_CANVAS_ID: &str = "basemap";

const LOADING_TEXT: &str = "Carregando...";
const MARKER_ICON_SRC: &str = "assets/leaf.svg";
const MARKER_SIZE_PX: f64 = 40.0;

const TILE_URL_PREFIX: &str = "basemaps.cartocdn.com/rastertiles/voyager";
const TILE_SUBDOMAINS: [&str; 4] = ["a", "b", "c", "d"];

pub fn alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}

pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn container(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

// ---- map screen ----

pub fn render_map(map: Option<&MapView>) {
    let Some(target) = container(MAP_CONTAINER_ID) else {
        return;
    };
    let Some(map) = map else {
        target.set_inner_html("");
        return;
    };
    if map.is_loading() {
        target.set_inner_html(&format!("<h2>{LOADING_TEXT}</h2>"));
        return;
    }
    let Some(center) = map.center() else {
        return;
    };

    let width = target.client_width().max(1) as u32;
    let height = target.client_height().max(1) as u32;
    let viewport = Viewport::new(center, MAP_ZOOM, width, height);

    let mut html = format!(
        r#"<canvas id="{BASEMAP_CANVAS_ID}" width="{width}" height="{height}"></canvas><div class="marker-layer">"#
    );
    for marker in map.markers() {
        html.push_str(&marker_html(&viewport, marker));
    }
    html.push_str("</div>");
    target.set_inner_html(&html);

    draw_basemap(&viewport);
}

fn marker_html(viewport: &Viewport, marker: &Marker) -> String {
    let at = viewport.screen_position(marker.at);
    // Anchor the icon's bottom-center on the point.
    let left = at.x - MARKER_SIZE_PX / 2.0;
    let top = at.y - MARKER_SIZE_PX;
    format!(
        concat!(
            r#"<div class="marker" data-register-id="{id}" style="left:{left}px;top:{top}px;">"#,
            r#"<img src="{icon}" width="40" height="40" alt="">"#,
            r#"<div class="popup"><div class="top">"#,
            r#"<h2>{title}</h2>"#,
            r#"<h4 data-specie-id="{specie_id}">{specie}</h4>"#,
            r#"</div><h3>{observations}</h3></div></div>"#
        ),
        id = marker.register_id,
        left = left,
        top = top,
        icon = MARKER_ICON_SRC,
        title = escape_html(&marker.title),
        specie_id = marker.specie_id,
        specie = escape_html(&marker.specie_name),
        observations = escape_html(&marker.observations_line()),
    )
}

fn draw_basemap(viewport: &Viewport) {
    let Some(canvas) = container(BASEMAP_CANVAS_ID) else {
        return;
    };
    let Ok(canvas) = canvas.dyn_into::<HtmlCanvasElement>() else {
        return;
    };
    let Ok(Some(ctx)) = canvas.get_context("2d") else {
        return;
    };
    let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
        return;
    };

    for placed in viewport.visible_tiles() {
        let Ok(img) = HtmlImageElement::new() else {
            continue;
        };
        img.set_cross_origin(Some("anonymous"));

        let ctx = ctx.clone();
        let tile_img = img.clone();
        let (x, y) = (placed.screen.x, placed.screen.y);
        let onload = Closure::once(move || {
            let _ = ctx.draw_image_with_html_image_element(&tile_img, x, y);
        });
        let handler: &js_sys::Function = onload.as_ref().unchecked_ref();
        img.set_onload(Some(handler));
        // The image element keeps the browser-held callback alive.
        onload.forget();

        img.set_src(&tile_url(placed.tile));
    }
}

fn tile_url(tile: TileCoord) -> String {
    let subdomain = TILE_SUBDOMAINS[((tile.x + tile.y) % 4) as usize];
    format!(
        "https://{subdomain}.{TILE_URL_PREFIX}/{}/{}/{}.png",
        tile.z, tile.x, tile.y
    )
}

// ---- register form screen ----

pub fn render_form(form: Option<&RegisterForm>) {
    let Some(target) = container(FORM_CONTAINER_ID) else {
        return;
    };
    let Some(form) = form else {
        target.set_inner_html("");
        return;
    };

    let disabled = if form.is_busy() { " disabled" } else { "" };
    let draft = form.draft();

    let mut html = String::from(r#"<form id="new-register">"#);
    for (name, value, placeholder) in [
        (
            "title",
            &draft.title,
            "Descrição breve do local (uma frase curta)",
        ),
        ("longitude", &draft.longitude, "Longitude (em UTM)"),
        ("latitude", &draft.latitude, "Latitude (em UTM)"),
        (
            "observations",
            &draft.observations,
            "Observações (descrições mais detalhadas)",
        ),
    ] {
        html.push_str(&format!(
            r#"<input type="text" name="{name}" value="{value}" placeholder="{placeholder}" required{disabled}>"#,
            value = escape_html(value),
        ));
    }

    html.push_str(&dropdown_html(form));
    html.push_str(&format!(
        r#"<button type="submit"{disabled}>{}</button></form>"#,
        form.submit_label()
    ));
    target.set_inner_html(&html);
}

fn dropdown_html(form: &RegisterForm) -> String {
    let open = form.dropdown() == Dropdown::Open;
    let chevron = if open { "\u{25B2}" } else { "\u{25BC}" };
    let display = if open { "initial" } else { "none" };

    let mut entries = String::new();
    for specie in form.species() {
        entries.push_str(&format!(
            r#"<h3 data-specie-id="{}">{}</h3>"#,
            specie.id,
            escape_html(&specie.scientific_name)
        ));
    }

    format!(
        concat!(
            r#"<div class="specie"><h2>{label}</h2>"#,
            r#"<span class="chevron">{chevron}</span>"#,
            r#"<div class="list" style="display:{display}">{entries}</div></div>"#
        ),
        label = escape_html(form.selected().label()),
        chevron = chevron,
        display = display,
        entries = entries,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
