//! The new-register screen: guarded mount, prefilled coordinates, a species
//! dropdown, and an authenticated submit.

use api::{ApiError, NewRegister, Specie};
use foundation::{LatLon, format_coord};
use session::User;

use crate::{Route, fetch_alert_text};

/// Placeholder shown in the dropdown header until something is selected.
pub const NO_SELECTION_LABEL: &str = "Não há uma espécie selecionada";

/// Submit button labels for the idle and busy states.
pub const SUBMIT_LABEL: &str = "Submeter";
pub const BUSY_LABEL: &str = "Carregando...";

/// The four required free-text inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Longitude,
    Latitude,
    Observations,
}

/// The dropdown's only two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Closed,
    Open,
}

/// The current species choice mirrored into the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSpecie {
    pub id: Option<i64>,
    pub name: String,
}

impl SelectedSpecie {
    fn none() -> Self {
        Self {
            id: None,
            name: String::new(),
        }
    }

    /// What the dropdown header shows.
    pub fn label(&self) -> &str {
        if self.id.is_some() {
            &self.name
        } else {
            NO_SELECTION_LABEL
        }
    }
}

/// Effects the host performs on the form's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    Navigate(Route),
    RequestDevicePosition,
    FetchSpecies,
    SubmitRegister(NewRegister),
    Alert(String),
}

#[derive(Debug)]
pub struct RegisterForm {
    draft: NewRegister,
    selected: SelectedSpecie,
    species: Vec<Specie>,
    dropdown: Dropdown,
    species_loading: bool,
    submitting: bool,
    latitude_edited: bool,
    longitude_edited: bool,
    redirected: bool,
}

impl RegisterForm {
    /// Mount the screen for the given identity.
    ///
    /// A guest is redirected home before anything becomes editable; no
    /// fetches start in that case.
    pub fn mount(user: &User) -> (Self, Vec<FormEffect>) {
        let mut form = Self {
            draft: NewRegister::default(),
            selected: SelectedSpecie::none(),
            species: Vec::new(),
            dropdown: Dropdown::Closed,
            species_loading: false,
            submitting: false,
            latitude_edited: false,
            longitude_edited: false,
            redirected: false,
        };
        if user.is_guest() {
            form.redirected = true;
            return (form, vec![FormEffect::Navigate(Route::Home)]);
        }
        form.species_loading = true;
        (
            form,
            vec![FormEffect::RequestDevicePosition, FormEffect::FetchSpecies],
        )
    }

    /// The identity context changed; the guard re-runs.
    pub fn user_changed(&mut self, user: &User) -> Vec<FormEffect> {
        if user.is_guest() && !self.redirected {
            self.redirected = true;
            return vec![FormEffect::Navigate(Route::Home)];
        }
        Vec::new()
    }

    /// Inputs and the submit trigger stay disabled while anything is in flight.
    pub fn is_busy(&self) -> bool {
        self.species_loading || self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() { BUSY_LABEL } else { SUBMIT_LABEL }
    }

    pub fn draft(&self) -> &NewRegister {
        &self.draft
    }

    pub fn selected(&self) -> &SelectedSpecie {
        &self.selected
    }

    pub fn species(&self) -> &[Specie] {
        &self.species
    }

    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    /// The device position arrived; prefill only coordinate fields the user
    /// has not touched, so a slow resolution never clobbers typed input.
    pub fn position_resolved(&mut self, position: LatLon) -> Vec<FormEffect> {
        if !self.latitude_edited {
            self.draft.latitude = format_coord(position.lat_deg);
        }
        if !self.longitude_edited {
            self.draft.longitude = format_coord(position.lon_deg);
        }
        Vec::new()
    }

    /// The species fetch finished.
    ///
    /// On failure the alert carries the status and the form becomes editable
    /// with an empty dropdown; the user can still fill everything else in.
    pub fn species_loaded(&mut self, result: Result<Vec<Specie>, ApiError>) -> Vec<FormEffect> {
        self.species_loading = false;
        match result {
            Ok(list) => {
                self.species = list;
                Vec::new()
            }
            Err(err) => vec![FormEffect::Alert(fetch_alert_text(&err))],
        }
    }

    /// Free-text input changed.
    pub fn field_edited(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.draft.title = value,
            Field::Observations => self.draft.observations = value,
            Field::Latitude => {
                self.draft.latitude = value;
                self.latitude_edited = true;
            }
            Field::Longitude => {
                self.draft.longitude = value;
                self.longitude_edited = true;
            }
        }
    }

    /// Header or chevron clicked.
    pub fn dropdown_toggled(&mut self) {
        self.dropdown = match self.dropdown {
            Dropdown::Closed => Dropdown::Open,
            Dropdown::Open => Dropdown::Closed,
        };
    }

    /// A dropdown entry was chosen.
    pub fn specie_selected(&mut self, specie_id: i64) {
        let Some(specie) = self.species.iter().find(|s| s.id == specie_id) else {
            return;
        };
        self.selected = SelectedSpecie {
            id: Some(specie.id),
            name: specie.scientific_name.clone(),
        };
        self.draft.specie_id = Some(specie.id);
        self.dropdown = Dropdown::Closed;
    }

    /// Explicit form submission (the host already suppressed the browser's
    /// default submit and enforced its required fields).
    pub fn submit_requested(&mut self) -> Vec<FormEffect> {
        if self.is_busy() {
            return Vec::new();
        }
        self.submitting = true;
        vec![FormEffect::SubmitRegister(self.draft.clone())]
    }

    /// The write finished.
    pub fn submit_finished(&mut self, result: Result<(), ApiError>) -> Vec<FormEffect> {
        match result {
            Ok(()) => vec![FormEffect::Navigate(Route::Home)],
            Err(err) => {
                // Editable again, draft intact, so the user can correct and retry.
                self.submitting = false;
                vec![FormEffect::Alert(submit_alert_text(&err))]
            }
        }
    }
}

fn submit_alert_text(err: &ApiError) -> String {
    let hint = "Campo obrigatório não preenchido, ou preenchido incorretamente";
    match err.status() {
        Some(status) => format!("{hint} (Erro {status})"),
        None => format!("{hint} ({err})"),
    }
}
