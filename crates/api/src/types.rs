//! JSON shapes owned by the backend.
//!
//! Latitude and longitude travel as strings on the wire; turning them into
//! numbers is an explicit step (`foundation::parse_coord`) taken by whoever
//! needs to render or project them. The backend spells the scientific-name
//! field `cientificName`; the rename keeps the wire byte-compatible.

use serde::{Deserialize, Serialize};

/// A taxonomic entry, selectable when creating a register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specie {
    pub id: i64,
    #[serde(rename = "cientificName")]
    pub scientific_name: String,
}

/// A species-sighting record as returned by `GET /registers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub id: i64,
    pub title: String,
    pub latitude: String,
    pub longitude: String,
    pub observations: String,
    pub specie: Specie,
}

/// The client-side draft posted to `POST /register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegister {
    pub title: String,
    pub latitude: String,
    pub longitude: String,
    pub observations: String,
    #[serde(rename = "specieId")]
    pub specie_id: Option<i64>,
}
