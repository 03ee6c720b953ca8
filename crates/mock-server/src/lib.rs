//! In-memory stand-in for the sightings backend.
//!
//! Serves the three endpoints the client talks to, with the same JSON
//! spelling the real backend uses (`cientificName`, `specieId`). Intended
//! for integration tests and local development; state lives and dies with
//! the process.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specie {
    pub id: i64,
    #[serde(rename = "cientificName")]
    pub scientific_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub id: i64,
    pub title: String,
    pub latitude: String,
    pub longitude: String,
    pub observations: String,
    pub specie: Specie,
}

#[derive(Debug, Deserialize)]
pub struct NewRegister {
    pub title: String,
    pub latitude: String,
    pub longitude: String,
    pub observations: String,
    #[serde(rename = "specieId")]
    pub specie_id: Option<i64>,
}

#[derive(Debug)]
struct Store {
    species: Vec<Specie>,
    registers: Vec<Register>,
    next_id: i64,
}

type Db = Arc<RwLock<Store>>;

/// A small species list so the dropdown has something to show.
pub fn seed_species() -> Vec<Specie> {
    vec![
        Specie {
            id: 9,
            scientific_name: "Ficus sp.".to_string(),
        },
        Specie {
            id: 12,
            scientific_name: "Cecropia pachystachya".to_string(),
        },
        Specie {
            id: 14,
            scientific_name: "Handroanthus albus".to_string(),
        },
    ]
}

pub fn app() -> Router {
    app_with(seed_species(), Vec::new())
}

pub fn app_with(species: Vec<Specie>, registers: Vec<Register>) -> Router {
    let next_id = registers.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    let db: Db = Arc::new(RwLock::new(Store {
        species,
        registers,
        next_id,
    }));
    Router::new()
        .route("/registers", get(list_registers))
        .route("/species", get(list_species))
        .route("/register", post(create_register))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    info!(addr = %listener.local_addr()?, "mock sightings backend listening");
    axum::serve(listener, app()).await
}

async fn list_registers(State(db): State<Db>) -> Json<Vec<Register>> {
    Json(db.read().await.registers.clone())
}

async fn list_species(State(db): State<Db>) -> Json<Vec<Specie>> {
    Json(db.read().await.species.clone())
}

async fn create_register(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NewRegister>,
) -> Result<(StatusCode, Json<Register>), StatusCode> {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let filled = [
        &input.title,
        &input.latitude,
        &input.longitude,
        &input.observations,
    ]
    .iter()
    .all(|field| !field.trim().is_empty());
    if !filled {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut store = db.write().await;
    let specie = input
        .specie_id
        .and_then(|id| store.species.iter().find(|s| s.id == id).cloned())
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;

    let register = Register {
        id: store.next_id,
        title: input.title,
        latitude: input.latitude,
        longitude: input.longitude,
        observations: input.observations,
        specie,
    };
    store.next_id += 1;
    store.registers.push(register.clone());
    Ok((StatusCode::CREATED, Json(register)))
}
