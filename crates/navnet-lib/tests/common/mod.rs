#![allow(dead_code)]

use std::path::PathBuf;

use navnet_lib::{load_network, LinkRecord, Network, PlaceRecord};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Network built from `docs/fixtures/Places.csv` and `Links.csv`.
pub fn fixture_network() -> Network {
    let dir = fixtures_dir();
    load_network(&dir.join("Places.csv"), &dir.join("Links.csv")).expect("fixture loads")
}

pub fn place(name: &str, reference: i64, latitude: f64, longitude: f64) -> PlaceRecord {
    PlaceRecord {
        reference,
        name: name.to_string(),
        latitude,
        longitude,
    }
}

pub fn link(start: i64, end: i64, mode: &str) -> LinkRecord {
    LinkRecord {
        start,
        end,
        mode: mode.to_string(),
    }
}

/// Two places a kilometre apart joined by a single Car link.
pub fn two_place_network() -> Network {
    Network::build(
        vec![place("A", 1, 53.0, -0.3), place("B", 2, 53.01, -0.3)],
        vec![link(1, 2, "Car")],
    )
}
