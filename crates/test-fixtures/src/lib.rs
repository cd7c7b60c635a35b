//! Test fixture loader for Topos integration scenarios.
//!
//! Scenarios are JSON files under `scenarios/`: a list of causal triples with
//! domain tags plus the expectations a test asserts against.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use topos_core::models::CausalTriple;

/// A named set of triples fed through ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub triples: Vec<CausalTriple>,
    #[serde(default)]
    pub expected: serde_json::Value,
}

/// Root directory of the fixture crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("scenarios").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `scenarios/<name>.json`.
pub fn load_scenario(name: &str) -> Scenario {
    load_fixture(&format!("scenarios/{name}.json"))
}

/// Every scenario file, sorted by path.
pub fn all_scenarios() -> Vec<Scenario> {
    let dir = fixtures_root().join("scenarios");
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    paths.sort();
    paths
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
        })
        .collect()
}

/// Deterministic embedding of dimension `dim` for a node id.
///
/// Not random: the same id always yields the same vector, so tests can pin
/// refiner outputs without storing embedding files.
pub fn embedding_for(id: &str, dim: usize) -> Vec<f32> {
    let seed = id
        .bytes()
        .fold(17u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    (0..dim)
        .map(|i| {
            let x = seed.wrapping_add(i as u32).wrapping_mul(2_654_435_761);
            (x % 2000) as f32 / 1000.0 - 1.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_load() {
        let scenarios = all_scenarios();
        assert!(scenarios.iter().any(|s| s.name == "econ_bio_analogy"));
        assert!(scenarios.iter().all(|s| !s.triples.is_empty()));
    }

    #[test]
    fn embeddings_are_deterministic_and_bounded() {
        let a = embedding_for("inflation", 8);
        assert_eq!(a, embedding_for("inflation", 8));
        assert_ne!(a, embedding_for("deflation", 8));
        assert!(a.iter().all(|v| (-1.0..1.0).contains(v)));
    }
}
