//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use crucible_lib::CostGrid;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load a grid fixture by file name.
#[allow(dead_code)]
pub fn fixture_grid(name: &str) -> CostGrid {
    let path = fixtures_dir().join(name);
    CostGrid::from_path(&path).unwrap_or_else(|err| panic!("load {}: {err}", path.display()))
}

/// The canonical 13x13 example grid.
#[allow(dead_code)]
pub fn example_grid() -> CostGrid {
    fixture_grid("example.txt")
}
