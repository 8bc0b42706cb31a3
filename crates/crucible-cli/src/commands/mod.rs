// Handlers for the CLI subcommands. main.rs parses arguments and dispatches here.

pub mod bounds;
pub mod solve;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crucible_lib::CostGrid;

/// Load a grid from `input`, reading stdin when it is `-`.
pub fn read_grid(input: &Path) -> Result<CostGrid> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read grid from stdin")?;
        return text.parse::<CostGrid>().context("failed to parse grid from stdin");
    }
    CostGrid::from_path(input)
        .with_context(|| format!("failed to load grid from {}", input.display()))
}
