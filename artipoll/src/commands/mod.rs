//! Command implementations for the CLI.

mod poll;
mod query;

use std::path::Path;

use anyhow::{Context, Result};
use artipoll_core::ArtipollConfig;

pub use poll::{cmd_last_poll, cmd_record_poll};
pub use query::{cmd_artifact, cmd_versions};

fn load_config(path: &Path) -> Result<ArtipollConfig> {
    ArtipollConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}
