//! Loading recorded world packets.

use std::path::Path;

use anyhow::{Context, Result};
use game_core::WorldPacket;

/// Reads a JSON world packet from `path`.
pub fn load(path: &Path) -> Result<WorldPacket> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read packet file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse packet file: {}", path.display()))
}
