//! Plain-text transcript export.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::session::TranscriptEntry;

/// Renders each entry as `ROLE:\ncontent\n\n`, in order.
pub fn render(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}:\n{}\n\n", entry.role.to_uppercase(), entry.content))
        .collect()
}

/// File name used by `/save` without an argument.
pub fn default_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("transcript_{}.txt", now.format("%Y%m%d_%H%M%S")))
}

pub fn save(path: &Path, entries: &[TranscriptEntry]) -> Result<()> {
    fs::write(path, render(entries))
        .with_context(|| format!("Failed to write transcript to {}", path.display()))
}
