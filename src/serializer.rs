// src/serializer.rs

//! Turns a wall's crates into the flat `.crate` byte stream consumed by
//! the LED controller firmware, and writes it to disk.
//!
//! The format is 3 raw bytes (R, G, B) per buffer slot, concatenated
//! across included crates in ascending chain-position order. There are
//! no headers, lengths, or delimiters; the firmware knows each crate's
//! pixel count from its own configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};

use crate::wall::{Crate, Wall};

/// Serializes the included crates to the raw byte stream.
///
/// Crates without a chain position are skipped. The sort is stable, so
/// crates sharing a chain position keep their wall construction order.
pub fn serialize(crates: &[Crate]) -> Vec<u8> {
    let mut chained: Vec<&Crate> = crates
        .iter()
        .filter(|c| c.chain().position().is_some())
        .collect();
    chained.sort_by_key(|c| c.chain().position());

    let mut output = Vec::with_capacity(chained.iter().map(|c| c.buffer_len() * 3).sum());
    for c in &chained {
        for color in c.colors() {
            output.extend_from_slice(&color.to_bytes());
        }
    }
    debug!(
        "serialized {} of {} crates into {} bytes",
        chained.len(),
        crates.len(),
        output.len()
    );
    output
}

/// The artifact name encodes the wall's name and geometry:
/// `{name}_w{width}_h{height}_cw{crate_width}_ch{crate_height}.crate`.
pub fn output_file_name(wall: &Wall) -> String {
    format!(
        "{}_w{}_h{}_cw{}_ch{}.crate",
        wall.name(),
        wall.width(),
        wall.height(),
        wall.crate_width(),
        wall.crate_height()
    )
}

/// Serializes `wall` and writes the artifact into `directory`.
///
/// The bytes go to a temporary sibling first and are renamed into place,
/// so a failed write reports an error and leaves any previous artifact
/// untouched rather than a half-written file.
pub fn write(wall: &Wall, directory: &Path) -> anyhow::Result<PathBuf> {
    let output = serialize(wall.crates());
    let path = directory.join(output_file_name(wall));
    let tmp_path = path.with_extension("crate.tmp");

    fs::write(&tmp_path, &output)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, &path) {
        // Best effort: don't leave the temporary behind on a failed rename.
        let _ = fs::remove_file(&tmp_path);
        return Err(anyhow::Error::from(e)
            .context(format!("failed to move {} into place", path.display())));
    }

    info!("saved {} bytes to {}", output.len(), path.display());
    Ok(path)
}
