//! Deterministic output file names.

use std::path::{Path, PathBuf};

/// Extension of exported files.
pub const EXTENSION: &str = "pdf";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `Fig<id:03>_<name>`, with `Figure<id>` standing in for a blank name.
pub fn base_name(id: u32, name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() {
        format!("Figure{}", id)
    } else {
        sanitize(name)
    };
    format!("Fig{:03}_{}", id, name)
}

/// Full output path of a figure inside `dir`.
pub fn output_path(dir: &Path, id: u32, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", base_name(id, name), EXTENSION))
}
