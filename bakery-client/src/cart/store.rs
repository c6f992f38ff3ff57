//! Cart persistence - JSON file in a client-local directory

use std::fs;
use std::path::{Path, PathBuf};

use shared::models::CartLine;
use shared::pricing;

use crate::ClientResult;

/// Default cart file name
pub const CART_FILE: &str = "cart.json";

/// File-backed cart storage
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Store `cart.json` inside `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::at(base_path.into().join(CART_FILE))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the saved cart; a missing or unreadable file is an empty cart.
    /// Lines the server would reject (quantity below 1, invalid weight) are
    /// dropped.
    pub fn load(&self) -> Vec<CartLine> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cart file unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartLine>>(&json) {
            Ok(lines) => lines.into_iter().filter(is_valid_line).collect(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cart file corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Save the whole cart (write to a sibling temp file, then rename)
    pub fn save(&self, lines: &[CartLine]) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(lines)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove the cart file
    pub fn delete(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_valid_line(line: &CartLine) -> bool {
    let valid = line.quantity > 0
        && pricing::validate_weight(line.item_id, Some(line.weight))
            .is_ok_and(|w| w == line.weight);
    if !valid {
        tracing::warn!(
            item_id = line.item_id,
            quantity = line.quantity,
            weight = line.weight,
            "Dropping invalid cart line"
        );
    }
    valid
}
