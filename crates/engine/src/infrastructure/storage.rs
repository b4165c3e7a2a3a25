//! JSON file storage for players and the item catalog.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/
//!   items.json           array of item templates
//!   players/<slug>.json  one pretty-printed player record per character
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thangorodrim_domain::{DomainError, Player};
use thiserror::Error;

const PLAYERS_DIR: &str = "players";
const ITEMS_FILE: &str = "items.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("No saved player at {0}")]
    PlayerNotFound(PathBuf),
    #[error("Player file {path} belongs to '{stored}', not '{requested}'")]
    NameCollision {
        path: PathBuf,
        requested: String,
        stored: String,
    },
}

/// File name stem for a character: lower-cased, with anything that is not
/// an ASCII letter or digit replaced by `_`.
///
/// Distinct names can share a slug ("Frodo Baggins", "Frodo-Baggins"), so the
/// store checks the recorded name on every save and load.
pub fn player_slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn player_path(&self, name: &str) -> PathBuf {
        self.root
            .join(PLAYERS_DIR)
            .join(format!("{}.json", player_slug(name)))
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join(ITEMS_FILE)
    }

    /// Write the player's record, replacing any earlier save of the same
    /// character. A file holding a different name is never overwritten.
    pub fn save_player(&self, player: &Player) -> Result<PathBuf, StorageError> {
        let name = player.name().as_str();
        let path = self.player_path(name);
        if path.exists() {
            check_stored_name(&path, &read_json(&path)?, name)?;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&player.to_record())?)?;
        tracing::debug!(path = %path.display(), "Player record written");
        Ok(path)
    }

    /// Load the saved player with this name.
    pub fn load_player(&self, name: &str) -> Result<Player, StorageError> {
        let path = self.player_path(name);
        if !path.exists() {
            return Err(StorageError::PlayerNotFound(path));
        }
        let value = read_json(&path)?;
        check_stored_name(&path, &value, name.trim())?;
        Ok(Player::from_record(&value)?)
    }

    /// Load a player record from an arbitrary file.
    pub fn load_player_file(path: &Path) -> Result<Player, StorageError> {
        let value = read_json(path)?;
        Ok(Player::from_record(&value)?)
    }

    /// Read every template in `items.json`. A missing file is an empty catalog.
    pub fn load_item_templates(&self) -> Result<Vec<Value>, StorageError> {
        let path = self.items_path();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "No item catalog file, starting empty");
            return Ok(Vec::new());
        }
        match read_json(&path)? {
            Value::Array(templates) => Ok(templates),
            _ => Err(DomainError::validation(format!(
                "Item catalog {} must be a JSON array",
                path.display()
            ))
            .into()),
        }
    }

    /// Replace `items.json` with these templates.
    pub fn save_item_templates(&self, templates: &[Value]) -> Result<PathBuf, StorageError> {
        let path = self.items_path();
        fs::create_dir_all(&self.root)?;
        fs::write(&path, serde_json::to_string_pretty(templates)?)?;
        Ok(path)
    }
}

fn read_json(path: &Path) -> Result<Value, StorageError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Names compare trimmed, the way `CharacterName` stores them.
fn check_stored_name(path: &Path, record: &Value, requested: &str) -> Result<(), StorageError> {
    let stored = record
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if stored == requested {
        return Ok(());
    }
    tracing::warn!(
        path = %path.display(),
        requested,
        stored,
        "Player file holds a different character"
    );
    Err(StorageError::NameCollision {
        path: path.to_path_buf(),
        requested: requested.to_string(),
        stored: stored.to_string(),
    })
}
