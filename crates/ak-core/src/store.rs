//! JSON file store for the character database.
//!
//! The whole database lives in one pretty-printed JSON array. It is read once
//! at startup and rewritten in full whenever a character is added. Storage
//! problems never stop a game: [`CharacterStore::load`] falls back to an
//! empty database and [`CharacterStore::save`] reports `false`, both after
//! logging what went wrong.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::character::Character;
use crate::error::{AkError, AkResult};
use crate::query::CharacterQuery;

/// Reads and writes the character database at a fixed path.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    path: PathBuf,
}

impl CharacterStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records, or an empty database if the file is missing or
    /// unreadable.
    pub fn load(&self) -> Vec<Character> {
        match self.try_load() {
            Ok(characters) => {
                info!(
                    "Loaded {} characters from {}",
                    characters.len(),
                    self.path.display()
                );
                characters
            }
            Err(e) => {
                warn!("{e}; starting with an empty database");
                Vec::new()
            }
        }
    }

    /// Load all records, reporting why the file could not be used.
    ///
    /// A missing file is not an error. The containing directory is created
    /// if needed.
    pub fn try_load(&self) -> AkResult<Vec<Character>> {
        self.ensure_parent_dir()?;

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No database at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(AkError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| AkError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the backing file with `characters`. Returns `false` (after
    /// logging) if anything went wrong.
    pub fn save(&self, characters: &[Character]) -> bool {
        match self.try_save(characters) {
            Ok(()) => {
                debug!(
                    "Saved {} characters to {}",
                    characters.len(),
                    self.path.display()
                );
                true
            }
            Err(e) => {
                error!("Error saving database: {e}");
                false
            }
        }
    }

    /// Overwrite the backing file with `characters`.
    pub fn try_save(&self, characters: &[Character]) -> AkResult<()> {
        self.ensure_parent_dir()?;

        let encoded = serde_json::to_string_pretty(characters);
        let mut json = encoded.map_err(|source| AkError::Encode {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');

        fs::write(&self.path, json).map_err(|source| AkError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Append `character` to `characters` and save the result.
    pub fn add_character(&self, characters: &mut Vec<Character>, character: Character) -> bool {
        characters.push(character);
        self.save(characters)
    }

    fn ensure_parent_dir(&self) -> AkResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|source| AkError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Records whose attributes all case-insensitively match `filters`.
///
/// Records missing a filtered attribute never match. Order is preserved.
pub fn search<'c, K, V>(records: &'c [Character], filters: &[(K, V)]) -> Vec<&'c Character>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = CharacterQuery::new(records);
    for (attribute, value) in filters {
        query = query.attribute(attribute.as_ref(), value.as_ref());
    }
    query.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn roster() -> Vec<Character> {
        vec![
            Character::new("Batman")
                .with("gender", "male")
                .with("universe", "DC")
                .with("has_powers", "no"),
            Character::new("Wonder Woman")
                .with("gender", "female")
                .with("universe", "DC")
                .with("has_powers", "yes"),
            Character::new("Iron Man")
                .with("gender", "male")
                .with("universe", "Marvel"),
        ]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("characters.json"));
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn load_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("nested");
        let store = CharacterStore::new(nested.join("characters.json"));
        assert!(store.load().is_empty());
        assert!(nested.is_dir());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("characters.json");
        fs::write(&path, "{ not json").unwrap();

        let store = CharacterStore::new(&path);
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(AkError::Parse { .. })));
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("characters.json");
        fs::write(&path, r#"{"name": "Batman"}"#).unwrap();

        let store = CharacterStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("characters.json"));
        assert!(store.save(&roster()));
        assert_eq!(store.load(), roster());
    }

    #[test]
    fn save_is_pretty_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("characters.json"));
        let records = vec![Character::new("Ōkami").with("universe", "other")];
        assert!(store.save(&records));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            raw,
            "[\n  {\n    \"name\": \"Ōkami\",\n    \"universe\": \"other\"\n  }\n]\n"
        );
    }

    #[test]
    fn round_trip_preserves_order_and_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("characters.json");
        fs::write(
            &path,
            r#"[
  {"universe": "Marvel", "name": "Storm", "gender": "female"},
  {"name": "Alfred"},
  {"name": "Joker", "is_hero": "no", "laugh": "maniacal"}
]"#,
        )
        .unwrap();

        let store = CharacterStore::new(&path);
        let loaded = store.load();
        assert!(store.save(&loaded));
        let reloaded = store.load();

        assert_eq!(reloaded, loaded);
        let names: Vec<_> = reloaded.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Storm", "Alfred", "Joker"]);
        let keys: Vec<_> = reloaded[0].attribute_names().collect();
        assert_eq!(keys, ["universe", "name", "gender"]);
    }

    #[test]
    fn save_failure_returns_false() {
        let dir = TempDir::new().unwrap();
        // The parent "directory" is a regular file, so nothing can be written.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = CharacterStore::new(blocker.join("characters.json"));

        assert!(!store.save(&roster()));
        let result = store.try_save(&roster());
        assert!(matches!(result, Err(AkError::Io { .. })));
    }

    #[test]
    fn add_character_appends_and_saves() {
        let dir = TempDir::new().unwrap();
        let store = CharacterStore::new(dir.path().join("characters.json"));
        let mut records = roster();

        assert!(store.add_character(&mut records, Character::new("Robin")));
        assert_eq!(records.len(), 4);
        assert_eq!(store.load().last().map(Character::name), Some("Robin"));
    }

    #[test]
    fn search_matches_all_filters() {
        let records = roster();
        let found = search(&records, &[("gender", "MALE"), ("universe", "dc")]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Batman");
    }

    #[test]
    fn search_skips_records_missing_attribute() {
        let records = roster();
        let found = search(&records, &[("has_powers", "")]);
        assert!(found.is_empty());
    }

    #[test]
    fn search_without_filters_returns_everything() {
        let records = roster();
        let none: [(&str, &str); 0] = [];
        assert_eq!(search(&records, &none).len(), 3);
    }
}
