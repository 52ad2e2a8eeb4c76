use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute key holding a character's display name.
pub const NAME_KEY: &str = "name";

/// One character in the guessing database.
///
/// A record is a free-form mapping from attribute name to value. Records in
/// the same database may carry different attributes; only `name` is expected
/// on all of them. Key order is kept so that a load/save round trip leaves
/// the file's layout intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Character {
    attributes: IndexMap<String, String>,
}

impl Character {
    /// Create a record holding only a name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut character = Self::default();
        character.insert(NAME_KEY, name);
        character
    }

    /// Builder form of [`Character::insert`].
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Set an attribute, replacing any previous value in place.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(attribute.into(), value.into());
    }

    /// The character's name, or `""` for a record without one.
    pub fn name(&self) -> &str {
        self.get(NAME_KEY).unwrap_or("")
    }

    /// The stored value of an attribute.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// Whether the attribute case-insensitively equals `value`, counting a
    /// missing attribute as the empty string.
    pub fn answers(&self, attribute: &str, value: &str) -> bool {
        eq_ignore_case(self.get(attribute).unwrap_or(""), value)
    }

    /// Whether the attribute is present and case-insensitively equals `value`.
    pub fn has_value(&self, attribute: &str, value: &str) -> bool {
        self.get(attribute)
            .is_some_and(|stored| eq_ignore_case(stored, value))
    }

    /// Attribute names in stored order, `name` included.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// Case-insensitive string equality used for every attribute comparison.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_name() {
        let c = Character::new("Batman");
        assert_eq!(c.name(), "Batman");
        assert_eq!(c.attribute_names().count(), 1);
    }

    #[test]
    fn missing_name_is_empty() {
        let c = Character::default().with("gender", "male");
        assert_eq!(c.name(), "");
    }

    #[test]
    fn answers_treats_missing_as_empty() {
        let c = Character::new("Batman").with("gender", "Male");
        assert!(c.answers("gender", "male"));
        assert!(c.answers("gender", "MALE"));
        assert!(!c.answers("gender", "female"));
        assert!(c.answers("universe", ""));
        assert!(!c.answers("universe", "dc"));
    }

    #[test]
    fn has_value_requires_presence() {
        let c = Character::new("Batman").with("universe", "DC");
        assert!(c.has_value("universe", "dc"));
        assert!(!c.has_value("human", ""));
    }

    #[test]
    fn keeps_insertion_order() {
        let c = Character::new("Storm")
            .with("universe", "marvel")
            .with("gender", "female")
            .with("has_powers", "yes");
        let names: Vec<_> = c.attribute_names().collect();
        assert_eq!(names, ["name", "universe", "gender", "has_powers"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut c = Character::new("Hulk")
            .with("human", "yes")
            .with("is_hero", "yes");
        c.insert("human", "no");
        let names: Vec<_> = c.attribute_names().collect();
        assert_eq!(names, ["name", "human", "is_hero"]);
        assert_eq!(c.get("human"), Some("no"));
    }

    #[test]
    fn serializes_as_flat_object() {
        let c = Character::new("Flash").with("universe", "DC");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"name":"Flash","universe":"DC"}"#);

        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rejects_non_string_values() {
        let result = serde_json::from_str::<Character>(r#"{"name":"Flash","age":30}"#);
        assert!(result.is_err());
    }
}
