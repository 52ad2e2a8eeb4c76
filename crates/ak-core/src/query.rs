use crate::character::Character;

/// A builder for filtering a slice of character records.
///
/// Results keep the order of the input slice.
pub struct CharacterQuery<'c> {
    records: &'c [Character],
    value_filters: Vec<(String, String)>,
}

impl<'c> CharacterQuery<'c> {
    /// Start a query over `records`.
    pub fn new(records: &'c [Character]) -> Self {
        Self {
            records,
            value_filters: Vec::new(),
        }
    }

    /// Keep records whose attribute case-insensitively equals `value`.
    /// Records missing the attribute never match.
    pub fn attribute(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.value_filters.push((attribute.into(), value.into()));
        self
    }

    /// Execute the query and return matching records.
    pub fn execute(self) -> Vec<&'c Character> {
        self.records.iter().filter(|c| self.matches(c)).collect()
    }

    fn matches(&self, character: &Character) -> bool {
        self.value_filters
            .iter()
            .all(|(attribute, value)| character.has_value(attribute, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Character> {
        vec![
            Character::new("Batman")
                .with("universe", "DC")
                .with("has_powers", "no")
                .with("wears_mask", "yes"),
            Character::new("Superman")
                .with("universe", "DC")
                .with("has_powers", "yes"),
            Character::new("Spider-Man")
                .with("universe", "Marvel")
                .with("has_powers", "yes")
                .with("wears_mask", "yes"),
        ]
    }

    fn names<'c>(results: &[&'c Character]) -> Vec<&'c str> {
        results.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn query_by_attribute() {
        let records = roster();
        let results = CharacterQuery::new(&records)
            .attribute("universe", "dc")
            .execute();
        assert_eq!(names(&results), ["Batman", "Superman"]);
    }

    #[test]
    fn query_all_filters_must_match() {
        let records = roster();
        let results = CharacterQuery::new(&records)
            .attribute("universe", "DC")
            .attribute("has_powers", "YES")
            .execute();
        assert_eq!(names(&results), ["Superman"]);
    }

    #[test]
    fn missing_attribute_never_matches() {
        let records = roster();
        let results = CharacterQuery::new(&records)
            .attribute("wears_mask", "")
            .execute();
        assert!(results.is_empty());
    }

    #[test]
    fn query_keeps_input_order() {
        let records = roster();
        let results = CharacterQuery::new(&records)
            .attribute("wears_mask", "YES")
            .execute();
        assert_eq!(names(&results), ["Batman", "Spider-Man"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let records = roster();
        let results = CharacterQuery::new(&records).execute();
        assert_eq!(results.len(), 3);
    }
}
