/// Attributes asked about, in order, when the player teaches a new character.
pub const TRACKED_ATTRIBUTES: [&str; 6] = [
    "gender",
    "universe",
    "has_powers",
    "is_hero",
    "wears_mask",
    "human",
];

/// Turn an attribute name into the question put to the player.
///
/// Unknown attributes (anything a stored record happens to carry) get a
/// generic "What is your character's ...?" question.
pub fn format_question(attribute: &str) -> String {
    match attribute {
        "gender" => "Is your character male or female?".to_string(),
        "universe" => "What universe is your character from? (DC/Marvel/Other)".to_string(),
        "has_powers" => "Does your character have superpowers? (yes/no)".to_string(),
        "is_hero" => "Is your character a hero? (yes/no)".to_string(),
        "wears_mask" => "Does your character wear a mask? (yes/no)".to_string(),
        "human" => "Is your character human? (yes/no)".to_string(),
        other => format!("What is your character's {other}?"),
    }
}
