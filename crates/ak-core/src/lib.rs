//! Core of Terminal Akinator: character records, their JSON store, and the
//! question-asking guessing engine.
//!
//! The engine keeps the whole database in memory, narrows a candidate set
//! with every answer, and appends (then persists) new characters the player
//! teaches it. Nothing here touches the terminal; see the `ak-cli` crate for
//! the interactive loop.

/// Character records and their attribute mapping.
pub mod character;
/// Game configuration.
pub mod config;
/// The guessing engine and its round state machine.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Attribute filtering over a slice of records.
pub mod query;
/// Canned question text for attributes.
pub mod question;
/// JSON-backed character store.
pub mod store;

/// Re-export the record type.
pub use character::Character;
/// Re-export configuration.
pub use config::GameConfig;
/// Re-export engine types.
pub use engine::{GuessingEngine, Learned, Resolution, RoundState};
/// Re-export error types.
pub use error::{AkError, AkResult};
/// Re-export question helpers.
pub use question::{TRACKED_ATTRIBUTES, format_question};
/// Re-export the store and its search utility.
pub use store::{CharacterStore, search};
