//! The guessing engine.
//!
//! `GuessingEngine` owns the character database and the per-round state: the
//! candidates still consistent with the player's answers and the attributes
//! already asked about. Each round walks
//! `Init -> Asking -> {GuessOne, GuessFew, GuessNone} -> (Learn)? -> Done`.
//!
//! Questions are chosen greedily: the unasked attribute whose values split
//! the candidates most evenly goes first.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::character::{Character, NAME_KEY};
use crate::config::GameConfig;
use crate::question::{TRACKED_ATTRIBUTES, format_question};
use crate::store::CharacterStore;

/// Value a candidate is grouped under when it lacks the attribute being scored.
const UNKNOWN_VALUE: &str = "unknown";

/// Number of remaining names listed alongside a best-effort guess.
const SHORTLIST_LEN: usize = 3;

/// Where the current round is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Freshly reset; nothing asked yet.
    Init,
    /// At least one answer has been filtered in.
    Asking,
    /// Asking stopped with exactly one candidate.
    GuessOne,
    /// Asking stopped with several candidates; a random one was guessed.
    GuessFew,
    /// Asking stopped with no candidates left.
    GuessNone,
    /// The player taught the engine a new character.
    Learn,
    /// The round is over.
    Done,
}

/// How a round ends once no more questions are asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one candidate is left.
    Exact(String),
    /// Several candidates are left; `guess` is picked at random among them.
    BestEffort {
        /// The guessed name.
        guess: String,
        /// The first few remaining names, for display.
        shortlist: Vec<String>,
        /// How many candidates remain.
        remaining: usize,
    },
    /// No candidate matches the answers given.
    Unknown,
}

/// A character the player taught the engine.
#[derive(Debug, Clone)]
pub struct Learned {
    /// The new record, as appended to the database.
    pub character: Character,
    /// Whether the database was written back successfully.
    pub saved: bool,
}

/// Asks questions, narrows candidates, and guesses.
pub struct GuessingEngine<R = StdRng> {
    store: CharacterStore,
    characters: Vec<Character>,
    candidates: Vec<Character>,
    asked: Vec<String>,
    state: RoundState,
    guess_pool: usize,
    rng: R,
}

impl GuessingEngine<StdRng> {
    /// Load the database from `store` and seed the guess RNG from `config`.
    pub fn new(store: CharacterStore, config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(store, config, rng)
    }
}

impl<R: Rng> GuessingEngine<R> {
    /// Load the database from `store`, guessing with `rng`.
    pub fn with_rng(store: CharacterStore, config: &GameConfig, rng: R) -> Self {
        let characters = store.load();
        let candidates = characters.clone();
        Self {
            store,
            characters,
            candidates,
            asked: Vec::new(),
            state: RoundState::Init,
            guess_pool: config.guess_pool.max(2),
            rng,
        }
    }

    /// The full database.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Candidates still consistent with this round's answers.
    pub fn candidates(&self) -> &[Character] {
        &self.candidates
    }

    /// Attributes asked about this round, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// The current round state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The store the database is persisted through.
    pub fn store(&self) -> &CharacterStore {
        &self.store
    }

    /// Start a new round over the full database.
    pub fn reset(&mut self) {
        self.candidates = self.characters.clone();
        self.asked.clear();
        self.state = RoundState::Init;
    }

    /// Pick the unasked attribute that best splits the candidates, or `None`
    /// if no attribute can tell them apart.
    ///
    /// Ties go to the alphabetically first attribute.
    pub fn select_next_attribute(&self) -> Option<String> {
        let mut best: Option<(&str, usize)> = None;

        for attribute in self.unasked_attributes() {
            let Some(score) = self.split_score(attribute) else {
                continue;
            };
            debug!("Attribute {attribute:?} scores {score}");
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((attribute, score));
            }
        }

        match best {
            Some((attribute, score)) => {
                debug!(
                    "Asking about {attribute:?} (score {score}, {} candidates)",
                    self.candidates.len()
                );
                Some(attribute.to_string())
            }
            None => {
                debug!(
                    "No discriminating attribute among {} candidates",
                    self.candidates.len()
                );
                None
            }
        }
    }

    /// How evenly `attribute` splits the candidates; lower is better.
    ///
    /// Two distinct values score the difference between the group sizes, more
    /// than two score the smallest group. `None` if every candidate shares one
    /// value. Candidates lacking the attribute count as `"unknown"`.
    pub fn split_score(&self, attribute: &str) -> Option<usize> {
        let mut groups: BTreeMap<String, usize> = BTreeMap::new();
        for candidate in &self.candidates {
            let value = candidate
                .get(attribute)
                .unwrap_or(UNKNOWN_VALUE)
                .to_lowercase();
            *groups.entry(value).or_default() += 1;
        }

        let sizes: Vec<usize> = groups.into_values().collect();
        match sizes.as_slice() {
            [] | [_] => None,
            [a, b] => Some(a.abs_diff(*b)),
            _ => sizes.iter().copied().min(),
        }
    }

    /// Keep only candidates whose `attribute` equals `answer`
    /// (case-insensitive, missing attribute counts as empty) and mark the
    /// attribute as asked. Returns the candidate counts before and after.
    pub fn filter(&mut self, attribute: &str, answer: &str) -> (usize, usize) {
        let answer = answer.trim();
        let before = self.candidates.len();
        self.candidates.retain(|c| c.answers(attribute, answer));
        self.asked.push(attribute.to_string());
        self.state = RoundState::Asking;

        let after = self.candidates.len();
        debug!("{attribute} = {answer:?}: {before} -> {after} candidates");
        (before, after)
    }

    /// The question text for `attribute`.
    pub fn format_question(&self, attribute: &str) -> String {
        format_question(attribute)
    }

    /// Guess a name if the candidate pool is small enough.
    ///
    /// One candidate is returned as-is. Up to the guess pool size, a random
    /// candidate is picked. Otherwise there is no guess yet.
    pub fn guess(&mut self) -> Option<String> {
        let remaining = self.candidates.len();
        let guess = match remaining {
            1 => Some(self.candidates[0].name().to_string()),
            n if (2..=self.guess_pool).contains(&n) => Some(self.pick_candidate()),
            _ => None,
        };
        debug!("Guess among {remaining} candidates: {guess:?}");
        guess
    }

    /// End the asking phase and decide how the round resolves.
    pub fn resolve(&mut self) -> Resolution {
        match self.candidates.len() {
            0 => {
                self.state = RoundState::GuessNone;
                Resolution::Unknown
            }
            1 => {
                self.state = RoundState::GuessOne;
                Resolution::Exact(self.candidates[0].name().to_string())
            }
            remaining => {
                self.state = RoundState::GuessFew;
                let guess = match self.guess() {
                    Some(name) => name,
                    None => self.pick_candidate(),
                };
                let shortlist = self
                    .candidates
                    .iter()
                    .take(SHORTLIST_LEN)
                    .map(|c| c.name().to_string())
                    .collect();
                Resolution::BestEffort {
                    guess,
                    shortlist,
                    remaining,
                }
            }
        }
    }

    /// Build a new character from `name` and one answer per tracked
    /// attribute, append it to the database, and save.
    ///
    /// `answer` receives each attribute with its question text. Answers are
    /// trimmed and lower-cased before storing. If `answer` fails, nothing is
    /// added.
    pub fn learn_character<F, E>(&mut self, name: &str, mut answer: F) -> Result<Learned, E>
    where
        F: FnMut(&str, &str) -> Result<String, E>,
    {
        let mut character = Character::new(name.trim());
        for attribute in TRACKED_ATTRIBUTES {
            let question = format_question(attribute);
            let value = answer(attribute, &question)?;
            character.insert(attribute, value.trim().to_lowercase());
        }

        let saved = self
            .store
            .add_character(&mut self.characters, character.clone());
        self.state = RoundState::Learn;
        info!(
            "Learned {:?} ({} characters known, saved: {saved})",
            character.name(),
            self.characters.len()
        );

        Ok(Learned { character, saved })
    }

    /// Mark the round as finished.
    pub fn finish(&mut self) {
        self.state = RoundState::Done;
    }

    /// Attribute names present on any candidate, minus `name` and anything
    /// already asked, in sorted order.
    fn unasked_attributes(&self) -> BTreeSet<&str> {
        self.candidates
            .iter()
            .flat_map(Character::attribute_names)
            .filter(|attribute| *attribute != NAME_KEY)
            .filter(|attribute| !self.asked.iter().any(|a| a == attribute))
            .collect()
    }

    fn pick_candidate(&mut self) -> String {
        let index = self.rng.random_range(0..self.candidates.len());
        self.candidates[index].name().to_string()
    }
}
