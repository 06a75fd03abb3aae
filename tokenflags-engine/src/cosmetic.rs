//! Cosmetic choices offered by the engine.

use crate::{Engine, EngineError, Result};

/// The choice that lets the engine pick a cosmetic itself. Always accepted.
pub const RANDOM_COSMETIC: &str = "Random";

/// Upper bound on enumeration, in case an engine never terminates its list.
const MAX_CHOICES: usize = 4096;

/// The list of cosmetic choices an engine offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CosmeticCatalog {
    choices: Vec<String>,
}

impl CosmeticCatalog {
    pub fn new(choices: Vec<String>) -> Self {
        Self { choices }
    }

    /// Enumerate choices from index 0 until the engine returns nothing.
    pub async fn load(engine: &dyn Engine) -> Result<Self> {
        let mut choices = Vec::new();
        for index in 0..MAX_CHOICES {
            match engine.cosmetic_choice(index).await? {
                Some(name) if !name.is_empty() => choices.push(name),
                _ => break,
            }
        }
        Ok(Self { choices })
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn contains(&self, choice: &str) -> bool {
        choice == RANDOM_COSMETIC || self.choices.iter().any(|c| c == choice)
    }

    /// Accept `choice` if the engine offers it.
    pub fn validate(&self, choice: &str) -> Result<()> {
        if self.contains(choice) {
            Ok(())
        } else {
            Err(EngineError::UnknownCosmetic(choice.to_string()))
        }
    }
}
