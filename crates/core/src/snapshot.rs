//! Versioned recipe snapshot stored with every commit.
//!
//! A snapshot is written once and then read for the lifetime of the
//! recipe's history, so the struct is explicitly versioned and every
//! field except the title defaults on deserialization. Rows written
//! under an older schema keep decoding as the live schema grows.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Schema version written into every new snapshot.
pub const SNAPSHOT_SCHEMA_VERSION: u16 = 1;

fn current_schema_version() -> u16 {
    SNAPSHOT_SCHEMA_VERSION
}

fn default_servings() -> i32 {
    2
}

fn default_difficulty() -> String {
    "Easy".to_string()
}

// ---------------------------------------------------------------------------
// Ingredient
// ---------------------------------------------------------------------------

/// A single ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Complete recipe content at one point in its history.
///
/// Enables O(1) reads of any historical state without replaying diffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    #[serde(default = "current_schema_version")]
    pub schema_version: u16,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: String,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub prep_time_minutes: i32,
    #[serde(default)]
    pub cook_time_minutes: i32,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

impl RecipeSnapshot {
    /// Check the minimum shape required of any snapshot.
    ///
    /// A snapshot without a title cannot participate in diffing or
    /// comparison.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Snapshot is missing a title".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
