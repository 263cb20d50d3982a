//! Field-level diff between two recipe snapshots.
//!
//! Produces the change descriptor stored in each commit's `changes`
//! column. Scalar fields record `{from, to}` pairs; the two container
//! fields (`ingredients`, `steps`) record only that they changed, as a
//! bare `true`. Container contents are compared by whole-collection
//! identity, not element by element.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::snapshot::RecipeSnapshot;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Descriptor types
// ---------------------------------------------------------------------------

/// One entry in a change descriptor.
///
/// Serialized untagged so descriptors read naturally as JSON:
/// `{"from": 4, "to": 6}`, `true`, or a free-form marker value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldChange {
    /// A scalar field changed from one value to another.
    Updated { from: Value, to: Value },
    /// A container field changed; only the fact is recorded.
    Touched(bool),
    /// A marker entry (e.g. the `action` key on creation and fork
    /// commits). Kept as raw JSON for forward compatibility.
    Note(Value),
}

/// Map of changed field names to what happened to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeDescriptor(pub BTreeMap<String, FieldChange>);

impl ChangeDescriptor {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    /// Descriptor for the initial commit of a freshly created recipe.
    pub fn creation() -> Self {
        let mut map = BTreeMap::new();
        map.insert("action".to_string(), FieldChange::Note(Value::from("create")));
        Self(map)
    }

    /// Descriptor for version 1 of a forked recipe.
    pub fn fork_from(original_recipe_id: DbId) -> Self {
        let mut map = BTreeMap::new();
        map.insert("action".to_string(), FieldChange::Note(Value::from("fork")));
        map.insert(
            "from_recipe_id".to_string(),
            FieldChange::Note(Value::from(original_recipe_id)),
        );
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Diff engine
// ---------------------------------------------------------------------------

/// Compute the change descriptor between two snapshots.
///
/// Pure and side-effect free. Fails if either snapshot is missing its
/// required fields.
pub fn compute_changes(
    old: &RecipeSnapshot,
    new: &RecipeSnapshot,
) -> Result<ChangeDescriptor, CoreError> {
    old.validate()?;
    new.validate()?;

    let mut changes = BTreeMap::new();

    scalar(&mut changes, "title", &old.title, &new.title);
    scalar(&mut changes, "description", &old.description, &new.description);
    scalar(&mut changes, "category", &old.category, &new.category);
    scalar(&mut changes, "tags", &old.tags, &new.tags);
    scalar(&mut changes, "servings", &old.servings, &new.servings);
    scalar(
        &mut changes,
        "prep_time_minutes",
        &old.prep_time_minutes,
        &new.prep_time_minutes,
    );
    scalar(
        &mut changes,
        "cook_time_minutes",
        &old.cook_time_minutes,
        &new.cook_time_minutes,
    );
    scalar(&mut changes, "difficulty", &old.difficulty, &new.difficulty);

    // Containers: whole-collection identity only.
    if old.steps != new.steps {
        changes.insert("steps".to_string(), FieldChange::Touched(true));
    }
    if old.ingredients != new.ingredients {
        changes.insert("ingredients".to_string(), FieldChange::Touched(true));
    }

    Ok(ChangeDescriptor(changes))
}

fn scalar<T>(changes: &mut BTreeMap<String, FieldChange>, field: &str, old: &T, new: &T)
where
    T: PartialEq + Clone + Into<Value>,
{
    if old != new {
        changes.insert(
            field.to_string(),
            FieldChange::Updated {
                from: old.clone().into(),
                to: new.clone().into(),
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
