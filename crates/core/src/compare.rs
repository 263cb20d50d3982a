//! Pairwise recipe comparison.
//!
//! Compares the current snapshots of two recipes the way a repository
//! compare view would: per-field `{base, compare}` pairs for scalars,
//! count deltas for the ingredient list, and a length delta for the
//! steps text.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::snapshot::RecipeSnapshot;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A scalar field that differs between the two sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDiff {
    pub base: Value,
    pub compare: Value,
}

/// Ingredient list delta. Lists are compared by whole-collection
/// identity; only counts are reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientsDiff {
    pub base_count: usize,
    pub compare_count: usize,
}

/// Steps text delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepsDiff {
    pub base_length: usize,
    pub compare_length: usize,
    pub changed: bool,
}

/// Full comparison between two recipe snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeComparison {
    pub differences: BTreeMap<String, ValueDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<IngredientsDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<StepsDiff>,
    pub has_changes: bool,
}

// ---------------------------------------------------------------------------
// Compare engine
// ---------------------------------------------------------------------------

/// Compare two snapshots field by field.
///
/// Comparing a snapshot against itself yields `has_changes == false`
/// and an empty descriptor.
pub fn compare_snapshots(
    base: &RecipeSnapshot,
    compare: &RecipeSnapshot,
) -> Result<RecipeComparison, CoreError> {
    base.validate()?;
    compare.validate()?;

    let mut differences = BTreeMap::new();

    field(&mut differences, "title", &base.title, &compare.title);
    field(
        &mut differences,
        "description",
        &base.description,
        &compare.description,
    );
    field(&mut differences, "category", &base.category, &compare.category);
    field(&mut differences, "tags", &base.tags, &compare.tags);
    field(&mut differences, "servings", &base.servings, &compare.servings);
    field(
        &mut differences,
        "prep_time_minutes",
        &base.prep_time_minutes,
        &compare.prep_time_minutes,
    );
    field(
        &mut differences,
        "cook_time_minutes",
        &base.cook_time_minutes,
        &compare.cook_time_minutes,
    );
    field(
        &mut differences,
        "difficulty",
        &base.difficulty,
        &compare.difficulty,
    );

    let ingredients = (base.ingredients != compare.ingredients).then(|| IngredientsDiff {
        base_count: base.ingredients.len(),
        compare_count: compare.ingredients.len(),
    });

    let steps = (base.steps != compare.steps).then(|| StepsDiff {
        base_length: base.steps.len(),
        compare_length: compare.steps.len(),
        changed: true,
    });

    let has_changes = !differences.is_empty() || ingredients.is_some() || steps.is_some();

    Ok(RecipeComparison {
        differences,
        ingredients,
        steps,
        has_changes,
    })
}

fn field<T>(differences: &mut BTreeMap<String, ValueDiff>, name: &str, base: &T, compare: &T)
where
    T: PartialEq + Clone + Into<Value>,
{
    if base != compare {
        differences.insert(
            name.to_string(),
            ValueDiff {
                base: base.clone().into(),
                compare: compare.clone().into(),
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
