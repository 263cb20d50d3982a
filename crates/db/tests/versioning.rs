//! Integration tests for recipe creation seeding and the commit path.
//!
//! Exercises `RecipeRepo` and `VersionRepo` against a real database:
//! - Creation seeds version 1, the default branch, and the creator row
//! - Commits allocate contiguous version numbers and link parents
//! - `version_count` always equals the number of recorded commits,
//!   including after concurrent commits to the same recipe
//! - An empty diff produces no version
//! - History pagination and author join

use sqlx::PgPool;

use forkful_core::diff::FieldChange;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_db::models::profile::CreateProfile;
use forkful_db::repositories::{BranchRepo, ContributorRepo, ProfileRepo, RecipeRepo, VersionRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_profile(pool: &PgPool, username: &str) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            username: username.to_string(),
            display_name: format!("User {username}"),
            avatar_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn content(title: &str, servings: i32) -> RecipeSnapshot {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "servings": servings,
        "steps": "mix and cook",
        "ingredients": [{"name": "masa", "quantity": 2.0, "unit": "cups"}]
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: creation seeds the full repository shape
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_seeds_version_branch_and_contributor(pool: PgPool) {
    let owner = new_profile(&pool, "creator").await;
    let recipe = RecipeRepo::create(&pool, owner, &content("Tamales", 4))
        .await
        .unwrap();

    assert!(recipe.id > 0);
    assert_eq!(recipe.version_count, 1);
    assert!(!recipe.is_fork);
    assert_eq!(recipe.fork_count, 0);

    // Version 1 exists with the creation marker.
    let v1 = VersionRepo::find_by_recipe_and_number(&pool, recipe.id, 1)
        .await
        .unwrap()
        .expect("version 1 should exist");
    assert_eq!(v1.commit_message, "Initial recipe creation");
    assert!(v1.parent_version_id.is_none());
    assert_eq!(v1.snapshot.0.title, "Tamales");

    // Exactly one branch, and it is the default.
    let branches = BranchRepo::list_by_recipe(&pool, recipe.id).await.unwrap();
    assert_eq!(branches.len(), 1);
    assert!(branches[0].is_default);
    assert_eq!(branches[0].branch_name, "main");
    assert_eq!(branches[0].base_version_id, Some(v1.id));

    // Creator is on the ledger with one commit.
    let contributor = ContributorRepo::find(&pool, recipe.id, owner)
        .await
        .unwrap()
        .expect("creator should be a contributor");
    assert_eq!(contributor.contribution_type, "creator");
    assert_eq!(contributor.commit_count, 1);
}

// ---------------------------------------------------------------------------
// Test: commit appends a version and advances the counter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_appends_version(pool: PgPool) {
    let owner = new_profile(&pool, "committer").await;
    let recipe = RecipeRepo::create(&pool, owner, &content("Tamales", 4))
        .await
        .unwrap();

    let v2 = VersionRepo::commit(&pool, recipe.id, owner, "double batch", &content("Tamales", 6))
        .await
        .unwrap()
        .expect("a changed snapshot should produce a version");

    assert_eq!(v2.version_number, 2);
    assert_eq!(v2.commit_message, "double batch");

    // Parent links to version 1.
    let v1 = VersionRepo::find_by_recipe_and_number(&pool, recipe.id, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(v2.parent_version_id, Some(v1.id));

    // Change descriptor records the servings transition.
    assert_eq!(
        v2.changes.0.get("servings"),
        Some(&FieldChange::Updated {
            from: serde_json::json!(4),
            to: serde_json::json!(6),
        })
    );

    // The live recipe row was updated in the same transaction.
    let reloaded = RecipeRepo::find_by_id(&pool, recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.servings, 6);
    assert_eq!(reloaded.version_count, 2);
}

// ---------------------------------------------------------------------------
// Test: committing identical content is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_with_no_changes_creates_no_version(pool: PgPool) {
    let owner = new_profile(&pool, "noop").await;
    let recipe = RecipeRepo::create(&pool, owner, &content("Tamales", 4))
        .await
        .unwrap();

    let result = VersionRepo::commit(&pool, recipe.id, owner, "no-op", &content("Tamales", 4))
        .await
        .unwrap();
    assert!(result.is_none(), "identical content should not commit");

    let count = VersionRepo::count_by_recipe(&pool, recipe.id).await.unwrap();
    assert_eq!(count, 1, "only the seed version should exist");
}

// ---------------------------------------------------------------------------
// Test: commit against an unknown recipe fails with RowNotFound
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_unknown_recipe_fails(pool: PgPool) {
    let owner = new_profile(&pool, "ghost").await;
    let result =
        VersionRepo::commit(&pool, 999_999, owner, "nope", &content("Ghost", 2)).await;
    assert!(matches!(
        result,
        Err(forkful_db::DbError::Sqlx(sqlx::Error::RowNotFound))
    ));
}

// ---------------------------------------------------------------------------
// Test: version numbers stay contiguous under concurrent commits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_commits_are_gap_free(pool: PgPool) {
    let owner = new_profile(&pool, "racer").await;
    let recipe = RecipeRepo::create(&pool, owner, &content("Race", 2))
        .await
        .unwrap();

    // 8 concurrent commits, each with distinct content.
    let mut handles = Vec::new();
    for i in 0..8 {
        let pool = pool.clone();
        let recipe_id = recipe.id;
        handles.push(tokio::spawn(async move {
            VersionRepo::commit(
                &pool,
                recipe_id,
                owner,
                &format!("commit {i}"),
                &content("Race", 10 + i),
            )
            .await
        }));
    }

    for handle in futures::future::join_all(handles).await {
        handle
            .unwrap()
            .unwrap()
            .expect("every distinct commit should land");
    }

    // version_count equals the number of commits.
    let reloaded = RecipeRepo::find_by_id(&pool, recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.version_count, 9, "seed + 8 commits");

    let count = VersionRepo::count_by_recipe(&pool, recipe.id).await.unwrap();
    assert_eq!(count, 9);

    // Numbers form the contiguous sequence 1..=9 with no duplicates.
    let numbers: Vec<(i32,)> = sqlx::query_as(
        "SELECT version_number FROM recipe_versions
         WHERE recipe_id = $1 ORDER BY version_number",
    )
    .bind(recipe.id)
    .fetch_all(&pool)
    .await
    .unwrap();
    let numbers: Vec<i32> = numbers.into_iter().map(|n| n.0).collect();
    assert_eq!(numbers, (1..=9).collect::<Vec<i32>>());

    // The author's ledger row counted every commit (1 seed + 8).
    let contributor = ContributorRepo::find(&pool, recipe.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(contributor.commit_count, 9);
    assert_eq!(contributor.contribution_type, "creator", "role never downgrades");
}

// ---------------------------------------------------------------------------
// Test: history is newest first, paginated, and joins the author
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_pagination_and_author_join(pool: PgPool) {
    let owner = new_profile(&pool, "historian").await;
    let recipe = RecipeRepo::create(&pool, owner, &content("Stew", 2))
        .await
        .unwrap();

    for servings in [3, 4, 5] {
        VersionRepo::commit(
            &pool,
            recipe.id,
            owner,
            &format!("servings to {servings}"),
            &content("Stew", servings),
        )
        .await
        .unwrap()
        .unwrap();
    }

    // Full history: 4 entries, newest first.
    let all = VersionRepo::history(&pool, recipe.id, 20, 0).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].version_number, 4);
    assert_eq!(all[3].version_number, 1);
    assert_eq!(all[0].author_username, "historian");
    assert_eq!(all[0].commit_message, "servings to 5");

    // Second page of size 2.
    let page = VersionRepo::history(&pool, recipe.id, 2, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].version_number, 2);
    assert_eq!(page[1].version_number, 1);

    // Unknown recipe yields an empty list, not an error.
    let none = VersionRepo::history(&pool, 999_999, 20, 0).await.unwrap();
    assert!(none.is_empty());
}
