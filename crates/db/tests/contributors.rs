//! Integration tests for the contributor ledger upsert and listings.

use sqlx::PgPool;

use forkful_core::contribution::ContributionType;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_db::models::profile::CreateProfile;
use forkful_db::repositories::{ContributorRepo, ProfileRepo, RecipeRepo};

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

async fn new_recipe(pool: &PgPool, owner: i64, title: &str) -> i64 {
    let content: RecipeSnapshot =
        serde_json::from_value(serde_json::json!({"title": title})).unwrap();
    RecipeRepo::create(pool, owner, &content).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Test: record inserts then increments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_upserts(pool: PgPool) {
    let owner = new_profile(&pool, "owner").await;
    let editor = new_profile(&pool, "editor").await;
    let recipe = new_recipe(&pool, owner, "Chilaquiles").await;

    let first = ContributorRepo::record(&pool, recipe, editor, ContributionType::Editor)
        .await
        .unwrap();
    assert_eq!(first.commit_count, 1);
    assert_eq!(first.contribution_type, "editor");

    let second = ContributorRepo::record(&pool, recipe, editor, ContributionType::Collaborator)
        .await
        .unwrap();
    assert_eq!(second.commit_count, 2);
    assert_eq!(
        second.contribution_type, "editor",
        "role keeps its first value"
    );
    assert!(second.last_contributed_at >= first.last_contributed_at);
    assert_eq!(second.first_contributed_at, first.first_contributed_at);
}

// ---------------------------------------------------------------------------
// Test: concurrent increments lose no updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_records_do_not_lose_updates(pool: PgPool) {
    let owner = new_profile(&pool, "owner").await;
    let editor = new_profile(&pool, "busy").await;
    let recipe = new_recipe(&pool, owner, "Huaraches").await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            ContributorRepo::record(&pool, recipe, editor, ContributionType::Editor).await
        }));
    }
    for handle in futures::future::join_all(handles).await {
        handle.unwrap().unwrap();
    }

    let row = ContributorRepo::find(&pool, recipe, editor)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.commit_count, 6, "every increment must land");
}

// ---------------------------------------------------------------------------
// Test: listing is ordered by commit_count, then first contribution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_ordering(pool: PgPool) {
    let owner = new_profile(&pool, "owner").await;
    let early = new_profile(&pool, "early").await;
    let busy = new_profile(&pool, "busy").await;
    let recipe = new_recipe(&pool, owner, "Menudo").await;

    // `early` contributes once, `busy` three times.
    ContributorRepo::record(&pool, recipe, early, ContributionType::Editor)
        .await
        .unwrap();
    for _ in 0..3 {
        ContributorRepo::record(&pool, recipe, busy, ContributionType::Editor)
            .await
            .unwrap();
    }

    let list = ContributorRepo::list_by_recipe(&pool, recipe).await.unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].username, "busy");
    assert_eq!(list[0].commit_count, 3);
    // owner (creator, seeded first) and early both have 1 commit; the
    // earlier first_contributed_at wins the tie.
    assert_eq!(list[1].username, "owner");
    assert_eq!(list[2].username, "early");

    assert_eq!(ContributorRepo::count_by_recipe(&pool, recipe).await.unwrap(), 3);
}
