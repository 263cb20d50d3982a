//! Integration tests for branch management.

use sqlx::PgPool;

use forkful_core::snapshot::RecipeSnapshot;
use forkful_db::models::branch::CreateBranch;
use forkful_db::models::profile::CreateProfile;
use forkful_db::repositories::{BranchRepo, ProfileRepo, RecipeRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_profile(pool: &PgPool, username: &str) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            username: username.to_string(),
            display_name: String::new(),
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

fn new_branch(name: &str) -> CreateBranch {
    CreateBranch {
        name: name.to_string(),
        description: String::new(),
        base_version_id: None,
        parent_branch_id: None,
    }
}

// ---------------------------------------------------------------------------
// Test: create adds a non-default branch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_branch_is_not_default(pool: PgPool) {
    let owner = new_profile(&pool, "brancher").await;
    let recipe = new_recipe(&pool, owner, "Enchiladas").await;

    let branch = BranchRepo::create(&pool, recipe, owner, &new_branch("gluten-free"), None)
        .await
        .unwrap();
    assert!(!branch.is_default);
    assert!(branch.is_active);
    assert_eq!(branch.branch_name, "gluten-free");

    // Two branches now, exactly one default, default listed first.
    let branches = BranchRepo::list_by_recipe(&pool, recipe).await.unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches.iter().filter(|b| b.is_default).count(), 1);
    assert!(branches[0].is_default);
    assert_eq!(branches[0].branch_name, "main");
}

// ---------------------------------------------------------------------------
// Test: duplicate branch name violates the unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_branch_name_rejected(pool: PgPool) {
    let owner = new_profile(&pool, "dupe").await;
    let recipe = new_recipe(&pool, owner, "Tortas").await;

    BranchRepo::create(&pool, recipe, owner, &new_branch("spicy"), None)
        .await
        .unwrap();
    let second = BranchRepo::create(&pool, recipe, owner, &new_branch("spicy"), None).await;
    assert!(second.is_err(), "duplicate name should hit uq constraint");

    // Same name on a different recipe is fine.
    let other = new_recipe(&pool, owner, "Sopes").await;
    assert!(BranchRepo::create(&pool, other, owner, &new_branch("spicy"), None)
        .await
        .is_ok());
}

// ---------------------------------------------------------------------------
// Test: set_default swaps atomically
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_swaps(pool: PgPool) {
    let owner = new_profile(&pool, "swapper").await;
    let recipe = new_recipe(&pool, owner, "Flautas").await;

    let branch = BranchRepo::create(&pool, recipe, owner, &new_branch("v2"), None)
        .await
        .unwrap();

    let promoted = BranchRepo::set_default(&pool, recipe, branch.id)
        .await
        .unwrap()
        .expect("existing branch should promote");
    assert!(promoted.is_default);

    let old_default = BranchRepo::find_by_name(&pool, recipe, "main")
        .await
        .unwrap()
        .unwrap();
    assert!(!old_default.is_default);

    let branches = BranchRepo::list_by_recipe(&pool, recipe).await.unwrap();
    assert_eq!(branches.iter().filter(|b| b.is_default).count(), 1);
}

// ---------------------------------------------------------------------------
// Test: set_default with unknown branch leaves the previous default
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_default_unknown_branch_is_noop(pool: PgPool) {
    let owner = new_profile(&pool, "careful").await;
    let recipe = new_recipe(&pool, owner, "Elote").await;

    let result = BranchRepo::set_default(&pool, recipe, 999_999).await.unwrap();
    assert!(result.is_none());

    let default = BranchRepo::get_default(&pool, recipe).await.unwrap().unwrap();
    assert_eq!(default.branch_name, "main");
}

// ---------------------------------------------------------------------------
// Test: deactivation is soft and refuses the default branch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivate_rules(pool: PgPool) {
    let owner = new_profile(&pool, "pruner").await;
    let recipe = new_recipe(&pool, owner, "Esquites").await;

    let default = BranchRepo::get_default(&pool, recipe).await.unwrap().unwrap();
    assert!(
        !BranchRepo::deactivate(&pool, default.id).await.unwrap(),
        "default branch must not deactivate"
    );

    let branch = BranchRepo::create(&pool, recipe, owner, &new_branch("stale"), None)
        .await
        .unwrap();
    assert!(BranchRepo::deactivate(&pool, branch.id).await.unwrap());

    // Hidden from the active listing, but still on record.
    let branches = BranchRepo::list_by_recipe(&pool, recipe).await.unwrap();
    assert!(!branches.iter().any(|b| b.id == branch.id));
    let row = BranchRepo::find_by_id(&pool, branch.id).await.unwrap().unwrap();
    assert!(!row.is_active);
}
