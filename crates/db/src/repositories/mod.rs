//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Plain CRUD methods return
//! `sqlx::Error`; transactional engine methods (commit, fork,
//! merge-request transitions) return [`crate::DbError`].

pub mod branch_repo;
pub mod contributor_repo;
pub mod fork_repo;
pub mod merge_request_repo;
pub mod profile_repo;
pub mod recipe_repo;
pub mod version_repo;

pub use branch_repo::BranchRepo;
pub use contributor_repo::ContributorRepo;
pub use fork_repo::ForkRepo;
pub use merge_request_repo::MergeRequestRepo;
pub use profile_repo::ProfileRepo;
pub use recipe_repo::RecipeRepo;
pub use version_repo::VersionRepo;
