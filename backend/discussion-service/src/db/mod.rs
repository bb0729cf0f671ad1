/// Persistence layer for post documents
///
/// Posts live in a single `posts` table used as a document collection: the
/// whole post, including its embedded nodes and comments, is one JSONB
/// value. There are no separate tables for nodes or comments.
pub mod post_repo;

pub use post_repo::PgPostStore;

use crate::error::Result;
use crate::models::{Comment, NumericNode, Post};
use sqlx::PgPool;
use uuid::Uuid;

/// Storage contract for post documents.
///
/// Appends are atomic with respect to concurrent writers: two simultaneous
/// appends against the same post both land.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a freshly created post.
    async fn insert(&self, post: &Post) -> Result<()>;

    /// Load one post, or None when no such document exists.
    async fn find(&self, id: Uuid) -> Result<Option<Post>>;

    /// All posts, most recently created first.
    async fn list_recent(&self) -> Result<Vec<Post>>;

    /// Append a comment to a post's thread. Returns the updated post, or
    /// None when the post does not exist.
    async fn append_comment(&self, post_id: Uuid, comment: Comment) -> Result<Option<Post>>;

    /// Append a node to a post's numeric chain. Returns the updated post,
    /// or None when the post does not exist.
    async fn append_node(&self, post_id: Uuid, node: NumericNode) -> Result<Option<Post>>;
}

/// Idempotent schema bootstrap, run once at startup.
pub async fn ensure_posts_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id UUID PRIMARY KEY,
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
