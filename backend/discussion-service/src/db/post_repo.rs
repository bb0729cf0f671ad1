/// Postgres-backed post document store
use crate::db::PostStore;
use crate::error::Result;
use crate::models::{Comment, NumericNode, Post};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one element to a JSONB array field of a post document.
    ///
    /// The whole append is a single UPDATE, so concurrent appends to the
    /// same post interleave without losing entries. `jsonb_set` creates
    /// the array when a legacy document lacks the field.
    async fn append_to_array(
        &self,
        post_id: Uuid,
        field: &str,
        element: serde_json::Value,
    ) -> Result<Option<Post>> {
        let row = sqlx::query(
            r#"
            UPDATE posts
            SET doc = jsonb_set(
                doc,
                ARRAY[$2],
                COALESCE(doc -> $2, '[]'::jsonb) || $3,
                true
            )
            WHERE id = $1
            RETURNING doc
            "#,
        )
        .bind(post_id)
        .bind(field)
        .bind(element)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.get("doc");
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: &Post) -> Result<()> {
        sqlx::query("INSERT INTO posts (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(post.id)
            .bind(serde_json::to_value(post)?)
            .bind(post.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT doc FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.get("doc");
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }

    async fn list_recent(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query("SELECT doc FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: serde_json::Value = row.get("doc");
            posts.push(serde_json::from_value(doc)?);
        }

        Ok(posts)
    }

    async fn append_comment(&self, post_id: Uuid, comment: Comment) -> Result<Option<Post>> {
        self.append_to_array(post_id, "comments", serde_json::to_value(comment)?)
            .await
    }

    async fn append_node(&self, post_id: Uuid, node: NumericNode) -> Result<Option<Post>> {
        self.append_to_array(post_id, "nodes", serde_json::to_value(node)?)
            .await
    }
}
