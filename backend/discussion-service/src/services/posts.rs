/// Post service - creation and mutation rules for the discussion board
///
/// Everything here is append-only: a post is created once, and afterwards
/// only gains comments or numeric nodes. The service owns the invariants;
/// the store underneath is a plain document collection.
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::models::{Comment, NumericNode, Op, Post, PostBody};
use chrono::Utc;
use token_auth::Identity;
use uuid::Uuid;

pub struct PostService<S> {
    store: S,
}

impl<S: PostStore> PostService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All posts, most recent first. No authorization required.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.store.list_recent().await
    }

    /// Create a post from exactly one of `text` / `start_number`.
    ///
    /// A numeric post starts with a single root node carrying the start
    /// number; a text post starts with no nodes. Supplying both or neither
    /// is rejected.
    pub async fn create_post(
        &self,
        identity: &Identity,
        text: Option<String>,
        start_number: Option<f64>,
    ) -> Result<Post> {
        let now = Utc::now();

        let body = match (text, start_number) {
            (Some(text), None) => {
                if text.trim().is_empty() {
                    return Err(AppError::BadRequest("text must not be empty".into()));
                }
                PostBody::Text { text }
            }
            (None, Some(start_number)) => {
                let root = NumericNode {
                    id: Uuid::new_v4(),
                    parent_id: None,
                    op: None,
                    right_operand: None,
                    result: start_number,
                    author_id: identity.id,
                    author_name: Some(identity.username.clone()),
                    created_at: now,
                };
                PostBody::Chain {
                    start_number,
                    nodes: vec![root],
                }
            }
            _ => {
                return Err(AppError::BadRequest(
                    "either text or startNumber is required".into(),
                ))
            }
        };

        let post = Post {
            id: Uuid::new_v4(),
            author_id: identity.id,
            author_name: Some(identity.username.clone()),
            body,
            comments: Vec::new(),
            created_at: now,
        };

        self.store.insert(&post).await?;
        Ok(post)
    }

    /// Append a comment, optionally threaded under `parent_id`.
    ///
    /// The parent reference is stored as supplied without an existence
    /// check. Text is trimmed before storage.
    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: Uuid,
        parent_id: Option<Uuid>,
        text: &str,
    ) -> Result<Post> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::BadRequest("text is required".into()));
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            parent_id,
            text: trimmed.to_string(),
            author_id: identity.id,
            author_name: Some(identity.username.clone()),
            created_at: Utc::now(),
        };

        self.store
            .append_comment(post_id, comment)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".into()))
    }

    /// Extend a post's numeric chain from the node at `parent_index`.
    ///
    /// The new node's result is `parent.result <op> right_operand` in f64
    /// arithmetic. Division by zero is rejected before anything is
    /// written. An index that does not resolve to a node of this post is
    /// a bad request; a text post has no nodes, so every index fails
    /// against one.
    pub async fn extend_chain(
        &self,
        identity: &Identity,
        post_id: Uuid,
        parent_index: usize,
        op: Op,
        right_operand: f64,
    ) -> Result<Post> {
        if op == Op::Div && right_operand == 0.0 {
            return Err(AppError::BadRequest("division by zero".into()));
        }

        let post = self
            .store
            .find(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".into()))?;

        // Nodes are append-only and never mutated, so resolving the parent
        // from this read stays valid even if another node lands meanwhile.
        let parent = post
            .nodes()
            .get(parent_index)
            .ok_or_else(|| AppError::BadRequest("parent node not found".into()))?;

        let node = NumericNode {
            id: Uuid::new_v4(),
            parent_id: Some(parent.id),
            op: Some(op),
            right_operand: Some(right_operand),
            result: op.apply(parent.result, right_operand),
            author_id: identity.id,
            author_name: Some(identity.username.clone()),
            created_at: Utc::now(),
        };

        self.store
            .append_node(post_id, node)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".into()))
    }
}
