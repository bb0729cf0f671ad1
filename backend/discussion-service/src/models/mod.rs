/// Data models for the discussion service
///
/// A board is a single collection of post documents. Each post embeds its
/// comment thread and, for numeric posts, the chain of operation nodes.
/// Collections are append-only: nodes and comments are never edited or
/// deleted once written.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A discussion post document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(flatten)]
    pub body: PostBody,
    /// Older documents may lack the field entirely; default to empty.
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// What a post is about: free text or a numeric chain.
///
/// Untagged so the wire shape stays flat: a text post carries `text`, a
/// numeric post carries `startNumber` and `nodes`. A post is structurally
/// one or the other, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostBody {
    Text {
        text: String,
    },
    Chain {
        #[serde(rename = "startNumber")]
        start_number: f64,
        nodes: Vec<NumericNode>,
    },
}

impl Post {
    /// Nodes of a numeric post; empty for text posts.
    pub fn nodes(&self) -> &[NumericNode] {
        match &self.body {
            PostBody::Chain { nodes, .. } => nodes,
            PostBody::Text { .. } => &[],
        }
    }
}

/// One step in a numeric chain.
///
/// The root node has no parent, operator, or operand; its result is the
/// post's start number. Every other node holds
/// `result = parent.result <op> right_operand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericNode {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub op: Option<Op>,
    pub right_operand: Option<f64>,
    pub result: f64,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Arithmetic operator applied when extending a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Apply the operator in double-precision arithmetic.
    ///
    /// Callers must reject division by zero before getting here.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

/// A comment on a post, optionally threaded under another comment.
///
/// `parent_id` is a soft reference: it is stored as supplied and not
/// checked against the existing thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub text: String,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
