/// Post handlers - HTTP endpoints for post, comment, and chain operations
use crate::db::PgPostStore;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::models::Op;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

fn service(pool: &web::Data<PgPool>) -> PostService<PgPostStore> {
    PostService::new(PgPostStore::new(pool.get_ref().clone()))
}

/// List all posts, newest first
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let posts = service(&pool).list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post from either free text or a chain start number
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let post = service(&pool)
        .create_post(&user.0, req.text, req.start_number)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Append a comment (or threaded reply) to a post
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let post = service(&pool)
        .add_comment(&user.0, *post_id, req.parent_id, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Extend a post's numeric chain from an existing node
pub async fn extend_chain(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<ExtendChainRequest>,
) -> Result<HttpResponse> {
    let post = service(&pool)
        .extend_chain(&user.0, *post_id, req.parent_index, req.op, req.right_operand)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Request body for creating a post
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub text: Option<String>,
    pub start_number: Option<f64>,
}

/// Request body for appending a comment
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub parent_id: Option<Uuid>,
    pub text: String,
}

/// Request body for extending a numeric chain
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendChainRequest {
    pub parent_index: usize,
    pub op: Op,
    pub right_operand: f64,
}
