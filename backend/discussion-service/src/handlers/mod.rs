/// HTTP handlers for the discussion board endpoints
///
/// - `GET  /api/health`                      liveness probe, no auth
/// - `GET  /api/posts`                       list posts, no auth
/// - `POST /api/posts`                       create a post, auth required
/// - `POST /api/posts/{post_id}/comments`    append a comment, auth required
/// - `POST /api/posts/{post_id}/nodes`       extend a numeric chain, auth required
pub mod posts;

pub use posts::{add_comment, create_post, extend_chain, list_posts};

use actix_web::{web, HttpResponse};

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Route table, shared between `main` and the route-level tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health)).service(
        web::scope("/api/posts")
            .service(
                web::resource("")
                    .route(web::get().to(posts::list_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .route("/{post_id}/comments", web::post().to(posts::add_comment))
            .route("/{post_id}/nodes", web::post().to(posts::extend_chain)),
    );
}
