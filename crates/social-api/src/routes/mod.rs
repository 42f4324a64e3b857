//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{auth, comments, files, health, posts, users, votes};
use crate::state::AppState;

/// Create the main API router (health is exported separately to skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(vote_routes())
        .merge(file_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", patch(users::update_profile))
        .route("/users/follow/:id", patch(users::toggle_follow))
        .route("/users/followers/:id", get(users::get_followers))
        .route("/users/following/:id", get(users::get_following))
        .route("/users/:id", get(users::get_user))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::get_my_posts).post(posts::create_post))
        .route("/posts/all", get(posts::get_all_posts))
        .route("/posts/tags", get(posts::get_posts_by_tag))
        .route("/posts/user/:id", get(posts::get_user_posts))
        .route("/posts/blacklist/:post_id", patch(posts::blacklist_post))
        .route("/posts/whitelist/:post_id", patch(posts::whitelist_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
}

/// Comment routes. The id is the parent post on POST and the comment on DELETE.
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:id",
        post(comments::create_comment).delete(comments::delete_comment),
    )
}

/// Vote routes
fn vote_routes() -> Router<AppState> {
    Router::new().route("/vote/:post_id", patch(votes::toggle_vote))
}

/// Stored upload routes
fn file_routes() -> Router<AppState> {
    Router::new().route("/files/:filename", get(files::get_file))
}
