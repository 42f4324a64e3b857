//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, png_part,
    TestServer,
};
use reqwest::{header, multipart, StatusCode};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/auth/login", &LoginRequest { token: None })
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "User not logged in.");
}

#[tokio::test]
async fn test_login_without_body() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .post(format!("{}/api/auth/login", server.base_url()))
        .send()
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.status, "fail");
    assert_eq!(body.error.message, "User not logged in.");

    let response = server
        .client
        .post(format!("{}/api/auth/login", server.base_url()))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{token")
        .send()
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/posts").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.status, "fail");
    assert_eq!(
        body.error.message,
        "You are not logged in! Please log in to get access."
    );

    let response = server.get_auth("/api/posts", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_cookie_authentication() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server
        .client
        .get(format!("{}/api/posts", server.base_url()))
        .header(header::COOKIE, format!("jwt={}", alice.token))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server
        .post_auth("/api/auth/logout", &alice.token, &())
        .await
        .unwrap();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Logged out successfully");
    assert!(set_cookie.starts_with("jwt="));

    let response = server.get_auth("/api/posts", &alice.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server.get(&format!("/api/users/{}", alice.id())).await.unwrap();
    let body: UserBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "success");
    assert_eq!(body.user.id, alice.id());
    assert_eq!(body.user.firstname, "alice");
    assert_eq!(body.user.role, "user");

    let response = server.get("/api/users/1").await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "User not found");

    let response = server.get("/api/users/not-an-id").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_follow_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();
    let path = format!("/api/users/follow/{}", bob.id());

    let response = server.patch_auth(&path, &alice.token, &()).await.unwrap();
    let body: FollowBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.response, 1);
    assert_eq!(
        body.message,
        format!("{} started following {}", alice.id(), bob.id())
    );

    let response = server
        .get(&format!("/api/users/followers/{}", bob.id()))
        .await
        .unwrap();
    let body: FollowersBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.followers.len(), 1);
    assert_eq!(body.followers[0].id, alice.id());

    let response = server
        .get(&format!("/api/users/following/{}", alice.id()))
        .await
        .unwrap();
    let body: FollowingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.following[0].id, bob.id());

    // The second toggle reads the updated caller from the store
    let response = server.patch_auth(&path, &alice.token, &()).await.unwrap();
    let body: FollowBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.response, -1);
    assert_eq!(body.message, format!("{} unfollowed {}", alice.id(), bob.id()));

    let response = server
        .get(&format!("/api/users/followers/{}", bob.id()))
        .await
        .unwrap();
    let body: FollowersBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.followers.is_empty());
}

#[tokio::test]
async fn test_follow_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server
        .patch_auth("/api/users/follow/1", &alice.token, &())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Other user not found");

    let response = server
        .patch_auth(&format!("/api/users/follow/{}", alice.id()), &alice.token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_bio() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let response = server
        .patch_auth(
            "/api/users/profile",
            &alice.token,
            &BioUpdate {
                bio: Some("Photographer".to_string()),
            },
        )
        .await
        .unwrap();
    let body: BioBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Bio updated successfully");
    assert_eq!(body.bio.as_deref(), Some("Photographer"));

    let response = server
        .patch_auth(
            "/api/users/profile",
            &alice.token,
            &BioUpdate {
                bio: Some("x".repeat(201)),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_resizes_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let tag = unique_tag("sunset");

    let response = server
        .create_post(&alice.token, &format!("Evening walk #{tag}"))
        .await
        .unwrap();
    let body: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.post.tags, vec![tag.clone()]);
    assert_eq!(body.post.images.len(), 1);
    assert_eq!(body.post.created_by.as_ref().unwrap().id, alice.id());

    let response = server
        .get(&format!("/api/files/{}", body.post.images[0]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert!(response.headers().get(header::CACHE_CONTROL).is_some());

    let bytes = response.bytes().await.unwrap();
    let stored = image::load_from_memory(&bytes).unwrap();
    assert_eq!((stored.width(), stored.height()), (800, 200));

    let response = server.get("/api/files/missing.jpg").await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "No file exists");
}

#[tokio::test]
async fn test_create_post_rejects_bad_uploads() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();

    let form = multipart::Form::new()
        .text("caption", "not an image")
        .part(
            "image",
            multipart::Part::bytes(b"hello".to_vec())
                .file_name("notes.txt")
                .mime_str("text/plain")
                .unwrap(),
        );
    let response = server
        .post_multipart_auth("/api/posts", &alice.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let form = multipart::Form::new().part("image", png_part(10, 10).unwrap());
    let response = server
        .post_multipart_auth("/api/posts", &alice.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_feed_and_tag_search() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let tag = unique_tag("feed");

    let response = server
        .create_post(&alice.token, &format!("first #{tag}"))
        .await
        .unwrap();
    let first: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let response = server
        .create_post(&alice.token, &format!("second #{tag}"))
        .await
        .unwrap();
    let second: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/posts/tags?search=%23{}", tag.to_uppercase()))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 2);
    assert_eq!(body.posts[0].id, second.post.id);
    assert_eq!(body.posts[1].id, first.post.id);

    let response = server
        .get(&format!("/api/posts/tags?search={}", unique_tag("nothing")))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 0);

    let response = server.get("/api/posts/tags").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("/api/posts/all?limit=1&before={}", second.post.id))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 1);
    assert_ne!(body.posts[0].id, second.post.id);

    let response = server
        .get(&format!("/api/posts/user/{}", alice.id()))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 2);
}

#[tokio::test]
async fn test_update_post_caption() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();
    let old_tag = unique_tag("old");
    let new_tag = unique_tag("new");

    let response = server
        .create_post(&alice.token, &format!("#{old_tag}"))
        .await
        .unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/posts/{}", created.post.id);

    let response = server
        .patch_auth(
            &path,
            &alice.token,
            &CaptionUpdate {
                caption: format!("now #{new_tag}"),
            },
        )
        .await
        .unwrap();
    let updated: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.post.tags, vec![new_tag.clone()]);

    let response = server
        .get(&format!("/api/posts/tags?search={old_tag}"))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 0);

    let response = server
        .client
        .patch(format!("{}{}", server.base_url(), path))
        .bearer_auth(&alice.token)
        .body("caption=plain text")
        .send()
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.status, "fail");
    assert_eq!(body.error.code, "INVALID_BODY");

    let response = server
        .patch_auth(&path, &alice.token, &serde_json::json!({ "images": [] }))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "files can't be updated");

    let response = server
        .patch_auth(
            &path,
            &bob.token,
            &CaptionUpdate {
                caption: "mine now".to_string(),
            },
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, format!("No post found with id {}", created.post.id));
}

#[tokio::test]
async fn test_delete_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server.create_post(&alice.token, "short lived").await.unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/posts/{}", created.post.id);

    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/api/files/{}", created.post.images[0]))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_blacklist_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let admin = server.seed_admin("admin").await.unwrap();

    let response = server.create_post(&alice.token, "borderline").await.unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let blacklist = format!("/api/posts/blacklist/{}", created.post.id);

    let response = server.patch_auth(&blacklist, &alice.token, &()).await.unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "You do not have permission to perform this action");

    let response = server.patch_auth(&blacklist, &admin.token, &()).await.unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Post blacklisted successfully");

    let response = server
        .get(&format!("/api/posts/user/{}", alice.id()))
        .await
        .unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 0);

    let response = server.get_auth("/api/posts", &alice.token).await.unwrap();
    let body: PostListBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.results, 1);
    assert!(body.posts[0].is_blacklisted);

    let response = server
        .patch_auth(
            &format!("/api/posts/whitelist/{}", created.post.id),
            &admin.token,
            &(),
        )
        .await
        .unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Post whitelisted successfully");

    let response = server
        .patch_auth("/api/posts/blacklist/1", &admin.token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_vote_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();

    let response = server.create_post(&alice.token, "vote for me").await.unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/api/vote/{}", created.post.id);

    let response = server.patch_auth(&path, &bob.token, &()).await.unwrap();
    let body: VoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Post updated successfully");
    assert!(body.voted);
    assert_eq!(body.votes, 1);

    let response = server.patch_auth(&path, &bob.token, &()).await.unwrap();
    let body: VoteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.voted);
    assert_eq!(body.votes, 0);

    let response = server
        .patch_auth("/api/vote/1", &bob.token, &())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Associated Post not found");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user("alice").await.unwrap();
    let bob = server.seed_user("bob").await.unwrap();
    let carol = server.seed_user("carol").await.unwrap();

    let response = server.create_post(&alice.token, "talk to me").await.unwrap();
    let created: PostBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let comment_path = format!("/api/comments/{}", created.post.id);

    let response = server
        .post_auth(
            &comment_path,
            &bob.token,
            &NewComment {
                comment: "Lovely".to_string(),
            },
        )
        .await
        .unwrap();
    let body: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.comment.body, "Lovely");
    assert_eq!(body.comment.post_id, created.post.id);

    let response = server
        .get(&format!("/api/posts/{}", created.post.id))
        .await
        .unwrap();
    let post: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.post.comments.len(), 1);
    assert_eq!(
        post.post.comments[0].created_by.as_ref().unwrap().id,
        bob.id()
    );

    let response = server
        .post_auth(
            &comment_path,
            &bob.token,
            &NewComment {
                comment: "   ".to_string(),
            },
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Comment not found");

    let response = server
        .post_auth(
            "/api/comments/1",
            &bob.token,
            &NewComment {
                comment: "hello?".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let delete_path = format!("/api/comments/{}", body.comment.id);
    let response = server.delete_auth(&delete_path, &carol.token).await.unwrap();
    let message = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(message, "You are not allowed to delete this comment");

    // The post's author may remove comments on it
    let response = server.delete_auth(&delete_path, &alice.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&delete_path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
