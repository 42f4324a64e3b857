//! Post service
//!
//! Handles post creation with image uploads, listings, caption edits,
//! moderation and deletion. Listings come back fully assembled with creator
//! summaries and comments.

use std::collections::HashMap;

use social_core::entities::{Comment, Post, User};
use social_core::traits::PostQuery;
use social_core::{normalize_tag, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    CommentWithCreator, FeedQuery, MessageResponse, PostResponse, PostWithDetails,
    UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::{ImageUpload, MediaService};

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === Queries ===

    /// Public feed: every non-blacklisted post, newest first
    #[instrument(skip(self))]
    pub async fn get_feed(&self, page: FeedQuery) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .list(PostQuery {
                created_by: None,
                include_blacklisted: false,
                before: page.before,
                limit: page.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            })
            .await?;
        self.assemble(posts).await
    }

    /// A user's public posts
    #[instrument(skip(self))]
    pub async fn get_user_posts(
        &self,
        user_id: Snowflake,
        page: FeedQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        self.list_by(user_id, false, page).await
    }

    /// The caller's own posts, blacklisted ones included
    #[instrument(skip(self))]
    pub async fn get_my_posts(
        &self,
        user_id: Snowflake,
        page: FeedQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        self.list_by(user_id, true, page).await
    }

    async fn list_by(
        &self,
        user_id: Snowflake,
        include_blacklisted: bool,
        page: FeedQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .list(PostQuery {
                created_by: Some(user_id),
                include_blacklisted,
                before: page.before,
                limit: page.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            })
            .await?;
        self.assemble(posts).await
    }

    /// Posts indexed under a hashtag. An unknown tag yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_posts_by_tag(&self, search: Option<&str>) -> ServiceResult<Vec<PostResponse>> {
        let tag = search.map(normalize_tag).unwrap_or_default();
        if tag.is_empty() {
            return Err(ServiceError::validation("search query is required"));
        }

        let Some(hashtag) = self.ctx.hashtag_repo().find_by_name(&tag).await? else {
            return Ok(Vec::new());
        };

        let posts = self
            .ctx
            .post_repo()
            .find_by_ids(&hashtag.posts, false)
            .await?;
        self.assemble(posts).await
    }

    /// One post by ID
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self.find_post(post_id).await?;
        self.assemble_one(post).await
    }

    // === Commands ===

    /// Create a post from a caption and uploaded images.
    ///
    /// The caption is validated before any image is processed. Images are
    /// stored in upload order and each hashtag in the caption is indexed.
    #[instrument(skip(self, author, caption, images), fields(author_id = %author.id, images = images.len()))]
    pub async fn create_post(
        &self,
        author: &User,
        caption: String,
        images: Vec<ImageUpload>,
    ) -> ServiceResult<PostResponse> {
        let max_images = self.ctx.storage().max_images_per_post;
        if images.len() > max_images {
            return Err(ServiceError::validation(format!(
                "A post can have at most {max_images} images"
            )));
        }

        let mut post = Post::new(self.ctx.generate_id(), author.id, caption, Vec::new())?;

        let media = MediaService::new(self.ctx);
        for image in images {
            match media.store_image(image).await {
                Ok(filename) => post.images.push(filename),
                Err(e) => {
                    media.remove_files(&post.images).await;
                    return Err(e);
                }
            }
        }

        self.ctx.post_repo().create(&post).await?;

        for tag in &post.tags {
            self.ctx.hashtag_repo().attach_post(tag, post.id).await?;
        }

        info!(post_id = %post.id, tags = post.tags.len(), "Post created");

        Ok(PostResponse::from(PostWithDetails {
            post: &post,
            creator: Some(author),
            comments: Vec::new(),
        }))
    }

    /// Replace the caption of one of the caller's posts.
    ///
    /// Another user's post is reported as missing. Tags are re-derived and
    /// the hashtag index follows the change.
    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn update_post(
        &self,
        user: &User,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        if request.touches_images() {
            return Err(DomainError::FilesImmutable.into());
        }

        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|p| p.can_be_modified_by(user))
            .ok_or(DomainError::PostNotFound(post_id))?;

        let (added, removed) = post.set_caption(request.caption)?;
        self.ctx.post_repo().update_caption(&post).await?;

        for tag in &added {
            self.ctx.hashtag_repo().attach_post(tag, post.id).await?;
        }
        for tag in &removed {
            self.ctx.hashtag_repo().detach_post(tag, post.id).await?;
        }

        info!(post_id = %post.id, added = added.len(), removed = removed.len(), "Post updated");

        self.assemble_one(post).await
    }

    /// Delete a post with its comments, index entries and images
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn delete_post(&self, user: &User, post_id: Snowflake) -> ServiceResult<()> {
        let post = self.find_post(post_id).await?;
        if !post.can_be_deleted_by(user) {
            return Err(DomainError::NotPostCreator.into());
        }

        let comments = self.ctx.comment_repo().delete_by_post(post_id).await?;
        self.ctx.hashtag_repo().detach_post_everywhere(post_id).await?;
        self.ctx.post_repo().delete(post_id).await?;
        MediaService::new(self.ctx).remove_files(&post.images).await;

        info!(post_id = %post_id, comments, "Post deleted");
        Ok(())
    }

    /// Hide a post from public listings (admin)
    #[instrument(skip(self))]
    pub async fn blacklist_post(&self, post_id: Snowflake) -> ServiceResult<MessageResponse> {
        self.ctx.post_repo().set_blacklisted(post_id, true).await?;
        warn!(post_id = %post_id, "Post blacklisted");
        Ok(MessageResponse::new("Post blacklisted successfully"))
    }

    /// Restore a blacklisted post (admin)
    #[instrument(skip(self))]
    pub async fn whitelist_post(&self, post_id: Snowflake) -> ServiceResult<MessageResponse> {
        self.ctx.post_repo().set_blacklisted(post_id, false).await?;
        info!(post_id = %post_id, "Post whitelisted");
        Ok(MessageResponse::new("Post whitelisted successfully"))
    }

    // === Helpers ===

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn assemble_one(&self, post: Post) -> ServiceResult<PostResponse> {
        self.assemble(vec![post])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("post assembly returned nothing"))
    }

    /// Attach creators and comments, batching the lookups for the whole page
    async fn assemble(&self, posts: Vec<Post>) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();
        let comments = self.ctx.comment_repo().find_by_posts(&post_ids).await?;

        let mut user_ids: Vec<Snowflake> = posts
            .iter()
            .map(|p| p.created_by)
            .chain(comments.iter().map(|c| c.created_by))
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut by_post: HashMap<Snowflake, Vec<&Comment>> = HashMap::new();
        for comment in &comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        Ok(posts
            .iter()
            .map(|post| {
                let comments = by_post
                    .get(&post.id)
                    .map(|list| {
                        list.iter()
                            .map(|c| CommentWithCreator {
                                comment: c,
                                creator: users.get(&c.created_by),
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                PostResponse::from(PostWithDetails {
                    post,
                    creator: users.get(&post.created_by),
                    comments,
                })
            })
            .collect())
    }
}
