//! In-memory repositories and a fake identity provider for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use social_common::auth::JwtService;
use social_core::entities::{Comment, FollowAction, Hashtag, Post, Role, StoredFile, User};
use social_core::traits::{
    CommentRepository, FileRepository, HashtagRepository, IdentityProfile, IdentityProvider,
    PostQuery, PostRepository, RepoResult, UserRepository,
};
use social_core::{DomainError, Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct InMemoryUsers(Mutex<HashMap<Snowflake, User>>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let users = self.0.lock().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.0.lock().unwrap();
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut users = self.0.lock().unwrap();
        let stored = users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        stored.bio.clone_from(&user.bio);
        stored.avatar.clone_from(&user.avatar);
        Ok(())
    }

    async fn apply_follow(
        &self,
        follower: Snowflake,
        followee: Snowflake,
        action: FollowAction,
    ) -> RepoResult<()> {
        let mut users = self.0.lock().unwrap();
        let mut a = users
            .remove(&follower)
            .ok_or(DomainError::UserNotFound(follower))?;
        let Some(mut b) = users.remove(&followee) else {
            users.insert(a.id, a);
            return Err(DomainError::UserNotFound(followee));
        };
        a.apply_follow(&mut b, action);
        users.insert(a.id, a);
        users.insert(b.id, b);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPosts(Mutex<HashMap<Snowflake, Post>>);

impl InMemoryPosts {
    fn sorted(&self, filter: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .0
            .lock()
            .unwrap()
            .values()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self, query: PostQuery) -> RepoResult<Vec<Post>> {
        let mut posts = self.sorted(|p| {
            query.created_by.map_or(true, |id| p.created_by == id)
                && (query.include_blacklisted || !p.is_blacklisted)
                && query.before.map_or(true, |before| p.id < before)
        });
        posts.truncate(usize::try_from(query.limit).unwrap_or(0));
        Ok(posts)
    }

    async fn find_by_ids(
        &self,
        ids: &[Snowflake],
        include_blacklisted: bool,
    ) -> RepoResult<Vec<Post>> {
        Ok(self.sorted(|p| ids.contains(&p.id) && (include_blacklisted || !p.is_blacklisted)))
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.0.lock().unwrap().insert(post.id, post.clone());
        Ok(())
    }

    async fn update_caption(&self, post: &Post) -> RepoResult<()> {
        let mut posts = self.0.lock().unwrap();
        let stored = posts.get_mut(&post.id).ok_or(DomainError::PostNotFound(post.id))?;
        stored.caption.clone_from(&post.caption);
        stored.tags.clone_from(&post.tags);
        Ok(())
    }

    async fn set_blacklisted(&self, id: Snowflake, blacklisted: bool) -> RepoResult<()> {
        let mut posts = self.0.lock().unwrap();
        let stored = posts.get_mut(&id).ok_or(DomainError::PostNotFound(id))?;
        stored.is_blacklisted = blacklisted;
        Ok(())
    }

    async fn add_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize> {
        let mut posts = self.0.lock().unwrap();
        let post = posts
            .get_mut(&post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        if !post.has_voted(user_id) {
            post.votes.push(user_id);
        }
        Ok(post.votes.len())
    }

    async fn remove_vote(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<usize> {
        let mut posts = self.0.lock().unwrap();
        let post = posts
            .get_mut(&post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        post.votes.retain(|id| *id != user_id);
        Ok(post.votes.len())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.0
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::PostNotFound(id))
    }
}

#[derive(Default)]
pub struct InMemoryComments(Mutex<Vec<Comment>>);

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.0.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Comment>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|c| post_ids.contains(&c.post_id))
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.0.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut comments = self.0.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(DomainError::CommentNotFound(id));
        }
        Ok(())
    }

    async fn delete_by_post(&self, post_id: Snowflake) -> RepoResult<u64> {
        let mut comments = self.0.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.post_id != post_id);
        Ok((before - comments.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryHashtags(Mutex<HashMap<String, Hashtag>>);

#[async_trait]
impl HashtagRepository for InMemoryHashtags {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Hashtag>> {
        Ok(self.0.lock().unwrap().get(name).cloned())
    }

    async fn attach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()> {
        self.0
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert_with(|| Hashtag::new(name))
            .attach(post_id);
        Ok(())
    }

    async fn detach_post(&self, name: &str, post_id: Snowflake) -> RepoResult<()> {
        if let Some(tag) = self.0.lock().unwrap().get_mut(name) {
            tag.detach(post_id);
        }
        Ok(())
    }

    async fn detach_post_everywhere(&self, post_id: Snowflake) -> RepoResult<()> {
        for tag in self.0.lock().unwrap().values_mut() {
            tag.detach(post_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFiles(Mutex<HashMap<String, StoredFile>>);

#[async_trait]
impl FileRepository for InMemoryFiles {
    async fn store(&self, file: &StoredFile) -> RepoResult<()> {
        let mut files = self.0.lock().unwrap();
        if files.contains_key(&file.filename) {
            return Err(DomainError::FileAlreadyExists(file.filename.clone()));
        }
        files.insert(file.filename.clone(), file.clone());
        Ok(())
    }

    async fn find_by_filename(&self, filename: &str) -> RepoResult<Option<StoredFile>> {
        Ok(self.0.lock().unwrap().get(filename).cloned())
    }

    async fn delete(&self, filename: &str) -> RepoResult<()> {
        self.0
            .lock()
            .unwrap()
            .remove(filename)
            .map(|_| ())
            .ok_or_else(|| DomainError::FileNotFound(filename.to_string()))
    }
}

/// Accepts tokens of the form `google:<email>`
pub struct FakeIdentityProvider;

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<IdentityProfile, DomainError> {
        let email = id_token
            .strip_prefix("google:")
            .ok_or_else(|| DomainError::InvalidIdentityToken("bad token".to_string()))?;
        let given_name = email.split('@').next().unwrap_or_default().to_string();
        Ok(IdentityProfile {
            subject: format!("sub-{email}"),
            email: email.to_string(),
            given_name,
            family_name: "Tester".to_string(),
            picture: Some(format!("https://img.example/{email}.png")),
        })
    }
}

/// A service context wired to in-memory repositories
pub struct TestContext {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUsers>,
    pub posts: Arc<InMemoryPosts>,
    pub comments: Arc<InMemoryComments>,
    pub hashtags: Arc<InMemoryHashtags>,
    pub files: Arc<InMemoryFiles>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let posts = Arc::new(InMemoryPosts::default());
        let comments = Arc::new(InMemoryComments::default());
        let hashtags = Arc::new(InMemoryHashtags::default());
        let files = Arc::new(InMemoryFiles::default());

        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .post_repo(posts.clone())
            .comment_repo(comments.clone())
            .hashtag_repo(hashtags.clone())
            .file_repo(files.clone())
            .identity_provider(Arc::new(FakeIdentityProvider))
            .jwt_service(Arc::new(JwtService::new("test-secret-key", 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();

        Self {
            ctx,
            users,
            posts,
            comments,
            hashtags,
            files,
        }
    }

    /// Insert a user directly into the store
    pub fn add_user(&self, name: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            format!("{name}@example.com"),
            name.to_string(),
            "Tester".to_string(),
        );
        self.users.0.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn add_admin(&self, name: &str) -> User {
        let mut user = self.add_user(name);
        user.role = Role::Admin;
        self.users.0.lock().unwrap().insert(user.id, user.clone());
        user
    }

    /// Insert a post directly, indexing its tags
    pub fn add_post(&self, author: &User, caption: &str) -> Post {
        let post = Post::new(
            self.ctx.generate_id(),
            author.id,
            caption.to_string(),
            vec!["seed.jpg".to_string()],
        )
        .unwrap();
        let mut tags = self.hashtags.0.lock().unwrap();
        for tag in &post.tags {
            tags.entry(tag.clone())
                .or_insert_with(|| Hashtag::new(tag.clone()))
                .attach(post.id);
        }
        self.posts.0.lock().unwrap().insert(post.id, post.clone());
        post
    }

    pub fn user(&self, id: Snowflake) -> User {
        self.users.0.lock().unwrap()[&id].clone()
    }

    pub fn post(&self, id: Snowflake) -> Option<Post> {
        self.posts.0.lock().unwrap().get(&id).cloned()
    }

    pub fn tag_posts(&self, name: &str) -> Vec<Snowflake> {
        self.hashtags
            .0
            .lock()
            .unwrap()
            .get(name)
            .map(|t| t.posts.clone())
            .unwrap_or_default()
    }

    pub fn post_count(&self) -> usize {
        self.posts.0.lock().unwrap().len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.0.lock().unwrap().len()
    }

    pub fn has_file(&self, filename: &str) -> bool {
        self.files.0.lock().unwrap().contains_key(filename)
    }

    pub fn file_count(&self) -> usize {
        self.files.0.lock().unwrap().len()
    }

    /// Overwrite one side of a follow relation to simulate a torn write
    pub fn corrupt_following(&self, user: Snowflake, following: Vec<Snowflake>) {
        self.users.0.lock().unwrap().get_mut(&user).unwrap().following = following;
    }
}
