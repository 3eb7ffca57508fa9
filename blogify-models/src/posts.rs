use crate::{comments, ApiClient, Result};
use blogify_api::{
    comments::Comment,
    posts::{DashboardStats, Post, PostData, PostStatus, SiteStats},
    Endpoint,
};
use blogify_common::utils::{is_blank_content, parse_tags};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    stream::FuturesUnordered,
};
use std::borrow::Cow;
use tracing::info;
use validator::{Validate, ValidationError};

/// Categories offered by the editor
pub const CATEGORIES: [&str; 15] = [
    "Technology",
    "Programming",
    "Web Development",
    "Mobile Development",
    "Data Science",
    "AI & Machine Learning",
    "Design",
    "Business",
    "Startup",
    "Career",
    "Lifestyle",
    "Travel",
    "Health",
    "Education",
    "Other",
];

/// Every published post, for the feed
pub async fn list_feed(client: &ApiClient) -> Result<Vec<Post>> {
    client.get(Post::endpoint(), &[]).await
}

pub async fn site_stats(client: &ApiClient) -> Result<SiteStats> {
    client.get(Post::endpoint(), &["stats"]).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Post> {
    client.get(Post::endpoint(), &[id]).await
}

pub async fn create(client: &ApiClient, data: &PostData) -> Result<Post> {
    let post: Post = client.post(Post::endpoint(), &[], data).await?;
    info!("Post {} created ({})", post.id, post.status);
    Ok(post)
}

pub async fn update(client: &ApiClient, id: &str, data: &PostData) -> Result<Post> {
    let post: Post = client.put(Post::endpoint(), &[id], data).await?;
    info!("Post {} updated ({})", post.id, post.status);
    Ok(post)
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(Post::endpoint(), &[id]).await?;
    info!("Post {} deleted", id);
    Ok(())
}

/// Posts of the logged in user, drafts included
pub async fn list_mine(client: &ApiClient) -> Result<Vec<Post>> {
    client.get("/api/user/posts", &[]).await
}

pub async fn dashboard_stats(client: &ApiClient) -> Result<DashboardStats> {
    client.get("/api/user/stats", &[]).await
}

/// Removes a post from a list once it was deleted remotely
pub fn remove_post(posts: &mut Vec<Post>, id: &str) -> Option<Post> {
    let index = posts.iter().position(|p| p.id == id)?;
    Some(posts.remove(index))
}

/// One of the two independent requests of the post page
#[derive(Debug)]
pub enum DetailPart {
    Post(Result<Post>),
    Comments(Result<Vec<Comment>>),
}

/// Fetches a post and its comments at the same time.
///
/// Each part is yielded as soon as it arrives, in whatever order the server
/// answers.
pub fn fetch_detail<'a>(
    client: &'a ApiClient,
    id: &'a str,
) -> FuturesUnordered<LocalBoxFuture<'a, DetailPart>> {
    let parts = FuturesUnordered::new();
    parts.push(async move { DetailPart::Post(get(client, id).await) }.boxed_local());
    parts.push(
        async move { DetailPart::Comments(comments::list_for_post(client, id).await) }
            .boxed_local(),
    );
    parts
}

/// Content of the post editor
#[derive(Clone, Debug, Default, Validate)]
pub struct PostForm {
    #[validate(custom = "validate_title")]
    pub title: String,
    #[validate(custom = "validate_content")]
    pub content: String,
    /// Comma separated
    pub tags: String,
    #[validate(custom = "validate_category")]
    pub category: String,
    pub cover_image: String,
    pub status: PostStatus,
}

impl PostForm {
    /// Fills the editor with an existing post
    pub fn from_post(post: &Post) -> PostForm {
        PostForm {
            title: post.title.clone(),
            content: post.content.clone(),
            tags: post.tags.join(", "),
            category: post.category.clone().unwrap_or_default(),
            cover_image: post.cover_image.clone().unwrap_or_default(),
            status: post.status,
        }
    }

    /// Checks the form and turns it into what the API expects
    pub fn into_data(self, status: PostStatus) -> Result<PostData> {
        self.validate()?;
        Ok(PostData {
            tags: parse_tags(&self.tags),
            title: self.title,
            content: self.content,
            category: Some(self.category.trim().to_owned()).filter(|c| !c.is_empty()),
            cover_image: Some(self.cover_image.trim().to_owned()).filter(|c| !c.is_empty()),
            status,
        })
    }
}

pub(crate) fn not_blank(
    value: &str,
    code: &'static str,
    message: &'static str,
) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::from(message));
        Err(err)
    } else {
        Ok(())
    }
}

fn validate_title(title: &str) -> std::result::Result<(), ValidationError> {
    not_blank(title, "blank_title", "Please enter a title")
}

fn validate_content(content: &str) -> std::result::Result<(), ValidationError> {
    if is_blank_content(content) {
        let mut err = ValidationError::new("blank_content");
        err.message = Some(Cow::from("Please enter some content"));
        Err(err)
    } else {
        Ok(())
    }
}

fn validate_category(category: &str) -> std::result::Result<(), ValidationError> {
    let category = category.trim();
    if category.is_empty() || CATEGORIES.contains(&category) {
        Ok(())
    } else {
        let mut err = ValidationError::new("unknown_category");
        err.message = Some(Cow::from("Please pick one of the listed categories"));
        Err(err)
    }
}
