use crate::{AuthorRef, Endpoint};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
        }
    }

    pub fn is_published(self) -> bool {
        self == PostStatus::Published
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

api!("/api/posts" => Post);

impl Post {
    pub fn is_author(&self, user_id: &str) -> bool {
        self.author.as_ref().map_or(false, |a| a.id == user_id)
    }

    /// Name to display for the author, even if they were deleted
    pub fn author_name(&self) -> &str {
        match self.author {
            Some(ref a) if !a.name.is_empty() => &a.name,
            _ => "Unknown author",
        }
    }

    /// The cover image URL, if there is a non-empty one
    pub fn cover(&self) -> Option<&str> {
        self.cover_image.as_deref().filter(|c| !c.is_empty())
    }
}

/// Body of `POST /api/posts` and `PUT /api/posts/:id`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub status: PostStatus,
}

/// Site-wide counters shown on the home page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub authors: u64,
    #[serde(default)]
    pub tags: u64,
}

/// Counters about the posts of the logged in user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub published: u64,
    #[serde(default)]
    pub drafts: u64,
    #[serde(default)]
    pub views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_deserialization() {
        let post: Post = serde_json::from_value(json!({
            "_id": "65a1",
            "title": "Hello",
            "content": "<p>World</p>",
            "author": { "_id": "u1", "name": "Ada" },
            "tags": ["rust", "web"],
            "category": "Programming",
            "coverImage": "",
            "status": "Published",
            "views": 12,
            "createdAt": "2024-01-05T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(post.id, "65a1");
        assert_eq!(post.author_name(), "Ada");
        assert!(post.is_author("u1"));
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.views, 12);
        assert_eq!(post.likes, 0);
        assert_eq!(post.cover(), None);
        assert_eq!(Post::endpoint(), "/api/posts");
    }

    #[test]
    fn deleted_author() {
        let post: Post = serde_json::from_value(json!({
            "_id": "65a2",
            "title": "Orphan",
            "author": null,
            "createdAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(post.author, None);
        assert_eq!(post.author_name(), "Unknown author");
        assert!(!post.is_author("u1"));
        assert!(post.tags.is_empty());
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn unpopulated_author() {
        let post: Post = serde_json::from_value(json!({
            "_id": "65a3",
            "title": "Raw",
            "author": "u7",
            "createdAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap();
        assert!(post.is_author("u7"));
        assert_eq!(post.author_name(), "Unknown author");
    }

    #[test]
    fn post_data_serialization() {
        let data = PostData {
            title: "T".into(),
            content: "<p>C</p>".into(),
            tags: vec!["a".into()],
            category: None,
            cover_image: Some("https://img".into()),
            status: PostStatus::Published,
        };
        assert_eq!(
            serde_json::to_value(data).unwrap(),
            json!({
                "title": "T",
                "content": "<p>C</p>",
                "tags": ["a"],
                "coverImage": "https://img",
                "status": "Published"
            })
        );
    }
}
