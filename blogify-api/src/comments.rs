use crate::{AuthorRef, Endpoint};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "postId", default)]
    pub post_id: Option<String>,
    #[serde(rename = "userId", default)]
    pub author: Option<AuthorRef>,
    pub comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

api!("/api/comments" => Comment);

impl Comment {
    pub fn is_author(&self, user_id: &str) -> bool {
        self.author.as_ref().map_or(false, |a| a.id == user_id)
    }

    pub fn author_name(&self) -> &str {
        match self.author {
            Some(ref a) if !a.name.is_empty() => &a.name,
            _ => "Unknown author",
        }
    }
}

/// Body of `POST /api/comments/:postId`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentData {
    pub comment: String,
}
