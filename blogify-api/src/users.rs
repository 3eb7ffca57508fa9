use crate::{posts::Post, Endpoint};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

api!("/api/users" => User);

impl User {
    /// Profile links that are actually filled in, as (label, value)
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Website", &self.website),
            ("Twitter", &self.twitter),
            ("LinkedIn", &self.linkedin),
        ]
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (*label, v))
        })
        .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Returned by the login and registration endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_likes: u64,
}

/// Response of `GET /api/users/:userId/posts`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePosts {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub stats: ProfileStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_deserialization() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Ada",
            "bio": "Writes things",
            "website": "https://ada.dev",
            "twitter": "",
            "createdAt": "2023-11-20T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.email, None);
        assert_eq!(user.links(), vec![("Website", "https://ada.dev")]);
        assert_eq!(User::endpoint(), "/api/users");
    }

    #[test]
    fn session_user_uses_plain_id() {
        let auth: AuthResponse = serde_json::from_value(json!({
            "token": "abc",
            "user": { "id": "u2", "name": "Grace", "email": "grace@example.com" }
        }))
        .unwrap();
        assert_eq!(auth.user.id, "u2");
        assert_eq!(auth.user.email.as_deref(), Some("grace@example.com"));
    }

    #[test]
    fn profile_posts_deserialization() {
        let page: ProfilePosts = serde_json::from_value(json!({
            "posts": [],
            "stats": { "totalPosts": 3, "totalViews": 40, "totalLikes": 2 }
        }))
        .unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.stats.total_views, 40);
    }
}
