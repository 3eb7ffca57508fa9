use crate::{session::Session, Result};
use blogify_api::posts::Post;
use tracing::warn;

/// Like button of a post page.
///
/// The API has no endpoint for likes, so this only lives as long as the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeState {
    liked: bool,
    likes: u64,
}

impl LikeState {
    pub fn new(post: &Post) -> LikeState {
        LikeState {
            liked: false,
            likes: post.likes,
        }
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    /// Likes or unlikes the post, returning whether it is now liked
    pub fn toggle(&mut self, session: &Session) -> Result<bool> {
        session.require_user()?;
        warn!("Likes are not saved on the server");
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.liked = !self.liked;
        Ok(self.liked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, feed::tests::post, ApiClient, Error};
    use blogify_api::users::{AuthResponse, User};

    fn logged_in() -> Session {
        let mut client = ApiClient::new(&Config::new("http://localhost:5000")).unwrap();
        let mut session = Session::new();
        session.login(
            &mut client,
            AuthResponse {
                token: "t".into(),
                user: User {
                    id: "u1".into(),
                    name: "Ada".into(),
                    email: None,
                    bio: None,
                    website: None,
                    twitter: None,
                    linkedin: None,
                    created_at: None,
                },
            },
        );
        session
    }

    #[test]
    fn toggle_twice() {
        let mut p = post("1", "A", "", &[]);
        p.likes = 4;
        let session = logged_in();
        let mut like = LikeState::new(&p);
        assert!(like.toggle(&session).unwrap());
        assert_eq!(like.likes(), 5);
        assert!(!like.toggle(&session).unwrap());
        assert_eq!(like.likes(), 4);
        assert!(!like.liked());
    }

    #[test]
    fn anonymous_cannot_like() {
        let mut like = LikeState::new(&post("1", "A", "", &[]));
        assert!(matches!(like.toggle(&Session::new()), Err(Error::Unauthorized)));
        assert_eq!(like.likes(), 0);
        assert!(!like.liked());
    }
}
