use crate::{session::Session, ApiClient, Result};
use blogify_api::{
    comments::{Comment, CommentData},
    Endpoint,
};
use tracing::info;
use validator::{Validate, ValidationError};

/// Comments of a post, newest first
pub async fn list_for_post(client: &ApiClient, post_id: &str) -> Result<Vec<Comment>> {
    client.get(Comment::endpoint(), &[post_id]).await
}

/// Comments on a post as the logged in user
pub async fn create(
    client: &ApiClient,
    session: &Session,
    post_id: &str,
    form: CommentForm,
) -> Result<Comment> {
    session.require_user()?;
    form.validate()?;
    let comment: Comment = client
        .post(
            Comment::endpoint(),
            &[post_id],
            &CommentData {
                comment: form.comment.trim().to_owned(),
            },
        )
        .await?;
    info!("Comment {} added on post {}", comment.id, post_id);
    Ok(comment)
}

pub async fn delete(client: &ApiClient, comment_id: &str) -> Result<()> {
    client.delete(Comment::endpoint(), &[comment_id]).await?;
    info!("Comment {} deleted", comment_id);
    Ok(())
}

#[derive(Clone, Debug, Default, Validate)]
pub struct CommentForm {
    #[validate(custom = "validate_comment")]
    pub comment: String,
}

impl CommentForm {
    pub fn new(comment: impl Into<String>) -> CommentForm {
        CommentForm {
            comment: comment.into(),
        }
    }
}

fn validate_comment(comment: &str) -> std::result::Result<(), ValidationError> {
    crate::posts::not_blank(comment, "blank_comment", "Please enter a comment")
}

/// Comments shown under a post, kept in sync with what the reader does
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentList(Vec<Comment>);

impl CommentList {
    pub fn new(comments: Vec<Comment>) -> CommentList {
        CommentList(comments)
    }

    /// Shows a freshly created comment on top
    pub fn prepend(&mut self, comment: Comment) {
        self.0.insert(0, comment);
    }

    /// Forgets a comment that was deleted
    pub fn remove(&mut self, id: &str) -> Option<Comment> {
        let index = self.0.iter().position(|c| c.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&Comment> {
        self.0.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, Error};
    use chrono::Utc;

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.to_owned(),
            post_id: Some("p1".to_owned()),
            author: None,
            comment: format!("Comment {}", id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn new_comments_go_first() {
        let mut list = CommentList::new(vec![comment("1"), comment("2")]);
        list.prepend(comment("3"));
        assert_eq!(
            list.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["3", "1", "2"]
        );
    }

    #[test]
    fn remove_comment() {
        let mut list = CommentList::new(vec![comment("1"), comment("2")]);
        assert_eq!(list.remove("1").map(|c| c.id), Some("1".to_owned()));
        assert!(list.remove("1").is_none());
        assert!(list.find("2").is_some());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn blank_comment_is_rejected() {
        let err = Error::from(CommentForm::new(" \n ").validate().unwrap_err());
        assert_eq!(err.to_string(), "Please enter a comment");
        assert!(CommentForm::new("Nice").validate().is_ok());
    }

    #[tokio::test]
    async fn anonymous_cannot_comment() {
        let client = ApiClient::new(&Config::new("http://localhost:5000")).unwrap();
        let res = create(&client, &Session::new(), "p1", CommentForm::new("Hi")).await;
        assert!(matches!(res, Err(Error::Unauthorized)));
    }
}
