use crate::{ApiClient, Result};
use blogify_api::{
    users::{AuthResponse, LoginData, ProfilePosts, RegisterData, User},
    Endpoint,
};
use tracing::warn;
use validator::Validate;

/// Public profile of a user
pub async fn get_profile(client: &ApiClient, user_id: &str) -> Result<User> {
    client.get(User::endpoint(), &[user_id]).await
}

/// Posts of a user, along with their statistics
pub async fn profile_posts(client: &ApiClient, user_id: &str) -> Result<ProfilePosts> {
    client.get(User::endpoint(), &[user_id, "posts"]).await
}

/// A profile page: the user, and their posts if those could be loaded
#[derive(Debug)]
pub struct Profile {
    pub user: User,
    pub posts: Result<ProfilePosts>,
}

/// Loads a profile page.
///
/// Only a missing user fails the whole page.
pub async fn load_profile(client: &ApiClient, user_id: &str) -> Result<Profile> {
    let user = get_profile(client, user_id).await?;
    let posts = profile_posts(client, user_id).await;
    if let Err(ref e) = posts {
        warn!("Could not fetch the posts of {}: {}", user_id, e);
    }
    Ok(Profile { user, posts })
}

/// The user the client's token belongs to
pub async fn me(client: &ApiClient) -> Result<User> {
    client.get("/api/auth/me", &[]).await
}

pub async fn login(client: &ApiClient, form: LoginForm) -> Result<AuthResponse> {
    form.validate()?;
    client
        .post(
            "/api/auth/login",
            &[],
            &LoginData {
                email: form.email.trim().to_owned(),
                password: form.password,
            },
        )
        .await
}

pub async fn register(client: &ApiClient, form: RegisterForm) -> Result<AuthResponse> {
    form.validate()?;
    client
        .post(
            "/api/auth/register",
            &[],
            &RegisterData {
                name: form.name.trim().to_owned(),
                email: form.email.trim().to_owned(),
                password: form.password,
            },
        )
        .await
}

#[derive(Default, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

#[derive(Default, Validate)]
pub struct RegisterForm {
    #[validate(custom = "validate_name")]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters long"))]
    pub password: String,
}

fn validate_name(name: &str) -> std::result::Result<(), validator::ValidationError> {
    crate::posts::not_blank(name, "blank_name", "Please enter your name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn login_form_validation() {
        let form = LoginForm {
            email: "ada@example.com".into(),
            password: "secret".into(),
        };
        assert!(form.validate().is_ok());

        let form = LoginForm {
            email: "not an email".into(),
            password: String::new(),
        };
        let err = Error::from(form.validate().unwrap_err());
        assert_eq!(err.to_string(), "Invalid email");
    }

    #[test]
    fn register_form_validation() {
        let form = RegisterForm {
            name: "  ".into(),
            email: "ada@example.com".into(),
            password: "long enough".into(),
        };
        let err = Error::from(form.validate().unwrap_err());
        assert_eq!(err.to_string(), "Please enter your name");

        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        let err = Error::from(form.validate().unwrap_err());
        assert_eq!(err.to_string(), "Password should be at least 6 characters long");
    }
}
