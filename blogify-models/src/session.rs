use crate::{routes::Route, users, ApiClient, Error, Result};
use blogify_api::users::{AuthResponse, User};
use blogify_common::request::Token;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    /// The API has not told us yet who the token belongs to
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// Who is using the client.
///
/// It is created once and lent to every view that needs it. The credential
/// itself lives in the [`ApiClient`], which attaches it to requests.
#[derive(Clone, Debug)]
pub struct Session {
    state: AuthState,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            state: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match self.state {
            AuthState::Authenticated(ref user) => Some(user),
            _ => None,
        }
    }

    /// The logged in user, for actions that can't be done anonymously
    pub fn require_user(&self) -> Result<&User> {
        self.user().ok_or(Error::Unauthorized)
    }

    /// Finds out who the client's token belongs to.
    ///
    /// A token the API doesn't accept anymore is dropped. Other failures leave
    /// the session unauthenticated and are returned.
    pub async fn resolve(&mut self, client: &mut ApiClient) -> Result<()> {
        if client.token().is_none() {
            self.state = AuthState::Unauthenticated;
            return Ok(());
        }
        match users::me(client).await {
            Ok(user) => {
                self.state = AuthState::Authenticated(user);
                Ok(())
            }
            Err(Error::Unauthorized) | Err(Error::NotFound) => {
                warn!("The session token was rejected, continuing anonymously");
                client.set_token(None);
                self.state = AuthState::Unauthenticated;
                Ok(())
            }
            Err(e) => {
                self.state = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Starts a session from a successful login or registration
    pub fn login(&mut self, client: &mut ApiClient, auth: AuthResponse) -> Token {
        info!("Logged in as {}", auth.user.name);
        let token = Token::new(auth.token);
        client.set_token(Some(token.clone()));
        self.state = AuthState::Authenticated(auth.user);
        token
    }

    /// Ends the session. Navigating back home is up to the caller.
    pub fn logout(&mut self, client: &mut ApiClient) {
        client.set_token(None);
        self.state = AuthState::Unauthenticated;
    }
}

/// Where the gate sends readers who are not logged in
pub trait Navigator {
    fn redirect(&mut self, to: Route);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn redirect(&mut self, to: Route) {
        (**self).redirect(to)
    }
}

#[derive(Debug, PartialEq)]
pub enum GateView<'s> {
    /// Still waiting for the session, show a neutral indicator
    Pending,
    Render(&'s User),
    Redirected,
}

/// Guards pages that need a logged in user.
///
/// A gate serves a single navigation.
pub struct SessionGate<N: Navigator> {
    navigator: N,
    redirected: bool,
}

impl<N: Navigator> SessionGate<N> {
    pub fn new(navigator: N) -> SessionGate<N> {
        SessionGate {
            navigator,
            redirected: false,
        }
    }

    /// Decides what to show for `state`.
    ///
    /// The redirection to the login page happens at most once.
    pub fn check<'s>(&mut self, state: &'s AuthState) -> GateView<'s> {
        match state {
            AuthState::Loading => GateView::Pending,
            AuthState::Authenticated(user) => GateView::Render(user),
            AuthState::Unauthenticated => {
                if !self.redirected {
                    self.redirected = true;
                    self.navigator.redirect(Route::Login);
                }
                GateView::Redirected
            }
        }
    }
}
