use std::fmt;

/// Pages of the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Post(String),
    Profile(String),
    Dashboard,
    Create,
    Edit(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(|c| c == '?' || c == '#').next().unwrap_or("");
        let segments = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["create"] => Some(Route::Create),
            ["blog", id] => Some(Route::Post((*id).to_owned())),
            ["profile", id] => Some(Route::Profile((*id).to_owned())),
            ["edit", id] => Some(Route::Edit((*id).to_owned())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_owned(),
            Route::Login => "/login".to_owned(),
            Route::Register => "/register".to_owned(),
            Route::Post(id) => format!("/blog/{}", id),
            Route::Profile(id) => format!("/profile/{}", id),
            Route::Dashboard => "/dashboard".to_owned(),
            Route::Create => "/create".to_owned(),
            Route::Edit(id) => format!("/edit/{}", id),
        }
    }

    /// Id of the record shown by the page, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Route::Post(id) | Route::Profile(id) | Route::Edit(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Pages that are only shown to logged in users
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Create | Route::Edit(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
