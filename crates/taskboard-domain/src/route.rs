use std::fmt;

/// Top-level screens, addressed by path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    Signup,
    #[default]
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Any unrecognised path resolves to the login screen.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/signup" | "signup" => Route::Signup,
            "/dashboard" | "dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }

    /// Screens that need a session redirect to login without one.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard)
    }

    pub fn guard(self, has_session: bool) -> Self {
        if self.requires_session() && !has_session {
            Route::Login
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
