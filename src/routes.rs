//! Route descriptors for the application's pages.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// A navigable destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Register,
}

impl AppRoute {
    pub const ALL: [Self; 3] = [Self::Home, Self::Login, Self::Register];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
        }
    }

    /// Only reachable without a valid session.
    #[must_use]
    pub fn guest_only(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Resolve a location pathname, ignoring a trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.name() == name)
    }
}
