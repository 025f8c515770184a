//! Root application component with routing and the shared service context.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::guarded::Guarded;
use crate::config::AppConfig;
use crate::net::http::{ClientConfig, HttpClient};
use crate::net::transport::AppTransport;
use crate::pages::{home::HomePage, login::LoginPage, register::RegisterPage};
use crate::routes::AppRoute;
use crate::util::credential::{CredentialStore, LocalStorageCredentials};

/// Credential store and API client shared by the guard and every page.
#[derive(Clone)]
pub struct Services {
    pub credentials: Arc<dyn CredentialStore>,
    pub client: Arc<HttpClient<AppTransport>>,
}

impl Services {
    /// Wire the browser token store into a client built from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_credentials(config, Arc::new(LocalStorageCredentials))
    }

    #[must_use]
    pub fn with_credentials(config: &AppConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let client = HttpClient::standard(
            ClientConfig::from_app(config),
            AppTransport::from_flag(config.use_mock),
            credentials.clone(),
        );
        Self { credentials, client: Arc::new(client) }
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env();
    log::info!("starting (mock={}, api={})", config.use_mock, config.base_api);
    provide_context(Services::from_config(&config));

    view! {
        <Title text="Taskpilot"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <Guarded route=AppRoute::Home><HomePage/></Guarded> }
                />
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <Guarded route=AppRoute::Login><LoginPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <Guarded route=AppRoute::Register><RegisterPage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}
