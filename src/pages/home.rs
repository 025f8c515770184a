//! Home page shown to signed-in users.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::Services;
use crate::net::api;
use crate::net::types::UserProfile;
use crate::routes::AppRoute;

fn greeting(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) => format!("Welcome back, {}.", p.username),
        None => "Loading your profile...".to_owned(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let services = expect_context::<Services>();
    let navigate = use_navigate();
    let profile = RwSignal::new(None::<UserProfile>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let services = services.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_profile(services.client.as_ref()).await {
                Ok(p) => profile.set(Some(p)),
                Err(e) => error.set(Some(e.message)),
            }
        });
    }

    let on_logout = move |_| {
        api::logout(services.credentials.as_ref());
        navigate(AppRoute::Login.path(), NavigateOptions::default());
    };

    view! {
        <div class="home-page">
            <h1>"Taskpilot"</h1>
            <p class="home-page__greeting">{move || greeting(profile.get().as_ref())}</p>
            <Show when=move || error.get().is_some()>
                <p class="home-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="logout-button" on:click=on_logout>
                "Sign out"
            </button>
        </div>
    }
}
