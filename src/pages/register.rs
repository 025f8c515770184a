//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use super::{MAX_USERNAME_LEN, MIN_USERNAME_LEN, password_in_range};
use crate::net::types::RegisterRequest;
use crate::routes::AppRoute;

fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
}

fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    bio: &str,
) -> Result<RegisterRequest, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.chars().count()) {
        return Err("Username must be 3-50 characters.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if !password_in_range(password) {
        return Err("Password must be 8-100 characters.");
    }
    let bio = bio.trim();
    Ok(RegisterRequest {
        username: username.to_owned(),
        password: password.to_owned(),
        email: email.to_owned(),
        bio: (!bio.is_empty()).then(|| bio.to_owned()),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = expect_context::<crate::app::Services>();
    let navigate = leptos_router::hooks::use_navigate();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = match validate_register_input(&username.get(), &email.get(), &password.get(), &bio.get()) {
            Ok(form) => form,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "csr")]
        {
            let services = services.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::register(services.client.as_ref(), &form).await;
                busy.set(false);
                match result {
                    Ok(_) => navigate(AppRoute::Login.path(), leptos_router::NavigateOptions::default()),
                    Err(e) => info.set(format!("Registration failed: {e}")),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&services, &navigate, form);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Taskpilot"</h1>
                <p class="login-card__subtitle">"Create an account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <textarea
                        class="login-input"
                        placeholder="Short bio (optional)"
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    ></textarea>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <p class="login-card__info">{move || info.get()}</p>
                <A href=AppRoute::Login.path()>"Already have an account? Sign in"</A>
            </div>
        </div>
    }
}
