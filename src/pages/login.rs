//! Login page: username (or email) + password.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use super::password_in_range;
use crate::net::types::LoginRequest;
use crate::routes::AppRoute;

fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter your username and password.");
    }
    if !password_in_range(password) {
        return Err("Password must be 8-100 characters.");
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = expect_context::<crate::app::Services>();
    let navigate = leptos_router::hooks::use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = match validate_login_input(&username.get(), &password.get()) {
            Ok(form) => form,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let services = services.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result =
                    crate::net::api::login(services.client.as_ref(), services.credentials.as_ref(), &form).await;
                busy.set(false);
                match result {
                    Ok(_) => navigate(AppRoute::Home.path(), leptos_router::NavigateOptions::default()),
                    Err(e) => info.set(format!("Sign-in failed: {e}")),
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
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username or email"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <p class="login-card__info">{move || info.get()}</p>
                <A href=AppRoute::Register.path()>"Create an account"</A>
            </div>
        </div>
    }
}
