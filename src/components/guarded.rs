//! Route wrapper that runs the navigation guard before rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router rebuilds a route's view on every navigation to it, so mounting
//! this component is the "before each" hook: it suspends rendering until
//! [`crate::guard::decide`] settles, then shows the page or redirects.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::Services;
#[cfg(feature = "csr")]
use crate::guard::Decision;
use crate::routes::AppRoute;

/// Redirects replace the guarded entry so "back" does not bounce through it.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Render `children` only once the guard allows `route`.
#[component]
pub fn Guarded(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let services = expect_context::<Services>();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let decision =
            crate::guard::decide(route, services.credentials.as_ref(), services.client.as_ref()).await;
        match decision {
            Decision::Allow => allowed.set(true),
            Decision::Redirect(to) => navigate(to.path(), redirect_options()),
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (services, navigate, route);
    }

    view! {
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}
