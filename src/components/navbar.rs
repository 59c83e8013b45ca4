//! Top navigation bar with session-dependent links and logout.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AppClient;
use crate::state::session::SessionState;

/// Navigation bar.
///
/// Authenticated users get a write-a-blog link, a greeting, and a logout
/// button; anonymous visitors get login/signup links. Logout notifies the
/// server best-effort and tears the local session down regardless.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let username = move || {
        session
            .get()
            .user
            .map_or_else(String::new, |u| u.username)
    };

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            let client = Arc::clone(&client);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                crate::net::auth::logout(&client).await;
                session.update(SessionState::sign_out);
                navigate("/", leptos_router::NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &client;
        }
    };

    view! {
        <nav class="navbar">
            <div class="navbar-container">
                <a href="/" class="navbar-brand">
                    "Home"
                </a>
                <div class="navbar-menu">
                    <Show
                        when=move || session.get().is_authenticated()
                        fallback=|| {
                            view! {
                                <a href="/login" class="navbar-item">
                                    "Login"
                                </a>
                                <a href="/signup" class="navbar-item">
                                    "sign up"
                                </a>
                            }
                        }
                    >
                        <a href="/create" class="navbar-item">
                            "write a blog"
                        </a>
                        <span class="navbar-user">{move || format!("Hey, {}!", username())}</span>
                        <button class="navbar-logout" on:click=on_logout.clone()>
                            "Logout"
                        </button>
                    </Show>
                </div>
            </div>
        </nav>
    }
}
