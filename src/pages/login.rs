//! Login page.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AppClient;
use crate::state::session::SessionState;

/// Login form. On success the session enters the authenticated state and
/// the user lands back on the home page; failures show the server's
/// message inline.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if email.get().is_empty() || password.get().is_empty() {
            error.set("Please fill in all fields".to_owned());
            return;
        }

        #[cfg(feature = "csr")]
        {
            use crate::net::auth::{self, AuthAttempt, LoginCredentials};

            error.set(String::new());
            pending.set(true);

            let client = Arc::clone(&client);
            let navigate = navigate.clone();
            let credentials = LoginCredentials {
                email: email.get(),
                password: password.get(),
            };
            let epoch = session.get_untracked().epoch;

            leptos::task::spawn_local(async move {
                match auth::login(&client, &credentials).await {
                    AuthAttempt::Success { user } => {
                        session.update(|s| s.apply_if_live(epoch, |s| s.set_user(user)));
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    AuthAttempt::Failure { message } => error.set(message),
                }
                pending.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&client, session);
        }
    };

    view! {
        <div class="auth-container">
            <div class="auth-form">
                <h1>"Welcome back!"</h1>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email address"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            placeholder="Your email"
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            placeholder="Your password"
                            required
                        />
                    </div>

                    <button type="submit" disabled=move || pending.get() class="auth-btn">
                        {move || if pending.get() { "Logging in..." } else { "Log in" }}
                    </button>

                    <Show when=move || !error.get().is_empty()>
                        <div class="error-message">{move || error.get()}</div>
                    </Show>
                </form>

                <p class="auth-link">
                    "New here? " <a href="/signup">"Sign up instead"</a>
                </p>
            </div>
        </div>
    }
}
