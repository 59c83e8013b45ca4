//! Signup page.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AppClient;
use crate::net::auth::SignupForm;
use crate::state::session::SessionState;

/// Signup form. Validation runs client-side before any network call:
/// required fields, matching passwords, minimum password length.
#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let form = SignupForm {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        };
        let data = match form.validate() {
            Ok(data) => data,
            Err(message) => {
                error.set(message);
                return;
            }
        };

        #[cfg(feature = "csr")]
        {
            use crate::net::auth::{self, AuthAttempt};

            error.set(String::new());
            pending.set(true);

            let client = Arc::clone(&client);
            let navigate = navigate.clone();
            let epoch = session.get_untracked().epoch;

            leptos::task::spawn_local(async move {
                match auth::signup(&client, &data).await {
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
            let _ = (&client, data, session);
        }
    };

    view! {
        <div class="auth-container">
            <div class="auth-form">
                <h1>"Join the developers Community!"</h1>
                <p class="auth-intro">"Sign up now and start sharing thoughts"</p>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"create a username"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            placeholder="Your username"
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="email">"Email address"</label>
                        <input
                            type="email"
                            id="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            placeholder="Eg saphaniox@example.com"
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Create a password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            placeholder="Make it secure (6+ characters)"
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="confirmPassword">"Confirm your password"</label>
                        <input
                            type="password"
                            id="confirmPassword"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                            placeholder="Enter your password again"
                            required
                        />
                    </div>

                    <button type="submit" disabled=move || pending.get() class="auth-btn">
                        {move || {
                            if pending.get() { "Creating your account..." } else { "Sign up" }
                        }}
                    </button>

                    <Show when=move || !error.get().is_empty()>
                        <div class="error-message">{move || error.get()}</div>
                    </Show>
                </form>

                <p class="auth-link">
                    "Already have an account? " <a href="/login">"Log in here"</a>
                </p>
            </div>
        </div>
    }
}
