//! Post creation page.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AppClient;
use crate::state::session::SessionState;

/// Post creation form: title, optional subtitle, optional cover image, and
/// content. Anonymous visitors are redirected to `/login`.
#[component]
pub fn CreatePostPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let title = RwSignal::new(String::new());
    let subtitle = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let image = RwSignal::new_local(None::<web_sys::File>);
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    // Redirect if not logged in (once the session has settled).
    #[cfg(feature = "csr")]
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let state = session.get();
            if !state.loading && !state.is_authenticated() {
                navigate("/login", leptos_router::NavigateOptions::default());
            }
        });
    }

    let on_image_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let file = event_target::<web_sys::HtmlInputElement>(&ev)
                .files()
                .and_then(|list| list.get(0));
            image.set(file);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "csr")]
        {
            use crate::net::api::{self, PostDraft};

            error.set(String::new());
            pending.set(true);

            let client = Arc::clone(&client);
            let navigate = navigate.clone();
            let draft = PostDraft {
                title: title.get(),
                subtitle: subtitle.get(),
                content: content.get(),
                image: image.get_untracked(),
            };

            leptos::task::spawn_local(async move {
                match api::create_post(&client, &draft).await {
                    Ok(post) => {
                        navigate(
                            &format!("/post/{}", post.id),
                            leptos_router::NavigateOptions::default(),
                        );
                    }
                    Err(err) => {
                        error.set(err.user_message("Something went wrong. Please try again."));
                    }
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
        <div class="create-post">
            <h1>"Share Your Thoughts"</h1>
            <form on:submit=on_submit class="post-form">
                <div class="form-group">
                    <label for="title">"Title *"</label>
                    <input
                        type="text"
                        id="title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                        placeholder="What's your post about?"
                        required
                    />
                </div>

                <div class="form-group">
                    <label for="subtitle">"Subtitle (optional)"</label>
                    <input
                        type="text"
                        id="subtitle"
                        prop:value=move || subtitle.get()
                        on:input=move |ev| subtitle.set(event_target_value(&ev))
                        placeholder="Add a short description..."
                    />
                </div>

                <div class="form-group">
                    <label for="image">"Cover Image (optional)"</label>
                    <input type="file" id="image" accept="image/*" on:change=on_image_change/>
                </div>

                <div class="form-group">
                    <label for="content">"Your Story *"</label>
                    <textarea
                        id="content"
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                        rows="15"
                        placeholder="Start writing your post here..."
                        required
                    ></textarea>
                </div>

                <button type="submit" disabled=move || pending.get() class="submit-btn">
                    {move || if pending.get() { "Publishing..." } else { "Publish Post" }}
                </button>

                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
            </form>
        </div>
    }
}
