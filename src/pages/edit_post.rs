//! Post editing page.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::AppClient;
use crate::net::api;
use crate::state::session::SessionState;

/// Edit form for an existing post. Fetches the post, prefills the fields,
/// and redirects home if the current user is not the author. The fetch has
/// its own loading state, separate from the submit-pending flag.
#[component]
pub fn EditPostPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let params = use_params_map();

    let title = RwSignal::new(String::new());
    let subtitle = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let current_image = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let fetch_loading = RwSignal::new(true);
    let pending = RwSignal::new(false);
    let prefilled = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let image = RwSignal::new_local(None::<web_sys::File>);
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let post_id = move || params.read().get("id").unwrap_or_default();

    let post = LocalResource::new({
        let client = Arc::clone(&client);
        move || {
            let client = Arc::clone(&client);
            let id = post_id();
            async move { api::fetch_post(&client, &id).await }
        }
    });

    // Prefill the form once the post arrives; send non-authors home.
    #[cfg(feature = "csr")]
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            if prefilled.get() {
                return;
            }
            let Some(result) = post.get() else {
                return;
            };
            match result {
                Ok(fetched) => {
                    // No verdict until the startup resolution settles; the
                    // effect re-runs when the session signal changes.
                    let Some(owns_it) = session.get().owns(&fetched) else {
                        return;
                    };
                    if !owns_it {
                        navigate("/", leptos_router::NavigateOptions::default());
                        return;
                    }
                    title.set(fetched.title.clone());
                    subtitle.set(fetched.subtitle.clone().unwrap_or_default());
                    content.set(fetched.content.clone());
                    current_image.set(fetched.image_url.clone().unwrap_or_default());
                    prefilled.set(true);
                    fetch_loading.set(false);
                }
                Err(_) => {
                    error.set("Post not found".to_owned());
                    fetch_loading.set(false);
                }
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
            use crate::net::api::PostDraft;

            error.set(String::new());
            pending.set(true);

            let client = Arc::clone(&client);
            let navigate = navigate.clone();
            let id = post_id();
            let draft = PostDraft {
                title: title.get(),
                subtitle: subtitle.get(),
                content: content.get(),
                image: image.get_untracked(),
            };

            leptos::task::spawn_local(async move {
                match api::update_post(&client, &id, &draft).await {
                    Ok(_) => {
                        navigate(
                            &format!("/post/{id}"),
                            leptos_router::NavigateOptions::default(),
                        );
                    }
                    Err(err) => {
                        error.set(err.user_message("Failed to update the post"));
                    }
                }
                pending.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&client, session, prefilled, post);
        }
    };

    view! {
        <div class="create-post">
            <Show
                when=move || !fetch_loading.get()
                fallback=move || view! { <div class="loading">"Loading blog post..."</div> }
            >
                <h1>"Edit Your Post"</h1>
                <form on:submit=on_submit.clone() class="post-form">
                    <div class="form-group">
                        <label for="title">"Title *"</label>
                        <input
                            type="text"
                            id="title"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
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
                        />
                    </div>

                    <div class="form-group">
                        <label for="image">"Cover Image (optional)"</label>
                        <Show when=move || !current_image.get().is_empty()>
                            <img
                                src=move || current_image.get()
                                alt="Current cover"
                                class="current-image-preview"
                            />
                        </Show>
                        <input type="file" id="image" accept="image/*" on:change=on_image_change/>
                    </div>

                    <div class="form-group">
                        <label for="content">"Your Story *"</label>
                        <textarea
                            id="content"
                            prop:value=move || content.get()
                            on:input=move |ev| content.set(event_target_value(&ev))
                            rows="15"
                            required
                        ></textarea>
                    </div>

                    <button type="submit" disabled=move || pending.get() class="submit-btn">
                        {move || if pending.get() { "Saving..." } else { "Update Post" }}
                    </button>

                    <Show when=move || !error.get().is_empty()>
                        <div class="error-message">{move || error.get()}</div>
                    </Show>
                </form>
            </Show>
        </div>
    }
}
