//! Single post view.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::AppClient;
use crate::net::api;
use crate::state::session::SessionState;

/// Post detail page. Reads the post ID from the route, fetches the post,
/// and offers edit/delete to its author.
#[component]
pub fn ViewPostPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let params = use_params_map();
    let error = RwSignal::new(String::new());

    let post_id = move || params.read().get("id").unwrap_or_default();

    let post = LocalResource::new({
        let client = Arc::clone(&client);
        move || {
            let client = Arc::clone(&client);
            let id = post_id();
            async move { api::fetch_post(&client, &id).await }
        }
    });

    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let delete_client = Arc::clone(&client);
    let on_delete = Callback::new(move |id: String| {
        #[cfg(feature = "csr")]
        {
            let confirmed = web_sys::window().is_some_and(|w| {
                w.confirm_with_message("Are you sure? This can't be undone!")
                    .unwrap_or(false)
            });
            if !confirmed {
                return;
            }

            let client = Arc::clone(&delete_client);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api::delete_post(&client, &id).await {
                    Ok(()) => navigate("/", leptos_router::NavigateOptions::default()),
                    Err(err) => {
                        leptos::logging::warn!("delete failed: {err}");
                        error.set("Failed to delete the post. Please try again.".to_owned());
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, &delete_client);
        }
    });

    view! {
        <div class="view-post">
            <Show when=move || !error.get().is_empty()>
                <div class="error">{move || error.get()}</div>
            </Show>
            <Suspense fallback=move || view! { <div class="loading">"Loading..."</div> }>
                {move || {
                    post.get()
                        .map(|result| match result {
                            Ok(post) => {
                                let is_author = {
                                    let author_id = post.author.id.clone();
                                    move || {
                                        session.get().user.is_some_and(|u| u.id == author_id)
                                    }
                                };
                                let edit_url = format!("/edit/{}", post.id);
                                let delete_id = post.id.clone();
                                view! {
                                    <article class="post">
                                        {post
                                            .image_url
                                            .clone()
                                            .map(|url| {
                                                view! {
                                                    <img
                                                        src=url
                                                        alt=post.title.clone()
                                                        class="post-header-image"
                                                    />
                                                }
                                            })}
                                        <header class="post-header">
                                            <h1 class="post-title">{post.title.clone()}</h1>
                                            {post
                                                .subtitle
                                                .clone()
                                                .map(|s| view! { <h2 class="post-subtitle">{s}</h2> })}
                                            <div class="post-meta">
                                                <span class="post-author">
                                                    {format!("by {}", post.author.username)}
                                                </span>
                                                <span class="post-date">
                                                    {post.created_date().to_owned()}
                                                </span>
                                            </div>
                                        </header>

                                        <Show when=is_author>
                                            <div class="post-actions">
                                                <a href=edit_url.clone() class="edit-btn">
                                                    "Edit Post"
                                                </a>
                                                <button
                                                    class="delete-btn"
                                                    on:click={
                                                        let delete_id = delete_id.clone();
                                                        move |_| on_delete.run(delete_id.clone())
                                                    }
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </Show>

                                        <div class="post-content">
                                            {post
                                                .content
                                                .split('\n')
                                                .map(|paragraph| {
                                                    view! { <p>{paragraph.to_owned()}</p> }
                                                })
                                                .collect::<Vec<_>>()}
                                        </div>
                                    </article>
                                }
                                    .into_any()
                            }
                            Err(err) => {
                                leptos::logging::warn!("failed to load post: {err}");
                                view! {
                                    <div class="error">
                                        "Hmm, couldn't find that post. It might have been deleted."
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
