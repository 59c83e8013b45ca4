//! Home page: the post list with create/edit/delete entry points.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AppClient;
use crate::components::post_card::PostCard;
use crate::net::api;
use crate::state::session::SessionState;

/// Home page — welcome header plus the recent-posts grid.
///
/// Anonymous visitors are redirected to `/login` when they try to create a
/// post; authors get edit/delete actions on their own cards.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let client = expect_context::<Arc<AppClient>>();
    let error = RwSignal::new(String::new());

    let posts = LocalResource::new({
        let client = Arc::clone(&client);
        move || {
            let client = Arc::clone(&client);
            async move { api::fetch_posts(&client).await }
        }
    });

    let delete_client = Arc::clone(&client);
    let on_delete = Callback::new(move |(post_id, post_title): (String, String)| {
        #[cfg(feature = "csr")]
        {
            let confirmed = web_sys::window().is_some_and(|w| {
                w.confirm_with_message(&format!(
                    "Really delete \"{post_title}\"? This can't be undone!"
                ))
                .unwrap_or(false)
            });
            if !confirmed {
                return;
            }

            let client = Arc::clone(&delete_client);
            leptos::task::spawn_local(async move {
                match api::delete_post(&client, &post_id).await {
                    Ok(()) => posts.refetch(),
                    Err(err) => {
                        leptos::logging::warn!("delete failed: {err}");
                        error.set("Something went wrong while deleting the post".to_owned());
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (post_id, post_title);
            let _ = &delete_client;
        }
    });

    let create_href = move || {
        if session.get().is_authenticated() {
            "/create"
        } else {
            "/login"
        }
    };

    view! {
        <div class="home">
            <div class="posts-container">
                <div class="home-header">
                    <h1>"Welcome to the Developer Community"</h1>
                    <div class="home-content">
                        <div class="feature-paragraphs">
                            <p class="feature-paragraph">
                                "Where we share insights on the latest programming languages, tools and trends."
                            </p>
                            <p class="feature-paragraph">
                                "Learn from other developers by reading detailed blog posts."
                            </p>
                            <p class="feature-paragraph">
                                "Showcase our knowledge by writing and publishing technical articles."
                            </p>
                        </div>
                    </div>
                    <a href=create_href class="create-post-btn">
                        "create a blog"
                    </a>
                </div>

                <div class="blog-section">
                    <h2>"Recent Posts"</h2>
                    <Show when=move || !error.get().is_empty()>
                        <div class="error">{move || error.get()}</div>
                    </Show>
                    <Suspense fallback=move || {
                        view! { <div class="loading">"Loading your blogs..."</div> }
                    }>
                        {move || {
                            posts
                                .get()
                                .map(|result| match result {
                                    Ok(list) => {
                                        if list.is_empty() {
                                            view! {
                                                <div class="no-posts">
                                                    <h3>"No posts yet!"</h3>
                                                    <p>
                                                        "Be the first to share something awesome with the community."
                                                    </p>
                                                    <a href=create_href class="first-post-btn">
                                                        "Write the First blog Post"
                                                    </a>
                                                </div>
                                            }
                                                .into_any()
                                        } else {
                                            view! {
                                                <div class="posts-grid">
                                                    {list
                                                        .into_iter()
                                                        .map(|post| {
                                                            view! { <PostCard post=post on_delete=on_delete/> }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </div>
                                            }
                                                .into_any()
                                        }
                                    }
                                    Err(err) => {
                                        leptos::logging::warn!("failed to load posts: {err}");
                                        view! {
                                            <div class="error">"Couldn't load blog posts right now."</div>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </div>
            </div>
        </div>
    }
}
