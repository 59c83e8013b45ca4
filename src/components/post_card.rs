//! Post summary card for the home page grid.

use leptos::prelude::*;

use crate::net::types::Post;
use crate::state::session::SessionState;

/// One post card: cover image, title, excerpt, meta line, and author-only
/// edit/delete actions.
#[component]
pub fn PostCard(post: Post, #[prop(into)] on_delete: Callback<(String, String)>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let author_id = post.author.id.clone();
    let is_author = move || {
        session
            .get()
            .user
            .is_some_and(|u| u.id == author_id)
    };

    let post_url = format!("/post/{}", post.id);
    let edit_url = format!("/edit/{}", post.id);
    let delete_args = (post.id.clone(), post.title.clone());
    let excerpt = post.excerpt();
    let created = post.created_date().to_owned();

    view! {
        <div class="post-card">
            {post
                .image_url
                .clone()
                .map(|url| view! { <img src=url alt=post.title.clone() class="post-image"/> })}
            <div class="post-content">
                <h2 class="post-title">
                    <a href=post_url.clone()>{post.title.clone()}</a>
                </h2>
                {post.subtitle.clone().map(|s| view! { <p class="post-subtitle">{s}</p> })}
                <p class="post-excerpt">{excerpt}</p>
                <div class="post-meta">
                    <span class="post-author">{format!("by {}", post.author.username)}</span>
                    <span class="post-date">{created}</span>
                </div>

                <div class="post-view-section">
                    <a href=post_url class="view-post-btn">
                        "view full blog"
                    </a>
                </div>

                <Show when=is_author>
                    <div class="post-actions">
                        <a href=edit_url.clone() class="edit-btn">
                            "Edit"
                        </a>
                        <button
                            class="delete-btn"
                            on:click={
                                let delete_args = delete_args.clone();
                                move |_| on_delete.run(delete_args.clone())
                            }
                        >
                            "Delete"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
