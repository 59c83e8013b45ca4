//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::net::client::{ApiClient, FetchTransport, default_base_url};
use crate::pages::{
    create_post::CreatePostPage, edit_post::EditPostPage, home::HomePage, login::LoginPage,
    signup::SignupPage, view_post::ViewPostPage,
};
use crate::state::session::SessionState;
use crate::util::credentials::LocalCredentialStore;

/// The concrete API client wired into the UI.
pub type AppClient = ApiClient<FetchTransport, LocalCredentialStore>;

/// Root application component.
///
/// Provides the session signal and the shared API client as contexts, wires
/// credential invalidation into the session, kicks off the one-shot startup
/// verification, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let client = Arc::new(AppClient::new(
        default_base_url(),
        FetchTransport,
        LocalCredentialStore,
    ));

    // A 401 on any endpoint clears the store inside the transport hook;
    // this subscription brings the in-memory session along.
    client.on_credential_invalidated(move || session.update(SessionState::sign_out));

    provide_context(session);
    provide_context(Arc::clone(&client));

    // Resolve any stored credential before the UI treats the session as
    // settled. All failure paths converge to the anonymous state.
    #[cfg(feature = "csr")]
    {
        use crate::net::auth::{self, SessionResolution};

        let client = Arc::clone(&client);
        let epoch = session.get_untracked().epoch;
        leptos::task::spawn_local(async move {
            match auth::resolve_session(&client).await {
                SessionResolution::Identified(user) => {
                    // A 401 elsewhere may have torn the session down while
                    // the verify was in flight; drop the stale identity but
                    // still settle the startup window.
                    session.update(|s| {
                        s.apply_if_live(epoch, |s| s.resolve_user(user));
                        s.loading = false;
                    });
                }
                SessionResolution::Anonymous => {
                    session.update(SessionState::resolve_anonymous);
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = &client;
    }

    view! {
        <Title text="DevBlog"/>

        <Router>
            <div class="app">
                <Navbar/>
                <main>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <Route path=StaticSegment("create") view=CreatePostPage/>
                        <Route path=(StaticSegment("post"), ParamSegment("id")) view=ViewPostPage/>
                        <Route path=(StaticSegment("edit"), ParamSegment("id")) view=EditPostPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
