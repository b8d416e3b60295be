use leptos::prelude::*;

use super::context::use_session;
use crate::system::pages::login::LoginPage;

/// Renders `children` only while an operator is signed in; otherwise the
/// login form.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            {children()}
        </Show>
    }
}
