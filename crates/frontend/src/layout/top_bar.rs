use leptos::prelude::*;

use crate::shared::icons::icon;
use crate::system::auth::use_session;

#[component]
pub fn TopBar() -> impl IntoView {
    let session = use_session();

    let user_label = move || {
        session
            .user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Pet Caart Admin"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__user">{user_label}</span>
                <button
                    class="top-header__icon-btn"
                    title="Sign out"
                    on:click=move |_| session.logout()
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
