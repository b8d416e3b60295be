use contracts::domain::resource::ResourceKind;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_params_map;
use leptos_router::path;

use crate::dashboards::OverviewDashboard;
use crate::domain::catalog::ResourceListPage;
use crate::domain::layout_config::LayoutEditorPage;
use crate::layout::Shell;
use crate::system::auth::guard::RequireSession;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page__title">"Page not found"</h1>
        </div>
    }
}

#[component]
fn CatalogRoute() -> impl IntoView {
    let params = use_params_map();

    // a new slug builds a fresh page so no list state leaks between resources
    move || {
        let slug = params.read().get("resource").unwrap_or_default();
        match ResourceKind::from_slug(&slug) {
            Some(kind) => view! { <ResourceListPage kind=kind /> }.into_any(),
            None => view! { <NotFound /> }.into_any(),
        }
    }
}

#[component]
fn LayoutRoute() -> impl IntoView {
    let params = use_params_map();

    move || {
        let page = params.read().get("page").unwrap_or_else(|| "home".to_string());
        view! { <LayoutEditorPage page=page /> }
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <RequireSession>
                <Shell>
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=OverviewDashboard />
                        <Route path=path!("/catalog/:resource") view=CatalogRoute />
                        <Route path=path!("/layout/:page") view=LayoutRoute />
                    </Routes>
                </Shell>
            </RequireSession>
        </Router>
    }
}
