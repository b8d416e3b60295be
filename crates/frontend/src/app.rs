use crate::config::AppConfig;
use crate::routes::routes::AppRoutes;
use crate::shared::toast::{ToastService, Toaster};
use crate::system::auth::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Session and toasts are handed to every screen via context.
    provide_context(SessionContext::restore(AppConfig::load_or_default()));
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
        <Toaster />
    }
}
