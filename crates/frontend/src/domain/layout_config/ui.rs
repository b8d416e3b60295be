use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api::{fetch_layout, save_layout};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::reorder::{SectionOrder, SectionReorderEditor};
use crate::shared::toast::use_toasts;
use crate::system::auth::use_session;

/// Storefront pages whose section order can be edited.
pub const EDITABLE_PAGES: [(&str, &str); 2] = [("home", "Home page"), ("shop", "Shop page")];

pub fn page_title(page: &str) -> String {
    EDITABLE_PAGES
        .iter()
        .find(|(key, _)| *key == page)
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| format!("{} page", page))
}

#[component]
pub fn LayoutEditorPage(#[prop(into)] page: String) -> impl IntoView {
    let session = use_session();
    let toasts = use_toasts();
    let page = StoredValue::new(page);

    let order = RwSignal::new(SectionOrder::new(Vec::new()));
    let is_loading = RwSignal::new(false);
    let load_error = RwSignal::new(Option::<String>::None);

    let load = move || {
        is_loading.set(true);
        load_error.set(None);
        let client = session.client();
        let page = page.get_value();
        spawn_local(async move {
            let envelope = fetch_layout(&client, &page).await;
            session.observe(&envelope);
            match envelope.into_result() {
                Ok(layout) => order.update(|o| o.reset(layout.sections)),
                Err(failure) => {
                    toasts.error(failure.message.clone());
                    load_error.set(Some(failure.message));
                }
            }
            is_loading.set(false);
        });
    };

    load();

    let on_save = Callback::new(move |_| {
        let mut sections = None;
        order.update(|o| match o.begin_save() {
            Ok(s) => sections = Some(s),
            Err(e) => log::debug!("Save ignored: {}", e),
        });
        let Some(sections) = sections else {
            return;
        };

        let client = session.client();
        let page = page.get_value();
        spawn_local(async move {
            let envelope = save_layout(&client, &page, &sections).await;
            session.observe(&envelope);
            let succeeded = envelope.success();
            order.update(|o| o.finish_save(succeeded));
            match envelope.into_result() {
                Ok(_) => {
                    log::info!("Saved section order of {}", page);
                    toasts.success("Section order saved");
                }
                Err(failure) => toasts.error(format!("Could not save order: {}", failure.message)),
            }
        });
    });

    view! {
        <div class="page">
            <PageHeader
                title=page_title(&page.get_value())
                subtitle="Drag sections or use the keyboard to change their order".to_string()
            >
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || is_loading.get() || order.with(SectionOrder::is_saving))
                    on_click=move |_| load()
                >
                    {icon("refresh")}
                    " Reload"
                </Button>
            </PageHeader>

            <Show when=move || load_error.get().is_some()>
                <div class="error-message">{move || load_error.get().unwrap_or_default()}</div>
            </Show>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <div class="page__loading">"Loading sections..."</div> }
            >
                <Show
                    when=move || !order.with(|o| o.sections().is_empty())
                    fallback=|| view! { <div class="page__empty">"This page has no sections"</div> }
                >
                    <SectionReorderEditor order=order on_save=on_save />
                </Show>
            </Show>
        </div>
    }
}
