use contracts::domain::resource::ResourceKind;
use leptos::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use thaw::*;

use super::api::bulk_delete;
use super::columns::columns_for;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::DataGrid;
use crate::shared::grid::{PaginationState, RowSelection, SelectionUpdate, SortingState};
use crate::shared::icons::icon;
use crate::shared::resource::{use_list_resource, ListQuery};
use crate::shared::toast::use_toasts;
use crate::system::auth::use_session;
use crate::usecases::push_notification::PushNotificationPanel;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// List screen shared by every catalog, marketing and sales resource.
#[component]
pub fn ResourceListPage(kind: ResourceKind) -> impl IntoView {
    let session = use_session();
    let toasts = use_toasts();
    let config = session.config();

    let query = RwSignal::new(ListQuery::new(config.default_per_page));
    let resource = use_list_resource(kind, query.into());
    let columns = Signal::stored(columns_for(kind));

    let selection = RwSignal::new(RowSelection::new());
    let sorting = RwSignal::new(SortingState::new());
    let search = RwSignal::new(String::new());
    let is_deleting = RwSignal::new(false);

    let rows = Signal::derive(move || resource.data.with(|page| page.items.clone()));
    let total_rows = Signal::derive(move || resource.data.with(|page| page.total));
    let pagination = Signal::derive(move || {
        let total = total_rows.get();
        query.with(|q| PaginationState::from_total(q.page, total, q.per_page))
    });

    Effect::new(move |_| {
        if let Some(message) = resource.error.get() {
            toasts.error(message);
        }
    });

    // a shrunken total leaves the requested page out of range
    Effect::new(move |_| {
        if resource.loading.get() {
            return;
        }
        let total = total_rows.get();
        let stale = query.with_untracked(|q| q.clone().clamp_to_total(total));
        if stale {
            query.update(|q| {
                q.clamp_to_total(total);
            });
        }
    });

    let on_selection_change = Callback::new(move |next: RowSelection| selection.set(next));

    // orders are sorted by the grid within the loaded page
    let on_sorting_change = kind.sorts_on_server().then(|| {
        Callback::new(move |next: SortingState| {
            let active = next.active().cloned();
            sorting.set(next);
            query.update(|q| {
                q.sort = active;
                q.page = 1;
            });
        })
    });

    let on_page_change = Callback::new(move |page: usize| query.update(|q| q.page = page));
    let on_per_page_change = Callback::new(move |per_page: usize| {
        query.update(|q| {
            q.per_page = per_page;
            q.page = 1;
        })
    });

    let apply_search = move || {
        let term = search.get_untracked();
        query.update(|q| {
            q.search = term;
            q.page = 1;
        });
    };

    let delete_selected = move |_| {
        let ids: Vec<String> = selection.with_untracked(|s| s.ids().into_iter().collect());
        if ids.is_empty() {
            return;
        }
        let noun = kind.title().to_lowercase();
        if !confirm(&format!("Delete {} selected {}?", ids.len(), noun)) {
            return;
        }

        is_deleting.set(true);
        let client = session.client();
        wasm_bindgen_futures::spawn_local(async move {
            let report = bulk_delete(&client, kind, &ids).await;
            if let Some(failure) = report.first_unauthorized() {
                session.observe_failure(failure);
            }

            let deleted: BTreeSet<String> = report.deleted.iter().cloned().collect();
            selection.update(|s| {
                s.set_selection(
                    SelectionUpdate::Updater(Box::new(move |flags: &BTreeMap<String, bool>| {
                        flags
                            .iter()
                            .filter(|(id, _)| !deleted.contains(*id))
                            .map(|(id, on)| (id.clone(), *on))
                            .collect()
                    })),
                    &[],
                )
            });

            if report.failed.is_empty() {
                toasts.success(report.summary(kind));
            } else {
                toasts.error(report.summary(kind));
            }
            is_deleting.set(false);
            resource.refetch();
        });
    };

    let selected_rows = Signal::derive(move || selection.with(RowSelection::selected_rows));

    view! {
        <div class="page">
            <PageHeader title=kind.title() count=total_rows>
                {kind.allows_delete().then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(move || is_deleting.get() || selection.with(RowSelection::is_empty))
                        on_click=delete_selected
                    >
                        {icon("trash")}
                        {move || format!(" Delete ({})", selection.with(RowSelection::len))}
                    </Button>
                })}
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=resource.loading
                    on_click=move |_| resource.refetch()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__toolbar">
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <div
                        class="page__search"
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                apply_search();
                            }
                        }
                    >
                        <Input value=search placeholder=format!("Search {}", kind.title().to_lowercase()) />
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_search()>
                        {icon("search")}
                        " Search"
                    </Button>
                    <Show when=move || !selection.with(RowSelection::is_empty)>
                        <span class="page__selection">
                            {move || format!("{} selected", selection.with(RowSelection::len))}
                        </span>
                        <Button
                            appearance=ButtonAppearance::Transparent
                            on_click=move |_| selection.update(RowSelection::clear)
                        >
                            "Clear selection"
                        </Button>
                    </Show>
                </Flex>
            </div>

            {(kind == ResourceKind::Users).then(|| view! {
                <PushNotificationPanel recipients=selected_rows />
            })}

            <DataGrid
                rows=rows
                columns=columns
                selectable=true
                selected_rows=selection
                on_selection_change=on_selection_change
                sorting=sorting
                on_sorting_change=on_sorting_change
                pagination=pagination
                total_rows=total_rows
                on_page_change=on_page_change
                on_per_page_change=on_per_page_change
                per_page_options=config.per_page_options.clone()
                loading=resource.loading
                empty_message=format!("No {} found", kind.title().to_lowercase())
            />
        </div>
    }
}
