use crate::shared::grid::{PageItem, PaginationState};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page strip with ellipsis compression, Previous/Next and a page size
/// selector. Purely presentational: clicks are reported, never acted on.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    state: Signal<PaginationState>,

    /// Row total for the "x–y of z" label
    #[prop(optional_no_strip, into)]
    total_rows: Option<Signal<usize>>,

    /// Receives the 1-based target page
    #[prop(optional_no_strip)]
    on_page_change: Option<Callback<usize>>,

    #[prop(optional_no_strip)]
    on_per_page_change: Option<Callback<usize>>,

    #[prop(optional)]
    per_page_options: Vec<usize>,
) -> impl IntoView {
    let go_to = move |page: Option<usize>| {
        if let (Some(page), Some(cb)) = (page, on_page_change) {
            if let Some(page) = state.get_untracked().page_request(page) {
                cb.run(page);
            }
        }
    };

    let has_size_selector = !per_page_options.is_empty() && on_per_page_change.is_some();

    let range_label = move || {
        let total = total_rows?.get();
        let label = match state.get().row_range(total) {
            Some((from, to)) => format!("{}–{} of {}", from, to, total),
            None => format!("0 of {}", total),
        };
        Some(label)
    };

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{range_label}</span>
            <button
                class="pagination-btn"
                on:click=move |_| go_to(state.get_untracked().previous())
                disabled=move || !state.get().has_previous()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                let current = state.get().page();
                state.get().items().into_iter().map(|item| match item {
                    PageItem::Page(page) => view! {
                        <button
                            class=if page == current { "pagination-btn pagination-btn--active" } else { "pagination-btn" }
                            aria-current=(page == current).then_some("page")
                            on:click=move |_| go_to(Some(page))
                        >
                            {page.to_string()}
                        </button>
                    }.into_any(),
                    PageItem::Ellipsis => view! {
                        <span class="pagination-ellipsis">"…"</span>
                    }.into_any(),
                }).collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| go_to(state.get_untracked().next())
                disabled=move || !state.get().has_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <Show when=move || has_size_selector>
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let (Ok(size), Some(cb)) = (event_target_value(&ev).parse::<usize>(), on_per_page_change) {
                            cb.run(size);
                        }
                    }
                    prop:value=move || state.get().per_page.to_string()
                >
                    {per_page_options.iter().map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || state.get().per_page == size>
                                {format!("{} / page", size)}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </Show>
        </div>
    }
}
