//! Clickable header cell with a sort direction indicator.
//!
//! ```text
//! <SortableHeaderCell
//!     label="Price"
//!     sortable=true
//!     direction=Signal::derive(move || sorting.with(|s| s.direction("price")))
//!     on_sort=Callback::new(move |_| toggle("price"))
//! />
//! ```

use crate::shared::grid::sorting::{sort_class, sort_indicator, SortDirection};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Current direction of this column, `None` when unsorted
    #[prop(into)]
    direction: Signal<Option<SortDirection>>,

    /// Columns that cannot be sorted render a plain header
    #[prop(optional, default = true)]
    sortable: bool,

    on_sort: Callback<()>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Header alignment (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = match (sortable, align) {
        (true, "right") => "cursor: pointer; justify-content: flex-end; padding-right: 12px;",
        (true, _) => "cursor: pointer; padding-right: 12px;",
        (false, "right") => "justify-content: flex-end; padding-right: 12px;",
        (false, _) => "padding-right: 12px;",
    };

    let aria_sort = move || match direction.get() {
        Some(SortDirection::Asc) => "ascending",
        Some(SortDirection::Desc) => "descending",
        None => "none",
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                aria-sort=aria_sort
                on:click=move |_| {
                    if sortable {
                        on_sort.run(());
                    }
                }
            >
                {label}
                <Show when=move || sortable>
                    <span class=move || sort_class(direction.get())>
                        {move || sort_indicator(direction.get())}
                    </span>
                </Show>
            </div>
        </TableHeaderCell>
    }
}
