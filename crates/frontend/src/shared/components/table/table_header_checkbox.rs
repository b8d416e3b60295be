//! "Select all on this page" checkbox for the table header.

use crate::shared::grid::selection::CheckboxState;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Tri-state header checkbox. `indeterminate` is a DOM property only, so it
/// is pushed to the element from an effect.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<CheckboxState>,

    /// `true` = select every visible row, `false` = clear them
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = state.get() == CheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all rows on this page"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
