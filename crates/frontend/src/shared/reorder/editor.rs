use leptos::ev::{DragEvent, KeyboardEvent};
use leptos::prelude::*;

use super::section_order::{DragState, ReorderError, SectionOrder};
use crate::shared::icons::icon;

fn item_class(index: usize, drag: DragState) -> &'static str {
    match drag {
        DragState::Dragging { from, .. } if from == index => "reorder__item reorder__item--dragging",
        DragState::Dragging { over, .. } if over == index => "reorder__item reorder__item--target",
        _ => "reorder__item",
    }
}

fn apply(order: RwSignal<SectionOrder>, f: impl FnOnce(&mut SectionOrder) -> Result<bool, ReorderError>) {
    order.update(|o| {
        if let Err(e) = f(o) {
            log::debug!("Reorder ignored: {}", e);
        }
    });
}

fn start_drag(order: RwSignal<SectionOrder>, index: usize) {
    apply(order, |o| o.begin_drag(index).map(|_| false));
}

fn drag_over(order: RwSignal<SectionOrder>, index: usize) {
    let needs_hover = order.with_untracked(|o| {
        matches!(o.drag_state(), DragState::Dragging { over, .. } if over != index)
    });
    if needs_hover {
        apply(order, |o| o.hover(index).map(|_| false));
    }
}

fn drop_on(order: RwSignal<SectionOrder>, index: usize) {
    apply(order, |o| o.drop_at(index));
}

/// Sortable list of page sections.
///
/// Pointer: drag an item by its handle; the rest of the row only accepts
/// drops. Keyboard: focus a handle, Space or Enter picks the item up,
/// ArrowUp/ArrowDown choose the new slot, Space or Enter drops it, Escape
/// cancels. Saving is left to the host via `on_save`.
#[component]
pub fn SectionReorderEditor(
    order: RwSignal<SectionOrder>,
    on_save: Callback<()>,
) -> impl IntoView {
    let on_key = move |index: usize, ev: KeyboardEvent| {
        let key = ev.key();
        match key.as_str() {
            " " | "Enter" => {
                ev.prevent_default();
                if order.with_untracked(SectionOrder::is_dragging) {
                    apply(order, |o| o.drop_at_target());
                } else {
                    start_drag(order, index);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                apply(order, |o| o.move_target(-1).map(|_| false));
            }
            "ArrowDown" => {
                ev.prevent_default();
                apply(order, |o| o.move_target(1).map(|_| false));
            }
            "Escape" => order.update(SectionOrder::cancel),
            _ => {}
        }
    };

    let status = move || {
        order.with(|o| match o.drag_state() {
            DragState::Dragging { from, over } => {
                let title = o.sections().get(from).map(|s| s.title.clone()).unwrap_or_default();
                format!("Moving {} to position {}", title, over + 1)
            }
            DragState::Idle if o.is_saving() => "Saving...".to_string(),
            DragState::Idle if o.has_unsaved_changes() => "Unsaved changes".to_string(),
            DragState::Idle => "All changes saved".to_string(),
        })
    };

    view! {
        <div class="reorder">
            <ul class="reorder__list" role="listbox" aria-label="Page sections">
                <For
                    each=move || order.with(|o| o.sections().iter().cloned().enumerate().collect::<Vec<_>>())
                    key=|(index, section)| (*index, section.key.clone(), section.position)
                    children=move |(index, section)| {
                        let label = if section.title.is_empty() { section.key.clone() } else { section.title.clone() };
                        let key = section.key.clone();
                        view! {
                            <li
                                class=move || item_class(index, order.with(SectionOrder::drag_state))
                                on:dragover=move |ev: DragEvent| {
                                    ev.prevent_default();
                                    drag_over(order, index);
                                }
                                on:drop=move |ev: DragEvent| {
                                    ev.prevent_default();
                                    drop_on(order, index);
                                }
                                on:dragend=move |_| order.update(SectionOrder::cancel)
                            >
                                <span
                                    class="reorder__handle"
                                    role="button"
                                    tabindex="0"
                                    draggable="true"
                                    aria-label=format!("Reorder {}", label)
                                    on:dragstart=move |ev: DragEvent| {
                                        if let Some(dt) = ev.data_transfer() {
                                            dt.set_effect_allowed("move");
                                            let _ = dt.set_data("text/plain", &key);
                                        }
                                        start_drag(order, index);
                                    }
                                    on:keydown=move |ev: KeyboardEvent| on_key(index, ev)
                                >
                                    {icon("grip")}
                                </span>
                                <span class="reorder__position">{section.position.to_string()}</span>
                                <span class="reorder__title">{label.clone()}</span>
                                {(!section.visible).then(|| view! { <span class="badge badge--neutral">"Hidden"</span> })}
                            </li>
                        }
                    }
                />
            </ul>

            <div class="reorder__footer">
                <span class="reorder__status" aria-live="polite">{status}</span>
                <button
                    class="btn-primary"
                    disabled=move || !order.with(SectionOrder::can_save)
                    on:click=move |_| on_save.run(())
                >
                    {icon("save")}
                    " Save order"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::page_section::PageSection;

    #[test]
    fn test_item_class() {
        let drag = DragState::Dragging { from: 0, over: 2 };
        assert_eq!(item_class(0, drag), "reorder__item reorder__item--dragging");
        assert_eq!(item_class(2, drag), "reorder__item reorder__item--target");
        assert_eq!(item_class(1, drag), "reorder__item");
        assert_eq!(item_class(0, DragState::Idle), "reorder__item");
    }

    fn sections(keys: &[&str]) -> SectionOrder {
        SectionOrder::new(
            keys.iter()
                .enumerate()
                .map(|(i, key)| PageSection {
                    key: key.to_string(),
                    title: key.to_string(),
                    position: i as u32 + 1,
                    visible: true,
                })
                .collect(),
        )
    }

    fn keys(order: RwSignal<SectionOrder>) -> Vec<String> {
        order.with_untracked(|o| o.sections().iter().map(|s| s.key.clone()).collect())
    }

    #[test]
    fn test_handle_drag_moves_section() {
        let owner = Owner::new();
        owner.with(|| {
            let order = RwSignal::new(sections(&["hero", "brands", "offers", "blog"]));
            start_drag(order, 0);
            drag_over(order, 1);
            drag_over(order, 2);
            assert_eq!(order.with_untracked(SectionOrder::drag_state), DragState::Dragging { from: 0, over: 2 });
            drop_on(order, 2);
            assert_eq!(keys(order), ["brands", "offers", "hero", "blog"]);
            assert!(order.with_untracked(SectionOrder::has_unsaved_changes));
        });
    }

    #[test]
    fn test_rows_without_a_drag_ignore_drops() {
        let owner = Owner::new();
        owner.with(|| {
            let order = RwSignal::new(sections(&["hero", "brands"]));
            drag_over(order, 1);
            drop_on(order, 1);
            assert_eq!(keys(order), ["hero", "brands"]);
            assert_eq!(order.with_untracked(SectionOrder::drag_state), DragState::Idle);
        });
    }
}
