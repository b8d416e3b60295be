//! Generic table over JSON rows.
//!
//! Selection and sorting work in both modes: pass the value together with its
//! change callback to control them from the parent, or leave both out and the
//! grid keeps its own state. Pagination is always owned by the parent; the
//! grid only renders the controls and reports clicks.

use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use thaw::*;

use super::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::grid::sorting::sort_rows;
use crate::shared::grid::{
    default_row_id, CheckboxState, ColumnCache, ColumnDef, PaginationState, RawColumn, RowIdFn,
    RowSelection, SortDirection, SortingState, StateBinding,
};

type KeyedRows = Vec<(String, Value)>;

fn bind<S>(initial: S, on_change: Option<Callback<S>>) -> StateBinding<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    match on_change {
        Some(cb) => StateBinding::controlled(initial, move |s: &S| cb.run(s.clone())),
        None => StateBinding::uncontrolled(initial),
    }
}

/// Copies every new parent value into the grid's own state.
fn follow<S>(external: Option<Signal<S>>, binding: RwSignal<StateBinding<S>>)
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    if let Some(external) = external {
        Effect::new(move |_| {
            let value = external.get();
            let differs = binding.with_untracked(|b| b.get() != &value);
            if differs {
                binding.update(|b| {
                    b.sync_from(value);
                });
            }
        });
    }
}

/// Applies a local change outside the signal borrow so parent callbacks are
/// free to read the grid.
fn change<S>(binding: RwSignal<StateBinding<S>>, f: impl FnOnce(&mut S))
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    let mut next = binding.get_untracked();
    if next.apply(f) {
        binding.set(next);
    }
}

/// Reactive state behind [`DataGrid`]: normalised columns, keyed rows,
/// selection and sorting.
#[derive(Clone, Copy)]
pub struct GridController {
    selection: RwSignal<StateBinding<RowSelection>>,
    sorting: RwSignal<StateBinding<SortingState>>,
    columns: Memo<Arc<[RawColumn]>>,
    rows: Memo<KeyedRows>,
    display_rows: Memo<KeyedRows>,
}

impl GridController {
    /// A sorting callback hands sorting to the parent and keeps rows in the
    /// order given; without one the loaded rows are sorted locally.
    pub fn new(
        rows: Signal<Vec<Value>>,
        columns: Signal<Arc<[ColumnDef]>>,
        row_id: RowIdFn,
        selected_rows: Option<Signal<RowSelection>>,
        on_selection_change: Option<Callback<RowSelection>>,
        sorting: Option<Signal<SortingState>>,
        on_sorting_change: Option<Callback<SortingState>>,
    ) -> Self {
        let sorts_locally = on_sorting_change.is_none();

        let selection = RwSignal::new(bind(
            selected_rows.map(|s| s.get_untracked()).unwrap_or_default(),
            on_selection_change,
        ));
        let sort_state = RwSignal::new(bind(
            sorting.map(|s| s.get_untracked()).unwrap_or_default(),
            on_sorting_change,
        ));
        follow(selected_rows, selection);
        follow(sorting, sort_state);

        let cache = StoredValue::new(ColumnCache::new());
        let normalized = Memo::new(move |_| {
            let defs = columns.get();
            cache
                .try_update_value(|c| c.normalize(&defs))
                .unwrap_or_else(|| Arc::from(Vec::<RawColumn>::new()))
        });

        let keyed = Memo::new(move |_| {
            rows.with(|rs| {
                rs.iter()
                    .enumerate()
                    .map(|(i, row)| (row_id(row, i), row.clone()))
                    .collect::<KeyedRows>()
            })
        });

        // refreshed rows replace the stored copies of selected rows
        Effect::new(move |_| {
            let visible = keyed.get();
            change(selection, |s| {
                s.reconcile(&visible);
            });
        });

        let display_rows = Memo::new(move |_| {
            let mut visible = keyed.get();
            if sorts_locally {
                sort_state.with(|b| normalized.with(|cols| sort_rows(&mut visible, b.get(), cols)));
            }
            visible
        });

        Self {
            selection,
            sorting: sort_state,
            columns: normalized,
            rows: keyed,
            display_rows,
        }
    }

    pub fn columns(&self) -> Memo<Arc<[RawColumn]>> {
        self.columns
    }

    /// Rows of the current page, in the order they were loaded.
    pub fn rows(&self) -> Memo<KeyedRows> {
        self.rows
    }

    pub fn display_rows(&self) -> Memo<KeyedRows> {
        self.display_rows
    }

    pub fn selection(&self) -> RowSelection {
        self.selection.with(|b| b.get().clone())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.with(|b| b.get().is_selected(id))
    }

    pub fn header_state(&self) -> CheckboxState {
        self.rows.with(|visible| {
            self.selection
                .with(|b| b.get().header_state(visible.iter().map(|(id, _)| id.as_str())))
        })
    }

    pub fn direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting.with(|b| b.get().direction(column_id))
    }

    pub fn toggle_all(&self, checked: bool) {
        let visible = self.rows.get_untracked();
        change(self.selection, |s| s.toggle_all(checked, &visible));
    }

    pub fn set_row(&self, id: &str, row: &Value, checked: bool) {
        change(self.selection, |s| s.set_row(id, row, checked));
    }

    pub fn toggle_sort(&self, column_id: &str, sortable: bool) {
        change(self.sorting, |s| {
            s.toggle(column_id, sortable);
        });
    }
}

#[component]
pub fn DataGrid(
    #[prop(into)]
    rows: Signal<Vec<Value>>,

    #[prop(into)]
    columns: Signal<Arc<[ColumnDef]>>,

    /// Row id extractor; defaults to `_id`, then `id`, then the row index
    #[prop(optional)]
    get_row_id: Option<RowIdFn>,

    #[prop(optional)]
    selectable: bool,

    #[prop(optional, into)]
    selected_rows: Option<Signal<RowSelection>>,

    #[prop(optional)]
    on_selection_change: Option<Callback<RowSelection>>,

    #[prop(optional, into)]
    sorting: Option<Signal<SortingState>>,

    /// When set, sorting is reported upwards and rows are shown as given
    #[prop(optional_no_strip)]
    on_sorting_change: Option<Callback<SortingState>>,

    #[prop(optional, into)]
    pagination: Option<Signal<PaginationState>>,

    #[prop(optional, into)]
    total_rows: Option<Signal<usize>>,

    #[prop(optional)]
    on_page_change: Option<Callback<usize>>,

    #[prop(optional)]
    on_per_page_change: Option<Callback<usize>>,

    #[prop(optional)]
    per_page_options: Option<Vec<usize>>,

    #[prop(optional, into)]
    loading: Signal<bool>,

    #[prop(optional, into)]
    empty_message: Option<String>,
) -> impl IntoView {
    let grid = GridController::new(
        rows,
        columns,
        get_row_id.unwrap_or_else(|| Arc::new(default_row_id)),
        selected_rows,
        on_selection_change,
        sorting,
        on_sorting_change,
    );
    let empty_message =
        StoredValue::new(empty_message.unwrap_or_else(|| "No records found".to_string()));

    let header_state = Signal::derive(move || grid.header_state());
    let toggle_all = Callback::new(move |checked: bool| grid.toggle_all(checked));

    let normalized = grid.columns();
    let keyed = grid.rows();
    let column_count = move || normalized.with(|c| c.len()) + usize::from(selectable);

    view! {
        <div class="data-grid">
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {selectable.then(|| view! {
                                <TableHeaderCheckbox state=header_state on_change=toggle_all />
                            })}
                            {move || normalized.get().iter().map(|col| {
                                let id = col.resolved_id().unwrap_or_default().to_string();
                                let sortable = col.can_sort();
                                let direction_id = id.clone();
                                let direction = Signal::derive(move || grid.direction(&direction_id));
                                let on_sort = Callback::new(move |_| grid.toggle_sort(&id, sortable));
                                view! {
                                    <SortableHeaderCell
                                        label=col.header.clone()
                                        direction=direction
                                        sortable=sortable
                                        on_sort=on_sort
                                    />
                                }
                            }).collect_view()}
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <Show when=move || loading.get() && keyed.with(|r| r.is_empty())>
                            <TableRow>
                                <TableCell attr:colspan=column_count>
                                    <TableCellLayout>"Loading..."</TableCellLayout>
                                </TableCell>
                            </TableRow>
                        </Show>
                        <Show when=move || !loading.get() && keyed.with(|r| r.is_empty())>
                            <TableRow>
                                <TableCell attr:colspan=column_count>
                                    <TableCellLayout>{empty_message.get_value()}</TableCellLayout>
                                </TableCell>
                            </TableRow>
                        </Show>
                        <For
                            each=move || grid.display_rows().get()
                            key=|(id, row)| (id.clone(), row.to_string())
                            children=move |(id, row)| {
                                let checked_id = id.clone();
                                let checked = Signal::derive(move || grid.is_selected(&checked_id));
                                let row_for_change = row.clone();
                                let on_check = Callback::new(move |value: bool| {
                                    grid.set_row(&id, &row_for_change, value)
                                });
                                view! {
                                    <TableRow>
                                        {selectable.then(|| view! {
                                            <TableCellCheckbox checked=checked on_change=on_check />
                                        })}
                                        {move || normalized.get().iter().map(|col| {
                                            let text = col.render(&row);
                                            view! {
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{text}</TableCellLayout>
                                                </TableCell>
                                            }
                                        }).collect_view()}
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>

            {pagination.map(|state| view! {
                <PaginationControls
                    state=state
                    total_rows=total_rows
                    on_page_change=on_page_change
                    on_per_page_change=on_per_page_change
                    per_page_options=per_page_options.unwrap_or_else(|| vec![10, 25, 50, 100])
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::SimpleColumn;
    use any_spawner::Executor;
    use serde_json::json;

    fn with_runtime(test: impl FnOnce()) {
        let _ = Executor::init_futures_executor();
        let owner = Owner::new();
        owner.with(test);
    }

    fn run_effects() {
        Executor::poll_local();
    }

    fn pet(id: &str, name: &str, price: u32) -> Value {
        json!({ "_id": id, "name": name, "price": price })
    }

    fn columns() -> Signal<Arc<[ColumnDef]>> {
        let defs: Vec<ColumnDef> = vec![
            SimpleColumn::new("name", "Name").into(),
            SimpleColumn::new("price", "Price").into(),
        ];
        Signal::stored(defs.into())
    }

    fn ids(rows: Memo<KeyedRows>) -> Vec<String> {
        rows.get_untracked().into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_local_sorting_and_header_state() {
        with_runtime(|| {
            let rows = RwSignal::new(vec![pet("a", "Rex", 30), pet("b", "Bella", 10)]);
            let grid = GridController::new(
                rows.into(),
                columns(),
                Arc::new(default_row_id),
                None,
                None,
                None,
                None,
            );
            run_effects();

            assert_eq!(ids(grid.display_rows()), ["a", "b"]);
            grid.toggle_sort("price", true);
            assert_eq!(grid.direction("price"), Some(SortDirection::Asc));
            assert_eq!(ids(grid.display_rows()), ["b", "a"]);
            assert_eq!(ids(grid.rows()), ["a", "b"]);

            grid.set_row("a", &pet("a", "Rex", 30), true);
            assert_eq!(grid.header_state(), CheckboxState::Indeterminate);
            grid.toggle_all(true);
            assert_eq!(grid.header_state(), CheckboxState::Checked);
        });
    }

    #[test]
    fn test_parent_sorting_keeps_row_order() {
        with_runtime(|| {
            let parent = RwSignal::new(SortingState::new());
            let rows = RwSignal::new(vec![pet("a", "Rex", 30), pet("b", "Bella", 10)]);
            let grid = GridController::new(
                rows.into(),
                columns(),
                Arc::new(default_row_id),
                None,
                None,
                Some(parent.into()),
                Some(Callback::new(move |next: SortingState| parent.set(next))),
            );
            run_effects();

            grid.toggle_sort("price", true);
            run_effects();
            assert_eq!(parent.get_untracked().direction("price"), Some(SortDirection::Asc));
            assert_eq!(ids(grid.display_rows()), ["a", "b"]);
        });
    }

    fn select_then_refresh(grid: GridController, rows: RwSignal<Vec<Value>>) -> RowSelection {
        run_effects();
        grid.toggle_all(true);
        run_effects();
        // "a" comes back with new fields, "b" moved to another page
        rows.set(vec![pet("a", "Rex II", 35), pet("c", "Milo", 20)]);
        run_effects();
        grid.selection()
    }

    #[test]
    fn test_controlled_and_local_selection_agree() {
        with_runtime(|| {
            let local_rows = RwSignal::new(vec![pet("a", "Rex", 30), pet("b", "Bella", 10)]);
            let local = GridController::new(
                local_rows.into(),
                columns(),
                Arc::new(default_row_id),
                None,
                None,
                None,
                None,
            );

            let parent = RwSignal::new(RowSelection::new());
            let parent_rows = RwSignal::new(vec![pet("a", "Rex", 30), pet("b", "Bella", 10)]);
            let controlled = GridController::new(
                parent_rows.into(),
                columns(),
                Arc::new(default_row_id),
                Some(parent.into()),
                Some(Callback::new(move |next: RowSelection| parent.set(next))),
                None,
                None,
            );

            let local_result = select_then_refresh(local, local_rows);
            let controlled_result = select_then_refresh(controlled, parent_rows);

            assert_eq!(local_result, controlled_result);
            assert_eq!(parent.get_untracked(), controlled_result);
            assert_eq!(controlled_result.ids().into_iter().collect::<Vec<_>>(), ["a", "b"]);
            let stored: Vec<_> = controlled_result.rows().map(|(_, row)| row["name"].clone()).collect();
            assert_eq!(stored, [json!("Rex II"), json!("Bella")]);
            assert_eq!(controlled.header_state(), CheckboxState::Indeterminate);

            // the parent clears the selection from outside
            parent.set(RowSelection::new());
            run_effects();
            assert!(controlled.selection().is_empty());
            assert_eq!(controlled.header_state(), CheckboxState::Unchecked);
        });
    }
}
