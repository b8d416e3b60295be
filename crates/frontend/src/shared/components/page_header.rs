use leptos::prelude::*;
use thaw::*;

/// Title row of a screen, with an optional record count and action buttons.
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Shown as a badge next to the title when set
    #[prop(optional, into)]
    count: MaybeProp<usize>,

    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
                {move || count.get().map(|n| view! { <Badge>{n.to_string()}</Badge> })}
                {move || subtitle.get().map(|s| view! {
                    <div class="page__subtitle">{s}</div>
                })}
            </div>
            <div class="page__header-right">
                {children()}
            </div>
        </div>
    }
}
