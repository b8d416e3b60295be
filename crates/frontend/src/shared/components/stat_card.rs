use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Good,
    Warning,
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Formatted value; `None` while loading
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(optional, into)]
    tone: Signal<Option<StatTone>>,
    /// Optional subtitle below the value
    #[prop(optional, into)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match tone.get().unwrap_or(StatTone::Neutral) {
        StatTone::Good => "stat-card stat-card--success",
        StatTone::Warning => "stat-card stat-card--warning",
        StatTone::Neutral => "stat-card",
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
