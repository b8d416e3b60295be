use contracts::dashboards::stats::DashboardStats;
use leptos::prelude::*;
use thaw::*;

use super::api::{average_order_label, count, pending_tone, STATS_PATH, STATS_POINTER};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table::format_money;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::resource::use_api_value;
use crate::shared::toast::use_toasts;

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let toasts = use_toasts();
    let stats = use_api_value::<DashboardStats>(Signal::stored(STATS_PATH.to_string()), STATS_POINTER);

    Effect::new(move |_| {
        if let Some(message) = stats.error.get() {
            toasts.error(format!("Could not load dashboard: {}", message));
        }
    });

    let value = move |f: fn(&DashboardStats) -> String| {
        Signal::derive(move || stats.data.with(|s| s.as_ref().map(f)))
    };

    let generated = move || {
        stats.data.with(|s| {
            s.as_ref()
                .and_then(|s| s.generated_at)
                .map(|at| format!("Updated {}", format_datetime(&at.to_rfc3339())))
        })
    };

    view! {
        <div class="page">
            <PageHeader title="Dashboard" subtitle=Signal::derive(generated)>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=stats.loading
                    on_click=move |_| stats.refetch()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Total sales"
                    icon_name="orders"
                    value=value(|s| format_money(s.total_sales))
                    subtitle=value(average_order_label)
                />
                <StatCard
                    label="Orders"
                    icon_name="orders"
                    value=value(|s| count(s.total_orders))
                />
                <StatCard
                    label="Pending orders"
                    icon_name="bell"
                    value=value(|s| count(s.pending_orders))
                    tone=Signal::derive(move || stats.data.with(|s| s.as_ref().map(pending_tone)))
                />
                <StatCard
                    label="Customers"
                    icon_name="customers"
                    value=value(|s| count(s.total_customers))
                />
                <StatCard
                    label="Products"
                    icon_name="catalog"
                    value=value(|s| count(s.total_products))
                />
            </div>
        </div>
    }
}
