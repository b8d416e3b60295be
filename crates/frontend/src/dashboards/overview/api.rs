use contracts::dashboards::stats::DashboardStats;

use crate::shared::components::stat_card::StatTone;
use crate::shared::components::table::{format_money, format_number_int};

pub const STATS_PATH: &str = "api/dashboard/stats";
/// The stats object sits under `data` in the response body.
pub const STATS_POINTER: &str = "/data";

/// Pending orders above this share of all orders are highlighted.
const PENDING_WARNING_RATIO: f64 = 0.2;

pub fn pending_tone(stats: &DashboardStats) -> StatTone {
    if stats.pending_orders == 0 {
        return StatTone::Good;
    }
    let total = stats.total_orders.max(1) as f64;
    if stats.pending_orders as f64 / total > PENDING_WARNING_RATIO {
        StatTone::Warning
    } else {
        StatTone::Neutral
    }
}

pub fn average_order_label(stats: &DashboardStats) -> String {
    match stats.average_order_value() {
        Some(v) => format!("Avg. order {}", format_money(v)),
        None => "No orders yet".to_string(),
    }
}

pub fn count(value: u64) -> String {
    format_number_int(value as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_tone() {
        let mut stats = DashboardStats {
            total_orders: 100,
            pending_orders: 0,
            ..Default::default()
        };
        assert_eq!(pending_tone(&stats), StatTone::Good);
        stats.pending_orders = 10;
        assert_eq!(pending_tone(&stats), StatTone::Neutral);
        stats.pending_orders = 30;
        assert_eq!(pending_tone(&stats), StatTone::Warning);
    }

    #[test]
    fn test_labels() {
        let stats = DashboardStats {
            total_sales: 250000.0,
            total_orders: 100,
            ..Default::default()
        };
        assert_eq!(average_order_label(&stats), "Avg. order ₹2,500.00");
        assert_eq!(average_order_label(&DashboardStats::default()), "No orders yet");
        assert_eq!(count(1234567), "12,34,567");
    }
}
