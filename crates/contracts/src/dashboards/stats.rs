use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregates shown on the dashboard landing page (`GET api/dashboard/stats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DashboardStats {
    pub fn average_order_value(&self) -> Option<f64> {
        if self.total_orders == 0 {
            None
        } else {
            Some(self.total_sales / self.total_orders as f64)
        }
    }
}
