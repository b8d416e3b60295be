//! Column sets of the catalog, marketing and sales lists.

use contracts::domain::resource::ResourceKind;
use serde_json::Value;
use std::sync::Arc;

use crate::shared::components::table::{format_money, format_number_int};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::grid::{value_to_text, ColumnDef, RawColumn, SimpleColumn};

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn money_cell(value: &Value, _row: &Value) -> String {
    as_number(value).map(format_money).unwrap_or_default()
}

pub fn count_cell(value: &Value, _row: &Value) -> String {
    as_number(value).map(format_number_int).unwrap_or_default()
}

pub fn date_cell(value: &Value, _row: &Value) -> String {
    value.as_str().map(format_date).unwrap_or_default()
}

pub fn datetime_cell(value: &Value, _row: &Value) -> String {
    value.as_str().map(format_datetime).unwrap_or_default()
}

/// `true`/`"active"` style flags and free-form status strings.
pub fn status_cell(value: &Value, _row: &Value) -> String {
    match value {
        Value::Bool(true) => "Active".to_string(),
        Value::Bool(false) => "Inactive".to_string(),
        Value::String(s) => {
            let s = s.trim();
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        }
        other => value_to_text(other),
    }
}

fn name(label: &str) -> ColumnDef {
    SimpleColumn::new("name", label).into()
}

fn created() -> ColumnDef {
    SimpleColumn::new("createdAt", "Created").render(date_cell).into()
}

fn status(key: &str) -> ColumnDef {
    SimpleColumn::new(key, "Status").render(status_cell).into()
}

fn image() -> ColumnDef {
    RawColumn::display("image", "Image")
        .with_cell(|_, row| {
            ["image", "imageUrl", "url"]
                .iter()
                .filter_map(|k| row.get(*k).and_then(Value::as_str))
                .next()
                .map(|url| url.rsplit('/').next().unwrap_or(url).to_string())
                .unwrap_or_default()
        })
        .into()
}

fn order_items(row: &Value) -> Value {
    let count = ["items", "products", "orderItems"]
        .iter()
        .filter_map(|k| row.get(*k).and_then(Value::as_array))
        .map(Vec::len)
        .next()
        .unwrap_or(0);
    Value::from(count)
}

fn customer_name(row: &Value) -> Value {
    ["user.name", "customerName", "shippingAddress.name"]
        .iter()
        .filter_map(|path| {
            path.split('.')
                .try_fold(row, |current, part| current.get(part))
                .and_then(Value::as_str)
        })
        .find(|s| !s.trim().is_empty())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Columns shown for `kind`.
pub fn columns_for(kind: ResourceKind) -> Arc<[ColumnDef]> {
    let columns: Vec<ColumnDef> = match kind {
        ResourceKind::Categories => vec![
            name("Category"),
            SimpleColumn::new("slug", "Slug").into(),
            status("isActive"),
            created(),
        ],
        ResourceKind::Subcategories => vec![
            name("Subcategory"),
            SimpleColumn::new("category.name", "Category").into(),
            status("isActive"),
            created(),
        ],
        ResourceKind::Brands | ResourceKind::Breeds | ResourceKind::Collections => vec![
            name("Name"),
            image(),
            status("isActive"),
            created(),
        ],
        ResourceKind::Products => vec![
            name("Product"),
            SimpleColumn::new("brand.name", "Brand").into(),
            SimpleColumn::new("price", "Price").render(money_cell).into(),
            SimpleColumn::new("stock", "Stock").render(count_cell).into(),
            status("status"),
            created(),
        ],
        ResourceKind::Banners | ResourceKind::Sliders => vec![
            SimpleColumn::new("title", "Title").into(),
            image(),
            SimpleColumn::new("position", "Position").render(count_cell).into(),
            status("isActive"),
        ],
        ResourceKind::Coupons => vec![
            SimpleColumn::new("code", "Code").into(),
            SimpleColumn::new("discountType", "Type").render(status_cell).into(),
            SimpleColumn::new("discountValue", "Value").render(count_cell).into(),
            SimpleColumn::new("minOrderAmount", "Min order").render(money_cell).into(),
            SimpleColumn::new("expiryDate", "Expires").render(date_cell).into(),
            status("isActive"),
        ],
        ResourceKind::Campaigns => vec![
            name("Campaign"),
            SimpleColumn::new("startDate", "Starts").render(date_cell).into(),
            SimpleColumn::new("endDate", "Ends").render(date_cell).into(),
            status("status"),
        ],
        ResourceKind::Newsletter => vec![
            SimpleColumn::new("email", "Email").into(),
            status("isSubscribed"),
            SimpleColumn::new("createdAt", "Subscribed").render(date_cell).into(),
        ],
        ResourceKind::Orders => vec![
            SimpleColumn::new("orderNumber", "Order").into(),
            RawColumn::accessor_fn("customer", "Customer", customer_name).into(),
            RawColumn::accessor_fn("itemCount", "Items", order_items)
                .with_cell(count_cell)
                .into(),
            SimpleColumn::new("totalAmount", "Total").render(money_cell).into(),
            SimpleColumn::new("paymentStatus", "Payment").render(status_cell).into(),
            status("orderStatus"),
            SimpleColumn::new("createdAt", "Placed").render(datetime_cell).into(),
        ],
        ResourceKind::Users => vec![
            name("Customer"),
            SimpleColumn::new("email", "Email").into(),
            SimpleColumn::new("phone", "Phone").sortable(false).into(),
            SimpleColumn::new("platform", "Device").render(status_cell).into(),
            SimpleColumn::new("createdAt", "Joined").render(date_cell).into(),
        ],
    };
    columns.into()
}
