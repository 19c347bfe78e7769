//! Terminal rendering
//!
//! Plain-text tables for the CLI. Every function returns a `String`; the
//! binary decides where it goes.

use std::fmt::Write;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::Page;
use shared::models::{
    Dealer, Discount, DiscountCalculation, DiscountStatus, DiscountType, Product, Role,
};

use crate::alert::Alert;
use crate::views::ViewState;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const NAME_WIDTH: usize = 28;

/// Discount value with its unit
pub fn discount_value(discount: &Discount) -> String {
    let value = discount.discount_value.normalize();
    match discount.discount_type {
        DiscountType::Percentage => format!("{value}%"),
        DiscountType::FixedAmount => money(discount.discount_value).to_string(),
    }
}

fn money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

fn date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn status(discount: &Discount) -> &'static str {
    match discount.status {
        Some(DiscountStatus::Active) => "active",
        Some(DiscountStatus::Inactive) => "inactive",
        Some(DiscountStatus::Scheduled) => "scheduled",
        Some(DiscountStatus::Expired) => "expired",
        Some(DiscountStatus::Deleted) => "deleted",
        Some(DiscountStatus::Unknown) => "unknown",
        None if discount.is_active => "active",
        None => "inactive",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

fn names<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Which products/categories a discount covers
pub fn scope_label(discount: &Discount) -> String {
    if let Some(products) = discount.applicable_products.as_deref().filter(|p| !p.is_empty()) {
        return format!("products: {}", names(products.iter().map(|p| p.name.as_str())));
    }
    if let Some(categories) = discount
        .applicable_categories
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        return format!(
            "categories: {}",
            names(categories.iter().map(|c| c.name.as_str()))
        );
    }
    "general".to_string()
}

fn dealer_label(discount: &Discount) -> String {
    match discount.applicable_dealers.as_deref() {
        Some(dealers) if !dealers.is_empty() => names(dealers.iter().map(|d| d.name.as_str())),
        _ => "all dealers".to_string(),
    }
}

/// One row per discount
pub fn discount_table(rows: &[Discount]) -> String {
    if rows.is_empty() {
        return "No discounts found.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<w$}  {:>10}  {:<16}  {:<16}  {:<9}",
        "ID",
        "NAME",
        "VALUE",
        "START",
        "END",
        "STATUS",
        w = NAME_WIDTH
    );
    for d in rows {
        let _ = writeln!(
            out,
            "{:>6}  {:<w$}  {:>10}  {:<16}  {:<16}  {:<9}",
            d.id,
            truncate(&d.name, NAME_WIDTH),
            discount_value(d),
            date(d.start_date),
            date(d.end_date),
            status(d),
            w = NAME_WIDTH
        );
    }
    out
}

/// Paging footer, one-based for the operator
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {}/{} ({} total)",
        page.number.saturating_add(1),
        page.total_pages.max(1),
        page.total_elements
    )
}

pub fn discount_page(page: &Page<Discount>) -> String {
    let mut out = discount_table(&page.content);
    let _ = writeln!(out, "{}", page_footer(page));
    out
}

pub fn discount_detail(d: &Discount) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", d.id, d.name);
    if let Some(description) = d.description.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "  {description}");
    }
    let _ = writeln!(out, "Value:      {}", discount_value(d));
    let _ = writeln!(out, "Period:     {} .. {}", date(d.start_date), date(d.end_date));
    let _ = writeln!(out, "Status:     {}", status(d));
    let _ = writeln!(out, "Scope:      {}", scope_label(d));
    let _ = writeln!(out, "Dealers:    {}", dealer_label(d));
    if let Some(code) = &d.discount_code {
        let _ = writeln!(out, "Code:       {code}");
    }
    if let Some(min) = d.minimum_order_amount {
        let _ = writeln!(out, "Min order:  {}", money(min));
    }
    if let Some(max) = d.maximum_discount_amount {
        let _ = writeln!(out, "Max amount: {}", money(max));
    }
    if let Some(limit) = d.usage_limit {
        let _ = writeln!(out, "Usage:      {limit}");
    }
    if let Some(priority) = d.priority {
        let _ = writeln!(out, "Priority:   {priority}");
    }
    out
}

pub fn dealer_detail(dealer: &Dealer) -> String {
    let mut out = String::new();
    let state = if dealer.is_active { "active" } else { "inactive" };
    let _ = writeln!(out, "#{} {} ({state})", dealer.id, dealer.name);
    for (label, value) in [
        ("Email", &dealer.email),
        ("Phone", &dealer.phone),
        ("Address", &dealer.address),
        ("Tax no.", &dealer.tax_number),
    ] {
        if let Some(value) = value {
            let _ = writeln!(out, "{label:<9}{value}");
        }
    }
    if dealer.users.is_empty() {
        let _ = writeln!(out, "No users.");
        return out;
    }
    let _ = writeln!(out, "Users:");
    for user in &dealer.users {
        let _ = writeln!(
            out,
            "{:>6}  {:<20}  {}",
            user.id,
            user.username,
            user.email.as_deref().unwrap_or("-")
        );
    }
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", product.id, product.name);
    if let Some(code) = &product.code {
        let _ = writeln!(out, "Code:     {code}");
    }
    if let Some(price) = product.price {
        let _ = writeln!(out, "Price:    {}", money(price));
    }
    if let Some(category) = &product.category_name {
        let _ = writeln!(out, "Category: {category}");
    }
    for variant in &product.variants {
        let _ = writeln!(
            out,
            "  - {} {}",
            variant.name,
            variant.sku.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn role_page(page: &Page<Role>) -> String {
    let mut out = String::new();
    if page.content.is_empty() {
        let _ = writeln!(out, "No roles found.");
    }
    for role in &page.content {
        let _ = writeln!(
            out,
            "{:>6}  {:<20}  {}",
            role.id,
            role.name,
            role.permissions.join(",")
        );
    }
    let _ = writeln!(out, "{}", page_footer(page));
    out
}

pub fn calculation(result: &DiscountCalculation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Original: {}", money(result.original_amount));
    let _ = writeln!(out, "Discount: {}", money(result.discount_amount));
    let _ = writeln!(out, "Final:    {}", money(result.final_amount));
    for applied in &result.applied_discounts {
        let _ = writeln!(
            out,
            "  #{} {} -{}",
            applied.discount_id,
            applied.discount_name,
            money(applied.discount_amount)
        );
    }
    out
}

pub fn alert_line(alert: &Alert) -> String {
    match alert.code {
        Some(code) => format!("[{}] {} (E{code:04})", alert.level, alert.message),
        None => format!("[{}] {}", alert.level, alert.message),
    }
}

/// Render a view state with `loaded` for its payload
pub fn view_state<T>(state: &ViewState<T>, loaded: impl FnOnce(&T) -> String) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => "Loading...\n".to_string(),
        ViewState::Loaded(value) => loaded(value),
        ViewState::Failed(err) => format!("{}\n", err.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::error::AppError;
    use shared::to_page;

    fn discount(value: serde_json::Value) -> Discount {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Discount {
        discount(json!({
            "id": 42,
            "name": "Spring bolts",
            "discountType": "PERCENTAGE",
            "discountValue": 12.50,
            "startDate": "2026-03-01T00:00:00",
            "endDate": "2026-03-31T23:59:00",
            "isActive": true,
            "status": "SCHEDULED",
            "applicableProducts": [{ "id": 5, "name": "Bolt" }, { "id": 6, "name": "Nut" }],
            "applicableDealers": [{ "id": 9, "name": "North" }]
        }))
    }

    #[test]
    fn test_discount_value_units() {
        assert_eq!(discount_value(&sample()), "12.5%");
        let fixed = discount(json!({
            "id": 1, "name": "x", "discountType": "FIXED_AMOUNT", "discountValue": 7.125
        }));
        assert_eq!(discount_value(&fixed), "7.12");
    }

    #[test]
    fn test_scope_and_dealer_labels() {
        let d = sample();
        assert_eq!(scope_label(&d), "products: Bolt, Nut");
        assert_eq!(dealer_label(&d), "North");
        let general = discount(json!({
            "id": 2, "name": "All", "discountType": "PERCENTAGE", "discountValue": 5,
            "applicableProducts": []
        }));
        assert_eq!(scope_label(&general), "general");
        assert_eq!(dealer_label(&general), "all dealers");
    }

    #[test]
    fn test_discount_table_rows() {
        let table = discount_table(&[sample()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("NAME"));
        assert!(lines[1].contains("Spring bolts"));
        assert!(lines[1].contains("2026-03-01 00:00"));
        assert!(lines[1].contains("scheduled"));
        assert_eq!(discount_table(&[]), "No discounts found.\n");
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = "x".repeat(40);
        let cut = truncate(&long, NAME_WIDTH);
        assert_eq!(cut.chars().count(), NAME_WIDTH);
        assert!(cut.ends_with('~'));
    }

    #[test]
    fn test_page_footer_is_one_based() {
        let rows: Vec<u32> = (1..=25).collect();
        assert_eq!(page_footer(&to_page(&rows, 1, 10)), "Page 2/3 (25 total)");
    }

    #[test]
    fn test_view_state_rendering() {
        let failed: ViewState<Discount> = ViewState::Failed(AppError::not_found("Discount"));
        assert_eq!(view_state(&failed, discount_detail), "Discount not found\n");
        let idle: ViewState<Discount> = ViewState::Idle;
        assert!(view_state(&idle, discount_detail).is_empty());
        let loaded = ViewState::Loaded(sample());
        assert!(view_state(&loaded, discount_detail).starts_with("#42 Spring bolts"));
    }

    #[test]
    fn test_alert_line_with_code() {
        let alert = Alert {
            level: crate::alert::AlertLevel::Error,
            message: "Discount not found".into(),
            code: Some(3001),
        };
        assert_eq!(alert_line(&alert), "[error] Discount not found (E3001)");
    }
}
