//! Discount reconciliation
//!
//! Dealer and product views show the active discounts for a target and,
//! optionally, the upcoming ones that apply to it. The upcoming endpoint
//! returns every upcoming discount, so it is narrowed to the target here
//! before the two lists are merged.

use std::collections::HashMap;

use shared::Identified;
use shared::models::Discount;
use shared::types::EntityId;

/// Collapse repeated ids
///
/// One entry per distinct id, in first-seen order, holding the value of
/// the last occurrence.
pub fn dedupe_by_id<T: Identified>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut slots: HashMap<EntityId, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::new();

    for item in items {
        match slots.get(&item.id()) {
            Some(&index) => out[index] = item,
            None => {
                slots.insert(item.id(), out.len());
                out.push(item);
            }
        }
    }
    out
}

/// Upcoming discounts whose dealer relation names `dealer_id`
///
/// Discounts without a dealer relation are general and are not included.
pub fn upcoming_for_dealer(upcoming: &[Discount], dealer_id: EntityId) -> Vec<Discount> {
    upcoming
        .iter()
        .filter(|d| d.applies_to_dealer(dealer_id))
        .cloned()
        .collect()
}

/// Upcoming discounts for `product_id`, optionally narrowed to a dealer
pub fn upcoming_for_product(
    upcoming: &[Discount],
    product_id: EntityId,
    dealer_id: Option<EntityId>,
) -> Vec<Discount> {
    upcoming
        .iter()
        .filter(|d| d.applies_to_product(product_id))
        .filter(|d| dealer_id.is_none_or(|dealer| d.applies_to_dealer(dealer)))
        .cloned()
        .collect()
}

/// Active rows followed by the matching upcoming rows, deduplicated
pub fn merge_discounts(active: Vec<Discount>, upcoming: Vec<Discount>) -> Vec<Discount> {
    dedupe_by_id(active.into_iter().chain(upcoming))
}
