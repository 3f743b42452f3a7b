//! Expiry arithmetic for the meal-prep ledger.

use time::{Duration, OffsetDateTime};

use crate::models::InventoryItem;

use super::dto::InventoryItemView;

/// Whole days until expiry, rounded up, negative once a full day past.
/// An item that expired earlier today still reports 0, so the expired
/// queries below compare timestamps rather than this value.
pub fn days_left(expires_at: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let secs = (expires_at - now).whole_seconds();
    (secs + 86_399).div_euclid(86_400)
}

pub fn decorate(item: InventoryItem, now: OffsetDateTime) -> InventoryItemView {
    let days_left = days_left(item.expires_at, now);
    InventoryItemView {
        days_left,
        is_expired: days_left < 0,
        is_expiring_soon: (0..=3).contains(&days_left),
        item,
    }
}

/// Items still edible but expiring within `days`, skipping empty rows.
pub fn expiring_soon(
    items: Vec<InventoryItem>,
    days: i64,
    now: OffsetDateTime,
) -> Vec<InventoryItem> {
    let horizon = now + Duration::days(days);
    items
        .into_iter()
        .filter(|i| i.quantity > 0 && i.expires_at > now && i.expires_at <= horizon)
        .collect()
}

/// Items past their expiry timestamp, skipping empty rows.
pub fn expired(items: Vec<InventoryItem>, now: OffsetDateTime) -> Vec<InventoryItem> {
    items
        .into_iter()
        .filter(|i| i.quantity > 0 && i.expires_at <= now)
        .collect()
}
