//! Display formatting applied to parsed leads before persistence.
//!
//! - `budget`: append ` €` unless a currency marker is already present
//! - `living_area`: append ` m²` unless an area unit is already present
//! - `phone`: collapse whitespace runs, trim
//!
//! Every rule checks for its own output first, so normalizing twice is the
//! same as normalizing once.

use crate::models::ParsedLeadData;

/// Suffix for budgets that carry no currency. Portals covered by this crate
/// advertise in euros.
pub const DEFAULT_CURRENCY_SUFFIX: &str = " €";
pub const AREA_UNIT_SUFFIX: &str = " m²";

const CURRENCY_MARKERS: &[&str] = &["€", "$", "£", "¥", "EUR", "USD", "GBP", "CHF"];
const AREA_MARKERS: &[&str] = &["m²", "m2"];

/// Normalize display formats on a parsed lead.
pub fn normalize_lead_data(mut data: ParsedLeadData) -> ParsedLeadData {
    let fields = &mut data.fields;

    if let Some(budget) = fields.budget.as_mut() {
        let upper = budget.to_uppercase();
        if !CURRENCY_MARKERS.iter().any(|marker| upper.contains(marker)) {
            budget.push_str(DEFAULT_CURRENCY_SUFFIX);
        }
    }

    if let Some(area) = fields.living_area.as_mut() {
        let lower = area.to_lowercase();
        if !AREA_MARKERS.iter().any(|marker| lower.contains(marker)) {
            area.push_str(AREA_UNIT_SUFFIX);
        }
    }

    if let Some(phone) = fields.phone.as_mut() {
        *phone = phone.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    if fields.phone.as_deref() == Some("") {
        fields.phone = None;
    }

    data
}
