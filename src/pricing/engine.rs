use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, CatalogItem, PricingRegime};
use crate::domain::order::LineItem;

use super::errors::PricingError;

// ============================================================================
// Pricing Engine
// ============================================================================
//
// Prices as much of an order as it can. A line (or a single option token)
// that cannot be priced contributes zero and leaves a diagnostic; it never
// stops the rest of the order from being priced.
//
// ============================================================================

/// `Chrome plated @ R180` -> 180
static OPTION_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@ R(\d+)").expect("option price pattern"));

/// `500g @ R2` -> (500, 2)
static WEIGHT_TIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*g\s*@\s*R(\d+)").expect("weight tier pattern")
});

/// `2x3` -> option 2, quantity 3
static OPTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*x\s*(\d+)$").expect("option token pattern"));

/// Grand total plus everything that could not be priced, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingSummary {
    pub total: u64,
    pub diagnostics: Vec<PricingError>,
}

impl PricingSummary {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics_text(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| format!("while tallying the order, {}", d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Price a list of line items against the catalog.
pub fn price_line_items(line_items: &[LineItem], catalog: &Catalog) -> PricingSummary {
    let mut summary = PricingSummary::default();

    for line in line_items {
        let Some(item) = catalog.find_item(line.item_id) else {
            summary.diagnostics.push(PricingError::UnknownItem(line.item_id));
            continue;
        };

        let subtotal = match item.regime {
            PricingRegime::EnumeratedOption => price_enumerated(item, &line.amount, &mut summary.diagnostics),
            PricingRegime::WeightTiered => price_weighted(item, &line.amount).unwrap_or_else(|e| {
                summary.diagnostics.push(e);
                0
            }),
            PricingRegime::Unknown => {
                summary.diagnostics.push(PricingError::UnknownRegime(item.item_id));
                0
            }
        };

        match summary.total.checked_add(subtotal) {
            Some(total) => summary.total = total,
            None => summary.diagnostics.push(PricingError::Overflow(item.item_id)),
        }
    }

    if !summary.is_clean() {
        tracing::debug!(
            diagnostics = summary.diagnostics.len(),
            total = summary.total,
            "Order priced with diagnostics"
        );
    }

    summary
}

/// `(total, diagnostics)` form of [`price_line_items`]
pub fn compute_total(line_items: &[LineItem], catalog: &Catalog) -> (u64, String) {
    let summary = price_line_items(line_items, catalog);
    let diagnostics = summary.diagnostics_text();
    (summary.total, diagnostics)
}

/// Sum quantity x option price over every `<option>x<quantity>` token.
/// Bad tokens are skipped.
fn price_enumerated(item: &CatalogItem, amount: &str, diagnostics: &mut Vec<PricingError>) -> u64 {
    let mut subtotal: u64 = 0;

    for token in amount.split(',').map(str::trim) {
        match price_option_token(item, token) {
            Ok(value) => match subtotal.checked_add(value) {
                Some(sum) => subtotal = sum,
                None => diagnostics.push(PricingError::Overflow(item.item_id)),
            },
            Err(e) => diagnostics.push(e),
        }
    }

    subtotal
}

fn price_option_token(item: &CatalogItem, token: &str) -> Result<u64, PricingError> {
    let malformed = || PricingError::MalformedToken {
        item_id: item.item_id,
        token: token.to_string(),
    };

    let caps = OPTION_TOKEN.captures(token).ok_or_else(malformed)?;
    let option: usize = caps[1].parse().map_err(|_| malformed())?;
    let quantity: u64 = caps[2].parse().map_err(|_| malformed())?;

    if option == 0 || option > item.options.len() {
        return Err(PricingError::OptionOutOfRange {
            item_id: item.item_id,
            option,
            available: item.options.len(),
        });
    }

    let missing = || PricingError::MissingPrice {
        item_id: item.item_id,
        option,
    };
    let price: u64 = OPTION_PRICE
        .captures(&item.options[option - 1])
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(missing)?;

    quantity
        .checked_mul(price)
        .ok_or(PricingError::Overflow(item.item_id))
}

/// Weight x the cheapest unit price among tiers whose threshold the weight reaches.
fn price_weighted(item: &CatalogItem, amount: &str) -> Result<u64, PricingError> {
    let weight: u64 = amount.trim().parse().map_err(|_| PricingError::InvalidWeight {
        item_id: item.item_id,
        amount: amount.to_string(),
    })?;

    let unit_price = item
        .options
        .iter()
        .filter_map(|option| parse_tier(option))
        .filter(|(threshold, _)| *threshold <= weight)
        .map(|(_, price)| price)
        .min()
        .ok_or(PricingError::NoQualifyingTier {
            item_id: item.item_id,
            weight,
        })?;

    weight
        .checked_mul(unit_price)
        .ok_or(PricingError::Overflow(item.item_id))
}

fn parse_tier(option: &str) -> Option<(u64, u64)> {
    let caps = WEIGHT_TIER.captures(option)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

// ============================================================================
// Unit Tests
// ============================================================================
