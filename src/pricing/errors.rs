// ============================================================================
// Pricing Diagnostics - one per line item (or token) that could not be priced
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("item number {0} not found in price list")]
    UnknownItem(u32),

    #[error("item {item_id}: could not read '{token}', expected <option>x<quantity>")]
    MalformedToken { item_id: u32, token: String },

    #[error("item {item_id}: option {option} does not exist (1-{available})")]
    OptionOutOfRange { item_id: u32, option: usize, available: usize },

    #[error("item {item_id}: no price found in option {option}")]
    MissingPrice { item_id: u32, option: usize },

    #[error("item {item_id}: could not read weight '{amount}'")]
    InvalidWeight { item_id: u32, amount: String },

    #[error("item {item_id}: no price tier applies to weight {weight}")]
    NoQualifyingTier { item_id: u32, weight: u64 },

    #[error("item {0}: unknown pricing type")]
    UnknownRegime(u32),

    #[error("item {0}: amount too large to price")]
    Overflow(u32),
}
