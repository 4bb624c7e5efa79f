use crate::types::{ModelPricing, PricingTable, Usage};

const TIERS: &[(&str, ModelPricing)] = &[
    ("opus", ModelPricing::OPUS),
    ("sonnet", ModelPricing::SONNET),
    ("haiku", ModelPricing::HAIKU),
];

/// Pricing tiers available to the cost estimator
pub static PRICING_TABLE: PricingTable = PricingTable::new(TIERS);

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Estimated cost in USD of one usage tuple. Not rounded.
pub fn calculate_cost(usage: &Usage, pricing: &ModelPricing) -> f64 {
    usage.input_tokens as f64 / TOKENS_PER_MILLION * pricing.input
        + usage.output_tokens as f64 / TOKENS_PER_MILLION * pricing.output
        + usage.cache_creation_tokens as f64 / TOKENS_PER_MILLION * pricing.cache_creation
        + usage.cache_read_tokens as f64 / TOKENS_PER_MILLION * pricing.cache_read
}
