use serde::Serialize;

/// Rates in USD per million tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
    pub cache_creation: f64,
    pub cache_read: f64,
}

impl ModelPricing {
    pub const OPUS: ModelPricing = ModelPricing {
        input: 15.00,
        output: 75.00,
        cache_creation: 18.75,
        cache_read: 1.50,
    };

    pub const SONNET: ModelPricing = ModelPricing {
        input: 3.00,
        output: 15.00,
        cache_creation: 3.75,
        cache_read: 0.30,
    };

    pub const HAIKU: ModelPricing = ModelPricing {
        input: 0.80,
        output: 4.00,
        cache_creation: 1.00,
        cache_read: 0.08,
    };
}

/// Named pricing tiers
#[derive(Debug, Clone, Copy)]
pub struct PricingTable {
    tiers: &'static [(&'static str, ModelPricing)],
}

impl PricingTable {
    pub const fn new(tiers: &'static [(&'static str, ModelPricing)]) -> Self {
        Self { tiers }
    }

    pub fn get(&self, tier: &str) -> Option<&ModelPricing> {
        let tier = tier.to_lowercase();
        self.tiers
            .iter()
            .find(|(name, _)| *name == tier)
            .map(|(_, pricing)| pricing)
    }

    pub fn tier_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tiers.iter().map(|(name, _)| *name)
    }
}
