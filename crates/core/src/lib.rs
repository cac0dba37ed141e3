use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Daily token allowance the quota percentage is measured against.
pub const DAILY_TOKEN_QUOTA: u64 = 10_000_000;

/// Approximate number of requests each model accepts per day.
pub const REQUEST_QUOTA_PER_MODEL: u64 = 500;

/// Flash-tier list prices in USD per million tokens.
pub const DEFAULT_PRICING: PricingTable = PricingTable {
    input_per_1m: 0.10,
    cached_input_per_1m: 0.025,
    output_per_1m: 0.40,
};

/// Model name used when a log entry does not carry one.
pub const UNKNOWN_MODEL: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cached_tokens: u64,
    pub thought_tokens: u64,
    pub total_tokens: u64,
}

impl UsageTotals {
    /// Adds `other` field by field, saturating at `u64::MAX`.
    pub fn accumulate(&mut self, other: &UsageTotals) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.cached_tokens = self.cached_tokens.saturating_add(other.cached_tokens);
        self.thought_tokens = self.thought_tokens.saturating_add(other.thought_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }
}

/// One assistant turn with token accounting. `(session_id, message_id)` is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub session_id: String,
    pub message_id: String,
    pub timestamp: String,
    pub model: String,
    pub usage: UsageTotals,
}

/// A record as read back from the store, with its surrogate row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub record: UsageRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSums {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cached_tokens: u64,
    pub thought_tokens: u64,
}

impl TokenSums {
    /// Tokens counted against the daily quota: input, output and thoughts.
    pub fn consumed(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.thought_tokens)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub today: TokenSums,
    pub lifetime: TokenSums,
    pub total_requests: u64,
}

/// Requests issued per model, keyed by model name.
pub type ModelCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    pub input_per_1m: f64,
    pub cached_input_per_1m: f64,
    pub output_per_1m: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost_usd: f64,
    pub cached_input_cost_usd: f64,
    pub output_cost_usd: f64,
    pub total_cost_usd: f64,
}

/// Pricing and quota constants applied to aggregated usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsagePolicy {
    pub pricing: PricingTable,
    pub daily_token_quota: u64,
    pub request_quota_per_model: u64,
}

impl Default for UsagePolicy {
    fn default() -> Self {
        Self {
            pricing: DEFAULT_PRICING,
            daily_token_quota: DAILY_TOKEN_QUOTA,
            request_quota_per_model: REQUEST_QUOTA_PER_MODEL,
        }
    }
}

/// Input tokens not served from cache. Never negative, even if cached exceeds input.
pub fn billable_input(sums: &TokenSums) -> u64 {
    sums.input_tokens.saturating_sub(sums.cached_tokens)
}

pub fn compute_cost_usd(sums: &TokenSums, pricing: &PricingTable) -> f64 {
    compute_cost_breakdown(sums, pricing).total_cost_usd
}

pub fn compute_cost_breakdown(sums: &TokenSums, pricing: &PricingTable) -> CostBreakdown {
    let billable = billable_input(sums) as f64;
    let cached = sums.cached_tokens as f64;
    // Thought tokens are not billed separately.
    let output = sums.output_tokens as f64;
    let input_cost = (billable / 1_000_000.0) * pricing.input_per_1m;
    let cached_input_cost = (cached / 1_000_000.0) * pricing.cached_input_per_1m;
    let output_cost = (output / 1_000_000.0) * pricing.output_per_1m;
    CostBreakdown {
        input_cost_usd: input_cost,
        cached_input_cost_usd: cached_input_cost,
        output_cost_usd: output_cost,
        total_cost_usd: input_cost + cached_input_cost + output_cost,
    }
}

pub fn token_quota_percent(sums: &TokenSums, daily_token_quota: u64) -> f64 {
    if daily_token_quota == 0 {
        return 0.0;
    }
    (sums.consumed() as f64 / daily_token_quota as f64) * 100.0
}

pub fn model_remaining_percent(requests: u64, request_quota: u64) -> f64 {
    if request_quota == 0 {
        return 0.0;
    }
    let used = (requests as f64 / request_quota as f64) * 100.0;
    (100.0 - used).max(0.0)
}
