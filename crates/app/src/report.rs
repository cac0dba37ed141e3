use chrono::NaiveDate;
use serde::Serialize;
use watch_core::{
    CostBreakdown, ModelCounts, Stats, StoredRecord, TokenSums, UsagePolicy, billable_input,
    compute_cost_breakdown, model_remaining_percent, token_quota_percent,
};
use watch_db::{Db, Window};

use crate::error::Result;

/// Lifetime sums and request count, plus sums for the UTC date `today`.
pub fn compute_stats(db: &Db, today: NaiveDate) -> Result<Stats> {
    let lifetime = db.query_aggregates(&Window::Lifetime)?;
    let today = db.query_aggregates(&Window::day(today))?;
    Ok(Stats {
        today: today.sums,
        lifetime: lifetime.sums,
        total_requests: lifetime.count,
    })
}

/// Requests per model issued on the UTC date `today`.
pub fn compute_model_stats(db: &Db, today: NaiveDate) -> Result<ModelCounts> {
    Ok(db.query_model_counts(&Window::day(today))?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelQuota {
    pub model: String,
    pub requests: u64,
    pub remaining_percent: f64,
}

/// Everything the presentation layer needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub stats_today: TokenSums,
    pub stats_lifetime: TokenSums,
    pub total_requests: u64,
    pub per_model_today: ModelCounts,
    pub recent: Vec<StoredRecord>,
    pub billable_input: u64,
    pub cost: CostBreakdown,
    pub token_quota_percent: f64,
    pub model_quotas: Vec<ModelQuota>,
}

impl UsageReport {
    pub fn build(
        stats: Stats,
        per_model_today: ModelCounts,
        recent: Vec<StoredRecord>,
        policy: &UsagePolicy,
    ) -> Self {
        let model_quotas = per_model_today
            .iter()
            .map(|(model, requests)| ModelQuota {
                model: model.clone(),
                requests: *requests,
                remaining_percent: model_remaining_percent(
                    *requests,
                    policy.request_quota_per_model,
                ),
            })
            .collect();
        Self {
            billable_input: billable_input(&stats.today),
            cost: compute_cost_breakdown(&stats.today, &policy.pricing),
            token_quota_percent: token_quota_percent(&stats.today, policy.daily_token_quota),
            stats_today: stats.today,
            stats_lifetime: stats.lifetime,
            total_requests: stats.total_requests,
            per_model_today,
            recent,
            model_quotas,
        }
    }

    /// Input, output and thought tokens over the store's lifetime.
    pub fn lifetime_tokens(&self) -> u64 {
        self.stats_lifetime.consumed()
    }
}
