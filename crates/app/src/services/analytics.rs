use chrono::NaiveDate;

use crate::error::Result;
use crate::report::{UsageReport, compute_model_stats, compute_stats};
use crate::services::{SharedConfig, open_db};
use crate::util::time::utc_today;
use watch_core::{ModelCounts, Stats, UsagePolicy};
use watch_db::Db;

#[derive(Clone)]
pub struct AnalyticsService {
    config: SharedConfig,
}

impl AnalyticsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn stats(&self) -> Result<Stats> {
        self.stats_on(utc_today())
    }

    pub fn stats_on(&self, today: NaiveDate) -> Result<Stats> {
        let db = self.db()?;
        compute_stats(&db, today)
    }

    pub fn model_stats(&self) -> Result<ModelCounts> {
        self.model_stats_on(utc_today())
    }

    pub fn model_stats_on(&self, today: NaiveDate) -> Result<ModelCounts> {
        let db = self.db()?;
        compute_model_stats(&db, today)
    }

    pub fn report(&self, recent_limit: u32) -> Result<UsageReport> {
        self.report_on(utc_today(), recent_limit, &UsagePolicy::default())
    }

    pub fn report_on(
        &self,
        today: NaiveDate,
        recent_limit: u32,
        policy: &UsagePolicy,
    ) -> Result<UsageReport> {
        let db = self.db()?;
        let stats = compute_stats(&db, today)?;
        let per_model = compute_model_stats(&db, today)?;
        let recent = db.query_recent(recent_limit)?;
        Ok(UsageReport::build(stats, per_model, recent, policy))
    }
}
