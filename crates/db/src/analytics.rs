use watch_core::{ModelCounts, TokenSums};

use crate::Db;
use crate::error::Result;
use crate::helpers::{row_to_sums, window_clause};
use crate::types::{Aggregate, Window};

impl Db {
    /// Token sums and row count for the window. Empty windows sum to zero.
    pub fn query_aggregates(&self, window: &Window) -> Result<Aggregate> {
        let (predicate, params) = window_clause(window);
        let sql = format!(
            r#"
            SELECT
              COALESCE(SUM(input_tokens), 0),
              COALESCE(SUM(output_tokens), 0),
              COALESCE(SUM(cached_tokens), 0),
              COALESCE(SUM(thought_tokens), 0),
              COUNT(*)
            FROM usage_record
            WHERE {}
            "#,
            predicate
        );
        let aggregate = self
            .conn
            .query_row(&sql, params.as_slice(), |row| {
                let sums: TokenSums = row_to_sums(row)?;
                let count: i64 = row.get(4)?;
                Ok(Aggregate {
                    sums,
                    count: count.max(0) as u64,
                })
            })?;
        Ok(aggregate)
    }

    pub fn query_model_counts(&self, window: &Window) -> Result<ModelCounts> {
        let (predicate, params) = window_clause(window);
        let sql = format!(
            r#"
            SELECT model, COUNT(*)
            FROM usage_record
            WHERE {}
            GROUP BY model
            "#,
            predicate
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params.as_slice())?;
        let mut counts = ModelCounts::new();
        while let Some(row) = rows.next()? {
            let model: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            counts.insert(model, count.max(0) as u64);
        }
        Ok(counts)
    }
}
