//! Keyset pagination over a table's integer primary key.
//!
//! Each page is `pk >= start ORDER BY pk ASC LIMIT batch_size`. The next page
//! starts at the successor of the last key seen, so gaps in the key sequence
//! cost nothing. A short or empty page ends the scan.
//!
//! Rows written by others during a scan may be seen twice or not at all:
//! a row inserted behind the cursor is missed, one whose key moves ahead of
//! it is delivered again.

use crate::{
    batch::{plan::PluckPlan, summary::IterationSummary},
    error::{BoxError, PluckError},
};
use connectors::executor::{QueryExecutor, RangeQueryBuilder};
use engine_config::settings::validated::ValidatedSettings;
use model::{
    core::value::Value,
    pagination::{cursor::Cursor, page::FetchResult},
    records::row::Plucked,
};
use planner::query::offsets::{OffsetStrategy, PkOffset};
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct KeysetBatchIterator<'a, E: QueryExecutor + ?Sized> {
    executor: &'a E,
    settings: ValidatedSettings,
}

impl<'a, E: QueryExecutor + ?Sized> KeysetBatchIterator<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self::with_settings(executor, ValidatedSettings::default())
    }

    pub fn with_settings(executor: &'a E, settings: ValidatedSettings) -> Self {
        KeysetBatchIterator { executor, settings }
    }

    /// Scans with the configured batch size and start key.
    pub async fn pluck_each<F, Err>(
        &self,
        columns: &[&str],
        consumer: F,
    ) -> Result<IterationSummary, PluckError>
    where
        F: FnMut(Plucked) -> Result<(), Err>,
        Err: Into<BoxError>,
    {
        self.iterate(columns, self.settings.batch_size, consumer).await
    }

    /// Delivers every row with a key at or above the configured start, in key
    /// order, fetching `batch_size` rows per query.
    ///
    /// A single requested column is delivered as `Plucked::Scalar`, several as
    /// `Plucked::Tuple` in the order given.
    pub async fn iterate<F, Err>(
        &self,
        columns: &[&str],
        batch_size: usize,
        consumer: F,
    ) -> Result<IterationSummary, PluckError>
    where
        F: FnMut(Plucked) -> Result<(), Err>,
        Err: Into<BoxError>,
    {
        self.iterate_from(columns, batch_size, Cursor::None, consumer)
            .await
    }

    /// Like [`iterate`](Self::iterate), starting at `start`. `Cursor::None`
    /// falls back to the configured start, then to the key type's minimum.
    pub async fn iterate_from<F, Err>(
        &self,
        columns: &[&str],
        batch_size: usize,
        start: Cursor,
        mut consumer: F,
    ) -> Result<IterationSummary, PluckError>
    where
        F: FnMut(Plucked) -> Result<(), Err>,
        Err: Into<BoxError>,
    {
        if columns.is_empty() {
            return Err(PluckError::invalid("at least one column required"));
        }
        if batch_size == 0 {
            return Err(PluckError::invalid("batch_size must be at least 1"));
        }

        let plan = PluckPlan::resolve(self.executor, columns)?;
        let offset = PkOffset::new(&plan.primary_key.name);
        let mut cursor = Cursor::Pk {
            pk_col: plan.primary_key.name.clone(),
            from: self.start_key(&plan, &start)?,
        };

        let mut summary = IterationSummary::default();
        loop {
            let page = self.fetch(&plan, &offset, &cursor, batch_size).await?;
            let Some(last_id) = plan.last_key(&page.rows)? else {
                break;
            };

            for row in page.rows {
                consumer(plan.shape(row).into_plucked())
                    .map_err(|e| PluckError::Consumer(e.into()))?;
            }
            summary.record_batch(page.row_count, last_id);

            match page.next_cursor {
                Some(next) if !page.reached_end => cursor = next,
                _ => break,
            }
        }

        info!(
            table = %self.executor.table().name(),
            batches = summary.batches,
            rows = summary.rows,
            last_id = ?summary.last_id,
            "Batch iteration finished"
        );
        Ok(summary)
    }

    /// Fetches the page starting at `cursor` without delivering it.
    pub async fn fetch(
        &self,
        plan: &PluckPlan,
        offset: &dyn OffsetStrategy,
        cursor: &Cursor,
        batch_size: usize,
    ) -> Result<FetchResult, PluckError> {
        let from = cursor
            .lower_bound()
            .cloned()
            .ok_or_else(|| PluckError::invalid("range query requires a start key"))?;

        let query = RangeQueryBuilder::new(plan.primary_key.clone())
            .columns(plan.select_columns.clone())
            .lower_bound(from.clone())
            .limit(batch_size)
            .build();

        let start = Instant::now();
        let rows = self.executor.run_range_query(&query).await?;
        let took_ms = start.elapsed().as_millis();
        let row_count = rows.len();

        let mut reached_end = row_count < batch_size;
        let next_cursor = match plan.last_key(&rows)? {
            Some(last_id) if !reached_end => {
                let next = offset.next_cursor(&last_id).filter(|next| {
                    next.lower_bound()
                        .is_some_and(|key| plan.primary_key.data_type.contains_key(key))
                });
                if next.is_none() {
                    warn!(
                        pk = %plan.primary_key,
                        %last_id,
                        "Primary key reached the top of its range, no later rows can exist"
                    );
                    reached_end = true;
                }
                next
            }
            _ => None,
        };

        debug!(
            table = %self.executor.table().name(),
            %from,
            rows = row_count,
            took_ms = took_ms as u64,
            reached_end,
            "Fetched batch"
        );

        Ok(FetchResult {
            rows,
            next_cursor,
            reached_end,
            row_count,
            took_ms,
        })
    }

    fn start_key(&self, plan: &PluckPlan, start: &Cursor) -> Result<Value, PluckError> {
        let pk = &plan.primary_key;
        let key = match start {
            Cursor::Pk { pk_col, from } => {
                if !pk.is_named(pk_col) {
                    return Err(PluckError::invalid(format!(
                        "start cursor is on `{pk_col}`, but the primary key is `{}`",
                        pk.name
                    )));
                }
                from.clone()
            }
            Cursor::None => match &self.settings.start {
                Some(from) => from.clone(),
                None => pk.data_type.min_key().ok_or_else(|| {
                    PluckError::invalid(format!("primary key `{pk}` has no integer range"))
                })?,
            },
        };

        if !pk.data_type.contains_key(&key) {
            return Err(PluckError::invalid(format!(
                "start key {key} is outside the range of `{pk}` ({})",
                pk.data_type
            )));
        }
        Ok(key)
    }
}
