//! Randomized workload driver.
//!
//! Each iteration draws a random record count, table, and DML kind, then
//! dispatches to the DML engine. UPDATE and DELETE iterations are skipped
//! without progress when the table currently holds fewer rows than drawn,
//! so a delete can never be asked for more rows than exist. The whole run
//! executes inside one transaction, resolved exactly once at the end, and
//! is written to the daily run report.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use chrono::Local;
use rand::Rng;
use tracing::{debug, info};

use crate::dml::{DmlEngine, DmlKind};
use crate::report::{self, ReportEntry};
use crate::schema::TableAttributes;

/// When to stop the run. Exactly one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop once the cumulative affected-row count reaches this total.
    TotalRecords(u64),
    /// Stop after this many DML dispatches, regardless of record counts.
    DmlCount(u64),
    /// Stop once this much wall-clock time has elapsed.
    Duration(Duration),
}

#[derive(Debug, Clone)]
pub struct WorkloadOptions {
    /// Inclusive `[min, max]` range record counts are drawn from.
    pub record_range: (u64, u64),
    pub tables: Vec<String>,
    pub kinds: Vec<DmlKind>,
    pub stop: StopCondition,
    /// Fixed sleep between iterations.
    pub sleep: Option<Duration>,
    pub report_dir: PathBuf,
}

/// Draws a record count uniformly from `range`, clamped to not exceed
/// `remaining` when a total-records budget applies.
fn draw_count<R: Rng + ?Sized>(
    rng: &mut R,
    range: (u64, u64),
    remaining: Option<u64>,
) -> u64 {
    let drawn = rng.gen_range(range.0..=range.1);
    match remaining {
        Some(remaining) => drawn.min(remaining),
        None => drawn,
    }
}

/// Runs the randomized workload on `engine` and appends the run report.
/// Returns the report entries in dispatch order.
pub async fn run_workload<E: Rng, R: Rng>(
    engine: &mut DmlEngine<'_, E>,
    options: &WorkloadOptions,
    rng: &mut R,
) -> anyhow::Result<Vec<ReportEntry>> {
    ensure!(!options.tables.is_empty(), "workload needs at least one table");
    ensure!(!options.kinds.is_empty(), "workload needs at least one DML kind");
    ensure!(
        options.record_range.0 >= 1 && options.record_range.0 <= options.record_range.1,
        "record range must satisfy 1 <= min <= max"
    );

    let tables: Vec<&TableAttributes> = options
        .tables
        .iter()
        .map(|name| engine.model().table(name))
        .collect::<Result<_, _>>()?;

    let started_at = Local::now();
    let started = Instant::now();
    let rollback = engine.options().rollback;
    let mut entries = Vec::new();
    let mut dispatched = 0u64;
    let mut affected_total = 0u64;

    info!(stop = ?options.stop, tables = tables.len(), "workload run");
    engine.begin_transaction().await?;

    loop {
        let remaining = match options.stop {
            StopCondition::TotalRecords(total) => {
                if affected_total >= total {
                    break;
                }
                Some(total - affected_total)
            }
            StopCondition::DmlCount(count) => {
                if dispatched >= count {
                    break;
                }
                None
            }
            StopCondition::Duration(limit) => {
                if started.elapsed() >= limit {
                    break;
                }
                None
            }
        };

        let count = draw_count(rng, options.record_range, remaining);
        let table = tables[rng.gen_range(0..tables.len())];
        let kind = options.kinds[rng.gen_range(0..options.kinds.len())];

        if matches!(kind, DmlKind::Update | DmlKind::Delete) {
            let rows = engine.row_count(table).await?;
            if (rows as u64) < count {
                debug!(
                    table = %table.definition.name,
                    %kind,
                    count,
                    rows,
                    "table too small, skipping iteration"
                );
                if let Some(sleep) = options.sleep {
                    tokio::time::sleep(sleep).await;
                }
                continue;
            }
        }

        let affected = match kind {
            DmlKind::Insert => engine.insert_batch(table, count).await?,
            DmlKind::Update => engine.update_random(table, count).await?,
            DmlKind::Delete => engine.delete_random(table, count).await?,
        };

        dispatched += 1;
        affected_total += affected;
        entries.push(ReportEntry {
            sequence: dispatched,
            table: table.definition.name.clone(),
            kind,
            rows: affected,
        });

        if let Some(sleep) = options.sleep {
            tokio::time::sleep(sleep).await;
        }
    }

    // The one and only transaction resolution of the run.
    engine.resolve_transaction().await?;
    info!(
        dispatched,
        affected_total,
        committed = !rollback,
        "workload finished"
    );

    let path = report::append_run(&options.report_dir, started_at, &entries, !rollback)
        .context("writing the run report")?;
    info!(report = %path.display(), "run report appended");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn draw_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let drawn = draw_count(&mut rng, (10, 50), None);
            assert!((10..=50).contains(&drawn));
        }
    }

    #[test]
    fn draw_is_clamped_to_remaining_budget() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            assert!(draw_count(&mut rng, (10, 50), Some(7)) <= 7);
        }
        // A full remaining budget never clamps below the minimum.
        assert!(draw_count(&mut rng, (10, 50), Some(1000)) >= 10);
    }
}
