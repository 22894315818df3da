//! Checkpointed batch enrichment.
//!
//! One sequential loop serves every network pass: walk the records in order,
//! resolve the ones that need work, and persist the whole collection every
//! `checkpoint_every` processed records plus once more when the loop ends,
//! however it ends.
use crate::dataset::Checkpoint;
use crate::pass::{needs_any, Step};
use crate::record::Record;
use crate::util::{lookup_key, truncate_string};
use anyhow::{anyhow, Context, Result};
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Loop parameters supplied by the caller.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Persist after this many processed records. Must be non-zero.
    pub checkpoint_every: usize,
    /// Pause after each record that hit a remote resolver.
    pub delay: Duration,
    /// Upper bound of random extra pause added to `delay`.
    pub jitter: Duration,
    /// Stop after this many processed records.
    pub limit: Option<usize>,
    /// Set by the interrupt handler; checked before each record.
    pub interrupt: Arc<AtomicBool>,
}

impl EnrichOptions {
    pub fn new(checkpoint_every: usize) -> Self {
        Self {
            checkpoint_every,
            delay: Duration::ZERO,
            jitter: Duration::ZERO,
            limit: None,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    fn limit_reached(&self, processed: usize) -> bool {
        self.limit.is_some_and(|limit| processed >= limit)
    }
}

/// Counts reported at the end of a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichSummary {
    /// Records needing work when the pass started.
    pub candidates: usize,
    pub processed: usize,
    pub updated: usize,
    /// Records where at least one resolver call failed.
    pub failed: usize,
    pub checkpoints: usize,
    pub interrupted: bool,
}

#[derive(Debug, Default)]
struct RecordOutcome {
    updated: bool,
    failed: bool,
    remote_calls: usize,
}

/// Run every step over the records that need it.
///
/// Resolver errors are logged and counted but never abort the loop. A failed
/// checkpoint stops the loop; the final save is still attempted before the
/// error is returned.
pub fn enrich(
    records: &mut [Record],
    steps: &[Step],
    store: &dyn Checkpoint,
    options: &EnrichOptions,
) -> Result<EnrichSummary> {
    if options.checkpoint_every == 0 {
        return Err(anyhow!("checkpoint interval must be at least 1"));
    }

    let candidates = records
        .iter()
        .filter(|record| needs_any(steps, record))
        .count();
    let targets: Vec<&str> = steps.iter().map(|step| step.target.label()).collect();
    tracing::info!(
        candidates,
        total = records.len(),
        targets = ?targets,
        "starting enrichment pass"
    );

    let mut summary = EnrichSummary {
        candidates,
        ..EnrichSummary::default()
    };
    let start = Instant::now();
    let mut checkpoint_error = None;
    let mut since_checkpoint = 0;

    for index in 0..records.len() {
        if options.interrupted() {
            summary.interrupted = true;
            tracing::warn!(processed = summary.processed, "interrupted; stopping pass");
            break;
        }
        if options.limit_reached(summary.processed) {
            tracing::info!(limit = summary.processed, "record limit reached");
            break;
        }
        if !needs_any(steps, &records[index]) {
            continue;
        }

        let outcome = process_record(&mut records[index], steps);
        summary.processed += 1;
        summary.updated += usize::from(outcome.updated);
        summary.failed += usize::from(outcome.failed);
        since_checkpoint += 1;

        if since_checkpoint == options.checkpoint_every {
            since_checkpoint = 0;
            tracing::info!(
                processed = summary.processed,
                candidates,
                updated = summary.updated,
                "processed {}...",
                summary.processed
            );
            if let Err(err) = store.checkpoint(records) {
                tracing::error!(error = %format!("{err:#}"), "checkpoint save failed");
                checkpoint_error = Some(err);
                break;
            }
            summary.checkpoints += 1;
        }

        if outcome.remote_calls > 0 && !options.interrupted() {
            pause(options);
        }
    }

    let final_save = store.checkpoint(records);
    if let Some(err) = checkpoint_error {
        if let Err(final_err) = final_save {
            tracing::error!(error = %format!("{final_err:#}"), "final save failed");
        }
        return Err(err).context("checkpoint save");
    }
    final_save.context("final save")?;
    summary.checkpoints += 1;

    tracing::info!(
        processed = summary.processed,
        updated = summary.updated,
        failed = summary.failed,
        elapsed_ms = start.elapsed().as_millis(),
        "enrichment pass complete"
    );
    Ok(summary)
}

fn process_record(record: &mut Record, steps: &[Step]) -> RecordOutcome {
    let mut outcome = RecordOutcome::default();
    let word = record.word().to_string();
    let key = lookup_key(&word);
    if key.is_empty() {
        tracing::warn!(word = %word, "empty lookup key; skipping");
        return outcome;
    }

    for step in steps {
        if !step.target.needs_work(record) {
            continue;
        }
        let resolver = step.resolver.name();
        if step.resolver.is_remote() {
            outcome.remote_calls += 1;
        }
        match step.resolver.resolve(&key) {
            Ok(Some(value)) => {
                tracing::debug!(
                    word = %word,
                    resolver,
                    target = step.target.label(),
                    value = %truncate_string(&value, 80),
                    "resolved"
                );
                step.target.apply(record, &value);
                outcome.updated = true;
            }
            Ok(None) => {
                tracing::debug!(word = %word, resolver, "no result");
            }
            Err(err) => {
                tracing::warn!(
                    word = %word,
                    resolver,
                    error = %format!("{err:#}"),
                    "lookup failed"
                );
                outcome.failed = true;
            }
        }
    }
    outcome
}

fn pause(options: &EnrichOptions) {
    let jitter_ms = u64::try_from(options.jitter.as_millis()).unwrap_or(u64::MAX);
    let extra = if jitter_ms == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    };
    let total = options.delay + extra;
    if !total.is_zero() {
        std::thread::sleep(total);
    }
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
