//! Offline reconciliation of definition aliases and record ids.
//!
//! Earlier passes wrote definitions under different keys. This pass picks one
//! canonical value per record, copies it to every alias, and assigns a
//! derived `id` where none exists. Running it again changes nothing.
use crate::record::{Field, Record, DEFINITION_ALIASES};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Namespace prefix for derived record ids.
pub const ID_NAMESPACE: &str = "ket";

/// Alias precedence when several hold different non-placeholder values.
const CANONICAL_PRECEDENCE: [Field; 3] = [Field::Meaning, Field::Definition, Field::DefinitionEn];

/// Counts of records changed by a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub records: usize,
    pub aliases_synced: usize,
    pub ids_assigned: usize,
}

impl ReconcileSummary {
    pub fn changed(&self) -> bool {
        self.aliases_synced > 0 || self.ids_assigned > 0
    }
}

/// Reconcile every record in place.
pub fn reconcile(records: &mut [Record]) -> ReconcileSummary {
    let mut summary = ReconcileSummary {
        records: records.len(),
        ..ReconcileSummary::default()
    };
    for record in records.iter_mut() {
        if sync_aliases(record) {
            summary.aliases_synced += 1;
        }
        if assign_id(record) {
            summary.ids_assigned += 1;
        }
    }
    tracing::info!(
        records = summary.records,
        aliases_synced = summary.aliases_synced,
        ids_assigned = summary.ids_assigned,
        "reconciliation complete"
    );
    summary
}

/// The value every definition alias should hold, if any alias has one.
pub fn canonical_definition(record: &Record) -> Option<&str> {
    CANONICAL_PRECEDENCE
        .iter()
        .find_map(|field| record.present(*field))
}

/// True when a canonical definition exists and some alias disagrees with it.
pub fn aliases_out_of_sync(record: &Record) -> bool {
    match canonical_definition(record) {
        Some(canonical) => DEFINITION_ALIASES
            .iter()
            .any(|field| record.get_str(*field) != Some(canonical)),
        None => false,
    }
}

fn sync_aliases(record: &mut Record) -> bool {
    let Some(canonical) = canonical_definition(record).map(str::to_string) else {
        return false;
    };
    let mut changed = false;
    for field in DEFINITION_ALIASES {
        changed |= record.set_str(field, &canonical);
    }
    changed
}

fn assign_id(record: &mut Record) -> bool {
    if !record.status(Field::Id).needs_fill() {
        return false;
    }
    let id = derive_id(record.word());
    record.set_str(Field::Id, &id)
}

fn id_disallowed_chars() -> &'static Regex {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9_]").expect("valid id pattern"))
}

/// Build the stable id for a word: lowercase, spaces to `_`, other symbols dropped.
pub fn derive_id(word: &str) -> String {
    let lowered = word.to_lowercase().replace(' ', "_");
    let cleaned = id_disallowed_chars().replace_all(&lowered, "");
    format!("{ID_NAMESPACE}_{cleaned}")
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
