//! Stable removal of duplicate problem records.

use rustc_hash::FxHashSet;

use super::problem::ProblemRecord;

/// Identity of a record for duplicate detection.
///
/// Two records are duplicates when the dotted path, kind, source type,
/// unresolved name and module name all agree. Other fields (target type,
/// flags, suggestion) do not take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey<'a> {
    path: String,
    kind: &'static str,
    source_type: &'a str,
    name: &'a str,
    module_name: &'a str,
}

impl<'a> DedupKey<'a> {
    /// Build the key of a record.
    pub fn of(record: &'a ProblemRecord) -> Self {
        Self {
            path: record.path_string(),
            kind: record.kind_tag(),
            source_type: record.source_type().unwrap_or_default(),
            name: record.name().unwrap_or_default(),
            module_name: record.module_name().unwrap_or_default(),
        }
    }
}

/// Keep the first record of each identity, in original order.
pub fn dedup(records: Vec<ProblemRecord>) -> Vec<ProblemRecord> {
    let keep: Vec<bool> = {
        let mut seen = FxHashSet::default();
        records.iter().map(|r| seen.insert(DedupKey::of(r))).collect()
    };
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
