//! Record types produced by the parser

use indexmap::IndexMap;

/// Placeholder value written into cells added by row padding
pub const NULL_PLACEHOLDER: &str = "null";

/// One parsed row: column name to value, in column order
pub type Record = IndexMap<String, String>;

/// Pad `record` up to `width` columns
///
/// Every header index in `record.len()..width` gets [`NULL_PLACEHOLDER`].
/// Names come from `headers` as it is *now*, not as it was when the row was
/// parsed, so a row padded before wider rows appear sees only the headers
/// known at that point.
///
/// Unlike a plain insert, a name that is already present keeps its value.
/// With a duplicated header row such as `a,a` the record `{a: "2"}` stays
/// `{a: "2"}` instead of being clobbered to `{a: "null"}`.
///
/// Padding a record that is already `width` wide is a no-op.
pub fn maximize(record: &mut Record, headers: &[String], width: usize) {
    let start = record.len();
    for name in headers.iter().take(width).skip(start) {
        record
            .entry(name.clone())
            .or_insert_with(|| NULL_PLACEHOLDER.to_string());
    }
}
