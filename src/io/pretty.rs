//! Debug-printing helpers for a [`crate::instance::BipartiteInstance`].
//!
//! Not a `Display` impl on the instance itself, since the instance has no
//! single canonical textual form (callers may want the matrix, the
//! matching, or both); callers pick what they want to print.

use std::fmt::Write;

use crate::instance::BipartiteInstance;

/// Formats the current stored weight matrix, one row per line,
/// space-separated.
pub fn format_matrix(instance: &BipartiteInstance) -> String {
    let mut out = String::new();
    for i in 0..instance.n() {
        let row = instance.stored_row(i);
        let rendered: Vec<String> = row.iter().map(i64::to_string).collect();
        let _ = writeln!(out, "{}", rendered.join(" "));
    }
    out
}

/// Formats the current matching as `i -> j` pairs, one per line, `S`-local
/// indices on the left.
pub fn format_matching(instance: &BipartiteInstance) -> String {
    let mut out = String::new();
    for i in 0..instance.n() {
        match instance.matched_to(i) {
            Some(j) => {
                let _ = writeln!(out, "{} -> {}", i, j - instance.n());
            }
            None => {
                let _ = writeln!(out, "{} -> (unmatched)", i);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_format_reports_local_t_indices() {
        let mut instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        instance.set_matched(0, Some(2));
        instance.set_matched(2, Some(0));
        let rendered = format_matching(&instance);
        assert!(rendered.contains("0 -> 0"));
        assert!(rendered.contains("1 -> (unmatched)"));
    }
}
