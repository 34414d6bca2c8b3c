//! Bounded-depth summarization of a flat key namespace.
//!
//! The registry's key space is flat; the directory-style view shown by
//! `kv ls` is computed here from an already-materialized, lexicographically
//! ordered entry list. Pure transform, no remote calls.

use shoal_common::KvEntry;

/// Path segments shown under the queried prefix before a listing entry is
/// collapsed with an ellipsis marker.
const MAX_SEGMENTS: usize = 2;

/// Summarize `entries` as the direct children of `prefix`.
///
/// Each key is reduced to its path relative to `prefix`. An exact match
/// (empty relative path) is shown as `.`. Deeper keys are collapsed to
/// their first two segments plus `...` unless `recurse` is set; exactly
/// two segments are never collapsed. With `is_root`, every non-empty
/// output gets a leading `/`. Multiple deep keys collapse to the same
/// string, so duplicates are suppressed at first occurrence — output
/// order follows the underlying key order.
pub fn summarize(entries: &[KvEntry], prefix: &str, recurse: bool, is_root: bool) -> Vec<String> {
    let mut listing: Vec<String> = Vec::new();

    for entry in entries {
        let rel = relative_path(&entry.key, prefix);
        let line = if rel.is_empty() {
            ".".to_string()
        } else {
            let segments: Vec<&str> = rel.split('/').collect();
            let path = if segments.len() > MAX_SEGMENTS && !recurse {
                format!("{}...", segments[..MAX_SEGMENTS].join("/"))
            } else {
                rel.to_string()
            };
            if is_root {
                format!("/{path}")
            } else {
                path
            }
        };
        if !listing.contains(&line) {
            listing.push(line);
        }
    }

    listing
}

/// Whether `key` falls within the two-level display depth under `prefix`.
/// Used by the JSON listing mode, which shows whole entries instead of
/// summarized paths but honors the same depth bound.
pub fn within_depth(key: &str, prefix: &str, recurse: bool) -> bool {
    if recurse {
        return true;
    }
    relative_path(key, prefix).split('/').count() <= MAX_SEGMENTS
}

fn relative_path<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix)
        .unwrap_or(key)
        .trim_start_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(keys: &[&str]) -> Vec<KvEntry> {
        keys.iter()
            .map(|k| KvEntry {
                key: k.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn collapses_beyond_two_segments() {
        let entries = entries(&["svc/a", "svc/a/b", "svc/a/b/c"]);
        assert_eq!(
            summarize(&entries, "svc", false, false),
            vec!["a", "a/b", "a/b..."]
        );
    }

    #[test]
    fn exactly_two_segments_are_not_collapsed() {
        let entries = entries(&["svc/a/b"]);
        assert_eq!(summarize(&entries, "svc", false, false), vec!["a/b"]);
    }

    #[test]
    fn recurse_disables_collapsing() {
        let entries = entries(&["svc/a", "svc/a/b", "svc/a/b/c"]);
        assert_eq!(
            summarize(&entries, "svc", true, false),
            vec!["a", "a/b", "a/b/c"]
        );
    }

    #[test]
    fn collapsed_duplicates_appear_once() {
        let entries = entries(&["svc/a/b/c", "svc/a/b/d", "svc/a/b/d/e"]);
        assert_eq!(summarize(&entries, "svc", false, false), vec!["a/b..."]);
    }

    #[test]
    fn exact_prefix_match_is_shown_as_dot() {
        let entries = entries(&["svc", "svc/a"]);
        assert_eq!(summarize(&entries, "svc", false, false), vec![".", "a"]);
    }

    #[test]
    fn root_prefixes_every_output_with_slash() {
        let entries = entries(&["svc/a", "svc/a/b/c", "other"]);
        assert_eq!(
            summarize(&entries, "", false, true),
            vec!["/svc/a", "/svc/a...", "/other"]
        );
    }

    #[test]
    fn non_root_output_has_no_leading_slash() {
        let entries = entries(&["svc/a/b/c"]);
        assert_eq!(summarize(&entries, "svc", false, false), vec!["a/b..."]);
    }

    #[test]
    fn output_preserves_first_occurrence_order() {
        let entries = entries(&["svc/b/x/1", "svc/a", "svc/b/x/2"]);
        assert_eq!(
            summarize(&entries, "svc", false, false),
            vec!["b/x...", "a"]
        );
    }

    #[test]
    fn empty_input_yields_empty_listing() {
        assert!(summarize(&[], "svc", false, false).is_empty());
    }

    #[test]
    fn within_depth_matches_collapse_boundary() {
        assert!(within_depth("svc/a", "svc", false));
        assert!(within_depth("svc/a/b", "svc", false));
        assert!(!within_depth("svc/a/b/c", "svc", false));
        assert!(within_depth("svc/a/b/c", "svc", true));
        // Exact match counts as a single (empty) segment.
        assert!(within_depth("svc", "svc", false));
    }
}
