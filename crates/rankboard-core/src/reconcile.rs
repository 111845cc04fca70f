//! Keeps the entity store in step with the raw text buffer.
//!
//! Every edit of the buffer runs [`reconcile`]. Entities whose text still
//! has enough occurrences in the buffer survive with their id and position;
//! surplus entities are dropped and missing occurrences are appended to the
//! waiting pool.

use crate::entity::{Entity, EntityStore};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Counts of what a reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub kept: usize,
    pub dropped: usize,
    pub created: usize,
}

/// Split a raw buffer into lines, dropping whitespace-only ones.
///
/// Non-blank lines are returned verbatim.
pub fn non_blank_lines(buffer: &str) -> Vec<&str> {
    buffer
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Derive the new store from the buffer lines and the previous store.
pub fn reconcile<S: AsRef<str>>(lines: &[S], previous: EntityStore) -> EntityStore {
    reconcile_with_summary(lines, previous).0
}

/// Same as [`reconcile`], also reporting what changed.
pub fn reconcile_with_summary<S: AsRef<str>>(
    lines: &[S],
    previous: EntityStore,
) -> (EntityStore, ReconcileSummary) {
    // Insertion order of the map is first appearance in the buffer.
    let mut want: IndexMap<&str, usize> = IndexMap::new();
    for line in lines {
        *want.entry(line.as_ref()).or_insert(0) += 1;
    }

    // Shared across both walks; ranked claims occurrences first.
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut summary = ReconcileSummary::default();

    let EntityStore { ranked, pooled } = previous;
    let ranked = keep_prefix(ranked, &want, &mut used, &mut summary);
    let mut pooled = keep_prefix(pooled, &want, &mut used, &mut summary);

    for (&text, &count) in &want {
        let have = used.get(text).copied().unwrap_or(0);
        for _ in have..count {
            pooled.push(Entity::new(text));
            summary.created += 1;
        }
    }

    log::debug!(
        "Reconciled {} lines: kept {}, dropped {}, created {}",
        lines.len(),
        summary.kept,
        summary.dropped,
        summary.created
    );

    (EntityStore { ranked, pooled }, summary)
}

fn keep_prefix(
    entities: Vec<Entity>,
    want: &IndexMap<&str, usize>,
    used: &mut HashMap<String, usize>,
    summary: &mut ReconcileSummary,
) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|entity| {
            let allowed = want.get(entity.text.as_str()).copied().unwrap_or(0);
            let count = used.entry(entity.text.clone()).or_insert(0);
            if *count < allowed {
                *count += 1;
                summary.kept += 1;
                true
            } else {
                summary.dropped += 1;
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(seq: &[Entity]) -> Vec<&str> {
        seq.iter().map(|e| e.text.as_str()).collect()
    }

    fn ids(seq: &[Entity]) -> Vec<uuid::Uuid> {
        seq.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_non_blank_lines() {
        let lines = non_blank_lines("A\n\n  \nB \r\n\tC\n");
        assert_eq!(lines, vec!["A", "B ", "\tC"]);
        assert!(non_blank_lines("").is_empty());
        assert!(non_blank_lines("\n \n").is_empty());
    }

    #[test]
    fn test_from_empty_store() {
        let lines = non_blank_lines("A\nB\nA");
        let store = reconcile(&lines, EntityStore::new());

        assert!(store.ranked.is_empty());
        // Both A occurrences are created together, at A's first appearance.
        assert_eq!(texts(&store.pooled), vec!["A", "A", "B"]);
        assert_ne!(store.pooled[0].id, store.pooled[1].id);
    }

    #[test]
    fn test_keeps_ranked_and_adds_missing() {
        let a = Entity::new("A");
        let b = Entity::new("B");
        let c = Entity::new("C");
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        let previous = EntityStore::from_parts(vec![a, b], vec![c]);

        let store = reconcile(&["A", "B", "C", "C"], previous);

        assert_eq!(ids(&store.ranked), vec![a_id, b_id]);
        assert_eq!(store.pooled.len(), 2);
        assert_eq!(store.pooled[0].id, c_id);
        assert_eq!(store.pooled[1].text, "C");
        assert_ne!(store.pooled[1].id, c_id);
    }

    #[test]
    fn test_unchanged_buffer_is_stable() {
        let lines = ["x", "y", "x", "z"];
        let first = reconcile(&lines, EntityStore::new());
        let second = reconcile(&lines, first.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_append_keeps_existing_ids() {
        let first = reconcile(&["x", "y"], EntityStore::new());
        let second = reconcile(&["x", "y", "w"], first.clone());

        assert_eq!(ids(&second.pooled[..2]), ids(&first.pooled));
        assert_eq!(second.pooled[2].text, "w");
    }

    #[test]
    fn test_drop_in_walk_order() {
        // Ranked occurrences are claimed before pooled ones.
        let ranked_a = Entity::new("A");
        let pooled_a = Entity::new("A");
        let ranked_id = ranked_a.id;
        let previous = EntityStore::from_parts(vec![ranked_a], vec![pooled_a]);

        let store = reconcile(&["A"], previous);
        assert_eq!(ids(&store.ranked), vec![ranked_id]);
        assert!(store.pooled.is_empty());
    }

    #[test]
    fn test_removed_text_drops_everywhere() {
        let previous = EntityStore::from_parts(
            vec![Entity::new("gone"), Entity::new("stay")],
            vec![Entity::new("gone")],
        );
        let (store, summary) = reconcile_with_summary(&["stay"], previous);

        assert_eq!(texts(&store.ranked), vec!["stay"]);
        assert!(store.pooled.is_empty());
        assert_eq!(summary, ReconcileSummary { kept: 1, dropped: 2, created: 0 });
    }

    #[test]
    fn test_new_entities_follow_first_appearance() {
        let store = reconcile(&["b", "a", "b", "c", "a"], EntityStore::new());
        assert_eq!(texts(&store.pooled), vec!["b", "b", "a", "a", "c"]);
    }

    #[test]
    fn test_multiset_conservation() {
        let buffers = [
            "one\ntwo\nthree",
            "one\none\n\ntwo",
            "two\n  \nfour\nfour\nfour",
            "",
            "four\nthree\none\none",
        ];
        let mut store = EntityStore::new();
        for buffer in buffers {
            let lines = non_blank_lines(buffer);
            store = reconcile(&lines, store);
            // Move something onto the board between edits.
            if let Some(entity) = store.pooled.pop() {
                store.ranked.push(entity);
            }

            let mut expected = lines.clone();
            expected.sort_unstable();
            assert_eq!(store.texts(), expected);
        }
    }
}
