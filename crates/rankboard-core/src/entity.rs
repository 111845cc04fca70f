//! Word entities and the two ordered sequences that hold them.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities.
pub type EntityId = Uuid;

/// One identified occurrence of a text line.
///
/// Two entities may carry the same text; they stay distinct by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Identity key, generated once and never reused.
    pub id: EntityId,
    /// The line of text this entity stands for.
    pub text: String,
}

impl Entity {
    /// Create a new entity with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Which of the two sequences an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceKind {
    /// The ranking board.
    Ranked,
    /// The waiting list.
    Pooled,
}

impl SequenceKind {
    /// Name used by input layers to address the sequence as a drop area.
    pub fn name(self) -> &'static str {
        match self {
            SequenceKind::Ranked => "ranking",
            SequenceKind::Pooled => "stack",
        }
    }

    /// Resolve a drop-area name back into a sequence.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ranking" => Some(SequenceKind::Ranked),
            "stack" => Some(SequenceKind::Pooled),
            _ => None,
        }
    }

    /// The other sequence.
    pub fn other(self) -> Self {
        match self {
            SequenceKind::Ranked => SequenceKind::Pooled,
            SequenceKind::Pooled => SequenceKind::Ranked,
        }
    }
}

/// The working set: ranked board plus waiting pool.
///
/// An id appears in at most one of the two sequences. Order inside each
/// sequence is insertion/drag order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
    /// Entities on the board, best first.
    pub ranked: Vec<Entity>,
    /// Entities waiting to be ranked.
    pub pooled: Vec<Entity>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing sequences.
    pub fn from_parts(ranked: Vec<Entity>, pooled: Vec<Entity>) -> Self {
        Self { ranked, pooled }
    }

    /// Borrow one of the sequences.
    pub fn sequence(&self, kind: SequenceKind) -> &[Entity] {
        match kind {
            SequenceKind::Ranked => &self.ranked,
            SequenceKind::Pooled => &self.pooled,
        }
    }

    /// Mutably borrow one of the sequences.
    pub fn sequence_mut(&mut self, kind: SequenceKind) -> &mut Vec<Entity> {
        match kind {
            SequenceKind::Ranked => &mut self.ranked,
            SequenceKind::Pooled => &mut self.pooled,
        }
    }

    /// Find which sequence holds an entity. Ranked is searched first.
    pub fn locate(&self, id: EntityId) -> Option<SequenceKind> {
        if self.ranked.iter().any(|e| e.id == id) {
            Some(SequenceKind::Ranked)
        } else if self.pooled.iter().any(|e| e.id == id) {
            Some(SequenceKind::Pooled)
        } else {
            None
        }
    }

    /// Position of an entity inside the given sequence.
    pub fn index_of(&self, kind: SequenceKind, id: EntityId) -> Option<usize> {
        self.sequence(kind).iter().position(|e| e.id == id)
    }

    /// Get an entity by id from either sequence.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.ranked
            .iter()
            .chain(self.pooled.iter())
            .find(|e| e.id == id)
    }

    /// Remove an entity from whichever sequence holds it.
    pub fn take(&mut self, id: EntityId) -> Option<(SequenceKind, Entity)> {
        let kind = self.locate(id)?;
        let seq = self.sequence_mut(kind);
        let index = seq.iter().position(|e| e.id == id)?;
        Some((kind, seq.remove(index)))
    }

    /// Insert an entity into a sequence. `index` is clamped to the length.
    pub fn insert(&mut self, kind: SequenceKind, index: usize, entity: Entity) {
        let seq = self.sequence_mut(kind);
        let index = index.min(seq.len());
        seq.insert(index, entity);
    }

    /// Move an entity inside one sequence (remove, then insert at `to`).
    /// Returns true if anything moved.
    pub fn move_within(&mut self, kind: SequenceKind, from: usize, to: usize) -> bool {
        let seq = self.sequence_mut(kind);
        if from >= seq.len() || from == to {
            return false;
        }
        let entity = seq.remove(from);
        let to = to.min(seq.len());
        seq.insert(to, entity);
        true
    }

    /// Shuffle the waiting pool in place with the given random source.
    pub fn shuffle_pooled<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pooled.shuffle(rng);
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.ranked.len() + self.pooled.len()
    }

    /// Check if both sequences are empty.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty() && self.pooled.is_empty()
    }

    /// All ids, ranked first.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ranked.iter().chain(self.pooled.iter()).map(|e| e.id)
    }

    /// All texts sorted, counted with duplicates.
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self
            .ranked
            .iter()
            .chain(self.pooled.iter())
            .map(|e| e.text.as_str())
            .collect();
        texts.sort_unstable();
        texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store_abc() -> (EntityStore, [EntityId; 3]) {
        let a = Entity::new("A");
        let b = Entity::new("B");
        let c = Entity::new("C");
        let ids = [a.id, b.id, c.id];
        (EntityStore::from_parts(vec![a, b], vec![c]), ids)
    }

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = Entity::new("same");
        let b = Entity::new("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn test_locate_and_index() {
        let (store, [a, b, c]) = store_abc();
        assert_eq!(store.locate(a), Some(SequenceKind::Ranked));
        assert_eq!(store.locate(c), Some(SequenceKind::Pooled));
        assert_eq!(store.locate(Uuid::new_v4()), None);
        assert_eq!(store.index_of(SequenceKind::Ranked, b), Some(1));
        assert_eq!(store.index_of(SequenceKind::Pooled, b), None);
    }

    #[test]
    fn test_take_and_insert() {
        let (mut store, [a, _, c]) = store_abc();
        let (kind, entity) = store.take(a).unwrap();
        assert_eq!(kind, SequenceKind::Ranked);
        assert_eq!(store.len(), 2);

        store.insert(SequenceKind::Pooled, 99, entity);
        assert_eq!(store.index_of(SequenceKind::Pooled, a), Some(1));
        assert_eq!(store.index_of(SequenceKind::Pooled, c), Some(0));
        assert!(store.take(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_move_within() {
        let a = Entity::new("A");
        let b = Entity::new("B");
        let c = Entity::new("C");
        let ids = [a.id, b.id, c.id];
        let mut store = EntityStore::from_parts(vec![a, b, c], Vec::new());

        assert!(store.move_within(SequenceKind::Ranked, 0, 2));
        let order: Vec<_> = store.ranked.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);

        assert!(!store.move_within(SequenceKind::Ranked, 1, 1));
        assert!(!store.move_within(SequenceKind::Ranked, 7, 0));
    }

    #[test]
    fn test_shuffle_keeps_entities() {
        let pooled: Vec<Entity> = (0..20).map(|i| Entity::new(i.to_string())).collect();
        let mut before: Vec<_> = pooled.iter().map(|e| e.id).collect();
        let mut store = EntityStore::from_parts(Vec::new(), pooled);

        let mut rng = StdRng::seed_from_u64(7);
        store.shuffle_pooled(&mut rng);

        let mut after: Vec<_> = store.pooled.iter().map(|e| e.id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(store.ranked.is_empty());
    }

    #[test]
    fn test_sequence_names() {
        assert_eq!(SequenceKind::from_name("ranking"), Some(SequenceKind::Ranked));
        assert_eq!(SequenceKind::from_name(SequenceKind::Pooled.name()), Some(SequenceKind::Pooled));
        assert_eq!(SequenceKind::from_name("board"), None);
        assert_eq!(SequenceKind::Ranked.other(), SequenceKind::Pooled);
    }
}
