//! # Sorted Set
//!
//! A score-ordered collection of members. Mutations are cheap (a map
//! insert); the ordered view and per-member ranks are recomputed lazily,
//! amortizing sort cost across a batch of `add`s followed by reads.
use float_ord::FloatOrd;
use parking_lot::RwLock;

/// A single member of a [`SortedSet`], with its score and its last-computed
/// rank.
///
/// `rank` is only meaningful immediately after a sort; callers reach it
/// through [`SortedSet::get`] or [`SortedSet::rank`], which force a re-sort
/// first if the set is dirty.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSetEntry {
    member: String,
    score: f64,
    rank: i64,
}

impl SortedSetEntry {
    /// The member's identity.
    pub fn member(&self) -> &str {
        &self.member
    }

    /// The member's current score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The member's 0-based position the last time the set was sorted.
    pub fn rank(&self) -> i64 {
        self.rank
    }
}

#[derive(Debug, Default)]
struct Inner {
    members: std::collections::HashMap<String, f64>,
    order: Vec<String>,
    dirty: bool,
}

impl Inner {
    fn resort(&mut self) {
        if !self.dirty {
            return;
        }

        let members = &self.members;
        self.order.sort_by_key(|member| (FloatOrd(members[member]), member.clone()));
        self.dirty = false;
    }

    fn entry_at(&self, index: usize) -> Option<SortedSetEntry> {
        self.order.get(index).map(|member| SortedSetEntry {
            member: member.clone(),
            score: self.members[member],
            rank: index as i64,
        })
    }
}

/// A score-ordered set of members, safe to share across threads.
///
/// Ties in score are broken lexicographically by member name. See the
/// module documentation for the re-sort discipline.
#[derive(Debug, Default)]
pub struct SortedSet {
    inner: RwLock<Inner>,
}

impl SortedSet {
    /// Creates a new, empty sorted set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `member` with `score`, or updates its score if already
    /// present. Returns `true` only when `member` was not already a member
    /// of the set.
    pub fn add(&self, member: &str, score: f64) -> bool {
        let mut inner = self.inner.write();
        match inner.members.get(member).copied() {
            Some(existing) if existing == score => false,
            Some(_) => {
                inner.members.insert(member.to_owned(), score);
                inner.dirty = true;
                false
            }
            None => {
                inner.members.insert(member.to_owned(), score);
                inner.order.push(member.to_owned());
                inner.dirty = true;
                true
            }
        }
    }

    /// Number of members currently in the set.
    pub fn len(&self) -> usize {
        self.inner.read().members.len()
    }

    /// Whether the set holds no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry at `index` in sorted order, forcing a re-sort first
    /// if the set is dirty.
    pub fn get(&self, index: usize) -> Option<SortedSetEntry> {
        let mut inner = self.inner.write();
        inner.resort();
        inner.entry_at(index)
    }

    /// Returns the 0-based rank of `member`, or `-1` if it is absent.
    /// Forces a re-sort first if the set is dirty.
    pub fn rank(&self, member: &str) -> i64 {
        let mut inner = self.inner.write();
        if !inner.members.contains_key(member) {
            return -1;
        }
        inner.resort();
        inner
            .order
            .iter()
            .position(|m| m == member)
            .map(|p| p as i64)
            .unwrap_or(-1)
    }

    /// Returns the score currently assigned to `member`, if any.
    pub fn score_of(&self, member: &str) -> Option<f64> {
        self.inner.read().members.get(member).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_insert_vs_update() {
        let set = SortedSet::new();
        assert!(set.add("one", 1.0));
        assert!(!set.add("one", 1.0));
        assert!(!set.add("one", 2.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sorted_by_score_then_member() {
        let set = SortedSet::new();
        set.add("five", 5.0);
        set.add("one", 1.0);
        set.add("three", 3.0);
        set.add("four", 4.0);
        set.add("two", 2.0);

        let ordered: Vec<_> = (0..set.len())
            .map(|i| set.get(i).unwrap().member().to_owned())
            .collect();
        assert_eq!(ordered, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn tie_break_is_lexicographic() {
        let set = SortedSet::new();
        set.add("b", 1.0);
        set.add("a", 1.0);
        assert_eq!(set.get(0).unwrap().member(), "a");
        assert_eq!(set.get(1).unwrap().member(), "b");
    }

    #[test]
    fn rank_reflects_last_sort() {
        let set = SortedSet::new();
        set.add("a", 5.0);
        set.add("b", 1.0);
        assert_eq!(set.rank("b"), 0);
        assert_eq!(set.rank("a"), 1);
        assert_eq!(set.rank("missing"), -1);
    }

    #[test]
    fn update_score_can_reorder() {
        let set = SortedSet::new();
        set.add("one", 1.0);
        set.add("two", 2.0);
        set.add("three", 3.0);
        assert!(!set.add("one", 2.5));

        let ordered: Vec<_> = (0..set.len())
            .map(|i| set.get(i).unwrap().member().to_owned())
            .collect();
        assert_eq!(ordered, vec!["two", "one", "three"]);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let set = SortedSet::new();
        set.add("one", 1.0);
        assert!(set.get(5).is_none());
    }
}
