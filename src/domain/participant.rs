// ============================================================================
// Participant Domain Model
// ============================================================================

use crate::index::{KeyComparator, Matchable};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticipantId(u64);

impl ParticipantId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sorted, deduplicated string set. Most participants carry a handful of tags.
pub type TagSet = SmallVec<[String; 4]>;

// ============================================================================
// Participant Entity
// ============================================================================

/// One waiting (or being-matched) requester.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Participant {
    id: ParticipantId,
    rating: u64,
    /// What this participant offers about itself
    attributes: TagSet,
    /// What this participant refuses to see in a peer's attributes
    exclusions: TagSet,
}

impl Participant {
    pub fn new<A, E>(id: ParticipantId, rating: u64, attributes: A, exclusions: E) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            id,
            rating,
            attributes: normalize(attributes),
            exclusions: normalize(exclusions),
        }
    }

    #[inline]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[inline]
    pub fn rating(&self) -> u64 {
        self.rating
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub(crate) fn set_rating(&mut self, rating: u64) {
        self.rating = rating;
    }

    /// Signed rating distance `peer - self`, zero for the same identity.
    pub fn distance(&self, peer: &Participant) -> i128 {
        if self.id == peer.id {
            return 0;
        }
        i128::from(peer.rating) - i128::from(self.rating)
    }

    /// Absolute rating distance, zero for the same identity.
    pub fn rating_gap(&self, peer: &Participant) -> u64 {
        if self.id == peer.id {
            return 0;
        }
        self.rating.abs_diff(peer.rating)
    }

    /// Number of this participant's attributes that `peer` excludes.
    pub fn conflicts(&self, peer: &Participant) -> usize {
        sorted_intersection_len(&self.attributes, &peer.exclusions)
    }
}

impl Matchable for Participant {
    /// Within `limit` and no exclusion hit in either direction.
    fn is_compatible(&self, peer: &Self, limit: u64) -> bool {
        if self.rating_gap(peer) > limit {
            return false;
        }
        self.conflicts(peer) == 0 && peer.conflicts(self) == 0
    }
}

// ============================================================================
// Order Relation
// ============================================================================

/// Index order: same id is `Equal`; otherwise rating ascending, then id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingOrder;

impl KeyComparator<Participant> for RatingOrder {
    fn compare(&self, a: &Participant, b: &Participant) -> Ordering {
        if a.id == b.id {
            return Ordering::Equal;
        }
        a.rating.cmp(&b.rating).then(a.id.cmp(&b.id))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn normalize<I>(values: I) -> TagSet
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut set: TagSet = values.into_iter().map(Into::into).collect();
    set.sort_unstable();
    set.dedup();
    set
}

fn sorted_intersection_len(a: &[String], b: &[String]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            },
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    fn participant(id: u64, rating: u64, attrs: &[&str], excl: &[&str]) -> Participant {
        Participant::new(
            ParticipantId::new(id),
            rating,
            attrs.iter().copied(),
            excl.iter().copied(),
        )
    }

    #[test]
    fn test_tags_sorted_and_deduplicated() {
        let p = participant(1, 10, &["b", "a", "b", "c"], &["z", "y", "z"]);
        assert_eq!(p.attributes(), &["a", "b", "c"]);
        assert_eq!(p.exclusions(), &["y", "z"]);
    }

    #[test]
    fn test_distance() {
        let a = participant(1, 100, &[], &[]);
        let b = participant(2, 130, &[], &[]);
        assert_eq!(a.distance(&b), 30);
        assert_eq!(b.distance(&a), -30);
        assert_eq!(a.rating_gap(&b), 30);

        // Same identity is always zero, whatever the ratings
        let a_later = participant(1, 900, &[], &[]);
        assert_eq!(a.distance(&a_later), 0);
        assert_eq!(a.rating_gap(&a_later), 0);
    }

    #[test]
    fn test_distance_full_range() {
        let low = participant(1, 0, &[], &[]);
        let high = participant(2, u64::MAX, &[], &[]);
        assert_eq!(low.distance(&high), i128::from(u64::MAX));
        assert_eq!(low.rating_gap(&high), u64::MAX);
    }

    #[test]
    fn test_conflicts() {
        let a = participant(1, 0, &["eu", "smurf", "voice"], &[]);
        let b = participant(2, 0, &[], &["smurf", "voice", "x"]);
        assert_eq!(a.conflicts(&b), 2);
        assert_eq!(b.conflicts(&a), 0);
    }

    #[test]
    fn test_order_relation() {
        let order = RatingOrder;
        let a = participant(1, 100, &[], &[]);
        let b = participant(2, 100, &[], &[]);
        let c = participant(3, 50, &[], &[]);

        assert_eq!(order.compare(&a, &b), Ordering::Less);
        assert_eq!(order.compare(&b, &a), Ordering::Greater);
        assert_eq!(order.compare(&c, &a), Ordering::Less);

        // Identity equality overrides rating
        let a_refreshed = participant(1, 5_000, &["x"], &[]);
        assert_eq!(order.compare(&a, &a_refreshed), Ordering::Equal);
    }

    #[test]
    fn test_match_rule() {
        let a = participant(1, 500, &["smurf"], &[]);
        let b = participant(2, 505, &[], &["smurf"]);
        let c = participant(3, 505, &[], &[]);

        assert!(!a.is_compatible(&b, 100));
        assert!(!b.is_compatible(&a, 100));
        assert!(a.is_compatible(&c, 5));
        assert!(!a.is_compatible(&c, 4));
    }

    fn tags(raw: &[u8]) -> Vec<String> {
        raw.iter().map(|b| format!("t{}", b % 6)).collect()
    }

    #[test]
    fn test_match_rule_is_symmetric() {
        fn prop(
            ratings: (u64, u64),
            attrs: (Vec<u8>, Vec<u8>),
            excl: (Vec<u8>, Vec<u8>),
            limit: u64,
        ) -> TestResult {
            let a = Participant::new(ParticipantId::new(1), ratings.0, tags(&attrs.0), tags(&excl.0));
            let b = Participant::new(ParticipantId::new(2), ratings.1, tags(&attrs.1), tags(&excl.1));
            TestResult::from_bool(a.is_compatible(&b, limit) == b.is_compatible(&a, limit))
        }
        quickcheck(prop as fn((u64, u64), (Vec<u8>, Vec<u8>), (Vec<u8>, Vec<u8>), u64) -> TestResult);
    }

    #[test]
    fn test_id_conversions() {
        let id: ParticipantId = 42u64.into();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
