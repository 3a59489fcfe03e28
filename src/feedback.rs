//! Feedback entries and id generation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Lowest selectable rating
pub const MIN_RATING: u8 = 1;
/// Highest selectable rating
pub const MAX_RATING: u8 = 10;

/// A rating in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const LOWEST: Rating = Rating(MIN_RATING);

    /// Returns `None` when `value` is outside `1..=10`
    pub fn new(value: u8) -> Option<Self> {
        (MIN_RATING..=MAX_RATING)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every selectable rating, lowest first
    pub fn all() -> impl Iterator<Item = Rating> {
        (MIN_RATING..=MAX_RATING).map(Rating)
    }

    /// Next rating up, stopping at 10
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1).min(MAX_RATING))
    }

    /// Next rating down, stopping at 1
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(MIN_RATING))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Rating::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "rating {value} out of range {MIN_RATING}..={MAX_RATING}"
            ))
        })
    }
}

/// One submitted review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Creation time in milliseconds, unique within a list
    pub id: u64,
    pub rating: Rating,
    pub feedback: String,
}

/// Hands out strictly increasing millisecond ids.
///
/// Ids follow wall-clock time but never repeat: two submissions inside the
/// same millisecond get consecutive values. Once `u64::MAX` has been handed
/// out the generator is exhausted and returns `None`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Start after the largest id already present in `entries`
    pub fn seeded_from(entries: &[FeedbackEntry]) -> Self {
        Self {
            last: entries.iter().map(|e| e.id).max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self) -> Option<u64> {
        self.next_at(current_timestamp_millis())
    }

    fn next_at(&mut self, now: u64) -> Option<u64> {
        let id = now.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

/// Get current Unix timestamp in milliseconds
fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(11).is_none());
        assert_eq!(Rating::new(1).map(Rating::get), Some(1));
        assert_eq!(Rating::new(10).map(Rating::get), Some(10));
        assert_eq!(Rating::all().count(), 10);
    }

    #[test]
    fn test_rating_step_clamps() {
        let ten = Rating::new(10).unwrap();
        let one = Rating::new(1).unwrap();
        assert_eq!(ten.increment(), ten);
        assert_eq!(one.decrement(), one);
        assert_eq!(one.increment().get(), 2);
    }

    #[test]
    fn test_rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("11").is_err());
        assert!(serde_json::from_str::<Rating>("-3").is_err());
        assert_eq!(serde_json::from_str::<Rating>("7").unwrap().get(), 7);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = FeedbackEntry {
            id: 1_700_000_000_000,
            rating: Rating::new(8).unwrap(),
            feedback: "Great service".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"rating":8,"feedback":"Great service"}"#
        );
    }

    #[test]
    fn test_ids_strictly_increase_within_same_millisecond() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(1000), Some(1000));
        assert_eq!(ids.next_at(1000), Some(1001));
        assert_eq!(ids.next_at(999), Some(1002));
        assert_eq!(ids.next_at(5000), Some(5000));
    }

    #[test]
    fn test_seeded_generator_skips_existing_ids() {
        let entries = vec![FeedbackEntry {
            id: u64::MAX - 1,
            rating: Rating::new(5).unwrap(),
            feedback: "future".to_string(),
        }];
        let mut ids = IdGenerator::seeded_from(&entries);
        assert_eq!(ids.next_id(), Some(u64::MAX));
    }

    #[test]
    fn test_exhausted_generator_never_repeats() {
        let entries = vec![FeedbackEntry {
            id: u64::MAX,
            rating: Rating::new(5).unwrap(),
            feedback: "last".to_string(),
        }];
        let mut ids = IdGenerator::seeded_from(&entries);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_at(u64::MAX), None);
    }
}
