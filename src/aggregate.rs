//! Average rating over the feedback list.

use std::fmt;

use crate::feedback::FeedbackEntry;

/// Placeholder shown when there is nothing to average
pub const EMPTY_AVERAGE: &str = "N/A";

/// Result of averaging: either a number or nothing to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    /// Mean rating rounded to one decimal place
    Value(f64),
    /// The list is empty
    Empty,
}

impl Average {
    pub fn value(self) -> Option<f64> {
        match self {
            Average::Value(v) => Some(v),
            Average::Empty => None,
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Value(v) => write!(f, "{:.1}", v),
            Average::Empty => f.write_str(EMPTY_AVERAGE),
        }
    }
}

/// Mean of all ratings, rounded to one decimal place
pub fn average(entries: &[FeedbackEntry]) -> Average {
    if entries.is_empty() {
        return Average::Empty;
    }

    let sum: u64 = entries.iter().map(|e| u64::from(e.rating.get())).sum();
    let mean = sum as f64 / entries.len() as f64;
    Average::Value((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Rating;

    fn entries(ratings: &[u8]) -> Vec<FeedbackEntry> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| FeedbackEntry {
                id: i as u64,
                rating: Rating::new(r).unwrap(),
                feedback: format!("entry {i}"),
            })
            .collect()
    }

    #[test]
    fn test_empty_is_sentinel() {
        let avg = average(&[]);
        assert_eq!(avg, Average::Empty);
        assert_eq!(avg.value(), None);
        assert_eq!(avg.to_string(), "N/A");
    }

    #[test]
    fn test_simple_mean() {
        let avg = average(&entries(&[5, 7]));
        assert_eq!(avg, Average::Value(6.0));
        assert_eq!(avg.to_string(), "6.0");
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 5 / 3 = 1.666..
        let avg = average(&entries(&[1, 2, 2]));
        assert_eq!(avg, Average::Value(1.7));
        assert_eq!(avg.to_string(), "1.7");
    }

    #[test]
    fn test_half_rounds_up() {
        // 29 / 20 = 1.45
        let mut ratings = vec![1; 11];
        ratings.extend([2; 9]);
        assert_eq!(ratings.iter().map(|&r| u32::from(r)).sum::<u32>(), 29);
        assert_eq!(average(&entries(&ratings)).to_string(), "1.5");
    }

    #[test]
    fn test_single_entry() {
        assert_eq!(average(&entries(&[10])).to_string(), "10.0");
    }
}
