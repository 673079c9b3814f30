//! Uniqueness suffixes for fixture natural keys.
//!
//! The admin API under test is never reset between runs, so every
//! store-front name and customer first name carries a tag that differs
//! from run to run.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

/// Time-derived tag: Unix seconds followed by a random 4-digit tail.
///
/// The tail keeps two tags minted within the same second apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniqueTag {
    seconds: i64,
    tail: u16,
}

impl UniqueTag {
    /// Exclusive upper bound of the random tail.
    const TAIL_RANGE: u16 = 10_000;

    /// Mint a tag from the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now(), &mut rand::rng())
    }

    /// Mint a tag for a given instant.
    pub fn at<R: Rng>(instant: DateTime<Utc>, rng: &mut R) -> Self {
        Self {
            seconds: instant.timestamp(),
            tail: rng.random_range(0..Self::TAIL_RANGE),
        }
    }

    /// Unix seconds the tag was minted at.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }
}

impl fmt::Display for UniqueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.seconds, self.tail)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_display_pads_tail() {
        let instant = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let tag = UniqueTag::at(instant, &mut StdRng::seed_from_u64(1));
        let rendered = tag.to_string();
        assert_eq!(rendered.len(), 14);
        assert!(rendered.starts_with("1700000000"));
        assert!(rendered.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_same_second_tags_differ() {
        let instant = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let tags: Vec<_> = (0..5).map(|_| UniqueTag::at(instant, &mut rng)).collect();
        assert!(tags.iter().all(|t| t.seconds() == 1_700_000_000));
        assert!(tags.iter().any(|t| t.to_string() != tags[0].to_string()));
    }
}
