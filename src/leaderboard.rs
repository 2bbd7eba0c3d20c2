use std::cmp::Ordering;

use rocket::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::database::Score;

/// Scores of a single level, best time first. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Leaderboard {
    collection: Vec<Score>,
}

impl Leaderboard {
    /// Builds a leaderboard from scores in any order, so rows that arrive
    /// already ranked and rows read back from JSON end up ordered the same way.
    /// The sort is stable, so equal times keep their relative order.
    pub fn new(mut collection: Vec<Score>) -> Self {
        collection.sort_by(compare_times);
        Self { collection }
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }
}

fn compare_times(a: &Score, b: &Score) -> Ordering {
    a.time.total_cmp(&b.time)
}

impl Serialize for Leaderboard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.collection.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(Vec::deserialize(deserializer)?))
    }
}
