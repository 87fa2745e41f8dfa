//! One row of match data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single completed match.
///
/// Records are immutable once loaded. `date` is `None` when the source row
/// had no date or one that could not be parsed; such records never reach a
/// graph because they belong to no calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Tournament name (e.g. `"Wimbledon"`).
    pub tournament: String,
    /// Tournament category or series (e.g. `"Grand Slam"`), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// First named player.
    pub player_a: String,
    /// Second named player.
    pub player_b: String,
    /// Winner; expected to equal `player_a` or `player_b`.
    pub winner: String,
    /// Match date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Rank of `player_a` at match time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_a: Option<u32>,
    /// Rank of `player_b` at match time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_b: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    /// 1-based line in the source file, when loaded from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

/// Which side of a record a player appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl MatchRecord {
    /// Creates a record with only the fields the graph builder needs.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rally_core::MatchRecord;
    ///
    /// let record = MatchRecord::new("A", "B", "A", NaiveDate::from_ymd_opt(2023, 1, 15));
    /// assert_eq!(record.year(), Some(2023));
    /// ```
    pub fn new(
        player_a: impl Into<String>,
        player_b: impl Into<String>,
        winner: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            tournament: String::new(),
            category: None,
            player_a: player_a.into(),
            player_b: player_b.into(),
            winner: winner.into(),
            date,
            rank_a: None,
            rank_b: None,
            surface: None,
            round: None,
            line: None,
        }
    }

    #[must_use]
    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = tournament.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_ranks(mut self, rank_a: Option<u32>, rank_b: Option<u32>) -> Self {
        self.rank_a = rank_a;
        self.rank_b = rank_b;
        self
    }

    /// Calendar year of the match, if the date is known.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Returns the side the winner is on, or `None` if the winner is neither
    /// named player or any of the three identifiers is blank.
    ///
    /// When both players share the winner's identifier, side A is reported.
    #[must_use]
    pub fn winner_side(&self) -> Option<Side> {
        if [&self.player_a, &self.player_b, &self.winner]
            .iter()
            .any(|id| id.is_empty())
        {
            None
        } else if self.winner == self.player_a {
            Some(Side::A)
        } else if self.winner == self.player_b {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Returns `(winner, loser)` with their ranks, or `None` when
    /// [`winner_side`](Self::winner_side) cannot place the winner.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome<'_>> {
        self.winner_side().map(|side| match side {
            Side::A => Outcome {
                winner: &self.player_a,
                loser: &self.player_b,
                winner_rank: self.rank_a,
                loser_rank: self.rank_b,
            },
            Side::B => Outcome {
                winner: &self.player_b,
                loser: &self.player_a,
                winner_rank: self.rank_b,
                loser_rank: self.rank_a,
            },
        })
    }
}

/// Winner and loser of a well-formed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
    pub winner_rank: Option<u32>,
    pub loser_rank: Option<u32>,
}
