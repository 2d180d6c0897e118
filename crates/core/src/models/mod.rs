//! Shared domain models.
//!
//! Every serialized structure uses camelCase field names so that snapshots
//! remain byte-compatible with backups produced by the original web app.

use serde::{Deserialize, Serialize};

/// One of the ten competing national sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Short identifier (e.g. `argentina`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Flag glyph shown next to the name.
    pub flag: String,
}

/// Result of a single match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Won the match.
    #[serde(rename = "W")]
    Win,
    /// Drew the match.
    #[serde(rename = "D")]
    Draw,
    /// Lost the match.
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    /// Single-letter glyph used in form columns.
    pub fn glyph(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }
}

/// A fixture, optionally carrying a recorded result.
///
/// Scores are present iff `played` is true: an unplayed match has no score,
/// which is distinct from a recorded 0-0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Stable identifier (`match-1` .. `match-90`).
    pub id: String,
    /// Home side team id.
    pub home_team: String,
    /// Away side team id.
    pub away_team: String,
    /// Goals scored by the home side, set once the match is played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    /// Goals scored by the away side, set once the match is played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
    /// Round this fixture belongs to (1..=18).
    pub matchday: u32,
    /// Whether a result has been recorded.
    pub played: bool,
}

impl Match {
    /// Construct an unplayed fixture.
    pub fn new(id: String, home_team: &str, away_team: &str, matchday: u32) -> Self {
        Self {
            id,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: None,
            away_score: None,
            matchday,
            played: false,
        }
    }

    /// Returns the recorded score pair when the match has been played.
    pub fn score(&self) -> Option<(i32, i32)> {
        match (self.played, self.home_score, self.away_score) {
            (true, Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// True when the given team plays in this fixture, home or away.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team == team_id || self.away_team == team_id
    }
}

/// A team's aggregated record, fully re-derived on every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    /// Team id this row belongs to.
    pub team: String,
    /// Matches played.
    pub played: u32,
    /// Matches won.
    pub won: u32,
    /// Matches drawn.
    pub drawn: u32,
    /// Matches lost.
    pub lost: u32,
    /// Goals scored.
    pub goals_for: i32,
    /// Goals conceded.
    pub goals_against: i32,
    /// `goals_for - goals_against`.
    pub goal_difference: i32,
    /// `3 * won + drawn + manual adjustment`, clamped at zero.
    pub points: i32,
    /// Up to five most recent outcomes, most recent first.
    pub last_five: Vec<Outcome>,
    /// Out-of-band point delta applied on top of match results.
    #[serde(default, rename = "manualPointsAdjustment")]
    pub manual_adjustment: i32,
}

impl TeamStanding {
    /// A zeroed row for the given team, seeded with a manual adjustment.
    pub fn zeroed(team_id: &str, manual_adjustment: i32) -> Self {
        Self {
            team: team_id.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            last_five: Vec::new(),
            manual_adjustment,
        }
    }
}
