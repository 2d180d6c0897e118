//! Tournament state container and its command interface.
//!
//! The store owns the match collection, the adjustment ledger, and the
//! derived standings as one unit. Every command runs synchronously to
//! completion: mutate, recompute the whole table, notify observers. A
//! command either fully succeeds or leaves the prior state untouched.

use thiserror::Error;
use tracing::{debug, info};

use crate::backup::Snapshot;
use crate::fixtures::{self, TOTAL_MATCHDAYS};
use crate::ledger::AdjustmentLedger;
use crate::models::{Match, Team, TeamStanding};
use crate::standings::compute_standings;

/// Command failures surfaced by [`TournamentStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced match id does not exist.
    #[error("no match with id '{0}'")]
    MatchNotFound(String),
    /// Referenced team id does not exist.
    #[error("no team with id '{0}'")]
    TeamNotFound(String),
    /// A goal count was negative.
    #[error("goals must be non-negative (got {home}-{away})")]
    InvalidScore {
        /// Requested home goals.
        home: i32,
        /// Requested away goals.
        away: i32,
    },
    /// Matchday outside 1..=18.
    #[error("matchday {0} is outside 1..={TOTAL_MATCHDAYS}")]
    MatchdayOutOfRange(u32),
}

/// Notification emitted after a command has been applied.
///
/// Events own their data so observers never borrow the store; the standings
/// they need are read back through the store after the callback fires or
/// carried in the event where useful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A match result was recorded or cleared.
    ResultRecorded {
        /// Id of the mutated match.
        match_id: String,
        /// Whether the match now counts as played.
        played: bool,
    },
    /// A manual point delta was applied.
    PointsAdjusted {
        /// Team the delta applies to.
        team_id: String,
        /// Signed delta that was applied.
        delta: i32,
    },
    /// The displayed matchday changed.
    MatchdayChanged(u32),
    /// State was replaced from a snapshot.
    Restored,
    /// State was reset to a fresh campaign.
    Reset,
}

/// Callback invoked after every successful command.
pub type Observer = Box<dyn Fn(&StoreEvent)>;

/// Single-owner state container for the whole campaign.
pub struct TournamentStore {
    teams: Vec<Team>,
    matches: Vec<Match>,
    standings: Vec<TeamStanding>,
    ledger: AdjustmentLedger,
    current_matchday: u32,
    observers: Vec<Observer>,
}

impl Default for TournamentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentStore {
    /// A fresh campaign: full fixture list, empty ledger, matchday 1.
    pub fn new() -> Self {
        let teams = fixtures::teams();
        let matches = fixtures::generate_fixtures();
        let ledger = AdjustmentLedger::new();
        let standings = compute_standings(&matches, &teams, &ledger);
        Self {
            teams,
            matches,
            standings,
            ledger,
            current_matchday: 1,
            observers: Vec::new(),
        }
    }

    /// All competing teams, in display order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Full fixture list, first matchday first.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Fixtures belonging to one matchday.
    pub fn matchday_matches(&self, matchday: u32) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.matchday == matchday)
            .collect()
    }

    /// Current ranked table.
    pub fn standings(&self) -> &[TeamStanding] {
        &self.standings
    }

    /// Matchday currently in focus.
    pub fn current_matchday(&self) -> u32 {
        self.current_matchday
    }

    /// Adjustment ledger contents (read-only).
    pub fn ledger(&self) -> &AdjustmentLedger {
        &self.ledger
    }

    /// Team metadata by id.
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Register an observer invoked after every successful command.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Record (or clear) a match result.
    ///
    /// With `played` set, both goal counts must be non-negative and are
    /// stored verbatim. With `played` unset the goals are cleared to "no
    /// result", which is the undo path and distinct from recording a 0-0.
    pub fn record_result(
        &mut self,
        match_id: &str,
        home_goals: i32,
        away_goals: i32,
        played: bool,
    ) -> Result<(), StoreError> {
        if played && (home_goals < 0 || away_goals < 0) {
            return Err(StoreError::InvalidScore {
                home: home_goals,
                away: away_goals,
            });
        }
        let entry = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| StoreError::MatchNotFound(match_id.to_string()))?;

        if played {
            entry.home_score = Some(home_goals);
            entry.away_score = Some(away_goals);
        } else {
            entry.home_score = None;
            entry.away_score = None;
        }
        entry.played = played;
        debug!(match_id, home_goals, away_goals, played, "result recorded");

        self.recompute();
        self.notify(StoreEvent::ResultRecorded {
            match_id: match_id.to_string(),
            played,
        });
        Ok(())
    }

    /// Clear a recorded result, reverting the match to unplayed.
    pub fn reset_match(&mut self, match_id: &str) -> Result<(), StoreError> {
        self.record_result(match_id, 0, 0, false)
    }

    /// Apply a manual point delta to a team and re-rank the table.
    ///
    /// The delta accumulates in the ledger; the engine clamps the resulting
    /// points at zero, so docking more points than a team holds floors the
    /// row rather than going negative.
    pub fn adjust_points(&mut self, team_id: &str, delta: i32) -> Result<(), StoreError> {
        if self.team(team_id).is_none() {
            return Err(StoreError::TeamNotFound(team_id.to_string()));
        }
        self.ledger.apply(team_id, delta);
        info!(team_id, delta, total = self.ledger.get(team_id), "points adjusted");

        self.recompute();
        self.notify(StoreEvent::PointsAdjusted {
            team_id: team_id.to_string(),
            delta,
        });
        Ok(())
    }

    /// Move the matchday in focus.
    pub fn set_current_matchday(&mut self, matchday: u32) -> Result<(), StoreError> {
        if !(1..=TOTAL_MATCHDAYS).contains(&matchday) {
            return Err(StoreError::MatchdayOutOfRange(matchday));
        }
        self.current_matchday = matchday;
        self.notify(StoreEvent::MatchdayChanged(matchday));
        Ok(())
    }

    /// Replace all state from a decoded snapshot.
    ///
    /// Imported match data is authoritative; imported standings only seed
    /// the adjustment ledger, and every derived field is recomputed.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.ledger = AdjustmentLedger::seed_from_standings(&snapshot.standings);
        self.matches = snapshot.matches;
        self.current_matchday = snapshot.current_matchday.clamp(1, TOTAL_MATCHDAYS);
        info!(
            matches = self.matches.len(),
            matchday = self.current_matchday,
            "state restored from snapshot"
        );
        self.recompute();
        self.notify(StoreEvent::Restored);
    }

    /// Discard everything and start a fresh campaign.
    pub fn reset(&mut self) {
        self.matches = fixtures::generate_fixtures();
        self.ledger.clear();
        self.current_matchday = 1;
        info!("campaign reset");
        self.recompute();
        self.notify(StoreEvent::Reset);
    }

    /// Capture the current state as a snapshot for export.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.matches.clone(),
            self.standings.clone(),
            self.current_matchday,
        )
    }

    fn recompute(&mut self) {
        self.standings = compute_standings(&self.matches, &self.teams, &self.ledger);
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }
}
