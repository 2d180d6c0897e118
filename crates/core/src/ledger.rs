//! Manual point adjustments, kept separate from match results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::TeamStanding;

/// Running per-team point deltas applied on top of match results.
///
/// The ledger is owned independently of the standings table and handed to
/// every recompute; derived standings only mirror its values and are never
/// read back as the source of truth. Deltas survive any number of
/// recomputations and may reference teams that have not played yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLedger {
    deltas: BTreeMap<String, i32>,
}

impl AdjustmentLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the team's running adjustment.
    pub fn apply(&mut self, team_id: &str, delta: i32) {
        let entry = self.deltas.entry(team_id.to_string()).or_insert(0);
        *entry += delta;
        if *entry == 0 {
            self.deltas.remove(team_id);
        }
    }

    /// Current adjustment for a team, zero when none has been recorded.
    pub fn get(&self, team_id: &str) -> i32 {
        self.deltas.get(team_id).copied().unwrap_or(0)
    }

    /// Drop every recorded delta.
    pub fn clear(&mut self) {
        self.deltas.clear();
    }

    /// True when no team carries an adjustment.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Rebuild the ledger from the adjustment column of imported standings.
    ///
    /// Used when restoring a backup: the snapshot's derived fields are
    /// recomputed from its match data, but its adjustment column is the only
    /// record of manual deltas and seeds the new ledger.
    pub fn seed_from_standings(standings: &[TeamStanding]) -> Self {
        let mut ledger = Self::new();
        for standing in standings {
            if standing.manual_adjustment != 0 {
                ledger.apply(&standing.team, standing.manual_adjustment);
            }
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_accumulate_per_team() {
        let mut ledger = AdjustmentLedger::new();
        ledger.apply("peru", -3);
        ledger.apply("peru", 1);
        ledger.apply("chile", 2);
        assert_eq!(ledger.get("peru"), -2);
        assert_eq!(ledger.get("chile"), 2);
        assert_eq!(ledger.get("bolivia"), 0);
    }

    #[test]
    fn cancelled_delta_leaves_no_entry() {
        let mut ledger = AdjustmentLedger::new();
        ledger.apply("uruguay", -2);
        ledger.apply("uruguay", 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn seeding_skips_zero_adjustments() {
        let mut with_delta = TeamStanding::zeroed("argentina", -5);
        with_delta.points = 10;
        let without = TeamStanding::zeroed("brasil", 0);

        let ledger = AdjustmentLedger::seed_from_standings(&[with_delta, without]);
        assert_eq!(ledger.get("argentina"), -5);
        assert_eq!(ledger.get("brasil"), 0);
        assert!(!ledger.is_empty());
    }
}
