//! Team leaderboard ranking.
//!
//! Ranks are positional: entries are stably sorted by descending
//! `total_points` and numbered from 1. Equal totals keep the order in which
//! they were handed in and still receive distinct, consecutive ranks.

use uuid::Uuid;

use crate::{models::LeaderboardEntry, scoring::ScoringError};

/// Sorts `entries` by descending total points and numbers them 1..=N.
pub fn assign_ranks(entries: &mut [LeaderboardEntry]) {
    // sort_by is stable, so ties stay in input order
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position as i32 + 1;
    }
}

/// Ranks one team's entries. Fails if any entry belongs to a different team.
pub fn rank_team(
    team_id: Uuid,
    mut entries: Vec<LeaderboardEntry>,
) -> Result<Vec<LeaderboardEntry>, ScoringError> {
    if let Some(stray) = entries.iter().find(|e| e.team_id != team_id) {
        return Err(ScoringError::ForeignEntry {
            entry_id: stray.id,
            expected: team_id,
            found: stray.team_id,
        });
    }

    assign_ranks(&mut entries);
    Ok(entries)
}

/// `(entry id, rank)` pairs ready to be written back to the store.
pub fn rank_updates(entries: &[LeaderboardEntry]) -> Vec<(Uuid, i32)> {
    entries.iter().map(|e| (e.id, e.rank)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn entry(team_id: Uuid, total_points: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            team_id,
            total_points,
            rank: 0,
            last_updated: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_ties_get_distinct_consecutive_ranks() {
        let team = Uuid::new_v4();
        let entries = vec![
            entry(team, 50),
            entry(team, 30),
            entry(team, 30),
            entry(team, 10),
        ];
        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();

        let ranked = rank_team(team, entries).unwrap();

        let ranks: Vec<i32> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        let ranked_ids: Vec<Uuid> = ranked.iter().map(|e| e.id).collect();
        assert_eq!(ranked_ids, ids);
    }

    #[test]
    fn test_sorts_descending_and_keeps_tie_order() {
        let team = Uuid::new_v4();
        let entries = vec![
            entry(team, 10),
            entry(team, 70),
            entry(team, 40),
            entry(team, 70),
            entry(team, 0),
        ];
        let first_seventy = entries[1].id;
        let second_seventy = entries[3].id;

        let ranked = rank_team(team, entries).unwrap();

        let points: Vec<i64> = ranked.iter().map(|e| e.total_points).collect();
        assert_eq!(points, vec![70, 70, 40, 10, 0]);
        assert_eq!(ranked[0].id, first_seventy);
        assert_eq!(ranked[1].id, second_seventy);

        let mut ranks: Vec<i32> = ranked.iter().map(|e| e.rank).collect();
        ranks.sort();
        assert_eq!(ranks, (1..=5).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_team() {
        let ranked = rank_team(Uuid::new_v4(), Vec::new()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rejects_entry_from_other_team() {
        let team = Uuid::new_v4();
        let other = Uuid::new_v4();
        let entries = vec![entry(team, 10), entry(other, 20)];

        let err = rank_team(team, entries).unwrap_err();
        assert!(matches!(err, ScoringError::ForeignEntry { found, .. } if found == other));
    }

    #[test]
    fn test_rank_updates_pairs_ids_with_ranks() {
        let team = Uuid::new_v4();
        let ranked = rank_team(team, vec![entry(team, 5), entry(team, 9)]).unwrap();

        let updates = rank_updates(&ranked);
        assert_eq!(updates, vec![(ranked[0].id, 1), (ranked[1].id, 2)]);
        assert_eq!(ranked[0].total_points, 9);
    }
}
