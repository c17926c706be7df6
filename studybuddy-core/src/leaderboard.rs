use serde::Serialize;

use crate::levels::{LevelInfo, level_for};

/// One user's standing as read from the store, in (xp desc, identity asc) order.
#[derive(Clone, Debug)]
pub struct Standing {
    pub username: String,
    pub avatar: String,
    pub xp: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub avatar: String,
    pub xp: i64,
    pub level: LevelInfo,
}

/// Assign competition ("1224") ranks and truncate to `limit`.
///
/// Users with equal XP share a rank; the next distinct XP value takes the
/// rank equal to its 1-based position, so ties do not compress what follows.
/// The sort is stable, so the store's identity order breaks ties
/// deterministically.
pub fn rank_standings(mut standings: Vec<Standing>, limit: usize) -> Vec<LeaderboardEntry> {
    standings.sort_by(|a, b| b.xp.cmp(&a.xp));

    let mut entries = Vec::with_capacity(standings.len());
    let mut rank = 0;
    let mut previous_xp = None;
    for (idx, standing) in standings.into_iter().enumerate() {
        if previous_xp != Some(standing.xp) {
            rank = idx + 1;
            previous_xp = Some(standing.xp);
        }
        entries.push(LeaderboardEntry {
            rank,
            level: level_for(standing.xp),
            username: standing.username,
            avatar: standing.avatar,
            xp: standing.xp,
        });
    }

    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::{Standing, rank_standings};

    fn standing(username: &str, xp: i64) -> Standing {
        Standing {
            username: username.to_owned(),
            avatar: "🧠".to_owned(),
            xp,
        }
    }

    #[test]
    fn ties_share_a_rank_and_do_not_compress() {
        let entries = rank_standings(
            vec![
                standing("a", 100),
                standing("b", 100),
                standing("c", 100),
                standing("d", 40),
            ],
            20,
        );

        let ranks: Vec<usize> = entries.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, vec![1, 1, 1, 4]);
    }

    #[test]
    fn equal_xp_keeps_input_order() {
        let entries = rank_standings(vec![standing("older", 50), standing("newer", 50)], 20);
        assert_eq!(entries[0].username, "older");
        assert_eq!(entries[1].username, "newer");
    }

    #[test]
    fn ranking_is_deterministic() {
        let rows = vec![
            standing("a", 10),
            standing("b", 300),
            standing("c", 300),
            standing("d", 0),
        ];
        let first = rank_standings(rows.clone(), 10);
        let second = rank_standings(rows, 10);

        let names = |entries: &[super::LeaderboardEntry]| {
            entries
                .iter()
                .map(|entry| (entry.rank, entry.username.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn truncates_after_ranking() {
        let entries = rank_standings(
            vec![standing("a", 90), standing("b", 90), standing("c", 10)],
            2,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 1);
    }

    #[test]
    fn entries_carry_level_info() {
        let entries = rank_standings(vec![standing("a", 400)], 5);
        assert_eq!(entries[0].level.name, "Gold");
    }
}
