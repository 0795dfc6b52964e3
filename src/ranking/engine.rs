use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use log::debug;

use crate::config::settings::RankingSettings;
use crate::domain::{PlayerId, PlayerStats, RankingEntry};
use crate::errors::RankingError;
use crate::ranking::stats::compute_stats;
use crate::store::MatchStore;

/// Ranked output, with or without the internal scores.
#[derive(Debug, Clone, PartialEq)]
pub enum Rankings {
    Players(Vec<PlayerId>),
    WithScores(Vec<RankingEntry>),
}

/// Rank the active roster, best player first.
pub fn get_rankings<S: MatchStore>(
    store: &S,
    settings: &RankingSettings,
    include_scores: bool,
) -> Result<Rankings> {
    let entries = rank_players(store, settings)?;
    if include_scores {
        Ok(Rankings::WithScores(entries))
    } else {
        Ok(Rankings::Players(entries.into_iter().map(|e| e.player_id).collect()))
    }
}

/// Full ranking pass: base scores from overall statistics, head-to-head
/// resolution for every score bucket of 2+, then a final stable sort
/// descending by (score, grade). Grade is the coarse last-resort tie-break
/// for players no head-to-head data can separate.
pub fn rank_players<S: MatchStore>(
    store: &S,
    settings: &RankingSettings,
) -> Result<Vec<RankingEntry>> {
    let players = store.list_active_players()?;

    let mut grades: HashMap<PlayerId, i32> = HashMap::new();
    let mut buckets = ScoreBuckets::default();
    for player in &players {
        grades.insert(player.id, player.grade);
        let stats = compute_stats(store, player.id, None)?;
        buckets.push(base_score(&stats, settings), player.id);
    }

    // Resolved bucket members move to base + k * increment pseudo-buckets.
    // Walking the resolved order worst to best leaves the best player with
    // the highest sub-score once everything is sorted descending.
    let mut depths: HashMap<PlayerId, usize> = HashMap::new();
    for (score, members) in buckets.tied_buckets() {
        debug!("Resolving {} players tied at {}", members.len(), score);
        if let Some(resolution) = resolve_tie_at(store, &members, 0, settings)? {
            let mut sub_score = score;
            for &id in resolution.order.iter().rev() {
                sub_score += settings.bucket_increment;
                buckets.relocate(score, id, sub_score);
                depths.insert(id, resolution.depth_used + 1);
            }
        }
    }

    let mut rows: Vec<(PlayerId, f64, i32)> = Vec::new();
    for (score, members) in buckets.iter() {
        for &id in members {
            rows.push((id, score, grades.get(&id).copied().unwrap_or(0)));
        }
    }
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.2.cmp(&a.2)));

    Ok(rows
        .into_iter()
        .map(|(id, score, _)| RankingEntry {
            player_id: id,
            score,
            tie_break_depth: depths.get(&id).copied().unwrap_or(0),
        })
        .collect())
}

/// Order a set of tied players by head-to-head results, or `None` when no
/// further data distinguishes them. "No games played between them" and
/// "perfectly even head-to-head" are indistinguishable; both are `None`.
pub fn resolve_tie<S: MatchStore>(
    store: &S,
    players: &[PlayerId],
    settings: &RankingSettings,
) -> Result<Option<Vec<PlayerId>>> {
    Ok(resolve_tie_at(store, players, 0, settings)?.map(|r| r.order))
}

struct Resolution {
    order: Vec<PlayerId>,
    /// Deepest group-recursion level that contributed to the order.
    depth_used: usize,
}

fn resolve_tie_at<S: MatchStore>(
    store: &S,
    players: &[PlayerId],
    depth: usize,
    settings: &RankingSettings,
) -> Result<Option<Resolution>> {
    match players {
        [] => Err(RankingError::EmptyPlayerSet.into()),
        [only] => Ok(Some(Resolution { order: vec![*only], depth_used: depth })),
        [a, b] => Ok(resolve_pair(store, *a, *b)?.map(|order| Resolution { order, depth_used: depth })),
        _ => resolve_group(store, players, depth, settings),
    }
}

/// Two tied players: whoever leads the head-to-head record wins the spot.
fn resolve_pair<S: MatchStore>(
    store: &S,
    a: PlayerId,
    b: PlayerId,
) -> Result<Option<Vec<PlayerId>>> {
    let head_to_head = compute_stats(store, a, Some(&[b]))?;
    match head_to_head.wins().cmp(&head_to_head.losses()) {
        Ordering::Greater => Ok(Some(vec![a, b])),
        Ordering::Less => Ok(Some(vec![b, a])),
        Ordering::Equal => Ok(None),
    }
}

/// Three or more tied players: score each one over their games against the
/// rest of the set combined, then recursively split the local-score buckets
/// that are still shared. Group recursion stops at the configured ceiling;
/// whatever is still tied past it stays tied.
fn resolve_group<S: MatchStore>(
    store: &S,
    players: &[PlayerId],
    depth: usize,
    settings: &RankingSettings,
) -> Result<Option<Resolution>> {
    let mut buckets = ScoreBuckets::default();
    for &player in players {
        let rivals: Vec<PlayerId> =
            players.iter().copied().filter(|&other| other != player).collect();
        let restricted = compute_stats(store, player, Some(&rivals))?;
        buckets.push(score_ratio(&restricted), player);
    }

    let mut depth_used = depth;
    for (score, members) in buckets.tied_buckets() {
        if members.len() == 2 {
            if let Some(order) = resolve_pair(store, members[0], members[1])? {
                buckets.relocate(score, order[0], score + settings.bucket_increment);
            }
        } else if depth < settings.group_recursion_ceiling {
            if let Some(resolution) = resolve_group(store, &members, depth + 1, settings)? {
                let mut sub_score = score;
                for &id in resolution.order.iter().rev() {
                    sub_score += settings.nested_increment;
                    buckets.relocate(score, id, sub_score);
                }
                depth_used = depth_used.max(resolution.depth_used);
            }
        }
    }

    if buckets.distinct_scores() > 1 {
        let mut rows = buckets.flatten();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(Some(Resolution {
            order: rows.into_iter().map(|(id, _)| id).collect(),
            depth_used,
        }))
    } else {
        Ok(None)
    }
}

/// Overall score: win ratio minus loss ratio, rounded for bucketing.
/// Stalemates and draws inflate the total without feeding either ratio,
/// diluting the score toward zero.
fn base_score(stats: &PlayerStats, settings: &RankingSettings) -> f64 {
    round_to(score_ratio(stats), settings.score_decimals)
}

fn score_ratio(stats: &PlayerStats) -> f64 {
    if stats.total == 0 {
        return 0.0;
    }
    let total = f64::from(stats.total);
    f64::from(stats.wins()) / total - f64::from(stats.losses()) / total
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Insertion-ordered score buckets. Scores in one pass come out of the same
/// computation, so exact float equality is the intended grouping key, and
/// insertion order keeps irresolvable ties stable.
#[derive(Default)]
struct ScoreBuckets {
    buckets: Vec<(f64, Vec<PlayerId>)>,
}

impl ScoreBuckets {
    fn push(&mut self, score: f64, player: PlayerId) {
        match self.buckets.iter_mut().find(|(s, _)| *s == score) {
            Some((_, members)) => members.push(player),
            None => self.buckets.push((score, vec![player])),
        }
    }

    fn relocate(&mut self, from: f64, player: PlayerId, to: f64) {
        if let Some((_, members)) = self.buckets.iter_mut().find(|(s, _)| *s == from) {
            members.retain(|&id| id != player);
        }
        self.push(to, player);
    }

    fn tied_buckets(&self) -> Vec<(f64, Vec<PlayerId>)> {
        self.buckets
            .iter()
            .filter(|(_, members)| members.len() >= 2)
            .cloned()
            .collect()
    }

    fn distinct_scores(&self) -> usize {
        self.buckets.iter().filter(|(_, members)| !members.is_empty()).count()
    }

    fn iter(&self) -> impl Iterator<Item = (f64, &Vec<PlayerId>)> {
        self.buckets.iter().map(|(score, members)| (*score, members))
    }

    fn flatten(&self) -> Vec<(PlayerId, f64)> {
        self.buckets
            .iter()
            .flat_map(|(score, members)| members.iter().map(|&id| (id, *score)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outcome;
    use crate::ranking::testutil::MemoryStore;

    fn settings() -> RankingSettings {
        RankingSettings::default()
    }

    #[test]
    fn dominant_player_scores_one_and_loser_minus_one() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        for _ in 0..3 {
            store.add_match(1, 2, Outcome::WhiteWin);
        }

        let entries = rank_players(&store, &settings()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].player_id, 1);
        assert_eq!(entries[0].score, 1.0);
        assert_eq!(entries[1].player_id, 2);
        assert_eq!(entries[1].score, -1.0);
    }

    #[test]
    fn players_without_games_score_exactly_zero() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);

        let entries = rank_players(&store, &settings()).unwrap();
        assert!(entries.iter().all(|e| e.score == 0.0));
        // Equal score, so grade decides: 8 ahead of 7.
        assert_eq!(entries[0].player_id, 1);
    }

    #[test]
    fn rankings_are_non_increasing_by_score() {
        let mut store = MemoryStore::default();
        for (id, grade) in [(1, 8), (2, 7), (3, 6), (4, 9)] {
            store.add_player(id, "P", &format!("L{id}"), grade);
        }
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(3, 1, Outcome::WhiteWin);
        store.add_match(2, 4, Outcome::Stalemate);
        store.add_match(4, 3, Outcome::Draw);

        let entries = rank_players(&store, &settings()).unwrap();
        for pair in entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn tied_bucket_is_split_by_head_to_head() {
        // A and B both 1W/1L overall (score 0.0), but A beat B directly.
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 7); // A
        store.add_player(2, "Ben", "Burke", 7); // B
        store.add_player(3, "Cal", "Cole", 7); // C
        store.add_player(4, "Dee", "Dunn", 7); // D
        store.add_match(1, 2, Outcome::WhiteWin); // A beats B
        store.add_match(3, 1, Outcome::WhiteWin); // C beats A
        store.add_match(2, 4, Outcome::WhiteWin); // B beats D

        let entries = rank_players(&store, &settings()).unwrap();
        let order: Vec<PlayerId> = entries.iter().map(|e| e.player_id).collect();
        assert_eq!(order, vec![3, 1, 2, 4]);

        let a = entries.iter().find(|e| e.player_id == 1).unwrap();
        let b = entries.iter().find(|e| e.player_id == 2).unwrap();
        // Worst-to-best increments: the head-to-head winner ends highest.
        assert!(a.score > b.score);
        assert!((a.score - 0.0002).abs() < 1e-12);
        assert!((b.score - 0.0001).abs() < 1e-12);
        assert_eq!(a.tie_break_depth, 1);
        assert_eq!(b.tie_break_depth, 1);
        assert_eq!(entries.iter().find(|e| e.player_id == 3).unwrap().tie_break_depth, 0);
    }

    #[test]
    fn pair_resolution_is_symmetric() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(1, 2, Outcome::BlackWin);
        store.add_match(2, 1, Outcome::BlackWin);

        // A leads 2-1 regardless of which way the pair is presented.
        let forward = resolve_tie(&store, &[1, 2], &settings()).unwrap();
        let backward = resolve_tie(&store, &[2, 1], &settings()).unwrap();
        assert_eq!(forward, Some(vec![1, 2]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn even_head_to_head_is_irresolvable() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(2, 1, Outcome::WhiteWin);

        assert_eq!(resolve_tie(&store, &[1, 2], &settings()).unwrap(), None);
    }

    #[test]
    fn unplayed_pair_is_irresolvable() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);

        assert_eq!(resolve_tie(&store, &[1, 2], &settings()).unwrap(), None);
    }

    #[test]
    fn group_with_distinct_local_scores_resolves() {
        // A beat B and C, B beat C: local scores 1.0 / 0.0 / -1.0.
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_player(3, "Cal", "Cole", 6);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(1, 3, Outcome::WhiteWin);
        store.add_match(2, 3, Outcome::WhiteWin);

        let order = resolve_tie(&store, &[1, 2, 3], &settings()).unwrap();
        assert_eq!(order, Some(vec![1, 2, 3]));
    }

    #[test]
    fn recursion_ceiling_leaves_nested_group_tied() {
        // Dunn separates in the first pass; Abbott, Burke and Cole share a
        // local score of -1/3 there, and only their games among themselves
        // (A beat B and C, B beat C) can split them - which takes one level
        // of group recursion.
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 7);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_player(3, "Cal", "Cole", 7);
        store.add_player(4, "Dee", "Dunn", 7);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(1, 3, Outcome::WhiteWin);
        store.add_match(2, 3, Outcome::WhiteWin);
        for _ in 0..4 {
            store.add_match(4, 1, Outcome::WhiteWin);
        }
        store.add_match(4, 2, Outcome::WhiteWin);
        store.add_match(3, 4, Outcome::WhiteWin);

        let resolved = resolve_tie(&store, &[3, 2, 1, 4], &settings()).unwrap();
        assert_eq!(resolved, Some(vec![4, 1, 2, 3]));

        // With the ceiling at zero the trio's sub-bucket is never recursed
        // into: no error, and its members stay tied in stable input order
        // behind Dunn.
        let capped =
            RankingSettings { group_recursion_ceiling: 0, ..RankingSettings::default() };
        let unresolved = resolve_tie(&store, &[3, 2, 1, 4], &capped).unwrap();
        assert_eq!(unresolved, Some(vec![4, 3, 2, 1]));
    }

    #[test]
    fn cycle_is_irresolvable_and_falls_back_to_grade() {
        // A beat B, B beat C, C beat A: everyone 1W/1L at every level.
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 5);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_player(3, "Cal", "Cole", 6);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(2, 3, Outcome::WhiteWin);
        store.add_match(3, 1, Outcome::WhiteWin);

        assert_eq!(resolve_tie(&store, &[1, 2, 3], &settings()).unwrap(), None);

        let entries = rank_players(&store, &settings()).unwrap();
        let order: Vec<PlayerId> = entries.iter().map(|e| e.player_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert!(entries.iter().all(|e| e.score == 0.0));
        assert!(entries.iter().all(|e| e.tie_break_depth == 0));
    }

    #[test]
    fn stalemates_and_draws_dilute_the_score() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.add_match(1, 2, Outcome::Stalemate);
        store.add_match(1, 2, Outcome::Draw);

        let entries = rank_players(&store, &settings()).unwrap();
        let winner = entries.iter().find(|e| e.player_id == 1).unwrap();
        // 1 win out of 3 games, no losses: 1/3 rounded to 3 decimals.
        assert_eq!(winner.score, 0.333);
    }

    #[test]
    fn include_scores_flag_controls_output_shape() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_match(1, 2, Outcome::WhiteWin);

        match get_rankings(&store, &settings(), false).unwrap() {
            Rankings::Players(ids) => assert_eq!(ids, vec![1, 2]),
            Rankings::WithScores(_) => panic!("expected ids only"),
        }
        match get_rankings(&store, &settings(), true).unwrap() {
            Rankings::WithScores(entries) => {
                assert_eq!(entries[0].player_id, 1);
                assert_eq!(entries[0].score, 1.0);
            }
            Rankings::Players(_) => panic!("expected scored entries"),
        }
    }

    #[test]
    fn empty_player_set_is_rejected() {
        let store = MemoryStore::default();
        let err = resolve_tie(&store, &[], &settings()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RankingError>(),
            Some(&RankingError::EmptyPlayerSet)
        );
    }

    #[test]
    fn deleted_players_are_excluded_from_rankings() {
        let mut store = MemoryStore::default();
        store.add_player(1, "Ann", "Abbott", 8);
        store.add_player(2, "Ben", "Burke", 7);
        store.add_match(1, 2, Outcome::WhiteWin);
        store.remove_player(2);

        let entries = rank_players(&store, &settings()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player_id, 1);
    }
}
