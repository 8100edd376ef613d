//! The achievement leaderboard: competition-style ranks plus a display
//! width for each member's bar, scaled against the leader.

use serde::Serialize;

use crate::models::achievement::MemberScore;

pub const PAGE_SIZE: usize = 25;

/// The narrowest bar shown, as a percentage of the page width.
const MIN_FACTOR: f64 = 2.5;
/// The leader's bar width, as a percentage of the page width.
const MAX_FACTOR: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// The id of the member
    pub member: i64,
    /// The member's display name
    pub name: String,
    /// The member's aggregate achievement points
    pub score: i64,
    /// Competition rank: tied scores share a rank, and the next distinct
    /// score takes its 1-based position in the sequence
    pub rank: usize,
    /// Display width percentage, scaled linearly between the floor and the
    /// leader's width
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardPage {
    pub page: usize,
    pub pages: usize,
    pub entries: Vec<LeaderboardEntry>,
}

/// Ranks every member with a non-negative score, highest first.
///
/// Ties keep the incoming (member-id) order. An empty store, or one where
/// nobody has scored, projects to an empty board.
pub fn project(scores: Vec<MemberScore>) -> Vec<LeaderboardEntry> {
    let mut scores: Vec<MemberScore> = scores
        .into_iter()
        .filter(|scored| scored.score >= 0)
        .collect();
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    let max_score = match scores.first() {
        Some(leader) if leader.score > 0 => leader.score,
        _ => return Vec::new(),
    };

    let mut entries = Vec::with_capacity(scores.len());
    let mut prev_score = None;
    let mut prev_rank = 0;

    for (index, scored) in scores.into_iter().enumerate() {
        let rank = if Some(scored.score) == prev_score {
            prev_rank
        } else {
            index + 1
        };
        prev_score = Some(scored.score);
        prev_rank = rank;

        let factor =
            MIN_FACTOR + (MAX_FACTOR - MIN_FACTOR) * scored.score as f64 / max_score as f64;

        entries.push(LeaderboardEntry {
            member: scored.member,
            name: scored.name,
            score: scored.score,
            rank,
            factor,
        });
    }

    entries
}

/// Cuts the projection into fixed-size pages. Pages are 1-based; `None`
/// means the requested page is past the end. Page 1 of an empty board is
/// an empty page.
pub fn paginate(entries: Vec<LeaderboardEntry>, page: usize) -> Option<LeaderboardPage> {
    let pages = entries.len().div_ceil(PAGE_SIZE).max(1);
    if page == 0 || page > pages {
        return None;
    }

    let entries = entries
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Some(LeaderboardPage {
        page,
        pages,
        entries,
    })
}
