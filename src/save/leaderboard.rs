//! Top-ten table of finished runs. Kept in memory as a resource; an
//! adapter can persist it through serde.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub gold: u32,
    pub crops_harvested: u32,
    pub days_survived: u32,
}

/// Sorted best first: by score, then by gold.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Insert a run and return its 1-based rank, or `None` if it fell off
    /// the bottom of the table.
    pub fn add_entry(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let position = self
            .entries
            .iter()
            .position(|e| (entry.score, entry.gold) > (e.score, e.gold))
            .unwrap_or(self.entries.len());
        if position >= LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(position, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(position + 1)
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The rank a run with `score` would take, if any.
    pub fn would_rank(&self, score: u32) -> Option<usize> {
        match self.entries.iter().position(|e| score > e.score) {
            Some(position) => Some(position + 1),
            None if self.entries.len() < LEADERBOARD_SIZE => Some(self.entries.len() + 1),
            None => None,
        }
    }

    /// Rank of the first entry with exactly `score`.
    pub fn rank_of(&self, score: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.score == score)
            .map(|position| position + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn leaderboard_score(gold: u32, crops_harvested: u32, days: u32, friendship: u32) -> u32 {
    gold + crops_harvested * 50 + days * 5 + friendship * 10
}

/// Days played since Spring 1.
pub fn days_played(time: &TimeState) -> u32 {
    time.season.index() as u32 * DAYS_PER_SEASON + time.day - 1
}

pub(crate) fn record_game_over(
    mut events: EventReader<GameOverEvent>,
    state: Res<GameState>,
    mut board: ResMut<Leaderboard>,
) {
    for ev in events.read() {
        let days = days_played(&state.time);
        let entry = LeaderboardEntry {
            name: "Farmer".to_string(),
            score: leaderboard_score(ev.gold, ev.crops_grown, days, ev.friendship),
            gold: ev.gold,
            crops_harvested: ev.crops_grown,
            days_survived: days,
        };
        let score = entry.score;
        match board.add_entry(entry) {
            Some(rank) => info!("[Save] Final score {} placed #{} on the leaderboard", score, rank),
            None => info!("[Save] Final score {} did not make the leaderboard", score),
        }
    }
}
