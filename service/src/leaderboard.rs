use itertools::Itertools;
use rocket::FromForm;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scoring::dive_total;
use entity::{dive, diver, score, team};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub diver_id: i32,
    pub name: String,
    pub team: String,
    pub age: Option<i32>,
    pub total_score: f64,
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(Self::Gold),
            1 => Some(Self::Silver),
            2 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub position: usize,
    pub medal: Option<Medal>,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// Query parameters of the leaderboard routes. Empty values do not filter.
#[derive(FromForm, Deserialize, JsonSchema, Debug, Clone, Default)]
pub struct LeaderboardFilter {
    pub team: Option<String>,
    pub search: Option<String>,
}

impl LeaderboardFilter {
    pub fn matches(&self, entry: &LeaderboardEntry) -> bool {
        let team_ok = match self.team.as_deref().filter(|t| !t.is_empty()) {
            Some(team) => entry.team.to_lowercase() == team.to_lowercase(),
            None => true,
        };
        let search_ok = match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => entry.name.to_lowercase().contains(&search.to_lowercase()),
            None => true,
        };
        team_ok && search_ok
    }
}

/// Entries ordered by total score, highest first. Ties keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Positions are taken after filtering, so the first visible diver holds the gold.
    pub fn ranked(&self, filter: &LeaderboardFilter) -> Vec<RankedEntry> {
        self.entries
            .iter()
            .filter(|e| filter.matches(e))
            .enumerate()
            .map(|(position, entry)| RankedEntry {
                position,
                medal: Medal::for_position(position),
                entry: entry.clone(),
            })
            .collect()
    }

    /// Totals per diver from the dives of one meet.
    pub fn from_meet(
        dives: &[dive::Model],
        scores: &[score::Model],
        divers: &[diver::Model],
        teams: &[team::Model],
    ) -> Self {
        let scores_by_dive: HashMap<i32, Vec<f64>> = scores
            .iter()
            .filter_map(|s| s.dive_id.map(|dive_id| (dive_id, s.score)))
            .into_group_map();
        let totals: HashMap<i32, f64> = dives
            .iter()
            .filter_map(|d| {
                let scores = scores_by_dive.get(&d.id).map(Vec::as_slice).unwrap_or(&[]);
                d.diver_id.map(|diver_id| (diver_id, dive_total(scores, d.difficulty)))
            })
            .into_grouping_map()
            .sum();
        let team_names: HashMap<i32, &str> =
            teams.iter().map(|t| (t.id, t.name.as_str())).collect();

        let entries = divers
            .iter()
            .filter(|d| totals.contains_key(&d.id))
            .map(|d| {
                let team = d
                    .team_id
                    .and_then(|id| team_names.get(&id).copied())
                    .unwrap_or_default()
                    .to_string();
                LeaderboardEntry {
                    diver_id: d.id,
                    name: crate::dto::DiverView::from(d.clone()).full_name(),
                    team,
                    age: d.age,
                    total_score: (totals[&d.id] * 100.0).round() / 100.0,
                }
            })
            .collect();
        Self::new(entries)
    }
}
