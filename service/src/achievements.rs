use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Serialize;

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Competition,
    Training,
    Team,
    Personal,
}

/// The team statistic a badge counts.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    RosterSize,
    MeetsAttended,
    CompletedDives,
    PodiumFinishes,
    SeasonsPlanned,
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub icon: &'static str,
    pub category: Category,
    pub metric: Metric,
    pub total_required: u64,
}

const fn badge(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    icon: &'static str,
    category: Category,
    metric: Metric,
    total_required: u64,
) -> Badge {
    Badge {
        id,
        name,
        description,
        rarity,
        icon,
        category,
        metric,
        total_required,
    }
}

use Category::*;
use Metric::*;
use Rarity::*;

pub const CATALOG: &[Badge] = &[
    badge(
        "team-first-diver",
        "First Recruit",
        "Add the first diver to the roster",
        Common,
        "UserPlus",
        Team,
        RosterSize,
        1,
    ),
    badge(
        "team-full-roster",
        "Full Roster",
        "Register a complete team of eight divers",
        Uncommon,
        "Users",
        Team,
        RosterSize,
        8,
    ),
    badge(
        "team-deep-bench",
        "Deep Bench",
        "Carry twenty active divers on the roster",
        Epic,
        "Shield",
        Team,
        RosterSize,
        20,
    ),
    badge(
        "competition-first-meet",
        "First Meet",
        "Take part in your first diving meet",
        Common,
        "Flag",
        Competition,
        MeetsAttended,
        1,
    ),
    badge(
        "competition-road-warriors",
        "Road Warriors",
        "Compete in ten meets",
        Rare,
        "Map",
        Competition,
        MeetsAttended,
        10,
    ),
    badge(
        "competition-podium",
        "Podium Finish",
        "Have a team member finish in the top 3 at a meet",
        Uncommon,
        "Trophy",
        Competition,
        PodiumFinishes,
        1,
    ),
    badge(
        "competition-podium-regulars",
        "Podium Regulars",
        "Reach the podium at ten meets",
        Epic,
        "Medal",
        Competition,
        PodiumFinishes,
        10,
    ),
    badge(
        "competition-dynasty",
        "Dynasty",
        "Reach the podium at twenty-five meets",
        Legendary,
        "Crown",
        Competition,
        PodiumFinishes,
        25,
    ),
    badge(
        "training-first-splash",
        "First Splash",
        "Complete the first scored dive",
        Common,
        "Droplet",
        Training,
        CompletedDives,
        1,
    ),
    badge(
        "training-dive-variety",
        "Dive Variety",
        "Complete fifty scored dives",
        Uncommon,
        "Layers",
        Training,
        CompletedDives,
        50,
    ),
    badge(
        "training-skill-mastery",
        "Skill Mastery",
        "Complete two hundred scored dives",
        Rare,
        "Zap",
        Training,
        CompletedDives,
        200,
    ),
    badge(
        "training-elite-program",
        "Elite Training Program",
        "Complete a thousand scored dives",
        Legendary,
        "Target",
        Training,
        CompletedDives,
        1000,
    ),
    badge(
        "personal-planner",
        "Season Planner",
        "Plan a season with the season wizard",
        Common,
        "CalendarDays",
        Personal,
        SeasonsPlanned,
        1,
    ),
    badge(
        "personal-program-builder",
        "Program Builder",
        "Plan four seasons",
        Rare,
        "Building",
        Personal,
        SeasonsPlanned,
        4,
    ),
];

/// Counts a team's progress is measured against.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub roster_size: u64,
    pub meets_attended: u64,
    pub completed_dives: u64,
    pub podium_finishes: u64,
    pub seasons_planned: u64,
}

impl TeamStats {
    pub fn count(&self, metric: Metric) -> u64 {
        match metric {
            RosterSize => self.roster_size,
            MeetsAttended => self.meets_attended,
            CompletedDives => self.completed_dives,
            PodiumFinishes => self.podium_finishes,
            SeasonsPlanned => self.seasons_planned,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    #[serde(flatten)]
    pub badge: Badge,
    pub progress: u64,
    pub unlocked: bool,
}

pub fn progress(stats: &TeamStats) -> Vec<BadgeProgress> {
    CATALOG
        .iter()
        .map(|badge| {
            let count = stats.count(badge.metric);
            BadgeProgress {
                badge: *badge,
                progress: count.min(badge.total_required),
                unlocked: count >= badge.total_required,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn empty_team_has_nothing_unlocked() {
        assert!(progress(&TeamStats::default()).iter().all(|p| !p.unlocked));
    }

    #[test]
    fn badges_unlock_at_their_threshold() {
        let stats = TeamStats {
            roster_size: 8,
            meets_attended: 3,
            completed_dives: 60,
            podium_finishes: 0,
            seasons_planned: 1,
        };
        let badges = progress(&stats);
        let get = |id: &str| badges.iter().find(|p| p.badge.id == id).unwrap();

        assert!(get("team-full-roster").unlocked);
        assert!(!get("team-deep-bench").unlocked);
        assert_eq!(get("team-deep-bench").progress, 8);
        assert!(get("training-dive-variety").unlocked);
        assert_eq!(get("training-dive-variety").progress, 50);
        assert!(!get("competition-podium").unlocked);
        assert!(get("personal-planner").unlocked);
    }
}
