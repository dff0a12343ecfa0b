use chrono::{Days, NaiveDate};
use itertools::Itertools;

use crate::dto::forms::parse_date;
use crate::dto::{
    CycleType, InsertMeet, InsertSeasonCycle, InsertSeasonMeet, MeetStatus, PlannedMeet,
    PlannedStage, SeasonCycleView,
};
use crate::error::GenericError;

/// How long the last stage of a season runs.
pub const LAST_STAGE_DAYS: u64 = 30;
/// Owner of generated meets when the season has none.
pub const FALLBACK_CREATOR: i32 = 1;

/// Turns the wizard's stages into cycles. Stages are taken in start order and each one ends on
/// the day the next begins.
pub fn stage_cycles(
    season_id: i32,
    stages: &[PlannedStage],
) -> Result<Vec<InsertSeasonCycle>, GenericError> {
    let starts = stages
        .iter()
        .map(|s| parse_date(&s.start_date).map(|d| (s.cycle_type, d)))
        .collect::<Result<Vec<_>, _>>()?;
    let starts = starts
        .into_iter()
        .sorted_by_key(|(_, start)| *start)
        .collect_vec();

    let mut cycles = Vec::with_capacity(starts.len());
    for (i, (cycle_type, start_date)) in starts.iter().enumerate() {
        let end_date = match starts.get(i + 1) {
            Some((_, next_start)) => *next_start,
            None => start_date
                .checked_add_days(Days::new(LAST_STAGE_DAYS))
                .ok_or(GenericError::BadRequest("Stage start date is out of range"))?,
        };
        cycles.push(InsertSeasonCycle {
            season_id,
            cycle_type: *cycle_type,
            start_date: *start_date,
            end_date,
        });
    }
    Ok(cycles)
}

pub fn meet_creator(created_by: Option<i32>) -> i32 {
    match created_by {
        Some(id) if id != 0 => id,
        _ => FALLBACK_CREATOR,
    }
}

pub fn default_location(opponent: &str, is_home: bool) -> String {
    if is_home {
        "Home Pool".to_string()
    } else {
        format!("{opponent} Pool")
    }
}

impl PlannedMeet {
    /// The meet row a planned meet becomes.
    pub fn to_meet(&self, created_by: i32) -> InsertMeet {
        InsertMeet {
            name: format!("vs {}", self.opponent),
            location: self
                .location
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| default_location(&self.opponent, self.is_home)),
            date: self.date.clone(),
            status: Some(MeetStatus::Scheduled),
            created_by: Some(meet_creator(Some(created_by))),
        }
    }

    pub fn to_season_meet(&self, season_id: i32, meet_id: i32) -> InsertSeasonMeet {
        InsertSeasonMeet {
            season_id,
            meet_id,
            opponent: Some(self.opponent.clone()),
            is_home: Some(self.is_home),
            cycle_type: self.cycle_type,
            start_time: self.start_time.clone(),
        }
    }
}

/// The cycle running on `date`. On a boundary day the stage that starts wins.
pub fn current_cycle(cycles: &[SeasonCycleView], date: NaiveDate) -> Option<&SeasonCycleView> {
    cycles
        .iter()
        .filter(|c| c.start_date <= date && date <= c.end_date)
        .max_by_key(|c| c.start_date)
}

pub fn current_cycle_type(cycles: &[SeasonCycleView], date: NaiveDate) -> Option<CycleType> {
    current_cycle(cycles, date).map(|c| c.cycle_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(cycle_type: CycleType, start: &str) -> PlannedStage {
        PlannedStage {
            cycle_type,
            start_date: start.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn stages_end_when_the_next_begins() {
        let cycles = stage_cycles(
            4,
            &[
                stage(CycleType::Preseason, "2025-09-01"),
                stage(CycleType::Regular, "2025-10-15"),
                stage(CycleType::Postseason, "2026-02-01"),
            ],
        )
        .unwrap();
        assert_eq!(cycles.len(), 3);
        assert_eq!(cycles[0].end_date, date("2025-10-15"));
        assert_eq!(cycles[1].end_date, date("2026-02-01"));
        assert_eq!(cycles[2].end_date, date("2026-03-03"));
        assert!(cycles.iter().all(|c| c.season_id == 4));
    }

    #[test]
    fn stages_are_ordered_by_start() {
        let cycles = stage_cycles(
            1,
            &[
                stage(CycleType::Regular, "2025-11-01"),
                stage(CycleType::Preseason, "2025-09-01"),
            ],
        )
        .unwrap();
        assert_eq!(cycles[0].cycle_type, CycleType::Preseason);
        assert_eq!(cycles[0].end_date, date("2025-11-01"));
    }

    #[test]
    fn bad_stage_dates_are_rejected() {
        assert!(stage_cycles(1, &[stage(CycleType::Regular, "soon")]).is_err());
    }

    #[test]
    fn planned_meets_get_names_and_locations() {
        let planned = PlannedMeet {
            opponent: "Amherst".to_string(),
            date: "2025-11-08".to_string(),
            location: None,
            is_home: false,
            cycle_type: CycleType::Regular,
            start_time: Some("18:00".to_string()),
        };
        let meet = planned.to_meet(0);
        assert_eq!(meet.name, "vs Amherst");
        assert_eq!(meet.location, "Amherst Pool");
        assert_eq!(meet.status, Some(MeetStatus::Scheduled));
        assert_eq!(meet.created_by, Some(FALLBACK_CREATOR));

        let home = PlannedMeet {
            is_home: true,
            ..planned.clone()
        };
        assert_eq!(home.to_meet(7).location, "Home Pool");
        assert_eq!(home.to_meet(7).created_by, Some(7));

        let link = planned.to_season_meet(2, 11);
        assert_eq!(link.meet_id, 11);
        assert_eq!(link.is_home, Some(false));
    }

    #[test]
    fn current_cycle_contains_the_date() {
        let view = |id, cycle_type, start: &str, end: &str| SeasonCycleView {
            id,
            season_id: 1,
            cycle_type,
            start_date: date(start),
            end_date: date(end),
        };
        let cycles = vec![
            view(1, CycleType::Preseason, "2025-09-01", "2025-10-15"),
            view(2, CycleType::Regular, "2025-10-15", "2026-02-01"),
        ];
        assert_eq!(
            current_cycle_type(&cycles, date("2025-09-20")),
            Some(CycleType::Preseason)
        );
        assert_eq!(
            current_cycle_type(&cycles, date("2025-10-15")),
            Some(CycleType::Regular)
        );
        assert_eq!(current_cycle(&cycles, date("2026-05-01")), None);
    }
}
