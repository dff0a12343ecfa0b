use sea_orm::ActiveValue::Set;
use sea_orm::NotSet;

use super::forms::{parse_datetime, parse_time};
use super::*;
use crate::error::GenericError;
use entity::{
    dive, diver, meet, meet_itinerary, meet_judge, meet_participant, practice_schedule, score,
    season, season_cycle, season_meet, team, user,
};

/// Leaves the column to its database default when the value is absent.
fn set_or_default(value: Option<String>) -> sea_orm::ActiveValue<Option<String>> {
    match value {
        Some(v) => Set(Some(v)),
        None => NotSet,
    }
}

impl InsertUser {
    pub(crate) fn into_active_model(self, hashed_password: String) -> user::ActiveModel {
        user::ActiveModel {
            id: NotSet,
            username: Set(self.username),
            password: Set(hashed_password),
            name: Set(self.name),
            email: Set(self.email),
            role: Set(self.role.into()),
            created_at: NotSet,
        }
    }
}

impl InsertTeam {
    pub(crate) fn into_active_model(self) -> team::ActiveModel {
        team::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            code: Set(self.code),
            coach_id: Set(self.coach_id),
            mascot: Set(self.mascot),
            division: Set(self.division),
            address: Set(self.address),
            primary_color: set_or_default(self.primary_color),
            secondary_color: set_or_default(self.secondary_color),
            banner_url: Set(self.banner_url),
            logo_url: Set(self.logo_url),
            created_at: NotSet,
        }
    }
}

impl UpdateTeam {
    /// Only the fields present in the patch are written.
    pub(crate) fn apply(self, mut team: team::ActiveModel) -> team::ActiveModel {
        if let Some(name) = self.name {
            team.name = Set(name);
        }
        if let Some(code) = self.code {
            team.code = Set(code);
        }
        if self.coach_id.is_some() {
            team.coach_id = Set(self.coach_id);
        }
        if self.mascot.is_some() {
            team.mascot = Set(self.mascot);
        }
        if self.division.is_some() {
            team.division = Set(self.division);
        }
        if self.address.is_some() {
            team.address = Set(self.address);
        }
        if self.primary_color.is_some() {
            team.primary_color = Set(self.primary_color);
        }
        if self.secondary_color.is_some() {
            team.secondary_color = Set(self.secondary_color);
        }
        if self.banner_url.is_some() {
            team.banner_url = Set(self.banner_url);
        }
        if self.logo_url.is_some() {
            team.logo_url = Set(self.logo_url);
        }
        team
    }
}

impl InsertMeet {
    pub(crate) fn into_active_model(self) -> Result<meet::ActiveModel, GenericError> {
        Ok(meet::ActiveModel {
            id: NotSet,
            date: Set(parse_datetime(&self.date)?),
            name: Set(self.name),
            location: Set(self.location),
            status: Set(self.status.unwrap_or_default().into()),
            created_by: Set(self.created_by),
            created_at: NotSet,
        })
    }
}

impl InsertDiver {
    pub(crate) fn into_active_model(self) -> diver::ActiveModel {
        diver::ActiveModel {
            id: NotSet,
            user_id: Set(self.user_id),
            team_id: Set(self.team_id),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            age: Set(self.age),
            gender: Set(self.gender),
            grad_year: Set(self.grad_year),
            avg_score: Set(self.avg_score),
            email: Set(self.email),
            is_captain: Set(Some(self.is_captain.unwrap_or(false))),
            status: Set(Some(self.status.unwrap_or_default().into())),
            image_url: Set(self.image_url),
            created_at: NotSet,
        }
    }
}

impl UpdateDiver {
    pub(crate) fn apply(self, mut diver: diver::ActiveModel) -> diver::ActiveModel {
        macro_rules! patch {
            ($($field:ident),+) => {
                $(if self.$field.is_some() {
                    diver.$field = Set(self.$field);
                })+
            };
        }
        patch!(
            user_id, team_id, first_name, last_name, age, gender, grad_year, avg_score, email,
            is_captain, image_url
        );
        if let Some(status) = self.status {
            diver.status = Set(Some(status.into()));
        }
        diver
    }
}

impl InsertDive {
    pub(crate) fn into_active_model(self) -> dive::ActiveModel {
        dive::ActiveModel {
            id: NotSet,
            meet_id: Set(self.meet_id),
            diver_id: Set(self.diver_id),
            number: Set(self.number),
            name: Set(self.name),
            difficulty: Set(self.difficulty),
            completed: Set(Some(self.completed.unwrap_or(false))),
            created_at: NotSet,
        }
    }
}

impl InsertScore {
    pub(crate) fn into_active_model(self) -> score::ActiveModel {
        score::ActiveModel {
            id: NotSet,
            dive_id: Set(self.dive_id),
            judge_id: Set(self.judge_id),
            score: Set(self.score),
            created_at: NotSet,
        }
    }
}

impl InsertMeetParticipant {
    pub(crate) fn into_active_model(self) -> meet_participant::ActiveModel {
        meet_participant::ActiveModel {
            meet_id: Set(self.meet_id),
            diver_id: Set(self.diver_id),
            created_at: NotSet,
        }
    }
}

impl InsertMeetJudge {
    pub(crate) fn into_active_model(self) -> meet_judge::ActiveModel {
        meet_judge::ActiveModel {
            meet_id: Set(self.meet_id),
            judge_id: Set(self.judge_id),
            created_at: NotSet,
        }
    }
}

impl InsertSeason {
    pub(crate) fn into_active_model(self) -> season::ActiveModel {
        season::ActiveModel {
            id: NotSet,
            team_id: Set(self.team_id),
            name: Set(self.name),
            start_year: Set(self.start_year),
            end_year: Set(self.end_year),
            status: Set(self.status.unwrap_or_default().into()),
            created_by: Set(self.created_by),
            created_at: NotSet,
        }
    }
}

impl InsertSeasonCycle {
    pub(crate) fn into_active_model(self) -> season_cycle::ActiveModel {
        season_cycle::ActiveModel {
            id: NotSet,
            season_id: Set(self.season_id),
            cycle_type: Set(self.cycle_type.into()),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            created_at: NotSet,
        }
    }
}

impl InsertSeasonMeet {
    pub(crate) fn into_active_model(self) -> Result<season_meet::ActiveModel, GenericError> {
        let start_time = self.start_time.as_deref().map(parse_time).transpose()?;
        Ok(season_meet::ActiveModel {
            id: NotSet,
            season_id: Set(self.season_id),
            meet_id: Set(self.meet_id),
            opponent: Set(self.opponent),
            is_home: Set(Some(self.is_home.unwrap_or(true))),
            cycle_type: Set(self.cycle_type.into()),
            start_time: Set(start_time),
            created_at: NotSet,
        })
    }
}

impl InsertPracticeSchedule {
    pub(crate) fn into_active_model(self) -> Result<practice_schedule::ActiveModel, GenericError> {
        Ok(practice_schedule::ActiveModel {
            id: NotSet,
            season_id: Set(self.season_id),
            name: Set(self.name),
            practice_type: Set(self.practice_type.into()),
            day_of_week: Set(self.day_of_week),
            start_time: Set(parse_time(&self.start_time)?),
            end_time: Set(parse_time(&self.end_time)?),
            location: Set(self.location),
            notes: Set(self.notes),
            created_at: NotSet,
        })
    }
}

impl PlannedPractice {
    pub(crate) fn for_season(self, season_id: i32) -> InsertPracticeSchedule {
        InsertPracticeSchedule {
            season_id,
            name: self.name,
            practice_type: self.practice_type,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            notes: self.notes,
        }
    }
}

impl InsertMeetItinerary {
    pub(crate) fn into_active_model(self) -> meet_itinerary::ActiveModel {
        meet_itinerary::ActiveModel {
            id: NotSet,
            season_id: Set(self.season_id),
            name: Set(self.name),
            is_default: Set(Some(self.is_default.unwrap_or(false))),
            details: Set(self.details),
            created_at: NotSet,
        }
    }
}
