use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Serialize;

use super::{CycleType, DiverStatus, MeetStatus, PracticeType, SeasonStatus, UpdateDiver, UserRole};
use entity::{
    dive, diver, meet, meet_itinerary, meet_judge, meet_participant, practice_schedule, score,
    season, season_cycle, season_meet, team, user,
};

/// A user without the password hash.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Option<NaiveDateTime>,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role.into(),
            created_at: user.created_at,
        }
    }
}

/// What the client keeps about the logged in user.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl From<user::Model> for AuthUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.into(),
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub coach_id: Option<i32>,
    pub mascot: Option<String>,
    pub division: Option<String>,
    pub address: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<team::Model> for TeamView {
    fn from(team: team::Model) -> Self {
        Self {
            id: team.id,
            name: team.name,
            code: team.code,
            coach_id: team.coach_id,
            mascot: team.mascot,
            division: team.division,
            address: team.address,
            primary_color: team.primary_color,
            secondary_color: team.secondary_color,
            banner_url: team.banner_url,
            logo_url: team.logo_url,
            created_at: team.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetView {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub date: NaiveDateTime,
    pub status: MeetStatus,
    pub created_by: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<meet::Model> for MeetView {
    fn from(meet: meet::Model) -> Self {
        Self {
            id: meet.id,
            name: meet.name,
            location: meet.location,
            date: meet.date,
            status: meet.status.into(),
            created_by: meet.created_by,
            created_at: meet.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiverView {
    pub id: i32,
    pub user_id: Option<i32>,
    pub team_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub grad_year: Option<i32>,
    pub avg_score: Option<String>,
    pub email: Option<String>,
    pub is_captain: Option<bool>,
    pub status: Option<DiverStatus>,
    pub image_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl DiverView {
    /// Stand-in returned when archiving a diver that no longer exists.
    pub fn placeholder(id: i32, patch: &UpdateDiver) -> Self {
        Self {
            id,
            user_id: patch.user_id,
            team_id: patch.team_id,
            first_name: patch.first_name.clone(),
            last_name: patch.last_name.clone(),
            age: patch.age,
            gender: patch.gender.clone(),
            grad_year: patch.grad_year,
            avg_score: patch.avg_score.clone(),
            email: patch.email.clone(),
            is_captain: patch.is_captain,
            status: patch.status,
            image_url: patch.image_url.clone(),
            created_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => format!("Diver #{}", self.id),
        }
    }
}

impl From<diver::Model> for DiverView {
    fn from(diver: diver::Model) -> Self {
        Self {
            id: diver.id,
            user_id: diver.user_id,
            team_id: diver.team_id,
            first_name: diver.first_name,
            last_name: diver.last_name,
            age: diver.age,
            gender: diver.gender,
            grad_year: diver.grad_year,
            avg_score: diver.avg_score,
            email: diver.email,
            is_captain: diver.is_captain,
            status: diver.status.map(Into::into),
            image_url: diver.image_url,
            created_at: diver.created_at,
        }
    }
}

/// Body of `DELETE /divers/<id>`, which answers the same whether or not the diver existed.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct DiverDeleted {
    pub message: String,
    pub id: i32,
    pub diver: RemovedDiver,
}

/// Serialised as the removed diver, or as `{}` when there was none.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RemovedDiver {
    Found(DiverView),
    Missing {},
}

impl From<Option<diver::Model>> for RemovedDiver {
    fn from(diver: Option<diver::Model>) -> Self {
        match diver {
            Some(diver) => Self::Found(diver.into()),
            None => Self::Missing {},
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiveView {
    pub id: i32,
    pub meet_id: Option<i32>,
    pub diver_id: Option<i32>,
    pub number: i32,
    pub name: String,
    pub difficulty: f64,
    pub completed: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<dive::Model> for DiveView {
    fn from(dive: dive::Model) -> Self {
        Self {
            id: dive.id,
            meet_id: dive.meet_id,
            diver_id: dive.diver_id,
            number: dive.number,
            name: dive.name,
            difficulty: dive.difficulty,
            completed: dive.completed,
            created_at: dive.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    pub id: i32,
    pub dive_id: Option<i32>,
    pub judge_id: Option<i32>,
    pub score: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl From<score::Model> for ScoreView {
    fn from(score: score::Model) -> Self {
        Self {
            id: score.id,
            dive_id: score.dive_id,
            judge_id: score.judge_id,
            score: score.score,
            created_at: score.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiveTotal {
    pub dive_id: i32,
    pub difficulty: f64,
    pub scores: Vec<f64>,
    pub raw_total: f64,
    pub total: f64,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetParticipantView {
    pub meet_id: i32,
    pub diver_id: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl From<meet_participant::Model> for MeetParticipantView {
    fn from(m: meet_participant::Model) -> Self {
        Self {
            meet_id: m.meet_id,
            diver_id: m.diver_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetJudgeView {
    pub meet_id: i32,
    pub judge_id: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl From<meet_judge::Model> for MeetJudgeView {
    fn from(m: meet_judge::Model) -> Self {
        Self {
            meet_id: m.meet_id,
            judge_id: m.judge_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonView {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub status: SeasonStatus,
    pub created_by: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl From<season::Model> for SeasonView {
    fn from(season: season::Model) -> Self {
        Self {
            id: season.id,
            team_id: season.team_id,
            name: season.name,
            start_year: season.start_year,
            end_year: season.end_year,
            status: season.status.into(),
            created_by: season.created_by,
            created_at: season.created_at,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCycleView {
    pub id: i32,
    pub season_id: i32,
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<season_cycle::Model> for SeasonCycleView {
    fn from(cycle: season_cycle::Model) -> Self {
        Self {
            id: cycle.id,
            season_id: cycle.season_id,
            cycle_type: cycle.cycle_type.into(),
            start_date: cycle.start_date,
            end_date: cycle.end_date,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMeetView {
    pub id: i32,
    pub season_id: i32,
    pub meet_id: i32,
    pub opponent: Option<String>,
    pub is_home: Option<bool>,
    pub cycle_type: CycleType,
    pub start_time: Option<NaiveTime>,
}

impl From<season_meet::Model> for SeasonMeetView {
    fn from(m: season_meet::Model) -> Self {
        Self {
            id: m.id,
            season_id: m.season_id,
            meet_id: m.meet_id,
            opponent: m.opponent,
            is_home: m.is_home,
            cycle_type: m.cycle_type.into(),
            start_time: m.start_time,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeScheduleView {
    pub id: i32,
    pub season_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub practice_type: PracticeType,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl From<practice_schedule::Model> for PracticeScheduleView {
    fn from(p: practice_schedule::Model) -> Self {
        Self {
            id: p.id,
            season_id: p.season_id,
            name: p.name,
            practice_type: p.practice_type.into(),
            day_of_week: p.day_of_week,
            start_time: p.start_time,
            end_time: p.end_time,
            location: p.location,
            notes: p.notes,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetItineraryView {
    pub id: i32,
    pub season_id: Option<i32>,
    pub name: String,
    pub is_default: Option<bool>,
    pub details: Option<serde_json::Value>,
}

impl From<meet_itinerary::Model> for MeetItineraryView {
    fn from(i: meet_itinerary::Model) -> Self {
        Self {
            id: i.id,
            season_id: i.season_id,
            name: i.name,
            is_default: i.is_default,
            details: i.details,
        }
    }
}

/// A season with everything planned in it.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetail {
    #[serde(flatten)]
    pub season: SeasonView,
    pub cycles: Vec<SeasonCycleView>,
    pub meets: Vec<SeasonMeetView>,
    pub practices: Vec<PracticeScheduleView>,
    pub current_cycle: Option<CycleType>,
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub theme: &'static str,
    pub is_dark_mode: bool,
}
