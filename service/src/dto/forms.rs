use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Deserialize;
use std::str::FromStr;

use super::{CycleType, DiverStatus, MeetStatus, PracticeType, SeasonStatus, UserRole};
use crate::error::GenericError;
use crate::scoring::JudgeScore;

/// Checks a payload after deserialization. Missing required fields are already rejected by serde.
pub trait Validate {
    fn validate(&self) -> Result<(), GenericError>;
}

fn require_text(value: &str, field: &str) -> Result<(), GenericError> {
    if value.trim().is_empty() {
        Err(GenericError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

fn has_one_decimal_at_most(value: f64) -> bool {
    let tenths = value * 10.0;
    (tenths - tenths.round()).abs() < 1e-9
}

pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, GenericError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()));
    }
    dateparser::parse_with_timezone(value, &Utc)
        .map(|d| d.naive_utc())
        .map_err(|_| GenericError::Validation(format!("Unrecognised date: {value}")))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, GenericError> {
    parse_datetime(value).map(|d| d.date())
}

pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, GenericError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| GenericError::Validation(format!("Unrecognised time: {value}")))
}

/// Body of the status-changing `PATCH` routes.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

impl StatusUpdate {
    pub fn parse<T: FromStr>(&self) -> Result<T, GenericError> {
        T::from_str(&self.status).map_err(|_| GenericError::BadRequest("Invalid status"))
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl Validate for InsertUser {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.username, "username")?;
        require_text(&self.password, "password")?;
        require_text(&self.name, "name")
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginInput {
    fn validate(&self) -> Result<(), GenericError> {
        if self.username.is_empty() || self.password.is_empty() {
            Err(GenericError::BadRequest("Username and password are required"))
        } else {
            Ok(())
        }
    }
}

pub const MAX_TEAM_CODE_LEN: usize = 10;

fn validate_team_code(code: &str) -> Result<(), GenericError> {
    require_text(code, "code")?;
    if code.chars().count() > MAX_TEAM_CODE_LEN {
        return Err(GenericError::Validation(format!(
            "code must be at most {MAX_TEAM_CODE_LEN} characters"
        )));
    }
    Ok(())
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertTeam {
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
}

impl Validate for InsertTeam {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.name, "name")?;
        validate_team_code(&self.code)
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub code: Option<String>,
    pub coach_id: Option<i32>,
    pub mascot: Option<String>,
    pub division: Option<String>,
    pub address: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
}

impl Validate for UpdateTeam {
    fn validate(&self) -> Result<(), GenericError> {
        if let Some(name) = &self.name {
            require_text(name, "name")?;
        }
        if let Some(code) = &self.code {
            validate_team_code(code)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertMeet {
    pub name: String,
    pub location: String,
    pub date: String,
    pub status: Option<MeetStatus>,
    pub created_by: Option<i32>,
}

impl Validate for InsertMeet {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.name, "name")?;
        require_text(&self.location, "location")?;
        parse_datetime(&self.date).map(|_| ())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertDiver {
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
}

impl Validate for InsertDiver {
    fn validate(&self) -> Result<(), GenericError> {
        if self.team_id.is_none() {
            return Err(GenericError::BadRequest("Valid teamId is required"));
        }
        Ok(())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDiver {
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
}

impl UpdateDiver {
    /// Archiving and deleting succeed even when the diver is already gone.
    pub fn is_removal(&self) -> bool {
        matches!(
            self.status,
            Some(DiverStatus::Archived) | Some(DiverStatus::Deleted)
        )
    }
}

pub const MAX_DIFFICULTY: f64 = 99.9;

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertDive {
    pub meet_id: Option<i32>,
    pub diver_id: Option<i32>,
    pub number: i32,
    pub name: String,
    pub difficulty: f64,
    pub completed: Option<bool>,
}

impl Validate for InsertDive {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.name, "name")?;
        if self.number < 1 {
            return Err(GenericError::Validation(
                "number must be at least 1".to_string(),
            ));
        }
        if !self.difficulty.is_finite()
            || self.difficulty <= 0.0
            || self.difficulty > MAX_DIFFICULTY
            || !has_one_decimal_at_most(self.difficulty)
        {
            return Err(GenericError::Validation(format!(
                "difficulty must be between 0.1 and {MAX_DIFFICULTY} with one decimal place"
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertScore {
    pub dive_id: Option<i32>,
    pub judge_id: Option<i32>,
    pub score: f64,
}

impl Validate for InsertScore {
    fn validate(&self) -> Result<(), GenericError> {
        JudgeScore::try_from(self.score).map(|_| ())
    }
}

/// A score typed on the judge pad, as the pad shows it.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JudgeSubmission {
    pub judge_id: i32,
    pub score: String,
}

impl JudgeSubmission {
    pub fn judge_score(&self) -> Result<JudgeScore, GenericError> {
        self.score.parse()
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertMeetParticipant {
    pub meet_id: i32,
    pub diver_id: i32,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertMeetJudge {
    pub meet_id: i32,
    pub judge_id: i32,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSeason {
    pub team_id: i32,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub status: Option<SeasonStatus>,
    pub created_by: i32,
}

impl Validate for InsertSeason {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.name, "name")?;
        if self.end_year < self.start_year {
            return Err(GenericError::Validation(
                "endYear must not be before startYear".to_string(),
            ));
        }
        Ok(())
    }
}

/// A phase of the season as picked in the season wizard; it lasts until the next one starts.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStage {
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
    pub start_date: String,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeet {
    pub opponent: String,
    pub date: String,
    pub location: Option<String>,
    #[serde(default = "default_true")]
    pub is_home: bool,
    pub cycle_type: CycleType,
    pub start_time: Option<String>,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlannedPractice {
    pub name: String,
    #[serde(rename = "type")]
    pub practice_type: PracticeType,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Season wizard payload: the season itself plus everything planned for it.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeason {
    #[serde(flatten)]
    pub season: InsertSeason,
    #[serde(default)]
    pub stages: Vec<PlannedStage>,
    #[serde(default)]
    pub meets: Vec<PlannedMeet>,
    #[serde(default)]
    pub practices: Vec<PlannedPractice>,
}

impl Validate for CreateSeason {
    fn validate(&self) -> Result<(), GenericError> {
        self.season.validate()?;
        for stage in &self.stages {
            parse_date(&stage.start_date)?;
        }
        for meet in &self.meets {
            require_text(&meet.opponent, "opponent")?;
            parse_datetime(&meet.date)?;
            if let Some(start_time) = &meet.start_time {
                parse_time(start_time)?;
            }
        }
        for practice in &self.practices {
            validate_practice(
                &practice.name,
                practice.day_of_week,
                &practice.start_time,
                &practice.end_time,
            )?;
        }
        Ok(())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSeasonCycle {
    pub season_id: i32,
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Validate for InsertSeasonCycle {
    fn validate(&self) -> Result<(), GenericError> {
        if self.end_date < self.start_date {
            return Err(GenericError::Validation(
                "endDate must not be before startDate".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertSeasonMeet {
    pub season_id: i32,
    pub meet_id: i32,
    pub opponent: Option<String>,
    pub is_home: Option<bool>,
    pub cycle_type: CycleType,
    pub start_time: Option<String>,
}

impl Validate for InsertSeasonMeet {
    fn validate(&self) -> Result<(), GenericError> {
        if let Some(start_time) = &self.start_time {
            parse_time(start_time)?;
        }
        Ok(())
    }
}

fn validate_practice(
    name: &str,
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<(), GenericError> {
    require_text(name, "name")?;
    if !(0..=6).contains(&day_of_week) {
        return Err(GenericError::Validation(
            "dayOfWeek must be between 0 (Sunday) and 6 (Saturday)".to_string(),
        ));
    }
    if parse_time(end_time)? <= parse_time(start_time)? {
        return Err(GenericError::Validation(
            "endTime must be after startTime".to_string(),
        ));
    }
    Ok(())
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertPracticeSchedule {
    pub season_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub practice_type: PracticeType,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Validate for InsertPracticeSchedule {
    fn validate(&self) -> Result<(), GenericError> {
        validate_practice(&self.name, self.day_of_week, &self.start_time, &self.end_time)
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertMeetItinerary {
    pub season_id: Option<i32>,
    pub name: String,
    pub is_default: Option<bool>,
    pub details: Option<serde_json::Value>,
}

impl Validate for InsertMeetItinerary {
    fn validate(&self) -> Result<(), GenericError> {
        require_text(&self.name, "name")
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, JsonSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    pub is_dark_mode: bool,
}
