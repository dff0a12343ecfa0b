use sea_orm::{EnumIter, Iterable};
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Password,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum UserRole {
    Table,
    #[iden = "coach"]
    Coach,
    #[iden = "diver"]
    Diver,
    #[iden = "judge"]
    Judge,
}

#[derive(DeriveIden)]
pub(crate) enum UserCookies {
    Table,
    Cookie,
    UserId,
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
    Code,
    CoachId,
    Mascot,
    Division,
    Address,
    PrimaryColor,
    SecondaryColor,
    BannerUrl,
    LogoUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Diver {
    #[sea_orm(iden = "divers")]
    Table,
    Id,
    UserId,
    TeamId,
    FirstName,
    LastName,
    Age,
    Gender,
    GradYear,
    AvgScore,
    Email,
    IsCaptain,
    Status,
    ImageUrl,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum DiverStatus {
    Table,
    #[iden = "active"]
    Active,
    #[iden = "archived"]
    Archived,
    #[iden = "deleted"]
    Deleted,
}

#[derive(DeriveIden)]
pub(crate) enum Meet {
    #[sea_orm(iden = "meets")]
    Table,
    Id,
    Name,
    Location,
    Date,
    Status,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum MeetStatus {
    Table,
    #[iden = "upcoming"]
    Upcoming,
    #[iden = "scheduled"]
    Scheduled,
    #[iden = "active"]
    Active,
    #[iden = "completed"]
    Completed,
}

#[derive(DeriveIden)]
pub(crate) enum Dive {
    #[sea_orm(iden = "dives")]
    Table,
    Id,
    MeetId,
    DiverId,
    Number,
    Name,
    Difficulty,
    Completed,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Score {
    #[sea_orm(iden = "scores")]
    Table,
    Id,
    DiveId,
    JudgeId,
    Score,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum MeetParticipant {
    #[sea_orm(iden = "meet_participants")]
    Table,
    MeetId,
    DiverId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum MeetJudge {
    #[sea_orm(iden = "meet_judges")]
    Table,
    MeetId,
    JudgeId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Season {
    #[sea_orm(iden = "seasons")]
    Table,
    Id,
    TeamId,
    Name,
    StartYear,
    EndYear,
    Status,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum SeasonStatus {
    Table,
    #[iden = "active"]
    Active,
    #[iden = "archived"]
    Archived,
}

#[derive(Iden, EnumIter)]
pub(crate) enum CycleType {
    Table,
    #[iden = "preseason"]
    Preseason,
    #[iden = "regular"]
    Regular,
    #[iden = "postseason"]
    Postseason,
    #[iden = "offseason"]
    Offseason,
}

#[derive(DeriveIden)]
pub(crate) enum SeasonCycle {
    #[sea_orm(iden = "season_cycles")]
    Table,
    Id,
    SeasonId,
    CycleType,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum SeasonMeet {
    #[sea_orm(iden = "season_meets")]
    Table,
    Id,
    SeasonId,
    MeetId,
    Opponent,
    IsHome,
    CycleType,
    StartTime,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub(crate) enum PracticeType {
    Table,
    #[iden = "weightroom"]
    Weightroom,
    #[iden = "dryland"]
    Dryland,
    #[iden = "diving"]
    Diving,
    #[iden = "mental"]
    Mental,
    #[iden = "other"]
    Other,
}

#[derive(DeriveIden)]
pub(crate) enum PracticeSchedule {
    #[sea_orm(iden = "practice_schedules")]
    Table,
    Id,
    SeasonId,
    Name,
    PracticeType,
    DayOfWeek,
    StartTime,
    EndTime,
    Location,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum MeetItinerary {
    #[sea_orm(iden = "meet_itineraries")]
    Table,
    Id,
    SeasonId,
    Name,
    IsDefault,
    Details,
    CreatedAt,
}

/// Every value of a postgres enum type, without the `Table` iden that names the type itself.
pub(crate) fn enum_values<T: Iden + Iterable + 'static>() -> Vec<T> {
    T::iter().skip(1).collect()
}
