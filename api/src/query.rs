use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::*;
use service::error::GenericError;
use service::leaderboard::{LeaderboardFilter, RankedEntry};

#[openapi(tag = "Teams")]
#[get("/teams")]
pub(crate) async fn list_teams(
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<TeamView>>, GenericError> {
    Ok(Json(service::list_teams(db.inner()).await?))
}

#[openapi(tag = "Teams")]
#[get("/teams/<id>")]
pub(crate) async fn get_team(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(service::get_team(db.inner(), id).await?))
}

/// # Team roster
///
/// 404 when the team does not exist.
#[openapi(tag = "Teams")]
#[get("/teams/<id>/divers")]
pub(crate) async fn team_divers(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<DiverView>>, GenericError> {
    Ok(Json(service::team_divers(db.inner(), id).await?))
}

/// # Team seasons
///
/// Newest season first.
#[openapi(tag = "Teams")]
#[get("/teams/<id>/seasons")]
pub(crate) async fn team_seasons(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<SeasonView>>, GenericError> {
    Ok(Json(service::team_seasons(db.inner(), id).await?))
}

#[openapi(tag = "Meets")]
#[get("/meets")]
pub(crate) async fn list_meets(
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<MeetView>>, GenericError> {
    Ok(Json(service::list_meets(db.inner()).await?))
}

#[openapi(tag = "Meets")]
#[get("/meets/<id>")]
pub(crate) async fn get_meet(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<MeetView>, GenericError> {
    Ok(Json(service::get_meet(db.inner(), id).await?))
}

/// # Dives of a meet
///
/// Ordered by dive number.
#[openapi(tag = "Meets")]
#[get("/meets/<id>/dives")]
pub(crate) async fn meet_dives(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<DiveView>>, GenericError> {
    Ok(Json(service::meet_dives(db.inner(), id).await?))
}

#[openapi(tag = "Meets")]
#[get("/meets/<id>/participants")]
pub(crate) async fn meet_participants(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<MeetParticipantView>>, GenericError> {
    Ok(Json(service::meet_participants(db.inner(), id).await?))
}

#[openapi(tag = "Meets")]
#[get("/meets/<id>/judges")]
pub(crate) async fn meet_judges(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<MeetJudgeView>>, GenericError> {
    Ok(Json(service::meet_judges(db.inner(), id).await?))
}

/// # Meet leaderboard
///
/// # Parameters
///
/// - `team` - Only divers of this team, ignoring case
///
/// - `search` - Only divers whose name contains this, ignoring case
///
/// # Returns
///
/// Divers ranked by total score, highest first, with medals for the top three
#[openapi(tag = "Meets")]
#[get("/meets/<id>/leaderboard?<filter..>")]
pub(crate) async fn meet_leaderboard(
    db: &State<DatabaseConnection>,
    id: i32,
    filter: LeaderboardFilter,
) -> Result<Json<Vec<RankedEntry>>, GenericError> {
    Ok(Json(service::meet_leaderboard(db.inner(), id, &filter).await?))
}

#[openapi(tag = "Divers")]
#[get("/divers")]
pub(crate) async fn list_divers(
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<DiverView>>, GenericError> {
    Ok(Json(service::list_divers(db.inner()).await?))
}

#[openapi(tag = "Divers")]
#[get("/divers/<id>")]
pub(crate) async fn get_diver(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DiverView>, GenericError> {
    Ok(Json(service::get_diver(db.inner(), id).await?))
}

#[openapi(tag = "Divers")]
#[get("/divers/<id>/dives")]
pub(crate) async fn diver_dives(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<DiveView>>, GenericError> {
    Ok(Json(service::diver_dives(db.inner(), id).await?))
}

#[openapi(tag = "Dives")]
#[get("/dives/<id>")]
pub(crate) async fn get_dive(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DiveView>, GenericError> {
    Ok(Json(service::get_dive(db.inner(), id).await?))
}

#[openapi(tag = "Dives")]
#[get("/dives/<id>/scores")]
pub(crate) async fn dive_scores(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<ScoreView>>, GenericError> {
    Ok(Json(service::dive_scores(db.inner(), id).await?))
}

/// # Dive total
///
/// The judges' scores after dropping the extremes, multiplied by the degree of difficulty.
#[openapi(tag = "Dives")]
#[get("/dives/<id>/total")]
pub(crate) async fn dive_total(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<DiveTotal>, GenericError> {
    Ok(Json(service::dive_total(db.inner(), id).await?))
}

/// # Season
///
/// The season with its cycles, meets, practices and the cycle that contains today.
#[openapi(tag = "Seasons")]
#[get("/seasons/<id>")]
pub(crate) async fn get_season(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<SeasonDetail>, GenericError> {
    let today = Utc::now().date_naive();
    Ok(Json(service::season_detail(db.inner(), id, today).await?))
}

#[openapi(tag = "Seasons")]
#[get("/seasons/<id>/cycles")]
pub(crate) async fn season_cycles(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<SeasonCycleView>>, GenericError> {
    Ok(Json(service::season_cycles(db.inner(), id).await?))
}

#[openapi(tag = "Seasons")]
#[get("/seasons/<id>/meets")]
pub(crate) async fn season_meets(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<SeasonMeetView>>, GenericError> {
    Ok(Json(service::season_meets(db.inner(), id).await?))
}

#[openapi(tag = "Seasons")]
#[get("/seasons/<id>/practices")]
pub(crate) async fn season_practices(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<PracticeScheduleView>>, GenericError> {
    Ok(Json(service::season_practices(db.inner(), id).await?))
}

#[openapi(tag = "Seasons")]
#[get("/seasons/<id>/itineraries")]
pub(crate) async fn season_itineraries(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<MeetItineraryView>>, GenericError> {
    Ok(Json(service::season_itineraries(db.inner(), id).await?))
}
