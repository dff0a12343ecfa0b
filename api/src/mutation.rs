use rocket::response::status::{Created, NoContent};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::*;
use service::error::GenericError;

fn created<T>(location: String, body: T) -> Created<Json<T>> {
    Created::new(location).body(Json(body))
}

/// # Create a team
///
/// # Errors
///
/// - 400 when `name` is empty or `code` is empty or longer than 10 characters
///
/// - 409 when the team code is already in use
#[openapi(tag = "Teams")]
#[post("/teams", format = "json", data = "<team>")]
pub(crate) async fn create_team(
    team: Json<InsertTeam>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<TeamView>>, GenericError> {
    let team = service::create_team(db.inner(), team.into_inner()).await?;
    Ok(created(format!("/api/teams/{}", team.id), team))
}

#[openapi(tag = "Teams")]
#[patch("/teams/<id>", format = "json", data = "<patch>")]
pub(crate) async fn update_team(
    id: i32,
    patch: Json<UpdateTeam>,
    db: &State<DatabaseConnection>,
) -> Result<Json<TeamView>, GenericError> {
    Ok(Json(service::update_team(db.inner(), id, patch.into_inner()).await?))
}

/// # Delete a team
///
/// Its divers are deleted first.
#[openapi(tag = "Teams")]
#[delete("/teams/<id>")]
pub(crate) async fn delete_team(
    id: i32,
    db: &State<DatabaseConnection>,
) -> Result<Json<Message>, GenericError> {
    service::delete_team(db.inner(), id).await?;
    Ok(Json(Message::new("Team deleted successfully")))
}

#[openapi(tag = "Meets")]
#[post("/meets", format = "json", data = "<meet>")]
pub(crate) async fn create_meet(
    meet: Json<InsertMeet>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<MeetView>>, GenericError> {
    let meet = service::create_meet(db.inner(), meet.into_inner()).await?;
    Ok(created(format!("/api/meets/{}", meet.id), meet))
}

/// # Change the status of a meet
///
/// Accepts `upcoming`, `scheduled`, `active` or `completed`.
#[openapi(tag = "Meets")]
#[patch("/meets/<id>/status", format = "json", data = "<status>")]
pub(crate) async fn update_meet_status(
    id: i32,
    status: Json<StatusUpdate>,
    db: &State<DatabaseConnection>,
) -> Result<Json<MeetView>, GenericError> {
    Ok(Json(
        service::update_meet_status(db.inner(), id, status.into_inner()).await?,
    ))
}

#[openapi(tag = "Meets")]
#[post("/meet-participants", format = "json", data = "<participant>")]
pub(crate) async fn add_participant(
    participant: Json<InsertMeetParticipant>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<MeetParticipantView>>, GenericError> {
    let participant = service::add_participant(db.inner(), participant.into_inner()).await?;
    Ok(created(
        format!("/api/meets/{}/participants", participant.meet_id),
        participant,
    ))
}

#[openapi(tag = "Meets")]
#[delete("/meets/<meet_id>/participants/<diver_id>")]
pub(crate) async fn remove_participant(
    meet_id: i32,
    diver_id: i32,
    db: &State<DatabaseConnection>,
) -> Result<NoContent, GenericError> {
    service::remove_participant(db.inner(), meet_id, diver_id).await?;
    Ok(NoContent)
}

#[openapi(tag = "Meets")]
#[post("/meet-judges", format = "json", data = "<judge>")]
pub(crate) async fn add_judge(
    judge: Json<InsertMeetJudge>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<MeetJudgeView>>, GenericError> {
    let judge = service::add_judge(db.inner(), judge.into_inner()).await?;
    Ok(created(format!("/api/meets/{}/judges", judge.meet_id), judge))
}

#[openapi(tag = "Meets")]
#[delete("/meets/<meet_id>/judges/<judge_id>")]
pub(crate) async fn remove_judge(
    meet_id: i32,
    judge_id: i32,
    db: &State<DatabaseConnection>,
) -> Result<NoContent, GenericError> {
    service::remove_judge(db.inner(), meet_id, judge_id).await?;
    Ok(NoContent)
}

/// # Add a diver
///
/// # Errors
///
/// - 400 "Valid teamId is required" when no team is given
///
/// - 404 "Team not found" when the team does not exist
#[openapi(tag = "Divers")]
#[post("/divers", format = "json", data = "<diver>")]
pub(crate) async fn create_diver(
    diver: Json<InsertDiver>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<DiverView>>, GenericError> {
    let diver = service::create_diver(db.inner(), diver.into_inner()).await?;
    Ok(created(format!("/api/divers/{}", diver.id), diver))
}

/// # Update a diver
///
/// Archiving or deleting a diver that no longer exists still succeeds.
#[openapi(tag = "Divers")]
#[patch("/divers/<id>", format = "json", data = "<patch>")]
pub(crate) async fn update_diver(
    id: i32,
    patch: Json<UpdateDiver>,
    db: &State<DatabaseConnection>,
) -> Result<Json<DiverView>, GenericError> {
    Ok(Json(service::update_diver(db.inner(), id, patch.into_inner()).await?))
}

#[openapi(tag = "Divers")]
#[delete("/divers/<id>")]
pub(crate) async fn delete_diver(
    id: i32,
    db: &State<DatabaseConnection>,
) -> Result<Json<DiverDeleted>, GenericError> {
    Ok(Json(service::delete_diver(db.inner(), id).await?))
}

#[openapi(tag = "Dives")]
#[post("/dives", format = "json", data = "<dive>")]
pub(crate) async fn create_dive(
    dive: Json<InsertDive>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<DiveView>>, GenericError> {
    let dive = service::create_dive(db.inner(), dive.into_inner()).await?;
    Ok(created(format!("/api/dives/{}", dive.id), dive))
}

#[openapi(tag = "Dives")]
#[patch("/dives/<id>/complete")]
pub(crate) async fn complete_dive(
    id: i32,
    db: &State<DatabaseConnection>,
) -> Result<Json<DiveView>, GenericError> {
    Ok(Json(service::complete_dive(db.inner(), id).await?))
}

#[openapi(tag = "Dives")]
#[post("/scores", format = "json", data = "<score>")]
pub(crate) async fn create_score(
    score: Json<InsertScore>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<ScoreView>>, GenericError> {
    let score = service::create_score(db.inner(), score.into_inner()).await?;
    Ok(created(format!("/api/scores/{}", score.id), score))
}

/// # Plan a season
///
/// Creates the season, its stages as cycles, its planned meets and practices in one go.
///
/// # Returns
///
/// The complete season
#[openapi(tag = "Seasons")]
#[post("/seasons", format = "json", data = "<season>")]
pub(crate) async fn create_season(
    season: Json<CreateSeason>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<SeasonDetail>>, GenericError> {
    let season = service::create_season(db.inner(), season.into_inner()).await?;
    Ok(created(format!("/api/seasons/{}", season.season.id), season))
}

#[openapi(tag = "Seasons")]
#[patch("/seasons/<id>/status", format = "json", data = "<status>")]
pub(crate) async fn update_season_status(
    id: i32,
    status: Json<StatusUpdate>,
    db: &State<DatabaseConnection>,
) -> Result<Json<SeasonView>, GenericError> {
    Ok(Json(
        service::update_season_status(db.inner(), id, status.into_inner()).await?,
    ))
}

#[openapi(tag = "Seasons")]
#[post("/season-cycles", format = "json", data = "<cycle>")]
pub(crate) async fn create_season_cycle(
    cycle: Json<InsertSeasonCycle>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<SeasonCycleView>>, GenericError> {
    let cycle = service::create_season_cycle(db.inner(), cycle.into_inner()).await?;
    Ok(created(format!("/api/seasons/{}/cycles", cycle.season_id), cycle))
}

#[openapi(tag = "Seasons")]
#[post("/season-meets", format = "json", data = "<meet>")]
pub(crate) async fn create_season_meet(
    meet: Json<InsertSeasonMeet>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<SeasonMeetView>>, GenericError> {
    let meet = service::create_season_meet(db.inner(), meet.into_inner()).await?;
    Ok(created(format!("/api/seasons/{}/meets", meet.season_id), meet))
}

#[openapi(tag = "Seasons")]
#[post("/practice-schedules", format = "json", data = "<practice>")]
pub(crate) async fn create_practice_schedule(
    practice: Json<InsertPracticeSchedule>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<PracticeScheduleView>>, GenericError> {
    let practice = service::create_practice_schedule(db.inner(), practice.into_inner()).await?;
    Ok(created(
        format!("/api/seasons/{}/practices", practice.season_id),
        practice,
    ))
}

#[openapi(tag = "Seasons")]
#[post("/meet-itineraries", format = "json", data = "<itinerary>")]
pub(crate) async fn create_meet_itinerary(
    itinerary: Json<InsertMeetItinerary>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<MeetItineraryView>>, GenericError> {
    let itinerary = service::create_meet_itinerary(db.inner(), itinerary.into_inner()).await?;
    let location = match itinerary.season_id {
        Some(season_id) => format!("/api/seasons/{season_id}/itineraries"),
        None => "/api/meet-itineraries".to_string(),
    };
    Ok(created(location, itinerary))
}
