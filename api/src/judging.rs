use log::info;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto::{JudgeSubmission, ScoreView};
use service::error::GenericError;

/// # Submit a score from the judge pad
///
/// # Parameters
///
/// - `judgeId` - The judge submitting the score
///
/// - `score` - The pad text, for example `"8.5"`
///
/// # Errors
///
/// - 400 when the score is outside 0-10 or has more than one decimal digit
///
/// - 403 when the judge is not assigned to the meet
///
/// - 404 when the dive is not part of the meet
///
/// - 409 when the judge already scored the dive
#[openapi(tag = "Judging")]
#[post("/judge/<meet_id>/dives/<dive_id>/score", format = "json", data = "<submission>")]
pub(crate) async fn submit_score(
    meet_id: i32,
    dive_id: i32,
    submission: Json<JudgeSubmission>,
    db: &State<DatabaseConnection>,
) -> Result<Created<Json<ScoreView>>, GenericError> {
    let submission = submission.into_inner();
    let judge_id = submission.judge_id;
    let score = service::submit_judge_score(db.inner(), meet_id, dive_id, submission).await?;
    info!(
        "Judge {judge_id} scored dive {dive_id} of meet {meet_id}: {}",
        score.score
    );
    Ok(Created::new(format!("/api/dives/{dive_id}/scores")).body(Json(score)))
}
