use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use log::{error, info};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rocket::http::{Cookie, CookieJar, SameSite};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{IntoActiveModel, NotSet, TransactionTrait};

use entity::prelude::*;
use entity::*;

use crate::dto::*;
use crate::error::GenericError;
use crate::query::{find_dive, find_meet, find_season, find_team, season_detail};
use crate::season_planning::{meet_creator, stage_cycles};

pub const AUTH_COOKIE: &str = "auth";
const COOKIE_LENGTH: usize = 64;

fn random_cookie_value() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(COOKIE_LENGTH)
        .map(char::from)
        .collect()
}

/// Stores a fresh session for the user and returns its cookie value.
pub async fn store_session(
    db: &impl ConnectionTrait,
    user_id: i32,
) -> Result<String, GenericError> {
    let value = random_cookie_value();
    user_cookies::ActiveModel {
        cookie: Set(value.clone()),
        user_id: Set(user_id),
    }
    .insert(db)
    .await?;
    Ok(value)
}

fn set_session_cookie(cookies: &CookieJar<'_>, value: String) {
    cookies.add_private(Cookie::build((AUTH_COOKIE, value)).same_site(SameSite::Lax));
}

/// Stores a fresh session for the user and hands it to the client as a private cookie.
pub async fn generate_cookie(
    db: &impl ConnectionTrait,
    user_id: i32,
    cookies: &CookieJar<'_>,
) -> Result<(), GenericError> {
    let value = store_session(db, user_id).await?;
    set_session_cookie(cookies, value);
    Ok(())
}

pub async fn remove_cookie(
    db: &impl ConnectionTrait,
    value: &str,
    cookies: &CookieJar<'_>,
) -> Result<(), GenericError> {
    UserCookies::delete_by_id(value.to_owned()).exec(db).await?;
    cookies.remove_private(AUTH_COOKIE);
    Ok(())
}

fn hash_password(password: &str) -> Result<String, GenericError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        error!("Unable to hash password: {e}");
        GenericError::UnknownError("Unable to store password")
    })
}

/// Creates the account and logs it in. The cookie is only sent once both rows are committed.
pub async fn register(
    db: &DatabaseConnection,
    input: InsertUser,
    cookies: &CookieJar<'_>,
) -> Result<AuthUser, GenericError> {
    input.validate()?;
    let hashed = hash_password(&input.password)?;
    let txn = db.begin().await?;
    let user = input.into_active_model(hashed).insert(&txn).await?;
    let session = store_session(&txn, user.id).await?;
    txn.commit().await?;
    set_session_cookie(cookies, session);
    info!("Registered user {} as {:?}", user.username, user.role);
    Ok(user.into())
}

pub async fn create_team(
    db: &impl ConnectionTrait,
    input: InsertTeam,
) -> Result<TeamView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model().insert(db).await?.into())
}

pub async fn update_team(
    db: &impl ConnectionTrait,
    id: i32,
    patch: UpdateTeam,
) -> Result<TeamView, GenericError> {
    patch.validate()?;
    let team = find_team(db, id).await?;
    Ok(patch.apply(team.into_active_model()).update(db).await?.into())
}

/// Removes the team after its divers.
pub async fn delete_team(db: &DatabaseConnection, id: i32) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    let team = find_team(&txn, id).await?;
    let removed = Diver::delete_many()
        .filter(diver::Column::TeamId.eq(team.id))
        .exec(&txn)
        .await?
        .rows_affected;
    team.delete(&txn).await?;
    txn.commit().await?;
    info!("Deleted team {id} and {removed} divers");
    Ok(())
}

pub async fn create_meet(
    db: &impl ConnectionTrait,
    input: InsertMeet,
) -> Result<MeetView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model()?.insert(db).await?.into())
}

pub async fn update_meet_status(
    db: &impl ConnectionTrait,
    id: i32,
    status: StatusUpdate,
) -> Result<MeetView, GenericError> {
    let status: MeetStatus = status.parse()?;
    let mut meet = find_meet(db, id).await?.into_active_model();
    meet.status = Set(status.into());
    Ok(meet.update(db).await?.into())
}

pub async fn create_diver(
    db: &impl ConnectionTrait,
    input: InsertDiver,
) -> Result<DiverView, GenericError> {
    input.validate()?;
    if let Some(team_id) = input.team_id {
        find_team(db, team_id).await?;
    }
    Ok(input.into_active_model().insert(db).await?.into())
}

/// Archiving or deleting a diver that is already gone answers with the requested fields.
pub async fn update_diver(
    db: &impl ConnectionTrait,
    id: i32,
    patch: UpdateDiver,
) -> Result<DiverView, GenericError> {
    let Some(diver) = Diver::find_by_id(id).one(db).await? else {
        return if patch.is_removal() {
            Ok(DiverView::placeholder(id, &patch))
        } else {
            Err(GenericError::NotFound("Diver not found"))
        };
    };
    if let Some(team_id) = patch.team_id {
        find_team(db, team_id).await?;
    }
    Ok(patch.apply(diver.into_active_model()).update(db).await?.into())
}

pub async fn delete_diver(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<DiverDeleted, GenericError> {
    let diver = Diver::find_by_id(id).one(db).await?;
    if let Some(found) = &diver {
        found.clone().delete(db).await?;
    }
    Ok(DiverDeleted {
        message: "Diver deleted successfully".to_string(),
        id,
        diver: diver.into(),
    })
}

pub async fn create_dive(
    db: &impl ConnectionTrait,
    input: InsertDive,
) -> Result<DiveView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model().insert(db).await?.into())
}

pub async fn complete_dive(db: &impl ConnectionTrait, id: i32) -> Result<DiveView, GenericError> {
    let mut dive = find_dive(db, id).await?.into_active_model();
    dive.completed = Set(Some(true));
    Ok(dive.update(db).await?.into())
}

pub async fn create_score(
    db: &impl ConnectionTrait,
    input: InsertScore,
) -> Result<ScoreView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model().insert(db).await?.into())
}

/// A score from the judge pad. The dive must be part of the meet and the judge on its panel.
pub async fn submit_judge_score(
    db: &impl ConnectionTrait,
    meet_id: i32,
    dive_id: i32,
    submission: JudgeSubmission,
) -> Result<ScoreView, GenericError> {
    let score = submission.judge_score()?;
    let dive = find_dive(db, dive_id).await?;
    if dive.meet_id != Some(meet_id) {
        return Err(GenericError::NotFound("Dive not found in this meet"));
    }
    if !crate::query::is_judge_assigned(db, meet_id, submission.judge_id).await? {
        return Err(GenericError::NotPermitted("Judge is not assigned to this meet"));
    }
    let already_scored = Score::find()
        .filter(score::Column::DiveId.eq(dive_id))
        .filter(score::Column::JudgeId.eq(submission.judge_id))
        .one(db)
        .await?
        .is_some();
    if already_scored {
        return Err(GenericError::Conflict("This judge has already scored this dive."));
    }
    let saved = score::ActiveModel {
        id: NotSet,
        dive_id: Set(Some(dive_id)),
        judge_id: Set(Some(submission.judge_id)),
        score: Set(score.value()),
        created_at: NotSet,
    }
    .insert(db)
    .await?;
    Ok(saved.into())
}

pub async fn add_participant(
    db: &impl ConnectionTrait,
    input: InsertMeetParticipant,
) -> Result<MeetParticipantView, GenericError> {
    Ok(input.into_active_model().insert(db).await?.into())
}

pub async fn remove_participant(
    db: &impl ConnectionTrait,
    meet_id: i32,
    diver_id: i32,
) -> Result<(), GenericError> {
    MeetParticipant::delete_by_id((meet_id, diver_id)).exec(db).await?;
    Ok(())
}

pub async fn add_judge(
    db: &impl ConnectionTrait,
    input: InsertMeetJudge,
) -> Result<MeetJudgeView, GenericError> {
    Ok(input.into_active_model().insert(db).await?.into())
}

pub async fn remove_judge(
    db: &impl ConnectionTrait,
    meet_id: i32,
    judge_id: i32,
) -> Result<(), GenericError> {
    MeetJudge::delete_by_id((meet_id, judge_id)).exec(db).await?;
    Ok(())
}

/// Creates a season together with its stages, meets and practices in one transaction.
pub async fn create_season(
    db: &DatabaseConnection,
    input: CreateSeason,
) -> Result<SeasonDetail, GenericError> {
    input.validate()?;
    let CreateSeason {
        season,
        stages,
        meets,
        practices,
    } = input;
    let creator = meet_creator(Some(season.created_by));

    let txn = db.begin().await?;
    let season = season.into_active_model().insert(&txn).await?;

    for cycle in stage_cycles(season.id, &stages)? {
        cycle.into_active_model().insert(&txn).await?;
    }
    for planned in &meets {
        let meet = planned.to_meet(creator).into_active_model()?.insert(&txn).await?;
        planned
            .to_season_meet(season.id, meet.id)
            .into_active_model()?
            .insert(&txn)
            .await?;
    }
    for practice in practices {
        practice
            .for_season(season.id)
            .into_active_model()?
            .insert(&txn)
            .await?;
    }

    let detail = season_detail(&txn, season.id, Utc::now().date_naive()).await?;
    txn.commit().await?;
    info!(
        "Created season {} with {} cycles and {} meets",
        season.id,
        detail.cycles.len(),
        detail.meets.len()
    );
    Ok(detail)
}

pub async fn update_season_status(
    db: &impl ConnectionTrait,
    id: i32,
    status: StatusUpdate,
) -> Result<SeasonView, GenericError> {
    let status: SeasonStatus = status.parse()?;
    let mut season = find_season(db, id).await?.into_active_model();
    season.status = Set(status.into());
    Ok(season.update(db).await?.into())
}

pub async fn create_season_cycle(
    db: &impl ConnectionTrait,
    input: InsertSeasonCycle,
) -> Result<SeasonCycleView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model().insert(db).await?.into())
}

pub async fn create_season_meet(
    db: &impl ConnectionTrait,
    input: InsertSeasonMeet,
) -> Result<SeasonMeetView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model()?.insert(db).await?.into())
}

pub async fn create_practice_schedule(
    db: &impl ConnectionTrait,
    input: InsertPracticeSchedule,
) -> Result<PracticeScheduleView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model()?.insert(db).await?.into())
}

pub async fn create_meet_itinerary(
    db: &impl ConnectionTrait,
    input: InsertMeetItinerary,
) -> Result<MeetItineraryView, GenericError> {
    input.validate()?;
    Ok(input.into_active_model().insert(db).await?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use entity::sea_orm_active_enums::{
        CycleType as DbCycleType, MeetStatus as DbMeetStatus, PracticeType as DbPracticeType,
        SeasonStatus as DbSeasonStatus,
    };
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn dive(meet_id: i32) -> dive::Model {
        dive::Model {
            id: 12,
            meet_id: Some(meet_id),
            diver_id: Some(3),
            number: 2,
            name: "Inward Dive Pike".to_string(),
            difficulty: 1.6,
            completed: Some(false),
            created_at: None,
        }
    }

    fn submission(score: &str) -> JudgeSubmission {
        JudgeSubmission {
            judge_id: 7,
            score: score.to_string(),
        }
    }

    #[tokio::test]
    async fn judge_score_must_belong_to_the_meet() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dive(2)]])
            .into_connection();
        let result = submit_judge_score(&db, 1, 12, submission("7.5")).await;
        assert!(matches!(result, Err(GenericError::NotFound(_))));
    }

    #[tokio::test]
    async fn unassigned_judge_is_refused() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dive(1)]])
            .append_query_results([Vec::<meet_judge::Model>::new()])
            .into_connection();
        let result = submit_judge_score(&db, 1, 12, submission("7.5")).await;
        assert!(matches!(result, Err(GenericError::NotPermitted(_))));
    }

    #[tokio::test]
    async fn second_score_from_a_judge_conflicts() {
        let existing = score::Model {
            id: 40,
            dive_id: Some(12),
            judge_id: Some(7),
            score: 6.0,
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dive(1)]])
            .append_query_results([vec![meet_judge::Model {
                meet_id: 1,
                judge_id: 7,
                created_at: None,
            }]])
            .append_query_results([vec![existing]])
            .into_connection();
        let result = submit_judge_score(&db, 1, 12, submission("7.5")).await;
        assert!(matches!(result, Err(GenericError::Conflict(_))));
    }

    #[tokio::test]
    async fn judge_score_is_stored() {
        let saved = score::Model {
            id: 41,
            dive_id: Some(12),
            judge_id: Some(7),
            score: 8.5,
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dive(1)]])
            .append_query_results([vec![meet_judge::Model {
                meet_id: 1,
                judge_id: 7,
                created_at: None,
            }]])
            .append_query_results([Vec::<score::Model>::new()])
            .append_query_results([vec![saved]])
            .into_connection();
        let stored = submit_judge_score(&db, 1, 12, submission("8.5")).await.unwrap();
        assert_eq!(stored.score, 8.5);
        assert_eq!(stored.judge_id, Some(7));
    }

    #[tokio::test]
    async fn malformed_pad_text_never_reaches_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let result = submit_judge_score(&db, 1, 12, submission("8.55")).await;
        assert!(matches!(result, Err(GenericError::BadRequest(_))));
    }

    #[tokio::test]
    async fn archiving_a_missing_diver_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<diver::Model>::new()])
            .into_connection();
        let patch = UpdateDiver {
            status: Some(DiverStatus::Archived),
            ..UpdateDiver::default()
        };
        let diver = update_diver(&db, 99, patch).await.unwrap();
        assert_eq!(diver.id, 99);
        assert_eq!(diver.status, Some(DiverStatus::Archived));
    }

    #[tokio::test]
    async fn editing_a_missing_diver_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<diver::Model>::new()])
            .into_connection();
        let patch = UpdateDiver {
            age: Some(18),
            ..UpdateDiver::default()
        };
        assert!(matches!(
            update_diver(&db, 99, patch).await,
            Err(GenericError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn deleting_a_missing_diver_still_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<diver::Model>::new()])
            .into_connection();
        let deleted = delete_diver(&db, 5).await.unwrap();
        assert_eq!(deleted.id, 5);
        assert_eq!(deleted.diver, RemovedDiver::Missing {});
        let body = serde_json::to_value(&deleted).unwrap();
        assert_eq!(body["diver"], serde_json::json!({}));
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn cycle_row(id: i32, cycle_type: DbCycleType, start: &str, end: &str) -> season_cycle::Model {
        season_cycle::Model {
            id,
            season_id: 9,
            cycle_type,
            start_date: day(start),
            end_date: day(end),
            created_at: None,
        }
    }

    fn planned_season() -> CreateSeason {
        CreateSeason {
            season: InsertSeason {
                team_id: 1,
                name: "2025-26".to_string(),
                start_year: 2025,
                end_year: 2026,
                status: None,
                created_by: 0,
            },
            stages: vec![
                PlannedStage {
                    cycle_type: CycleType::Regular,
                    start_date: "2025-10-15".to_string(),
                },
                PlannedStage {
                    cycle_type: CycleType::Preseason,
                    start_date: "2025-09-01".to_string(),
                },
            ],
            meets: vec![PlannedMeet {
                opponent: "Amherst".to_string(),
                date: "2025-11-08".to_string(),
                location: None,
                is_home: false,
                cycle_type: CycleType::Regular,
                start_time: Some("18:00".to_string()),
            }],
            practices: vec![PlannedPractice {
                name: "Board work".to_string(),
                practice_type: PracticeType::Diving,
                day_of_week: 1,
                start_time: "15:30".to_string(),
                end_time: "17:30".to_string(),
                location: None,
                notes: None,
            }],
        }
    }

    #[tokio::test]
    async fn season_is_created_with_its_plan_in_one_transaction() {
        let season = season::Model {
            id: 9,
            team_id: 1,
            name: "2025-26".to_string(),
            start_year: 2025,
            end_year: 2026,
            status: DbSeasonStatus::Active,
            created_by: 0,
            created_at: None,
        };
        let preseason = cycle_row(1, DbCycleType::Preseason, "2025-09-01", "2025-10-15");
        let regular = cycle_row(2, DbCycleType::Regular, "2025-10-15", "2025-11-14");
        let meet = meet::Model {
            id: 21,
            name: "vs Amherst".to_string(),
            location: "Amherst Pool".to_string(),
            date: day("2025-11-08").and_time(NaiveTime::default()),
            status: DbMeetStatus::Scheduled,
            created_by: Some(1),
            created_at: None,
        };
        let link = season_meet::Model {
            id: 5,
            season_id: 9,
            meet_id: 21,
            opponent: Some("Amherst".to_string()),
            is_home: Some(false),
            cycle_type: DbCycleType::Regular,
            start_time: Some(at(18, 0)),
            created_at: None,
        };
        let practice = practice_schedule::Model {
            id: 3,
            season_id: 9,
            name: "Board work".to_string(),
            practice_type: DbPracticeType::Diving,
            day_of_week: 1,
            start_time: at(15, 30),
            end_time: at(17, 30),
            location: None,
            notes: None,
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![season.clone()]])
            .append_query_results([vec![preseason.clone()], vec![regular.clone()]])
            .append_query_results([vec![meet]])
            .append_query_results([vec![link.clone()]])
            .append_query_results([vec![practice.clone()]])
            .append_query_results([vec![season]])
            .append_query_results([vec![preseason, regular]])
            .append_query_results([vec![link]])
            .append_query_results([vec![practice]])
            .into_connection();

        let detail = create_season(&db, planned_season()).await.unwrap();
        assert_eq!(detail.season.id, 9);
        assert_eq!(detail.cycles.len(), 2);
        assert_eq!(detail.cycles[0].cycle_type, CycleType::Preseason);
        assert_eq!(detail.meets.len(), 1);
        assert_eq!(detail.meets[0].meet_id, 21);
        assert_eq!(detail.meets[0].opponent.as_deref(), Some("Amherst"));
        assert_eq!(detail.practices.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("vs Amherst"));
        assert!(log.contains("Amherst Pool"));
    }

    #[tokio::test]
    async fn invalid_season_plan_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut plan = planned_season();
        plan.practices[0].day_of_week = 9;
        assert!(create_season(&db, plan).await.is_err());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn diver_for_unknown_team_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<team::Model>::new()])
            .into_connection();
        let input = InsertDiver {
            user_id: None,
            team_id: Some(404),
            first_name: Some("Jamie".to_string()),
            last_name: None,
            age: None,
            gender: None,
            grad_year: None,
            avg_score: None,
            email: None,
            is_captain: None,
            status: None,
            image_url: None,
        };
        assert!(matches!(
            create_diver(&db, input).await,
            Err(GenericError::NotFound("Team not found"))
        ));
    }

    #[tokio::test]
    async fn meet_status_rejects_unknown_values() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let result = update_meet_status(
            &db,
            1,
            StatusUpdate {
                status: "postponed".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(GenericError::BadRequest("Invalid status"))));
    }

    #[tokio::test]
    async fn meet_status_is_updated() {
        let meet = |status| meet::Model {
            id: 1,
            name: "Duals".to_string(),
            location: "Home Pool".to_string(),
            date: Utc::now().naive_utc(),
            status,
            created_by: None,
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![meet(DbMeetStatus::Upcoming)]])
            .append_query_results([vec![meet(DbMeetStatus::Active)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let updated = update_meet_status(
            &db,
            1,
            StatusUpdate {
                status: "active".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, MeetStatus::Active);
    }
}
