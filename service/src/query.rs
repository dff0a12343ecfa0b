use bcrypt::verify;
use chrono::NaiveDate;
use itertools::Itertools;
use log::warn;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use std::collections::HashSet;

use entity::prelude::*;
use entity::sea_orm_active_enums::DiverStatus as DbDiverStatus;
use entity::*;

use crate::achievements::{self, BadgeProgress, TeamStats};
use crate::dto::*;
use crate::error::GenericError;
use crate::leaderboard::{Leaderboard, LeaderboardFilter, RankedEntry};
use crate::scoring;
use crate::season_planning::current_cycle_type;

/// Returns the user when the password matches the stored hash.
pub async fn authenticate(
    db: &impl ConnectionTrait,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>, GenericError> {
    let user = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(user.filter(|u| match verify(password, &u.password) {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Stored password hash for {} is unreadable: {e}", u.username);
            false
        }
    }))
}

pub async fn user_by_cookie(
    db: &impl ConnectionTrait,
    cookie: &str,
) -> Result<Option<user::Model>, GenericError> {
    let Some(cookie) = UserCookies::find_by_id(cookie.to_owned()).one(db).await? else {
        return Ok(None);
    };
    Ok(User::find_by_id(cookie.user_id).one(db).await?)
}

pub async fn get_user(db: &impl ConnectionTrait, id: i32) -> Result<UserView, GenericError> {
    User::find_by_id(id)
        .one(db)
        .await?
        .map(UserView::from)
        .ok_or(GenericError::NotFound("User not found"))
}

pub async fn list_teams(db: &impl ConnectionTrait) -> Result<Vec<TeamView>, GenericError> {
    let teams = Team::find().order_by_asc(team::Column::Name).all(db).await?;
    Ok(teams.into_iter().map_into().collect())
}

pub(crate) async fn find_team(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<team::Model, GenericError> {
    Team::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Team not found"))
}

pub async fn get_team(db: &impl ConnectionTrait, id: i32) -> Result<TeamView, GenericError> {
    find_team(db, id).await.map(TeamView::from)
}

pub async fn team_divers(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<Vec<DiverView>, GenericError> {
    let team = find_team(db, team_id).await?;
    let divers = team
        .find_related(Diver)
        .order_by_asc(diver::Column::LastName)
        .order_by_asc(diver::Column::FirstName)
        .all(db)
        .await?;
    Ok(divers.into_iter().map_into().collect())
}

/// Newest season first.
pub async fn team_seasons(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<Vec<SeasonView>, GenericError> {
    let seasons = Season::find()
        .filter(season::Column::TeamId.eq(team_id))
        .order_by_desc(season::Column::StartYear)
        .order_by_desc(season::Column::Id)
        .all(db)
        .await?;
    Ok(seasons.into_iter().map_into().collect())
}

/// Most recent meet first.
pub async fn list_meets(db: &impl ConnectionTrait) -> Result<Vec<MeetView>, GenericError> {
    let meets = Meet::find().order_by_desc(meet::Column::Date).all(db).await?;
    Ok(meets.into_iter().map_into().collect())
}

pub(crate) async fn find_meet(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<meet::Model, GenericError> {
    Meet::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Meet not found"))
}

pub async fn get_meet(db: &impl ConnectionTrait, id: i32) -> Result<MeetView, GenericError> {
    find_meet(db, id).await.map(MeetView::from)
}

/// In running order.
pub async fn meet_dives(
    db: &impl ConnectionTrait,
    meet_id: i32,
) -> Result<Vec<DiveView>, GenericError> {
    let dives = Dive::find()
        .filter(dive::Column::MeetId.eq(meet_id))
        .order_by_asc(dive::Column::Number)
        .all(db)
        .await?;
    Ok(dives.into_iter().map_into().collect())
}

pub async fn meet_participants(
    db: &impl ConnectionTrait,
    meet_id: i32,
) -> Result<Vec<MeetParticipantView>, GenericError> {
    let participants = MeetParticipant::find()
        .filter(meet_participant::Column::MeetId.eq(meet_id))
        .all(db)
        .await?;
    Ok(participants.into_iter().map_into().collect())
}

pub async fn meet_judges(
    db: &impl ConnectionTrait,
    meet_id: i32,
) -> Result<Vec<MeetJudgeView>, GenericError> {
    let judges = MeetJudge::find()
        .filter(meet_judge::Column::MeetId.eq(meet_id))
        .all(db)
        .await?;
    Ok(judges.into_iter().map_into().collect())
}

pub async fn is_judge_assigned(
    db: &impl ConnectionTrait,
    meet_id: i32,
    judge_id: i32,
) -> Result<bool, GenericError> {
    Ok(MeetJudge::find_by_id((meet_id, judge_id))
        .one(db)
        .await?
        .is_some())
}

async fn scores_for_dives(
    db: &impl ConnectionTrait,
    dive_ids: Vec<i32>,
) -> Result<Vec<score::Model>, GenericError> {
    if dive_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Score::find()
        .filter(score::Column::DiveId.is_in(dive_ids))
        .all(db)
        .await?)
}

async fn leaderboard_for_dives(
    db: &impl ConnectionTrait,
    dives: &[dive::Model],
) -> Result<Leaderboard, GenericError> {
    let scores = scores_for_dives(db, dives.iter().map(|d| d.id).collect()).await?;
    let diver_ids = dives.iter().filter_map(|d| d.diver_id).unique().collect_vec();
    if diver_ids.is_empty() {
        return Ok(Leaderboard::new(Vec::new()));
    }
    let divers = Diver::find()
        .filter(diver::Column::Id.is_in(diver_ids))
        .all(db)
        .await?;
    let team_ids = divers.iter().filter_map(|d| d.team_id).unique().collect_vec();
    let teams = if team_ids.is_empty() {
        Vec::new()
    } else {
        Team::find()
            .filter(team::Column::Id.is_in(team_ids))
            .all(db)
            .await?
    };
    Ok(Leaderboard::from_meet(dives, &scores, &divers, &teams))
}

pub async fn meet_leaderboard(
    db: &impl ConnectionTrait,
    meet_id: i32,
    filter: &LeaderboardFilter,
) -> Result<Vec<RankedEntry>, GenericError> {
    find_meet(db, meet_id).await?;
    let dives = Dive::find()
        .filter(dive::Column::MeetId.eq(meet_id))
        .all(db)
        .await?;
    Ok(leaderboard_for_dives(db, &dives).await?.ranked(filter))
}

pub async fn list_divers(db: &impl ConnectionTrait) -> Result<Vec<DiverView>, GenericError> {
    let divers = Diver::find().order_by_asc(diver::Column::Id).all(db).await?;
    Ok(divers.into_iter().map_into().collect())
}

pub async fn get_diver(db: &impl ConnectionTrait, id: i32) -> Result<DiverView, GenericError> {
    Diver::find_by_id(id)
        .one(db)
        .await?
        .map(DiverView::from)
        .ok_or(GenericError::NotFound("Diver not found"))
}

pub async fn diver_dives(
    db: &impl ConnectionTrait,
    diver_id: i32,
) -> Result<Vec<DiveView>, GenericError> {
    let dives = Dive::find()
        .filter(dive::Column::DiverId.eq(diver_id))
        .order_by_asc(dive::Column::MeetId)
        .order_by_asc(dive::Column::Number)
        .all(db)
        .await?;
    Ok(dives.into_iter().map_into().collect())
}

pub(crate) async fn find_dive(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<dive::Model, GenericError> {
    Dive::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Dive not found"))
}

pub async fn get_dive(db: &impl ConnectionTrait, id: i32) -> Result<DiveView, GenericError> {
    find_dive(db, id).await.map(DiveView::from)
}

pub async fn dive_scores(
    db: &impl ConnectionTrait,
    dive_id: i32,
) -> Result<Vec<ScoreView>, GenericError> {
    let scores = Score::find()
        .filter(score::Column::DiveId.eq(dive_id))
        .order_by_asc(score::Column::Id)
        .all(db)
        .await?;
    Ok(scores.into_iter().map_into().collect())
}

pub async fn dive_total(
    db: &impl ConnectionTrait,
    dive_id: i32,
) -> Result<DiveTotal, GenericError> {
    let dive = find_dive(db, dive_id).await?;
    let scores = dive
        .find_related(Score)
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.score)
        .collect_vec();
    Ok(DiveTotal {
        dive_id: dive.id,
        difficulty: dive.difficulty,
        raw_total: scoring::raw_total(&scores),
        total: scoring::dive_total(&scores, dive.difficulty),
        scores,
    })
}

pub(crate) async fn find_season(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<season::Model, GenericError> {
    Season::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Season not found"))
}

pub async fn season_cycles(
    db: &impl ConnectionTrait,
    season_id: i32,
) -> Result<Vec<SeasonCycleView>, GenericError> {
    let cycles = SeasonCycle::find()
        .filter(season_cycle::Column::SeasonId.eq(season_id))
        .order_by_asc(season_cycle::Column::StartDate)
        .all(db)
        .await?;
    Ok(cycles.into_iter().map_into().collect())
}

pub async fn season_meets(
    db: &impl ConnectionTrait,
    season_id: i32,
) -> Result<Vec<SeasonMeetView>, GenericError> {
    let meets = SeasonMeet::find()
        .filter(season_meet::Column::SeasonId.eq(season_id))
        .order_by_asc(season_meet::Column::Id)
        .all(db)
        .await?;
    Ok(meets.into_iter().map_into().collect())
}

pub async fn season_practices(
    db: &impl ConnectionTrait,
    season_id: i32,
) -> Result<Vec<PracticeScheduleView>, GenericError> {
    let practices = PracticeSchedule::find()
        .filter(practice_schedule::Column::SeasonId.eq(season_id))
        .order_by_asc(practice_schedule::Column::DayOfWeek)
        .order_by_asc(practice_schedule::Column::StartTime)
        .all(db)
        .await?;
    Ok(practices.into_iter().map_into().collect())
}

pub async fn season_itineraries(
    db: &impl ConnectionTrait,
    season_id: i32,
) -> Result<Vec<MeetItineraryView>, GenericError> {
    let itineraries = MeetItinerary::find()
        .filter(meet_itinerary::Column::SeasonId.eq(season_id))
        .order_by_asc(meet_itinerary::Column::Id)
        .all(db)
        .await?;
    Ok(itineraries.into_iter().map_into().collect())
}

/// The season with its cycles, meets and practices. `today` decides the current cycle.
pub async fn season_detail(
    db: &impl ConnectionTrait,
    id: i32,
    today: NaiveDate,
) -> Result<SeasonDetail, GenericError> {
    let season = find_season(db, id).await?;
    let cycles = season_cycles(db, id).await?;
    let meets = season_meets(db, id).await?;
    let practices = season_practices(db, id).await?;
    Ok(SeasonDetail {
        season: season.into(),
        current_cycle: current_cycle_type(&cycles, today),
        cycles,
        meets,
        practices,
    })
}

fn is_on_roster(diver: &diver::Model) -> bool {
    !matches!(
        diver.status,
        Some(DbDiverStatus::Archived) | Some(DbDiverStatus::Deleted)
    )
}

/// Counts used for the team's achievement progress.
pub async fn team_stats(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<TeamStats, GenericError> {
    let team = find_team(db, team_id).await?;
    let divers = team.find_related(Diver).all(db).await?;
    let seasons_planned = team.find_related(Season).all(db).await?.len() as u64;
    let roster_size = divers.iter().filter(|d| is_on_roster(d)).count() as u64;
    let diver_ids: HashSet<i32> = divers.iter().map(|d| d.id).collect();
    if diver_ids.is_empty() {
        return Ok(TeamStats {
            seasons_planned,
            ..TeamStats::default()
        });
    }

    let entries = MeetParticipant::find()
        .filter(meet_participant::Column::DiverId.is_in(diver_ids.iter().copied()))
        .all(db)
        .await?;
    let meet_ids = entries.iter().map(|p| p.meet_id).unique().collect_vec();

    let completed_dives = Dive::find()
        .filter(dive::Column::DiverId.is_in(diver_ids.iter().copied()))
        .filter(dive::Column::Completed.eq(true))
        .all(db)
        .await?
        .len() as u64;

    let mut podium_finishes = 0;
    if !meet_ids.is_empty() {
        let dives = Dive::find()
            .filter(dive::Column::MeetId.is_in(meet_ids.iter().copied()))
            .order_by_asc(dive::Column::MeetId)
            .all(db)
            .await?;
        let scores = scores_for_dives(db, dives.iter().map(|d| d.id).collect()).await?;
        let competitors = dives.iter().filter_map(|d| d.diver_id).unique().collect_vec();
        let all_divers = Diver::find()
            .filter(diver::Column::Id.is_in(competitors))
            .all(db)
            .await?;
        for (_, meet_dives) in &dives.into_iter().group_by(|d| d.meet_id) {
            let meet_dives = meet_dives.collect_vec();
            let board = Leaderboard::from_meet(&meet_dives, &scores, &all_divers, &[]);
            if board
                .entries()
                .iter()
                .take(3)
                .any(|e| diver_ids.contains(&e.diver_id))
            {
                podium_finishes += 1;
            }
        }
    }

    Ok(TeamStats {
        roster_size,
        meets_attended: meet_ids.len() as u64,
        completed_dives,
        podium_finishes,
        seasons_planned,
    })
}

pub async fn team_achievements(
    db: &impl ConnectionTrait,
    team_id: i32,
) -> Result<Vec<BadgeProgress>, GenericError> {
    let stats = team_stats(db, team_id).await?;
    Ok(achievements::progress(&stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::sea_orm_active_enums::{
        MeetStatus as DbMeetStatus, SeasonStatus as DbSeasonStatus, UserRole as DbUserRole,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn team(id: i32, name: &str) -> team::Model {
        team::Model {
            id,
            name: name.to_string(),
            code: name[..3].to_uppercase(),
            coach_id: None,
            mascot: None,
            division: None,
            address: None,
            primary_color: Some("#E11D48".to_string()),
            secondary_color: Some("#7C3AED".to_string()),
            banner_url: None,
            logo_url: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn missing_team_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<team::Model>::new()])
            .into_connection();
        let result = get_team(&db, 9).await;
        assert!(matches!(result, Err(GenericError::NotFound("Team not found"))));
    }

    #[tokio::test]
    async fn team_is_returned_as_a_view() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team(1, "Sharks")]])
            .into_connection();
        let team = get_team(&db, 1).await.unwrap();
        assert_eq!(team.code, "SHA");
        assert_eq!(team.primary_color.as_deref(), Some("#E11D48"));
    }

    #[tokio::test]
    async fn wrong_password_does_not_authenticate() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        let user = user::Model {
            id: 3,
            username: "coach".to_string(),
            password: hash,
            name: "Coach Carter".to_string(),
            email: "coach@example.com".to_string(),
            role: DbUserRole::Coach,
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user.clone()], vec![user]])
            .into_connection();
        assert!(authenticate(&db, "coach", "battery staple").await.unwrap().is_none());
        assert_eq!(
            authenticate(&db, "coach", "correct horse").await.unwrap().map(|u| u.id),
            Some(3)
        );
    }

    #[tokio::test]
    async fn dive_total_uses_the_panel() {
        let dive = dive::Model {
            id: 5,
            meet_id: Some(1),
            diver_id: Some(2),
            number: 1,
            name: "Back Dive Layout".to_string(),
            difficulty: 2.0,
            completed: Some(true),
            created_at: None,
        };
        let scores = [6.0, 6.5, 7.0].map(|s| score::Model {
            id: 1,
            dive_id: Some(5),
            judge_id: Some(1),
            score: s,
            created_at: None,
        });
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dive]])
            .append_query_results([scores.to_vec()])
            .into_connection();
        let total = dive_total(&db, 5).await.unwrap();
        assert_eq!(total.raw_total, 19.5);
        assert_eq!(total.total, 39.0);
    }

    #[tokio::test]
    async fn leaderboard_of_missing_meet_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<meet::Model>::new()])
            .into_connection();
        let result = meet_leaderboard(&db, 4, &LeaderboardFilter::default()).await;
        assert!(matches!(result, Err(GenericError::NotFound("Meet not found"))));
    }

    #[tokio::test]
    async fn meets_are_listed_as_views() {
        let meet = meet::Model {
            id: 1,
            name: "vs Amherst".to_string(),
            location: "Home Pool".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            status: DbMeetStatus::Scheduled,
            created_by: Some(1),
            created_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![meet]])
            .into_connection();
        let meets = list_meets(&db).await.unwrap();
        assert_eq!(meets[0].status, MeetStatus::Scheduled);
    }

    fn team_diver(id: i32, team_id: i32, status: Option<DbDiverStatus>) -> diver::Model {
        diver::Model {
            id,
            user_id: None,
            team_id: Some(team_id),
            first_name: Some(format!("Diver{id}")),
            last_name: Some("Test".to_string()),
            age: Some(20),
            gender: None,
            grad_year: None,
            avg_score: None,
            email: None,
            is_captain: None,
            status,
            image_url: None,
            created_at: None,
        }
    }

    fn meet_dive(id: i32, meet_id: i32, diver_id: i32) -> dive::Model {
        dive::Model {
            id,
            meet_id: Some(meet_id),
            diver_id: Some(diver_id),
            number: 1,
            name: "Back Dive Tuck".to_string(),
            difficulty: 1.5,
            completed: Some(true),
            created_at: None,
        }
    }

    fn panel(dive_id: i32, value: f64) -> Vec<score::Model> {
        (0..3)
            .map(|judge| score::Model {
                id: dive_id * 10 + judge,
                dive_id: Some(dive_id),
                judge_id: Some(judge),
                score: value,
                created_at: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn team_stats_count_podiums_meets_and_active_roster() {
        let season = season::Model {
            id: 4,
            team_id: 1,
            name: "2025-26".to_string(),
            start_year: 2025,
            end_year: 2026,
            status: DbSeasonStatus::Active,
            created_by: 1,
            created_at: None,
        };
        let entered = |meet_id| meet_participant::Model {
            meet_id,
            diver_id: 1,
            created_at: None,
        };
        let scores = [
            panel(10, 9.0),
            panel(11, 5.0),
            panel(20, 4.0),
            panel(21, 8.0),
            panel(22, 7.0),
            panel(23, 6.0),
        ]
        .concat();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team(1, "Sharks")]])
            .append_query_results([vec![
                team_diver(1, 1, Some(DbDiverStatus::Active)),
                team_diver(2, 1, Some(DbDiverStatus::Archived)),
                team_diver(3, 1, None),
            ]])
            .append_query_results([vec![season]])
            .append_query_results([vec![entered(1), entered(2)]])
            .append_query_results([vec![meet_dive(10, 1, 1), meet_dive(20, 2, 1)]])
            .append_query_results([vec![
                meet_dive(10, 1, 1),
                meet_dive(11, 1, 50),
                meet_dive(20, 2, 1),
                meet_dive(21, 2, 50),
                meet_dive(22, 2, 51),
                meet_dive(23, 2, 52),
            ]])
            .append_query_results([scores])
            .append_query_results([vec![
                team_diver(1, 1, Some(DbDiverStatus::Active)),
                team_diver(50, 2, None),
                team_diver(51, 2, None),
                team_diver(52, 2, None),
            ]])
            .into_connection();

        let stats = team_stats(&db, 1).await.unwrap();
        assert_eq!(
            stats,
            TeamStats {
                roster_size: 2,
                meets_attended: 2,
                completed_dives: 2,
                podium_finishes: 1,
                seasons_planned: 1,
            }
        );
    }

    #[tokio::test]
    async fn team_without_divers_only_counts_seasons() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![team(1, "Sharks")]])
            .append_query_results([Vec::<diver::Model>::new()])
            .append_query_results([Vec::<season::Model>::new()])
            .into_connection();
        let stats = team_stats(&db, 1).await.unwrap();
        assert_eq!(stats, TeamStats::default());
    }
}
