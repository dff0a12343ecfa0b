extern crate rocket;

#[cfg(test)]
mod tests {
    use rocket::async_test;
    use rocket::config::{LogLevel, SecretKey};
    use rocket::figment::Profile;
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use rocket::{Build, Config, Rocket};
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
    use serde_json::{json, Value};

    use entity::sea_orm_active_enums::UserRole;
    use entity::{dive, diver, meet, score, team, user, user_cookies};

    fn rocket(db: DatabaseConnection) -> Rocket<Build> {
        let config = Config {
            profile: Profile::Global,
            log_level: LogLevel::Critical,
            secret_key: SecretKey::from(&[1u8; 64][..]),
            ..Config::debug_default()
        };
        api::build(db).configure(config)
    }

    async fn client_with(db: MockDatabase) -> Client {
        Client::tracked(rocket(db.into_connection()))
            .await
            .expect("valid rocket instance")
    }

    fn empty_db() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    fn sharks() -> team::Model {
        team_row(1, "Sharks", "SHK")
    }

    fn team_row(id: i32, name: &str, code: &str) -> team::Model {
        team::Model {
            id,
            name: name.to_string(),
            code: code.to_string(),
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

    fn diver_row(id: i32, team_id: i32, first_name: &str) -> diver::Model {
        diver::Model {
            id,
            user_id: None,
            team_id: Some(team_id),
            first_name: Some(first_name.to_string()),
            last_name: Some("Diver".to_string()),
            age: Some(19),
            gender: None,
            grad_year: None,
            avg_score: None,
            email: None,
            is_captain: Some(false),
            status: None,
            image_url: None,
            created_at: None,
        }
    }

    fn dive_row(id: i32, diver_id: i32) -> dive::Model {
        dive::Model {
            id,
            meet_id: Some(1),
            diver_id: Some(diver_id),
            number: id,
            name: "Forward 1 1/2 Somersault Pike".to_string(),
            difficulty: 2.0,
            completed: Some(true),
            created_at: None,
        }
    }

    fn score_row(id: i32, dive_id: i32, value: f64) -> score::Model {
        score::Model {
            id,
            dive_id: Some(dive_id),
            judge_id: Some(100 + id),
            score: value,
            created_at: None,
        }
    }

    fn duals() -> meet::Model {
        meet::Model {
            id: 1,
            name: "Duals".to_string(),
            location: "Home Pool".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 18)
                .and_then(|d| d.and_hms_opt(10, 0, 0))
                .unwrap(),
            status: entity::sea_orm_active_enums::MeetStatus::Active,
            created_by: None,
            created_at: None,
        }
    }

    #[async_test]
    async fn missing_team_is_not_found() {
        let client =
            client_with(empty_db().append_query_results([Vec::<team::Model>::new()])).await;
        let response = client.get("/api/teams/9").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[async_test]
    async fn teams_are_listed() {
        let client = client_with(
            empty_db().append_query_results([vec![sharks(), team_row(2, "Dolphins", "DLP")]]),
        )
        .await;
        let response = client.get("/api/teams").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body[0]["code"], "SHK");
        assert_eq!(body[1]["primaryColor"], "#E11D48");
    }

    #[async_test]
    async fn team_without_code_is_rejected() {
        let client = client_with(empty_db()).await;
        let response = client
            .post("/api/teams")
            .header(ContentType::JSON)
            .body(json!({ "name": "Sharks" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[async_test]
    async fn team_code_longer_than_ten_is_bad_request() {
        let client = client_with(empty_db()).await;
        let response = client
            .post("/api/teams")
            .header(ContentType::JSON)
            .body(json!({ "name": "Sharks", "code": "SHARKS-2025" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[async_test]
    async fn team_is_created() {
        let client = client_with(empty_db().append_query_results([vec![sharks()]])).await;
        let response = client
            .post("/api/teams")
            .header(ContentType::JSON)
            .body(json!({ "name": "Sharks", "code": "SHK" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["id"], 1);
    }

    #[async_test]
    async fn judge_score_above_ten_is_rejected() {
        let client = client_with(empty_db()).await;
        let response = client
            .post("/api/judge/1/dives/2/score")
            .header(ContentType::JSON)
            .body(json!({ "judgeId": 3, "score": "10.5" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[async_test]
    async fn unknown_meet_status_is_rejected() {
        let client = client_with(empty_db()).await;
        let response = client
            .patch("/api/meets/1/status")
            .header(ContentType::JSON)
            .body(json!({ "status": "postponed" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[async_test]
    async fn leaderboard_filters_by_team_ignoring_case() {
        let client = client_with(
            empty_db()
                .append_query_results([vec![duals()]])
                .append_query_results([vec![dive_row(1, 1), dive_row(2, 2)]])
                .append_query_results([vec![
                    score_row(1, 1, 7.0),
                    score_row(2, 1, 7.0),
                    score_row(3, 1, 7.0),
                    score_row(4, 2, 8.0),
                    score_row(5, 2, 8.0),
                    score_row(6, 2, 8.0),
                ]])
                .append_query_results([vec![diver_row(1, 1, "Sam"), diver_row(2, 2, "Alex")]])
                .append_query_results([vec![sharks(), team_row(2, "Dolphins", "DLP")]]),
        )
        .await;
        let response = client
            .get("/api/meets/1/leaderboard?team=sharks")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["diverId"], 1);
        assert_eq!(entries[0]["team"], "Sharks");
        assert_eq!(entries[0]["totalScore"], 42.0);
        assert_eq!(entries[0]["medal"], "gold");
    }

    #[async_test]
    async fn deleting_a_missing_diver_still_succeeds() {
        let client =
            client_with(empty_db().append_query_results([Vec::<diver::Model>::new()])).await;
        let response = client.delete("/api/divers/77").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["message"], "Diver deleted successfully");
        assert_eq!(body["id"], 77);
        assert_eq!(body["diver"], json!({}));
    }

    fn new_coach() -> user::Model {
        user::Model {
            id: 4,
            username: "coach".to_string(),
            password: "stored-hash".to_string(),
            name: "Coach Carter".to_string(),
            email: "coach@example.com".to_string(),
            role: UserRole::Coach,
            created_at: None,
        }
    }

    fn registration() -> String {
        json!({
            "username": "coach",
            "password": "battery staple",
            "name": "Coach Carter",
            "email": "coach@example.com",
            "role": "coach"
        })
        .to_string()
    }

    #[async_test]
    async fn registering_logs_the_user_in() {
        let session = user_cookies::Model {
            cookie: "session".to_string(),
            user_id: 4,
        };
        let client = client_with(
            empty_db()
                .append_query_results([vec![new_coach()]])
                .append_query_results([vec![session]]),
        )
        .await;
        let response = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(registration())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        assert!(response.cookies().get_private("auth").is_some());
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["username"], "coach");
        assert!(body.get("password").is_none());
    }

    #[async_test]
    async fn failed_registration_sends_no_session_cookie() {
        let client = client_with(
            empty_db()
                .append_query_results([vec![new_coach()]])
                .append_query_errors([DbErr::Custom("session insert failed".to_string())]),
        )
        .await;
        let response = client
            .post("/api/auth/register")
            .header(ContentType::JSON)
            .body(registration())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::InternalServerError);
        assert!(response.cookies().get_private("auth").is_none());
        assert!(response.headers().get_one("Set-Cookie").is_none());
    }

    #[async_test]
    async fn me_without_session_is_unauthorized() {
        let client = client_with(empty_db()).await;
        let response = client.get("/api/auth/me").dispatch().await;
        assert_eq!(response.status(), Status::Unauthorized);
    }

    #[async_test]
    async fn achievement_catalog_is_served() {
        let client = client_with(empty_db()).await;
        let response = client.get("/api/achievements").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert!(!body.as_array().unwrap().is_empty());
    }

    #[async_test]
    async fn theme_follows_system_until_toggled() {
        let client = client_with(empty_db()).await;
        let prefers_dark = || Header::new("Sec-CH-Prefers-Color-Scheme", "\"dark\"");

        let response = client.get("/api/theme").header(prefers_dark()).dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["theme"], "dark");

        let response = client
            .post("/api/theme/toggle")
            .header(prefers_dark())
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["isDarkMode"], false);

        let response = client.get("/api/theme").header(prefers_dark()).dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["theme"], "light");
    }

    #[async_test]
    async fn scrape_without_url_is_bad_request() {
        let client = client_with(empty_db()).await;
        let response = client
            .post("/api/scrape-college")
            .header(ContentType::JSON)
            .body(json!({ "url": "" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    #[async_test]
    async fn unknown_endpoint_is_not_found() {
        let client = client_with(empty_db()).await;
        let response = client.get("/api/nowhere").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }
}
