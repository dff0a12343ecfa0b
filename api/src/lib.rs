mod authenticate;
mod judging;
mod mutation;
mod onboarding;
mod preferences;
mod query;

use rocket_okapi::openapi_get_routes;

#[macro_use]
extern crate rocket;

use dotenvy::dotenv;
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use rocket::fs::FileServer;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, Route};
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use service::dto::Message;
use thiserror::Error;

pub use authenticate::UserAuthentication;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,
    #[error("Unable to connect to the database: {0}")]
    Connect(#[source] DbErr),
    #[error("Unable to run migrations: {0}")]
    Migrate(#[source] DbErr),
}

#[catch(404)]
fn general_not_found() -> Json<Message> {
    Json(Message::new("Api endpoint not found"))
}

#[catch(401)]
fn unauthorized() -> Json<Message> {
    Json(Message::new("Not logged in"))
}

/// Every API route, ready to be mounted under `/api`.
pub fn routes() -> Vec<Route> {
    openapi_get_routes![
        authenticate::register,
        authenticate::login,
        authenticate::logout,
        authenticate::me,
        authenticate::get_user,
        query::list_teams,
        query::get_team,
        query::team_divers,
        query::team_seasons,
        mutation::create_team,
        mutation::update_team,
        mutation::delete_team,
        query::list_meets,
        query::get_meet,
        query::meet_dives,
        query::meet_participants,
        query::meet_judges,
        query::meet_leaderboard,
        mutation::create_meet,
        mutation::update_meet_status,
        mutation::add_participant,
        mutation::remove_participant,
        mutation::add_judge,
        mutation::remove_judge,
        query::list_divers,
        query::get_diver,
        query::diver_dives,
        mutation::create_diver,
        mutation::update_diver,
        mutation::delete_diver,
        query::get_dive,
        query::dive_scores,
        query::dive_total,
        mutation::create_dive,
        mutation::complete_dive,
        mutation::create_score,
        judging::submit_score,
        query::get_season,
        query::season_cycles,
        query::season_meets,
        query::season_practices,
        query::season_itineraries,
        mutation::create_season,
        mutation::update_season_status,
        mutation::create_season_cycle,
        mutation::create_season_meet,
        mutation::create_practice_schedule,
        mutation::create_meet_itinerary,
        preferences::get_theme,
        preferences::set_theme,
        preferences::toggle_theme,
        preferences::list_achievements,
        preferences::team_achievements,
        onboarding::scrape_college,
    ]
}

/// The API, its docs and the catchers on top of an existing connection.
pub fn build(db: DatabaseConnection) -> Rocket<Build> {
    rocket::build()
        .manage(db)
        .mount("/api", routes())
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/api", catchers![general_not_found, unauthorized])
}

async fn connect() -> Result<DatabaseConnection, StartupError> {
    let url = std::env::var("DATABASE_URL").map_err(|_| StartupError::MissingDatabaseUrl)?;
    let sqlx_logging = std::env::var("SQLX_LOGGING")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let mut opt = ConnectOptions::new(url);
    opt.sqlx_logging(sqlx_logging);
    Database::connect(opt).await.map_err(StartupError::Connect)
}

/// Connects, applies pending migrations and builds the server.
pub async fn launch() -> Result<Rocket<Build>, StartupError> {
    dotenv().ok();

    let db = connect().await?;
    Migrator::up(&db, None).await.map_err(StartupError::Migrate)?;
    info!("Database is up to date");

    let rocket = build(db);
    match std::env::var("STATIC_PATH") {
        Ok(static_path) => Ok(rocket.mount("/", FileServer::from(static_path))),
        Err(_) => {
            warn!("STATIC_PATH not set, not serving the client");
            Ok(rocket)
        }
    }
}
