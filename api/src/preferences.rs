use std::convert::Infallible;

use rocket::http::{Cookie, CookieJar};
use rocket::request::{self, FromRequest};
use rocket::serde::json::Json;
use rocket::{Request, State};
use rocket_okapi::{openapi, request::OpenApiFromRequest};
use sea_orm::DatabaseConnection;

use service::achievements::{Badge, BadgeProgress, CATALOG};
use service::dto::{ThemeInput, ThemeView};
use service::error::GenericError;
use service::theme::{PreferenceStorage, ThemeStore};

const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

/// Keeps preferences in plain cookies on the client.
struct CookieStorage<'a, 'r> {
    jar: &'a CookieJar<'r>,
}

impl PreferenceStorage for CookieStorage<'_, '_> {
    fn load(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn store(&mut self, key: &str, value: &str) {
        self.jar.add(
            Cookie::build((key.to_string(), value.to_string()))
                .path("/")
                .permanent(),
        );
    }
}

/// Whether the browser reports a dark system color scheme.
#[derive(OpenApiFromRequest, Debug, Clone, Copy)]
pub struct SystemColorScheme {
    prefers_dark: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SystemColorScheme {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let prefers_dark = request
            .headers()
            .get_one(COLOR_SCHEME_HINT)
            .is_some_and(|v| v.trim_matches('"').eq_ignore_ascii_case("dark"));
        request::Outcome::Success(Self { prefers_dark })
    }
}

fn theme_store<'a, 'r>(
    cookies: &'a CookieJar<'r>,
    system: SystemColorScheme,
) -> ThemeStore<CookieStorage<'a, 'r>> {
    ThemeStore::init(CookieStorage { jar: cookies }, system.prefers_dark)
}

#[openapi(tag = "Preferences")]
#[get("/theme")]
pub(crate) fn get_theme(cookies: &CookieJar<'_>, system: SystemColorScheme) -> Json<ThemeView> {
    Json(theme_store(cookies, system).view())
}

#[openapi(tag = "Preferences")]
#[put("/theme", format = "json", data = "<input>")]
pub(crate) fn set_theme(
    input: Json<ThemeInput>,
    cookies: &CookieJar<'_>,
    system: SystemColorScheme,
) -> Json<ThemeView> {
    let mut store = theme_store(cookies, system);
    store.set(input.is_dark_mode);
    Json(store.view())
}

#[openapi(tag = "Preferences")]
#[post("/theme/toggle")]
pub(crate) fn toggle_theme(cookies: &CookieJar<'_>, system: SystemColorScheme) -> Json<ThemeView> {
    let mut store = theme_store(cookies, system);
    store.toggle();
    Json(store.view())
}

/// # Achievement catalog
#[openapi(tag = "Achievements")]
#[get("/achievements")]
pub(crate) fn list_achievements() -> Json<Vec<Badge>> {
    Json(CATALOG.to_vec())
}

/// # Team achievements
///
/// Progress of the team towards every badge in the catalog.
#[openapi(tag = "Achievements")]
#[get("/teams/<id>/achievements")]
pub(crate) async fn team_achievements(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<Vec<BadgeProgress>>, GenericError> {
    Ok(Json(service::team_achievements(db.inner(), id).await?))
}
