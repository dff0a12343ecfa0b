use entity::user;
use log::info;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::outcome::IntoOutcome;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{
    request::{self, FromRequest},
    Request, State,
};
use rocket_okapi::{openapi, request::OpenApiFromRequest};
use sea_orm::DatabaseConnection;

use service::dto::{AuthUser, InsertUser, LoginInput, Message, UserView, Validate};
use service::error::{AuthError, GenericError};
use service::AUTH_COOKIE;

/// The value of a valid `auth` session cookie.
#[derive(OpenApiFromRequest, Debug)]
pub struct UserAuthentication(String);

impl UserAuthentication {
    pub async fn to_user_model(
        &self,
        db: &DatabaseConnection,
    ) -> Result<user::Model, GenericError> {
        service::user_by_cookie(db, &self.0)
            .await?
            .ok_or(AuthError::Invalid("You do not have permission to do this.").into())
    }

    async fn new_checked(cookie: String, db: &DatabaseConnection) -> Option<Self> {
        match service::user_by_cookie(db, &cookie).await {
            Ok(Some(_)) => Some(Self(cookie)),
            _ => None,
        }
    }
}

#[rocket::async_trait]
impl<'a> FromRequest<'a> for UserAuthentication {
    type Error = Json<AuthError>;

    async fn from_request(request: &'a Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(db) = request.rocket().state::<DatabaseConnection>() else {
            return None.or_error((
                Status::InternalServerError,
                AuthError::Missing("Database not configured").into(),
            ));
        };

        let cookie: Cookie = match request.cookies().get_private(AUTH_COOKIE) {
            Some(cookie) => cookie,
            None => {
                return None.or_error((
                    Status::Unauthorized,
                    AuthError::Missing("Not logged in").into(),
                ))
            }
        };

        UserAuthentication::new_checked(cookie.value().to_string(), db)
            .await
            .or_error((
                Status::Unauthorized,
                AuthError::Invalid("Session has expired").into(),
            ))
    }
}

/// # Register
///
/// Creates the account and logs it in.
#[openapi(tag = "Auth")]
#[post("/auth/register", format = "json", data = "<user>")]
pub(crate) async fn register(
    user: Json<InsertUser>,
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
) -> Result<Created<Json<AuthUser>>, GenericError> {
    let user = service::register(db.inner(), user.into_inner(), cookies).await?;
    Ok(Created::new(format!("/api/users/{}", user.id)).body(Json(user)))
}

/// # Login
///
/// # Parameters
///
/// - `username` - The username of the user
///
/// - `password` - The password of the user
///
/// # Returns
///
/// The logged in user, with the session sent as a private cookie
#[openapi(tag = "Auth")]
#[post("/auth/login", format = "json", data = "<login>")]
pub(crate) async fn login(
    login: Json<LoginInput>,
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
) -> Result<Json<AuthUser>, GenericError> {
    let login = login.into_inner();
    login.validate()?;
    let user = service::authenticate(db.inner(), &login.username, &login.password)
        .await?
        .ok_or(AuthError::InvalidCredentials("Invalid credentials"))?;
    service::generate_cookie(db.inner(), user.id, cookies).await?;
    info!("{} logged in", user.username);
    Ok(Json(user.into()))
}

#[openapi(tag = "Auth")]
#[post("/auth/logout")]
pub(crate) async fn logout(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    user: UserAuthentication,
) -> Result<Json<Message>, GenericError> {
    service::remove_cookie(db.inner(), &user.0, cookies).await?;
    Ok(Json(Message::new("Logged out successfully")))
}

/// # Current user
///
/// 401 when no valid session cookie is sent.
#[openapi(tag = "Auth")]
#[get("/auth/me")]
pub(crate) async fn me(
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<Json<AuthUser>, GenericError> {
    Ok(Json(user.to_user_model(db.inner()).await?.into()))
}

#[openapi(tag = "Users")]
#[get("/users/<id>")]
pub(crate) async fn get_user(
    db: &State<DatabaseConnection>,
    id: i32,
) -> Result<Json<UserView>, GenericError> {
    Ok(Json(service::get_user(db.inner(), id).await?))
}
