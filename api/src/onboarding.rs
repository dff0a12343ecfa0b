use log::{error, info};
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse, Responses};
use rocket_okapi::okapi::schemars::Map;
use rocket_okapi::openapi;
use rocket_okapi::response::OpenApiResponderInner;

use service::college::{self, CollegeScrape, ScrapeError, ScrapeFailure};
use service::dto::ScrapeRequest;

#[derive(Responder)]
pub(crate) enum ScrapeResponse {
    #[response(status = 200)]
    Scraped(Json<CollegeScrape>),
    #[response(status = 400)]
    Rejected(Json<ScrapeFailure>),
    #[response(status = 500)]
    Failed(Json<ScrapeFailure>),
}

impl OpenApiResponderInner for ScrapeResponse {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Map::new();
        for (status, description) in [
            ("200", "The college, its roster and its schedule."),
            ("400", "No URL was given."),
            ("500", "The site could not be fetched. `error` says why."),
        ] {
            responses.insert(
                status.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}

/// # Scrape a college athletics site
///
/// Finds the swimming & diving page when given a home page and pre-fills the team from it.
/// `union.edu` returns demo data.
#[openapi(tag = "Onboarding")]
#[post("/scrape-college", format = "json", data = "<request>")]
pub(crate) async fn scrape_college(request: Json<ScrapeRequest>) -> ScrapeResponse {
    let url = request.into_inner().url;
    match college::scrape_college(url.clone()).await {
        Ok(scrape) => {
            info!(
                "Scraped {} with {} divers",
                scrape.college.name, scrape.college.number_of_divers
            );
            ScrapeResponse::Scraped(Json(scrape))
        }
        Err(e @ ScrapeError::MissingUrl) => ScrapeResponse::Rejected(Json((&e).into())),
        Err(e) => {
            error!("Scraping {url} failed: {e}");
            ScrapeResponse::Failed(Json((&e).into()))
        }
    }
}
