//! Onboarding helper that reads a college athletics site and pre-fills the team.

pub mod extract;

use cached::proc_macro::cached;
use log::{info, warn};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use scraper::Html;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use extract::{ATHLETICS_PATHS, SWIMMING_TERMS};

const FETCH_TIMEOUT_SECS: u64 = 10;
const MAX_ATHLETICS_PAGES: usize = 3;
const USER_AGENT: &str = concat!("ripscore-onboarding/", env!("CARGO_PKG_VERSION"));
const DEMO_COLLEGE: &str = "union.edu";

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to fetch college page: {0}")]
    Fetch(#[from] reqwest::Error),
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollegeInfo {
    pub name: String,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub division: String,
    pub coach_name: Option<String>,
    pub coach_photo: Option<String>,
    pub coach_bio: Option<String>,
    pub number_of_divers: usize,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RosterMember {
    pub name: String,
    pub year: String,
    pub position: String,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub date: String,
    pub opponent: String,
    pub location: String,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub roster: Vec<RosterMember>,
    pub schedule: Vec<ScheduleItem>,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct CollegeScrape {
    pub success: bool,
    pub college: CollegeInfo,
    pub team: TeamInfo,
}

#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ScrapeFailure {
    pub success: bool,
    pub error: String,
}

impl From<&ScrapeError> for ScrapeFailure {
    fn from(e: &ScrapeError) -> Self {
        Self {
            success: false,
            error: e.to_string(),
        }
    }
}

/// Adds `https://` when no scheme is given and reports whether the swimming page has to be found
/// first.
pub fn normalise_url(raw: &str) -> Result<(Url, bool), ScrapeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }
    let url = if raw.starts_with("http://") || raw.starts_with("https://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("https://{raw}"))?
    };

    let path = url.path().to_lowercase();
    if SWIMMING_TERMS.iter().any(|t| path.contains(t)) {
        return Ok((url, false));
    }
    let shallow = matches!(path.as_str(), "" | "/" | "/index.html" | "/home" | "/main");
    let deep = path.split('/').filter(|p| !p.is_empty()).count() > 2;
    Ok((url, shallow || deep))
}

fn http_client() -> Result<reqwest::Client, ScrapeError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?)
}

async fn fetch_page(client: &reqwest::Client, url: &Url) -> Result<Html, ScrapeError> {
    let body = client.get(url.clone()).send().await?.text().await?;
    Ok(Html::parse_document(&body))
}

/// Walks from the home page through at most three athletics pages to the swimming & diving page.
async fn find_swimming_page(client: &reqwest::Client, site: &Url) -> Option<Url> {
    // Parsed documents are not `Send`, so none may be held across an await.
    let mut athletics = match fetch_page(client, site).await {
        Ok(home) => extract::athletics_links(&home, site),
        Err(e) => {
            warn!("Could not load {site} while looking for the swimming page: {e}");
            return None;
        }
    };
    if athletics.is_empty() {
        athletics = ATHLETICS_PATHS
            .iter()
            .filter_map(|path| site.join(path).ok())
            .collect();
    }

    for page in athletics.iter().take(MAX_ATHLETICS_PAGES) {
        match fetch_page(client, page).await {
            Ok(doc) => {
                if let Some(found) = extract::swimming_links(&doc, page, site).into_iter().next() {
                    return Some(found);
                }
            }
            Err(e) => warn!("Skipping athletics page {page}: {e}"),
        }
    }
    None
}

pub fn demo_college() -> CollegeScrape {
    let member = |name: &str, year: &str| RosterMember {
        name: name.to_string(),
        year: year.to_string(),
        position: "Diver".to_string(),
    };
    let meet = |date: &str, opponent: &str, location: &str| ScheduleItem {
        date: date.to_string(),
        opponent: opponent.to_string(),
        location: location.to_string(),
    };
    let roster = vec![
        member("Alex Johnson", "Senior"),
        member("Sam Martinez", "Junior"),
        member("Casey Smith", "Sophomore"),
    ];
    CollegeScrape {
        success: true,
        college: CollegeInfo {
            name: "Union College".to_string(),
            url: None,
            logo: Some("https://gounionduathletics.com/images/logos/site/site.png".to_string()),
            division: "Division III".to_string(),
            coach_name: Some("Scott Felix".to_string()),
            coach_photo: None,
            coach_bio: None,
            number_of_divers: roster.len(),
        },
        team: TeamInfo {
            roster,
            schedule: vec![
                meet("2025-06-15", "Williams College", "Home"),
                meet("2025-06-22", "Amherst College", "Away"),
            ],
        },
    }
}

/// Everything extracted from one page.
pub fn read_college_page(document: &Html, url: &Url) -> CollegeScrape {
    let text = extract::page_text(document);
    let domain = extract::domain_of(url);
    let roster = extract::roster(document, &text);
    let coach_name = extract::coach_name(&text);
    let coach_bio = coach_name
        .as_deref()
        .and_then(|coach| extract::coach_bio(document, coach));
    CollegeScrape {
        success: true,
        college: CollegeInfo {
            name: extract::college_name(document, &text, &domain),
            url: Some(url.to_string()),
            logo: extract::college_logo(document, url),
            division: extract::guess_division(&text),
            coach_photo: coach_name
                .as_ref()
                .and_then(|_| extract::coach_photo(document, url)),
            coach_name,
            coach_bio,
            number_of_divers: roster.len(),
        },
        team: TeamInfo {
            roster,
            schedule: extract::schedule(&text),
        },
    }
}

/// Scrapes a college site. Successful results are kept for an hour per URL.
#[cached(time = 3600, result = true)]
pub async fn scrape_college(url: String) -> Result<CollegeScrape, ScrapeError> {
    if url.trim() == DEMO_COLLEGE {
        return Ok(demo_college());
    }
    let (mut page, needs_search) = normalise_url(&url)?;
    let client = http_client()?;
    if needs_search {
        match find_swimming_page(&client, &page).await {
            Some(found) => {
                info!("Found swimming page {found} for {url}");
                page = found;
            }
            None => info!("No swimming page found for {url}, using it as given"),
        }
    }
    let document = fetch_page(&client, &page).await?;
    Ok(read_college_page(&document, &page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_added_and_bare_domains_search() {
        let (url, search) = normalise_url("williams.edu").unwrap();
        assert_eq!(url.as_str(), "https://williams.edu/");
        assert!(search);
    }

    #[test]
    fn team_pages_are_used_directly() {
        let (_, search) =
            normalise_url("https://ephsports.williams.edu/sports/mens-swimming-and-diving").unwrap();
        assert!(!search);
        let (_, search) = normalise_url("http://college.edu/athletics").unwrap();
        assert!(!search);
    }

    #[test]
    fn deep_paths_without_swimming_terms_search() {
        let (_, search) = normalise_url("college.edu/news/2025/03/story").unwrap();
        assert!(search);
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(normalise_url("  "), Err(ScrapeError::MissingUrl)));
    }

    #[tokio::test]
    async fn demo_college_needs_no_network() {
        let result = scrape_college("union.edu".to_string()).await.unwrap();
        assert_eq!(result.college.name, "Union College");
        assert_eq!(result.college.number_of_divers, 3);
        assert_eq!(result.team.schedule.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn slow_sites_do_not_hold_up_other_scrapes() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            let _held = listener.incoming().collect::<Vec<_>>();
        });

        let slow = tokio::spawn(scrape_college(format!("http://127.0.0.1:{port}/swimming")));
        tokio::time::sleep(Duration::from_millis(300)).await;

        let started = std::time::Instant::now();
        let demo = scrape_college("union.edu".to_string()).await.unwrap();
        assert_eq!(demo.college.name, "Union College");
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(!slow.is_finished());
    }

    #[test]
    fn page_is_read_into_a_scrape() {
        let doc = Html::parse_document(
            r#"<html><head><title>Aquatics | Hamilton</title></head>
               <body><p>Head Coach: Jordan Reyes</p><p>Kim Lowe • Jr.</p></body></html>"#,
        );
        let url = Url::parse("https://hamilton.edu/aquatics").unwrap();
        let scrape = read_college_page(&doc, &url);
        assert_eq!(scrape.college.name, "Aquatics");
        assert_eq!(scrape.college.coach_name.as_deref(), Some("Jordan Reyes"));
        assert_eq!(scrape.college.number_of_divers, 1);
        assert_eq!(scrape.college.division, "Unknown");
        assert_eq!(scrape.college.coach_photo, None);
    }
}
