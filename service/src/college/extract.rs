//! Parsing of athletics pages. Nothing here touches the network.

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{RosterMember, ScheduleItem};

pub const MAX_ROSTER: usize = 15;
pub const MAX_SCHEDULE: usize = 8;
const SHORT_TITLE: usize = 50;
const OPPONENT_WINDOW: usize = 50;
const FULL_ROSTER: usize = 5;
const ROSTER_MATCHES_PER_ELEMENT: usize = 20;
const BIO_PARAGRAPH_WORDS: usize = 15;
const BIO_SECTION_WORDS: usize = 20;
const BIO_PARAGRAPHS: usize = 2;
const MAX_BIO_CHARS: usize = 500;

pub const SWIMMING_TERMS: [&str; 5] = ["swimming", "diving", "swim", "dive", "aquatics"];
pub const ATHLETICS_PATHS: [&str; 7] = [
    "/athletics",
    "/sports",
    "/varsity-sports",
    "/athletics/sports",
    "/athletics/varsity-sports",
    "/teams",
    "/varsity-teams",
];

lazy_static! {
    static ref SITE_NAME: Selector =
        Selector::parse(r#"meta[property="og:site_name"]"#).expect("static selector");
    static ref TITLE: Selector = Selector::parse("title").expect("static selector");
    static ref LINKS: Selector = Selector::parse("a[href]").expect("static selector");
    static ref LOGO_IMAGES: Selector = Selector::parse(
        r#"img[class*="logo"], img[id*="logo"], img[alt*="logo"], img[src*="logo"]"#
    )
    .expect("static selector");
    static ref HEADER_IMAGES: Selector =
        Selector::parse("header img, .header img, .navbar img, nav img, .brand img, .logo img")
            .expect("static selector");
    static ref PARAGRAPHS: Selector = Selector::parse("p").expect("static selector");
    static ref IMAGES: Selector = Selector::parse("img").expect("static selector");
    static ref NAVIGATION: Selector =
        Selector::parse("nav, .nav, .navigation, .menu").expect("static selector");
    static ref COACH_SECTIONS: Selector = Selector::parse(
        r#".coach, .staff, .coaching-staff, #coach, #coaches, [id*="coach"], [class*="coach"], .bio, .biography, .profile"#
    )
    .expect("static selector");
    static ref ROSTER_ELEMENTS: Selector = Selector::parse(
        r#"table.roster, table[class*="roster"], div[class*="roster"], ul[class*="roster"]"#
    )
    .expect("static selector");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("static regex");
    static ref TITLE_SUFFIX: Regex = Regex::new(r"\s+[-|]\s+.*$").expect("static regex");
    static ref COLLEGE_NAMES: Vec<Regex> = [
        r"(University of [A-Z][a-z]+ [A-Z][a-z]+)",
        r"(University of [A-Z][a-z]+)",
        r"([A-Z][a-z]+ [A-Z][a-z]+ University)",
        r"([A-Z][a-z]+ University)",
        r"([A-Z][a-z]+ College)",
        r"([A-Z][a-z]+ State University)",
        r"(College of [A-Z][a-z]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect();
    static ref DIVISION: Regex =
        Regex::new(r"\b(?:NCAA\s+(?:Division\s+)?|Division\s+|D)(III|II|I)\b").expect("static regex");
    static ref COACH_NAMES: Vec<Regex> = [
        r"Head Coach:?\s+([A-Z][a-z]+ [A-Z][a-z]+)",
        r"Coach:?\s+([A-Z][a-z]+ [A-Z][a-z]+)",
        r"([A-Z][a-z]+ [A-Z][a-z]+)\s+[-–•]\s+Head Coach",
        r"([A-Z][a-z]+ [A-Z][a-z]+)\s+[-–•]\s+Coach",
        r"([A-Z][a-z]+ [A-Z][a-z]+)(?:\s+is|\s+has been)\s+(?:the|a)\s+(?:head\s+)?coach",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect();
    static ref ROSTER_LINES: Vec<Regex> = [
        r"([A-Z][a-z]+(?: [A-Z][a-z]+)+)\s+[•·-]\s+(Fr\.|So\.|Jr\.|Sr\.)",
        r"([A-Z][a-z]+(?: [A-Z][a-z]+)+)\s+[•·-]\s+(Freshman|Sophomore|Junior|Senior)",
        r"([A-Z][a-z]+(?: [A-Z][a-z]+)+)(?:\s+\|\s+|\s+[•·-]\s+)(?:[A-Z][a-z]+)(?:\s+\|\s+|\s+[•·-]\s+)(Fr\.|So\.|Jr\.|Sr\.)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect();
    static ref MONTH_DATE: Regex = Regex::new(
        r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[\.a-z]*\s+(\d{1,2})(?:st|nd|rd|th)?[,\s]+(\d{4})"
    )
    .expect("static regex");
    static ref US_DATE: Regex =
        Regex::new(r"\b(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})\b").expect("static regex");
    static ref ISO_DATE: Regex =
        Regex::new(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b").expect("static regex");
    static ref OPPONENT: Regex =
        Regex::new(r"(?:vs\.?|against|@)\s+([A-Z][a-z]+(?: [A-Z][a-z]+)*)").expect("static regex");
}

/// Visible text of the page, one text node per line.
pub fn page_text(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?.value().as_element()?;
            (!matches!(parent.name(), "script" | "style" | "noscript")).then(|| text.trim())
        })
        .filter(|t| !t.is_empty())
        .join("\n")
}

/// Host without a leading `www.`.
pub fn domain_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

pub fn is_same_domain(a: &Url, b: &Url) -> bool {
    let (a, b) = (domain_of(a), domain_of(b));
    a == b || a.ends_with(&format!(".{b}")) || b.ends_with(&format!(".{a}"))
}

fn title_case(word: &str) -> String {
    word.split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .join(" ")
}

pub fn college_name(document: &Html, text: &str, domain: &str) -> String {
    let site_name = document
        .select(&SITE_NAME)
        .filter_map(|m| m.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty());
    if let Some(name) = site_name {
        return name.to_string();
    }

    if let Some(title) = document.select(&TITLE).next() {
        let title = title.text().collect::<String>();
        let title = TITLE_SUFFIX.replace(title.trim(), "");
        if !title.is_empty() && title.chars().count() < SHORT_TITLE {
            return title.into_owned();
        }
    }

    if let Some(found) = COLLEGE_NAMES
        .iter()
        .find_map(|re| re.captures(text).map(|c| c[1].to_string()))
    {
        return found;
    }

    match domain.split('.').collect_vec().as_slice() {
        [name, _, ..] => title_case(&name.replace('-', " ")),
        _ => "Unknown College".to_string(),
    }
}

pub fn college_logo(document: &Html, base: &Url) -> Option<String> {
    document
        .select(&LOGO_IMAGES)
        .chain(document.select(&HEADER_IMAGES))
        .filter_map(|img| img.value().attr("src"))
        .find(|src| !src.is_empty() && !src.starts_with("data:"))
        .and_then(|src| base.join(src).ok())
        .map(String::from)
}

/// NCAA division named on the page. Higher numerals win so `III` is never read as `I`.
pub fn guess_division(text: &str) -> String {
    let found = DIVISION
        .captures_iter(text)
        .map(|c| c[1].len())
        .collect_vec();
    match found.iter().max() {
        Some(3) => "Division III",
        Some(2) => "Division II",
        Some(_) => "Division I",
        None => "Unknown",
    }
    .to_string()
}

pub fn coach_name(text: &str) -> Option<String> {
    COACH_NAMES
        .iter()
        .find_map(|re| re.captures(text).map(|c| c[1].to_string()))
}

fn normalise_year(year: &str) -> String {
    match year.to_lowercase().as_str() {
        "freshman" | "fr." => "Fr.",
        "sophomore" | "so." => "So.",
        "junior" | "jr." => "Jr.",
        "senior" | "sr." => "Sr.",
        _ => year,
    }
    .to_string()
}

fn roster_matches<'t>(re: &'t Regex, text: &'t str) -> impl Iterator<Item = RosterMember> + 't {
    re.captures_iter(text).map(|c| RosterMember {
        name: c[1].to_string(),
        year: normalise_year(&c[2]),
        position: "Diver".to_string(),
    })
}

/// Divers listed as `Name • Year`. The first line format that matches anything is used.
pub fn roster_from_text(text: &str) -> Vec<RosterMember> {
    for re in ROSTER_LINES.iter() {
        let members = roster_matches(re, text)
            .unique_by(|m| m.name.clone())
            .take(MAX_ROSTER)
            .collect_vec();
        if !members.is_empty() {
            return members;
        }
    }
    Vec::new()
}

/// Text of an element, one text node per line.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join("\n")
}

/// Roster from the page text. Short rosters are topped up from roster tables and lists, where
/// every line format is tried.
pub fn roster(document: &Html, text: &str) -> Vec<RosterMember> {
    let mut members = roster_from_text(text);
    if members.len() >= FULL_ROSTER {
        return members;
    }
    for element in document.select(&ROSTER_ELEMENTS) {
        let lines = element_text(element);
        for re in ROSTER_LINES.iter() {
            for member in roster_matches(re, &lines).take(ROSTER_MATCHES_PER_ELEMENT) {
                if members.len() == MAX_ROSTER {
                    return members;
                }
                if !members.iter().any(|m| m.name == member.name) {
                    members.push(member);
                }
            }
        }
    }
    members
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Text of a coach section without its navigation.
fn section_text(section: ElementRef) -> String {
    let navigation = section
        .select(&NAVIGATION)
        .flat_map(|nav| nav.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect_vec();
    let text = section
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !navigation.contains(t))
        .join(" ");
    collapse_whitespace(&text)
}

fn truncate_bio(bio: String) -> String {
    if bio.chars().count() <= MAX_BIO_CHARS {
        return bio;
    }
    let kept: String = bio.chars().take(MAX_BIO_CHARS - 3).collect();
    format!("{kept}...")
}

/// Up to two paragraphs naming the coach, else a substantial coach section.
pub fn coach_bio(document: &Html, coach: &str) -> Option<String> {
    let last_name = coach.split_whitespace().last()?;
    let paragraphs = document
        .select(&PARAGRAPHS)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| p.contains(last_name) && word_count(p) > BIO_PARAGRAPH_WORDS)
        .take(BIO_PARAGRAPHS)
        .join(" ");
    let bio = if paragraphs.is_empty() {
        document
            .select(&COACH_SECTIONS)
            .find(|section| section.select(&IMAGES).next().is_some())
            .map(section_text)
            .filter(|text| word_count(text) > BIO_SECTION_WORDS)?
    } else {
        paragraphs
    };
    Some(truncate_bio(bio))
}

/// First image inside a coach or staff section, made absolute.
pub fn coach_photo(document: &Html, base: &Url) -> Option<String> {
    document
        .select(&COACH_SECTIONS)
        .filter_map(|section| section.select(&IMAGES).next())
        .filter_map(|img| img.value().attr("src"))
        .find(|src| !src.is_empty())
        .and_then(|src| base.join(src).ok())
        .map(String::from)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Opponent named just after the date, else just before it.
fn opponent_near(text: &str, start: usize, end: usize) -> String {
    let before = floor_char_boundary(text, start.saturating_sub(OPPONENT_WINDOW));
    let after = floor_char_boundary(text, (end + OPPONENT_WINDOW).min(text.len()));
    [&text[end..after], &text[before..start]]
        .into_iter()
        .find_map(|window| OPPONENT.captures(window).map(|c| c[1].to_string()))
        .unwrap_or_else(|| "TBD".to_string())
}

/// Meet dates found on the page, each with the opponent named around it.
pub fn schedule(text: &str) -> Vec<ScheduleItem> {
    let formats: [(&Regex, fn(&regex::Captures) -> String); 3] = [
        (&*MONTH_DATE, |c| format!("{} {}, {}", &c[1], &c[2], &c[3])),
        (&*US_DATE, |c| format!("{}/{}/{}", &c[1], &c[2], &c[3])),
        (&*ISO_DATE, |c| format!("{}/{}/{}", &c[2], &c[3], &c[1])),
    ];
    for (re, format_date) in formats {
        let items = re
            .captures_iter(text)
            .take(MAX_SCHEDULE)
            .filter_map(|c| {
                let whole = c.get(0)?;
                Some(ScheduleItem {
                    date: format_date(&c),
                    opponent: opponent_near(text, whole.start(), whole.end()),
                    location: "TBD".to_string(),
                })
            })
            .collect_vec();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn matching_links(
    document: &Html,
    page: &Url,
    site: &Url,
    wanted: impl Fn(&str, &str) -> bool,
) -> Vec<Url> {
    document
        .select(&LINKS)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let text = a.text().collect::<String>().to_lowercase();
            if !wanted(&text, &href.to_lowercase()) {
                return None;
            }
            page.join(href).ok()
        })
        .filter(|link| is_same_domain(site, link))
        .unique()
        .collect()
}

/// Links from a college home page into its athletics section.
pub fn athletics_links(document: &Html, site: &Url) -> Vec<Url> {
    matching_links(document, site, site, |text, href| {
        contains_any(text, &["athletics", "sports", "teams"])
            || contains_any(href, &ATHLETICS_PATHS)
    })
}

pub fn swimming_links(document: &Html, page: &Url, site: &Url) -> Vec<Url> {
    matching_links(document, page, site, |text, href| {
        contains_any(text, &SWIMMING_TERMS) || contains_any(href, &SWIMMING_TERMS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM_PAGE: &str = r#"
        <html>
          <head>
            <title>Men's Swimming & Diving - Williams College Athletics</title>
          </head>
          <body>
            <header><img src="/images/site-logo.png" alt="Ephs logo"></header>
            <script>var coach = "Head Coach: Not Real";</script>
            <p>Williams competes in NCAA Division III.</p>
            <p>Head Coach: Steve Kuster</p>
            <ul class="roster">
              <li>Mary Chen • Fr.</li>
              <li>Owen Park • Sr.</li>
            </ul>
            <p>Nov 8, 2025 vs Amherst College at Muir Pool</p>
            <p>Dec 12th 2025 against Middlebury</p>
          </body>
        </html>
    "#;

    fn base() -> Url {
        Url::parse("https://ephsports.williams.edu/sports/mens-swimming-and-diving").unwrap()
    }

    #[test]
    fn title_is_used_when_short() {
        let doc = Html::parse_document(TEAM_PAGE);
        assert_eq!(
            college_name(&doc, &page_text(&doc), "ephsports.williams.edu"),
            "Men's Swimming & Diving"
        );
    }

    #[test]
    fn site_name_beats_title() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:site_name" content="Union College Athletics"><title>Home</title></head></html>"#,
        );
        assert_eq!(college_name(&doc, "", "union.edu"), "Union College Athletics");
    }

    #[test]
    fn name_falls_back_to_patterns_then_domain() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(
            college_name(&doc, "Welcome to Hamilton College sports", "hamilton.edu"),
            "Hamilton College"
        );
        assert_eq!(college_name(&doc, "", "rose-hulman.edu"), "Rose Hulman");
    }

    #[test]
    fn logo_is_made_absolute() {
        let doc = Html::parse_document(TEAM_PAGE);
        assert_eq!(
            college_logo(&doc, &base()).as_deref(),
            Some("https://ephsports.williams.edu/images/site-logo.png")
        );
    }

    #[test]
    fn division_three_is_not_mistaken_for_one() {
        assert_eq!(guess_division("NCAA Division III champions"), "Division III");
        assert_eq!(guess_division("a DII program"), "Division II");
        assert_eq!(guess_division("Division I athletics"), "Division I");
        assert_eq!(guess_division("club sport"), "Unknown");
    }

    #[test]
    fn coach_and_roster_come_from_visible_text() {
        let doc = Html::parse_document(TEAM_PAGE);
        let text = page_text(&doc);
        assert!(!text.contains("Not Real"));
        assert_eq!(coach_name(&text).as_deref(), Some("Steve Kuster"));

        let roster = roster(&doc, &text);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Mary Chen");
        assert_eq!(roster[1].year, "Sr.");
    }

    #[test]
    fn long_class_years_are_normalised() {
        let roster = roster_from_text("Jo Adams - Sophomore\nLee Grant - Junior");
        assert_eq!(roster[0].year, "So.");
        assert_eq!(roster[1].year, "Jr.");
    }

    #[test]
    fn short_rosters_are_topped_up_from_roster_tables() {
        let doc = Html::parse_document(
            r#"<p>Captain Rae Dunn • Sr.</p>
               <table class="team-roster">
                 <tr><td>Lee Grant - Junior</td></tr>
                 <tr><td>Jo Adams - Freshman</td></tr>
                 <tr><td>Rae Dunn - Senior</td></tr>
               </table>"#,
        );
        let text = page_text(&doc);
        assert_eq!(roster_from_text(&text).len(), 1);

        let roster = roster(&doc, &text);
        let names = roster.iter().map(|m| m.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Rae Dunn", "Lee Grant", "Jo Adams"]);
        assert_eq!(roster[2].year, "Fr.");
    }

    #[test]
    fn roster_tables_are_ignored_once_five_divers_are_found() {
        let doc = Html::parse_document(
            r#"<p>Ada Bell • Fr.</p><p>Bo Cole • So.</p><p>Cy Dean • Jr.</p>
               <p>Di Eads • Sr.</p><p>Ed Fox • Fr.</p>
               <ul class="roster"><li>Flo Gale - Junior</li></ul>"#,
        );
        let roster = roster(&doc, &page_text(&doc));
        assert_eq!(roster.len(), 5);
        assert!(roster.iter().all(|m| m.name != "Flo Gale"));
    }

    #[test]
    fn coach_photo_and_bio_come_from_the_staff_section() {
        let doc = Html::parse_document(
            r#"<div class="coach-profile">
                 <img src="/images/staff/kuster.jpg" alt="Steve Kuster">
                 <nav><a href="/staff">All Staff</a></nav>
                 <span>Head Coach: Steve Kuster</span>
                 <span>He has led the Ephs program for more than twenty seasons and guided
                   divers to conference titles, national finals and many academic honors.</span>
               </div>"#,
        );
        assert_eq!(
            coach_photo(&doc, &base()).as_deref(),
            Some("https://ephsports.williams.edu/images/staff/kuster.jpg")
        );
        let bio = coach_bio(&doc, "Steve Kuster").unwrap();
        assert!(bio.starts_with("Head Coach: Steve Kuster He has led"));
        assert!(!bio.contains("All Staff"));
        assert!(!bio.contains('\n'));
    }

    #[test]
    fn bio_prefers_paragraphs_naming_the_coach_and_is_capped() {
        let long = "Kuster ".to_string() + &"coached divers to many titles ".repeat(30);
        let doc = Html::parse_document(&format!(
            "<p>Kuster said hello.</p><p>{long}</p><p>{long}</p><p>{long}</p>"
        ));
        let bio = coach_bio(&doc, "Steve Kuster").unwrap();
        assert_eq!(bio.chars().count(), 500);
        assert!(bio.ends_with("..."));
        assert!(!bio.starts_with("Kuster said hello"));

        let doc = Html::parse_document("<p>Welcome to the pool.</p>");
        assert_eq!(coach_bio(&doc, "Steve Kuster"), None);
        assert_eq!(coach_photo(&doc, &base()), None);
    }

    #[test]
    fn schedule_reads_dates_and_opponents() {
        let doc = Html::parse_document(TEAM_PAGE);
        let items = schedule(&page_text(&doc));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].date, "Nov 8, 2025");
        assert_eq!(items[0].opponent, "Amherst College");
        assert_eq!(items[1].opponent, "Middlebury");

        let items = schedule("Meet on 2026-01-17");
        assert_eq!(items[0].date, "01/17/2026");
        assert_eq!(items[0].opponent, "TBD");
    }

    #[test]
    fn discovery_follows_same_domain_links() {
        let site = Url::parse("https://www.union.edu/").unwrap();
        let home = Html::parse_document(
            r#"<a href="/athletics">Athletics</a>
               <a href="https://twitter.com/sports">Sports on Twitter</a>
               <a href="/admissions">Apply</a>"#,
        );
        let links = athletics_links(&home, &site);
        assert_eq!(links, vec![Url::parse("https://www.union.edu/athletics").unwrap()]);

        let athletics = Html::parse_document(
            r#"<a href="https://gounion.union.edu/sports/swimming-and-diving">Swimming &amp; Diving</a>
               <a href="/sports/hockey">Hockey</a>"#,
        );
        let swim = swimming_links(&athletics, &links[0], &site);
        assert_eq!(swim.len(), 1);
        assert!(swim[0].as_str().contains("swimming-and-diving"));
    }
}
