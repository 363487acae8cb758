//! Dashboard parser for OpenEdX platforms
//!
//! Parses the course-listing page and extracts the user's enrolled
//! courses in display order.

use scraper::{ElementRef, Html, Selector};

use crate::error::{EdxError, Result};
use crate::types::{Course, CourseState};
use crate::url::join_url;

/// Parses the dashboard HTML and returns the enrolled courses
///
/// Courses appear as repeated `article.course` cards; order in the result
/// equals document order. A card without an anchor is an expected
/// condition: the course is recorded with no URL and state `NotStarted`.
///
/// # Arguments
/// * `html` - Raw HTML string from the dashboard page
/// * `base_url` - Platform base URL used to resolve card links
///
/// # Returns
/// Vector of [`Course`] records, empty if no cards are found
///
/// # Errors
/// Returns `MalformedPage` if a card is missing its heading
pub fn parse_courses(html: &str, base_url: &str) -> Result<Vec<Course>> {
    let document = Html::parse_document(html);

    let card_selector = Selector::parse("article.course")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    let mut courses = Vec::new();

    for card in document.select(&card_selector) {
        courses.push(parse_course_card(&card, base_url)?);
    }

    Ok(courses)
}

/// Parses a single course card element
fn parse_course_card(card: &ElementRef, base_url: &str) -> Result<Course> {
    let h3_selector = Selector::parse("h3")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    let name = card
        .select(&h3_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| EdxError::MalformedPage("course card without a heading".to_string()))?;

    // Started courses carry the course link in the card's first anchor.
    // A missing anchor, or a first anchor without an href, simply means
    // the course has not started.
    let anchor_selector = Selector::parse("a")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    let url = card
        .select(&anchor_selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| join_url(base_url, href));

    let state = match &url {
        Some(url) if url.ends_with("info") || url.ends_with("info/") => CourseState::Started,
        _ => CourseState::NotStarted,
    };

    Ok(Course { name, url, state })
}
