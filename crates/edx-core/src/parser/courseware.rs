//! Courseware parser for OpenEdX platforms
//!
//! Parses a course's courseware page and extracts the ordered list of
//! top-level sections (chapters).

use scraper::{ElementRef, Html, Selector};

use crate::error::{EdxError, Result};
use crate::types::Section;
use crate::url::join_url;

/// Parses courseware HTML and returns the course sections
///
/// Sections appear as repeated `div.chapter` blocks. Positions are
/// assigned 1-based in iteration order; nothing positional is read from
/// the markup itself.
///
/// # Arguments
/// * `html` - Raw HTML string from the courseware page
/// * `base_url` - Platform base URL used to resolve section links
///
/// # Returns
/// Vector of [`Section`] records in document order
///
/// # Errors
/// Returns `MalformedPage` if a chapter block is missing its heading link
/// or its subsection list link. No section is silently dropped.
pub fn parse_sections(html: &str, base_url: &str) -> Result<Vec<Section>> {
    let document = Html::parse_document(html);

    let chapter_selector = Selector::parse("div.chapter")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    let mut sections = Vec::new();

    for (idx, chapter) in document.select(&chapter_selector).enumerate() {
        sections.push(Section {
            position: idx + 1,
            name: section_name(&chapter)?,
            url: section_url(&chapter, base_url)?,
        });
    }

    Ok(sections)
}

/// Extracts the trimmed chapter name from the heading link
fn section_name(chapter: &ElementRef) -> Result<String> {
    let heading_selector = Selector::parse("h3 a")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    chapter
        .select(&heading_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| EdxError::MalformedPage("chapter without a heading link".to_string()))
}

/// Extracts the first subsection URL from the chapter's list
fn section_url(chapter: &ElementRef, base_url: &str) -> Result<String> {
    let link_selector = Selector::parse("ul a[href]")
        .map_err(|e| EdxError::MalformedPage(format!("Invalid selector: {:?}", e)))?;

    chapter
        .select(&link_selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| join_url(base_url, href))
        .ok_or_else(|| EdxError::MalformedPage("chapter without a subsection link".to_string()))
}
