//! OpenEdX Course Video Extraction Library
//!
//! Authenticates against an OpenEdX deployment, enumerates a user's
//! enrolled courses and walks the courseware hierarchy (course, section,
//! subsection, unit) down to video and subtitle URLs.
//!
//! # Overview
//!
//! This crate provides:
//! - An authenticated HTTP client handling the CSRF/login handshake
//! - Pure HTML/text parsers for the platform's markup conventions
//! - A bounded-concurrency fan-out over subsection pages with
//!   deterministic, input-ordered results
//! - Conversion of the platform's timed-text transcripts to SRT
//!
//! # Example
//!
//! ```no_run
//! use edx_core::{EdxScraper, Platform, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut scraper = EdxScraper::new(Platform::edx())?;
//!     scraper.login("user@example.org", "hunter2").await?;
//!
//!     let courses = scraper.courses().await?;
//!     let sections = scraper.sections(&courses[0]).await?;
//!
//!     let urls: Vec<String> = sections.iter().map(|s| s.url.clone()).collect();
//!     let (video_urls, sub_urls) = scraper.extract_all(&urls).await?;
//!
//!     for (video, sub) in video_urls.iter().zip(&sub_urls) {
//!         println!("{} (subtitles: {})", video, sub.is_some());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Brittleness
//!
//! The parsers target one site family's markup and JS-embedded-data
//! conventions and are expected to break when that markup changes. They
//! are kept as pure functions (text in, records out) so the pattern set
//! can be tested against fixture pages without network access.

mod client;
mod error;
pub mod parser;
mod platform;
mod scraper;
pub mod subtitle;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, EdxClient};

// Re-export error types
pub use error::{EdxError, Result};

// Re-export parser functions
pub use parser::{extract_units, parse_courses, parse_sections};

// Re-export platform configuration
pub use platform::{KNOWN_PLATFORMS, Platform};

// Re-export main scraper API
pub use scraper::{EdxScraper, ScraperConfig};

// Re-export subtitle conversion
pub use subtitle::{TimedText, parse_timed_text, to_srt};

// Re-export data types
pub use types::{Course, CourseState, Section, SubSection, Unit};
