//! Main extraction API for OpenEdX platforms
//!
//! Combines the HTTP client with the page parsers and provides the
//! bounded-concurrency fan-out over subsection pages.

use futures::{StreamExt, stream};
use log::{info, warn};

use crate::client::{ClientConfig, EdxClient};
use crate::error::{EdxError, Result};
use crate::parser::{extract_units, parse_courses, parse_sections};
use crate::platform::Platform;
use crate::subtitle::{parse_timed_text, to_srt};
use crate::types::{Course, Section, SubSection};
use crate::url::courseware_url;

/// Configuration for the scraper
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Number of subsection pages fetched concurrently (default: 20)
    pub concurrency: usize,

    /// Batch failure policy for [`EdxScraper::extract_all`]: with `true`
    /// (the default) one failing subsection fails the whole batch; with
    /// `false` failing subsections are skipped with a warning and sibling
    /// results are kept.
    pub abort_on_error: bool,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            abort_on_error: true,
            timeout_secs: 30,
        }
    }
}

/// Main extraction API
///
/// Walks the platform hierarchy: dashboard courses, courseware sections,
/// subsection pages and their video units.
pub struct EdxScraper {
    client: EdxClient,
    config: ScraperConfig,
}

impl EdxScraper {
    /// Create a new scraper for a platform with default configuration
    pub fn new(platform: Platform) -> Result<Self> {
        Self::with_config(platform, ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration
    pub fn with_config(platform: Platform, config: ScraperConfig) -> Result<Self> {
        let client = EdxClient::with_config(
            platform,
            ClientConfig {
                timeout_secs: config.timeout_secs,
            },
        )?;
        Ok(Self { client, config })
    }

    /// The platform this scraper is bound to
    pub fn platform(&self) -> &Platform {
        self.client.platform()
    }

    /// Log in with the given credentials
    ///
    /// Must succeed before any of the fetching operations are useful.
    ///
    /// # Errors
    /// - `Network` on connection failure
    /// - `LoginFailed` when the platform rejects the credentials
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.client.login(email, password).await
    }

    /// List the user's enrolled courses from the dashboard
    ///
    /// # Returns
    /// Courses in display order. Courses that have not started are
    /// included, with no URL.
    ///
    /// # Errors
    /// - `Network` on fetch failure
    /// - `MalformedPage` when a course card is missing its heading
    pub async fn courses(&self) -> Result<Vec<Course>> {
        let html = self.client.get_page(&self.platform().dashboard_url()).await?;
        parse_courses(&html, self.platform().base_url())
    }

    /// List the top-level sections of a course
    ///
    /// # Errors
    /// - `MissingCourseUrl` when the course has not started (no URL)
    /// - `Network` on fetch failure
    /// - `MalformedPage` when a chapter block is structurally incomplete
    pub async fn sections(&self, course: &Course) -> Result<Vec<Section>> {
        let info_url = course
            .url
            .as_deref()
            .ok_or_else(|| EdxError::MissingCourseUrl(course.name.clone()))?;

        let html = self.client.get_page(&courseware_url(info_url)).await?;
        parse_sections(&html, self.platform().base_url())
    }

    /// Fetch one subsection page and extract its video units
    ///
    /// # Errors
    /// `Network` on fetch failure. A page without recognizable units is
    /// not an error; it yields an empty unit list.
    pub async fn extract_subsection(&self, url: &str) -> Result<SubSection> {
        info!("Processing '{}'...", url);
        let page = self.client.get_page(url).await?;

        Ok(SubSection {
            url: url.to_string(),
            units: extract_units(&page, self.platform().base_url()),
        })
    }

    /// Extract many subsection pages with bounded concurrency
    ///
    /// Runs up to `config.concurrency` fetch+parse tasks at a time and
    /// collects results in input order regardless of completion order,
    /// then flattens every subsection's units into two index-aligned
    /// sequences: `video_urls[i]` pairs with `sub_urls[i]`.
    ///
    /// # Errors
    /// With `abort_on_error` set, the first failing subsection fails the
    /// batch. Otherwise failures are logged and skipped; alignment
    /// between the two sequences is preserved either way.
    pub async fn extract_all(&self, urls: &[String]) -> Result<(Vec<String>, Vec<Option<String>>)> {
        let results: Vec<Result<SubSection>> = stream::iter(urls)
            .map(|url| self.extract_subsection(url))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut video_urls = Vec::new();
        let mut sub_urls = Vec::new();

        for result in results {
            match result {
                Ok(subsection) => {
                    for unit in subsection.units {
                        video_urls.push(unit.video_url);
                        sub_urls.push(unit.subtitle_url);
                    }
                }
                Err(e) if self.config.abort_on_error => return Err(e),
                Err(e) => warn!("Skipping subsection: {}", e),
            }
        }

        Ok((video_urls, sub_urls))
    }

    /// Fetch a transcript and convert it to SRT text
    ///
    /// # Returns
    /// `None` when the transcript cannot be fetched or decoded; both
    /// degrade to "no subtitles available" with a warning rather than
    /// failing the caller.
    pub async fn subtitle(&self, url: &str) -> Option<String> {
        let json = match self.client.get_page(url).await {
            Ok(json) => json,
            Err(e) => {
                warn!("Subtitles unavailable at '{}': {}", url, e);
                return None;
            }
        };

        match parse_timed_text(&json) {
            Ok(timed_text) => Some(to_srt(&timed_text)),
            Err(e) => {
                warn!("Subtitles undecodable at '{}': {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CourseState;

    #[test]
    fn test_scraper_creation() {
        let scraper = EdxScraper::new(Platform::edx());
        assert!(scraper.is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.concurrency, 20);
        assert!(config.abort_on_error);
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_sections_for_course_without_url() {
        let scraper = EdxScraper::new(Platform::edx()).unwrap();
        let course = Course {
            name: "Upcoming Course".to_string(),
            url: None,
            state: CourseState::NotStarted,
        };

        let result = scraper.sections(&course).await;
        match result {
            Err(EdxError::MissingCourseUrl(name)) => assert_eq!(name, "Upcoming Course"),
            _ => panic!("Expected MissingCourseUrl error"),
        }
    }
}
