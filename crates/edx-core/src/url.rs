//! URL helper functions for scraped course content
//!
//! Provides functions for building watch and transcript URLs and for
//! resolving the relative links found in platform markup.

/// Length of a canonical YouTube video identifier
pub const VIDEO_ID_LENGTH: usize = 11;

/// Builds the canonical watch URL for a video identifier
///
/// # Example
/// ```
/// use edx_core::url::build_watch_url;
/// let url = build_watch_url("b7xgknqzqss");
/// assert_eq!(url, "http://youtube.com/watch?v=b7xgknqzqss");
/// ```
pub fn build_watch_url(video_id: &str) -> String {
    format!("http://youtube.com/watch?v={}", video_id)
}

/// Builds a transcript fetch URL from the captured translation path
///
/// The platform exposes transcripts under
/// `<base>/<translation-path>/en?videoId=<id>`.
///
/// # Example
/// ```
/// use edx_core::url::build_subtitle_url;
/// let url = build_subtitle_url("https://courses.edx.org", "/t/xyz", "b7xgknqzqss");
/// assert_eq!(url, "https://courses.edx.org/t/xyz/en?videoId=b7xgknqzqss");
/// ```
pub fn build_subtitle_url(base_url: &str, translation_path: &str, video_id: &str) -> String {
    format!("{}{}/en?videoId={}", base_url, translation_path, video_id)
}

/// Rewrites a course info URL into its courseware URL
///
/// The dashboard links to `/courses/<id>/info`; the section listing lives
/// at `/courses/<id>/courseware`.
pub fn courseware_url(info_url: &str) -> String {
    info_url.replace("info", "courseware")
}

/// Resolves a link found in markup against the platform base URL
///
/// Platform pages use site-absolute hrefs, so resolution is plain
/// concatenation; already-absolute links pass through unchanged.
pub fn join_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}
