//! Subsection page extractor
//!
//! Recovers the ordered list of video units from a subsection page. The
//! page embeds player data in two independent conventions, handled by two
//! passes over the raw text:
//!
//! 1. a delimiter split on the `data-streams` attribute, whose value keys
//!    off the "1.0" resolution marker; the 11 characters after each split
//!    point are the video identifier, and the same segment may carry a
//!    transcript translation URL;
//! 2. a global scan for `youtube.com/embed/` iframe URLs.
//!
//! Identifier extraction is purely positional and never validated; a page
//! matching neither convention yields no units, which is not an error.

use regex::Regex;

use crate::types::Unit;
use crate::url::{VIDEO_ID_LENGTH, build_subtitle_url, build_watch_url};

/// Delimiter preceding each embedded-player unit. Accepts both a literal
/// quote and its HTML entity; the resolution marker is "1.0" with any
/// number of trailing zeros, terminated by a colon.
const STREAMS_DELIMITER: &str = r#"data-streams=(?:&#34;|").*1\.00*:"#;

/// Transcript translation URL attribute, same quote conventions.
const TRANSCRIPT_ATTR: &str = r#"data-transcript-translation-url=(?:&#34;|")([^"&]*)(?:&#34;|")"#;

/// Iframe embed URL followed by a boundary character.
const IFRAME_EMBED: &str = r"//(?:www\.)?youtube\.com/embed/([^ ?&]*)[ ?&]";

/// Extracts all video units from a subsection page
///
/// # Arguments
/// * `page` - Raw decoded text of the subsection page
/// * `base_url` - Platform base URL used to build transcript URLs
///
/// # Returns
/// Units in page order: every embedded-player unit first, then every
/// iframe unit. No deduplication is performed; a video embedded both
/// ways appears twice.
pub fn extract_units(page: &str, base_url: &str) -> Vec<Unit> {
    let mut units = primary_units(page, base_url);
    units.extend(iframe_units(page));
    units
}

/// Primary pass: delimiter split on the `data-streams` attribute
fn primary_units(page: &str, base_url: &str) -> Vec<Unit> {
    let Ok(splitter) = Regex::new(STREAMS_DELIMITER) else {
        return Vec::new();
    };
    let transcript = Regex::new(TRANSCRIPT_ATTR).ok();

    let mut units = Vec::new();

    // The first split segment is boilerplate preceding the first unit.
    for segment in splitter.split(page).skip(1) {
        let video_id: String = segment.chars().take(VIDEO_ID_LENGTH).collect();

        // A missing or truncated transcript attribute means no subtitles
        // for this unit, never a failure.
        let subtitle_url = transcript
            .as_ref()
            .and_then(|re| re.captures(segment))
            .map(|caps| build_subtitle_url(base_url, &caps[1], &video_id));

        units.push(Unit {
            video_url: build_watch_url(&video_id),
            subtitle_url,
        });
    }

    units
}

/// Secondary pass: iframe-embedded players over the unsplit page text
fn iframe_units(page: &str) -> Vec<Unit> {
    let Ok(embed) = Regex::new(IFRAME_EMBED) else {
        return Vec::new();
    };

    embed
        .captures_iter(page)
        .map(|caps| {
            let video_id: String = caps[1].chars().take(VIDEO_ID_LENGTH).collect();
            Unit {
                video_url: build_watch_url(&video_id),
                subtitle_url: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://courses.edx.org";

    #[test]
    fn test_page_without_videos_yields_no_units() {
        let page = "<html><body><p>Reading assignment for week 1.</p></body></html>";
        assert!(extract_units(page, BASE).is_empty());
    }

    #[test]
    fn test_primary_unit_with_transcript() {
        let page = concat!(
            "<div class=\"video\" ",
            "data-streams=\"0.75:aaaaaaaaaaa,1.0:b7xgknqzqss\" ",
            "data-transcript-translation-url=\"/courses/x/transcript/translation\">",
            "</div>",
        );

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].video_url, "http://youtube.com/watch?v=b7xgknqzqss");
        assert_eq!(
            units[0].subtitle_url.as_deref(),
            Some("https://courses.edx.org/courses/x/transcript/translation/en?videoId=b7xgknqzqss")
        );
    }

    #[test]
    fn test_primary_unit_with_entity_quotes() {
        let page = concat!(
            "<div data-streams=&#34;0.75:aaaaaaaaaaa,1.00:dQw4w9WgXcQ&#34; ",
            "data-transcript-translation-url=&#34;/t/xyz&#34;></div>",
        );

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].video_url, "http://youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(
            units[0].subtitle_url.as_deref(),
            Some("https://courses.edx.org/t/xyz/en?videoId=dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_primary_unit_without_transcript() {
        let page = "<div data-streams=\"1.0:b7xgknqzqss\"></div>";

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].subtitle_url, None);
    }

    #[test]
    fn test_multiple_primary_units_preserve_page_order() {
        let page = concat!(
            "<div data-streams=\"1.0:aaaaaaaaaaa\"></div>\n",
            "<div data-streams=\"1.0:bbbbbbbbbbb\" ",
            "data-transcript-translation-url=\"/t/b\"></div>\n",
            "<div data-streams=\"1.0:ccccccccccc\"></div>\n",
        );

        let units = extract_units(page, BASE);
        let ids: Vec<&str> = units.iter().map(|u| &u.video_url[u.video_url.len() - 11..]).collect();
        assert_eq!(ids, vec!["aaaaaaaaaaa", "bbbbbbbbbbb", "ccccccccccc"]);
        assert!(units[0].subtitle_url.is_none());
        assert!(units[1].subtitle_url.is_some());
        assert!(units[2].subtitle_url.is_none());
    }

    #[test]
    fn test_iframe_units_appended_after_primary_units() {
        let page = concat!(
            "<iframe src=\"//www.youtube.com/embed/iframeid111?rel=0\"></iframe>\n",
            "<div data-streams=\"1.0:primaryid11\"></div>\n",
            "<iframe src=\"//youtube.com/embed/iframeid222&autoplay=1\"></iframe>\n",
        );

        let units = extract_units(page, BASE);
        let ids: Vec<&str> = units.iter().map(|u| &u.video_url[u.video_url.len() - 11..]).collect();
        // Primary units strictly precede iframe units, each pass in page order.
        assert_eq!(ids, vec!["primaryid11", "iframeid111", "iframeid222"]);
        assert!(units.iter().skip(1).all(|u| u.subtitle_url.is_none()));
    }

    #[test]
    fn test_iframe_id_truncated_to_eleven_chars() {
        let page = "<iframe src=\"//www.youtube.com/embed/abcdefghijklmnop \"></iframe>";

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].video_url, "http://youtube.com/watch?v=abcdefghijk");
    }

    #[test]
    fn test_iframe_requires_boundary_character() {
        // No `?`, `&` or space after the identifier, so no match.
        let page = "<p>see //www.youtube.com/embed/abcdefghijk</p>";
        assert!(extract_units(page, BASE).is_empty());
    }

    #[test]
    fn test_no_deduplication_between_passes() {
        let page = concat!(
            "<div data-streams=\"1.0:sameidsame1\"></div>\n",
            "<iframe src=\"//www.youtube.com/embed/sameidsame1?rel=0\"></iframe>\n",
        );

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].video_url, units[1].video_url);
    }

    #[test]
    fn test_short_trailing_segment_is_taken_as_is() {
        // Identifier extraction is purely positional; a segment shorter
        // than eleven characters produces a (garbage) short identifier.
        let page = "<div data-streams=\"1.0:abc";

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].video_url, "http://youtube.com/watch?v=abc");
    }

    #[test]
    fn test_truncated_transcript_attribute_is_ignored() {
        let page = "<div data-streams=\"1.0:b7xgknqzqss\" data-transcript-translation-url=\"/t/unterminated";

        let units = extract_units(page, BASE);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].subtitle_url, None);
    }
}
