//! Core data types for the OpenEdX extraction library
//!
//! Records mirror the course hierarchy as it appears on the platform:
//! dashboard courses, courseware sections, subsection pages and the
//! video units found on them.

use serde::{Deserialize, Serialize};

/// Enrollment state of a course on the dashboard
///
/// Courses whose dashboard card links to an `info` page have started;
/// cards without a link (or with another link target) have not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseState {
    NotStarted,
    Started,
}

/// One enrolled course as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Display name from the course card heading, trimmed
    pub name: String,

    /// Absolute URL of the course info page, absent for courses whose
    /// card carries no link (an expected condition, not an error)
    pub url: Option<String>,

    /// Whether the course has started
    pub state: CourseState,
}

/// One top-level section (chapter) of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based position assigned in document order, not parsed from markup
    pub position: usize,

    /// Display name from the chapter heading link, trimmed
    pub name: String,

    /// Absolute URL of the section's first subsection
    pub url: String,
}

/// One fetched and parsed subsection page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    /// URL the page was fetched from
    pub url: String,

    /// Content units in page order: embedded-player units first,
    /// iframe-embedded units after
    pub units: Vec<Unit>,
}

/// One playable video plus its optional subtitle source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical watch URL built from the 11-character video identifier
    pub video_url: String,

    /// Transcript fetch URL, absent when the page carries no transcript
    /// attribute for this unit
    pub subtitle_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_serialization_round_trip() {
        let course = Course {
            name: "Quantum Mechanics and Quantum Computation".to_string(),
            url: Some("https://courses.edx.org/courses/BerkeleyX/CS191x/2013_Spring/info".to_string()),
            state: CourseState::Started,
        };

        let json = serde_json::to_string(&course).expect("Serialization should succeed");
        let deserialized: Course =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(course, deserialized);
    }

    #[test]
    fn test_course_without_url() {
        let course = Course {
            name: "Upcoming Course".to_string(),
            url: None,
            state: CourseState::NotStarted,
        };

        let json = serde_json::to_string(&course).expect("Serialization should succeed");
        let deserialized: Course =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(course, deserialized);
        assert_eq!(deserialized.url, None);
    }

    #[test]
    fn test_subsection_serialization_round_trip() {
        let subsection = SubSection {
            url: "https://courses.edx.org/courses/x/courseware/week1".to_string(),
            units: vec![
                Unit {
                    video_url: "http://youtube.com/watch?v=b7xgknqzqss".to_string(),
                    subtitle_url: Some("https://courses.edx.org/t/en?videoId=b7xgknqzqss".to_string()),
                },
                Unit {
                    video_url: "http://youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                    subtitle_url: None,
                },
            ],
        };

        let json = serde_json::to_string(&subsection).expect("Serialization should succeed");
        let deserialized: SubSection =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(subsection, deserialized);
    }
}
