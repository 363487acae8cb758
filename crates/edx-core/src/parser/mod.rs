//! HTML parsers for OpenEdX pages
//!
//! Each parser is a pure function from page text to structured records,
//! so the brittle markup conventions can be tested against fixture pages
//! without network access.

pub mod courseware;
pub mod dashboard;
pub mod subsection;

pub use courseware::parse_sections;
pub use dashboard::parse_courses;
pub use subsection::extract_units;
