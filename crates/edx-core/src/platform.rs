//! OpenEdX platform configuration
//!
//! Each deployment of OpenEdX lives at its own base URL. A [`Platform`] is
//! an immutable value selecting one deployment; it is threaded into every
//! component instead of living in process-wide mutable state.

use serde::{Deserialize, Serialize};

/// Names of the built-in platform deployments, in menu order
pub const KNOWN_PLATFORMS: &[&str] = &["edx", "stanford", "usyd-sit", "fun", "gwu-seas", "gwu-open"];

/// One OpenEdX deployment, identified by its base site URL
///
/// Relative links found in scraped markup are resolved against
/// [`Platform::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    base_url: String,
}

impl Platform {
    /// Create a platform from an arbitrary base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The main edx.org deployment
    pub fn edx() -> Self {
        Self::new("https://courses.edx.org")
    }

    /// Stanford Lagunita
    pub fn stanford() -> Self {
        Self::new("https://lagunita.stanford.edu")
    }

    /// University of Sydney School of IT
    pub fn usyd_sit() -> Self {
        Self::new("http://online.it.usyd.edu.au")
    }

    /// France Université Numérique
    pub fn fun() -> Self {
        Self::new("https://www.france-universite-numerique-mooc.fr")
    }

    /// George Washington University SEAS
    pub fn gwu_seas() -> Self {
        Self::new("http://openedx.seas.gwu.edu")
    }

    /// George Washington University Open
    pub fn gwu_open() -> Self {
        Self::new("http://mooc.online.gwu.edu")
    }

    /// Look up a built-in platform by name
    ///
    /// # Returns
    /// `Some(Platform)` for a name in [`KNOWN_PLATFORMS`], `None` otherwise
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "edx" => Some(Self::edx()),
            "stanford" => Some(Self::stanford()),
            "usyd-sit" => Some(Self::usyd_sit()),
            "fun" => Some(Self::fun()),
            "gwu-seas" => Some(Self::gwu_seas()),
            "gwu-open" => Some(Self::gwu_open()),
            _ => None,
        }
    }

    /// Base site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Login endpoint; also serves as the CSRF token source
    pub fn login_url(&self) -> String {
        format!("{}/login_ajax", self.base_url)
    }

    /// Dashboard page listing the user's enrolled courses
    pub fn dashboard_url(&self) -> String {
        format!("{}/dashboard", self.base_url)
    }
}
