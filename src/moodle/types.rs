//! Course and link representation.

use std::fmt;

use url::Url;

/// An enrolled course found on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Display name as shown in the navigation.
    pub name: String,

    /// Course content page.
    pub url: Url,
}

impl Course {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An anchor found inside a course section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub href: Url,
}

impl ResourceLink {
    pub fn new(href: Url) -> Self {
        Self { href }
    }

    /// Whether the link targets a downloadable resource module.
    ///
    /// Forums, folders, pages and navigation links do not carry the marker
    /// in their path.
    pub fn is_resource(&self, marker: &str) -> bool {
        self.href.path().contains(marker)
    }
}

impl fmt::Display for ResourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href)
    }
}
