//! Enrolled course discovery.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{Error, Result};
use crate::moodle::types::Course;
use crate::session::MoodleSession;

/// Collapsed third-level course entries of the navigation block.
static COURSE_ITEM: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li.type_course.depth_3.collapsed.contains_branch")
        .expect("static selector is valid")
});

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector is valid"));

/// Fetch the landing page and list the enrolled courses.
///
/// A missing courses section means the session is unusable and is fatal.
pub async fn discover_courses(session: &MoodleSession, marker: &str) -> Result<Vec<Course>> {
    let landing = session.landing_url();
    let page = session
        .fetch_page(landing)
        .await
        .map_err(|e| Error::Discovery(format!("Failed to fetch {}: {}", landing, e)))?;

    let courses = parse_courses(&page.body, &page.url, marker)?;
    tracing::info!("Found {} courses", courses.len());

    Ok(courses)
}

/// Extract courses listed after the courses section marker.
pub fn parse_courses(html: &str, base: &Url, marker: &str) -> Result<Vec<Course>> {
    let Some(start) = html.find(marker) else {
        return Err(Error::Discovery(format!(
            "'{}' section not found on {}",
            marker, base
        )));
    };

    let section = Html::parse_fragment(&html[start + marker.len()..]);
    let mut courses = Vec::new();

    for item in section.select(&COURSE_ITEM) {
        let Some(anchor) = item.select(&ANCHOR).next() else {
            tracing::debug!("Skipping course entry without a link");
            continue;
        };

        let Some(href) = anchor.value().attr("href") else {
            tracing::debug!("Skipping course entry without href");
            continue;
        };

        let name = anchor
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match base.join(href) {
            Ok(url) => courses.push(Course::new(name, url)),
            Err(e) => tracing::warn!("Skipping course '{}' with bad link {}: {}", name, href, e),
        }
    }

    Ok(courses)
}
