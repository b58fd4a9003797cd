//! Course content page crawling.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{Error, Result};
use crate::fs::{course_directory, ensure_dir};
use crate::moodle::types::{Course, ResourceLink};
use crate::session::MoodleSession;

static COURSE_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".course-content").expect("static selector is valid"));

static SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".section.main.clearfix").expect("static selector is valid"));

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// A course whose content page has been read.
#[derive(Debug, Clone)]
pub struct CrawledCourse {
    pub course: Course,

    /// Local directory the course's files go to. Exists once crawled.
    pub directory: PathBuf,

    /// Every section link, in page order.
    pub links: Vec<ResourceLink>,
}

/// Create the course directory and collect the links of its content page.
///
/// Does not download anything.
pub async fn crawl_course(
    session: &MoodleSession,
    course: &Course,
    root: &Path,
) -> Result<CrawledCourse> {
    let directory = course_directory(root, &course.name)?;
    ensure_dir(&directory).await?;

    let page = session.fetch_page(&course.url).await?;
    let links = extract_section_links(&page.body, &page.url)?;

    tracing::debug!("{}: {} links in content sections", course.name, links.len());

    Ok(CrawledCourse {
        course: course.clone(),
        directory,
        links,
    })
}

/// Collect the anchors of every topic section inside the course content.
pub fn extract_section_links(html: &str, base: &Url) -> Result<Vec<ResourceLink>> {
    let document = Html::parse_document(html);

    let content = document
        .select(&COURSE_CONTENT)
        .next()
        .ok_or_else(|| Error::Parse(format!("no .course-content container on {}", base)))?;

    let mut links = Vec::new();
    for section in content.select(&SECTION) {
        for anchor in section.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            match base.join(href) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    links.push(ResourceLink::new(url));
                }
                Ok(url) => tracing::debug!("Ignoring {} link {}", url.scheme(), url),
                Err(e) => tracing::debug!("Ignoring unparsable link {}: {}", href, e),
            }
        }
    }

    Ok(links)
}
