//! Crawl-and-download orchestration.
//!
//! Courses are crawled through one bounded pool; every crawled course then
//! downloads its links through a link-level pool. Both levels run with
//! independent limits and a failing course or link never stops its siblings.

use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::download::resource::{download_resource, DownloadOptions};
use crate::download::state::{CourseReport, RunStats};
use crate::error::Result;
use crate::fs::{ensure_dir, ClaimRegistry};
use crate::moodle::{crawl_course, discover_courses, Course, CrawledCourse};
use crate::pool::{Outcome, PoolFactory, PoolMode, PoolOptions, WorkerPool};
use crate::session::{MoodleSession, SessionOptions};

/// State shared by every course job.
struct Shared {
    session: Arc<MoodleSession>,
    root: PathBuf,
    link_pools: PoolFactory,
    download: Arc<DownloadOptions>,
    claims: ClaimRegistry,
}

/// The two-level crawl and download pipeline.
pub struct Pipeline {
    course_pool: WorkerPool,
    shared: Arc<Shared>,
    progress: ProgressBar,
}

impl Pipeline {
    /// Build a pipeline around an established session.
    pub fn new(session: MoodleSession, config: &Config) -> Self {
        let mode: PoolMode = config.options.pool_mode.into();

        let course_pool = WorkerPool::new(mode, config.options.course_concurrency);
        let link_pools = PoolFactory::new(PoolOptions {
            mode,
            limit: config.options.download_concurrency,
            scope: config.options.pool_scope.into(),
        });

        Self {
            course_pool,
            shared: Arc::new(Shared {
                session: Arc::new(session),
                root: config.download_directory(),
                link_pools,
                download: Arc::new(DownloadOptions {
                    resource_marker: config.options.resource_marker.clone(),
                }),
                claims: ClaimRegistry::new(),
            }),
            progress: ProgressBar::hidden(),
        }
    }

    /// Report each finished course on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Crawl every course and download its resources.
    ///
    /// Returns once every course and every download has finished.
    pub async fn run(&self, courses: Vec<Course>) -> Result<RunStats> {
        ensure_dir(&self.shared.root).await?;
        self.progress.set_length(courses.len() as u64);

        let outcomes = self
            .course_pool
            .run_outcomes(courses, |course| {
                let shared = Arc::clone(&self.shared);
                let progress = self.progress.clone();
                async move {
                    let outcome = shared.process_course(course).await;
                    progress.inc(1);
                    outcome
                }
            })
            .await;

        self.progress.finish_and_clear();

        let mut stats = RunStats::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Done(report) => stats.add_course_report(report),
                _ => stats.mark_course_failed(),
            }
        }

        Ok(stats)
    }
}

impl Shared {
    /// Crawl one course, then download its links.
    async fn process_course(&self, course: Course) -> Outcome<CourseReport> {
        let crawled = match crawl_course(&self.session, &course, &self.root).await {
            Ok(crawled) => crawled,
            Err(e) => {
                tracing::warn!("Could not crawl course {}. Error {}", course, e);
                return Outcome::Failed(e.to_string());
            }
        };

        let CrawledCourse {
            course,
            directory,
            links,
        } = crawled;

        let pool = self.link_pools.pool();
        let outcomes = pool
            .run_outcomes(links, |link| {
                let session = Arc::clone(&self.session);
                let download = Arc::clone(&self.download);
                let claims = self.claims.clone();
                let directory = directory.clone();
                async move { download_resource(&session, &link, &directory, &download, &claims).await }
            })
            .await;

        let report = CourseReport::from_outcomes(course.name, outcomes);
        tracing::debug!(
            "{}: {} created, {} found, {} failed",
            report.course_name,
            report.files_created,
            report.files_existing,
            report.files_failed
        );

        Outcome::Done(report)
    }
}

/// Log in, discover the enrolled courses and mirror them.
///
/// Errors are returned only for the fatal startup steps; course and link
/// failures end up in the returned statistics.
pub async fn run(config: &Config, progress: ProgressBar) -> Result<RunStats> {
    let session_options = SessionOptions::from_config(config)?;

    tracing::info!("Logging in to {}", config.auth.url);
    let session = MoodleSession::login(&config.auth, &session_options).await?;

    let courses = discover_courses(&session, &config.options.courses_marker).await?;

    Pipeline::new(session, config)
        .with_progress(progress)
        .run(courses)
        .await
}
