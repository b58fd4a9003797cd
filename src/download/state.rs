//! Download statistics.

use crate::download::resource::DownloadedFile;
use crate::pool::{Outcome, SkipReason};

/// What happened to one course's links.
#[derive(Debug, Default, Clone)]
pub struct CourseReport {
    pub course_name: String,

    /// Links found in the course sections.
    pub links_found: u64,

    // Statistics
    pub files_created: u64,
    pub files_existing: u64,
    pub files_failed: u64,
    pub links_ignored: u64,
    pub bytes_written: u64,

    /// Files written during this run.
    pub created: Vec<DownloadedFile>,
}

impl CourseReport {
    /// Create an empty report for a course.
    pub fn new(course_name: String) -> Self {
        Self {
            course_name,
            ..Default::default()
        }
    }

    /// Tally the outcomes of a course's link batch.
    pub fn from_outcomes(course_name: String, outcomes: Vec<Outcome<DownloadedFile>>) -> Self {
        let mut report = Self::new(course_name);
        report.links_found = outcomes.len() as u64;

        for outcome in outcomes {
            match outcome {
                Outcome::Done(file) => {
                    report.files_created += 1;
                    report.bytes_written += file.bytes;
                    report.created.push(file);
                }
                Outcome::Skipped(SkipReason::NotAResource) => report.links_ignored += 1,
                Outcome::Skipped(SkipReason::AlreadyExists | SkipReason::AlreadyClaimed) => {
                    report.files_existing += 1
                }
                Outcome::Failed(_) => report.files_failed += 1,
            }
        }

        report
    }
}

/// Totals across all courses of a run.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub courses_processed: u64,
    pub courses_failed: u64,
    pub files_created: u64,
    pub files_existing: u64,
    pub files_failed: u64,
    pub bytes_written: u64,

    /// Every file written during the run.
    pub created: Vec<DownloadedFile>,
}

impl RunStats {
    /// Add statistics from a course report.
    pub fn add_course_report(&mut self, report: CourseReport) {
        self.courses_processed += 1;
        self.files_created += report.files_created;
        self.files_existing += report.files_existing;
        self.files_failed += report.files_failed;
        self.bytes_written += report.bytes_written;
        self.created.extend(report.created);
    }

    /// Mark a course as failed.
    pub fn mark_course_failed(&mut self) {
        self.courses_failed += 1;
    }
}
