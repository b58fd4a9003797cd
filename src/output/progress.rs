//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};

/// Create the course-level progress bar.
///
/// The length is set once the courses are known. Returns a hidden bar when
/// progress display is off so callers never need to branch.
pub fn create_course_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} Courses [{bar:40.cyan/blue}] {pos}/{len}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_bar_is_hidden() {
        assert!(create_course_bar(false).is_hidden());
    }
}
