//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     moodle-fetch                                      ║
║     Mirror your Moodle course files locally           ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    login_url: &str,
    username: &str,
    download_dir: &str,
    course_concurrency: usize,
    download_concurrency: usize,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Portal:    {}", login_url);
    println!("  User:      {}", username);
    println!("  Directory: {}", download_dir);
    println!(
        "  Workers:   {} courses, {} downloads",
        course_concurrency, download_concurrency
    );
    println!();
}
