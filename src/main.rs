//! moodle-fetch - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use moodle_fetch::{
    cli::Args,
    config::{validate_config, Config},
    download,
    error::{exit_codes, Result},
    output::{
        create_course_bar, print_banner, print_config_summary, print_error, print_info,
        print_run_stats, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if e.is_fatal() {
                print_info("Check your configuration and Moodle credentials, then re-run");
            }
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    print_config_summary(
        &config.auth.url,
        &config.auth.username,
        &config.download_directory().display().to_string(),
        config.options.course_concurrency,
        config.options.download_concurrency,
    );

    let progress = create_course_bar(config.options.show_progress);
    let stats = download::run(&config, progress).await?;

    tracing::info!("Finished");
    print_run_stats(&stats);

    if stats.courses_failed == 0 && stats.files_failed == 0 {
        print_success("Every course is up to date");
    } else {
        print_warning("Some items failed; re-run to retry them");
    }

    Ok(())
}
