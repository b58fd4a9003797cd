//! Statistics reporting.

use console::style;

use crate::download::RunStats;

/// Print statistics for the whole run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Courses processed: {}", stats.courses_processed);
    if stats.courses_failed > 0 {
        println!("  Courses failed:    {}", style(stats.courses_failed).red());
    }
    println!("  Created:  {} files ({})", stats.files_created, format_bytes(stats.bytes_written));
    println!("  Found:    {} (already downloaded)", stats.files_existing);
    if stats.files_failed > 0 {
        println!("  Failed:   {}", style(stats.files_failed).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(512 * 1024), "512.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 + 512 * 1024), "3.5 MiB");
    }
}
