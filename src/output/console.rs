//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
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
║     twimg-dump                                        ║
║     Media timeline downloader                         ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(screen_name: &str, output_directory: &str, template: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Account:   @{}", screen_name);
    println!("  Directory: {}", output_directory);
    println!("  Template:  {}", template);
    println!();
}
