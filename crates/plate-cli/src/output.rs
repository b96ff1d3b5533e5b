//! Status lines for plate commands.
//!
//! All of it goes to stderr. Stdout is reserved for rendered template output so that
//! `plate render` can be piped.

use console::{style, StyledObject};

/// Command banner followed by a dimmed rule as wide as the title.
pub fn print_header(title: &str) {
    let rule = "=".repeat(title.chars().count());
    eprintln!("\n{}", style(title).bold().cyan());
    eprintln!("{}", style(rule).dim());
}

pub fn print_success(text: &str) {
    tagged(style("[OK]").green(), text);
}

pub fn print_warning(text: &str) {
    tagged(style("[WARN]").yellow(), text);
}

pub fn print_error(text: &str) {
    tagged(style("[ERROR]").red(), text);
}

/// Indented `key: value` line used for summary counts.
pub fn print_key_value(key: &str, value: &str) {
    eprintln!("  {}: {value}", style(key).dim());
}

fn tagged(tag: StyledObject<&str>, text: &str) {
    eprintln!("{} {text}", tag.bold());
}
