use std::fmt;

use colored::Colorize;

use crate::core::services::BudgetStatus;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Success,
    Warning,
    Error,
}

/// Terminal output helpers. Colors are dropped when `NO_COLOR` is set.
pub struct Formatter;

impl Formatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.apply_style(Style::Header, title));
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{}", message);
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Detail, message));
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Success, message));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, message));
    }

    pub fn print_error(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Error, message));
    }

    /// Left-aligned labels padded to the widest entry.
    pub fn print_two_column(&self, entries: &[(String, String)]) {
        let width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("  {:<width$}  {}", label, value, width = width);
        }
    }

    pub fn status_text(&self, status: BudgetStatus) -> String {
        let text = status.to_string();
        match status {
            BudgetStatus::NoBudget => text.dimmed().to_string(),
            BudgetStatus::OnTrack => text.green().to_string(),
            BudgetStatus::NearLimit => text.yellow().to_string(),
            BudgetStatus::OverBudget => text.red().to_string(),
        }
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        match style {
            Style::Header => format!("=== {} ===", text).bold().to_string(),
            Style::Detail => text.dimmed().to_string(),
            Style::Success => format!("✔ {}", text).green().to_string(),
            Style::Warning => format!("⚠ {}", text).yellow().to_string(),
            Style::Error => format!("✖ {}", text).red().to_string(),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a progress ratio as a fixed-width bar, e.g. `[######----]`.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(progress_bar(0.5, 10), "[#####-----]");
        assert_eq!(progress_bar(1.7, 4), "[####]");
        assert_eq!(progress_bar(f64::NAN, 4), "[----]");
    }
}
