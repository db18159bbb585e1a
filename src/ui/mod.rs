//! Terminal output: journal cards, check reports, chat and spinners.
//!
//! The `*_lines` functions build uncolored text so output can be tested;
//! the `print_*` functions add color and write to stdout.

use owo_colors::OwoColorize;
use std::time::Duration;

use crate::models::{
    AiContentStatus, AiDetectionReport, ChatMessage, ChatRole, PlagiarismReport,
    PlagiarismStatus, RankedResult, Recommendation,
};
use crate::session::TutorialStep;
use crate::utils::{format_cost, format_percent, wrap_text};

/// Width of journal cards and report boxes
pub const CARD_WIDTH: usize = 72;

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Info,
    Pending,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Pending => "○",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Pending => println!("{} {}", icon.white().dimmed(), msg),
    }
}

/// Welcome banner for the application.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");

    println!();
    println!("{}", format!("📚 Research Journal Finder v{}", version).bold().cyan());
    println!("   Find the right journal for your paper, check it for plagiarism and");
    println!("   AI-generated content, and ask the research assistant.");
    println!();
    println!("   {}", "journal-finder search --title \"...\" --abstract \"...\"".dimmed());
    println!("   {}", "journal-finder chat".dimmed());
    println!();
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// A text gauge for a percentage, e.g. `[████░░░░░░]`
pub fn gauge(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Uncolored lines of a journal card
pub fn journal_card_lines(result: &RankedResult) -> Vec<String> {
    let journal = &result.journal;
    let mut badges = format!("#{}", result.rank);
    if journal.is_high_impact() {
        badges.push_str("  ★ High Impact");
    }

    let mut lines = vec![badges, journal.name.clone()];
    lines.extend(wrap_text(&journal.description, CARD_WIDTH - 4));
    lines.push(format!(
        "Impact Factor: {:.1}   Acceptance: {}%   Cost: {}   Review: {}",
        journal.impact_factor,
        journal.acceptance_rate,
        format_cost(journal.publishing_cost),
        journal.review_time
    ));
    lines
}

/// Print one ranked journal as a card.
pub fn print_journal_card(result: &RankedResult) {
    let journal = &result.journal;
    let rank = format!("#{}", result.rank);

    println!();
    print!("{}", rank.bold().magenta());
    if journal.is_high_impact() {
        print!("  {}", "★ High Impact".yellow());
    }
    println!();
    println!("{}", journal.name.blue().bold());
    for line in wrap_text(&journal.description, CARD_WIDTH - 4) {
        println!("  {}", line.dimmed());
    }
    println!(
        "  {} {:.1}   {} {}%   {} {}   {} {}",
        "Impact Factor:".dimmed(),
        journal.impact_factor.green().bold(),
        "Acceptance:".dimmed(),
        journal.acceptance_rate.cyan(),
        "Cost:".dimmed(),
        format_cost(journal.publishing_cost).yellow(),
        "Review:".dimmed(),
        journal.review_time
    );
}

/// Print the notification and every result card.
pub fn print_recommendation(recommendation: &Recommendation) {
    print_status(Status::Success, &recommendation.notification());
    if recommendation.fallback {
        print_status(
            Status::Info,
            "No journal matched your filters; showing top catalog journals instead",
        );
    }
    for result in &recommendation.results {
        print_journal_card(result);
    }
    println!();
}

/// Uncolored lines of a plagiarism report
pub fn plagiarism_lines(report: &PlagiarismReport) -> Vec<String> {
    let mut lines = vec![
        report.headline(),
        report.status.label().to_string(),
        "Matched sources:".to_string(),
    ];
    lines.extend(
        report
            .matches
            .iter()
            .map(|m| format!("  {:<30} {}", m.source, format_percent(m.similarity))),
    );
    lines
}

/// Print a plagiarism report.
pub fn print_plagiarism_report(report: &PlagiarismReport) {
    print_section("Plagiarism Check");
    let status = match report.status {
        PlagiarismStatus::Pass => Status::Success,
        PlagiarismStatus::Warning => Status::Warning,
    };
    println!(
        "{} {}",
        report.headline().bold(),
        gauge(report.similarity, 20).dimmed()
    );
    print_status(status, report.status.label());
    println!();
    println!("{}", "Matched sources".bold());
    for m in &report.matches {
        println!("  {:<30} {}", m.source, format_percent(m.similarity).yellow());
    }
    println!();
}

/// Uncolored lines of an AI detection report
pub fn ai_detection_lines(report: &AiDetectionReport) -> Vec<String> {
    let mut lines = vec![
        report.headline(),
        report.status.label().to_string(),
        format!("AI probability: {}", format_percent(report.ai_probability)),
        "Section analysis:".to_string(),
    ];
    lines.extend(report.sections.iter().map(|s| {
        format!(
            "  {:<14} {:>6}  {}",
            s.name,
            format_percent(s.ai_score),
            s.status.label()
        )
    }));
    lines
}

/// Print an AI detection report.
pub fn print_ai_detection_report(report: &AiDetectionReport) {
    print_section("AI Content Detection");
    let status = match report.status {
        AiContentStatus::Human => Status::Success,
        AiContentStatus::Mixed => Status::Warning,
    };
    println!(
        "{} {}",
        report.headline().bold(),
        gauge(report.human_probability, 20).dimmed()
    );
    print_status(status, report.status.label());
    println!(
        "  {} {}",
        "AI probability:".dimmed(),
        format_percent(report.ai_probability)
    );
    println!();
    println!("{}", "Section analysis".bold());
    for section in &report.sections {
        println!(
            "  {:<14} {:>6}  {}",
            section.name,
            format_percent(section.ai_score).yellow(),
            section.status.label().dimmed()
        );
    }
    println!();
}

/// Print a chat message with its speaker.
pub fn print_chat_message(message: &ChatMessage) {
    match message.role {
        ChatRole::Assistant => {
            println!("{} {}", "assistant ›".cyan().bold(), message.content)
        }
        ChatRole::User => println!("{} {}", "you ›".green().bold(), message.content),
    }
}

/// Print the onboarding tutorial.
pub fn print_tutorial(steps: &[TutorialStep]) {
    print_section("Getting Started");
    for (i, step) in steps.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("{}/{}", i + 1, steps.len()).dimmed(),
            step.title.bold()
        );
        for line in wrap_text(step.description, CARD_WIDTH - 4) {
            println!("    {}", line);
        }
    }
    println!();
}

fn spinner_style(template: &str, ticks: &str) -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template(template)
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
        .tick_chars(ticks)
}

/// Loading spinner shown while a simulated request is pending.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(spinner_style("{spinner:.cyan} {msg}", "⠁⠂⠄⡀⢀⠠⠐⠈ "));
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for quiet or non-terminal output.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Spinner when `visible`, hidden otherwise.
    pub fn maybe(msg: &str, visible: bool) -> Self {
        if visible {
            Self::new(msg)
        } else {
            Self::hidden()
        }
    }

    /// Finish with error message.
    pub fn finish_with_error(&self, msg: &str) {
        self.pb.set_style(spinner_style("{spinner:.red} {msg}", "✗✗"));
        self.pb.finish_with_message(msg.to_string());
    }

    /// Remove the spinner from the terminal.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}
