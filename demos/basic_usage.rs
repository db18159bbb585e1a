//! Basic usage example for the Journal Finder library.
//!
//! Runs a recommendation against the built-in catalog, then drives the
//! dashboard through a plagiarism check, an AI-content check and one
//! assistant question with every simulated delay removed.

use journal_finder::config::Config;
use journal_finder::detect::{AiContentDetector, FixedScore, PlagiarismChecker};
use journal_finder::{recommend, ui, Catalog, ChatBot, Dashboard, SearchCriteria};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    println!("Loaded {} journals\n", catalog.len());

    // Plain filter call, no dashboard state involved
    let criteria = SearchCriteria::new(
        "Sparse attention for long documents",
        "We propose a sparse attention mechanism that scales linearly...",
        3000,
        5.0,
    )?;
    let recommendation = recommend::filter(&catalog, &criteria);
    ui::print_recommendation(&recommendation);

    let dashboard = Dashboard::new(&Config::default(), catalog)
        .with_search_latency(Duration::ZERO)
        .with_plagiarism_checker(
            PlagiarismChecker::default()
                .with_strategy(Arc::new(FixedScore(7.5)))
                .with_latency(Duration::ZERO),
        )
        .with_ai_detector(
            AiContentDetector::default()
                .with_strategy(Arc::new(FixedScore(12.0)))
                .with_latency(Duration::ZERO),
        )
        .with_chatbot(ChatBot::default().with_latency(Duration::ZERO));

    dashboard.set_budget(100);
    dashboard.set_min_impact_factor(20.0);
    let fallback = dashboard
        .search("A very selective paper", "Nothing in the catalog fits this.")
        .await?;
    println!();
    ui::print_recommendation(&fallback);

    let abstract_text = "We propose a sparse attention mechanism...";
    let plagiarism = dashboard.check_plagiarism(abstract_text).await?;
    ui::print_plagiarism_report(&plagiarism);

    let ai = dashboard.detect_ai_content(abstract_text).await?;
    ui::print_ai_detection_report(&ai);

    if let Some(reply) = dashboard
        .send_chat("Which journal suits a machine learning paper?")
        .await?
    {
        ui::print_chat_message(&reply);
    }

    Ok(())
}
