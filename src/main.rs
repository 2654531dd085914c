use clap::Parser;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use term_scrape::results::RunResult;
use term_scrape::{Scraper, ScraperConfig, config, report};

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.config_only {
        show_configuration(&config);
        return ExitCode::SUCCESS;
    }

    if args.examples {
        return match interruptible(run_examples()).await {
            Some(()) => ExitCode::SUCCESS,
            None => ExitCode::FAILURE,
        };
    }

    print_banner(&config);

    let scraper = match Scraper::new(config) {
        Ok(scraper) => scraper,
        Err(e) => {
            println!("\n❌ Error during scraping: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(results) = interruptible(scraper.run_configured()).await else {
        return ExitCode::FAILURE;
    };

    report::print_results(&results);
    let output_file = save_results_to_file(&results, args.output.as_deref());

    println!("\n✅ Scraping completed successfully!");
    if let Some(path) = output_file {
        println!("📁 Results saved to: {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Drives `work` to completion unless the user interrupts with Ctrl-C
async fn interruptible<F: Future>(work: F) -> Option<F::Output> {
    tokio::select! {
        output = work => Some(output),
        Ok(()) = tokio::signal::ctrl_c() => {
            ::log::warn!("Received interrupt, abandoning run");
            println!("\n⚠️  Scraping interrupted by user");
            None
        }
    }
}

fn print_banner(config: &ScraperConfig) {
    println!("🔍 Web Scraper Starting...");
    println!("📝 URLs to scrape: {}", config.urls.len());
    println!("🔎 Search terms: {:?}", config.search_terms);
    println!("⏱️  Delay between requests: {}s", config.delay_secs);
    println!("🔤 Case sensitive: {}", config.case_sensitive);
    println!("📍 Search in: {}", config.search_in);
    println!("{}", "-".repeat(50));
}

fn show_configuration(config: &ScraperConfig) {
    println!("📋 Current Configuration:");
    println!("{}", "=".repeat(50));
    println!("URLs: {:?}", config.urls);
    println!("Search Terms: {:?}", config.search_terms);
    println!("Delay: {} seconds", config.delay_secs);
    println!("Case Sensitive: {}", config.case_sensitive);
    println!("Search In: {}", config.search_in);
    println!("\n💡 To customize, pass a JSON file with --config or use command-line arguments.");
}

/// Saves results, reporting rather than propagating failures
fn save_results_to_file(results: &RunResult, path: Option<&Path>) -> Option<PathBuf> {
    match report::save_results(results, path) {
        Ok(path) => {
            println!("\n💾 Results saved to: {}", path.display());
            Some(path)
        }
        Err(e) => {
            println!("\n❌ Error saving results: {}", e);
            None
        }
    }
}

async fn run_examples() {
    println!("🚀 Running Example Scenarios...");

    for preset in config::presets() {
        println!("\n{}", "=".repeat(60));
        println!("Running: {}", preset.name);
        println!("{}", "=".repeat(60));

        match Scraper::new(preset.config) {
            Ok(scraper) => {
                let results = scraper.run_configured().await;
                report::print_results(&results);
            }
            Err(e) => println!("❌ Example failed: {}", e),
        }
    }
}
