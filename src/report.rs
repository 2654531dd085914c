//! Console and file rendering of run results.

use crate::error::Result;
use crate::results::{PageResult, RunResult};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Snippets shown per term on the console; the file keeps all of them
pub const MAX_CONSOLE_SNIPPETS: usize = 3;

/// Human-readable rendering of a [`RunResult`]
pub struct Report<'a>(pub &'a RunResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "WEB SCRAPING RESULTS")?;
        writeln!(f, "{rule}")?;

        for (url, result) in self.0.iter() {
            writeln!(f)?;
            writeln!(f, "URL: {url}")?;

            let page = match result {
                PageResult::Failed { error } => {
                    writeln!(f, "  ❌ {error}")?;
                    continue;
                }
                PageResult::Scraped(page) => page,
            };

            writeln!(f, "  📄 Title: {}", page.page_title)?;
            writeln!(f, "  🔍 Total matches: {}", page.total_matches)?;

            if page.matches.is_empty() {
                writeln!(f, "  ❌ No matches found")?;
                continue;
            }

            writeln!(f, "  📝 Found terms:")?;
            for (term, snippets) in page.matches.iter() {
                writeln!(f, "    • '{term}' ({} occurrences)", snippets.len())?;
                for (i, snippet) in snippets.iter().take(MAX_CONSOLE_SNIPPETS).enumerate() {
                    writeln!(f, "      {}. ...{snippet}...", i + 1)?;
                }
                if snippets.len() > MAX_CONSOLE_SNIPPETS {
                    writeln!(
                        f,
                        "      ... and {} more occurrences",
                        snippets.len() - MAX_CONSOLE_SNIPPETS
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Renders results the way they are printed to the console
pub fn render_results(results: &RunResult) -> String {
    Report(results).to_string()
}

/// Prints results to stdout
pub fn print_results(results: &RunResult) {
    print!("{}", Report(results));
}

/// Results file name for a given moment, e.g. `scraper_results_20240131_235959.json`
pub fn output_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("scraper_results_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Timestamped results path in the current directory
pub fn default_output_path() -> PathBuf {
    PathBuf::from(output_file_name(&Local::now()))
}

/// Writes the full results as indented JSON.
///
/// Uses `path` when given, otherwise [`default_output_path`]. Returns the path
/// that was written.
pub fn save_results(results: &RunResult, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map_or_else(default_output_path, Path::to_path_buf);

    let json = serde_json::to_string_pretty(results)?;
    fs::write(&path, json)?;

    ::log::info!("Saved {} results to {}", results.len(), path.display());
    Ok(path)
}
