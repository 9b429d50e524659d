use anyhow::Result;
use clap::ValueEnum;
use lectern::{BuildStats, SearchHit, SearchIndex};
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON output.
    Json,
}

/// Print search results.
pub fn print_search_results(hits: &[SearchHit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(hits)?);
        }
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            let rows: Vec<SearchHitRow> = hits
                .iter()
                .map(|hit| SearchHitRow {
                    id: hit.id.clone(),
                    title: hit.title.clone(),
                    filename: hit.filename.clone().unwrap_or_default(),
                    score: hit.score,
                })
                .collect();

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}

/// Print index statistics.
pub fn print_stats(index: &SearchIndex, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "format": index.format(),
                "document_count": index.doc_count(),
                "term_count": index.term_count(),
                "title_term_count": index.title_term_count(),
                "analyzer": index.analyzer(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            let analyzer = serde_json::to_string(index.analyzer())?;
            let rows = vec![
                StatRow::new("Format", index.format()),
                StatRow::new("Documents", index.doc_count()),
                StatRow::new("Terms", index.term_count()),
                StatRow::new("Title terms", index.title_term_count()),
                StatRow::new("Analyzer", analyzer),
            ];
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}

/// Print the summary of a build.
pub fn print_build_stats(
    stats: &BuildStats,
    output: &std::path::Path,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "output": output.display().to_string(),
                "documents": stats.docs_indexed,
                "empty_documents": stats.empty_docs,
                "tokens": stats.tokens_seen,
                "terms": stats.unique_terms,
                "title_terms": stats.unique_title_terms,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!(
                "Indexed {} documents ({} terms, {} title terms) into {}.",
                stats.docs_indexed,
                stats.unique_terms,
                stats.unique_title_terms,
                output.display()
            );
            if stats.empty_docs > 0 {
                println!("{} documents contributed no terms.", stats.empty_docs);
            }
        }
    }
    Ok(())
}

// --- Helper types ---

#[derive(Tabled)]
struct SearchHitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "File")]
    filename: String,
    #[tabled(rename = "Score")]
    score: usize,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Property")]
    property: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl StatRow {
    fn new(property: &'static str, value: impl ToString) -> Self {
        StatRow {
            property,
            value: value.to_string(),
        }
    }
}
