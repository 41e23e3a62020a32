//! CLI command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use inflow_core::{
    import, AnalysisRequest, IncomeTrendsAnalysis, MemoryStore, SourceStatistics, TrendsAnalyzer,
};

/// Load the record file into an in-memory store
pub fn load_store(file: &Path) -> Result<MemoryStore> {
    let records = import::read_records_from_path(file)
        .with_context(|| format!("Failed to read income records from {}", file.display()))?;
    tracing::debug!(records = records.len(), file = %file.display(), "Loaded income records");
    Ok(MemoryStore::new(records))
}

/// Parse an optional YYYY-MM-DD argument
pub fn parse_date_arg(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("Invalid --{} format (use YYYY-MM-DD)", name))
}

pub async fn cmd_analyze(
    file: &Path,
    start_date: Option<&str>,
    end_date: Option<&str>,
    source: Option<String>,
    min_confidence: f64,
    json: bool,
) -> Result<()> {
    let store = load_store(file)?;
    let analyzer = TrendsAnalyzer::new(&store);

    let request = AnalysisRequest::new()
        .start_date(parse_date_arg(start_date, "start-date")?)
        .end_date(parse_date_arg(end_date, "end-date")?)
        .source(source)
        .min_confidence(min_confidence);

    let analysis = analyzer.analyze(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_report(&analysis);
    }
    Ok(())
}

pub async fn cmd_sources(file: &Path) -> Result<()> {
    let store = load_store(file)?;
    let analyzer = TrendsAnalyzer::new(&store);

    let analysis = analyzer.analyze(&AnalysisRequest::new()).await?;

    println!();
    println!("💼 Income Sources");
    println!("   ─────────────────────────────────────────────────────────────");
    for stats in &analysis.source_statistics {
        print_source_line(stats);
    }
    Ok(())
}

fn print_source_line(stats: &SourceStatistics) {
    println!(
        "   {:20} │ {:>3} payments │ avg {:>10} │ {:>10} – {:<10} │ reliability {:.2}",
        truncate(&stats.source, 20),
        stats.total_occurrences,
        format!("${:.2}", stats.average_amount),
        format!("${:.2}", stats.min_amount),
        format!("${:.2}", stats.max_amount),
        stats.reliability_score
    );
}

fn print_report(analysis: &IncomeTrendsAnalysis) {
    println!();
    println!("📈 Income Trends Analysis");
    println!(
        "   {} → {} │ overall predictability {:.2}",
        analysis.data_start_date, analysis.data_end_date, analysis.overall_predictability_score
    );

    println!();
    println!("   Patterns");
    println!("   ─────────────────────────────────────────────────────────────");
    if analysis.patterns.is_empty() {
        println!("   (none above the confidence threshold)");
    }
    for pattern in &analysis.patterns {
        let next = pattern
            .next_predicted
            .map(|d| format!("next ~{}", d))
            .unwrap_or_else(|| "next unknown".to_string());
        println!(
            "   {:20} │ {:9} │ avg {:>10} │ conf {:.2} │ {}",
            truncate(&pattern.source, 20),
            pattern.frequency.as_str(),
            format!("${:.2}", pattern.average_amount),
            pattern.confidence_score,
            next
        );
    }

    println!();
    println!("   Sources");
    println!("   ─────────────────────────────────────────────────────────────");
    for stats in &analysis.source_statistics {
        print_source_line(stats);
    }

    println!();
    match &analysis.seasonality {
        Some(seasonality) => {
            println!(
                "   Seasonality ({}) │ confidence {:.2}",
                seasonality.period, seasonality.confidence_score
            );
            println!("   peak months:   {}", month_list(&seasonality.peak_months));
            println!(
                "   trough months: {}",
                month_list(&seasonality.trough_months)
            );
        }
        None => println!("   Seasonality: not enough data (12+ records needed)"),
    }
}

fn month_list(months: &[u32]) -> String {
    if months.is_empty() {
        return "-".to_string();
    }
    months
        .iter()
        .map(|m| month_abbrev(*m))
        .collect::<Vec<_>>()
        .join(", ")
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "?",
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
