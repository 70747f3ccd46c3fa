use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use gapwise_core::{
    format_schedule, CalendarEvent, EngineConfig, Gap, HttpEnricher, Memo, ScheduleOptions,
    SuggestionEngine,
};

#[derive(Args)]
pub struct PlanArgs {
    /// JSON file with the memo list
    #[arg(long)]
    tasks: PathBuf,
    /// JSON file with the day's gaps
    #[arg(long)]
    gaps: PathBuf,
    /// JSON file with the day's calendar events (for gap labeling)
    #[arg(long)]
    events: Option<PathBuf>,
    /// Skip metadata enrichment even if configured
    #[arg(long)]
    no_enrich: bool,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let memos: Vec<Memo> = serde_json::from_str(&std::fs::read_to_string(&args.tasks)?)?;
    let gaps: Vec<Gap> = serde_json::from_str(&std::fs::read_to_string(&args.gaps)?)?;
    let events: Vec<CalendarEvent> = match &args.events {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let config = EngineConfig::load_or_default();
    let mut engine = SuggestionEngine::with_config(config);
    if let Some(endpoint) = engine.config().enrichment.endpoint.clone() {
        let timeout_ms = engine.config().enrichment.timeout_ms;
        let enricher = HttpEnricher::new(endpoint)?.with_timeout_ms(timeout_ms);
        engine = engine.with_enricher(Box::new(enricher));
    }

    let options = ScheduleOptions {
        skip_enrichment: args.no_enrich,
        now: args.now,
    };
    let outcome = engine.generate_schedule(&memos, &gaps, &events, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", format_schedule(&outcome.schedule));
        println!(
            "\n{} tasks processed, {} active, {} mandatory ({} ms)",
            outcome.summary.tasks_processed,
            outcome.summary.active_tasks,
            outcome.summary.mandatory_count,
            outcome.summary.elapsed_ms
        );
    }
    Ok(())
}
