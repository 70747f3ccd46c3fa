use chrono::{DateTime, Utc};
use clap::Args;
use gapwise_core::{format_schedule, sample, ScheduleOptions, SuggestionEngine};

#[derive(Args)]
pub struct DemoArgs {
    /// Number of sample memos to generate
    #[arg(long, default_value_t = 10)]
    count: usize,
    /// Seed for reproducible sample data
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

pub fn run(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = args.now.unwrap_or_else(Utc::now);
    let memos = sample::sample_memos(args.count, args.seed, now);
    let gaps = sample::sample_gaps();

    println!("Generated {} sample memos (seed {}):", memos.len(), args.seed);
    for memo in &memos {
        println!(
            "- {} [{:?}] {} min",
            memo.id,
            memo.kind,
            memo.session_minutes.unwrap_or(0)
        );
    }
    println!();

    let engine = SuggestionEngine::new();
    let options = ScheduleOptions {
        skip_enrichment: true,
        now: Some(now),
    };
    let outcome = engine.generate_schedule(&memos, &gaps, &[], &options);
    println!("{}", format_schedule(&outcome.schedule));
    Ok(())
}
