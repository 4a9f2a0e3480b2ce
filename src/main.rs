use anyhow::{Context, Result};
use clap::Parser;
use osr_scheduler::config::load_settings;
use osr_scheduler::dates::parse_date;
use osr_scheduler::models::{TICKS_PER_DAY, describe_interval};
use osr_scheduler::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Preview how a card or note would be scheduled over a run of reviews,
/// each taken on (or some days after) its due date.
#[derive(Parser, Debug)]
#[command(name = "osr-preview", version, about)]
struct Args {
    /// Settings JSON file (camelCase keys, missing keys use defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Date of the first review, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    today: Option<String>,

    /// Note path the item belongs to
    #[arg(long, default_value = "preview.md")]
    path: String,

    /// Known ease for the note path, as if loaded from an earlier session
    #[arg(long)]
    ease: Option<f64>,

    /// Comma separated grades, e.g. good,easy,hard
    #[arg(long, value_delimiter = ',')]
    responses: Vec<ReviewResponse>,

    /// Days each review happens after its due date
    #[arg(long, default_value_t = 0)]
    late_days: u32,

    /// Schedule a whole note instead of a single card
    #[arg(long)]
    note: bool,
}

/// The preview has no note graph, so every note looks unlinked.
struct Unlinked;

impl NoteLinkStatProvider for Unlinked {
    fn calc_link_stat(&self, _path: &str, _registry: &EaseRegistry) -> NoteLinkStat {
        NoteLinkStat::default()
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => load_settings(path).context("could not load preview settings")?,
        None => Settings::default(),
    };
    let today = match &args.today {
        Some(input) => parse_date(input)?,
        None => LiveDateProvider.today(),
    };
    let responses = if args.responses.is_empty() {
        vec![
            ReviewResponse::Good,
            ReviewResponse::Good,
            ReviewResponse::Easy,
            ReviewResponse::Hard,
            ReviewResponse::Good,
        ]
    } else {
        args.responses.clone()
    };

    let mut scheduler = SchedulingOrchestrator::new(settings);
    if let Some(ease) = args.ease {
        scheduler.registry_mut().set_ease(&args.path, ease);
    }
    let mut dates = SimulatedDateProvider::new(today);
    let mut due_dates = Vec::new();
    let mut current: Option<ScheduleInfo> = None;

    tracing::info!(
        path = %args.path,
        reviews = responses.len(),
        note = args.note,
        "starting preview"
    );

    for (round, response) in responses.into_iter().enumerate() {
        let histogram = DayHistogram::from_due_dates(dates.today(), due_dates.iter().copied());
        let next = match (current.as_mut(), args.note) {
            (None, true) => scheduler.new_schedule_for_note(
                &args.path,
                &Unlinked,
                response,
                Some(&histogram),
                &dates,
            ),
            (None, false) => {
                scheduler.new_schedule_for_card(response, &args.path, Some(&histogram), &dates)
            }
            (Some(prior), is_note) => {
                prior.delayed_before_review_ticks = i64::from(args.late_days) * TICKS_PER_DAY;
                if is_note {
                    scheduler.updated_schedule_for_note(
                        &args.path,
                        prior,
                        response,
                        Some(&histogram),
                        &dates,
                    )
                } else {
                    scheduler.updated_schedule_for_card(response, prior, Some(&histogram), &dates)
                }
            }
        };

        let due = next
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unscheduled".to_string());
        println!(
            "#{:<2} {} {:<5} -> interval {:<12} ease {:>5} due {}",
            round + 1,
            dates.today(),
            response,
            describe_interval(Some(next.interval)).to_string(),
            next.ease,
            due
        );

        match next.due_date {
            Some(due) => {
                due_dates.push(due);
                dates.set_today(due);
                dates.advance_days(u64::from(args.late_days));
            }
            None => dates.advance_days(1),
        }
        current = Some(next);
    }

    if let Some(average) = scheduler.note_stats().average_ease() {
        println!("Average note ease: {average:.1}");
    }
    Ok(())
}
