use clap::Parser;
use colored::{ColoredString, Colorize};

use ctxlens::Result;
use ctxlens::constants::DEFAULT_PRICING_TIER;
use ctxlens::error::CtxError;
use ctxlens::formatting::{
    format_bytes, format_number_with_commas, format_token_delta, format_tokens, truncate_label,
};
use ctxlens::pricing::PRICING_TABLE;
use ctxlens::report::analyze_sessions;
use ctxlens::types::{AnalysisOptions, SessionReport};
use ctxlens::utils::{get_claude_paths, load_sources, resolve_sources};

const PROMPT_PREVIEW_CHARS: usize = 60;
const FILE_ROWS: usize = 15;

/// Attribute context-window growth in Claude Code transcripts to tools,
/// files and prompts.
#[derive(Parser, Debug)]
#[command(name = "ctxlens", version, about)]
struct Args {
    /// Transcript paths or session ids; `-` reads stdin (at most once) and
    /// may be mixed with the others. Defaults to the most recently modified
    /// transcript.
    targets: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Number of top consumers to list
    #[arg(long, env = "CTXLENS_TOP", default_value_t = ctxlens::constants::DEFAULT_TOP_CONSUMERS)]
    top: usize,

    /// Pricing tier used for the cost estimate
    #[arg(long, env = "CTXLENS_PRICING_TIER", default_value = DEFAULT_PRICING_TIER)]
    tier: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Configure rayon thread pool for parallel decoding and analysis
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .thread_name(|i| format!("ctxlens-worker-{}", i))
        .build_global()?;

    let args = Args::parse();

    let pricing = PRICING_TABLE
        .get(&args.tier)
        .copied()
        .ok_or_else(|| CtxError::UnknownPricingTier {
            tier: args.tier.clone(),
            available: PRICING_TABLE.tier_names().collect::<Vec<_>>().join(", "),
        })?;
    let options = AnalysisOptions {
        top_consumers: args.top,
        pricing,
        ..Default::default()
    };

    let sources = resolve_sources(&get_claude_paths(), &args.targets)?;
    tracing::debug!(transcripts = sources.len(), "resolved targets");
    let sessions = load_sources(&sources).await?;
    let reports = analyze_sessions(&sessions, &options);

    if args.json {
        if let [report] = reports.as_slice() {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_report(report, &args.tier);
    }
    Ok(())
}

fn percent_colored(percent: f64) -> ColoredString {
    let text = format!("{:.1}%", percent);
    if percent < 50.0 {
        text.green()
    } else if percent < 80.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

fn print_report(report: &SessionReport, tier: &str) {
    let session = report
        .session_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unknown session)".to_string());
    println!("{} {}", "Session".bold(), session.cyan());
    if let Some(project) = &report.project_path {
        println!("  project   {}", project.green());
    }
    if let Some(model) = &report.model {
        println!("  model     {}", model);
    }
    let cost = report.estimated_cost.to_string();
    let cost = if report.estimated_cost.is_positive() {
        cost.normal()
    } else {
        cost.dimmed()
    };
    println!(
        "  turns     {}   duration {}   est. cost {} ({})",
        report.total_turns,
        report.duration.to_string().magenta(),
        cost,
        tier
    );
    println!(
        "  peak      {} tokens ({} of window)   net growth {}",
        format_number_with_commas(report.peak_context),
        percent_colored(report.peak_context_percent),
        format_token_delta(report.net_token_growth)
    );

    if !report.compact_events.is_empty() {
        section("Compactions");
        for event in &report.compact_events {
            println!(
                "  turn {:>4}  {} -> {}  (saved {})",
                event.turn_index,
                format_tokens(event.before_tokens),
                format_tokens(event.after_tokens),
                format_tokens(event.tokens_saved).green()
            );
        }
    }

    if report.segments.len() > 1 {
        section("Segments");
        for segment in &report.segments {
            println!(
                "  {:<16} turns {:>4}-{:<4}  peak {} ({})  growth {}  {}",
                segment.label,
                segment.start_turn,
                segment.end_turn,
                format_tokens(segment.peak_context),
                percent_colored(segment.peak_context_percent),
                format_token_delta(segment.total_tokens),
                segment.duration
            );
        }
    }

    if !report.tool_stats.is_empty() {
        section("Context growth by tool");
        for stats in &report.tool_stats {
            println!(
                "  {:<18} {:>5} turns  {:>10}  {:>5.1}%",
                stats.tool_name,
                stats.turn_count,
                format_token_delta(stats.total_context_tokens),
                stats.percent_of_session
            );
        }
    }

    if !report.top_consumers.is_empty() {
        section("Top consumers");
        for consumer in &report.top_consumers {
            println!(
                "  turn {:>4}  {:>10}  {:>10}  {}",
                consumer.turn_index,
                format_token_delta(consumer.tokens).yellow(),
                format_tokens(consumer.cumulative_tokens),
                truncate_label(&consumer.description, PROMPT_PREVIEW_CHARS)
            );
        }
    }

    if !report.file_stats.is_empty() {
        section("Context growth by file");
        for stats in report.file_stats.iter().take(FILE_ROWS) {
            println!(
                "  {:<6} {:>3}x  {:>10}  avg {:>8}  {}",
                stats.tool_name,
                stats.count,
                format_token_delta(stats.total_tokens),
                format_tokens(stats.average_tokens),
                stats.path
            );
        }
    }

    if !report.size_stats.is_empty() {
        section("Tool result sizes");
        for stats in &report.size_stats {
            println!(
                "  {:<18} {:>5} calls  {:>10}",
                stats.tool_name,
                stats.call_count,
                format_bytes(stats.total_size_bytes)
            );
            for file in stats.files.iter().take(FILE_ROWS) {
                println!(
                    "      {:>3}x  {:>10}  {}",
                    file.count,
                    format_bytes(file.size_bytes),
                    file.path.dimmed()
                );
            }
        }
    }

    if !report.user_requests.is_empty() {
        section("Context growth by request");
        for request in &report.user_requests {
            println!(
                "  turns {:>4}-{:<4} {:>10}  {:>3} tools  {}",
                request.first_turn,
                request.last_turn,
                format_token_delta(request.total_tokens),
                request.tool_call_count,
                truncate_label(&request.prompt, PROMPT_PREVIEW_CHARS)
            );
        }
    }
}
