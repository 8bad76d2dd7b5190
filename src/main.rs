use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use hotel_event_intel::apis::BackendClient;
use hotel_event_intel::app::{DashboardService, Loaded};
use hotel_event_intel::config::Config;
use hotel_event_intel::domain::{parse_discovery_response, DiscoveryResponse};
use hotel_event_intel::imaging::stats::{candidate_statistics, image_coverage};
use hotel_event_intel::observability::{init_logging, init_metrics};
use hotel_event_intel::scoring::{explain_score, map_discovery_response};
use hotel_event_intel::server::{run_server, EventsParams};

#[derive(Parser)]
#[command(name = "hotel_event_intel")]
#[command(about = "Event impact intelligence for hotel revenue teams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// all, today, week, month or year
    #[arg(long)]
    date_range: Option<String>,
    /// LOW, MEDIUM, HIGH, CRITICAL or all
    #[arg(long)]
    impact: Option<String>,
    /// Music, Sports, Theater, Other or all
    #[arg(long)]
    venue_type: Option<String>,
    /// Maximum distance from the hotel in miles; 0 disables
    #[arg(long)]
    distance: Option<f64>,
    /// Case-insensitive match on name, venue, category and description
    #[arg(long)]
    search: Option<String>,
    /// impact, date, capacity or distance
    #[arg(long)]
    sort: Option<String>,
    /// 0-based page
    #[arg(long, default_value_t = 0)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
}

impl From<ViewArgs> for EventsParams {
    fn from(args: ViewArgs) -> Self {
        EventsParams {
            date_range: args.date_range,
            impact_level: args.impact,
            venue_type: args.venue_type,
            distance: args.distance,
            search: args.search,
            sort_by: args.sort,
            page: Some(args.page),
            page_size: args.page_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List scored events from the backend
    Events {
        #[command(flatten)]
        view: ViewArgs,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dashboard headline numbers for today and the coming week
    Summary,
    /// Venues near the hotel, busiest first
    Venues {
        #[arg(long)]
        search: Option<String>,
        /// Maximum distance from the hotel in miles
        #[arg(long)]
        distance: Option<f64>,
    },
    /// Show the backend hotel configuration
    Config,
    /// Score raw discovery events from a JSON file
    Score {
        file: PathBuf,
        /// Print each event's score contributions
        #[arg(long)]
        explain: bool,
    },
    /// Image candidate and selection statistics for a raw events file
    ImageStats { file: PathBuf },
    /// Serve the view endpoints over HTTP
    Serve {
        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

fn print_notice<T>(loaded: &Loaded<T>) {
    if let Some(notice) = &loaded.notice {
        println!("⚠️  {}", notice);
    }
}

fn dashboard(config: &Config) -> anyhow::Result<DashboardService> {
    let client = BackendClient::new(&config.api).context("building backend client")?;
    Ok(DashboardService::new(
        Arc::new(client),
        config.hotel.clone(),
        config.view.clone(),
    ))
}

fn read_events_file(file: &PathBuf) -> anyhow::Result<DiscoveryResponse> {
    let content = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    parse_discovery_response(&content).with_context(|| format!("parsing {}", file.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let _log_guard = init_logging(&config.logging);
    if let Err(e) = init_metrics() {
        warn!(error = %e, "Metrics recorder unavailable");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Events { view, json } => {
            let span = tracing::info_span!("events_command");
            let _enter = span.enter();

            let service = dashboard(&config)?;
            let params = EventsParams::from(view);
            let filters = params.filters(service.default_filters())?;
            let sort = params.sort()?;
            let loaded = service
                .events_view(&filters, sort, params.page(service.default_page_size()))
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&loaded)?);
                return Ok(());
            }

            print_notice(&loaded);
            let page = &loaded.data.pagination;
            println!(
                "\n📅 Events (page {} of {}, {} total)",
                page.current_page + 1,
                page.total_pages.max(1),
                page.total_elements
            );
            for event in &loaded.data.items {
                println!(
                    "   [{:>3}] {:<8} {} {} | {} ({}) | {}",
                    event.impact_score,
                    event.impact_level.as_str(),
                    event.date.as_deref().unwrap_or("TBA"),
                    event.time.as_deref().unwrap_or(""),
                    event.name,
                    event.venue_name,
                    event.ticket_price_range
                );
            }
        }
        Commands::Summary => {
            let service = dashboard(&config)?;
            let loaded = service.summary().await;
            print_notice(&loaded);
            let summary = &loaded.data;
            println!("\n🏨 Dashboard for {}", summary.generated_at.format("%Y-%m-%d %H:%M"));
            println!("   Today's events: {}", summary.todays_events);
            println!("   High impact this week: {}", summary.high_impact_this_week);
            println!("   Active venues (30 days): {}", summary.active_venues);
            println!("   Total impact today: {}", summary.total_impact_today);
            for event in &summary.upcoming_high_impact {
                println!(
                    "   🔥 [{}] {} at {} on {}",
                    event.impact_score,
                    event.name,
                    event.venue_name,
                    event.date.as_deref().unwrap_or("TBA")
                );
            }
        }
        Commands::Venues { search, distance } => {
            let service = dashboard(&config)?;
            let loaded = service
                .venues(search.as_deref().unwrap_or_default(), distance.filter(|d| *d > 0.0))
                .await;
            print_notice(&loaded);
            println!("\n🏟️  Venues ({})", loaded.data.len());
            for venue in &loaded.data {
                let distance = venue
                    .distance_from_hotel
                    .map(|d| format!("{:.1} mi", d))
                    .unwrap_or_else(|| "? mi".to_string());
                println!(
                    "   {} | {} | {} upcoming",
                    venue.display_name(),
                    distance,
                    venue.upcoming_events_count.unwrap_or(0)
                );
            }
        }
        Commands::Config => {
            let service = dashboard(&config)?;
            let loaded = service.load_config().await;
            print_notice(&loaded);
            match &loaded.data {
                Some(hotel) => println!("{}", serde_json::to_string_pretty(hotel)?),
                None => println!("No hotel configuration on the backend"),
            }
        }
        Commands::Score { file, explain } => {
            let response = read_events_file(&file)?;
            let mapped = map_discovery_response(&response);
            info!(count = mapped.len(), file = %file.display(), "Scoring raw events");
            for (raw, event) in response.events().iter().zip(&mapped) {
                println!(
                    "[{:>3}] {:<8} {} | {} ({}, {:?}) | {}",
                    event.impact_score,
                    event.impact_level.as_str(),
                    event.name,
                    event.venue_name,
                    event.venue_capacity,
                    event.venue_tier,
                    event.ticket_status
                );
                if explain {
                    let b = explain_score(raw);
                    println!(
                        "      base {} + distance {} + price {} + capacity {} + status {} = {}",
                        b.base,
                        b.distance,
                        b.price,
                        b.capacity,
                        b.sale_status,
                        b.raw_total()
                    );
                }
            }
        }
        Commands::ImageStats { file } => {
            let response = read_events_file(&file)?;
            let candidates: Vec<_> = response.events().iter().flat_map(|e| e.images().iter().cloned()).collect();
            let mapped = map_discovery_response(&response);

            let stats = candidate_statistics(&candidates);
            let coverage = image_coverage(&mapped);
            println!("\n🖼️  Image candidates: {} ({} valid)", stats.total, stats.valid);
            for (ratio, count) in &stats.by_ratio {
                println!("   ratio {}: {}", ratio, count);
            }
            println!(
                "   Coverage: {}/{} events with real images ({:.1}%), {} placeholders",
                coverage.with_images, coverage.total_events, coverage.coverage_percent, coverage.with_placeholders
            );
            for (quality, count) in &coverage.quality_distribution {
                println!("   quality {}: {}", quality, count);
            }
        }
        Commands::Serve { port } => {
            let mut server_config = config.server.clone();
            if let Some(port) = port {
                server_config.port = port;
            }
            let service = Arc::new(dashboard(&config)?);
            run_server(&server_config, service).await?;
        }
    }

    Ok(())
}
