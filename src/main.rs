use clap::Parser;
use tracing_subscriber::EnvFilter;

use player_ratings::models::{Competition, PlayerStatistics};
use player_ratings::{
    export_json, Aggregator, Config, HtmlCache, PipelineConfig, RunMode, ScrapePipeline,
    SiteClient, StatsQuery, Storage,
};

#[derive(Parser, Debug)]
#[command(name = "player-ratings")]
#[command(version = "0.1.0")]
#[command(about = "Scrape Real Madrid player ratings from lejournaldureal.fr and aggregate season statistics")]
struct Args {
    /// Scrape articles published since the last run
    #[arg(long)]
    refresh: bool,

    /// Re-scrape every article, ignoring stored records and the page cache
    #[arg(long, conflicts_with = "refresh")]
    hard_refresh: bool,

    /// Only show statistics for this competition (e.g. "Liga", "Ligue des Champions")
    #[arg(short, long)]
    competition: Option<String>,

    /// Show the match-by-match detail of one player
    #[arg(short, long)]
    player: Option<String>,

    /// Minimum number of rated matches (inclusive)
    #[arg(long, default_value = "1")]
    min_matches: u32,

    /// Only show the N best players
    #[arg(long)]
    top: Option<usize>,

    /// List the competitions found in stored articles
    #[arg(long)]
    list_competitions: bool,

    /// List every rated player
    #[arg(long)]
    list_players: bool,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Database path for storing results (overrides DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,

    /// Also write articles.json and stats.json into this directory
    #[arg(long)]
    export_dir: Option<String>,

    /// Scrape and store, print nothing
    #[arg(long)]
    scrape_only: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("player_ratings={}", level).parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let database = args.database.clone().unwrap_or_else(|| config.database_path.clone());
    let competition = args
        .competition
        .as_deref()
        .map(str::parse::<Competition>)
        .transpose()?;

    // Initialize storage
    let mut storage = Storage::new(&database)?;

    let mode = if args.hard_refresh {
        Some(RunMode::Full)
    } else if args.refresh {
        Some(RunMode::Incremental)
    } else if storage.article_count()? == 0 {
        tracing::info!("No stored articles, running an incremental scrape");
        Some(RunMode::Incremental)
    } else {
        None
    };

    if let Some(mode) = mode {
        storage = scrape(&config, storage, mode).await?;
    }

    // Statistics are always recomputed from the stored records
    let articles = storage.load_articles()?;
    if articles.is_empty() {
        anyhow::bail!("No rated articles stored in {}", database);
    }
    let stats = Aggregator::new().aggregate(&articles);
    storage.replace_stats(&stats)?;
    tracing::info!("{} articles, {} players", articles.len(), stats.len());

    if let Some(ref dir) = args.export_dir {
        export_json(dir, &articles, &stats)?;
    }

    if args.scrape_only {
        return Ok(());
    }

    let output = if args.list_competitions {
        format_competitions(&storage.competitions()?)
    } else if args.list_players {
        stats
            .iter()
            .map(|s| s.player.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let mut query = StatsQuery::new().min_matches(args.min_matches);
        if let Some(competition) = competition {
            query = query.competition(competition);
        }
        if let Some(ref player) = args.player {
            query = query.player(player.as_str());
        }

        let mut selected = query.apply(&stats);
        if let Some(competition) = competition {
            sort_within(&mut selected, competition);
        }
        if let Some(top) = args.top {
            selected.truncate(top);
        }

        if selected.is_empty() {
            tracing::warn!("No player matches the given filters");
        }

        match args.format.as_str() {
            "json" => serde_json::to_string_pretty(&selected)?,
            "markdown" => format_markdown(&selected, competition),
            _ if args.player.is_some() => selected
                .iter()
                .map(|s| format_player_detail(s))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => format_text(&selected, competition),
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn scrape(config: &Config, storage: Storage, mode: RunMode) -> anyhow::Result<Storage> {
    let cache = HtmlCache::new(&config.cache_dir)?;
    let client = SiteClient::new(config)?.with_cache(cache, mode == RunMode::Incremental);
    let base_url = client.base_url().to_string();

    let mut pipeline = ScrapePipeline::new(client, base_url, storage, PipelineConfig::from(config))?;
    let report = pipeline.run(mode).await?;
    tracing::info!(
        "Scrape finished: {} discovered, {} fetched, {} stored, {} skipped, {} defects",
        report.discovered,
        report.fetched,
        report.stored,
        report.skipped,
        report.defects
    );

    Ok(pipeline.into_storage())
}

fn sort_within(selected: &mut [&PlayerStatistics], competition: Competition) {
    selected.sort_by(|a, b| {
        let (a_stats, b_stats) = (a.competition(competition), b.competition(competition));
        let a_key = a_stats.map(|c| (c.mean, c.count)).unwrap_or((0.0, 0));
        let b_key = b_stats.map(|c| (c.mean, c.count)).unwrap_or((0.0, 0));
        b_key
            .0
            .total_cmp(&a_key.0)
            .then_with(|| b_key.1.cmp(&a_key.1))
            .then_with(|| a.player.cmp(&b.player))
    });
}

fn headline(stats: &PlayerStatistics, competition: Option<Competition>) -> (f64, u32) {
    competition
        .and_then(|c| stats.competition(c))
        .map(|c| (c.mean, c.count))
        .unwrap_or((stats.mean, stats.count))
}

fn format_competitions(competitions: &[(Competition, usize)]) -> String {
    let mut output = String::from("Competitions:\n");
    for (competition, count) in competitions {
        output.push_str(&format!("  - {} ({} articles)\n", competition, count));
    }
    output
}

fn format_text(stats: &[&PlayerStatistics], competition: Option<Competition>) -> String {
    let mut output = String::new();

    match competition {
        Some(c) => output.push_str(&format!("\n=== Player ratings: {} ===\n\n", c)),
        None => output.push_str("\n=== Player ratings: all competitions ===\n\n"),
    }

    output.push_str(&format!(
        "{:<28} {:>6} {:>6} {:>9} {:>4} {:>4} {:>6}\n",
        "Player", "Mean", "Rated", "Unrated", "Min", "Max", "σ"
    ));

    for s in stats {
        let (mean, count) = headline(s, competition);
        output.push_str(&format!(
            "{:<28} {:>6.2} {:>6} {:>9} {:>4} {:>4} {:>6.2}\n",
            s.player, mean, count, s.unrated_appearances, s.min, s.max, s.std_dev
        ));

        if competition.is_none() && s.by_competition.len() > 1 {
            let parts: Vec<String> = s
                .by_competition
                .iter()
                .map(|(c, cs)| format!("{} {:.1} ({})", c, cs.mean, cs.count))
                .collect();
            output.push_str(&format!("    {}\n", parts.join(" | ")));
        }
    }

    output.push_str(&format!("\nTotal: {} players\n", stats.len()));
    output
}

fn format_player_detail(stats: &PlayerStatistics) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n\n", stats.player));
    output.push_str(&format!(
        "Mean: {:.2} over {} rated matches (min {}, max {}, σ {:.2})\n",
        stats.mean, stats.count, stats.min, stats.max, stats.std_dev
    ));
    if stats.unrated_appearances > 0 {
        output.push_str(&format!("Unrated appearances: {}\n", stats.unrated_appearances));
    }

    output.push_str("\nBy competition:\n");
    for (competition, cs) in &stats.by_competition {
        output.push_str(&format!("  - {}: {:.2} ({} matches)\n", competition, cs.mean, cs.count));
    }

    output.push_str("\nMatches:\n");
    for m in &stats.matches {
        output.push_str(&format!(
            "  {} {:<24} {:<22} {}/10\n",
            m.date,
            m.opponent.as_deref().unwrap_or("?"),
            m.competition.to_string(),
            m.rating
        ));
    }

    output
}

fn format_markdown(stats: &[&PlayerStatistics], competition: Option<Competition>) -> String {
    let mut output = String::new();

    match competition {
        Some(c) => output.push_str(&format!("# Player ratings: {}\n\n", c)),
        None => output.push_str("# Player ratings\n\n"),
    }

    output.push_str("| Player | Mean | Rated | Unrated | Min | Max | σ |\n");
    output.push_str("|--------|------|-------|---------|-----|-----|---|\n");

    for s in stats {
        let (mean, count) = headline(s, competition);
        output.push_str(&format!(
            "| {} | {:.2} | {} | {} | {} | {} | {:.2} |\n",
            s.player, mean, count, s.unrated_appearances, s.min, s.max, s.std_dev
        ));
    }

    if let [single] = stats {
        output.push_str(&format!("\n## Matches of {}\n\n", single.player));
        output.push_str("| Date | Opponent | Competition | Rating |\n");
        output.push_str("|------|----------|-------------|--------|\n");
        for m in &single.matches {
            output.push_str(&format!(
                "| {} | {} | {} | {}/10 |\n",
                m.date,
                m.opponent.as_deref().unwrap_or("?"),
                m.competition,
                m.rating
            ));
        }
    }

    output.push_str(&format!("\n---\n*{} players*\n", stats.len()));
    output
}
