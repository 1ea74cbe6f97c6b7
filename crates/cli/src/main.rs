//! GitFolio CLI
//!
//! Profile analysis tool and web server runner.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use gitfolio_analyzer::{ProfileAnalyzer, ProfileReport, ScoringConfig};
use gitfolio_api::{create_router, AppState};
use gitfolio_collector::{
    github::GithubCollector, username::normalize_username, CollectorConfig,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "gf")]
#[command(about = "GitFolio - GitHub Portfolio Analyzer")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of repositories analyzed per profile
    #[arg(long, default_value_t = 20)]
    max_repos: usize,

    /// Days since the last commit for a repository to count as active
    #[arg(long, default_value_t = 30)]
    active_days: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,

        /// Static files directory
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },

    /// Analyze a profile and print the report
    Analyze {
        /// GitHub username or profile URL
        target: String,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show basic profile information
    User {
        /// GitHub username or profile URL
        target: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = ScoringConfig {
        active_days_threshold: cli.active_days,
        max_repos: cli.max_repos,
        ..ScoringConfig::default()
    };
    let analyzer = build_analyzer(config)?;

    match cli.command {
        Commands::Serve { bind, static_dir } => {
            serve(analyzer, bind, static_dir).await?;
        }
        Commands::Analyze { target, json } => {
            analyze(&analyzer, &target, json).await?;
        }
        Commands::User { target } => {
            user(&analyzer, &target).await?;
        }
    }

    Ok(())
}

fn build_analyzer(config: ScoringConfig) -> Result<ProfileAnalyzer<GithubCollector>> {
    let collector = GithubCollector::new(CollectorConfig::default())?;

    if !collector.is_authenticated() {
        warn!("GITHUB_TOKEN not set. API rate limits will be restricted.");
    }

    Ok(ProfileAnalyzer::new(collector, config)?)
}

fn resolve_username(target: &str) -> Result<&str> {
    normalize_username(target).ok_or_else(|| anyhow!("Invalid GitHub username or URL: {}", target))
}

async fn serve(
    analyzer: ProfileAnalyzer<GithubCollector>,
    bind: SocketAddr,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let state = Arc::new(AppState::new(analyzer));
    let router = create_router(state, static_dir.clone());

    info!("Starting GitFolio server on {}", bind);
    if let Some(ref dir) = static_dir {
        info!("Serving static files from {}", dir.display());
    }
    info!("API available at http://{}/api/v1", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn analyze(
    analyzer: &ProfileAnalyzer<GithubCollector>,
    target: &str,
    json: bool,
) -> Result<()> {
    let username = resolve_username(target)?;
    let report = analyzer.analyze(username).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ProfileReport) {
    let score = &report.score;
    let feedback = &report.recruiter_feedback;

    println!(
        "Profile: {} ({})",
        report.user_data.display_name(),
        report.user_data.html_url
    );
    println!(
        "Repos: {}  Followers: {}  Recent events: {}",
        report.user_data.public_repos, report.user_data.followers, report.user_data.recent_activity
    );
    println!();

    println!("Portfolio Score: {:.1} [{}]", score.overall, score.grade);
    for (component, value) in score.components.iter() {
        println!("  {:<16} {:.1}", component.as_str(), value);
    }

    if !score.red_flags.is_empty() {
        println!("\nRed Flags:");
        for flag in &score.red_flags {
            println!("  ! {}", flag);
        }
    }
    if !score.strengths.is_empty() {
        println!("\nStrengths:");
        for strength in &score.strengths {
            println!("  + {}", strength);
        }
    }

    if !report.repositories.is_empty() {
        println!("\n{:<30} {:<8} {:<12} {:<8}", "REPOSITORY", "SCORE", "LANGUAGE", "ACTIVE");
        println!("{}", "-".repeat(60));
        for repo in report.repositories.iter().take(10) {
            println!(
                "{:<30} {:<8.1} {:<12} {}",
                repo.name(),
                repo.score.overall,
                repo.dominant_language().unwrap_or("-"),
                if repo.activity_analysis.is_active { "yes" } else { "no" }
            );
        }
        if report.repositories.len() > 10 {
            println!("... and {} more repos", report.repositories.len() - 10);
        }
    }

    println!(
        "\n{} says: {} ({:?} confidence)",
        feedback.recruiter_type.as_str(),
        feedback.decision.decision.as_str(),
        feedback.decision.confidence
    );
    println!("  {}", feedback.decision.reasoning);
    println!("\nFocus next on: {}", report.roadmap.priority_focus);
}

async fn user(analyzer: &ProfileAnalyzer<GithubCollector>, target: &str) -> Result<()> {
    let username = resolve_username(target)?;
    let user = analyzer.basic_profile(username).await?;

    println!("User: {} ({})", user.display_name(), user.login);
    println!("Profile: {}", user.html_url);
    if let Some(ref bio) = user.bio {
        println!("Bio: {}", bio);
    }
    println!();
    println!("  Public repos:  {}", user.public_repos);
    println!("  Followers:     {}", user.followers);
    println!("  Following:     {}", user.following);
    println!("  Recent events: {}", user.recent_activity);
    println!("  Joined:        {}", user.created_at.format("%Y-%m-%d"));

    Ok(())
}
