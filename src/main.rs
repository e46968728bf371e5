use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

mod config;
mod error;
mod format;
mod html;
mod loader;
mod models;
mod report;
mod server;

use config::DashboardConfig;

#[derive(Parser)]
#[command(name = "shorts-dashboard")]
#[command(about = "Dashboard for a precomputed YouTube Shorts ranking", long_about = None)]
struct Cli {
    /// JSON file overriding page labels, defaults and number format
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard to a standalone HTML file
    Render {
        #[arg(long, default_value = "ranking_shorts.csv")]
        csv: PathBuf,
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,
        /// How many videos to prioritize in the table
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the KPIs and top highlights
    Summary {
        #[arg(long, default_value = "ranking_shorts.csv")]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Serve the dashboard over HTTP, reloading when the CSV changes
    Serve {
        #[arg(long, default_value = "ranking_shorts.csv")]
        csv: PathBuf,
        #[arg(long, default_value = "127.0.0.1")]
        address: IpAddr,
        #[arg(long, default_value_t = 8501)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { csv, out, top } => {
            let records = loader::load_table(&csv)?;
            let summary = report::summarize(&records)?;
            let view = report::build_view(
                &records,
                &summary,
                top.unwrap_or(config.default_top_n),
                &config,
                &Local::now(),
            );
            std::fs::write(&out, html::render_page(&view))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Dashboard for {} videos written to {}.",
                summary.video_count,
                out.display()
            );
        }
        Commands::Summary { csv, json } => {
            let records = loader::load_table(&csv)?;
            let summary = report::summarize(&records)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            let number_format = &config.number_format;
            println!("Videos analyzed: {}", summary.video_count);
            println!("Mean views: {}", number_format.group_thousands(summary.mean_views));
            println!(
                "Engagement / 1000 views: {}",
                number_format.fixed(summary.mean_engagement, 2)
            );
            println!("Best short score: {}", number_format.fixed(summary.max_short_score, 2));
            println!(
                "Best video: {}",
                format::truncate_title(&summary.top_video.title, config.title_max_chars)
            );
            println!();
            println!("Top {} videos to cut now:", config.highlight_count);
            let cards =
                report::render_top_highlights(&records, config.highlight_count, number_format);
            for card in cards {
                println!(
                    "#{} {} | views {} | engagement {} | score {} | {}",
                    card.rank, card.title, card.views, card.engagement, card.short_score, card.url
                );
            }
        }
        Commands::Serve { csv, address, port } => {
            info!("Serving {} on http://{address}:{port}", csv.display());
            let figment = rocket::Config::figment()
                .merge(("address", address))
                .merge(("port", port));
            server::build_rocket(server::AppState::new(csv, config))
                .configure(figment)
                .launch()
                .await
                .map_err(|e| anyhow::anyhow!("HTTP server failed: {e}"))?;
        }
    }

    Ok(())
}
