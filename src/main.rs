use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use zhaopin_crawler::config::CrawlerConfig;
use zhaopin_crawler::fetch::HttpFetcher;
use zhaopin_crawler::scheduler::Scheduler;
use zhaopin_crawler::sink::{self, TextReport};
use zhaopin_crawler::state::ResumeStore;
use zhaopin_crawler::time::{SystemClock, UniformPacer};

#[derive(Parser, Debug)]
#[command(name = "zhaopin-crawler", about = "Paginated job-listing crawler")]
struct Args {
    #[arg(long)]
    start_url: Option<String>,
    #[arg(long)]
    start_page: Option<u32>,
    #[arg(long)]
    max_pages: Option<u32>,
    #[arg(long)]
    concurrency: Option<usize>,
    #[arg(long)]
    proxy: Option<String>,
    #[arg(long)]
    resume_file: Option<PathBuf>,
    #[arg(long)]
    results_file: Option<PathBuf>,
    #[arg(long)]
    report_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> CrawlerConfig {
        let mut config = CrawlerConfig::default();
        if let Some(start_url) = self.start_url {
            config.start_url = start_url;
        }
        if let Some(start_page) = self.start_page {
            config.start_page = start_page;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent = concurrency;
        }
        if let Some(proxy) = self.proxy {
            config.proxy = Some(proxy);
        }
        if let Some(resume_file) = self.resume_file {
            config.resume_path = resume_file;
        }
        if let Some(results_file) = self.results_file {
            config.results_path = results_file;
        }
        if let Some(report_file) = self.report_file {
            config.report_path = report_file;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Args::parse().into_config();

    let store = ResumeStore::new(config.resume_path.clone());
    let mut state = store.load();
    let existing = sink::load_existing(&config.results_path);
    state.merge_records(&existing);
    info!(
        "loaded {} historical jobs, {} seen links, {} completed pages",
        existing.len(),
        state.seen_links.len(),
        state.completed_pages.len()
    );

    let fetcher = HttpFetcher::new(config.proxy.as_deref())?;
    let pacer = UniformPacer::new(config.delay_min, config.delay_max);
    let mut report = TextReport::new(config.report_path.clone());
    let results_path = config.results_path.clone();

    let mut scheduler = Scheduler::new(
        config,
        fetcher,
        Box::new(pacer),
        Box::new(SystemClock),
        store,
        state,
    );
    let new_jobs = scheduler.run(&mut report).await?;

    let mut all_jobs = existing;
    all_jobs.extend(new_jobs);
    if all_jobs.is_empty() {
        info!("no jobs collected");
        return Ok(());
    }

    let written = sink::write_deduped(&results_path, &all_jobs)?;
    info!("saved {} deduplicated jobs to {}", written, results_path.display());
    sink::log_summary(&all_jobs);
    Ok(())
}
