use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::extract::Extractor;
use crate::fetch::{PageDoc, PageFetcher};
use crate::record::JobRecord;
use crate::sink::ReportWriter;
use crate::state::{CrawlState, ResumeStore};
use crate::time::{Clock, Pacer};
use futures::stream::{self, StreamExt};
use lazy_regex::regex;
use std::time::Duration;
use tracing::{info, warn};

/// Drives the page-by-page crawl: strictly sequential across pages,
/// bounded-concurrency detail fetches within a page. The checkpoint is
/// flushed at each page boundary, so a crash loses at most one page.
pub struct Scheduler<F> {
    config: CrawlerConfig,
    fetcher: F,
    extractor: Extractor,
    pacer: Box<dyn Pacer>,
    clock: Box<dyn Clock>,
    store: ResumeStore,
    state: CrawlState,
}

impl<F: PageFetcher> Scheduler<F> {
    pub fn new(
        config: CrawlerConfig,
        fetcher: F,
        pacer: Box<dyn Pacer>,
        clock: Box<dyn Clock>,
        store: ResumeStore,
        state: CrawlState,
    ) -> Self {
        let extractor = Extractor::new(config.selectors.clone(), config.site_origin.clone());
        Scheduler {
            config,
            fetcher,
            extractor,
            pacer,
            clock,
            store,
            state,
        }
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the crawl and returns the records newly collected this run.
    pub async fn run(
        &mut self,
        report: &mut dyn ReportWriter,
    ) -> Result<Vec<JobRecord>, CrawlerError> {
        let last_completed = self.state.last_completed();
        let first_page = self.config.start_page.max(last_completed + 1);
        info!(
            "configured start page {}, last completed {}, resuming from page {}",
            self.config.start_page, last_completed, first_page
        );

        let mut new_jobs = Vec::new();
        for page_no in first_page..=self.config.max_pages {
            if self.state.completed_pages.contains(&page_no) {
                continue;
            }

            let url = page_url(&self.config.start_url, page_no);
            info!("crawling page {}: {}", page_no, url);

            let html = match self.fetcher.fetch(&url, self.config.nav_timeout).await {
                Ok(html) => html,
                Err(e) => {
                    // Left incomplete on purpose; the next run retries it.
                    warn!("page {} fetch failed: {}", page_no, e);
                    continue;
                }
            };

            let raw_links = {
                let doc = PageDoc::parse(&html);
                self.extractor.job_links(&doc)
            };
            if raw_links.is_empty() {
                info!("page {}: no job links found", page_no);
                self.complete_page(page_no)?;
                continue;
            }

            let new_links: Vec<String> = raw_links
                .iter()
                .filter(|link| !self.state.seen_links.contains(*link))
                .cloned()
                .collect();
            info!(
                "page {}: {} raw links, {} new after dedup",
                page_no,
                raw_links.len(),
                new_links.len()
            );
            if new_links.is_empty() {
                info!("page {}: no new jobs, skipping", page_no);
                self.complete_page(page_no)?;
                continue;
            }

            let mut page_jobs = Vec::new();
            let mut failures = 0usize;
            {
                let fetcher = &self.fetcher;
                let extractor = &self.extractor;
                let pacer = &*self.pacer;
                let clock = &*self.clock;
                let timeout = self.config.nav_timeout;
                let state = &mut self.state;

                // Results join back in completion order; the seen-set is
                // only touched here, never inside a fetch unit.
                let mut results = stream::iter(new_links.into_iter().map(move |link| {
                    fetch_detail(fetcher, extractor, pacer, clock, link, timeout)
                }))
                .buffer_unordered(self.config.max_concurrent);

                while let Some(job) = results.next().await {
                    if job.is_fetch_failed() {
                        failures += 1;
                    } else {
                        state.seen_links.insert(job.detail_url.clone());
                        page_jobs.push(job);
                    }
                }
            }

            info!(
                "page {}: {} new jobs, {} failed fetches",
                page_no,
                page_jobs.len(),
                failures
            );
            if !page_jobs.is_empty() {
                report.append_page(&page_jobs, page_no)?;
            }
            new_jobs.extend(page_jobs);
            self.complete_page(page_no)?;
        }

        Ok(new_jobs)
    }

    fn complete_page(&mut self, page_no: u32) -> Result<(), CrawlerError> {
        self.state.completed_pages.insert(page_no);
        self.store.save(&self.state)
    }
}

async fn fetch_detail<F: PageFetcher>(
    fetcher: &F,
    extractor: &Extractor,
    pacer: &dyn Pacer,
    clock: &dyn Clock,
    url: String,
    timeout: Duration,
) -> JobRecord {
    tokio::time::sleep(pacer.politeness_delay()).await;
    match fetcher.fetch(&url, timeout).await {
        Ok(html) => {
            let doc = PageDoc::parse(&html);
            extractor.extract(&doc, &url, clock.now())
        }
        Err(e) => {
            warn!("error scraping {}: {}", url, e);
            JobRecord::fetch_failed(&url, clock.now())
        }
    }
}

/// Substitutes the page-number path segment into the listing URL template.
fn page_url(template: &str, page_no: u32) -> String {
    regex!(r"/p\d+")
        .replace(template, format!("/p{page_no}").as_str())
        .into_owned()
}
