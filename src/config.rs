use std::path::PathBuf;
use std::time::Duration;

/// Selector alternatives per logical field, tried in order. The site's
/// markup drifts between layouts, so these stay configurable.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub job_title: Vec<String>,
    pub salary: Vec<String>,
    pub company_name: Vec<String>,
    pub detail_content: Vec<String>,
    pub address: Vec<String>,
    pub basic_info: Vec<String>,
    pub company_info: Vec<String>,
    pub job_links: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            job_title: owned(&[
                "h3.summary-plane__title",
                "h1.job-title",
                "h3.title",
                ".job-name",
            ]),
            salary: owned(&[".summary-plane__salary", ".job-salary", ".salary"]),
            company_name: owned(&[
                ".company__title a",
                ".company-name a",
                ".job-company__name",
            ]),
            detail_content: owned(&[
                ".description__detail-content",
                ".job-detail-content",
                ".job-description",
                ".describtion",
            ]),
            address: owned(&[".job-address__content-text", ".work-add", ".job-location"]),
            basic_info: owned(&[".summary-plane__info li", ".job-basic-info li"]),
            company_info: owned(&[".company__info", ".job-company__info", ".company-details"]),
            job_links: owned(&[
                ".joblist-box__item .jobinfo__top a",
                ".joblist-box__item .jobinfo_top a",
                ".job-item a",
                ".job-card a",
                ".job-list .job-title a",
            ]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Listing URL template; must contain a `/p<N>` page segment.
    pub start_url: String,
    /// Origin used to resolve relative detail links.
    pub site_origin: String,
    pub start_page: u32,
    pub max_pages: u32,
    pub max_concurrent: usize,
    pub delay_min: Duration,
    pub delay_max: Duration,
    pub nav_timeout: Duration,
    pub proxy: Option<String>,
    pub resume_path: PathBuf,
    pub results_path: PathBuf,
    pub report_path: PathBuf,
    pub selectors: Selectors,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        CrawlerConfig {
            start_url: "https://www.zhaopin.com/sou/jl530/kwFT8NTN2RH58MG/p1".to_string(),
            site_origin: "https://www.zhaopin.com".to_string(),
            start_page: 1,
            max_pages: 1,
            max_concurrent: 10,
            delay_min: Duration::from_millis(400),
            delay_max: Duration::from_millis(800),
            nav_timeout: Duration::from_secs(30),
            proxy: None,
            resume_path: PathBuf::from("resume_state.json"),
            results_path: PathBuf::from("jobs.json"),
            report_path: PathBuf::from("jobs_report.txt"),
            selectors: Selectors::default(),
        }
    }
}
