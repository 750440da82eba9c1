use crate::error::CrawlerError;
use crate::record::{JobRecord, FETCH_FAILED};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Records persisted by an earlier run. Missing or unreadable files are
/// not an error; the crawl starts fresh.
pub fn load_existing(path: &Path) -> Vec<JobRecord> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("ignoring unreadable result file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Writes the full record set as a pretty-printed JSON array, keeping the
/// first occurrence per detail URL.
pub fn write_deduped(path: &Path, records: &[JobRecord]) -> Result<usize, CrawlerError> {
    let mut seen = HashSet::new();
    let unique: Vec<&JobRecord> = records
        .iter()
        .filter(|r| !r.detail_url.is_empty() && seen.insert(r.detail_url.as_str()))
        .collect();
    fs::write(path, serde_json::to_string_pretty(&unique)?)?;
    Ok(unique.len())
}

/// Document-export collaborator: consumes one page's records at a time.
pub trait ReportWriter {
    fn append_page(&mut self, jobs: &[JobRecord], page_no: u32) -> Result<(), CrawlerError>;
}

/// Plain-text report, one appended section per page.
pub struct TextReport {
    path: PathBuf,
}

impl TextReport {
    pub fn new(path: PathBuf) -> Self {
        TextReport { path }
    }
}

impl ReportWriter for TextReport {
    fn append_page(&mut self, jobs: &[JobRecord], page_no: u32) -> Result<(), CrawlerError> {
        let new_file = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if new_file {
            writeln!(file, "智联招聘岗位信息")?;
        }

        writeln!(file, "\n{}", "=".repeat(60))?;
        writeln!(file, "第 {} 页职位信息（共 {} 个）", page_no, jobs.len())?;
        writeln!(file, "{}\n", "=".repeat(60))?;

        for (i, job) in jobs.iter().enumerate() {
            writeln!(file, "{}", "-".repeat(50))?;
            let title = if job.title.is_empty() {
                "未知"
            } else {
                job.title.as_str()
            };
            writeln!(file, "岗位 {}: {}", i + 1, title)?;

            let fields: [(&str, &String); 9] = [
                ("薪资", &job.salary),
                ("工作地点", &job.location),
                ("公司名称", &job.company_name),
                ("经验要求", &job.experience),
                ("学历要求", &job.education),
                ("公司规模", &job.company_size),
                ("公司行业", &job.company_industry),
                ("工作职责", &job.duties),
                ("任职要求", &job.requirements),
            ];
            for (label, value) in fields {
                if !value.is_empty() && value.as_str() != FETCH_FAILED && value.as_str() != "未获取到" {
                    writeln!(file, "{label}：{value}")?;
                }
            }
        }
        info!("page {} written to {}", page_no, self.path.display());
        Ok(())
    }
}

pub fn log_summary(jobs: &[JobRecord]) {
    info!("crawl finished: {} jobs collected (history included)", jobs.len());
    if jobs.is_empty() {
        return;
    }
    let with_salary = jobs.iter().filter(|j| !j.salary.is_empty()).count();
    let with_location = jobs.iter().filter(|j| !j.location.is_empty()).count();
    info!("{} jobs carry salary info, {} carry location info", with_salary, with_location);
    for (i, job) in jobs.iter().take(3).enumerate() {
        info!(
            "{}. {} - {} - {}",
            i + 1,
            or_default(&job.title, "未知"),
            or_default(&job.salary, "面议"),
            or_default(&job.location, "未知"),
        );
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
