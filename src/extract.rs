use crate::config::Selectors;
use crate::describe::split_description;
use crate::fetch::PageDoc;
use crate::record::JobRecord;
use itertools::Itertools;
use lazy_regex::regex;

#[derive(Debug, Default)]
struct BasicInfo {
    location: String,
    experience: String,
    education: String,
    company_size: String,
}

pub struct Extractor {
    selectors: Selectors,
    site_origin: String,
}

impl Extractor {
    pub fn new(selectors: Selectors, site_origin: String) -> Self {
        Extractor {
            selectors,
            site_origin,
        }
    }

    /// Detail links on a listing page. The first selector list entry that
    /// yields at least one href wins; relative hrefs are resolved against
    /// the site origin.
    pub fn job_links(&self, doc: &PageDoc) -> Vec<String> {
        for selector in &self.selectors.job_links {
            let hrefs = doc.attrs(selector, "href");
            if !hrefs.is_empty() {
                return hrefs
                    .into_iter()
                    .map(|href| {
                        if href.starts_with("http") {
                            href
                        } else {
                            format!("{}{}", self.site_origin, href)
                        }
                    })
                    .unique()
                    .collect();
            }
        }
        Vec::new()
    }

    /// Field extraction never fails; missing selectors yield empty fields.
    pub fn extract(&self, doc: &PageDoc, url: &str, scraped_at: f64) -> JobRecord {
        let title = doc.first_text(&self.selectors.job_title);
        let salary = doc.first_text(&self.selectors.salary);
        let company_name = doc.first_text(&self.selectors.company_name);

        let basic = self.basic_info(doc);

        let detail_raw = doc.first_text(&self.selectors.detail_content);
        let (duties, requirements) = split_description(&detail_raw);

        // A physical address beats the summary-panel location string.
        let address = doc.first_text(&self.selectors.address);
        let location = if address.is_empty() {
            basic.location
        } else {
            address
        };

        JobRecord {
            title,
            salary,
            company_name,
            location,
            experience: basic.experience,
            education: basic.education,
            company_size: basic.company_size,
            company_industry: String::new(),
            duties,
            requirements,
            detail_url: url.to_string(),
            scraped_at,
        }
    }

    fn basic_info(&self, doc: &PageDoc) -> BasicInfo {
        let items = doc.all_texts(&self.selectors.basic_info);

        // Positional contract: the first three list items are location,
        // experience and education in that order on the known layouts.
        let mut info = if items.len() >= 3 {
            BasicInfo {
                location: items[0].clone(),
                experience: items[1].clone(),
                education: items[2].clone(),
                company_size: String::new(),
            }
        } else if !items.is_empty() {
            parse_combined_info(&items.join(" "))
        } else {
            BasicInfo::default()
        };

        let company_info = doc.first_text(&self.selectors.company_info);
        if !company_info.is_empty() {
            if let Some(size) = parse_company_size(&company_info) {
                info.company_size = size;
            }
        }
        info
    }
}

fn parse_combined_info(text: &str) -> BasicInfo {
    let mut info = BasicInfo::default();

    if let Some(caps) = regex!(r"([^，,]+?市[^，,]*?区?)").captures(text) {
        info.location = caps[1].to_string();
    }

    let experience_patterns = [
        regex!(r"(\d-\d年|\d+年以上|经验不限|应届)"),
        regex!(r"(\d+年经验)"),
    ];
    for pattern in experience_patterns {
        if let Some(caps) = pattern.captures(text) {
            info.experience = caps[1].to_string();
            break;
        }
    }

    if let Some(caps) = regex!(r"(本科|大专|硕士|博士|高中|中专|不限)").captures(text) {
        info.education = caps[1].to_string();
    }
    info
}

fn parse_company_size(text: &str) -> Option<String> {
    regex!(r"(少于50人|50-100人|100-500人|500-1000人|1000人以上)")
        .captures(text)
        .map(|caps| caps[1].to_string())
}
