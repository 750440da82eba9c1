use serde::{Deserialize, Serialize};

/// Marker written into every extracted field when a detail page could not
/// be fetched at all.
pub const FETCH_FAILED: &str = "获取失败";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub company_industry: String,
    #[serde(default)]
    pub duties: String,
    #[serde(default)]
    pub requirements: String,
    pub detail_url: String,
    #[serde(default)]
    pub scraped_at: f64,
}

impl JobRecord {
    pub fn fetch_failed(detail_url: &str, scraped_at: f64) -> Self {
        let s = || FETCH_FAILED.to_string();
        JobRecord {
            title: s(),
            salary: s(),
            company_name: s(),
            location: s(),
            experience: s(),
            education: s(),
            company_size: s(),
            company_industry: s(),
            duties: s(),
            requirements: s(),
            detail_url: detail_url.to_string(),
            scraped_at,
        }
    }

    /// The title field alone decides whether a record counts as a failure.
    pub fn is_fetch_failed(&self) -> bool {
        self.title == FETCH_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failure_record_sentinels_every_field() {
        let r = JobRecord::fetch_failed("https://www.zhaopin.com/job/1.htm", 12.5);
        assert!(r.is_fetch_failed());
        assert_eq!(r.detail_url, "https://www.zhaopin.com/job/1.htm");
        assert_eq!(r.scraped_at, 12.5);
        for field in [
            &r.title,
            &r.salary,
            &r.company_name,
            &r.location,
            &r.experience,
            &r.education,
            &r.company_size,
            &r.company_industry,
            &r.duties,
            &r.requirements,
        ] {
            assert_eq!(field, FETCH_FAILED);
        }
    }

    #[test]
    fn failure_record_serializes_with_complete_shape() {
        let r = JobRecord::fetch_failed("u", 0.0);
        let v = serde_json::to_value(&r).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 12);
        assert!(obj.contains_key("company_size"));
        assert!(obj.contains_key("requirements"));
    }

    #[test]
    fn records_with_missing_fields_still_deserialize() {
        let r: JobRecord =
            serde_json::from_str(r#"{"detail_url": "https://x/1", "title": "工程师"}"#).unwrap();
        assert_eq!(r.title, "工程师");
        assert_eq!(r.salary, "");
        assert!(!r.is_fetch_failed());
    }
}
