use crate::error::CrawlerError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use std::time::Duration;

/// Minimal page-access surface the crawler depends on. Everything else
/// (rendering, sessions, retries) stays behind this boundary.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, CrawlerError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(proxy: Option<&str>) -> Result<Self, CrawlerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(HttpFetcher {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, CrawlerError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// A fetched page, parsed once. Queries are synchronous so extraction
/// stays pure over this value.
pub struct PageDoc {
    html: Html,
}

impl PageDoc {
    pub fn parse(html: &str) -> Self {
        PageDoc {
            html: Html::parse_document(html),
        }
    }

    /// Cascading fallback: the first selector matching an element with
    /// non-empty text wins. Invalid selectors and misses are skipped.
    pub fn first_text(&self, selectors: &[String]) -> String {
        for raw in selectors {
            let Ok(selector) = Selector::parse(raw) else {
                continue;
            };
            for element in self.html.select(&selector) {
                let text = element.text().collect::<String>();
                let text = text.trim();
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
        String::new()
    }

    /// All matches of the combined selector list, in document order.
    pub fn all_texts(&self, selectors: &[String]) -> Vec<String> {
        let Ok(selector) = Selector::parse(&selectors.join(", ")) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }

    pub fn attrs(&self, raw: &str, attr: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(raw) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr(attr))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_text_skips_empty_matches_and_invalid_selectors() {
        let doc = PageDoc::parse(
            r#"<h3 class="title">  </h3><div class="job-name"> 后端工程师 </div>"#,
        );
        let selectors = vec![
            ":::not-a-selector".to_string(),
            "h3.title".to_string(),
            ".job-name".to_string(),
        ];
        assert_eq!(doc.first_text(&selectors), "后端工程师");
    }

    #[test]
    fn first_text_returns_empty_on_total_miss() {
        let doc = PageDoc::parse("<p>nothing here</p>");
        assert_eq!(doc.first_text(&[".missing".to_string()]), "");
    }

    #[test]
    fn all_texts_combines_selector_lists_in_document_order() {
        let doc = PageDoc::parse(
            r#"<ul class="summary-plane__info"><li>北京</li><li>3-5年</li></ul>
               <ul class="job-basic-info"><li>本科</li></ul>"#,
        );
        let selectors = vec![
            ".summary-plane__info li".to_string(),
            ".job-basic-info li".to_string(),
        ];
        assert_eq!(doc.all_texts(&selectors), vec!["北京", "3-5年", "本科"]);
    }

    #[test]
    fn attrs_extracts_hrefs() {
        let doc = PageDoc::parse(r#"<div class="job-card"><a href="/job/1.htm">x</a><a>y</a></div>"#);
        assert_eq!(doc.attrs(".job-card a", "href"), vec!["/job/1.htm"]);
    }
}
