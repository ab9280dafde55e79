// src/elibrary/client.rs
use crate::utils::error::TransportError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.gsaelibrary.gsa.gov/ElibMain/";
const ELIBRARY_USER_AGENT: &str = "elibrary_scraper/0.1 (contract lookup)";
// Keep a gap between requests; the site is slow and shared.
const ELIBRARY_REQUEST_DELAY_MS: u64 = 150;

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR")
});

/// Turns a contract number into a contractor info page and downloads pages.
#[async_trait]
pub trait ContractSource: Send + Sync {
    async fn resolve_url(&self, contract_id: &str) -> Result<String, TransportError>;
    async fn fetch_html(&self, url: &str) -> Result<String, TransportError>;
}

pub struct ElibraryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ElibraryClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(ELIBRARY_USER_AGENT)
            .build()?;
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    fn search_url(&self, contract_id: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.join("searchResults.do")?;
        url.query_pairs_mut()
            .append_pair("searchText", contract_id)
            .append_pair("searchType", "allWords");
        Ok(url)
    }

    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        tracing::info!("Downloading document from: {}", url);
        tokio::time::sleep(Duration::from_millis(ELIBRARY_REQUEST_DELAY_MS)).await;

        let response = self.http.get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(TransportError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl ContractSource for ElibraryClient {
    async fn resolve_url(&self, contract_id: &str) -> Result<String, TransportError> {
        let search_url = self.search_url(contract_id)?;
        let body = self.get_text(search_url.as_str()).await?;

        let link = find_contractor_link(&body, &search_url, contract_id)
            .ok_or_else(|| TransportError::ContractNotFound(contract_id.to_string()))?;
        tracing::info!("Resolved contract {} to {}", contract_id, link);
        Ok(link.into())
    }

    async fn fetch_html(&self, url: &str) -> Result<String, TransportError> {
        self.get_text(url).await
    }
}

/// Finds the first link on a search results page that points at the
/// contractor info page for `contract_id`.
pub fn find_contractor_link(html: &str, page_url: &Url, contract_id: &str) -> Option<Url> {
    let document = Html::parse_document(html);

    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| page_url.join(href.trim()).ok())
        .find(|url| {
            url.path().ends_with("contractorInfo.do")
                && url.query_pairs().any(|(k, v)| {
                    k == "contractNumber" && v.trim().eq_ignore_ascii_case(contract_id)
                })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
        <a href="/ElibMain/home.do">Home</a>
        <a href="contractorInfo.do?contractNumber=GS-07F-0001A&contractorName=OTHER">Other</a>
        <a href="contractorInfo.do?contractNumber=GS-10F-0247K&amp;contractorName=ACME+CORP&amp;executeQuery=YES">ACME CORP</a>
        </body></html>
    "#;

    #[test]
    fn picks_link_matching_contract_number() {
        let page = Url::parse("https://www.gsaelibrary.gsa.gov/ElibMain/searchResults.do?searchText=x").unwrap();

        let link = find_contractor_link(SEARCH_PAGE, &page, "gs-10f-0247k").unwrap();

        assert_eq!(link.path(), "/ElibMain/contractorInfo.do");
        assert!(link.as_str().contains("contractorName=ACME+CORP"));
    }

    #[test]
    fn no_matching_link_is_none() {
        let page = Url::parse("https://www.gsaelibrary.gsa.gov/ElibMain/searchResults.do").unwrap();
        assert!(find_contractor_link(SEARCH_PAGE, &page, "GS-00F-9999Z").is_none());
    }

    #[test]
    fn search_url_is_built_under_base_path() {
        let client = ElibraryClient::new("http://localhost:8080/ElibMain").unwrap();
        let url = client.search_url("GS-10F-0247K").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/ElibMain/searchResults.do?searchText=GS-10F-0247K&searchType=allWords"
        );
    }
}
