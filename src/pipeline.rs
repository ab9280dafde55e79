// src/pipeline.rs
use crate::elibrary::client::ContractSource;
use crate::elibrary::models::ContractInfo;
use crate::extractors::extract_contract_info;
use crate::storage::cache::Cache;
use crate::utils::AppError;

pub fn url_key(contract_id: &str) -> String {
    format!("url_{}", contract_id)
}

pub fn html_key(contract_id: &str) -> String {
    format!("html_{}", contract_id)
}

/// Returns the contractor page for `contract_id`, going to `source` only on cache misses.
pub async fn get_contract_html<C, S>(cache: &C, source: &S, contract_id: &str) -> Result<String, AppError>
where
    C: Cache,
    S: ContractSource,
{
    let url = cache
        .get_or_compute(&url_key(contract_id), || source.resolve_url(contract_id))
        .await?;

    let html = cache
        .get_or_compute(&html_key(contract_id), || source.fetch_html(&url))
        .await?;

    Ok(html)
}

/// Looks up and parses the contract record for `contract_id`.
pub async fn get_contract_info<C, S>(cache: &C, source: &S, contract_id: &str) -> Result<ContractInfo, AppError>
where
    C: Cache,
    S: ContractSource,
{
    tracing::info!("Getting info for contract {}", contract_id);
    let html = get_contract_html(cache, source, contract_id).await?;
    Ok(extract_contract_info(&html)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::cache::{DiskCache, MemoryCache};
    use crate::utils::error::{ExtractError, TransportError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE: &str = r#"<html><body>
        <table><tr><td><a name="skipnavigation"></a></td></tr></table>
        <table><tr><td>
          <table><tr><td><table>
            <tr><td>Contractor:</td><td>Acme Corp</td></tr>
            <tr><td>DUNS:</td><td>123456789</td></tr>
          </table></td></tr></table>
          <table>
            <tr><th>a</th><th>b</th><th>c</th><th>d</th><th>e</th><th>f</th></tr>
            <tr><td></td><td></td><td>GS-10F-0247K</td><td></td><td>2030-01-01</td><td><a>874-1</a></td></tr>
          </table>
        </td></tr></table>
        </body></html>"#;

    #[derive(Default)]
    struct FakeSource {
        resolves: AtomicUsize,
        fetches: AtomicUsize,
        fail_fetches: AtomicUsize,
        page: &'static str,
    }

    #[async_trait]
    impl ContractSource for FakeSource {
        async fn resolve_url(&self, contract_id: &str) -> Result<String, TransportError> {
            self.resolves.fetch_add(1, Ordering::SeqCst);
            Ok(format!("https://elibrary.test/contractorInfo.do?contractNumber={}", contract_id))
        }

        async fn fetch_html(&self, url: &str) -> Result<String, TransportError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            assert!(url.ends_with("contractNumber=GS-10F-0247K"), "unexpected url {url}");
            if self.fail_fetches.load(Ordering::SeqCst) > 0 {
                self.fail_fetches.fetch_sub(1, Ordering::SeqCst);
                return Err(TransportError::Http(reqwest::StatusCode::BAD_GATEWAY));
            }
            Ok(self.page.to_string())
        }
    }

    fn source(page: &'static str) -> FakeSource {
        FakeSource { page, ..Default::default() }
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let cache = MemoryCache::new();
        let source = source(PAGE);

        let first = get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap();
        let second = get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.contractor.duns.as_deref(), Some("123456789"));
        assert_eq!(first.sins, vec!["874-1".to_string()]);
        assert_eq!(source.resolves.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_but_url_is_kept() {
        let cache = MemoryCache::new();
        let source = source(PAGE);
        source.fail_fetches.store(1, Ordering::SeqCst);

        let err = get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap_err();
        assert!(matches!(err, AppError::Transport(TransportError::Http(_))));

        get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap();
        assert_eq!(source.resolves.load(Ordering::SeqCst), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn structural_failure_still_caches_document() {
        let cache = MemoryCache::new();
        let source = source("<html><body><p>maintenance</p></body></html>");

        let err = get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractError::Structural(_))));

        let html = get_contract_html(&cache, &source, "GS-10F-0247K").await.unwrap();
        assert!(html.contains("maintenance"));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disk_cache_pipeline_uses_expected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let source = source(PAGE);

        tokio_test::block_on(async {
            let cache = DiskCache::new(dir.path()).unwrap();
            get_contract_info(&cache, &source, "GS-10F-0247K").await.unwrap();
        });

        assert!(dir.path().join("url_GS-10F-0247K.cache").exists());
        assert!(dir.path().join("html_GS-10F-0247K.cache").exists());
    }
}
