// esa API endpoint functions.
// Fetches categories and post pages and stores the raw bodies in the cache.

use tracing::info;

use crate::cache::CategoryHash;
use crate::error::Result;

use super::client::EsaClient;

impl EsaClient {
    /// Fetch the team's categories and cache the raw response.
    pub async fn fetch_categories(&mut self) -> Result<()> {
        let endpoint = format!("/v1/teams/{}/categories", self.team);
        let response = self.get(&endpoint).await?;
        let body = response.bytes().await?;

        let path = self.store.categories_path();
        self.store.write(&path, &body)?;
        info!(bytes = body.len(), "cached categories");
        Ok(())
    }

    /// Fetch one page of posts in a category and cache the raw response.
    pub async fn fetch_posts_in_category(&mut self, category: &str, page: u32) -> Result<()> {
        let endpoint = format!(
            "/v1/teams/{}/posts?q=on:{}&page={}",
            self.team,
            urlencoding::encode(category),
            page
        );
        let response = self.get(&endpoint).await?;
        let body = response.bytes().await?;

        let path = self.store.path_for(&CategoryHash::of(category), page);
        self.store.write(&path, &body)?;
        info!(category, page, bytes = body.len(), "cached posts page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::config::Config;
    use crate::error::EsaError;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn client_for(server: &MockServer, temp_dir: &TempDir) -> EsaClient {
        let config = Config {
            token: "secret-token".to_string(),
            team: "docs".to_string(),
            cache_dir: temp_dir.path().to_path_buf(),
            api_base: server.base_url(),
        };
        EsaClient::new(&config, CacheStore::new(&config.cache_dir)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_categories_writes_raw_body() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let body = r#"{"categories": [ {"name":"Engineering","count":3} ]}"#;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/teams/docs/categories")
                    .header("authorization", "Bearer secret-token");
                then.status(200)
                    .header("x-ratelimit-remaining", "74")
                    .body(body);
            })
            .await;

        let mut client = client_for(&server, &temp_dir);
        client.fetch_categories().await.unwrap();

        mock.assert_async().await;
        let store = CacheStore::new(temp_dir.path());
        assert!(store.exists_categories());
        assert_eq!(
            store.read(&store.categories_path()).unwrap(),
            body.as_bytes()
        );
        assert_eq!(client.rate_limit().remaining, 74);
    }

    #[tokio::test]
    async fn test_fetch_posts_encodes_category() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let body = r#"{"posts":[],"next_page":null}"#;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/teams/docs/posts")
                    .query_param("q", "on:日報/2024")
                    .query_param("page", "3");
                then.status(200).body(body);
            })
            .await;

        let mut client = client_for(&server, &temp_dir);
        client.fetch_posts_in_category("日報/2024", 3).await.unwrap();

        mock.assert_async().await;
        let store = CacheStore::new(temp_dir.path());
        let hash = CategoryHash::of("日報/2024");
        assert!(store.exists_page(&hash, 3));
        assert_eq!(
            store.read(&store.path_for(&hash, 3)).unwrap(),
            body.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_http_errors_are_fatal_and_not_cached() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();

        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/teams/docs/categories");
                then.status(500).body("boom");
            })
            .await;

        let mut client = client_for(&server, &temp_dir);
        let err = client.fetch_categories().await.unwrap_err();

        assert!(matches!(err, EsaError::Http { status: 500, .. }));
        assert!(!CacheStore::new(temp_dir.path()).exists_categories());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();

        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/teams/docs/posts");
                then.status(401);
            })
            .await;

        let mut client = client_for(&server, &temp_dir);
        let err = client
            .fetch_posts_in_category("Engineering", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, EsaError::Unauthorized));
    }
}
