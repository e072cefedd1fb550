// Command entry points.
// Each command wires the cache, client, and state modules together for one invocation.

use std::io::Write;

use tracing::{debug, info};

use crate::cache::{CacheIndex, CacheStore};
use crate::cli::{LsArgs, ReservedArgs};
use crate::config::Config;
use crate::error::{EsaError, Result};
use crate::esa::EsaClient;
use crate::state::navigation::{list_children, render_children, resolve};
use crate::state::{Pager, Prompt};

/// Delete the whole response cache.
pub fn flush(config: &Config) -> Result<()> {
    CacheStore::new(&config.cache_dir).flush()
}

/// List a category's children and/or page through its posts.
pub async fn ls<P: Prompt, W: Write>(
    config: &Config,
    args: &LsArgs,
    prompt: P,
    out: &mut W,
) -> Result<()> {
    let store = CacheStore::new(&config.cache_dir);
    let mut client = EsaClient::new(config, store.clone())?;

    ensure_categories(&mut client, &store).await?;
    let mut index = CacheIndex::open(&store)?;

    let category = args.category();
    if !args.posts_only {
        // A category missing from the cached tree still gets its posts paged
        match resolve(&index.categories, category).map(list_children) {
            Some(rows) => {
                for line in render_children(&rows) {
                    writeln!(out, "{}", line)?;
                }
            }
            None => writeln!(out, "{}", EsaError::CategoryNotFound(category.to_string()))?,
        }
    }

    if !args.categories_only {
        let summary = Pager::new(&mut client, &store, &mut index, prompt, &config.team)
            .run(category, out)
            .await?;
        debug!(?summary, "paging finished");
    }

    Ok(())
}

/// Reserved; accepts and ignores its arguments.
pub fn show(args: &ReservedArgs) -> Result<()> {
    debug!(args = ?args.args, "show is not implemented");
    Ok(())
}

/// Reserved; accepts and ignores its arguments.
pub fn tree(args: &ReservedArgs) -> Result<()> {
    debug!(args = ?args.args, "tree is not implemented");
    Ok(())
}

/// Fetch the categories response unless it is already cached.
async fn ensure_categories(client: &mut EsaClient, store: &CacheStore) -> Result<()> {
    if store.exists_categories() {
        info!("use cached data");
        return Ok(());
    }

    info!("no cached data, fetch again...");
    client.fetch_categories().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CategoryHash;
    use crate::state::AlwaysProceed;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    const CATEGORIES: &str = r#"{"categories":[
        {"name":"","count":4},
        {"name":"Engineering","count":3,"children":[{"name":"Backend","count":3}]},
        {"name":"Design"}
    ]}"#;

    const BACKEND_PAGE: &str = r#"{"posts":[
        {"number":7,"name":"API guidelines","updated_at":"2023-11-20T18:30:00+09:00"}
    ],"next_page":null}"#;

    fn config_for(server: &MockServer, temp_dir: &TempDir) -> Config {
        Config {
            token: "t".to_string(),
            team: "docs".to_string(),
            cache_dir: temp_dir.path().join("cache"),
            api_base: server.base_url(),
        }
    }

    fn ls_args(category: &str) -> LsArgs {
        LsArgs {
            category: Some(category.to_string()),
            ..LsArgs::default()
        }
    }

    #[tokio::test]
    async fn test_ls_fetches_categories_when_missing() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &temp_dir);

        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/teams/docs/categories");
                then.status(200).body(CATEGORIES);
            })
            .await;

        let args = LsArgs {
            categories_only: true,
            ..LsArgs::default()
        };
        let mut out = Vec::new();
        ls(&config, &args, AlwaysProceed, &mut out).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "       7 total items\n       3 Engineering\n       0 Design\n"
        );

        // Second run is served from the cache
        let mut out = Vec::new();
        ls(&config, &args, AlwaysProceed, &mut out).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ls_lists_children_and_posts_from_cache() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &temp_dir);

        let store = CacheStore::new(&config.cache_dir);
        store
            .write(&store.categories_path(), CATEGORIES.as_bytes())
            .unwrap();
        store
            .write(
                &store.path_for(&CategoryHash::of("Engineering/Backend"), 1),
                BACKEND_PAGE.as_bytes(),
            )
            .unwrap();

        let mut out = Vec::new();
        ls(&config, &ls_args("Engineering/Backend"), AlwaysProceed, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "       3 total items\n\
             https://docs.esa.io/posts/7\t2023-11-20 18:30:00\tAPI guidelines\n"
        );
    }

    #[tokio::test]
    async fn test_ls_posts_only_pages_category_missing_from_cached_tree() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &temp_dir);

        let store = CacheStore::new(&config.cache_dir);
        store
            .write(
                &store.categories_path(),
                br#"{"categories":[{"name":"Old","count":1}]}"#,
            )
            .unwrap();

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/teams/docs/posts")
                    .query_param("q", "on:New")
                    .query_param("page", "1");
                then.status(200).body(BACKEND_PAGE);
            })
            .await;

        let args = LsArgs {
            category: Some("New".to_string()),
            posts_only: true,
            ..LsArgs::default()
        };
        let mut out = Vec::new();
        ls(&config, &args, AlwaysProceed, &mut out).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://docs.esa.io/posts/7\t2023-11-20 18:30:00\tAPI guidelines\n"
        );
    }

    #[tokio::test]
    async fn test_ls_unknown_category_still_pages_posts() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &temp_dir);

        let store = CacheStore::new(&config.cache_dir);
        store
            .write(&store.categories_path(), CATEGORIES.as_bytes())
            .unwrap();

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/teams/docs/posts")
                    .query_param("q", "on:Engineering/Database");
                then.status(200).body(BACKEND_PAGE);
            })
            .await;

        let mut out = Vec::new();
        ls(&config, &ls_args("Engineering/Database"), AlwaysProceed, &mut out)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "'Engineering/Database' not found\n\
             https://docs.esa.io/posts/7\t2023-11-20 18:30:00\tAPI guidelines\n"
        );
    }

    #[tokio::test]
    async fn test_ls_unknown_category_is_not_fatal() {
        let server = MockServer::start_async().await;
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&server, &temp_dir);

        let store = CacheStore::new(&config.cache_dir);
        store
            .write(&store.categories_path(), CATEGORIES.as_bytes())
            .unwrap();

        let args = LsArgs {
            category: Some("Engineering/Database".to_string()),
            categories_only: true,
            ..LsArgs::default()
        };
        let mut out = Vec::new();
        ls(&config, &args, AlwaysProceed, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "'Engineering/Database' not found\n"
        );
    }

    #[test]
    fn test_flush() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            token: "t".to_string(),
            team: "docs".to_string(),
            cache_dir: temp_dir.path().join("cache"),
            api_base: "http://127.0.0.1:1".to_string(),
        };
        let store = CacheStore::new(&config.cache_dir);
        store.write(&store.categories_path(), b"{}").unwrap();

        flush(&config).unwrap();
        assert!(!store.exists_categories());
    }
}
