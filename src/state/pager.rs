// Post pager.
// Walks a category's paginated post listing, reading from the index and fetching missing pages.

use std::io::Write;

use tracing::{info, warn};

use crate::cache::{CacheIndex, CacheStore, CategoryHash};
use crate::error::{EsaError, Result};
use crate::esa::EsaClient;

use super::prompt::{Decision, Prompt};

/// State of the page currently being visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Not in the index; must be fetched before printing.
    NeedFetch,
    /// Present in the index.
    HasCache,
    /// No further page.
    Exhausted,
}

/// What a pager run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerSummary {
    /// Pages printed, in order.
    pub visited: Vec<u32>,
    /// Pages that had to be fetched.
    pub fetched: Vec<u32>,
    /// Whether the prompt stopped the walk before the last page.
    pub cancelled: bool,
}

pub struct Pager<'a, P> {
    client: &'a mut EsaClient,
    store: &'a CacheStore,
    index: &'a mut CacheIndex,
    prompt: P,
    team: &'a str,
}

impl<'a, P: Prompt> Pager<'a, P> {
    pub fn new(
        client: &'a mut EsaClient,
        store: &'a CacheStore,
        index: &'a mut CacheIndex,
        prompt: P,
        team: &'a str,
    ) -> Self {
        Self {
            client,
            store,
            index,
            prompt,
            team,
        }
    }

    /// Print every post of `category`, starting at page 1 and following `next_page`.
    pub async fn run<W: Write>(&mut self, category: &str, out: &mut W) -> Result<PagerSummary> {
        let hash = CategoryHash::of(category);
        self.index.ensure_scanned(self.store, &hash)?;

        let mut summary = PagerSummary::default();
        let mut page = 1;
        let mut state = self.state_for(&hash, page);

        loop {
            match state {
                PageState::NeedFetch => {
                    if self.prompt.confirm(category, page)? == Decision::Cancel {
                        summary.cancelled = true;
                        break;
                    }

                    info!(page, "no cached data, fetch again...");
                    self.client.fetch_posts_in_category(category, page).await?;
                    self.index.reload_page(self.store, &hash, page)?;
                    summary.fetched.push(page);
                    state = PageState::HasCache;
                }
                PageState::HasCache => {
                    let cached = self
                        .index
                        .page(&hash, page)
                        .ok_or_else(|| EsaError::MissingCache(self.store.path_for(&hash, page)))?;

                    if !summary.fetched.contains(&page) {
                        info!(page, "use cached data");
                    }
                    for post in &cached.posts {
                        writeln!(out, "{}", post.single_line(self.team))?;
                    }
                    summary.visited.push(page);

                    state = match cached.next() {
                        Some(next) if summary.visited.contains(&next) => {
                            warn!(page, next, "next_page points back to a visited page");
                            PageState::Exhausted
                        }
                        Some(next) => {
                            page = next;
                            self.state_for(&hash, page)
                        }
                        None => PageState::Exhausted,
                    };
                }
                PageState::Exhausted => break,
            }
        }

        Ok(summary)
    }

    fn state_for(&self, hash: &CategoryHash, page: u32) -> PageState {
        if self.index.has_page(hash, page) {
            PageState::HasCache
        } else {
            PageState::NeedFetch
        }
    }
}
