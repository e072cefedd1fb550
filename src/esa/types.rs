// esa API response types.
// Defines structs for deserializing the categories and posts endpoints.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A category node. The root has an empty name and aggregates the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Number of posts; absent on some entries.
    #[serde(default)]
    pub count: Option<u64>,
    /// Subcategories in API response order.
    #[serde(default)]
    pub children: Vec<Category>,
}

impl Category {
    /// Post count, treating a missing value as zero.
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(0)
    }
}

/// Response body of `GET /v1/teams/{team}/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

impl CategoriesResponse {
    /// Build the synthetic root category.
    ///
    /// The empty-name entry holds uncategorized posts. It is hidden from the
    /// children but still counted in the root total.
    pub fn into_root(self) -> Category {
        let count = self.categories.iter().map(Category::count).sum();
        let children = self
            .categories
            .into_iter()
            .filter(|category| !category.name.is_empty())
            .collect();

        Category {
            name: String::new(),
            count: Some(count),
            children,
        }
    }
}

/// A single esa post. Fields beyond the displayed ones are kept untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub number: u64,
    pub name: String,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Browser URL of the post on the team's esa site.
    pub fn url(&self, team: &str) -> String {
        format!("https://{}.esa.io/posts/{}", team, self.number)
    }

    /// Tab-separated listing line: URL, update time, name.
    pub fn single_line(&self, team: &str) -> String {
        format!(
            "{}\t{}\t{}",
            self.url(team),
            self.updated_at.format("%Y-%m-%d %H:%M:%S"),
            self.name
        )
    }
}

/// One page of `GET /v1/teams/{team}/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostPage {
    /// Next page number, if any. Zero is treated like null.
    pub fn next(&self) -> Option<u32> {
        self.next_page.filter(|&page| page != 0)
    }
}
