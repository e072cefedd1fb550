// Browsing state.
// Category navigation, fetch prompts, and post paging over the cache index.

pub mod navigation;
pub mod pager;
pub mod prompt;

#[allow(unused_imports)]
pub use pager::{PageState, Pager, PagerSummary};
#[allow(unused_imports)]
pub use prompt::{AlwaysProceed, Decision, LinePrompt, Prompt};
