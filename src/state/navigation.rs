// Category navigation.
// Resolves slash-delimited category paths against the cached tree and lists children.

use crate::esa::Category;

/// Label of the synthetic first row of a listing.
pub const TOTAL_LABEL: &str = "total items";

/// Minimum width of the count column.
const MIN_COUNT_WIDTH: usize = 8;

/// Walk `path` down from `root`. Empty segments are skipped, so `""` is the root.
pub fn resolve<'a>(root: &'a Category, path: &str) -> Option<&'a Category> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |current, segment| {
            current.children.iter().find(|child| child.name == segment)
        })
}

/// Rows of a listing: the category's own total first, then each child in order.
pub fn list_children(category: &Category) -> Vec<(u64, String)> {
    std::iter::once((category.count(), TOTAL_LABEL.to_string()))
        .chain(
            category
                .children
                .iter()
                .map(|child| (child.count(), child.name.clone())),
        )
        .collect()
}

/// Width of the count column: widest count, never below 8.
pub fn count_width(rows: &[(u64, String)]) -> usize {
    rows.iter()
        .map(|(count, _)| count.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_COUNT_WIDTH)
}

/// Format rows as right-aligned counts followed by names.
pub fn render_children(rows: &[(u64, String)]) -> Vec<String> {
    let width = count_width(rows);
    rows.iter()
        .map(|(count, name)| format!("{:>width$} {}", count, name))
        .collect()
}
