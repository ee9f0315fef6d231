//! Substring search and category selection over fetched products.

use crate::catalog::Product;
use crate::types::CategoryId;

/// Products whose name or category name contains `query`, ignoring case.
///
/// A blank query matches nothing; the search screen shows suggestions
/// instead of the whole catalog.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.category.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products in `category`, or every product when no category is selected.
#[must_use]
pub fn filter_by_category<'a>(
    products: &'a [Product],
    category: Option<&CategoryId>,
) -> Vec<&'a Product> {
    match category {
        Some(id) => products
            .iter()
            .filter(|product| &product.category.id == id)
            .collect(),
        None => products.iter().collect(),
    }
}

/// Category chip behavior: pressing the selected category clears the selection.
#[must_use]
pub fn toggle_category(selected: Option<&CategoryId>, pressed: &CategoryId) -> Option<CategoryId> {
    if selected == Some(pressed) {
        None
    } else {
        Some(pressed.clone())
    }
}
