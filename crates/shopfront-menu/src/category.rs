#![forbid(unsafe_code)]

//! Category catalog model.
//!
//! Categories form a two-tier tree: top-level categories may carry
//! sub-categories, and sub-categories are always leaves. The tree is loaded
//! from JSON catalog data and queried by the menu; it is never mutated after
//! load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a category, as found in catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One category node: display name, route slug, optional icon asset, and
/// any sub-categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_categories: Vec<Category>,
}

impl Category {
    /// A leaf category navigates; a branch opens a submenu.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.sub_categories.is_empty()
    }

    /// Route for this category's listing page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/categories/{}", self.slug)
    }
}

/// The loaded catalog tree, queried by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    categories: Vec<Category>,
}

impl CategoryTree {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        let tree = Self { categories };
        tree.warn_on_deep_nesting();
        tree
    }

    /// Parse catalog JSON (an array of category objects).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let categories = serde_json::from_str(json)?;
        Ok(Self::new(categories))
    }

    /// Top-level categories in catalog order.
    #[must_use]
    pub fn top_level(&self) -> &[Category] {
        &self.categories
    }

    /// Find a category anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: &CategoryId) -> Option<&Category> {
        fn walk<'a>(categories: &'a [Category], id: &CategoryId) -> Option<&'a Category> {
            for category in categories {
                if &category.id == id {
                    return Some(category);
                }
                if let Some(found) = walk(&category.sub_categories, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.categories, id)
    }

    /// Sub-categories of the given category, empty for leaves and unknown
    /// ids.
    #[must_use]
    pub fn sub_categories(&self, id: &CategoryId) -> &[Category] {
        self.find(id).map_or(&[], |category| &category.sub_categories)
    }

    /// Whether the category exists and has sub-categories.
    #[must_use]
    pub fn has_sub_categories(&self, id: &CategoryId) -> bool {
        !self.sub_categories(id).is_empty()
    }

    /// The menu renders two screens; deeper nesting is carried in the data
    /// but never reachable, which usually indicates a catalog mistake.
    fn warn_on_deep_nesting(&self) {
        for category in &self.categories {
            for sub in &category.sub_categories {
                if !sub.sub_categories.is_empty() {
                    tracing::warn!(
                        category = %category.id,
                        sub_category = %sub.id,
                        "sub-category has its own children; the menu will not show them"
                    );
                }
            }
        }
    }
}
