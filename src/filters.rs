//! Query-string to where-clause assembly for the list routes.
//!
//! Each present, non-empty parameter contributes exactly one predicate to a
//! top-level `and`. The free-text `search` parameter becomes a single `or` over
//! the collection's text fields.

use crate::framework::{FindArgs, Operator, Sort, Where};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_SORT: &str = "-createdAt";

const POST_SEARCH_FIELDS: [&str; 3] = ["title", "content", "excerpt"];
const PRODUCT_SEARCH_FIELDS: [&str; 2] = ["name", "description"];

/// Query parameters of `GET /api/examples/posts`. Kept as raw strings so a bad
/// value falls back to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    #[serde(flatten)]
    pub paging: PageQuery,
}

/// Query parameters of `GET /api/examples/products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub in_stock: Option<String>,
    pub featured: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    #[serde(flatten)]
    pub paging: PageQuery,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn flag(value: &str) -> Value {
    Value::Bool(value == "true")
}

fn search(fields: &[&str], needle: &str) -> Where {
    Where::Or(fields.iter().map(|f| Where::contains(*f, needle)).collect())
}

fn price(value: &str) -> Option<Value> {
    let parsed: f64 = value.trim().parse().ok()?;
    serde_json::Number::from_f64(parsed).map(Value::Number)
}

impl PostListQuery {
    pub fn filter(&self) -> Where {
        let mut preds = Vec::new();
        if let Some(category) = present(&self.category) {
            preds.push(Where::equals("category", category));
        }
        if let Some(status) = present(&self.status) {
            preds.push(Where::equals("status", status));
        }
        if let Some(featured) = present(&self.featured) {
            preds.push(Where::equals("featured", flag(featured)));
        }
        if let Some(author) = present(&self.author) {
            preds.push(Where::equals("author", author));
        }
        if let Some(tag) = present(&self.tag) {
            preds.push(Where::equals("tags", tag));
        }
        if let Some(needle) = present(&self.search) {
            preds.push(search(&POST_SEARCH_FIELDS, needle));
        }
        Where::And(preds)
    }
}

impl ProductListQuery {
    pub fn filter(&self) -> Where {
        let mut preds = Vec::new();
        if let Some(category) = present(&self.category) {
            preds.push(Where::equals("category", category));
        }
        if let Some(in_stock) = present(&self.in_stock) {
            preds.push(Where::equals("inStock", flag(in_stock)));
        }
        if let Some(featured) = present(&self.featured) {
            preds.push(Where::equals("featured", flag(featured)));
        }
        if let Some(needle) = present(&self.search) {
            preds.push(search(&PRODUCT_SEARCH_FIELDS, needle));
        }
        if let Some(min) = present(&self.min_price).and_then(price) {
            preds.push(Where::field("price", Operator::GreaterThanEqual(min)));
        }
        if let Some(max) = present(&self.max_price).and_then(price) {
            preds.push(Where::field("price", Operator::LessThanEqual(max)));
        }
        Where::And(preds)
    }
}

/// Parses a positive integer, falling back to `default` on absence, garbage or zero.
pub fn positive_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    pub fn sort(&self) -> Option<Sort> {
        present(&self.sort)
            .and_then(Sort::parse)
            .or_else(|| Sort::parse(DEFAULT_SORT))
    }

    /// `find` arguments for `filter`; list routes always include drafts.
    pub fn find_args(&self, filter: Where) -> FindArgs {
        FindArgs::new()
            .filter(filter)
            .sort(self.sort())
            .page(self.page())
            .limit(self.limit())
            .draft(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("0"), 1)]
    #[case(Some("-2"), 1)]
    #[case(Some("1.5"), 1)]
    #[case(Some("3"), 3)]
    fn page_falls_back_to_default(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(positive_or(raw, DEFAULT_PAGE), expected);
    }

    #[rstest]
    fn sort_defaults_to_newest_first() {
        assert_eq!(PageQuery::default().sort(), Some(Sort::desc("createdAt")));
        let query = PageQuery {
            sort: Some("title".into()),
            ..Default::default()
        };
        assert_eq!(query.sort(), Some(Sort::asc("title")));
    }

    #[rstest]
    fn post_search_is_one_or_clause() {
        let query = PostListQuery {
            category: Some("design".into()),
            search: Some("rust".into()),
            ..Default::default()
        };
        assert_eq!(
            query.filter(),
            Where::And(vec![
                Where::equals("category", "design"),
                Where::Or(vec![
                    Where::contains("title", "rust"),
                    Where::contains("content", "rust"),
                    Where::contains("excerpt", "rust"),
                ]),
            ])
        );
    }

    #[rstest]
    fn price_bounds_are_inclusive_and_garbage_is_dropped() {
        let query = ProductListQuery {
            min_price: Some("10".into()),
            max_price: Some("cheap".into()),
            in_stock: Some("yes".into()),
            ..Default::default()
        };
        assert_eq!(
            query.filter(),
            Where::And(vec![
                Where::equals("inStock", false),
                Where::field("price", Operator::GreaterThanEqual(serde_json::json!(10.0))),
            ])
        );
    }

    fn opt() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop_oneof![Just(String::new()), "[a-z]{1,8}"])
    }

    proptest! {
        #[test]
        fn prop_one_predicate_per_present_post_param(
            category in opt(), status in opt(), featured in opt(),
            author in opt(), tag in opt(), search in opt(),
        ) {
            let query = PostListQuery {
                category, status, featured, author, tag, search,
                paging: PageQuery::default(),
            };
            let expected = [
                &query.category, &query.status, &query.featured,
                &query.author, &query.tag, &query.search,
            ]
            .iter()
            .filter(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
            .count();
            let filter = query.filter();
            prop_assert_eq!(filter.predicates().len(), expected);
            let ors = filter.predicates().iter().filter(|p| matches!(p, Where::Or(_))).count();
            prop_assert!(ors <= 1);
        }

        #[test]
        fn prop_non_numeric_paging_uses_defaults(page in "[a-z]{0,6}", limit in "[a-z]{0,6}") {
            let paging = PageQuery { page: Some(page), limit: Some(limit), sort: None };
            prop_assert_eq!(paging.page(), DEFAULT_PAGE);
            prop_assert_eq!(paging.limit(), DEFAULT_LIMIT);
        }
    }
}
