//! # Queries
//!
//! Where clauses, sort specifications and `find` arguments understood by the
//! [`CollectionActor`](crate::framework::CollectionActor).
//!
//! A where clause is evaluated against a document's JSON form. It serializes to the
//! store's JSON filter shape, e.g.
//!
//! ```text
//! {"and":[{"category":{"equals":"technology"}},{"or":[{"title":{"contains":"rust"}}]}]}
//! ```

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::fmt::Display;

/// Comparison applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Equals(Value),
    NotEquals(Value),
    /// Case-insensitive substring match.
    Contains(String),
    /// Case-insensitive match of every whitespace-separated word.
    Like(String),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    GreaterThan(Value),
    GreaterThanEqual(Value),
    LessThan(Value),
    LessThanEqual(Value),
    Exists(bool),
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equals(_) => "equals",
            Operator::NotEquals(_) => "not_equals",
            Operator::Contains(_) => "contains",
            Operator::Like(_) => "like",
            Operator::In(_) => "in",
            Operator::NotIn(_) => "not_in",
            Operator::GreaterThan(_) => "greater_than",
            Operator::GreaterThanEqual(_) => "greater_than_equal",
            Operator::LessThan(_) => "less_than",
            Operator::LessThanEqual(_) => "less_than_equal",
            Operator::Exists(_) => "exists",
        }
    }

    fn operand(&self) -> Value {
        match self {
            Operator::Equals(v)
            | Operator::NotEquals(v)
            | Operator::GreaterThan(v)
            | Operator::GreaterThanEqual(v)
            | Operator::LessThan(v)
            | Operator::LessThanEqual(v) => v.clone(),
            Operator::Contains(s) | Operator::Like(s) => Value::String(s.clone()),
            Operator::In(vs) | Operator::NotIn(vs) => Value::Array(vs.clone()),
            Operator::Exists(b) => Value::Bool(*b),
        }
    }
}

/// A structured filter: field predicates combined with AND/OR.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    And(Vec<Where>),
    Or(Vec<Where>),
    Field { path: String, op: Operator },
}

impl Default for Where {
    /// The empty conjunction, which matches every document.
    fn default() -> Self {
        Where::And(Vec::new())
    }
}

impl Where {
    pub fn field(path: impl Into<String>, op: Operator) -> Self {
        Where::Field {
            path: path.into(),
            op,
        }
    }

    pub fn equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field(path, Operator::Equals(value.into()))
    }

    pub fn contains(path: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::field(path, Operator::Contains(needle.into()))
    }

    /// Predicates of a top-level conjunction; a lone predicate is returned as-is.
    pub fn predicates(&self) -> &[Where] {
        match self {
            Where::And(preds) => preds,
            other => std::slice::from_ref(other),
        }
    }

    /// True when `doc` satisfies this clause.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Where::And(clauses) => clauses.iter().all(|c| c.matches(doc)),
            Where::Or(clauses) => clauses.iter().any(|c| c.matches(doc)),
            Where::Field { path, op } => field_matches(lookup(doc, path), op),
        }
    }

    /// The store's JSON filter representation.
    pub fn to_value(&self) -> Value {
        match self {
            Where::And(clauses) => json!({ "and": clauses.iter().map(Where::to_value).collect::<Vec<_>>() }),
            Where::Or(clauses) => json!({ "or": clauses.iter().map(Where::to_value).collect::<Vec<_>>() }),
            Where::Field { path, op } => {
                let mut inner = Map::new();
                inner.insert(op.name().to_string(), op.operand());
                let mut outer = Map::new();
                outer.insert(path.clone(), Value::Object(inner));
                Value::Object(outer)
            }
        }
    }
}

impl Serialize for Where {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |current, segment| current.get(segment))
}

fn field_matches(field: Option<&Value>, op: &Operator) -> bool {
    match op {
        Operator::Exists(expected) => field.is_some_and(|v| !v.is_null()) == *expected,
        Operator::Equals(expected) => equals(field, expected),
        Operator::NotEquals(expected) => !equals(field, expected),
        Operator::Contains(needle) => {
            let needle = needle.to_lowercase();
            any_text(field, |text| text.contains(&needle))
        }
        Operator::Like(phrase) => {
            let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
            any_text(field, |text| words.iter().all(|w| text.contains(w.as_str())))
        }
        Operator::In(options) => options.iter().any(|o| equals(field, o)),
        Operator::NotIn(options) => !options.iter().any(|o| equals(field, o)),
        Operator::GreaterThan(bound) => compare(field, bound) == Some(Ordering::Greater),
        Operator::GreaterThanEqual(bound) => {
            matches!(compare(field, bound), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThan(bound) => compare(field, bound) == Some(Ordering::Less),
        Operator::LessThanEqual(bound) => {
            matches!(compare(field, bound), Some(Ordering::Less | Ordering::Equal))
        }
    }
}

fn equals(field: Option<&Value>, expected: &Value) -> bool {
    match field {
        None | Some(Value::Null) => expected.is_null(),
        Some(Value::Array(items)) if !expected.is_array() => {
            items.iter().any(|item| scalar_eq(item, expected))
        }
        Some(value) => scalar_eq(value, expected),
    }
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Lower-cased text of a field (or of each array element) tested with `pred`.
fn any_text(field: Option<&Value>, pred: impl Fn(&str) -> bool) -> bool {
    match field {
        Some(Value::String(s)) => pred(&s.to_lowercase()),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| pred(&s.to_lowercase())),
        _ => false,
    }
}

fn compare(field: Option<&Value>, bound: &Value) -> Option<Ordering> {
    compare_values(field?, bound)
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Sort order for `find`, written `field` (ascending) or `-field` (descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses `title` / `-createdAt`. Returns `None` for an empty spec.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        match spec.strip_prefix('-') {
            Some("") => None,
            Some(field) => Some(Self::desc(field)),
            None if spec.is_empty() => None,
            None => Some(Self::asc(spec)),
        }
    }

    /// Orders two documents by the sort field. Missing values sort last.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let left = lookup(a, &self.field).filter(|v| !v.is_null());
        let right = lookup(b, &self.field).filter(|v| !v.is_null());
        let ordering = match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Arguments of a `find` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FindArgs {
    pub filter: Where,
    pub sort: Option<Sort>,
    pub page: u32,
    /// Page size; `0` returns every matching document on a single page.
    pub limit: u32,
    /// Include draft documents.
    pub draft: bool,
}

impl Default for FindArgs {
    fn default() -> Self {
        Self {
            filter: Where::default(),
            sort: None,
            page: 1,
            limit: 10,
            draft: false,
        }
    }
}

impl FindArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Value {
        json!({
            "title": "Getting Started with Rust",
            "content": "Ownership and borrowing",
            "category": "technology",
            "featured": true,
            "readTime": 7,
            "tags": ["rust", "systems"],
            "excerpt": null
        })
    }

    #[test]
    fn empty_conjunction_matches_everything() {
        assert!(Where::default().matches(&post()));
        assert!(!Where::Or(vec![]).matches(&post()));
    }

    #[test]
    fn equals_matches_scalars_and_array_elements() {
        assert!(Where::equals("category", "technology").matches(&post()));
        assert!(Where::equals("featured", true).matches(&post()));
        assert!(Where::equals("tags", "rust").matches(&post()));
        assert!(!Where::equals("tags", "go").matches(&post()));
        assert!(Where::equals("readTime", 7.0).matches(&post()));
    }

    #[test]
    fn contains_is_case_insensitive() {
        assert!(Where::contains("title", "RUST").matches(&post()));
        assert!(!Where::contains("excerpt", "rust").matches(&post()));
    }

    #[test]
    fn like_requires_every_word() {
        let hit = Where::field("title", Operator::Like("rust getting".into()));
        let miss = Where::field("title", Operator::Like("rust python".into()));
        assert!(hit.matches(&post()));
        assert!(!miss.matches(&post()));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let doc = json!({ "price": 10.0 });
        assert!(Where::field("price", Operator::GreaterThanEqual(json!(10))).matches(&doc));
        assert!(Where::field("price", Operator::LessThanEqual(json!(10))).matches(&doc));
        assert!(!Where::field("price", Operator::GreaterThan(json!(10))).matches(&doc));
        assert!(!Where::field("missing", Operator::LessThan(json!(10))).matches(&doc));
    }

    #[test]
    fn exists_treats_null_as_absent() {
        assert!(Where::field("excerpt", Operator::Exists(false)).matches(&post()));
        assert!(Where::field("title", Operator::Exists(true)).matches(&post()));
    }

    #[test]
    fn serializes_to_store_filter_shape() {
        let clause = Where::And(vec![
            Where::equals("status", "published"),
            Where::Or(vec![Where::contains("title", "rust")]),
        ]);
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({"and":[{"status":{"equals":"published"}},{"or":[{"title":{"contains":"rust"}}]}]})
        );
    }

    #[test]
    fn sort_parse_and_missing_values_last() {
        assert_eq!(Sort::parse("-createdAt"), Some(Sort::desc("createdAt")));
        assert_eq!(Sort::parse("title"), Some(Sort::asc("title")));
        assert_eq!(Sort::parse(""), None);
        assert_eq!(Sort::parse("-"), None);

        let sort = Sort::desc("price");
        let cheap = json!({"price": 1});
        let dear = json!({"price": 5});
        let unknown = json!({});
        assert_eq!(sort.compare(&dear, &cheap), Ordering::Less);
        assert_eq!(sort.compare(&unknown, &cheap), Ordering::Greater);
    }
}
