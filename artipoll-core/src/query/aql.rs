//! Builder for Artifactory Query Language (AQL) item searches.

use std::fmt;

use serde_json::{Map, Value};

/// Predicate applied to one item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Field equals the value exactly.
    Equals(String),
    /// Field matches a glob pattern (`*` and `?` wildcards).
    Match(String),
}

impl Criterion {
    fn to_value(&self) -> Value {
        match self {
            Criterion::Equals(value) => Value::String(value.clone()),
            Criterion::Match(pattern) => {
                let mut inner = Map::new();
                inner.insert("$match".to_string(), Value::String(pattern.clone()));
                Value::Object(inner)
            }
        }
    }
}

/// An `items.find(...)` query whose criteria are ANDed in insertion order.
///
/// Renders as
/// `items.find({"$and":[{"repo":"r"},{"name":{"$match":"*deb"}}]}).include("path","repo","name")`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AqlQuery {
    criteria: Vec<(String, Criterion)>,
    includes: Vec<String>,
}

impl AqlQuery {
    /// Starts an item search.
    pub fn items() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria
            .push((field.into(), Criterion::Equals(value.into())));
        self
    }

    /// Requires `field` to match the glob `pattern`.
    pub fn matches(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.criteria
            .push((field.into(), Criterion::Match(pattern.into())));
        self
    }

    /// Selects the fields returned for each item.
    pub fn include(mut self, fields: &[&str]) -> Self {
        self.includes.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Returns the first criterion on `field`.
    pub fn criterion(&self, field: &str) -> Option<&Criterion> {
        self.criteria
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, criterion)| criterion)
    }

    /// Renders the query text sent to the search API.
    pub fn to_aql(&self) -> String {
        let clauses: Vec<Value> = self
            .criteria
            .iter()
            .map(|(field, criterion)| {
                let mut clause = Map::new();
                clause.insert(field.clone(), criterion.to_value());
                Value::Object(clause)
            })
            .collect();

        let mut filter = Map::new();
        filter.insert("$and".to_string(), Value::Array(clauses));

        let mut aql = format!("items.find({})", Value::Object(filter));
        if !self.includes.is_empty() {
            let fields: Vec<String> = self
                .includes
                .iter()
                .map(|f| Value::String(f.clone()).to_string())
                .collect();
            aql.push_str(&format!(".include({})", fields.join(",")));
        }
        aql
    }
}

impl fmt::Display for AqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_aql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_query() {
        let query = AqlQuery::items()
            .equals("repo", "debian-local")
            .matches("name", "*deb")
            .matches("path", "org/team/app*")
            .include(&["path", "repo", "name"]);

        assert_eq!(
            query.to_aql(),
            r#"items.find({"$and":[{"repo":"debian-local"},{"name":{"$match":"*deb"}},{"path":{"$match":"org/team/app*"}}]}).include("path","repo","name")"#
        );
    }

    #[test]
    fn test_values_are_json_escaped() {
        let query = AqlQuery::items().equals("repo", "we\"ird");
        assert_eq!(query.to_string(), r#"items.find({"$and":[{"repo":"we\"ird"}]})"#);
    }

    #[test]
    fn test_criterion_lookup() {
        let query = AqlQuery::items().matches("path", "a/b/1.0");
        assert_eq!(
            query.criterion("path"),
            Some(&Criterion::Match("a/b/1.0".to_string()))
        );
        assert!(query.criterion("repo").is_none());
    }
}
