use super::errors::QueryError;
use super::filter::FilterSpec;
use super::pagination::PageRequest;
use super::projection::Projection;
use super::sort::SortSpec;

/// Query-string keys consumed by the paginator instead of the filter
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "limit", "page"];

/// A fully parsed list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    pub filter: FilterSpec,
    pub projection: Option<Projection>,
    pub sort: SortSpec,
    pub page: PageRequest,
}

impl ResourceQuery {
    /// Splits raw query-string pairs into reserved directives and filter conditions
    ///
    /// When a reserved key is repeated the first occurrence wins.
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::query::ResourceQuery;
    ///
    /// let pairs = vec![
    ///     ("careers".to_string(), "Business".to_string()),
    ///     ("select".to_string(), "name".to_string()),
    ///     ("page".to_string(), "2".to_string()),
    /// ];
    /// let query = ResourceQuery::from_pairs(&pairs).unwrap();
    ///
    /// assert_eq!(query.filter.clauses().len(), 1);
    /// assert_eq!(query.page.page(), 2);
    /// assert!(query.projection.unwrap().includes("name"));
    /// ```
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        let reserved = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.as_str())
        };

        let filter = FilterSpec::from_pairs(
            pairs
                .iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )?;

        Ok(Self {
            filter,
            projection: reserved("select").and_then(Projection::parse),
            sort: reserved("sort").map(SortSpec::parse).unwrap_or_default(),
            page: PageRequest::parse(reserved("page"), reserved("limit")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{Condition, SortDirection};

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_params_uses_all_defaults() {
        let query = ResourceQuery::from_pairs(&[]).unwrap();

        assert!(query.filter.is_empty());
        assert!(query.projection.is_none());
        assert_eq!(query.sort, SortSpec::default());
        assert_eq!(query.page, PageRequest::default());
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let query = ResourceQuery::from_pairs(&pairs(&[
            ("select", "name,careers"),
            ("sort", "name"),
            ("limit", "5"),
            ("page", "2"),
            ("averageCost[lte]", "10000"),
        ]))
        .unwrap();

        assert_eq!(query.filter.clauses().len(), 1);
        assert_eq!(query.filter.clauses()[0].field, "averageCost");
        assert_eq!(
            query.filter.clauses()[0].condition,
            Condition::LessOrEqual("10000".to_string())
        );
        assert_eq!(query.projection.unwrap().fields(), &["name", "careers"]);
        assert_eq!(query.sort.keys()[0].direction, SortDirection::Ascending);
        assert_eq!(query.page, PageRequest::new(2, 5));
    }

    #[test]
    fn non_numeric_page_is_ignored() {
        let query = ResourceQuery::from_pairs(&pairs(&[("page", "abc")])).unwrap();
        assert_eq!(query.page, PageRequest::default());
    }

    #[test]
    fn first_reserved_value_wins() {
        let query =
            ResourceQuery::from_pairs(&pairs(&[("page", "3"), ("page", "9")])).unwrap();
        assert_eq!(query.page.page(), 3);
    }

    #[test]
    fn filter_errors_propagate() {
        let result = ResourceQuery::from_pairs(&pairs(&[("rating[near]", "5")]));
        assert!(matches!(result, Err(QueryError::UnknownOperator { .. })));
    }
}
