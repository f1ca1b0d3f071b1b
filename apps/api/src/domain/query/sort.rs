/// Sort direction for a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A field and the direction to order it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Ordered sort keys, highest priority first
///
/// Parsed from a comma separated list where a leading `-` means descending,
/// e.g. `-createdAt,name`. Defaults to newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Field used when no sort is requested
    pub const DEFAULT_FIELD: &'static str = "createdAt";

    /// Parses a sort directive, falling back to the default when it names no fields
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::query::{SortDirection, SortSpec};
    ///
    /// let sort = SortSpec::parse("-createdAt,name");
    /// assert_eq!(sort.keys()[0].direction, SortDirection::Descending);
    /// assert_eq!(sort.keys()[1].field, "name");
    /// ```
    pub fn parse(raw: &str) -> Self {
        let keys: Vec<SortKey> = raw
            .split(',')
            .map(str::trim)
            .filter_map(|segment| match segment.strip_prefix('-') {
                Some(field) if !field.is_empty() => Some(SortKey {
                    field: field.to_string(),
                    direction: SortDirection::Descending,
                }),
                Some(_) => None,
                None if segment.is_empty() => None,
                None => Some(SortKey {
                    field: segment.to_string(),
                    direction: SortDirection::Ascending,
                }),
            })
            .collect();

        if keys.is_empty() {
            Self::default()
        } else {
            Self { keys }
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            keys: vec![SortKey {
                field: Self::DEFAULT_FIELD.to_string(),
                direction: SortDirection::Descending,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_newest_first() {
        let sort = SortSpec::default();

        assert_eq!(sort.keys().len(), 1);
        assert_eq!(sort.keys()[0].field, "createdAt");
        assert_eq!(sort.keys()[0].direction, SortDirection::Descending);
    }

    #[test]
    fn parses_keys_in_priority_order() {
        let sort = SortSpec::parse("-createdAt,name");

        assert_eq!(
            sort.keys(),
            &[
                SortKey {
                    field: "createdAt".to_string(),
                    direction: SortDirection::Descending,
                },
                SortKey {
                    field: "name".to_string(),
                    direction: SortDirection::Ascending,
                },
            ]
        );
    }

    #[test]
    fn empty_directive_falls_back_to_default() {
        assert_eq!(SortSpec::parse(""), SortSpec::default());
        assert_eq!(SortSpec::parse(" , -"), SortSpec::default());
    }
}
