use super::errors::QueryError;

/// A single condition applied to one field
///
/// Values stay as the raw strings received from the client. Collections
/// coerce them to the field's type when the condition is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(String),
    LessThan(String),
    LessOrEqual(String),
    GreaterThan(String),
    GreaterOrEqual(String),
    In(Vec<String>),
}

impl Condition {
    /// Builds a comparison condition from a bracket operator (`lt`, `lte`, `gt`, `gte`)
    ///
    /// Returns `None` for anything that is not a comparison keyword.
    fn comparison(operator: &str, value: String) -> Option<Self> {
        match operator {
            "lt" => Some(Condition::LessThan(value)),
            "lte" => Some(Condition::LessOrEqual(value)),
            "gt" => Some(Condition::GreaterThan(value)),
            "gte" => Some(Condition::GreaterOrEqual(value)),
            _ => None,
        }
    }

    /// Returns the query-string keyword for this condition
    pub fn operator(&self) -> &'static str {
        match self {
            Condition::Equals(_) => "eq",
            Condition::LessThan(_) => "lt",
            Condition::LessOrEqual(_) => "lte",
            Condition::GreaterThan(_) => "gt",
            Condition::GreaterOrEqual(_) => "gte",
            Condition::In(_) => "in",
        }
    }
}

/// A condition bound to a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub condition: Condition,
}

/// Conjunction of field conditions
///
/// # Parsing rules
/// - `field=v` is `Equals(v)`; repeating the key turns it into `In` of every value
/// - `field[lt|lte|gt|gte]=v` is the matching comparison
/// - `field[in]=a,b` is `In([a, b])`; repeated `[in]` keys are merged
/// - several operators on one field are all applied
///
/// # Example
/// ```
/// use devcamper_api::domain::query::{Condition, FilterSpec};
///
/// let filter = FilterSpec::from_pairs([("tuition[gte]", "1000")]).unwrap();
/// assert_eq!(filter.clauses()[0].field, "tuition");
/// assert_eq!(filter.clauses()[0].condition, Condition::GreaterOrEqual("1000".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    clauses: Vec<FieldFilter>,
}

impl FilterSpec {
    /// Creates an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition on `field`
    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.push(field, condition);
        self
    }

    /// Adds a condition on `field` in place
    pub fn push(&mut self, field: impl Into<String>, condition: Condition) {
        self.clauses.push(FieldFilter {
            field: field.into(),
            condition,
        });
    }

    pub fn clauses(&self) -> &[FieldFilter] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Parses filter pairs (reserved keys must already be removed)
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, QueryError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut filter = FilterSpec::new();
        // first-seen order keeps the generated SQL stable
        let mut equals: Vec<(String, Vec<String>)> = Vec::new();
        let mut members: Vec<(String, Vec<String>)> = Vec::new();

        for (key, value) in pairs {
            let (field, operator) = split_key(key.as_ref())?;
            let value = value.as_ref();

            match operator {
                None => append(&mut equals, field, vec![value.to_string()]),
                Some("in") => append(&mut members, field, split_list(value)),
                Some(operator) => {
                    let condition = Condition::comparison(operator, value.to_string())
                        .ok_or_else(|| QueryError::UnknownOperator {
                            field: field.to_string(),
                            operator: operator.to_string(),
                        })?;
                    filter.push(field, condition);
                }
            }
        }

        for (field, mut values) in equals {
            let condition = if values.len() == 1 {
                Condition::Equals(values.remove(0))
            } else {
                Condition::In(values)
            };
            filter.push(field, condition);
        }

        for (field, values) in members {
            filter.push(field, Condition::In(values));
        }

        Ok(filter)
    }
}

/// Splits `field[op]` into its field and operator parts
fn split_key(key: &str) -> Result<(&str, Option<&str>), QueryError> {
    let malformed = || QueryError::MalformedKey(key.to_string());

    let (field, operator) = match key.find('[') {
        None => (key, None),
        Some(open) => {
            let operator = key[open + 1..].strip_suffix(']').ok_or_else(malformed)?;
            if operator.is_empty() || operator.contains(['[', ']']) {
                return Err(malformed());
            }
            (&key[..open], Some(operator))
        }
    };

    if field.is_empty() {
        return Err(malformed());
    }

    Ok((field, operator))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn append(groups: &mut Vec<(String, Vec<String>)>, field: &str, values: Vec<String>) {
    match groups.iter_mut().find(|(name, _)| name == field) {
        Some((_, existing)) => existing.extend(values),
        None => groups.push((field.to_string(), values)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> FilterSpec {
        FilterSpec::from_pairs(pairs.iter().copied()).expect("valid filter")
    }

    #[test]
    fn plain_key_is_equality() {
        let filter = parse(&[("careers", "Web Development")]);

        assert_eq!(
            filter.clauses(),
            &[FieldFilter {
                field: "careers".to_string(),
                condition: Condition::Equals("Web Development".to_string()),
            }]
        );
    }

    #[test]
    fn bracket_operators_map_to_comparisons() {
        let filter = parse(&[
            ("tuition[lt]", "1"),
            ("tuition[lte]", "2"),
            ("tuition[gt]", "3"),
            ("tuition[gte]", "4"),
        ]);

        let operators: Vec<_> = filter
            .clauses()
            .iter()
            .map(|clause| clause.condition.operator())
            .collect();
        assert_eq!(operators, vec!["lt", "lte", "gt", "gte"]);
        assert!(filter.clauses().iter().all(|c| c.field == "tuition"));
    }

    #[test]
    fn in_operator_splits_commas_and_merges_repeats() {
        let filter = parse(&[
            ("minimumSkill[in]", "beginner, intermediate"),
            ("minimumSkill[in]", "advanced"),
        ]);

        assert_eq!(
            filter.clauses()[0].condition,
            Condition::In(vec![
                "beginner".to_string(),
                "intermediate".to_string(),
                "advanced".to_string()
            ])
        );
    }

    #[test]
    fn repeated_plain_key_becomes_membership() {
        let filter = parse(&[("housing", "true"), ("housing", "false")]);

        assert_eq!(filter.clauses().len(), 1);
        assert_eq!(
            filter.clauses()[0].condition,
            Condition::In(vec!["true".to_string(), "false".to_string()])
        );
    }

    #[test]
    fn keyword_values_are_not_rewritten() {
        // a literal "gte" or "in" is just a value
        let filter = parse(&[("title", "gte"), ("weeks", "in")]);

        assert_eq!(filter.clauses()[0].condition, Condition::Equals("gte".into()));
        assert_eq!(filter.clauses()[1].condition, Condition::Equals("in".into()));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let result = FilterSpec::from_pairs([("tuition[between]", "1")]);

        assert_eq!(
            result.unwrap_err(),
            QueryError::UnknownOperator {
                field: "tuition".to_string(),
                operator: "between".to_string(),
            }
        );
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["[gte]", "tuition[gte", "tuition[]", "tuition[g[t]]"] {
            let result = FilterSpec::from_pairs([(key, "1")]);
            assert!(
                matches!(result, Err(QueryError::MalformedKey(_))),
                "{key} should be malformed"
            );
        }
    }

    #[test]
    fn empty_pairs_match_everything() {
        let filter = FilterSpec::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert!(filter.is_empty());
    }
}
