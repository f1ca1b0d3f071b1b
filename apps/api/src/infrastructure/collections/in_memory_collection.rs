use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::domain::query::{
    Condition, FilterSpec, PopulateSpec, Projection, QueryError, SortDirection, SortSpec,
};
use crate::domain::query::projection::ID_FIELD;
use crate::domain::repositories::{FindOptions, RepositoryError, ResourceCollection};

enum Related {
    BelongsTo {
        path: String,
        records: Vec<Value>,
    },
    HasMany {
        path: String,
        foreign_key: String,
        records: Vec<Value>,
    },
}

impl Related {
    fn path(&self) -> &str {
        match self {
            Related::BelongsTo { path, .. } | Related::HasMany { path, .. } => path,
        }
    }
}

/// Collection over JSON documents held in memory
///
/// Documents are schemaless: a condition on a field a document lacks simply
/// does not match. Used by tests and by anything that needs the list
/// semantics without a database.
pub struct InMemoryCollection {
    records: Vec<Value>,
    related: Vec<Related>,
}

impl InMemoryCollection {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            related: Vec::new(),
        }
    }

    /// Registers `path` as a field holding the id of one of `records`
    pub fn with_belongs_to(mut self, path: impl Into<String>, records: Vec<Value>) -> Self {
        self.related.push(Related::BelongsTo {
            path: path.into(),
            records,
        });
        self
    }

    /// Registers `path` as the `records` whose `foreign_key` holds a document's id
    pub fn with_has_many(
        mut self,
        path: impl Into<String>,
        foreign_key: impl Into<String>,
        records: Vec<Value>,
    ) -> Self {
        self.related.push(Related::HasMany {
            path: path.into(),
            foreign_key: foreign_key.into(),
            records,
        });
        self
    }

    fn matching<'a>(&'a self, filter: &'a FilterSpec) -> impl Iterator<Item = &'a Value> + 'a {
        self.records
            .iter()
            .filter(move |record| matches_filter(record, filter))
    }

    fn populate(&self, document: &mut Value, spec: &PopulateSpec) -> Result<(), QueryError> {
        let related = self
            .related
            .iter()
            .find(|related| related.path() == spec.path)
            .ok_or_else(|| QueryError::UnknownField(spec.path.clone()))?;
        let select = spec.select.as_deref();

        let Some(object) = document.as_object_mut() else {
            return Ok(());
        };

        match related {
            Related::BelongsTo { path, records } => {
                let Some(id) = object.get(path).cloned() else {
                    return Ok(());
                };
                let target = records
                    .iter()
                    .find(|record| record.get(ID_FIELD) == Some(&id))
                    .map(|record| select_fields(record, select))
                    .unwrap_or(Value::Null);
                object.insert(path.clone(), target);
            }
            Related::HasMany {
                path,
                foreign_key,
                records,
            } => {
                let id = object.get(ID_FIELD).cloned().unwrap_or(Value::Null);
                let children: Vec<Value> = records
                    .iter()
                    .filter(|record| !id.is_null() && record.get(foreign_key) == Some(&id))
                    .map(|record| select_fields(record, select))
                    .collect();
                object.insert(path.clone(), Value::Array(children));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceCollection for InMemoryCollection {
    async fn count(&self, filter: &FilterSpec) -> Result<u64, RepositoryError> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn find(&self, options: &FindOptions<'_>) -> Result<Vec<Value>, RepositoryError> {
        let mut matched: Vec<&Value> = self.matching(options.filter).collect();
        matched.sort_by(|a, b| compare_records(a, b, options.sort));

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(options.take).unwrap_or(usize::MAX);

        let mut page = Vec::with_capacity(take.min(matched.len()));
        for record in matched.into_iter().skip(skip).take(take) {
            let mut document = project(record, options.projection);
            if let Some(spec) = options.populate {
                if options.projection.map_or(true, |p| p.includes(&spec.path)) {
                    self.populate(&mut document, spec)?;
                }
            }
            page.push(document);
        }
        Ok(page)
    }
}

fn matches_filter(record: &Value, filter: &FilterSpec) -> bool {
    filter.clauses().iter().all(|clause| {
        record
            .get(&clause.field)
            .is_some_and(|value| matches_condition(value, &clause.condition))
    })
}

fn matches_condition(value: &Value, condition: &Condition) -> bool {
    // array fields match when any element does
    if let Value::Array(items) = value {
        return items.iter().any(|item| matches_condition(item, condition));
    }

    match condition {
        Condition::Equals(raw) => compare_raw(value, raw) == Some(Ordering::Equal),
        Condition::In(values) => values
            .iter()
            .any(|raw| compare_raw(value, raw) == Some(Ordering::Equal)),
        Condition::LessThan(raw) => compare_raw(value, raw) == Some(Ordering::Less),
        Condition::LessOrEqual(raw) => {
            matches!(compare_raw(value, raw), Some(Ordering::Less | Ordering::Equal))
        }
        Condition::GreaterThan(raw) => compare_raw(value, raw) == Some(Ordering::Greater),
        Condition::GreaterOrEqual(raw) => {
            matches!(compare_raw(value, raw), Some(Ordering::Greater | Ordering::Equal))
        }
    }
}

/// Compares a stored value with a raw query value, coerced to the stored type
fn compare_raw(value: &Value, raw: &str) -> Option<Ordering> {
    match value {
        Value::Number(number) => {
            let raw: f64 = raw.trim().parse().ok()?;
            number.as_f64()?.partial_cmp(&raw)
        }
        Value::Bool(flag) => {
            let raw: bool = raw.trim().parse().ok()?;
            Some(flag.cmp(&raw))
        }
        Value::String(text) => Some(text.as_str().cmp(raw)),
        _ => None,
    }
}

fn compare_records(a: &Value, b: &Value, sort: &SortSpec) -> Ordering {
    for key in sort.keys() {
        let ordering = compare_values(a.get(&key.field), b.get(&key.field));
        let ordering = match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    compare_values(a.get(ID_FIELD), b.get(ID_FIELD))
}

/// Missing and null values sort lowest
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|value| !value.is_null());
    let b = b.filter(|value| !value.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

fn project(record: &Value, projection: Option<&Projection>) -> Value {
    match (projection, record.as_object()) {
        (Some(projection), Some(object)) => Value::Object(
            object
                .iter()
                .filter(|(key, _)| projection.includes(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        _ => record.clone(),
    }
}

fn select_fields(record: &Value, select: Option<&[String]>) -> Value {
    let (Some(select), Some(object)) = (select, record.as_object()) else {
        return record.clone();
    };

    let selected: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() == ID_FIELD || select.iter().any(|s| s == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options<'a>(
        filter: &'a FilterSpec,
        sort: &'a SortSpec,
        projection: Option<&'a Projection>,
        populate: Option<&'a PopulateSpec>,
    ) -> FindOptions<'a> {
        FindOptions {
            filter,
            projection,
            sort,
            skip: 0,
            take: 100,
            populate,
        }
    }

    fn ids(documents: &[Value]) -> Vec<&str> {
        documents
            .iter()
            .map(|document| document["id"].as_str().unwrap_or_default())
            .collect()
    }

    #[test]
    fn numeric_conditions_coerce_the_query_value() {
        let tuition = json!(8000);

        assert!(matches_condition(&tuition, &Condition::GreaterOrEqual("8000".into())));
        assert!(matches_condition(&tuition, &Condition::LessThan("8000.5".into())));
        assert!(!matches_condition(&tuition, &Condition::LessThan("abc".into())));
    }

    #[test]
    fn arrays_match_on_any_element() {
        let careers = json!(["Web Development", "UI/UX"]);

        assert!(matches_condition(&careers, &Condition::Equals("UI/UX".into())));
        assert!(matches_condition(
            &careers,
            &Condition::In(vec!["Business".into(), "Web Development".into()])
        ));
        assert!(!matches_condition(&careers, &Condition::Equals("Business".into())));
    }

    #[tokio::test]
    async fn missing_fields_never_match() {
        let collection = InMemoryCollection::new(vec![json!({"id": "a"}), json!({"id": "b", "housing": true})]);
        let filter = FilterSpec::new().with("housing", Condition::Equals("true".into()));

        assert_eq!(collection.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn nulls_sort_lowest_and_ids_break_ties() {
        let collection = InMemoryCollection::new(vec![
            json!({"id": "c", "averageCost": 5000}),
            json!({"id": "a", "averageCost": null}),
            json!({"id": "b", "averageCost": 5000}),
        ]);
        let filter = FilterSpec::new();

        let ascending = SortSpec::parse("averageCost");
        let found = collection
            .find(&options(&filter, &ascending, None, None))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["a", "b", "c"]);

        let descending = SortSpec::parse("-averageCost");
        let found = collection
            .find(&options(&filter, &descending, None, None))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn belongs_to_replaces_the_id() {
        let collection = InMemoryCollection::new(vec![json!({"id": "c1", "bootcamp": "b1"})])
            .with_belongs_to(
                "bootcamp",
                vec![json!({"id": "b1", "name": "Devworks", "description": "Web", "housing": true})],
            );
        let filter = FilterSpec::new();
        let sort = SortSpec::default();
        let populate = PopulateSpec::path("bootcamp").select(&["name", "description"]);

        let found = collection
            .find(&options(&filter, &sort, None, Some(&populate)))
            .await
            .unwrap();

        assert_eq!(
            found[0]["bootcamp"],
            json!({"id": "b1", "name": "Devworks", "description": "Web"})
        );
    }

    #[tokio::test]
    async fn unknown_populate_path_is_rejected() {
        let collection = InMemoryCollection::new(vec![json!({"id": "a"})]);
        let filter = FilterSpec::new();
        let sort = SortSpec::default();
        let populate = PopulateSpec::path("courses");

        let result = collection
            .find(&options(&filter, &sort, None, Some(&populate)))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Query(QueryError::UnknownField(_)))
        ));
    }
}
