use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::str::FromStr;
use uuid::Uuid;

use super::schema::{FieldDef, FieldKind, Relation, ResourceSchema};
use crate::domain::query::{
    Condition, FilterSpec, PopulateSpec, Projection, QueryError, SortDirection, SortSpec,
};
use crate::domain::repositories::{FindOptions, RepositoryError, ResourceCollection};

/// Alias of the listed table
const ROOT: &str = "t";
/// Alias of a populated table
const RELATED: &str = "r";
/// `to_char` pattern for `2024-01-02T03:04:05.150720Z`
const TIMESTAMP_FORMAT: &str = r#"YYYY-MM-DD"T"HH24:MI:SS.US"Z""#;

/// PostgreSQL implementation of ResourceCollection
///
/// Each record is rendered as a `jsonb` document keyed by the schema's public
/// field names, so projection and population happen inside the query.
pub struct PostgresCollection {
    pool: PgPool,
    schema: &'static ResourceSchema,
}

impl PostgresCollection {
    /// Creates a collection over the table described by `schema`
    pub fn new(pool: PgPool, schema: &'static ResourceSchema) -> Self {
        Self { pool, schema }
    }
}

#[async_trait]
impl ResourceCollection for PostgresCollection {
    async fn count(&self, filter: &FilterSpec) -> Result<u64, RepositoryError> {
        let mut query = count_query(self.schema, filter)?;
        let (count,): (i64,) = query.build_query_as().fetch_one(&self.pool).await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find(&self, options: &FindOptions<'_>) -> Result<Vec<Value>, RepositoryError> {
        let mut query = find_query(self.schema, options)?;
        let rows: Vec<(Value,)> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|(document,)| document).collect())
    }
}

/// Builds `SELECT COUNT(*) ... WHERE <filter>`
pub fn count_query(
    schema: &ResourceSchema,
    filter: &FilterSpec,
) -> Result<QueryBuilder<'static, Postgres>, QueryError> {
    let mut query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} {ROOT}", schema.table));
    push_filter(&mut query, schema, filter)?;
    Ok(query)
}

/// Builds the page query: document, filter, order and window
pub fn find_query(
    schema: &ResourceSchema,
    options: &FindOptions<'_>,
) -> Result<QueryBuilder<'static, Postgres>, QueryError> {
    let document = document_sql(schema, options.projection, options.populate)?;
    let mut query = QueryBuilder::new(format!(
        "SELECT {document} AS doc FROM {} {ROOT}",
        schema.table
    ));

    push_filter(&mut query, schema, options.filter)?;
    push_order(&mut query, schema, options.sort)?;

    query
        .push(" LIMIT ")
        .push_bind(i64::try_from(options.take).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(options.skip).unwrap_or(i64::MAX));

    Ok(query)
}

fn document_sql(
    schema: &ResourceSchema,
    projection: Option<&Projection>,
    populate: Option<&PopulateSpec>,
) -> Result<String, QueryError> {
    if let Some(projection) = projection {
        if let Some(unknown) = projection.fields().iter().find(|f| !schema.knows(f)) {
            return Err(QueryError::UnknownField(unknown.clone()));
        }
    }

    let populated = populate
        .map(|spec| schema.relation(&spec.path).map(|relation| (relation, spec)))
        .transpose()?;
    let wanted = |name: &str| projection.map_or(true, |p| p.includes(name));

    let mut entries: Vec<(&str, String)> = Vec::with_capacity(schema.fields.len() + 1);
    for field in schema.fields.iter().filter(|field| wanted(field.name)) {
        let value = match populated {
            Some((
                Relation::BelongsTo {
                    path,
                    column,
                    target,
                },
                spec,
            )) if *path == field.name => format!(
                "(SELECT {} FROM {} {RELATED} WHERE {RELATED}.id = {ROOT}.{column})",
                related_document(target, spec)?,
                target.table,
            ),
            _ => column_sql(field, ROOT),
        };
        entries.push((field.name, value));
    }

    if let Some((
        Relation::HasMany {
            path,
            foreign_column,
            target,
        },
        spec,
    )) = populated
    {
        if wanted(*path) {
            entries.push((
                *path,
                format!(
                    "COALESCE((SELECT jsonb_agg({} ORDER BY {RELATED}.created_at) \
                     FROM {} {RELATED} WHERE {RELATED}.{foreign_column} = {ROOT}.id), '[]'::jsonb)",
                    related_document(target, spec)?,
                    target.table,
                ),
            ));
        }
    }

    Ok(json_object(&entries))
}

/// Renders a populated record, restricted to the populate selection
fn related_document(target: &ResourceSchema, spec: &PopulateSpec) -> Result<String, QueryError> {
    let fields: Vec<&FieldDef> = match &spec.select {
        None => target.fields.iter().collect(),
        Some(select) => {
            let mut fields = vec![target.field("id")?];
            for name in select {
                let field = target.field(name)?;
                if field.name != "id" {
                    fields.push(field);
                }
            }
            fields
        }
    };

    let entries: Vec<(&str, String)> = fields
        .into_iter()
        .map(|field| (field.name, column_sql(field, RELATED)))
        .collect();

    Ok(json_object(&entries))
}

/// Renders a column inside a document; timestamps match the entity serializer
fn column_sql(field: &FieldDef, alias: &str) -> String {
    match field.kind {
        FieldKind::Timestamp => format!(
            "to_char({alias}.{} AT TIME ZONE 'UTC', '{TIMESTAMP_FORMAT}')",
            field.column
        ),
        _ => format!("{alias}.{}", field.column),
    }
}

fn json_object(entries: &[(&str, String)]) -> String {
    let pairs: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("'{key}', {value}"))
        .collect();
    format!("jsonb_build_object({})", pairs.join(", "))
}

fn push_filter(
    query: &mut QueryBuilder<'static, Postgres>,
    schema: &ResourceSchema,
    filter: &FilterSpec,
) -> Result<(), QueryError> {
    for (index, clause) in filter.clauses().iter().enumerate() {
        let field = schema.field(&clause.field)?;
        query.push(if index == 0 { " WHERE " } else { " AND " });
        push_condition(query, field, &clause.condition)?;
    }
    Ok(())
}

fn push_condition(
    query: &mut QueryBuilder<'static, Postgres>,
    field: &FieldDef,
    condition: &Condition,
) -> Result<(), QueryError> {
    let column = match field.kind {
        FieldKind::Enum => format!("{ROOT}.{}::text", field.column),
        _ => format!("{ROOT}.{}", field.column),
    };

    let (operator, raw) = match condition {
        // arrays match when they contain the value or share a member
        Condition::Equals(value) if field.kind == FieldKind::TextArray => {
            query
                .push_bind(value.clone())
                .push(format!(" = ANY({column})"));
            return Ok(());
        }
        Condition::In(values) if field.kind == FieldKind::TextArray => {
            query.push(format!("{column} && ")).push_bind(values.clone());
            return Ok(());
        }
        Condition::In(values) => {
            query.push(format!("{column} = ANY("));
            push_bind_list(query, field, values)?;
            query.push(")");
            return Ok(());
        }
        Condition::Equals(value) => ("=", value),
        Condition::LessThan(value) => ("<", value),
        Condition::LessOrEqual(value) => ("<=", value),
        Condition::GreaterThan(value) => (">", value),
        Condition::GreaterOrEqual(value) => (">=", value),
    };

    if operator != "=" && matches!(field.kind, FieldKind::TextArray | FieldKind::Boolean) {
        return Err(QueryError::UnsupportedOperator {
            field: field.name.to_string(),
            operator: condition.operator(),
        });
    }

    query.push(format!("{column} {operator} "));
    push_bind_value(query, field, raw)
}

fn push_bind_value(
    query: &mut QueryBuilder<'static, Postgres>,
    field: &FieldDef,
    raw: &str,
) -> Result<(), QueryError> {
    match field.kind {
        FieldKind::Id => {
            query.push_bind(parse::<Uuid>(field, raw)?);
        }
        FieldKind::Text | FieldKind::Enum | FieldKind::TextArray => {
            query.push_bind(raw.to_string());
        }
        FieldKind::Number => {
            query.push_bind(parse::<f64>(field, raw)?);
        }
        FieldKind::Boolean => {
            query.push_bind(parse::<bool>(field, raw)?);
        }
        FieldKind::Timestamp => {
            query.push_bind(parse_timestamp(field, raw)?);
        }
    }
    Ok(())
}

fn push_bind_list(
    query: &mut QueryBuilder<'static, Postgres>,
    field: &FieldDef,
    values: &[String],
) -> Result<(), QueryError> {
    match field.kind {
        FieldKind::Id => {
            query.push_bind(parse_all::<Uuid>(field, values)?);
        }
        FieldKind::Text | FieldKind::Enum | FieldKind::TextArray => {
            query.push_bind(values.to_vec());
        }
        FieldKind::Number => {
            query.push_bind(parse_all::<f64>(field, values)?);
        }
        FieldKind::Boolean => {
            query.push_bind(parse_all::<bool>(field, values)?);
        }
        FieldKind::Timestamp => {
            let timestamps = values
                .iter()
                .map(|raw| parse_timestamp(field, raw))
                .collect::<Result<Vec<_>, _>>()?;
            query.push_bind(timestamps);
        }
    }
    Ok(())
}

fn push_order(
    query: &mut QueryBuilder<'static, Postgres>,
    schema: &ResourceSchema,
    sort: &SortSpec,
) -> Result<(), QueryError> {
    query.push(" ORDER BY ");
    for key in sort.keys() {
        let field = schema.field(&key.field)?;
        let direction = match key.direction {
            SortDirection::Ascending => "ASC NULLS FIRST",
            SortDirection::Descending => "DESC NULLS LAST",
        };
        query.push(format!("{ROOT}.{} {direction}, ", field.column));
    }
    // id breaks ties so pages never overlap
    query.push(format!("{ROOT}.id ASC"));
    Ok(())
}

fn invalid(field: &FieldDef, raw: &str) -> QueryError {
    QueryError::InvalidValue {
        field: field.name.to_string(),
        value: raw.to_string(),
    }
}

fn parse<T: FromStr>(field: &FieldDef, raw: &str) -> Result<T, QueryError> {
    raw.trim().parse().map_err(|_| invalid(field, raw))
}

fn parse_all<T: FromStr>(field: &FieldDef, values: &[String]) -> Result<Vec<T>, QueryError> {
    values.iter().map(|raw| parse(field, raw)).collect()
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
fn parse_timestamp(field: &FieldDef, raw: &str) -> Result<DateTime<Utc>, QueryError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid(field, raw))
}
