use std::fmt;

use crate::domain::query::QueryError;

/// Storage type of an exposed field, used to coerce filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    /// Postgres enum type, compared through its text form
    Enum,
    TextArray,
    /// Integer or floating point column, compared as a double
    Number,
    Boolean,
    Timestamp,
}

/// A field exposed by a list endpoint
#[derive(Debug)]
pub struct FieldDef {
    /// Public (camelCase) name used in query strings and documents
    pub name: &'static str,
    /// Column in the backing table
    pub column: &'static str,
    pub kind: FieldKind,
}

/// A related resource that can be populated
pub enum Relation {
    /// `path` is a field holding the related record's id
    BelongsTo {
        path: &'static str,
        column: &'static str,
        target: &'static ResourceSchema,
    },
    /// Records of `target` whose `foreign_column` references this record
    HasMany {
        path: &'static str,
        foreign_column: &'static str,
        target: &'static ResourceSchema,
    },
}

// schemas reference each other, so only the target's table is printed
impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::BelongsTo { path, column, target } => f
                .debug_struct("BelongsTo")
                .field("path", path)
                .field("column", column)
                .field("target", &target.table)
                .finish(),
            Relation::HasMany {
                path,
                foreign_column,
                target,
            } => f
                .debug_struct("HasMany")
                .field("path", path)
                .field("foreign_column", foreign_column)
                .field("target", &target.table)
                .finish(),
        }
    }
}

impl Relation {
    pub fn path(&self) -> &'static str {
        match self {
            Relation::BelongsTo { path, .. } | Relation::HasMany { path, .. } => *path,
        }
    }
}

/// Table plus the fields and relations a list endpoint may touch
///
/// Only names declared here ever reach generated SQL; client input is bound
/// as parameters.
#[derive(Debug)]
pub struct ResourceSchema {
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub relations: &'static [Relation],
}

impl ResourceSchema {
    /// Looks up a field by its public name
    pub fn field(&self, name: &str) -> Result<&'static FieldDef, QueryError> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| QueryError::UnknownField(name.to_string()))
    }

    /// Looks up a relation by its path
    pub fn relation(&self, path: &str) -> Result<&'static Relation, QueryError> {
        self.relations
            .iter()
            .find(|relation| relation.path() == path)
            .ok_or_else(|| QueryError::UnknownField(path.to_string()))
    }

    /// Returns true if `name` is a field or a relation path
    pub fn knows(&self, name: &str) -> bool {
        self.field(name).is_ok() || self.relation(name).is_ok()
    }
}

const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef { name, column, kind }
}

pub static BOOTCAMPS: ResourceSchema = ResourceSchema {
    table: "bootcamps",
    fields: &[
        field("id", "id", FieldKind::Id),
        field("name", "name", FieldKind::Text),
        field("slug", "slug", FieldKind::Text),
        field("description", "description", FieldKind::Text),
        field("website", "website", FieldKind::Text),
        field("phone", "phone", FieldKind::Text),
        field("email", "email", FieldKind::Text),
        field("address", "address", FieldKind::Text),
        field("careers", "careers", FieldKind::TextArray),
        field("averageRating", "average_rating", FieldKind::Number),
        field("averageCost", "average_cost", FieldKind::Number),
        field("photo", "photo", FieldKind::Text),
        field("housing", "housing", FieldKind::Boolean),
        field("jobAssistance", "job_assistance", FieldKind::Boolean),
        field("jobGuarantee", "job_guarantee", FieldKind::Boolean),
        field("acceptGi", "accept_gi", FieldKind::Boolean),
        field("user", "user_id", FieldKind::Id),
        field("createdAt", "created_at", FieldKind::Timestamp),
    ],
    relations: &[
        Relation::HasMany {
            path: "courses",
            foreign_column: "bootcamp_id",
            target: &COURSES,
        },
        Relation::HasMany {
            path: "reviews",
            foreign_column: "bootcamp_id",
            target: &REVIEWS,
        },
    ],
};

pub static COURSES: ResourceSchema = ResourceSchema {
    table: "courses",
    fields: &[
        field("id", "id", FieldKind::Id),
        field("title", "title", FieldKind::Text),
        field("description", "description", FieldKind::Text),
        field("weeks", "weeks", FieldKind::Text),
        field("tuition", "tuition", FieldKind::Number),
        field("minimumSkill", "minimum_skill", FieldKind::Enum),
        field("scholarshipAvailable", "scholarship_available", FieldKind::Boolean),
        field("bootcamp", "bootcamp_id", FieldKind::Id),
        field("user", "user_id", FieldKind::Id),
        field("createdAt", "created_at", FieldKind::Timestamp),
    ],
    relations: &[Relation::BelongsTo {
        path: "bootcamp",
        column: "bootcamp_id",
        target: &BOOTCAMPS,
    }],
};

pub static REVIEWS: ResourceSchema = ResourceSchema {
    table: "reviews",
    fields: &[
        field("id", "id", FieldKind::Id),
        field("title", "title", FieldKind::Text),
        field("text", "text", FieldKind::Text),
        field("rating", "rating", FieldKind::Number),
        field("bootcamp", "bootcamp_id", FieldKind::Id),
        field("user", "user_id", FieldKind::Id),
        field("createdAt", "created_at", FieldKind::Timestamp),
    ],
    relations: &[
        Relation::BelongsTo {
            path: "bootcamp",
            column: "bootcamp_id",
            target: &BOOTCAMPS,
        },
        Relation::BelongsTo {
            path: "user",
            column: "user_id",
            target: &USERS,
        },
    ],
};

/// Users as exposed to admins; the password hash is never listed
pub static USERS: ResourceSchema = ResourceSchema {
    table: "users",
    fields: &[
        field("id", "id", FieldKind::Id),
        field("name", "name", FieldKind::Text),
        field("email", "email", FieldKind::Text),
        field("role", "role", FieldKind::Enum),
        field("createdAt", "created_at", FieldKind::Timestamp),
    ],
    relations: &[],
};
