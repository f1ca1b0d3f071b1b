/// Identifier field that every projected record keeps
pub const ID_FIELD: &str = "id";

/// Fields to include in each returned record
///
/// The identifier is always returned, whether or not it is listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Parses a comma separated field list
    ///
    /// Returns `None` when the list names no fields, meaning "all fields".
    pub fn parse(raw: &str) -> Option<Self> {
        let mut fields: Vec<String> = Vec::new();
        for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !fields.iter().any(|existing| existing == field) {
                fields.push(field.to_string());
            }
        }

        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if `field` is part of the projection
    pub fn includes(&self, field: &str) -> bool {
        field == ID_FIELD || self.fields.iter().any(|f| f == field)
    }
}
