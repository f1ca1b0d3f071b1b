/// Route-supplied expansion of a related resource
///
/// A belongs-to path (e.g. `bootcamp` on a course) replaces the stored id with
/// the related record; a has-many path (e.g. `courses` on a bootcamp) attaches
/// an array of related records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateSpec {
    pub path: String,
    pub select: Option<Vec<String>>,
}

impl PopulateSpec {
    /// Populates every field of the related resource
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            select: None,
        }
    }

    /// Restricts the populated record to the given fields (plus its id)
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}
