//! Ordering types for queries.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Specifies the ordering of query results.
///
/// Multiple fields can be chained together for secondary, tertiary, etc. sorting.
///
/// # Example
///
/// ```
/// use queryline_lib::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("year");
///
/// // Multiple field ordering
/// let order = OrderBy::desc("year")
///     .then_asc("name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub(crate) fields: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Encodes the ordering as the `sort=` value: descending fields carry
    /// a `-` prefix, fields are comma-joined.
    pub(crate) fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| {
                let encoded = urlencoding::encode(field);
                match direction {
                    Direction::Asc => encoded.into_owned(),
                    Direction::Desc => format!("-{}", encoded),
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}
