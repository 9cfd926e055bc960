use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub i64);

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Clicking the current sort key flips the direction; any other key starts
/// over ascending.
pub fn toggle_sort(current: Option<&SortSpec>, key: &str) -> SortSpec {
    match current {
        Some(sort) if sort.key == key => SortSpec {
            key: key.to_string(),
            direction: match sort.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            },
        },
        _ => SortSpec {
            key: key.to_string(),
            direction: SortDirection::Asc,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub records: Vec<MasterRecord>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterRecord {
    pub id: RecordId,
    pub values: BTreeMap<String, String>,
    pub is_active: bool,
}

/// Case-insensitive uniqueness probe over a set of candidate rows. `exclude`
/// keeps a record from colliding with itself while it is being edited.
pub fn find_duplicate<'a>(
    rows: &'a [MasterRecord],
    field_key: &str,
    candidate: &str,
    exclude: Option<RecordId>,
) -> Option<&'a MasterRecord> {
    let needle = candidate.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    rows.iter().find(|row| {
        Some(row.id) != exclude
            && row
                .values
                .get(field_key)
                .map(|value| value.trim().to_lowercase() == needle)
                .unwrap_or(false)
    })
}
