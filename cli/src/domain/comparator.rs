//! Binary comparators over agent records, one per sortable field.
//!
//! Produced comparators are plain `Ordering` functions for use with a stable
//! sort; ties keep snapshot order in both directions.

use std::cmp::Ordering;

use gantry_common::Agent;

/// Fields the fleet tables can be sorted by.
///
/// This is a closed set: the table layer maps column indices into it, so an
/// out-of-range sort key cannot be constructed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Hostname,
    Sandbox,
    OperatingSystem,
    IpAddress,
    Status,
    FreeSpace,
    Resources,
    Environments,
}

/// Sort direction. Descending is the exact reverse comparison, including the
/// composite-status rank and the unknown-free-space rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction, for repeated clicks on a sorted column.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Build a comparator for the given field and direction.
#[must_use]
pub fn compare(field: SortField, order: SortOrder) -> impl Fn(&Agent, &Agent) -> Ordering {
    move |a, b| {
        let ascending = compare_ascending(field, a, b);
        match order {
            SortOrder::Ascending => ascending,
            SortOrder::Descending => ascending.reverse(),
        }
    }
}

fn compare_ascending(field: SortField, a: &Agent, b: &Agent) -> Ordering {
    match field {
        SortField::Hostname => text_key(a.hostname.as_deref()).cmp(&text_key(b.hostname.as_deref())),
        SortField::Sandbox => text_key(a.sandbox.as_deref()).cmp(&text_key(b.sandbox.as_deref())),
        SortField::OperatingSystem => {
            text_key(a.operating_system.as_deref()).cmp(&text_key(b.operating_system.as_deref()))
        }
        SortField::IpAddress => {
            text_key(a.ip_address.as_deref()).cmp(&text_key(b.ip_address.as_deref()))
        }
        SortField::Status => a.status().cmp(&b.status()),
        SortField::FreeSpace => a.free_space.cmp(&b.free_space),
        SortField::Resources => tag_key(&a.resources).cmp(&tag_key(&b.resources)),
        SortField::Environments => {
            tag_key(&a.environment_names()).cmp(&tag_key(&b.environment_names()))
        }
    }
}

/// Case-insensitive key for a possibly-absent string field.
fn text_key(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

/// Case-insensitive key for a tag set: sorted internally, then joined, so the
/// comparison does not depend on configuration order. An empty set yields the
/// empty string and sorts first ascending.
fn tag_key<S: AsRef<str>>(tags: &[S]) -> String {
    let mut lowered: Vec<String> = tags.iter().map(|t| t.as_ref().to_lowercase()).collect();
    lowered.sort_unstable();
    lowered.join(",")
}
