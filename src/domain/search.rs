use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// ============================================================================
// Search Criteria - Filtered lookups through repositories
// ============================================================================
//
// Filters inside one group are OR-ed, groups are AND-ed. Sorting is applied
// before paging; `total_count` reports matches before paging.
//
// ============================================================================

/// A single field value exposed by a searchable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    fn as_text(&self) -> String {
        match self {
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Text(v) => v.clone(),
        }
    }

    fn loosely_equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }

    fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Entities that can be matched against search criteria
pub trait Searchable {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition_type", content = "value", rename_all = "snake_case")]
pub enum Condition {
    Eq(FieldValue),
    Neq(FieldValue),
    /// SQL-style pattern, `%` matches any run of characters, case-insensitive
    Like(String),
    In(Vec<FieldValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub condition: Condition,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            condition: Condition::Eq(value.into()),
        }
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition: Condition::Like(pattern.into()),
        }
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let value = match item.field(&self.field) {
            Some(value) => value,
            // Missing values only satisfy a negated match
            None => return matches!(self.condition, Condition::Neq(_)),
        };

        match &self.condition {
            Condition::Eq(expected) => value.loosely_equals(expected),
            Condition::Neq(expected) => !value.loosely_equals(expected),
            Condition::Like(pattern) => like_matches(pattern, &value.as_text()),
            Condition::In(candidates) => candidates.iter().any(|c| value.loosely_equals(c)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| f.matches(item))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub filter_groups: Vec<FilterGroup>,
    pub sort_orders: Vec<SortOrder>,
    pub page_size: Option<usize>,
    /// 1-based page index, only meaningful with `page_size`
    pub current_page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl SearchCriteria {
    pub fn builder() -> SearchCriteriaBuilder {
        SearchCriteriaBuilder::default()
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.filter_groups.iter().all(|group| group.matches(item))
    }

    /// Filter, sort and page a collection
    pub fn apply<T, I>(&self, items: I) -> SearchResults<T>
    where
        T: Searchable,
        I: IntoIterator<Item = T>,
    {
        let mut matched: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();

        if !self.sort_orders.is_empty() {
            matched.sort_by(|a, b| self.compare(a, b));
        }

        let total_count = matched.len();

        let items = match self.page_size {
            Some(size) if size > 0 => {
                let offset = self.current_page.max(1).saturating_sub(1).saturating_mul(size);
                matched.into_iter().skip(offset).take(size).collect()
            }
            _ => matched,
        };

        SearchResults { items, total_count }
    }

    fn compare<T: Searchable>(&self, a: &T, b: &T) -> Ordering {
        for order in &self.sort_orders {
            let ordering = match (a.field(&order.field), b.field(&order.field)) {
                (Some(x), Some(y)) => x.compare(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            let ordering = match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Builds criteria the way repository callers expect: every `add_filter`
/// call is its own AND-ed group
#[derive(Debug, Default)]
pub struct SearchCriteriaBuilder {
    criteria: SearchCriteria,
}

impl SearchCriteriaBuilder {
    pub fn add_filter(mut self, filter: Filter) -> Self {
        self.criteria.filter_groups.push(FilterGroup::new(vec![filter]));
        self
    }

    pub fn add_filter_group(mut self, group: FilterGroup) -> Self {
        self.criteria.filter_groups.push(group);
        self
    }

    pub fn add_sort_order(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.criteria.sort_orders.push(SortOrder {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn page(mut self, page_size: usize, current_page: usize) -> Self {
        self.criteria.page_size = Some(page_size);
        self.criteria.current_page = current_page;
        self
    }

    pub fn build(self) -> SearchCriteria {
        self.criteria
    }
}

fn like_matches(pattern: &str, value: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let value = value.to_lowercase();

    let parts: Vec<&str> = pattern.split('%').collect();
    if parts.len() == 1 {
        return pattern == value;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !value.starts_with(first) || value.len() < first.len() + last.len() {
        return false;
    }

    let mut rest = &value[first.len()..];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

// ============================================================================
// Unit Tests
// ============================================================================
