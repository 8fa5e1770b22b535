//! In-process collection with backend-equivalent query semantics.
//!
//! Used by the demo binary, benchmarks and tests that need real search,
//! filter, sort and pagination behavior without a server.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FetchError, MutationError};
use crate::models::{identity_of, lookup_path, Page, Record, RecordId};
use crate::query::{ColumnFilter, FilterOperator, QueryParams, SortOrder};
use crate::traits::{CollectionSource, CrudAccessor};

/// A collection held in memory.
///
/// Clones share the same rows.
#[derive(Debug, Clone)]
pub struct MemoryCollection<R> {
    rows: Arc<Mutex<Vec<R>>>,
    search_fields: Arc<Vec<String>>,
}

impl<R: Record + DeserializeOwned> MemoryCollection<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            search_fields: Arc::new(Vec::new()),
        }
    }

    /// Fields the quick filter searches. Empty means every top-level string
    /// or number field.
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Arc::new(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> Vec<R> {
        self.rows.lock().unwrap().clone()
    }

    /// Run a query synchronously.
    pub fn query(&self, params: &QueryParams) -> Result<Page<R>, FetchError> {
        let rows = self.rows.lock().unwrap().clone();
        let mut matched: Vec<(Value, R)> = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::to_value(&row)
                .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
            if self.matches_search(&value, &params.search)
                && params
                    .filters
                    .iter()
                    .all(|(field, filter)| matches_filter(lookup_path(&value, field), filter))
            {
                matched.push((value, row));
            }
        }

        if let (Some(field), Some(order)) = (&params.sort_by, params.sort_order) {
            matched.sort_by(|(a, _), (b, _)| {
                compare_for_sort(lookup_path(a, field), lookup_path(b, field), order)
            });
        }

        let total = matched.len() as u64;
        let limit = params.limit.max(1);
        let page = params.page.max(1);
        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let data = matched
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .map(|(_, row)| row)
            .collect();
        Ok(Page::new(data, total, page, limit))
    }

    fn matches_search(&self, row: &Value, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack: Vec<&Value> = if self.search_fields.is_empty() {
            match row {
                Value::Object(map) => map.values().collect(),
                _ => Vec::new(),
            }
        } else {
            self.search_fields
                .iter()
                .filter_map(|f| lookup_path(row, f))
                .collect()
        };
        haystack.into_iter().any(|v| match v {
            Value::String(s) => s.to_lowercase().contains(&needle),
            Value::Number(n) => n.to_string().contains(&needle),
            _ => false,
        })
    }

    fn position(rows: &[R], id: &RecordId) -> Option<usize> {
        rows.iter().position(|r| r.record_id().as_ref() == Some(id))
    }
}

fn matches_filter(field: Option<&Value>, filter: &ColumnFilter) -> bool {
    let Some(target) = filter.value.as_ref().filter(|_| filter.is_active()) else {
        return true;
    };
    let Some(field) = field.filter(|v| !v.is_null()) else {
        return false;
    };
    match filter.operator {
        FilterOperator::Contains => text(field).contains(&text(target)),
        FilterOperator::StartsWith => text(field).starts_with(&text(target)),
        FilterOperator::EndsWith => text(field).ends_with(&text(target)),
        FilterOperator::Equals => equals(field, target),
        FilterOperator::GreaterThan => compare(field, target) == Some(Ordering::Greater),
        FilterOperator::LessThan => compare(field, target) == Some(Ordering::Less),
        FilterOperator::In => match target {
            Value::Array(options) => match field {
                Value::Array(values) => values.iter().any(|v| options.iter().any(|o| equals(v, o))),
                single => options.iter().any(|o| equals(single, o)),
            },
            other => equals(field, other),
        },
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}

fn equals(field: &Value, target: &Value) -> bool {
    compare(field, target) == Some(Ordering::Equal)
}

/// Parsed date with a flag for date-only inputs (`2024-05-01`).
fn parse_date(value: &Value) -> Option<(NaiveDateTime, bool)> {
    let s = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.naive_utc(), false));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some((dt, false));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| (dt, true))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Typed comparison: numbers, then booleans, then dates, then case-insensitive text.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if a.is_number() || b.is_number() {
        if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
            return x.partial_cmp(&y);
        }
    }
    if a.is_boolean() || b.is_boolean() {
        return match (as_bool(a), as_bool(b)) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => None,
        };
    }
    if let (Some((x, x_day)), Some((y, y_day))) = (parse_date(a), parse_date(b)) {
        return if x_day || y_day {
            Some(x.date().cmp(&y.date()))
        } else {
            Some(x.cmp(&y))
        };
    }
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => None,
        _ => Some(text(a).cmp(&text(b))),
    }
}

/// Sort comparison: missing and null values go last in either direction.
fn compare_for_sort(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = compare(x, y).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn to_object<T: Serialize>(dto: &T) -> Result<Map<String, Value>, MutationError> {
    match serde_json::to_value(dto) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MutationError::Validation("payload must be an object".to_string())),
        Err(e) => Err(MutationError::Validation(e.to_string())),
    }
}

#[async_trait]
impl<R> CollectionSource<R> for MemoryCollection<R>
where
    R: Record + DeserializeOwned,
{
    async fn fetch(&self, params: &QueryParams) -> Result<Page<R>, FetchError> {
        self.query(params)
    }
}

#[async_trait]
impl<R, C, U> CrudAccessor<R, C, U> for MemoryCollection<R>
where
    R: Record + DeserializeOwned,
    C: Serialize + Send + 'static,
    U: Serialize + Send + 'static,
{
    async fn create(&self, dto: C) -> Result<R, MutationError> {
        let mut object = to_object(&dto)?;
        let value = Value::Object(object.clone());
        if identity_of(&value).is_none() {
            object.insert(
                "_id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }
        let row: R = serde_json::from_value(Value::Object(object))
            .map_err(|e| MutationError::Validation(e.to_string()))?;
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &RecordId, dto: U) -> Result<R, MutationError> {
        let patch = to_object(&dto)?;
        let mut rows = self.rows.lock().unwrap();
        let index =
            Self::position(&rows, id).ok_or_else(|| MutationError::NotFound(id.to_string()))?;
        let mut current = match serde_json::to_value(&rows[index]) {
            Ok(Value::Object(map)) => map,
            _ => return Err(MutationError::Other("row is not an object".to_string())),
        };
        current.extend(patch);
        let updated: R = serde_json::from_value(Value::Object(current))
            .map_err(|e| MutationError::Validation(e.to_string()))?;
        rows[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_one(&self, id: &RecordId) -> Result<(), MutationError> {
        let mut rows = self.rows.lock().unwrap();
        let index =
            Self::position(&rows, id).ok_or_else(|| MutationError::NotFound(id.to_string()))?;
        rows.remove(index);
        Ok(())
    }

    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), MutationError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| r.record_id().map_or(true, |id| !ids.contains(&id)));
        Ok(())
    }
}
