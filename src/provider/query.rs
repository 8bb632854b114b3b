//! Query builder for document list calls.
//!
//! Each variant serialises to the provider's JSON query form, e.g.
//! `{"method":"equal","attribute":"userId","values":["u1"]}`.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::utils::format_date_for_query;

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Attribute equals any of the values.
    Equal(String, Vec<Value>),
    NotEqual(String, Value),
    LessThan(String, Value),
    LessThanEqual(String, Value),
    GreaterThan(String, Value),
    GreaterThanEqual(String, Value),
    /// Substring match on strings, membership on arrays.
    Contains(String, Value),
    OrderAsc(String),
    OrderDesc(String),
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Query::Equal(attribute.to_string(), vec![value.into()])
    }

    pub fn equal_any<I, V>(attribute: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Query::Equal(attribute.to_string(), values.into_iter().map(Into::into).collect())
    }

    pub fn not_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Query::NotEqual(attribute.to_string(), value.into())
    }

    pub fn less_than(attribute: &str, at: &DateTime<Utc>) -> Self {
        Query::LessThan(attribute.to_string(), format_date_for_query(at).into())
    }

    pub fn less_than_equal(attribute: &str, at: &DateTime<Utc>) -> Self {
        Query::LessThanEqual(attribute.to_string(), format_date_for_query(at).into())
    }

    pub fn greater_than(attribute: &str, at: &DateTime<Utc>) -> Self {
        Query::GreaterThan(attribute.to_string(), format_date_for_query(at).into())
    }

    pub fn greater_than_equal(attribute: &str, at: &DateTime<Utc>) -> Self {
        Query::GreaterThanEqual(attribute.to_string(), format_date_for_query(at).into())
    }

    pub fn contains(attribute: &str, value: impl Into<Value>) -> Self {
        Query::Contains(attribute.to_string(), value.into())
    }

    pub fn order_asc(attribute: &str) -> Self {
        Query::OrderAsc(attribute.to_string())
    }

    pub fn order_desc(attribute: &str) -> Self {
        Query::OrderDesc(attribute.to_string())
    }

    pub fn limit(count: u32) -> Self {
        Query::Limit(count)
    }

    pub fn method(&self) -> &'static str {
        match self {
            Query::Equal(..) => "equal",
            Query::NotEqual(..) => "notEqual",
            Query::LessThan(..) => "lessThan",
            Query::LessThanEqual(..) => "lessThanEqual",
            Query::GreaterThan(..) => "greaterThan",
            Query::GreaterThanEqual(..) => "greaterThanEqual",
            Query::Contains(..) => "contains",
            Query::OrderAsc(_) => "orderAsc",
            Query::OrderDesc(_) => "orderDesc",
            Query::Limit(_) => "limit",
        }
    }

    /// The query in the provider's wire syntax.
    pub fn to_wire(&self) -> String {
        let method = self.method();
        let encoded = match self {
            Query::Equal(attribute, values) => {
                json!({ "method": method, "attribute": attribute, "values": values })
            }
            Query::NotEqual(attribute, value)
            | Query::LessThan(attribute, value)
            | Query::LessThanEqual(attribute, value)
            | Query::GreaterThan(attribute, value)
            | Query::GreaterThanEqual(attribute, value)
            | Query::Contains(attribute, value) => {
                json!({ "method": method, "attribute": attribute, "values": [value] })
            }
            Query::OrderAsc(attribute) | Query::OrderDesc(attribute) => {
                json!({ "method": method, "attribute": attribute })
            }
            Query::Limit(count) => json!({ "method": method, "values": [count] }),
        };
        encoded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_equal_wire_format() {
        let q = Query::equal("userId", "u1");
        let parsed: Value = serde_json::from_str(&q.to_wire()).unwrap();
        assert_eq!(parsed, json!({ "method": "equal", "attribute": "userId", "values": ["u1"] }));
    }

    #[test]
    fn test_equal_any_keeps_every_value() {
        let q = Query::equal_any("status", ["pending", "in-progress"]);
        let parsed: Value = serde_json::from_str(&q.to_wire()).unwrap();
        assert_eq!(parsed["values"], json!(["pending", "in-progress"]));
    }

    #[test]
    fn test_datetime_comparison_uses_millis() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let q = Query::less_than("startDateTime", &at);
        let parsed: Value = serde_json::from_str(&q.to_wire()).unwrap();
        assert_eq!(parsed["method"], json!("lessThan"));
        assert_eq!(parsed["values"], json!(["2024-01-01T09:00:00.000Z"]));
    }

    #[test]
    fn test_order_and_limit() {
        let order: Value = serde_json::from_str(&Query::order_desc("$createdAt").to_wire()).unwrap();
        assert_eq!(order, json!({ "method": "orderDesc", "attribute": "$createdAt" }));

        let limit: Value = serde_json::from_str(&Query::limit(1).to_wire()).unwrap();
        assert_eq!(limit, json!({ "method": "limit", "values": [1] }));
    }
}
