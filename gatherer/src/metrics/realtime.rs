use serde::{
    Deserialize,
    Serialize,
};
use std::borrow::Cow;

/// One element of the realtime request body: the metrics wanted for a single object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRequestEntry<'a> {
    pub urn: &'a str,
    pub metric_id: &'static [&'static str],
}

/// Realtime values of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResponseItem {
    #[serde(alias = "objectName")]
    pub object_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    #[serde(default)]
    pub value: Vec<MetricSample>,
}

impl MetricResponseItem {
    /// Identity used to detect an object answered twice: the URN when present, the name otherwise.
    pub fn identity(&self) -> &str {
        self.urn.as_deref().unwrap_or(&self.object_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    #[serde(alias = "metricId")]
    pub metric_id: String,
    #[serde(alias = "metricValue", default)]
    pub metric_value: MetricValue,
}

/// The platform sends metric values as JSON strings or numbers depending on the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    /// Null or a structured value. Kept so rendering can reject it by name.
    Other(serde_json::Value),
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Other(serde_json::Value::Null)
    }
}

impl MetricValue {
    /// Textual form of a scalar value, `None` for anything else.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            MetricValue::Text(text) => Some(Cow::Borrowed(text)),
            MetricValue::Number(number) => Some(Cow::Owned(number.to_string())),
            MetricValue::Flag(flag) => Some(Cow::Borrowed(if *flag { "true" } else { "false" })),
            MetricValue::Other(_) => None,
        }
    }
}

/// The realtime endpoint answers with a bare array; some deployments wrap it in `{"items": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RealtimeResponse {
    Items(Vec<MetricResponseItem>),
    Envelope { items: Vec<MetricResponseItem> },
}

impl RealtimeResponse {
    pub(crate) fn into_items(self) -> Vec<MetricResponseItem> {
        match self {
            RealtimeResponse::Items(items) | RealtimeResponse::Envelope { items } => items,
        }
    }
}
