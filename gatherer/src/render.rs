use crate::{
    error::{
        Error,
        Result,
    },
    metrics::MetricResponseItem,
};
use std::fmt;

/// One flattened `(object, metric)` value. Displays as `<metric_id>{name="<object_name>"}=<value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSample {
    pub metric_id: String,
    pub object_name: String,
    pub value: String,
}

impl fmt::Display for RenderedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{name=\"{}\"}}={}", self.metric_id, self.object_name, self.value)
    }
}

/// Flattens the realtime response, objects and metrics in response order.
///
/// String, number and boolean values are written as text. Any other value fails the whole rendering.
pub fn render(items: &[MetricResponseItem]) -> Result<Vec<RenderedSample>> {
    items
        .iter()
        .flat_map(|item| item.value.iter().map(move |sample| (item, sample)))
        .map(|(item, sample)| -> Result<RenderedSample> {
            let value = sample.metric_value.as_text().ok_or_else(|| Error::Render {
                metric_id: sample.metric_id.clone(),
                object_name: item.object_name.clone(),
                value: serde_json::to_string(&sample.metric_value).unwrap_or_default(),
            })?;
            Ok(RenderedSample {
                metric_id: sample.metric_id.clone(),
                object_name: item.object_name.clone(),
                value: value.into_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(json: &str) -> Vec<MetricResponseItem> {
        serde_json::from_str(json).unwrap()
    }

    fn lines(items: &[MetricResponseItem]) -> Vec<String> {
        render(items).unwrap().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn string_value() {
        let items = items(r#"[{"object_name":"h1","value":[{"metric_id":"cpu_usage","metric_value":"42"}]}]"#);
        assert_eq!(lines(&items), vec![r#"cpu_usage{name="h1"}=42"#]);
    }

    #[test]
    fn numeric_value_renders_like_a_string() {
        let items = items(r#"[{"object_name":"h1","value":[{"metric_id":"cpu_usage","metric_value":42}]}]"#);
        assert_eq!(lines(&items), vec![r#"cpu_usage{name="h1"}=42"#]);
    }

    #[test]
    fn flattens_in_response_order() {
        let items = items(
            r#"[
                {"object_name":"h2","value":[
                    {"metric_id":"cpu_usage","metric_value":"12.5"},
                    {"metric_id":"mem_usage","metric_value":80}
                ]},
                {"object_name":"h1","value":[]},
                {"object_name":"h3","value":[{"metric_id":"vm_run_num","metric_value":"3"}]}
            ]"#,
        );
        assert_eq!(
            lines(&items),
            vec![
                r#"cpu_usage{name="h2"}=12.5"#,
                r#"mem_usage{name="h2"}=80"#,
                r#"vm_run_num{name="h3"}=3"#,
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let items = items(
            r#"[{"object_name":"h1","value":[{"metric_id":"cpu_usage","metric_value":"1"},{"metric_id":"mem_usage","metric_value":2}]}]"#,
        );
        assert_eq!(render(&items).unwrap(), render(&items).unwrap());
    }

    #[test]
    fn empty_response_renders_nothing() {
        assert!(render(&[]).unwrap().is_empty());
    }

    #[test]
    fn structured_value_is_a_render_error() {
        let items = items(
            r#"[{"object_name":"h1","value":[
                {"metric_id":"cpu_usage","metric_value":"1"},
                {"metric_id":"disk_io_in","metric_value":{"read":1}}
            ]}]"#,
        );
        match render(&items) {
            Err(Error::Render {
                metric_id,
                object_name,
                value,
            }) => {
                assert_eq!(metric_id, "disk_io_in");
                assert_eq!(object_name, "h1");
                assert_eq!(value, r#"{"read":1}"#);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
