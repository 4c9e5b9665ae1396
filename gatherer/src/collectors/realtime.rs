use crate::{
    collectors::decode_json,
    endpoint,
    error::{
        Error,
        Result,
    },
    metrics::{
        metric_ids,
        Host,
        MetricRequestEntry,
        MetricResponseItem,
        RealtimeResponse,
    },
    transport::Transport,
};
use fc_metrics_config::MetricCatalog;
use std::collections::HashSet;
use url::Url;

/// One entry per host, in host order, each carrying the full catalog.
pub fn build_request(hosts: &[Host], catalog: MetricCatalog) -> Vec<MetricRequestEntry<'_>> {
    let ids = metric_ids(catalog);
    hosts
        .iter()
        .map(|host| MetricRequestEntry {
            urn: &host.urn,
            metric_id: ids,
        })
        .collect()
}

/// `POST {site_url}/monitors/realtimedata` covering all `hosts` in a single request.
///
/// More than `max_hosts` hosts fail before anything is sent. No hosts means no request and no items.
pub async fn request_metrics(
    transport: &Transport,
    site_url: &Url,
    hosts: &[Host],
    catalog: MetricCatalog,
    max_hosts: usize,
) -> Result<Vec<MetricResponseItem>> {
    if hosts.len() > max_hosts {
        return Err(Error::TooManyHosts {
            count: hosts.len(),
            limit: max_hosts,
        });
    }
    if hosts.is_empty() {
        debug!("No hosts, skipping realtime request");
        return Ok(Vec::new());
    }

    let url = endpoint::join_path(site_url, &["monitors", "realtimedata"])?;
    let entries = build_request(hosts, catalog);

    debug!(%url, hosts = entries.len(), %catalog, "Requesting realtime metrics");
    let response: RealtimeResponse = decode_json(transport.post_json(url.clone(), &entries).await?).await?;
    let items = response.into_items();

    let mut seen = HashSet::new();
    if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.identity())) {
        return Err(Error::decode(
            &url,
            format!("object {} appears more than once", duplicate.identity()),
        ));
    }

    info!(items = items.len(), "Received realtime metrics");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::Session,
        metrics::catalog::{
            HOST_METRICS,
            VM_METRICS,
        },
    };
    use wiremock::{
        matchers::{
            body_json,
            header,
            method,
            path,
        },
        Mock,
        MockServer,
        ResponseTemplate,
    };

    fn hosts(n: usize) -> Vec<Host> {
        (1..=n)
            .map(|i| Host {
                urn: format!("urn:sites:1:hosts:{i}"),
                name: format!("h{i}"),
                ip: format!("10.0.0.{i}"),
            })
            .collect()
    }

    fn transport() -> Transport {
        Transport::with_session(reqwest::Client::new(), Session::new("tok"))
    }

    fn site_url(server: &MockServer) -> Url {
        Url::parse(&format!("{}/service/sites/1", server.uri())).unwrap()
    }

    #[test]
    fn one_entry_per_host_with_the_full_catalog() {
        let hosts = hosts(3);
        let entries = build_request(&hosts, MetricCatalog::Host);

        assert_eq!(entries.len(), 3);
        for (entry, host) in entries.iter().zip(&hosts) {
            assert_eq!(entry.urn, host.urn);
            assert_eq!(entry.metric_id, &HOST_METRICS[..]);
        }

        let entries = build_request(&hosts, MetricCatalog::Vm);
        assert!(entries.iter().all(|entry| entry.metric_id == &VM_METRICS[..]));
    }

    #[test]
    fn empty_host_list_builds_an_empty_request() {
        assert!(build_request(&[], MetricCatalog::Host).is_empty());
    }

    #[tokio::test]
    async fn posts_the_entries_and_decodes_items() {
        let server = MockServer::start().await;
        let hosts = hosts(2);
        let expected_body = serde_json::json!([
            {"urn": "urn:sites:1:hosts:1", "metric_id": HOST_METRICS},
            {"urn": "urn:sites:1:hosts:2", "metric_id": HOST_METRICS},
        ]);
        Mock::given(method("POST"))
            .and(path("/service/sites/1/monitors/realtimedata"))
            .and(header("X-Auth-Token", "tok"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"object_name": "h1", "value": [{"metric_id": "cpu_usage", "metric_value": "42"}]},
                {"object_name": "h2", "value": [{"metric_id": "cpu_usage", "metric_value": 7.5}]},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let items = request_metrics(&transport(), &site_url(&server), &hosts, MetricCatalog::Host, 100)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].object_name, "h1");
        assert_eq!(items[1].value[0].metric_value.as_text().unwrap(), "7.5");
    }

    #[tokio::test]
    async fn no_hosts_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let items = request_metrics(&transport(), &site_url(&server), &[], MetricCatalog::Host, 100)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn too_many_hosts_fail_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let result = request_metrics(&transport(), &site_url(&server), &hosts(3), MetricCatalog::Host, 2).await;
        assert!(matches!(result, Err(Error::TooManyHosts { count: 3, limit: 2 })));
    }

    #[tokio::test]
    async fn duplicate_objects_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"object_name": "h1", "value": []},
                {"object_name": "h1", "value": []},
            ])))
            .mount(&server)
            .await;

        let result = request_metrics(&transport(), &site_url(&server), &hosts(2), MetricCatalog::Host, 100).await;
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[tokio::test]
    async fn error_status_and_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let result = request_metrics(&transport(), &site_url(&server), &hosts(1), MetricCatalog::Host, 100).await;
        assert!(matches!(result, Err(Error::Request { .. })));

        server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"object_name": "h1"}"#))
            .mount(&server)
            .await;
        let result = request_metrics(&transport(), &site_url(&server), &hosts(1), MetricCatalog::Host, 100).await;
        assert!(matches!(result, Err(Error::Decode { .. })));
    }
}
