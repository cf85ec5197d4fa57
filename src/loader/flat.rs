//! Single-fetch loaders (image, service).

use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::models::{FlatResource, ResourceKind, ViewModel};
use serde_json::Value;
use tracing::{debug, info};

/// Load `{base_path}/{id}` and wrap the body under the resource's key.
pub async fn load_flat_resource(
    fetcher: &dyn Fetcher,
    resource: &FlatResource,
    id: &str,
) -> ViewModel {
    info!("Loading {} {}", resource.kind, id);

    let result = fetch_required(fetcher, resource.kind, &resource.path_for(id), id).await;
    ViewModel::from_result(resource.key, result)
}

/// GET `path` and parse the body, treating a non-2xx status as a failure of
/// `kind` for `id`.
pub(crate) async fn fetch_required(
    fetcher: &dyn Fetcher,
    kind: ResourceKind,
    path: &str,
    id: &str,
) -> Result<Value, LoadError> {
    let response = fetcher.get(path).await?;

    if !response.is_success() {
        debug!("{} {} answered {}", kind, id, response.status);
        return Err(LoadError::fetch_failed(kind, id));
    }

    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::ScriptedFetcher;
    use crate::models::{IMAGE, SERVICE};
    use serde_json::json;

    #[tokio::test]
    async fn test_service_loaded() {
        let fetcher =
            ScriptedFetcher::new().respond("/api/services/s1", 200, r#"{"ID":1,"name":"web"}"#);

        let view = load_flat_resource(&fetcher, &SERVICE, "s1").await;

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"service": {"ID": 1, "name": "web"}})
        );
        assert_eq!(fetcher.calls(), vec!["/api/services/s1"]);
    }

    #[tokio::test]
    async fn test_service_not_found() {
        let fetcher = ScriptedFetcher::new().respond("/api/services/s1", 404, "{}");

        let view = load_flat_resource(&fetcher, &SERVICE, "s1").await;

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"status": 500, "error": "Could not load service s1"})
        );
    }

    #[tokio::test]
    async fn test_image_loaded_under_image_details() {
        let fetcher =
            ScriptedFetcher::new().respond("/images/abc", 200, r#"{"Id":"sha256:abc","Size":42}"#);

        let view = load_flat_resource(&fetcher, &IMAGE, "abc").await;

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"imageDetails": {"Id": "sha256:abc", "Size": 42}})
        );
    }

    #[tokio::test]
    async fn test_image_server_error_mentions_id() {
        let fetcher = ScriptedFetcher::new().respond("/images/abc", 500, "boom");

        let view = load_flat_resource(&fetcher, &IMAGE, "abc").await;

        assert_eq!(
            view,
            ViewModel::Failed {
                status: 500,
                error: "Could not load image details for abc".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unparseable_body_is_failure() {
        let fetcher = ScriptedFetcher::new().respond("/api/services/s1", 200, "not json");

        let view = load_flat_resource(&fetcher, &SERVICE, "s1").await;

        match view {
            ViewModel::Failed { status, error } => {
                assert_eq!(status, 500);
                assert!(error.starts_with("Failed to parse response body"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_failure_is_failure() {
        let fetcher = ScriptedFetcher::new().unreachable("/api/services/s1");

        let view = load_flat_resource(&fetcher, &SERVICE, "s1").await;

        assert!(view.is_failure());
        assert_eq!(fetcher.calls().len(), 1);
    }
}
