//! Project detail loader.
//!
//! Fetches the project, then its environments, then each environment's
//! variables one after another. The project and environments fetches are
//! fatal; a variables fetch that fails in any way just leaves that
//! environment without a `Variables` entry.

use super::flat::fetch_required;
use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::models::{
    ResourceKey, ResourceKind, ViewModel, ENVIRONMENTS_KEY, ENVIRONMENT_ID_FIELD, VARIABLES_KEY,
};
use serde_json::Value;
use tracing::{debug, info};

/// Load a project with its environments and their variables attached.
pub async fn load_project_aggregate(fetcher: &dyn Fetcher, id: &str) -> ViewModel {
    info!("Loading project {}", id);

    let result = assemble_project(fetcher, id).await;
    ViewModel::from_result(ResourceKey::Project, result)
}

async fn assemble_project(fetcher: &dyn Fetcher, id: &str) -> Result<Value, LoadError> {
    let project = fetch_required(
        fetcher,
        ResourceKind::Project,
        &format!("/api/projects/{}", id),
        id,
    )
    .await?;

    let Value::Object(mut project) = project else {
        return Err(LoadError::Malformed(format!(
            "Project {} is not an object",
            id
        )));
    };

    let environments = fetch_required(
        fetcher,
        ResourceKind::Environments,
        &format!("/api/projects/{}/environments", id),
        id,
    )
    .await?;

    let Value::Array(mut environments) = environments else {
        return Err(LoadError::Malformed(format!(
            "Environments for project {} are not a list",
            id
        )));
    };

    // One variables request in flight at a time, in backend order.
    for environment in environments.iter_mut() {
        attach_variables(fetcher, environment).await;
    }

    debug!(
        "Project {} assembled with {} environments",
        id,
        environments.len()
    );

    project.insert(ENVIRONMENTS_KEY.to_string(), Value::Array(environments));

    Ok(Value::Object(project))
}

/// Fetch and attach one environment's variables. Any failure leaves the
/// environment untouched.
async fn attach_variables(fetcher: &dyn Fetcher, environment: &mut Value) {
    let Some(environment_id) = environment_id(environment) else {
        return;
    };

    let path = format!("/api/environments/{}/variables", environment_id);
    let variables = match fetcher.get(&path).await {
        Ok(response) if response.is_success() => response.json().ok(),
        _ => None,
    };

    if let (Some(variables), Some(fields)) = (variables, environment.as_object_mut()) {
        fields.insert(VARIABLES_KEY.to_string(), variables);
    }
}

/// The environment's `ID` as a path segment. Accepts string or numeric ids.
fn environment_id(environment: &Value) -> Option<String> {
    match environment.get(ENVIRONMENT_ID_FIELD)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
