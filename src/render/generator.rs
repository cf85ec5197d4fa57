//! JSON and Markdown rendering of a view-model.

use crate::models::{
    ResourceKey, ViewModel, ENVIRONMENTS_KEY, ENVIRONMENT_ID_FIELD, VARIABLES_KEY,
};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Render the view-model in its wire shape.
pub fn generate_json(view: &ViewModel, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(view)
    } else {
        serde_json::to_string(view)
    };
    json.context("Failed to serialize view-model")
}

/// Render a short Markdown summary of the view-model.
pub fn generate_markdown(view: &ViewModel) -> String {
    match view {
        ViewModel::Failed { status, error } => generate_failure_section(*status, error),
        ViewModel::Loaded {
            key: ResourceKey::Project,
            resource,
        } => generate_project_section(resource),
        ViewModel::Loaded { key, resource } => generate_resource_section(*key, resource),
    }
}

fn generate_failure_section(status: u16, error: &str) -> String {
    let mut section = String::new();

    section.push_str("# Load failed\n\n");
    section.push_str(&format!("- **Status:** {}\n", status));
    section.push_str(&format!("- **Error:** {}\n", error));

    section
}

/// Generate the project page: header fields, then one line per environment.
fn generate_project_section(project: &Value) -> String {
    let mut section = String::new();

    let title = display_name(project).unwrap_or_else(|| "Project".to_string());
    section.push_str(&format!("# {}\n\n", title));

    if let Some(description) = project.get("description").and_then(Value::as_str) {
        if !description.is_empty() {
            section.push_str(&format!("{}\n\n", description));
        }
    }

    let environments = project
        .get(ENVIRONMENTS_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    section.push_str(&format!("## Environments ({})\n\n", environments.len()));

    if environments.is_empty() {
        section.push_str("No environments.\n");
        return section;
    }

    for environment in environments {
        section.push_str(&generate_environment_line(environment));
    }

    section
}

fn generate_environment_line(environment: &Value) -> String {
    let name = display_name(environment)
        .or_else(|| environment.get(ENVIRONMENT_ID_FIELD).map(|id| id.to_string()))
        .unwrap_or_else(|| "(unnamed)".to_string());

    let variables = match environment.get(VARIABLES_KEY) {
        Some(Value::Array(vars)) => format!("{} variables", vars.len()),
        Some(_) => "variables loaded".to_string(),
        None => "variables unavailable".to_string(),
    };

    format!("- **{}**: {}\n", name, variables)
}

fn generate_resource_section(key: ResourceKey, resource: &Value) -> String {
    let mut section = String::new();

    let heading = match key {
        ResourceKey::ImageDetails => "Image",
        ResourceKey::Service => "Service",
        ResourceKey::Project => "Project",
    };
    match display_name(resource) {
        Some(name) => section.push_str(&format!("# {}: {}\n\n", heading, name)),
        None => section.push_str(&format!("# {}\n\n", heading)),
    }

    let body = serde_json::to_string_pretty(resource).unwrap_or_else(|_| resource.to_string());
    section.push_str("```json\n");
    section.push_str(&body);
    section.push_str("\n```\n");

    section
}

/// `name` if the backend sent one.
fn display_name(value: &Value) -> Option<String> {
    value
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(String::from)
}

/// Write rendered output to a file, or stdout when no path is given.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content).context("Failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_view() -> ViewModel {
        ViewModel::loaded(
            ResourceKey::Project,
            json!({
                "ID": 1,
                "name": "shop",
                "description": "Storefront stack",
                "Environments": [
                    {"ID": 1, "name": "staging", "Variables": [{"key": "A"}, {"key": "B"}]},
                    {"ID": 2, "name": "production"}
                ]
            }),
        )
    }

    #[test]
    fn test_generate_json_wire_shape() {
        let view = ViewModel::Failed {
            status: 500,
            error: "Could not load service s1".to_string(),
        };

        let json = generate_json(&view, false).unwrap();

        assert_eq!(json, r#"{"status":500,"error":"Could not load service s1"}"#);
    }

    #[test]
    fn test_generate_json_pretty() {
        let json = generate_json(&project_view(), true).unwrap();

        assert!(json.starts_with("{\n"));
        assert!(json.contains("\"project\""));
        assert!(json.contains("\"Environments\""));
    }

    #[test]
    fn test_generate_markdown_project() {
        let markdown = generate_markdown(&project_view());

        assert!(markdown.contains("# shop"));
        assert!(markdown.contains("Storefront stack"));
        assert!(markdown.contains("## Environments (2)"));
        assert!(markdown.contains("- **staging**: 2 variables"));
        assert!(markdown.contains("- **production**: variables unavailable"));

        let staging = markdown.find("staging").unwrap();
        let production = markdown.find("production").unwrap();
        assert!(staging < production);
    }

    #[test]
    fn test_generate_markdown_project_without_environments() {
        let view = ViewModel::loaded(ResourceKey::Project, json!({"ID": 9, "Environments": []}));
        let markdown = generate_markdown(&view);

        assert!(markdown.contains("# Project"));
        assert!(markdown.contains("No environments."));
    }

    #[test]
    fn test_generate_markdown_service() {
        let view = ViewModel::loaded(ResourceKey::Service, json!({"name": "web", "type": "container"}));
        let markdown = generate_markdown(&view);

        assert!(markdown.contains("# Service: web"));
        assert!(markdown.contains("```json"));
        assert!(markdown.contains("\"type\": \"container\""));
    }

    #[test]
    fn test_generate_markdown_failure() {
        let view = ViewModel::Failed {
            status: 500,
            error: "Could not load image details for abc".to_string(),
        };
        let markdown = generate_markdown(&view);

        assert!(markdown.contains("# Load failed"));
        assert!(markdown.contains("**Status:** 500"));
        assert!(markdown.contains("Could not load image details for abc"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");

        write_output("{}", Some(path.as_path())).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
