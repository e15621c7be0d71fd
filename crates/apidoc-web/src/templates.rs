//! Template Engine
//!
//! Handles page, script and stylesheet rendering using minijinja.

use apidoc_common::{Error, Result};
use minijinja::{path_loader, AutoEscape, Environment};
use serde::Serialize;
use std::path::Path;

/// Page shell mounting the viewer
pub const INDEX_TEMPLATE: &str = "index.html";

/// Script constructing the viewer
pub const INITIALIZER_TEMPLATE: &str = "swagger-initializer.js";

/// Page stylesheet
pub const STYLESHEET_TEMPLATE: &str = "index.css";

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    (INDEX_TEMPLATE, include_str!("../templates/index.html")),
    (
        INITIALIZER_TEMPLATE,
        include_str!("../templates/swagger-initializer.js"),
    ),
    (STYLESHEET_TEMPLATE, include_str!("../templates/index.css")),
];

/// Template manager
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Create a template manager with the built-in templates
    pub fn new() -> Result<Self> {
        let mut env = Self::environment();

        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| Error::Template(format!("Failed to add {} template: {}", name, e)))?;
        }

        Ok(Self { env })
    }

    /// Create a template manager where files in `dir` replace the built-in
    /// templates of the same name
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }

        let mut env = Self::environment();
        env.set_loader(path_loader(dir));

        for (name, source) in BUILTIN_TEMPLATES {
            if dir.join(name).is_file() {
                tracing::info!(template = name, dir = %dir.display(), "Using template override");
                continue;
            }
            env.add_template(name, source)
                .map_err(|e| Error::Template(format!("Failed to add {} template: {}", name, e)))?;
        }

        Ok(Self { env })
    }

    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        // Script values are emitted through `tojson`, only markup gets HTML escaping
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env
    }

    /// Render a template with context
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Error::Template(format!("Failed to load {} template: {}", name, e)))?;

        template
            .render(context)
            .map_err(|e| Error::Template(format!("Failed to render {} template: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_load() {
        let templates = Templates::new().unwrap();
        let css = templates
            .render(STYLESHEET_TEMPLATE, &serde_json::json!({}))
            .unwrap();
        assert!(css.contains("box-sizing"));
    }

    #[test]
    fn test_html_is_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                INDEX_TEMPLATE,
                &serde_json::json!({
                    "title": "<script>alert(1)</script>",
                    "assets_url": "assets",
                    "dom_id": "swagger-ui",
                }),
            )
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_overrides_replace_builtin() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(STYLESHEET_TEMPLATE),
            "body { color: {{ color }}; }",
        )
        .unwrap();

        let templates = Templates::with_overrides(temp_dir.path()).unwrap();

        let css = templates
            .render(STYLESHEET_TEMPLATE, &serde_json::json!({ "color": "red" }))
            .unwrap();
        assert_eq!(css, "body { color: red; }");

        // templates without an override still come from the binary
        let html = templates
            .render(
                INDEX_TEMPLATE,
                &serde_json::json!({
                    "title": "Pets",
                    "assets_url": "assets",
                    "dom_id": "swagger-ui",
                }),
            )
            .unwrap();
        assert!(html.contains("<title>Pets</title>"));
    }

    #[test]
    fn test_missing_override_dir_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            Templates::with_overrides(&temp_dir.path().join("absent")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_template() {
        let templates = Templates::new().unwrap();
        assert!(matches!(
            templates.render("missing.html", &serde_json::json!({})),
            Err(Error::Template(_))
        ));
    }
}
