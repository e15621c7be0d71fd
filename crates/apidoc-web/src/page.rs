//! Page Renderer
//!
//! Maps a [`SwaggerUiConfig`] onto the values substituted into the page
//! templates. Rendering is a pure function of the configuration record:
//! the same record always yields the same page, script and stylesheet.

use crate::templates::{Templates, INDEX_TEMPLATE, INITIALIZER_TEMPLATE, STYLESHEET_TEMPLATE};
use apidoc_common::types::{DefinitionUrl, DocExpansion, OAuthConfig, SyntaxHighlight};
use apidoc_common::{Result, SwaggerUiConfig};
use serde::Serialize;

/// Values substituted into the page templates
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub assets_url: &'a str,
    pub urls: &'a [DefinitionUrl],
    pub syntax_highlight: &'a SyntaxHighlight,
    pub deep_linking: bool,
    pub doc_expansion: DocExpansion,
    pub show_extensions: bool,
    pub persist_authorization: bool,
    pub dom_id: &'a str,
    pub oauth: Option<&'a OAuthConfig>,
    pub expose_global: bool,
    pub on_ready: Option<&'a str>,
}

impl<'a> PageContext<'a> {
    pub fn from_config(config: &'a SwaggerUiConfig) -> Self {
        Self {
            title: config.page_title(),
            assets_url: config.assets_url.trim_end_matches('/'),
            urls: &config.urls,
            syntax_highlight: &config.syntax_highlight,
            deep_linking: config.deep_linking,
            doc_expansion: config.doc_expansion,
            show_extensions: config.show_extensions,
            persist_authorization: config.persist_authorization,
            dom_id: &config.dom_id,
            oauth: config.oauth.as_ref(),
            expose_global: config.expose_global,
            on_ready: config.on_ready.as_deref().filter(|name| !name.is_empty()),
        }
    }
}

/// Renders the viewer page, its initializer script and its stylesheet
pub struct PageRenderer {
    templates: Templates,
}

impl PageRenderer {
    /// Renderer using the built-in templates
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: Templates::new()?,
        })
    }

    /// Renderer honouring the template overrides of `config`, if any
    pub fn for_config(config: &SwaggerUiConfig) -> Result<Self> {
        let templates = match &config.template_dir {
            Some(dir) => Templates::with_overrides(dir)?,
            None => Templates::new()?,
        };

        Ok(Self { templates })
    }

    /// Render the HTML page shell
    pub fn render_index(&self, config: &SwaggerUiConfig) -> Result<String> {
        self.templates
            .render(INDEX_TEMPLATE, &PageContext::from_config(config))
    }

    /// Render the script constructing the viewer
    pub fn render_initializer(&self, config: &SwaggerUiConfig) -> Result<String> {
        self.templates
            .render(INITIALIZER_TEMPLATE, &PageContext::from_config(config))
    }

    /// Render the page stylesheet
    pub fn render_stylesheet(&self, config: &SwaggerUiConfig) -> Result<String> {
        self.templates
            .render(STYLESHEET_TEMPLATE, &PageContext::from_config(config))
    }
}
