//! Configuration for apidoc

use crate::types::{DefinitionUrl, DocExpansion, OAuthConfig, SyntaxHighlight};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "APIDOC_CONFIG";

/// Prefix of environment overrides, e.g. `APIDOC_SERVER__BIND`
pub const ENV_PREFIX: &str = "APIDOC";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Swagger UI configuration
    #[serde(default)]
    pub swagger: SwaggerUiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "json" or "text"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info,apidoc=debug".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Swagger UI configuration record.
///
/// Everything the page renderer substitutes into its templates, plus the
/// settings of the server that serves the rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerUiConfig {
    /// Page title shown by the browser
    #[serde(default)]
    pub title: String,

    /// Directory holding definition files
    #[serde(default = "default_doc_dir")]
    pub doc_dir: PathBuf,

    /// URL prefix the UI is mounted under
    #[serde(default)]
    pub path_prefix: String,

    /// Serve `index.html` from `doc_dir` instead of rendering it
    #[serde(default)]
    pub disable_index_template: bool,

    /// Directory with template overrides
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Base URL of the swagger-ui distribution files
    #[serde(default = "default_assets_url")]
    pub assets_url: String,

    /// Definitions listed in the source selector, in display order
    #[serde(default)]
    pub urls: Vec<DefinitionUrl>,

    /// Default expansion: none, list or full
    #[serde(default)]
    pub doc_expansion: DocExpansion,

    /// Show vendor extension (`x-`) fields
    #[serde(default = "default_true")]
    pub show_extensions: bool,

    /// Id of the element the viewer mounts into
    #[serde(default = "default_dom_id")]
    pub dom_id: String,

    /// Enable deep linking to tags and operations
    #[serde(default = "default_true")]
    pub deep_linking: bool,

    /// Persist authorization data over browser close/refresh
    #[serde(default)]
    pub persist_authorization: bool,

    /// Syntax highlighting, either a flag or `{ activated, theme }`
    #[serde(default)]
    pub syntax_highlight: SyntaxHighlight,

    /// Keep the constructed viewer reachable as `window.ui`
    #[serde(default = "default_true")]
    pub expose_global: bool,

    /// Name of a host page function called with the constructed viewer
    #[serde(default)]
    pub on_ready: Option<String>,

    /// OAuth2 integration, if any
    #[serde(default)]
    pub oauth: Option<OAuthConfig>,
}

fn default_doc_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_assets_url() -> String {
    "https://unpkg.com/swagger-ui-dist@5".to_string()
}

fn default_dom_id() -> String {
    "swagger-ui".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SwaggerUiConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            doc_dir: default_doc_dir(),
            path_prefix: String::new(),
            disable_index_template: false,
            template_dir: None,
            assets_url: default_assets_url(),
            urls: Vec::new(),
            doc_expansion: DocExpansion::List,
            show_extensions: true,
            dom_id: default_dom_id(),
            deep_linking: true,
            persist_authorization: false,
            syntax_highlight: SyntaxHighlight::Enabled(true),
            expose_global: true,
            on_ready: None,
            oauth: None,
        }
    }
}

impl SwaggerUiConfig {
    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the documentation directory
    pub fn with_doc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.doc_dir = dir.into();
        self
    }

    /// Set the URL prefix
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Serve `index.html` from the documentation directory as is
    pub fn with_disable_index_template(mut self, disable: bool) -> Self {
        self.disable_index_template = disable;
        self
    }

    /// Add a definition named after its URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(DefinitionUrl::from_url(url));
        self
    }

    /// Add a named definition
    pub fn with_definition_url(mut self, definition: DefinitionUrl) -> Self {
        self.urls.push(definition);
        self
    }

    pub fn with_doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    pub fn with_show_extensions(mut self, show: bool) -> Self {
        self.show_extensions = show;
        self
    }

    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = dom_id.into();
        self
    }

    pub fn with_deep_linking(mut self, deep_linking: bool) -> Self {
        self.deep_linking = deep_linking;
        self
    }

    pub fn with_persist_authorization(mut self, enable: bool) -> Self {
        self.persist_authorization = enable;
        self
    }

    pub fn with_syntax_highlight(mut self, highlight: impl Into<SyntaxHighlight>) -> Self {
        self.syntax_highlight = highlight.into();
        self
    }

    pub fn with_oauth(mut self, oauth: OAuthConfig) -> Self {
        self.oauth = Some(oauth);
        self
    }

    pub fn with_on_ready(mut self, callback: impl Into<String>) -> Self {
        self.on_ready = Some(callback.into());
        self
    }

    pub fn with_expose_global(mut self, expose: bool) -> Self {
        self.expose_global = expose;
        self
    }

    /// Give every unnamed definition its URL as name
    pub fn fill_missing_names(&mut self) {
        for definition in &mut self.urls {
            if definition.name.is_empty() {
                definition.name = definition.url.clone();
            }
        }
    }

    /// Page title, falling back to "API Doc"
    pub fn page_title(&self) -> &str {
        if self.title.is_empty() {
            "API Doc"
        } else {
            &self.title
        }
    }

    /// Mount prefix normalized to a single leading slash and no trailing slash.
    ///
    /// Returns `None` when the UI is mounted at the root.
    pub fn mount_prefix(&self) -> Option<String> {
        let trimmed = self.path_prefix.trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("/{}", trimmed))
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, layered with
    /// `APIDOC_*` environment overrides.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> crate::Result<Self> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => [
                PathBuf::from("./apidoc.toml"),
                PathBuf::from("/etc/apidoc/apidoc.toml"),
            ]
            .into_iter()
            .find(|path| path.exists()),
        };

        Self::load_from(path.as_deref())
    }

    /// Load configuration from an optional file plus environment overrides
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::Error::Config(format!("Failed to load config: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }
}
