//! Data model of the Swagger UI bootstrap

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named API definition shown in the source selector of the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionUrl {
    /// Display name; an empty name falls back to the URL
    #[serde(default)]
    pub name: String,

    /// URL of the definition (normally openapi.json or swagger.yaml)
    pub url: String,
}

impl DefinitionUrl {
    /// Create a new named definition
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Create a definition named after its own URL
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            url,
        }
    }
}

/// OAuth2 settings forwarded to `ui.initOAuth`.
///
/// See https://swagger.io/docs/open-source-tools/swagger-ui/usage/oauth2/
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// The ID of the client sent to the OAuth2 provider
    #[serde(default)]
    pub client_id: String,

    /// The OAuth2 realm the client operates in; empty when not applicable
    #[serde(default)]
    pub realm: String,

    /// Application name displayed in the authorization popup
    #[serde(default)]
    pub app_name: String,
}

impl OAuthConfig {
    /// Create a new OAuth descriptor
    pub fn new(
        client_id: impl Into<String>,
        realm: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            realm: realm.into(),
            app_name: app_name.into(),
        }
    }
}

/// Default expansion of operations and tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Everything collapsed
    None,
    /// Tags expanded, operations collapsed
    #[default]
    List,
    /// Tags and operations expanded
    Full,
}

impl DocExpansion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocExpansion::None => "none",
            DocExpansion::List => "list",
            DocExpansion::Full => "full",
        }
    }
}

impl fmt::Display for DocExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntax highlighting of request and response bodies.
///
/// Serializes either as a plain boolean or as the structured
/// `{ activated, theme }` object the viewer accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyntaxHighlight {
    Enabled(bool),
    Options {
        #[serde(default = "default_activated")]
        activated: bool,
        theme: String,
    },
}

fn default_activated() -> bool {
    true
}

impl Default for SyntaxHighlight {
    fn default() -> Self {
        SyntaxHighlight::Enabled(true)
    }
}

impl From<bool> for SyntaxHighlight {
    fn from(enabled: bool) -> Self {
        SyntaxHighlight::Enabled(enabled)
    }
}
