//! Compiles config trees into concrete HTTP response payloads: bodies,
//! content-type headers, and links for everything independently fetchable.
//! Pure value-in/value-out; delays, redirect chains, and status codes are
//! the HTTP layer's business.

pub mod errors;
pub mod image;
pub mod page;
pub mod script;
pub mod stylesheet;
pub mod text;

use std::collections::HashMap;

use crate::config::model::{ConfigKind, OriginPreference, ResourceConfig};
use crate::serialization::serialize_config;

use self::errors::FactoryError;

/// A response body. Only text bodies support byte injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Binary(Vec<u8>),
}

impl Body {
    pub fn len(&self) -> usize {
        match self {
            Body::Text(s) => s.len(),
            Body::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(s) => s.as_bytes(),
            Body::Binary(b) => b,
        }
    }
}

/// What a resource renders to, minus the link `create` attaches.
#[derive(Debug, Clone)]
pub struct ResourcePayload {
    pub config: ResourceConfig,
    pub headers: HashMap<String, String>,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct NetworkResourceResponse {
    pub link: String,
    pub config: ResourceConfig,
    pub headers: HashMap<String, String>,
    pub body: Body,
}

pub struct Factory {
    url_map: HashMap<ConfigKind, String>,
    origins: Vec<String>,
}

impl Factory {
    pub fn new(url_map: HashMap<ConfigKind, String>, origins: Vec<String>) -> Self {
        Factory { url_map, origins }
    }

    pub fn default_url_map() -> HashMap<ConfigKind, String> {
        HashMap::from([
            (ConfigKind::Page, "/api/page.html".to_string()),
            (ConfigKind::Script, "/api/script.js".to_string()),
            (ConfigKind::Stylesheet, "/api/style.css".to_string()),
            (ConfigKind::Image, "/api/image.jpg".to_string()),
            (ConfigKind::Text, "/api/text.txt".to_string()),
        ])
    }

    /// Origins from the `CUZILLION_ORIGINS` env var, whitespace-separated.
    pub fn default_origins() -> Vec<String> {
        std::env::var("CUZILLION_ORIGINS")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
            .map(str::to_string)
            .collect()
    }

    pub fn default_instance() -> Self {
        Factory::new(Factory::default_url_map(), Factory::default_origins())
    }

    pub fn set_origins(&mut self, origins: Vec<String>) {
        self.origins = origins;
    }

    pub fn route_for(&self, kind: ConfigKind) -> Option<&str> {
        self.url_map.get(&kind).map(String::as_str)
    }

    pub fn kind_for_route(&self, path: &str) -> Option<ConfigKind> {
        self.url_map
            .iter()
            .find(|(_, route)| route.as_str() == path)
            .map(|(kind, _)| *kind)
    }

    /// The URL for a resource: its kind's route with the serialized config
    /// attached, made absolute when the config prefers a cross origin.
    /// Preferences past the configured origin count degrade to the last
    /// available origin.
    pub fn get_link_to(&self, config: &ResourceConfig) -> Result<String, FactoryError> {
        let route = self
            .route_for(config.kind())
            .ok_or(FactoryError::UnsupportedResource(config.kind()))?;
        let path = format!(
            "{}?config={}",
            route,
            urlencoding::encode(&serialize_config(config))
        );

        let preference = match config.network() {
            Some(network) => network.origin_preference(),
            None => OriginPreference::SameOrigin,
        };
        let requested = match preference {
            OriginPreference::SameOrigin => return Ok(path),
            OriginPreference::Primary => 0,
            OriginPreference::Secondary => 1,
            OriginPreference::Tertiary => 2,
            OriginPreference::Quaternary => 3,
        };
        match self.origins.len() {
            0 => Ok(path),
            n => Ok(format!("{}{}", self.origins[requested.min(n - 1)], path)),
        }
    }

    pub fn create(&self, config: &ResourceConfig) -> Result<NetworkResourceResponse, FactoryError> {
        let payload = match config {
            ResourceConfig::Page(page) => page::create_page(page, self)?,
            ResourceConfig::Script(script) => script::create_script(script, self)?,
            ResourceConfig::Stylesheet(style) => stylesheet::create_stylesheet(style),
            ResourceConfig::Image(image) => image::create_image(image),
            ResourceConfig::Text(text) => text::create_text(text),
            ResourceConfig::ScriptAction(_) => {
                return Err(FactoryError::UnsupportedResource(ConfigKind::ScriptAction))
            }
        };

        Ok(NetworkResourceResponse {
            link: self.get_link_to(config)?,
            config: payload.config,
            headers: payload.headers,
            body: payload.body,
        })
    }

    /// Pad `body` so its final byte length equals the config's
    /// `sizeInBytes` exactly. No-op when no target is set or the body
    /// already meets it.
    pub fn inject_bytes(&self, config: &ResourceConfig, body: Body) -> Result<Body, FactoryError> {
        let target = match config.network() {
            Some(network) => network.size_in_bytes(),
            None => 0,
        };
        if target == 0 || body.len() >= target {
            return Ok(body);
        }
        let Body::Text(current) = body else {
            return Err(FactoryError::BinaryInjection(config.kind()));
        };

        let padded = match config.kind() {
            ConfigKind::Page => page::inject_page_bytes(&current, target)?,
            ConfigKind::Script => script::inject_script_bytes(&current, target)?,
            ConfigKind::Stylesheet => stylesheet::inject_stylesheet_bytes(&current, target)?,
            ConfigKind::Text => text::inject_text_bytes(&current, target)?,
            kind => return Err(FactoryError::UnsupportedInjection(kind)),
        };
        Ok(Body::Text(padded))
    }
}

fn content_type(value: &str) -> HashMap<String, String> {
    HashMap::from([("content-type".to_string(), value.to_string())])
}

/// JSON-style string quoting, shared by every path that embeds a link or an
/// HTML fragment inside generated markup or script source.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Escaping for markup embedded in a `document.write` template literal. The
/// closing script tag must be split so it cannot terminate the wrapping
/// `<script>` element.
pub(crate) fn escape_template_literal(html: &str) -> String {
    html.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("</script>", "<` + `/script>")
}
