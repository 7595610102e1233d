use serde::{Deserialize, Serialize};

/// Which of the configured server origins a resource link should target.
/// Preferences beyond the configured origin count degrade to the last
/// available origin instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginPreference {
    #[serde(rename = "/")]
    SameOrigin,
    #[serde(rename = "p1")]
    Primary,
    #[serde(rename = "p2")]
    Secondary,
    #[serde(rename = "p3")]
    Tertiary,
    #[serde(rename = "p4")]
    Quaternary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptInclusionType {
    #[serde(rename = "external")]
    External,
    #[serde(rename = "defer")]
    ExternalDefer,
    #[serde(rename = "async")]
    ExternalAsync,
    #[serde(rename = "inline")]
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylesheetInclusionType {
    #[serde(rename = "external")]
    External,
    #[serde(rename = "async")]
    ExternalAsync,
    #[serde(rename = "inline")]
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptActionType {
    #[serde(rename = "stall")]
    Stall,
    #[serde(rename = "timeout")]
    SetTimeout,
    #[serde(rename = "load")]
    LoadListener,
    #[serde(rename = "dcl")]
    DclListener,
    #[serde(rename = "xhr")]
    Xhr,
    #[serde(rename = "syncxhr")]
    SyncXhr,
    #[serde(rename = "fetch")]
    Fetch,
    #[serde(rename = "element")]
    AddElement,
    #[serde(rename = "redirect")]
    Redirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementCreationMethod {
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "docwrite")]
    DocumentWrite,
}

/// Settings shared by every independently fetchable resource. All fields are
/// optional so that an absent field stays distinguishable from one the caller
/// explicitly set to the default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_preference: Option<OriginPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Vec<ResourceConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<ResourceConfig>>,
    #[serde(flatten)]
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_method: Option<ElementCreationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion_type: Option<ScriptInclusionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ResourceConfig>>,
    #[serde(flatten)]
    pub network: NetworkSettings,
}

/// A script-level behavior with an optional continuation. Never a network
/// resource of its own: only its `dependent` may be fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptActionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ScriptActionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent: Option<Box<ResourceConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_complete: Option<Vec<ResourceConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_method: Option<ElementCreationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion_type: Option<StylesheetInclusionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(flatten)]
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_method: Option<ElementCreationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(flatten)]
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_method: Option<ElementCreationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(flatten)]
    pub network: NetworkSettings,
}

/// The recursive description of a page's resources and behaviors. The short
/// discriminant key/values are the wire encoding carried in `config` URL
/// parameters, so they serialize compactly without a rewrite pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ResourceConfig {
    #[serde(rename = "p")]
    Page(PageConfig),
    #[serde(rename = "js")]
    Script(ScriptConfig),
    #[serde(rename = "jsa")]
    ScriptAction(ScriptActionConfig),
    #[serde(rename = "css")]
    Stylesheet(StyleConfig),
    #[serde(rename = "img")]
    Image(ImageConfig),
    #[serde(rename = "txt")]
    Text(TextConfig),
}

/// Discriminant of a config node, used for routing and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Page,
    Script,
    ScriptAction,
    Stylesheet,
    Image,
    Text,
}

impl std::fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConfigKind::Page => "page",
            ConfigKind::Script => "script",
            ConfigKind::ScriptAction => "script action",
            ConfigKind::Stylesheet => "stylesheet",
            ConfigKind::Image => "image",
            ConfigKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

impl ResourceConfig {
    pub fn kind(&self) -> ConfigKind {
        match self {
            ResourceConfig::Page(_) => ConfigKind::Page,
            ResourceConfig::Script(_) => ConfigKind::Script,
            ResourceConfig::ScriptAction(_) => ConfigKind::ScriptAction,
            ResourceConfig::Stylesheet(_) => ConfigKind::Stylesheet,
            ResourceConfig::Image(_) => ConfigKind::Image,
            ResourceConfig::Text(_) => ConfigKind::Text,
        }
    }

    /// Network settings for the variants that carry them. `ScriptAction` is
    /// the only variant without any.
    pub fn network(&self) -> Option<&NetworkSettings> {
        match self {
            ResourceConfig::Page(c) => Some(&c.network),
            ResourceConfig::Script(c) => Some(&c.network),
            ResourceConfig::Stylesheet(c) => Some(&c.network),
            ResourceConfig::Image(c) => Some(&c.network),
            ResourceConfig::Text(c) => Some(&c.network),
            ResourceConfig::ScriptAction(_) => None,
        }
    }

    pub fn network_mut(&mut self) -> Option<&mut NetworkSettings> {
        match self {
            ResourceConfig::Page(c) => Some(&mut c.network),
            ResourceConfig::Script(c) => Some(&mut c.network),
            ResourceConfig::Stylesheet(c) => Some(&mut c.network),
            ResourceConfig::Image(c) => Some(&mut c.network),
            ResourceConfig::Text(c) => Some(&mut c.network),
            ResourceConfig::ScriptAction(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ResourceConfig::ScriptAction(c) => c.id.as_deref(),
            _ => self.network().and_then(|n| n.id.as_deref()),
        }
    }

    pub fn set_id(&mut self, id: String) {
        match self {
            ResourceConfig::ScriptAction(c) => c.id = Some(id),
            _ => {
                if let Some(network) = self.network_mut() {
                    network.id = Some(id);
                }
            }
        }
    }

    pub fn creation_method(&self) -> ElementCreationMethod {
        let method = match self {
            ResourceConfig::Script(c) => c.creation_method,
            ResourceConfig::Stylesheet(c) => c.creation_method,
            ResourceConfig::Image(c) => c.creation_method,
            ResourceConfig::Text(c) => c.creation_method,
            ResourceConfig::Page(_) | ResourceConfig::ScriptAction(_) => None,
        };
        method.unwrap_or(ElementCreationMethod::Html)
    }
}

/// Whether `config` is independently retrievable via its own URL. Script
/// actions never are, and text directly under a page renders inline instead
/// of being fetched.
pub fn is_network_resource(config: &ResourceConfig, parent: Option<&ResourceConfig>) -> bool {
    match config {
        ResourceConfig::ScriptAction(_) => false,
        ResourceConfig::Text(_) => !matches!(parent, Some(ResourceConfig::Page(_))),
        _ => true,
    }
}
