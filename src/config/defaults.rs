//! Per-variant default tables and the merge layer on top of them.
//!
//! Absent fields and explicitly defaulted fields must serialize identically,
//! so defaults live here as explicit constants and every read goes through a
//! defaulted accessor instead of a spread-style merge.

use super::model::{
    ElementCreationMethod, ImageConfig, NetworkSettings, OriginPreference, PageConfig,
    ResourceConfig, ScriptActionConfig, ScriptActionType, ScriptConfig, ScriptInclusionType,
    StyleConfig, StylesheetInclusionType, TextConfig, is_network_resource,
};

pub const DEFAULT_STATUS_CODE: u16 = 200;
pub const DEFAULT_TIMEOUT_DELAY: u64 = 2000;
pub const DEFAULT_IMAGE_WIDTH: u32 = 100;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 100;
pub const DEFAULT_TEXT_CONTENT: &str = "Hello, Cuzillion!";

impl NetworkSettings {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn origin_preference(&self) -> OriginPreference {
        self.origin_preference.unwrap_or(OriginPreference::SameOrigin)
    }

    pub fn fetch_delay(&self) -> u64 {
        self.fetch_delay.unwrap_or(0)
    }

    pub fn redirect_count(&self) -> u32 {
        self.redirect_count.unwrap_or(0)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code.unwrap_or(DEFAULT_STATUS_CODE)
    }

    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes.unwrap_or(0)
    }

    pub fn with_defaults(&self) -> NetworkSettings {
        NetworkSettings {
            id: Some(self.id().to_string()),
            origin_preference: Some(self.origin_preference()),
            fetch_delay: Some(self.fetch_delay()),
            redirect_count: Some(self.redirect_count()),
            status_code: Some(self.status_code()),
            size_in_bytes: Some(self.size_in_bytes()),
        }
    }
}

impl PageConfig {
    pub fn head(&self) -> &[ResourceConfig] {
        self.head.as_deref().unwrap_or_default()
    }

    pub fn body(&self) -> &[ResourceConfig] {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn with_defaults(&self) -> PageConfig {
        PageConfig {
            head: Some(self.head().to_vec()),
            body: Some(self.body().to_vec()),
            network: self.network.with_defaults(),
        }
    }
}

impl ScriptConfig {
    pub fn creation_method(&self) -> ElementCreationMethod {
        self.creation_method.unwrap_or(ElementCreationMethod::Html)
    }

    pub fn execution_duration(&self) -> u64 {
        self.execution_duration.unwrap_or(0)
    }

    pub fn inclusion_type(&self) -> ScriptInclusionType {
        self.inclusion_type.unwrap_or(ScriptInclusionType::External)
    }

    pub fn actions(&self) -> &[ResourceConfig] {
        self.actions.as_deref().unwrap_or_default()
    }

    pub fn with_defaults(&self) -> ScriptConfig {
        ScriptConfig {
            creation_method: Some(self.creation_method()),
            execution_duration: Some(self.execution_duration()),
            inclusion_type: Some(self.inclusion_type()),
            actions: Some(self.actions().to_vec()),
            network: self.network.with_defaults(),
        }
    }
}

impl ScriptActionConfig {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn action_type(&self) -> ScriptActionType {
        self.action_type.unwrap_or(ScriptActionType::Stall)
    }

    pub fn execution_duration(&self) -> u64 {
        self.execution_duration.unwrap_or(0)
    }

    pub fn timeout_delay(&self) -> u64 {
        self.timeout_delay.unwrap_or(DEFAULT_TIMEOUT_DELAY)
    }

    /// The resource an element/request action operates on. Defaults to a
    /// bare text resource, matching the trimmed wire form.
    pub fn dependent(&self) -> ResourceConfig {
        self.dependent
            .as_deref()
            .cloned()
            .unwrap_or_else(default_dependent)
    }

    pub fn on_complete(&self) -> &[ResourceConfig] {
        self.on_complete.as_deref().unwrap_or_default()
    }

    pub fn with_defaults(&self) -> ScriptActionConfig {
        ScriptActionConfig {
            id: Some(self.id().to_string()),
            action_type: Some(self.action_type()),
            execution_duration: Some(self.execution_duration()),
            timeout_delay: Some(self.timeout_delay()),
            dependent: Some(Box::new(self.dependent())),
            on_complete: Some(self.on_complete().to_vec()),
        }
    }
}

impl StyleConfig {
    pub fn creation_method(&self) -> ElementCreationMethod {
        self.creation_method.unwrap_or(ElementCreationMethod::Html)
    }

    pub fn inclusion_type(&self) -> StylesheetInclusionType {
        self.inclusion_type.unwrap_or(StylesheetInclusionType::External)
    }

    pub fn background_color(&self) -> &str {
        self.background_color.as_deref().unwrap_or("")
    }

    pub fn text_color(&self) -> &str {
        self.text_color.as_deref().unwrap_or("")
    }

    pub fn with_defaults(&self) -> StyleConfig {
        StyleConfig {
            creation_method: Some(self.creation_method()),
            inclusion_type: Some(self.inclusion_type()),
            background_color: Some(self.background_color().to_string()),
            text_color: Some(self.text_color().to_string()),
            network: self.network.with_defaults(),
        }
    }
}

impl ImageConfig {
    pub fn creation_method(&self) -> ElementCreationMethod {
        self.creation_method.unwrap_or(ElementCreationMethod::Html)
    }

    pub fn width(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_IMAGE_WIDTH)
    }

    pub fn height(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_IMAGE_HEIGHT)
    }

    pub fn with_defaults(&self) -> ImageConfig {
        ImageConfig {
            creation_method: Some(self.creation_method()),
            width: Some(self.width()),
            height: Some(self.height()),
            network: self.network.with_defaults(),
        }
    }
}

impl TextConfig {
    pub fn creation_method(&self) -> ElementCreationMethod {
        self.creation_method.unwrap_or(ElementCreationMethod::Html)
    }

    pub fn text_content(&self) -> &str {
        self.text_content.as_deref().unwrap_or(DEFAULT_TEXT_CONTENT)
    }

    pub fn with_defaults(&self) -> TextConfig {
        TextConfig {
            creation_method: Some(self.creation_method()),
            text_content: Some(self.text_content().to_string()),
            network: self.network.with_defaults(),
        }
    }
}

/// The default `dependent` of a script action: an untouched text resource.
pub fn default_dependent() -> ResourceConfig {
    ResourceConfig::Text(TextConfig::default())
}

impl ResourceConfig {
    /// Fully-populated copy of this node. Shallow: children keep their own
    /// sparseness and are hydrated by their own visit during a walk.
    /// Idempotent and total over every variant.
    pub fn with_defaults(&self) -> ResourceConfig {
        match self {
            ResourceConfig::Page(c) => ResourceConfig::Page(c.with_defaults()),
            ResourceConfig::Script(c) => ResourceConfig::Script(c.with_defaults()),
            ResourceConfig::ScriptAction(c) => ResourceConfig::ScriptAction(c.with_defaults()),
            ResourceConfig::Stylesheet(c) => ResourceConfig::Stylesheet(c.with_defaults()),
            ResourceConfig::Image(c) => ResourceConfig::Image(c.with_defaults()),
            ResourceConfig::Text(c) => ResourceConfig::Text(c.with_defaults()),
        }
    }
}

/// Whether any variant-specific field differs from the variant's defaults.
/// Absent fields count as default; `id` and network settings are not
/// considered.
pub fn has_non_default_type_settings(config: &ResourceConfig) -> bool {
    match config {
        ResourceConfig::Page(c) => !c.head().is_empty() || !c.body().is_empty(),
        ResourceConfig::Script(c) => {
            c.creation_method() != ElementCreationMethod::Html
                || c.execution_duration() != 0
                || c.inclusion_type() != ScriptInclusionType::External
                || !c.actions().is_empty()
        }
        ResourceConfig::ScriptAction(c) => {
            c.action_type() != ScriptActionType::Stall
                || c.execution_duration() != 0
                || c.timeout_delay() != DEFAULT_TIMEOUT_DELAY
                || c.dependent() != default_dependent()
                || !c.on_complete().is_empty()
        }
        ResourceConfig::Stylesheet(c) => {
            c.creation_method() != ElementCreationMethod::Html
                || c.inclusion_type() != StylesheetInclusionType::External
                || !c.background_color().is_empty()
                || !c.text_color().is_empty()
        }
        ResourceConfig::Image(c) => {
            c.creation_method() != ElementCreationMethod::Html
                || c.width() != DEFAULT_IMAGE_WIDTH
                || c.height() != DEFAULT_IMAGE_HEIGHT
        }
        ResourceConfig::Text(c) => {
            c.creation_method() != ElementCreationMethod::Html
                || c.text_content() != DEFAULT_TEXT_CONTENT
        }
    }
}

/// Whether any network setting differs from the defaults. The auto-assigned
/// `id` is ignored so a freshly id'd tree still reads as default.
pub fn has_non_default_network_settings(config: &ResourceConfig) -> bool {
    if !is_network_resource(config, None) {
        return false;
    }
    let Some(network) = config.network() else {
        return false;
    };
    network.origin_preference() != OriginPreference::SameOrigin
        || network.fetch_delay() != 0
        || network.redirect_count() != 0
        || network.status_code() != DEFAULT_STATUS_CODE
        || network.size_in_bytes() != 0
}
