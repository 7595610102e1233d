//! Transport codec for config trees: trim fields equal to the variant
//! defaults, JSON-encode with the short discriminant, base64. Decoding runs
//! the same steps backwards and rehydrates the defaults, so two configs that
//! differ only in default-valued fields serialize identically.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::debug;

use crate::config::defaults::{
    default_dependent, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, DEFAULT_STATUS_CODE,
    DEFAULT_TEXT_CONTENT, DEFAULT_TIMEOUT_DELAY,
};
use crate::config::model::{
    ElementCreationMethod, NetworkSettings, OriginPreference, ResourceConfig,
    ScriptActionType, ScriptInclusionType, StylesheetInclusionType,
};
use crate::config::walk::walk_config_mut;

pub fn serialize_config(config: &ResourceConfig) -> String {
    let mut trimmed = config.clone();
    walk_config_mut(&mut trimmed, &mut trim_node);
    // JSON encoding of a config tree cannot fail: every node is a struct of
    // plain fields behind a struct-variant tag.
    let json = serde_json::to_string(&trimmed).expect("config trees serialize to JSON");
    BASE64.encode(json)
}

/// Decode a transport string back into a fully-hydrated config. Any failure
/// (bad base64, bad UTF-8, bad JSON, missing or unknown discriminant) maps to
/// `None`; malformed input is never "fixed" into a best-guess config.
pub fn deserialize_config(s: &str) -> Option<ResourceConfig> {
    match try_deserialize(s) {
        Ok(config) => Some(config),
        Err(err) => {
            debug!("config validation error: {}", err);
            None
        }
    }
}

/// Fill every absent field of every node with its variant default, in place.
pub fn hydrate_config(config: &mut ResourceConfig) {
    walk_config_mut(config, &mut |node| {
        *node = node.with_defaults();
    });
}

fn try_deserialize(s: &str) -> Result<ResourceConfig, String> {
    let bytes = BASE64
        .decode(s.trim())
        .map_err(|e| format!("invalid base64: {}", e))?;
    let json = String::from_utf8(bytes).map_err(|e| format!("invalid utf-8: {}", e))?;
    let mut config: ResourceConfig =
        serde_json::from_str(&json).map_err(|e| format!("invalid config: {}", e))?;
    hydrate_config(&mut config);
    Ok(config)
}

fn trim_field<T: PartialEq>(field: &mut Option<T>, default: &T) {
    if field.as_ref() == Some(default) {
        *field = None;
    }
}

fn trim_empty_list(field: &mut Option<Vec<ResourceConfig>>) {
    if field.as_ref().is_some_and(|list| list.is_empty()) {
        *field = None;
    }
}

fn trim_network(network: &mut NetworkSettings) {
    trim_field(&mut network.id, &String::new());
    trim_field(&mut network.origin_preference, &OriginPreference::SameOrigin);
    trim_field(&mut network.fetch_delay, &0);
    trim_field(&mut network.redirect_count, &0);
    trim_field(&mut network.status_code, &DEFAULT_STATUS_CODE);
    trim_field(&mut network.size_in_bytes, &0);
}

fn trim_node(config: &mut ResourceConfig) {
    match config {
        ResourceConfig::Page(page) => {
            trim_network(&mut page.network);
            trim_empty_list(&mut page.head);
            trim_empty_list(&mut page.body);
        }
        ResourceConfig::Script(script) => {
            trim_network(&mut script.network);
            trim_field(&mut script.creation_method, &ElementCreationMethod::Html);
            trim_field(&mut script.execution_duration, &0);
            trim_field(&mut script.inclusion_type, &ScriptInclusionType::External);
            trim_empty_list(&mut script.actions);
        }
        ResourceConfig::ScriptAction(action) => {
            trim_field(&mut action.id, &String::new());
            trim_field(&mut action.action_type, &ScriptActionType::Stall);
            trim_field(&mut action.execution_duration, &0);
            trim_field(&mut action.timeout_delay, &DEFAULT_TIMEOUT_DELAY);
            trim_field(&mut action.dependent, &Box::new(default_dependent()));
            trim_empty_list(&mut action.on_complete);
        }
        ResourceConfig::Stylesheet(style) => {
            trim_network(&mut style.network);
            trim_field(&mut style.creation_method, &ElementCreationMethod::Html);
            trim_field(&mut style.inclusion_type, &StylesheetInclusionType::External);
            trim_field(&mut style.background_color, &String::new());
            trim_field(&mut style.text_color, &String::new());
        }
        ResourceConfig::Image(image) => {
            trim_network(&mut image.network);
            trim_field(&mut image.creation_method, &ElementCreationMethod::Html);
            trim_field(&mut image.width, &DEFAULT_IMAGE_WIDTH);
            trim_field(&mut image.height, &DEFAULT_IMAGE_HEIGHT);
        }
        ResourceConfig::Text(text) => {
            trim_network(&mut text.network);
            trim_field(&mut text.creation_method, &ElementCreationMethod::Html);
            trim_field(&mut text.text_content, &DEFAULT_TEXT_CONTENT.to_string());
        }
    }
}
