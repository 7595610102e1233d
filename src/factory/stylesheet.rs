use crate::config::model::{ResourceConfig, StyleConfig};

use super::{content_type, Body, ResourcePayload};

const EMPTY_STYLESHEET: &str = "html, body { height: 100vh; margin: 0; box-sizing: border-box; }
body { padding: 10px; }";

pub(crate) fn create_stylesheet(config: &StyleConfig) -> ResourcePayload {
    let mut stylesheet = EMPTY_STYLESHEET.to_string();
    if !config.background_color().is_empty() {
        stylesheet.push_str(&format!(
            "\nbody {{background-color: {}}}",
            config.background_color()
        ));
    }
    if !config.text_color().is_empty() {
        stylesheet.push_str(&format!("\nbody {{color: {}}}", config.text_color()));
    }

    ResourcePayload {
        config: ResourceConfig::Stylesheet(config.clone()),
        headers: content_type("text/css"),
        body: Body::Text(stylesheet),
    }
}

// CSS takes the same block-comment padding as script source.
pub use super::script::inject_script_bytes as inject_stylesheet_bytes;
