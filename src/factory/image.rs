use crate::config::model::{ImageConfig, ResourceConfig};

use super::{content_type, Body, ResourcePayload};

/// Image responses carry no meaningful bytes; only the rendered tag's
/// dimensions matter. The binary body keeps them out of text injection.
pub(crate) fn create_image(config: &ImageConfig) -> ResourcePayload {
    ResourcePayload {
        config: ResourceConfig::Image(config.clone()),
        headers: content_type("image/jpeg"),
        body: Body::Binary(Vec::new()),
    }
}
