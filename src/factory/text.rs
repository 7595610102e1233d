use rand::Rng;

use crate::config::model::{ResourceConfig, TextConfig};

use super::errors::FactoryError;
use super::{content_type, Body, ResourcePayload};

const LOREM_IPSUM: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Maecenas quis mi interdum, scelerisque nibh volutpat, mattis ligula.",
    "Sed lobortis nunc quis aliquet fringilla.",
    "Pellentesque habitant morbi tristique senectus et netus et malesuada fames ac turpis egestas.",
    "Nullam condimentum dapibus erat et suscipit.",
    "Cras vitae consectetur lorem.",
    "Vivamus ornare ornare erat, et scelerisque augue aliquet eu.",
    "Integer consectetur justo eu cursus luctus.",
    "Nullam in augue ex.",
    "Nunc dui libero, fringilla non varius vel, ultricies id velit.",
    "Pellentesque facilisis nibh sed turpis tincidunt pharetra.",
    "Nam ut tellus purus.",
    "Proin euismod odio magna, non varius nisl congue ac.",
    "Ut pretium augue consequat tristique ornare.",
    "Nullam molestie ante quis dolor fermentum, ac pellentesque nibh posuere.",
];

pub(crate) fn create_text(config: &TextConfig) -> ResourcePayload {
    ResourcePayload {
        config: ResourceConfig::Text(config.clone()),
        headers: content_type("text/plain"),
        body: Body::Text(config.text_content().to_string()),
    }
}

/// Pad text to exactly `total_byte_target` bytes with randomly chosen filler
/// phrases after a joining newline. Phrase choice is random, the final
/// length is not.
pub fn inject_text_bytes(body: &str, total_byte_target: usize) -> Result<String, FactoryError> {
    let minimum = body.len() + 1;
    let bytes_needed = total_byte_target
        .checked_sub(minimum)
        .ok_or(FactoryError::InjectionTargetTooSmall {
            target: total_byte_target,
            minimum,
        })?;

    let mut rng = rand::thread_rng();
    let mut injection = String::with_capacity(bytes_needed + 96);
    while injection.len() < bytes_needed {
        injection.push_str(LOREM_IPSUM[rng.gen_range(0..LOREM_IPSUM.len())]);
        injection.push(' ');
    }
    // The phrase pool is ASCII, so byte truncation cannot split a character.
    injection.truncate(bytes_needed);

    Ok(format!("{}\n{}", body, injection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_injection_is_byte_exact() {
        for target in [64, 65, 1000, 4096] {
            let padded = inject_text_bytes("short text", target).unwrap();
            assert_eq!(padded.len(), target);
        }
    }

    #[test]
    fn text_injection_rejects_targets_below_the_body() {
        assert!(inject_text_bytes("short text", 5).is_err());
    }
}
