use std::collections::HashSet;

use cuzillion::config::defaults::{has_non_default_network_settings, has_non_default_type_settings};
use cuzillion::config::model::{
    is_network_resource, NetworkSettings, PageConfig, ResourceConfig, ScriptActionConfig,
    ScriptConfig, StyleConfig, TextConfig,
};
use cuzillion::config::walk::{initialize_ids, walk_config};
use pretty_assertions::assert_eq;

fn page_with_body(body: Vec<ResourceConfig>) -> ResourceConfig {
    ResourceConfig::Page(PageConfig {
        body: Some(body),
        ..PageConfig::default()
    })
}

fn script() -> ResourceConfig {
    ResourceConfig::Script(ScriptConfig::default())
}

#[test]
fn initializes_ids_on_an_empty_config() {
    let mut config = page_with_body(vec![script()]);

    initialize_ids(&mut config);

    assert_eq!(config.id(), Some("1"));
    let ResourceConfig::Page(page) = &config else {
        panic!("expected a page");
    };
    assert_eq!(page.body()[0].id(), Some("2"));
}

#[test]
fn initializes_ids_on_a_partially_filled_config() {
    let mut config = ResourceConfig::Page(PageConfig {
        network: NetworkSettings {
            id: Some("2".to_string()),
            ..NetworkSettings::default()
        },
        body: Some(vec![
            script(),
            ResourceConfig::Stylesheet(StyleConfig {
                network: NetworkSettings {
                    id: Some("3".to_string()),
                    ..NetworkSettings::default()
                },
                ..StyleConfig::default()
            }),
        ]),
        ..PageConfig::default()
    });

    initialize_ids(&mut config);

    assert_eq!(config.id(), Some("2"));
    let ResourceConfig::Page(page) = &config else {
        panic!("expected a page");
    };
    assert_eq!(page.body()[0].id(), Some("4"));
    assert_eq!(page.body()[1].id(), Some("3"));
}

#[test]
fn assigned_ids_are_unique_and_above_existing_ones() {
    let mut config = page_with_body(vec![
        script(),
        ResourceConfig::Script(ScriptConfig {
            network: NetworkSettings {
                id: Some("7".to_string()),
                ..NetworkSettings::default()
            },
            actions: Some(vec![ResourceConfig::ScriptAction(ScriptActionConfig {
                on_complete: Some(vec![ResourceConfig::ScriptAction(
                    ScriptActionConfig::default(),
                )]),
                ..ScriptActionConfig::default()
            })]),
            ..ScriptConfig::default()
        }),
        ResourceConfig::Text(TextConfig::default()),
    ]);

    initialize_ids(&mut config);

    let mut ids = Vec::new();
    walk_config(&config, &mut |node| {
        ids.push(node.id().expect("every node gets an id").to_string());
    });

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    for id in &ids {
        let numeric: u64 = id.parse().expect("ids are numeric");
        assert!(id == "7" || numeric > 7, "new id {} must exceed the pre-set max", id);
    }
}

#[test]
fn with_defaults_is_idempotent() {
    let configs = [
        ResourceConfig::Page(PageConfig::default()),
        script(),
        ResourceConfig::ScriptAction(ScriptActionConfig::default()),
        ResourceConfig::Stylesheet(StyleConfig::default()),
        ResourceConfig::Text(TextConfig::default()),
    ];

    for config in configs {
        let once = config.with_defaults();
        assert_eq!(once.with_defaults(), once);
    }
}

#[test]
fn text_is_a_network_resource_except_under_a_page() {
    let text = ResourceConfig::Text(TextConfig::default());
    let page = ResourceConfig::Page(PageConfig::default());
    let action = ResourceConfig::ScriptAction(ScriptActionConfig::default());

    assert!(is_network_resource(&text, None));
    assert!(!is_network_resource(&text, Some(&page)));
    assert!(is_network_resource(&text, Some(&action)));
    assert!(!is_network_resource(&action, None));
    assert!(is_network_resource(&page, None));
}

#[test]
fn detects_non_default_type_settings() {
    assert!(!has_non_default_type_settings(&script()));
    assert!(has_non_default_type_settings(&ResourceConfig::Script(
        ScriptConfig {
            execution_duration: Some(50),
            ..ScriptConfig::default()
        }
    )));
    assert!(!has_non_default_type_settings(&ResourceConfig::Page(
        PageConfig {
            head: Some(vec![]),
            ..PageConfig::default()
        }
    )));
}

#[test]
fn detects_non_default_network_settings_ignoring_id() {
    let plain = ResourceConfig::Page(PageConfig {
        network: NetworkSettings {
            id: Some("12".to_string()),
            ..NetworkSettings::default()
        },
        ..PageConfig::default()
    });
    assert!(!has_non_default_network_settings(&plain));

    let with_status = ResourceConfig::Page(PageConfig {
        network: NetworkSettings {
            status_code: Some(403),
            ..NetworkSettings::default()
        },
        ..PageConfig::default()
    });
    assert!(has_non_default_network_settings(&with_status));

    // Actions have no network surface at all.
    assert!(!has_non_default_network_settings(&ResourceConfig::ScriptAction(
        ScriptActionConfig::default()
    )));
}
