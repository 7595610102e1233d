use cuzillion::config::model::{
    ImageConfig, NetworkSettings, ResourceConfig, ScriptActionConfig, ScriptActionType,
    ScriptConfig, TextConfig,
};
use cuzillion::config::walk::initialize_ids;
use cuzillion::factory::errors::FactoryError;
use cuzillion::factory::script::inject_script_bytes;
use cuzillion::factory::{Body, Factory};
use pretty_assertions::assert_eq;

fn script_body(factory: &Factory, config: &ResourceConfig) -> String {
    let response = factory.create(config).expect("script renders");
    match response.body {
        Body::Text(text) => text,
        Body::Binary(_) => panic!("scripts have text bodies"),
    }
}

fn action(action_type: ScriptActionType) -> ScriptActionConfig {
    ScriptActionConfig {
        action_type: Some(action_type),
        ..ScriptActionConfig::default()
    }
}

fn script_with_actions(actions: Vec<ScriptActionConfig>) -> ResourceConfig {
    let mut config = ResourceConfig::Script(ScriptConfig {
        actions: Some(actions.into_iter().map(ResourceConfig::ScriptAction).collect()),
        ..ScriptConfig::default()
    });
    initialize_ids(&mut config);
    config
}

#[test]
fn embeds_the_busy_wait_stall() {
    let factory = Factory::default_instance();
    let config = ResourceConfig::Script(ScriptConfig {
        execution_duration: Some(100),
        ..ScriptConfig::default()
    });

    let body = script_body(&factory, &config);
    assert!(body.contains("function stall(ms)"));
    assert!(body.contains("while (Date.now() - start < ms)"));
    assert!(body.contains("stall(100);"));
}

#[test]
fn orders_timeout_continuations_inside_the_callback() {
    let factory = Factory::default_instance();
    let config = script_with_actions(vec![ScriptActionConfig {
        action_type: Some(ScriptActionType::SetTimeout),
        on_complete: Some(vec![ResourceConfig::ScriptAction(ScriptActionConfig {
            execution_duration: Some(101),
            ..ScriptActionConfig::default()
        })]),
        ..ScriptActionConfig::default()
    }]);

    let body = script_body(&factory, &config);
    let pos = |needle: &str| {
        body.find(needle)
            .unwrap_or_else(|| panic!("missing {:?} in:\n{}", needle, body))
    };

    // The outer done marker is logged synchronously after scheduling; the
    // continuation only exists inside the setTimeout callback source.
    assert!(pos("script ID 1 started") < pos("script action 1.2 started"));
    assert!(pos("script action 1.2 started") < pos("setTimeout(() => {"));
    assert!(pos("setTimeout(() => {") < pos("script action 1.2 onComplete started"));
    assert!(pos("script action 1.2 onComplete started") < pos("script action 1.2.3 started"));
    assert!(pos("script action 1.2.3 started") < pos("stall(101)"));
    assert!(pos("stall(101)") < pos("script action 1.2.3 done"));
    assert!(pos("script action 1.2.3 done") < pos("script action 1.2 onComplete done"));
    assert!(pos("script action 1.2 onComplete done") < pos("}, 2000);"));
    assert!(pos("}, 2000);") < pos("script action 1.2 done"));
}

#[test]
fn requests_target_the_dependent_resource_link() {
    let factory = Factory::default_instance();

    let body = script_body(&factory, &script_with_actions(vec![action(ScriptActionType::Xhr)]));
    assert!(body.contains("xhr.open('GET', '/api/text.txt?config=eyJ0IjoidHh0In0%3D', true);"));

    let body =
        script_body(&factory, &script_with_actions(vec![action(ScriptActionType::SyncXhr)]));
    assert!(body.contains("', false);"));

    let body = script_body(
        &factory,
        &script_with_actions(vec![ScriptActionConfig {
            action_type: Some(ScriptActionType::Fetch),
            dependent: Some(Box::new(ResourceConfig::Text(TextConfig {
                network: NetworkSettings {
                    fetch_delay: Some(2000),
                    ..NetworkSettings::default()
                },
                ..TextConfig::default()
            }))),
            ..ScriptActionConfig::default()
        }]),
    );
    assert!(body.contains("fetch('/api/text.txt?config="));
    assert!(body.contains("').then(() => {"));
}

#[test]
fn add_element_inlines_the_rendered_fragment() {
    let factory = Factory::default_instance();
    let config = script_with_actions(vec![ScriptActionConfig {
        action_type: Some(ScriptActionType::AddElement),
        dependent: Some(Box::new(ResourceConfig::Image(ImageConfig::default()))),
        ..ScriptActionConfig::default()
    }]);

    let body = script_body(&factory, &config);
    assert!(body.contains("const html ="));
    assert!(body.contains("<img src="));
    assert!(body.contains("document.body.appendChild(div.children[0])"));
}

#[test]
fn redirect_navigates_and_refuses_continuations() {
    let factory = Factory::default_instance();

    let body =
        script_body(&factory, &script_with_actions(vec![action(ScriptActionType::Redirect)]));
    assert!(body.contains("window.location.href = '/api/text.txt?config="));

    let invalid = script_with_actions(vec![ScriptActionConfig {
        action_type: Some(ScriptActionType::Redirect),
        on_complete: Some(vec![ResourceConfig::ScriptAction(
            ScriptActionConfig::default(),
        )]),
        ..ScriptActionConfig::default()
    }]);
    let err = factory.create(&invalid).expect_err("redirect is terminal");
    assert_eq!(err, FactoryError::RedirectWithContinuation);
}

#[test]
fn script_injection_hits_the_exact_target() {
    let factory = Factory::default_instance();
    let body = script_body(&factory, &ResourceConfig::Script(ScriptConfig::default()));
    let padded = inject_script_bytes(&body, 1024 * 1024).expect("target is large enough");
    assert_eq!(padded.len(), 1024 * 1024);
}
