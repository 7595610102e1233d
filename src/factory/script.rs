//! Script rendering and the action compiler: a config's action tree becomes
//! nested JavaScript with console markers bracketing every action and every
//! continuation block, so a harness watching the console can reconstruct the
//! real execution order.

use crate::config::model::{
    PageConfig, ResourceConfig, ScriptActionConfig, ScriptActionType, ScriptConfig,
};

use super::errors::FactoryError;
use super::{content_type, quote, Body, Factory, ResourcePayload};

/// Spin-loop on the wall clock. Emitted verbatim so generated scripts can
/// occupy the UI thread; a timer would yield it.
const STALL_FUNCTION: &str = "function stall(ms) {
  const start = Date.now();
  while (Date.now() - start < ms) {}
}";

fn action_body(
    action: &ScriptActionConfig,
    on_complete_body: &str,
    factory: &Factory,
) -> Result<String, FactoryError> {
    match action.action_type() {
        ScriptActionType::Stall => Ok(format!(
            "stall({});{};",
            action.execution_duration(),
            on_complete_body
        )),
        ScriptActionType::SetTimeout => Ok(format!(
            "setTimeout(() => {{ {} }}, {});",
            on_complete_body,
            action.timeout_delay()
        )),
        ScriptActionType::LoadListener => Ok(format!(
            "window.addEventListener('load', () => {{ {} }});",
            on_complete_body
        )),
        ScriptActionType::DclListener => Ok(format!(
            "window.addEventListener('DOMContentLoaded', () => {{ {} }});",
            on_complete_body
        )),
        kind @ (ScriptActionType::Xhr | ScriptActionType::SyncXhr) => {
            let link = factory.get_link_to(&action.dependent())?;
            Ok(format!(
                "(() => {{
  const xhr = new XMLHttpRequest();
  xhr.open('GET', '{}', {});
  xhr.onload = () => {{ {} }};
  xhr.send();
}})();",
                link,
                kind == ScriptActionType::Xhr,
                on_complete_body
            ))
        }
        ScriptActionType::Fetch => {
            let link = factory.get_link_to(&action.dependent())?;
            Ok(format!(
                "fetch('{}').then(() => {{ {} }});",
                link, on_complete_body
            ))
        }
        ScriptActionType::AddElement => {
            let page = factory.create(&ResourceConfig::Page(PageConfig {
                body: Some(vec![action.dependent()]),
                ..PageConfig::default()
            }))?;
            let html = match &page.body {
                Body::Text(html) => html.clone(),
                Body::Binary(_) => return Err(FactoryError::MissingBodyRegion),
            };
            let fragment = extract_body_fragment(&html)?;
            Ok(format!(
                "(() => {{
  const html = {};
  const div = document.createElement('div');
  div.innerHTML = html;
  while (div.children.length > 0) document.body.appendChild(div.children[0]);
}})();",
                quote(fragment)
            ))
        }
        ScriptActionType::Redirect => {
            let link = factory.get_link_to(&action.dependent())?;
            Ok(format!("window.location.href = '{}';", link))
        }
    }
}

/// The markup between `<body>` and the final `</body>` of rendered page
/// HTML. Failing to find either tag means page rendering itself broke.
fn extract_body_fragment(html: &str) -> Result<&str, FactoryError> {
    let start = html.find("<body>").ok_or(FactoryError::MissingBodyRegion)? + "<body>".len();
    let end = html.rfind("</body>").ok_or(FactoryError::MissingBodyRegion)?;
    if end < start {
        return Err(FactoryError::MissingBodyRegion);
    }
    Ok(&html[start..end])
}

fn create_action(
    script_id: &str,
    action: &ScriptActionConfig,
    factory: &Factory,
) -> Result<String, FactoryError> {
    let path = format!("{}.{}", script_id, action.id());

    if action.action_type() == ScriptActionType::Redirect && !action.on_complete().is_empty() {
        return Err(FactoryError::RedirectWithContinuation);
    }

    let mut on_complete_body = String::new();
    for child in action.on_complete() {
        let ResourceConfig::ScriptAction(child_action) = child else {
            return Err(FactoryError::NotAnAction(child.kind()));
        };
        if on_complete_body.is_empty() {
            on_complete_body
                .push_str(&format!("\nconsole.log('script action {} onComplete started');", path));
        }
        on_complete_body.push_str(&format!("\n{}", create_action(&path, child_action, factory)?));
    }
    if !on_complete_body.is_empty() {
        on_complete_body
            .push_str(&format!("\nconsole.log('script action {} onComplete done');", path));
    }

    Ok(format!(
        "console.log('script action {path} started');
{body}
console.log('script action {path} done');",
        path = path,
        body = action_body(action, &on_complete_body, factory)?
    ))
}

pub(crate) fn create_script(
    config: &ScriptConfig,
    factory: &Factory,
) -> Result<ResourcePayload, FactoryError> {
    let id = config.network.id();
    let mut script = format!(
        "console.log('script ID {id} started');
{stall}
stall({duration});
console.log('script ID {id} done');
",
        id = id,
        stall = STALL_FUNCTION,
        duration = config.execution_duration()
    );

    for action in config.actions() {
        let ResourceConfig::ScriptAction(action_config) = action else {
            return Err(FactoryError::NotAnAction(action.kind()));
        };
        script.push_str(&format!("\n{}\n", create_action(id, action_config, factory)?));
    }

    Ok(ResourcePayload {
        config: ResourceConfig::Script(config.clone()),
        headers: content_type("application/javascript"),
        body: Body::Text(script),
    })
}

/// Pad script source to exactly `total_byte_target` bytes with a trailing
/// block comment of `0`s.
pub fn inject_script_bytes(body: &str, total_byte_target: usize) -> Result<String, FactoryError> {
    const COMMENT: &str = "\n/*  */";
    let minimum = body.len() + COMMENT.len();
    let bytes_needed = total_byte_target
        .checked_sub(minimum)
        .ok_or(FactoryError::InjectionTargetTooSmall {
            target: total_byte_target,
            minimum,
        })?;

    Ok(format!("{}\n/* {} */", body, "0".repeat(bytes_needed)))
}
