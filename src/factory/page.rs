//! Page rendering: a fixed HTML shell with head/body slots filled by the
//! tags for each child resource.

use crate::config::model::{
    ElementCreationMethod, ImageConfig, PageConfig, ResourceConfig, ScriptConfig,
    ScriptInclusionType, StyleConfig, StylesheetInclusionType,
};
use crate::config::walk::initialize_ids;

use super::errors::FactoryError;
use super::{content_type, escape_template_literal, quote, Body, Factory, ResourcePayload};

const EMPTY_BODY: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>Cuzillion Example</title>
    <!--HEAD-->
  </head>
  <body>
    <!--BODY-->
  </body>
</html>"#;

fn text_body(body: &Body) -> &str {
    match body {
        Body::Text(text) => text,
        // Only image resources carry binary bodies, and those never inline
        // their body into markup.
        Body::Binary(_) => "",
    }
}

fn script_tag(
    config: &ResourceConfig,
    script: &ScriptConfig,
    factory: &Factory,
) -> Result<String, FactoryError> {
    let resource = factory.create(config)?;
    Ok(match script.inclusion_type() {
        ScriptInclusionType::Inline => format!("<script>{}</script>", text_body(&resource.body)),
        inclusion => {
            let attributes = match inclusion {
                ScriptInclusionType::ExternalDefer => "defer",
                ScriptInclusionType::ExternalAsync => "async",
                _ => "",
            };
            format!("<script src={} {}></script>", quote(&resource.link), attributes)
        }
    })
}

fn stylesheet_tag(
    config: &ResourceConfig,
    style: &StyleConfig,
    factory: &Factory,
) -> Result<String, FactoryError> {
    let resource = factory.create(config)?;
    Ok(match style.inclusion_type() {
        StylesheetInclusionType::Inline => {
            format!("<style>{}</style>", text_body(&resource.body))
        }
        inclusion => {
            let attributes = match inclusion {
                StylesheetInclusionType::ExternalAsync => {
                    r#"rel="preload" as="style" onload="this.rel = 'stylesheet'""#
                }
                _ => r#"rel="stylesheet""#,
            };
            format!("<link href={} {} />", quote(&resource.link), attributes)
        }
    })
}

fn image_tag(
    config: &ResourceConfig,
    image: &ImageConfig,
    factory: &Factory,
) -> Result<String, FactoryError> {
    let resource = factory.create(config)?;
    Ok(format!(
        r#"<img src={} style="width: {}px; height: {}px" />"#,
        quote(&resource.link),
        image.width(),
        image.height()
    ))
}

fn render_children(children: &[ResourceConfig], factory: &Factory) -> Result<String, FactoryError> {
    let mut html = String::new();
    for child in children {
        let child_html = match child {
            ResourceConfig::Script(script) => script_tag(child, script, factory)?,
            ResourceConfig::Stylesheet(style) => stylesheet_tag(child, style, factory)?,
            ResourceConfig::Image(image) => image_tag(child, image, factory)?,
            ResourceConfig::Text(text) => {
                // Inline body text is not independently fetchable here.
                format!("<p>{}</p>", text.text_content())
            }
            ResourceConfig::Page(_) => {
                format!("<iframe src={}></iframe>", quote(&factory.get_link_to(child)?))
            }
            // Actions only exist inside scripts; nothing to render.
            ResourceConfig::ScriptAction(_) => String::new(),
        };

        if child.creation_method() == ElementCreationMethod::DocumentWrite {
            html.push_str(&format!(
                "<script>document.write(`{}`)</script>",
                escape_template_literal(&child_html)
            ));
        } else {
            html.push_str(&child_html);
        }
    }
    Ok(html)
}

pub(crate) fn create_page(
    config: &PageConfig,
    factory: &Factory,
) -> Result<ResourcePayload, FactoryError> {
    let mut tree = ResourceConfig::Page(config.clone());
    initialize_ids(&mut tree);
    let page = match &tree {
        ResourceConfig::Page(page) => page,
        _ => unreachable!("id assignment preserves the node kind"),
    };

    let mut body = EMPTY_BODY.to_string();
    if let Some(head) = &page.head {
        body = body.replacen("<!--HEAD-->", &render_children(head, factory)?, 1);
    }
    if let Some(page_body) = &page.body {
        body = body.replacen("<!--BODY-->", &render_children(page_body, factory)?, 1);
    }

    Ok(ResourcePayload {
        config: tree,
        headers: content_type("text/html"),
        body: Body::Text(body),
    })
}

/// Pad page markup to exactly `total_byte_target` bytes with an HTML comment
/// of `0`s placed just before `</body>`.
pub fn inject_page_bytes(body: &str, total_byte_target: usize) -> Result<String, FactoryError> {
    const COMMENT: &str = "<!--  -->";
    let minimum = body.len() + COMMENT.len();
    let bytes_needed = total_byte_target
        .checked_sub(minimum)
        .ok_or(FactoryError::InjectionTargetTooSmall {
            target: total_byte_target,
            minimum,
        })?;

    let injection = format!("<!-- {} -->", "0".repeat(bytes_needed));
    let insert_at = body.rfind("</body>").ok_or(FactoryError::MissingBodyRegion)?;
    let mut padded = String::with_capacity(total_byte_target);
    padded.push_str(&body[..insert_at]);
    padded.push_str(&injection);
    padded.push_str(&body[insert_at..]);
    Ok(padded)
}
