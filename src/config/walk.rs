//! Pre-order traversal over config trees and the id assignment built on it.

use super::model::ResourceConfig;

/// Visit every reachable node exactly once, parent before children, in the
/// order head, body, actions, dependent, onComplete.
pub fn walk_config<F: FnMut(&ResourceConfig)>(config: &ResourceConfig, visit: &mut F) {
    visit(config);

    match config {
        ResourceConfig::Page(page) => {
            if let Some(head) = &page.head {
                for child in head {
                    walk_config(child, visit);
                }
            }
            if let Some(body) = &page.body {
                for child in body {
                    walk_config(child, visit);
                }
            }
        }
        ResourceConfig::Script(script) => {
            if let Some(actions) = &script.actions {
                for child in actions {
                    walk_config(child, visit);
                }
            }
        }
        ResourceConfig::ScriptAction(action) => {
            if let Some(dependent) = &action.dependent {
                walk_config(dependent, visit);
            }
            if let Some(on_complete) = &action.on_complete {
                for child in on_complete {
                    walk_config(child, visit);
                }
            }
        }
        _ => {}
    }
}

/// Mutable counterpart of [`walk_config`], same order. The visitor runs
/// before descent, so children it grafts onto a node are visited too.
pub fn walk_config_mut<F: FnMut(&mut ResourceConfig)>(config: &mut ResourceConfig, visit: &mut F) {
    visit(config);

    match config {
        ResourceConfig::Page(page) => {
            if let Some(head) = &mut page.head {
                for child in head {
                    walk_config_mut(child, visit);
                }
            }
            if let Some(body) = &mut page.body {
                for child in body {
                    walk_config_mut(child, visit);
                }
            }
        }
        ResourceConfig::Script(script) => {
            if let Some(actions) = &mut script.actions {
                for child in actions {
                    walk_config_mut(child, visit);
                }
            }
        }
        ResourceConfig::ScriptAction(action) => {
            if let Some(dependent) = &mut action.dependent {
                walk_config_mut(dependent, visit);
            }
            if let Some(on_complete) = &mut action.on_complete {
                for child in on_complete {
                    walk_config_mut(child, visit);
                }
            }
        }
        _ => {}
    }
}

/// Explicit accumulator threaded through the assignment pass.
struct IdCounter {
    next: u64,
}

/// Assign ids to every node that lacks one. Two passes: the first finds the
/// largest numeric id already present (non-numeric ids count as zero), the
/// second hands out `max + 1, max + 2, ...` in walk order. Pre-set ids are
/// never touched, so assignment is monotonic across repeated edits.
pub fn initialize_ids(config: &mut ResourceConfig) {
    let mut max_id: u64 = 0;
    walk_config(config, &mut |node| {
        if let Some(id) = node.id() {
            max_id = max_id.max(id.parse().unwrap_or(0));
        }
    });

    let mut counter = IdCounter { next: max_id + 1 };
    walk_config_mut(config, &mut |node| {
        if node.id().map_or(true, str::is_empty) {
            node.set_id(counter.next.to_string());
            counter.next += 1;
        }
    });
}
