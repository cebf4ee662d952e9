//! Post-processing that shortens a finished config without changing its effect.
//!
//! Within each section:
//! - adjacent `set` commands on the same target collapse into one, later
//!   values replacing earlier ones for the same key in place
//! - adjacent exact duplicates are dropped when repeating them has no
//!   further effect: `set` commands and `add` commands carrying a `name`
//!
//! Unnamed `add` lines such as firewall rules are kept even when identical,
//! since each one creates another entry on the device.
//!
//! Commands never move across sections and non-adjacent commands keep their
//! relative order.

use indexmap::IndexMap;

use crate::command::Command;
use crate::config::RouterConfig;

/// Shorten every section of `config`.
pub fn shorten(config: RouterConfig) -> RouterConfig {
    let sections: IndexMap<String, Vec<Command>> = config
        .into_sections()
        .into_iter()
        .map(|(section, commands)| (section, shorten_commands(commands)))
        .collect();
    RouterConfig::from_sections(sections)
}

fn shorten_commands(commands: Vec<Command>) -> Vec<Command> {
    let mut out: Vec<Command> = Vec::with_capacity(commands.len());
    for command in commands {
        let Some(last) = out.last_mut() else {
            out.push(command);
            continue;
        };
        if *last == command && repeat_is_noop(&command) {
            continue;
        }
        if coalescible(last, &command) {
            for attr in command.attrs {
                last.upsert(attr);
            }
            continue;
        }
        out.push(command);
    }
    out
}

fn repeat_is_noop(command: &Command) -> bool {
    match command.verb.as_str() {
        "set" => true,
        "add" => command.get("name").is_some(),
        _ => false,
    }
}

fn coalescible(prev: &Command, next: &Command) -> bool {
    prev.verb == "set" && next.verb == "set" && prev.target.is_some() && prev.target == next.target
}
