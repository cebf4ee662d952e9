//! Combining partial configs produced by independent generators.
//!
//! Merge rules:
//! - section keys appear once, in first-seen order across all inputs
//! - commands are appended per section in input order
//! - an action command already present in a section is not appended again,
//!   so merging a config with itself (or with `{}`) leaves it unchanged
//! - script-control lines (`:delay`, `:log`) are always appended

use crate::command::Command;
use crate::config::RouterConfig;

/// Merge any number of partial configs into one.
pub fn merge_configs<I>(configs: I) -> RouterConfig
where
    I: IntoIterator<Item = RouterConfig>,
{
    let mut out = RouterConfig::new();
    for config in configs {
        merge_into(&mut out, config);
    }
    out
}

/// Merge `other` into `base` in place.
pub fn merge_into(base: &mut RouterConfig, other: RouterConfig) {
    for (section, commands) in other.into_sections() {
        let target = base.section_mut(&section);
        for command in commands {
            if !command.is_script_control() && contains(target, &command) {
                tracing::trace!(section = %section, command = %command, "skipping duplicate command");
                continue;
            }
            target.push(command);
        }
    }
}

fn contains(commands: &[Command], needle: &Command) -> bool {
    commands.iter().any(|c| c == needle)
}
