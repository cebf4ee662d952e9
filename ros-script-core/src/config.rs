use indexmap::IndexMap;
use serde::Serialize;

use crate::command::Command;

/// An ordered mapping from command-section path to the commands of that section.
///
/// Section keys keep first-insertion order. Within a section, commands keep
/// the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouterConfig {
    sections: IndexMap<String, Vec<Command>>,
}

impl RouterConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Total number of commands across all sections.
    pub fn command_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Append one command to `section`, creating the section on first use.
    pub fn push(&mut self, section: &str, command: Command) {
        self.section_mut(section).push(command);
    }

    /// Append many commands to `section`, creating the section on first use.
    pub fn extend<I>(&mut self, section: &str, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        self.section_mut(section).extend(commands);
    }

    /// Mutable command list for `section`, inserted empty if missing.
    pub fn section_mut(&mut self, section: &str) -> &mut Vec<Command> {
        self.sections.entry(section.to_string()).or_default()
    }

    /// Commands in `section`, if present.
    pub fn section(&self, section: &str) -> Option<&[Command]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    /// Rendered command lines of `section`, empty when absent.
    pub fn lines(&self, section: &str) -> Vec<String> {
        self.section(section)
            .map(|cmds| cmds.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Section keys in order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// `(section, commands)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Command])> {
        self.sections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub(crate) fn into_sections(self) -> IndexMap<String, Vec<Command>> {
        self.sections
    }

    pub(crate) fn from_sections(sections: IndexMap<String, Vec<Command>>) -> Self {
        Self { sections }
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Command>)> for RouterConfig {
    fn from_iter<T: IntoIterator<Item = (S, Vec<Command>)>>(iter: T) -> Self {
        let mut config = RouterConfig::new();
        for (section, commands) in iter {
            let section = section.into();
            config.extend(&section, commands);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::RouterConfig;
    use crate::Command;

    #[test]
    fn keeps_first_insertion_order_of_sections() {
        let mut config = RouterConfig::new();
        config.push("/interface vlan", Command::add().attr("name", "v1"));
        config.push("/interface bridge", Command::add().attr("name", "b1"));
        config.push("/interface vlan", Command::add().attr("name", "v2"));

        let names: Vec<&str> = config.section_names().collect();
        assert_eq!(names, vec!["/interface vlan", "/interface bridge"]);
        assert_eq!(
            config.lines("/interface vlan"),
            vec!["add name=v1", "add name=v2"]
        );
        assert_eq!(config.command_count(), 3);
    }

    #[test]
    fn serializes_as_object_of_rendered_lines() {
        let mut config = RouterConfig::new();
        config.push(
            "/interface bridge",
            Command::add().attr("name", "LANBridgeSplit").quoted("comment", "Split"),
        );
        let json = serde_json::to_string(&config).expect("json");
        assert_eq!(
            json,
            r#"{"/interface bridge":["add name=LANBridgeSplit comment=\"Split\""]}"#
        );
    }
}
