use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// An attribute value on a RouterOS command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Rendered as-is, unless it contains characters RouterOS would split on.
    Plain(String),
    /// Always rendered inside double quotes.
    Quoted(String),
}

impl Value {
    /// Raw value text without quoting.
    pub fn as_str(&self) -> &str {
        match self {
            Value::Plain(v) | Value::Quoted(v) => v,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Plain(v) if !needs_quotes(v) => write!(f, "{v}"),
            Value::Plain(v) | Value::Quoted(v) => write!(f, "\"{}\"", escape(v)),
        }
    }
}

/// One `key=value` pair on a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

/// A structured RouterOS command belonging to a section such as `/interface bridge`.
///
/// Rendering is `verb [target] key=value ...`. Script-control lines like
/// `:delay 5s` are commands whose verb starts with `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Command verb (`add`, `set`, `remove`, `sign`, ...).
    pub verb: String,
    /// Optional item selector, e.g. `[ find default-name=ether1 ]` or `telnet`.
    pub target: Option<String>,
    /// Ordered attributes.
    pub attrs: Vec<Attr>,
}

impl Command {
    /// Create a command with the given verb and no target or attributes.
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            target: None,
            attrs: Vec::new(),
        }
    }

    /// `add ...`
    pub fn add() -> Self {
        Self::new("add")
    }

    /// `set <target> ...`
    pub fn set(target: impl Into<String>) -> Self {
        Self::new("set").with_target(target)
    }

    /// `set` without a target, for singleton menus like `/system identity`.
    pub fn set_global() -> Self {
        Self::new("set")
    }

    /// `set [ find default-name=<name> ] ...`
    pub fn set_default_name(name: &str) -> Self {
        Self::set(format!("[ find default-name={name} ]"))
    }

    /// A script-control line such as `:delay 5s`.
    pub fn script(line: impl Into<String>) -> Self {
        Self::new(line)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append a plain attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push(Attr {
            key: key.into(),
            value: Value::Plain(value.to_string()),
        });
        self
    }

    /// Append a quoted attribute.
    pub fn quoted(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push(Attr {
            key: key.into(),
            value: Value::Quoted(value.to_string()),
        });
        self
    }

    /// Append a plain attribute only when `value` is present.
    pub fn attr_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// Append a `yes`/`no` attribute.
    pub fn flag(self, key: impl Into<String>, on: bool) -> Self {
        self.attr(key, if on { "yes" } else { "no" })
    }

    /// Return the raw value of the first attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// True for `:`-prefixed script-control lines.
    pub fn is_script_control(&self) -> bool {
        self.verb.starts_with(':')
    }

    /// Insert or replace an attribute, keeping the position of an existing key.
    pub fn upsert(&mut self, attr: Attr) {
        if let Some(existing) = self.attrs.iter_mut().find(|a| a.key == attr.key) {
            existing.value = attr.value;
            return;
        }
        self.attrs.push(attr);
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        for attr in &self.attrs {
            write!(f, " {}={}", attr.key, attr.value)?;
        }
        Ok(())
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | ';' | '\\' | '$'))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
