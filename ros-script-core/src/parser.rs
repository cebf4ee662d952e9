use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::command::{Attr, Command, Value};
use crate::config::RouterConfig;

/// Verbs recognised when a section path and a command share one line,
/// e.g. `/ip service set telnet disabled=yes`.
const INLINE_VERBS: &[&str] = &[
    "add", "set", "remove", "enable", "disable", "unset", "move", "sign", "reset", "comment",
];

/// Errors that can occur while parsing RouterOS script text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read input file.
    #[error("failed to read script file: {0}")]
    Io(#[from] std::io::Error),
    /// A quoted value was not closed before end of line.
    #[error("line {line}: unterminated quoted value")]
    UnterminatedQuote { line: usize },
    /// A `[ ... ]` selector was not closed before end of line.
    #[error("line {line}: unterminated [ ] selector")]
    UnterminatedSelector { line: usize },
    /// A command appeared before any `/section` line.
    #[error("line {line}: command outside of a section")]
    CommandOutsideSection { line: usize },
    /// Structural issue on a line.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug)]
enum Token {
    Word(String),
    Selector(String),
    Pair(Attr),
}

/// Parse RouterOS script text into a [`RouterConfig`].
///
/// Blank lines and `#` comments are ignored; a trailing `\` joins the next
/// line onto the current one. Script-control lines (`:log info "done"`,
/// `:delay 5s`) are kept verbatim as a single command.
pub fn parse(input: &str) -> Result<RouterConfig, ParseError> {
    let mut config = RouterConfig::new();
    let mut section: Option<String> = None;

    for (line_no, line) in logical_lines(input) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with(':') {
            let Some(current) = section.as_deref() else {
                return Err(ParseError::CommandOutsideSection { line: line_no });
            };
            config.push(current, Command::script(trimmed));
            continue;
        }

        let tokens = tokenize(trimmed, line_no)?;
        if trimmed.starts_with('/') {
            let (path, rest) = split_section(tokens);
            config.section_mut(&path);
            if !rest.is_empty() {
                let command = build_command(rest, line_no)?;
                config.push(&path, command);
            }
            section = Some(path);
            continue;
        }

        let Some(current) = section.as_deref() else {
            return Err(ParseError::CommandOutsideSection { line: line_no });
        };
        let command = build_command(tokens, line_no)?;
        config.push(current, command);
    }

    Ok(config)
}

/// Parse a RouterOS script file into a [`RouterConfig`].
pub fn parse_file(path: &Path) -> Result<RouterConfig, ParseError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Join `\`-continued lines, keeping the 1-based number of the first line.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in input.lines().enumerate() {
        let (start, mut buf) = pending.take().unwrap_or((idx + 1, String::new()));
        let piece = if buf.is_empty() { raw } else { raw.trim_start() };
        if let Some(stripped) = piece.trim_end().strip_suffix('\\') {
            buf.push_str(stripped);
            pending = Some((start, buf));
            continue;
        }
        buf.push_str(piece);
        out.push((start, buf));
    }
    if let Some(last) = pending {
        out.push(last);
    }
    out
}

fn split_section(tokens: Vec<Token>) -> (String, Vec<Token>) {
    let mut path = Vec::new();
    let mut iter = tokens.into_iter();
    let mut rest = Vec::new();

    for token in iter.by_ref() {
        match token {
            Token::Word(word) if !INLINE_VERBS.contains(&word.as_str()) => path.push(word),
            other => {
                rest.push(other);
                break;
            }
        }
    }
    rest.extend(iter);
    (path.join(" "), rest)
}

fn build_command(tokens: Vec<Token>, line: usize) -> Result<Command, ParseError> {
    let mut iter = tokens.into_iter().peekable();
    let verb = match iter.next() {
        Some(Token::Word(word)) => word,
        _ => {
            return Err(ParseError::Malformed {
                line,
                reason: "expected a command verb".to_string(),
            })
        }
    };
    let mut command = Command::new(verb);

    if let Some(Token::Word(_) | Token::Selector(_)) = iter.peek() {
        if let Some(Token::Word(t) | Token::Selector(t)) = iter.next() {
            command.target = Some(t);
        }
    }

    for token in iter {
        match token {
            Token::Pair(attr) => command.attrs.push(attr),
            Token::Word(w) | Token::Selector(w) => {
                return Err(ParseError::Malformed {
                    line,
                    reason: format!("unexpected token '{w}' after target"),
                })
            }
        }
    }
    Ok(command)
}

fn tokenize(line: &str, line_no: usize) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if chars[i] == '[' {
            let start = i;
            let mut depth = 0usize;
            let mut in_quotes = false;
            while i < chars.len() {
                match chars[i] {
                    '\\' if in_quotes => i += 1,
                    '"' => in_quotes = !in_quotes,
                    '[' if !in_quotes => depth += 1,
                    ']' if !in_quotes => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            if i >= chars.len() {
                return Err(ParseError::UnterminatedSelector { line: line_no });
            }
            tokens.push(Token::Selector(chars[start..=i].iter().collect()));
            i += 1;
            continue;
        }

        if chars[i] == '"' {
            let (text, next) = read_quoted(&chars, i, line_no)?;
            tokens.push(Token::Word(text));
            i = next;
            continue;
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '=' {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            let value = if i < chars.len() && chars[i] == '"' {
                let (text, next) = read_quoted(&chars, i, line_no)?;
                i = next;
                Value::Quoted(text)
            } else {
                let vstart = i;
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                Value::Plain(chars[vstart..i].iter().collect())
            };
            tokens.push(Token::Pair(Attr { key: word, value }));
        } else {
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

/// Read a `"..."` string starting at `start`, returning unescaped text and the
/// index after the closing quote.
fn read_quoted(chars: &[char], start: usize, line: usize) -> Result<(String, usize), ParseError> {
    let mut out = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '"' => return Ok((out, i + 1)),
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Err(ParseError::UnterminatedQuote { line })
}
