//! Event script parsing
//!
//! One event per line:
//!
//! ```text
//! type tempo run      # set the query (rest of the line, raw)
//! scroll 0.5          # sentinel visibility report (default 1.0)
//! clear               # clear the query
//! open some-run-id    # open a detail view
//! back                # history back
//! home                # back to the library root
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::session::Event;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown event `{verb}`")]
    UnknownEvent { line: usize, verb: String },
    #[error("line {line}: `{verb}` needs an argument")]
    MissingArgument { line: usize, verb: String },
    #[error("line {line}: invalid visibility fraction `{value}` (expected 0..=1)")]
    InvalidFraction { line: usize, value: String },
    #[error("line {line}: `{verb}` takes no argument")]
    UnexpectedArgument { line: usize, verb: String },
}

/// Parse a whole script
pub fn parse_script(input: &str) -> Result<Vec<Event>, ScriptError> {
    let mut events = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if let Some(event) = parse_line(line, idx + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one line; `None` for blanks and comments
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Event>, ScriptError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, Some(rest)),
        None => (trimmed, None),
    };

    let no_argument = |event: Event| -> Result<Option<Event>, ScriptError> {
        match rest.map(str::trim) {
            Some(arg) if !arg.is_empty() => Err(ScriptError::UnexpectedArgument {
                line: line_no,
                verb: verb.to_string(),
            }),
            _ => Ok(Some(event)),
        }
    };

    match verb {
        // raw remainder: surrounding spaces are part of the query
        "type" => Ok(Some(Event::Type(rest.unwrap_or_default().to_string()))),
        "clear" => no_argument(Event::Clear),
        "back" => no_argument(Event::Back),
        "home" => no_argument(Event::Home),
        "scroll" => {
            let value = rest.map(str::trim).filter(|v| !v.is_empty());
            let fraction = match value {
                None => 1.0,
                Some(v) => v
                    .parse::<f64>()
                    .ok()
                    .filter(|f| (0.0..=1.0).contains(f))
                    .ok_or_else(|| ScriptError::InvalidFraction {
                        line: line_no,
                        value: v.to_string(),
                    })?,
            };
            Ok(Some(Event::Scroll(fraction)))
        }
        "open" => {
            let id = rest
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ScriptError::MissingArgument {
                    line: line_no,
                    verb: verb.to_string(),
                })?;
            Ok(Some(Event::Open(id.to_string())))
        }
        other => Err(ScriptError::UnknownEvent {
            line: line_no,
            verb: other.to_string(),
        }),
    }
}
