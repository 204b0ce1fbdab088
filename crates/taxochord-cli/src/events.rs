//! Pointer event scripts for `interact`.
//!
//! One event per line: `enter <group> <x> <y>`, `move <x> <y>` or `leave`. Blank lines and lines
//! starting with `#` are skipped.

use taxochord::render::PointerEvent;

#[derive(Debug, thiserror::Error)]
#[error("event script line {line}: {message}")]
pub struct EventParseError {
    pub line: usize,
    pub message: String,
}

fn number<T: std::str::FromStr>(
    token: Option<&str>,
    what: &str,
    line: usize,
) -> Result<T, EventParseError> {
    let Some(token) = token else {
        return Err(EventParseError {
            line,
            message: format!("missing {what}"),
        });
    };
    token.parse::<T>().map_err(|_| EventParseError {
        line,
        message: format!("invalid {what}: {token:?}"),
    })
}

pub fn parse_events(text: &str) -> Result<Vec<PointerEvent>, EventParseError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let mut tokens = raw.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();
        let event = match keyword.to_ascii_lowercase().as_str() {
            "enter" => PointerEvent::Enter {
                group: number(tokens.next(), "group index", line)?,
                x: number(tokens.next(), "x", line)?,
                y: number(tokens.next(), "y", line)?,
            },
            "move" => PointerEvent::Move {
                x: number(tokens.next(), "x", line)?,
                y: number(tokens.next(), "y", line)?,
            },
            "leave" => PointerEvent::Leave,
            other => {
                return Err(EventParseError {
                    line,
                    message: format!("unknown event {other:?}"),
                });
            }
        };
        if let Some(extra) = tokens.next() {
            return Err(EventParseError {
                line,
                message: format!("unexpected trailing token {extra:?}"),
            });
        }
        out.push(event);
    }
    Ok(out)
}
