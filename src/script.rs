//! Line-oriented event scripts for `goldmeter replay`.
//!
//! One event per line, `#` starts a comment:
//!
//! ```text
//! viewport 1280 800
//! image 800 600            # synthetic raster, no file needed
//! load photos/face.jpg     # header-decoded raster
//! resize 400 400           # logical size, backing = logical * dpr
//! resize 400 400 800 800   # explicit backing size
//! click 100 150
//! touch on
//! reset
//! reset-all
//! capture-start
//! capture-frame 1280 720
//! snapshot
//! capture-stop
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    Viewport { width: f64, height: f64 },
    Image { width: f64, height: f64 },
    Load { path: PathBuf },
    Resize { logical_w: f64, logical_h: f64, backing: Option<(f64, f64)> },
    Click { x: f64, y: f64 },
    Touch(bool),
    Reset,
    ResetAll,
    CaptureStart,
    CaptureFrame { width: f64, height: f64 },
    Snapshot,
    CaptureStop,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown event '{word}'")]
    UnknownEvent { line: usize, word: String },
    #[error("line {line}: '{event}' expects {expected}")]
    Arity { line: usize, event: String, expected: &'static str },
    #[error("line {line}: '{value}' is not a number")]
    Number { line: usize, value: String },
}

/// Parse a whole script. Blank and comment-only lines are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if let Some(event) = parse_line(raw, index + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one line. `Ok(None)` for blank or comment lines.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<ScriptEvent>, ScriptError> {
    let content = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
    let mut words = content.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args = words.collect::<Vec<_>>();

    let arity = |expected: &'static str| ScriptError::Arity { line, event: word.to_owned(), expected };
    let num = |value: &str| number(value, line);

    let event = match (word, args.as_slice()) {
        ("viewport", [w, h]) => ScriptEvent::Viewport { width: num(*w)?, height: num(*h)? },
        ("viewport", _) => return Err(arity("WIDTH HEIGHT")),
        ("image", [w, h]) => ScriptEvent::Image { width: num(*w)?, height: num(*h)? },
        ("image", _) => return Err(arity("WIDTH HEIGHT")),
        ("load", []) => return Err(arity("PATH")),
        ("load", parts) => ScriptEvent::Load { path: PathBuf::from(parts.join(" ")) },
        ("resize", [lw, lh]) => ScriptEvent::Resize { logical_w: num(*lw)?, logical_h: num(*lh)?, backing: None },
        ("resize", [lw, lh, bw, bh]) => ScriptEvent::Resize {
            logical_w: num(*lw)?,
            logical_h: num(*lh)?,
            backing: Some((num(*bw)?, num(*bh)?)),
        },
        ("resize", _) => return Err(arity("LOGICAL_W LOGICAL_H [BACKING_W BACKING_H]")),
        ("click", [x, y]) => ScriptEvent::Click { x: num(*x)?, y: num(*y)? },
        ("click", _) => return Err(arity("X Y")),
        ("touch", ["on"]) => ScriptEvent::Touch(true),
        ("touch", ["off"]) => ScriptEvent::Touch(false),
        ("touch", _) => return Err(arity("on|off")),
        ("capture-frame", [w, h]) => ScriptEvent::CaptureFrame { width: num(*w)?, height: num(*h)? },
        ("capture-frame", _) => return Err(arity("WIDTH HEIGHT")),
        ("reset", []) => ScriptEvent::Reset,
        ("reset-all", []) => ScriptEvent::ResetAll,
        ("capture-start", []) => ScriptEvent::CaptureStart,
        ("snapshot", []) => ScriptEvent::Snapshot,
        ("capture-stop", []) => ScriptEvent::CaptureStop,
        ("reset" | "reset-all" | "capture-start" | "snapshot" | "capture-stop", _) => {
            return Err(arity("no arguments"));
        }
        _ => return Err(ScriptError::UnknownEvent { line, word: word.to_owned() }),
    };
    Ok(Some(event))
}

fn number(value: &str, line: usize) -> Result<f64, ScriptError> {
    value
        .parse::<f64>()
        .map_err(|_| ScriptError::Number { line, value: value.to_owned() })
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
