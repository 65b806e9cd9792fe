//! Term — terminal capabilities and severity-colored line output.

use std::io::{IsTerminal, Write};

const OFF: &str = "\x1b[0;m";
const RED: &str = "\x1b[0;31m";
const YELLOW: &str = "\x1b[0;33m";
const GREY: &str = "\x1b[0;37m";

/// What the output environment supports, probed once at startup and injected
/// into the render path; nothing downstream touches the terminal directly.
#[derive(Debug, Clone, Copy)]
pub struct TermCaps {
    pub color: bool,
}

impl TermCaps {
    /// Color needs an interactive stdout and a non-Windows console.
    pub fn detect(color_enabled: bool) -> Self {
        Self {
            color: color_enabled && std::io::stdout().is_terminal() && !cfg!(windows),
        }
    }
}

fn color_for(severity: &str) -> &'static str {
    match severity {
        "WARN" => YELLOW,
        "ERR" => RED,
        "INFO" => OFF,
        _ => GREY,
    }
}

/// Print one rendered line, colored by severity when supported, flushed so
/// the operator sees it immediately.
pub fn print_line(caps: TermCaps, severity: &str, line: &str) {
    let mut out = std::io::stdout().lock();
    let result = if caps.color {
        writeln!(out, "{}{}{}", color_for(severity), line, OFF)
    } else {
        writeln!(out, "{}", line)
    };
    if result.is_ok() {
        let _ = out.flush();
    }
}
