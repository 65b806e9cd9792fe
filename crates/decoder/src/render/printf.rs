//! Printf — conversion rendering for firmware format strings.
//!
//! Covers `%d %i %u %x %X %o %c %s`, the flags `- + 0 # space`, width,
//! precision, `%%`, and ignored length modifiers (`l`, `h`, `z`). Parameter
//! words are raw bits, so every numeric conversion renders unsigned. Any
//! mismatch between the format text and the supplied arguments is an error;
//! the caller falls back to the literal text, never panics.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("format string ends inside a conversion")]
    TrailingPercent,
    #[error("unsupported conversion '%{0}'")]
    UnsupportedConversion(char),
    #[error("not enough arguments for format string")]
    TooFewArguments,
    #[error("unconverted arguments remain")]
    TooManyArguments,
    #[error("argument type does not match conversion '%{0}'")]
    TypeMismatch(char),
    #[error("parameter 0x{0:x} is not a printable character")]
    InvalidChar(u32),
}

/// One substitution value, already split out of the parameter word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Num(u32),
    Str(String),
}

#[derive(Debug, Default)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
}

/// Render `format` with the given arguments.
pub fn render(format: &str, args: &[Arg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len() + 16);
    let mut args = args.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&c) = chars.peek() {
            match c {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                '#' => spec.alt = true,
                _ => break,
            }
            chars.next();
        }
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            spec.width = spec.width * 10 + d as usize;
            chars.next();
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = 0usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                precision = precision * 10 + d as usize;
                chars.next();
            }
            spec.precision = Some(precision);
        }
        while matches!(chars.peek(), Some('l' | 'h' | 'z')) {
            chars.next();
        }

        let conv = chars.next().ok_or(FormatError::TrailingPercent)?;
        let arg = args.next().ok_or(FormatError::TooFewArguments)?;

        match (conv, arg) {
            ('d' | 'i' | 'u' | 'x' | 'X' | 'o', Arg::Num(v)) => {
                out.push_str(&render_numeric(*v, conv, &spec));
            }
            ('c', Arg::Num(v)) => {
                let c = char::from_u32(*v).ok_or(FormatError::InvalidChar(*v))?;
                out.push_str(&pad(&c.to_string(), &spec));
            }
            ('s', Arg::Str(s)) => out.push_str(&render_str(s, &spec)),
            ('s', Arg::Num(v)) => out.push_str(&render_str(&v.to_string(), &spec)),
            ('d' | 'i' | 'u' | 'x' | 'X' | 'o' | 'c', Arg::Str(_)) => {
                return Err(FormatError::TypeMismatch(conv));
            }
            _ => return Err(FormatError::UnsupportedConversion(conv)),
        }
    }

    if args.next().is_some() {
        return Err(FormatError::TooManyArguments);
    }
    Ok(out)
}

fn render_numeric(value: u32, conv: char, spec: &Spec) -> String {
    let digits = match conv {
        'x' => format!("{:x}", value),
        'X' => format!("{:X}", value),
        'o' => format!("{:o}", value),
        _ => value.to_string(),
    };
    let digits = match spec.precision {
        Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    };

    let mut prefix = String::new();
    if spec.plus {
        prefix.push('+');
    } else if spec.space {
        prefix.push(' ');
    }
    if spec.alt {
        match conv {
            'x' => prefix.push_str("0x"),
            'X' => prefix.push_str("0X"),
            'o' => prefix.push_str("0o"),
            _ => {}
        }
    }

    let len = prefix.len() + digits.len();
    if len >= spec.width {
        format!("{}{}", prefix, digits)
    } else if spec.left {
        format!("{}{}{}", prefix, digits, " ".repeat(spec.width - len))
    } else if spec.zero && spec.precision.is_none() {
        // zero fill goes between the sign/prefix and the digits
        format!("{}{}{}", prefix, "0".repeat(spec.width - len), digits)
    } else {
        format!("{}{}{}", " ".repeat(spec.width - len), prefix, digits)
    }
}

fn render_str(s: &str, spec: &Spec) -> String {
    let truncated: String = match spec.precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    };
    pad(&truncated, spec)
}

fn pad(body: &str, spec: &Spec) -> String {
    let len = body.chars().count();
    if len >= spec.width {
        return body.to_string();
    }
    let fill = " ".repeat(spec.width - len);
    if spec.left {
        format!("{}{}", body, fill)
    } else {
        format!("{}{}", fill, body)
    }
}
