//! Python literal syntax for fetched values.

use crate::value::Value;
use chrono::{Datelike, Timelike};
use std::fmt::Write;

/// Stdlib imports a set of literals depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralImports {
    pub datetime: bool,
    pub decimal: bool,
}

impl LiteralImports {
    pub fn note(&mut self, value: &Value) {
        self.datetime |= value.is_temporal();
        self.decimal |= matches!(value, Value::Decimal(_));
    }

    /// Import lines, stdlib ordering
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.datetime {
            lines.push("import datetime".to_string());
        }
        if self.decimal {
            lines.push("from decimal import Decimal".to_string());
        }
        lines
    }
}

/// Render `value` as a Python expression
pub fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Int(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::Float(f) => float_literal(*f),
        Value::Decimal(d) => format!("Decimal({})", string_literal(d)),
        Value::Text(s) => string_literal(s),
        Value::Blob(b) => bytes_literal(b),
        Value::Date(d) => format!("datetime.date({}, {}, {})", d.year(), d.month(), d.day()),
        Value::Time(t) => format!("datetime.time({})", time_args(t)),
        Value::Timestamp(ts) => {
            let date = ts.date();
            format!(
                "datetime.datetime({}, {}, {}, {})",
                date.year(),
                date.month(),
                date.day(),
                time_args(&ts.time())
            )
        }
    }
}

fn time_args(t: &chrono::NaiveTime) -> String {
    let micros = t.nanosecond() / 1_000;
    if micros == 0 {
        format!("{}, {}, {}", t.hour(), t.minute(), t.second())
    } else {
        format!("{}, {}, {}, {}", t.hour(), t.minute(), t.second(), micros)
    }
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "float('nan')".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "float('inf')".to_string()
        } else {
            "float('-inf')".to_string()
        }
    } else {
        // Debug keeps a '.' or exponent, so the literal stays a float
        format!("{:?}", f)
    }
}

/// Quote a string the way Python's `repr()` does. Control characters,
/// whitespace other than a plain space, format and private-use characters
/// are written as `\x`, `\u` or `\U` escapes.
pub fn string_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if needs_escape(c) => push_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn needs_escape(c: char) -> bool {
    c.is_control()
        || (c.is_whitespace() && c != ' ')
        || matches!(
            c,
            '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{180e}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{e000}'..='\u{f8ff}'
        )
}

fn push_escape(out: &mut String, c: char) {
    let code = c as u32;
    let _ = match code {
        0..=0xff => write!(out, "\\x{:02x}", code),
        0x100..=0xffff => write!(out, "\\u{:04x}", code),
        _ => write!(out, "\\U{:08x}", code),
    };
}

/// Bytes literal in `repr()` form
fn bytes_literal(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.push(quote as char);
    out
}
