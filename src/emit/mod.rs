//! Per-node C text: one `vss_signal[]` record and one accessor macro each.

pub mod macros;
pub mod record;

pub use macros::MacroEmitter;
pub use record::Record;

/// Quote and escape a string as a C string literal.
pub fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Three octal digits, so a following digit is never absorbed.
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
