//! Helpers for logging client-controlled strings safely on one line.
//! Cookie headers and request lines arrive from the network and may carry
//! control characters that would mangle the log.

/// Render a client-supplied value for logging: control characters become
/// escapes, and anything past `MAX_PREVIEW` chars is cut with an ellipsis.
pub fn client_preview(s: &str) -> String {
    const MAX_PREVIEW: usize = 120;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::client_preview;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(
            client_preview("50&800\r\nInjected: x"),
            "50&800\\r\\nInjected: x"
        );
    }

    #[test]
    fn truncates_long_values() {
        let long = "a".repeat(500);
        let preview = client_preview(&long);
        assert!(preview.chars().count() <= 121);
        assert!(preview.ends_with('…'));
    }
}
