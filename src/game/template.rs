//! Placeholder substitution for operator-supplied page templates.

/// Replace every occurrence of `placeholder` in `template` with `value`.
///
/// Single pass: occurrences of a placeholder introduced by the replacement
/// text itself are not re-expanded. Replacement text may be shorter, equal
/// to, or longer than the placeholder. A template with no occurrences comes
/// back unchanged.
pub fn replace_all(template: &str, placeholder: &str, value: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(at) = rest.find(placeholder) {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + placeholder.len()..];
    }
    out.push_str(rest);
    out
}

/// Apply a sequence of `(placeholder, value)` pairs in order, one
/// [`replace_all`] pass each.
///
/// Order matters to callers whose placeholders overlap as substrings; values
/// must not themselves contain tokens the caller expects expanded later.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (placeholder, value) in replacements {
        text = replace_all(&text, placeholder, value);
    }
    text
}
