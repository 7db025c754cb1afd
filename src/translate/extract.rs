use regex::Regex;

/// Character after a backslash that each provider decodes.
pub(crate) const BASIC_ESCAPES: &[char] = &['"', 'n', '/'];
pub(crate) const FULL_ESCAPES: &[char] = &['"', 'n', '/', '\\'];

/// Decode the backslash escapes listed in `escapes`, scanning left to right.
/// Escapes not in the list are copied through untouched, backslash included.
pub fn unescape(raw: &str, escapes: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some(next) if escapes.contains(&next) => out.push(if next == 'n' { '\n' } else { next }),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// First capture group of `pattern` in `body`, if any.
pub(crate) fn first_capture<'a>(pattern: &Regex, body: &'a str) -> Option<&'a str> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
