//! String validation functions

use std::cell::RefCell;
use std::collections::HashMap;

use regress::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Length in UTF-16 code units, the unit of `value.length` and `maxlength`
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn is_too_short(s: &str, min: usize) -> bool {
    utf16_len(s) < min
}

pub fn is_too_long(s: &str, max: usize) -> bool {
    utf16_len(s) > max
}

/// URL validation
///
/// Accepts anything the WHATWG parser accepts as an absolute URL, so
/// `mailto:` and `ftp://` pass while `example.com` does not.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

thread_local! {
    static PATTERNS: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

/// Match a `data-pattern` source with ECMAScript semantics
///
/// Lookaround is supported and `\d`/`\w` are ASCII-only, as with
/// `new RegExp(pattern)`. Unanchored: the pattern must match somewhere in
/// the value unless it carries its own `^`/`$`. Compiled patterns are
/// cached per thread.
pub fn matches_pattern(value: &str, pattern: &str) -> Result<bool> {
    PATTERNS.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.find(value).is_some());
        }
        let regex = Regex::new(pattern).map_err(|err| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        let found = regex.find(value).is_some();
        cache.insert(pattern.to_string(), regex);
        Ok(found)
    })
}

/// Escape user input the way a text node serializes into `innerHTML`
///
/// Quotes are left alone; they are only escaped inside attribute values.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
