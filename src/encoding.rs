use crate::compat::{Cow, String};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// `application/x-www-form-urlencoded` component set: every byte except
/// ASCII alphanumerics and `-`, `_`, `.`, `~` is percent-encoded.
/// Space never reaches the set; it is written as `+`.
const FORM_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a key or value for a query string.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, part) in input.split(' ').enumerate() {
        if index > 0 {
            out.push('+');
        }
        for chunk in utf8_percent_encode(part, FORM_COMPONENT) {
            out.push_str(chunk);
        }
    }
    out
}

/// Decode a key or value from a query string (`+` means space).
/// Invalid percent sequences pass through unchanged.
/// Optimization: Uses memchr to return borrowed input when nothing decodes
pub fn decode_component(input: &str) -> Cow<'_, str> {
    if memchr::memchr2(b'+', b'%', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    let unplussed = input.replace('+', " ");
    Cow::Owned(percent_decode_str(&unplussed).decode_utf8_lossy().into_owned())
}
