//! Escaping for the `string` content format
//!
//! Content is percent-encoded the way `encodeURIComponent` does it, except that
//! characters in [`SAFE_TO_LEAVE_DECODED`] stay readable. The emitted literal is
//! wrapped in `decodeURIComponent(..)`, so it never needs quote or backslash
//! escaping of its own.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in the generated literal
pub const SAFE_TO_LEAVE_DECODED: &str = "{}.,<>?/:'[]!@#$^&*() -_=+";

/// Characters `encodeURIComponent` itself never escapes
const URI_COMPONENT_UNRESERVED: &str = "-_.!~*'()";

const fn without(mut set: AsciiSet, chars: &str) -> AsciiSet {
    let bytes = chars.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        set = set.remove(bytes[i]);
        i += 1;
    }
    set
}

/// Everything escaped by `encodeURIComponent`, minus the safe set
const STRING_LITERAL_ESCAPES: &AsciiSet = &without(
    without(NON_ALPHANUMERIC.remove(b'-'), URI_COMPONENT_UNRESERVED),
    SAFE_TO_LEAVE_DECODED,
);

/// Escape text for embedding inside `decodeURIComponent("...")`
pub fn escape_for_string_literal(text: &str) -> String {
    utf8_percent_encode(text, STRING_LITERAL_ESCAPES).to_string()
}
