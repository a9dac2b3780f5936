//! Utilities for percent-encoding.

pub(crate) mod table;

use table::Table;

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xFF; 256];
    let shift = (hi as u8) * 4;

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

static OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
static OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet.
fn decode_octet(mut hi: u8, mut lo: u8) -> Option<u8> {
    hi = OCTET_TABLE_HI[hi as usize];
    lo = OCTET_TABLE_LO[lo as usize];
    if hi & 1 == 0 && lo & 0x80 == 0 {
        Some(hi | lo)
    } else {
        None
    }
}

fn into_string_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Percent-encodes every byte of `s` that the table does not allow.
pub(crate) fn encode(s: &str, table: &Table) -> String {
    let mut out = String::with_capacity(s.len());
    for &x in s.as_bytes() {
        table.encode(x, &mut out);
    }
    out
}

/// Re-encodes `s` with `table`, passing `%` through untouched so that
/// escapes already present survive the pass.
pub(crate) fn reencode(s: &str, table: &Table) -> String {
    let mut out = String::with_capacity(s.len());
    for &x in s.as_bytes() {
        if x == b'%' {
            out.push('%');
        } else {
            table.encode(x, &mut out);
        }
    }
    out
}

/// Decodes every valid percent-encoded octet in `s`.
///
/// Invalid escapes pass through untouched. Decoded octets that do not form
/// valid UTF-8 are replaced with U+FFFD.
pub(crate) fn decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(octet) = decode_octet(bytes[i + 1], bytes[i + 2]) {
                out.push(octet);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    into_string_lossy(out)
}

/// The default reserved set of [`unescape`], taken from RFC 2396:
/// `";" | "/" | "?" | ":" | "@" | "&" | "=" | "+" | "$" | ","`,
/// plus `%` itself.
pub const DEFAULT_RESERVED: &str = "%;/?:@&=+$,";

/// Percent-decodes `s` while keeping reserved characters encoded.
///
/// Every percent-encoded octet whose decoded character is in `reserved`
/// is kept in its encoded form with the hexadecimal digits uppercased;
/// all other valid escapes are decoded. Invalid escapes pass through
/// untouched, so this function is total.
///
/// Within a path segment the characters `/`, `;`, `=` and `?` carry
/// structural meaning; within a query component `;`, `/`, `?`, `:`, `@`,
/// `&`, `=`, `+`, `,` and `$` do. Decoding them blindly would change the
/// structure of the URI, which is what this function guards against.
///
/// # Examples
///
/// ```
/// use uri_value::{unescape, DEFAULT_RESERVED};
///
/// assert_eq!(unescape("a%2fb%20c", DEFAULT_RESERVED), "a%2Fb c");
/// assert_eq!(unescape("%7Euser", "%/"), "~user");
/// assert_eq!(unescape("100%zz", DEFAULT_RESERVED), "100%zz");
/// ```
#[must_use]
pub fn unescape(s: &str, reserved: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(octet) = decode_octet(bytes[i + 1], bytes[i + 2]) {
                if reserved.as_bytes().contains(&octet) {
                    out.push(b'%');
                    out.push(bytes[i + 1].to_ascii_uppercase());
                    out.push(bytes[i + 2].to_ascii_uppercase());
                } else {
                    out.push(octet);
                }
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    into_string_lossy(out)
}
