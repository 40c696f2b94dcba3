/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Text-level helpers: decoding, delimiter sniffing and cell parsing.

/// Decode raw bytes as UTF-8, falling back to Latin-1 when they are not
/// valid UTF-8. A leading byte order mark is dropped.
pub(crate) fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // Every byte is a valid Latin-1 code point.
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_owned(),
        None => text,
    }
}

/// Pick the field delimiter from the header line: `;` when it occurs more
/// often than `,`, otherwise `,`.
pub(crate) fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let count = |needle: u8| header.bytes().filter(|byte| *byte == needle).count();
    if count(b';') > count(b',') { b';' } else { b',' }
}

/// The year named by a `F<digits>` header, e.g. `F1961`.
pub(crate) fn year_column(header: &str) -> Option<u16> {
    let digits = header.trim().strip_prefix('F')?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse a measurement cell. Empty, `NA`, `NaN` and unparsable cells are
/// missing. A decimal comma is accepted in place of a decimal point.
pub(crate) fn measurement(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("na") {
        return None;
    }
    let value: f64 = match cell.parse() {
        Ok(value) => value,
        Err(_) => cell.replacen(',', ".", 1).parse().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Parse a row identifier. Integral floats such as `12.0` are accepted.
pub(crate) fn object_id(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    cell.parse().ok().or_else(|| {
        let value: f64 = cell.parse().ok()?;
        (value.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&value)).then_some(value as u64)
    })
}
