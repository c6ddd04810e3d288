//! Byte classes and scanning for the HTTP/1.x head.
use std::ops::Range;

const BLOCK: usize = size_of::<usize>();
const LSB: usize = usize::from_ne_bytes([0b0000_0001; BLOCK]);
const MSB: usize = usize::from_ne_bytes([0b1000_0000; BLOCK]);
const LF: usize = usize::from_ne_bytes([b'\n'; BLOCK]);

/// Returns the index of the first `\n` in `bytes`.
///
/// Whole words without a line feed are skipped, the remainder is scanned bytewise.
pub(crate) fn find_lf(bytes: &[u8]) -> Option<usize> {
    let mut offset = 0;
    let mut state = bytes;

    while let Some((chunk, rest)) = state.split_first_chunk::<BLOCK>() {
        let block = usize::from_ne_bytes(*chunk) ^ LF;
        // nonzero iff some byte of `block` is zero, i.e. was '\n'
        if block.wrapping_sub(LSB) & !block & MSB != 0 {
            break;
        }
        offset += BLOCK;
        state = rest;
    }

    state.iter().position(|&b| b == b'\n').map(|nth| offset + nth)
}

static TOKEN: [bool; 256] = {
    let mut table = [false; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = matches!(
            byte as u8,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~' | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z'
        );
        byte += 1;
    }
    table
};

/// [tchar](https://www.rfc-editor.org/rfc/rfc9110.html#name-tokens)
#[inline]
pub(crate) fn is_token(byte: u8) -> bool {
    TOKEN[byte as usize]
}

/// Visible ASCII, no whitespace.
#[inline]
pub(crate) fn is_target(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E)
}

/// [field-content](https://www.rfc-editor.org/rfc/rfc9110.html#name-field-values), obs-text
/// included.
#[inline]
pub(crate) fn is_field_value(byte: u8) -> bool {
    matches!(byte, b'\t' | b' '..=b'~' | 0x80..=0xFF)
}

/// Range of `value` without leading and trailing optional whitespace.
pub(crate) fn trim_ows(value: &[u8]) -> Range<usize> {
    let is_ows = |b: &u8| matches!(b, b' ' | b'\t');
    let start = value.iter().take_while(|b| is_ows(b)).count();
    let end = value.len() - value[start..].iter().rev().take_while(|b| is_ows(b)).count();
    start..end
}
