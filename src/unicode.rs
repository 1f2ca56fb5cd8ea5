/// A single unicode code point. Values above char::MAX can appear while decoding escape
/// sequences in regexp patterns, where lone surrogates are representable.
pub type CodePoint = u32;

// Start of high surrogate range, inclusive
const HIGH_SURROGATE_START: CodePoint = 0xD800;
// End of high surrogate range, inclusive
const HIGH_SURROGATE_END: CodePoint = 0xDBFF;

// Start of low surrogate range, inclusive
const LOW_SURROGATE_START: CodePoint = 0xDC00;
// End of low surrogate range, inclusive
const LOW_SURROGATE_END: CodePoint = 0xDFFF;

pub const MAX_CODE_POINT: CodePoint = 0x10FFFF;

#[inline]
pub fn is_high_surrogate_code_point(code_point: CodePoint) -> bool {
    (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&code_point)
}

#[inline]
pub fn is_low_surrogate_code_point(code_point: CodePoint) -> bool {
    (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&code_point)
}

pub fn code_point_from_surrogate_pair(high: CodePoint, low: CodePoint) -> CodePoint {
    0x10000 + ((high - HIGH_SURROGATE_START) << 10) + (low - LOW_SURROGATE_START)
}

#[inline]
pub fn is_ascii(char: char) -> bool {
    (char as u32) < 0x80
}

#[inline]
pub fn is_decimal_digit(char: char) -> bool {
    char.is_ascii_digit()
}

#[inline]
pub fn is_ascii_whitespace(char: char) -> bool {
    match char {
         ' '
        | '\t'
        // Vertical tab
        | '\u{000B}'
        // Form feed
        | '\u{000C}' => true,
        _ => false,
    }
}

#[inline]
pub fn is_unicode_whitespace(char: char) -> bool {
    match char {
        // All non-ascii characters in the unicode Space_Separator category
        '\u{00A0}'
        | '\u{1680}'
        | '\u{2000}'..='\u{200A}'
        | '\u{202F}'
        | '\u{205F}'
        | '\u{3000}'
        // And the zero width non breaking space
        | '\u{FEFF}'
        => true,
        _ => false,
    }
}

#[inline]
pub fn is_whitespace(char: char) -> bool {
    is_ascii_whitespace(char) || is_unicode_whitespace(char)
}

#[inline]
pub fn is_unicode_newline(char: char) -> bool {
    char == '\u{2028}' || char == '\u{2029}'
}

#[inline]
pub fn is_ascii_newline(char: char) -> bool {
    matches!(char, '\n' | '\r')
}

#[inline]
pub fn is_newline(char: char) -> bool {
    is_ascii_newline(char) || is_unicode_newline(char)
}

pub fn get_binary_value(char: char) -> Option<u32> {
    match char {
        '0' => Some(0),
        '1' => Some(1),
        _ => None,
    }
}

pub fn get_octal_value(char: char) -> Option<u32> {
    match char {
        '0'..='7' => Some(char as u32 - '0' as u32),
        _ => None,
    }
}

pub fn get_decimal_value(char: char) -> Option<u32> {
    match char {
        '0'..='9' => Some(char as u32 - '0' as u32),
        _ => None,
    }
}

pub fn get_hex_value(char: char) -> Option<u32> {
    match char {
        '0'..='9' => Some(char as u32 - '0' as u32),
        'a'..='f' => Some(char as u32 - 'a' as u32 + 10),
        'A'..='F' => Some(char as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Can this character appear as the first character of an identifier.
#[inline]
pub fn is_id_start_ascii(char: char) -> bool {
    matches!(char, 'a'..='z' | 'A'..='Z' | '_' | '$')
}

/// Can this character appear in an identifier (after the first character).
#[inline]
pub fn is_id_part_ascii(char: char) -> bool {
    matches!(char, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$')
}

#[inline]
pub fn is_id_start_unicode(char: char) -> bool {
    unicode_ident::is_xid_start(char)
}

#[inline]
pub fn is_id_part_unicode(char: char) -> bool {
    // Either part of the unicode ID_Continue, ZWNJ, or ZWJ
    unicode_ident::is_xid_continue(char) || char == '\u{200C}' || char == '\u{200D}'
}

#[inline]
pub fn is_id_start(char: char) -> bool {
    is_id_start_ascii(char) || (!is_ascii(char) && is_id_start_unicode(char))
}

#[inline]
pub fn is_id_part(char: char) -> bool {
    is_id_part_ascii(char) || (!is_ascii(char) && is_id_part_unicode(char))
}

/// Identifier checks for code points that may lie outside the range of char, e.g. when decoding
/// escape sequences in regexp patterns.
pub fn is_id_start_code_point(code_point: CodePoint) -> bool {
    match char::from_u32(code_point) {
        Some(char) => is_id_start(char),
        None => false,
    }
}

pub fn is_id_part_code_point(code_point: CodePoint) -> bool {
    match char::from_u32(code_point) {
        Some(char) => is_id_part(char),
        None => false,
    }
}
