use std::rc::Rc;

use bitflags::bitflags;

use crate::loc::Loc;
use crate::parse_error::{LocalizedParseError, ParseError, ParseResult};
use crate::source::Source;
use crate::unicode::is_id_part_code_point;
use crate::unicode::is_id_start_code_point;
use crate::unicode_property::{
    is_valid_lone_property, is_valid_property_name, is_valid_property_name_and_value,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegExpFlags: u8 {
        /// Whether to generate indices for substring matches: `d`
        const HAS_INDICES = 1 << 0;
        /// Global search, finding all matches in the string: `g`
        const GLOBAL = 1 << 1;
        /// Whether to ignore case when matching: `i`
        const IGNORE_CASE = 1 << 2;
        /// Whether to allow `^` and `$` to match newlines: `m`
        const MULTILINE = 1 << 3;
        /// Whether to allow `.` to match newlines: `s`
        const DOT_ALL = 1 << 4;
        /// Unicode aware mode, treating the pattern as a sequence of code points and enabling
        /// the unicode escape grammar: `u`
        const UNICODE_AWARE = 1 << 5;
        /// Sticky search, matching only at the current position in the target: `y`
        const STICKY = 1 << 6;
    }
}

/// Sentinel for the end of the pattern. Not a valid code point.
const EOF: i64 = -1;

/// Validator over the body and flags of a regexp literal.
///
/// The pattern is viewed as a sequence of UTF-16 code units. In unicode-aware mode (the `u`
/// flag) surrogate pairs are combined into single code points while scanning, otherwise each
/// unit stands alone. The validator follows the pattern grammar of the spec, with the annex
/// extensions in non-unicode mode.
pub struct RegExpValidator<'a> {
    /// UTF-16 code units of the pattern being validated
    units: Vec<u16>,
    /// Raw pattern text, used in diagnostics
    pattern: &'a str,
    /// Index of the current code unit
    pos: usize,
    /// Loc of the whole regexp literal, where all errors are attributed
    loc: Loc,
    source: Rc<Source>,
    ecma_version: u32,
    /// Unicode-aware mode (the `u` flag)
    switch_u: bool,
    /// Named-group mode: `\k` is always a named backreference and group names are validated
    switch_n: bool,
    num_capturing_parens: u32,
    max_back_reference: u32,
    group_names: Vec<String>,
    back_reference_names: Vec<String>,
    /// Value of the last parsed escape, digits, or class atom. -1 marks class escapes that
    /// cannot serve as a range endpoint.
    last_int_value: i64,
    /// Text of the last parsed group name or property name
    last_string_value: String,
    last_assertion_is_quantifiable: bool,
}

/// Validate the body and flags of a regexp literal against the pattern grammar. Errors are
/// attributed to the start of the literal.
pub fn validate_regexp_literal(
    pattern: &str,
    flags: &str,
    loc: Loc,
    source: &Rc<Source>,
    ecma_version: u32,
) -> ParseResult<()> {
    let parsed_flags = validate_regexp_flags(flags, loc, source, ecma_version)?;

    let switch_u = parsed_flags.contains(RegExpFlags::UNICODE_AWARE);
    let mut validator =
        RegExpValidator::new(pattern, loc, source.clone(), ecma_version, switch_u, switch_u);
    validator.validate_pattern()?;

    // A pattern without the u flag is first validated with `\k` and group names in their
    // lenient interpretation. If any named group was present the strict named-group grammar
    // applies after all, so validate again with it enabled.
    if !validator.switch_n && ecma_version >= 9 && !validator.group_names.is_empty() {
        let mut validator =
            RegExpValidator::new(pattern, loc, source.clone(), ecma_version, switch_u, true);
        validator.validate_pattern()?;
    }

    Ok(())
}

pub fn validate_regexp_flags(
    flags: &str,
    loc: Loc,
    source: &Rc<Source>,
    ecma_version: u32,
) -> ParseResult<RegExpFlags> {
    let mut parsed = RegExpFlags::empty();

    for char in flags.chars() {
        let flag = match char {
            'g' => RegExpFlags::GLOBAL,
            'i' => RegExpFlags::IGNORE_CASE,
            'm' => RegExpFlags::MULTILINE,
            'u' if ecma_version >= 6 => RegExpFlags::UNICODE_AWARE,
            'y' if ecma_version >= 6 => RegExpFlags::STICKY,
            's' if ecma_version >= 9 => RegExpFlags::DOT_ALL,
            'd' if ecma_version >= 13 => RegExpFlags::HAS_INDICES,
            _ => {
                let error = ParseError::InvalidRegexpFlag;
                return Err(LocalizedParseError {
                    error,
                    source_loc: Some((loc, source.clone())),
                });
            }
        };

        if parsed.contains(flag) {
            let error = ParseError::DuplicateRegexpFlag;
            return Err(LocalizedParseError { error, source_loc: Some((loc, source.clone())) });
        }

        parsed |= flag;
    }

    Ok(parsed)
}

fn is_syntax_character(ch: i64) -> bool {
    matches!(
        ch,
        0x24 /* $ */
        | 0x28 /* ( */
        | 0x29 /* ) */
        | 0x2A /* * */
        | 0x2B /* + */
        | 0x2E /* . */
        | 0x3F /* ? */
        | 0x5B /* [ */
        | 0x5C /* \ */
        | 0x5D /* ] */
        | 0x5E /* ^ */
        | 0x7B /* { */
        | 0x7C /* | */
        | 0x7D /* } */
    )
}

fn is_decimal_digit(ch: i64) -> bool {
    (0x30..=0x39).contains(&ch)
}

fn is_octal_digit(ch: i64) -> bool {
    (0x30..=0x37).contains(&ch)
}

fn is_hex_digit(ch: i64) -> bool {
    is_decimal_digit(ch) || (0x41..=0x46).contains(&ch) || (0x61..=0x66).contains(&ch)
}

fn hex_to_int(ch: i64) -> i64 {
    if (0x41..=0x46).contains(&ch) {
        10 + (ch - 0x41)
    } else if (0x61..=0x66).contains(&ch) {
        10 + (ch - 0x61)
    } else {
        ch - 0x30
    }
}

fn is_control_letter(ch: i64) -> bool {
    (0x41..=0x5A).contains(&ch) || (0x61..=0x7A).contains(&ch)
}

fn is_character_class_escape(ch: i64) -> bool {
    matches!(
        ch,
        0x64 /* d */ | 0x44 /* D */ | 0x73 /* s */ | 0x53 /* S */ | 0x77 /* w */ | 0x57 /* W */
    )
}

fn is_regexp_identifier_start(ch: i64) -> bool {
    if ch < 0 {
        return false;
    }

    ch == 0x24 /* $ */ || ch == 0x5F /* _ */ || is_id_start_code_point(ch as u32)
}

fn is_regexp_identifier_part(ch: i64) -> bool {
    if ch < 0 {
        return false;
    }

    ch == 0x24 /* $ */
        || ch == 0x5F /* _ */
        || ch == 0x200C /* ZWNJ */
        || ch == 0x200D /* ZWJ */
        || is_id_part_code_point(ch as u32)
}

fn is_valid_code_point(value: i64) -> bool {
    (0..=0x10FFFF).contains(&value)
}

impl<'a> RegExpValidator<'a> {
    fn new(
        pattern: &'a str,
        loc: Loc,
        source: Rc<Source>,
        ecma_version: u32,
        switch_u: bool,
        switch_n: bool,
    ) -> Self {
        RegExpValidator {
            units: pattern.encode_utf16().collect(),
            pattern,
            pos: 0,
            loc,
            source,
            ecma_version,
            switch_u,
            switch_n,
            num_capturing_parens: 0,
            max_back_reference: 0,
            group_names: vec![],
            back_reference_names: vec![],
            last_int_value: 0,
            last_string_value: String::new(),
            last_assertion_is_quantifiable: false,
        }
    }

    fn raise<T>(&self, description: &str) -> ParseResult<T> {
        let error = ParseError::RegexpSyntax {
            pattern: self.pattern.to_owned(),
            description: description.to_owned(),
        };

        Err(LocalizedParseError { error, source_loc: Some((self.loc, self.source.clone())) })
    }

    // Cursor over UTF-16 code units, combining surrogate pairs in unicode-aware mode

    fn at(&self, index: usize, force_u: bool) -> i64 {
        if index >= self.units.len() {
            return EOF;
        }

        let unit = self.units[index] as i64;
        if !(force_u || self.switch_u) || !(0xD800..=0xDBFF).contains(&unit) {
            return unit;
        }

        match self.units.get(index + 1) {
            Some(&next) if (0xDC00..=0xDFFF).contains(&(next as i64)) => {
                0x10000 + ((unit - 0xD800) << 10) + (next as i64 - 0xDC00)
            }
            _ => unit,
        }
    }

    fn width(&self, index: usize, force_u: bool) -> usize {
        let ch = self.at(index, force_u);
        if ch > 0xFFFF {
            2
        } else {
            1
        }
    }

    fn current(&self) -> i64 {
        self.at(self.pos, false)
    }

    fn current_u(&self, force_u: bool) -> i64 {
        self.at(self.pos, force_u)
    }

    fn lookahead(&self) -> i64 {
        self.at(self.pos + self.width(self.pos, false), false)
    }

    fn advance(&mut self) {
        self.advance_u(false)
    }

    fn advance_u(&mut self, force_u: bool) {
        if self.pos < self.units.len() {
            self.pos += self.width(self.pos, force_u);
        }
    }

    fn eat(&mut self, ch: i64) -> bool {
        if self.current() == ch {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_end(&self) -> bool {
        self.pos >= self.units.len()
    }

    // Pattern grammar

    fn validate_pattern(&mut self) -> ParseResult<()> {
        self.pos = 0;
        self.num_capturing_parens = 0;
        self.max_back_reference = 0;
        self.group_names.clear();
        self.back_reference_names.clear();

        self.disjunction()?;

        if !self.is_end() {
            if self.eat(0x29 /* ) */) {
                return self.raise("Unmatched ')'");
            }
            if self.eat(0x5D /* ] */) || self.eat(0x7D /* } */) {
                return self.raise("Lone quantifier brackets");
            }
        }

        if self.max_back_reference as i64 > self.num_capturing_parens as i64 {
            return self.raise("Invalid escape");
        }

        for name in &self.back_reference_names {
            if !self.group_names.contains(name) {
                return self.raise("Invalid named capture referenced");
            }
        }

        Ok(())
    }

    fn disjunction(&mut self) -> ParseResult<()> {
        self.alternative()?;
        while self.eat(0x7C /* | */) {
            self.alternative()?;
        }

        // A quantifier with nothing before it
        if self.eat_quantifier(true)? {
            return self.raise("Nothing to repeat");
        }
        if self.current() == 0x7B /* { */ && self.switch_u {
            return self.raise("Lone quantifier brackets");
        }

        Ok(())
    }

    fn alternative(&mut self) -> ParseResult<()> {
        while !self.is_end() && self.eat_term()? {}
        Ok(())
    }

    fn eat_term(&mut self) -> ParseResult<bool> {
        if self.eat_assertion()? {
            // Lookahead assertions are quantifiable in the annex grammar
            if self.last_assertion_is_quantifiable && self.eat_quantifier(false)? && self.switch_u
            {
                return self.raise("Invalid quantifier");
            }
            return Ok(true);
        }

        let matched = if self.switch_u { self.eat_atom()? } else { self.eat_extended_atom()? };
        if matched {
            self.eat_quantifier(false)?;
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_assertion(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        self.last_assertion_is_quantifiable = false;

        // ^ and $
        if self.eat(0x5E) || self.eat(0x24) {
            return Ok(true);
        }

        // \b and \B
        if self.eat(0x5C /* \ */) {
            if self.eat(0x42 /* B */) || self.eat(0x62 /* b */) {
                return Ok(true);
            }
            self.pos = start;
        }

        // Lookahead and lookbehind
        if self.eat(0x28 /* ( */) && self.eat(0x3F /* ? */) {
            let mut lookbehind = false;
            if self.ecma_version >= 9 {
                lookbehind = self.eat(0x3C /* < */);
            }
            if self.eat(0x3D /* = */) || self.eat(0x21 /* ! */) {
                self.disjunction()?;
                if !self.eat(0x29 /* ) */) {
                    return self.raise("Unterminated group");
                }
                self.last_assertion_is_quantifiable = !lookbehind;
                return Ok(true);
            }
        }

        self.pos = start;
        Ok(false)
    }

    fn eat_quantifier(&mut self, no_error: bool) -> ParseResult<bool> {
        if self.eat_quantifier_prefix(no_error)? {
            // A trailing ? makes the quantifier lazy
            self.eat(0x3F);
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_quantifier_prefix(&mut self, no_error: bool) -> ParseResult<bool> {
        let eaten =
            self.eat(0x2A /* * */) || self.eat(0x2B /* + */) || self.eat(0x3F /* ? */);
        if eaten {
            return Ok(true);
        }

        self.eat_braced_quantifier(no_error)
    }

    fn eat_braced_quantifier(&mut self, no_error: bool) -> ParseResult<bool> {
        let start = self.pos;
        if self.eat(0x7B /* { */) {
            if self.eat_decimal_digits() {
                let min = self.last_int_value;
                let mut max = -1;
                if self.eat(0x2C /* , */) && self.eat_decimal_digits() {
                    max = self.last_int_value;
                }
                if self.eat(0x7D /* } */) {
                    if max != -1 && max < min && !no_error {
                        return self.raise("numbers out of order in {} quantifier");
                    }
                    return Ok(true);
                }
            }

            if self.switch_u && !no_error {
                return self.raise("Incomplete quantifier");
            }
            self.pos = start;
        }

        Ok(false)
    }

    fn eat_atom(&mut self) -> ParseResult<bool> {
        let matched = self.eat_pattern_characters()
            || self.eat(0x2E /* . */)
            || self.eat_reverse_solidus_atom_escape()?
            || self.eat_character_class()?
            || self.eat_uncapturing_group()?
            || self.eat_capturing_group()?;

        Ok(matched)
    }

    fn eat_extended_atom(&mut self) -> ParseResult<bool> {
        if self.eat(0x2E /* . */)
            || self.eat_reverse_solidus_atom_escape()?
            || self.eat_character_class()?
            || self.eat_uncapturing_group()?
            || self.eat_capturing_group()?
        {
            return Ok(true);
        }

        // A braced quantifier here has nothing to repeat
        if self.eat_braced_quantifier(true)? {
            return self.raise("Nothing to repeat");
        }

        // ExtendedPatternCharacter also permits lone ], {, and }
        let ch = self.current();
        if ch != EOF
            && !matches!(
                ch,
                0x5E /* ^ */
                | 0x24 /* $ */
                | 0x5C /* \ */
                | 0x2E /* . */
                | 0x2A /* * */
                | 0x2B /* + */
                | 0x3F /* ? */
                | 0x28 /* ( */
                | 0x29 /* ) */
                | 0x5B /* [ */
                | 0x7C /* | */
            )
        {
            self.advance();
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_pattern_characters(&mut self) -> bool {
        let start = self.pos;
        loop {
            let ch = self.current();
            if ch == EOF || is_syntax_character(ch) {
                break;
            }
            self.advance();
        }

        self.pos != start
    }

    fn eat_reverse_solidus_atom_escape(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        if self.eat(0x5C /* \ */) {
            if self.eat_atom_escape()? {
                return Ok(true);
            }
            self.pos = start;
        }

        Ok(false)
    }

    fn eat_atom_escape(&mut self) -> ParseResult<bool> {
        if self.eat_back_reference()
            || self.eat_character_class_escape()?
            || self.eat_character_escape()?
            || (self.switch_n && self.eat_k_group_name()?)
        {
            return Ok(true);
        }

        if self.switch_u {
            if self.current() == 0x63 /* c */ {
                return self.raise("Invalid unicode escape");
            }
            return self.raise("Invalid escape");
        }

        Ok(false)
    }

    fn eat_back_reference(&mut self) -> bool {
        let start = self.pos;
        if self.eat_decimal_escape() {
            let n = self.last_int_value;
            if self.switch_u {
                if n > self.max_back_reference as i64 {
                    self.max_back_reference = n.min(u32::MAX as i64) as u32;
                }
                return true;
            }
            if n <= self.num_capturing_parens as i64 {
                return true;
            }
            self.pos = start;
        }

        false
    }

    fn eat_k_group_name(&mut self) -> ParseResult<bool> {
        if self.eat(0x6B /* k */) {
            if self.eat_group_name()? {
                self.back_reference_names.push(self.last_string_value.clone());
                return Ok(true);
            }
            return self.raise("Invalid named reference");
        }

        Ok(false)
    }

    fn eat_character_escape(&mut self) -> ParseResult<bool> {
        let matched = self.eat_control_escape()
            || self.eat_c_control_letter()
            || self.eat_zero()
            || self.eat_hex_escape_sequence()?
            || self.eat_regexp_unicode_escape_sequence(false)?
            || (!self.switch_u && self.eat_legacy_octal_escape_sequence())
            || self.eat_identity_escape();

        Ok(matched)
    }

    fn eat_control_escape(&mut self) -> bool {
        let ch = self.current();
        let value = match ch {
            0x66 /* f */ => 0x0C,
            0x6E /* n */ => 0x0A,
            0x72 /* r */ => 0x0D,
            0x74 /* t */ => 0x09,
            0x76 /* v */ => 0x0B,
            _ => return false,
        };

        self.last_int_value = value;
        self.advance();
        true
    }

    fn eat_c_control_letter(&mut self) -> bool {
        let start = self.pos;
        if self.eat(0x63 /* c */) {
            let ch = self.current();
            if is_control_letter(ch) {
                self.last_int_value = ch % 0x20;
                self.advance();
                return true;
            }
            self.pos = start;
        }

        false
    }

    fn eat_zero(&mut self) -> bool {
        if self.current() == 0x30 /* 0 */ && !is_decimal_digit(self.lookahead()) {
            self.last_int_value = 0;
            self.advance();
            return true;
        }

        false
    }

    fn eat_hex_escape_sequence(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        if self.eat(0x78 /* x */) {
            if self.eat_fixed_hex_digits(2) {
                return Ok(true);
            }
            if self.switch_u {
                return self.raise("Invalid escape");
            }
            self.pos = start;
        }

        Ok(false)
    }

    fn eat_regexp_unicode_escape_sequence(&mut self, force_u: bool) -> ParseResult<bool> {
        let start = self.pos;
        let switch_u = force_u || self.switch_u;

        if self.eat(0x75 /* u */) {
            if self.eat_fixed_hex_digits(4) {
                let lead = self.last_int_value;
                if switch_u && (0xD800..=0xDBFF).contains(&lead) {
                    let lead_surrogate_end = self.pos;
                    if self.eat(0x5C /* \ */)
                        && self.eat(0x75 /* u */)
                        && self.eat_fixed_hex_digits(4)
                    {
                        let trail = self.last_int_value;
                        if (0xDC00..=0xDFFF).contains(&trail) {
                            self.last_int_value =
                                (lead - 0xD800) * 0x400 + (trail - 0xDC00) + 0x10000;
                            return Ok(true);
                        }
                    }
                    self.pos = lead_surrogate_end;
                    self.last_int_value = lead;
                }
                return Ok(true);
            }

            if switch_u
                && self.eat(0x7B /* { */)
                && self.eat_hex_digits()
                && self.eat(0x7D /* } */)
                && is_valid_code_point(self.last_int_value)
            {
                return Ok(true);
            }
            if switch_u {
                return self.raise("Invalid unicode escape");
            }
            self.pos = start;
        }

        Ok(false)
    }

    fn eat_identity_escape(&mut self) -> bool {
        if self.switch_u {
            if self.eat_syntax_character() {
                return true;
            }
            if self.eat(0x2F /* / */) {
                self.last_int_value = 0x2F;
                return true;
            }
            return false;
        }

        let ch = self.current();
        if ch != EOF && ch != 0x63 /* c */ && (!self.switch_n || ch != 0x6B /* k */) {
            self.last_int_value = ch;
            self.advance();
            return true;
        }

        false
    }

    fn eat_syntax_character(&mut self) -> bool {
        let ch = self.current();
        if is_syntax_character(ch) {
            self.last_int_value = ch;
            self.advance();
            return true;
        }

        false
    }

    fn eat_decimal_escape(&mut self) -> bool {
        self.last_int_value = 0;
        let mut ch = self.current();
        if (0x31..=0x39).contains(&ch) {
            loop {
                self.last_int_value =
                    self.last_int_value.saturating_mul(10).saturating_add(ch - 0x30);
                self.advance();
                ch = self.current();
                if !is_decimal_digit(ch) {
                    break;
                }
            }
            return true;
        }

        false
    }

    fn eat_character_class_escape(&mut self) -> ParseResult<bool> {
        let ch = self.current();

        if is_character_class_escape(ch) {
            self.last_int_value = -1;
            self.advance();
            return Ok(true);
        }

        // Unicode property escapes \p{...} and \P{...}
        if self.switch_u && self.ecma_version >= 9 && (ch == 0x50 /* P */ || ch == 0x70 /* p */)
        {
            self.last_int_value = -1;
            self.advance();
            if self.eat(0x7B /* { */)
                && self.eat_unicode_property_value_expression()?
                && self.eat(0x7D /* } */)
            {
                return Ok(true);
            }
            return self.raise("Invalid property name");
        }

        Ok(false)
    }

    fn eat_unicode_property_value_expression(&mut self) -> ParseResult<bool> {
        let start = self.pos;

        // UnicodePropertyName=UnicodePropertyValue
        if self.eat_unicode_property_name() && self.eat(0x3D /* = */) {
            let name = self.last_string_value.clone();
            if self.eat_unicode_property_value() {
                let value = self.last_string_value.clone();
                if !is_valid_property_name(&name) {
                    return self.raise("Invalid property name");
                }
                if !is_valid_property_name_and_value(&name, &value, self.ecma_version) {
                    return self.raise("Invalid property value");
                }
                return Ok(true);
            }
        }
        self.pos = start;

        // LoneUnicodePropertyNameOrValue
        if self.eat_lone_unicode_property_name_or_value() {
            let name_or_value = self.last_string_value.clone();
            if !is_valid_lone_property(&name_or_value, self.ecma_version) {
                return self.raise("Invalid property name");
            }
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_unicode_property_name(&mut self) -> bool {
        self.last_string_value.clear();
        loop {
            let ch = self.current();
            if is_control_letter(ch) || ch == 0x5F /* _ */ {
                self.last_string_value.push((ch as u8) as char);
                self.advance();
            } else {
                break;
            }
        }

        !self.last_string_value.is_empty()
    }

    fn eat_unicode_property_value(&mut self) -> bool {
        self.last_string_value.clear();
        loop {
            let ch = self.current();
            if is_control_letter(ch) || is_decimal_digit(ch) || ch == 0x5F /* _ */ {
                self.last_string_value.push((ch as u8) as char);
                self.advance();
            } else {
                break;
            }
        }

        !self.last_string_value.is_empty()
    }

    fn eat_lone_unicode_property_name_or_value(&mut self) -> bool {
        self.eat_unicode_property_value()
    }

    fn eat_character_class(&mut self) -> ParseResult<bool> {
        if self.eat(0x5B /* [ */) {
            self.eat(0x5E /* ^ */);
            self.class_ranges()?;
            if self.eat(0x5D /* ] */) {
                return Ok(true);
            }
            return self.raise("Unterminated character class");
        }

        Ok(false)
    }

    fn class_ranges(&mut self) -> ParseResult<()> {
        while self.eat_class_atom()? {
            let left = self.last_int_value;
            if self.eat(0x2D /* - */) && self.eat_class_atom()? {
                let right = self.last_int_value;
                if self.switch_u && (left == -1 || right == -1) {
                    return self.raise("Invalid character class");
                }
                if left != -1 && right != -1 && left > right {
                    return self.raise("Range out of order in character class");
                }
            }
        }

        Ok(())
    }

    fn eat_class_atom(&mut self) -> ParseResult<bool> {
        let start = self.pos;

        if self.eat(0x5C /* \ */) {
            if self.eat_class_escape()? {
                return Ok(true);
            }
            if self.switch_u {
                let ch = self.current();
                if ch == 0x63 /* c */ || is_octal_digit(ch) {
                    return self.raise("Invalid class escape");
                }
                return self.raise("Invalid escape");
            }
            self.pos = start;
        }

        let ch = self.current();
        if ch != EOF && ch != 0x5D /* ] */ {
            self.last_int_value = ch;
            self.advance();
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_class_escape(&mut self) -> ParseResult<bool> {
        let start = self.pos;

        // \b is a backspace inside a class
        if self.eat(0x62 /* b */) {
            self.last_int_value = 0x08;
            return Ok(true);
        }

        // \- is only an escape in unicode mode
        if self.switch_u && self.eat(0x2D /* - */) {
            self.last_int_value = 0x2D;
            return Ok(true);
        }

        // Annex \c with a digit or underscore
        if !self.switch_u && self.eat(0x63 /* c */) {
            let ch = self.current();
            if is_decimal_digit(ch) || ch == 0x5F /* _ */ {
                self.last_int_value = ch % 0x20;
                self.advance();
                return Ok(true);
            }
            self.pos = start;
        }

        if self.eat_character_class_escape()? {
            return Ok(true);
        }

        self.eat_character_escape()
    }

    fn eat_legacy_octal_escape_sequence(&mut self) -> bool {
        if self.eat_octal_digit() {
            let n1 = self.last_int_value;
            if self.eat_octal_digit() {
                let n2 = self.last_int_value;
                if n1 <= 3 && self.eat_octal_digit() {
                    self.last_int_value = n1 * 64 + n2 * 8 + self.last_int_value;
                } else {
                    self.last_int_value = n1 * 8 + n2;
                }
            } else {
                self.last_int_value = n1;
            }
            return true;
        }

        false
    }

    fn eat_octal_digit(&mut self) -> bool {
        let ch = self.current();
        if is_octal_digit(ch) {
            self.last_int_value = ch - 0x30;
            self.advance();
            return true;
        }

        self.last_int_value = 0;
        false
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let start = self.pos;
        self.last_int_value = 0;
        while is_decimal_digit(self.current()) {
            self.last_int_value =
                self.last_int_value.saturating_mul(10).saturating_add(self.current() - 0x30);
            self.advance();
        }

        self.pos != start
    }

    fn eat_hex_digits(&mut self) -> bool {
        let start = self.pos;
        self.last_int_value = 0;
        while is_hex_digit(self.current()) {
            self.last_int_value =
                self.last_int_value.saturating_mul(16).saturating_add(hex_to_int(self.current()));
            self.advance();
        }

        self.pos != start
    }

    fn eat_fixed_hex_digits(&mut self, length: usize) -> bool {
        let start = self.pos;
        self.last_int_value = 0;
        for _ in 0..length {
            let ch = self.current();
            if !is_hex_digit(ch) {
                self.pos = start;
                return false;
            }
            self.last_int_value = self.last_int_value * 16 + hex_to_int(ch);
            self.advance();
        }

        true
    }

    fn eat_uncapturing_group(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        if self.eat(0x28 /* ( */) {
            if self.eat(0x3F /* ? */) && self.eat(0x3A /* : */) {
                self.disjunction()?;
                if self.eat(0x29 /* ) */) {
                    return Ok(true);
                }
                return self.raise("Unterminated group");
            }
            self.pos = start;
        }

        Ok(false)
    }

    fn eat_capturing_group(&mut self) -> ParseResult<bool> {
        if self.eat(0x28 /* ( */) {
            if self.ecma_version >= 9 {
                self.group_specifier()?;
            } else if self.current() == 0x3F /* ? */ {
                return self.raise("Invalid group");
            }

            self.disjunction()?;
            if self.eat(0x29 /* ) */) {
                self.num_capturing_parens += 1;
                return Ok(true);
            }
            return self.raise("Unterminated group");
        }

        Ok(false)
    }

    fn group_specifier(&mut self) -> ParseResult<()> {
        if self.eat(0x3F /* ? */) {
            if self.eat_group_name()? {
                if self.group_names.contains(&self.last_string_value) {
                    return self.raise("Duplicate capture group name");
                }
                self.group_names.push(self.last_string_value.clone());
                return Ok(());
            }
            return self.raise("Invalid group");
        }

        Ok(())
    }

    fn eat_group_name(&mut self) -> ParseResult<bool> {
        self.last_string_value.clear();
        if self.eat(0x3C /* < */) {
            if self.eat_regexp_identifier_name()? && self.eat(0x3E /* > */) {
                return Ok(true);
            }
            return self.raise("Invalid capture group name");
        }

        Ok(false)
    }

    fn eat_regexp_identifier_name(&mut self) -> ParseResult<bool> {
        self.last_string_value.clear();
        if self.eat_regexp_identifier_start()? {
            let mut name = String::new();
            push_code_point(&mut name, self.last_int_value);
            while self.eat_regexp_identifier_part()? {
                push_code_point(&mut name, self.last_int_value);
            }
            self.last_string_value = name;
            return Ok(true);
        }

        Ok(false)
    }

    fn eat_regexp_identifier_start(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        let force_u = self.ecma_version >= 11;
        let mut ch = self.current_u(force_u);
        self.advance_u(force_u);

        if ch == 0x5C /* \ */ && self.eat_regexp_unicode_escape_sequence(force_u)? {
            ch = self.last_int_value;
        }
        if is_regexp_identifier_start(ch) {
            self.last_int_value = ch;
            return Ok(true);
        }

        self.pos = start;
        Ok(false)
    }

    fn eat_regexp_identifier_part(&mut self) -> ParseResult<bool> {
        let start = self.pos;
        let force_u = self.ecma_version >= 11;
        let mut ch = self.current_u(force_u);
        self.advance_u(force_u);

        if ch == 0x5C /* \ */ && self.eat_regexp_unicode_escape_sequence(force_u)? {
            ch = self.last_int_value;
        }
        if is_regexp_identifier_part(ch) {
            self.last_int_value = ch;
            return Ok(true);
        }

        self.pos = start;
        Ok(false)
    }
}

/// Append a code point to a name being built, substituting the replacement character for values
/// outside the valid range (which will then fail the identifier checks).
fn push_code_point(string: &mut String, value: i64) {
    let char = u32::try_from(value).ok().and_then(char::from_u32).unwrap_or('\u{FFFD}');
    string.push(char);
}
