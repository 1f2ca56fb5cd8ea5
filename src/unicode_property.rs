//! Name tables for unicode property escapes in regexp patterns. The tables list which property
//! names and values each edition of the language accepts; the matching itself is outside the
//! parser's concern since a validator only has to judge the names.

/// Binary property names, with their aliases, accepted from ES2018 onwards.
static BINARY_PROPERTIES: &[&str] = &[
    "ASCII",
    "ASCII_Hex_Digit",
    "AHex",
    "Alphabetic",
    "Alpha",
    "Any",
    "Assigned",
    "Bidi_Control",
    "Bidi_C",
    "Bidi_Mirrored",
    "Bidi_M",
    "Case_Ignorable",
    "CI",
    "Cased",
    "Changes_When_Casefolded",
    "CWCF",
    "Changes_When_Casemapped",
    "CWCM",
    "Changes_When_Lowercased",
    "CWL",
    "Changes_When_NFKC_Casefolded",
    "CWKCF",
    "Changes_When_Titlecased",
    "CWT",
    "Changes_When_Uppercased",
    "CWU",
    "Dash",
    "Default_Ignorable_Code_Point",
    "DI",
    "Deprecated",
    "Dep",
    "Diacritic",
    "Dia",
    "Emoji",
    "Emoji_Component",
    "Emoji_Modifier",
    "Emoji_Modifier_Base",
    "Emoji_Presentation",
    "Extender",
    "Ext",
    "Grapheme_Base",
    "Gr_Base",
    "Grapheme_Extend",
    "Gr_Ext",
    "Hex_Digit",
    "Hex",
    "IDS_Binary_Operator",
    "IDSB",
    "IDS_Trinary_Operator",
    "IDST",
    "ID_Continue",
    "IDC",
    "ID_Start",
    "IDS",
    "Ideographic",
    "Ideo",
    "Join_Control",
    "Join_C",
    "Logical_Order_Exception",
    "LOE",
    "Lowercase",
    "Lower",
    "Math",
    "Noncharacter_Code_Point",
    "NChar",
    "Pattern_Syntax",
    "Pat_Syn",
    "Pattern_White_Space",
    "Pat_WS",
    "Quotation_Mark",
    "QMark",
    "Radical",
    "Regional_Indicator",
    "RI",
    "Sentence_Terminal",
    "STerm",
    "Soft_Dotted",
    "SD",
    "Terminal_Punctuation",
    "Term",
    "Unified_Ideograph",
    "UIdeo",
    "Uppercase",
    "Upper",
    "Variation_Selector",
    "VS",
    "White_Space",
    "space",
    "XID_Continue",
    "XIDC",
    "XID_Start",
    "XIDS",
];

/// Binary properties added in ES2019.
static BINARY_PROPERTIES_E10: &[&str] = &["Extended_Pictographic"];

/// Binary property aliases added in ES2021.
static BINARY_PROPERTIES_E12: &[&str] = &["EBase", "EComp", "EMod", "EPres", "ExtPict"];

/// General_Category values with their aliases. Valid both as `\p{gc=...}` values and on their
/// own as `\p{...}`.
static GENERAL_CATEGORY_VALUES: &[&str] = &[
    "Cased_Letter",
    "LC",
    "Close_Punctuation",
    "Pe",
    "Connector_Punctuation",
    "Pc",
    "Control",
    "Cc",
    "cntrl",
    "Currency_Symbol",
    "Sc",
    "Dash_Punctuation",
    "Pd",
    "Decimal_Number",
    "Nd",
    "digit",
    "Enclosing_Mark",
    "Me",
    "Final_Punctuation",
    "Pf",
    "Format",
    "Cf",
    "Initial_Punctuation",
    "Pi",
    "Letter",
    "L",
    "Letter_Number",
    "Nl",
    "Line_Separator",
    "Zl",
    "Lowercase_Letter",
    "Ll",
    "Mark",
    "M",
    "Combining_Mark",
    "Math_Symbol",
    "Sm",
    "Modifier_Letter",
    "Lm",
    "Modifier_Symbol",
    "Sk",
    "Nonspacing_Mark",
    "Mn",
    "Number",
    "N",
    "Open_Punctuation",
    "Ps",
    "Other",
    "C",
    "Other_Letter",
    "Lo",
    "Other_Number",
    "No",
    "Other_Punctuation",
    "Po",
    "Other_Symbol",
    "So",
    "Paragraph_Separator",
    "Zp",
    "Private_Use",
    "Co",
    "Punctuation",
    "P",
    "punct",
    "Separator",
    "Z",
    "Space_Separator",
    "Zs",
    "Spacing_Mark",
    "Mc",
    "Surrogate",
    "Cs",
    "Symbol",
    "S",
    "Titlecase_Letter",
    "Lt",
    "Unassigned",
    "Cn",
    "Uppercase_Letter",
    "Lu",
];

/// Script values (long name followed by its alias) accepted from ES2018 onwards.
static SCRIPT_VALUES: &[&str] = &[
    "Adlam", "Adlm", "Ahom", "Anatolian_Hieroglyphs", "Hluw", "Arabic", "Arab", "Armenian",
    "Armn", "Avestan", "Avst", "Balinese", "Bali", "Bamum", "Bamu", "Bassa_Vah", "Bass",
    "Batak", "Batk", "Bengali", "Beng", "Bhaiksuki", "Bhks", "Bopomofo", "Bopo", "Brahmi",
    "Brah", "Braille", "Brai", "Buginese", "Bugi", "Buhid", "Buhd", "Canadian_Aboriginal",
    "Cans", "Carian", "Cari", "Caucasian_Albanian", "Aghb", "Chakma", "Cakm", "Cham",
    "Cherokee", "Cher", "Common", "Zyyy", "Coptic", "Copt", "Qaac", "Cuneiform", "Xsux",
    "Cypriot", "Cprt", "Cyrillic", "Cyrl", "Deseret", "Dsrt", "Devanagari", "Deva",
    "Duployan", "Dupl", "Egyptian_Hieroglyphs", "Egyp", "Elbasan", "Elba", "Ethiopic", "Ethi",
    "Georgian", "Geor", "Glagolitic", "Glag", "Gothic", "Goth", "Grantha", "Gran", "Greek",
    "Grek", "Gujarati", "Gujr", "Gurmukhi", "Guru", "Han", "Hani", "Hangul", "Hang",
    "Hanunoo", "Hano", "Hatran", "Hatr", "Hebrew", "Hebr", "Hiragana", "Hira",
    "Imperial_Aramaic", "Armi", "Inherited", "Zinh", "Qaai", "Inscriptional_Pahlavi", "Phli",
    "Inscriptional_Parthian", "Prti", "Javanese", "Java", "Kaithi", "Kthi", "Kannada", "Knda",
    "Katakana", "Kana", "Kayah_Li", "Kali", "Kharoshthi", "Khar", "Khmer", "Khmr", "Khojki",
    "Khoj", "Khudawadi", "Sind", "Lao", "Laoo", "Latin", "Latn", "Lepcha", "Lepc", "Limbu",
    "Limb", "Linear_A", "Lina", "Linear_B", "Linb", "Lisu", "Lycian", "Lyci", "Lydian",
    "Lydi", "Mahajani", "Mahj", "Malayalam", "Mlym", "Mandaic", "Mand", "Manichaean", "Mani",
    "Marchen", "Marc", "Masaram_Gondi", "Gonm", "Meetei_Mayek", "Mtei", "Mende_Kikakui",
    "Mend", "Meroitic_Cursive", "Merc", "Meroitic_Hieroglyphs", "Mero", "Miao", "Plrd",
    "Modi", "Mongolian", "Mong", "Mro", "Mroo", "Multani", "Mult", "Myanmar", "Mymr",
    "Nabataean", "Nbat", "New_Tai_Lue", "Talu", "Newa", "Nko", "Nkoo", "Nushu", "Nshu",
    "Ogham", "Ogam", "Ol_Chiki", "Olck", "Old_Hungarian", "Hung", "Old_Italic", "Ital",
    "Old_North_Arabian", "Narb", "Old_Permic", "Perm", "Old_Persian", "Xpeo",
    "Old_South_Arabian", "Sarb", "Old_Turkic", "Orkh", "Oriya", "Orya", "Osage", "Osge",
    "Osmanya", "Osma", "Pahawh_Hmong", "Hmng", "Palmyrene", "Palm", "Pau_Cin_Hau", "Pauc",
    "Phags_Pa", "Phag", "Phoenician", "Phnx", "Psalter_Pahlavi", "Phlp", "Rejang", "Rjng",
    "Runic", "Runr", "Samaritan", "Samr", "Saurashtra", "Saur", "Sharada", "Shrd", "Shavian",
    "Shaw", "Siddham", "Sidd", "SignWriting", "Sgnw", "Sinhala", "Sinh", "Sora_Sompeng",
    "Sora", "Soyombo", "Soyo", "Sundanese", "Sund", "Syloti_Nagri", "Sylo", "Syriac", "Syrc",
    "Tagalog", "Tglg", "Tagbanwa", "Tagb", "Tai_Le", "Tale", "Tai_Tham", "Lana", "Tai_Viet",
    "Tavt", "Takri", "Takr", "Tamil", "Taml", "Tangut", "Tang", "Telugu", "Telu", "Thaana",
    "Thaa", "Thai", "Tibetan", "Tibt", "Tifinagh", "Tfng", "Tirhuta", "Tirh", "Ugaritic",
    "Ugar", "Vai", "Vaii", "Warang_Citi", "Wara", "Yi", "Yiii", "Zanabazar_Square", "Zanb",
];

/// Script values added in ES2019.
static SCRIPT_VALUES_E10: &[&str] = &[
    "Dogra", "Dogr", "Gunjala_Gondi", "Gong", "Hanifi_Rohingya", "Rohg", "Makasar", "Maka",
    "Medefaidrin", "Medf", "Old_Sogdian", "Sogo", "Sogdian", "Sogd",
];

/// Script values added in ES2020.
static SCRIPT_VALUES_E11: &[&str] = &[
    "Elymaic", "Elym", "Nandinagari", "Nand", "Nyiakeng_Puachue_Hmong", "Hmnp", "Wancho",
    "Wcho",
];

/// Script values added in ES2021.
static SCRIPT_VALUES_E12: &[&str] = &[
    "Chorasmian", "Chrs", "Dives_Akuru", "Diak", "Khitan_Small_Script", "Kits", "Yezidi",
    "Yezi",
];

/// Script values added in ES2022.
static SCRIPT_VALUES_E13: &[&str] = &[
    "Cypro_Minoan", "Cpmn", "Old_Uyghur", "Ougr", "Tangsa", "Tnsa", "Toto", "Vithkuqi",
    "Vith",
];

fn is_binary_property(name: &str, ecma_version: u32) -> bool {
    if BINARY_PROPERTIES.contains(&name) {
        return true;
    }
    if ecma_version >= 10 && BINARY_PROPERTIES_E10.contains(&name) {
        return true;
    }
    if ecma_version >= 12 && BINARY_PROPERTIES_E12.contains(&name) {
        return true;
    }

    false
}

fn is_script_value(value: &str, ecma_version: u32) -> bool {
    if SCRIPT_VALUES.contains(&value) {
        return true;
    }
    if ecma_version >= 10 && SCRIPT_VALUES_E10.contains(&value) {
        return true;
    }
    if ecma_version >= 11 && SCRIPT_VALUES_E11.contains(&value) {
        return true;
    }
    if ecma_version >= 12 && SCRIPT_VALUES_E12.contains(&value) {
        return true;
    }
    if ecma_version >= 13 && SCRIPT_VALUES_E13.contains(&value) {
        return true;
    }

    false
}

/// Whether `\p{name=value}` names a known property and value.
pub fn is_valid_property_name_and_value(name: &str, value: &str, ecma_version: u32) -> bool {
    match name {
        "General_Category" | "gc" => GENERAL_CATEGORY_VALUES.contains(&value),
        "Script" | "sc" | "Script_Extensions" | "scx" => is_script_value(value, ecma_version),
        _ => false,
    }
}

/// Whether `name` alone names a known name/value property, distinguishing "unknown property"
/// from "unknown value" diagnostics.
pub fn is_valid_property_name(name: &str) -> bool {
    matches!(name, "General_Category" | "gc" | "Script" | "sc" | "Script_Extensions" | "scx")
}

/// Whether `\p{name}` without a value is valid: either a binary property or a lone
/// General_Category value.
pub fn is_valid_lone_property(name: &str, ecma_version: u32) -> bool {
    is_binary_property(name, ecma_version) || GENERAL_CATEGORY_VALUES.contains(&name)
}
