use crate::error::{Result, TableError};
use std::collections::HashSet;

/// Key of the bare nasal unit (ん). Its minimal spelling is a single `n`.
pub const NASAL_KEY: &str = "n";
/// The keystroke that types, and doubles, the bare nasal.
pub const NASAL_CHAR: char = 'n';
/// Doubled form produced by the expansion rule.
pub const NASAL_DOUBLED: &str = "nn";

/// One phonetic unit and the key sequences that type it.
/// The first spelling is the default shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableUnit {
    pub key: String,
    pub spellings: Vec<String>,
}

impl SyllableUnit {
    pub fn new(key: impl Into<String>, spellings: Vec<String>) -> Self {
        Self {
            key: key.into(),
            spellings,
        }
    }

    pub fn default_spelling(&self) -> &str {
        self.spellings.first().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyllableTable {
    pub name: Option<String>,
    units: Vec<SyllableUnit>,
    // Unit indices, longest key first; equal lengths keep declaration order.
    by_length: Vec<usize>,
}

impl SyllableTable {
    /// Builds a table, rejecting empty keys, empty spellings and duplicates.
    /// A unit declared without spellings is spelled by its own key.
    pub fn new(units: Vec<SyllableUnit>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut checked = Vec::with_capacity(units.len());
        for (i, mut unit) in units.into_iter().enumerate() {
            let line = i + 1;
            if unit.key.is_empty() {
                return Err(TableError::EmptyKey { line });
            }
            if unit.spellings.is_empty() {
                unit.spellings.push(unit.key.clone());
            }
            if unit.spellings.iter().any(|s| s.is_empty()) {
                return Err(TableError::EmptySpelling {
                    line,
                    key: unit.key,
                });
            }
            if !seen.insert(unit.key.clone()) {
                return Err(TableError::DuplicateKey(unit.key));
            }
            checked.push(unit);
        }
        Ok(Self::from_units(checked))
    }

    fn from_units(units: Vec<SyllableUnit>) -> Self {
        let mut by_length: Vec<usize> = (0..units.len()).collect();
        // sort_by_key is stable
        by_length.sort_by_key(|&i| std::cmp::Reverse(units[i].key.chars().count()));
        Self {
            name: None,
            units,
            by_length,
        }
    }

    fn from_static(entries: &[(&str, &[&str])]) -> Self {
        let units = entries
            .iter()
            .map(|(key, spellings)| {
                SyllableUnit::new(*key, spellings.iter().map(|s| s.to_string()).collect())
            })
            .collect();
        Self::from_units(units)
    }

    /// Longest unit whose key is a literal prefix of `rest`.
    pub fn longest_match(&self, rest: &str) -> Option<&SyllableUnit> {
        self.by_length
            .iter()
            .map(|&i| &self.units[i])
            .find(|unit| rest.starts_with(unit.key.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&SyllableUnit> {
        self.units.iter().find(|u| u.key == key)
    }

    pub fn units(&self) -> &[SyllableUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_TABLE: SyllableTable = {
        let mut table = SyllableTable::from_static(HEPBURN_UNITS);
        table.name = Some("hepburn".to_string());
        table
    };
}

/// Built-in Hepburn table with the common wapuro alternatives.
pub fn default_table() -> &'static SyllableTable {
    &DEFAULT_TABLE
}

#[rustfmt::skip]
const HEPBURN_UNITS: &[(&str, &[&str])] = &[
    // Vowels
    ("a", &["a"]), ("i", &["i", "yi"]), ("u", &["u", "wu", "whu"]), ("e", &["e"]), ("o", &["o"]),
    // Long vowels
    ("ā", &["aa", "a-"]), ("ī", &["ii", "i-"]), ("ū", &["uu", "u-"]),
    ("ē", &["ei", "ee", "e-"]), ("ō", &["ou", "oo", "o-"]),

    ("ka", &["ka", "ca"]), ("ki", &["ki"]), ("ku", &["ku", "cu", "qu"]), ("ke", &["ke"]), ("ko", &["ko", "co"]),
    ("sa", &["sa"]), ("shi", &["shi", "si", "ci"]), ("su", &["su"]), ("se", &["se", "ce"]), ("so", &["so"]),
    ("ta", &["ta"]), ("chi", &["chi", "ti"]), ("tsu", &["tsu", "tu"]), ("te", &["te"]), ("to", &["to"]),
    ("na", &["na"]), ("ni", &["ni"]), ("nu", &["nu"]), ("ne", &["ne"]), ("no", &["no"]),
    ("ha", &["ha"]), ("hi", &["hi"]), ("fu", &["fu", "hu"]), ("he", &["he"]), ("ho", &["ho"]),
    ("ma", &["ma"]), ("mi", &["mi"]), ("mu", &["mu"]), ("me", &["me"]), ("mo", &["mo"]),
    ("ya", &["ya"]), ("yu", &["yu"]), ("yo", &["yo"]),
    ("ra", &["ra"]), ("ri", &["ri"]), ("ru", &["ru"]), ("re", &["re"]), ("ro", &["ro"]),
    ("wa", &["wa"]), ("wo", &["wo"]),

    // Nasal. "n'" is the Hepburn apostrophe form before a vowel or y.
    ("n", &["n", "nn", "xn"]), ("n'", &["nn", "n'", "xn"]),

    // Voiced (Dakuten)
    ("ga", &["ga"]), ("gi", &["gi"]), ("gu", &["gu"]), ("ge", &["ge"]), ("go", &["go"]),
    ("za", &["za"]), ("ji", &["ji", "zi"]), ("zu", &["zu", "du"]), ("ze", &["ze"]), ("zo", &["zo"]),
    ("da", &["da"]), ("de", &["de"]), ("do", &["do"]),
    ("ba", &["ba"]), ("bi", &["bi"]), ("bu", &["bu"]), ("be", &["be"]), ("bo", &["bo"]),

    // Semi-voiced (Handakuten)
    ("pa", &["pa"]), ("pi", &["pi"]), ("pu", &["pu"]), ("pe", &["pe"]), ("po", &["po"]),

    // Palatalized
    ("kya", &["kya"]), ("kyu", &["kyu"]), ("kyo", &["kyo"]),
    ("sha", &["sha", "sya"]), ("shu", &["shu", "syu"]), ("sho", &["sho", "syo"]), ("she", &["she", "sye"]),
    ("cha", &["cha", "tya", "cya"]), ("chu", &["chu", "tyu", "cyu"]), ("cho", &["cho", "tyo", "cyo"]),
    ("che", &["che", "tye", "cye"]),
    ("nya", &["nya"]), ("nyu", &["nyu"]), ("nyo", &["nyo"]),
    ("hya", &["hya"]), ("hyu", &["hyu"]), ("hyo", &["hyo"]),
    ("mya", &["mya"]), ("myu", &["myu"]), ("myo", &["myo"]),
    ("rya", &["rya"]), ("ryu", &["ryu"]), ("ryo", &["ryo"]),
    ("gya", &["gya"]), ("gyu", &["gyu"]), ("gyo", &["gyo"]),
    ("ja", &["ja", "zya", "jya"]), ("ju", &["ju", "zyu", "jyu"]), ("jo", &["jo", "zyo", "jyo"]),
    ("je", &["je", "zye", "jye"]),
    ("bya", &["bya"]), ("byu", &["byu"]), ("byo", &["byo"]),
    ("pya", &["pya"]), ("pyu", &["pyu"]), ("pyo", &["pyo"]),

    // Foreign sounds
    ("fa", &["fa", "fwa"]), ("fi", &["fi", "fyi"]), ("fe", &["fe", "fye"]), ("fo", &["fo", "fwo"]),
    // ティ ディ トゥ ドゥ; plain ち つ づ are chi/tsu/zu above.
    ("ti", &["thi"]), ("di", &["dhi"]), ("tu", &["twu"]), ("du", &["dwu"]),
    ("wi", &["wi", "whi"]), ("we", &["we", "whe"]),
    ("va", &["va"]), ("vi", &["vi"]), ("vu", &["vu"]), ("ve", &["ve"]), ("vo", &["vo"]),

    // Small Kana
    ("la", &["la", "xa"]), ("li", &["li", "xi"]), ("lu", &["lu", "xu"]), ("le", &["le", "xe"]), ("lo", &["lo", "xo"]),
    ("ltu", &["ltu", "xtu", "ltsu"]),
    ("lya", &["lya", "xya"]), ("lyu", &["lyu", "xyu"]), ("lyo", &["lyo", "xyo"]),
    ("lwa", &["lwa", "xwa"]),

    // Marks
    ("-", &["-"]), ("ー", &["ー"]),
    ("、", &["、"]), ("。", &["。"]), ("・", &["・"]), ("「", &["「"]), ("」", &["」"]),
    ("！", &["！"]), ("？", &["？"]),
];

/// Distance between a full-width form (U+FF01..=U+FF5E) and its ASCII char.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Marks outside the full-width block, with the key that types them on a
/// JIS keyboard.
const JAPANESE_MARKS: &[(char, char)] = &[
    ('、', ','),
    ('。', '.'),
    ('・', '/'),
    ('「', '['),
    ('」', ']'),
    ('ー', '-'),
    ('”', '"'),
    ('’', '\''),
    ('‘', '\''),
    ('￥', '\\'),
    ('　', ' '),
];

/// ASCII key that types a full-width form or a Japanese punctuation mark.
pub fn normalize_punctuation(c: char) -> Option<char> {
    if ('！'..='～').contains(&c) {
        return char::from_u32(c as u32 - FULLWIDTH_OFFSET);
    }
    JAPANESE_MARKS
        .iter()
        .find(|(mark, _)| *mark == c)
        .map(|&(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(key: &str, spellings: &[&str]) -> SyllableUnit {
        SyllableUnit::new(key, spellings.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = default_table();
        let rebuilt = SyllableTable::new(table.units().to_vec());
        assert!(rebuilt.is_ok(), "{:?}", rebuilt.err());
        assert_eq!(table.name.as_deref(), Some("hepburn"));
    }

    #[test]
    fn test_nasal_unit_accepts_doubled_form() {
        let nasal = default_table().get(NASAL_KEY).expect("nasal unit");
        assert_eq!(nasal.default_spelling(), NASAL_KEY);
        assert!(nasal.spellings.iter().any(|s| s == NASAL_DOUBLED));
    }

    #[test]
    fn test_longest_match_prefers_longer_keys() {
        let table = default_table();
        assert_eq!(table.longest_match("shinbun").map(|u| u.key.as_str()), Some("shi"));
        assert_eq!(table.longest_match("nyuu").map(|u| u.key.as_str()), Some("nyu"));
        assert_eq!(table.longest_match("nbun").map(|u| u.key.as_str()), Some("n"));
        assert_eq!(table.longest_match("n'i").map(|u| u.key.as_str()), Some("n'"));
        assert!(table.longest_match("q").is_none());
    }

    #[test]
    fn test_equal_length_keeps_declaration_order() {
        let table = SyllableTable::new(vec![
            unit("x", &["x"]),
            unit("ab", &["ab"]),
            unit("ac", &["ac"]),
            unit("abc", &["abc"]),
        ])
        .unwrap();
        assert_eq!(table.longest_match("abcd").unwrap().key, "abc");
        assert_eq!(table.longest_match("ab").unwrap().key, "ab");
        assert_eq!(table.longest_match("xa").unwrap().key, "x");
    }

    #[test]
    fn test_new_rejects_bad_units() {
        assert_eq!(
            SyllableTable::new(vec![unit("", &["a"])]).unwrap_err(),
            TableError::EmptyKey { line: 1 }
        );
        assert_eq!(
            SyllableTable::new(vec![unit("a", &["a"]), unit("shi", &["shi", ""])]).unwrap_err(),
            TableError::EmptySpelling {
                line: 2,
                key: "shi".into()
            }
        );
        assert_eq!(
            SyllableTable::new(vec![unit("a", &["a"]), unit("a", &["aa"])]).unwrap_err(),
            TableError::DuplicateKey("a".into())
        );
    }

    #[test]
    fn test_unit_without_spellings_uses_key() {
        let table = SyllableTable::new(vec![unit("ka", &[])]).unwrap();
        assert_eq!(table.get("ka").unwrap().spellings, vec!["ka".to_string()]);
    }

    #[test]
    fn test_foreign_t_keys_are_not_plain_kana() {
        let table = default_table();
        assert_eq!(table.get("ti").unwrap().spellings, vec!["thi"]);
        assert_eq!(table.get("tu").unwrap().spellings, vec!["twu"]);
        assert_eq!(table.get("du").unwrap().spellings, vec!["dwu"]);
        assert!(table.get("chi").unwrap().spellings.iter().any(|s| s == "ti"));
        assert!(table.get("tsu").unwrap().spellings.iter().any(|s| s == "tu"));
        assert!(table.get("zu").unwrap().spellings.iter().any(|s| s == "du"));
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize_punctuation('、'), Some(','));
        assert_eq!(normalize_punctuation('。'), Some('.'));
        assert_eq!(normalize_punctuation('ー'), Some('-'));
        assert_eq!(normalize_punctuation('！'), Some('!'));
        assert_eq!(normalize_punctuation('＼'), Some('\\'));
        assert_eq!(normalize_punctuation('￥'), Some('\\'));
        assert_eq!(normalize_punctuation('～'), Some('~'));
        assert_eq!(normalize_punctuation('７'), Some('7'));
        assert_eq!(normalize_punctuation('　'), Some(' '));
        assert_eq!(normalize_punctuation('a'), None);
        assert_eq!(normalize_punctuation('ア'), None);
    }
}
