//! Title normalization helpers used when matching file names against
//! metadata titles.

use once_cell::sync::Lazy;
use regex::Regex;

static APOSTROPHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"['`´‘’ʻ]+").unwrap());
static PUNCTUATION_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\s]+").unwrap());
static WORD_SEPARATOR_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:?._]").unwrap());
static TRAILING_PARENTHESIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)$").unwrap());
static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!?.]+$").unwrap());
static EMBEDDED_CHECKSUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(\[]([0-9A-Fa-f]{8})[\])]").unwrap());
static SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*:\s*").unwrap());

static BRACKETS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\([^(]*\)").unwrap(),
        Regex::new(r"\[[^\[]*\]").unwrap(),
        Regex::new(r"\{[^{]*\}").unwrap(),
    ]
});

const SINGLE_QUOTES: [char; 6] = ['\'', '`', '´', '‘', '’', 'ʻ'];
const DOUBLE_QUOTES: [char; 3] = ['"', '“', '”'];

/// Fold typographic quote variants onto `'` and `"`.
pub fn normalize_quotation_marks(name: &str) -> String {
    name.chars()
        .map(|c| {
            if SINGLE_QUOTES.contains(&c) {
                SINGLE_QUOTES[0]
            } else if DOUBLE_QUOTES.contains(&c) {
                DOUBLE_QUOTES[0]
            } else {
                c
            }
        })
        .collect()
}

pub fn trim_trailing_punctuation(name: &str) -> String {
    TRAILING_PUNCTUATION.replace_all(name, "").trim().to_string()
}

/// Drop apostrophes, collapse any other punctuation and whitespace into
/// single spaces.
pub fn normalize_punctuation(name: &str) -> String {
    let name = APOSTROPHE.replace_all(name, "");
    let name = PUNCTUATION_OR_SPACE.replace_all(&name, " ");
    name.trim().to_string()
}

/// Remove group names and checksums, i.e. anything in (), [] or {}.
pub fn normalize_brackets(name: &str) -> String {
    let mut name = name.to_string();
    for pattern in BRACKETS.iter() {
        name = pattern.replace_all(&name, " ").into_owned();
    }
    name.trim().to_string()
}

pub fn normalize_space(name: &str, replacement: &str) -> String {
    let name = WORD_SEPARATOR_PUNCTUATION.replace_all(name, " ");
    replace_space(name.trim(), replacement)
}

pub fn replace_space(name: &str, replacement: &str) -> String {
    SPACE.replace_all(name, regex::NoExpand(replacement)).into_owned()
}

/// Replace `:` in ratios such as `16:9` with `ratio`, and every other colon
/// (with surrounding whitespace) with `colon`.
pub fn replace_colon(name: &str, ratio: &str, colon: &str) -> String {
    COLON
        .replace_all(name, |caps: &regex::Captures| {
            let between_digits = caps.get(0).is_some_and(|m| {
                m.as_str() == ":"
                    && name[..m.start()]
                        .chars()
                        .next_back()
                        .is_some_and(|c| c.is_ascii_digit())
                    && name[m.end()..]
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_digit())
            });
            if between_digits {
                ratio.to_string()
            } else {
                colon.to_string()
            }
        })
        .into_owned()
}

/// The first CRC32 checksum embedded as `[ABCD1234]` or `(ABCD1234)`.
pub fn embedded_checksum(name: &str) -> Option<String> {
    EMBEDDED_CHECKSUM
        .captures(name)
        .map(|caps| caps[1].to_string())
}

pub fn remove_embedded_checksum(name: &str) -> String {
    EMBEDDED_CHECKSUM.replace_all(name, "").into_owned()
}

/// `Doctor Who (2005)` -> `Doctor Who`. A name that is nothing but a
/// parenthesised group is left alone.
pub fn remove_trailing_brackets(name: &str) -> String {
    match TRAILING_PARENTHESIS.find(name) {
        Some(m) if m.start() > 0 => name[..m.start()].trim().to_string(),
        _ => name.trim().to_string(),
    }
}

/// Shorten `title` to whole words so that it stays below `limit` characters.
pub fn truncate_text(title: &str, limit: usize) -> String {
    if title.chars().count() < limit {
        return title.to_string();
    }

    let mut s = String::new();
    for (i, word) in SPACE.split(title).enumerate() {
        if s.chars().count() + word.chars().count() >= limit {
            break;
        }
        if i > 0 {
            s.push(' ');
        }
        s.push_str(word);
    }
    s.trim().to_string()
}
