// File: ./src/model/matcher.rs
// Field sub-parsers for the todo.txt line tokenizer.
//
// Every matcher looks at the unconsumed remainder of the line and, on success,
// returns the matched slice together with the rest of the input. Matchers never
// allocate and never fail loudly: a near miss simply returns `None` so the
// tokenizer can fall back to plain text.
use crate::model::dates::is_date_shaped;
use crate::model::priority::Priority;
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_LEN: usize = 10;

static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0+]?[0-9,#]{4,}$").expect("phone number pattern"));
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:http|https|todo)://[\w\-./]+(?:\.[\w\-]+)+(?:[\w\-.,@?^=%&:/~+#]*[\w\-@?^=%&/~+#])?$",
    )
    .expect("link pattern")
});
static MAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(?:\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("mail address pattern")
});

fn word_end(s: &str) -> usize {
    s.find(' ').unwrap_or(s.len())
}

fn at_boundary(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(' ')
}

fn strip_key<'a>(s: &'a str, key: &str) -> Option<&'a str> {
    let head = s.get(..key.len())?;
    if head.eq_ignore_ascii_case(key) {
        Some(&s[key.len()..])
    } else {
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `(X) ` at the very start of the input, `X` an uppercase ASCII letter.
pub fn match_priority(s: &str) -> Option<(Priority, &str, &str)> {
    let b = s.as_bytes();
    if b.len() < 4 || b[0] != b'(' || b[2] != b')' || b[3] != b' ' {
        return None;
    }
    let priority = Priority::from_char(b[1] as char)?;
    Some((priority, &s[..4], &s[4..]))
}

/// A bare `YYYY-MM-DD` followed by exactly one consumed space.
///
/// The digits are not checked against the calendar; `2013-11-31 ` matches.
pub fn match_bare_date(s: &str) -> Option<(&str, &str)> {
    let date = s.get(..DATE_LEN)?;
    if !is_date_shaped(date) || s.as_bytes().get(DATE_LEN) != Some(&b' ') {
        return None;
    }
    Some((&s[..DATE_LEN + 1], &s[DATE_LEN + 1..]))
}

fn match_decorated(s: &str, decorator: char) -> Option<(&str, &str)> {
    let name = s.strip_prefix(decorator)?;
    let end = word_end(name);
    let word = &name[..end];
    if !word.chars().last().is_some_and(is_word_char) {
        return None;
    }
    let matched = decorator.len_utf8() + end;
    Some((&s[..matched], &s[matched..]))
}

/// `@name` where the name is the rest of the word and ends in a word character.
pub fn match_list(s: &str) -> Option<(&str, &str)> {
    match_decorated(s, '@')
}

/// `+name`, same word rule as lists.
pub fn match_tag(s: &str) -> Option<(&str, &str)> {
    match_decorated(s, '+')
}

fn match_keyed_date<'a>(s: &'a str, key: &str) -> Option<(&'a str, &'a str)> {
    let value = strip_key(s, key)?;
    let date = value.get(..DATE_LEN)?;
    if !is_date_shaped(date) {
        return None;
    }
    let matched = key.len() + DATE_LEN;
    let rest = &s[matched..];
    at_boundary(rest).then(|| (&s[..matched], rest))
}

/// `t:YYYY-MM-DD`, key case-insensitive.
pub fn match_threshold(s: &str) -> Option<(&str, &str)> {
    match_keyed_date(s, "t:")
}

/// `due:YYYY-MM-DD`, key case-insensitive.
pub fn match_due(s: &str) -> Option<(&str, &str)> {
    match_keyed_date(s, "due:")
}

/// `h:0` or `h:1`. The flag is true for `h:1`.
pub fn match_hidden(s: &str) -> Option<(bool, &str, &str)> {
    let value = strip_key(s, "h:")?;
    let hidden = match value.as_bytes().first()? {
        b'0' => false,
        b'1' => true,
        _ => return None,
    };
    let rest = &s[3..];
    at_boundary(rest).then(|| (hidden, &s[..3], rest))
}

/// True for `\+?\d+[dDwWmMyY]`.
pub fn is_recurrence_spec(spec: &str) -> bool {
    let digits = spec.strip_prefix('+').unwrap_or(spec);
    let Some(unit) = digits.chars().last() else {
        return false;
    };
    let amount = &digits[..digits.len() - unit.len_utf8()];
    !amount.is_empty()
        && amount.bytes().all(|b| b.is_ascii_digit())
        && matches!(unit.to_ascii_lowercase(), 'd' | 'w' | 'm' | 'y')
}

/// Searches a rendered line for a whitespace-delimited `rec:` field and
/// returns its spec (`2d`, `+1w`). Not part of the token stream.
pub fn find_recurrence(line: &str) -> Option<&str> {
    line.split_whitespace()
        .filter_map(|word| strip_key(word, "rec:"))
        .find(|spec| is_recurrence_spec(spec))
}

// Whole-word classifiers for free text. Phone numbers win over links, links
// over mail addresses.

pub fn is_phone_number(word: &str) -> bool {
    PHONE_NUMBER.is_match(word)
}

pub fn is_link(word: &str) -> bool {
    !is_phone_number(word) && LINK.is_match(word)
}

pub fn is_mail_address(word: &str) -> bool {
    !is_phone_number(word) && !is_link(word) && MAIL_ADDRESS.is_match(word)
}
