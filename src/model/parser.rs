// File: ./src/model/parser.rs
// Tokenizer for single todo.txt lines, plus the pure token-vector splices the
// Task mutators are built on.
//
// The line prefix is read in a fixed order:
//   x [completion-date [creation-date]] [(P)] [creation-date]
// where each leading field owns exactly one trailing space. After the prefix
// the line is consumed word by word: runs of spaces become one WhiteSpace
// token, and each word is tried as list, tag, threshold, due and hidden before
// falling back to Text.
use crate::model::matcher::{
    match_bare_date, match_due, match_hidden, match_list, match_priority, match_tag,
    match_threshold,
};
use crate::model::priority::Priority;
use crate::model::token::{Token, TokenKind};

const COMPLETED_PREFIX: &str = "x ";

pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;
    let mut has_create_date = false;

    if let Some(after) = rest.strip_prefix(COMPLETED_PREFIX) {
        tokens.push(Token::new(TokenKind::Completed, COMPLETED_PREFIX));
        rest = after;
        if let Some((date, after)) = match_bare_date(rest) {
            tokens.push(Token::new(TokenKind::CompletedDate, date));
            rest = after;
            if let Some((date, after)) = match_bare_date(rest) {
                tokens.push(Token::new(TokenKind::CreationDate, date));
                rest = after;
                has_create_date = true;
            }
        }
    }

    if let Some((_, marker, after)) = match_priority(rest) {
        tokens.push(Token::new(TokenKind::PriorityMarker, marker));
        rest = after;
    }

    if !has_create_date && let Some((date, after)) = match_bare_date(rest) {
        tokens.push(Token::new(TokenKind::CreationDate, date));
        rest = after;
    }

    while !rest.is_empty() {
        let spaces = rest.len() - rest.trim_start_matches(' ').len();
        if spaces > 0 {
            tokens.push(Token::new(TokenKind::WhiteSpace, &rest[..spaces]));
            rest = &rest[spaces..];
            continue;
        }

        let field = match_list(rest)
            .map(|(m, r)| (TokenKind::List, m, r))
            .or_else(|| match_tag(rest).map(|(m, r)| (TokenKind::Tag, m, r)))
            .or_else(|| match_threshold(rest).map(|(m, r)| (TokenKind::ThresholdDate, m, r)))
            .or_else(|| match_due(rest).map(|(m, r)| (TokenKind::DueDate, m, r)))
            .or_else(|| match_hidden(rest).map(|(_, m, r)| (TokenKind::Hidden, m, r)));

        if let Some((kind, matched, after)) = field {
            tokens.push(Token::new(kind, matched));
            rest = after;
        } else {
            let end = rest.find(' ').unwrap_or(rest.len());
            tokens.push(Token::new(TokenKind::Text, &rest[..end]));
            rest = &rest[end..];
        }
    }

    log::trace!("tokenized {:?} into {} tokens", line, tokens.len());
    tokens
}

/// Number of leading tokens forming the completion prefix (`x ` and an
/// optional completion date).
pub fn completion_prefix_len(tokens: &[Token]) -> usize {
    match tokens {
        [first, second, ..]
            if first.is(TokenKind::Completed) && second.is(TokenKind::CompletedDate) =>
        {
            2
        }
        [first, ..] if first.is(TokenKind::Completed) => 1,
        _ => 0,
    }
}

/// Removes any priority marker and, unless `priority` is `None`, inserts a new
/// one right after the completion prefix.
pub fn with_priority(mut tokens: Vec<Token>, priority: Priority) -> Vec<Token> {
    tokens.retain(|t| !t.is(TokenKind::PriorityMarker));
    if let Some(marker) = Token::priority(priority) {
        let at = completion_prefix_len(&tokens);
        tokens.insert(at, marker);
    }
    tokens
}

/// Removes any creation date and, when `date` is given, inserts it after the
/// completion prefix and priority marker.
pub fn with_create_date(mut tokens: Vec<Token>, date: Option<&str>) -> Vec<Token> {
    tokens.retain(|t| !t.is(TokenKind::CreationDate));
    if let Some(date) = date {
        let mut at = completion_prefix_len(&tokens);
        if tokens.get(at).is_some_and(|t| t.is(TokenKind::PriorityMarker)) {
            at += 1;
        }
        tokens.insert(at, Token::creation_date(date));
    }
    tokens
}

/// Removes every token of `kind`, taking one adjoining WhiteSpace token with
/// each: the preceding one, or the following one when the field directly
/// follows the line start or the prefix.
pub fn without_field(tokens: Vec<Token>, kind: TokenKind) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut drop_next_space = false;
    for token in tokens {
        if token.is(kind) {
            match out.last() {
                Some(t) if t.is(TokenKind::WhiteSpace) => {
                    out.pop();
                }
                // Leading fields carry their own separator.
                Some(t) if !t.text().ends_with(' ') => {}
                _ => drop_next_space = true,
            }
            continue;
        }
        if drop_next_space && token.is(TokenKind::WhiteSpace) {
            drop_next_space = false;
            continue;
        }
        drop_next_space = false;
        out.push(token);
    }
    out
}

/// Replaces the last token of `replacement.kind()` in place, or appends it
/// separated by a single space when the line has none.
pub fn with_field(mut tokens: Vec<Token>, replacement: Token) -> Vec<Token> {
    let kind = replacement.kind();
    if let Some(slot) = tokens.iter_mut().rev().find(|t| t.is(kind)) {
        *slot = replacement;
        return tokens;
    }
    if tokens.last().is_some_and(|t| !t.is(TokenKind::WhiteSpace)) {
        tokens.push(Token::whitespace());
    }
    tokens.push(replacement);
    tokens
}
