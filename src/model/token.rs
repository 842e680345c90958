// File: ./src/model/token.rs
//! Classified slices of a todo.txt line.
//!
//! A [`Token`] covers an exact slice of the raw line, so concatenating the text
//! of every token in order rebuilds the line. Tokens are never edited in place:
//! mutators on [`crate::model::Task`] replace them in the owning vector.
use crate::model::priority::Priority;
use std::fmt;
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    WhiteSpace,
    List,
    Tag,
    Completed,
    CompletedDate,
    CreationDate,
    Text,
    PriorityMarker,
    ThresholdDate,
    DueDate,
    Hidden,
}

impl TokenKind {
    pub const fn bit(self) -> u32 {
        match self {
            TokenKind::WhiteSpace => 1,
            TokenKind::List => 1 << 1,
            TokenKind::Tag => 1 << 2,
            TokenKind::Completed => 1 << 3,
            TokenKind::CompletedDate => 1 << 4,
            TokenKind::CreationDate => 1 << 5,
            TokenKind::Text => 1 << 6,
            TokenKind::PriorityMarker => 1 << 7,
            TokenKind::ThresholdDate => 1 << 8,
            TokenKind::DueDate => 1 << 9,
            TokenKind::Hidden => 1 << 10,
        }
    }

    fn label(self) -> &'static str {
        match self {
            TokenKind::WhiteSpace => "WHITE_SPACE",
            TokenKind::List => "LIST",
            TokenKind::Tag => "TAG",
            TokenKind::Completed => "COMPLETED",
            TokenKind::CompletedDate => "COMPLETED_DATE",
            TokenKind::CreationDate => "CREATION_DATE",
            TokenKind::Text => "TEXT",
            TokenKind::PriorityMarker => "PRIO",
            TokenKind::ThresholdDate => "THRESHOLD_DATE",
            TokenKind::DueDate => "DUE_DATE",
            TokenKind::Hidden => "HIDDEN",
        }
    }
}

/// Selects a subset of token kinds for partial rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenMask(u32);

impl TokenMask {
    pub const ALL: TokenMask = TokenMask(!0);
    pub const NONE: TokenMask = TokenMask(0);

    pub const fn of(kind: TokenKind) -> Self {
        TokenMask(kind.bit())
    }

    pub const fn with(self, kind: TokenKind) -> Self {
        TokenMask(self.0 | kind.bit())
    }

    pub const fn without(self, kind: TokenKind) -> Self {
        TokenMask(self.0 & !kind.bit())
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

impl From<TokenKind> for TokenMask {
    fn from(kind: TokenKind) -> Self {
        TokenMask::of(kind)
    }
}

impl BitOr for TokenMask {
    type Output = TokenMask;
    fn bitor(self, rhs: TokenMask) -> TokenMask {
        TokenMask(self.0 | rhs.0)
    }
}

impl BitOr<TokenKind> for TokenMask {
    type Output = TokenMask;
    fn bitor(self, rhs: TokenKind) -> TokenMask {
        self.with(rhs)
    }
}

impl BitOr for TokenKind {
    type Output = TokenMask;
    fn bitor(self, rhs: TokenKind) -> TokenMask {
        TokenMask::of(self).with(rhs)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace() -> Self {
        Self::new(TokenKind::WhiteSpace, " ")
    }

    pub fn creation_date(date: &str) -> Self {
        Self::new(TokenKind::CreationDate, format!("{} ", date))
    }

    /// Returns `None` for [`Priority::None`], which has no marker.
    pub fn priority(priority: Priority) -> Option<Self> {
        priority
            .in_file_format()
            .map(|marker| Self::new(TokenKind::PriorityMarker, format!("{} ", marker)))
    }

    pub fn due(date: &str) -> Self {
        Self::new(TokenKind::DueDate, format!("due:{}", date))
    }

    pub fn threshold(date: &str) -> Self {
        Self::new(TokenKind::ThresholdDate, format!("t:{}", date))
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact slice of the line this token covers.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The semantic payload: the part after a `key:` or a decorator, trimmed of
    /// the trailing separator the leading fields carry.
    pub fn value(&self) -> &str {
        match self.kind {
            TokenKind::List | TokenKind::Tag => self.text.get(1..).unwrap_or(""),
            TokenKind::ThresholdDate | TokenKind::DueDate | TokenKind::Hidden => self
                .text
                .split_once(':')
                .map(|(_, v)| v)
                .unwrap_or(&self.text),
            TokenKind::PriorityMarker => self.text.trim_end().trim_matches(|c| c == '(' || c == ')'),
            TokenKind::Completed
            | TokenKind::CompletedDate
            | TokenKind::CreationDate => self.text.trim_end(),
            TokenKind::WhiteSpace | TokenKind::Text => &self.text,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:'{}'", self.kind.label(), self.text)
    }
}

/// Concatenates the text of every token selected by `mask`.
pub fn render(tokens: &[Token], mask: TokenMask) -> String {
    tokens
        .iter()
        .filter(|t| mask.contains(t.kind))
        .map(Token::text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_strips_keys_and_decorators() {
        assert_eq!(Token::new(TokenKind::List, "@home").value(), "home");
        assert_eq!(Token::new(TokenKind::Tag, "++x").value(), "+x");
        assert_eq!(Token::new(TokenKind::List, "").value(), "");
        assert_eq!(Token::new(TokenKind::Tag, "+").value(), "");
        assert_eq!(Token::due("2000-01-01").value(), "2000-01-01");
        assert_eq!(Token::new(TokenKind::DueDate, "DUE:2000-01-01").value(), "2000-01-01");
        assert_eq!(Token::new(TokenKind::Hidden, "h:1").value(), "1");
        assert_eq!(Token::creation_date("2000-01-01").value(), "2000-01-01");
        assert_eq!(Token::priority(Priority::C).unwrap().value(), "C");
        assert!(Token::priority(Priority::None).is_none());
    }

    #[test]
    fn mask_selects_kinds() {
        let tokens = vec![
            Token::new(TokenKind::Text, "Buy"),
            Token::whitespace(),
            Token::new(TokenKind::List, "@home"),
        ];
        assert_eq!(render(&tokens, TokenMask::ALL), "Buy @home");
        assert_eq!(render(&tokens, TokenMask::ALL.without(TokenKind::List)), "Buy ");
        assert_eq!(render(&tokens, TokenKind::Text | TokenKind::List), "Buy@home");
        assert_eq!(render(&tokens, TokenMask::NONE), "");
    }

    #[test]
    fn equality_is_by_kind_and_text() {
        assert_eq!(Token::due("2000-01-01"), Token::new(TokenKind::DueDate, "due:2000-01-01"));
        assert_ne!(
            Token::new(TokenKind::Text, "x"),
            Token::new(TokenKind::List, "x")
        );
        assert_eq!(format!("{:?}", Token::whitespace()), "WHITE_SPACE:' '");
    }
}
