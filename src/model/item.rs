// File: ./src/model/item.rs
use crate::model::dates::{format_date, is_date_shaped, parse_date};
use crate::model::error::TaskError;
use crate::model::matcher::{
    find_recurrence, is_link, is_mail_address, is_phone_number, match_list,
};
use crate::model::parser::{
    completion_prefix_len, tokenize, with_create_date, with_field, with_priority, without_field,
};
use crate::model::priority::Priority;
use crate::model::recurrence::{Deferral, Recurrence, RecurrenceEngine, defer};
use crate::model::token::{Token, TokenKind, TokenMask, render};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// One todo.txt line.
///
/// The token vector is the only state: every accessor derives its answer from
/// it, so lists, tags and dates can never drift from what gets written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Task {
    tokens: Vec<Token>,
}

impl Task {
    pub fn new(line: &str) -> Self {
        Self {
            tokens: tokenize(line),
        }
    }

    /// Parses `line` and, if it carries no creation date, prepends `default`.
    pub fn with_create_date(line: &str, default: Option<NaiveDate>) -> Self {
        let mut task = Self::new(line);
        if task.create_date().is_none()
            && default.is_some()
            && let Err(e) = task.set_create_date(default)
        {
            log::warn!("not dating {:?}: {}", line, e);
        }
        task
    }

    /// Throws away the current tokens and parses `line` from scratch.
    pub fn update(&mut self, line: &str) {
        self.tokens = tokenize(line);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The full line, byte-for-byte as parsed plus any mutations.
    pub fn text(&self) -> String {
        render(&self.tokens, TokenMask::ALL)
    }

    pub fn to_line(&self, mask: TokenMask) -> String {
        render(&self.tokens, mask)
    }

    /// The line without completion marker, completion date and creation date.
    pub fn text_without_completion_info(&self) -> String {
        self.to_line(
            TokenMask::ALL
                .without(TokenKind::Completed)
                .without(TokenKind::CompletedDate)
                .without(TokenKind::CreationDate),
        )
    }

    fn first(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens.iter().find(|t| t.is(kind))
    }

    fn last(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens.iter().rev().find(|t| t.is(kind))
    }

    fn values(&self, kind: TokenKind) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter(|t| t.is(kind))
            .map(|t| t.value().to_string())
            .collect()
    }

    fn text_words(&self, accept: fn(&str) -> bool) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter(|t| t.is(TokenKind::Text) && accept(t.text()))
            .map(|t| t.text().to_string())
            .collect()
    }

    // --- ACCESSORS ---

    pub fn is_completed(&self) -> bool {
        self.tokens.first().is_some_and(|t| t.is(TokenKind::Completed))
    }

    pub fn is_hidden(&self) -> bool {
        self.last(TokenKind::Hidden).is_some_and(|t| t.value() == "1")
    }

    pub fn is_visible(&self) -> bool {
        !self.is_hidden()
    }

    pub fn priority(&self) -> Priority {
        self.first(TokenKind::PriorityMarker)
            .and_then(|t| t.value().chars().next())
            .and_then(Priority::from_char)
            .unwrap_or(Priority::None)
    }

    pub fn completion_date(&self) -> Option<&str> {
        self.first(TokenKind::CompletedDate).map(Token::value)
    }

    pub fn create_date(&self) -> Option<&str> {
        self.first(TokenKind::CreationDate).map(Token::value)
    }

    pub fn due_date(&self) -> Option<&str> {
        self.last(TokenKind::DueDate).map(Token::value)
    }

    pub fn threshold_date(&self) -> Option<&str> {
        self.last(TokenKind::ThresholdDate).map(Token::value)
    }

    pub fn completion_date_value(&self) -> Option<NaiveDate> {
        self.completion_date().and_then(parse_date)
    }

    pub fn create_date_value(&self) -> Option<NaiveDate> {
        self.create_date().and_then(parse_date)
    }

    pub fn due_date_value(&self) -> Option<NaiveDate> {
        self.due_date().and_then(parse_date)
    }

    pub fn threshold_date_value(&self) -> Option<NaiveDate> {
        self.threshold_date().and_then(parse_date)
    }

    /// `@list` names, sorted and deduplicated.
    pub fn lists(&self) -> BTreeSet<String> {
        self.values(TokenKind::List)
    }

    /// `+tag` names, sorted and deduplicated.
    pub fn tags(&self) -> BTreeSet<String> {
        self.values(TokenKind::Tag)
    }

    /// `http://`, `https://` and `todo://` links in the free text.
    pub fn links(&self) -> BTreeSet<String> {
        self.text_words(is_link)
    }

    pub fn phone_numbers(&self) -> BTreeSet<String> {
        self.text_words(is_phone_number)
    }

    pub fn mail_addresses(&self) -> BTreeSet<String> {
        self.text_words(is_mail_address)
    }

    /// The `rec:` spec found anywhere on the rendered line, e.g. `2d` or `+1w`.
    pub fn recurrence_pattern(&self) -> Option<String> {
        find_recurrence(&self.text()).map(str::to_string)
    }

    pub fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence_pattern()
            .as_deref()
            .and_then(Recurrence::parse)
    }

    /// True when the threshold date lies after `today`. Invalid dates are
    /// never in the future.
    pub fn in_future(&self, today: NaiveDate) -> bool {
        self.threshold_date_value().is_some_and(|t| t > today)
    }

    // --- MUTATORS ---

    pub fn set_priority(&mut self, priority: Priority) {
        self.tokens = with_priority(std::mem::take(&mut self.tokens), priority);
    }

    /// Sets or, with `None`, removes the creation date. A date cannot follow a
    /// bare `x ` (completed, no completion date, no priority): it would read
    /// back as the completion date.
    pub fn set_create_date(&mut self, date: Option<NaiveDate>) -> Result<(), TaskError> {
        if date.is_some()
            && self.is_completed()
            && self.completion_date().is_none()
            && self.priority() == Priority::None
        {
            return Err(TaskError::CreateDateAfterBareCompletion(self.text()));
        }
        let date = date.map(format_date);
        self.tokens = with_create_date(std::mem::take(&mut self.tokens), date.as_deref());
        Ok(())
    }

    /// Sets the `due:` field; an empty string removes it.
    pub fn set_due_date(&mut self, date: &str) -> Result<(), TaskError> {
        self.set_date_field(TokenKind::DueDate, date)
    }

    /// Sets the `t:` field; an empty string removes it.
    pub fn set_threshold_date(&mut self, date: &str) -> Result<(), TaskError> {
        self.set_date_field(TokenKind::ThresholdDate, date)
    }

    fn set_date_field(&mut self, kind: TokenKind, date: &str) -> Result<(), TaskError> {
        let tokens = std::mem::take(&mut self.tokens);
        if date.is_empty() {
            self.tokens = without_field(tokens, kind);
            return Ok(());
        }
        if !is_date_shaped(date) {
            self.tokens = tokens;
            return Err(TaskError::InvalidDate(date.to_string()));
        }
        let token = match kind {
            TokenKind::DueDate => Token::due(date),
            _ => Token::threshold(date),
        };
        self.tokens = with_field(tokens, token);
        Ok(())
    }

    pub fn defer_due_date(&mut self, spec: &str, defer_from: Option<NaiveDate>) {
        let deferral = defer(self.due_date(), spec, defer_from);
        self.apply_deferral(TokenKind::DueDate, deferral);
    }

    pub fn defer_threshold_date(&mut self, spec: &str, defer_from: Option<NaiveDate>) {
        let deferral = defer(self.threshold_date(), spec, defer_from);
        self.apply_deferral(TokenKind::ThresholdDate, deferral);
    }

    fn apply_deferral(&mut self, kind: TokenKind, deferral: Deferral) {
        let value = match deferral {
            Deferral::Set(date) => date,
            Deferral::Clear => String::new(),
            Deferral::Unchanged => return,
        };
        // Deferrals only ever produce formatted dates or the empty string.
        if let Err(e) = self.set_date_field(kind, &value) {
            log::warn!("deferral produced an unusable date: {}", e);
        }
    }

    /// Marks the task done on `completed_on` and, when it carries a `rec:`
    /// spec, returns the next occurrence. Completing a completed task does
    /// nothing.
    pub fn mark_complete(&mut self, completed_on: NaiveDate) -> Option<Task> {
        if self.is_completed() {
            return None;
        }
        let before = self.clone();
        let line = format!("x {} {}", format_date(completed_on), self.text());
        self.update(&line);
        RecurrenceEngine::next_occurrence(&before, completed_on)
    }

    pub fn mark_incomplete(&mut self) {
        let prefix = completion_prefix_len(&self.tokens);
        if prefix == 0 {
            return;
        }
        self.tokens.drain(..prefix);
        // What followed the prefix may classify differently at line start.
        let line = self.text();
        self.update(&line);
    }

    /// Removes `@name` wherever it stands as a whole word.
    pub fn remove_list(&mut self, name: &str) {
        self.remove_word(&format!("@{}", name));
    }

    /// Removes `+name` wherever it stands as a whole word.
    pub fn remove_tag(&mut self, name: &str) {
        self.remove_word(&format!("+{}", name));
    }

    fn remove_word(&mut self, word: &str) {
        let line = self.text();
        let words: Vec<&str> = line.split(' ').collect();
        if !words.contains(&word) {
            return;
        }
        let kept: Vec<&str> = words.into_iter().filter(|w| *w != word).collect();
        let joined = kept.join(" ");
        self.update(joined.trim());
    }

    pub fn add_list(&mut self, name: &str) -> Result<(), TaskError> {
        validate_name(name)?;
        if !self.lists().contains(name) {
            self.append(&format!("@{}", name));
        }
        Ok(())
    }

    pub fn add_tag(&mut self, name: &str) -> Result<(), TaskError> {
        validate_name(name)?;
        if !self.tags().contains(name) {
            self.append(&format!("+{}", name));
        }
        Ok(())
    }

    pub fn append(&mut self, text: &str) {
        let line = self.text();
        if line.is_empty() {
            self.update(text);
        } else {
            self.update(&format!("{} {}", line, text));
        }
    }

    pub fn delete(&mut self) {
        self.update("");
    }
}

fn validate_name(name: &str) -> Result<(), TaskError> {
    let decorated = format!("@{}", name);
    match match_list(&decorated) {
        Some((_, "")) => Ok(()),
        _ => Err(TaskError::InvalidName(name.to_string())),
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}

impl From<&str> for Task {
    fn from(line: &str) -> Self {
        Task::new(line)
    }
}
