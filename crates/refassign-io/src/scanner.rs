//! Character scanner over a whole input with line tracking.

use refassign_core::{RefAssignError, Result};

/// Reads tokens from text where whitespace, including newlines, only
/// separates. Punctuation and code prefixes are single characters.
#[derive(Debug)]
pub(crate) struct Scanner<'t> {
    text: &'t str,
    pos: usize,
    line: usize,
}

impl<'t> Scanner<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    /// Scans `text` as if it started on line `line` of a larger input.
    pub(crate) fn at_line(text: &'t str, line: usize) -> Self {
        Self { text, pos: 0, line }
    }

    #[inline]
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> RefAssignError {
        RefAssignError::parse(self.line, message)
    }

    fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }
    }

    /// Next non-blank character, left in place.
    pub(crate) fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Consumes `expected`, which must be the next non-blank character.
    pub(crate) fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump(c);
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Consumes `c` if it is the next non-blank character.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump(c);
            true
        } else {
            false
        }
    }

    /// The next run of characters matching `pred`, possibly empty.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'t str {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.rest().chars().next() {
            if !pred(c) {
                break;
            }
            self.bump(c);
        }
        &self.text[start..self.pos]
    }

    /// A run of ASCII letters.
    pub(crate) fn word(&mut self) -> Result<&'t str> {
        let word = self.take_while(|c| c.is_ascii_alphabetic());
        if word.is_empty() {
            return Err(self.unexpected("a word"));
        }
        Ok(word)
    }

    pub(crate) fn expect_word(&mut self, expected: &str) -> Result<()> {
        let word = self.word()?;
        if word != expected {
            return Err(self.error(format!("expected '{expected}', found '{word}'")));
        }
        Ok(())
    }

    /// Skips to the start of the next line.
    pub(crate) fn skip_line(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            self.bump(c);
            if c == '\n' {
                break;
            }
        }
    }

    pub(crate) fn unsigned<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits
            .parse()
            .map_err(|_| self.unexpected_value(what, digits))
    }

    pub(crate) fn integer(&mut self, what: &str) -> Result<i64> {
        let token = self.take_while(|c| c.is_ascii_digit() || c == '-' || c == '+');
        token.parse().map_err(|_| self.unexpected_value(what, token))
    }

    pub(crate) fn real(&mut self, what: &str) -> Result<f64> {
        let token = self.take_while(|c| {
            c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
        });
        token.parse().map_err(|_| self.unexpected_value(what, token))
    }

    /// A code such as `R12`: the prefix letter followed by a number.
    pub(crate) fn code(&mut self, prefix: char) -> Result<u32> {
        self.expect(prefix)?;
        let digits = self.take_while(|c| c.is_ascii_digit());
        digits
            .parse()
            .map_err(|_| self.error(format!("expected a number after '{prefix}'")))
    }

    fn unexpected(&mut self, what: &str) -> RefAssignError {
        match self.peek() {
            Some(c) => self.error(format!("expected {what}, found '{c}'")),
            None => self.error(format!("expected {what}, found end of input")),
        }
    }

    fn unexpected_value(&mut self, what: &str, token: &str) -> RefAssignError {
        if token.is_empty() {
            self.unexpected(what)
        } else {
            self.error(format!("invalid {what} '{token}'"))
        }
    }
}
