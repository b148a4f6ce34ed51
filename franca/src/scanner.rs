use std::{iter::Peekable, str::Chars};

use crate::pos::BytePos;

/// Character-level cursor over the source buffer. Tracks the byte offset of
/// the next unread character; line accounting lives in the lexer.
pub struct Scanner<'a> {
    pub pos: BytePos,
    buf: Peekable<Chars<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &str) -> Scanner {
        Scanner {
            pos: BytePos::default(),
            buf: buf.chars().peekable(),
        }
    }

    pub fn next(&mut self) -> Option<char> {
        let next = self.buf.next();
        if let Some(c) = next {
            self.pos = self.pos.shift(c);
        }

        next
    }

    pub fn peek(&mut self) -> Option<char> {
        self.buf.peek().copied()
    }

    pub fn consume_if<F>(&mut self, f: F) -> bool
    where
        F: Fn(char) -> bool,
    {
        if let Some(ch) = self.peek() {
            if f(ch) {
                self.next();
                true
            } else {
                false
            }
        } else {
            false
        }
    }

    pub fn consume_while<F>(&mut self, f: F) -> Vec<char>
    where
        F: Fn(char) -> bool,
    {
        let mut chars: Vec<char> = Vec::new();
        while let Some(ch) = self.peek() {
            if f(ch) {
                self.next();
                chars.push(ch)
            } else {
                break;
            }
        }

        chars
    }

    #[cfg(test)]
    fn assert_next(&mut self, pos: u32, c: Option<char>) {
        assert_eq!(self.pos.0, pos);
        assert_eq!(self.peek(), c);
        assert_eq!(self.next(), c);
    }
}
