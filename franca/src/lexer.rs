use std::str::FromStr;

use crate::{
    error::ParseError,
    pos::{BytePos, WithTokenMetadata},
    scanner::Scanner,
    token::Token,
};

pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(buf: &str) -> Lexer {
        Lexer {
            scanner: Scanner::new(buf),
            line: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<WithTokenMetadata<Token>>, ParseError> {
        let mut tokens: Vec<WithTokenMetadata<Token>> = Vec::new();

        loop {
            let start = self.scanner.pos;

            let c = match self.scanner.next() {
                Some(c) => c,
                None => break,
            };

            if let Some(token) = self.match_token(c) {
                match token {
                    Token::Erroneous(message) => {
                        return Err(ParseError::Syntax {
                            message,
                            lexeme: c.to_string(),
                            line: self.line,
                        })
                    }
                    _ => tokens.push(WithTokenMetadata::new(
                        token,
                        start,
                        BytePos(self.scanner.pos.0 - 1),
                        self.line,
                    )),
                }
            }
        }

        tracing::trace!(tokens = tokens.len(), "tokenized compilation unit");

        Ok(tokens)
    }

    fn match_token(&mut self, c: char) -> Option<Token> {
        match c {
            '.' => Some(Token::Dot),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            '=' => Some(Token::Equal),
            '*' => Some(Token::Star),
            '/' => {
                if self.scanner.consume_if(|c| c == '/') {
                    self.scanner.consume_while(|c| c != '\n');
                    None
                } else if self.scanner.consume_if(|c| c == '*') {
                    self.skip_block_comment()
                } else {
                    Some(Token::Erroneous("expected '//' or '/*'".into()))
                }
            }
            ' ' => None,
            '\r' => None,
            '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }
            '"' => self.tokenize_file_name(),
            c if c.is_ascii_digit() => self.tokenize_number(c),
            c if c.is_ascii_alphabetic() || c == '_' => self.tokenize_ident(c),
            c => Some(Token::Erroneous(format!("unknown character '{}'", c))),
        }
    }

    fn skip_block_comment(&mut self) -> Option<Token> {
        loop {
            match self.scanner.next() {
                Some('\n') => self.line += 1,
                Some('*') => {
                    if self.scanner.consume_if(|c| c == '/') {
                        return None;
                    }
                }
                Some(_) => {}
                None => return Some(Token::Erroneous("expected terminal '*/'".into())),
            }
        }
    }

    fn tokenize_file_name(&mut self) -> Option<Token> {
        let name: String = self
            .scanner
            .consume_while(|c| c != '"')
            .into_iter()
            .collect();

        self.line += name.matches('\n').count();

        match self.scanner.next() {
            None => Some(Token::Erroneous("expected terminal '\"'".into())),
            _ => Some(Token::FileName(name)),
        }
    }

    fn tokenize_number(&mut self, start: char) -> Option<Token> {
        let mut number: String = String::new();
        number.push(start);

        let rest: String = self
            .scanner
            .consume_while(|c| c.is_ascii_digit())
            .into_iter()
            .collect();
        number.push_str(rest.as_str());

        match number.parse::<u64>() {
            Ok(v) => Some(Token::Integer(v)),
            Err(_) => Some(Token::Erroneous(format!(
                "integer literal '{}' out of range",
                number
            ))),
        }
    }

    fn tokenize_ident(&mut self, start: char) -> Option<Token> {
        let mut string: String = String::new();
        string.push(start);

        let part: String = self
            .scanner
            .consume_while(|c| c.is_ascii_alphanumeric() || c == '_')
            .into_iter()
            .collect();
        string.push_str(part.as_str());

        Some(match Token::from_str(string.as_str()) {
            Ok(v) => v,
            Err(_) => Token::Identifier(string),
        })
    }
}
