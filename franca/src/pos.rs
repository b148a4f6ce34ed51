#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BytePos(pub u32);

impl BytePos {
    pub fn shift(self, ch: char) -> Self {
        BytePos(self.0 + ch.len_utf8() as u32)
    }
}

/// Source span of a single token. Both byte offsets are inclusive; `line` is
/// 1-based and is what diagnostics report.
#[derive(Debug, PartialEq)]
pub struct TokenMetadata {
    pub start: BytePos,
    pub end: BytePos,
    pub line: usize,
}

impl TokenMetadata {
    pub const fn empty() -> TokenMetadata {
        let zero = BytePos(0);
        TokenMetadata {
            start: zero,
            end: zero,
            line: 0,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct WithTokenMetadata<T> {
    pub value: T,
    pub pos: TokenMetadata,
}

impl<T> WithTokenMetadata<T> {
    pub fn new(value: T, start: BytePos, end: BytePos, line: usize) -> WithTokenMetadata<T> {
        WithTokenMetadata {
            value,
            pos: TokenMetadata { start, end, line },
        }
    }

    pub const fn empty(value: T) -> WithTokenMetadata<T> {
        WithTokenMetadata {
            value,
            pos: TokenMetadata::empty(),
        }
    }
}
