#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Lexical unit of a bracket string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketToken<'a> {
    Open,
    Close,
    /// A phrase tag when it directly follows `(`, a word otherwise
    Atom(&'a str),
}
