/// Scanner on a string.
///
/// Provide convienient APIs on operation. Positions are byte offsets, callers only split on
/// ascii delimiters so every position stays on a char boundary.
pub(crate) struct Scanner<'a> {
    /// The whole input.
    source: &'a str,

    /// Current position.
    position: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Scanner<'a> {
        Self {
            source,
            position: 0,
        }
    }

    /// Check the scanner process reached the end or not.
    pub fn done(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Everything not consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Offset of the first of `chars` ahead, relative to the current position.
    pub fn find_any(&self, chars: &[char]) -> Option<usize> {
        self.rest().find(chars)
    }

    /// Consume `len` bytes and return them.
    ///
    /// The caller must ensure `len` is in range and lands on a char boundary.
    pub fn take(&mut self, len: usize) -> &'a str {
        let start = self.position;
        self.position += len;
        &self.source[start..self.position]
    }

    /// Consume all the remaining input.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.position = self.source.len();
        rest
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
