//! ASCII byte-folding tokenizer.
//!
//! Folds a line in a single byte pass: `a-z` and `0-9` pass through, `A-Z`
//! are lowercased, and every other byte — punctuation, whitespace, each byte
//! of a multi-byte UTF-8 sequence — becomes a space. Tokens are the maximal
//! non-space runs of the folded line. Documents and queries go through the
//! same fold, so query terms line up with indexed terms byte for byte.
//! Uses a zero-per-token allocation design via byte spans.

/// Tokenized line: owns the folded buffer, provides `&str` slices via byte
/// spans. Only 1 heap allocation (the folded String) instead of N per-token
/// Strings.
#[derive(Debug)]
pub struct Tokens {
    buffer: String,
    spans: Vec<(u32, u32)>, // (start, end) byte offsets into buffer
}

impl Tokens {
    /// Returns an iterator over the token `&str` slices.
    ///
    /// A token's index in this sequence is its position within the line.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans
            .iter()
            .map(|&(s, e)| &self.buffer[s as usize..e as usize])
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the folded line the spans point into.
    pub fn folded(&self) -> &str {
        &self.buffer
    }

    /// Consumes the tokens, returning the folded line.
    pub fn into_folded(self) -> String {
        self.buffer
    }
}

/// Folds a line: lowercase alphanumerics survive, everything else becomes a
/// space. The output is always pure ASCII and the same length in bytes as
/// the input.
pub fn fold(line: &str) -> String {
    let mut folded = String::with_capacity(line.len());
    for &b in line.as_bytes() {
        let c = match b {
            b'a'..=b'z' | b'0'..=b'9' => b,
            b'A'..=b'Z' => b + 32,
            _ => b' ',
        };
        folded.push(c as char);
    }
    folded
}

/// Tokenize a line: fold, then cut maximal non-space runs. Zero per-token
/// allocation.
pub fn tokenize(line: &str) -> Tokens {
    let buffer = fold(line);
    let bytes = buffer.as_bytes();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if b != b' ' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            spans.push((s as u32, i as u32));
        }
    }
    // Handle last token (no trailing separator)
    if let Some(s) = start {
        spans.push((s as u32, bytes.len() as u32));
    }

    Tokens { buffer, spans }
}
