//! Query-line header parsing.
//!
//! A query line is `"<queryID> <k> <free text…>"`: two non-negative decimal
//! fields, each terminated by a single space, followed by the query text.
//! The header digits are blanked to spaces before the whole line goes
//! through the tokenizer fold, so the normalized text echoed in a result
//! block is exactly the text that was scored.

use crate::tokenizer::{tokenize, Tokens};
use std::fmt;

/// A parsed query: ID, requested result count, and the tokenized text.
#[derive(Debug)]
pub struct ParsedQuery {
    /// Caller-assigned query identifier.
    pub id: u32,
    /// Requested number of ranked results.
    pub k: usize,
    /// Tokens of the query text, header digits blanked.
    pub tokens: Tokens,
}

impl ParsedQuery {
    /// The folded query line: header digits blanked, punctuation spaced,
    /// uppercase folded.
    pub fn normalized_text(&self) -> &str {
        self.tokens.folded()
    }
}

/// Rejection reason for a query line. The query driver logs and skips
/// these; they are never fatal.
#[derive(Debug, PartialEq, Eq)]
pub enum MalformedQuery {
    /// Fewer than two space-terminated fields before the text.
    MissingField,
    /// A header field was empty or held a non-digit byte.
    NotANumber,
    /// A header field overflowed its integer type.
    Overflow,
}

impl fmt::Display for MalformedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedQuery::MissingField => {
                write!(f, "expected two space-terminated header fields")
            }
            MalformedQuery::NotANumber => {
                write!(f, "header field is not a run of ASCII digits")
            }
            MalformedQuery::Overflow => write!(f, "header field out of range"),
        }
    }
}

impl std::error::Error for MalformedQuery {}

fn digits(field: &str) -> Result<&str, MalformedQuery> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedQuery::NotANumber);
    }
    Ok(field)
}

/// Parses one query line.
pub fn parse_query_line(line: &str) -> Result<ParsedQuery, MalformedQuery> {
    let first = line.find(' ').ok_or(MalformedQuery::MissingField)?;
    let second = line[first + 1..]
        .find(' ')
        .map(|i| first + 1 + i)
        .ok_or(MalformedQuery::MissingField)?;

    let id = digits(&line[..first])?
        .parse::<u32>()
        .map_err(|_| MalformedQuery::Overflow)?;
    let k = digits(&line[first + 1..second])?
        .parse::<usize>()
        .map_err(|_| MalformedQuery::Overflow)?;

    // Blank the header, keep the text, fold the whole line.
    let mut scrubbed = String::with_capacity(line.len());
    scrubbed.extend(std::iter::repeat(' ').take(second));
    scrubbed.push_str(&line[second..]);

    Ok(ParsedQuery {
        id,
        k,
        tokens: tokenize(&scrubbed),
    })
}
