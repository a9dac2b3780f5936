use thiserror::Error;

/// Detailed cause of a [`MalformedUri`] error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MalformedUriKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character `%` of the octet.
    #[error("invalid percent-encoded octet")]
    InvalidOctet,
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the character.
    #[error("unexpected character")]
    UnexpectedChar,
    /// Invalid IP literal address.
    ///
    /// The error index points to the preceding left square bracket `[`.
    #[error("invalid IP literal")]
    InvalidIpLiteral,
    /// Port value that does not fit in a `u16`.
    ///
    /// The error index points to the first digit of the port.
    #[error("invalid port value")]
    InvalidPort,
}

/// An error occurred when parsing a URI reference.
///
/// The error carries the offending input, which can be recovered
/// with [`input`](Self::input).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed or unsupported URI `{input}`: {kind} at index {index}")]
pub struct MalformedUri {
    input: String,
    index: usize,
    kind: MalformedUriKind,
}

impl MalformedUri {
    pub(crate) fn new(input: &str, index: usize, kind: MalformedUriKind) -> Self {
        Self {
            input: input.to_owned(),
            index,
            kind,
        }
    }

    /// Returns the input that was attempted to parse into a [`Uri`](crate::Uri).
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the index where the error occurred in the input string.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> MalformedUriKind {
        self.kind
    }
}
