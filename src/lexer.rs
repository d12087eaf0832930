//! Whitespace tokenization of a raw command line.

/// Characters that separate arguments on a command line.
///
/// Carriage return and newline appear here so that a line arriving with its
/// terminator still attached tokenizes the same as a stripped one; the bell
/// character is treated as noise rather than argument text.
pub(crate) const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Split a raw line into argument tokens.
///
/// Runs of adjacent delimiters collapse, so the result never contains empty
/// tokens; an empty or all-whitespace line yields an empty vector. The
/// returned slices borrow from `line`, which must stay alive for as long as
/// the tokens are in use.
pub(crate) fn split_tokens(line: &str) -> Vec<&str> {
    line.split(DELIMITERS).filter(|t| !t.is_empty()).collect()
}
