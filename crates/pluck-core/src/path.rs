#![forbid(unsafe_code)]

//! Pluck paths: ordered sequences of property names and indices.
//!
//! A [`PluckPath`] can be built from segments directly (see the
//! [`pluck_path!`](crate::pluck_path) macro) or parsed from text:
//!
//! ```
//! use pluck_core::{PathSegment, PluckPath};
//!
//! let path: PluckPath = "items[0].name".parse().unwrap();
//! assert_eq!(
//!     path.as_slice(),
//!     &[PathSegment::from("items"), PathSegment::Index(0), PathSegment::from("name")],
//! );
//! ```
//!
//! # Grammar
//!
//! ```text
//! path    := "" | head ( "." key groups )*
//! head    := key groups | groups
//! groups  := ( "[" integer "]" )*
//! ```
//!
//! Digits written as a dotted key (`a.0`) stay a *key*. Only bracketed
//! segments become [`PathSegment::Index`], which matters for arrays: a key
//! maps over the elements while an index selects one.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::str::FromStr;

/// One step of a pluck path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Property name.
    Key(Rc<str>),
    /// Integer position.
    Index(i64),
}

impl PathSegment {
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(&**key),
            Self::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(Rc::from(key))
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(Rc::from(key))
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for PathSegment {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Error produced when parsing a textual path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// A key between dots (or at either end) is empty.
    EmptySegment { offset: usize },
    /// `[` without a matching `]`.
    UnclosedBracket { offset: usize },
    /// Bracket contents are not an integer.
    InvalidIndex { offset: usize, text: String },
    /// Something other than `.` or `[` follows a `]`.
    UnexpectedChar { offset: usize, found: char },
}

impl PathParseError {
    /// Byte offset into the input where the problem was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::EmptySegment { offset }
            | Self::UnclosedBracket { offset }
            | Self::InvalidIndex { offset, .. }
            | Self::UnexpectedChar { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegment { offset } => write!(f, "empty path segment at byte {offset}"),
            Self::UnclosedBracket { offset } => write!(f, "unclosed '[' at byte {offset}"),
            Self::InvalidIndex { offset, text } => {
                write!(f, "invalid index {text:?} at byte {offset}")
            }
            Self::UnexpectedChar { offset, found } => {
                write!(f, "unexpected {found:?} at byte {offset}")
            }
        }
    }
}

impl std::error::Error for PathParseError {}

/// An owned pluck path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PluckPath {
    segments: Vec<PathSegment>,
}

impl PluckPath {
    /// The empty path (plucks the value itself).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a textual path. Equivalent to `str::parse`.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        parse_segments(input).map(|segments| Self { segments })
    }

    /// Append a segment, builder style.
    #[must_use]
    pub fn with(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<PathSegment> {
        self.segments
    }
}

impl Deref for PluckPath {
    type Target = [PathSegment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl AsRef<[PathSegment]> for PluckPath {
    fn as_ref(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl From<Vec<PathSegment>> for PluckPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for PluckPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl FromStr for PluckPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the textual form accepted by [`PluckPath::parse`].
///
/// Keys are written verbatim. A key that is empty or contains `.` or `[`
/// has no textual form, so such paths display lossily and do not parse
/// back to the same segments.
impl fmt::Display for PluckPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.is_index() {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn parse_segments(input: &str) -> Result<Vec<PathSegment>, PathParseError> {
    let mut segments = Vec::new();
    if input.is_empty() {
        return Ok(segments);
    }

    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut pos = 0;
    let mut expect_key = bytes[0] != b'[';

    loop {
        if expect_key {
            let start = pos;
            while pos < len && bytes[pos] != b'.' && bytes[pos] != b'[' {
                pos += 1;
            }
            if start == pos {
                return Err(PathParseError::EmptySegment { offset: start });
            }
            segments.push(PathSegment::from(&input[start..pos]));
        }

        while pos < len && bytes[pos] == b'[' {
            let open = pos;
            let close = input[open + 1..]
                .find(']')
                .map(|i| open + 1 + i)
                .ok_or(PathParseError::UnclosedBracket { offset: open })?;
            let text = &input[open + 1..close];
            let index = text
                .parse::<i64>()
                .map_err(|_| PathParseError::InvalidIndex {
                    offset: open + 1,
                    text: text.to_string(),
                })?;
            segments.push(PathSegment::Index(index));
            pos = close + 1;
        }

        if pos == len {
            return Ok(segments);
        }
        if bytes[pos] != b'.' {
            let found = input[pos..].chars().next().unwrap_or_default();
            return Err(PathParseError::UnexpectedChar { offset: pos, found });
        }
        pos += 1;
        expect_key = true;
    }
}

/// Build a [`PluckPath`] from segment expressions.
///
/// ```
/// use pluck_core::{pluck_path, PathSegment};
///
/// let path = pluck_path!["hello", 0, "planet"];
/// assert_eq!(path[1], PathSegment::Index(0));
/// ```
#[macro_export]
macro_rules! pluck_path {
    ($($segment:expr),* $(,)?) => {
        $crate::PluckPath::from(::std::vec![$($crate::PathSegment::from($segment)),*])
    };
}
