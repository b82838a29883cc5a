//! Property path tokenizer.
//!
//! A property path addresses a possibly nested value with dotted and
//! bracketed segments:
//!
//! ```text
//! path    := segment ('.' segment)*
//! segment := IDENTIFIER ('[' (INTEGER | IDENTIFIER) ']')?
//! ```
//!
//! `IDENTIFIER` is `[A-Za-z_][A-Za-z0-9_]*` and `INTEGER` is `[0-9]+`.
//! Nothing else is accepted: no whitespace, no empty segments and no
//! trailing dot.
//!
//! The whole path is validated when it is parsed, so a malformed path is
//! rejected before any navigation happens.
//!
//! # Examples
//!
//! ```
//! use mg_reflect::path::PathSegment;
//!
//! let seg = PathSegment::parse("items[0].price").unwrap();
//! assert_eq!(seg.name(), "items");
//! assert_eq!(seg.indexed_name(), "items[0]");
//! assert_eq!(seg.index(), Some("0"));
//! assert_eq!(seg.children(), Some("price"));
//!
//! let next = seg.next_segment().unwrap();
//! assert_eq!(next.name(), "price");
//! assert!(!next.has_next());
//! ```

use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// A malformed property path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Encountered an error at offset {offset} while parsing `{path}`: {reason}")]
pub struct PathError {
    offset: usize,
    path: Box<str>,
    reason: &'static str,
}

impl PathError {
    /// Byte offset of the offending character in [`path`](Self::path).
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The rejected path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Short description of what was expected.
    #[inline]
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

// -----------------------------------------------------------------------------
// PathSegment

/// One step of a property path, borrowed from the path text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSegment<'a> {
    name: &'a str,
    indexed_name: &'a str,
    index: Option<&'a str>,
    children: Option<&'a str>,
}

impl<'a> PathSegment<'a> {
    /// Validates the whole `path` and returns its first segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use mg_reflect::path::PathSegment;
    ///
    /// assert!(PathSegment::parse("map[key].field").is_ok());
    /// assert!(PathSegment::parse("map[key.field").is_err());
    /// assert!(PathSegment::parse("a..b").is_err());
    /// ```
    pub fn parse(path: &'a str) -> Result<Self, PathError> {
        validate(path)?;
        Ok(Self::split(path))
    }

    // `path` must already be validated.
    fn split(path: &'a str) -> Self {
        let (indexed_name, children) = match path.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (path, None),
        };
        let (name, index) = match indexed_name.split_once('[') {
            Some((name, rest)) => (name, Some(rest.strip_suffix(']').unwrap_or(rest))),
            None => (indexed_name, None),
        };
        Self {
            name,
            indexed_name,
            index,
            children,
        }
    }

    /// The pure identifier, `items` in `items[0].price`.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The identifier with its bracket suffix, `items[0]` in `items[0].price`.
    #[inline]
    pub fn indexed_name(&self) -> &'a str {
        self.indexed_name
    }

    /// The bracket content, `0` in `items[0].price`.
    ///
    /// This is an opaque string: a position for sequences, a key for maps.
    #[inline]
    pub fn index(&self) -> Option<&'a str> {
        self.index
    }

    /// The rest of the path after this segment, `price` in `items[0].price`.
    #[inline]
    pub fn children(&self) -> Option<&'a str> {
        self.children
    }

    /// Returns `true` if this is not the terminal segment.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the segment following this one.
    #[inline]
    pub fn next_segment(&self) -> Option<PathSegment<'a>> {
        self.children.map(Self::split)
    }
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.indexed_name)?;
        if let Some(children) = self.children {
            write!(f, ".{children}")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A validated property path.
///
/// # Examples
///
/// ```
/// use mg_reflect::path::PropertyPath;
///
/// let path = PropertyPath::parse("order.items[0].price").unwrap();
/// let names: Vec<_> = path.segments().map(|s| s.indexed_name()).collect();
/// assert_eq!(names, ["order", "items[0]", "price"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyPath<'a>(&'a str);

impl<'a> PropertyPath<'a> {
    /// Validates `path`.
    pub fn parse(path: &'a str) -> Result<Self, PathError> {
        validate(path)?;
        Ok(Self(path))
    }

    /// The path text.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The first segment.
    #[inline]
    pub fn first(&self) -> PathSegment<'a> {
        PathSegment::split(self.0)
    }

    /// Iterates the segments from left to right.
    #[inline]
    pub fn segments(&self) -> Segments<'a> {
        Segments {
            next: Some(self.first()),
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments().count()
    }
}

impl<'a> TryFrom<&'a str> for PropertyPath<'a> {
    type Error = PathError;

    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for PropertyPath<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Iterator over the segments of a [`PropertyPath`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    next: Option<PathSegment<'a>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = PathSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_segment();
        Some(current)
    }
}

impl core::iter::FusedIterator for Segments<'_> {}

// -----------------------------------------------------------------------------
// Validation

/// Returns `true` if `name` is a valid single identifier.
pub fn is_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    !bytes.is_empty() && scan_identifier(bytes, 0) == bytes.len()
}

fn scan_identifier(bytes: &[u8], start: usize) -> usize {
    match bytes.get(start) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return start,
    }
    let mut end = start + 1;
    while let Some(b) = bytes.get(end) {
        if !(b.is_ascii_alphanumeric() || *b == b'_') {
            break;
        }
        end += 1;
    }
    end
}

fn scan_digits(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

fn validate(path: &str) -> Result<(), PathError> {
    let bytes = path.as_bytes();
    let fail = |offset: usize, reason: &'static str| PathError {
        offset,
        path: path.into(),
        reason,
    };

    if bytes.is_empty() {
        return Err(fail(0, "path is empty"));
    }

    let mut pos = 0;
    loop {
        let end = scan_identifier(bytes, pos);
        if end == pos {
            return Err(fail(pos, "expected a property name"));
        }
        pos = end;

        if bytes.get(pos) == Some(&b'[') {
            let start = pos + 1;
            let end = match bytes.get(start) {
                Some(b) if b.is_ascii_digit() => scan_digits(bytes, start),
                _ => scan_identifier(bytes, start),
            };
            if end == start {
                let reason = match bytes.get(start) {
                    Some(b']') => "empty index",
                    None => "unclosed `[`",
                    Some(_) => "expected an index or key",
                };
                return Err(fail(start, reason));
            }
            match bytes.get(end) {
                Some(b']') => pos = end + 1,
                None => return Err(fail(end, "unclosed `[`")),
                Some(_) => return Err(fail(end, "expected `]`")),
            }
        }

        match bytes.get(pos) {
            None => return Ok(()),
            Some(b'.') => pos += 1,
            Some(_) => return Err(fail(pos, "unexpected character")),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
