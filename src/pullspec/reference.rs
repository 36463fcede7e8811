use std::{fmt, str::FromStr};

/// Either an image tag or a content digest
///
/// A pull spec carries at most one of these after its name. Digests are
/// always written as `algorithm:hex` and tags never contain a colon, so the
/// presence of a colon is enough to tell them apart.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ImageRef {
    Tag(String),
    Digest(String),
}

impl ImageRef {
    /// Classify a bare ref token as a tag or a digest
    pub fn new(s: &str) -> Self {
        if s.contains(':') {
            ImageRef::Digest(s.to_owned())
        } else {
            ImageRef::Tag(s.to_owned())
        }
    }

    /// Returns a reference to the bare token, without any separator
    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Tag(tag) => tag.as_str(),
            ImageRef::Digest(digest) => digest.as_str(),
        }
    }

    /// The character that introduces this ref in a pull spec
    pub fn separator(&self) -> char {
        match self {
            ImageRef::Tag(_) => ':',
            ImageRef::Digest(_) => '@',
        }
    }

    /// Is this ref a content digest?
    pub fn is_digest(&self) -> bool {
        match self {
            ImageRef::Tag(_) => false,
            ImageRef::Digest(_) => true,
        }
    }

    /// Is this ref a tag?
    pub fn is_tag(&self) -> bool {
        !self.is_digest()
    }
}

impl FromStr for ImageRef {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ImageRef::new(s))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.separator(), self)
    }
}
