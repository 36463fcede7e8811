//! Docker-style pull specs and their components


mod reference;

pub use reference::ImageRef;

use crate::errors::ImageError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Namespace used when a registry is named but no namespace is
pub const DEFAULT_NAMESPACE: &str = "library";

/// Parsed pull spec
///
/// This is an owned value holding the pieces of a string like
/// `registry/namespace/name:tag` or `name@algorithm:hex`. Only the name is
/// mandatory. The string is split purely by position: one path segment is a
/// bare name, two are `namespace/name`, and three are
/// `registry/namespace/name`. Nothing about the registry host is validated
/// beyond that.
///
/// Any [PullSpec] with a registry also has a namespace. Parsing can't produce
/// one without, and the constructors here fill in [DEFAULT_NAMESPACE] the same
/// way [join] does, so a [PullSpec] always reparses from its own [Display]
/// output.
///
/// [Display]: fmt::Display
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct PullSpec {
    registry: Option<String>,
    namespace: Option<String>,
    name: String,
    reference: Option<ImageRef>,
}

impl PullSpec {
    /// Parse a [prim@str] as a [PullSpec]
    ///
    /// The tag or digest is removed before the remainder is split on slashes,
    /// so a colon in a `host:port` registry is never mistaken for a tag.
    ///
    /// ```
    /// # use imageapi::PullSpec;
    /// let spec = PullSpec::parse("registry:5000/ns/name@sha256:deadbeef").unwrap();
    /// assert_eq!(
    ///     spec.as_parts(),
    ///     (Some("registry:5000"), Some("ns"), "name", Some("sha256:deadbeef"))
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        let (path, reference) = split_reference(s)?;
        log::trace!("pull spec {:?}, path {:?}, ref {:?}", s, path, reference);

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid(s, "path segments must not be empty"));
        }
        let (registry, namespace, name) = match segments.as_slice() {
            [name] => (None, None, *name),
            [namespace, name] => (None, Some(*namespace), *name),
            [registry, namespace, name] => (Some(*registry), Some(*namespace), *name),
            _ => {
                return Err(invalid(
                    s,
                    "must be two or three segments separated by slashes",
                ))
            }
        };

        Ok(PullSpec {
            registry: registry.map(str::to_owned),
            namespace: namespace.map(str::to_owned),
            name: name.to_owned(),
            reference,
        })
    }

    /// Build a [PullSpec] from its component pieces
    ///
    /// Empty strings count as absent. A registry without a namespace gets
    /// [DEFAULT_NAMESPACE]. This fails if the pieces would parse back as
    /// something other than intended, for example a name containing a slash.
    pub fn from_parts(
        registry: Option<&str>,
        namespace: Option<&str>,
        name: &str,
        reference: Option<&str>,
    ) -> Result<Self, ImageError> {
        let registry = registry.filter(|s| !s.is_empty());
        let namespace = namespace.filter(|s| !s.is_empty());
        let reference = reference.filter(|s| !s.is_empty());

        let combined = join(
            registry.unwrap_or(""),
            namespace.unwrap_or(""),
            name,
            reference.unwrap_or(""),
        );
        let parsed = PullSpec::parse(&combined)?;
        let expected_namespace = match (registry, namespace) {
            (Some(_), None) => Some(DEFAULT_NAMESPACE),
            (_, namespace) => namespace,
        };
        if parsed.as_parts() == (registry, expected_namespace, name, reference) {
            Ok(parsed)
        } else {
            // Parsing ambiguity
            Err(invalid(&combined, "components do not survive a round trip"))
        }
    }

    /// Return references to the parsed components within this [PullSpec]
    pub fn as_parts(&self) -> (Option<&str>, Option<&str>, &str, Option<&str>) {
        (
            self.registry(),
            self.namespace(),
            self.name(),
            self.reference().map(ImageRef::as_str),
        )
    }

    /// Returns the optional registry, a host with optional port
    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    /// Returns the optional namespace
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the image name, which is never empty
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional tag or digest
    pub fn reference(&self) -> Option<&ImageRef> {
        self.reference.as_ref()
    }

    /// Create a new [PullSpec] pointing at a different registry
    ///
    /// Passing [None] removes the registry but keeps the namespace, whether it
    /// was written out or defaulted.
    pub fn with_registry(&self, registry: Option<&str>) -> Result<PullSpec, ImageError> {
        PullSpec::from_parts(
            registry,
            self.namespace(),
            self.name(),
            self.reference().map(ImageRef::as_str),
        )
    }

    /// Create a new [PullSpec] with a different tag or digest
    pub fn with_reference(&self, reference: Option<&str>) -> Result<PullSpec, ImageError> {
        PullSpec::from_parts(self.registry(), self.namespace(), self.name(), reference)
    }
}

/// Join the components of a pull spec into a single string
///
/// Empty strings count as absent. A ref containing a colon is written as a
/// digest (`@ref`), anything else as a tag (`:ref`). When a registry is given
/// without a namespace, the namespace becomes [DEFAULT_NAMESPACE].
///
/// ```
/// # use imageapi::pullspec::join;
/// assert_eq!(join("", "", "busybox", ""), "busybox");
/// assert_eq!(join("", "ns", "name", "tag"), "ns/name:tag");
/// assert_eq!(join("host:5000", "", "name", ""), "host:5000/library/name");
/// ```
pub fn join(registry: &str, namespace: &str, name: &str, reference: &str) -> String {
    let reference = match reference {
        "" => String::new(),
        reference => {
            let reference = ImageRef::new(reference);
            format!("{}{}", reference.separator(), reference)
        }
    };
    let namespace = match (registry, namespace) {
        ("", "") => return format!("{}{}", name, reference),
        (_, "") => DEFAULT_NAMESPACE,
        (_, namespace) => namespace,
    };
    if registry.is_empty() {
        format!("{}/{}{}", namespace, name, reference)
    } else {
        format!("{}/{}/{}{}", registry, namespace, name, reference)
    }
}

/// Does this string parse as a [PullSpec]?
pub fn is_pull_spec(s: &str) -> bool {
    PullSpec::parse(s).is_ok()
}

fn invalid(spec: &str, reason: &'static str) -> ImageError {
    ImageError::InvalidSpec {
        spec: spec.to_owned(),
        reason,
    }
}

/// Remove the trailing tag or digest from a pull spec
///
/// An `@` anywhere starts a digest, which wins over any tag written before
/// it. Otherwise the last colon starts a tag, unless a slash follows it, in
/// which case the colon belonged to a registry port.
fn split_reference(s: &str) -> Result<(&str, Option<ImageRef>), ImageError> {
    if let Some(at) = s.find('@') {
        let digest = &s[at + 1..];
        if !digest.contains(':') {
            return Err(invalid(s, "digest must be of the form algorithm:hex"));
        }
        let (path, _superseded_tag) = split_tag(&s[..at]);
        return Ok((path, Some(ImageRef::Digest(digest.to_owned()))));
    }
    let (path, tag) = split_tag(s);
    Ok((path, tag.map(|tag| ImageRef::Tag(tag.to_owned()))))
}

fn split_tag(s: &str) -> (&str, Option<&str>) {
    match s.rfind(':') {
        Some(colon) if !s[colon + 1..].contains('/') => {
            let tag = &s[colon + 1..];
            (&s[..colon], Some(tag).filter(|tag| !tag.is_empty()))
        }
        _ => (s, None),
    }
}

impl FromStr for PullSpec {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PullSpec::parse(s)
    }
}

impl fmt::Display for PullSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (registry, namespace, name, reference) = self.as_parts();
        write!(
            f,
            "{}",
            join(
                registry.unwrap_or(""),
                namespace.unwrap_or(""),
                name,
                reference.unwrap_or("")
            )
        )
    }
}

impl fmt::Debug for PullSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for PullSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PullSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PullSpec::parse(&s).map_err(de::Error::custom)
    }
}
