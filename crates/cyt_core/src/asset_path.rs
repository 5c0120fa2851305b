//! Logical texture paths.
//!
//! An [`AssetPath`] is an opaque, case-sensitive key such as
//! `Things/Pawn/Animal/Goat/Goat_east`. The only structure the crate relies on is the
//! suffix convention used to derive variant paths from a base path.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Direction suffixes in the order variant expansion enumerates them.
pub const DIRECTION_SUFFIXES: [&str; 4] = ["_north", "_south", "_east", "_west"];

/// Suffix of the representative direction.
pub const EAST_SUFFIX: &str = "_east";

/// A logical texture path, without file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a raw suffix, e.g. `_east` or `_Thin_north`.
    pub fn with_suffix(&self, suffix: &str) -> AssetPath {
        let mut s = String::with_capacity(self.0.len() + suffix.len());
        s.push_str(&self.0);
        s.push_str(suffix);
        AssetPath(s)
    }

    /// The path with `_east` appended.
    pub fn east(&self) -> AssetPath {
        self.with_suffix(EAST_SUFFIX)
    }

    pub fn is_east(&self) -> bool {
        self.0.ends_with(EAST_SUFFIX)
    }

    /// The last `/`-separated segment, or the whole path when there is none.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) if idx + 1 < self.0.len() => &self.0[idx + 1..],
            _ => &self.0,
        }
    }

    /// The four direction variants of this path, in enumeration order.
    pub fn direction_variants(&self) -> impl Iterator<Item = AssetPath> + '_ {
        DIRECTION_SUFFIXES.iter().map(move |s| self.with_suffix(s))
    }

    /// `<path>_<bodyType><direction>` for every body type, body types outermost.
    pub fn body_type_variants<'a>(
        &'a self,
        body_types: &'a [String],
    ) -> impl Iterator<Item = AssetPath> + 'a {
        body_types.iter().flat_map(move |body| {
            DIRECTION_SUFFIXES
                .iter()
                .map(move |dir| self.with_suffix(&format!("_{}{}", body, dir)))
        })
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AssetPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}
