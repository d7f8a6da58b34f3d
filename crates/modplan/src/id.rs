//! Module identity.
//!
//! A [`ModuleId`] is the compound key used everywhere else in the crate: the scanner,
//! the oracle and the planner all key their maps on `(kind, name)`, never on `name`
//! alone, because a Clang module and a Swift module of the same name are different
//! build artifacts that can coexist in the same graph (spec.md §3).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::Error as _, ser::SerializeMap};

/// Which of the four module flavors an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Swift,
    SwiftPlaceholder,
    SwiftPrebuiltExternal,
    Clang,
}

impl ModuleKind {
    fn scanner_tag(self) -> &'static str {
        match self {
            ModuleKind::Swift => "swift",
            ModuleKind::SwiftPlaceholder => "swiftPlaceholder",
            ModuleKind::SwiftPrebuiltExternal => "swiftPrebuiltExternal",
            ModuleKind::Clang => "clang",
        }
    }
}

/// Tagged identifier `{kind, name}`. Equality and hashing cover both fields; the name
/// alone is the cross-kind identity used when merging (§4.C).
///
/// The scanner represents an id as a single-key object, e.g. `{"swift": "Main"}`
/// (spec.md §6), rather than as `{"kind": "swift", "name": "Main"}` — `ModuleId`'s
/// (de)serialization is hand-written to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub kind: ModuleKind,
    pub name: String,
}

impl Serialize for ModuleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.scanner_tag(), &self.name)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ModuleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: BTreeMap<String, String> = BTreeMap::deserialize(deserializer)?;
        let mut entries = raw.into_iter();
        let (tag, name) = entries
            .next()
            .ok_or_else(|| D::Error::custom("module id object must have exactly one key"))?;
        if entries.next().is_some() {
            return Err(D::Error::custom("module id object must have exactly one key"));
        }
        let kind = match tag.as_str() {
            "swift" => ModuleKind::Swift,
            "swiftPlaceholder" => ModuleKind::SwiftPlaceholder,
            "swiftPrebuiltExternal" => ModuleKind::SwiftPrebuiltExternal,
            "clang" => ModuleKind::Clang,
            other => {
                return Err(D::Error::unknown_variant(other, &[
                    "swift",
                    "swiftPlaceholder",
                    "swiftPrebuiltExternal",
                    "clang",
                ]));
            }
        };
        Ok(ModuleId { kind, name })
    }
}

impl ModuleId {
    pub fn swift(name: impl Into<String>) -> Self {
        Self { kind: ModuleKind::Swift, name: name.into() }
    }

    pub fn swift_placeholder(name: impl Into<String>) -> Self {
        Self { kind: ModuleKind::SwiftPlaceholder, name: name.into() }
    }

    pub fn swift_prebuilt_external(name: impl Into<String>) -> Self {
        Self { kind: ModuleKind::SwiftPrebuiltExternal, name: name.into() }
    }

    pub fn clang(name: impl Into<String>) -> Self {
        Self { kind: ModuleKind::Clang, name: name.into() }
    }

    /// `true` for the two kinds that carry `extraPcmArgs` and a place in `swiftJobs`
    /// (`Swift`, `SwiftPrebuiltExternal`) — the dispatch the planner (§4.F) and the
    /// versioned re-scan (§4.E) use to tell a Swift-side node from a `Clang` one.
    pub fn is_swift_like(&self) -> bool {
        matches!(self.kind, ModuleKind::Swift | ModuleKind::SwiftPrebuiltExternal)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.kind {
            ModuleKind::Swift => "swift",
            ModuleKind::SwiftPlaceholder => "swiftPlaceholder",
            ModuleKind::SwiftPrebuiltExternal => "swiftPrebuiltExternal",
            ModuleKind::Clang => "clang",
        };
        write!(f, "{tag}({})", self.name)
    }
}
