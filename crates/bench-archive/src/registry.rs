//! Type tag registry for the archive wire format.
//!
//! The registry is static: a closed set of type names, the field list
//! each name decodes with, and the format constants that mark a
//! mapping node as an envelope. Adding a type means adding one
//! [`TypeTag`] variant plus its rows in the match tables below.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Object key that marks a mapping node as an archive envelope.
pub const FORMAT_TAG_KEY: &str = "type_uuid";

/// Magic value stored under [`FORMAT_TAG_KEY`].
///
/// Treated as an opaque constant; it is never parsed as a UUID. A
/// mapping without this exact key/value pair is ordinary user data.
pub const FORMAT_MAGIC: &str = "d1b4f9a602c845e7b3a8c05d97e2614f";

/// Envelope key holding the registered type name.
pub const TYPE_KEY: &str = "type";

/// Envelope key holding component version metadata.
///
/// Recorded on save, never consulted on load.
pub const VERSIONS_KEY: &str = "versions";

/// Envelope key holding the encoded field values.
pub const FIELDS_KEY: &str = "fields";

/// The closed set of registered type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Parameters,
    Trial,
    TrialEstimate,
    TrialRatio,
    TrialJudgement,
    Group,
    Tuple,
    /// Registered only as a rejection sentinel; see the codec.
    Definition,
}

impl TypeTag {
    /// Look up a tag by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Parameters" => Some(Self::Parameters),
            "Trial" => Some(Self::Trial),
            "TrialEstimate" => Some(Self::TrialEstimate),
            "TrialRatio" => Some(Self::TrialRatio),
            "TrialJudgement" => Some(Self::TrialJudgement),
            "Group" => Some(Self::Group),
            "Tuple" => Some(Self::Tuple),
            "Definition" => Some(Self::Definition),
            _ => None,
        }
    }

    /// The tag's wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parameters => "Parameters",
            Self::Trial => "Trial",
            Self::TrialEstimate => "TrialEstimate",
            Self::TrialRatio => "TrialRatio",
            Self::TrialJudgement => "TrialJudgement",
            Self::Group => "Group",
            Self::Tuple => "Tuple",
            Self::Definition => "Definition",
        }
    }

    /// Field names in constructor order.
    ///
    /// Tuples encode their fields positionally and definitions never
    /// reach the field stage, so both report an empty list.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            Self::Parameters => &[
                "seconds",
                "samples",
                "evals",
                "overhead",
                "gctrial",
                "gcsample",
                "time_tolerance",
                "memory_tolerance",
            ],
            Self::Trial => &["params", "times", "gctimes", "memory", "allocs"],
            Self::TrialEstimate => &["params", "time", "gctime", "memory", "allocs"],
            Self::TrialRatio => &["params", "time", "gctime", "memory", "allocs"],
            Self::TrialJudgement => &["ratio", "time", "memory"],
            Self::Group => &["tags", "data"],
            Self::Tuple | Self::Definition => &[],
        }
    }
}

/// Component→version pairs recorded in every envelope.
///
/// Computed once at first use and shared read-only afterwards.
pub fn version_info() -> &'static BTreeMap<&'static str, &'static str> {
    static VERSIONS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
        BTreeMap::from([
            ("bench-archive", env!("CARGO_PKG_VERSION")),
            ("format", "1"),
        ])
    });
    &VERSIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_registry() {
        for tag in [
            TypeTag::Parameters,
            TypeTag::Trial,
            TypeTag::TrialEstimate,
            TypeTag::TrialRatio,
            TypeTag::TrialJudgement,
            TypeTag::Group,
            TypeTag::Tuple,
            TypeTag::Definition,
        ] {
            assert_eq!(TypeTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(TypeTag::from_name("Benchmark"), None);
    }

    #[test]
    fn test_magic_is_32_hex_digits() {
        assert_eq!(FORMAT_MAGIC.len(), 32);
        assert!(FORMAT_MAGIC.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_version_info_names_this_crate() {
        let versions = version_info();
        assert_eq!(
            versions.get("bench-archive"),
            Some(&env!("CARGO_PKG_VERSION"))
        );
    }
}
