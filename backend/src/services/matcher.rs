//! Identity matching from an asset's type signature to a catalog collection.
//!
//! Collections are referenced through loosely maintained keys (a canonical type
//! path and a legacy package id), so matching is a ranked rule table: every
//! rule is tried against the whole catalog before the next, weaker rule.

use serde::{Deserialize, Serialize};

use crate::models::CollectionRef;

/// One row of the matching table, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// `type_signature == canonical_type_path`
    CanonicalPath,
    /// `type_signature == package_id`
    PackageId,
    /// `type_signature` contains `package_id`, or the reverse for truncated signatures
    PackageContainment,
}

impl MatchRule {
    /// Evaluation order.
    pub const PRECEDENCE: [MatchRule; 3] = [
        MatchRule::CanonicalPath,
        MatchRule::PackageId,
        MatchRule::PackageContainment,
    ];

    /// Whether this rule alone accepts `collection` for `type_signature`.
    ///
    /// Empty keys never match.
    pub fn accepts(self, type_signature: &str, collection: &CollectionRef) -> bool {
        if type_signature.is_empty() {
            return false;
        }
        match self {
            MatchRule::CanonicalPath => non_empty(&collection.canonical_type_path)
                .is_some_and(|path| path == type_signature),
            MatchRule::PackageId => {
                non_empty(&collection.package_id).is_some_and(|pkg| pkg == type_signature)
            }
            MatchRule::PackageContainment => non_empty(&collection.package_id)
                .is_some_and(|pkg| type_signature.contains(pkg) || pkg.contains(type_signature)),
        }
    }
}

fn non_empty(key: &Option<String>) -> Option<&str> {
    key.as_deref().filter(|k| !k.is_empty())
}

/// A resolved collection together with the rule that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionMatch<'a> {
    pub collection: &'a CollectionRef,
    pub rule: MatchRule,
}

/// Resolve `type_signature` against `collections`; first hit in precedence order wins.
pub fn match_collection<'a>(
    type_signature: &str,
    collections: &'a [CollectionRef],
) -> Option<CollectionMatch<'a>> {
    MatchRule::PRECEDENCE.iter().find_map(|&rule| {
        collections
            .iter()
            .find(|collection| rule.accepts(type_signature, collection))
            .map(|collection| CollectionMatch { collection, rule })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CollectionRef> {
        vec![
            CollectionRef::new("legacy", "Legacy Badges").with_package_id("0xabc"),
            CollectionRef::new("canonical", "Badges")
                .with_canonical_type_path("0xabc::badge::Badge")
                .with_package_id("0xabc::badge::Badge"),
            CollectionRef::new("tickets", "Tickets").with_package_id("0xdef::ticket::Ticket"),
        ]
    }

    #[test]
    fn test_canonical_path_beats_earlier_containment() {
        let collections = catalog();
        let hit = match_collection("0xabc::badge::Badge", &collections).unwrap();
        assert_eq!(hit.collection.id.as_str(), "canonical");
        assert_eq!(hit.rule, MatchRule::CanonicalPath);
    }

    #[test]
    fn test_exact_package_id() {
        let collections = catalog();
        let hit = match_collection("0xdef::ticket::Ticket", &collections).unwrap();
        assert_eq!(hit.collection.id.as_str(), "tickets");
        assert_eq!(hit.rule, MatchRule::PackageId);
    }

    #[test]
    fn test_package_id_exact_beats_containment() {
        let collections = vec![
            CollectionRef::new("broad", "Broad").with_package_id("0xabc"),
            CollectionRef::new("exact", "Exact").with_package_id("0xabc::Foo"),
        ];
        let hit = match_collection("0xabc::Foo", &collections).unwrap();
        assert_eq!(hit.collection.id.as_str(), "exact");
        assert_eq!(hit.rule, MatchRule::PackageId);
    }

    #[test]
    fn test_legacy_suffix_containment() {
        let collections = catalog();
        let hit = match_collection("0xabc::old_badge::Badge", &collections).unwrap();
        assert_eq!(hit.collection.id.as_str(), "legacy");
        assert_eq!(hit.rule, MatchRule::PackageContainment);
    }

    #[test]
    fn test_truncated_signature_containment() {
        let collections = catalog();
        let hit = match_collection("0xdef::ticket", &collections).unwrap();
        assert_eq!(hit.collection.id.as_str(), "tickets");
        assert_eq!(hit.rule, MatchRule::PackageContainment);
    }

    #[test]
    fn test_no_match() {
        let collections = catalog();
        assert!(match_collection("0x999::other::Thing", &collections).is_none());
        assert!(match_collection("0x999::other::Thing", &[]).is_none());
    }

    #[test]
    fn test_empty_keys_never_match() {
        let collections = vec![CollectionRef::new("blank", "Blank")
            .with_package_id("")
            .with_canonical_type_path("")];
        assert!(match_collection("0xabc::Foo", &collections).is_none());
        assert!(match_collection("", &catalog()).is_none());
    }

    #[test]
    fn test_canonical_path_is_not_used_for_containment() {
        let collections =
            vec![CollectionRef::new("c", "C").with_canonical_type_path("0xabc::badge::Badge")];
        assert!(match_collection("0xabc::badge", &collections).is_none());
    }
}
