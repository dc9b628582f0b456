use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(ObjectId);

/// How an asset is held at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnerRef {
    /// Held directly by an account address.
    Address { address: String },
    /// Held on the owner's behalf by a kiosk (custody-delegated).
    Kiosk { kiosk_id: String },
    Shared,
    Immutable,
    #[default]
    Unknown,
}

impl OwnerRef {
    pub fn address(address: impl Into<String>) -> Self {
        Self::Address {
            address: address.into(),
        }
    }

    pub fn kiosk(kiosk_id: impl Into<String>) -> Self {
        Self::Kiosk {
            kiosk_id: kiosk_id.into(),
        }
    }

    /// True for kiosk-held assets.
    pub fn is_custody_delegated(&self) -> bool {
        matches!(self, Self::Kiosk { .. })
    }
}

/// Optional display fields attached to an on-chain object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Raw, unvalidated date string as published by the object's display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
}

/// A blockchain-held object as observed in one ownership snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedAsset {
    pub object_id: ObjectId,
    pub type_signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMetadata>,
    #[serde(default)]
    pub owner: OwnerRef,
}

impl OwnedAsset {
    pub fn new(object_id: impl Into<ObjectId>, type_signature: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            type_signature: type_signature.into(),
            display: None,
            owner: OwnerRef::Unknown,
        }
    }

    pub fn with_display(mut self, display: DisplayMetadata) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner = owner;
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.name.as_deref())
    }

    pub fn raw_event_date(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.event_date.as_deref())
    }

    pub fn is_custody_delegated(&self) -> bool {
        self.owner.is_custody_delegated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_ref_custody() {
        assert!(OwnerRef::kiosk("0xk1").is_custody_delegated());
        assert!(!OwnerRef::address("0xa1").is_custody_delegated());
        assert!(!OwnerRef::Shared.is_custody_delegated());
        assert!(!OwnerRef::default().is_custody_delegated());
    }

    #[test]
    fn test_owned_asset_accessors() {
        let asset = OwnedAsset::new("0x1", "0xabc::badge::Badge").with_display(DisplayMetadata {
            name: Some("Spring Gala".to_string()),
            event_date: Some("2025-04-20".to_string()),
            ..Default::default()
        });
        assert_eq!(asset.display_name(), Some("Spring Gala"));
        assert_eq!(asset.raw_event_date(), Some("2025-04-20"));
        assert_eq!(asset.object_id.as_str(), "0x1");

        let bare = OwnedAsset::new("0x2", "0xabc::badge::Badge");
        assert_eq!(bare.display_name(), None);
        assert_eq!(bare.raw_event_date(), None);
    }

    #[test]
    fn test_owned_asset_serde_shape() {
        let asset = OwnedAsset::new("0x1", "0xabc::Foo").with_owner(OwnerRef::kiosk("0xk"));
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["object_id"], "0x1");
        assert_eq!(json["owner"]["kind"], "kiosk");
        assert_eq!(json["owner"]["kiosk_id"], "0xk");
        assert!(json.get("display").is_none());
    }
}
