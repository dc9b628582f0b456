//! Snapshot documents and raw chain object listings.
//!
//! Object listings returned by chain RPCs and indexers disagree on field
//! names and nesting. Each entry is normalised field by field; entries that
//! lack an object id or a type are skipped with a warning so that one bad
//! object never sinks the whole wallet.
//!
//! A snapshot document is either a bare array of objects or a JSON object:
//!
//! ```json
//! {
//!   "assets": [ ... ],
//!   "collections": [ { "id": "foo", "name": "Foo", "package_id": "0xabc" } ],
//!   "events": [ { "id": "E", "name": "Spring Gala", "collection_ref": "0xabc" } ],
//!   "policy": { "enabled_collections": ["foo"] },
//!   "onchain_counts": { "foo": 500 }
//! }
//! ```

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

use crate::models::{DisplayMetadata, OwnedAsset, OwnerRef};
use crate::services::EngineSnapshot;

const ID_KEYS: &[&str] = &["objectId", "object_id", "id"];
const TYPE_KEYS: &[&str] = &["type", "typeSignature", "type_signature"];
const IMAGE_KEYS: &[&str] = &["image_url", "imageUrl", "image", "image_ref"];
const DATE_KEYS: &[&str] = &["event_date", "eventDate"];
const KIOSK_KEYS: &[&str] = &["kioskId", "kiosk_id"];

/// Errors raised while reading a snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected snapshot shape: {0}")]
    Shape(String),

    #[error("Invalid `{section}` section: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a snapshot document from JSON text.
pub fn parse_snapshot_str(json: &str) -> Result<EngineSnapshot, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    parse_snapshot_value(&value)
}

/// Parse a snapshot document from an already decoded JSON value.
pub fn parse_snapshot_value(value: &Value) -> Result<EngineSnapshot, ParseError> {
    match value {
        Value::Array(entries) => Ok(EngineSnapshot {
            assets: parse_owned_assets(entries),
            ..Default::default()
        }),
        Value::Object(doc) => {
            let assets = match doc.get("assets").or_else(|| doc.get("objects")) {
                Some(Value::Array(entries)) => parse_owned_assets(entries),
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(ParseError::Shape(format!(
                        "`assets` must be an array, found {}",
                        kind_of(other)
                    )))
                }
            };

            Ok(EngineSnapshot {
                assets,
                collections: section(doc, "collections")?,
                events: section(doc, "events")?,
                policy: section(doc, "policy")?,
                onchain_counts: section(doc, "onchain_counts")?,
            })
        }
        other => Err(ParseError::Shape(format!(
            "expected an object or array, found {}",
            kind_of(other)
        ))),
    }
}

/// Read and parse a snapshot document from disk.
pub fn load_snapshot_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<EngineSnapshot> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    let snapshot = parse_snapshot_str(&content)
        .with_context(|| format!("Failed to parse snapshot file {}", path.display()))?;
    log::info!(
        "Loaded snapshot {} ({} assets)",
        path.display(),
        snapshot.assets.len()
    );
    Ok(snapshot)
}

/// Normalise every usable entry of a raw object listing.
pub fn parse_owned_assets(entries: &[Value]) -> Vec<OwnedAsset> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let asset = parse_owned_asset(entry);
            if asset.is_none() {
                log::warn!("Skipping object #{}: missing object id or type", index);
            }
            asset
        })
        .collect()
}

/// Normalise one raw object; `None` when it has no id or no type.
pub fn parse_owned_asset(entry: &Value) -> Option<OwnedAsset> {
    let object = match entry.get("data") {
        Some(data) if data.is_object() => data,
        _ => entry,
    };

    let object_id = text_field(object, ID_KEYS)?;
    let type_signature = text_field(object, TYPE_KEYS)?;

    let mut asset = OwnedAsset::new(object_id, type_signature).with_owner(parse_owner(object));
    asset.display = parse_display(object);
    Some(asset)
}

fn parse_display(object: &Value) -> Option<DisplayMetadata> {
    let source = match object.get("display") {
        Some(display) => match display.get("data") {
            Some(data) if data.is_object() => data,
            _ => display,
        },
        None => object.get("metadata")?,
    };
    if !source.is_object() {
        return None;
    }

    let display = DisplayMetadata {
        name: text_field(source, &["name"]),
        description: text_field(source, &["description"]),
        image_ref: text_field(source, IMAGE_KEYS),
        event_date: text_field(source, DATE_KEYS),
    };
    (display != DisplayMetadata::default()).then_some(display)
}

fn parse_owner(object: &Value) -> OwnerRef {
    if let Some(kiosk_id) = text_field(object, KIOSK_KEYS) {
        return OwnerRef::kiosk(kiosk_id);
    }

    match object.get("owner") {
        Some(Value::String(kind)) => match kind.as_str() {
            "Shared" => OwnerRef::Shared,
            "Immutable" => OwnerRef::Immutable,
            _ => OwnerRef::Unknown,
        },
        Some(Value::Object(owner)) => tagged_owner(owner).unwrap_or_else(|| {
            serde_json::from_value(Value::Object(owner.clone())).unwrap_or_default()
        }),
        _ => OwnerRef::Unknown,
    }
}

fn tagged_owner(owner: &Map<String, Value>) -> Option<OwnerRef> {
    if let Some(address) = owner.get("AddressOwner").and_then(Value::as_str) {
        return Some(OwnerRef::address(address));
    }
    if let Some(parent) = owner.get("ObjectOwner").and_then(Value::as_str) {
        return Some(OwnerRef::kiosk(parent));
    }
    if owner.contains_key("Shared") {
        return Some(OwnerRef::Shared);
    }
    if owner.contains_key("Immutable") {
        return Some(OwnerRef::Immutable);
    }
    None
}

/// First non-empty value among `keys`; numbers are rendered as text.
fn text_field(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn section<T: DeserializeOwned + Default>(
    doc: &Map<String, Value>,
    section: &'static str,
) -> Result<T, ParseError> {
    match doc.get(section) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|source| ParseError::Section { section, source }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
