//! Normalisation of loosely-typed upstream payloads into engine models.

pub mod snapshot;

pub use snapshot::{
    load_snapshot_from_path, parse_owned_asset, parse_owned_assets, parse_snapshot_str,
    parse_snapshot_value, ParseError,
};
