#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use mintscope::models::{
    CollectionRef, DisplayMetadata, EventDef, OwnedAsset, OwnerRef,
};
use mintscope::services::EngineSnapshot;
use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const WALLET: &str = "0xwallet";

/// Fixed evaluation instant shared by every scenario.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 20, 18, 0, 0).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Wallet-held asset whose display names an event and carries a raw date.
pub fn named_asset(id: &str, type_signature: &str, name: &str, date: &str) -> OwnedAsset {
    OwnedAsset::new(id, type_signature)
        .with_display(DisplayMetadata {
            name: Some(name.to_string()),
            event_date: Some(date.to_string()),
            ..Default::default()
        })
        .with_owner(OwnerRef::address(WALLET))
}

/// Two badges from the same package, one with a valid date and one without.
pub fn gala_snapshot() -> EngineSnapshot {
    EngineSnapshot {
        assets: vec![
            named_asset("A", "0xabc::Foo", "Spring Gala", "2025-04-20T10:00:00Z"),
            named_asset("B", "0xabc::Foo", "Spring Gala", "not-a-date"),
        ],
        collections: vec![CollectionRef::new("foo", "Foo").with_package_id("0xabc")],
        events: vec![EventDef::new("E", "Spring Gala", "0xabc")],
        ..Default::default()
    }
}

/// Run `f` with the given variables set (`Some`) or removed (`None`).
///
/// Holds a process-wide lock for the duration, and puts the previous values
/// back even if `f` panics.
pub fn with_scoped_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let _serial = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(vars);
    f()
}

/// Saved values for every touched variable, written back on drop.
struct EnvRestore(Vec<(String, Option<String>)>);

impl EnvRestore {
    fn apply(vars: &[(&str, Option<&str>)]) -> Self {
        let touched: HashSet<&str> = vars.iter().map(|(name, _)| *name).collect();
        let saved = touched
            .into_iter()
            .map(|name| (name.to_owned(), std::env::var(name).ok()))
            .collect();
        for (name, value) in vars {
            set_or_remove(name, *value);
        }
        EnvRestore(saved)
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (name, value) in std::mem::take(&mut self.0) {
            set_or_remove(&name, value.as_deref());
        }
    }
}

fn set_or_remove(name: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(name, value),
        None => std::env::remove_var(name),
    }
}
