use super::*;
use crate::models::{DisplayMetadata, OwnerRef};

fn asset(id: &str, type_signature: &str, name: Option<&str>, date: Option<&str>) -> OwnedAsset {
    OwnedAsset::new(id, type_signature)
        .with_display(DisplayMetadata {
            name: name.map(str::to_string),
            event_date: date.map(str::to_string),
            ..Default::default()
        })
        .with_owner(OwnerRef::address("0xwallet"))
}

fn collections() -> Vec<CollectionRef> {
    vec![
        CollectionRef::new("badges", "Badges").with_package_id("0xabc"),
        CollectionRef::new("tickets", "Tickets").with_package_id("0xdef"),
    ]
}

fn events() -> Vec<EventDef> {
    vec![
        EventDef::new("gala", "Spring Gala", "0xabc"),
        EventDef::new("fair", "Summer Fair", "0xdef"),
    ]
}

fn in_scope_ids(resolution: &ScopeResolution<'_>) -> Vec<String> {
    resolution
        .in_scope()
        .map(|entry| entry.asset.object_id.to_string())
        .collect()
}

#[test]
fn test_default_mode_admits_event_bound_only() {
    let assets = vec![
        asset("a", "0xabc::Foo", Some("Spring Gala"), Some("2025-04-20T10:00:00Z")),
        asset("b", "0xabc::Foo", Some("Spring Gala"), Some("not-a-date")),
        asset("c", "0xabc::Foo", None, None),
    ];
    let (collections, events) = (collections(), events());

    let resolution = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig::default(),
        &DatePolicy::default(),
    );

    assert_eq!(resolution.mode, ScopeMode::Default);
    assert_eq!(in_scope_ids(&resolution), vec!["a"]);
    assert_eq!(
        resolution.entries[0].reason,
        Some(ScopeReason::EventParticipation)
    );
    // matched to a collection but unbound: still out of scope
    assert!(resolution.entries[2].matched.is_some());
    assert!(!resolution.entries[2].is_in_scope());
}

#[test]
fn test_default_mode_ignores_enabled_events_being_empty() {
    let assets = vec![asset("a", "0x999::Other", Some("Summer Fair"), Some("2025-07-01"))];
    let (collections, events) = (collections(), events());
    let resolution = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig::default(),
        &DatePolicy::default(),
    );
    assert_eq!(resolution.in_scope_count(), 1);
}

#[test]
fn test_configured_enabled_collection() {
    let assets = vec![
        asset("a", "0xabc::Foo", None, None),
        asset("b", "0xdef::Bar", None, None),
    ];
    let (collections, events) = (collections(), events());
    let mut policy = DisplayScopeConfig::default();
    policy.enabled_collections.insert("badges".into());

    let resolution = resolve_scope(&assets, &collections, &events, &policy, &DatePolicy::default());

    assert_eq!(resolution.mode, ScopeMode::Configured);
    assert_eq!(in_scope_ids(&resolution), vec!["a"]);
    assert_eq!(
        resolution.entries[0].reason,
        Some(ScopeReason::EnabledCollection)
    );
}

#[test]
fn test_configured_enabled_event_requires_binding_to_that_event() {
    let assets = vec![
        asset("a", "0x999::X", Some("Spring Gala"), Some("2025-04-20")),
        asset("b", "0x999::X", Some("Summer Fair"), Some("2025-07-01")),
        asset("c", "0x999::X", Some("Spring Gala"), Some("TBD")),
    ];
    let (collections, events) = (collections(), events());
    let mut policy = DisplayScopeConfig::default();
    policy.enabled_events.insert("gala".into());

    let resolution = resolve_scope(&assets, &collections, &events, &policy, &DatePolicy::default());

    assert_eq!(in_scope_ids(&resolution), vec!["a"]);
    assert_eq!(resolution.entries[0].reason, Some(ScopeReason::EnabledEvent));
}

#[test]
fn test_configured_custom_asset_type() {
    let assets = vec![
        asset("a", "0x777::pass::Pass", None, None),
        asset("b", "0x777::pass::Pass2", None, None),
    ];
    let (collections, events) = (collections(), events());
    let mut policy = DisplayScopeConfig::default();
    policy
        .custom_asset_types
        .insert("0x777::pass::Pass".to_string());

    let resolution = resolve_scope(&assets, &collections, &events, &policy, &DatePolicy::default());

    assert_eq!(in_scope_ids(&resolution), vec!["a"]);
    assert_eq!(
        resolution.entries[0].reason,
        Some(ScopeReason::CustomAssetType)
    );
}

#[test]
fn test_configured_mode_does_not_fall_back_to_any_event() {
    let assets = vec![asset("a", "0x999::X", Some("Summer Fair"), Some("2025-07-01"))];
    let (collections, events) = (collections(), events());
    let mut policy = DisplayScopeConfig::default();
    policy.enabled_events.insert("gala".into());

    let resolution = resolve_scope(&assets, &collections, &events, &policy, &DatePolicy::default());
    assert_eq!(resolution.in_scope_count(), 0);
}

#[test]
fn test_custody_filter_overrides_custom_type() {
    let assets = vec![
        asset("direct", "0x777::pass::Pass", None, None),
        asset("kiosk", "0x777::pass::Pass", None, None).with_owner(OwnerRef::kiosk("0xk1")),
    ];
    let (collections, events) = (collections(), events());
    let mut policy = DisplayScopeConfig {
        include_kiosk: false,
        ..Default::default()
    };
    policy
        .custom_asset_types
        .insert("0x777::pass::Pass".to_string());

    let resolution = resolve_scope(&assets, &collections, &events, &policy, &DatePolicy::default());

    assert_eq!(in_scope_ids(&resolution), vec!["direct"]);
    assert_eq!(resolution.custody_excluded, 1);
}

#[test]
fn test_custody_filter_in_default_mode() {
    let assets = vec![
        asset("a", "0xabc::Foo", Some("Spring Gala"), Some("2025-04-20"))
            .with_owner(OwnerRef::kiosk("0xk1")),
    ];
    let (collections, events) = (collections(), events());

    let excluded = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig {
            include_kiosk: false,
            ..Default::default()
        },
        &DatePolicy::default(),
    );
    assert_eq!(excluded.mode, ScopeMode::Default);
    assert_eq!(excluded.in_scope_count(), 0);
    assert_eq!(excluded.custody_excluded, 1);

    let included = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig::default(),
        &DatePolicy::default(),
    );
    assert_eq!(included.in_scope_count(), 1);
}

#[test]
fn test_out_of_scope_kiosk_asset_is_not_counted_as_custody_excluded() {
    let assets = vec![asset("a", "0x999::X", None, None).with_owner(OwnerRef::kiosk("0xk1"))];
    let (collections, events) = (collections(), events());
    let resolution = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig {
            include_kiosk: false,
            ..Default::default()
        },
        &DatePolicy::default(),
    );
    assert_eq!(resolution.custody_excluded, 0);
}

#[test]
fn test_empty_inputs() {
    let resolution = resolve_scope(
        &[],
        &[],
        &[],
        &DisplayScopeConfig::default(),
        &DatePolicy::default(),
    );
    assert_eq!(resolution.in_scope_count(), 0);
    assert!(resolution.entries.is_empty());
}

#[test]
fn test_match_and_binding_are_independent() {
    // bound to the fair (0xdef) while matching the badge collection (0xabc)
    let assets = vec![asset("a", "0xabc::Foo", Some("Summer Fair"), Some("2025-07-01"))];
    let (collections, events) = (collections(), events());
    let resolution = resolve_scope(
        &assets,
        &collections,
        &events,
        &DisplayScopeConfig::default(),
        &DatePolicy::default(),
    );
    let entry = &resolution.entries[0];
    assert!(entry.is_matched_to(&collections[0]));
    assert_eq!(entry.binding.map(|b| b.event.id.as_str()), Some("fair"));
}
