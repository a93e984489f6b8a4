use serde_json::json;
use tidalshift::tidal::favorites::record_from_envelope;
use tidalshift::tidal::playlists::descriptor_from_payload;
use tidalshift::types::{Category, FavoriteEnvelope, PlaylistPayload};

fn envelope(value: serde_json::Value) -> FavoriteEnvelope {
    serde_json::from_value(value).expect("envelope should deserialize")
}

#[test]
fn test_track_envelope_normalization() {
    let envelope = envelope(json!({
        "created": "2023-05-01T10:00:00.000+0000",
        "item": {
            "id": 123456,
            "title": "Some Song",
            "artist": { "name": "Some Band" }
        }
    }));

    let record = record_from_envelope(Category::Tracks, &envelope).unwrap();
    assert_eq!(record.id, "123456");
    assert_eq!(record.name, "Some Song");
    assert_eq!(record.descriptor, "Some Band");
    assert_eq!(record.added_at, "2023-05-01T10:00:00.000+0000");
}

#[test]
fn test_artist_envelope_uses_fixed_descriptor() {
    let envelope = envelope(json!({
        "created": "2022-01-15T08:30:00.000+0000",
        "item": { "id": 77, "name": "Some Band" }
    }));

    let record = record_from_envelope(Category::Artists, &envelope).unwrap();
    assert_eq!(record.id, "77");
    assert_eq!(record.name, "Some Band");
    assert_eq!(record.descriptor, "Artist");
}

#[test]
fn test_missing_fields_default_to_unknown() {
    // Album without a title
    let no_title = envelope(json!({
        "created": "2023-05-01T10:00:00.000+0000",
        "item": { "id": 1, "artist": { "name": "Some Band" } }
    }));
    let record = record_from_envelope(Category::Albums, &no_title).unwrap();
    assert_eq!(record.name, "Unknown");
    assert_eq!(record.descriptor, "Some Band");

    // Track without a nested artist
    let no_artist = envelope(json!({
        "created": "2023-05-01T10:00:00.000+0000",
        "item": { "id": 2, "title": "Some Song" }
    }));
    let record = record_from_envelope(Category::Tracks, &no_artist).unwrap();
    assert_eq!(record.descriptor, "Unknown");

    // Artist without a name
    let no_name = envelope(json!({
        "created": "2023-05-01T10:00:00.000+0000",
        "item": { "id": 3 }
    }));
    let record = record_from_envelope(Category::Artists, &no_name).unwrap();
    assert_eq!(record.name, "Unknown");
}

#[test]
fn test_entry_without_id_is_dropped() {
    let no_id = envelope(json!({
        "created": "2023-05-01T10:00:00.000+0000",
        "item": { "title": "Some Song" }
    }));
    assert!(record_from_envelope(Category::Tracks, &no_id).is_none());

    let no_item = envelope(json!({ "created": "2023-05-01T10:00:00.000+0000" }));
    assert!(record_from_envelope(Category::Tracks, &no_item).is_none());
}

#[test]
fn test_missing_created_degrades_to_empty_timestamp() {
    let no_created = envelope(json!({
        "item": { "id": 9, "title": "Some Song" }
    }));
    let record = record_from_envelope(Category::Tracks, &no_created).unwrap();
    assert_eq!(record.added_at, "");
}

#[test]
fn test_playlist_descriptor_mapping() {
    let payload: PlaylistPayload = serde_json::from_value(json!({
        "uuid": "aaaa-bbbb",
        "title": "Road Trip",
        "description": null,
        "creator": { "id": 42 },
        "numberOfTracks": 17
    }))
    .unwrap();

    let descriptor = descriptor_from_payload(&payload).unwrap();
    assert_eq!(descriptor.id, "aaaa-bbbb");
    assert_eq!(descriptor.name, "Road Trip");
    assert_eq!(descriptor.description, "");
    assert_eq!(descriptor.owner_id, "42");
    assert_eq!(descriptor.track_count, 17);
}

#[test]
fn test_playlist_without_creator_is_dropped() {
    let payload: PlaylistPayload = serde_json::from_value(json!({
        "uuid": "cccc-dddd",
        "title": "Editorial Mix",
        "numberOfTracks": 30
    }))
    .unwrap();

    assert!(descriptor_from_payload(&payload).is_none());
}
