//! Frame log schema: integer enums, optional fields and the document layout.

use serde::Deserialize;

use arena_replay::types::{ArenaMap, Frame, ItemKind, Weapon};

#[derive(Deserialize)]
struct Document {
    map: ArenaMap,
    frames: Vec<Frame>,
}

#[test]
fn weapons_and_items_are_integer_coded() {
    let frame: Frame = serde_json::from_str(
        r#"{"radius": 10,
            "players": [{"id": 4, "x": 1.5, "y": -2, "health": 12, "weapon": 3}],
            "items": [{"x": 0, "y": 0, "type": 1}, {"x": 1, "y": 1, "type": 9, "weapon": 7}]}"#,
    )
    .unwrap();

    let p = &frame.players[0];
    assert_eq!(p.weapon, Weapon::Tommy);
    assert_eq!(p.name, "");
    assert_eq!(p.score, 0);
    assert_eq!(frame.items[0].kind, ItemKind::Health);
    assert_eq!(frame.items[0].weapon, Weapon::None);
    assert_eq!(frame.items[1].kind, ItemKind::Unknown(9));
    assert_eq!(frame.items[1].weapon, Weapon::Unknown(7));
    assert!(frame.shootings.is_empty());
    assert!(frame.yaps.is_empty());

    let json = serde_json::to_value(p).unwrap();
    assert_eq!(json["weapon"], serde_json::json!(3));
}

#[test]
fn document_layout_decodes() {
    let doc: Document = serde_json::from_str(
        r#"{"map": {"radius": 50, "walls": []}, "frames": [{"radius": 50}, {"radius": 49}]}"#,
    )
    .unwrap();
    assert_eq!(doc.map.radius, 50.0);
    assert_eq!(doc.frames.len(), 2);
    assert_eq!(doc.frames[1].living_players().count(), 0);
}

#[test]
fn frame_without_radius_is_rejected() {
    assert!(serde_json::from_str::<Frame>(r#"{"players": []}"#).is_err());
}
