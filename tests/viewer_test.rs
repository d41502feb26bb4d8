//! Viewer commands driven against a recording surface.

use arena_replay::core::{
    fit_view, Canvas, FitParams, MuteAudio, Palette, RecordingSurface, Viewer, ViewerConfig,
};
use arena_replay::term::{Captions, Scene};
use arena_replay::types::{ArenaMap, Frame, Player, Position, Shooting, ViewerCommand};

const CANVAS: Canvas = Canvas {
    width: 1000.0,
    height: 800.0,
};

fn player(id: u32, x: f64, y: f64, health: i32) -> Player {
    Player {
        id,
        name: format!("bot{id}"),
        x,
        y,
        health,
        weapon: Default::default(),
        score: id as i64,
        loaded_ammo: 0,
        reload_cooldown: 0,
    }
}

/// Frames where player 1 walks right by 100 per frame and player 2 stands still.
fn walking_frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame {
            radius: 1000.0 - i as f64,
            players: vec![
                player(1, 100.0 * i as f64, 0.0, 100),
                player(2, 0.0, 300.0, 100),
            ],
            ..Frame::default()
        })
        .collect()
}

fn loaded_viewer(frames: Vec<Frame>) -> (Viewer, RecordingSurface) {
    let mut surface = RecordingSurface::default();
    let mut viewer = Viewer::new(ViewerConfig::default(), CANVAS);
    viewer.load(ArenaMap::default(), frames, 0, &mut surface, &mut MuteAudio);
    (viewer, surface)
}

#[test]
fn load_presents_first_frame_once() {
    let (viewer, surface) = loaded_viewer(walking_frames(5));
    assert_eq!(surface.frames_drawn, 1);
    assert_eq!(viewer.director().present_count(), 1);
    assert_eq!(surface.radius, Some(1000.0));
    assert!(surface.map.is_some());
    assert!(!viewer.clock().is_playing());
}

#[test]
fn autoplay_starts_after_load() {
    let mut surface = RecordingSurface::default();
    let config = ViewerConfig {
        autoplay: true,
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config, CANVAS);
    viewer.load(ArenaMap::default(), walking_frames(3), 0, &mut surface, &mut MuteAudio);
    assert!(viewer.clock().is_playing());
}

#[test]
fn seek_presents_target_frame_exactly_once() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(5));
    assert_eq!(viewer.seek(3, 10, &mut surface, &mut MuteAudio), Some(3));
    assert_eq!(surface.frames_drawn, 2);
    assert_eq!(surface.radius, Some(997.0));
    assert_eq!(surface.players[&1].0.x, 300.0);
}

#[test]
fn commands_that_move_are_rejected_while_playing() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(5));
    assert!(viewer.start(0));
    assert_eq!(viewer.seek(3, 10, &mut surface, &mut MuteAudio), None);
    assert_eq!(viewer.step(1, 10, &mut surface, &mut MuteAudio), None);
    assert!(!viewer.pan(5.0, 5.0, 10));
    assert!(!viewer.zoom(1.1, 10));
    assert_eq!(surface.frames_drawn, 1);
    assert_eq!(viewer.clock().current_index(), 0);
}

#[test]
fn playback_presents_each_frame_and_stops() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(3));
    viewer.start(0);

    assert!(viewer.poll(250, &mut surface, &mut MuteAudio));
    assert_eq!(viewer.clock().current_index(), 1);
    assert_eq!(surface.frames_drawn, 2);

    viewer.poll(400, &mut surface, &mut MuteAudio);
    assert_eq!(surface.frames_drawn, 2);

    viewer.poll(500, &mut surface, &mut MuteAudio);
    assert_eq!(viewer.clock().current_index(), 2);
    assert!(!viewer.clock().is_playing());
    assert_eq!(surface.frames_drawn, 3);
}

#[test]
fn positions_tween_over_frame_interval() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(3));
    viewer.step(1, 1_000, &mut surface, &mut MuteAudio);

    let start = viewer.director().player_position(1, 1_000).unwrap();
    assert_eq!(start, Position::new(0.0, 0.0));
    let mid = viewer.director().player_position(1, 1_125).unwrap();
    assert!(mid.x > 0.0 && mid.x < 100.0);
    let end = viewer.director().player_position(1, 1_250).unwrap();
    assert_eq!(end, Position::new(100.0, 0.0));

    viewer.poll(1_250, &mut surface, &mut MuteAudio);
    assert_eq!(surface.positions[&1], Position::new(100.0, 0.0));
    assert!(!viewer.director().is_animating());
}

#[test]
fn newer_frame_supersedes_running_tween() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(3));
    viewer.step(1, 1_000, &mut surface, &mut MuteAudio);
    // Halfway through the 0 -> 100 tween, jump on to frame 2.
    viewer.step(1, 1_100, &mut surface, &mut MuteAudio);

    let from = viewer.director().player_position(1, 1_100).unwrap();
    assert_eq!(from, Position::new(100.0, 0.0));
    let end = viewer.director().player_position(1, 1_350).unwrap();
    assert_eq!(end, Position::new(200.0, 0.0));
}

#[test]
fn new_players_appear_without_tween() {
    let mut frames = walking_frames(2);
    frames[1].players.push(player(7, -50.0, 40.0, 100));
    let (mut viewer, mut surface) = loaded_viewer(frames);
    viewer.step(1, 0, &mut surface, &mut MuteAudio);
    assert_eq!(
        viewer.director().player_position(7, 0),
        Some(Position::new(-50.0, 40.0))
    );
}

#[test]
fn seeking_back_removes_players_absent_from_frame() {
    let mut frames = walking_frames(2);
    frames[1].players.push(player(7, -50.0, 40.0, 100));
    frames[1].shootings.push(Shooting {
        player_id: 1,
        target_id: 7,
    });

    let mut scene = Scene::new();
    let mut viewer = Viewer::new(ViewerConfig::default(), CANVAS);
    viewer.load(ArenaMap::default(), frames, 0, &mut scene, &mut MuteAudio);
    viewer.seek(1, 10, &mut scene, &mut MuteAudio);
    assert!(scene.sprite(7).is_some());

    viewer.seek(0, 20, &mut scene, &mut MuteAudio);
    let ids: Vec<u32> = scene.sprites().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
    let board: Vec<u32> = scene.scoreboard().iter().map(|r| r.id).collect();
    assert_eq!(board, vec![2, 1]);
    assert!(scene.shootings().is_empty());
    assert_eq!(viewer.director().player_position(7, 20), None);
}

#[test]
fn camera_settles_on_fit_of_current_frame() {
    let frames = walking_frames(3);
    let expected = fit_view(&frames[0].players, FitParams::default(), CANVAS).unwrap();
    let (mut viewer, mut surface) = loaded_viewer(frames);

    assert_eq!(viewer.director().target_view(), expected);
    viewer.poll(250, &mut surface, &mut MuteAudio);
    assert_eq!(viewer.view_at(250), expected);
    assert_eq!(surface.view, Some(expected));
}

#[test]
fn camera_keeps_viewport_when_everyone_is_defeated() {
    let mut frames = walking_frames(2);
    for p in &mut frames[1].players {
        p.health = 0;
    }
    let (mut viewer, mut surface) = loaded_viewer(frames);
    let before = viewer.director().target_view();
    viewer.step(1, 0, &mut surface, &mut MuteAudio);
    assert_eq!(viewer.director().target_view(), before);
}

#[test]
fn players_get_palette_colors() {
    let (_, surface) = loaded_viewer(walking_frames(1));
    let palette = Palette::new();
    assert_eq!(surface.players[&1].1, palette.color_for(1));
    assert_eq!(surface.players[&2].1, palette.color_for(2));
}

#[test]
fn pan_and_zoom_cancel_camera_tween() {
    let (mut viewer, _) = loaded_viewer(walking_frames(2));
    assert!(viewer.director().is_animating());
    let before = viewer.view_at(0);

    assert!(viewer.pan(10.0, -5.0, 0));
    let panned = viewer.view_at(0);
    assert_eq!(panned.offset_x, before.offset_x + 10.0);
    assert_eq!(panned.offset_y, before.offset_y - 5.0);
    assert_eq!(viewer.director().target_view(), panned);

    assert!(viewer.zoom(2.0, 0));
    assert!((viewer.view_at(0).scale - before.scale * 2.0).abs() < 1e-9);
}

#[test]
fn yaps_play_once_while_caption_is_visible() {
    let mut frames = walking_frames(3);
    for f in &mut frames {
        f.yaps = vec!["gg".to_string()];
    }
    let mut captions = Captions::default();
    let mut surface = RecordingSurface::default();
    let mut viewer = Viewer::new(ViewerConfig::default(), CANVAS);
    viewer.load(ArenaMap::default(), frames, 0, &mut surface, &mut captions);

    viewer.step(1, 100, &mut surface, &mut captions);
    assert!(captions.is_loaded("gg"));
    assert_eq!(captions.play_count(), 1);
    assert_eq!(captions.active(100), vec!["gg"]);

    viewer.step(1, 5_000, &mut surface, &mut captions);
    assert_eq!(captions.play_count(), 2);
}

#[test]
fn apply_maps_commands_onto_viewer() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(11));
    let mut audio = MuteAudio;

    assert!(viewer.apply(ViewerCommand::SeekPercent(50), 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().current_index(), 5);
    assert!(viewer.apply(ViewerCommand::SeekLast, 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().current_index(), 10);
    assert!(viewer.apply(ViewerCommand::StepBack, 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().current_index(), 9);
    assert!(viewer.apply(ViewerCommand::SeekFirst, 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().current_index(), 0);

    assert!(viewer.apply(ViewerCommand::Faster, 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().frame_speed_ms(), 100);
    assert!(viewer.apply(ViewerCommand::Slower, 0, &mut surface, &mut audio));
    assert!(viewer.apply(ViewerCommand::Slower, 0, &mut surface, &mut audio));
    assert_eq!(viewer.clock().frame_speed_ms(), 500);

    assert!(viewer.apply(ViewerCommand::TogglePlay, 0, &mut surface, &mut audio));
    assert!(viewer.clock().is_playing());
    assert!(!viewer.apply(ViewerCommand::StepForward, 0, &mut surface, &mut audio));
    assert!(!viewer.apply(ViewerCommand::Play, 0, &mut surface, &mut audio));
    assert!(viewer.apply(ViewerCommand::Pause, 0, &mut surface, &mut audio));
    assert!(!viewer.clock().is_playing());
}

#[test]
fn resize_snaps_camera_to_new_canvas() {
    let frames = walking_frames(2);
    let small = Canvas::new(100.0, 40.0);
    let expected = fit_view(&frames[0].players, FitParams::default(), small).unwrap();
    let (mut viewer, _) = loaded_viewer(frames);
    viewer.resize(small, 10);
    assert_eq!(viewer.view_at(10), expected);
}

#[test]
fn next_wakeup_follows_animation_then_schedule() {
    let (mut viewer, mut surface) = loaded_viewer(walking_frames(3));
    assert_eq!(viewer.next_wakeup_ms(0), Some(0));
    viewer.poll(250, &mut surface, &mut MuteAudio);
    assert_eq!(viewer.next_wakeup_ms(250), None);
    viewer.start(300);
    assert_eq!(viewer.next_wakeup_ms(300), Some(250));
}
