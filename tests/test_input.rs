use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use archery::config::Timing;
use archery::input::*;

/// 0.6 s at 30 fps.
const HOLD: u64 = 18;

fn enhanced() -> KeyTracker {
    KeyTracker::new(true, HOLD)
}

fn plain() -> KeyTracker {
    KeyTracker::new(false, HOLD)
}

fn press(key: Key) -> (Key, KeyEventKind) {
    (key, KeyEventKind::Press)
}

fn repeat(key: Key) -> (Key, KeyEventKind) {
    (key, KeyEventKind::Repeat)
}

fn release(key: Key) -> (Key, KeyEventKind) {
    (key, KeyEventKind::Release)
}

// ── translate ─────────────────────────────────────────────────────────────────

#[test]
fn game_keys_are_translated() {
    let cases = [
        (KeyCode::Char(' '), Key::Charge),
        (KeyCode::Up, Key::Up),
        (KeyCode::Down, Key::Down),
        (KeyCode::Enter, Key::Confirm),
        (KeyCode::Esc, Key::Escape),
    ];
    for (code, key) in cases {
        let event = KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(translate(&event), RawInput::Key(key, KeyEventKind::Press));
    }
}

#[test]
fn release_kind_is_kept() {
    let event = KeyEvent::new_with_kind(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(translate(&event), RawInput::Key(Key::Charge, KeyEventKind::Release));
}

#[test]
fn ctrl_c_requests_close() {
    let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(translate(&event), RawInput::CloseRequested);
}

#[test]
fn other_keys_are_ignored() {
    for code in [KeyCode::Char('c'), KeyCode::Char('q'), KeyCode::Left, KeyCode::Tab] {
        assert_eq!(translate(&KeyEvent::new(code, KeyModifiers::NONE)), RawInput::Ignored);
    }
}

// ── KeyTracker with release reporting ─────────────────────────────────────────

#[test]
fn press_then_release() {
    let mut t = enhanced();
    assert_eq!(t.frame(&[press(Key::Charge)]), vec![InputEvent::Pressed(Key::Charge)]);
    assert!(t.frame(&[]).is_empty());
    assert_eq!(t.frame(&[release(Key::Charge)]), vec![InputEvent::Released(Key::Charge)]);
    assert!(t.frame(&[]).is_empty());
}

#[test]
fn repeats_do_not_press_again() {
    let mut t = enhanced();
    t.frame(&[press(Key::Down)]);
    assert!(t.frame(&[repeat(Key::Down), repeat(Key::Down)]).is_empty());
    assert!(t.frame(&[press(Key::Down)]).is_empty());
}

#[test]
fn held_key_never_expires_when_releases_are_reported() {
    let mut t = enhanced();
    t.frame(&[press(Key::Charge)]);
    for _ in 0..(HOLD * 3) {
        assert!(t.frame(&[]).is_empty());
    }
    assert_eq!(t.frame(&[release(Key::Charge)]), vec![InputEvent::Released(Key::Charge)]);
}

#[test]
fn release_in_same_frame_as_press_is_deferred() {
    let mut t = enhanced();
    assert_eq!(
        t.frame(&[press(Key::Confirm), release(Key::Confirm)]),
        vec![InputEvent::Pressed(Key::Confirm)]
    );
    assert_eq!(t.frame(&[]), vec![InputEvent::Released(Key::Confirm)]);
    assert!(t.frame(&[]).is_empty());
}

#[test]
fn tap_followed_by_press_next_frame_stays_split() {
    let mut t = enhanced();
    assert_eq!(
        t.frame(&[press(Key::Charge), release(Key::Charge)]),
        vec![InputEvent::Pressed(Key::Charge)]
    );
    assert_eq!(t.frame(&[press(Key::Charge)]), vec![InputEvent::Released(Key::Charge)]);
    assert_eq!(t.frame(&[]), vec![InputEvent::Pressed(Key::Charge)]);
    assert!(t.frame(&[]).is_empty());
}

#[test]
fn rapid_taps_in_one_frame_are_spread_out() {
    let mut t = enhanced();
    let raw = [
        press(Key::Charge),
        release(Key::Charge),
        press(Key::Charge),
        release(Key::Charge),
    ];
    let mut seen = Vec::new();
    for frame in 0..6 {
        let batch = if frame == 0 { t.frame(&raw) } else { t.frame(&[]) };
        assert!(batch.len() <= 1, "frame {frame}: {batch:?}");
        seen.extend(batch);
    }
    assert_eq!(
        seen,
        vec![
            InputEvent::Pressed(Key::Charge),
            InputEvent::Released(Key::Charge),
            InputEvent::Pressed(Key::Charge),
            InputEvent::Released(Key::Charge),
        ]
    );
}

#[test]
fn stray_release_is_dropped() {
    let mut t = enhanced();
    assert!(t.frame(&[release(Key::Escape)]).is_empty());
}

#[test]
fn keys_are_tracked_independently() {
    let mut t = enhanced();
    t.frame(&[press(Key::Charge)]);
    assert_eq!(
        t.frame(&[press(Key::Up), release(Key::Charge)]),
        vec![InputEvent::Pressed(Key::Up), InputEvent::Released(Key::Charge)]
    );
    assert_eq!(t.frame(&[release(Key::Up)]), vec![InputEvent::Released(Key::Up)]);
}

// ── KeyTracker without release reporting ──────────────────────────────────────

#[test]
fn silent_key_expires_after_hold_window() {
    let mut t = plain();
    t.frame(&[press(Key::Charge)]);
    for _ in 0..HOLD {
        assert!(t.frame(&[]).is_empty());
    }
    assert_eq!(t.frame(&[]), vec![InputEvent::Released(Key::Charge)]);
    assert!(t.frame(&[]).is_empty());
}

#[test]
fn repeats_keep_key_held() {
    let mut t = plain();
    t.frame(&[press(Key::Charge)]);
    for _ in 0..(HOLD * 2) {
        assert!(t.frame(&[repeat(Key::Charge)]).is_empty());
    }
}

#[test]
fn held_key_survives_repeat_delay_at_60_fps() {
    // OS key repeat starts ~500 ms after the press: frame 31 at 60 fps
    let timing = Timing::new(60, 0.7, 1.0).expect("valid timing");
    let mut t = KeyTracker::new(false, timing.hold_frames());
    let mut seen = Vec::new();
    for frame in 1..=120u64 {
        let raw = match frame {
            1 => vec![press(Key::Charge)],
            _ if frame >= 31 && frame % 2 == 1 => vec![repeat(Key::Charge)],
            _ => vec![],
        };
        seen.extend(t.frame(&raw).into_iter().map(|event| (frame, event)));
    }
    assert_eq!(seen, vec![(1, InputEvent::Pressed(Key::Charge))]);
}

#[test]
fn expired_keys_released_in_key_order() {
    let mut t = plain();
    t.frame(&[press(Key::Escape), press(Key::Charge)]);
    for _ in 0..HOLD {
        t.frame(&[]);
    }
    assert_eq!(
        t.frame(&[]),
        vec![InputEvent::Released(Key::Charge), InputEvent::Released(Key::Escape)]
    );
}
