//! Integration tests for Keyboard Tester
//!
//! These tests drive the full App pipeline: key events through the
//! classifier, text entry, statistics ticks, layout switching and export.

use crossterm::event::{
    KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
};
use keyboard_tester::config::Config;
use keyboard_tester::keyboard::{
    KeyEvent, KeyEventType, KeyId, KeyStatus, KeyboardLayout, KeyboardListener, TestPhase,
};
use keyboard_tester::ui::{App, AppState, AppView, Control};
use std::sync::mpsc;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key(name: &str) -> KeyId {
    KeyId::parse(name).expect("valid key name")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn press(app: &mut App, name: &str, at: Instant) {
    app.process_event(&KeyEvent::new(key(name), KeyEventType::Press, at));
}

fn release(app: &mut App, name: &str, at: Instant) {
    app.process_event(&KeyEvent::new(key(name), KeyEventType::Release, at));
}

/// Press and release a key at `at`
fn tap(app: &mut App, name: &str, at: Instant) {
    press(app, name, at);
    release(app, name, at);
}

/// Tap each key 300ms apart, starting at `start`
fn tap_all(app: &mut App, names: &[&str], start: Instant) -> Instant {
    let mut at = start;
    for name in names {
        tap(app, name, at);
        at += ms(300);
    }
    at
}

fn ct_key(code: CtKeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CtKeyEvent {
    CtKeyEvent {
        code,
        modifiers,
        kind,
        state: KeyEventState::NONE,
    }
}

/// Type text into the Text tab the way the terminal loop does
fn type_text(app: &mut App, text: &str, at: Instant) {
    for c in text.chars() {
        let code = if c == '\n' {
            CtKeyCode::Enter
        } else {
            CtKeyCode::Char(c)
        };
        let event = ct_key(code, KeyModifiers::NONE, KeyEventKind::Press);
        assert!(app.handle_text_key(&event, false, at));
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("keyboard-tester-{}-{}", std::process::id(), name))
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn first_press_starts_session() {
    let mut app = App::default();
    assert_eq!(app.keyboard_state.phase(), TestPhase::Idle);

    let t0 = Instant::now();
    tap(&mut app, "a", t0);

    assert_eq!(app.keyboard_state.phase(), TestPhase::Active);
    assert_eq!(app.keyboard_state.session_start(), Some(t0));
    assert_eq!(app.keyboard_state.last_pressed(), Some(&key("a")));
    assert_eq!(app.keyboard_state.total_presses(), 1);
}

#[test]
fn double_press_within_window() {
    let mut app = App::default();
    let t0 = Instant::now();

    tap(&mut app, "a", t0);
    tap(&mut app, "a", t0 + ms(150));
    assert!(app.keyboard_state.double_pressed_keys().contains(&key("a")));

    tap(&mut app, "b", t0 + ms(1000));
    tap(&mut app, "b", t0 + ms(1200));
    assert!(!app.keyboard_state.double_pressed_keys().contains(&key("b")));
}

#[test]
fn held_key_forms_combination() {
    let mut app = App::default();
    let t0 = Instant::now();

    press(&mut app, "ctrl", t0);
    press(&mut app, "c", t0 + ms(50));
    assert_eq!(app.keyboard_state.combination_labels(), vec!["ctrl+c"]);
    assert_eq!(app.keyboard_state.key_status(&key("c")), KeyStatus::Simultaneous);

    release(&mut app, "c", t0 + ms(80));
    release(&mut app, "ctrl", t0 + ms(90));
    assert!(app.keyboard_state.held_keys().is_empty());

    // Same chord again adds nothing new
    press(&mut app, "ctrl", t0 + ms(500));
    press(&mut app, "c", t0 + ms(550));
    assert_eq!(app.keyboard_state.combinations().len(), 1);
}

#[test]
fn aliases_count_as_one_key() {
    let mut app = App::default();
    let t0 = Instant::now();
    tap(&mut app, "Spacebar", t0);
    tap(&mut app, " ", t0 + ms(500));
    tap(&mut app, "Escape", t0 + ms(1000));
    tap(&mut app, "esc", t0 + ms(1500));

    assert_eq!(app.keyboard_state.pressed_keys().len(), 2);
    assert_eq!(app.keyboard_state.total_presses(), 4);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[test]
fn completing_sixty_percent_layout_celebrates_once() {
    let mut app = App::default();
    app.select_layout(KeyboardLayout::Sixty);

    let mut keys: Vec<KeyId> = KeyboardLayout::Sixty.grid_keys().into_iter().collect();
    // The grid is short of the expected count; any keys make up the rest
    for extra in ["f1", "f2", "f3", "f4"] {
        keys.push(key(extra));
    }
    assert_eq!(keys.len(), KeyboardLayout::Sixty.expected_keys());

    let t0 = Instant::now();
    let mut completions = 0;
    for (i, k) in keys.iter().enumerate() {
        let at = t0 + ms(300 * i as u64);
        if app.key_down(k.clone(), at).just_completed {
            completions += 1;
        }
        app.key_up(k);
    }

    assert_eq!(completions, 1);
    assert!(app.show_celebration);
    assert_eq!(app.keyboard_state.phase(), TestPhase::Complete);
    assert_eq!(app.keyboard_state.keys_outside_layout().len(), 4);

    // Any further key dismisses the overlay and never re-triggers completion
    let later = t0 + ms(60_000);
    let outcome = app.key_down(key("f5"), later);
    assert!(!outcome.just_completed);
    assert!(!app.show_celebration);
}

#[test]
fn progress_tracks_unique_keys() {
    let mut app = App::default();
    app.select_layout(KeyboardLayout::Sixty);
    tap_all(&mut app, &["q", "w", "e"], Instant::now());
    let expected = 3.0 / KeyboardLayout::Sixty.expected_keys() as f64;
    assert!((app.keyboard_state.progress() - expected).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Reset and layouts
// ---------------------------------------------------------------------------

#[test]
fn reset_clears_everything() {
    let mut app = App::default();
    let t0 = Instant::now();
    press(&mut app, "shift", t0);
    press(&mut app, "a", t0 + ms(10));
    app.next_view();
    type_text(&mut app, "hi", t0 + ms(20));
    app.tick(t0 + ms(2000));

    app.reset();

    assert_eq!(app.keyboard_state.phase(), TestPhase::Idle);
    assert!(app.keyboard_state.pressed_keys().is_empty());
    assert!(app.keyboard_state.held_keys().is_empty());
    assert!(app.keyboard_state.combinations().is_empty());
    assert!(app.keyboard_state.last_pressed().is_none());
    assert!(app.text.is_empty());
    assert_eq!(app.stats.elapsed_secs, 0);
    assert_eq!(app.stats.accuracy, 100);
    assert!(!app.tick(t0 + ms(10_000)));
}

#[test]
fn layout_change_starts_fresh_session() {
    let mut app = App::default();
    assert_eq!(app.layout(), KeyboardLayout::Full);
    tap_all(&mut app, &["a", "b"], Instant::now());

    app.next_layout();

    assert_eq!(app.layout(), KeyboardLayout::Tkl);
    assert!(app.keyboard_state.pressed_keys().is_empty());
    assert!(app.get_status().is_some_and(|s| s.contains("87")));
}

#[test]
fn default_layout_comes_from_config() {
    let mut config = Config::default();
    config.ui.default_layout = KeyboardLayout::SixtyFive;
    let app = App::new(config);
    assert_eq!(app.layout(), KeyboardLayout::SixtyFive);
}

// ---------------------------------------------------------------------------
// Text entry and statistics
// ---------------------------------------------------------------------------

#[test]
fn typing_replays_keys() {
    let mut app = App::default();
    app.next_view();
    let t0 = Instant::now();

    type_text(&mut app, "Hi!", t0);

    assert_eq!(app.text.text(), "Hi!");
    assert_eq!(app.text.errors(), 0);
    for k in ["h", "i", "1"] {
        assert!(app.keyboard_state.pressed_keys().contains(&key(k)));
    }
    // Releases follow immediately without terminal release events
    assert!(app.keyboard_state.held_keys().is_empty());
    assert!(app.keyboard_state.combinations().is_empty());
}

#[test]
fn text_keys_are_ignored_on_visual_tab() {
    let mut app = App::default();
    let event = ct_key(CtKeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Press);
    assert!(!app.handle_text_key(&event, true, Instant::now()));
    assert!(app.text.is_empty());
}

#[test]
fn backspace_edits_buffer_but_is_not_consumed() {
    let mut app = App::default();
    app.view = AppView::Text;
    let t0 = Instant::now();
    type_text(&mut app, "ab", t0);

    let bksp = ct_key(CtKeyCode::Backspace, KeyModifiers::NONE, KeyEventKind::Press);
    assert!(!app.handle_text_key(&bksp, false, t0 + ms(100)));
    assert_eq!(app.text.text(), "a");
}

#[test]
fn replaced_text_counts_errors() {
    let mut app = App::default();
    app.view = AppView::Text;
    let t0 = Instant::now();

    app.text_changed("cat", t0);
    let replayed = app.text_changed("cot", t0 + ms(500));

    assert_eq!(app.text.errors(), 1);
    assert_eq!(replayed, vec![key("o"), key("t")]);
}

#[test]
fn wpm_and_accuracy_after_thirty_seconds() {
    let mut app = App::default();
    app.view = AppView::Text;
    let t0 = Instant::now();

    app.key_down(key("shift"), t0);
    app.key_up(&key("shift"));
    app.text_changed("one two", t0);

    assert!(!app.tick(t0));
    app.refresh_stats(t0);
    assert_eq!(app.stats.elapsed_secs, 0);
    assert_eq!(app.stats.wpm, None);
    assert_eq!(app.stats.wpm_display(), "--");

    assert!(app.tick(t0 + ms(30_000)));
    assert_eq!(app.stats.elapsed_secs, 30);
    assert_eq!(app.stats.wpm, Some(4));
    assert_eq!(app.stats.accuracy, 100);
}

#[test]
fn visual_tab_freezes_wpm_and_accuracy() {
    let mut app = App::default();
    app.view = AppView::Text;
    let t0 = Instant::now();
    app.text_changed("one two", t0);
    app.tick(t0 + ms(30_000));

    app.view = AppView::Visual;
    app.text_changed("one two three four", t0 + ms(31_000));
    app.tick(t0 + ms(60_000));

    assert_eq!(app.stats.elapsed_secs, 60);
    assert_eq!(app.stats.wpm, Some(4));
}

#[test]
fn ticker_waits_for_interval() {
    let mut app = App::default();
    let t0 = Instant::now();
    tap(&mut app, "a", t0);

    assert!(!app.tick(t0));
    assert!(!app.tick(t0 + ms(500)));
    assert!(app.tick(t0 + ms(1000)));
    assert!(!app.tick(t0 + ms(1500)));
    // Missed ticks are skipped, not replayed
    assert!(app.tick(t0 + ms(5200)));
    assert!(!app.tick(t0 + ms(5900)));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_camel_case_json() {
    let mut app = App::default();
    let t0 = Instant::now();
    tap(&mut app, "a", t0);
    tap(&mut app, "a", t0 + ms(100));
    press(&mut app, "shift", t0 + ms(500));
    press(&mut app, "b", t0 + ms(550));
    app.tick(t0 + ms(5000));

    let path = temp_path("export.json");
    app.export_stats_to(&path).expect("export failed");

    let json = std::fs::read_to_string(&path).expect("read export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["layout"], "100%");
    assert_eq!(value["keysPressedCount"], 4);
    assert_eq!(value["uniqueKeysPressedCount"], 3);
    assert_eq!(value["doublePressedKeysCount"], 1);
    assert_eq!(value["simultaneousKeysCount"], 1);
    assert_eq!(value["elapsedTime"], 5);
    assert_eq!(value["accuracy"], 100);
    assert!(app.get_status().is_some_and(|s| s.starts_with("Exported")));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn export_uses_configured_path() {
    let mut config = Config::default();
    config.export.directory = std::env::temp_dir();
    config.export.file_name = format!("keyboard-tester-{}-configured.json", std::process::id());
    let mut app = App::new(config);

    let path = app.export_stats().expect("export failed");
    assert!(path.exists());
    let _ = std::fs::remove_file(&path);
}

// ---------------------------------------------------------------------------
// Listener, controls and navigation
// ---------------------------------------------------------------------------

#[test]
fn listener_feeds_app_through_channel() {
    let (tx, rx) = mpsc::channel();
    let listener = KeyboardListener::new(tx, false);
    let mut app = App::default();
    let now = Instant::now();

    let event = ct_key(CtKeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Press);
    assert_eq!(listener.handle(&event, now), 2);
    while let Ok(ev) = rx.try_recv() {
        app.process_event(&ev);
    }

    assert!(app.keyboard_state.pressed_keys().contains(&key("x")));
    assert!(app.keyboard_state.held_keys().is_empty());
}

#[test]
fn controls_drive_the_app() {
    let mut app = App::default();
    let chord = |c| ct_key(CtKeyCode::Char(c), KeyModifiers::CONTROL, KeyEventKind::Press);

    app.run_control(Control::from_key(&chord('t')).expect("tab control"));
    assert_eq!(app.view, AppView::Text);

    app.run_control(Control::from_key(&chord('l')).expect("layout control"));
    assert_eq!(app.layout(), KeyboardLayout::Tkl);

    app.run_control(Control::from_key(&chord('q')).expect("quit control"));
    assert_eq!(app.state, AppState::Quitting);
}

#[test]
fn view_navigation_wraps() {
    let mut app = App::default();
    assert_eq!(app.view, AppView::Visual);
    app.next_view();
    assert_eq!(app.view, AppView::Text);
    app.next_view();
    assert_eq!(app.view, AppView::Visual);
    app.prev_view();
    assert_eq!(app.view, AppView::Text);
}

#[test]
fn quit_ignores_further_events() {
    let mut app = App::default();
    app.quit();
    tap(&mut app, "a", Instant::now());
    assert!(app.keyboard_state.pressed_keys().is_empty());
}
