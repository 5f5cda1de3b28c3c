//! Integration tests for the typing gate
//!
//! These tests exercise the full App pipeline: key signals and terminal
//! events through the gate, the reveal phase machine, input-mode rules,
//! and the mouse path against the shared layout geometry.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use keyboard_gate::config::{BackdropMode, Config};
use keyboard_gate::gate::RevealPhase;
use keyboard_gate::keys::layout::{GateLayout, KEY_GAP, LAYOUT};
use keyboard_gate::keys::{GateKey, InputMode, KeySignal};
use keyboard_gate::ui::{App, AppState};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app_at(now: Instant) -> App {
    App::new(Config::default(), now)
}

/// Press and release a key through the physical signal path
fn tap(app: &mut App, key: GateKey, at: Instant) {
    app.process_signal(KeySignal::press(key, at));
    app.process_signal(KeySignal::release(key, at));
}

fn type_word(app: &mut App, word: &str, at: Instant) {
    for c in word.chars() {
        tap(app, GateKey::from_char(c).unwrap(), at);
    }
}

fn buffer(app: &App) -> String {
    app.gate.as_ref().unwrap().buffer().to_string()
}

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn key_press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

/// Screen center of the cap carrying `key`, for mouse events
fn cap_center(area: Rect, key: GateKey) -> (u16, u16) {
    for (i, row) in LAYOUT.rows().iter().enumerate() {
        let mut x = GateLayout::row_origin_x(area, row);
        for def in row {
            if def.action == Some(key) {
                return (x + def.size.width() / 2, area.y + i as u16);
            }
            x += def.size.width() + KEY_GAP;
        }
    }
    panic!("key not on layout: {key:?}");
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Click a cap on the on-screen keyboard (down then up)
fn click(app: &mut App, key: GateKey, at: Instant) {
    let area = app.keyboard_area.expect("keyboard area must be set");
    let (column, row) = cap_center(area, key);
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row), at);
    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), column, row), at);
}

// ---------------------------------------------------------------------------
// Unlock flow and reveal phases
// ---------------------------------------------------------------------------

#[test]
fn typing_the_passphrase_unlocks_and_swaps() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.tick(t0 + Duration::from_millis(150));
    assert!(app.shell.gate_faded_in());

    let t_unlock = t0 + Duration::from_millis(200);
    type_word(&mut app, "yesh", t_unlock);
    tap(&mut app, GateKey::Enter, t_unlock);

    // The fade-out is observable immediately, before any tick or draw.
    assert!(app.shell.gate_fading_out());
    // The gate stays mounted through the fade-out, hints do not.
    assert!(app.gate.is_some());
    assert!(app.current_hint().is_none());

    app.tick(t0 + Duration::from_millis(699));
    assert!(app.shell.shows_gate());
    assert!(app.gate.is_some());

    // Swap at unlock + 500ms: content appears, gate is gone.
    app.tick(t0 + Duration::from_millis(700));
    assert!(app.shell.shows_content());
    assert!(app.shell.content_transitioning());
    assert!(app.gate.is_none());
    assert!(app.keyboard_area.is_none());

    // Settle at swap + 700ms.
    app.tick(t0 + Duration::from_millis(1400));
    assert_eq!(app.shell.phase(), RevealPhase::ContentSettled);
}

#[test]
fn input_after_unlock_never_schedules_a_second_swap() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    app.tick(t0 + Duration::from_millis(150));

    let t_unlock = t0 + Duration::from_millis(200);
    type_word(&mut app, "yesh", t_unlock);
    tap(&mut app, GateKey::Enter, t_unlock);

    // More typing and another submit while the fade-out runs.
    type_word(&mut app, "yesh", t_unlock + Duration::from_millis(100));
    tap(&mut app, GateKey::Enter, t_unlock + Duration::from_millis(100));

    app.tick(t_unlock + Duration::from_millis(499));
    assert!(app.shell.shows_gate());
    app.tick(t_unlock + Duration::from_millis(500));
    assert!(app.shell.shows_content());
}

#[test]
fn skip_mode_starts_settled() {
    let mut config = Config::default();
    config.gate.skip = true;
    let t0 = Instant::now();
    let mut app = App::new(config, t0);

    assert_eq!(app.shell.phase(), RevealPhase::ContentSettled);
    assert!(app.gate.is_none());
    assert!(app.current_hint().is_none());
    assert!(!app.wants_physical_input());
}

// ---------------------------------------------------------------------------
// Error lifecycle
// ---------------------------------------------------------------------------

#[test]
fn wrong_submit_shows_error_then_clears_on_deadline() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let t1 = t0 + Duration::from_millis(300);

    type_word(&mut app, "nope", t1);
    tap(&mut app, GateKey::Enter, t1);
    assert!(app.gate.as_ref().unwrap().error_active());
    assert_eq!(buffer(&app), "");

    app.tick(t1 + Duration::from_millis(1999));
    assert!(app.gate.as_ref().unwrap().error_active());

    app.tick(t1 + Duration::from_millis(2000));
    assert!(!app.gate.as_ref().unwrap().error_active());
}

#[test]
fn next_character_clears_error_early() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let t1 = t0 + Duration::from_millis(300);

    tap(&mut app, GateKey::Enter, t1);
    assert!(app.gate.as_ref().unwrap().error_active());

    tap(&mut app, GateKey::Char('y'), t1 + Duration::from_millis(50));
    assert!(!app.gate.as_ref().unwrap().error_active());
    assert_eq!(buffer(&app), "y");
}

#[test]
fn second_mismatch_restarts_the_error_window() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let t1 = t0 + Duration::from_millis(300);

    tap(&mut app, GateKey::Enter, t1);
    tap(&mut app, GateKey::Enter, t1 + Duration::from_millis(1000));

    // The first deadline would have fired at t1 + 2000.
    app.tick(t1 + Duration::from_millis(2500));
    assert!(app.gate.as_ref().unwrap().error_active());

    app.tick(t1 + Duration::from_millis(3000));
    assert!(!app.gate.as_ref().unwrap().error_active());
}

// ---------------------------------------------------------------------------
// Quit keys
// ---------------------------------------------------------------------------

#[test]
fn typed_q_is_a_character_while_the_gate_is_up() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(key_press(KeyCode::Char('q')), t0);

    assert_eq!(app.state, AppState::Running);
    assert_eq!(buffer(&app), "q");
}

#[test]
fn q_quits_once_content_is_settled() {
    let mut config = Config::default();
    config.gate.skip = true;
    let t0 = Instant::now();
    let mut app = App::new(config, t0);

    app.handle_event(key_press(KeyCode::Char('q')), t0);
    assert_eq!(app.state, AppState::Quitting);
}

#[test]
fn esc_quits_from_the_gate() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(key_press(KeyCode::Esc), t0);
    assert_eq!(app.state, AppState::Quitting);
}

#[test]
fn ctrl_c_quits_and_is_never_typed() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        t0,
    );

    assert_eq!(app.state, AppState::Quitting);
    assert_eq!(buffer(&app), "");
}

#[test]
fn alt_chords_pass_the_gate_by() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(
        Event::Key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::ALT)),
        t0,
    );

    assert_eq!(app.state, AppState::Running);
    assert_eq!(buffer(&app), "");
}

// ---------------------------------------------------------------------------
// Terminal key events (enhanced mode)
// ---------------------------------------------------------------------------

#[test]
fn terminal_events_type_into_the_buffer() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(key_press(KeyCode::Char('y')), t0);
    app.handle_event(key(KeyCode::Char('y'), KeyEventKind::Release), t0);
    app.handle_event(key_press(KeyCode::Char('E')), t0);

    assert_eq!(buffer(&app), "ye");
}

#[test]
fn held_shift_capitalizes_terminal_typing() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let shift = KeyCode::Modifier(ModifierKeyCode::LeftShift);

    app.handle_event(key_press(shift), t0);
    app.handle_event(key_press(KeyCode::Char('y')), t0);
    app.handle_event(key(KeyCode::Char('y'), KeyEventKind::Release), t0);
    app.handle_event(key(shift, KeyEventKind::Release), t0);
    app.handle_event(key_press(KeyCode::Char('e')), t0);

    assert_eq!(buffer(&app), "Ye");
}

#[test]
fn key_repeat_appends_repeated_characters() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(key_press(KeyCode::Char('s')), t0);
    app.handle_event(key(KeyCode::Char('s'), KeyEventKind::Repeat), t0);
    app.handle_event(key(KeyCode::Char('s'), KeyEventKind::Repeat), t0);

    assert_eq!(buffer(&app), "sss");
}

// ---------------------------------------------------------------------------
// Input modes
// ---------------------------------------------------------------------------

#[test]
fn polled_mode_takes_typing_from_the_device_stream_only() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    app.set_input_mode(InputMode::Polled);

    // Terminal key events would double every press; only control keys count.
    app.handle_event(key_press(KeyCode::Char('y')), t0);
    assert_eq!(buffer(&app), "");

    app.process_signal(KeySignal::press(GateKey::Char('y'), t0));
    assert_eq!(buffer(&app), "y");

    app.handle_event(key_press(KeyCode::Esc), t0);
    assert_eq!(app.state, AppState::Quitting);
}

#[test]
fn press_only_mode_expires_held_keys() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    app.set_input_mode(InputMode::PressOnly);

    app.handle_event(key_press(KeyCode::Char('y')), t0);
    assert!(app.gate.as_ref().unwrap().is_pressed(GateKey::Char('y')));

    app.tick(t0 + Duration::from_millis(300));
    assert!(!app.gate.as_ref().unwrap().is_pressed(GateKey::Char('y')));
    // The typed character itself stays.
    assert_eq!(buffer(&app), "y");
}

// ---------------------------------------------------------------------------
// Focus guard
// ---------------------------------------------------------------------------

#[test]
fn focus_loss_discards_physical_signals() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.handle_event(Event::FocusLost, t0);
    app.process_signal(KeySignal::press(GateKey::Char('y'), t0));
    assert_eq!(buffer(&app), "");

    app.handle_event(Event::FocusGained, t0);
    app.process_signal(KeySignal::press(GateKey::Char('y'), t0));
    assert_eq!(buffer(&app), "y");
}

#[test]
fn focus_loss_drops_held_keys() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.process_signal(KeySignal::press(GateKey::Shift, t0));
    app.process_signal(KeySignal::press(GateKey::Char('g'), t0));
    assert!(app.gate.as_ref().unwrap().shift_active());

    app.handle_event(Event::FocusLost, t0);
    assert!(!app.gate.as_ref().unwrap().shift_active());
    assert!(!app.gate.as_ref().unwrap().is_pressed(GateKey::Char('g')));
}

// ---------------------------------------------------------------------------
// Mouse path
// ---------------------------------------------------------------------------

#[test]
fn clicking_the_passphrase_unlocks() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    app.keyboard_area = Some(Rect::new(0, 0, 80, 5));

    for c in "yesh".chars() {
        click(&mut app, GateKey::Char(c), t0);
    }
    click(&mut app, GateKey::Enter, t0);

    assert!(app.shell.gate_fading_out());
}

#[test]
fn clicked_shift_is_sticky_for_one_character() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    app.keyboard_area = Some(Rect::new(0, 0, 80, 5));

    click(&mut app, GateKey::Shift, t0);
    click(&mut app, GateKey::Char('y'), t0);
    click(&mut app, GateKey::Char('e'), t0);

    assert_eq!(buffer(&app), "Ye");
}

#[test]
fn clicks_between_caps_hit_nothing() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let area = Rect::new(0, 0, 80, 5);
    app.keyboard_area = Some(area);

    // One column right of the first cap on the digit row is a gap.
    let row = &LAYOUT.rows()[0];
    let gap_x = GateLayout::row_origin_x(area, row) + row[0].size.width();
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), gap_x, 0), t0);

    assert_eq!(buffer(&app), "");
    assert!(app.gate.as_ref().unwrap().pressed().is_empty());
}

#[test]
fn mouse_release_lifts_the_clicked_cap() {
    let t0 = Instant::now();
    let mut app = app_at(t0);
    let area = Rect::new(0, 0, 80, 5);
    app.keyboard_area = Some(area);

    let (column, row) = cap_center(area, GateKey::Char('y'));
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row), t0);
    assert!(app.gate.as_ref().unwrap().is_pressed(GateKey::Char('y')));

    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), column, row), t0);
    assert!(!app.gate.as_ref().unwrap().is_pressed(GateKey::Char('y')));
}

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

#[test]
fn hint_cycle_walks_the_passphrase() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    assert_eq!(app.current_hint(), Some(GateKey::Char('y')));

    app.tick(t0 + Duration::from_millis(600));
    assert_eq!(app.current_hint(), Some(GateKey::Char('e')));
}

#[test]
fn hints_stop_for_good_after_their_cycles() {
    let t0 = Instant::now();
    let mut app = app_at(t0);

    app.tick(t0 + Duration::from_millis(7100));
    assert_eq!(app.current_hint(), None);

    app.tick(t0 + Duration::from_millis(9000));
    assert_eq!(app.current_hint(), None);
}

// ---------------------------------------------------------------------------
// Backdrop
// ---------------------------------------------------------------------------

#[test]
fn backdrop_is_built_lazily_and_outlives_the_gate() {
    let mut config = Config::default();
    config.gate.backdrop = BackdropMode::AnimatedKeyboard;
    let t0 = Instant::now();
    let mut app = App::new(config, t0);

    assert!(app.backdrop.is_none());
    app.tick(t0 + Duration::from_millis(150));
    assert!(app.backdrop.is_some());

    let t_unlock = t0 + Duration::from_millis(200);
    type_word(&mut app, "yesh", t_unlock);
    tap(&mut app, GateKey::Enter, t_unlock);
    app.tick(t0 + Duration::from_millis(700));

    assert!(app.gate.is_none());
    assert!(app.backdrop.is_some());
    // The echo keeps flowing after the swap.
    app.process_signal(KeySignal::press(GateKey::Char('k'), t0 + Duration::from_millis(800)));
}
