//! Keyboard Gate - terminal typing gate with an animated keyboard reveal
//!
//! Shows an on-screen keyboard, waits for the passphrase, then crossfades
//! into the portfolio content.

use std::io::{stdout, Stdout};
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame, Terminal,
};

use keyboard_gate::{
    config::Config,
    keys::{layout::LAYOUT, InputMode, PhysicalInput},
    ui::{centered_rect, App, AppState, ErrorBanner, GateKeyboard, KeyboardView, PortfolioContent},
};

fn main() -> Result<()> {
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("config unavailable ({err}); using defaults");
            Config::default()
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;

    // Request kitty keyboard protocol enhancements: REPORT_EVENT_TYPES for
    // release edges, DISAMBIGUATE_ESCAPE_CODES + REPORT_ALL_KEYS_AS_ESCAPE_CODES
    // for caps lock and standalone shift keys. Unsupported terminals make the
    // execute! fail and we fall back to OS polling or press-only input.
    let keyboard_enhanced = execute!(
        stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        )
    )
    .is_ok();

    install_panic_hook(keyboard_enhanced);

    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    // Create application and pick the input arrangement
    let mut app = App::new(config, Instant::now());
    let input_mode = if keyboard_enhanced {
        InputMode::Enhanced
    } else if app.wants_physical_input() {
        match PhysicalInput::try_new() {
            Some(physical) => {
                app.attach_physical(physical);
                InputMode::Polled
            }
            None => InputMode::PressOnly,
        }
    } else {
        InputMode::PressOnly
    };
    app.set_input_mode(input_mode);
    log::info!("input source: {}", input_mode.name());

    let result = run(&mut terminal, &mut app);

    restore_terminal(keyboard_enhanced);

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = app.config.refresh_interval();

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(tick_rate)? {
            app.handle_event(event::read()?, Instant::now());
        }

        if app.state == AppState::Quitting {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.colors.bg)), area);

    // Backdrop first, pinned to the bottom edge, so the foreground screens
    // paint over it
    if let Some(backdrop) = &app.backdrop {
        let height = LAYOUT.height().min(area.height);
        let y = area.y + area.height.saturating_sub(height + 1);
        let strip = Rect::new(area.x, y, area.width, height);
        frame.render_widget(backdrop.widget(&app.colors), strip);
    }

    if app.shell.shows_gate() {
        if let Some(gate) = &app.gate {
            let dimmed = !app.shell.gate_faded_in();
            let kb = centered_rect(LAYOUT.width(), LAYOUT.height(), area);
            app.keyboard_area = Some(kb);

            let view = KeyboardView {
                pressed: gate.pressed(),
                hint: app.current_hint(),
                caps_lock: gate.caps_lock(),
                shift: gate.shift_active(),
            };
            frame.render_widget(GateKeyboard::new(view, &app.colors).dimmed(dimmed), kb);

            if gate.error_active() {
                let y = kb.y + kb.height + 1;
                if y < area.y + area.height {
                    let line = Rect::new(area.x, y, area.width, 1);
                    frame.render_widget(
                        ErrorBanner::new("Try again...", &app.colors).dimmed(dimmed),
                        line,
                    );
                }
            }
        }
    }

    if app.shell.shows_content() {
        let content =
            PortfolioContent::new(&app.colors).dimmed(app.shell.content_transitioning());
        frame.render_widget(content, area);
    }
}

/// Put the terminal back the way we found it; every step is best-effort
/// so a failed one never skips the rest
fn restore_terminal(keyboard_enhanced: bool) {
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(out, DisableFocusChange, DisableMouseCapture);
    let _ = execute!(out, crossterm::cursor::Show);
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Restore the terminal before the default panic output, so the message
/// lands on a usable screen instead of the alternate one
fn install_panic_hook(keyboard_enhanced: bool) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(keyboard_enhanced);
        previous(info);
    }));
}
