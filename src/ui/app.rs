//! Main application state and logic

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

use crate::config::{BackdropMode, Config};
use crate::gate::{strategy_for, GateOutcome, HintStrategy, RevealPhase, RevealShell, TypingGate};
use crate::keys::layout::LAYOUT;
use crate::keys::{GateKey, InputMode, KeySignal, PhysicalInput, PRESS_ONLY_TTL};
use crate::ui::backdrop::Backdrop;
use crate::ui::theme::ThemeColors;

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// Main application
pub struct App {
    /// Configuration
    pub config: Config,
    /// Resolved theme palette
    pub colors: ThemeColors,
    /// Application state
    pub state: AppState,
    /// Active input source arrangement
    pub input_mode: InputMode,
    /// Reveal phase machine
    pub shell: RevealShell,
    /// The typing gate; None once the content swap has happened (or in
    /// skip mode, from the start)
    pub gate: Option<TypingGate>,
    /// Hint strategy; lives and dies with the gate
    pub hints: Option<Box<dyn HintStrategy>>,
    /// Animated keyboard backdrop, built lazily when configured
    pub backdrop: Option<Backdrop>,
    /// Polled physical input source (polled mode only)
    pub physical: Option<PhysicalInput>,
    /// Whether the terminal currently has input focus
    pub focused: bool,
    /// Where the gate keyboard was drawn last frame, for mouse hit-tests
    pub keyboard_area: Option<Rect>,
    /// Key a mouse press is currently holding down on screen
    click_held: Option<GateKey>,
}

impl App {
    pub fn new(config: Config, now: Instant) -> Self {
        let colors = ThemeColors::from_theme(config.ui.theme);
        let (shell, gate, hints) = if config.gate.skip {
            (RevealShell::settled(config.timing.clone()), None, None)
        } else {
            let passphrase = config.gate.effective_passphrase();
            let gate = TypingGate::new(&passphrase, config.timing.error_clear());
            let hints = strategy_for(&config.hints, &passphrase, now);
            (
                RevealShell::new(config.timing.clone(), now),
                Some(gate),
                Some(hints),
            )
        };

        Self {
            config,
            colors,
            state: AppState::Running,
            input_mode: InputMode::Enhanced,
            shell,
            gate,
            hints,
            backdrop: None,
            physical: None,
            focused: true,
            keyboard_area: None,
            click_held: None,
        }
    }

    /// Whether a polled input source would have a consumer
    pub fn wants_physical_input(&self) -> bool {
        self.gate.is_some() || self.config.gate.backdrop == BackdropMode::AnimatedKeyboard
    }

    /// Install the polled input source (polled mode)
    pub fn attach_physical(&mut self, physical: PhysicalInput) {
        self.physical = Some(physical);
    }

    /// Record which input arrangement won at startup and apply the
    /// degraded-mode expiry where releases will never arrive
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        let ttl = (mode == InputMode::PressOnly).then_some(PRESS_ONLY_TTL);
        if let Some(gate) = self.gate.as_mut() {
            gate.set_pressed_ttl(ttl);
        }
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.set_pressed_ttl(ttl);
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Process one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::FocusGained => {
                self.focused = true;
            }
            Event::FocusLost => {
                // Releases will be delivered elsewhere; drop held keys now
                self.focused = false;
                if let Some(gate) = self.gate.as_mut() {
                    gate.clear_pressed();
                }
                if let Some(backdrop) = self.backdrop.as_mut() {
                    backdrop.clear_pressed();
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Press {
            let ctrl_c = key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Esc || ctrl_c {
                self.quit();
                return;
            }
            // While the gate is up, q is just a letter.
            if key.code == KeyCode::Char('q')
                && key.modifiers.is_empty()
                && self.shell.phase() == RevealPhase::ContentSettled
            {
                self.quit();
                return;
            }
        }

        // Chords belong to the terminal and the app, never to the gate.
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return;
        }

        // In polled mode the device stream is the only typing source;
        // terminal key events would double every press.
        if self.input_mode == InputMode::Polled {
            return;
        }

        let Some(gate_key) = GateKey::from_terminal(key.code) else {
            return;
        };
        let signal = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => KeySignal::press(gate_key, now),
            KeyEventKind::Release => KeySignal::release(gate_key, now),
        };
        self.process_signal(signal);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(area) = self.keyboard_area else {
                    return;
                };
                let Some(key) = LAYOUT.key_at(area, mouse.column, mouse.row) else {
                    return;
                };
                self.click_held = Some(key);
                if let Some(gate) = self.gate.as_mut() {
                    let outcome = gate.virtual_press(key, now);
                    self.after_gate(outcome, now);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let (Some(key), Some(gate)) = (self.click_held.take(), self.gate.as_mut()) {
                    gate.virtual_release(key);
                }
            }
            _ => {}
        }
    }

    /// Feed one physical key signal through the echo state and the gate.
    /// While the terminal is unfocused, physical signals are discarded
    /// wholesale.
    pub fn process_signal(&mut self, signal: KeySignal) {
        if !self.focused {
            return;
        }
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.observe(&signal);
        }
        if let Some(gate) = self.gate.as_mut() {
            let outcome = gate.handle_signal(signal);
            self.after_gate(outcome, signal.timestamp);
        }
    }

    /// React to the gate's verdict on one input: keep the hint strategy
    /// informed of activity, and forward an unlock to the reveal shell
    /// before anything is drawn
    fn after_gate(&mut self, outcome: GateOutcome, now: Instant) {
        match outcome {
            GateOutcome::Unlocked => {
                self.hints = None;
                self.shell.notify_unlocked(now);
            }
            GateOutcome::Consumed => {
                if let (Some(gate), Some(hints)) = (self.gate.as_ref(), self.hints.as_mut()) {
                    hints.observe_input(gate.buffer(), now);
                }
            }
            GateOutcome::Ignored => {}
        }
    }

    /// Advance everything time-driven by one frame
    pub fn tick(&mut self, now: Instant) {
        let signals = self
            .physical
            .as_mut()
            .map(|p| p.drain(now))
            .unwrap_or_default();
        for signal in signals {
            self.process_signal(signal);
        }

        if let Some(gate) = self.gate.as_mut() {
            gate.tick(now);
        }
        if let Some(hints) = self.hints.as_mut() {
            hints.tick(now);
        }
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.tick(now);
        }

        if self.shell.tick(now) {
            self.teardown_gate();
        }
        self.ensure_backdrop();
    }

    /// The content swap happened: the gate, its hints and its screen
    /// geometry all go away. The polled listener survives only if the
    /// backdrop still wants the echo.
    fn teardown_gate(&mut self) {
        self.gate = None;
        self.hints = None;
        self.keyboard_area = None;
        self.click_held = None;
        if self.backdrop.is_none() {
            self.physical = None;
        }
    }

    /// Build the backdrop on first use, once something is on screen
    fn ensure_backdrop(&mut self) {
        if self.config.gate.backdrop != BackdropMode::AnimatedKeyboard
            || self.backdrop.is_some()
            || self.shell.phase() == RevealPhase::GateHidden
        {
            return;
        }
        let mut backdrop = Backdrop::new();
        if self.input_mode == InputMode::PressOnly {
            backdrop.set_pressed_ttl(Some(PRESS_ONLY_TTL));
        }
        self.backdrop = Some(backdrop);
    }

    /// Hint key for the current frame, if the strategy has one
    pub fn current_hint(&self) -> Option<GateKey> {
        self.hints.as_ref().and_then(|h| h.current())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default(), Instant::now())
    }
}
