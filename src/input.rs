//! Keyboard handling for the runner host.
//!
//! Maps key events to host actions and keeps track of whether the jump key
//! is currently down. Terminals that report key releases (kitty keyboard
//! protocol, browsers through the web bridge) give exact press/release
//! edges. Elsewhere only presses and auto-repeat arrive, so a jump key is
//! treated as held until no press has been seen for [`HOLD_TIMEOUT_MS`].

use crate::runner::GameEngine;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long a press keeps the jump key "down" when releases are not reported.
pub const HOLD_TIMEOUT_MS: u64 = 120;

/// UI-agnostic host actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    JumpPress,
    /// Auto-repeat while the key stays down.
    JumpRepeat,
    JumpRelease,
    Restart,
    Quit,
}

/// Translate a key event. Returns `None` for keys the game ignores.
pub fn map_key_event(event: &KeyEvent) -> Option<HostInput> {
    let is_jump_key = matches!(event.code, KeyCode::Char(' ') | KeyCode::Up);

    match event.kind {
        KeyEventKind::Release => is_jump_key.then_some(HostInput::JumpRelease),
        KeyEventKind::Repeat => is_jump_key.then_some(HostInput::JumpRepeat),
        KeyEventKind::Press => match event.code {
            KeyCode::Char(' ') | KeyCode::Up => Some(HostInput::JumpPress),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(HostInput::Restart),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(HostInput::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(HostInput::Quit)
            }
            _ => None,
        },
    }
}

/// Jump-key state across frames.
#[derive(Debug, Clone)]
pub struct JumpKey {
    held: bool,
    /// Release edges arrive as events; no timeout needed.
    reports_release: bool,
    last_press_ms: u64,
}

impl JumpKey {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: false,
            reports_release,
            last_press_ms: 0,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn press(&mut self, now_ms: u64) {
        self.held = true;
        self.last_press_ms = now_ms;
    }

    /// Returns true if the key was down.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.held, false)
    }

    /// Synthesize a release once presses stop arriving. Returns true on the
    /// frame the key is considered let go.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self.reports_release || !self.held {
            return false;
        }
        if now_ms.saturating_sub(self.last_press_ms) >= HOLD_TIMEOUT_MS {
            self.held = false;
            return true;
        }
        false
    }
}

/// What the host loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

/// Apply one host input to the engine.
///
/// A jump press on the game-over screen starts a new run, like pressing
/// "restart".
pub fn apply_input(
    engine: &mut GameEngine,
    jump: &mut JumpKey,
    input: HostInput,
    now_ms: u64,
) -> InputOutcome {
    match input {
        HostInput::JumpPress => {
            if engine.is_over() {
                engine.reset();
                jump.release();
            } else {
                // A press while the key is already down is terminal auto-repeat
                let repeat = jump.is_held();
                jump.press(now_ms);
                if !repeat {
                    engine.request_jump();
                }
            }
        }
        HostInput::JumpRepeat => {
            if jump.is_held() {
                jump.press(now_ms);
            }
        }
        HostInput::JumpRelease => {
            if jump.release() {
                engine.release_jump();
            }
        }
        HostInput::Restart => {
            engine.reset();
            jump.release();
        }
        HostInput::Quit => return InputOutcome::Quit,
    }
    InputOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{EngineConfig, GameStatus};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind,
            state: KeyEventState::empty(),
        }
    }

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig {
            spawn_chance: 0.0,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            map_key_event(&key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(HostInput::JumpPress)
        );
        assert_eq!(
            map_key_event(&key(KeyCode::Up, KeyEventKind::Release)),
            Some(HostInput::JumpRelease)
        );
        assert_eq!(
            map_key_event(&key(KeyCode::Char(' '), KeyEventKind::Repeat)),
            Some(HostInput::JumpRepeat)
        );
        assert_eq!(
            map_key_event(&key(KeyCode::Char('r'), KeyEventKind::Press)),
            Some(HostInput::Restart)
        );
        assert_eq!(
            map_key_event(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(HostInput::Quit)
        );
        assert_eq!(map_key_event(&key(KeyCode::Char('x'), KeyEventKind::Press)), None);
        // Releases of non-jump keys are ignored
        assert_eq!(map_key_event(&key(KeyCode::Esc, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };
        assert_eq!(map_key_event(&event), Some(HostInput::Quit));
    }

    #[test]
    fn test_jump_key_without_release_events_times_out() {
        let mut jump = JumpKey::new(false);
        jump.press(0);
        assert!(!jump.expire(HOLD_TIMEOUT_MS - 1));
        assert!(jump.is_held());
        assert!(jump.expire(HOLD_TIMEOUT_MS));
        assert!(!jump.is_held());
        // Only fires once
        assert!(!jump.expire(HOLD_TIMEOUT_MS * 2));
    }

    #[test]
    fn test_jump_key_with_release_events_never_times_out() {
        let mut jump = JumpKey::new(true);
        jump.press(0);
        assert!(!jump.expire(10_000));
        assert!(jump.is_held());
        assert!(jump.release());
        assert!(!jump.release());
    }

    #[test]
    fn test_press_starts_jump_once() {
        let mut engine = engine();
        let mut jump = JumpKey::new(false);

        apply_input(&mut engine, &mut jump, HostInput::JumpPress, 0);
        assert!(engine.physics().jumping);
        let velocity = engine.physics().velocity;

        // Auto-repeat press keeps the key held without re-triggering
        apply_input(&mut engine, &mut jump, HostInput::JumpPress, 30);
        assert!((engine.physics().velocity - velocity).abs() < f64::EPSILON);
        assert!(jump.is_held());
    }

    #[test]
    fn test_release_reaches_engine() {
        let mut engine = engine();
        let mut jump = JumpKey::new(true);
        apply_input(&mut engine, &mut jump, HostInput::JumpPress, 0);
        apply_input(&mut engine, &mut jump, HostInput::JumpRelease, 50);
        assert!(!jump.is_held());
        assert!(engine.physics().hold_released);
    }

    #[test]
    fn test_press_after_game_over_restarts() {
        let mut engine = GameEngine::new(EngineConfig {
            spawn_chance: 1.0,
            initial_lives: 1,
            ..EngineConfig::default()
        });
        let mut rng = rand::thread_rng();
        let flags = crate::runner::InputFlags::default();
        let mut now = 0;
        while !engine.is_over() && now < 100_000 {
            now += 16;
            engine.tick(now, flags, &mut rng);
        }
        assert!(engine.is_over());

        let mut jump = JumpKey::new(true);
        apply_input(&mut engine, &mut jump, HostInput::JumpPress, now);
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.session(), 1);
        assert!(!engine.physics().jumping, "restart press does not also jump");
    }

    #[test]
    fn test_quit() {
        let mut engine = engine();
        let mut jump = JumpKey::new(true);
        assert_eq!(
            apply_input(&mut engine, &mut jump, HostInput::Quit, 0),
            InputOutcome::Quit
        );
    }
}
