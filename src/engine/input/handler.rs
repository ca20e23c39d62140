use glam::Vec2;
use log::trace;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Number of slots in the key array. Codes at or above this are dropped.
pub const MAX_KEYS: usize = 1024;
/// Number of slots in the mouse button array.
pub const MAX_MOUSE_BUTTONS: usize = 8;

/// Key codes, numbered the conventional desktop way: printable keys use
/// their ASCII value, everything else lives above 255.
pub mod keys {
    pub const SPACE: usize = 32;
    pub const APOSTROPHE: usize = 39;
    pub const COMMA: usize = 44;
    pub const MINUS: usize = 45;
    pub const PERIOD: usize = 46;
    pub const SLASH: usize = 47;
    pub const DIGIT_0: usize = 48;
    pub const SEMICOLON: usize = 59;
    pub const EQUAL: usize = 61;
    pub const A: usize = 65;
    pub const D: usize = 68;
    pub const P: usize = 80;
    pub const LEFT_BRACKET: usize = 91;
    pub const BACKSLASH: usize = 92;
    pub const RIGHT_BRACKET: usize = 93;
    pub const GRAVE: usize = 96;
    pub const ESCAPE: usize = 256;
    pub const ENTER: usize = 257;
    pub const TAB: usize = 258;
    pub const BACKSPACE: usize = 259;
    pub const INSERT: usize = 260;
    pub const DELETE: usize = 261;
    pub const RIGHT: usize = 262;
    pub const LEFT: usize = 263;
    pub const DOWN: usize = 264;
    pub const UP: usize = 265;
    pub const PAGE_UP: usize = 266;
    pub const PAGE_DOWN: usize = 267;
    pub const HOME: usize = 268;
    pub const END: usize = 269;
    pub const F1: usize = 290;
    pub const LEFT_SHIFT: usize = 340;
    pub const LEFT_CONTROL: usize = 341;
    pub const LEFT_ALT: usize = 342;
    pub const RIGHT_SHIFT: usize = 344;
    pub const RIGHT_CONTROL: usize = 345;
    pub const RIGHT_ALT: usize = 346;
}

const LETTERS: [KeyCode; 26] = {
    use KeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ]
};

const DIGITS: [KeyCode; 10] = {
    use KeyCode::*;
    [Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9]
};

const FUNCTION_KEYS: [KeyCode; 12] = {
    use KeyCode::*;
    [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12]
};

/// Maps a physical key to its slot in the key array.
pub fn key_code(key: KeyCode) -> Option<usize> {
    if let Some(i) = LETTERS.iter().position(|k| *k == key) {
        return Some(keys::A + i);
    }
    if let Some(i) = DIGITS.iter().position(|k| *k == key) {
        return Some(keys::DIGIT_0 + i);
    }
    if let Some(i) = FUNCTION_KEYS.iter().position(|k| *k == key) {
        return Some(keys::F1 + i);
    }

    use KeyCode::*;
    let code = match key {
        Space => keys::SPACE,
        Quote => keys::APOSTROPHE,
        Comma => keys::COMMA,
        Minus => keys::MINUS,
        Period => keys::PERIOD,
        Slash => keys::SLASH,
        Semicolon => keys::SEMICOLON,
        Equal => keys::EQUAL,
        BracketLeft => keys::LEFT_BRACKET,
        Backslash => keys::BACKSLASH,
        BracketRight => keys::RIGHT_BRACKET,
        Backquote => keys::GRAVE,
        Escape => keys::ESCAPE,
        Enter | NumpadEnter => keys::ENTER,
        Tab => keys::TAB,
        Backspace => keys::BACKSPACE,
        Insert => keys::INSERT,
        Delete => keys::DELETE,
        ArrowRight => keys::RIGHT,
        ArrowLeft => keys::LEFT,
        ArrowDown => keys::DOWN,
        ArrowUp => keys::UP,
        PageUp => keys::PAGE_UP,
        PageDown => keys::PAGE_DOWN,
        Home => keys::HOME,
        End => keys::END,
        ShiftLeft => keys::LEFT_SHIFT,
        ControlLeft => keys::LEFT_CONTROL,
        AltLeft => keys::LEFT_ALT,
        ShiftRight => keys::RIGHT_SHIFT,
        ControlRight => keys::RIGHT_CONTROL,
        AltRight => keys::RIGHT_ALT,
        _ => return None,
    };
    Some(code)
}

/// Maps a mouse button to its slot in the button array.
pub fn mouse_button_code(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => 5 + n as usize,
    }
}

/// Keyboard and mouse state as seen by the game.
///
/// Writes are bounds-checked: an out-of-range code is ignored rather than
/// stored, so callers can forward raw codes without filtering them first.
pub struct InputState {
    keys: [bool; MAX_KEYS],
    keys_processed: [bool; MAX_KEYS],
    mouse_buttons: [bool; MAX_MOUSE_BUTTONS],
    pub mouse_position: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: [false; MAX_KEYS],
            keys_processed: [false; MAX_KEYS],
            mouse_buttons: [false; MAX_MOUSE_BUTTONS],
            mouse_position: Vec2::ZERO,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press or release. Returns `false` if `code` is out of range.
    pub fn set_key(&mut self, code: usize, pressed: bool) -> bool {
        if code >= MAX_KEYS {
            trace!("Ignoring key code {} outside the key array", code);
            return false;
        }
        self.keys[code] = pressed;
        if !pressed {
            self.keys_processed[code] = false;
        }
        true
    }

    pub fn is_key_down(&self, code: usize) -> bool {
        self.keys.get(code).copied().unwrap_or(false)
    }

    /// Returns `true` once per press of `code`; further calls return `false`
    /// until the key has been released and pressed again.
    pub fn take_press(&mut self, code: usize) -> bool {
        if !self.is_key_down(code) || self.keys_processed[code] {
            return false;
        }
        self.keys_processed[code] = true;
        true
    }

    /// Records a mouse button press or release. Returns `false` if `code` is out of range.
    pub fn set_mouse_button(&mut self, code: usize, pressed: bool) -> bool {
        match self.mouse_buttons.get_mut(code) {
            Some(slot) => {
                *slot = pressed;
                true
            }
            None => {
                trace!("Ignoring mouse button {} outside the button array", code);
                false
            }
        }
    }

    pub fn is_mouse_button_down(&self, code: usize) -> bool {
        self.mouse_buttons.get(code).copied().unwrap_or(false)
    }

    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_position = Vec2::new(x as f32, y as f32);
    }

    /// Releases everything, e.g. after the window loses focus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_follow_desktop_numbering() {
        assert_eq!(key_code(KeyCode::KeyA), Some(65));
        assert_eq!(key_code(KeyCode::KeyZ), Some(90));
        assert_eq!(key_code(KeyCode::Digit7), Some(55));
        assert_eq!(key_code(KeyCode::Space), Some(32));
        assert_eq!(key_code(KeyCode::Escape), Some(256));
        assert_eq!(key_code(KeyCode::ArrowLeft), Some(263));
        assert_eq!(key_code(KeyCode::F12), Some(301));
        assert_eq!(key_code(KeyCode::MediaPlayPause), None);
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut input = InputState::new();
        assert!(!input.set_key(MAX_KEYS, true));
        assert!(!input.set_key(usize::MAX, true));
        assert!(!input.is_key_down(MAX_KEYS));
        assert!(!input.set_mouse_button(MAX_MOUSE_BUTTONS, true));
        assert!(!input.is_mouse_button_down(MAX_MOUSE_BUTTONS));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert!(input.set_key(keys::A, true));
        assert!(input.is_key_down(keys::A));
        assert!(!input.is_key_down(keys::D));
        input.set_key(keys::A, false);
        assert!(!input.is_key_down(keys::A));
    }

    #[test]
    fn test_take_press_is_edge_triggered() {
        let mut input = InputState::new();
        assert!(!input.take_press(keys::ENTER), "Key not down yet");

        input.set_key(keys::ENTER, true);
        assert!(input.take_press(keys::ENTER));
        assert!(!input.take_press(keys::ENTER), "Held key reports once");

        // Key repeat while held must not re-arm the press.
        input.set_key(keys::ENTER, true);
        assert!(!input.take_press(keys::ENTER));

        input.set_key(keys::ENTER, false);
        input.set_key(keys::ENTER, true);
        assert!(input.take_press(keys::ENTER));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputState::new();
        assert_eq!(mouse_button_code(MouseButton::Left), 0);
        assert_eq!(mouse_button_code(MouseButton::Forward), 4);
        assert_eq!(mouse_button_code(MouseButton::Other(2)), 7);

        assert!(input.set_mouse_button(mouse_button_code(MouseButton::Right), true));
        assert!(input.is_mouse_button_down(1));
        assert!(!input.set_mouse_button(mouse_button_code(MouseButton::Other(3)), true));

        input.set_mouse_position(120.5, 48.0);
        assert_eq!(input.mouse_position, Vec2::new(120.5, 48.0));

        input.reset();
        assert!(!input.is_mouse_button_down(1));
        assert_eq!(input.mouse_position, Vec2::ZERO);
    }
}
