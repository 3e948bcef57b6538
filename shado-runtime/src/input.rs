// Polling input state from the host window.

use glam::Vec2;
use shado_ffi::FfiVec2;

use crate::api::api;
use crate::math::vec2_from_ffi;

/// Host key code. Values follow the GLFW key table the host forwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const APOSTROPHE: KeyCode = KeyCode(39);
    pub const COMMA: KeyCode = KeyCode(44);
    pub const MINUS: KeyCode = KeyCode(45);
    pub const PERIOD: KeyCode = KeyCode(46);
    pub const SLASH: KeyCode = KeyCode(47);

    pub const D0: KeyCode = KeyCode(48);
    pub const D1: KeyCode = KeyCode(49);
    pub const D2: KeyCode = KeyCode(50);
    pub const D3: KeyCode = KeyCode(51);
    pub const D4: KeyCode = KeyCode(52);
    pub const D5: KeyCode = KeyCode(53);
    pub const D6: KeyCode = KeyCode(54);
    pub const D7: KeyCode = KeyCode(55);
    pub const D8: KeyCode = KeyCode(56);
    pub const D9: KeyCode = KeyCode(57);

    pub const A: KeyCode = KeyCode(65);
    pub const B: KeyCode = KeyCode(66);
    pub const C: KeyCode = KeyCode(67);
    pub const D: KeyCode = KeyCode(68);
    pub const E: KeyCode = KeyCode(69);
    pub const F: KeyCode = KeyCode(70);
    pub const G: KeyCode = KeyCode(71);
    pub const H: KeyCode = KeyCode(72);
    pub const I: KeyCode = KeyCode(73);
    pub const J: KeyCode = KeyCode(74);
    pub const K: KeyCode = KeyCode(75);
    pub const L: KeyCode = KeyCode(76);
    pub const M: KeyCode = KeyCode(77);
    pub const N: KeyCode = KeyCode(78);
    pub const O: KeyCode = KeyCode(79);
    pub const P: KeyCode = KeyCode(80);
    pub const Q: KeyCode = KeyCode(81);
    pub const R: KeyCode = KeyCode(82);
    pub const S: KeyCode = KeyCode(83);
    pub const T: KeyCode = KeyCode(84);
    pub const U: KeyCode = KeyCode(85);
    pub const V: KeyCode = KeyCode(86);
    pub const W: KeyCode = KeyCode(87);
    pub const X: KeyCode = KeyCode(88);
    pub const Y: KeyCode = KeyCode(89);
    pub const Z: KeyCode = KeyCode(90);

    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const ENTER: KeyCode = KeyCode(257);
    pub const TAB: KeyCode = KeyCode(258);
    pub const BACKSPACE: KeyCode = KeyCode(259);
    pub const INSERT: KeyCode = KeyCode(260);
    pub const DELETE: KeyCode = KeyCode(261);
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);

    pub const F1: KeyCode = KeyCode(290);
    pub const F2: KeyCode = KeyCode(291);
    pub const F3: KeyCode = KeyCode(292);
    pub const F4: KeyCode = KeyCode(293);
    pub const F5: KeyCode = KeyCode(294);
    pub const F6: KeyCode = KeyCode(295);
    pub const F7: KeyCode = KeyCode(296);
    pub const F8: KeyCode = KeyCode(297);
    pub const F9: KeyCode = KeyCode(298);
    pub const F10: KeyCode = KeyCode(299);
    pub const F11: KeyCode = KeyCode(300);
    pub const F12: KeyCode = KeyCode(301);

    pub const LEFT_SHIFT: KeyCode = KeyCode(340);
    pub const LEFT_CONTROL: KeyCode = KeyCode(341);
    pub const LEFT_ALT: KeyCode = KeyCode(342);
    pub const RIGHT_SHIFT: KeyCode = KeyCode(344);
    pub const RIGHT_CONTROL: KeyCode = KeyCode(345);
    pub const RIGHT_ALT: KeyCode = KeyCode(346);
}

impl From<i32> for KeyCode {
    fn from(code: i32) -> Self {
        KeyCode(code)
    }
}

/// Mouse button indices as sent by the host.
pub mod mouse {
    pub const LEFT: i32 = 0;
    pub const RIGHT: i32 = 1;
    pub const MIDDLE: i32 = 2;
}

pub fn is_key_pressed(key: KeyCode) -> bool {
    unsafe { ((*api().input).is_key_pressed)(key.0) }
}

pub fn is_mouse_button_pressed(button: i32) -> bool {
    unsafe { ((*api().input).is_mouse_button_pressed)(button) }
}

/// Cursor position in window coordinates.
pub fn mouse_position() -> Vec2 {
    let mut out = FfiVec2::default();
    unsafe { ((*api().input).get_mouse_position)(&mut out) };
    vec2_from_ffi(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;

    #[test]
    fn key_state_follows_the_host() {
        let _guard = setup();
        assert!(!is_key_pressed(KeyCode::W));
        shado_sim::with_scene(|s| s.press_key(KeyCode::W.0));
        assert!(is_key_pressed(KeyCode::W));
        assert!(!is_key_pressed(KeyCode::S));
        shado_sim::with_scene(|s| s.release_key(KeyCode::W.0));
        assert!(!is_key_pressed(KeyCode::W));
    }

    #[test]
    fn mouse_state_follows_the_host() {
        let _guard = setup();
        shado_sim::with_scene(|s| {
            s.press_mouse_button(mouse::RIGHT);
            s.move_mouse(320.0, 200.5);
        });
        assert!(is_mouse_button_pressed(mouse::RIGHT));
        assert!(!is_mouse_button_pressed(mouse::LEFT));
        assert_eq!(mouse_position(), Vec2::new(320.0, 200.5));
    }
}
