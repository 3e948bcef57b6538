// Host events, decoded from the flat `RawEvent` record into a tagged enum.
//
// The record's `kind` selects which of its fields carry data; fields that do
// not belong to the kind are ignored.

use std::ops::{BitOr, BitOrAssign};

use glam::Vec2;
use shado_ffi::{FfiCollision2DInfo, RawEvent};

use crate::error::{ShadoError, ShadoResult};
use crate::input::KeyCode;
use crate::math::vec2_from_ffi;

/// Event type ordinals, as numbered by the host.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    None = 0,
    WindowClose = 1,
    WindowResize = 2,
    WindowFocus = 3,
    WindowLostFocus = 4,
    WindowMoved = 5,
    AppTick = 6,
    AppUpdate = 7,
    AppRender = 8,
    KeyPressed = 9,
    KeyReleased = 10,
    KeyTyped = 11,
    MouseButtonPressed = 12,
    MouseButtonReleased = 13,
    MouseMoved = 14,
    MouseScrolled = 15,
}

impl EventType {
    pub fn from_raw(value: i32) -> Option<EventType> {
        use EventType::*;
        Some(match value {
            0 => None,
            1 => WindowClose,
            2 => WindowResize,
            3 => WindowFocus,
            4 => WindowLostFocus,
            5 => WindowMoved,
            6 => AppTick,
            7 => AppUpdate,
            8 => AppRender,
            9 => KeyPressed,
            10 => KeyReleased,
            11 => KeyTyped,
            12 => MouseButtonPressed,
            13 => MouseButtonReleased,
            14 => MouseMoved,
            15 => MouseScrolled,
            _ => return Option::None,
        })
    }

    /// Categories the host stamps on events of this type.
    pub fn categories(self) -> EventCategory {
        use EventType::*;
        match self {
            None => EventCategory::NONE,
            WindowClose | WindowResize | WindowFocus | WindowLostFocus | WindowMoved => {
                EventCategory::APPLICATION
            }
            AppTick | AppUpdate | AppRender => EventCategory::APPLICATION,
            KeyPressed | KeyReleased | KeyTyped => EventCategory::KEYBOARD | EventCategory::INPUT,
            MouseButtonPressed | MouseButtonReleased => {
                EventCategory::MOUSE | EventCategory::INPUT | EventCategory::MOUSE_BUTTON
            }
            MouseMoved | MouseScrolled => EventCategory::MOUSE | EventCategory::INPUT,
        }
    }
}

/// Bit set of event categories. Values match the host's flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EventCategory(pub i32);

impl EventCategory {
    pub const NONE: EventCategory = EventCategory(0);
    pub const APPLICATION: EventCategory = EventCategory(1 << 0);
    pub const INPUT: EventCategory = EventCategory(1 << 1);
    pub const KEYBOARD: EventCategory = EventCategory(1 << 2);
    pub const MOUSE: EventCategory = EventCategory(1 << 3);
    pub const MOUSE_BUTTON: EventCategory = EventCategory(1 << 4);
    pub const EDITOR: EventCategory = EventCategory(1 << 5);
    pub const PROJECT: EventCategory = EventCategory(1 << 6);

    #[inline]
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// True when any bit of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: EventCategory) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EventCategory {
    type Output = EventCategory;

    fn bitor(self, rhs: EventCategory) -> EventCategory {
        EventCategory(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventCategory {
    fn bitor_assign(&mut self, rhs: EventCategory) {
        self.0 |= rhs.0;
    }
}

/// A decoded host event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Window { kind: EventType, width: u32, height: u32 },
    Key { kind: EventType, key_code: KeyCode, repeat_count: i32 },
    Mouse { kind: EventType, x: f32, y: f32, button: i32 },
    App { kind: EventType },
}

impl Event {
    /// Decode a host record. `EventType::None` and unknown ordinals are
    /// rejected.
    pub fn decode(raw: &RawEvent) -> ShadoResult<Event> {
        use EventType::*;
        let kind = EventType::from_raw(raw.kind)
            .ok_or_else(|| ShadoError::InvalidArgument(format!("unknown event type {}", raw.kind)))?;
        Ok(match kind {
            None => return Err(ShadoError::InvalidArgument("event has no type".into())),
            WindowClose | WindowResize | WindowFocus | WindowLostFocus | WindowMoved => {
                Event::Window { kind, width: raw.width, height: raw.height }
            }
            AppTick | AppUpdate | AppRender => Event::App { kind },
            KeyPressed | KeyReleased | KeyTyped => Event::Key {
                kind,
                key_code: KeyCode(raw.key_code),
                repeat_count: raw.repeat_count,
            },
            MouseButtonPressed | MouseButtonReleased | MouseMoved | MouseScrolled => Event::Mouse {
                kind,
                x: raw.x,
                y: raw.y,
                button: raw.button,
            },
        })
    }

    pub fn event_type(&self) -> EventType {
        match *self {
            Event::Window { kind, .. }
            | Event::Key { kind, .. }
            | Event::Mouse { kind, .. }
            | Event::App { kind } => kind,
        }
    }

    pub fn categories(&self) -> EventCategory {
        self.event_type().categories()
    }

    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.categories().intersects(category)
    }
}

/// Contact data handed to the collision hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Collision2DInfo {
    /// World-space normal, pointing from the first body to the second.
    pub normal: Vec2,
    pub points: [Vec2; 2],
    /// Negative when the bodies overlap.
    pub separations: [f32; 2],
}

impl From<FfiCollision2DInfo> for Collision2DInfo {
    fn from(raw: FfiCollision2DInfo) -> Self {
        Collision2DInfo {
            normal: vec2_from_ffi(raw.normal),
            points: raw.points.map(vec2_from_ffi),
            separations: raw.separations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: EventType) -> RawEvent {
        RawEvent { kind: kind as i32, category_flags: kind.categories().bits(), ..Default::default() }
    }

    #[test]
    fn ordinals_match_the_host() {
        assert_eq!(EventType::None as i32, 0);
        assert_eq!(EventType::AppTick as i32, 6);
        assert_eq!(EventType::KeyPressed as i32, 9);
        assert_eq!(EventType::MouseScrolled as i32, 15);
        for value in 0..16 {
            assert_eq!(EventType::from_raw(value).map(|k| k as i32), Some(value));
        }
        assert_eq!(EventType::from_raw(16), None);
        assert_eq!(EventType::from_raw(-1), None);
    }

    #[test]
    fn category_bits_match_the_host() {
        assert_eq!(EventCategory::APPLICATION.bits(), 1);
        assert_eq!(EventCategory::INPUT.bits(), 2);
        assert_eq!(EventCategory::KEYBOARD.bits(), 4);
        assert_eq!(EventCategory::MOUSE.bits(), 8);
        assert_eq!(EventCategory::MOUSE_BUTTON.bits(), 16);
        assert_eq!(EventCategory::EDITOR.bits(), 32);
        assert_eq!(EventCategory::PROJECT.bits(), 64);
    }

    #[test]
    fn key_event_decodes_its_fields() {
        let mut r = raw(EventType::KeyPressed);
        r.key_code = KeyCode::SPACE.0;
        r.repeat_count = 2;
        r.x = 99.0;
        let event = Event::decode(&r).unwrap();
        assert_eq!(
            event,
            Event::Key { kind: EventType::KeyPressed, key_code: KeyCode::SPACE, repeat_count: 2 }
        );
        assert!(event.is_in_category(EventCategory::KEYBOARD));
        assert!(event.is_in_category(EventCategory::INPUT));
        assert!(!event.is_in_category(EventCategory::MOUSE));
    }

    #[test]
    fn window_and_mouse_events_decode() {
        let mut r = raw(EventType::WindowResize);
        r.width = 1280;
        r.height = 720;
        assert_eq!(
            Event::decode(&r).unwrap(),
            Event::Window { kind: EventType::WindowResize, width: 1280, height: 720 }
        );

        let mut r = raw(EventType::MouseButtonPressed);
        r.x = 4.0;
        r.y = 8.0;
        r.button = 1;
        let event = Event::decode(&r).unwrap();
        assert_eq!(event.event_type(), EventType::MouseButtonPressed);
        assert!(event.is_in_category(EventCategory::MOUSE_BUTTON));
        assert!(!event.is_in_category(EventCategory::APPLICATION));

        assert_eq!(Event::decode(&raw(EventType::AppRender)).unwrap(), Event::App { kind: EventType::AppRender });
    }

    #[test]
    fn category_test_is_a_set_bit_test() {
        let event = Event::decode(&raw(EventType::MouseMoved)).unwrap();
        assert!(event.is_in_category(EventCategory::MOUSE | EventCategory::EDITOR));
        assert!(!event.is_in_category(EventCategory::NONE));
        assert!(!event.is_in_category(EventCategory::KEYBOARD));
    }

    #[test]
    fn untyped_and_unknown_events_are_rejected() {
        assert!(matches!(Event::decode(&raw(EventType::None)), Err(ShadoError::InvalidArgument(_))));
        let r = RawEvent { kind: 42, ..Default::default() };
        assert!(matches!(Event::decode(&r), Err(ShadoError::InvalidArgument(_))));
    }

    #[test]
    fn collision_info_converts_from_the_wire() {
        let raw = FfiCollision2DInfo {
            normal: shado_ffi::FfiVec2 { x: 0.0, y: 1.0 },
            points: [shado_ffi::FfiVec2 { x: 1.0, y: 2.0 }, shado_ffi::FfiVec2 { x: 3.0, y: 2.0 }],
            separations: [-0.01, -0.02],
        };
        let info = Collision2DInfo::from(raw);
        assert_eq!(info.normal, Vec2::Y);
        assert_eq!(info.points, [Vec2::new(1.0, 2.0), Vec2::new(3.0, 2.0)]);
        assert_eq!(info.separations, [-0.01, -0.02]);
    }
}
