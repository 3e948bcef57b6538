// Marker traits tying Rust component types to their wire kinds, plus the
// shared-layout families the native side selects with a kind discriminator.

use std::any::Any;

use shado_ffi::ComponentKind;

/// Implemented by every component marker type. `KIND` is the token sent
/// across the boundary for add/has/remove and for layout selection.
pub trait Component: 'static {
    const KIND: ComponentKind;
}

/// Components whose colour lives in a layout shared with other kinds:
/// SpriteRenderer, CircleRenderer, LineRenderer and Text.
pub trait Coloured: Component {}

/// SpriteRenderer and CircleRenderer: colour, texture and tiling factor.
pub trait SpriteLike: Coloured {}

/// BoxCollider2D and CircleCollider2D: offset, density, friction,
/// restitution and restitution threshold.
pub trait Collider2D: Component {}

/// Upcast helper so script instances stored as `Box<dyn Script>` can be
/// downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
