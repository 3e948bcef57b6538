// Editor metadata: which script fields the editor shows, and how.
//
// The table is built at compile time by `#[script]`, which records every
// field tagged `#[show_in_editor]` in the type's `ScriptRegistration`.

use glam::{Vec2, Vec3, Vec4};

use crate::asset::{Font, Shader, Texture2D};
use crate::entity::EntityRef;
use crate::math::Colour;
use crate::prefab::Prefab;
use crate::script_registry::ScriptRegistration;

/// Widget family the editor uses for a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Colour,
    String,
    Entity,
    Prefab,
    Asset,
}

/// Types that may appear as editor-visible script fields.
pub trait EditorValue {
    const KIND: FieldKind;
}

macro_rules! editor_values {
    ($($kind:ident => $($ty:ty),+;)*) => {
        $($(
            impl EditorValue for $ty {
                const KIND: FieldKind = FieldKind::$kind;
            }
        )+)*
    };
}

editor_values! {
    Bool => bool;
    Int => i8, i16, i32, i64, u8, u16, u32, u64;
    Float => f32, f64;
    Vec2 => Vec2;
    Vec3 => Vec3;
    Vec4 => Vec4;
    Colour => Colour;
    String => String;
    Entity => EntityRef;
    Prefab => Prefab;
    Asset => Texture2D, Shader, Font;
}

impl<T: EditorValue> EditorValue for Option<T> {
    const KIND: FieldKind = T::KIND;
}

/// One editor-visible field of a script type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorField {
    /// Rust field name.
    pub name: &'static str,
    /// Label shown in the inspector; the field name unless overridden.
    pub display_name: &'static str,
    pub kind: FieldKind,
    pub read_only: bool,
}

/// Names of every `#[script]` type linked into the binary, sorted.
pub fn scripts() -> Vec<&'static str> {
    let mut names: Vec<_> = inventory::iter::<ScriptRegistration>.into_iter().map(|r| r.name).collect();
    names.sort_unstable();
    names
}

/// Editor fields of `script`, in declaration order.
pub fn fields_for(script: &str) -> Option<&'static [EditorField]> {
    inventory::iter::<ScriptRegistration>
        .into_iter()
        .find(|r| r.name == script)
        .map(|r| r.fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_registry::Script;

    #[derive(Default)]
    struct EditorProbe;

    impl Script for EditorProbe {}

    static PROBE_FIELDS: &[EditorField] = &[
        EditorField { name: "speed", display_name: "Speed", kind: <f32 as EditorValue>::KIND, read_only: false },
        EditorField {
            name: "target",
            display_name: "target",
            kind: <Option<EntityRef> as EditorValue>::KIND,
            read_only: true,
        },
    ];

    inventory::submit! {
        ScriptRegistration {
            name: "EditorProbe",
            construct: || Box::new(EditorProbe),
            fields: PROBE_FIELDS,
        }
    }

    #[test]
    fn submitted_fields_are_queryable() {
        assert!(scripts().contains(&"EditorProbe"));
        let fields = fields_for("EditorProbe").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].display_name, "Speed");
        assert_eq!(fields[0].kind, FieldKind::Float);
        assert_eq!(fields[1].kind, FieldKind::Entity);
        assert!(fields[1].read_only);
        assert_eq!(fields_for("Missing"), None);
    }

    #[test]
    fn kinds_map_types() {
        assert_eq!(<u8 as EditorValue>::KIND, FieldKind::Int);
        assert_eq!(<Colour as EditorValue>::KIND, FieldKind::Colour);
        assert_eq!(<Texture2D as EditorValue>::KIND, FieldKind::Asset);
        assert_eq!(<Prefab as EditorValue>::KIND, FieldKind::Prefab);
        assert_eq!(<String as EditorValue>::KIND, FieldKind::String);
    }
}
