// shado-macros: proc macros for #[script] and its #[show_in_editor] fields.

mod script;

/// Attribute macro registering a struct as a script class.
///
/// The struct must implement `Default` and `shado::runtime::Script`. Fields
/// tagged `#[show_in_editor]` are recorded for the editor inspector; the
/// attribute is stripped from the emitted struct.
///
/// # Example
/// ```ignore
/// #[script]
/// #[derive(Default)]
/// pub struct Player {
///     #[show_in_editor(display_name = "Move speed")]
///     speed: f32,
///
///     #[show_in_editor(read_only)]
///     score: i32,
///
///     // Not shown in the editor
///     jump_timer: f32,
/// }
/// ```
///
/// The class name defaults to the struct name; override it with
/// `#[script(name = "Game.Player")]`.
#[proc_macro_attribute]
pub fn script(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    match script::expand_script(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
