// Handle proxies for host-owned assets.
//
// A proxy is just the handle value. Cloning, assigning or dropping one never
// touches the native resource; its lifetime belongs to the host.

use shado_ffi::{FontHandle, ShaderHandle, TextureHandle};

use crate::api::api;
use crate::buffers::str_arg;
use crate::error::{ShadoError, ShadoResult};

macro_rules! asset_proxy {
    ($(#[$meta:meta])* $name:ident, $handle:ident, $create:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            handle: $handle,
        }

        impl $name {
            /// Ask the host to load `path` (relative to the project directory).
            pub fn load(path: &str) -> ShadoResult<Self> {
                if path.is_empty() {
                    return Err(ShadoError::InvalidArgument("asset path is empty".into()));
                }
                let (ptr, len) = str_arg(path);
                let handle = unsafe { ((*api().asset).$create)(ptr, len) };
                Self::from_handle(handle).ok_or_else(|| ShadoError::NotFound(path.to_owned()))
            }

            /// Wrap a raw handle. `None` for the zero handle.
            pub fn from_handle(handle: $handle) -> Option<Self> {
                (handle.0 != 0).then_some($name { handle })
            }

            #[inline]
            pub fn handle(&self) -> $handle {
                self.handle
            }
        }
    };
}

asset_proxy!(
    /// A host texture.
    Texture2D,
    TextureHandle,
    texture_create
);
asset_proxy!(Shader, ShaderHandle, shader_create);
asset_proxy!(Font, FontHandle, font_create);

impl Texture2D {
    /// Whether the host still has pixel data behind this handle.
    pub fn is_loaded(&self) -> bool {
        unsafe { ((*api().asset).is_texture_loaded)(self.handle) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;

    #[test]
    fn load_returns_distinct_handles() {
        let _guard = setup();
        let a = Texture2D::load("a.png").unwrap();
        let b = Texture2D::load("b.png").unwrap();
        assert_ne!(a, b);
        assert!(a.is_loaded());
        assert!(Shader::load("shaders/flat.glsl").is_ok());
    }

    #[test]
    fn empty_path_is_rejected_before_the_boundary() {
        let _guard = setup();
        let before = shado_sim::boundary_calls();
        assert!(matches!(Font::load(""), Err(ShadoError::InvalidArgument(_))));
        assert_eq!(shado_sim::boundary_calls(), before);
    }

    #[test]
    fn zero_handle_is_no_asset() {
        assert_eq!(Texture2D::from_handle(TextureHandle(0)), None);
    }
}
