use shado_ffi::{FontHandle, TextField};

use crate::api::api;
use crate::asset::Font;
use crate::buffers::{read_string, str_arg};
use crate::component::ComponentView;
use crate::error::ShadoResult;
use crate::traits::Component;

use super::TextComponent;

impl ComponentView<TextComponent> {
    pub fn text(&self) -> ShadoResult<String> {
        let id = self.entity().non_null()?;
        read_string(TextComponent::KIND.name(), |buf, len, out| unsafe {
            ((*api().text).get_text)(id, buf, len, out)
        })
    }

    pub fn set_text(&self, text: &str) -> ShadoResult<()> {
        let (ptr, len) = str_arg(text);
        self.write(|id| unsafe { ((*api().text).set_text)(id, ptr, len) })
    }

    pub fn line_spacing(&self) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().text).get_f32)(id, TextField::LineSpacing, out) })
    }

    pub fn set_line_spacing(&self, spacing: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().text).set_f32)(id, TextField::LineSpacing, spacing) })
    }

    pub fn kerning(&self) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().text).get_f32)(id, TextField::Kerning, out) })
    }

    pub fn set_kerning(&self, kerning: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().text).set_f32)(id, TextField::Kerning, kerning) })
    }

    /// `None` when the text uses the host's default font.
    pub fn font(&self) -> ShadoResult<Option<Font>> {
        let handle: FontHandle = self.read(|id, out| unsafe { ((*api().text).get_font)(id, out) })?;
        Ok(Font::from_handle(handle))
    }

    pub fn set_font(&self, font: Option<&Font>) -> ShadoResult<()> {
        let handle = font.map_or(FontHandle(0), Font::handle);
        self.write(|id| unsafe { ((*api().text).set_font)(id, handle) })
    }
}
