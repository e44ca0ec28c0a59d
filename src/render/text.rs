use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ChoroError, ChoroResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout (straight alpha).
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8Premul> for TextBrushRgba8 {
    fn from(c: Rgba8Premul) -> Self {
        let [r, g, b, a] = c.to_straight_rgba();
        Self { r, g, b, a }
    }
}

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone)]
pub struct FontBytes {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBytes")
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontBytes {
    pub fn from_path(path: &Path) -> ChoroResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    /// A sans-serif face from the system font database, falling back to any installed face.
    pub fn system_sans_serif() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let id = db
            .query(&usvg::fontdb::Query {
                families: &[
                    usvg::fontdb::Family::SansSerif,
                    usvg::fontdb::Family::Name("DejaVu Sans"),
                    usvg::fontdb::Family::Name("Liberation Sans"),
                    usvg::fontdb::Family::Name("Noto Sans"),
                ],
                ..Default::default()
            })
            .or_else(|| db.faces().next().map(|face| face.id))?;
        db.with_face_data(id, |data, index| Self {
            bytes: Arc::new(data.to_vec()),
            index,
        })
    }

    /// Explicit font file when given, otherwise the system sans-serif face.
    ///
    /// `Ok(None)` means no font could be found; callers render without text.
    pub fn resolve(path: Option<&Path>) -> ChoroResult<Option<Self>> {
        match path {
            Some(p) => Self::from_path(p).map(Some),
            None => {
                let font = Self::system_sans_serif();
                if font.is_none() {
                    tracing::warn!("no system sans-serif font found; text will not be drawn");
                }
                Ok(font)
            }
        }
    }
}

/// A shaped, positioned text block ready for rasterization.
pub struct PreparedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl PreparedText {
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }
}

impl std::fmt::Debug for PreparedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedText")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Stateful helper for building Parley text layouts from one font.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextEngine {
    pub fn new(font: FontBytes) -> ChoroResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ChoroError::render("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ChoroError::render("registered font family has no name"))?
            .to_string();

        let vello_font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_font,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out a single unwrapped line of text.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8Premul,
    ) -> ChoroResult<Arc<PreparedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ChoroError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(Arc::new(PreparedText {
            layout,
            font: self.font.clone(),
        }))
    }
}
