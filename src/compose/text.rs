use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::error::{StarmapError, StarmapResult};

/// Environment variable naming a font file for the text overlays.
pub const FONT_ENV: &str = "STARMAP_FONT";

/// Where overlay text gets its font.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// `STARMAP_FONT`, then the system fonts.
    #[default]
    Auto,
    /// A font file.
    File(PathBuf),
    /// Font bytes already in memory.
    Bytes(Arc<Vec<u8>>),
    /// Draw no text.
    Disabled,
}

/// Font bytes chosen for the overlays.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    /// Raw font file.
    pub bytes: Arc<Vec<u8>>,
    /// Face within a collection.
    pub index: u32,
}

fn read_font(path: &std::path::Path) -> StarmapResult<ResolvedFont> {
    let bytes = std::fs::read(path)
        .map_err(|e| StarmapError::render(format!("read font '{}': {e}", path.display())))?;
    Ok(ResolvedFont {
        bytes: Arc::new(bytes),
        index: 0,
    })
}

/// System font database, loaded once per call.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
}

/// Regular and bold faces for the overlays.
///
/// Without a separate bold face, bold text is set in the regular face.
#[derive(Clone, Debug)]
pub struct FontFaces {
    /// Face for caption and footnote.
    pub regular: ResolvedFont,
    /// Face for the title, when distinct from `regular`.
    pub bold: Option<ResolvedFont>,
}

impl FontFaces {
    /// One face for every weight.
    pub fn single(font: ResolvedFont) -> Self {
        Self {
            regular: font,
            bold: None,
        }
    }
}

const SANS_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Roboto",
];

/// Pick a regular and a bold sans-serif face from `db`.
///
/// Falls back to any upright, proportional face when no sans family is installed.
pub fn fonts_from_db(db: &usvg::fontdb::Database) -> Option<FontFaces> {
    use usvg::fontdb::{Family, Query, Style, Weight};

    let mut families: Vec<Family<'_>> = SANS_FAMILIES.iter().map(|&n| Family::Name(n)).collect();
    families.push(Family::SansSerif);
    let query = |weight| {
        db.query(&Query {
            families: &families,
            weight,
            ..Query::default()
        })
    };

    let regular_id = query(Weight::NORMAL).or_else(|| {
        db.faces()
            .find(|f| f.style == Style::Normal && !f.monospaced)
            .map(|f| f.id)
    })?;
    let bold_id = query(Weight::BOLD).filter(|id| *id != regular_id);

    let load = |id| {
        db.with_face_data(id, |data, index| ResolvedFont {
            bytes: Arc::new(data.to_vec()),
            index,
        })
    };
    Some(FontFaces {
        regular: load(regular_id)?,
        bold: bold_id.and_then(load),
    })
}

/// Resolve `source` to font faces. `Ok(None)` means text is skipped.
///
/// Explicit sources that cannot be read are errors. `Auto` never fails. File and
/// byte sources supply a single face.
pub fn resolve_font(
    source: &FontSource,
    fontdb: impl FnOnce() -> Arc<usvg::fontdb::Database>,
) -> StarmapResult<Option<FontFaces>> {
    match source {
        FontSource::Disabled => Ok(None),
        FontSource::Bytes(b) => Ok(Some(FontFaces::single(ResolvedFont {
            bytes: b.clone(),
            index: 0,
        }))),
        FontSource::File(p) => read_font(p).map(|f| Some(FontFaces::single(f))),
        FontSource::Auto => {
            if let Some(p) = std::env::var_os(FONT_ENV) {
                match read_font(std::path::Path::new(&p)) {
                    Ok(f) => return Ok(Some(FontFaces::single(f))),
                    Err(err) => tracing::warn!(%err, "ignoring {FONT_ENV}"),
                }
            }
            let found = fonts_from_db(&fontdb());
            match &found {
                Some(faces) => {
                    tracing::debug!(bold_face = faces.bold.is_some(), "resolved system fonts");
                }
                None => tracing::warn!("no usable font found; text overlays will be skipped"),
            }
            Ok(found)
        }
    }
}

/// Straight RGBA brush carried through parley.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

struct Face {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl Face {
    fn register(font_ctx: &mut parley::FontContext, font: &ResolvedFont) -> StarmapResult<Self> {
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StarmapError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StarmapError::render("registered font family has no name"))?
            .to_string();
        Ok(Self {
            family_name,
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
                font.index,
            ),
        })
    }
}

/// Parley contexts bound to the registered overlay faces.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular: Face,
    bold: Option<Face>,
}

impl TextLayoutEngine {
    pub(crate) fn new(faces: &FontFaces) -> StarmapResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular = Face::register(&mut font_ctx, &faces.regular)?;
        let bold = faces
            .bold
            .as_ref()
            .map(|f| Face::register(&mut font_ctx, f))
            .transpose()?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular,
            bold,
        })
    }

    fn face(&self, bold: bool) -> &Face {
        match (&self.bold, bold) {
            (Some(face), true) => face,
            _ => &self.regular,
        }
    }

    pub(crate) fn has_bold_face(&self) -> bool {
        self.bold.is_some()
    }

    /// Font data used to draw glyphs laid out with the same `bold` flag.
    pub(crate) fn font(&self, bold: bool) -> &vello_cpu::peniko::FontData {
        &self.face(bold).font
    }

    /// Single-line layout of `text`.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
    ) -> StarmapResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StarmapError::validation("text size_px must be finite and > 0"));
        }

        let family = self.face(bold).family_name.clone();
        let weight = if bold && self.bold.is_some() {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
