use std::path::{Path, PathBuf};
use ab_glyph::{FontArc, FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};

/// Glyph cell size of the built-in bitmap font.
const BITMAP_CELL: i32 = 8;

/// The font used to draw report text.
#[derive(Clone)]
pub enum ReportFont {
    /// A TrueType/OpenType font loaded from disk.
    Vector { font: FontArc, source: PathBuf },
    /// 8x8 bitmap glyphs compiled into the binary. ASCII only; anything else
    /// is drawn as `?`.
    Builtin,
}

impl std::fmt::Debug for ReportFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFont::Vector { source, .. } => write!(f, "Vector({})", source.display()),
            ReportFont::Builtin => f.write_str("Builtin"),
        }
    }
}

impl ReportFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, ReportFont::Builtin)
    }

    /// Draw one line of text with its top-left corner at (x, y).
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
        match self {
            ReportFont::Vector { font, .. } => {
                imageproc::drawing::draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text);
            }
            ReportFont::Builtin => {
                let scale = ((size / BITMAP_CELL as f32).round() as i32).max(1);
                draw_bitmap_text(canvas, x, y, text, color, scale);
            }
        }
    }
}

/// Walks an ordered list of font files and keeps the first one that loads.
#[derive(Debug, Clone)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First loadable candidate, or the built-in bitmap font. Never fails.
    pub fn resolve(&self) -> ReportFont {
        for path in &self.candidates {
            if let Some(font) = load_font_file(path) {
                info!(font = %path.display(), "Using report font");
                return ReportFont::Vector { font, source: path.clone() };
            }
        }
        warn!(
            tried = self.candidates.len(),
            "No report font could be loaded; falling back to the built-in bitmap font (Korean text will not render)"
        );
        ReportFont::Builtin
    }
}

fn load_font_file(path: &Path) -> Option<FontArc> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(_) => {
            debug!(font = %path.display(), "Font candidate not found");
            return None;
        }
    };
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(FontArc::new(font)),
        Err(e) => {
            debug!(font = %path.display(), error = %e, "Font candidate is not a usable font");
            None
        }
    }
}

/// Draw text with the built-in 8x8 font, each glyph pixel scaled to `scale`.
pub fn draw_bitmap_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: i32) {
    let scale = scale.max(1);
    let (width, height) = (img.width() as i32, img.height() as i32);
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        let Some(glyph) = glyph else {
            cursor_x += BITMAP_CELL * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            for col in 0..BITMAP_CELL {
                if (row >> col) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (tx, ty) = (px + sx, py + sy);
                        if tx >= 0 && ty >= 0 && tx < width && ty < height {
                            img.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += BITMAP_CELL * scale;
    }
}
