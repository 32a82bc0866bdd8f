use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use tiny_skia::{Color, Pixmap, PremultipliedColorU8};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

/// Load a TrueType/OpenType font from disk
pub fn load_font(path: &Path) -> Result<FontArc, FontError> {
    let bytes = std::fs::read(path)?;
    Ok(FontArc::try_from_vec(bytes)?)
}

/// Use the configured font, or the first candidate that loads
pub fn locate_font(configured: Option<&Path>, candidates: &[&str]) -> Option<FontArc> {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(font) => {
                info!("Loaded leaderboard font from {}", path.display());
                return Some(font);
            }
            Err(e) => warn!("Could not load font {}: {}", path.display(), e),
        }
    }

    let found = candidates.iter().map(Path::new).find_map(|path| {
        load_font(path).ok().map(|font| {
            info!("Loaded leaderboard font from {}", path.display());
            font
        })
    });

    if found.is_none() {
        warn!("No usable font found, leaderboard images will be drawn without text");
    }
    found
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// How glyph pixels are colored
#[derive(Clone, Copy, Debug)]
pub enum TextFill {
    Solid(Color),
    /// `from` at `top`, blending into `to` at `bottom`, `to` beyond
    Vertical {
        top: f32,
        bottom: f32,
        from: Color,
        to: Color,
    },
}

impl TextFill {
    fn color_at(&self, y: f32) -> Color {
        match *self {
            TextFill::Solid(color) => color,
            TextFill::Vertical { top, bottom, from, to } => {
                let t = if bottom > top {
                    ((y - top) / (bottom - top)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let mix = |a: f32, b: f32| a + (b - a) * t;
                Color::from_rgba(
                    mix(from.red(), to.red()),
                    mix(from.green(), to.green()),
                    mix(from.blue(), to.blue()),
                    mix(from.alpha(), to.alpha()),
                )
                .unwrap_or(to)
            }
        }
    }
}

/// A run of text at a fixed size
pub struct TextStyle {
    pub size: f32,
    pub fill: TextFill,
    pub align: Align,
}

fn glyph_ids(font: &FontArc, text: &str) -> Vec<GlyphId> {
    text.chars().map(|c| font.glyph_id(c)).collect()
}

/// Advance width of a string at the given size
pub fn measure(font: &FontArc, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;

    for id in glyph_ids(font, text) {
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }

    width
}

/// Draw text vertically centered on `middle_y`, anchored at `x` per the alignment
pub fn draw_text(
    pixmap: &mut Pixmap,
    font: &FontArc,
    style: &TextStyle,
    text: &str,
    x: f32,
    middle_y: f32,
) {
    let scale = PxScale::from(style.size);
    let scaled = font.as_scaled(scale);

    let width = measure(font, style.size, text);
    let mut caret = match style.align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };
    let baseline = middle_y + (scaled.ascent() + scaled.descent()) / 2.0;

    let mut previous: Option<GlyphId> = None;
    for id in glyph_ids(font, text) {
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outline) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outline.px_bounds();
        outline.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            let color = style.fill.color_at(py as f32);
            blend_pixel(pixmap, px, py, color, coverage);
        });
    }
}

/// Source-over blend of one pixel; out-of-bounds coordinates are ignored
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= pixmap.width() || y as u32 >= pixmap.height() {
        return;
    }

    let index = y as usize * pixmap.width() as usize + x as usize;
    let Some(dst) = pixmap.pixels_mut().get_mut(index) else {
        return;
    };

    let src_a = color.alpha() * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let keep = 1.0 - src_a;

    let channel = |src: f32, dst: u8| src * src_a * 255.0 + dst as f32 * keep;
    let a = (src_a * 255.0 + dst.alpha() as f32 * keep).round().clamp(0.0, 255.0) as u8;
    let clamp = |v: f32| (v.round().clamp(0.0, 255.0) as u8).min(a);

    let blended = PremultipliedColorU8::from_rgba(
        clamp(channel(color.red(), dst.red())),
        clamp(channel(color.green(), dst.green())),
        clamp(channel(color.blue(), dst.blue())),
        a,
    );
    if let Some(blended) = blended {
        *dst = blended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_font_missing_everywhere() {
        let missing = Path::new("/definitely/not/here.ttf");
        assert!(locate_font(Some(missing), &["/also/not/here.ttf"]).is_none());
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let path = std::env::temp_dir().join("voicescope-not-a-font.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        assert!(matches!(load_font(&path), Err(FontError::Invalid(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_vertical_fill_clamps() {
        let fill = TextFill::Vertical {
            top: 0.0,
            bottom: 10.0,
            from: Color::WHITE,
            to: Color::BLACK,
        };

        assert_eq!(fill.color_at(-5.0), Color::WHITE);
        assert_eq!(fill.color_at(50.0), Color::BLACK);
        let mid = fill.color_at(5.0);
        assert!((mid.red() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_blend_pixel_opaque_and_out_of_bounds() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        blend_pixel(&mut pixmap, 1, 1, Color::from_rgba8(255, 0, 0, 255), 1.0);
        blend_pixel(&mut pixmap, 5, -1, Color::WHITE, 1.0);

        let pixel = pixmap.pixel(1, 1).unwrap();
        assert_eq!((pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()), (255, 0, 0, 255));
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn test_blend_pixel_partial_coverage() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(Color::BLACK);
        blend_pixel(&mut pixmap, 0, 0, Color::WHITE, 0.5);

        let pixel = pixmap.pixel(0, 0).unwrap();
        assert_eq!(pixel.alpha(), 255);
        assert!((127..=128).contains(&pixel.red()));
    }
}
