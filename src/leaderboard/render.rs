use ab_glyph::FontArc;
use rand::Rng;
use tiny_skia::{
    FillRule, FilterQuality, GradientStop, LinearGradient, Mask, Paint, PathBuilder, Pixmap,
    PixmapPaint, Point, RadialGradient, Rect, Shader, SpreadMode, Stroke, Transform,
};

use crate::aggregate::LeaderboardEntry;
use crate::utils::string_utils::truncate_with_ellipsis;

use super::layout::*;
use super::text::{Align, TextFill, TextStyle, draw_text};

/// An encoded leaderboard image ready to attach
#[derive(Debug)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no entries to render")]
    Empty,
    #[error("could not allocate a {0}x{1} canvas")]
    Canvas(u32, u32),
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Draw the leaderboard for already ranked entries.
///
/// `icons[i]` belongs to `entries[i]`; missing or `None` icons get a flat
/// placeholder. Without a font the image is drawn with no text.
pub fn render(
    entries: &[LeaderboardEntry],
    icons: &[Option<Pixmap>],
    font: Option<&FontArc>,
) -> Result<RenderedImage, RenderError> {
    if entries.is_empty() {
        return Err(RenderError::Empty);
    }

    let width = CANVAS_WIDTH;
    let height = canvas_height(entries.len());
    let mut canvas = Pixmap::new(width, height).ok_or(RenderError::Canvas(width, height))?;

    canvas.fill(BACKGROUND.opaque());
    draw_starfield(&mut canvas, &mut rand::rng());
    draw_nebula(&mut canvas);
    if let Some(font) = font {
        draw_title(&mut canvas, font);
    }
    draw_divider(&mut canvas);

    for (position, entry) in entries.iter().enumerate() {
        let icon = icons.get(position).and_then(Option::as_ref);
        let is_last = position + 1 == entries.len();
        draw_row(&mut canvas, position, entry, icon, font, is_last);
    }

    if let Some(font) = font {
        let style = TextStyle {
            size: 22.0,
            fill: TextFill::Solid(ACCENT_LIGHT.with_alpha(0.7)),
            align: Align::Center,
        };
        draw_text(
            &mut canvas,
            font,
            &style,
            FOOTER_CAPTION,
            width as f32 / 2.0,
            height as f32 - FOOTER_HEIGHT as f32 / 2.0,
        );
    }

    let bytes = canvas
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(RenderedImage {
        bytes,
        filename: FILENAME,
        width,
        height,
    })
}

fn solid_paint(color: tiny_skia::Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn shader_paint(shader: Shader<'static>) -> Paint<'static> {
    Paint {
        shader,
        anti_alias: true,
        ..Default::default()
    }
}

fn radial(cx: f32, cy: f32, radius: f32, stops: Vec<GradientStop>) -> Option<Shader<'static>> {
    let center = Point::from_xy(cx, cy);
    RadialGradient::new(center, center, radius, stops, SpreadMode::Pad, Transform::identity())
}

fn fill_circle(canvas: &mut Pixmap, cx: f32, cy: f32, radius: f32, paint: &Paint) {
    if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
        canvas.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke_line(canvas: &mut Pixmap, from: (f32, f32), to: (f32, f32), paint: &Paint, width: f32) {
    let mut builder = PathBuilder::new();
    builder.move_to(from.0, from.1);
    builder.line_to(to.0, to.1);
    if let Some(path) = builder.finish() {
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        canvas.stroke_path(&path, paint, &stroke, Transform::identity(), None);
    }
}

fn draw_starfield<R: Rng>(canvas: &mut Pixmap, rng: &mut R) {
    let paint = solid_paint(WHITE.opaque());
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;

    for _ in 0..STAR_COUNT {
        let x = rng.random_range(0.0..width);
        let y = rng.random_range(0.0..height);
        let radius = rng.random_range(0.0..STAR_MAX_RADIUS);
        // zero-radius stars produce no path and are skipped
        fill_circle(canvas, x, y, radius, &paint);
    }
}

fn draw_nebula(canvas: &mut Pixmap) {
    let cx = CANVAS_WIDTH as f32 / 2.0;
    let cy = HEADER_HEIGHT as f32 / 3.0;
    let inner = NEBULA_INNER_RADIUS / NEBULA_OUTER_RADIUS;

    let stops = vec![
        GradientStop::new(0.0, NEBULA.with_alpha(0.8)),
        GradientStop::new(inner, NEBULA.with_alpha(0.8)),
        GradientStop::new(1.0, BACKGROUND.with_alpha(0.0)),
    ];
    if let Some(shader) = radial(cx, cy, NEBULA_OUTER_RADIUS, stops) {
        fill_circle(canvas, cx, cy, NEBULA_OUTER_RADIUS, &shader_paint(shader));
    }
}

fn draw_title(canvas: &mut Pixmap, font: &FontArc) {
    let cx = CANVAS_WIDTH as f32 / 2.0;
    let lines = [(TITLE, 50.0, 64.0), (SUBTITLE, 36.0, 116.0)];

    for (text, size, middle_y) in lines {
        let glow = TextStyle {
            size,
            fill: TextFill::Solid(ACCENT_LIGHT.with_alpha(0.25)),
            align: Align::Center,
        };
        for (dx, dy) in [(-2.0, 0.0), (2.0, 0.0), (0.0, -2.0), (0.0, 2.0)] {
            draw_text(canvas, font, &glow, text, cx + dx, middle_y + dy);
        }

        let style = TextStyle {
            size,
            fill: TextFill::Solid(WHITE.opaque()),
            align: Align::Center,
        };
        draw_text(canvas, font, &style, text, cx, middle_y);
    }
}

fn draw_divider(canvas: &mut Pixmap) {
    let cx = CANVAS_WIDTH as f32 / 2.0;
    let paint = solid_paint(ACCENT_LIGHT.opaque());

    stroke_line(canvas, (cx - 200.0, DIVIDER_Y), (cx - 50.0, DIVIDER_Y), &paint, 2.0);
    stroke_line(canvas, (cx + 200.0, DIVIDER_Y), (cx + 50.0, DIVIDER_Y), &paint, 2.0);
}

fn draw_row(
    canvas: &mut Pixmap,
    position: usize,
    entry: &LeaderboardEntry,
    icon: Option<&Pixmap>,
    font: Option<&FontArc>,
    is_last: bool,
) {
    let top = row_top(position);
    let row_height = ROW_HEIGHT as f32;
    let middle = top + row_height / 2.0;
    let width = CANVAS_WIDTH as f32;

    let strip = LinearGradient::new(
        Point::from_xy(0.0, top),
        Point::from_xy(0.0, top + row_height),
        vec![
            GradientStop::new(0.0, ROW_TINT.with_alpha(0.2)),
            GradientStop::new(1.0, BACKGROUND.with_alpha(0.0)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    if let (Some(shader), Some(rect)) = (strip, Rect::from_xywh(0.0, top, width, row_height)) {
        canvas.fill_rect(rect, &shader_paint(shader), Transform::identity(), None);
    }

    let rank = position + 1;
    draw_badge(canvas, rank, middle, font);
    draw_icon(canvas, icon, top);

    if let Some(font) = font {
        let name = TextStyle {
            size: 30.0,
            fill: TextFill::Vertical {
                top,
                bottom: top + row_height * 0.7,
                from: WHITE.opaque(),
                to: ACCENT_LIGHT.opaque(),
            },
            align: Align::Left,
        };
        let display_name = truncate_with_ellipsis(&entry.group_name, NAME_CHAR_BUDGET);
        draw_text(canvas, font, &name, &display_name, NAME_X, middle);

        let count = TextStyle {
            size: 36.0,
            fill: TextFill::Solid(ACCENT_LIGHT.opaque()),
            align: Align::Right,
        };
        let count_text = entry.member_count.to_string();
        draw_text(canvas, font, &count, &count_text, width - COUNT_RIGHT_MARGIN, middle);
    }

    if !is_last {
        let y = top + row_height;
        let from = (SEPARATOR_MARGIN, y);
        let to = (width - SEPARATOR_MARGIN, y);
        stroke_line(canvas, from, to, &solid_paint(ACCENT_LIGHT.with_alpha(0.15)), 6.0);
        stroke_line(canvas, from, to, &solid_paint(WHITE.with_alpha(0.2)), 2.0);
    }
}

fn draw_badge(canvas: &mut Pixmap, rank: usize, center_y: f32, font: Option<&FontArc>) {
    let style = badge_style(rank);
    let stops = vec![
        GradientStop::new(0.0, style.center.opaque()),
        GradientStop::new(1.0, style.edge.opaque()),
    ];
    let paint = radial(BADGE_CENTER_X, center_y, BADGE_RADIUS, stops)
        .map(shader_paint)
        .unwrap_or_else(|| solid_paint(style.center.opaque()));
    fill_circle(canvas, BADGE_CENTER_X, center_y, BADGE_RADIUS, &paint);

    if style.highlight {
        let radius = BADGE_RADIUS / 3.0;
        fill_circle(
            canvas,
            BADGE_CENTER_X - radius,
            center_y - radius,
            radius,
            &solid_paint(WHITE.with_alpha(0.4)),
        );
    }

    if let Some(font) = font {
        let label = TextStyle {
            size: 26.0,
            fill: TextFill::Solid(WHITE.opaque()),
            align: Align::Center,
        };
        draw_text(canvas, font, &label, &format!("#{}", rank), BADGE_CENTER_X, center_y);
    }
}

fn circle_mask(width: u32, height: u32, cx: f32, cy: f32, radius: f32) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let path = PathBuilder::from_circle(cx, cy, radius)?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

fn draw_icon(canvas: &mut Pixmap, icon: Option<&Pixmap>, row_top: f32) {
    let radius = ICON_SIZE / 2.0;
    let cx = ICON_X + radius;
    let cy = row_top + ROW_HEIGHT as f32 / 2.0;
    let accent = solid_paint(ACCENT_DARK.opaque());

    let clip = circle_mask(canvas.width(), canvas.height(), cx, cy, radius);
    let (Some(icon), Some(clip)) = (icon, clip) else {
        fill_circle(canvas, cx, cy, radius, &accent);
        return;
    };

    fill_circle(canvas, cx, cy, radius + ICON_RING_WIDTH, &accent);

    let icon_y = row_top + (ROW_HEIGHT as f32 - ICON_SIZE) / 2.0;
    let transform = Transform::from_row(
        ICON_SIZE / icon.width() as f32,
        0.0,
        0.0,
        ICON_SIZE / icon.height() as f32,
        ICON_X,
        icon_y,
    );
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..Default::default()
    };
    canvas.draw_pixmap(0, 0, icon.as_ref(), &paint, transform, Some(&clip));
}
