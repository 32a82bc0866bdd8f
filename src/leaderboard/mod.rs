/// Voice leaderboard image: layout table, text rasterizing, icon loading and drawing
mod icons;
mod layout;
mod render;
mod text;

pub use icons::load_icons;
pub use render::{RenderError, RenderedImage, render};
pub use text::locate_font;
