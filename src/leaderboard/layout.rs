use tiny_skia::Color;

pub const CANVAS_WIDTH: u32 = 900;
pub const HEADER_HEIGHT: u32 = 180;
pub const ROW_HEIGHT: u32 = 100;
pub const FOOTER_HEIGHT: u32 = 50;

pub const STAR_COUNT: usize = 200;
pub const STAR_MAX_RADIUS: f32 = 1.5;

pub const NEBULA_INNER_RADIUS: f32 = 50.0;
pub const NEBULA_OUTER_RADIUS: f32 = 400.0;

pub const DIVIDER_Y: f32 = 150.0;

pub const BADGE_CENTER_X: f32 = 80.0;
pub const BADGE_RADIUS: f32 = 35.0;

pub const ICON_X: f32 = 160.0;
pub const ICON_SIZE: f32 = 70.0;
pub const ICON_RING_WIDTH: f32 = 3.0;

pub const NAME_X: f32 = 250.0;
pub const NAME_CHAR_BUDGET: usize = 25;
pub const COUNT_RIGHT_MARGIN: f32 = 70.0;
pub const SEPARATOR_MARGIN: f32 = 50.0;

pub const TITLE: &str = "TOP VOICE";
pub const SUBTITLE: &str = "live across every server";
pub const FOOTER_CAPTION: &str = "Generated by voicescope • Voice Activity Tracker";

pub const FILENAME: &str = "top_voice.png";

/// An opaque sRGB color usable in constant tables
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn opaque(self) -> Color {
        Color::from_rgba8(self.0, self.1, self.2, 255)
    }

    pub fn with_alpha(self, alpha: f32) -> Color {
        Color::from_rgba8(self.0, self.1, self.2, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

pub const BACKGROUND: Rgb = Rgb(0x0a, 0x0a, 0x18);
pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
pub const ACCENT_LIGHT: Rgb = Rgb(0x8f, 0x94, 0xfb);
pub const ACCENT_DARK: Rgb = Rgb(0x4e, 0x54, 0xc8);
pub const NEBULA: Rgb = Rgb(105, 90, 166);
pub const ROW_TINT: Rgb = Rgb(79, 84, 200);

/// Look of a circular rank badge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeStyle {
    pub center: Rgb,
    pub edge: Rgb,
    pub highlight: bool,
}

pub const GOLD: BadgeStyle = BadgeStyle {
    center: Rgb(0xff, 0xd7, 0x00),
    edge: Rgb(0xd4, 0xaf, 0x37),
    highlight: true,
};

pub const SILVER: BadgeStyle = BadgeStyle {
    center: Rgb(0xc0, 0xc0, 0xc0),
    edge: Rgb(0xa9, 0xa9, 0xa9),
    highlight: true,
};

pub const BRONZE: BadgeStyle = BadgeStyle {
    center: Rgb(0xcd, 0x7f, 0x32),
    edge: Rgb(0x8c, 0x6b, 0x46),
    highlight: true,
};

pub const STANDARD: BadgeStyle = BadgeStyle {
    center: ACCENT_LIGHT,
    edge: ACCENT_DARK,
    highlight: false,
};

/// Ranks up to `max_rank` (inclusive) use `style`; `None` covers everything after
pub struct RankTier {
    pub max_rank: Option<usize>,
    pub style: BadgeStyle,
}

pub const RANK_TIERS: &[RankTier] = &[
    RankTier { max_rank: Some(1), style: GOLD },
    RankTier { max_rank: Some(2), style: SILVER },
    RankTier { max_rank: Some(3), style: BRONZE },
    RankTier { max_rank: None, style: STANDARD },
];

/// Badge style for a 1-based rank
pub fn badge_style(rank: usize) -> BadgeStyle {
    RANK_TIERS
        .iter()
        .find(|tier| tier.max_rank.is_none_or(|max| rank <= max))
        .map(|tier| tier.style)
        .unwrap_or(STANDARD)
}

pub fn canvas_height(entry_count: usize) -> u32 {
    HEADER_HEIGHT + ROW_HEIGHT * entry_count as u32 + FOOTER_HEIGHT
}

/// Top edge of the row at a 0-based position
pub fn row_top(position: usize) -> f32 {
    (HEADER_HEIGHT + ROW_HEIGHT * position as u32) as f32
}
