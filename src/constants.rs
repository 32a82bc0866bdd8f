use std::time::Duration;

/// Default command prefix when COMMAND_PREFIX is unset
pub const DEFAULT_PREFIX: &str = "!";

/// Default keyword for the membership lookup command
pub const DEFAULT_LOOKUP_COMMAND: &str = "fullcheck";

/// Default keyword for the voice leaderboard command
pub const DEFAULT_LEADERBOARD_COMMAND: &str = "topvoice";

/// Icon shown when a server has none
pub const PLACEHOLDER_ICON_URL: &str = "https://i.imgur.com/AfFp7pu.png";

/// How long a paginated result stays interactive without navigation
pub const INACTIVITY_WINDOW: Duration = Duration::from_secs(60);

/// Buffered navigation events per live session
pub const SESSION_EVENT_BUFFER: usize = 16;

pub const SECONDARY_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom IDs of the navigation buttons
pub const NAV_PREVIOUS_ID: &str = "voicescope_prev";
pub const NAV_NEXT_ID: &str = "voicescope_next";

/// Maximum number of servers shown on the leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// Caption sent alongside the leaderboard image
pub const LEADERBOARD_CAPTION: &str = "**TOP VOICE STATISTICS**";

/// Font files tried when FONT_PATH is unset
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "voicescope=info";
