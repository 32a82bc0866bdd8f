use tiny_skia::Pixmap;
use tracing::warn;

use crate::aggregate::LeaderboardEntry;

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("icon request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("icon is not a decodable PNG: {0}")]
    Decode(String),
}

/// Decode downloaded icon bytes
pub fn decode_icon(bytes: &[u8]) -> Result<Pixmap, IconError> {
    Pixmap::decode_png(bytes).map_err(|e| IconError::Decode(e.to_string()))
}

async fn fetch_icon(client: &reqwest::Client, url: &str) -> Result<Pixmap, IconError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    decode_icon(&bytes)
}

/// Fetch every entry's icon; failures become `None` and get a placeholder when drawn
pub async fn load_icons(client: &reqwest::Client, entries: &[LeaderboardEntry]) -> Vec<Option<Pixmap>> {
    let mut icons = Vec::with_capacity(entries.len());

    for entry in entries {
        let icon = match fetch_icon(client, &entry.icon_url).await {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("Error loading icon for {}: {}", entry.group_name, e);
                None
            }
        };
        icons.push(icon);
    }

    icons
}
