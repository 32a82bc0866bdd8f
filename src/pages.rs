use chrono::{DateTime, Utc};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::{
    aggregate::GroupMembershipRecord,
    utils::{
        datetime::format_joined_at,
        string_utils::{join_or, yes_no},
    },
};

/// A titled block of text on a card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageField {
    pub name: String,
    pub value: String,
}

/// One card of a lookup result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub thumbnail_url: String,
    pub fields: Vec<PageField>,
    pub footer: String,
    pub footer_icon: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl Page {
    fn from_record(
        record: &GroupMembershipRecord,
        index: usize,
        footer_icon: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let guild_info = format!(
            "**Name:** {}\n**ID:** `{}`",
            record.group_name, record.group_id
        );
        let user_info = format!(
            "**ID:** `{}`\n**Nickname:** {}\n**Joined:** {}",
            record.member_id,
            record.nickname.as_deref().unwrap_or("None"),
            format_joined_at(record.joined_at)
        );
        let status = format!(
            "**Roles:** {}\n**Owner:** {}\n**Admin:** {}\n**Booster:** {}",
            join_or(&record.role_names, ", ", "No roles"),
            yes_no(record.is_owner),
            yes_no(record.is_admin),
            yes_no(record.is_booster)
        );

        Self {
            title: record.group_name.clone(),
            thumbnail_url: record.icon_url.clone(),
            fields: vec![
                PageField {
                    name: "📌 Guild Info".to_string(),
                    value: guild_info,
                },
                PageField {
                    name: "👤 User Info".to_string(),
                    value: user_info,
                },
                PageField {
                    name: "🎭 Roles & Status".to_string(),
                    value: status,
                },
            ],
            footer: format!("Page {}", index + 1),
            footer_icon: footer_icon.map(str::to_string),
            generated_at,
        }
    }

    /// Build the embed delivered to Discord
    pub fn to_embed(&self) -> CreateEmbed {
        let mut footer = CreateEmbedFooter::new(&self.footer);
        if let Some(icon) = &self.footer_icon {
            footer = footer.icon_url(icon);
        }

        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .thumbnail(&self.thumbnail_url)
            .fields(
                self.fields
                    .iter()
                    .map(|field| (field.name.clone(), field.value.clone(), false)),
            )
            .footer(footer);

        if let Ok(timestamp) = Timestamp::from_unix_timestamp(self.generated_at.timestamp()) {
            embed = embed.timestamp(timestamp);
        }

        embed
    }
}

/// Ordered, never-empty sequence of pages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSequence {
    pages: Vec<Page>,
}

impl PageSequence {
    pub fn new(pages: Vec<Page>) -> Option<Self> {
        if pages.is_empty() {
            None
        } else {
            Some(Self { pages })
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn last_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn first(&self) -> &Page {
        &self.pages[0]
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }
}

/// One page per record, in record order. `None` when there are no records.
pub fn build_pages(
    records: &[GroupMembershipRecord],
    footer_icon: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Option<PageSequence> {
    let pages = records
        .iter()
        .enumerate()
        .map(|(index, record)| Page::from_record(record, index, footer_icon, generated_at))
        .collect();

    PageSequence::new(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use poise::serenity_prelude::{GuildId, UserId};

    fn record(group: u64, name: &str) -> GroupMembershipRecord {
        GroupMembershipRecord {
            group_id: GuildId::new(group),
            group_name: name.to_string(),
            icon_url: format!("https://cdn.example/{}.png", group),
            member_id: UserId::new(42),
            nickname: None,
            joined_at: None,
            role_names: Vec::new(),
            is_owner: false,
            is_admin: false,
            is_booster: false,
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_build_pages_empty() {
        assert!(build_pages(&[], None, generated_at()).is_none());
    }

    #[test]
    fn test_build_pages_one_per_record_with_page_numbers() {
        let records: Vec<_> = (1..=4).map(|n| record(n, &format!("Server {}", n))).collect();
        let pages = build_pages(&records, None, generated_at()).unwrap();

        assert_eq!(pages.len(), 4);
        for i in 0..4 {
            let page = pages.get(i).unwrap();
            assert_eq!(page.footer, format!("Page {}", i + 1));
            assert_eq!(page.title, format!("Server {}", i + 1));
        }
        assert_eq!(pages.last_index(), 3);
    }

    #[test]
    fn test_page_content_defaults() {
        let pages = build_pages(&[record(5, "Lounge")], Some("https://cdn.example/bot.png"), generated_at())
            .unwrap();
        let page = pages.first();

        assert_eq!(page.thumbnail_url, "https://cdn.example/5.png");
        assert_eq!(page.footer_icon.as_deref(), Some("https://cdn.example/bot.png"));
        assert_eq!(page.fields.len(), 3);
        assert!(page.fields[0].value.contains("**ID:** `5`"));
        assert!(page.fields[1].value.contains("**Nickname:** None"));
        assert!(page.fields[1].value.contains("**Joined:** Unknown"));
        assert!(page.fields[2].value.contains("**Roles:** No roles"));
        assert!(page.fields[2].value.contains("**Owner:** No"));
    }

    #[test]
    fn test_page_content_with_details() {
        let mut full = record(5, "Lounge");
        full.nickname = Some("Ace".to_string());
        full.joined_at = Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        full.role_names = vec!["Admin".to_string(), "Member".to_string()];
        full.is_owner = true;
        full.is_admin = true;
        full.is_booster = true;

        let pages = build_pages(&[full], None, generated_at()).unwrap();
        let page = pages.first();

        assert!(page.fields[1].value.contains("**Nickname:** Ace"));
        assert!(page.fields[1].value.contains("<t:1609459200:F>"));
        assert!(page.fields[2].value.contains("**Roles:** Admin, Member"));
        assert!(page.fields[2].value.contains("**Owner:** Yes"));
        assert!(page.fields[2].value.contains("**Admin:** Yes"));
        assert!(page.fields[2].value.contains("**Booster:** Yes"));
    }

    #[test]
    fn test_pages_share_generation_time() {
        let records = vec![record(1, "A"), record(2, "B")];
        let pages = build_pages(&records, None, generated_at()).unwrap();

        assert_eq!(pages.first().generated_at, pages.get(1).unwrap().generated_at);
    }
}
