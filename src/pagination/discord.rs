use std::sync::Arc;

use poise::serenity_prelude::{
    self as serenity, ChannelId, ComponentInteraction, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditMessage, MessageId,
};

use crate::constants::{NAV_NEXT_ID, NAV_PREVIOUS_ID};
use crate::models::Error;
use crate::pages::Page;

use super::controller::ArtifactSurface;
use super::state::Controls;

/// Previous/next buttons for the given control state
pub fn navigation_row(controls: Controls) -> CreateActionRow {
    let previous = CreateButton::new(NAV_PREVIOUS_ID)
        .label("⬅️ Previous")
        .style(serenity::ButtonStyle::Primary)
        .disabled(controls.previous_disabled);

    let next = CreateButton::new(NAV_NEXT_ID)
        .label("➡️ Next")
        .style(serenity::ButtonStyle::Primary)
        .disabled(controls.next_disabled);

    CreateActionRow::Buttons(vec![previous, next])
}

/// A paginated message sent to a Discord channel
pub struct MessageSurface {
    http: Arc<serenity::Http>,
    channel_id: ChannelId,
    message_id: MessageId,
}

impl MessageSurface {
    pub fn new(http: Arc<serenity::Http>, channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }
}

impl ArtifactSurface for MessageSurface {
    type Ack = ComponentInteraction;

    async fn show(
        &self,
        page: &Page,
        controls: Controls,
        ack: ComponentInteraction,
    ) -> Result<(), Error> {
        let response = CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .embed(page.to_embed())
                .components(vec![navigation_row(controls)]),
        );
        ack.create_response(self.http.as_ref(), response).await?;
        Ok(())
    }

    async fn strip_controls(&self) -> Result<(), Error> {
        self.channel_id
            .edit_message(
                self.http.as_ref(),
                self.message_id,
                EditMessage::new().components(vec![]),
            )
            .await?;
        Ok(())
    }
}
