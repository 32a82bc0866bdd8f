use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::{
    models::Data,
    pagination::{Direction, NavigationEvent},
};

/// Handle component interactions (button clicks)
pub fn handle_interaction(interaction: serenity::ComponentInteraction, data: &Data) {
    let Some(direction) = Direction::from_custom_id(&interaction.data.custom_id) else {
        return;
    };

    let user_id = interaction.user.id;
    let artifact_id = interaction.message.id;
    let event = NavigationEvent {
        user_id,
        artifact_id,
        direction,
        ack: interaction,
    };

    // Presses on expired or unknown messages get no answer
    if !data.sessions.route(event) {
        debug!(
            "Press from {} on message {} was not delivered",
            user_id, artifact_id
        );
    }
}
