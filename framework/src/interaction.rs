use twilight_model::{
    application::interaction::{InteractionData, InteractionType},
    gateway::payload::incoming::InteractionCreate,
};

use super::context;
use crate::context::Context;
use crate::error::DispatchError;

/// Classify an inbound interaction and build the context its handler
/// receives. Ping and autocomplete interactions have no handler container
/// here and come back as `Unsupported`.
pub fn parse<T: Clone + Send + Sync>(
    event: &InteractionCreate,
    ctx: Context<T>,
) -> Result<context::InteractionContext<T>, DispatchError> {
    match event.kind {
        InteractionType::ApplicationCommand => {
            let Some(InteractionData::ApplicationCommand(command)) = &event.data else {
                return Err(DispatchError::Unsupported(event.kind));
            };

            Ok(context::InteractionContext::<T>::Command(
                context::CommandContext::from_context(ctx, event.clone(), *command.clone()),
            ))
        }
        InteractionType::MessageComponent => {
            let Some(InteractionData::MessageComponent(interaction)) = &event.data else {
                return Err(DispatchError::Unsupported(event.kind));
            };

            Ok(context::InteractionContext::<T>::ComponentInteraction(
                context::ComponentInteractionContext::from_context(
                    ctx,
                    event.clone(),
                    *interaction.clone(),
                ),
            ))
        }
        InteractionType::ModalSubmit => {
            let Some(InteractionData::ModalSubmit(data)) = &event.data else {
                return Err(DispatchError::Unsupported(event.kind));
            };

            Ok(context::InteractionContext::<T>::Modal(
                context::ModalContext::from_context(ctx, event.clone(), data.clone()),
            ))
        }
        kind => Err(DispatchError::Unsupported(kind)),
    }
}
