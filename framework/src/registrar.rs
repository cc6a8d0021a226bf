use std::sync::Arc;

use twilight_model::id::{marker::GuildMarker, Id};

use crate::definition::{CommandDefinition, InteractionKind};
use crate::events::{FrameworkEvent, RegisterFailure};
use crate::handler::command_handler::CommandHandler;
use crate::host::{CommandHost, HostError, RemoteCommand};
use crate::registry::{InteractionRegistry, Registry};

/// Reconcile every loaded command-like record with the set registered at the
/// platform: records whose name is already taken are edited in place, the
/// rest are created. One record's failure is reported through the `Error`
/// event and never stops its siblings; only the initial fetch fails the call
/// itself.
///
/// `guild_id` scopes the pass: with one set, registrations land in that
/// guild (unless the definition pins its own) and only remote records of
/// that guild are editable. A definition-level `guild_id` always wins over
/// the parameter when creating.
pub async fn register_commands<T: Clone + Send + Sync>(
    registry: &Registry<T>,
    host: &dyn CommandHost,
    guild_id: Option<Id<GuildMarker>>,
) -> Result<(), HostError> {
    let remote = host.fetch_commands().await?;

    sync_container(
        registry,
        &registry.commands,
        InteractionKind::ChatInput,
        &remote,
        host,
        guild_id,
        FrameworkEvent::CommandAdded,
        FrameworkEvent::CommandEdited,
    )
    .await;
    sync_container(
        registry,
        &registry.user_contexts,
        InteractionKind::UserContext,
        &remote,
        host,
        guild_id,
        FrameworkEvent::UserContextAdded,
        FrameworkEvent::UserContextEdited,
    )
    .await;
    sync_container(
        registry,
        &registry.message_contexts,
        InteractionKind::MessageContext,
        &remote,
        host,
        guild_id,
        FrameworkEvent::MessageContextAdded,
        FrameworkEvent::MessageContextEdited,
    )
    .await;

    Ok(())
}

#[expect(
    clippy::too_many_arguments,
    reason = "one call per command-like container, not part of the public surface"
)]
async fn sync_container<T: Clone + Send + Sync>(
    registry: &Registry<T>,
    container: &InteractionRegistry<String, CommandHandler<T>>,
    kind: InteractionKind,
    remote: &[RemoteCommand],
    host: &dyn CommandHost,
    guild_id: Option<Id<GuildMarker>>,
    added: fn(CommandDefinition) -> FrameworkEvent,
    edited: fn(CommandDefinition) -> FrameworkEvent,
) {
    for command in container.values() {
        let definition = &command.definition;

        let name_taken = remote.iter().any(|r| r.name == definition.name);
        let result = if name_taken {
            // Name matches alone when no guild is requested; name and guild
            // when one is. A name held only by some other guild has no
            // editable counterpart here.
            let matched = remote.iter().find(|r| {
                r.name == definition.name
                    && guild_id.map_or(true, |requested| r.guild_id == Some(requested))
            });

            match matched {
                Some(found) => host
                    .update_command(found, kind, definition)
                    .await
                    .map(|()| edited(definition.clone())),
                None => Err(HostError::GuildMismatch {
                    name: definition.name.clone(),
                }),
            }
        } else {
            host.create_command(kind, definition, definition.guild_id.or(guild_id))
                .await
                .map(|()| added(definition.clone()))
        };

        match result {
            Ok(event) => registry.emit(event),
            Err(error) => {
                tracing::warn!(%kind, name = %definition.name, %error, "command registration failed");
                registry.emit(FrameworkEvent::Error(RegisterFailure {
                    kind,
                    name: definition.name.clone(),
                    error: Arc::new(error),
                }));
            }
        }
    }
}
