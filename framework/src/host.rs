use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use twilight_http::{client::InteractionClient, Client};
use twilight_model::id::{
    marker::{ApplicationMarker, CommandMarker, GuildMarker},
    Id,
};

use crate::definition::{CommandDefinition, InteractionKind};

/// What reconciliation needs to know about a command already registered at
/// the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCommand {
    pub id: Id<CommandMarker>,
    pub name: String,
    pub guild_id: Option<Id<GuildMarker>>,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("discord request failed")]
    Http(#[from] twilight_http::Error),

    #[error("discord response could not be deserialized")]
    Response(#[from] twilight_http::response::DeserializeBodyError),

    /// The name is registered remotely, but not for the requested guild, so
    /// there is nothing to edit.
    #[error("command {name:?} is registered remotely but not for the requested guild")]
    GuildMismatch { name: String },
}

/// The remote command store: fetch what is registered, create one record,
/// update one record.
#[async_trait]
pub trait CommandHost: Send + Sync {
    async fn fetch_commands(&self) -> Result<Vec<RemoteCommand>, HostError>;

    async fn create_command(
        &self,
        kind: InteractionKind,
        definition: &CommandDefinition,
        guild_id: Option<Id<GuildMarker>>,
    ) -> Result<(), HostError>;

    async fn update_command(
        &self,
        remote: &RemoteCommand,
        kind: InteractionKind,
        definition: &CommandDefinition,
    ) -> Result<(), HostError>;
}

/// `CommandHost` over twilight's interaction client.
pub struct HttpCommandHost {
    client: Arc<Client>,
    application_id: Id<ApplicationMarker>,
}

impl HttpCommandHost {
    pub fn new(client: Arc<Client>, application_id: Id<ApplicationMarker>) -> Self {
        Self {
            client,
            application_id,
        }
    }

    fn interaction(&self) -> InteractionClient<'_> {
        self.client.interaction(self.application_id)
    }
}

#[async_trait]
impl CommandHost for HttpCommandHost {
    async fn fetch_commands(&self) -> Result<Vec<RemoteCommand>, HostError> {
        let commands = self.interaction().global_commands().await?.models().await?;

        Ok(commands
            .into_iter()
            .filter_map(|command| {
                Some(RemoteCommand {
                    id: command.id?,
                    name: command.name,
                    guild_id: command.guild_id,
                })
            })
            .collect())
    }

    async fn create_command(
        &self,
        kind: InteractionKind,
        definition: &CommandDefinition,
        guild_id: Option<Id<GuildMarker>>,
    ) -> Result<(), HostError> {
        let client = self.interaction();

        match (guild_id, kind) {
            (Some(guild_id), InteractionKind::ChatInput) => {
                let mut request = client
                    .create_guild_command(guild_id)
                    .chat_input(&definition.name, &definition.description)
                    .command_options(&definition.options);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                if let Some(nsfw) = definition.nsfw {
                    request = request.nsfw(nsfw);
                }
                request.await?;
            }
            (Some(guild_id), InteractionKind::UserContext) => {
                let mut request = client.create_guild_command(guild_id).user(&definition.name);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                request.await?;
            }
            (Some(guild_id), InteractionKind::MessageContext) => {
                let mut request = client
                    .create_guild_command(guild_id)
                    .message(&definition.name);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                request.await?;
            }
            (None, InteractionKind::ChatInput) => {
                let mut request = client
                    .create_global_command()
                    .chat_input(&definition.name, &definition.description)
                    .command_options(&definition.options);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                if let Some(nsfw) = definition.nsfw {
                    request = request.nsfw(nsfw);
                }
                request.await?;
            }
            (None, InteractionKind::UserContext) => {
                let mut request = client.create_global_command().user(&definition.name);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                request.await?;
            }
            (None, InteractionKind::MessageContext) => {
                let mut request = client.create_global_command().message(&definition.name);
                if let Some(permissions) = definition.default_member_permissions {
                    request = request.default_member_permissions(permissions);
                }
                request.await?;
            }
            // component and modal kinds have no remote registration
            _ => {}
        }

        Ok(())
    }

    async fn update_command(
        &self,
        remote: &RemoteCommand,
        kind: InteractionKind,
        definition: &CommandDefinition,
    ) -> Result<(), HostError> {
        let client = self.interaction();

        match remote.guild_id {
            Some(guild_id) => {
                let mut request = client
                    .update_guild_command(guild_id, remote.id)
                    .name(&definition.name);
                if kind == InteractionKind::ChatInput {
                    request = request
                        .description(&definition.description)
                        .command_options(&definition.options);
                }
                request.await?;
            }
            None => {
                let mut request = client.update_global_command(remote.id).name(&definition.name);
                if kind == InteractionKind::ChatInput {
                    request = request
                        .description(&definition.description)
                        .command_options(&definition.options);
                }
                request.await?;
            }
        }

        Ok(())
    }
}
