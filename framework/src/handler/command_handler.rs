use std::{future::Future, pin::Pin};

use twilight_model::id::{marker::GuildMarker, Id};

use super::super::context::CommandContext;
use super::super::cooldown::Cooldown;
use super::super::definition::{CommandDefinition, InteractionKind};
use super::InteractionHandler;
use crate::Error;

pub type CommandFunc<T> =
    fn(CommandContext<T>) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>;

/// A loaded chat input command or context menu entry, carrying its cool-time
/// state alongside the definition.
pub struct CommandHandler<T: Clone + Send + Sync> {
    pub kind: InteractionKind,
    pub definition: CommandDefinition,
    pub cooldown: Cooldown,
    pub func: CommandFunc<T>,
}

impl<T: Clone + Send + Sync> InteractionHandler<String> for CommandHandler<T> {
    fn key(&self) -> String {
        self.definition.name.clone()
    }
}

impl<T: Clone + Send + Sync> CommandHandler<T> {
    pub fn new(kind: InteractionKind, definition: CommandDefinition, func: CommandFunc<T>) -> Self {
        let cooldown = Cooldown::from_millis(definition.cool_time_millis());

        Self {
            kind,
            definition,
            cooldown,
            func,
        }
    }

    /// Callback for definitions nothing was bound to.
    pub fn noop(_ctx: CommandContext<T>) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(std::future::ready(Ok(())))
    }

    pub fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.definition.guild_id
    }

    /// Stamp the invoking user's cool time and execute. Whether the user was
    /// allowed through is decided by the dispatcher before this call.
    pub async fn run(&self, ctx: CommandContext<T>) -> Result<(), Error> {
        if let Some(user) = ctx.event.author_id() {
            self.cooldown.stamp(user);
        }

        (self.func)(ctx).await
    }
}
