use std::{future::Future, pin::Pin};

use super::super::context::ComponentInteractionContext;
use super::super::definition::{ComponentDefinition, InteractionKind};
use super::InteractionHandler;
use crate::Error;

pub type ComponentFunc<T> = fn(
    ComponentInteractionContext<T>,
) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>;

/// A loaded button or select menu entry. Component kinds carry no cool time.
pub struct ComponentHandler<T: Clone + Send + Sync> {
    pub kind: InteractionKind,
    pub definition: ComponentDefinition,
    pub func: ComponentFunc<T>,
}

impl<T: Clone + Send + Sync> InteractionHandler<String> for ComponentHandler<T> {
    fn key(&self) -> String {
        self.definition.custom_id.clone()
    }
}

impl<T: Clone + Send + Sync> ComponentHandler<T> {
    pub fn new(kind: InteractionKind, definition: ComponentDefinition, func: ComponentFunc<T>) -> Self {
        Self {
            kind,
            definition,
            func,
        }
    }

    /// Callback for definitions nothing was bound to.
    pub fn noop(
        _ctx: ComponentInteractionContext<T>,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(std::future::ready(Ok(())))
    }

    pub async fn run(&self, ctx: ComponentInteractionContext<T>) -> Result<(), Error> {
        (self.func)(ctx).await
    }
}
