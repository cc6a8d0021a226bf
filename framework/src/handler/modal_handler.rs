use std::{future::Future, pin::Pin};

use super::super::context::ModalContext;
use super::super::definition::ComponentDefinition;
use super::InteractionHandler;
use crate::Error;

pub type ModalFunc<T> =
    fn(ModalContext<T>) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>;

/// A loaded modal entry, keyed by the custom id of the submitted form.
pub struct ModalHandler<T: Clone + Send + Sync> {
    pub definition: ComponentDefinition,
    pub func: ModalFunc<T>,
}

impl<T: Clone + Send + Sync> InteractionHandler<String> for ModalHandler<T> {
    fn key(&self) -> String {
        self.definition.custom_id.clone()
    }
}

impl<T: Clone + Send + Sync> ModalHandler<T> {
    pub fn new(definition: ComponentDefinition, func: ModalFunc<T>) -> Self {
        Self { definition, func }
    }

    /// Callback for definitions nothing was bound to.
    pub fn noop(_ctx: ModalContext<T>) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(std::future::ready(Ok(())))
    }

    pub async fn run(&self, ctx: ModalContext<T>) -> Result<(), Error> {
        (self.func)(ctx).await
    }
}
