use std::sync::Arc;

use twilight_http::{client::InteractionClient, Client};
use twilight_model::id::{marker::ApplicationMarker, Id};

pub mod command_context;
pub mod component_interaction_context;
pub mod modal_context;

pub use command_context::CommandContext;
pub use component_interaction_context::ComponentInteractionContext;
pub use modal_context::ModalContext;

/// Process-wide state handed to every handler invocation.
#[derive(Debug)]
pub struct Context<T: Clone + Send + Sync> {
    pub application_id: Id<ApplicationMarker>,
    pub services: T,
    pub client: Arc<Client>,
}

impl<T: Clone + Send + Sync> Context<T> {
    pub fn new(application_id: Id<ApplicationMarker>, services: T, client: Arc<Client>) -> Self {
        Self {
            application_id,
            services,
            client,
        }
    }

    pub fn interaction(&self) -> InteractionClient<'_> {
        self.client.interaction(self.application_id)
    }
}

impl<T: Clone + Send + Sync> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            application_id: self.application_id,
            services: self.services.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

/// An inbound interaction classified into one of the routed shapes, paired
/// with the context its handler receives.
pub enum InteractionContext<T: Clone + Send + Sync> {
    Command(CommandContext<T>),
    ComponentInteraction(ComponentInteractionContext<T>),
    Modal(ModalContext<T>),
}
