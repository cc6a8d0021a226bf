use std::sync::Arc;

use twilight_http::{client::InteractionClient, response::marker::EmptyBody, Client};
use twilight_model::{
    application::interaction::modal::ModalInteractionData,
    gateway::payload::incoming::InteractionCreate,
    http::interaction::InteractionResponse,
    id::{marker::ApplicationMarker, Id},
};

use super::Context;

#[derive(Clone, Debug)]
pub struct ModalContext<T: Clone + Send + Sync> {
    pub application_id: Id<ApplicationMarker>,
    pub services: T,
    pub client: Arc<Client>,

    pub event: InteractionCreate,
    pub data: ModalInteractionData,
}

impl<T: Clone + Send + Sync> ModalContext<T> {
    pub fn from_context(
        ctx: Context<T>,
        event: InteractionCreate,
        data: ModalInteractionData,
    ) -> Self {
        Self {
            application_id: ctx.application_id,
            services: ctx.services,
            client: ctx.client,
            event,
            data,
        }
    }

    pub fn interaction(&self) -> InteractionClient<'_> {
        self.client.interaction(self.application_id)
    }

    pub async fn response(
        &self,
        response: InteractionResponse,
    ) -> Result<twilight_http::Response<EmptyBody>, twilight_http::Error> {
        self.interaction()
            .create_response(self.event.id, &self.event.token, &response)
            .await
    }
}
