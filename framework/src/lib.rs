use twilight_gateway::Event;
use twilight_model::{
    application::command::CommandType, channel::message::component::ComponentType,
    gateway::payload::incoming::InteractionCreate,
};

pub use context::{Context, InteractionContext};
pub use definition::{
    CommandDefinition, ComponentDefinition, DefinitionDocument, HandlerDefinition, InteractionKind,
};
pub use error::{DispatchError, LoadError};
pub use events::{FrameworkEvent, RegisterFailure, RegistrySnapshot};
pub use host::{CommandHost, HostError, HttpCommandHost, RemoteCommand};
pub use loader::{load_all, load_all_with, HandlerSet};
pub use registrar::register_commands;
pub use registry::{InteractionRegistry, Registry};

pub mod context;
pub mod cooldown;
pub mod definition;
pub mod error;
pub mod events;
pub mod handler;
pub mod host;
pub mod interaction;
pub mod loader;
pub mod macros;
pub mod registrar;
pub mod registry;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Route one interaction to its handler: classify, look up by key, gate
/// command kinds on the invoking user's cool time, run. At most one handler
/// runs per event and every refusal comes back as a `DispatchError`.
pub async fn handle_interaction<T: Clone + Send + Sync + 'static>(
    registry: &Registry<T>,
    context: Context<T>,
    event: InteractionCreate,
) -> Result<(), DispatchError> {
    match interaction::parse(&event, context)? {
        InteractionContext::Command(ctx) => {
            let (kind, container) = match ctx.command.kind {
                CommandType::ChatInput => (InteractionKind::ChatInput, &registry.commands),
                CommandType::User => (InteractionKind::UserContext, &registry.user_contexts),
                CommandType::Message => {
                    (InteractionKind::MessageContext, &registry.message_contexts)
                }
                _ => return Err(DispatchError::Unsupported(event.kind)),
            };

            let name = ctx.command.name.clone();
            let Some(command) = container.get(&name) else {
                return Err(DispatchError::NotLoaded { kind, key: name });
            };

            // Gate and stamp atomically, a second dispatch for the same user
            // cannot slip through while this one is still running.
            if let Some(user) = ctx.event.author_id() {
                if let Err(remaining) = command.cooldown.claim(user) {
                    return Err(DispatchError::CoolTimeActive {
                        kind,
                        name,
                        remaining,
                    });
                }
            }

            command.run(ctx).await.map_err(DispatchError::Handler)
        }
        InteractionContext::ComponentInteraction(ctx) => {
            // Every non-button component interaction is one of the select
            // menu flavours.
            let (kind, container) = match ctx.interaction.component_type {
                ComponentType::Button => (InteractionKind::Button, &registry.buttons),
                _ => (InteractionKind::SelectMenu, &registry.select_menus),
            };

            let custom_id = ctx.interaction.custom_id.clone();
            let Some(component) = container.get(&custom_id) else {
                return Err(DispatchError::NotLoaded {
                    kind,
                    key: custom_id,
                });
            };

            component.run(ctx).await.map_err(DispatchError::Handler)
        }
        InteractionContext::Modal(ctx) => {
            let custom_id = ctx.data.custom_id.clone();
            let Some(modal) = registry.modals.get(&custom_id) else {
                return Err(DispatchError::NotLoaded {
                    kind: InteractionKind::Modal,
                    key: custom_id,
                });
            };

            modal.run(ctx).await.map_err(DispatchError::Handler)
        }
    }
}

/// Gateway-loop adapter: pick interactions out of the event stream, dispatch
/// them, and log refusals instead of returning them.
pub async fn handle<T: Clone + Send + Sync + 'static>(
    registry: &Registry<T>,
    ctx: Context<T>,
    event: Event,
) {
    match event {
        Event::InteractionCreate(event) => {
            if let Err(err) = handle_interaction(registry, ctx, *event).await {
                tracing::warn!(%err, "interaction not dispatched");
            }
        }
        e => tracing::debug!(event = ?e.kind(), "ignoring non-interaction event"),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        future::Future,
        pin::Pin,
        sync::{Arc, Mutex},
    };

    use serde_json::json;
    use twilight_http::Client;
    use twilight_model::application::interaction::InteractionType;
    use twilight_model::gateway::payload::incoming::InteractionCreate;
    use twilight_model::id::Id;

    use super::*;
    use crate::context::{CommandContext, ComponentInteractionContext, ModalContext};
    use crate::handler::{
        command_handler::CommandHandler, component_handler::ComponentHandler,
        modal_handler::ModalHandler,
    };

    #[derive(Clone)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn push(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }

        fn take(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn record_command(
        ctx: CommandContext<Recorder>,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(async move {
            ctx.services.push(format!("command:{}", ctx.command.name));
            Ok(())
        })
    }

    fn failing_command(
        _ctx: CommandContext<Recorder>,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(async move { Err("boom".into()) })
    }

    fn record_component(
        ctx: ComponentInteractionContext<Recorder>,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(async move {
            ctx.services.push(format!(
                "component:{}:{}",
                ctx.interaction.custom_id,
                ctx.interaction.values.join("+"),
            ));
            Ok(())
        })
    }

    fn record_modal(
        ctx: ModalContext<Recorder>,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send>> {
        Box::pin(async move {
            ctx.services.push(format!("modal:{}", ctx.data.custom_id));
            Ok(())
        })
    }

    fn context(services: Recorder) -> Context<Recorder> {
        Context::new(
            Id::new(1),
            services,
            Arc::new(Client::new("test-token".to_string())),
        )
    }

    fn command_definition(name: &str, cool_time: Option<u64>) -> CommandDefinition {
        CommandDefinition {
            name: name.to_string(),
            description: String::new(),
            options: Vec::new(),
            default_member_permissions: None,
            nsfw: None,
            guild_id: None,
            cool_time,
        }
    }

    fn component_definition(custom_id: &str) -> ComponentDefinition {
        ComponentDefinition {
            custom_id: custom_id.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn command_interaction(name: &str, command_type: u8, user_id: u64) -> InteractionCreate {
        serde_json::from_value(json!({
            "id": "3",
            "application_id": "1",
            "type": 2,
            "token": "interaction-token",
            "authorizing_integration_owners": {},
            "entitlements": [],
            "user": {
                "id": user_id.to_string(),
                "username": "tester",
                "discriminator": "0",
                "global_name": null
            },
            "data": { "id": "10", "name": name, "type": command_type }
        }))
        .expect("valid command interaction payload")
    }

    fn component_interaction(
        custom_id: &str,
        component_type: u8,
        values: &[&str],
        user_id: u64,
    ) -> InteractionCreate {
        serde_json::from_value(json!({
            "id": "3",
            "application_id": "1",
            "type": 3,
            "token": "interaction-token",
            "authorizing_integration_owners": {},
            "entitlements": [],
            "user": {
                "id": user_id.to_string(),
                "username": "tester",
                "discriminator": "0",
                "global_name": null
            },
            "data": {
                "custom_id": custom_id,
                "component_type": component_type,
                "values": values
            }
        }))
        .expect("valid component interaction payload")
    }

    fn modal_interaction(custom_id: &str, user_id: u64) -> InteractionCreate {
        serde_json::from_value(json!({
            "id": "3",
            "application_id": "1",
            "type": 5,
            "token": "interaction-token",
            "authorizing_integration_owners": {},
            "entitlements": [],
            "user": {
                "id": user_id.to_string(),
                "username": "tester",
                "discriminator": "0",
                "global_name": null
            },
            "data": { "custom_id": custom_id, "components": [] }
        }))
        .expect("valid modal interaction payload")
    }

    fn ping_interaction() -> InteractionCreate {
        serde_json::from_value(json!({
            "id": "3",
            "application_id": "1",
            "type": 1,
            "token": "interaction-token",
            "authorizing_integration_owners": {},
            "entitlements": []
        }))
        .expect("valid ping payload")
    }

    #[tokio::test]
    async fn routes_chat_input_to_its_handler() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.commands.insert(CommandHandler::new(
            InteractionKind::ChatInput,
            command_definition("ping", None),
            record_command,
        ));

        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .expect("dispatch");

        assert_eq!(services.take(), vec!["command:ping"]);
    }

    #[tokio::test]
    async fn command_types_route_to_their_own_containers() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.commands.insert(CommandHandler::new(
            InteractionKind::ChatInput,
            command_definition("profile", None),
            failing_command,
        ));
        registry.user_contexts.insert(CommandHandler::new(
            InteractionKind::UserContext,
            command_definition("profile", None),
            record_command,
        ));

        // data.type 2 is a user context menu, the chat input container with
        // the same name must not shadow it
        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("profile", 2, 100),
        )
        .await
        .expect("dispatch");

        assert_eq!(services.take(), vec!["command:profile"]);
    }

    #[tokio::test]
    async fn unknown_key_is_not_loaded() {
        let services = Recorder::new();
        let registry = Registry::new();

        let err = handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("pong", 1, 100),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::NotLoaded { kind: InteractionKind::ChatInput, ref key } if key == "pong"
        ));
        assert!(services.take().is_empty());
    }

    #[tokio::test]
    async fn cool_time_gates_repeat_use_per_user() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.commands.insert(CommandHandler::new(
            InteractionKind::ChatInput,
            command_definition("ping", Some(5000)),
            record_command,
        ));

        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .expect("first use");

        let err = handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .unwrap_err();
        let DispatchError::CoolTimeActive {
            kind,
            ref name,
            remaining,
        } = err
        else {
            panic!("expected a cool time refusal, got {err:?}");
        };
        assert_eq!(kind, InteractionKind::ChatInput);
        assert_eq!(name, "ping");
        assert!(remaining > chrono::TimeDelta::zero());
        assert!(remaining <= chrono::TimeDelta::milliseconds(5000));

        // another user is not affected
        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 200),
        )
        .await
        .expect("second user");

        // the gated attempt ran nothing
        assert_eq!(services.take(), vec!["command:ping", "command:ping"]);
    }

    #[tokio::test]
    async fn absent_cool_time_never_gates() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.commands.insert(CommandHandler::new(
            InteractionKind::ChatInput,
            command_definition("ping", None),
            record_command,
        ));

        for _ in 0..3 {
            handle_interaction(
                &registry,
                context(services.clone()),
                command_interaction("ping", 1, 100),
            )
            .await
            .expect("dispatch");
        }

        assert_eq!(services.take().len(), 3);
    }

    #[tokio::test]
    async fn buttons_and_select_menus_route_by_custom_id() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.buttons.insert(ComponentHandler::new(
            InteractionKind::Button,
            component_definition("feedback"),
            record_component,
        ));
        registry.select_menus.insert(ComponentHandler::new(
            InteractionKind::SelectMenu,
            component_definition("feedback_topic"),
            record_component,
        ));

        handle_interaction(
            &registry,
            context(services.clone()),
            component_interaction("feedback", 2, &[], 100),
        )
        .await
        .expect("button dispatch");

        handle_interaction(
            &registry,
            context(services.clone()),
            component_interaction("feedback_topic", 3, &["bugs"], 100),
        )
        .await
        .expect("select dispatch");

        assert_eq!(
            services.take(),
            vec!["component:feedback:", "component:feedback_topic:bugs"]
        );
    }

    #[tokio::test]
    async fn button_custom_id_does_not_hit_the_select_container() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.select_menus.insert(ComponentHandler::new(
            InteractionKind::SelectMenu,
            component_definition("feedback"),
            record_component,
        ));

        let err = handle_interaction(
            &registry,
            context(services.clone()),
            component_interaction("feedback", 2, &[], 100),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::NotLoaded { kind: InteractionKind::Button, .. }
        ));
    }

    #[tokio::test]
    async fn modals_route_by_custom_id() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry
            .modals
            .insert(ModalHandler::new(component_definition("feedback_form"), record_modal));

        handle_interaction(
            &registry,
            context(services.clone()),
            modal_interaction("feedback_form", 100),
        )
        .await
        .expect("modal dispatch");

        assert_eq!(services.take(), vec!["modal:feedback_form"]);
    }

    #[tokio::test]
    async fn ping_interactions_are_unsupported() {
        let services = Recorder::new();
        let registry = Registry::new();

        let err = handle_interaction(&registry, context(services), ping_interaction())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Unsupported(InteractionType::Ping)
        ));
    }

    #[tokio::test]
    async fn handler_failure_surfaces() {
        let services = Recorder::new();
        let mut registry = Registry::new();
        registry.commands.insert(CommandHandler::new(
            InteractionKind::ChatInput,
            command_definition("ping", None),
            failing_command,
        ));

        let err = handle_interaction(
            &registry,
            context(services),
            command_interaction("ping", 1, 100),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DispatchError::Handler(_)));
    }

    #[tokio::test]
    async fn loads_from_disk_then_dispatches() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("ping.json"),
            r#"{ "type": "CHAT_INPUT", "name": "ping", "cool_time": 5000 }"#,
        )
        .expect("write definition");

        let services = Recorder::new();
        let mut registry = Registry::new();
        let handlers = HandlerSet::new().command("ping", record_command);
        load_all(&mut registry, &handlers, dir.path()).expect("load");

        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .expect("dispatch");

        let err = handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DispatchError::CoolTimeActive { .. }));
        assert_eq!(services.take(), vec!["command:ping"]);
    }

    #[tokio::test]
    async fn unbound_definition_dispatches_to_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("ping.json"),
            r#"{ "type": "CHAT_INPUT", "name": "ping" }"#,
        )
        .expect("write definition");

        let services = Recorder::new();
        let mut registry = Registry::new();
        load_all(&mut registry, &HandlerSet::new(), dir.path()).expect("load");

        handle_interaction(
            &registry,
            context(services.clone()),
            command_interaction("ping", 1, 100),
        )
        .await
        .expect("noop dispatch");

        assert!(services.take().is_empty());
    }
}
