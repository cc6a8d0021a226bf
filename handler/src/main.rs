mod config;
mod context;
mod modules;

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};

use praatje_framework::{
    handle, load_all, register_commands, Context, FrameworkEvent, HttpCommandHost, Registry,
};

use config::Config;
use context::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // load .env into environment vars, ignore if not found
    match dotenvy::dotenv().map(|_| ()) {
        Err(err) if err.not_found() => {
            tracing::warn!("no .env file found");
        }
        result => result?,
    };

    // create config from environment vars
    let config = Config::from_env()?;

    // set-up logging
    tracing_subscriber::fmt::init();

    let client = Arc::new(twilight_http::Client::new(config.discord_token.clone()));
    let app = client.current_user_application().await?.model().await?;
    tracing::info!(application = %app.name, "logged in");

    let services = Services {
        started: chrono::Utc::now(),
    };

    // load interaction definitions and bind their callbacks
    let mut registry = Registry::new();
    spawn_event_logger(registry.subscribe());

    tracing::info!(path = %config.interactions_path, "loading interactions");
    load_all(&mut registry, &modules::handlers(), &config.interactions_path)?;

    // register commands
    tracing::info!("registering commands");
    let host = HttpCommandHost::new(Arc::clone(&client), app.id);
    register_commands(&registry, &host, config.guild_id).await?;

    let registry = Arc::new(registry);
    let context = Context::new(app.id, services, Arc::clone(&client));

    let mut shard = Shard::new(
        ShardId::ONE,
        config.discord_token.clone(),
        Intents::empty(),
    );

    // start main loop
    tracing::info!("starting main loop...");
    while let Some(item) = shard.next_event(EventTypeFlags::INTERACTION_CREATE).await {
        let Ok(event) = item else {
            tracing::warn!(source = ?item.unwrap_err(), "error receiving event");
            continue;
        };

        tokio::spawn({
            let registry = Arc::clone(&registry);
            let context = context.clone();
            async move { handle(&registry, context, event).await }
        });
    }

    Ok(())
}

fn spawn_event_logger(mut events: broadcast::Receiver<FrameworkEvent>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_framework_event(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "framework event listener lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn log_framework_event(event: FrameworkEvent) {
    match event {
        FrameworkEvent::InteractionsLoaded(snapshot) => tracing::info!(
            commands = snapshot.commands.len(),
            user_contexts = snapshot.user_contexts.len(),
            message_contexts = snapshot.message_contexts.len(),
            buttons = snapshot.buttons.len(),
            select_menus = snapshot.select_menus.len(),
            modals = snapshot.modals.len(),
            "interactions loaded",
        ),
        FrameworkEvent::CommandAdded(def) => tracing::info!(name = %def.name, "command registered"),
        FrameworkEvent::CommandEdited(def) => tracing::info!(name = %def.name, "command updated"),
        FrameworkEvent::UserContextAdded(def) => {
            tracing::info!(name = %def.name, "user context menu registered");
        }
        FrameworkEvent::UserContextEdited(def) => {
            tracing::info!(name = %def.name, "user context menu updated");
        }
        FrameworkEvent::MessageContextAdded(def) => {
            tracing::info!(name = %def.name, "message context menu registered");
        }
        FrameworkEvent::MessageContextEdited(def) => {
            tracing::info!(name = %def.name, "message context menu updated");
        }
        FrameworkEvent::Error(failure) => {
            tracing::warn!(
                kind = %failure.kind,
                name = %failure.name,
                error = %failure.error,
                "registration failed",
            );
        }
    }
}
