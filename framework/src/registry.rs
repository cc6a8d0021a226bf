use std::{
    collections::{hash_map::Values, HashMap},
    hash::Hash,
};

use tokio::sync::broadcast;

use super::events::{FrameworkEvent, RegistrySnapshot};
use super::handler::{
    command_handler::CommandHandler, component_handler::ComponentHandler,
    modal_handler::ModalHandler, InteractionHandler,
};

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Keyed container for one interaction kind. Inserting under a key that is
/// already taken replaces the old record, the last definition wins.
pub struct InteractionRegistry<K: Eq + Hash, T: InteractionHandler<K>> {
    interactions: HashMap<K, T>,
}

impl<K: Eq + Hash, T: InteractionHandler<K>> InteractionRegistry<K, T> {
    pub fn new() -> Self {
        Self {
            interactions: HashMap::new(),
        }
    }

    pub fn values(&self) -> Values<'_, K, T> {
        self.interactions.values()
    }

    pub fn insert(&mut self, val: T) -> Option<T> {
        self.interactions.insert(val.key(), val)
    }

    pub fn remove(&mut self, key: &K) -> Option<T> {
        self.interactions.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.interactions.get(key)
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}

impl<K: Eq + Hash, T: InteractionHandler<K>> Default for InteractionRegistry<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every loaded handler, one container per interaction kind, plus the
/// lifecycle event channel. The loader is the only writer; dispatch and
/// registration read through `&self`.
pub struct Registry<T: Clone + Send + Sync> {
    pub commands: InteractionRegistry<String, CommandHandler<T>>,
    pub user_contexts: InteractionRegistry<String, CommandHandler<T>>,
    pub message_contexts: InteractionRegistry<String, CommandHandler<T>>,
    pub buttons: InteractionRegistry<String, ComponentHandler<T>>,
    pub select_menus: InteractionRegistry<String, ComponentHandler<T>>,
    pub modals: InteractionRegistry<String, ModalHandler<T>>,

    events: broadcast::Sender<FrameworkEvent>,
}

impl<T: Clone + Send + Sync> Registry<T> {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            commands: InteractionRegistry::new(),
            user_contexts: InteractionRegistry::new(),
            message_contexts: InteractionRegistry::new(),
            buttons: InteractionRegistry::new(),
            select_menus: InteractionRegistry::new(),
            modals: InteractionRegistry::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameworkEvent> {
        self.events.subscribe()
    }

    /// Send to whoever is listening; nobody listening is fine.
    pub(crate) fn emit(&self, event: FrameworkEvent) {
        let _ = self.events.send(event);
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            commands: self
                .commands
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
            user_contexts: self
                .user_contexts
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
            message_contexts: self
                .message_contexts
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
            buttons: self
                .buttons
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
            select_menus: self
                .select_menus
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
            modals: self
                .modals
                .values()
                .map(|handler| handler.definition.clone())
                .collect(),
        }
    }
}

impl<T: Clone + Send + Sync> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
