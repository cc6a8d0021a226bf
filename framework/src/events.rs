use std::sync::Arc;

use crate::definition::{CommandDefinition, ComponentDefinition, InteractionKind};
use crate::host::HostError;

/// Lifecycle notifications, observable through `Registry::subscribe`.
#[derive(Clone, Debug)]
pub enum FrameworkEvent {
    /// A load pass finished; carries the full registry contents.
    InteractionsLoaded(RegistrySnapshot),
    /// A chat input command was newly registered remotely.
    CommandAdded(CommandDefinition),
    /// A chat input command overwrote an existing remote registration.
    CommandEdited(CommandDefinition),
    UserContextAdded(CommandDefinition),
    UserContextEdited(CommandDefinition),
    MessageContextAdded(CommandDefinition),
    MessageContextEdited(CommandDefinition),
    /// One record failed to register remotely; its siblings keep going.
    Error(RegisterFailure),
}

#[derive(Clone, Debug)]
pub struct RegisterFailure {
    pub kind: InteractionKind,
    pub name: String,
    pub error: Arc<HostError>,
}

/// Cloned view of everything registered at one point in time.
#[derive(Clone, Debug, Default)]
pub struct RegistrySnapshot {
    pub commands: Vec<CommandDefinition>,
    pub user_contexts: Vec<CommandDefinition>,
    pub message_contexts: Vec<CommandDefinition>,
    pub buttons: Vec<ComponentDefinition>,
    pub select_menus: Vec<ComponentDefinition>,
    pub modals: Vec<ComponentDefinition>,
}

impl RegistrySnapshot {
    pub fn len(&self) -> usize {
        self.commands.len()
            + self.user_contexts.len()
            + self.message_contexts.len()
            + self.buttons.len()
            + self.select_menus.len()
            + self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
