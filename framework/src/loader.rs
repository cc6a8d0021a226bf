use std::{collections::HashMap, fs, path::Path};

use walkdir::{DirEntry, WalkDir};

use crate::definition::{DefinitionDocument, HandlerDefinition, InteractionKind};
use crate::error::LoadError;
use crate::events::FrameworkEvent;
use crate::handler::{
    command_handler::{CommandFunc, CommandHandler},
    component_handler::{ComponentFunc, ComponentHandler},
    modal_handler::{ModalFunc, ModalHandler},
};
use crate::registry::Registry;

/// Callback bindings for the definitions on disk, keyed the way the registry
/// keys them: by name for command kinds, by custom id for component kinds.
/// A definition without a binding still loads, with a no-op callback.
pub struct HandlerSet<T: Clone + Send + Sync> {
    commands: HashMap<String, CommandFunc<T>>,
    user_contexts: HashMap<String, CommandFunc<T>>,
    message_contexts: HashMap<String, CommandFunc<T>>,
    buttons: HashMap<String, ComponentFunc<T>>,
    select_menus: HashMap<String, ComponentFunc<T>>,
    modals: HashMap<String, ModalFunc<T>>,
}

impl<T: Clone + Send + Sync> HandlerSet<T> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            user_contexts: HashMap::new(),
            message_contexts: HashMap::new(),
            buttons: HashMap::new(),
            select_menus: HashMap::new(),
            modals: HashMap::new(),
        }
    }

    pub fn command(mut self, name: &str, func: CommandFunc<T>) -> Self {
        self.commands.insert(name.to_string(), func);
        self
    }

    pub fn user_context(mut self, name: &str, func: CommandFunc<T>) -> Self {
        self.user_contexts.insert(name.to_string(), func);
        self
    }

    pub fn message_context(mut self, name: &str, func: CommandFunc<T>) -> Self {
        self.message_contexts.insert(name.to_string(), func);
        self
    }

    pub fn button(mut self, custom_id: &str, func: ComponentFunc<T>) -> Self {
        self.buttons.insert(custom_id.to_string(), func);
        self
    }

    pub fn select_menu(mut self, custom_id: &str, func: ComponentFunc<T>) -> Self {
        self.select_menus.insert(custom_id.to_string(), func);
        self
    }

    pub fn modal(mut self, custom_id: &str, func: ModalFunc<T>) -> Self {
        self.modals.insert(custom_id.to_string(), func);
        self
    }
}

impl<T: Clone + Send + Sync> Default for HandlerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Default exclusion rule: any file or directory whose name starts with
/// `-`, `_` or `.` is skipped. The walk root itself always passes.
pub fn default_filter(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    !entry
        .file_name()
        .to_string_lossy()
        .starts_with(['-', '_', '.'])
}

/// Load every definition file under `root` with the default filter.
pub fn load_all<T: Clone + Send + Sync>(
    registry: &mut Registry<T>,
    handlers: &HandlerSet<T>,
    root: impl AsRef<Path>,
) -> Result<(), LoadError> {
    load_all_with(registry, handlers, root, default_filter)
}

/// Load every definition file under `root`, pruning files and whole
/// directories the filter rejects. A missing root loads nothing; an
/// unreadable or unparsable file fails the pass, leaving whatever was
/// already inserted in place. Finishing emits `InteractionsLoaded` with a
/// snapshot of the registry.
pub fn load_all_with<T: Clone + Send + Sync>(
    registry: &mut Registry<T>,
    handlers: &HandlerSet<T>,
    root: impl AsRef<Path>,
    filter: impl Fn(&DirEntry) -> bool,
) -> Result<(), LoadError> {
    let root = root.as_ref();

    if root.exists() {
        for entry in WalkDir::new(root).into_iter().filter_entry(&filter) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            load_file(registry, handlers, entry.path())?;
        }
    }

    registry.emit(FrameworkEvent::InteractionsLoaded(registry.snapshot()));

    Ok(())
}

fn load_file<T: Clone + Send + Sync>(
    registry: &mut Registry<T>,
    handlers: &HandlerSet<T>,
    path: &Path,
) -> Result<(), LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: DefinitionDocument =
        serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    for definition in document.into_vec() {
        insert_definition(registry, handlers, definition, path);
    }

    Ok(())
}

fn insert_definition<T: Clone + Send + Sync>(
    registry: &mut Registry<T>,
    handlers: &HandlerSet<T>,
    definition: HandlerDefinition,
    path: &Path,
) {
    match definition {
        HandlerDefinition::ChatInput(def) => {
            let func = handlers.commands.get(&def.name).copied().unwrap_or_else(|| {
                warn_unbound(InteractionKind::ChatInput, &def.name, path);
                CommandHandler::noop
            });
            registry
                .commands
                .insert(CommandHandler::new(InteractionKind::ChatInput, def, func));
        }
        HandlerDefinition::UserContext(def) => {
            let func = handlers
                .user_contexts
                .get(&def.name)
                .copied()
                .unwrap_or_else(|| {
                    warn_unbound(InteractionKind::UserContext, &def.name, path);
                    CommandHandler::noop
                });
            registry
                .user_contexts
                .insert(CommandHandler::new(InteractionKind::UserContext, def, func));
        }
        HandlerDefinition::MessageContext(def) => {
            let func = handlers
                .message_contexts
                .get(&def.name)
                .copied()
                .unwrap_or_else(|| {
                    warn_unbound(InteractionKind::MessageContext, &def.name, path);
                    CommandHandler::noop
                });
            registry.message_contexts.insert(CommandHandler::new(
                InteractionKind::MessageContext,
                def,
                func,
            ));
        }
        HandlerDefinition::Button(def) => {
            let func = handlers
                .buttons
                .get(&def.custom_id)
                .copied()
                .unwrap_or_else(|| {
                    warn_unbound(InteractionKind::Button, &def.custom_id, path);
                    ComponentHandler::noop
                });
            registry
                .buttons
                .insert(ComponentHandler::new(InteractionKind::Button, def, func));
        }
        HandlerDefinition::SelectMenu(def) => {
            let func = handlers
                .select_menus
                .get(&def.custom_id)
                .copied()
                .unwrap_or_else(|| {
                    warn_unbound(InteractionKind::SelectMenu, &def.custom_id, path);
                    ComponentHandler::noop
                });
            registry
                .select_menus
                .insert(ComponentHandler::new(InteractionKind::SelectMenu, def, func));
        }
        HandlerDefinition::Modal(def) => {
            let func = handlers
                .modals
                .get(&def.custom_id)
                .copied()
                .unwrap_or_else(|| {
                    warn_unbound(InteractionKind::Modal, &def.custom_id, path);
                    ModalHandler::noop
                });
            registry.modals.insert(ModalHandler::new(def, func));
        }
        HandlerDefinition::Unknown => {
            tracing::warn!(
                path = %path.display(),
                "skipping definition with unrecognized type tag",
            );
        }
    }
}

fn warn_unbound(kind: InteractionKind, key: &str, path: &Path) {
    tracing::warn!(
        %kind, key, path = %path.display(),
        "no callback bound for definition, using no-op",
    );
}
