use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use twilight_model::{
    application::command::CommandOption,
    guild::Permissions,
    id::{marker::GuildMarker, Id},
};

/// The six interaction shapes the registry routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    ChatInput,
    UserContext,
    MessageContext,
    Button,
    SelectMenu,
    Modal,
}

impl InteractionKind {
    /// Kinds that register remotely and carry a per-user cool time.
    pub fn is_command(self) -> bool {
        matches!(
            self,
            Self::ChatInput | Self::UserContext | Self::MessageContext
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ChatInput => "chat input command",
            Self::UserContext => "user context menu",
            Self::MessageContext => "message context menu",
            Self::Button => "button",
            Self::SelectMenu => "select menu",
            Self::Modal => "modal",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Definition for a chat input command or a user/message context menu entry.
///
/// `cool_time` is the minimum interval between uses per user, in
/// milliseconds, absent meaning no gate. `guild_id` pins registration to one
/// guild regardless of what the registration call asks for.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<Permissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cool_time: Option<u64>,
}

impl CommandDefinition {
    pub fn cool_time_millis(&self) -> u64 {
        self.cool_time.unwrap_or(0)
    }
}

/// Definition for a button, select menu or modal. Only the routing key
/// matters here; whatever else the file carries (label, style, ...) rides
/// along untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ComponentDefinition {
    pub custom_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record in a definition file, discriminated by its `type` tag.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum HandlerDefinition {
    #[serde(rename = "CHAT_INPUT")]
    ChatInput(CommandDefinition),
    #[serde(rename = "USER")]
    UserContext(CommandDefinition),
    #[serde(rename = "MESSAGE")]
    MessageContext(CommandDefinition),
    #[serde(rename = "BUTTON")]
    Button(ComponentDefinition),
    #[serde(rename = "SELECT_MENU")]
    SelectMenu(ComponentDefinition),
    #[serde(rename = "MODAL")]
    Modal(ComponentDefinition),
    /// Any tag this version does not know. Loading skips these instead of
    /// failing the file.
    #[serde(other)]
    Unknown,
}

impl HandlerDefinition {
    pub fn kind(&self) -> Option<InteractionKind> {
        match self {
            Self::ChatInput(_) => Some(InteractionKind::ChatInput),
            Self::UserContext(_) => Some(InteractionKind::UserContext),
            Self::MessageContext(_) => Some(InteractionKind::MessageContext),
            Self::Button(_) => Some(InteractionKind::Button),
            Self::SelectMenu(_) => Some(InteractionKind::SelectMenu),
            Self::Modal(_) => Some(InteractionKind::Modal),
            Self::Unknown => None,
        }
    }

    /// The key the record is stored and looked up under, name for command
    /// kinds and custom id for component kinds.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ChatInput(def) | Self::UserContext(def) | Self::MessageContext(def) => {
                Some(&def.name)
            }
            Self::Button(def) | Self::SelectMenu(def) | Self::Modal(def) => Some(&def.custom_id),
            Self::Unknown => None,
        }
    }
}

/// A definition file holds either a single record or an ordered list.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefinitionDocument {
    One(HandlerDefinition),
    Many(Vec<HandlerDefinition>),
}

impl DefinitionDocument {
    pub fn into_vec(self) -> Vec<HandlerDefinition> {
        match self {
            Self::One(definition) => vec![definition],
            Self::Many(definitions) => definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_input_with_defaults() {
        let definition: HandlerDefinition =
            serde_json::from_str(r#"{ "type": "CHAT_INPUT", "name": "ping" }"#).unwrap();

        assert_eq!(definition.kind(), Some(InteractionKind::ChatInput));
        assert_eq!(definition.key(), Some("ping"));

        let HandlerDefinition::ChatInput(command) = definition else {
            panic!("expected chat input definition");
        };
        assert_eq!(command.description, "");
        assert!(command.options.is_empty());
        assert_eq!(command.guild_id, None);
        assert_eq!(command.cool_time_millis(), 0);
    }

    #[test]
    fn command_kinds_are_the_name_keyed_ones() {
        assert!(InteractionKind::ChatInput.is_command());
        assert!(InteractionKind::UserContext.is_command());
        assert!(InteractionKind::MessageContext.is_command());
        assert!(!InteractionKind::Button.is_command());
        assert!(!InteractionKind::SelectMenu.is_command());
        assert!(!InteractionKind::Modal.is_command());
    }

    #[test]
    fn parses_command_fields() {
        let definition: HandlerDefinition = serde_json::from_str(
            r#"{
                "type": "CHAT_INPUT",
                "name": "roll",
                "description": "Roll a die",
                "options": [
                    { "type": 4, "name": "sides", "description": "number of sides" }
                ],
                "guild_id": "1234567890",
                "cool_time": 5000
            }"#,
        )
        .unwrap();

        let HandlerDefinition::ChatInput(command) = definition else {
            panic!("expected chat input definition");
        };
        assert_eq!(command.options.len(), 1);
        assert_eq!(command.guild_id.unwrap().get(), 1_234_567_890);
        assert_eq!(command.cool_time_millis(), 5000);
    }

    #[test]
    fn component_keeps_extra_fields() {
        let definition: HandlerDefinition = serde_json::from_str(
            r#"{ "type": "BUTTON", "custom_id": "feedback", "label": "Send feedback", "style": 1 }"#,
        )
        .unwrap();

        assert_eq!(definition.kind(), Some(InteractionKind::Button));
        assert_eq!(definition.key(), Some("feedback"));

        let HandlerDefinition::Button(component) = definition else {
            panic!("expected button definition");
        };
        assert_eq!(component.extra["label"], "Send feedback");
        assert_eq!(component.extra["style"], 1);
    }

    #[test]
    fn unrecognized_tag_becomes_unknown() {
        let definition: HandlerDefinition =
            serde_json::from_str(r#"{ "type": "AUTOCOMPLETE", "name": "search" }"#).unwrap();

        assert!(matches!(definition, HandlerDefinition::Unknown));
        assert_eq!(definition.kind(), None);
        assert_eq!(definition.key(), None);
    }

    #[test]
    fn missing_tag_is_an_error() {
        assert!(serde_json::from_str::<HandlerDefinition>(r#"{ "name": "ping" }"#).is_err());
    }

    #[test]
    fn document_accepts_one_or_many() {
        let one: DefinitionDocument =
            serde_json::from_str(r#"{ "type": "MODAL", "custom_id": "report" }"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: DefinitionDocument = serde_json::from_str(
            r#"[
                { "type": "BUTTON", "custom_id": "a" },
                { "type": "SELECT_MENU", "custom_id": "b" }
            ]"#,
        )
        .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn serializes_with_type_tag() {
        let definition = HandlerDefinition::Button(ComponentDefinition {
            custom_id: "confirm".into(),
            extra: Map::new(),
        });

        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(value["type"], "BUTTON");
        assert_eq!(value["custom_id"], "confirm");
    }
}
