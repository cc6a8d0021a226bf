use twilight_model::{
    channel::message::component::{
        ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType,
        TextInput, TextInputStyle,
    },
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use praatje_framework::{
    context::{CommandContext, ComponentInteractionContext, ModalContext},
    handler_func,
    loader::HandlerSet,
    Error,
};

use crate::context::Services;

pub(crate) fn handlers(set: HandlerSet<Services>) -> HandlerSet<Services> {
    set.command("feedback", handler_func!(feedback_prompt))
        .button("feedback", handler_func!(open_feedback_form))
        .select_menu("feedback_topic", handler_func!(topic_selected))
        .modal("feedback_form", handler_func!(feedback_submitted))
}

fn feedback_topic_menu() -> SelectMenu {
    SelectMenu {
        custom_id: "feedback_topic".into(),
        kind: SelectMenuType::Text,
        options: Some(vec![
            topic_option("Bugs", "bugs"),
            topic_option("Ideas", "ideas"),
            topic_option("Praise", "praise"),
        ]),
        placeholder: Some("Pick a topic".into()),

        // defaults
        disabled: false,
        max_values: None,
        min_values: None,
        default_values: None,
        channel_types: None,
    }
}

fn topic_option(label: &str, value: &str) -> SelectMenuOption {
    SelectMenuOption {
        default: false,
        description: None,
        emoji: None,
        label: label.into(),
        value: value.into(),
    }
}

/// `/feedback`, posts the prompt message carrying the button and the topic
/// menu.
async fn feedback_prompt(ctx: CommandContext<Services>) -> Result<(), Error> {
    let components = vec![
        ActionRow {
            components: vec![Component::Button(Button {
                custom_id: Some("feedback".into()),
                label: Some("Send feedback".into()),
                style: ButtonStyle::Primary,

                // defaults
                disabled: false,
                emoji: None,
                url: None,
                sku_id: None,
            })],
        }
        .into(),
        ActionRow {
            components: vec![feedback_topic_menu().into()],
        }
        .into(),
    ];

    ctx.response(InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content("How are we doing?")
                .components(components)
                .build(),
        ),
    })
    .await?;

    Ok(())
}

async fn open_feedback_form(ctx: ComponentInteractionContext<Services>) -> Result<(), Error> {
    let fields = vec![Component::ActionRow(ActionRow {
        components: vec![Component::TextInput(TextInput {
            custom_id: "feedback_message".into(),
            label: "What should we know?".into(),
            style: TextInputStyle::Paragraph,
            placeholder: Some("Tell us what broke, or what you liked".into()),
            required: Some(true),
            max_length: Some(1000),

            // defaults
            min_length: None,
            value: None,
        })],
    })];

    ctx.response(InteractionResponse {
        kind: InteractionResponseType::Modal,
        data: Some(
            InteractionResponseDataBuilder::new()
                .custom_id("feedback_form")
                .title("Send feedback")
                .components(fields)
                .build(),
        ),
    })
    .await?;

    Ok(())
}

async fn topic_selected(ctx: ComponentInteractionContext<Services>) -> Result<(), Error> {
    let topics = ctx.interaction.values.join(", ");

    ctx.response(InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(format!("Noted, we'll keep an eye on: {topics}"))
                .build(),
        ),
    })
    .await?;

    Ok(())
}

async fn feedback_submitted(ctx: ModalContext<Services>) -> Result<(), Error> {
    let message = ctx
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find(|component| component.custom_id == "feedback_message")
        .and_then(|component| component.value.as_deref())
        .unwrap_or("(empty)");

    tracing::info!(message, "feedback received");

    ctx.response(InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content("Thanks, passed it along!")
                .build(),
        ),
    })
    .await?;

    Ok(())
}
