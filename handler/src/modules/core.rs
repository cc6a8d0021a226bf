use chrono::Utc;

use praatje_framework::{context::CommandContext, handler_func, loader::HandlerSet, Error};

use crate::context::Services;

pub(crate) fn handlers(set: HandlerSet<Services>) -> HandlerSet<Services> {
    set.command("ping", handler_func!(ping))
        .user_context("Show Profile", handler_func!(show_profile))
        .message_context("Quote Message", handler_func!(quote_message))
}

async fn ping(ctx: CommandContext<Services>) -> Result<(), Error> {
    let uptime = Utc::now() - ctx.services.started;

    ctx.reply(format!(
        "Pong! Up for {}m{}s",
        uptime.num_minutes(),
        uptime.num_seconds() % 60,
    ))
    .await?;

    Ok(())
}

// discord epoch, ms
const SNOWFLAKE_EPOCH: u64 = 1_420_070_400_000;

fn created_at_secs(snowflake: u64) -> u64 {
    ((snowflake >> 22) + SNOWFLAKE_EPOCH) / 1000
}

async fn show_profile(ctx: CommandContext<Services>) -> Result<(), Error> {
    let target = ctx
        .command
        .target_id
        .and_then(|target| {
            ctx.command
                .resolved
                .as_ref()
                .and_then(|resolved| resolved.users.get(&target.cast()))
        });

    let Some(user) = target else {
        ctx.reply("Couldn't resolve that user.").await?;
        return Ok(());
    };

    ctx.reply(format!(
        "**{}** • on Discord since <t:{}:R>",
        user.name,
        created_at_secs(user.id.get()),
    ))
    .await?;

    Ok(())
}

async fn quote_message(ctx: CommandContext<Services>) -> Result<(), Error> {
    let target = ctx
        .command
        .target_id
        .and_then(|target| {
            ctx.command
                .resolved
                .as_ref()
                .and_then(|resolved| resolved.messages.get(&target.cast()))
        });

    let Some(message) = target else {
        ctx.reply("Couldn't resolve that message.").await?;
        return Ok(());
    };

    ctx.reply(format!(
        "> {}\n• <@{}>",
        message.content, message.author.id,
    ))
    .await?;

    Ok(())
}
