use config::Config;
use databases::Databases;
use modules::{ladder::ladder, poll::poll, system::events::ReadyHandler};
use poise::serenity_prelude::{self as serenity, CreateAllowedMentions};
use std::sync::Arc;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

mod config;
mod databases;
mod events;
mod modules;
mod store;
mod web;

use crate::events::EventManager;

#[derive(Clone, Debug)]
pub struct Data {
    pub dbs: Arc<Databases>,
    pub event_manager: Arc<EventManager>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

fn location(guild_id: Option<serenity::GuildId>) -> String {
    guild_id.map_or_else(|| "DM".to_string(), |id| id.to_string())
}

/// Picks the application to register commands for. Only the application the
/// bot actually logged in as is accepted.
fn registration_target(
    configured: Option<serenity::ApplicationId>,
    logged_in: serenity::ApplicationId,
) -> Option<serenity::ApplicationId> {
    configured.filter(|&id| id == logged_in)
}

/// Declares the slash commands for the logged in application. Failures are
/// logged; the bot keeps serving whatever commands Discord already knows.
async fn register_commands(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    application_id: Option<serenity::ApplicationId>,
    commands: &[poise::Command<Data, Error>],
) {
    let Some(target) = registration_target(application_id, ready.application.id) else {
        match application_id {
            Some(id) => error!(
                "CLIENT_ID {} does not match the logged in application {}; skipping command registration",
                id, ready.application.id
            ),
            None => error!("CLIENT_ID is not set; skipping command registration"),
        }
        return;
    };

    info!("registering commands for application {}", target);
    match poise::builtins::register_globally(ctx, commands).await {
        Ok(()) => info!("registered {} commands", commands.len()),
        Err(e) => error!("Failed to register commands: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("starting laddertime");

    tokio::spawn(web::serve(config.port));

    let application_id = config.application_id;
    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            allowed_mentions: Some(CreateAllowedMentions::new().empty_roles().empty_users()),
            commands: vec![ladder(), poll()],
            pre_command: |ctx| {
                Box::pin(async move {
                    trace!(
                        "Command {} used by {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(ctx.guild_id())
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Command {} completed for {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(ctx.guild_id())
                    );
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!(
                                "Command {} failed for {} in {}: {:?}",
                                ctx.command().qualified_name,
                                ctx.author().tag(),
                                location(ctx.guild_id()),
                                error
                            );
                        }
                        err => error!("Other framework error: {:?}", err),
                    }
                })
            },
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    data.event_manager.handle_event(ctx, event).await;
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                register_commands(ctx, ready, application_id, &framework.options().commands).await;

                let event_manager = Arc::new(EventManager::new());
                event_manager.add_handler(ReadyHandler).await;

                Ok(Data {
                    dbs: Arc::new(Databases::new()),
                    event_manager,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}
