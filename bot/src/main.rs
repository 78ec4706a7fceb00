#![forbid(unsafe_code)]

use std::{
    error::Error,
    sync::{
        Arc,
        RwLock,
        atomic::{AtomicU64, Ordering}
    },
    time::Instant
};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{
    Config,
    EventTypeFlags,
    Intents,
    Shard,
    StreamExt as _
};
use twilight_http::Client;
use warden_core::{env, init_mongo, moderation::MongoAuditStore};

mod commands;
mod context;
mod embeds;
mod events;
mod healthcheck;
mod platform;
mod registry;

use context::Ctx;
use events::EventRegistry;
use platform::DiscordPlatform;
use registry::CommandRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let env = env();

    init_mongo(true).await?;

    let http = Arc::new(Client::new(env.bot_token.clone()));

    let application_id =
        http.current_user_application().await?.model().await?.id;

    let ctx = Arc::new(Ctx {
        http: http.clone(),
        application_id,
        store: Arc::new(MongoAuditStore),
        platform: Arc::new(DiscordPlatform::new(http.clone())),
        commands: RwLock::new(Arc::new(CommandRegistry::new())),
        events: EventRegistry::new(),
        started: Instant::now(),
        latency_ms: AtomicU64::new(0),
        guilds: AtomicU64::new(0)
    });

    let registered = registry::sync(&ctx, &ctx.commands()).await?;
    info!(
        commands = registered,
        dev_guild = env.dev_guild,
        "registered slash commands"
    );

    healthcheck::spawn_healthcheck_server();

    let config = Config::new(
        env.bot_token.clone(),
        Intents::GUILDS | Intents::GUILD_MODERATION | Intents::GUILD_MEMBERS
    );

    let shards =
        twilight_gateway::create_recommended(&http, config, |_, builder| {
            builder.build()
        })
        .await?;

    info!(shards = shards.len(), "starting gateway");

    for shard in shards {
        tokio::spawn(runner(shard, ctx.clone()));
    }

    tokio::signal::ctrl_c().await?;

    info!("shutting down");

    Ok(())
}

async fn runner(mut shard: Shard, ctx: Arc<Ctx>) {
    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                warn!(?source, "error receiving gateway event");
                continue;
            }
        };

        if let Some(latency) = shard.latency().average() {
            ctx.latency_ms
                .store(latency.as_millis() as u64, Ordering::Relaxed);
        }

        tokio::spawn(events::dispatch(ctx.clone(), event));
    }
}
