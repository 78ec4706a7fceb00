pub mod modlog;
pub mod welcome;

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, atomic::Ordering}
};

use tracing::{debug, info};
use twilight_gateway::Event;
use twilight_model::gateway::payload::incoming::{BanAdd, MemberAdd};

use crate::{commands, context::Ctx};

pub type EventFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

pub struct EventHandler<P> {
    pub name: &'static str,
    pub run: fn(Arc<Ctx>, P) -> EventFuture
}

/// Explicit dispatch table: every gateway event the bot consumes, with an
/// ordered handler list per event. Populated once at startup.
pub struct EventRegistry {
    pub ban_add: Vec<EventHandler<BanAdd>>,
    pub member_add: Vec<EventHandler<MemberAdd>>
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            ban_add: vec![EventHandler {
                name: "modlog",
                run: modlog::on_ban_add
            }],
            member_add: vec![EventHandler {
                name: "welcome",
                run: welcome::on_member_add
            }]
        }
    }

    pub fn len(&self) -> usize {
        self.ban_add.len() + self.member_add.len()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Single dispatcher for gateway events: command invocations go to the
/// command registry, everything else is looked up in the event table and
/// run in registration order.
pub async fn dispatch(ctx: Arc<Ctx>, event: Event) {
    match event {
        Event::Ready(ready) => {
            info!(user = %ready.user.name, "ready and online");
        }
        Event::InteractionCreate(interaction) => {
            commands::handle(ctx, interaction.0).await;
        }
        Event::GuildCreate(_) => {
            ctx.guilds.fetch_add(1, Ordering::Relaxed);
        }
        Event::GuildDelete(_) => {
            let _ = ctx.guilds.fetch_update(
                Ordering::Relaxed,
                Ordering::Relaxed,
                |count| Some(count.saturating_sub(1))
            );
        }
        Event::BanAdd(ban) => {
            for handler in &ctx.events.ban_add {
                debug!(handler = handler.name, "dispatching ban event");
                (handler.run)(ctx.clone(), ban.clone()).await;
            }
        }
        Event::MemberAdd(member) => {
            for handler in &ctx.events.member_add {
                debug!(handler = handler.name, "dispatching join event");
                (handler.run)(ctx.clone(), (*member).clone()).await;
            }
        }
        _ => {}
    }
}
