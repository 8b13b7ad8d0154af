use crate::events::EventHandler;
use async_trait::async_trait;
use poise::serenity_prelude::{ActivityData, Context, FullEvent, OnlineStatus};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReadyHandler;

#[async_trait]
impl EventHandler for ReadyHandler {
    fn name(&self) -> &str {
        "Ready"
    }

    async fn handle(&self, ctx: &Context, event: &FullEvent) -> Result<(), crate::Error> {
        if let FullEvent::Ready { data_about_bot } = event {
            info!("Logged in as {}", data_about_bot.user.tag());
            ctx.set_presence(
                Some(ActivityData::watching("ladders and polls")),
                OnlineStatus::Online,
            )
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EventHandler> {
        Box::new(self.clone())
    }
}
