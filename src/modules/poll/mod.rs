pub mod commands;
pub mod database;
pub mod tally;

use commands::*;
use poise::command;

/// 📊 Reaction polls
#[command(slash_command, subcommands("start", "close"))]
pub async fn poll(_ctx: crate::Context<'_>) -> Result<(), crate::Error> {
    Ok(())
}
