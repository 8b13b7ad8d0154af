pub mod commands;
pub mod shuffle;

use commands::*;
use poise::command;

/// 🪜 Ladder game: shuffle a group into a random order
#[command(slash_command, subcommands("run"))]
pub async fn ladder(_ctx: crate::Context<'_>) -> Result<(), crate::Error> {
    Ok(())
}
