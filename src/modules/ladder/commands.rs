use super::shuffle::shuffle_ranks;
use crate::{Context, Error};
use poise::command;
use thiserror::Error;

const MIN_PARTICIPANTS: usize = 2;
/// Discord's limit for plain message content, in characters.
const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LadderError {
    #[error("❌ At least 2 participants are needed to climb the ladder.")]
    TooFewParticipants,
    #[error("❌ Too many participants to fit the results in one message.")]
    TooLong,
}

/// Splits a comma separated list, dropping blank entries. Duplicates stay.
pub fn parse_participants(input: &str) -> Result<Vec<String>, LadderError> {
    let participants: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    if participants.len() < MIN_PARTICIPANTS {
        return Err(LadderError::TooFewParticipants);
    }

    Ok(participants)
}

pub fn format_results(participants: &[String], ranks: &[usize]) -> Result<String, LadderError> {
    let mut response = String::from("🪜 Ladder results:\n");
    for (name, rank) in participants.iter().zip(ranks) {
        response.push_str(&format!("{} - {}\n", name, rank));
    }

    if response.chars().count() > MAX_MESSAGE_LEN {
        return Err(LadderError::TooLong);
    }
    Ok(response)
}

/// Draws a random rank for each participant
#[command(slash_command)]
pub async fn run(
    ctx: Context<'_>,
    #[description = "Participants, separated by commas"] participants: String,
) -> Result<(), Error> {
    let participants = match parse_participants(&participants) {
        Ok(p) => p,
        Err(e) => {
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
    };

    let ranks = shuffle_ranks(participants.len());
    let reply = match format_results(&participants, &ranks) {
        Ok(r) => r,
        Err(e) => {
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
    };

    ctx.say(reply).await?;
    Ok(())
}
