use async_trait::async_trait;
use futures::future::join_all;
use poise::serenity_prelude::{Message, ReactionType};

pub const MAX_OPTIONS: usize = 10;

const MARKERS: [&str; MAX_OPTIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// Reaction used to vote for the option at `index` (zero based).
pub fn marker(index: usize) -> Option<&'static str> {
    MARKERS.get(index).copied()
}

/// Anything that can report how many times a reaction was placed.
#[async_trait]
pub trait ReactionSource: Send + Sync {
    /// `None` when nobody, the bot included, reacted with `marker`.
    async fn reaction_count(&self, marker: &str) -> Option<u64>;
}

#[async_trait]
impl ReactionSource for Message {
    async fn reaction_count(&self, marker: &str) -> Option<u64> {
        self.reactions
            .iter()
            .find(|r| matches!(&r.reaction_type, ReactionType::Unicode(emoji) if emoji == marker))
            .map(|r| r.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub option: String,
    pub votes: u64,
}

/// Reads every option's marker concurrently and returns the votes in option
/// order. The bot's own seed reaction is not counted.
pub async fn tally<S: ReactionSource + ?Sized>(options: &[String], source: &S) -> Vec<OptionTally> {
    let counts = join_all((0..options.len()).map(move |i| async move {
        match marker(i) {
            Some(m) => source.reaction_count(m).await,
            None => None,
        }
    }))
    .await;

    options
        .iter()
        .zip(counts)
        .map(|(option, count)| OptionTally {
            option: option.clone(),
            votes: count.map_or(0, |c| c.saturating_sub(1)),
        })
        .collect()
}

pub fn format_tally(results: &[OptionTally]) -> String {
    results
        .iter()
        .map(|r| format!("{}: {} votes", r.option, r.votes))
        .collect::<Vec<_>>()
        .join("\n")
}
