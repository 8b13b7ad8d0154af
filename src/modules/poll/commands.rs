use super::database::{Poll, PollMessage};
use super::tally::{format_tally, marker, tally, MAX_OPTIONS};
use crate::{Context, Error};
use poise::serenity_prelude::{CreateEmbed, ReactionType};
use poise::{command, CreateReply};
use thiserror::Error;
use tracing::{info, warn};

const MIN_OPTIONS: usize = 2;
const POLL_COLOUR: u32 = 0x00FFFF;
/// Leaves room for the "📊 Poll results: " prefix within Discord's 256
/// character embed title.
const MAX_TITLE_LEN: usize = 200;
/// Keeps the numbered list and the results well under the embed description
/// limit.
const MAX_OPTIONS_LEN: usize = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PollError {
    #[error("❌ A poll needs between 2 and 10 options.")]
    OptionCount { count: usize },
    #[error("❌ No open poll has that title.")]
    NotFound { title: String },
    #[error("❌ The poll title or options are too long.")]
    TooLong,
}

/// A validated poll that has not been posted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub title: String,
    pub options: Vec<String>,
}

impl PollDraft {
    pub fn parse(title: &str, options: &str) -> Result<Self, PollError> {
        if title.chars().count() > MAX_TITLE_LEN || options.chars().count() > MAX_OPTIONS_LEN {
            return Err(PollError::TooLong);
        }

        let options: Vec<String> = options
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(PollError::OptionCount {
                count: options.len(),
            });
        }

        Ok(Self {
            title: title.to_string(),
            options,
        })
    }

    /// Numbered option list shown in the poll panel.
    pub fn describe(&self) -> String {
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}", i + 1, option))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_poll(self, message: PollMessage) -> Poll {
        Poll {
            title: self.title,
            options: self.options,
            message,
        }
    }
}

/// Start a poll that members vote on with reactions
#[command(slash_command)]
pub async fn start(
    ctx: Context<'_>,
    #[description = "Poll title"]
    #[max_length = 200]
    title: String,
    #[description = "Options, separated by commas (2 to 10)"]
    #[rename = "options"]
    #[max_length = 1000]
    choices: String,
) -> Result<(), Error> {
    let draft = match PollDraft::parse(&title, &choices) {
        Ok(d) => d,
        Err(e) => {
            info!("Rejected poll {:?}: {:?}", title, e);
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
    };

    let embed = CreateEmbed::new()
        .title(format!("📊 {}", draft.title))
        .description(draft.describe())
        .colour(POLL_COLOUR);

    let reply = ctx.send(CreateReply::default().embed(embed)).await?;
    let message = reply.message().await?;

    // One at a time so the markers appear in option order.
    for i in 0..draft.options.len() {
        let Some(emoji) = marker(i) else { break };
        if let Err(e) = message
            .react(ctx.serenity_context(), ReactionType::Unicode(emoji.to_string()))
            .await
        {
            warn!("Failed to add {} to poll {:?}: {}", emoji, draft.title, e);
        }
    }

    let handle = PollMessage {
        channel_id: message.channel_id,
        message_id: message.id,
    };
    let option_count = draft.options.len();
    let poll = draft.into_poll(handle);
    let title = poll.title.clone();

    if ctx.data().dbs.polls.open_poll(poll).await?.is_some() {
        info!("Poll {:?} replaced an open poll with the same title", title);
    }
    info!("Opened poll {:?} with {} options", title, option_count);

    Ok(())
}

/// Close a poll and post the results
#[command(slash_command)]
pub async fn close(
    ctx: Context<'_>,
    #[description = "Title of the poll to close"]
    #[max_length = 200]
    title: String,
) -> Result<(), Error> {
    let poll = match ctx.data().dbs.polls.get_poll(&title).await {
        Some(p) => p,
        None => {
            ctx.say(PollError::NotFound { title }.to_string()).await?;
            return Ok(());
        }
    };

    let message = poll
        .message
        .channel_id
        .message(ctx.serenity_context(), poll.message.message_id)
        .await?;

    let results = tally(&poll.options, &message).await;

    let embed = CreateEmbed::new()
        .title(format!("📊 Poll results: {}", poll.title))
        .description(format_tally(&results))
        .colour(POLL_COLOUR);

    ctx.send(CreateReply::default().embed(embed)).await?;

    ctx.data().dbs.polls.close_poll(&poll.title).await?;
    info!("Closed poll {:?}", poll.title);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::poll::database::PollDatabase;
    use crate::modules::poll::tally::ReactionSource;
    use crate::store::Store;
    use async_trait::async_trait;
    use poise::serenity_prelude::{ChannelId, MessageId};
    use std::collections::HashMap;

    fn options(n: usize) -> String {
        (1..=n).map(|i| format!("opt{}", i)).collect::<Vec<_>>().join(", ")
    }

    fn handle() -> PollMessage {
        PollMessage {
            channel_id: ChannelId::new(5),
            message_id: MessageId::new(6),
        }
    }

    #[test]
    fn accepts_two_and_ten_options() {
        assert_eq!(PollDraft::parse("t", &options(2)).unwrap().options.len(), 2);
        assert_eq!(PollDraft::parse("t", &options(10)).unwrap().options.len(), 10);
    }

    #[test]
    fn rejects_one_and_eleven_options() {
        assert_eq!(
            PollDraft::parse("t", &options(1)),
            Err(PollError::OptionCount { count: 1 })
        );
        assert_eq!(
            PollDraft::parse("t", &options(11)),
            Err(PollError::OptionCount { count: 11 })
        );
    }

    #[test]
    fn range_message_is_fixed() {
        let one = PollDraft::parse("t", "a").unwrap_err().to_string();
        let many = PollDraft::parse("t", &options(11)).unwrap_err().to_string();
        assert_eq!(one, many);
    }

    #[test]
    fn title_is_kept_verbatim() {
        let draft = PollDraft::parse(" Lunch ", "Pizza, Sushi").unwrap();
        assert_eq!(draft.title, " Lunch ");
        assert_eq!(draft.options, vec!["Pizza", "Sushi"]);
    }

    #[test]
    fn describe_numbers_options() {
        let draft = PollDraft::parse("Lunch", "Pizza, Sushi, Tacos").unwrap();
        assert_eq!(draft.describe(), "1. Pizza\n2. Sushi\n3. Tacos");
    }

    #[tokio::test]
    async fn rejected_draft_records_nothing() {
        let store: Store<PollDatabase> = Store::new();
        for input in [options(1), options(11)] {
            if let Ok(draft) = PollDraft::parse("Lunch", &input) {
                store.open_poll(draft.into_poll(handle())).await.unwrap();
            }
        }
        assert!(store.get_poll("Lunch").await.is_none());
    }

    struct Reactions(HashMap<&'static str, u64>);

    #[async_trait]
    impl ReactionSource for Reactions {
        async fn reaction_count(&self, marker: &str) -> Option<u64> {
            self.0.get(marker).copied()
        }
    }

    #[tokio::test]
    async fn lunch_poll_lifecycle() {
        let store: Store<PollDatabase> = Store::new();
        let draft = PollDraft::parse("Lunch", "Pizza, Sushi").unwrap();
        store.open_poll(draft.into_poll(handle())).await.unwrap();

        let poll = store.get_poll("Lunch").await.unwrap();
        assert_eq!(poll.options, vec!["Pizza", "Sushi"]);

        let reactions = Reactions(HashMap::from([("1️⃣", 3), ("2️⃣", 1)]));
        let results = tally(&poll.options, &reactions).await;
        assert_eq!(format_tally(&results), "Pizza: 2 votes\nSushi: 0 votes");

        store.close_poll(&poll.title).await.unwrap();
        assert!(store.get_poll("Lunch").await.is_none());
    }

    #[test]
    fn long_title_is_refused_before_posting() {
        let title = "t".repeat(201);
        assert_eq!(PollDraft::parse(&title, "a, b"), Err(PollError::TooLong));
        assert!(PollDraft::parse(&"t".repeat(200), "a, b").is_ok());
    }

    #[test]
    fn long_options_are_refused() {
        let options = format!("{}, b", "a".repeat(1000));
        assert_eq!(PollDraft::parse("t", &options), Err(PollError::TooLong));
    }

    #[test]
    fn not_found_message_is_fixed() {
        let a = PollError::NotFound { title: "a".into() }.to_string();
        let b = PollError::NotFound { title: "b".into() }.to_string();
        assert_eq!(a, b);
    }
}
