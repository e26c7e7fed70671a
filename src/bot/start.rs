use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, Context, EventHandler, GatewayIntents, GuildMemberUpdateEvent, Member, Ready};
use serenity::async_trait;
use serenity::http::Http;

use crate::bot::handler;
use crate::config::Config;
use crate::error::AppError;

/// Discord bot event handler
struct Handler {
    db: DatabaseConnection,
    config: Arc<Config>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        handler::ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member is updated in a guild (roles, nickname, etc.)
    async fn guild_member_update(
        &self,
        _ctx: Context,
        _old_if_available: Option<Member>,
        new: Option<Member>,
        _event: GuildMemberUpdateEvent,
    ) {
        handler::member::handle_guild_member_update(&self.db, &self.config, new).await;
    }
}

/// Initializes the Discord bot client.
///
/// Builds the gateway client and returns it together with its HTTP handle so
/// the roster sync scheduler can fetch guild members over the same connection
/// credentials.
///
/// # Arguments
/// - `config` - Application configuration with the bot token
/// - `db` - Database connection for the event handlers to use
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The built client and its HTTP handle
/// - `Err(AppError)` - Bot initialization failed
pub async fn init_bot(
    config: &Arc<Config>,
    db: DatabaseConnection,
) -> Result<(Client, Arc<Http>), AppError> {
    // Configure gateway intents - what events the bot will receive
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler {
        db,
        config: config.clone(),
    };

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner
///
/// This function starts the previously built client. It should be called from
/// within a tokio::spawn task since it will block until the bot shuts down.
///
/// # Arguments
/// - `client` - The client returned by [`init_bot`]
///
/// # Returns
/// - `Ok(())` if the bot runs until shutdown
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
