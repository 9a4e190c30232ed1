use std::sync::Arc;

use {
    secrecy::ExposeSecret,
    teloxide::{
        ApiError, RequestError,
        prelude::*,
        types::{AllowedUpdate, UpdateKind},
    },
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use {
    banter_auto_reply::ReplyEngine, banter_channels::ChannelOutbound, banter_config::TelegramConfig,
    banter_sessions::SessionStore,
};

use crate::{error::Result, handlers, outbound::TelegramOutbound};

/// Build the bot and its outbound adapter from config.
///
/// The HTTP client timeout is longer than the long-polling timeout (30 s)
/// so the client doesn't abort the request before Telegram responds.
pub fn build_bot(config: &TelegramConfig) -> Result<(Bot, Arc<TelegramOutbound>)> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(std::time::Duration::from_secs(45))
        .build()?;
    let bot = Bot::with_client(config.token.expose_secret(), client);
    let outbound = Arc::new(TelegramOutbound::new(bot.clone()));
    Ok((bot, outbound))
}

/// Start long polling.
///
/// Spawns a background task that processes updates until the returned
/// `CancellationToken` is cancelled.
pub async fn start_polling(
    bot: Bot,
    engine: Arc<ReplyEngine>,
    sessions: Arc<SessionStore>,
    outbound: Arc<dyn ChannelOutbound>,
) -> Result<CancellationToken> {
    // Verify credentials and clear any webhook so long polling works.
    let me = bot.get_me().await?;
    bot.delete_webhook().send().await?;
    info!(username = ?me.username, "telegram bot connected (webhook cleared)");

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        info!("starting telegram polling loop");
        let mut offset: i32 = 0;

        loop {
            if cancel_clone.is_cancelled() {
                info!("telegram polling stopped");
                break;
            }

            let result = bot
                .get_updates()
                .offset(offset)
                .timeout(30)
                .allowed_updates(vec![AllowedUpdate::Message])
                .await;

            match result {
                Ok(updates) => {
                    debug!(count = updates.len(), "got telegram updates");
                    for update in updates {
                        offset = update.id.as_offset();
                        match update.kind {
                            UpdateKind::Message(msg) => {
                                debug!(chat_id = msg.chat.id.0, "received telegram message");
                                handlers::handle_message(
                                    msg,
                                    Arc::clone(&engine),
                                    Arc::clone(&sessions),
                                    Arc::clone(&outbound),
                                )
                                .await;
                            },
                            other => {
                                debug!("ignoring non-message update: {other:?}");
                            },
                        }
                    }
                },
                Err(e) => {
                    // Another instance polling with the same token is fatal.
                    if matches!(&e, RequestError::Api(ApiError::TerminatedByOtherGetUpdates)) {
                        warn!("telegram polling stopped: another instance is using this token");
                        cancel_clone.cancel();
                        break;
                    }

                    warn!(error = %e, "telegram getUpdates failed");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                },
            }
        }
    });

    Ok(cancel)
}
