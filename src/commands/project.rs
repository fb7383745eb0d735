use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::requests::{Requester, ResponseResult};
use teloxide::types::{ChatAction, InputFile, Message, ReplyParameters};
use teloxide::Bot;
use tracing::error;

use crate::apis::ScratchClient;
use crate::models::Platform;

pub async fn project(bot: Bot, msg: &Message, client: &ScratchClient, id: u64) -> ResponseResult<()> {
    bot.send_chat_action(msg.chat.id, ChatAction::Typing)
        .await?;

    let project = match client.get_project_by_id(id).await {
        Ok(project) => project,
        Err(e) => {
            error!("Failed to fetch project {}: {}", id, e);
            bot.send_message(msg.chat.id, format!("Ошибка API Scratch: {e}"))
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    };

    let description = if project.description.is_empty() {
        project.instructions.clone()
    } else {
        project.description.clone()
    };
    let text = format!(
        "{}\n\n{}\n\nСсылка: {}",
        project.title,
        description,
        Platform::Scratch.project_url(project.id)
    );

    if let Some(thumbnail) = project.thumbnail_url.as_deref() {
        if let Ok(thumbnail_url) = reqwest::Url::parse(thumbnail) {
            bot.send_photo(msg.chat.id, InputFile::url(thumbnail_url))
                .caption(text)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    }

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
