use teloxide::payloads::SendMessageSetters;
use teloxide::requests::{Requester, ResponseResult};
use teloxide::types::{ChatAction, Message, ReplyParameters};
use teloxide::Bot;
use tracing::error;

use crate::apis::ScratchClient;
use crate::models::Platform;

const FEATURED_LIMIT: u32 = 5;

pub async fn featured(bot: Bot, msg: &Message, client: &ScratchClient) -> ResponseResult<()> {
    bot.send_chat_action(msg.chat.id, ChatAction::Typing)
        .await?;

    let text = match client.get_featured_projects(FEATURED_LIMIT).await {
        Ok(projects) if projects.is_empty() => {
            "Не удалось найти избранные проекты.".to_string()
        }
        Ok(projects) => {
            let mut text = String::from("Избранные проекты сообщества:\n");
            for project in &projects {
                text.push_str(&format!(
                    "\n• {}\n  {}\n",
                    project.title,
                    Platform::Scratch.project_url(project.id)
                ));
            }
            text
        }
        Err(e) => {
            error!("Failed to fetch featured projects: {}", e);
            format!("Ошибка API Scratch: {e}")
        }
    };

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
