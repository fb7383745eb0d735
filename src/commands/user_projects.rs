use teloxide::payloads::SendMessageSetters;
use teloxide::requests::{Requester, ResponseResult};
use teloxide::types::{ChatAction, Message, ReplyParameters};
use teloxide::Bot;
use tracing::error;

use crate::apis::ScratchClient;
use crate::models::Platform;

const USER_PROJECTS_LIMIT: u32 = 5;

pub async fn user_projects(
    bot: Bot,
    msg: &Message,
    client: &ScratchClient,
    username: String,
) -> ResponseResult<()> {
    let username = username.trim();
    if username.is_empty() {
        bot.send_message(msg.chat.id, "Пожалуйста, укажите имя пользователя Scratch.")
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    bot.send_chat_action(msg.chat.id, ChatAction::Typing)
        .await?;

    let text = match client.get_user_projects(username, USER_PROJECTS_LIMIT).await {
        Ok(projects) if projects.is_empty() => {
            format!("У пользователя {username} нет опубликованных проектов.")
        }
        Ok(projects) => {
            let mut text = format!("Проекты пользователя {username}:\n");
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
            error!("Failed to fetch projects of {}: {}", username, e);
            format!("Ошибка API Scratch: {e}")
        }
    };

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
