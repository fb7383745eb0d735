use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::requests::{Requester, ResponseResult};
use teloxide::types::{ChatAction, InputFile, Message, ReplyParameters};
use teloxide::Bot;
use tracing::{error, info};

use crate::generator::{GenerateError, Generator};
use crate::models::Platform;
use crate::structs::{GeneratedProject, GenerationRequest};
use crate::utils::find_prompt;

pub async fn generate(
    bot: Bot,
    msg: &Message,
    generator: &Generator,
    platform: Platform,
    args: String,
) -> ResponseResult<()> {
    let prompt = match find_prompt(msg, &args) {
        Some(prompt) => prompt,
        None => {
            bot.send_message(
                msg.chat.id,
                "Пожалуйста, опишите проект. Описание можно указать в сообщении или в ответе на сообщение.",
            )
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
            return Ok(());
        }
    };

    let request = GenerationRequest::parse(&prompt, platform);

    // Show the typing indicator while the attempt runs
    bot.send_chat_action(msg.chat.id, ChatAction::Typing)
        .await?;

    let now = std::time::Instant::now();
    let result = generator.generate(&request).await;
    let elapsed = now.elapsed().as_secs_f32();

    match result {
        Ok(project) => {
            info!(
                "Generated a card on {}. Generation took {}s",
                platform,
                (elapsed * 10.0).round() / 10.0
            );
            send_card(&bot, msg, &project).await
        }
        Err(GenerateError::EmptyPrompt) => {
            bot.send_message(msg.chat.id, "Пожалуйста, опишите проект.")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            Ok(())
        }
        Err(GenerateError::Busy) => {
            bot.send_message(
                msg.chat.id,
                "Подождите, предыдущая генерация ещё не завершена.",
            )
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            bot.send_message(
                msg.chat.id,
                "Произошла ошибка при генерации проекта. Попробуйте ещё раз.",
            )
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
            Ok(())
        }
    }
}

// Send the card as a photo when it has a preview image, plain text
// otherwise. The link always goes into the text so it can be opened or
// copied straight from the chat.
async fn send_card(bot: &Bot, msg: &Message, project: &GeneratedProject) -> ResponseResult<()> {
    let caption = format!(
        "Ваш проект готов: {}\n\n{}\n\nСсылка: {}",
        project.title, project.description, project.url
    );

    if let Some(image) = project.image_url.as_deref() {
        if let Ok(image_url) = reqwest::Url::parse(image) {
            bot.send_photo(msg.chat.id, InputFile::url(image_url))
                .caption(caption)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    }

    bot.send_message(msg.chat.id, caption)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
