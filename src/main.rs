use lambda_http::{run, service_fn, Error};

use std::env;
use teloxide::prelude::*;
use teloxide::types::{Message, UpdateKind};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod apis;
mod commands;
mod generator;
mod models;
mod resolver;
mod structs;
mod templates;
mod utils;

use apis::ScratchClient;
use generator::Generator;
use models::Platform;
use utils::parse_webhook;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "Генератор проектов Scratch/TurboWarp"
)]
enum BotCommand {
    #[command(description = "показать это сообщение")]
    Help,
    #[command(description = "приветственное сообщение")]
    Start,
    #[command(description = "сгенерировать проект Scratch по описанию", alias = "g")]
    Generate(String),
    #[command(description = "сгенерировать проект TurboWarp по описанию", alias = "tw")]
    Turbowarp(String),
    #[command(description = "избранные проекты сообщества")]
    Featured,
    #[command(description = "карточка проекта по id", alias = "p")]
    Project(u64),
    #[command(description = "проекты пользователя", alias = "u")]
    Projects(String),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_env_filter(EnvFilter::new("scratch_gen_bot=debug"))
        .init();

    info!("Starting the project generator bot");

    // Setup telegram bot (we do it here because this place is a cold start)
    let bot = Bot::new(env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN not set!"));
    info!("Telegram bot initialized");

    let client = ScratchClient::new();
    let generator = Generator::with_client(client.clone());
    info!("Scratch API client initialized");

    // Set commands
    let res = bot.set_my_commands(BotCommand::bot_commands()).await;

    match res {
        Ok(_) => info!("Bot commands set successfully"),
        Err(e) => warn!("Failed to set commands: {:?}", e),
    }

    // Run the Lambda function
    info!("Starting Lambda function");
    run(service_fn(|req| {
        handler(req, &bot, &client, &generator)
    }))
    .await
}

async fn handler(
    req: lambda_http::Request,
    bot: &Bot,
    client: &ScratchClient,
    generator: &Generator,
) -> Result<lambda_http::Response<String>, lambda_http::Error> {
    debug!("Received a new request");

    // Parse JSON webhook
    let bot = bot.clone();

    let update = match parse_webhook(req).await {
        Ok(message) => {
            debug!("Successfully parsed webhook");
            message
        }
        Err(e) => {
            error!("Failed to parse webhook: {:?}", e);
            return Ok(lambda_http::Response::builder()
                .status(400)
                .body("Failed to parse webhook".into())
                .unwrap());
        }
    };

    // Handle commands
    if let UpdateKind::Message(message) = &update.kind {
        if let Some(text) = &message.text() {
            debug!("Received message: {}", text);
            if let Ok(command) = BotCommand::parse(text, bot.get_me().await.unwrap().username()) {
                info!("Parsed command: {:?}", command);
                return handle_command(bot.clone(), message, command, client, generator).await;
            }
        }
    }

    debug!("No command found in the message");

    Ok(lambda_http::Response::builder()
        .status(200)
        .body(String::new())
        .unwrap())
}

async fn handle_command(
    bot: Bot,
    message: &Message,
    command: BotCommand,
    client: &ScratchClient,
    generator: &Generator,
) -> Result<lambda_http::Response<String>, lambda_http::Error> {
    info!("Handling command: {:?}", command);

    let res = match command {
        BotCommand::Help | BotCommand::Start => bot
            .send_message(message.chat.id, BotCommand::descriptions().to_string())
            .await
            .map(|_| ()),
        BotCommand::Generate(args) => {
            commands::generate(bot, message, generator, Platform::Scratch, args).await
        }
        BotCommand::Turbowarp(args) => {
            commands::generate(bot, message, generator, Platform::Turbowarp, args).await
        }
        BotCommand::Featured => commands::featured(bot, message, client).await,
        BotCommand::Project(id) => commands::project(bot, message, client, id).await,
        BotCommand::Projects(username) => {
            commands::user_projects(bot, message, client, username).await
        }
    };

    // Catch error
    if let Err(e) = res {
        error!("Failed to handle command: {:?}", e);
    }

    Ok(lambda_http::Response::builder()
        .status(200)
        .body(String::new())
        .unwrap())
}
