use lambda_http::Error;
use teloxide::types::{Message, Update};
use tracing::debug;

/// Parse the Telegram webhook body into an update.
pub async fn parse_webhook(req: lambda_http::Request) -> Result<Update, Error> {
    let body = req.body();
    let update: Update = serde_json::from_slice(body)?;
    Ok(update)
}

/// Pick the prompt for a command: the command's own arguments, or the
/// text of the replied-to message when the arguments are empty.
pub fn find_prompt(message: &Message, args: &str) -> Option<String> {
    let args = args.trim();
    if !args.is_empty() {
        return Some(args.to_string());
    }

    let reply = message
        .reply_to_message()
        .and_then(|reply| reply.text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    if reply.is_none() {
        debug!("No prompt in the message or the reply");
    }
    reply
}
