use crate::models::Platform;

/// Maximum number of prompt characters carried into a card title.
const TITLE_LIMIT: usize = 20;

/// Immutable snapshot of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub free_text: String,
    pub platform: Platform,
    pub include_sprites: bool,
    pub include_backgrounds: bool,
    pub include_music: bool,
}

impl GenerationRequest {
    /// Build a request from raw command text.
    ///
    /// Option tokens (`+музыка`/`+music`, `-спрайты`/`-sprites`,
    /// `-фоны`/`-backgrounds` and their opposites) are stripped from the
    /// text and toggle the corresponding switch. Defaults are
    /// sprites=on, backgrounds=on, music=off.
    pub fn parse(text: &str, platform: Platform) -> Self {
        let mut include_sprites = true;
        let mut include_backgrounds = true;
        let mut include_music = false;
        let mut words: Vec<&str> = Vec::new();

        for word in text.split_whitespace() {
            match word.to_lowercase().as_str() {
                "+спрайты" | "+sprites" => include_sprites = true,
                "-спрайты" | "-sprites" => include_sprites = false,
                "+фоны" | "+backgrounds" => include_backgrounds = true,
                "-фоны" | "-backgrounds" => include_backgrounds = false,
                "+музыка" | "+music" => include_music = true,
                "-музыка" | "-music" => include_music = false,
                _ => words.push(word),
            }
        }

        Self {
            free_text: words.join(" "),
            platform,
            include_sprites,
            include_backgrounds,
            include_music,
        }
    }
}

/// The card produced by one successful generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
}

/// Shorten a prompt to a card title, respecting char boundaries.
pub fn short_title(prompt: &str) -> String {
    let mut title: String = prompt.chars().take(TITLE_LIMIT).collect();
    if prompt.chars().count() > TITLE_LIMIT {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let request = GenerationRequest::parse("игра с котом", Platform::Scratch);
        assert_eq!(request.free_text, "игра с котом");
        assert!(request.include_sprites);
        assert!(request.include_backgrounds);
        assert!(!request.include_music);
    }

    #[test]
    fn parse_strips_option_tokens() {
        let request =
            GenerationRequest::parse("платформер +музыка -спрайты", Platform::Turbowarp);
        assert_eq!(request.free_text, "платформер");
        assert!(!request.include_sprites);
        assert!(request.include_backgrounds);
        assert!(request.include_music);
    }

    #[test]
    fn parse_accepts_english_tokens() {
        let request = GenerationRequest::parse("cat game -backgrounds +music", Platform::Scratch);
        assert_eq!(request.free_text, "cat game");
        assert!(!request.include_backgrounds);
        assert!(request.include_music);
    }

    #[test]
    fn short_title_truncates_on_char_boundary() {
        let prompt = "аркадная игра с котом, который собирает монеты";
        let title = short_title(prompt);
        assert_eq!(title.chars().count(), 23); // 20 chars + "..."
        assert!(title.ends_with("..."));
    }

    #[test]
    fn short_title_keeps_short_prompts() {
        assert_eq!(short_title("пинг-понг"), "пинг-понг");
    }
}
