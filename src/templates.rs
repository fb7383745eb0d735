use anyhow::Result;
use reqwest::Url;

use crate::models::{Category, Platform};
use crate::structs::GenerationRequest;

/// Static fallback template for a category/platform pair.
///
/// Points at the platform editor with a matching tutorial preselected,
/// so the card link always opens something usable even when the remote
/// catalog had no results.
pub fn template_url(category: Category, platform: Platform) -> &'static str {
    match (platform, category) {
        (Platform::Scratch, Category::Game) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=make-a-chase-game"
        }
        (Platform::Scratch, Category::Animation) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=animate-a-character"
        }
        (Platform::Scratch, Category::Story) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=tell-a-story"
        }
        (Platform::Scratch, Category::Music) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=make-music"
        }
        (Platform::Scratch, Category::Art) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=animate-a-name"
        }
        (Platform::Scratch, Category::Default) => {
            "https://scratch.mit.edu/projects/editor/?tutorial=getting-started"
        }
        (Platform::Turbowarp, Category::Game) => {
            "https://turbowarp.org/editor?tutorial=make-a-chase-game"
        }
        (Platform::Turbowarp, Category::Animation) => {
            "https://turbowarp.org/editor?tutorial=animate-a-character"
        }
        (Platform::Turbowarp, Category::Story) => {
            "https://turbowarp.org/editor?tutorial=tell-a-story"
        }
        (Platform::Turbowarp, Category::Music) => {
            "https://turbowarp.org/editor?tutorial=make-music"
        }
        (Platform::Turbowarp, Category::Art) => {
            "https://turbowarp.org/editor?tutorial=animate-a-name"
        }
        (Platform::Turbowarp, Category::Default) => {
            "https://turbowarp.org/editor?tutorial=getting-started"
        }
    }
}

/// Append the enabled option switches to a template URL as query
/// parameters (`sprites=true`, `backgrounds=true`, `music=true`).
pub fn apply_options(url: &str, request: &GenerationRequest) -> Result<String> {
    let mut url = Url::parse(url)?;

    {
        let mut pairs = url.query_pairs_mut();
        if request.include_sprites {
            pairs.append_pair("sprites", "true");
        }
        if request.include_backgrounds {
            pairs.append_pair("backgrounds", "true");
        }
        if request.include_music {
            pairs.append_pair("music", "true");
        }
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_are_absolute_urls() {
        let categories = [
            Category::Game,
            Category::Animation,
            Category::Story,
            Category::Music,
            Category::Art,
            Category::Default,
        ];
        for platform in [Platform::Scratch, Platform::Turbowarp] {
            for category in categories {
                assert!(Url::parse(template_url(category, platform)).is_ok());
            }
        }
    }

    #[test]
    fn options_are_appended_when_enabled() {
        let request = GenerationRequest {
            free_text: "аркадная игра с котом".to_string(),
            platform: Platform::Scratch,
            include_sprites: true,
            include_backgrounds: true,
            include_music: false,
        };
        let url = apply_options(template_url(Category::Game, Platform::Scratch), &request).unwrap();
        assert!(url.starts_with("https://scratch.mit.edu/projects/editor/"));
        assert!(url.contains("tutorial=make-a-chase-game"));
        assert!(url.contains("sprites=true"));
        assert!(url.contains("backgrounds=true"));
        assert!(!url.contains("music=true"));
    }

    #[test]
    fn no_options_leave_template_untouched() {
        let request = GenerationRequest {
            free_text: "проект".to_string(),
            platform: Platform::Turbowarp,
            include_sprites: false,
            include_backgrounds: false,
            include_music: false,
        };
        let template = template_url(Category::Default, Platform::Turbowarp);
        let url = apply_options(template, &request).unwrap();
        assert_eq!(url, template);
    }
}
