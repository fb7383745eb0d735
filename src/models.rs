use std::fmt;

/// Target platform for a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Scratch,
    Turbowarp,
}

impl Platform {
    /// URL of an existing project on this platform.
    pub fn project_url(self, id: u64) -> String {
        match self {
            Platform::Scratch => format!("https://scratch.mit.edu/projects/{id}"),
            Platform::Turbowarp => format!("https://turbowarp.org/{id}"),
        }
    }

    /// Base editor URL used for template fallbacks.
    pub fn editor_url(self) -> &'static str {
        match self {
            Platform::Scratch => "https://scratch.mit.edu/projects/editor/",
            Platform::Turbowarp => "https://turbowarp.org/editor",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Platform::Scratch => write!(f, "Scratch"),
            Platform::Turbowarp => write!(f, "TurboWarp"),
        }
    }
}

/// Project category picked by the type resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Game,
    Animation,
    Story,
    Music,
    Art,
    Default,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Game => write!(f, "game"),
            Category::Animation => write!(f, "animation"),
            Category::Story => write!(f, "story"),
            Category::Music => write!(f, "music"),
            Category::Art => write!(f, "art"),
            Category::Default => write!(f, "default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_url_contains_id() {
        assert_eq!(
            Platform::Scratch.project_url(42),
            "https://scratch.mit.edu/projects/42"
        );
        assert_eq!(
            Platform::Turbowarp.project_url(42),
            "https://turbowarp.org/42"
        );
    }

    #[test]
    fn editor_urls_are_absolute() {
        for platform in [Platform::Scratch, Platform::Turbowarp] {
            assert!(reqwest::Url::parse(platform.editor_url()).is_ok());
        }
    }
}
