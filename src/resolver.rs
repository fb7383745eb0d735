use crate::models::Category;

// Keyword stems per category, checked in priority order. Substring
// matching against the lowercased prompt, so stems cover the Russian
// case endings ("игр" matches "игра", "игру", "играть").
const GAME_KEYWORDS: &[&str] = &["игр", "аркад", "платформер", "шутер", "гонк", "game", "arcade"];
const ANIMATION_KEYWORDS: &[&str] = &["анимац", "мультфильм", "мультик", "animat"];
const STORY_KEYWORDS: &[&str] = &["истори", "рассказ", "сказк", "story", "tale"];
const MUSIC_KEYWORDS: &[&str] = &["музык", "песн", "мелоди", "music", "song"];
const ART_KEYWORDS: &[&str] = &["рису", "живопис", "art", "draw", "paint"];

/// Map free text to a project category.
///
/// Priority order is game > animation > story > music > art; the first
/// matching set wins. Pure function, no side effects.
pub fn classify(text: &str) -> Category {
    let text = text.to_lowercase();

    let sets = [
        (Category::Game, GAME_KEYWORDS),
        (Category::Animation, ANIMATION_KEYWORDS),
        (Category::Story, STORY_KEYWORDS),
        (Category::Music, MUSIC_KEYWORDS),
        (Category::Art, ART_KEYWORDS),
    ];

    for (category, keywords) in sets {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return category;
        }
    }

    Category::Default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_category() {
        assert_eq!(classify("аркадная игра с котом"), Category::Game);
        assert_eq!(classify("анимация танцующего кота"), Category::Animation);
        assert_eq!(classify("удивительная история"), Category::Story);
        assert_eq!(classify("сделай музыкальный проект"), Category::Music);
        assert_eq!(classify("рисунок заката"), Category::Art);
        assert_eq!(classify("что-нибудь интересное"), Category::Default);
    }

    #[test]
    fn priority_order_wins_on_multiple_matches() {
        // Both "игра" and "история" match; game has higher priority.
        assert_eq!(classify("игра про историю пирата"), Category::Game);
        // Both "музыка" and "рисунок" match; music wins over art.
        assert_eq!(classify("музыка и рисунок"), Category::Music);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("ИГРА-ПЛАТФОРМЕР"), Category::Game);
        assert_eq!(classify("Story About A Cat"), Category::Story);
    }

    #[test]
    fn classify_is_idempotent() {
        let text = "мультик про динозавра";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn english_keywords_match() {
        assert_eq!(classify("a chase game"), Category::Game);
        assert_eq!(classify("animate my name"), Category::Animation);
    }
}
