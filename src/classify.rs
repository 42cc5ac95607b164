//! Category badges: the color and icon drawn next to each entry.

use crate::catalog::CommandEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    Orange,
    Purple,
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeIcon {
    /// Shell prompt glyph.
    Command,
    Hash,
    Bug,
    CodeBlock,
    Circle,
}

impl BadgeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            BadgeIcon::Command => "❯",
            BadgeIcon::Hash => "#",
            BadgeIcon::Bug => "✖",
            BadgeIcon::CodeBlock => "‹›",
            BadgeIcon::Circle => "○",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Badge {
    pub color: BadgeColor,
    pub icon: BadgeIcon,
}

impl Badge {
    const fn new(color: BadgeColor, icon: BadgeIcon) -> Self {
        Self { color, icon }
    }
}

/// Badge for any category not listed in [`BADGES`].
pub const DEFAULT_BADGE: Badge = Badge::new(BadgeColor::Blue, BadgeIcon::Circle);

/// Known category labels. Matching is exact.
pub const BADGES: &[(&str, Badge)] = &[
    ("Drush", Badge::new(BadgeColor::Orange, BadgeIcon::Command)),
    ("GovCMS", Badge::new(BadgeColor::Purple, BadgeIcon::Hash)),
    ("Ahoy", Badge::new(BadgeColor::Purple, BadgeIcon::Hash)),
    ("Error", Badge::new(BadgeColor::Red, BadgeIcon::Bug)),
    ("Twig", Badge::new(BadgeColor::Green, BadgeIcon::CodeBlock)),
];

pub fn badge_for(category: &str) -> Badge {
    BADGES
        .iter()
        .find(|(label, _)| *label == category)
        .map(|(_, badge)| *badge)
        .unwrap_or(DEFAULT_BADGE)
}

pub fn color_for(entry: &CommandEntry) -> BadgeColor {
    badge_for(&entry.category).color
}

pub fn icon_for(entry: &CommandEntry) -> BadgeIcon {
    badge_for(&entry.category).icon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn entry_with_category(category: &str) -> CommandEntry {
        CommandEntry::new("id", category, "Title", "cmd", "https://example.com")
    }

    #[test]
    fn test_known_colors() {
        let cases = [
            ("Drush", BadgeColor::Orange),
            ("GovCMS", BadgeColor::Purple),
            ("Ahoy", BadgeColor::Purple),
            ("Error", BadgeColor::Red),
            ("Twig", BadgeColor::Green),
            ("Other", BadgeColor::Blue),
        ];
        for (category, color) in cases {
            assert_eq!(color_for(&entry_with_category(category)), color, "{category}");
        }
    }

    #[test]
    fn test_known_icons() {
        let cases = [
            ("Drush", BadgeIcon::Command),
            ("GovCMS", BadgeIcon::Hash),
            ("Ahoy", BadgeIcon::Hash),
            ("Error", BadgeIcon::Bug),
            ("Twig", BadgeIcon::CodeBlock),
            ("Composer", BadgeIcon::Circle),
        ];
        for (category, icon) in cases {
            assert_eq!(icon_for(&entry_with_category(category)), icon, "{category}");
        }
    }

    #[test]
    fn test_unknown_and_odd_labels_use_default() {
        for label in ["", "drush", "DRUSH", " Drush", "Made Up", "🦀"] {
            assert_eq!(badge_for(label), DEFAULT_BADGE, "{label:?}");
        }
    }

    #[test]
    fn test_badge_is_deterministic() {
        let catalog = Catalog::builtin();
        for entry in catalog.get_all() {
            let first = (color_for(entry), icon_for(entry));
            for _ in 0..3 {
                assert_eq!((color_for(entry), icon_for(entry)), first);
            }
        }
    }

    #[test]
    fn test_table_labels_unique() {
        let mut labels: Vec<&str> = BADGES.iter().map(|(label, _)| *label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), BADGES.len());
    }

    #[test]
    fn test_glyphs_not_empty() {
        for icon in [
            BadgeIcon::Command,
            BadgeIcon::Hash,
            BadgeIcon::Bug,
            BadgeIcon::CodeBlock,
            BadgeIcon::Circle,
        ] {
            assert!(!icon.glyph().is_empty());
        }
    }
}
