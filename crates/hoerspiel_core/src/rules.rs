use std::sync::LazyLock;

use regex::Regex;

/// Episode number assigned when a title looks like a classic but the number
/// does not fit. Sorts after every real episode.
pub const UNKNOWN_EPISODE: u32 = u32::MAX;

/// Genre label of the canonical audio-play releases.
pub const CANONICAL_GENRE: &str = "Hörspiele";

/// Episode token followed by the episode number, e.g. "Folge 42".
pub const EPISODE_PATTERN: &str = r"(?i)Folge\s+(\d+)";

/// Title markers of spinoffs: minis, bedtime stories, song collections,
/// boxed sets and holiday editions. Each entry is a regex fragment matched
/// case-insensitively anywhere in the title.
pub const SPECIAL_MARKERS: &[&str] = &[
    "Minis",
    r"Gute\s*-?\s*Nacht",
    "Schäfchenwolken",
    "Lieder",
    "Box",
    "Weihnacht",
];

static STANDARD_RULES: LazyLock<ClassificationRules> = LazyLock::new(|| {
    ClassificationRules::new(EPISODE_PATTERN, SPECIAL_MARKERS, CANONICAL_GENRE)
        .expect("built-in episode pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Classic { episode: u32 },
    Special,
    Other,
}

impl Classification {
    pub fn is_classic(self) -> bool {
        matches!(self, Classification::Classic { .. })
    }
}

/// Title-based classification rules: a compiled episode pattern, a set of
/// special markers and the genre preferred when two releases claim the same
/// episode.
#[derive(Debug, Clone)]
pub struct ClassificationRules {
    episode_pattern: Regex,
    special_markers: Option<Regex>,
    canonical_genre: String,
}

impl ClassificationRules {
    /// `episode_pattern` must have the episode number as its first capture
    /// group. `special_markers` are regex fragments joined into one
    /// case-insensitive alternation.
    pub fn new<S: AsRef<str>>(
        episode_pattern: &str,
        special_markers: &[S],
        canonical_genre: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let alternatives: Vec<&str> = special_markers
            .iter()
            .map(AsRef::as_ref)
            .filter(|marker| !marker.trim().is_empty())
            .collect();
        let special_markers = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?)
        };

        Ok(Self {
            episode_pattern: Regex::new(episode_pattern)?,
            special_markers,
            canonical_genre: canonical_genre.into(),
        })
    }

    /// Rules used by the series pages.
    pub fn standard() -> &'static ClassificationRules {
        &STANDARD_RULES
    }

    pub fn canonical_genre(&self) -> &str {
        &self.canonical_genre
    }

    /// Case-insensitive search for any marker. Only gaps spelled out in a
    /// marker are flexible, so words of the title are never joined.
    pub fn has_special_marker(&self, title: &str) -> bool {
        self.special_markers
            .as_ref()
            .is_some_and(|markers| markers.is_match(title))
    }

    /// `None` when the title carries no episode token. A token whose number
    /// overflows yields [`UNKNOWN_EPISODE`].
    pub fn episode_number(&self, title: &str) -> Option<u32> {
        let captures = self.episode_pattern.captures(title)?;
        let number = captures
            .get(1)
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .unwrap_or(UNKNOWN_EPISODE);
        Some(number)
    }

    pub fn classify(&self, title: &str) -> Classification {
        if self.has_special_marker(title) {
            return Classification::Special;
        }
        match self.episode_number(title) {
            Some(episode) => Classification::Classic { episode },
            None => Classification::Other,
        }
    }

    pub fn is_classic(&self, title: &str) -> bool {
        self.classify(title).is_classic()
    }

    /// Ascending sort key for classic views; non-classics sort last.
    pub fn episode_sort_key(&self, title: &str) -> u32 {
        match self.classify(title) {
            Classification::Classic { episode } => episode,
            Classification::Special | Classification::Other => UNKNOWN_EPISODE,
        }
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self::standard().clone()
    }
}
