//! Enumerated value domains
//!
//! Each domain is a fixed set of allowed text values with a designated
//! fallback. Output values are always exact members of the domain; matching is
//! case-sensitive unless the column rule asks for case folding first.

use serde::Serialize;

/// A named, fixed set of allowed text values plus a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumDomain {
    pub name: &'static str,
    pub values: &'static [&'static str],
    pub fallback: &'static str,
}

impl EnumDomain {
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    /// Returns `value` if it is a member, otherwise the fallback.
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        if self.contains(value) {
            value
        } else {
            self.fallback
        }
    }
}

/// Song difficulty level
pub const SONG_LEVEL: EnumDomain = EnumDomain {
    name: "song_level",
    values: &["beginner", "intermediate", "advanced"],
    fallback: "beginner",
};

/// Musical key: the twelve natural/sharp roots, major and minor
pub const SONG_KEY: EnumDomain = EnumDomain {
    name: "song_key",
    values: &[
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "Cm", "C#m", "Dm", "D#m",
        "Em", "Fm", "F#m", "Gm", "G#m", "Am", "A#m", "Bm",
    ],
    fallback: "C",
};

/// Lesson status
pub const LESSON_STATUS: EnumDomain = EnumDomain {
    name: "lesson_status",
    values: &["scheduled", "completed", "cancelled", "rescheduled"],
    fallback: "scheduled",
};

/// Learning progress of a song within a lesson
pub const LEARNING_STATUS: EnumDomain = EnumDomain {
    name: "learning_status",
    values: &["to_learn", "started", "remembered", "with_author", "mastered"],
    fallback: "to_learn",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_domain_has_twenty_four_distinct_values() {
        let mut keys = SONG_KEY.values.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 24);
    }

    #[test]
    fn fallbacks_are_members() {
        for domain in [SONG_LEVEL, SONG_KEY, LESSON_STATUS, LEARNING_STATUS] {
            assert!(domain.contains(domain.fallback), "{}", domain.name);
        }
    }

    #[test]
    fn resolve_is_case_sensitive() {
        assert_eq!(SONG_LEVEL.resolve("advanced"), "advanced");
        assert_eq!(SONG_LEVEL.resolve("Advanced"), "beginner");
        assert_eq!(SONG_KEY.resolve("c#m"), "C");
        assert_eq!(SONG_KEY.resolve("C#m"), "C#m");
    }
}
