//! Slugline parsing (`INT. KITCHEN - NIGHT`).

/// Interior / exterior marker at the head of a slugline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Interior,
    Exterior,
    Both,
    Unknown,
}

/// Lighting period named in the slugline tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
    Dawn,
    Dusk,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Dusk => "dusk",
        }
    }
}

/// Markers meaning "same time as the previous scene".
const CONTINUITY_MARKERS: &[&str] = &["CONTINUOUS", "LATER", "SAME", "MOMENTS"];

/// Parsed view of a slugline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SluglineInfo {
    pub setting: Setting,
    pub location: String,
    /// `None` when absent or replaced by a continuity marker.
    pub time_of_day: Option<TimeOfDay>,
    pub is_continuous: bool,
    /// Every upper-cased word of the slugline, setting prefix included.
    pub words: Vec<String>,
}

impl SluglineInfo {
    pub fn parse(slugline: &str) -> Self {
        let upper = slugline.trim().to_uppercase();

        let (setting, rest) = split_setting(&upper);

        let mut parts = rest.split(" - ").map(str::trim);
        let location = parts.next().unwrap_or_default().to_string();

        let mut time_of_day = None;
        let mut is_continuous = false;
        for part in parts {
            for word in part.split_whitespace() {
                if CONTINUITY_MARKERS.contains(&word) {
                    is_continuous = true;
                } else if let Some(t) = time_token(word) {
                    time_of_day = Some(t);
                }
            }
        }
        if is_continuous {
            time_of_day = None;
        }

        let words = upper
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();

        Self {
            setting,
            location,
            time_of_day,
            is_continuous,
            words,
        }
    }

    /// Whole-word lookup anywhere in the slugline. `candidates` are upper case.
    pub fn mentions(&self, candidates: &[&str]) -> bool {
        self.words.iter().any(|w| candidates.contains(&w.as_str()))
    }

    pub fn is_exterior(&self) -> bool {
        matches!(self.setting, Setting::Exterior | Setting::Both)
    }

    /// Location lower-cased for prompts (`DOCKS WAREHOUSE` → `docks warehouse`).
    pub fn location_phrase(&self) -> String {
        self.location.to_lowercase()
    }
}

/// True when both sluglines name a time of day and they differ.
///
/// Continuity markers and missing tokens never count as a change.
pub fn time_of_day_changes(from: &str, to: &str) -> bool {
    let a = SluglineInfo::parse(from).time_of_day;
    let b = SluglineInfo::parse(to).time_of_day;
    matches!((a, b), (Some(a), Some(b)) if a != b)
}

fn split_setting(upper: &str) -> (Setting, &str) {
    const PREFIXES: &[(&str, Setting)] = &[
        ("INT./EXT.", Setting::Both),
        ("EXT./INT.", Setting::Both),
        ("INT/EXT", Setting::Both),
        ("I/E", Setting::Both),
        ("INT.", Setting::Interior),
        ("EXT.", Setting::Exterior),
        ("INT ", Setting::Interior),
        ("EXT ", Setting::Exterior),
    ];
    for (prefix, setting) in PREFIXES {
        if let Some(rest) = upper.strip_prefix(prefix) {
            return (*setting, rest.trim_start());
        }
    }
    (Setting::Unknown, upper)
}

fn time_token(word: &str) -> Option<TimeOfDay> {
    let word = word.trim_matches(|c: char| !c.is_ascii_alphabetic());
    match word {
        "DAY" | "MORNING" | "AFTERNOON" | "NOON" | "DAYTIME" => Some(TimeOfDay::Day),
        "NIGHT" | "MIDNIGHT" | "NIGHTTIME" => Some(TimeOfDay::Night),
        "DAWN" | "SUNRISE" | "DAYBREAK" => Some(TimeOfDay::Dawn),
        "DUSK" | "SUNSET" | "EVENING" | "TWILIGHT" => Some(TimeOfDay::Dusk),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interior_night() {
        let info = SluglineInfo::parse("INT. REACTOR CONTROL ROOM - NIGHT");
        assert_eq!(info.setting, Setting::Interior);
        assert_eq!(info.location, "REACTOR CONTROL ROOM");
        assert_eq!(info.time_of_day, Some(TimeOfDay::Night));
        assert!(!info.is_continuous);
    }

    #[test]
    fn test_parse_mixed_setting_and_lowercase() {
        let info = SluglineInfo::parse("int./ext. moving car - dawn");
        assert_eq!(info.setting, Setting::Both);
        assert!(info.is_exterior());
        assert_eq!(info.time_of_day, Some(TimeOfDay::Dawn));
    }

    #[test]
    fn test_continuity_marker_clears_time() {
        let info = SluglineInfo::parse("EXT. ALLEY - CONTINUOUS");
        assert_eq!(info.time_of_day, None);
        assert!(info.is_continuous);
        let later = SluglineInfo::parse("INT. BAR - MOMENTS LATER");
        assert!(later.is_continuous);
    }

    #[test]
    fn test_time_of_day_changes() {
        assert!(time_of_day_changes("INT. A - DAY", "EXT. B - NIGHT"));
        assert!(!time_of_day_changes("INT. A - DAY", "EXT. B - DAY"));
        assert!(!time_of_day_changes("INT. A - DAY", "EXT. B - CONTINUOUS"));
        assert!(!time_of_day_changes("INT. A - NIGHT", "EXT. B - LATER"));
        assert!(!time_of_day_changes("INT. A", "EXT. B - NIGHT"));
    }

    #[test]
    fn test_mentions_whole_words_across_the_slugline() {
        let alley = SluglineInfo::parse("EXT. ALLEY - NIGHT - RAIN");
        assert!(alley.mentions(&["RAIN"]));
        let station = SluglineInfo::parse("INT. TRAIN STATION - DAY");
        assert!(!station.mentions(&["RAIN"]));
        assert!(station.mentions(&["TRAIN"]));
    }

    #[test]
    fn test_unknown_setting() {
        let info = SluglineInfo::parse("THE DESERT");
        assert_eq!(info.setting, Setting::Unknown);
        assert_eq!(info.location, "THE DESERT");
        assert_eq!(info.time_of_day, None);
    }
}
