//! Intent classification.
//!
//! Classification is a pure function over an immutable rule table: a list
//! of travel trigger keywords and a list of duration-query phrases. Both are
//! matched as case-insensitive substrings.

use std::env;

use tracing::debug;

/// Default travel trigger keywords.
pub const DEFAULT_TRAVEL_KEYWORDS: &[&str] = &["travel"];

/// Phrases that ask about the duration of the last route.
pub const DURATION_PHRASES: &[&str] = &[
    "how long",
    "how much time",
    "duration",
    "how many minutes",
    "how many hours",
];

/// What a message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Resolve a route between two places.
    RouteRequest,
    /// Answer from the last resolved route, no external call.
    DurationFollowup,
    /// Free-form generation.
    General,
}

/// Keyword and phrase tables used by [`IntentRules::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRules {
    travel_keywords: Vec<String>,
    duration_phrases: Vec<String>,
}

impl Default for IntentRules {
    fn default() -> Self {
        Self::new(DEFAULT_TRAVEL_KEYWORDS.iter().copied())
    }
}

impl IntentRules {
    /// Create rules with the given travel keywords and the standard duration phrases.
    ///
    /// Keywords are trimmed and lowercased; blank entries are dropped.
    pub fn new<I, S>(travel_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            travel_keywords: normalize(travel_keywords),
            duration_phrases: normalize(DURATION_PHRASES.iter().copied()),
        }
    }

    /// Create rules from environment variables.
    ///
    /// `WAYPOINT_TRAVEL_KEYWORDS` is a comma-separated keyword list. When it
    /// is unset or contains no usable keywords the defaults apply.
    pub fn from_env() -> Self {
        let keywords = env::var("WAYPOINT_TRAVEL_KEYWORDS").ok();
        let rules = match keywords {
            Some(list) => Self::new(list.split(',')),
            None => Self::default(),
        };

        if rules.travel_keywords.is_empty() {
            return Self::default();
        }

        debug!("Travel keywords: {:?}", rules.travel_keywords);
        rules
    }

    /// Configured travel keywords (lowercased).
    pub fn travel_keywords(&self) -> &[String] {
        &self.travel_keywords
    }

    /// Classify a message.
    ///
    /// Travel keywords win over duration phrases. A duration phrase only
    /// counts as a follow-up when a route has already been resolved.
    pub fn classify(&self, message: &str, has_last_route: bool) -> Intent {
        let lowered = message.to_lowercase();

        if contains_any(&lowered, &self.travel_keywords) {
            Intent::RouteRequest
        } else if has_last_route && contains_any(&lowered, &self.duration_phrases) {
            Intent::DurationFollowup
        } else {
            Intent::General
        }
    }
}

fn normalize<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_travel_keyword_any_case_or_punctuation() {
        let rules = IntentRules::default();
        for message in [
            "I want to travel from Paris to Berlin",
            "TRAVEL from A to B",
            "Travel!",
            "(travel) plans?",
            "time-travelling is fun",
        ] {
            assert_eq!(rules.classify(message, false), Intent::RouteRequest, "{}", message);
            assert_eq!(rules.classify(message, true), Intent::RouteRequest, "{}", message);
        }
    }

    #[test]
    fn test_duration_phrase_needs_last_route() {
        let rules = IntentRules::default();
        for message in [
            "how long will it take",
            "How much time is that?",
            "What's the DURATION",
            "how many minutes?",
            "How many hours would that be",
        ] {
            assert_eq!(rules.classify(message, true), Intent::DurationFollowup, "{}", message);
            assert_eq!(rules.classify(message, false), Intent::General, "{}", message);
        }
    }

    #[test]
    fn test_travel_beats_duration() {
        let rules = IntentRules::default();
        assert_eq!(
            rules.classify("how long to travel from Rome to Milan", true),
            Intent::RouteRequest
        );
    }

    #[test]
    fn test_general() {
        let rules = IntentRules::default();
        assert_eq!(rules.classify("Tell me a joke", false), Intent::General);
        assert_eq!(rules.classify("Tell me a joke", true), Intent::General);
        assert_eq!(rules.classify("", true), Intent::General);
    }

    #[test]
    fn test_custom_keywords() {
        let rules = IntentRules::new([" Route ", "", "DRIVE"]);
        assert_eq!(rules.travel_keywords(), &["route".to_string(), "drive".to_string()]);
        assert_eq!(rules.classify("drive me to Lyon", false), Intent::RouteRequest);
        assert_eq!(rules.classify("I want to travel", false), Intent::General);
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::remove_var("WAYPOINT_TRAVEL_KEYWORDS");
        assert_eq!(IntentRules::from_env(), IntentRules::default());

        env::set_var("WAYPOINT_TRAVEL_KEYWORDS", "trip, journey");
        let rules = IntentRules::from_env();
        assert_eq!(rules.classify("plan a Journey", false), Intent::RouteRequest);
        assert_eq!(rules.classify("travel", false), Intent::General);

        env::set_var("WAYPOINT_TRAVEL_KEYWORDS", " , ");
        assert_eq!(IntentRules::from_env(), IntentRules::default());

        env::remove_var("WAYPOINT_TRAVEL_KEYWORDS");
    }
}
