//! Heuristic ad/tracker request classifier
//!
//! The host splits its blocked-request counters into "ads" and
//! "trackers" based on URL patterns. The classifier is stateless and
//! sits behind a trait so the interception layer can swap in its own
//! implementation without touching the filter or compiler.

/// Coarse classification of a blocked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    Ad,
    Tracker,
}

/// Stateless URL classifier seam for the interception collaborator.
pub trait Classifier {
    /// Classify a URL, or `None` if no heuristic matches.
    fn classify(&self, url: &str) -> Option<RequestClass>;
}

// Ad wins over tracker when both match, mirroring the host's counter
// logic.
const AD_PATTERNS: &[&str] = &[
    "ads",
    "adv",
    "adimg",
    "doubleclick",
    "googlesyndication",
    "banner",
    "sponsor",
    "taboola",
    "outbrain",
    "mgid",
];

const TRACKER_PATTERNS: &[&str] = &[
    "analytics",
    "tracker",
    "pixel",
    "stat",
    "metrics",
    "telemetry",
    "logging",
    "beacon",
    "fingerprint",
];

/// Default substring-based classifier, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl Classifier for PatternClassifier {
    fn classify(&self, url: &str) -> Option<RequestClass> {
        let lower = url.to_ascii_lowercase();
        if AD_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Some(RequestClass::Ad);
        }
        if TRACKER_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Some(RequestClass::Tracker);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_ad_urls() {
        let c = PatternClassifier;
        for url in [
            "https://static.doubleclick.net/instream/ad_status.js",
            "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js",
            "https://cdn.taboola.com/libtrc/loader.js",
            "https://example.com/banner/728x90.png",
            "https://cdn.example.com/adimg/728x90.gif",
        ] {
            assert_eq!(c.classify(url), Some(RequestClass::Ad), "{url}");
        }
    }

    #[test]
    fn test_classifies_tracker_urls() {
        let c = PatternClassifier;
        for url in [
            "https://www.google-analytics.com/collect",
            "https://example.com/pixel.gif",
            "https://telemetry.example.net/v1/events",
            "https://example.org/beacon?id=1",
        ] {
            assert_eq!(c.classify(url), Some(RequestClass::Tracker), "{url}");
        }
    }

    #[test]
    fn test_ad_wins_over_tracker() {
        let c = PatternClassifier;
        // Matches both "ads" and "analytics".
        let url = "https://ads.analytics.example/x.js";
        assert_eq!(c.classify(url), Some(RequestClass::Ad));
    }

    #[test]
    fn test_case_insensitive() {
        let c = PatternClassifier;
        assert_eq!(
            c.classify("https://DOUBLECLICK.net/x"),
            Some(RequestClass::Ad)
        );
    }

    #[test]
    fn test_plain_urls_unclassified() {
        let c = PatternClassifier;
        for url in [
            "https://en.wikipedia.org/wiki/Rust",
            "https://example.com/index.html",
        ] {
            assert_eq!(c.classify(url), None, "{url}");
        }
    }
}
