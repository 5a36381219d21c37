use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::markup;
use crate::models::Competition;
use crate::taxonomy::competitions::{
    BODY_RULES, GENERIC_IMAGE_PATTERNS, IMAGE_RULES, TAG_RULES, TITLE_RULES,
};

static TITLE_PATTERNS: Lazy<Vec<(Regex, Competition)>> = Lazy::new(|| compile(TITLE_RULES));
static BODY_PATTERNS: Lazy<Vec<(Regex, Competition)>> = Lazy::new(|| compile(BODY_RULES));
static GENERIC_IMAGES: Lazy<Vec<Regex>> = Lazy::new(|| {
    GENERIC_IMAGE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("generic image pattern"))
        .collect()
});

fn compile(rules: &[(&str, Competition)]) -> Vec<(Regex, Competition)> {
    rules
        .iter()
        .map(|(pattern, competition)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("competition pattern");
            (re, *competition)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Title,
    Tags,
    Image,
    Body,
    Default,
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalSource::Title => write!(f, "title"),
            SignalSource::Tags => write!(f, "tags"),
            SignalSource::Image => write!(f, "image"),
            SignalSource::Body => write!(f, "body"),
            SignalSource::Default => write!(f, "default"),
        }
    }
}

pub const PRIORITY: [SignalSource; 4] = [
    SignalSource::Title,
    SignalSource::Tags,
    SignalSource::Image,
    SignalSource::Body,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleSignals<'a> {
    pub title: &'a str,
    pub tags: Option<&'a [String]>,
    pub image: Option<&'a str>,
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub competition: Competition,
    pub source: SignalSource,
}

pub struct CompetitionClassifier {
    fallback: Competition,
}

impl CompetitionClassifier {
    pub fn new() -> Self {
        Self::with_fallback(Competition::Liga)
    }

    pub fn with_fallback(fallback: Competition) -> Self {
        Self { fallback }
    }

    pub fn classify(&self, signals: &ArticleSignals<'_>) -> Classification {
        PRIORITY
            .iter()
            .find_map(|&source| {
                self.match_source(source, signals)
                    .map(|competition| Classification { competition, source })
            })
            .unwrap_or(Classification {
                competition: self.fallback,
                source: SignalSource::Default,
            })
    }

    pub fn match_source(&self, source: SignalSource, signals: &ArticleSignals<'_>) -> Option<Competition> {
        match source {
            SignalSource::Title => first_pattern(&TITLE_PATTERNS, signals.title),
            SignalSource::Tags => signals.tags.and_then(classify_tags),
            SignalSource::Image => signals.image.and_then(classify_image),
            SignalSource::Body => {
                let text = markup::strip_tags(signals.body).to_lowercase();
                first_pattern(&BODY_PATTERNS, &text)
            }
            SignalSource::Default => Some(self.fallback),
        }
    }
}

impl Default for CompetitionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn first_pattern(patterns: &[(Regex, Competition)], text: &str) -> Option<Competition> {
    if text.is_empty() {
        return None;
    }
    patterns
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, competition)| *competition)
}

fn first_substring(rules: &[(&str, Competition)], haystacks: &[&str]) -> Option<Competition> {
    rules
        .iter()
        .find(|(needle, _)| haystacks.iter().any(|h| h.contains(needle)))
        .map(|(_, competition)| *competition)
}

fn classify_tags(tags: &[String]) -> Option<Competition> {
    let lowered: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let refs: Vec<&str> = lowered.iter().map(String::as_str).collect();
    first_substring(TAG_RULES, &refs)
}

fn classify_image(reference: &str) -> Option<Competition> {
    let file_name = markup::image_file_name(reference);
    if file_name.is_empty() || GENERIC_IMAGES.iter().any(|re| re.is_match(&file_name)) {
        return None;
    }
    first_substring(IMAGE_RULES, &[file_name.as_str()])
}
