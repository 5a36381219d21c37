use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractionDefect, Result};
use crate::models::RatingStatement;

pub const FRENCH_SUBSTITUTIONS: &[&str] = &["remplacé", "entré", "sorti", "exclu"];

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").expect("paragraph pattern"));
static NOT_RATED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)non\s+not[ée]").expect("not rated pattern"));
static FRENCH: Lazy<RatingExtractor> = Lazy::new(|| {
    RatingExtractor::with_vocabulary(FRENCH_SUBSTITUTIONS).expect("french vocabulary")
});

#[derive(Debug, Clone)]
pub struct RatingExtractor {
    statement: Regex,
    clause: Regex,
}

impl RatingExtractor {
    pub fn new() -> Self {
        FRENCH.clone()
    }

    pub fn with_vocabulary(keywords: &[&str]) -> Result<Self> {
        let alternatives = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let statement = Regex::new(&format!(
            r"(?i)<strong>\s*([^<(]+?)\s*(,\s*(?:{alternatives})[^(<]*)?\((\d+)/10\)\s*</strong>"
        ))?;
        let clause = Regex::new(&format!(
            r"(?is),?\s*\b(?:{alternatives})(?:e|es|s)?\b.*$"
        ))?;

        Ok(Self { statement, clause })
    }

    pub fn extract<'a>(
        &'a self,
        html: &'a str,
    ) -> impl Iterator<Item = std::result::Result<RatingStatement, ExtractionDefect>> + 'a {
        self.statement.captures_iter(html).map(move |caps| {
            let (raw_name, clause_in_name) = self.clean_name(&caps[1]);
            let substituted = caps.get(2).is_some() || clause_in_name;
            let digits = &caps[3];

            let value: u32 = digits.parse().map_err(|_| ExtractionDefect::Unparsable {
                raw_name: raw_name.clone(),
                digits: digits.to_string(),
            })?;

            if value > 10 {
                return Err(ExtractionDefect::OutOfRange { raw_name, value });
            }

            Ok(RatingStatement {
                raw_name,
                rating: value as u8,
                substituted,
            })
        })
    }

    pub fn extract_unrated(&self, html: &str) -> Vec<String> {
        PARAGRAPH_RE
            .captures_iter(html)
            .filter(|caps| NOT_RATED_RE.is_match(&caps[1]))
            .filter_map(|caps| {
                let text = super::markup::strip_tags(&caps[1]);
                let head = text.split([':', ',', '(']).next().unwrap_or("");
                let (name, _) = self.clean_name(head);
                (!name.is_empty()).then_some(name)
            })
            .collect()
    }

    fn clean_name(&self, raw: &str) -> (String, bool) {
        // Entities first so &nbsp; collapses with the surrounding whitespace.
        let decoded = html_escape::decode_html_entities(raw);
        let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

        let (kept, had_clause) = match self.clause.find(&collapsed) {
            Some(m) => (&collapsed[..m.start()], true),
            None => (collapsed.as_str(), false),
        };
        let name = kept.trim().trim_end_matches(',').trim_end().to_string();
        (name, had_clause)
    }
}

impl Default for RatingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(html: &str) -> Vec<RatingStatement> {
        RatingExtractor::new()
            .extract(html)
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn extracts_plain_and_substituted_statements() {
        let html = "<p><strong>Thibaut Courtois (7/10)</strong> : solide.</p>\
                    <p><strong>Alvaro Carreras, remplacé à la 99e minute (6/10)</strong></p>";
        let found = ratings(html);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw_name, "Thibaut Courtois");
        assert_eq!(found[0].rating, 7);
        assert!(!found[0].substituted);
        assert_eq!(found[1].raw_name, "Alvaro Carreras");
        assert_eq!(found[1].rating, 6);
        assert!(found[1].substituted);
    }

    #[test]
    fn every_scale_value_is_kept_exactly() {
        for n in 0..=10u8 {
            let html = format!("<strong>Éder Militão ({n}/10)</strong>");
            let found = ratings(&html);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].rating, n);
            assert_eq!(found[0].raw_name, "Éder Militão");
        }
    }

    #[test]
    fn tolerates_accents_and_hyphens() {
        let found = ratings("<strong>Trent Alexander-Arnold, entré à la 70e minute (5/10)</strong>");
        assert_eq!(found[0].raw_name, "Trent Alexander-Arnold");
        assert!(found[0].substituted);
    }

    #[test]
    fn clause_without_comma_is_stripped() {
        let found = ratings("<strong>Rodrygo sorti sur blessure (4/10)</strong>");
        assert_eq!(found[0].raw_name, "Rodrygo");
        assert!(found[0].substituted);
    }

    #[test]
    fn clause_across_a_line_break_is_stripped() {
        let found = ratings("<strong>Rodrygo sorti\nsur blessure (4/10)</strong>");
        assert_eq!(found[0].raw_name, "Rodrygo");
        assert!(found[0].substituted);

        let found = ratings("<strong>Dani\r\n  Ceballos, remplacé\nà la 60e (5/10)</strong>");
        assert_eq!(found[0].raw_name, "Dani Ceballos");
        assert!(found[0].substituted);
    }

    #[test]
    fn html_entities_are_decoded_in_names() {
        let found = ratings(
            "<strong>Thibaut Courtois&nbsp;(7/10)</strong>\
             <strong>Aur&eacute;lien Tchouam&eacute;ni (6/10)</strong>\
             <strong>Arda&#160;G&uuml;ler, entr&eacute; &agrave; la 70e (5/10)</strong>",
        );
        let names: Vec<&str> = found.iter().map(|s| s.raw_name.as_str()).collect();
        assert_eq!(names, vec!["Thibaut Courtois", "Aurélien Tchouaméni", "Arda Güler"]);
        assert!(!found[1].substituted);
        assert!(found[2].substituted);
    }

    #[test]
    fn not_rated_statements_are_skipped() {
        let html = "<p><strong>Endrick, entré à la 88e minute</strong> : Non noté.</p>\
                    <p><strong>Gonzalo (Non noté)</strong></p>";
        assert!(ratings(html).is_empty());

        let unrated = RatingExtractor::new().extract_unrated(html);
        assert_eq!(unrated, vec!["Endrick".to_string(), "Gonzalo".to_string()]);
    }

    #[test]
    fn article_without_ratings_yields_nothing() {
        assert!(ratings("<article><p>Mercato : le club suit un défenseur.</p></article>").is_empty());
    }

    #[test]
    fn out_of_range_value_is_a_defect() {
        let found: Vec<_> = RatingExtractor::new()
            .extract("<strong>Kylian Mbappé (12/10)</strong>")
            .collect();
        assert_eq!(
            found,
            vec![Err(ExtractionDefect::OutOfRange {
                raw_name: "Kylian Mbappé".to_string(),
                value: 12
            })]
        );
    }

    #[test]
    fn scan_is_restartable() {
        let extractor = RatingExtractor::new();
        let html = "<strong>Lunin (6/10)</strong>";
        assert_eq!(extractor.extract(html).count(), 1);
        assert_eq!(extractor.extract(html).count(), 1);
    }

    #[test]
    fn vocabulary_is_pluggable() {
        let extractor = RatingExtractor::with_vocabulary(&["replaced", "sent off"]).unwrap();
        let found: Vec<_> = extractor
            .extract("<strong>Jude Bellingham, replaced in the 80th minute (8/10)</strong>")
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(found[0].raw_name, "Jude Bellingham");
        assert!(found[0].substituted);
    }
}
