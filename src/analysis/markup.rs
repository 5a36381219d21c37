use once_cell::sync::Lazy;
use regex::Regex;

const TAGS_WINDOW: usize = 800;
const FOLLOWED_CLUB: &str = "real madrid";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("tag pattern"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static ARTICLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<article[^>]*>(.*?)</article>").expect("article pattern"));
static H1_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").expect("h1 pattern"));
static OG_IMAGE_RE: Lazy<Regex> = Lazy::new(|| og_pattern("og:image"));
static OG_TITLE_RE: Lazy<Regex> = Lazy::new(|| og_pattern("og:title"));
static TAGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\\?"tags\\?":\["#).expect("tags pattern"));
static SCORE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*[-–]\s*(.+?)\s*[\(\[]?\s*\d+\s*[-–]\s*\d+").expect("score title pattern")
});

fn og_pattern(property: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta\s+(?:[^>]*?\s+)?property=["']{}["']\s+content=["']([^"']+)["']"#,
        regex::escape(property)
    ))
    .expect("og meta pattern")
}

pub fn strip_tags(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    let text = html_escape::decode_html_entities(&text);
    WS_RE.replace_all(&text, " ").trim().to_string()
}

pub fn article_body(html: &str) -> &str {
    ARTICLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html)
}

pub fn og_image(html: &str) -> Option<String> {
    OG_IMAGE_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
}

pub fn extract_title(html: &str) -> String {
    OG_TITLE_RE
        .captures(html)
        .or_else(|| H1_RE.captures(html))
        .map(|c| html_escape::decode_html_entities(c[1].trim()).into_owned())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Sans titre".to_string())
}

pub fn extract_tags(html: &str) -> Option<Vec<String>> {
    let start = TAGS_RE.find(html)?.start();
    let mut end = (start + TAGS_WINDOW).min(html.len());
    while !html.is_char_boundary(end) {
        end -= 1;
    }

    let tags: Vec<String> = html[start..end]
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();

    (!tags.is_empty()).then_some(tags)
}

pub fn image_file_name(reference: &str) -> String {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    path.rsplit('/').next().unwrap_or(path).to_lowercase()
}

pub fn extract_opponent(title: &str) -> Option<String> {
    let caps = SCORE_TITLE_RE.captures(title)?;
    let home = caps[1].trim();
    let away = caps[2].trim();

    let opponent = if home.to_lowercase().contains(FOLLOWED_CLUB) {
        away
    } else {
        home
    };

    (!opponent.is_empty()).then(|| opponent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_entities() {
        assert_eq!(
            strip_tags("<p>Le <strong>Real</strong>&nbsp;gagne\n\n en Liga</p>"),
            "Le Real gagne en Liga"
        );
    }

    #[test]
    fn prefers_article_element() {
        let html = "<nav>Coupe du Roi</nav><article><p>Match de Liga</p></article>";
        assert_eq!(article_body(html), "<p>Match de Liga</p>");
        assert_eq!(article_body("<p>no article</p>"), "<p>no article</p>");
    }

    #[test]
    fn reads_titles() {
        let og = r#"<meta property="og:title" content="Real Madrid - Getafe (2-0) : les notes" /><h1>Other</h1>"#;
        assert_eq!(extract_title(og), "Real Madrid - Getafe (2-0) : les notes");
        assert_eq!(extract_title("<h1 class=\"t\">Les notes</h1>"), "Les notes");
        assert_eq!(extract_title("<p></p>"), "Sans titre");
    }

    #[test]
    fn reads_og_image() {
        let html = r#"<meta name="x" property="og:image" content="https://cdn.site/2025/10/laliga-ea-sports.jpg">"#;
        assert_eq!(
            og_image(html).as_deref(),
            Some("https://cdn.site/2025/10/laliga-ea-sports.jpg")
        );
        assert_eq!(image_file_name("https://cdn.site/a/B-Copa.PNG?w=300"), "b-copa.png");
    }

    #[test]
    fn reads_escaped_tags_payload() {
        let html = r#"self.__next_f.push("{\"tags\":[{\"name\":\"LDC\",\"slug\":\"ligue-des-champions\"}]}")"#;
        let tags = extract_tags(html).unwrap();
        assert!(tags.iter().any(|t| t == "ligue-des-champions"));
        assert!(extract_tags("<p>no payload</p>").is_none());
    }

    #[test]
    fn opponent_is_the_other_side() {
        assert_eq!(
            extract_opponent("Real Madrid - Getafe (2-0) : les notes").as_deref(),
            Some("Getafe")
        );
        assert_eq!(
            extract_opponent("Rayo Vallecano – Real Madrid (0-0) : les notes").as_deref(),
            Some("Rayo Vallecano")
        );
        assert_eq!(extract_opponent("Les notes du match"), None);
    }
}
