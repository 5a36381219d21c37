use crate::models::Competition;

// Within each table the first matching pattern wins.
pub const TITLE_RULES: &[(&str, Competition)] = &[
    (r"ligue\s+des\s+champions|champions\s+league", Competition::ChampionsLeague),
    (r"supercoupe|supercopa|super\s+cup", Competition::SuperCup),
    (r"coupe\s+du\s+roi|copa\s+del\s+rey", Competition::CopaDelRey),
    (r"intercontinental", Competition::Intercontinental),
    (r"\bamical\b|friendly|pr[eé]-saison", Competition::Friendly),
    (r"\blaliga\b|\bliga\b|\bchampionnat\b", Competition::Liga),
];

pub const TAG_RULES: &[(&str, Competition)] = &[
    ("ligue-des-champions", Competition::ChampionsLeague),
    ("champions-league", Competition::ChampionsLeague),
    ("supercoupe", Competition::SuperCup),
    ("supercopa", Competition::SuperCup),
    ("copa-del-rey", Competition::CopaDelRey),
    ("coupe-du-roi", Competition::CopaDelRey),
    ("intercontinental", Competition::Intercontinental),
    ("pre-season", Competition::Friendly),
    ("friendly", Competition::Friendly),
    ("amical", Competition::Friendly),
    ("laliga", Competition::Liga),
];

pub const IMAGE_RULES: &[(&str, Competition)] = &[
    ("laliga", Competition::Liga),
    ("la-liga", Competition::Liga),
    ("champions-league", Competition::ChampionsLeague),
    ("ligue-des-champions", Competition::ChampionsLeague),
    ("spanish-super-cup", Competition::SuperCup),
    ("supercopa", Competition::SuperCup),
    ("copa-del-rey", Competition::CopaDelRey),
    ("coupe-du-roi", Competition::CopaDelRey),
    ("intercontinental", Competition::Intercontinental),
    ("pre-season", Competition::Friendly),
    ("preseason", Competition::Friendly),
    ("friendly", Competition::Friendly),
    ("amical", Competition::Friendly),
];

pub const GENERIC_IMAGE_PATTERNS: &[&str] = &[r"^nouveau-projet[-_]?\d*\.", r"^image[-_]?\d*\."];

pub const BODY_RULES: &[(&str, Competition)] = &[
    (
        concat!(
            r"ligue\s+des\s+champions|champions\s+league|phase\s+de\s+ligue",
            r"|phase\s+de\s+groupes|group\s+stage|barrage|play-off\s+round",
            r"|huitièmes?\s+de\s+finale|round\s+of\s+16|quarts?\s+de\s+finale",
        ),
        Competition::ChampionsLeague,
    ),
    (r"\bliga\b|\blaliga\b|\bla\s+liga\b|\bchampionnat\b", Competition::Liga),
    (r"\bsupercoupe\b|\bsupercopa\b|\bsuper\s+cup\b", Competition::SuperCup),
    (r"coupe\s+du\s+roi|copa\s+del\s+rey", Competition::CopaDelRey),
    (r"intercontinental", Competition::Intercontinental),
    (r"\bamical\b|pr[eé]-saison|friendly", Competition::Friendly),
];
