pub const COACH: &str = "_COACH_";

pub const ALIASES: &[(&str, &str)] = &[
    // Goalkeepers
    ("Fran Gonzalez", "Fran González"),
    // Defenders
    ("Gonzalo Garcia", "Gonzalo García"),
    ("Gonzalo", "Gonzalo García"),
    ("Fran Garcia", "Fran García"),
    ("Eder Militao", "Éder Militão"),
    ("Raúl Asencio", "Raul Asencio"),
    // Midfielders
    ("Fede Valverde", "Federico Valverde"),
    ("Trent", "Trent Alexander-Arnold"),
    ("Trent Arnold", "Trent Alexander-Arnold"),
    ("Aurelien Tchouameni", "Aurélien Tchouaméni"),
    ("Luka Modric", "Luka Modrić"),
    // Forwards
    ("Vinicius Jr.", "Vinicius Jr"),
    ("Vinicius", "Vinicius Jr"),
    ("Vinícius", "Vinicius Jr"),
    ("Vinícius Júnior", "Vinicius Jr"),
    ("Vinicius Junior", "Vinicius Jr"),
    ("Kylian Mbappe", "Kylian Mbappé"),
    ("Rodrygo Goes", "Rodrygo"),
    ("Arda Guler", "Arda Güler"),
    ("Brahim", "Brahim Diaz"),
    ("Brahim Díaz", "Brahim Diaz"),
    ("Antonio Rudiger", "Antonio Rüdiger"),
    ("Endrick", "Endrick Felipe"),
    ("Mastantuono", "Franco Mastantuono"),
];

// Matched on the last word of a name, so a surname shared with anyone else in
// either table is rejected when the table is built.
pub const SURNAMES: &[(&str, &str)] = &[
    // Staff
    ("Alonso", COACH),
    ("Ancelotti", COACH),
    ("Arbeloa", COACH),
    // Players
    ("Courtois", "Thibaut Courtois"),
    ("Lunin", "Andriy Lunin"),
    ("Carvajal", "Dani Carvajal"),
    ("Militao", "Éder Militão"),
    ("Militão", "Éder Militão"),
    ("Alaba", "David Alaba"),
    ("Rudiger", "Antonio Rüdiger"),
    ("Rüdiger", "Antonio Rüdiger"),
    ("Asencio", "Raul Asencio"),
    ("Huijsen", "Dean Huijsen"),
    ("Carreras", "Alvaro Carreras"),
    ("Mendy", "Ferland Mendy"),
    ("Valverde", "Federico Valverde"),
    ("Tchouameni", "Aurélien Tchouaméni"),
    ("Tchouaméni", "Aurélien Tchouaméni"),
    ("Camavinga", "Eduardo Camavinga"),
    // recurring typo on the site
    ("Camvinga", "Eduardo Camavinga"),
    ("Modric", "Luka Modrić"),
    ("Modrić", "Luka Modrić"),
    ("Kroos", "Toni Kroos"),
    ("Ceballos", "Dani Ceballos"),
    ("Arnold", "Trent Alexander-Arnold"),
    ("Bellingham", "Jude Bellingham"),
    ("Mbappé", "Kylian Mbappé"),
    ("Mbappe", "Kylian Mbappé"),
    ("Güler", "Arda Güler"),
    ("Guler", "Arda Güler"),
    ("Mastantuono", "Franco Mastantuono"),
];
