pub mod competitions;
pub mod players;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::PlayerIdentity;

#[derive(Debug, Clone)]
pub struct NameTable {
    aliases: HashMap<String, PlayerIdentity>,
    surnames: HashMap<String, PlayerIdentity>,
}

impl NameTable {
    pub fn builtin() -> Result<Self> {
        Self::from_entries(players::ALIASES, players::SURNAMES)
    }

    pub fn from_entries(aliases: &[(&str, &str)], surnames: &[(&str, &str)]) -> Result<Self> {
        let mut table = Self {
            aliases: HashMap::new(),
            surnames: HashMap::new(),
        };

        insert_all(&mut table.aliases, aliases)?;
        insert_all(&mut table.surnames, surnames)?;

        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        let canonical = self.canonical_names();

        // A coach surname collides with every player sharing it.
        for (surname, target) in &self.surnames {
            if let Some(other) = canonical
                .iter()
                .find(|name| Some(name.as_str()) != target.player_name() && last_token(name) == surname)
            {
                return Err(Error::AliasCollision {
                    key: surname.clone(),
                    first: describe(target),
                    second: other.clone(),
                });
            }
        }

        for name in &canonical {
            if let PlayerIdentity::Player(resolved) = self.canonicalize(name) {
                if resolved != *name {
                    return Err(Error::AliasCollision {
                        key: name.clone(),
                        first: name.clone(),
                        second: resolved,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn canonical_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .aliases
            .values()
            .chain(self.surnames.values())
            .filter_map(|identity| identity.player_name().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn canonicalize(&self, raw: &str) -> PlayerIdentity {
        let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Some(identity) = self.aliases.get(&name) {
            return identity.clone();
        }

        if let Some(identity) = self.surnames.get(last_token(&name)) {
            return identity.clone();
        }

        PlayerIdentity::Player(name)
    }
}

fn identity(target: &str) -> PlayerIdentity {
    if target == players::COACH {
        PlayerIdentity::Coach
    } else {
        PlayerIdentity::Player(target.to_string())
    }
}

fn insert_all(map: &mut HashMap<String, PlayerIdentity>, entries: &[(&str, &str)]) -> Result<()> {
    for (key, target) in entries {
        let resolved = identity(target);
        if let Some(previous) = map.insert(key.to_string(), resolved.clone()) {
            if previous != resolved {
                return Err(Error::AliasCollision {
                    key: key.to_string(),
                    first: describe(&previous),
                    second: describe(&resolved),
                });
            }
        }
    }
    Ok(())
}

fn last_token(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

fn describe(identity: &PlayerIdentity) -> String {
    identity
        .player_name()
        .map(str::to_string)
        .unwrap_or_else(|| players::COACH.to_string())
}
