use serde::{Deserialize, Serialize};

/// One fixture as it appears on the results page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub team1: String,
    pub team2: String,
    pub team1_score: String,
    pub team2_score: String,
    pub result: String,
}

/// A fixture seen from one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMatchEntry {
    #[serde(rename = "vs")]
    pub opponent: String,
    pub self_score: String,
    pub opponent_score: String,
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub matches: Vec<TeamMatchEntry>,
}

impl Match {
    pub fn entry_for_team1(&self) -> TeamMatchEntry {
        TeamMatchEntry {
            opponent: self.team2.clone(),
            self_score: self.team1_score.clone(),
            opponent_score: self.team2_score.clone(),
            result: self.result.clone(),
        }
    }

    pub fn entry_for_team2(&self) -> TeamMatchEntry {
        TeamMatchEntry {
            opponent: self.team1.clone(),
            self_score: self.team2_score.clone(),
            opponent_score: self.team1_score.clone(),
            result: self.result.clone(),
        }
    }
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matches: Vec::new(),
        }
    }
}
