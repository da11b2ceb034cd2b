use std::collections::HashMap;

use crate::records::{Match, Team};

/// Groups fixtures by team. Teams come out in the order their names first
/// appear; each team's entries keep the source order of its fixtures.
pub fn aggregate(matches: &[Match]) -> Vec<Team> {
    let mut teams: Vec<Team> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        for name in [&m.team1, &m.team2] {
            if !index.contains_key(name) {
                index.insert(name.clone(), teams.len());
                teams.push(Team::new(name.clone()));
            }
        }
    }

    for m in matches {
        // Both names were registered above.
        let t1 = index[&m.team1];
        teams[t1].matches.push(m.entry_for_team1());
        let t2 = index[&m.team2];
        teams[t2].matches.push(m.entry_for_team2());
    }

    teams
}
