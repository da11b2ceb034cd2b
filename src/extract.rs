//! Results-page extraction.
//!
//! The page lists one `div.match-score-block` per fixture. Inside a block the
//! two team names, up to two score lines and a status line sit at fixed
//! positions; nothing else on the page is read.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::records::Match;

static MATCH_BLOCK: Lazy<Selector> = Lazy::new(|| selector("div.match-score-block"));
static TEAM_NAME: Lazy<Selector> = Lazy::new(|| selector("div.name-detail > p.name"));
static SCORE: Lazy<Selector> = Lazy::new(|| selector("div.score-detail > span.score"));
static STATUS: Lazy<Selector> = Lazy::new(|| selector("div.status-text > span"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Parses every fixture block on the page, in document order.
pub fn extract_matches(html: &str) -> Result<Vec<Match>, ScrapeError> {
    let document = Html::parse_document(html);
    document
        .select(&MATCH_BLOCK)
        .enumerate()
        .map(|(idx, block)| parse_block(idx, block))
        .collect()
}

fn parse_block(block_idx: usize, block: ElementRef<'_>) -> Result<Match, ScrapeError> {
    let mut names = block.select(&TEAM_NAME).map(text_of);
    let team1 = names.next().ok_or(ScrapeError::Structure {
        block: block_idx,
        missing: "first team name",
    })?;
    let team2 = names.next().ok_or(ScrapeError::Structure {
        block: block_idx,
        missing: "second team name",
    })?;

    let scores: Vec<String> = block.select(&SCORE).map(text_of).collect();
    let (team1_score, team2_score) = match scores.as_slice() {
        [first] => (first.clone(), String::new()),
        [first, second] => (first.clone(), second.clone()),
        // Unplayed fixtures carry no score line at all.
        _ => (String::new(), String::new()),
    };

    let result = block
        .select(&STATUS)
        .next()
        .map(text_of)
        .ok_or(ScrapeError::Structure {
            block: block_idx,
            missing: "status text",
        })?;

    Ok(Match {
        team1,
        team2,
        team1_score,
        team2_score,
        result,
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
