//! One-page PDF scorecards, stamped onto a template.
//!
//! The output tree is `<root>/<team>/<opponent>.pdf`. It is rebuilt from
//! scratch on every export and fully created before any render starts, so
//! renders only ever write their own pre-planned file.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use rayon::prelude::*;

use crate::error::ScrapeError;
use crate::records::{Team, TeamMatchEntry};

pub const TEMPLATE_FILE: &str = "Template.pdf";

const FONT_KEY: &[u8] = b"FScore";
const TEXT_X: i64 = 315;

struct Field {
    y: i64,
    size: i64,
}

const TEAM_FIELD: Field = Field { y: 550, size: 20 };
const OPPONENT_FIELD: Field = Field { y: 520, size: 20 };
const SELF_SCORE_FIELD: Field = Field { y: 490, size: 20 };
const OPPONENT_SCORE_FIELD: Field = Field { y: 460, size: 20 };
const RESULT_FIELD: Field = Field { y: 430, size: 14 };

#[derive(Debug, Clone)]
pub struct ScorecardJob {
    pub team: String,
    pub entry: TeamMatchEntry,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorecardReport {
    pub teams: usize,
    pub written: usize,
}

pub fn export_scorecards(
    teams: &[Team],
    root: &Path,
    template_path: &Path,
    parallelism: usize,
) -> Result<ScorecardReport, ScrapeError> {
    let template = load_template(template_path)?;
    prepare_output_tree(root, teams)?;
    let jobs = plan_scorecards(teams, root);

    let pool = build_render_pool(parallelism);
    let results: Vec<Result<(), ScrapeError>> = with_render_pool(&pool, || {
        jobs.par_iter()
            .map(|job| render_scorecard(&template, job))
            .collect()
    });

    let mut written = 0usize;
    let mut first_err = None;
    for res in results {
        match res {
            Ok(()) => written += 1,
            Err(err) => {
                log::error!("{err}");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }
    if let Some(err) = first_err {
        return Err(err);
    }

    Ok(ScorecardReport {
        teams: teams.len(),
        written,
    })
}

/// Reads the template and checks it has a first page to draw on.
pub fn load_template(path: &Path) -> Result<Vec<u8>, ScrapeError> {
    let bytes = fs::read(path).map_err(|source| ScrapeError::TemplateMissing {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = Document::load_mem(&bytes).map_err(|e| ScrapeError::Template(e.to_string()))?;
    if doc.get_pages().is_empty() {
        return Err(ScrapeError::Template(format!(
            "{} has no pages",
            path.display()
        )));
    }
    Ok(bytes)
}

/// Wipes `root` and recreates it with one empty directory per team.
pub fn prepare_output_tree(root: &Path, teams: &[Team]) -> Result<(), ScrapeError> {
    if root.exists() {
        fs::remove_dir_all(root).map_err(|e| ScrapeError::io(root, e))?;
    }
    fs::create_dir_all(root).map_err(|e| ScrapeError::io(root, e))?;
    for team in teams {
        let dir = root.join(&team.name);
        fs::create_dir(&dir).map_err(|e| ScrapeError::io(&dir, e))?;
    }
    Ok(())
}

/// Assigns every fixture its output file. A repeated opponent within one
/// team's directory gets the first free numeric suffix: `X.pdf`, `X1.pdf`,
/// `X2.pdf`, ...
pub fn plan_scorecards(teams: &[Team], root: &Path) -> Vec<ScorecardJob> {
    let mut jobs = Vec::new();
    for team in teams {
        let dir = root.join(&team.name);
        let mut taken: HashSet<String> = HashSet::new();
        let mut next_suffix: HashMap<&str, usize> = HashMap::new();

        for entry in &team.matches {
            let base = entry.opponent.as_str();
            let mut file_name = format!("{base}.pdf");
            if taken.contains(&file_name) {
                let suffix = next_suffix.entry(base).or_insert(1);
                loop {
                    file_name = format!("{base}{suffix}.pdf");
                    *suffix += 1;
                    if !taken.contains(&file_name) {
                        break;
                    }
                }
            }
            taken.insert(file_name.clone());
            jobs.push(ScorecardJob {
                team: team.name.clone(),
                entry: entry.clone(),
                path: dir.join(file_name),
            });
        }
    }
    jobs
}

/// Stamps one fixture onto a fresh copy of the template and writes it out.
pub fn render_scorecard(template: &[u8], job: &ScorecardJob) -> Result<(), ScrapeError> {
    let mut doc = Document::load_mem(template).map_err(|e| render_error(&job.path, e))?;
    let page_id = *doc
        .get_pages()
        .get(&1)
        .ok_or_else(|| render_error(&job.path, "template has no first page"))?;

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding"
    });
    register_font(&mut doc, page_id, font_id).map_err(|e| render_error(&job.path, e))?;

    let entry = &job.entry;
    let mut operations = Vec::new();
    for (field, text) in [
        (&TEAM_FIELD, job.team.as_str()),
        (&OPPONENT_FIELD, entry.opponent.as_str()),
        (&SELF_SCORE_FIELD, entry.self_score.as_str()),
        (&OPPONENT_SCORE_FIELD, entry.opponent_score.as_str()),
        (&RESULT_FIELD, entry.result.as_str()),
    ] {
        operations.extend(text_operations(field, text));
    }
    let overlay = Content { operations }.encode().map_err(|e| render_error(&job.path, e))?;
    append_overlay(&mut doc, page_id, overlay).map_err(|e| render_error(&job.path, e))?;

    doc.save(&job.path).map_err(|e| render_error(&job.path, e))?;
    log::debug!("wrote {}", job.path.display());
    Ok(())
}

fn render_error(path: &Path, reason: impl Display) -> ScrapeError {
    ScrapeError::Render {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn text_operations(field: &Field, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_KEY.to_vec()), Object::Integer(field.size)],
        ),
        Operation::new(
            "Td",
            vec![Object::Integer(TEXT_X), Object::Integer(field.y)],
        ),
        Operation::new("Tj", vec![Object::string_literal(latin1(text))]),
        Operation::new("ET", vec![]),
    ]
}

// Standard-14 fonts only cover single-byte encodings.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Gives the page its own resource dictionary (inherited entries included)
/// with the scorecard font added.
fn register_font(doc: &mut Document, page_id: ObjectId, font_id: ObjectId) -> lopdf::Result<()> {
    let mut resources = inherited_resources(doc, page_id)?;
    let mut fonts = match resources.get(b"Font") {
        Ok(obj) => resolve_dict(doc, obj)?,
        Err(_) => Dictionary::new(),
    };
    fonts.set(FONT_KEY, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)?
        .set("Resources", Object::Dictionary(resources));
    Ok(())
}

fn inherited_resources(doc: &Document, page_id: ObjectId) -> lopdf::Result<Dictionary> {
    let mut node = doc.get_dictionary(page_id)?;
    loop {
        if let Ok(res) = node.get(b"Resources") {
            return resolve_dict(doc, res);
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node = doc.get_dictionary(parent)?,
            Err(_) => return Ok(Dictionary::new()),
        }
    }
}

fn resolve_dict(doc: &Document, obj: &Object) -> lopdf::Result<Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).cloned(),
        other => other.as_dict().cloned(),
    }
}

/// Appends the overlay after the page's own content. The original content is
/// wrapped in `q`/`Q` so any graphics state it leaves behind is reset.
fn append_overlay(doc: &mut Document, page_id: ObjectId, overlay: Vec<u8>) -> lopdf::Result<()> {
    let existing = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(parts)) => parts.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(parts)) => parts.clone(),
        _ => Vec::new(),
    };

    let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let restore_id = doc.add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));
    let overlay_id = doc.add_object(Stream::new(Dictionary::new(), overlay));

    let mut contents = Vec::with_capacity(existing.len() + 3);
    contents.push(Object::Reference(save_id));
    contents.extend(existing);
    contents.push(Object::Reference(restore_id));
    contents.push(Object::Reference(overlay_id));

    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)?
        .set("Contents", Object::Array(contents));
    Ok(())
}

fn build_render_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.clamp(1, 32))
        .build()
        .ok()
}

fn with_render_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
