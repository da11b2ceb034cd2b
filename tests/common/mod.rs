#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use scorecard_scraper::records::{Team, TeamMatchEntry};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// A one-page A4 document with a heading, its font declared on the page tree
/// node so the page inherits it.
pub fn write_template(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier"
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id
        }
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new("Tj", vec![Object::string_literal("SCORECARD")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        content.encode().expect("heading encodes"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => Object::Integer(1),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ]
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("template should save");
}

pub fn first_page_content(path: &Path) -> String {
    let doc = Document::load(path).expect("rendered scorecard should load");
    let page_id = *doc.get_pages().get(&1).expect("first page");
    let bytes = doc.get_page_content(page_id).expect("page content");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn team(name: &str, entries: &[(&str, &str, &str, &str)]) -> Team {
    Team {
        name: name.to_string(),
        matches: entries
            .iter()
            .map(|(vs, own, opp, result)| TeamMatchEntry {
                opponent: vs.to_string(),
                self_score: own.to_string(),
                opponent_score: opp.to_string(),
                result: result.to_string(),
            })
            .collect(),
    }
}
