//! Generated fixtures for unit tests.
//!
//! Page `n` of a numbered document has a MediaBox width of
//! `MARKER_BASE + n`, so page identity and order survive a round trip
//! through split, merge and save.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

pub(crate) const MARKER_BASE: i64 = 500;

fn page_content(label: &str) -> Vec<u8> {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
        ],
    };
    content.encode().unwrap()
}

fn add_page(doc: &mut Document, parent: ObjectId, resources: ObjectId, marker: u32) -> ObjectId {
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        page_content(&format!("Page {marker}")),
    ));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "MediaBox" => vec![0.into(), 0.into(), (MARKER_BASE + i64::from(marker)).into(), 792.into()],
        "Contents" => content_id,
        "Resources" => resources,
    })
}

fn add_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    })
}

fn finish(doc: &mut Document, pages_id: ObjectId, kids: Vec<Object>, count: u32) {
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
}

/// A flat document whose pages are numbered `1..=pages`.
pub(crate) fn numbered_document(pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let kids = (1..=pages)
        .map(|n| add_page(&mut doc, pages_id, resources_id, n).into())
        .collect();

    finish(&mut doc, pages_id, kids, pages);
    doc
}

/// A two-level page tree: the root has two intermediate nodes holding
/// pages `1..=split` and `split+1..=pages`. Resources and Rotate live on
/// the intermediate nodes only.
pub(crate) fn nested_document(pages: u32, split: u32) -> Document {
    let mut doc = Document::with_version("1.4");
    let root_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let mut nodes = Vec::new();
    for (first, last, rotate) in [(1, split, 90), (split + 1, pages, 0)] {
        let node_id = doc.new_object_id();
        let kids: Vec<Object> = (first..=last)
            .map(|n| {
                let page_id = add_page(&mut doc, node_id, resources_id, n);
                if let Ok(page) = doc.get_dictionary_mut(page_id) {
                    page.remove(b"Resources");
                }
                page_id.into()
            })
            .collect();
        doc.objects.insert(
            node_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => kids,
                "Count" => i64::from(last + 1 - first),
                "Resources" => resources_id,
                "Rotate" => rotate,
            }),
        );
        nodes.push(node_id.into());
    }

    finish(&mut doc, root_id, nodes, pages);
    doc
}

/// Save a numbered document under `dir/name`.
pub(crate) fn write_numbered_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    write_document(dir, name, numbered_document(pages))
}

/// Save `doc` under `dir/name`.
pub(crate) fn write_document(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Page markers of `doc` in page-tree order.
pub(crate) fn page_markers(doc: &Document) -> Vec<u32> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            (media_box[2].as_i64().unwrap() - MARKER_BASE) as u32
        })
        .collect()
}
