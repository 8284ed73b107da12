//! Building a new document out of pages taken from loaded sources.
//!
//! Pages are copied, never moved: the source documents stay untouched and
//! can feed any number of outputs. Every object a selected page reaches
//! (contents, resources, fonts, images, annotations) is imported under a
//! fresh object id, so pages from different sources never collide.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashMap;

use crate::config::Rotation;
use crate::error::{PdfSpliceError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Deepest page tree walked when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Accumulates pages into a fresh single-level page tree.
pub struct DocumentBuilder {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl DocumentBuilder {
    /// Start an empty document with the given header version.
    pub fn new(version: &str) -> Self {
        let mut document = Document::with_version(version);
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Start a document whose version is the highest among `sources`.
    pub fn for_sources<'a>(sources: impl IntoIterator<Item = &'a Document>) -> Self {
        let version = sources
            .into_iter()
            .map(|doc| doc.version.as_str())
            .max_by(|a, b| compare_versions(a, b))
            .unwrap_or("1.5")
            .to_string();
        Self::new(&version)
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append copies of `page_numbers` (1-based, in the given order) from
    /// `source`. A page listed twice is copied twice.
    ///
    /// # Errors
    ///
    /// Returns [`PageOutOfRange`](PdfSpliceError::PageOutOfRange) for a page
    /// number the source does not have, or an assembly error when a page
    /// object is not a dictionary.
    pub fn append_pages(
        &mut self,
        source: &Document,
        page_numbers: &[u32],
        rotation: Option<Rotation>,
    ) -> Result<()> {
        let source_pages = source.get_pages();
        let total = u32::try_from(source_pages.len()).unwrap_or(u32::MAX);

        let mut importer = ObjectImporter::new(source);

        // All selected pages get their ids up front so links between them
        // resolve to the copies.
        let mut selected = Vec::with_capacity(page_numbers.len());
        for &number in page_numbers {
            let source_id = *source_pages
                .get(&number)
                .ok_or_else(|| PdfSpliceError::page_out_of_range(number.to_string(), total))?;
            let target_id = self.document.new_object_id();
            importer.map_page(source_id, target_id);
            selected.push((source_id, target_id));
        }

        for (source_id, target_id) in selected {
            let flattened = flatten_page(source, source_id)?;
            let mut page = importer.rewrite_dictionary(&mut self.document, &flattened);
            page.set("Parent", self.pages_id);

            if let Some(rotation) = rotation {
                rotate(&mut page, rotation.as_degrees());
            }

            self.document
                .objects
                .insert(target_id, Object::Dictionary(page));
            self.kids.push(target_id.into());
        }

        importer.drain(&mut self.document);
        Ok(())
    }

    /// Close the page tree and hand back the finished document.
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document
    }
}

/// Copies the object graph hanging off selected pages into a target
/// document, allocating fresh ids as it goes.
struct ObjectImporter<'a> {
    source: &'a Document,
    remap: HashMap<ObjectId, ObjectId>,
    pending: Vec<(ObjectId, ObjectId)>,
}

impl<'a> ObjectImporter<'a> {
    fn new(source: &'a Document) -> Self {
        Self {
            source,
            remap: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Record where a selected page lands. The first copy of a page wins
    /// when the same page is selected twice.
    fn map_page(&mut self, source_id: ObjectId, target_id: ObjectId) {
        self.remap.entry(source_id).or_insert(target_id);
    }

    fn rewrite_dictionary(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut out = Dictionary::new();
        for (key, value) in dict.iter() {
            out.set(key.clone(), self.rewrite(target, value));
        }
        out
    }

    fn rewrite(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.map_reference(target, *id),
            Object::Dictionary(dict) => Object::Dictionary(self.rewrite_dictionary(target, dict)),
            Object::Array(items) => {
                Object::Array(items.iter().map(|item| self.rewrite(target, item)).collect())
            }
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.rewrite_dictionary(target, &stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    /// Target reference for a source reference. Unselected page tree nodes
    /// and dangling references become null.
    fn map_reference(&mut self, target: &mut Document, id: ObjectId) -> Object {
        if let Some(&mapped) = self.remap.get(&id) {
            return Object::Reference(mapped);
        }

        match self.source.get_object(id) {
            Ok(object) if !is_page_tree_node(object) => {
                let new_id = target.new_object_id();
                self.remap.insert(id, new_id);
                self.pending.push((id, new_id));
                Object::Reference(new_id)
            }
            _ => Object::Null,
        }
    }

    /// Copy every object discovered so far, and everything those reach.
    fn drain(&mut self, target: &mut Document) {
        while let Some((source_id, target_id)) = self.pending.pop() {
            let copied = match self.source.get_object(source_id) {
                Ok(object) => self.rewrite(target, object),
                Err(_) => Object::Null,
            };
            target.objects.insert(target_id, copied);
        }
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    dict.get(b"Type")
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page".as_slice() || name == b"Pages".as_slice())
}

/// Clone a page with inherited attributes pulled down from its ancestors
/// and the `Parent` link removed.
fn flatten_page(source: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = source.get_dictionary(page_id)?.clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(parent_id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            tracing::warn!(?page_id, "page tree too deep, inherited attributes truncated");
            break;
        }
        let Ok(node) = source.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    Ok(page)
}

fn rotate(page: &mut Dictionary, degrees: i64) {
    let current = page
        .get(b"Rotate")
        .and_then(Object::as_i64)
        .unwrap_or(0)
        .rem_euclid(360);
    page.set("Rotate", Object::Integer((current + degrees).rem_euclid(360)));
}

/// Order "1.4" < "1.7" < "2.0" numerically rather than lexically.
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let parse = |v: &str| -> (u32, u32) {
        let (major, minor) = v.split_once('.').unwrap_or((v, "0"));
        (major.parse().unwrap_or(0), minor.parse().unwrap_or(0))
    };
    parse(a).cmp(&parse(b))
}
