#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Key used to tag test pages with their original 1-based position
pub const TEST_INDEX: &[u8] = b"TestIndex";

fn letter_box() -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ])
}

fn add_page(doc: &mut Document, parent: ObjectId, index: usize, own_box: bool) -> ObjectId {
    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

    let mut page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(parent)),
        ("Contents", Object::Reference(content_id)),
        ("TestIndex", Object::Integer(index as i64)),
    ]);
    if own_box {
        page.set("MediaBox", letter_box());
        page.set("Resources", Object::Dictionary(Dictionary::new()));
    }
    doc.add_object(page)
}

fn finish(doc: &mut Document, pages_id: ObjectId, pages_dict: Dictionary) {
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);
}

/// Flat document with `num_pages` US Letter pages tagged 1..=num_pages
pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for index in 1..=num_pages {
        kids.push(Object::Reference(add_page(&mut doc, pages_id, index, true)));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    finish(&mut doc, pages_id, pages_dict);
    doc
}

/// Document whose pages sit under intermediate `/Pages` nodes and inherit
/// MediaBox and Resources from the root
pub fn create_nested_pdf(groups: &[usize]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    let mut index = 0;
    for &size in groups {
        let group_id = doc.new_object_id();
        let mut group_kids = Vec::new();
        for _ in 0..size {
            index += 1;
            group_kids.push(Object::Reference(add_page(&mut doc, group_id, index, false)));
        }
        let group = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Kids", Object::Array(group_kids)),
            ("Count", Object::Integer(size as i64)),
        ]);
        doc.objects.insert(group_id, Object::Dictionary(group));
        kids.push(Object::Reference(group_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(index as i64)),
        ("MediaBox", letter_box()),
        ("Resources", Object::Dictionary(Dictionary::new())),
    ]);
    finish(&mut doc, pages_id, pages_dict);
    doc
}

/// Original positions of the pages in document order; blank pages read as 0
pub fn page_labels(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .ok()
                .and_then(|page| page.get(TEST_INDEX).ok())
                .and_then(|value| value.as_i64().ok())
                .unwrap_or(0)
        })
        .collect()
}

/// Serialize and reload a document
pub fn reload(doc: &mut Document) -> Document {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    Document::load_mem(&writer).unwrap()
}

/// Write a document to `path`
pub fn write_pdf(doc: &mut Document, path: &std::path::Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}
