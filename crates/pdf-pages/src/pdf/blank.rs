//! Blank padding pages

use super::pages::media_box;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// MediaBox for padding pages: the template page's own box, or a box of
/// `fallback` size at the origin
pub(crate) fn blank_media_box(
    doc: &Document,
    template: Option<ObjectId>,
    fallback: (f32, f32),
) -> Vec<Object> {
    template
        .and_then(|page_id| media_box(doc, page_id))
        .unwrap_or_else(|| {
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(fallback.0),
                Object::Real(fallback.1),
            ]
        })
}

/// Create a blank page with the given media box
pub(crate) fn create_blank_page(
    doc: &mut Document,
    media_box: &[Object],
    parent_id: ObjectId,
) -> ObjectId {
    let content_stream = Stream::new(Dictionary::new(), Vec::new());
    let content_id = doc.add_object(content_stream);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_id));
    page_dict.set("MediaBox", Object::Array(media_box.to_vec()));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(Dictionary::new()));

    doc.add_object(page_dict)
}
