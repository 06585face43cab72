pub mod booklet;
pub mod constants;
pub mod naming;
pub mod outline;
mod options;
pub mod pdf;
mod types;

pub use booklet::{from_booklet, pad_to_booklet, to_booklet};
pub use options::*;
pub use outline::{OutlineItem, OutlineItemNode, OutlineWarning, ParsedOutline};
pub use pdf::{
    collect_page_statistics, load_pdf, make_booklet, read_outline, remove_outline,
    restore_booklet, save_pdf, write_outline,
};
pub use types::*;
