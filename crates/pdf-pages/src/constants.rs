//! Shared constants for page reordering and outline handling

// =============================================================================
// Booklet
// =============================================================================

/// Pages carried by one folded sheet (two per side)
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

/// Page attributes a page may inherit from its ancestors in the page tree
pub const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

// =============================================================================
// Outline
// =============================================================================

/// Marker character that encodes the outline level
pub const LEVEL_MARKER: char = '#';

/// Spaces between the padded title column and the page number
pub const PAGE_COLUMN_GAP: usize = 2;

/// Columns a tab counts for in indentation-based outlines
pub const TAB_WIDTH: usize = 4;

/// Deepest outline nesting followed when reading a document
pub const MAX_OUTLINE_DEPTH: usize = 64;

/// Deepest name tree nesting followed when resolving named destinations
pub const MAX_NAME_TREE_DEPTH: usize = 32;

// =============================================================================
// Output Naming
// =============================================================================

/// chrono format of the timestamp appended to output file stems
pub const TIMESTAMP_FORMAT: &str = "_%y%m%d_%H%M%S";

/// Suffix used when timestamped outputs are disabled
pub const PLAIN_OUTPUT_SUFFIX: &str = "_new";
