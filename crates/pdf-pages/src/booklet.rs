//! Booklet page ordering
//!
//! Converts a sequence of pages between reading order and booklet order.
//! In booklet order every group of four consecutive pages lands on one
//! folded sheet, outermost sheet first:
//!
//! ```text
//! reading order: 1 2 3 4 5 6 7 8
//! booklet order: 8 1 | 2 7 | 6 3 | 4 5
//!                front  back   front  back
//!                 sheet 1       sheet 2
//! ```
//!
//! Both directions are pure permutations over any token type; the pages
//! themselves are never inspected.

use crate::constants::PAGES_PER_SHEET;
use crate::types::*;

// =============================================================================
// Ordering
// =============================================================================

/// Reorder pages from reading order into booklet order.
///
/// The page count must be a multiple of 4; use [`pad_to_booklet`] first when
/// it is not.
pub fn to_booklet<T: Clone>(pages: &[T]) -> Result<Vec<T>> {
    check_length(pages.len())?;

    let mut result = Vec::with_capacity(pages.len());
    if pages.is_empty() {
        return Ok(result);
    }

    let mut left = 0;
    let mut right = pages.len() - 1;
    for i in 0..pages.len() / 2 {
        if i % 2 == 0 {
            result.push(pages[right].clone());
            result.push(pages[left].clone());
        } else {
            result.push(pages[left].clone());
            result.push(pages[right].clone());
        }
        left += 1;
        right -= 1;
    }

    Ok(result)
}

/// Reorder pages from booklet order back into reading order.
///
/// Exact inverse of [`to_booklet`].
pub fn from_booklet<T: Clone>(pages: &[T]) -> Result<Vec<T>> {
    check_length(pages.len())?;

    let half = pages.len() / 2;
    let mut left = Vec::with_capacity(half);
    let mut right = Vec::with_capacity(half);
    for i in 0..half {
        let (first, second) = (&pages[2 * i], &pages[2 * i + 1]);
        if i % 2 == 0 {
            left.push(first.clone());
            right.push(second.clone());
        } else {
            left.push(second.clone());
            right.push(first.clone());
        }
    }

    right.extend(left.into_iter().rev());
    Ok(right)
}

fn check_length(len: usize) -> Result<()> {
    if len % PAGES_PER_SHEET != 0 {
        return Err(PagesError::InvalidLength { len });
    }
    Ok(())
}

// =============================================================================
// Padding
// =============================================================================

/// Smallest page count that is a multiple of 4 and holds `len` pages
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(PAGES_PER_SHEET) * PAGES_PER_SHEET
}

/// Number of folded sheets needed for `len` pages
pub fn sheet_count(len: usize) -> usize {
    padded_len(len) / PAGES_PER_SHEET
}

/// Append `filler` until the page count is a multiple of 4.
pub fn pad_to_booklet<T: Clone>(mut pages: Vec<T>, filler: T) -> Vec<T> {
    let target = padded_len(pages.len());
    pages.resize(target, filler);
    pages
}
