//! Page arithmetic for slicing ordered data.
//!
//! Pages are 1-indexed: page 1 covers `[0, page_size)`.

/// Half-open `(start, end)` index range of `page`.
///
/// Page 0 is treated as page 1. Arithmetic saturates at `usize::MAX`.
///
/// ```
/// use evictkit::pagination::index_range;
///
/// assert_eq!(index_range(1, 10), (0, 10));
/// assert_eq!(index_range(3, 15), (30, 45));
/// ```
pub fn index_range(page: usize, page_size: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    (start, start.saturating_add(page_size))
}

/// The items of `page` within `items`, clamped to the slice bounds.
///
/// ```
/// use evictkit::pagination::page_of;
///
/// let rows = [1, 2, 3, 4, 5];
/// assert_eq!(page_of(&rows, 2, 2), &[3, 4]);
/// assert_eq!(page_of(&rows, 3, 2), &[5]);
/// assert!(page_of(&rows, 4, 2).is_empty());
/// ```
pub fn page_of<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = index_range(page, page_size);
    let start = start.min(items.len());
    let end = end.min(items.len());
    &items[start..end]
}
