//! Batch planning: splitting a record count into fixed-size offset windows

/// Offsets covering `total` records in windows of `page_size`
///
/// Returns `0, page_size, 2 * page_size, ...` up to but excluding
/// `ceil(total / page_size) * page_size`. An empty dataset yields an empty plan.
///
/// # Examples
///
/// ```
/// use formasi_export::planner::plan;
///
/// assert_eq!(plan(25, 10), vec![0, 10, 20]);
/// assert!(plan(0, 10).is_empty());
/// ```
///
/// # Panics
///
/// Panics if `page_size` is zero. [`crate::Config::validate`] rejects that
/// setting before any fetch happens.
pub fn plan(total: usize, page_size: usize) -> Vec<usize> {
    assert!(page_size > 0, "page_size must be greater than zero");
    (0..total).step_by(page_size).collect()
}

/// Number of pages needed to show `total` records
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Offset of a 1-based page number; page 0 is treated as page 1
pub fn offset_for_page(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}
