//! Page math for the catalog list
//!
//! Fixed page size; total page count comes from the server-reported total
//! while browsing unfiltered and from the active list length otherwise.
//! Page-number buttons follow a 5-wide sliding window clamped to the valid
//! range.

/// Plants shown per page
pub const PAGE_SIZE: usize = 9;

/// Widest run of page-number buttons shown at once
pub const WINDOW_SIZE: u32 = 5;

/// Page count for `item_count` items; an empty list still has one page
pub fn total_pages(item_count: usize) -> u32 {
    let pages = item_count.div_ceil(PAGE_SIZE) as u32;
    pages.max(1)
}

/// The slice of `items` visible on 1-based `page`
pub fn page_slice<T>(items: &[T], page: u32) -> &[T] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Page-number buttons around `current`
///
/// All pages when there are at most five; otherwise a five-wide window
/// centered on the current page, clamped so it never runs past either end.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total <= WINDOW_SIZE {
        return (1..=total).collect();
    }
    let half = WINDOW_SIZE / 2;
    let start = if current <= half + 1 {
        1
    } else if current + half >= total {
        total - WINDOW_SIZE + 1
    } else {
        current - half
    };
    (start..start + WINDOW_SIZE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up_with_floor_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(9), 1);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(45), 5);
        assert_eq!(total_pages(46), 6);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(page_slice(&items, 1), &(0..9).collect::<Vec<_>>()[..]);
        assert_eq!(page_slice(&items, 2), &(9..18).collect::<Vec<_>>()[..]);
        assert_eq!(page_slice(&items, 3), &[18, 19]);
        assert!(page_slice(&items, 4).is_empty());
        // Page 0 reads as page 1
        assert_eq!(page_slice(&items, 0).len(), 9);
    }

    #[test]
    fn test_window_shows_all_when_few_pages() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(3, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_clamps_at_start() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(4, 10), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_window_clamps_at_end() {
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(7, 10), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_window_centered_mid_range() {
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    }
}
