//! Pagination over a filtered collection.
//!
//! Pure arithmetic over provided bounds: no retries, no failure states. The
//! caller holds the page index; out-of-range indices mean "no results", never
//! an error.

use crate::mode::DisplayMode;

/// One page of a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a, T> {
    /// Total pages at this mode's page size (0 for an empty collection).
    pub page_count: usize,
    /// Items visible on the requested page (empty when out of range).
    pub visible: &'a [T],
}

/// Total page count for `len` items at `mode`'s page size.
pub fn page_count(len: usize, mode: DisplayMode) -> usize {
    len.div_ceil(mode.page_size())
}

/// Slice out the page at `page_index`.
///
/// `page_count = ceil(len / page_size)`; an empty input has zero pages. An
/// index at or past the end yields an empty `visible` slice, the expected
/// state when the holder has not yet clamped after a filter change.
pub fn paginate<T>(items: &[T], mode: DisplayMode, page_index: usize) -> PageView<'_, T> {
    let size = mode.page_size();
    let start = page_index.saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    PageView {
        page_count: items.len().div_ceil(size),
        visible: &items[start..end],
    }
}

/// Saturating forward navigation: ceilings at `page_count - 1`, does not wrap.
///
/// An index already at (or past) the last page stays put.
pub fn next_page(current: usize, page_count: usize) -> usize {
    if page_count > 0 && current < page_count - 1 {
        current + 1
    } else {
        current
    }
}

/// Saturating backward navigation: floors at 0, does not wrap.
pub fn previous_page(current: usize) -> usize {
    current.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_items_on_desktop_make_two_pages() {
        let items: Vec<u32> = (0..9).collect();

        let first = paginate(&items, DisplayMode::Desktop, 0);
        assert_eq!(first.page_count, 2);
        assert_eq!(first.visible.len(), 8);

        let second = paginate(&items, DisplayMode::Desktop, 1);
        assert_eq!(second.page_count, 2);
        assert_eq!(second.visible, &[8]);
    }

    #[test]
    fn empty_input_has_zero_pages_for_any_index() {
        let items: Vec<u32> = vec![];
        for mode in [DisplayMode::Desktop, DisplayMode::Tablet, DisplayMode::Mobile] {
            for index in [0, 1, 7, 100] {
                let page = paginate(&items, mode, index);
                assert_eq!(page.page_count, 0);
                assert!(page.visible.is_empty());
            }
        }
    }

    #[test]
    fn tablet_pairs_and_mobile_singles() {
        let items: Vec<u32> = (0..5).collect();

        let tablet = paginate(&items, DisplayMode::Tablet, 1);
        assert_eq!(tablet.page_count, 3);
        assert_eq!(tablet.visible, &[2, 3]);

        let mobile = paginate(&items, DisplayMode::Mobile, 4);
        assert_eq!(mobile.page_count, 5);
        assert_eq!(mobile.visible, &[4]);
    }

    #[test]
    fn out_of_range_index_yields_an_empty_page() {
        let items: Vec<u32> = (0..3).collect();
        let page = paginate(&items, DisplayMode::Tablet, 9);
        assert_eq!(page.page_count, 2);
        assert!(page.visible.is_empty());
    }

    #[test]
    fn paginate_is_idempotent() {
        let items: Vec<u32> = (0..9).collect();
        assert_eq!(
            paginate(&items, DisplayMode::Desktop, 1),
            paginate(&items, DisplayMode::Desktop, 1)
        );
    }

    #[test]
    fn next_page_saturates_at_the_last_page() {
        assert_eq!(next_page(0, 3), 1);
        assert_eq!(next_page(1, 3), 2);
        assert_eq!(next_page(2, 3), 2);
        // An out-of-range index stays put rather than advancing further.
        assert_eq!(next_page(7, 3), 7);
        assert_eq!(next_page(0, 0), 0);
    }

    #[test]
    fn previous_page_floors_at_zero() {
        assert_eq!(previous_page(2), 1);
        assert_eq!(previous_page(1), 0);
        assert_eq!(previous_page(0), 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_mode() -> impl Strategy<Value = DisplayMode> {
            prop_oneof![
                Just(DisplayMode::Desktop),
                Just(DisplayMode::Tablet),
                Just(DisplayMode::Mobile),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: page count is the ceiling division of length by size.
            #[test]
            fn page_count_is_ceiling_division(len in 0usize..500, mode in any_mode()) {
                let items: Vec<usize> = (0..len).collect();
                let size = mode.page_size();
                let expected = len.div_ceil(size);

                prop_assert_eq!(paginate(&items, mode, 0).page_count, expected);
                prop_assert_eq!(page_count(len, mode), expected);
            }

            /// Property: pages partition the input; concatenated in order, they
            /// reproduce it exactly.
            #[test]
            fn pages_partition_the_input(len in 0usize..500, mode in any_mode()) {
                let items: Vec<usize> = (0..len).collect();
                let pages = paginate(&items, mode, 0).page_count;

                let mut collected = Vec::new();
                for index in 0..pages {
                    let page = paginate(&items, mode, index);
                    prop_assert!(page.visible.len() <= mode.page_size());
                    collected.extend_from_slice(page.visible);
                }
                prop_assert_eq!(collected, items);
            }

            /// Property: saturating navigation never leaves `[0, page_count - 1]`
            /// once the index is in range.
            #[test]
            fn navigation_stays_in_bounds(
                pages in 1usize..50,
                start in 0usize..50,
                steps in proptest::collection::vec(any::<bool>(), 0..64),
            ) {
                let mut current = start % pages;
                for forward in steps {
                    current = if forward {
                        next_page(current, pages)
                    } else {
                        previous_page(current)
                    };
                    prop_assert!(current < pages);
                }
            }
        }
    }
}
