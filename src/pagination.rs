//! This module defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum budgets to display per page when no preference is stored.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_indicators: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 50,
            max_indicators: 5,
        }
    }
}

/// How many pages a list of `item_count` items spans. Always at least 1 so
/// an empty list still renders a page.
pub fn page_count(item_count: u64, page_size: u64) -> u64 {
    item_count.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// Build the indicator strip for the page footer: a window of page numbers
/// around the current page, first/last pages behind ellipses when the window
/// does not reach them, and back/next buttons where they make sense.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_indicators: u64,
) -> Vec<PaginationIndicator> {
    let half = max_indicators / 2;

    let (window_start, window_end) = if page_count <= max_indicators {
        (1, page_count)
    } else if curr_page <= half {
        (1, max_indicators)
    } else if curr_page > page_count - half {
        (page_count - max_indicators + 1, page_count)
    } else {
        (curr_page - half, curr_page + half)
    };

    let mut indicators: Vec<PaginationIndicator> = (window_start..=window_end)
        .map(|page| {
            if page == curr_page {
                PaginationIndicator::CurrPage(page)
            } else {
                PaginationIndicator::Page(page)
            }
        })
        .collect();

    if window_start > 1 {
        indicators.insert(0, PaginationIndicator::Ellipsis);
        indicators.insert(0, PaginationIndicator::Page(1));
    }

    if window_end < page_count {
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

#[cfg(test)]
mod page_count_tests {
    use crate::pagination::page_count;

    #[test]
    fn rounds_up_to_whole_pages() {
        assert_eq!(page_count(120, 50), 3);
        assert_eq!(page_count(100, 50), 2);
        assert_eq!(page_count(1, 50), 1);
    }

    #[test]
    fn empty_list_still_has_one_page() {
        assert_eq!(page_count(0, 50), 1);
    }
}
