//! Pagination Service

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Length of the sequence before slicing.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }
}

/// Slice `[(page-1)*page_size, page*page_size)` of `data`. `page` is
/// 1-indexed; page 0, a zero size, or a page past the end gives no items.
pub fn paginate<T>(data: &[T], page: usize, page_size: usize) -> Page<&T> {
    let total = data.len();
    let items = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if start < total && page_size > 0 => {
            let end = start.saturating_add(page_size).min(total);
            data[start..end].iter().collect()
        }
        _ => Vec::new(),
    };

    Page {
        items,
        total,
        page,
        page_size,
    }
}

/// Lenient numeric query value; anything unparsable falls back to `default`.
pub fn parse_or(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_five() {
        let data = [1, 2, 3, 4, 5];
        let page = paginate(&data, 2, 2);
        assert_eq!(page.items, vec![&3, &4]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn test_last_partial_page() {
        let data = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&data, 3, 2).items, vec![&5]);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let data = [1, 2, 3];
        assert!(paginate(&data, 0, 2).items.is_empty());
        assert!(paginate(&data, 4, 2).items.is_empty());
        assert!(paginate(&data, usize::MAX, usize::MAX).items.is_empty());

        let zero = paginate(&data, 1, 0);
        assert!(zero.items.is_empty());
        assert_eq!(zero.total, 3);
        assert_eq!(zero.page_count(), 0);
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        let data: Vec<u32> = (0..23).collect();
        for size in 1..=7 {
            let count = paginate(&data, 1, size).page_count();
            let rebuilt: Vec<u32> = (1..=count)
                .flat_map(|p| paginate(&data, p, size).items.into_iter().copied())
                .collect();
            assert_eq!(rebuilt, data);
            assert!(paginate(&data, 1, size).items.len() <= size);
        }
    }

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or(Some("3"), DEFAULT_PAGE), 3);
        assert_eq!(parse_or(Some("abc"), DEFAULT_LIMIT), DEFAULT_LIMIT);
        assert_eq!(parse_or(None, DEFAULT_LIMIT), DEFAULT_LIMIT);
    }
}
