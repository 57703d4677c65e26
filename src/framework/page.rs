//! Paginated result sets returned by `find`.

use serde::Serialize;

/// One page of documents plus the pagination metadata computed by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocs<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u32,
    pub page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub paging_counter: u64,
}

impl<T> PaginatedDocs<T> {
    /// Slices an already filtered and sorted match list into the requested page.
    ///
    /// `limit == 0` disables pagination: every match lands on page 1.
    pub fn from_matches(matches: Vec<T>, page: u32, limit: u32) -> Self {
        let total_docs = matches.len() as u64;
        let page = page.max(1);
        let (limit, total_pages) = if limit == 0 {
            (total_docs.min(u32::MAX as u64) as u32, 1)
        } else {
            let pages = total_docs.div_ceil(limit as u64).max(1);
            (limit, pages.min(u32::MAX as u64) as u32)
        };

        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let docs: Vec<T> = matches
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();

        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;
        Self {
            docs,
            total_docs,
            limit,
            page,
            total_pages,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| page + 1),
            prev_page: has_prev_page.then(|| page - 1),
            paging_counter: (page as u64 - 1) * limit as u64 + 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedDocs<U> {
        PaginatedDocs {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            limit: self.limit,
            page: self.page,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
            next_page: self.next_page,
            prev_page: self.prev_page,
            paging_counter: self.paging_counter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_three() {
        let page = PaginatedDocs::from_matches((1..=25).collect(), 2, 10);
        assert_eq!(page.docs, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_docs, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page && page.has_prev_page);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.paging_counter, 11);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page = PaginatedDocs::<u8>::from_matches(vec![], 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page && !page.has_prev_page);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = PaginatedDocs::from_matches(vec![1, 2, 3], 4, 2);
        assert!(page.docs.is_empty());
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
    }

    #[test]
    fn zero_limit_returns_everything() {
        let page = PaginatedDocs::from_matches(vec![1, 2, 3], 1, 0);
        assert_eq!(page.docs, vec![1, 2, 3]);
        assert_eq!(page.limit, 3);
        assert_eq!(page.total_pages, 1);
    }
}
