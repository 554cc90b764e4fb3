//! In-memory pagination over a candidate list

use serde::Serialize;

use crate::domain::DomainError;

/// Validated page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Build a request from raw caller input.
    /// A negative page or a size below 1 is rejected.
    pub fn new(page: i64, size: i64) -> Result<Self, DomainError> {
        let page = usize::try_from(page).map_err(|_| {
            DomainError::InvalidArgument(format!("page index must be >= 0, got {}", page))
        })?;
        let size = usize::try_from(size)
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!("page size must be > 0, got {}", size))
            })?;
        Ok(Self { page, size })
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One window of a larger list
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut `request`'s window out of `items`, preserving order.
    /// A window starting past the end is empty; it is not an error.
    pub fn of(items: Vec<T>, request: PageRequest) -> Self {
        let total_elements = items.len();
        let start = request.offset().min(total_elements);
        let end = start.saturating_add(request.size).min(total_elements);

        let content: Vec<T> = items.into_iter().skip(start).take(end - start).collect();

        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
        }
    }
}
