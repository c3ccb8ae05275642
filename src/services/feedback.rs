//! Checks on the submit-feedback form and the "my feedback" paging.

use crate::errors::AppError;
use crate::models::NewFeedback;

pub const MAX_RATING: u8 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Trims the form and rejects it if any required field is blank or the
/// rating is outside 1..=5. Nothing is sent upstream on failure.
pub fn prepare(draft: NewFeedback) -> Result<NewFeedback, AppError> {
    if draft.venue_id <= 0 {
        return Err(AppError::Validation("feedback needs a venue".to_string()));
    }
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("feedback title is required".to_string()));
    }
    let content = draft.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Validation("feedback content is required".to_string()));
    }
    if !(1..=MAX_RATING).contains(&draft.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 1 and {MAX_RATING}, got {}",
            draft.rating
        )));
    }

    Ok(NewFeedback {
        venue_id: draft.venue_id,
        title,
        content,
        rating: draft.rating,
    })
}

/// Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 || limit == 0 {
            return Err(AppError::Validation(format!(
                "page and limit must be positive, got page={page} limit={limit}"
            )));
        }
        Ok(Self { page, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str, rating: u8) -> NewFeedback {
        NewFeedback {
            venue_id: 3,
            title: title.to_string(),
            content: content.to_string(),
            rating,
        }
    }

    #[test]
    fn test_prepare_trims_fields() {
        let fb = prepare(draft("  Lights ", "\tCourt 2 lights flicker\n", 4)).unwrap();
        assert_eq!(fb.title, "Lights");
        assert_eq!(fb.content, "Court 2 lights flicker");
        assert_eq!(fb.rating, 4);
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(prepare(draft("", "ok", 3)), Err(AppError::Validation(_))));
        let err = prepare(draft("Title", "   ", 3)).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(prepare(draft("t", "c", 1)).is_ok());
        assert!(prepare(draft("t", "c", 5)).is_ok());
        assert!(prepare(draft("t", "c", 0)).is_err());
        let err = prepare(draft("t", "c", 6)).unwrap_err();
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[test]
    fn test_venue_required() {
        let mut d = draft("t", "c", 3);
        d.venue_id = 0;
        assert!(prepare(d).is_err());
    }

    #[test]
    fn test_page_defaults_and_bounds() {
        assert_eq!(Page::new(None, None).unwrap(), Page { page: 1, limit: 10 });
        assert_eq!(Page::new(Some(3), Some(20)).unwrap(), Page { page: 3, limit: 20 });
        assert!(Page::new(Some(0), None).is_err());
        assert!(Page::new(None, Some(0)).is_err());
    }
}
