//! Handlers for the public site.
//!
//! These read the live content feed rather than the store, so a page is
//! always built from the latest pushed snapshot without a round trip.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::contact::{booking_link, BookingMethod};
use studio_core::site::{build_page, gallery_section, GalleryFilter, GallerySection, PageSelection, SitePage};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /site`.
#[derive(Debug, Default, Deserialize)]
pub struct SiteQuery {
    /// Gallery category, or `all`.
    pub category: Option<String>,
    /// Index of the selected service tab.
    pub service: Option<usize>,
    /// `whatsapp` or `email`.
    pub booking: Option<String>,
    /// Section currently in view, for the navigation highlight.
    pub section: Option<String>,
}

impl SiteQuery {
    fn into_selection(self) -> AppResult<PageSelection> {
        Ok(PageSelection {
            section: self.section.filter(|s| !s.trim().is_empty()),
            gallery: parse_filter(self.category.as_deref())?,
            service: self.service.unwrap_or(0),
            booking: parse_method(self.booking.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    /// Service title to book.
    #[serde(default)]
    pub service: String,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingLink {
    pub method: BookingMethod,
    pub link: String,
}

fn parse_filter(raw: Option<&str>) -> AppResult<GalleryFilter> {
    Ok(raw.unwrap_or_default().parse()?)
}

fn parse_method(raw: Option<&str>) -> AppResult<BookingMethod> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(method) => Ok(method.parse()?),
        None => Ok(BookingMethod::default()),
    }
}

/// GET /api/v1/site
///
/// The whole public page view model.
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<SiteQuery>,
) -> AppResult<Json<DataResponse<SitePage>>> {
    let selection = query.into_selection()?;
    let content = state.feed.snapshot();
    let page = build_page(&content, &selection, state.started_at.elapsed());

    Ok(Json(DataResponse::new(page)))
}

/// GET /api/v1/site/gallery
///
/// The gallery section alone, filtered by `category`.
pub async fn gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> AppResult<Json<DataResponse<GallerySection>>> {
    let filter = parse_filter(query.category.as_deref())?;
    let content = state.feed.snapshot();

    Ok(Json(DataResponse::new(gallery_section(&content.gallery, filter))))
}

/// GET /api/v1/site/booking
///
/// A WhatsApp or mail link requesting a booking for `service`.
pub async fn booking(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<DataResponse<BookingLink>>> {
    let method = parse_method(query.method.as_deref())?;
    let profile = state.feed.snapshot().profile;
    let link = booking_link(&profile, method, query.service.trim());

    Ok(Json(DataResponse::new(BookingLink { method, link })))
}
