//! Public site: derived presentation state and the page view model.
//!
//! The renderer only observes content. Everything here is a pure function
//! of the current [`SiteContent`] plus the visitor's UI selections.

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::catalog::{
    self, Highlight, Stat, Testimonial, DEFAULT_STUDIO_DESCRIPTION, HIGHLIGHTS, STATS,
    TESTIMONIALS,
};
use crate::contact::{self, BookingMethod};
use crate::content::{Category, GalleryItem, Profile, Project, Service};
use crate::error::CoreError;

/// Latest value of every collection, as seen by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteContent {
    pub gallery: Vec<GalleryItem>,
    pub projects: Vec<Project>,
    pub services: Vec<Service>,
    pub profile: Profile,
}

// ---------------------------------------------------------------------------
// Gallery filtering
// ---------------------------------------------------------------------------

/// Gallery category selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GalleryFilter {
    #[default]
    All,
    Only(Category),
}

impl GalleryFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(c) => c.as_str(),
        }
    }

    pub fn matches(self, item: &GalleryItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => item.category_name == c.as_str(),
        }
    }
}

impl FromStr for GalleryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(Self::Only(trimmed.parse()?))
    }
}

/// The gallery to show: live items, or the bundled sample when there are none.
///
/// The flag is `true` when the sample is in use.
pub fn active_gallery(live: &[GalleryItem]) -> (Vec<GalleryItem>, bool) {
    if live.is_empty() {
        (catalog::sample_gallery(), true)
    } else {
        (live.to_vec(), false)
    }
}

/// Exactly the items whose category equals the filter (or all of them).
pub fn filter_gallery(items: &[GalleryItem], filter: GalleryFilter) -> Vec<GalleryItem> {
    items.iter().filter(|i| filter.matches(i)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Page sections in display order.
pub const SECTIONS: [(&str, &str); 5] = [
    ("home", "Home"),
    ("services", "Services"),
    ("portfolio", "Portfolio"),
    ("gallery", "Gallery"),
    ("contact", "Contact"),
];

/// Fraction of a section that must be visible before it becomes active.
pub const SECTION_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Tracks which page section is active from viewport visibility reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSection {
    current: String,
}

impl Default for ActiveSection {
    fn default() -> Self {
        Self {
            current: SECTIONS[0].0.to_string(),
        }
    }
}

impl ActiveSection {
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Apply one batch of `(section id, visible ratio)` observations.
    ///
    /// Every section crossing the threshold becomes active in turn, so the
    /// last one in the batch wins. Unknown ids are ignored; a batch with no
    /// qualifying section keeps the current value.
    pub fn observe(&mut self, visibility: &[(&str, f64)]) {
        for (id, ratio) in visibility {
            if *ratio >= SECTION_VISIBILITY_THRESHOLD && SECTIONS.iter().any(|(s, _)| s == id) {
                self.current = (*id).to_string();
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub name: &'static str,
    pub active: bool,
}

pub fn navigation(active: &str) -> Vec<NavItem> {
    SECTIONS
        .iter()
        .map(|(id, name)| NavItem {
            id: *id,
            name: *name,
            active: *id == active,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Carousel, service tabs, portfolio viewer
// ---------------------------------------------------------------------------

/// Testimonial auto-advance period.
pub const CAROUSEL_INTERVAL: Duration = Duration::from_secs(5);

/// A fixed-period carousel over `len` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    interval: Duration,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            interval,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advance one slide, wrapping at the end.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    /// Slide showing after `elapsed` time of uninterrupted auto-advance.
    pub fn slide_at(&self, elapsed: Duration) -> usize {
        if self.len == 0 || self.interval.is_zero() {
            return 0;
        }
        let ticks = elapsed.as_millis() / self.interval.as_millis();
        (ticks % self.len as u128) as usize
    }
}

/// Index of the active service tab; out-of-range selections fall back to
/// the first tab. `None` when there are no services.
pub fn active_service(count: usize, requested: usize) -> Option<usize> {
    match count {
        0 => None,
        _ if requested < count => Some(requested),
        _ => Some(0),
    }
}

/// Next project in the portfolio viewer, wrapping.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

/// Previous project in the portfolio viewer, wrapping.
pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

// ---------------------------------------------------------------------------
// Page view model
// ---------------------------------------------------------------------------

/// Visitor selections that shape the page.
#[derive(Debug, Clone, Default)]
pub struct PageSelection {
    pub section: Option<String>,
    pub gallery: GalleryFilter,
    pub service: usize,
    pub booking: BookingMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudioView {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: String,
    pub icon: String,
    pub kind_icon: &'static str,
    pub title: String,
    pub description: String,
    pub price: String,
    pub features: Vec<String>,
    pub booking_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesSection {
    pub items: Vec<ServiceView>,
    pub active: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GallerySection {
    pub filter: &'static str,
    pub categories: Vec<&'static str>,
    pub sample: bool,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialsSection {
    pub items: &'static [Testimonial],
    pub current: usize,
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactLinks {
    pub call: String,
    pub email: String,
    pub booking_method: BookingMethod,
    pub booking: String,
}

/// Everything the public page needs, fully resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SitePage {
    pub studio: StudioView,
    pub navigation: Vec<NavItem>,
    pub stats: &'static [Stat],
    pub services: ServicesSection,
    pub portfolio: Vec<Project>,
    pub gallery: GallerySection,
    pub testimonials: TestimonialsSection,
    pub highlights: &'static [Highlight],
    pub contact: ContactLinks,
}

fn studio_view(profile: &Profile) -> StudioView {
    let description = if profile.description.trim().is_empty() {
        DEFAULT_STUDIO_DESCRIPTION.to_string()
    } else {
        profile.description.clone()
    };
    StudioView {
        name: profile.studio_name_or_default().to_string(),
        description,
        phone: profile.phone_or_default().to_string(),
        email: profile.email_or_default().to_string(),
        address: profile.address.clone(),
    }
}

fn service_view(service: &Service, profile: &Profile, booking: BookingMethod) -> ServiceView {
    ServiceView {
        id: service.id.clone(),
        icon: service.icon.clone(),
        kind_icon: catalog::ServiceKind::from_title(&service.title).icon(),
        title: service.title.clone(),
        description: service.description.clone(),
        price: service.price.clone(),
        features: catalog::service_features(&service.title, &service.features),
        booking_link: contact::booking_link(profile, booking, &service.title),
    }
}

/// Build the gallery section for a filter.
pub fn gallery_section(live: &[GalleryItem], filter: GalleryFilter) -> GallerySection {
    let (items, sample) = active_gallery(live);
    GallerySection {
        filter: filter.as_str(),
        categories: std::iter::once("all")
            .chain(Category::ALL.iter().map(|c| c.as_str()))
            .collect(),
        sample,
        items: filter_gallery(&items, filter),
    }
}

/// Resolve the public page. `elapsed` drives the testimonial carousel.
pub fn build_page(content: &SiteContent, selection: &PageSelection, elapsed: Duration) -> SitePage {
    let profile = &content.profile;

    let mut section = ActiveSection::default();
    if let Some(requested) = selection.section.as_deref() {
        section.observe(&[(requested, 1.0)]);
    }

    let services = ServicesSection {
        items: content
            .services
            .iter()
            .map(|s| service_view(s, profile, selection.booking))
            .collect(),
        active: active_service(content.services.len(), selection.service),
    };

    let carousel = Carousel::new(TESTIMONIALS.len(), CAROUSEL_INTERVAL);

    SitePage {
        studio: studio_view(profile),
        navigation: navigation(section.current()),
        stats: STATS,
        services,
        portfolio: content.projects.clone(),
        gallery: gallery_section(&content.gallery, selection.gallery),
        testimonials: TestimonialsSection {
            items: TESTIMONIALS,
            current: carousel.slide_at(elapsed),
            interval_secs: carousel.interval().as_secs(),
        },
        highlights: HIGHLIGHTS,
        contact: ContactLinks {
            call: contact::call_link(profile),
            email: contact::email_link(profile),
            booking_method: selection.booking,
            booking: contact::booking_link(profile, selection.booking, ""),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str) -> GalleryItem {
        GalleryItem {
            id: id.into(),
            title: format!("item {id}"),
            category_name: category.into(),
            url: format!("http://cdn/{id}.jpg"),
            media_type: "image".into(),
        }
    }

    #[test]
    fn empty_gallery_falls_back_to_sample() {
        let (items, sample) = active_gallery(&[]);
        assert!(sample);
        assert_eq!(items, catalog::sample_gallery());
    }

    #[test]
    fn live_gallery_wins_over_sample() {
        let live = vec![item("a", "wedding")];
        let (items, sample) = active_gallery(&live);
        assert!(!sample);
        assert_eq!(items, live);
    }

    #[test]
    fn wedding_filter_returns_exactly_wedding_items() {
        let live = vec![
            item("a", "wedding"),
            item("b", "portrait"),
            item("c", "wedding"),
            item("d", "Wedding"),
        ];
        let filtered = filter_gallery(&live, "wedding".parse().unwrap());
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn wedding_filter_on_sample_gallery() {
        let section = gallery_section(&[], GalleryFilter::Only(Category::Wedding));
        assert!(section.sample);
        assert_eq!(section.items.len(), 5);
        assert!(section.items.iter().all(|i| i.category_name == "wedding"));
    }

    #[test]
    fn filter_parses_all_and_rejects_unknown() {
        assert_eq!("".parse::<GalleryFilter>().unwrap(), GalleryFilter::All);
        assert_eq!("ALL".parse::<GalleryFilter>().unwrap(), GalleryFilter::All);
        assert!("sunsets".parse::<GalleryFilter>().is_err());
    }

    #[test]
    fn active_section_follows_threshold_and_last_match() {
        let mut section = ActiveSection::default();
        assert_eq!(section.current(), "home");

        section.observe(&[("services", 0.3)]);
        assert_eq!(section.current(), "home");

        section.observe(&[("services", 0.6), ("gallery", 0.5)]);
        assert_eq!(section.current(), "gallery");

        section.observe(&[("basement", 1.0)]);
        assert_eq!(section.current(), "gallery");
    }

    #[test]
    fn carousel_wraps() {
        let mut c = Carousel::new(3, CAROUSEL_INTERVAL);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.slide_at(Duration::from_secs(4)), 0);
        assert_eq!(c.slide_at(Duration::from_secs(5)), 1);
        assert_eq!(c.slide_at(Duration::from_secs(16)), 0);
    }

    #[test]
    fn empty_carousel_stays_at_zero() {
        let mut c = Carousel::new(0, CAROUSEL_INTERVAL);
        assert_eq!(c.next(), 0);
        assert_eq!(c.slide_at(Duration::from_secs(100)), 0);
    }

    #[test]
    fn service_tab_clamps() {
        assert_eq!(active_service(0, 0), None);
        assert_eq!(active_service(3, 2), Some(2));
        assert_eq!(active_service(3, 7), Some(0));
    }

    #[test]
    fn portfolio_viewer_wraps_both_ways() {
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(0, 0), 0);
    }

    #[test]
    fn page_resolves_services_and_contact() {
        let content = SiteContent {
            services: vec![Service {
                id: "-Na".into(),
                title: "Wedding Photography".into(),
                ..Service::default()
            }],
            ..SiteContent::default()
        };
        let selection = PageSelection {
            booking: BookingMethod::Email,
            section: Some("contact".into()),
            ..PageSelection::default()
        };
        let page = build_page(&content, &selection, Duration::ZERO);

        assert_eq!(page.studio.name, "Dev Studio");
        assert_eq!(page.services.active, Some(0));
        assert_eq!(page.services.items[0].kind_icon, "ring");
        assert_eq!(page.services.items[0].features.len(), 8);
        assert!(page.services.items[0].booking_link.starts_with("mailto:"));
        assert!(page.contact.booking.starts_with("mailto:"));
        assert!(page.navigation.iter().any(|n| n.id == "contact" && n.active));
        assert!(page.gallery.sample);
    }
}
