//! Built-in content shown when the live collections have nothing to offer,
//! plus the presentation catalog used to decorate services.

use serde::Serialize;

use crate::content::{Category, GalleryItem, MediaType};

// ---------------------------------------------------------------------------
// Sample gallery
// ---------------------------------------------------------------------------

const SAMPLE_IMAGE_HOST: &str = "https://images.unsplash.com";
const SAMPLE_IMAGE_QUERY: &str = "auto=format&fit=crop&w=2070&q=80";

/// `(id, title, category, photo)` rows of the bundled sample gallery.
const SAMPLE_GALLERY: &[(&str, &str, Category, &str)] = &[
    ("sample-1", "Romantic Wedding", Category::Wedding, "photo-1511285560929-80b456fea0bc"),
    ("sample-3", "Beach Wedding", Category::Wedding, "photo-1445452916036-9022dfd33aa8"),
    ("sample-4", "Traditional Celebration", Category::Wedding, "photo-1551232864-3f0890e580d9"),
    ("sample-5", "Elegant Reception", Category::Wedding, "photo-1583939003579-730e3918a45a"),
    ("sample-6", "First Dance", Category::Wedding, "photo-1519225421980-715cb0215aed"),
    ("sample-7", "Professional Headshot", Category::Portrait, "photo-1507003211169-0a1dd7228f2d"),
    ("sample-9", "Urban Portrait", Category::Portrait, "photo-1534751516642-a1af1ef26a56"),
    ("sample-10", "Natural Light Portrait", Category::Portrait, "photo-1529626455594-4ff0802cfb7e"),
    ("sample-11", "Corporate Portrait", Category::Portrait, "photo-1488426862026-3ee34a7d66df"),
    ("sample-12", "Lifestyle Portrait", Category::Portrait, "photo-1544005313-94ddf0286df2"),
    ("sample-13", "Corporate Event", Category::Event, "photo-1492684223066-81342ee5ff30"),
    ("sample-14", "Music Festival", Category::Event, "photo-1540575467063-178a50c2df87"),
    ("sample-15", "Birthday Celebration", Category::Event, "photo-1530103862676-de8c9debad1d"),
    ("sample-16", "Product Launch", Category::Event, "photo-1511795409834-ef04bbd61622"),
    ("sample-17", "Charity Gala", Category::Event, "photo-1505236858219-8359eb29e329"),
    ("sample-18", "Conference Event", Category::Event, "photo-1501281668745-f7f57925c3b4"),
    ("sample-19", "Product Photography", Category::Commercial, "photo-1460661419201-fd4cecdf8a8b"),
    ("sample-20", "Fashion Campaign", Category::Commercial, "photo-1441986300917-64674bd600d8"),
    ("sample-21", "Brand Story", Category::Commercial, "photo-1441984904996-e0b6ba687e04"),
    ("sample-22", "Corporate Branding", Category::Commercial, "photo-1556742049-0cfed4f6a45d"),
    ("sample-23", "Architecture Shoot", Category::Commercial, "photo-1556228453-efd6c1ff04f6"),
    ("sample-24", "Food Photography", Category::Commercial, "photo-1560472354-b33ff0c44a43"),
    ("sample-25", "Artistic Vision", Category::Creative, "photo-1516035069371-29a1b244cc32"),
    ("sample-27", "Fine Art Photography", Category::Creative, "photo-1554080353-a576cf803bda"),
    ("sample-28", "Experimental Shoot", Category::Creative, "photo-1542038784456-1ea8e935640e"),
    ("sample-29", "Abstract Composition", Category::Creative, "photo-1554048612-b6a482bc67e5"),
    ("sample-30", "Creative Portraiture", Category::Creative, "photo-1554080353-321e452ccf19"),
    ("sample-31", "Film Production", Category::Video, "photo-1493863641943-9b68992a8d07"),
    ("sample-32", "Cinematic Wedding", Category::Video, "photo-1574267432553-4b4628081c31"),
    ("sample-33", "Documentary Style", Category::Video, "photo-1533750349088-cd871a92f312"),
    ("sample-34", "Music Video", Category::Video, "photo-1516035069371-29a1b244cc32"),
    ("sample-35", "Corporate Video", Category::Video, "photo-1485846234645-a62644f84728"),
    ("sample-36", "Short Film", Category::Video, "photo-1560169897-fc0cdbdfa4d5"),
];

/// The bundled sample gallery, used only while the live gallery is empty.
pub fn sample_gallery() -> Vec<GalleryItem> {
    SAMPLE_GALLERY
        .iter()
        .map(|(id, title, category, photo)| GalleryItem {
            id: (*id).to_string(),
            title: (*title).to_string(),
            category_name: category.as_str().to_string(),
            url: format!("{SAMPLE_IMAGE_HOST}/{photo}?{SAMPLE_IMAGE_QUERY}"),
            media_type: MediaType::Image.as_str().to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Testimonials, stats, highlights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub company: &'static str,
    pub text: &'static str,
    pub avatar: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Sarah & James",
        company: "Wedding Clients",
        text: "Dev Studio captured our wedding day perfectly! The photos and video are absolutely stunning and we'll cherish them forever.",
        avatar: "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=80&h=80&fit=crop&crop=face",
    },
    Testimonial {
        name: "Michael Chen",
        company: "Private Session Client",
        text: "The private shooting session was amazing! The team made me feel comfortable and the results were beyond expectations.",
        avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=80&h=80&fit=crop&crop=face",
    },
    Testimonial {
        name: "Emma Rodriguez",
        company: "Commercial Client",
        text: "Professional, creative, and delivered exceptional quality on our commercial film project. Highly recommended!",
        avatar: "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?w=80&h=80&fit=crop&crop=face",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat { number: "500+", label: "Projects Completed", icon: "rocket" },
    Stat { number: "99%", label: "Client Satisfaction", icon: "heart" },
    Stat { number: "50+", label: "Awards Won", icon: "star" },
    Stat { number: "24/7", label: "Support Available", icon: "headset" },
];

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub text: &'static str,
    pub icon: &'static str,
}

/// "Why choose us" points.
pub const HIGHLIGHTS: &[Highlight] = &[
    Highlight { text: "Professional Equipment", icon: "camera" },
    Highlight { text: "Creative Team", icon: "rocket" },
    Highlight { text: "Fast Delivery", icon: "clock" },
    Highlight { text: "Affordable Pricing", icon: "money-bill-wave" },
    Highlight { text: "Quality Guarantee", icon: "shield" },
    Highlight { text: "24/7 Support", icon: "headset" },
];

/// Footer blurb used when the profile has no description.
pub const DEFAULT_STUDIO_DESCRIPTION: &str =
    "Professional photography and film studio capturing your most precious moments with creativity and passion.";

// ---------------------------------------------------------------------------
// Service presentation catalog
// ---------------------------------------------------------------------------

/// Presentation family a service title falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Wedding,
    Portrait,
    Commercial,
    Event,
    Video,
    Creative,
    Default,
}

impl ServiceKind {
    /// Classify a service by keywords in its title, first match wins.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        let has = |k: &str| title.contains(k);
        if has("wedding") {
            Self::Wedding
        } else if has("portrait") || has("private") {
            Self::Portrait
        } else if has("commercial") || has("business") {
            Self::Commercial
        } else if has("event") {
            Self::Event
        } else if has("video") || has("film") {
            Self::Video
        } else if has("creative") {
            Self::Creative
        } else {
            Self::Default
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Wedding => "ring",
            Self::Portrait => "user-tie",
            Self::Commercial => "building",
            Self::Event => "theater-masks",
            Self::Video => "video",
            Self::Creative => "palette",
            Self::Default => "camera",
        }
    }

    /// Feature list shown for this kind. Creative services have no list of
    /// their own and use the default one.
    pub fn features(self) -> &'static [&'static str] {
        match self {
            Self::Wedding => &[
                "Full day coverage (8-10 hours)",
                "2 professional photographers",
                "500+ high-resolution edited photos",
                "Online gallery with download access",
                "Engagement pre-shoot included",
                "Wedding album design consultation",
                "Same-day sneak peek photos",
                "All digital files with print rights",
            ],
            Self::Portrait => &[
                "1-2 hour professional session",
                "Multiple outfit changes",
                "Studio or outdoor location",
                "50+ professionally edited photos",
                "Online gallery delivery",
                "Print release for personal use",
                "Hair & makeup guidance",
                "Digital download within 7 days",
            ],
            Self::Commercial => &[
                "Professional lighting setup",
                "Product or corporate photography",
                "Brand consistency maintained",
                "High-resolution commercial license",
                "Fast turnaround (3-5 business days)",
                "Multiple format delivery",
                "Background removal service",
                "Social media optimized versions",
            ],
            Self::Event => &[
                "4-6 hours of coverage",
                "Candid and posed photography",
                "Multiple photographers available",
                "200+ edited high-resolution images",
                "Next-day sneak peek delivery",
                "Online gallery for guests",
                "Print and digital rights",
                "Event highlight video available",
            ],
            Self::Video => &[
                "4K Ultra HD quality",
                "Professional audio recording",
                "Multiple camera angles",
                "Color grading and correction",
                "Background music licensing",
                "3-5 minute highlight reel",
                "Full event footage available",
                "Delivery within 10-14 days",
            ],
            Self::Creative | Self::Default => &[
                "Professional equipment setup",
                "High-quality edited deliverables",
                "Fast turnaround time",
                "Multiple revision rounds",
                "Online delivery system",
                "Print and digital rights",
                "Customer support",
                "Satisfaction guarantee",
            ],
        }
    }
}

/// Features to display for a service: its own list when it has one,
/// otherwise the catalog list for its title.
pub fn service_features(title: &str, own: &[String]) -> Vec<String> {
    if own.iter().any(|f| !f.trim().is_empty()) {
        return own.to_vec();
    }
    ServiceKind::from_title(title)
        .features()
        .iter()
        .map(|f| (*f).to_string())
        .collect()
}
