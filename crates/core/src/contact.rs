//! Outbound contact links: telephone, mail, and messaging-app booking.
//!
//! Message text is built by plain templating; the only escaping applied is
//! URL component encoding.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::Profile;
use crate::error::CoreError;

/// How a booking request leaves the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingMethod {
    #[default]
    Whatsapp,
    Email,
}

impl FromStr for BookingMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whatsapp" => Ok(Self::Whatsapp),
            "email" => Ok(Self::Email),
            other => Err(CoreError::Validation(format!(
                "Unknown booking method '{other}'. Must be one of: whatsapp, email"
            ))),
        }
    }
}

/// `tel:` link for the studio phone.
pub fn call_link(profile: &Profile) -> String {
    format!("tel:{}", profile.phone_or_default())
}

/// Bare `mailto:` link for the studio email.
pub fn email_link(profile: &Profile) -> String {
    format!("mailto:{}", profile.email_or_default())
}

/// Booking link for the chosen method. `service` may be empty.
pub fn booking_link(profile: &Profile, method: BookingMethod, service: &str) -> String {
    match method {
        BookingMethod::Whatsapp => whatsapp_booking_link(profile, service),
        BookingMethod::Email => email_booking_link(profile, service),
    }
}

/// `https://wa.me/<phone>?text=<message>` with a pre-filled booking message.
pub fn whatsapp_booking_link(profile: &Profile, service: &str) -> String {
    let mut message = format!(
        "Hello {}!\n\nI'm interested in booking a session.\n",
        profile.studio_name_or_default()
    );
    let service = service.trim();
    if !service.is_empty() {
        message.push_str(&format!("Service: {service}\n"));
    }
    message.push_str("\nPlease provide me with more information about availability and pricing.");

    format!(
        "https://wa.me/{}?text={}",
        profile.phone_or_default(),
        urlencoding::encode(&message)
    )
}

/// `mailto:` link with a booking subject and body.
pub fn email_booking_link(profile: &Profile, service: &str) -> String {
    let service = service.trim();
    let subject = format!(
        "Booking Inquiry - {}",
        if service.is_empty() { "Photography Session" } else { service }
    );
    let body = format!(
        "Hello {studio} Team,\n\n\
         I'm interested in booking a {what} and would like to get more information about:\n\n\
         - Availability\n\
         - Pricing packages\n\
         - Session details\n\
         - Any requirements\n\n\
         Please get back to me with the available options.\n\n\
         Best regards",
        studio = profile.studio_name_or_default(),
        what = if service.is_empty() { "photography session" } else { service },
    );

    format!(
        "mailto:{}?subject={}&body={}",
        profile.email_or_default(),
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}
