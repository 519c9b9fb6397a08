use url::Url;

use crate::config::Config;
use crate::models::property::PropertyRecord;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";
const MAPS_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, PartialEq)]
pub struct CallToAction {
    pub title: &'static str,
    pub blurb: &'static str,
    pub url: String,
}

/// Chat link with a pre-filled message. An empty message opens a blank chat.
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let base = format!("{}{}", WHATSAPP_BASE_URL, phone);
    if message.is_empty() {
        return base;
    }
    match Url::parse_with_params(&base, &[("text", message)]) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}

pub fn maps_search_url(area: &str, city: &str) -> String {
    let query = format!("{} {}", area, city);
    let mut url = match Url::parse(MAPS_SEARCH_BASE_URL) {
        Ok(url) => url,
        Err(_) => return MAPS_SEARCH_BASE_URL.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&query);
    }
    url.to_string()
}

pub fn call_url(phone: &str) -> String {
    format!("tel:+{}", phone)
}

pub fn contact_message(record: &PropertyRecord) -> String {
    format!("Hi, I'm interested in this property: {}", record.summary())
}

pub fn site_visit_message(record: &PropertyRecord) -> String {
    format!(
        "Hi, I'm interested in booking a site visit for this property: {}. \
         This property is within my budget range. Please let me know the available timings.",
        record.summary()
    )
}

/// Message for the requirements form. Without a listing title the visitor is
/// asking for a custom search.
pub fn requirements_message(listing_title: Option<&str>, budget: &str, purpose: &str) -> String {
    let interest = match listing_title {
        Some(title) => format!("exploring more properties like \"{}\"", title),
        None => "finding properties".to_string(),
    };
    format!(
        "Hi, I'm interested in {}. Here are my requirements:\n\n\
         Budget Range: {}\nPurpose: {}\n\n\
         Please help me find suitable options.",
        interest, budget, purpose
    )
}

pub fn landing_ctas(config: &Config) -> Vec<CallToAction> {
    let phone = &config.contact_phone;
    vec![
        CallToAction {
            title: "Residential Properties",
            blurb: "Looking for homes, apartments, or plots",
            url: whatsapp_url(
                phone,
                "Hi, I'm looking for residential properties. Can you help me find something suitable?",
            ),
        },
        CallToAction {
            title: "Commercial Properties",
            blurb: "Shops, offices, or business spaces",
            url: whatsapp_url(
                phone,
                "Hi, I'm interested in commercial properties. Can you show me available options?",
            ),
        },
        CallToAction {
            title: "Investment Guidance",
            blurb: "Expert advice on property investment",
            url: whatsapp_url(
                phone,
                "Hi, I need help with property investment. Can you guide me?",
            ),
        },
    ]
}
