use crate::config::Config;
use crate::fetcher::FetchState;
use crate::formatter::Formatter;
use crate::links;
use crate::models::property::PropertyRecord;

pub fn render_page(state: &FetchState, config: &Config) -> String {
    match state {
        FetchState::Pending => "Loading property details...".to_string(),
        FetchState::Failed(message) => format_error(message),
        FetchState::Empty => format_landing_page(config),
        FetchState::Succeeded(record) => format_property_card(record, config),
    }
}

fn format_error(message: &str) -> String {
    format!(
        "Oops! Something went wrong\n {} \n Run again to retry.",
        message
    )
}

pub fn format_landing_page(config: &Config) -> String {
    let ctas: Vec<String> = links::landing_ctas(config)
        .iter()
        .enumerate()
        .map(|(index, cta)| {
            format!(
                "{}: {} \n {} \n Url: {}",
                index + 1,
                cta.title,
                cta.blurb,
                cta.url
            )
        })
        .collect();

    let custom_search = links::whatsapp_url(
        &config.contact_phone,
        &links::requirements_message(None, "", ""),
    );

    format!(
        "{}\n Unable to find what you are exactly looking for? \n Please choose from the options below.\n\n{}\n\n Find Property as per my requirement: {}",
        config.brand_name,
        ctas.join("\n"),
        custom_search
    )
}

pub fn format_property_card(record: &PropertyRecord, config: &Config) -> String {
    let formatter = Formatter::from_config(config);

    let mut lines: Vec<String> = vec![
        record.display_title(),
        format!(" Type: {}", record.property_type),
        format!(" Location: {}", record.location_label(&config.city)),
        format!(
            " Price Range: {}",
            formatter.format_price(&record.price_min, &record.price_max)
        ),
        format!(
            " Size: {}",
            formatter.format_size(&record.size_min, &record.size_max)
        ),
    ];

    if let Some(description) = record.description() {
        lines.push(format!(" {}", description));
    }

    lines.push(format!(
        " Map: {}",
        links::maps_search_url(&record.area, &config.city)
    ));
    lines.push(format!(
        " Book Site Visit: {}",
        links::whatsapp_url(&config.contact_phone, &links::site_visit_message(record))
    ));
    lines.push(format!(
        " Contact: {}",
        links::whatsapp_url(&config.contact_phone, &links::contact_message(record))
    ));
    lines.push(format!(
        " Explore More Properties: {}",
        links::whatsapp_url(
            &config.contact_phone,
            &links::requirements_message(Some(record.display_title().as_str()), "", "")
        )
    ));
    lines.push(format!(" Call: {}", links::call_url(&config.contact_phone)));
    lines.push(format!(
        " Chat with us: {}",
        links::whatsapp_url(&config.contact_phone, "")
    ));
    lines.push(format!(" Stay Updated: {}", config.whatsapp_channel_url));

    lines.join("\n")
}
