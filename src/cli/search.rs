use super::{App, providers, ui};
use crate::core::currency::{self, Country};
use crate::core::notice::{Notice, UserFacing};
use crate::core::quote::SearchQuery;
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

/// Validates and stores a new search, then shows the ranked providers for it.
pub fn search(app: &mut App, from: &str, to: &str, amount: &str) -> Result<String> {
    let query = match SearchQuery::new(from, to, amount, app.config.transfer_limit) {
        Ok(query) => query,
        Err(e) => return Ok(ui::notice(&e.notice())),
    };
    app.session.set_search(&query)?;
    info!(
        from = %query.from_country,
        to = %query.to_country,
        amount = query.amount,
        "Search saved"
    );

    let mut output = ui::notice(&Notice::info(format!(
        "Comparing {} from {} to {}",
        query.amount_formatted(),
        country_label(&query.from_country),
        country_label(&query.to_country)
    )));
    if let Some(usd) = query.usd_equivalent() {
        output.push_str(&format!(
            "\n  ≈ {}",
            currency::format_money(usd, currency::REFERENCE_CURRENCY)
        ));
    }
    output.push_str("\n\n");
    output.push_str(&providers::list(app, None, None)?);
    Ok(output)
}

pub fn country_label(code: &str) -> String {
    match currency::country(code) {
        Some(c) => format!("{} {}", currency::flag(c.code), c.name),
        None => format!("{} {}", currency::flag(code), code),
    }
}

/// Supported countries, or the possible destinations when `from` is given.
pub fn countries(from: Option<&str>) -> Result<String> {
    let list: Vec<&Country> = match from {
        Some(from) => currency::destinations(from).collect(),
        None => currency::countries().iter().collect(),
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Region"),
        ui::header_cell("Currency"),
        ui::header_cell("1 unit in USD"),
    ]);
    for c in list {
        table.add_row(vec![
            Cell::new(c.code),
            Cell::new(format!("{} {}", currency::flag(c.code), c.name)),
            Cell::new(c.region),
            Cell::new(format!("{} ({})", c.currency.code, c.currency.symbol)),
            ui::number_cell(format!("{}", currency::rate_to_reference(c.currency.code))),
        ]);
    }

    let title = match from {
        Some(from) => format!("Destinations from {}", from.to_ascii_uppercase()),
        None => "Supported countries".to_string(),
    };
    Ok(format!(
        "{}\n\n{table}",
        ui::style_text(&title, ui::StyleType::Title)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::store::Session;

    fn app() -> App {
        console::set_colors_enabled(false);
        App::new(AppConfig::default(), Session::in_memory()).unwrap()
    }

    #[test]
    fn test_search_saves_query() {
        let mut app = app();
        let out = search(&mut app, "GB", "IN", "100").unwrap();
        assert!(out.contains("Comparing £100.00"));
        assert!(out.contains("≈ $127.00"));
        let saved = app.session.search().unwrap().unwrap();
        assert_eq!(saved.to_currency, "INR");
    }

    #[test]
    fn test_search_over_limit_is_rejected() {
        let mut app = app();
        let out = search(&mut app, "US", "MX", "10000.01").unwrap();
        assert!(out.contains("Amount Exceeds Limit"));
        assert!(out.contains("$10,000.00"));
        assert!(app.session.search().unwrap().is_none());
    }

    #[test]
    fn test_countries() {
        let out = countries(Some("US")).unwrap();
        assert!(out.contains("Mexico"));
        assert!(!out.contains("United States"));
        assert!(countries(None).unwrap().contains("United States"));
    }
}
