use super::{App, search, ui};
use crate::core::currency;
use crate::core::notice::Notice;
use crate::core::provider::{Provider, ProviderId};
use crate::core::quote::{self, SearchQuery};
use crate::core::ranking::{self, FilterKey, SortKey};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

fn provider_not_found(id: ProviderId) -> String {
    let notice = Notice::error("Provider not found")
        .with_description(format!("No provider with id {id}"));
    ui::notice(&notice)
}

fn star(provider: &Provider) -> &'static str {
    if provider.is_favorite { "★" } else { "☆" }
}

fn providers_table(providers: &[&Provider], query: Option<&SearchQuery>) -> String {
    let mut table = ui::new_styled_table();
    let mut header = vec![
        ui::header_cell("ID"),
        ui::header_cell("Provider"),
        ui::header_cell("Fee"),
        ui::header_cell("Rate"),
        ui::header_cell("Delivery"),
        ui::header_cell("Method"),
    ];
    if query.is_some() {
        header.push(ui::header_cell("They Receive"));
        header.push(ui::header_cell("Total Cost"));
    }
    header.push(ui::header_cell("Fav"));
    table.set_header(header);

    let best_rate = providers
        .iter()
        .map(|p| p.exchange_rate)
        .fold(f64::MIN, f64::max);
    let lowest_fee = providers.iter().map(|p| p.fee).fold(f64::MAX, f64::min);

    for provider in providers {
        let fee = format!("{:.2}", provider.fee);
        let fee = if provider.fee == lowest_fee {
            ui::best_cell(fee)
        } else {
            ui::number_cell(fee)
        };
        let rate = format!("{:.2}", provider.exchange_rate);
        let rate = if provider.exchange_rate == best_rate {
            ui::best_cell(rate)
        } else {
            ui::number_cell(rate)
        };
        let mut row = vec![
            Cell::new(provider.id),
            Cell::new(&provider.name),
            fee,
            rate,
            Cell::new(&provider.estimated_time),
            Cell::new(provider.payment_mode),
        ];
        if let Some(query) = query {
            let q = quote::quote(provider, query);
            row.push(ui::number_cell(q.received_formatted(query)));
            row.push(ui::number_cell(q.total_cost_formatted(query)));
        }
        row.push(Cell::new(star(provider)));
        table.add_row(row);
    }
    table.to_string()
}

/// The ranked provider list, narrowed to the stored search route.
pub fn list(app: &App, sort: Option<SortKey>, filter: Option<FilterKey>) -> Result<String> {
    let sort = sort.unwrap_or(app.config.default_sort);
    let filter = filter.unwrap_or(app.config.default_filter);
    let query = app.session.search()?;

    let ranked = ranking::rank(app.providers.list(), sort, filter);
    let route = query.as_ref().map(SearchQuery::route);
    let ranked = ranking::filter_by_route(ranked, route.as_ref());

    let mut output = String::new();
    if let Some(query) = &query {
        output.push_str(&format!(
            "{} {} → {} {}\n",
            currency::flag(&query.from_country),
            query.from_currency,
            currency::flag(&query.to_country),
            query.to_currency,
        ));
    }
    output.push_str(&format!(
        "{} ({sort}, {filter})\n\n",
        ui::style_text("Transfer Providers", ui::StyleType::Title)
    ));

    if ranked.is_empty() {
        output.push_str(&ui::style_text(
            "No providers match the selected payment method.",
            ui::StyleType::Subtle,
        ));
        return Ok(output);
    }
    output.push_str(&providers_table(&ranked, query.as_ref()));
    Ok(output)
}

pub fn detail(app: &App, id: ProviderId) -> Result<String> {
    let Some(provider) = app.providers.find(id) else {
        return Ok(provider_not_found(id));
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Detail"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Fee"),
        ui::number_cell(format!("{:.2}", provider.fee)),
    ]);
    table.add_row(vec![
        Cell::new("Exchange rate"),
        ui::number_cell(format!("{:.2}", provider.exchange_rate)),
    ]);
    table.add_row(vec![Cell::new("Delivery"), Cell::new(&provider.estimated_time)]);
    table.add_row(vec![Cell::new("Method"), Cell::new(provider.payment_mode)]);
    table.add_row(vec![
        Cell::new("Website"),
        ui::format_optional_cell(provider.website.as_deref(), str::to_string),
    ]);

    if let Some(query) = app.session.search()? {
        let q = quote::quote(provider, &query);
        table.add_row(vec![
            Cell::new("You send"),
            ui::number_cell(query.amount_formatted()),
        ]);
        table.add_row(vec![
            Cell::new("They receive"),
            ui::best_cell(q.received_formatted(&query)),
        ]);
        table.add_row(vec![
            Cell::new("Total cost"),
            ui::number_cell(q.total_cost_formatted(&query)),
        ]);
        if let Some(usd) = q.usd_equivalent_formatted() {
            table.add_row(vec![Cell::new("In USD"), ui::number_cell(usd)]);
        }
        table.add_row(vec![
            Cell::new("Route"),
            Cell::new(format!(
                "{} → {}",
                search::country_label(&query.from_country),
                search::country_label(&query.to_country)
            )),
        ]);
    }

    Ok(format!(
        "{} {}\n\n{table}",
        ui::style_text(&provider.name, ui::StyleType::Title),
        star(provider)
    ))
}

pub fn toggle_favorite(app: &mut App, id: ProviderId) -> Result<String> {
    if app.providers.find(id).is_none() {
        return Ok(provider_not_found(id));
    }
    app.providers.toggle_favorite(id);
    app.session.set_favorite_ids(&app.providers.favorite_ids())?;

    let now_favorite = app.providers.find(id).is_some_and(|p| p.is_favorite);
    info!(id, now_favorite, "Favorite toggled");
    let notice = if now_favorite {
        Notice::success("Added to favorites")
    } else {
        Notice::info("Removed from favorites")
    };
    Ok(ui::notice(&notice))
}

pub fn favorites(app: &App) -> Result<String> {
    let favorites = app.providers.favorites();
    let title = ui::style_text("Saved Providers", ui::StyleType::Title);
    if favorites.is_empty() {
        let hint = ui::style_text(
            "No favorites yet. Mark a provider with `remitscout favorite <id>`.",
            ui::StyleType::Subtle,
        );
        return Ok(format!("{title}\n\n{hint}"));
    }
    let query = app.session.search()?;
    let table = providers_table(&favorites, query.as_ref());
    Ok(format!("{title}\n\n{table}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::core::quote::DEFAULT_TRANSFER_LIMIT;
    use crate::store::Session;

    fn app() -> App {
        console::set_colors_enabled(false);
        App::new(AppConfig::default(), Session::in_memory()).unwrap()
    }

    fn row_order(output: &str, names: &[&str]) -> Vec<usize> {
        names.iter().map(|n| output.find(n).unwrap()).collect()
    }

    #[test]
    fn test_list_sorted_by_fee() {
        let app = app();
        let out = list(&app, Some(SortKey::Fee), None).unwrap();
        let pos = row_order(&out, &["Western Union", "MoneyGram", "WorldRemit", "Wise"]);
        assert!(pos.windows(2).all(|w| w[0] < w[1]), "{out}");
    }

    #[test]
    fn test_list_with_filter() {
        let app = app();
        let out = list(&app, None, Some(FilterKey::Cash)).unwrap();
        assert!(out.contains("MoneyGram"));
        assert!(!out.contains("Remitly"));
    }

    #[test]
    fn test_list_with_search_shows_quotes() {
        let app = app();
        let query = SearchQuery::new("US", "MX", "100", DEFAULT_TRANSFER_LIMIT).unwrap();
        app.session.set_search(&query).unwrap();
        let out = list(&app, None, None).unwrap();
        assert!(out.contains("They Receive"));
        assert!(out.contains("MX$105.00"));
        assert!(out.contains("$103.99"));
    }

    #[test]
    fn test_toggle_and_favorites_view() {
        let mut app = app();
        let out = toggle_favorite(&mut app, 3).unwrap();
        assert!(out.contains("Added to favorites"));
        let out = favorites(&app).unwrap();
        assert!(out.contains("Xe"));
        assert!(!out.contains("Wise"));
        assert_eq!(app.session.favorite_ids().unwrap(), vec![3]);

        let out = toggle_favorite(&mut app, 3).unwrap();
        assert!(out.contains("Removed from favorites"));
        assert!(favorites(&app).unwrap().contains("No favorites yet"));
    }

    #[test]
    fn test_unknown_provider() {
        let mut app = app();
        assert!(detail(&app, 99).unwrap().contains("Provider not found"));
        let out = toggle_favorite(&mut app, 99).unwrap();
        assert!(out.contains("Provider not found"));
    }
}
