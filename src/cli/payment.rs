use super::{App, ui};
use crate::core::currency;
use crate::core::notice::{Notice, UserFacing};
use crate::core::payment::{self, PaymentForm, StatusFilter, TransactionStatus};
use crate::core::provider::ProviderId;
use anyhow::Result;
use comfy_table::{Cell, Color};
use std::thread;
use std::time::Duration;

fn provider_not_found(id: ProviderId) -> String {
    let notice = Notice::error("Provider not found")
        .with_description(format!("No provider with id {id}"));
    ui::notice(&notice)
}

/// The payment page before submission: provider terms and the sender details
/// that will be used.
pub fn summary(app: &App, id: ProviderId) -> Result<String> {
    let Some(provider) = app.providers.find(id) else {
        return Ok(provider_not_found(id));
    };
    let user = app.session.current_user()?;
    let form = PaymentForm::default().prefill_sender(user.as_ref());
    let query = app.session.search()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Transfer"), ui::header_cell("")]);
    table.add_row(vec![Cell::new("Provider"), Cell::new(&provider.name)]);
    table.add_row(vec![
        Cell::new("Fee"),
        ui::number_cell(format!("{:.2}", provider.fee)),
    ]);
    table.add_row(vec![
        Cell::new("Exchange rate"),
        ui::number_cell(format!("{:.2}", provider.exchange_rate)),
    ]);
    table.add_row(vec![Cell::new("Delivery"), Cell::new(&provider.estimated_time)]);
    if let Some(query) = &query {
        table.add_row(vec![
            Cell::new("Amount"),
            ui::number_cell(query.amount_formatted()),
        ]);
        table.add_row(vec![
            Cell::new("Destination"),
            Cell::new(destination(Some(&query.to_country))),
        ]);
    }
    table.add_row(vec![Cell::new("Sender"), Cell::new(&form.sender_name)]);
    table.add_row(vec![Cell::new("Sender email"), Cell::new(&form.sender_email)]);

    let title = format!("Send money with {}", provider.name);
    let hint = format!(
        "Submit with `remitscout pay {id} --submit \
         --recipient <name> --amount <amount> --method <method>`"
    );
    Ok(format!(
        "{}\n\n{table}\n\n{}",
        ui::style_text(&title, ui::StyleType::Title),
        ui::style_text(&hint, ui::StyleType::Subtle)
    ))
}

fn destination(country_code: Option<&str>) -> String {
    country_code
        .and_then(currency::country)
        .map_or_else(|| "Unknown".to_string(), |c| c.name.to_string())
}

/// Submits the transfer and records it as `processing`.
pub fn pay(app: &mut App, id: ProviderId, form: PaymentForm) -> Result<String> {
    let Some(provider) = app.providers.find(id) else {
        return Ok(provider_not_found(id));
    };
    let user = app.session.current_user()?;
    let form = form.prefill_sender(user.as_ref());
    let query = app.session.search()?;
    let destination = destination(query.as_ref().map(|q| q.to_country.as_str()));
    let history = app.session.transactions()?;

    let today = chrono::Local::now().date_naive();
    let prepared = payment::prepare_transfer(provider, &form, &destination, today, &history);
    let transaction = match prepared {
        Ok(transaction) => transaction,
        Err(e) => return Ok(ui::notice(&e.notice())),
    };

    if app.config.processing_delay_ms > 0 {
        let spinner = ui::new_spinner("Processing payment...");
        thread::sleep(Duration::from_millis(app.config.processing_delay_ms));
        spinner.finish_and_clear();
    }
    let id = transaction.id.clone();
    app.session.record_transfer(transaction)?;

    Ok(ui::notice(
        &Notice::success("Transfer initiated successfully!")
            .with_description(format!("Transaction #{id} is now processing")),
    ))
}

pub fn transactions(app: &App, status: StatusFilter) -> Result<String> {
    let all = app.session.transactions()?;
    let shown = payment::filter_transactions(&all, status);
    let title = ui::style_text("Transaction History", ui::StyleType::Title);
    if shown.is_empty() {
        return Ok(format!(
            "{title}\n\n{}",
            ui::style_text("No transactions found.", ui::StyleType::Subtle)
        ));
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Date"),
        ui::header_cell("Provider"),
        ui::header_cell("Recipient"),
        ui::header_cell("Destination"),
        ui::header_cell("Amount"),
        ui::header_cell("Fee"),
        ui::header_cell("Rate"),
        ui::header_cell("Status"),
    ]);
    for t in shown {
        let status = match t.status {
            TransactionStatus::Completed => Cell::new(t.status).fg(Color::Green),
            TransactionStatus::Processing => Cell::new(t.status).fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(t.date.format("%b %d, %Y")),
            Cell::new(&t.provider),
            Cell::new(&t.recipient),
            Cell::new(&t.destination),
            ui::number_cell(format!("{:.2}", t.amount)),
            ui::number_cell(format!("{:.2}", t.fee)),
            ui::number_cell(format!("{:.2}", t.exchange_rate)),
            status,
        ]);
    }
    Ok(format!("{title}\n\n{table}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account::User;
    use crate::core::config::AppConfig;
    use crate::core::quote::{DEFAULT_TRANSFER_LIMIT, SearchQuery};
    use crate::store::Session;

    fn signed_in_app() -> App {
        console::set_colors_enabled(false);
        let config = AppConfig {
            processing_delay_ms: 0,
            ..Default::default()
        };
        let app = App::new(config, Session::in_memory()).unwrap();
        app.session
            .sign_in(&User {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                phone: String::new(),
                address: String::new(),
                password: "engine".into(),
            })
            .unwrap();
        app
    }

    fn form() -> PaymentForm {
        PaymentForm {
            recipient_name: "Charles Babbage".into(),
            amount: "250".into(),
            payment_method: "card".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_prefills_sender() {
        let app = signed_in_app();
        let out = summary(&app, 4).unwrap();
        assert!(out.contains("Send money with Wise"));
        assert!(out.contains("Ada Lovelace"));
        assert!(out.contains("ada@example.com"));
    }

    #[test]
    fn test_pay_records_processing_transfer() {
        let mut app = signed_in_app();
        let query = SearchQuery::new("US", "PH", "250", DEFAULT_TRANSFER_LIMIT).unwrap();
        app.session.set_search(&query).unwrap();

        let out = pay(&mut app, 1, form()).unwrap();
        assert!(out.contains("Transfer initiated successfully!"));
        assert!(out.contains("#4"));

        let all = app.session.transactions().unwrap();
        let last = all.last().unwrap();
        assert_eq!(last.provider, "WorldRemit");
        assert_eq!(last.destination, "Philippines");
        assert_eq!(last.status, TransactionStatus::Processing);

        let only = StatusFilter::Only(TransactionStatus::Processing);
        let processing = transactions(&app, only).unwrap();
        assert!(processing.contains("Charles Babbage"));
        assert!(processing.contains("Jane Smith"));
        assert!(!processing.contains("John Doe"));
    }

    #[test]
    fn test_pay_rejects_incomplete_form() {
        let mut app = signed_in_app();
        let out = pay(
            &mut app,
            1,
            PaymentForm {
                amount: "abc".into(),
                ..form()
            },
        )
        .unwrap();
        assert!(out.contains("Invalid amount"));

        let out = pay(
            &mut app,
            1,
            PaymentForm {
                recipient_name: String::new(),
                ..form()
            },
        )
        .unwrap();
        assert!(out.contains("Please fill all required fields"));
        assert_eq!(app.session.transactions().unwrap().len(), 3);
    }

    #[test]
    fn test_pay_without_search_has_unknown_destination() {
        let mut app = signed_in_app();
        pay(&mut app, 6, form()).unwrap();
        let all = app.session.transactions().unwrap();
        assert_eq!(all[3].destination, "Unknown");
    }
}
