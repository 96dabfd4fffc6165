//! Static and mostly static pages.

use super::{App, search, ui};
use crate::core::contact::{self, ContactForm};
use crate::core::notice::{Notice, UserFacing};
use anyhow::Result;
use tracing::info;

const USAGE: &str = "Start with `remitscout search <from> <to> <amount>`, \
                     e.g. `remitscout search US MX 500`.\n\
                     List country codes with `remitscout countries`.";

/// The landing page: the last search when there is one, usage otherwise.
pub fn home(app: &App) -> Result<String> {
    let title = ui::style_text(
        "RemitScout: compare money transfer providers",
        ui::StyleType::Title,
    );
    let body = match app.session.search()? {
        Some(query) => format!(
            "Last search: {} from {} to {}\nSee the results with `remitscout providers`.",
            ui::style_text(&query.amount_formatted(), ui::StyleType::Highlight),
            search::country_label(&query.from_country),
            search::country_label(&query.to_country)
        ),
        None => USAGE.to_string(),
    };
    Ok(format!("{title}\n\n{body}"))
}

pub fn contact(form: &ContactForm) -> Result<String> {
    if let Err(e) = contact::validate(form) {
        return Ok(ui::notice(&e.notice()));
    }
    info!(
        email = %form.email.trim(),
        subject = %form.subject,
        "Contact message accepted"
    );
    let sent = Notice::success("Message Sent!")
        .with_description("We'll get back to you as soon as possible.");
    Ok(ui::notice(&sent))
}

const PRIVACY_SECTIONS: &[(&str, &str)] = &[
    (
        "Introduction",
        "RemitScout offers a platform to compare international money transfer options \
         and fees. By using it you agree to the collection and use of information in \
         accordance with this policy.",
    ),
    (
        "Information We Collect",
        "Contact data such as name, email address and phone number when you create an account, \
         and your preferences such as favorite providers and your last search.",
    ),
    (
        "How We Use Information",
        "To provide the comparison service, remember your preferences and keep your \
         account secure.",
    ),
    (
        "Your Rights",
        "You can view and update your profile at any time, and sign out to stop the session.",
    ),
    ("Contact", "Email: support@remitscout.com"),
];

pub fn privacy() -> String {
    let mut out = ui::style_text("Privacy Policy", ui::StyleType::Title);
    for (heading, text) in PRIVACY_SECTIONS {
        out.push_str(&format!(
            "\n\n{}\n{text}",
            ui::style_text(heading, ui::StyleType::Label)
        ));
    }
    out
}

pub fn sign_in_hint() -> String {
    format!(
        "{}\n\nUse `remitscout signin --email <email> --password <password>`.",
        ui::style_text("Sign In", ui::StyleType::Title)
    )
}

pub fn sign_up_hint() -> String {
    format!(
        "{}\n\nUse `remitscout signup --first-name <name> --last-name <name> --email <email> \
         --password <password> --confirm-password <password> --accept-terms`.",
        ui::style_text("Create Account", ui::StyleType::Title)
    )
}

pub fn contact_hint() -> String {
    format!(
        "{}\n\nUse `remitscout contact --name <name> --email <email> --message <text>`.",
        ui::style_text("Contact Us", ui::StyleType::Title)
    )
}

pub fn not_found(path: &str) -> String {
    let message = format!("Nothing lives at `{path}`.");
    format!(
        "{}\n\n{}",
        ui::style_text("404", ui::StyleType::Title),
        ui::style_text(&message, ui::StyleType::Subtle)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact() {
        console::set_colors_enabled(false);
        let mut form = ContactForm {
            name: "Ada".into(),
            email: "ada@example".into(),
            subject: "Rates".into(),
            message: "Hello".into(),
        };
        assert!(contact(&form).unwrap().contains("Invalid email address"));

        form.email = "ada@example.com".into();
        assert!(contact(&form).unwrap().starts_with("✔ Message Sent!"));
    }

    #[test]
    fn test_static_pages() {
        console::set_colors_enabled(false);
        assert!(privacy().starts_with("Privacy Policy"));
        assert!(not_found("/missing").contains("/missing"));
    }
}
