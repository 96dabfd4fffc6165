use super::{App, ui};
use crate::core::account::{self, AccountError, ProfileForm, SignUpForm, User};
use crate::core::notice::{Notice, UserFacing};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub fn sign_in(app: &mut App, email: &str, password: &str) -> Result<String> {
    let users = app.session.users()?;
    let user = match account::authenticate(&users, email.trim(), password) {
        Ok(user) => user,
        Err(e) => return Ok(ui::notice(&e.notice())),
    };
    app.session.sign_in(user)?;
    let welcome = Notice::success("Welcome back!")
        .with_description(format!("Signed in as {}", user.full_name()));
    Ok(ui::notice(&welcome))
}

pub fn sign_up(app: &mut App, form: SignUpForm) -> Result<String> {
    let mut users = app.session.users()?;
    let user = match account::register(&users, form) {
        Ok(user) => user,
        Err(e) => return Ok(ui::notice(&e.notice())),
    };
    info!(email = %user.email, "Account created");
    users.push(user);
    app.session.set_users(&users)?;
    Ok(ui::notice(
        &Notice::success("Account created successfully")
            .with_description("You can now sign in with your credentials"),
    ))
}

pub fn sign_out(app: &mut App) -> Result<String> {
    if !app.session.is_authenticated()? {
        return Ok(ui::notice(&Notice::info("You are not signed in")));
    }
    app.session.sign_out()?;
    Ok(ui::notice(&Notice::info("Signed out")))
}

fn or_na(v: &str) -> &str {
    if v.is_empty() { "N/A" } else { v }
}

fn profile_table(user: &User) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    table.add_row(vec![Cell::new("Name"), Cell::new(user.full_name())]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(or_na(&user.phone))]);
    table.add_row(vec![Cell::new("Address"), Cell::new(or_na(&user.address))]);
    table.to_string()
}

/// Shows the signed-in user, or applies `update` and saves it both as the
/// current user and in the registered accounts.
pub fn profile(app: &mut App, update: Option<ProfileForm>) -> Result<String> {
    let Some(user) = app.session.current_user()? else {
        return Ok(ui::notice(&AccountError::NotSignedIn.notice()));
    };
    let title = ui::style_text("My Profile", ui::StyleType::Title);

    let Some(form) = update else {
        return Ok(format!("{title}\n\n{}", profile_table(&user)));
    };
    let mut users = app.session.users()?;
    let updated = match account::update_profile(&users, &user, form) {
        Ok(updated) => updated,
        Err(e) => return Ok(ui::notice(&e.notice())),
    };

    if let Some(stored) = users.iter_mut().find(|u| u.email == user.email) {
        *stored = updated.clone();
    }
    app.session.set_users(&users)?;
    app.session.sign_in(&updated)?;
    info!(email = %updated.email, "Profile updated");

    Ok(format!(
        "{}\n\n{title}\n\n{}",
        ui::notice(&Notice::success("Profile updated")),
        profile_table(&updated)
    ))
}
