pub mod cli;
pub mod core;
pub mod store;

use crate::core::account::{ProfileForm, SignUpForm};
use crate::core::config::AppConfig;
use crate::core::contact::ContactForm;
use crate::core::payment::{PaymentForm, StatusFilter};
use crate::core::{FilterKey, ProviderId, SortKey};
use anyhow::Result;
use store::Session;
use tracing::{debug, info};

/// Everything the app can be asked to show or do.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Home,
    Countries { from: Option<String> },
    Search {
        from: String,
        to: String,
        amount: String,
    },
    Providers {
        sort: Option<SortKey>,
        filter: Option<FilterKey>,
    },
    Provider { id: ProviderId },
    Favorite { id: ProviderId },
    Favorites,
    Pay {
        id: ProviderId,
        form: Option<PaymentForm>,
    },
    Transactions { status: StatusFilter },
    Profile { update: Option<ProfileForm> },
    SignIn { email: String, password: String },
    SignUp(SignUpForm),
    SignOut,
    Contact(ContactForm),
    Privacy,
    Open { path: String },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("RemitScout starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let session = Session::open(&config.default_data_path()?)?;
    let mut app = cli::App::new(config, session)?;
    let output = app.handle(command)?;
    println!("{output}");
    Ok(())
}
