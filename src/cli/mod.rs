//! Terminal front end. Each command maps onto one view of the app and
//! renders to a string.

pub mod account;
pub mod pages;
pub mod payment;
pub mod providers;
pub mod search;
pub mod setup;
pub mod ui;

use crate::AppCommand;
use crate::core::ProviderStore;
use crate::core::account::AccountError;
use crate::core::config::AppConfig;
use crate::core::notice::UserFacing;
use crate::core::payment::StatusFilter;
use crate::core::view::View;
use crate::store::Session;
use anyhow::Result;
use tracing::debug;

/// State shared by every view: configuration, the persisted session and the
/// provider catalog.
pub struct App {
    pub config: AppConfig,
    pub session: Session,
    pub providers: ProviderStore,
}

impl App {
    pub fn new(config: AppConfig, session: Session) -> Result<Self> {
        let mut providers = ProviderStore::new(config.catalog());
        providers.restore_favorites(&session.favorite_ids()?);
        debug!(
            count = providers.list().len(),
            favorites = providers.favorite_ids().len(),
            "Loaded provider catalog"
        );
        Ok(Self {
            config,
            session,
            providers,
        })
    }

    /// Runs `command` and returns what should be shown to the user. Domain
    /// failures are rendered as notices; only storage problems are errors.
    pub fn handle(&mut self, command: AppCommand) -> Result<String> {
        let view = target_view(&command);
        if view.guard(self.session.is_authenticated()?) != view {
            return Ok(ui::notice(&AccountError::NotSignedIn.notice()));
        }

        match command {
            AppCommand::Home => pages::home(self),
            AppCommand::Countries { from } => search::countries(from.as_deref()),
            AppCommand::Search { from, to, amount } => search::search(self, &from, &to, &amount),
            AppCommand::Providers { sort, filter } => providers::list(self, sort, filter),
            AppCommand::Provider { id } => providers::detail(self, id),
            AppCommand::Favorite { id } => providers::toggle_favorite(self, id),
            AppCommand::Favorites => providers::favorites(self),
            AppCommand::Pay { id, form } => match form {
                Some(form) => payment::pay(self, id, form),
                None => payment::summary(self, id),
            },
            AppCommand::Transactions { status } => payment::transactions(self, status),
            AppCommand::Profile { update } => account::profile(self, update),
            AppCommand::SignIn { email, password } => account::sign_in(self, &email, &password),
            AppCommand::SignUp(form) => account::sign_up(self, form),
            AppCommand::SignOut => account::sign_out(self),
            AppCommand::Contact(form) => pages::contact(&form),
            AppCommand::Privacy => Ok(pages::privacy()),
            AppCommand::Open { path } => self.open(&path),
        }
    }

    /// Shows the view a path points at, with default inputs.
    fn open(&mut self, path: &str) -> Result<String> {
        let command = match View::resolve(path) {
            View::Home => AppCommand::Home,
            View::Providers => AppCommand::Providers {
                sort: None,
                filter: None,
            },
            View::ProviderDetail(id) => AppCommand::Provider { id },
            View::Payment(id) => AppCommand::Pay { id, form: None },
            View::Favorites => AppCommand::Favorites,
            View::Transactions => AppCommand::Transactions {
                status: StatusFilter::All,
            },
            View::Profile => AppCommand::Profile { update: None },
            View::SignIn => return Ok(pages::sign_in_hint()),
            View::SignUp => return Ok(pages::sign_up_hint()),
            View::Contact => return Ok(pages::contact_hint()),
            View::Privacy => AppCommand::Privacy,
            View::NotFound => return Ok(pages::not_found(path)),
        };
        self.handle(command)
    }
}

fn target_view(command: &AppCommand) -> View {
    match command {
        AppCommand::Home | AppCommand::Countries { .. } | AppCommand::Search { .. } => View::Home,
        AppCommand::Providers { .. } => View::Providers,
        AppCommand::Provider { id } => View::ProviderDetail(*id),
        AppCommand::Favorite { .. } | AppCommand::Favorites => View::Favorites,
        AppCommand::Pay { id, .. } => View::Payment(*id),
        AppCommand::Transactions { .. } => View::Transactions,
        AppCommand::Profile { .. } => View::Profile,
        AppCommand::SignIn { .. } | AppCommand::SignOut => View::SignIn,
        AppCommand::SignUp(_) => View::SignUp,
        AppCommand::Contact(_) => View::Contact,
        AppCommand::Privacy => View::Privacy,
        AppCommand::Open { .. } => View::Home,
    }
}
