use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use remitscout::core::account::{ProfileForm, SignUpForm};
use remitscout::core::contact::ContactForm;
use remitscout::core::log::init_logging;
use remitscout::core::payment::{PaymentForm, StatusFilter};
use remitscout::core::{FilterKey, ProviderId, SortKey};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct PayArgs {
    /// Sender name, defaults to the signed-in user
    #[arg(long, default_value = "")]
    sender: String,
    /// Sender email, defaults to the signed-in user
    #[arg(long, default_value = "")]
    sender_email: String,
    #[arg(long, default_value = "")]
    recipient: String,
    #[arg(long, default_value = "")]
    recipient_phone: String,
    #[arg(long, default_value = "")]
    recipient_address: String,
    #[arg(long, default_value = "")]
    amount: String,
    /// How the transfer is funded, e.g. card or bank
    #[arg(long, default_value = "")]
    method: String,
    #[arg(long, default_value = "")]
    card_number: String,
    #[arg(long, default_value = "")]
    expiry_date: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

impl From<PayArgs> for PaymentForm {
    fn from(args: PayArgs) -> Self {
        PaymentForm {
            sender_name: args.sender,
            sender_email: args.sender_email,
            recipient_name: args.recipient,
            recipient_phone: args.recipient_phone,
            recipient_address: args.recipient_address,
            amount: args.amount,
            payment_method: args.method,
            card_number: args.card_number,
            expiry_date: args.expiry_date,
            cvv: args.cvv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported countries, or destinations from one country
    Countries {
        #[arg(long)]
        from: Option<String>,
    },
    /// Compare providers for sending an amount between two countries
    Search {
        /// Source country code, e.g. US
        from: String,
        /// Destination country code, e.g. MX
        to: String,
        amount: String,
    },
    /// List providers
    Providers {
        /// rate, fee or speed
        #[arg(short, long)]
        sort: Option<SortKey>,
        /// all, bank or cash
        #[arg(short, long)]
        filter: Option<FilterKey>,
    },
    /// Show one provider
    Provider { id: ProviderId },
    /// Add or remove a provider from favorites
    Favorite { id: ProviderId },
    /// Show favorite providers
    Favorites,
    /// Show the payment page for a provider, or submit a transfer
    Pay {
        id: ProviderId,
        /// Submit the transfer instead of showing the summary
        #[arg(long)]
        submit: bool,
        #[command(flatten)]
        form: PayArgs,
    },
    /// Show transaction history
    Transactions {
        /// all, completed or processing
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show or edit the signed-in user's profile
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Sign in
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        accept_terms: bool,
    },
    /// Sign out
    Signout,
    /// Send a message to support
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Show the privacy policy
    Privacy,
    /// Open a view by path, e.g. /provider/4
    Open { path: String },
}

impl From<Commands> for remitscout::AppCommand {
    fn from(cmd: Commands) -> remitscout::AppCommand {
        use remitscout::AppCommand;
        match cmd {
            Commands::Countries { from } => AppCommand::Countries { from },
            Commands::Search { from, to, amount } => AppCommand::Search { from, to, amount },
            Commands::Providers { sort, filter } => AppCommand::Providers { sort, filter },
            Commands::Provider { id } => AppCommand::Provider { id },
            Commands::Favorite { id } => AppCommand::Favorite { id },
            Commands::Favorites => AppCommand::Favorites,
            Commands::Pay { id, submit, form } => AppCommand::Pay {
                id,
                form: submit.then(|| form.into()),
            },
            Commands::Transactions { status } => AppCommand::Transactions { status },
            Commands::Profile {
                first_name,
                last_name,
                email,
                phone,
                address,
            } => {
                let form = ProfileForm {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                };
                let is_edit = form.first_name.is_some()
                    || form.last_name.is_some()
                    || form.email.is_some()
                    || form.phone.is_some()
                    || form.address.is_some();
                AppCommand::Profile {
                    update: is_edit.then_some(form),
                }
            }
            Commands::Signin { email, password } => AppCommand::SignIn { email, password },
            Commands::Signup {
                first_name,
                last_name,
                email,
                phone,
                address,
                password,
                confirm_password,
                accept_terms,
            } => AppCommand::SignUp(SignUpForm {
                first_name,
                last_name,
                email,
                phone,
                address,
                password,
                confirm_password,
                accept_terms,
            }),
            Commands::Signout => AppCommand::SignOut,
            Commands::Contact {
                name,
                email,
                subject,
                message,
            } => AppCommand::Contact(ContactForm {
                name,
                email,
                subject,
                message,
            }),
            Commands::Privacy => AppCommand::Privacy,
            Commands::Open { path } => AppCommand::Open { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => remitscout::cli::setup::setup(),
        Some(cmd) => remitscout::run_command(cmd.into(), cli.config_path.as_deref()),
        None => remitscout::run_command(remitscout::AppCommand::Home, cli.config_path.as_deref()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pay_submit_builds_form() {
        let args = "remitscout pay 4 --submit --recipient Jane --amount 50 --method card";
        let cli = Cli::parse_from(args.split(' '));
        let Some(cmd) = cli.command else {
            panic!("missing command")
        };
        let remitscout::AppCommand::Pay { id, form } = remitscout::AppCommand::from(cmd) else {
            panic!("expected a payment")
        };
        assert_eq!(id, 4);
        let form = form.unwrap();
        assert_eq!(form.recipient_name, "Jane");
        assert_eq!(form.payment_method, "card");
    }
}
