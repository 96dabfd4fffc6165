use remitscout::AppCommand;
use remitscout::core::account::SignUpForm;
use remitscout::core::payment::{PaymentForm, StatusFilter, TransactionStatus};
use remitscout::core::{FilterKey, SortKey};
use remitscout::store::Session;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use tracing::info;

struct TestEnv {
    data_dir: TempDir,
    config: NamedTempFile,
}

impl TestEnv {
    fn new(extra_yaml: &str) -> Self {
        let data_dir = TempDir::new().unwrap();
        let mut config = NamedTempFile::new().unwrap();
        writeln!(
            config,
            "processing_delay_ms: 0\ndata_path: {}\n{extra_yaml}",
            data_dir.path().display()
        )
        .unwrap();
        Self { data_dir, config }
    }

    fn run(&self, command: AppCommand) {
        info!(?command, "Running command");
        remitscout::run_command(command, self.config.path().to_str()).unwrap();
    }

    fn session(&self) -> Session {
        Session::open(self.data_dir.path()).unwrap()
    }
}

fn sign_up_form() -> SignUpForm {
    SignUpForm {
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        email: "jane@example.com".into(),
        password: "hunter2".into(),
        confirm_password: "hunter2".into(),
        accept_terms: true,
        ..Default::default()
    }
}

#[test_log::test]
fn test_search_is_persisted() {
    let env = TestEnv::new("");
    env.run(AppCommand::Search {
        from: "us".into(),
        to: "mx".into(),
        amount: "500".into(),
    });
    env.run(AppCommand::Providers {
        sort: Some(SortKey::Speed),
        filter: Some(FilterKey::Cash),
    });

    let search = env.session().search().unwrap().unwrap();
    assert_eq!(search.from_country, "US");
    assert_eq!(search.to_currency, "MXN");
    assert_eq!(search.amount, 500.0);
}

#[test_log::test]
fn test_search_over_limit_keeps_previous_search() {
    let env = TestEnv::new("transfer_limit: 1000");
    env.run(AppCommand::Search {
        from: "US".into(),
        to: "IN".into(),
        amount: "900".into(),
    });
    env.run(AppCommand::Search {
        from: "US".into(),
        to: "IN".into(),
        amount: "1000.01".into(),
    });

    let search = env.session().search().unwrap().unwrap();
    assert_eq!(search.amount, 900.0);
}

#[test_log::test]
fn test_sign_up_sign_in_and_pay() {
    let env = TestEnv::new("");
    env.run(AppCommand::SignUp(sign_up_form()));
    env.run(AppCommand::SignIn {
        email: "jane@example.com".into(),
        password: "hunter2".into(),
    });
    env.run(AppCommand::Search {
        from: "CA".into(),
        to: "PH".into(),
        amount: "300".into(),
    });
    env.run(AppCommand::Favorite { id: 4 });
    env.run(AppCommand::Pay {
        id: 4,
        form: Some(PaymentForm {
            recipient_name: "Juan Dela Cruz".into(),
            amount: "300".into(),
            payment_method: "bank".into(),
            ..Default::default()
        }),
    });
    env.run(AppCommand::Transactions {
        status: StatusFilter::Only(TransactionStatus::Processing),
    });

    let session = env.session();
    assert!(session.is_authenticated().unwrap());
    assert_eq!(session.favorite_ids().unwrap(), vec![4]);

    let transactions = session.transactions().unwrap();
    assert_eq!(transactions.len(), 4);
    let last = &transactions[3];
    assert_eq!(last.id, "4");
    assert_eq!(last.provider, "Wise");
    assert_eq!(last.recipient, "Juan Dela Cruz");
    assert_eq!(last.destination, "Philippines");
    assert_eq!(last.status, TransactionStatus::Processing);
}

#[test_log::test]
fn test_protected_commands_do_nothing_when_signed_out() {
    let env = TestEnv::new("");
    env.run(AppCommand::Pay {
        id: 1,
        form: Some(PaymentForm {
            sender_name: "Someone".into(),
            recipient_name: "Someone Else".into(),
            amount: "10".into(),
            payment_method: "card".into(),
            ..Default::default()
        }),
    });
    env.run(AppCommand::Favorite { id: 2 });
    env.run(AppCommand::SignOut);

    let session = env.session();
    assert!(!session.is_authenticated().unwrap());
    assert_eq!(session.transactions().unwrap().len(), 3);
    assert!(session.favorite_ids().unwrap().is_empty());
}

#[test_log::test]
fn test_custom_catalog_from_config() {
    let env = TestEnv::new(
        r#"
providers:
  - id: 10
    name: LocalCash
    fee: 1.0
    exchange_rate: 0.97
    estimated_time: Same day
    payment_mode: cash
    sending_from: US
    sending_to: MX
"#,
    );
    env.run(AppCommand::SignUp(sign_up_form()));
    env.run(AppCommand::SignIn {
        email: "jane@example.com".into(),
        password: "hunter2".into(),
    });
    env.run(AppCommand::Favorite { id: 10 });
    env.run(AppCommand::Favorite { id: 1 });
    env.run(AppCommand::Open {
        path: "/provider/10".into(),
    });

    assert_eq!(env.session().favorite_ids().unwrap(), vec![10]);
}

#[test_log::test]
fn test_invalid_config_is_an_error() {
    let env = TestEnv::new("transfer_limit: -5");
    let result = remitscout::run_command(AppCommand::Privacy, env.config.path().to_str());
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("transfer_limit must be a positive number"));
}
