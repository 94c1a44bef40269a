use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuestionBank;
use services::{AppServices, Clock, Decision, HistoryService, QuizController};
use storage::bank::{load_bank, parse_bank};
use tracing::info;
use ui::{App, UiApp, build_app_context};

mod cli;
mod console;

use cli::{Cli, Command, normalize_sqlite_url, prepare_sqlite_file};
use console::{ConsolePresenter, StdinConfirm};

const SAMPLE_BANK: &str = include_str!("../assets/questions.json");

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn history(&self) -> Arc<HistoryService> {
        self.services.history()
    }

    fn quiz_controller(&self) -> QuizController {
        self.services.controller()
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("app=info".parse()?)
        .add_directive("services=info".parse()?)
        .add_directive("storage=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn read_bank(cli: &Cli) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    let bank = match cli.bank.as_ref() {
        Some(path) => load_bank(path)?,
        None => parse_bank(SAMPLE_BANK)?,
    };
    info!(questions = bank.len(), "question bank loaded");
    Ok(bank)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;
    let cli = Cli::parse();
    let command = cli.command();

    let db_url = normalize_sqlite_url(&cli.db_url)?;
    let bank = read_bank(&cli)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, bank, Clock::system()).await?;

    match command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Trainer")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            let mut presenter = ConsolePresenter::default();
            services.history().refresh_status(&mut presenter).await?;
            presenter.flush()?;
            Ok(())
        }
        Command::Reset { yes } => {
            let mut presenter = ConsolePresenter::default();
            let history = services.history();
            let cleared = if yes {
                history.clear(&Decision::YES, &mut presenter).await?
            } else {
                history.clear(&StdinConfirm, &mut presenter).await?
            };
            if !cleared {
                println!("History kept.");
            }
            presenter.flush()?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
