use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use array_user::{config::Settings, ArrayUser, UserDb, UserError, UserOptions};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Manage bcrypt users stored in a JSON array file
#[derive(Parser, Debug)]
#[command(name = "array-user", version)]
struct Cli {
    /// Settings file
    #[arg(long, default_value = "array-user.toml")]
    config: PathBuf,

    /// User file, overrides the configured `db_path`
    #[arg(long)]
    db: Option<PathBuf>,

    /// Realm, overrides the configured `default_realm`
    #[arg(long)]
    realm: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new user
    Register { username: String, password: String },
    /// Check a password
    Verify { username: String, password: String },
    /// Change the password of an existing user
    SetPassword { username: String, password: String },
    /// Check whether a user exists
    Exists { username: String },
    /// Print every stored identity
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();

    let db_path = cli.db.clone().unwrap_or_else(|| settings.db_path.clone());
    let db = UserDb::load(&db_path)
        .await
        .with_context(|| format!("loading users from {}", db_path.display()))?;
    let count = db.len().await;
    tracing::debug!(path = %db_path.display(), users = count, "user file loaded");

    let options = settings.user_options(cli.realm.as_deref());

    let outcome = run(cli.command, &db, &db_path, options).await;
    Ok(ExitCode::from(exit_status(outcome)?))
}

/// Run one command; `Ok(false)` means a negative answer, not a failure
async fn run(
    command: Command,
    db: &UserDb,
    db_path: &Path,
    options: UserOptions,
) -> Result<bool, UserError> {
    match command {
        Command::Register { username, password } => {
            ArrayUser::new(db, &username, options)?.register(&password).await?;
            db.save(db_path).await?;
            println!("registered {username}");
            Ok(true)
        }
        Command::Verify { username, password } => {
            let correct = ArrayUser::new(db, &username, options)?
                .verify_password(&password)
                .await?;
            println!("{}", if correct { "password ok" } else { "password incorrect" });
            Ok(correct)
        }
        Command::SetPassword { username, password } => {
            ArrayUser::new(db, &username, options)?
                .set_password(&password)
                .await?;
            db.save(db_path).await?;
            println!("password updated for {username}");
            Ok(true)
        }
        Command::Exists { username } => {
            let exists = ArrayUser::new(db, &username, options)?.exists().await?;
            println!("{exists}");
            Ok(exists)
        }
        Command::List => {
            for user in db.snapshot().await {
                println!("{}\t{}", user.realm, user.username);
            }
            Ok(true)
        }
    }
}

/// 0 on success, 1 on a negative answer, 2 on bad input. Anything else is an error.
fn exit_status(outcome: Result<bool, UserError>) -> anyhow::Result<u8> {
    match outcome {
        Ok(true) => Ok(0),
        Ok(false) => Ok(1),
        Err(err) if err.is_caller_error() => {
            eprintln!("error [{}]: {err}", err.error_code());
            Ok(2)
        }
        Err(err) => Err(err.into()),
    }
}
