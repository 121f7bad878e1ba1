mod importer;

use clap::{Parser, Subcommand};
use importer::{import_words, parse_word_list};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;
use tangocho::accounts::{AccountClass, AccountStore, Admin, RegisterForm, User};
use tangocho::config::parse_bcrypt_cost;

#[derive(Parser)]
#[command(name = "seed", about = "Seed the vocabulary database with words and accounts")]
struct Args {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a JSON word list
    Words {
        /// Path to a JSON array of {"english", "japanese"} objects
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of words to import
        #[arg(short, long)]
        limit: Option<usize>,

        /// Clear existing words before import
        #[arg(long)]
        clear: bool,
    },
    /// Create a learner account
    User(AccountArgs),
    /// Create an administrator account
    Admin(AccountArgs),
}

#[derive(clap::Args)]
struct AccountArgs {
    #[arg(long)]
    login_id: String,

    #[arg(long)]
    password: String,

    #[arg(long)]
    name: String,

    /// bcrypt work factor, clamped to the supported range
    #[arg(long, env = "BCRYPT_COST")]
    cost: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Connecting to database...");
    let options = SqliteConnectOptions::from_str(&args.database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    // Run migrations to ensure schema exists
    sqlx::migrate!("../../migrations").run(&pool).await?;

    match args.command {
        Command::Words { file, limit, clear } => {
            if clear {
                println!("Clearing existing words...");
                sqlx::query("DELETE FROM word").execute(&pool).await?;
            }

            println!("Parsing word list: {:?}", file);
            let entries = parse_word_list(&file)?;
            println!("Found {} entries", entries.len());

            let stats = import_words(&pool, entries, limit).await?;

            println!();
            println!("Import complete:");
            println!("  Parsed:                  {}", stats.parsed);
            println!("  Inserted into database:  {}", stats.inserted);
            println!("  Skipped (invalid/dupe):  {}", stats.skipped);
        }
        Command::User(account) => create_account::<User>(pool, account).await?,
        Command::Admin(account) => create_account::<Admin>(pool, account).await?,
    }

    Ok(())
}

async fn create_account<C: AccountClass>(
    pool: SqlitePool,
    args: AccountArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = AccountStore::<C>::new(pool, parse_bcrypt_cost(args.cost.as_deref()));
    let account = store
        .register(RegisterForm {
            login_id: args.login_id,
            password: args.password.clone(),
            password_confirm: args.password,
            name: args.name,
        })
        .await?;

    println!("Created {} account {} (id {})", C::LABEL, account.login_id, account.id);
    Ok(())
}
