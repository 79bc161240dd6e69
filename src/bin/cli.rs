use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use drivewise::cli::{create_admin, seed_reference_data};
use drivewise::drivewise_config::DatabaseConfig;
use drivewise::drivewise_db::init_db_pool;

#[derive(Parser)]
#[command(name = "drivewise-cli")]
#[command(about = "Drivewise CLI - Administrative tools for Drivewise", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        user_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Insert default payment methods and starter license types
    SeedReferenceData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            user_name,
            email,
            phone,
            password,
        } => handle_create_admin(&pool, user_name, email, phone, password).await,
        Commands::SeedReferenceData => handle_seed_reference_data(&pool).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

async fn handle_create_admin(
    pool: &sqlx::postgres::PgPool,
    user_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let user_name = prompt(user_name, "User name")?;
    let email = prompt(email, "Email address")?;
    let phone = prompt(phone, "Phone number")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    match create_admin(pool, &user_name, &email, &phone, &password).await {
        Ok(()) => {
            println!("\n✅ Admin created successfully!");
            println!("   User name: {}", user_name);
            println!("   Email: {}", email);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_reference_data(pool: &sqlx::postgres::PgPool) -> anyhow::Result<()> {
    let inserted = seed_reference_data(pool).await?;
    println!("✅ Reference data seeded ({} new rows)", inserted);
    Ok(())
}
