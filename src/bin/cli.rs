use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use warden::cli::{create_superadmin, run_migrations};
use warden::logging::init_tracing;
use warden_config::DatabaseConfig;
use warden_db::{PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "warden-cli")]
#[command(about = "Warden CLI - Administrative tools for the Warden auth service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a superadmin account (superadmins cannot be created over HTTP)
    CreateSuperadmin {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;

    match cli.command {
        Commands::CreateSuperadmin {
            username,
            email,
            password,
        } => handle_create_superadmin(&pool, username, email, password).await,
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_superadmin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    // Use provided values or prompt interactively
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = create_superadmin(pool, &username, &email, &password).await?;

    println!("\n✅ Superadmin created successfully!");
    println!("   ID: {}", user.user_id);
    println!("   Username: {}", user.username);
    println!("   Email: {}", user.email);
    Ok(())
}
