use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use pokeapi_auth::Role;
use pokeapi_core::hash_password;
use pokeapi_db::{PgPool, database_url_from_env, init_db_pool};

#[derive(Parser)]
#[command(name = "pokeapi-cli")]
#[command(about = "PokeAPI CLI - Administrative tools for PokeAPI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with any role, bypassing registration
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// One of user, manager, admin
        #[arg(short = 'r', long, default_value = "admin")]
        role: Role,
    },
    /// Change the role of an existing account
    SetRole {
        #[arg(short = 'e', long)]
        email: String,

        #[arg(short = 'r', long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = database_url_from_env()?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
            role,
        } => handle_create_user(&pool, name, email, password, role).await,
        Commands::SetRole { email, role } => handle_set_role(&pool, &email, role).await,
    }
}

async fn handle_create_user(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Role,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let id = create_user(pool, &name, &email, &password, role).await?;

    println!("\n✅ User created successfully!");
    println!("   Id: {}", id);
    println!("   Email: {}", email);
    println!("   Role: {}", role);
    Ok(())
}

async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<i64> {
    let hashed_password =
        hash_password(password).map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed_password)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await?;

    id.ok_or_else(|| anyhow!("User with this email already exists"))
}

async fn handle_set_role(pool: &PgPool, email: &str, role: Role) -> anyhow::Result<()> {
    let result = sqlx::query("UPDATE users SET role = $1, updated_at = NOW() WHERE email = $2")
        .bind(role.as_str())
        .bind(email)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        bail!("No user with email {}", email);
    }

    println!("\n✅ {} is now {}", email, role);
    Ok(())
}
