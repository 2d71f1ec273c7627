use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use learnhub_cli::{admin, seeder};
use learnhub_config::PasswordConfig;
use learnhub_db::{Stores, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "learnhub-cli")]
#[command(about = "LearnHub CLI - Administrative tools for LearnHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake educators, users and published courses
    Seed {
        /// Number of educator accounts
        #[arg(long, default_value = "3")]
        educators: usize,

        /// Number of plain user accounts
        #[arg(long, default_value = "10")]
        users: usize,

        /// Number of courses per educator
        #[arg(long, default_value = "2")]
        courses: usize,
    },
    /// Remove all seeded accounts and their courses
    ClearSeed,
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };
    if let Err(e) = run_migrations(&pool).await {
        fail("Failed to run migrations", e);
    }

    let stores = Stores::postgres(pool);
    let password_config = PasswordConfig::from_env();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&stores, &password_config, name, email, password).await,
        Commands::Seed {
            educators,
            users,
            courses,
        } => {
            let config = seeder::SeedConfig {
                educators,
                users,
                courses_per_educator: courses,
            };
            if let Err(e) = seeder::seed_all(&stores, config, password_config.cost).await {
                fail("Error seeding database", e);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = seeder::clear_all(&stores).await {
                fail("Error clearing seeded data", e);
            }
        }
    }
}

async fn handle_create_admin(
    stores: &Stores,
    password_config: &PasswordConfig,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read name", e)),
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read email", e)),
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e)),
    };

    match admin::create_admin(stores, &name, &email, &password, password_config.cost).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
        }
        Err(e) => fail("Error creating admin", e),
    }
}
