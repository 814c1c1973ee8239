use bcrypt::DEFAULT_COST;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use rollcall_cli::seeder::{SeedOptions, SeedOutcome, seed_sample_data};
use rollcall_cli::create_teacher;
use rollcall_config::StoreConfig;
use rollcall_db::{PgStore, Store};
use rollcall_models::CreateTeacherDto;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for the attendance API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed sample teachers, classes and students into an empty database
    Seed {
        /// bcrypt cost for the sample passwords
        #[arg(long, default_value_t = DEFAULT_COST)]
        password_cost: u32,
    },
    /// Create a teacher account
    CreateTeacher {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete every teacher, class, student and attendance record
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = StoreConfig::from_env();
    let store = match PgStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => fail(format!("Failed to connect to database: {}", e)),
    };

    match cli.command {
        Commands::Seed { password_cost } => handle_seed(&store, password_cost).await,
        Commands::CreateTeacher {
            username,
            full_name,
            email,
            password,
        } => handle_create_teacher(&store, username, full_name, email, password).await,
        Commands::Clear { yes } => handle_clear(&store, yes).await,
    }
}

fn fail(message: String) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", label.to_lowercase(), e)))
}

async fn handle_seed(store: &dyn Store, password_cost: u32) {
    println!("🌱 Seeding sample data...");

    match seed_sample_data(store, SeedOptions { password_cost }).await {
        Ok(SeedOutcome::Seeded {
            teachers,
            classes,
            students,
        }) => {
            println!("✅ Seeded {} teachers, {} classes, {} students", teachers, classes, students);
            println!("   Login with teacher1 / password123 or teacher2 / password123");
        }
        Ok(SeedOutcome::Skipped) => {
            println!("ℹ️  Database already has teachers, nothing seeded");
        }
        Err(e) => fail(format!("Error seeding database: {}", e)),
    }
}

async fn handle_create_teacher(
    store: &dyn Store,
    username: Option<String>,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let full_name = full_name.unwrap_or_else(|| prompt("Full name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail(format!("Failed to read password: {}", e)))
    });

    let dto = CreateTeacherDto {
        username,
        email,
        full_name,
        password,
    };

    match create_teacher(store, dto, DEFAULT_COST).await {
        Ok(teacher) => {
            println!("\n✅ Teacher created successfully!");
            println!("   Username: {}", teacher.username);
            println!("   Name: {}", teacher.full_name);
        }
        Err(e) => fail(format!("Error creating teacher: {}", e)),
    }
}

async fn handle_clear(store: &dyn Store, yes: bool) {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete all teachers, classes, students and attendance?")
            .default(false)
            .interact()
            .unwrap_or(false);

    if !confirmed {
        println!("Aborted");
        return;
    }

    match store.clear().await {
        Ok(()) => println!("✅ Cleared all data"),
        Err(e) => fail(format!("Error clearing data: {}", e)),
    }
}
