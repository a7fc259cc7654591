use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use saw_rank::config::{self, Config};
use saw_rank::output::{self, print_line};
use saw_rank::ranking::{self, validation::format_total, RankError, Weights};
use saw_rank::store::{self, StoreError, StoreState};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Table,
    /// Tab-separated: rank, score, name, id
    Tsv,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank products by SAW score (default if no subcommand)
    Rank {
        /// Only rank products owned by this user id
        #[arg(short, long)]
        user: Option<String>,

        /// Rank every product, ignoring `user` from config
        #[arg(short, long, conflicts_with = "user")]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show or change criterion weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },
    /// Manage users (product owners)
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Write a starter config file
    Init {
        /// Accept default weights without prompting
        #[arg(short, long)]
        yes: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        /// Expected profit (benefit criterion)
        #[arg(long)]
        profit: f64,
        /// Units sold (benefit criterion)
        #[arg(long)]
        sales: f64,
        /// Production cost (cost criterion)
        #[arg(long)]
        cost: f64,
        /// Owning user id (defaults to `user` from config)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// List products in creation order
    List {
        #[arg(short, long)]
        user: Option<String>,
        /// List every product, ignoring `user` from config
        #[arg(short, long, conflicts_with = "user")]
        all: bool,
    },
    /// Remove a product by id
    Remove {
        id: String,
        /// Only remove if owned by this user id
        #[arg(short, long)]
        user: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum WeightsAction {
    /// Show current weights and their total
    Show,
    /// Change one or more weights (percentages)
    Set {
        #[arg(long)]
        profit: Option<f64>,
        #[arg(long)]
        sales: Option<f64>,
        #[arg(long)]
        cost: Option<f64>,
    },
    /// Restore the configured default weights
    Reset,
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Add a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Role (defaults to "member")
        #[arg(long)]
        role: Option<String>,
    },
    /// List users
    List,
    /// Remove a user and every product they own
    Remove { id: String },
}

#[derive(Parser, Debug)]
#[command(name = "saw-rank")]
#[command(about = "Product prioritization with Simple Additive Weighting", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/saw-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to store file (overrides config)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Everything a command needs once startup has succeeded.
struct App {
    config: Config,
    store_path: PathBuf,
    use_colors: bool,
    verbose: bool,
}

impl App {
    fn load(&self) -> Result<StoreState> {
        store::load_store(&self.store_path, self.config.default_weights())
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        store::save_store(&self.store_path, state)
    }

    fn owner<'a>(&'a self, explicit: &'a Option<String>) -> Option<&'a str> {
        self.config.resolve_owner(explicit.as_deref(), false)
    }
}

fn main() {
    let cli = Cli::parse();
    saw_rank::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank {
        user: None,
        all: false,
        format: OutputFormat::Table,
    });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { yes, force } = command {
        match config::run_init(config_path, yes, force) {
            Ok(path) => {
                let _ = print_line(&format!("Config written to {}", path.display()));
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let store_path = match config::resolve_store_path(&config, cli.store.map(PathBuf::from)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(store = %store_path.display(), "using store");

    let app = App {
        config,
        store_path,
        use_colors: output::should_use_colors(),
        verbose: cli.verbose,
    };

    let code = match run(&app, command) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    };
    std::process::exit(code);
}

/// Print an error and map it to an exit code.
fn report_error(err: &anyhow::Error) -> i32 {
    if let Some(RankError::UnbalancedWeights(errors)) = err.downcast_ref::<RankError>() {
        eprintln!("Cannot rank:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_INVALID;
    }

    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Invalid(errors)) => {
            eprintln!("Invalid input:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            EXIT_INVALID
        }
        Some(StoreError::DuplicateEmail(email)) => {
            eprintln!("Error: email already registered: {}", email);
            EXIT_INVALID
        }
        Some(e) if e.is_not_found() => {
            eprintln!("Error: {}", e);
            EXIT_NOT_FOUND
        }
        _ => {
            eprintln!("Error: {:#}", err);
            EXIT_STORAGE
        }
    }
}

fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Rank { user, all, format } => {
            rank(app, app.config.resolve_owner(user.as_deref(), all), format)
        }
        Commands::Product { action } => product(app, action),
        Commands::Weights { action } => weights(app, action),
        Commands::User { action } => user(app, action),
        // handled before the store is resolved
        Commands::Init { .. } => Ok(()),
    }
}

fn rank(app: &App, owner: Option<&str>, format: OutputFormat) -> Result<()> {
    let start_time = Instant::now();
    let state = app.load()?;
    let products = state.products(owner);
    let weights = state.weights();

    ranking::rank_guard(&weights, products.len())?;

    let results = ranking::calculate_ranking(&products, &weights);
    tracing::debug!(
        products = results.len(),
        elapsed = ?start_time.elapsed(),
        "ranking computed"
    );

    match format {
        OutputFormat::Table if app.verbose && !results.is_empty() => {
            for result in &results {
                print_line(&output::format_ranking_detail(result, app.use_colors))?;
                print_line("")?;
            }
        }
        OutputFormat::Table => {
            print_line(&output::format_ranking_table(&results, app.use_colors))?;
        }
        OutputFormat::Tsv => {
            let tsv = output::format_tsv(&results);
            if !tsv.is_empty() {
                print_line(&tsv)?;
            }
        }
        OutputFormat::Json => {
            print_line(&output::format_json(&results)?)?;
        }
    }

    Ok(())
}

fn product(app: &App, action: ProductAction) -> Result<()> {
    match action {
        ProductAction::Add {
            name,
            profit,
            sales,
            cost,
            user,
        } => {
            let mut state = app.load()?;
            let added = state
                .add_product(&name, profit, sales, cost, app.owner(&user))?
                .clone();
            app.save(&state)?;
            tracing::info!(id = %added.id, "product added");
            print_line(&format!("Added product {} ({})", added.name, added.id))?;
        }
        ProductAction::List { user, all } => {
            let state = app.load()?;
            let products = state.products(app.config.resolve_owner(user.as_deref(), all));
            print_line(&output::format_product_list(&products, app.use_colors))?;
        }
        ProductAction::Remove { id, user } => {
            let mut state = app.load()?;
            let removed = state.remove_product(&id, app.owner(&user))?;
            app.save(&state)?;
            tracing::info!(id = %removed.id, "product removed");
            print_line(&format!("Removed product {} ({})", removed.name, removed.id))?;
        }
    }
    Ok(())
}

fn weights(app: &App, action: WeightsAction) -> Result<()> {
    match action {
        WeightsAction::Show => {
            let state = app.load()?;
            print_line(&output::format_weights(&state.weights(), app.use_colors))?;
        }
        WeightsAction::Set {
            profit,
            sales,
            cost,
        } => {
            let mut state = app.load()?;
            let current = state.weights();
            let next = Weights::new(
                profit.unwrap_or(current.profit),
                sales.unwrap_or(current.sales),
                cost.unwrap_or(current.cost),
            );
            let saved = state.set_weights(next)?;
            app.save(&state)?;
            print_line(&output::format_weights(&saved, app.use_colors))?;
            if !saved.is_balanced() {
                eprintln!(
                    "Warning: weights total {}%; ranking is disabled until they add up to 100.",
                    format_total(saved.total())
                );
            }
        }
        WeightsAction::Reset => {
            let mut state = app.load()?;
            let saved = state.reset_weights(app.config.default_weights());
            app.save(&state)?;
            print_line(&output::format_weights(&saved, app.use_colors))?;
        }
    }
    Ok(())
}

fn user(app: &App, action: UserAction) -> Result<()> {
    match action {
        UserAction::Add { name, email, role } => {
            let mut state = app.load()?;
            let added = state.add_user(&name, &email, role.as_deref())?.clone();
            app.save(&state)?;
            tracing::info!(id = %added.id, "user added");
            print_line(&format!("Added user {} <{}> ({})", added.name, added.email, added.id))?;
        }
        UserAction::List => {
            let state = app.load()?;
            print_line(&output::format_user_list(state.users(), app.use_colors))?;
        }
        UserAction::Remove { id } => {
            let mut state = app.load()?;
            let removed_products = state.remove_user(&id)?;
            app.save(&state)?;
            tracing::info!(%id, removed_products, "user removed");
            print_line(&format!("Removed user {} and {} product(s)", id, removed_products))?;
        }
    }
    Ok(())
}
