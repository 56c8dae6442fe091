//! Oquga web command line.
//!
//! Runs a site, or talks to the backend as a signed-in user. The session is
//! kept in the same persisted auth store the site mirrors into its cookie,
//! backed by files under the platform data directory.
//!
//! ```sh
//! # Serve the admin site on port 3001
//! oquga serve --site admin --port 3001
//!
//! # Validate config without starting
//! oquga serve --check
//!
//! # Sign in and look around
//! oquga login --email aigerim@oquga.kz --password secret1
//! oquga whoami
//! oquga universities --search almaty --page 2
//!
//! # Type to search; results follow the debounced query
//! oquga search
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use oquga_web::application::{
    AuthStore, CatalogService, DataTableParams, IdentityService, LoginForm, PasswordForm,
    ProfileForm, RegisterForm, SearchSync, SEARCH_DEBOUNCE,
};
use oquga_web::config::AppConfig;
use oquga_web::domain::{Locale, SiteKind, University};
use oquga_web::infrastructure::{ApiClient, FileStorage};
use oquga_web::shared::{AppError, Paginated};
use oquga_web::ServerHandle;

#[derive(Parser, Debug)]
#[command(
    name = "oquga",
    version,
    about = "Oquga university platform web tier",
    long_about = "Serves the Oquga client or admin site, or acts as a terminal \
                  client of the backend API.\n\n\
                  Default config: ~/.config/oquga-web/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "OQUGA_CONFIG")]
    config: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(long, env = "API_BASE_URL")]
    backend: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Locale used for university names.
    #[arg(long, default_value = "ru")]
    locale: Locale,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server.
    Serve {
        /// Site to serve (admin or client).
        #[arg(long)]
        site: Option<SiteKind>,
        #[arg(long)]
        port: Option<u16>,
        /// Validate the configuration and exit.
        #[arg(long)]
        check: bool,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Logout,
    /// Show the signed-in user as the backend sees it.
    Whoami,
    /// Update first and last name.
    Profile {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// List universities.
    Universities {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        status: Option<String>,
    },
    /// Interactive search: every line typed is a new search text.
    Search,
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct Services {
    identity: IdentityService<ApiClient>,
    catalog: CatalogService<ApiClient>,
}

async fn services(config: &AppConfig) -> Result<Services, AppError> {
    let storage = Arc::new(FileStorage::new(FileStorage::default_dir()));
    let store = Arc::new(AuthStore::new(storage, config.site.kind.auth_cookie_name()));
    store.hydrate().await?;
    let client = Arc::new(ApiClient::new(
        &config.backend.base_url,
        config.backend.timeout(),
        store.clone(),
    )?);
    Ok(Services {
        identity: IdentityService::new(client.clone(), store),
        catalog: CatalogService::new(client),
    })
}

fn print_universities(list: &Paginated<University>, locale: Locale) {
    if list.data.is_empty() {
        println!("No universities found");
        return;
    }
    for university in &list.data {
        let city = university
            .translation(locale)
            .and_then(|t| t.city.clone())
            .unwrap_or_default();
        println!(
            "{:>5}  {:<48} {:<16} {:>3}%",
            university.id,
            university.display_name(locale),
            city,
            university.progress_percent
        );
    }
    println!("Page {} of {} ({} total)", list.meta.page, list.meta.total_pages, list.meta.total);
}

fn report(err: &AppError) {
    match err.field_errors() {
        Some(fields) => {
            for (path, messages) in fields.iter() {
                for message in messages {
                    eprintln!("{path}: {message}");
                }
            }
        }
        None => eprintln!("{err}"),
    }
}

async fn interactive_search(catalog: CatalogService<ApiClient>, locale: Locale) -> Result<(), AppError> {
    let (sync, mut navigations) = SearchSync::spawn("/universities", DataTableParams::default(), SEARCH_DEBOUNCE);

    let printer = tokio::spawn(async move {
        while let Some(navigation) = navigations.recv().await {
            println!("→ {}", navigation.url);
            let query = navigation.url.split_once('?').map(|(_, q)| q).unwrap_or("");
            match catalog.universities(&DataTableParams::from_query(query)).await {
                Ok(list) => print_universities(&list, locale),
                Err(e) => report(&e),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        sync.input(line.trim());
    }
    sync.close().await;
    if let Err(e) = printer.await {
        error!("search printer failed: {}", e);
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let locale = cli.locale;
    let services = services(&config).await?;

    match cli.command {
        // Served from `main`.
        Command::Serve { .. } => {}
        Command::Login { email, password } => {
            let update = services.identity.login(LoginForm { email, password }).await?;
            let name = update.session.user.map(|u| u.full_name()).unwrap_or_default();
            println!("Signed in as {name}");
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
            };
            services.identity.register(form).await?;
            println!("Account created");
        }
        Command::Logout => {
            services.identity.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => {
            let user = services.identity.current_user().await?;
            println!("{} <{}> ({})", user.full_name(), user.email, user.role);
        }
        Command::Profile { first_name, last_name } => {
            services
                .identity
                .update_profile(ProfileForm { first_name, last_name })
                .await?;
            println!("Profile updated");
        }
        Command::Password { current, new, confirm } => {
            let form = PasswordForm {
                current_password: current,
                new_password: new,
                confirm_new_password: confirm,
            };
            services.identity.change_password(form).await?;
            println!("Password changed");
        }
        Command::Universities { search, page, status } => {
            let mut params = DataTableParams::default();
            params.set_search(&search);
            if let Some(status) = status {
                params.set_filter("status", &status);
            }
            params.set_page(page);
            let list = services.catalog.universities(&params).await?;
            print_universities(&list, locale);
        }
        Command::Search => interactive_search(services.catalog, locale).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(oquga_web::config_path_from_env);
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(cli.log_level.as_deref().unwrap_or(&cfg.logging.level));
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing(cli.log_level.as_deref().unwrap_or("info"));
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    config = config.with_env();
    if let Some(ref backend) = cli.backend {
        info!("CLI override: backend = {}", backend);
        config.backend.base_url = backend.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if let Command::Serve { site, port, check } = cli.command {
        if let Some(site) = site {
            config.site.kind = site;
        }
        if let Some(port) = port {
            info!("CLI override: port = {}", port);
            config.server.port = port;
        }
        if check {
            println!("✅ Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   Site        : {}", config.site.kind);
            println!("   Address     : {}", config.server.address());
            println!("   Backend     : {}", config.backend.base_url);
            println!("   Log level   : {}", config.logging.level);
            return Ok(());
        }

        let handle = ServerHandle::start(config).await?;
        handle.install_signal_handler();
        info!("🚀 Press Ctrl+C to shutdown gracefully.");
        handle.wait().await;
        return Ok(());
    }

    if let Err(e) = run(cli, config).await {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}
