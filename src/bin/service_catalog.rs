//! Command-line front end for the service catalog.
//!
//! Lists and filters services, prints per-service analytics (following retired
//! ids to their replacement), replays a sequence of cart toggles, and validates
//! catalog files before they are deployed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use servicecart::config::LoggingSettings;
use servicecart::logging::init_logging;
use servicecart::{
    Analytics, AnalyticsCache, Cart, CatalogError, CatalogIndex, FsAssetProbe, Notice,
    NoticeLevel, Notifier, RemovalPolicy, Resolved, ServiceCategory, ServiceDefinition,
    ServiceFilter, ServiceId, Settings, SubCategory, hero_image, list_services,
};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser)]
#[command(name = "service-catalog")]
#[command(about = "Browse the service catalog, check add-on rules and service analytics")]
struct Cli {
    /// TOML settings file (defaults to $SERVICECART_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List services in catalog order
    List {
        #[arg(long, value_parser = parse_category)]
        category: Option<ServiceCategory>,
        #[arg(long, value_parser = parse_sub_category)]
        sub_category: Option<SubCategory>,
        /// Case-insensitive match on name or description
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show analytics for one service
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Toggle services in order, starting from an empty cart
    Cart {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Drop add-ons left without a base service when a base is removed
        #[arg(long)]
        cascade: bool,
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a catalog file
    Validate {
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Validate against this schema instead of the built-in one
        #[arg(long, requires = "catalog")]
        schema: Option<PathBuf>,
    },
}

fn parse_category(value: &str) -> Result<ServiceCategory, String> {
    ServiceCategory::parse(value).ok_or_else(|| format!("expected 'base' or 'addon', got '{value}'"))
}

fn parse_sub_category(value: &str) -> Result<SubCategory, String> {
    Ok(SubCategory::parse(value))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(&LoggingSettings {
        verbose: cli.verbose || settings.logging.verbose,
        json: settings.logging.json,
    });

    match cli.command {
        Command::List {
            category,
            sub_category,
            search,
            json,
        } => {
            let index = settings.open_catalog()?;
            let mut filter = ServiceFilter::new();
            filter.category = category;
            filter.sub_category = sub_category;
            if let Some(query) = search {
                filter = filter.query(query);
            }
            print_list(&list_services(&index, Some(&filter)), json)
        }
        Command::Show { id, json } => {
            let index = settings.open_catalog()?;
            show(&index, &settings, &id, json)
        }
        Command::Cart { ids, cascade, json } => {
            let index = settings.open_catalog()?;
            let policy = if cascade {
                RemovalPolicy::Cascade
            } else {
                settings.removal_policy
            };
            replay_cart(&index, policy, &ids, json)
        }
        Command::Validate { catalog, schema } => {
            let index = match (catalog, schema) {
                (Some(path), Some(schema)) => CatalogIndex::load_with_schema(&path, &schema)?,
                (Some(path), None) => CatalogIndex::load(&path)?,
                (None, _) => settings.open_catalog()?,
            };
            println!(
                "ok: {} services, {} aliases ({})",
                index.len(),
                index.aliases().len(),
                index.key().0
            );
            Ok(())
        }
    }
}

fn print_list(services: &[&ServiceDefinition], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(services)?);
        return Ok(());
    }
    for service in services {
        let marker = if service.popular { "*" } else { " " };
        println!(
            "{marker} {:<24} {:>6} EUR  {:<6} {:<12} {}",
            service.id,
            service.price,
            service.category,
            service.sub_category.style().label,
            service.name
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ShowReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    redirected_from: Option<&'a str>,
    hero_image: String,
    #[serde(flatten)]
    analytics: &'a Analytics<'a>,
}

fn show(index: &CatalogIndex, settings: &Settings, id: &str, json: bool) -> Result<()> {
    let resolved = index
        .resolve(id)
        .ok_or_else(|| CatalogError::not_found(id))?;
    let redirected_from = match resolved {
        Resolved::Alias { from, to } => {
            tracing::info!(from, to = %to.id, "following retired service id");
            Some(from)
        }
        Resolved::Canonical(_) => None,
    };

    let mut cache = AnalyticsCache::new(index, settings.stats);
    let analytics = cache.get(resolved.service().id.as_str())?;
    let probe = FsAssetProbe::new(&settings.public_root);
    let report = ShowReport {
        redirected_from,
        hero_image: hero_image(&probe, analytics.service),
        analytics,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let service = analytics.service;
    if let Some(from) = report.redirected_from {
        println!("('{from}' now redirects to '{}')", service.id);
    }
    println!("{} [{}]", service.name, service.id);
    println!("  {}", service.description);
    println!(
        "  {} EUR, {} / {}{}",
        service.price,
        service.category,
        service.sub_category.style().label,
        service
            .duration
            .as_deref()
            .map(|d| format!(", {d}"))
            .unwrap_or_default()
    );
    println!("  average in sub-category: {} EUR", analytics.avg_price);
    print_names("related", &analytics.related_services);
    print_names("complementary", &analytics.complementary_services);
    println!(
        "  {}/5 from {} reviews, {} projects delivered, {}% satisfied",
        analytics.stats.avg_rating,
        analytics.stats.total_reviews,
        analytics.stats.delivered_projects,
        analytics.stats.satisfaction_rate
    );
    println!("  image: {}", report.hero_image);
    Ok(())
}

fn print_names(label: &str, services: &[&ServiceDefinition]) {
    if services.is_empty() {
        return;
    }
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    println!("  {label}: {}", names.join(", "));
}

/// Prints notices as they arrive.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        let tag = match notice.level() {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "refused",
        };
        println!("[{tag}] {}", notice.message());
    }
}

#[derive(Serialize)]
struct CartReport<'a> {
    notices: &'a [Notice],
    selection: &'a [ServiceId],
    orphaned: Vec<&'a ServiceId>,
    total_price: u64,
}

fn replay_cart(
    index: &CatalogIndex,
    policy: RemovalPolicy,
    ids: &[String],
    json: bool,
) -> Result<()> {
    let mut cart = Cart::new(index, policy);
    let mut collected: Vec<Notice> = Vec::new();
    let mut console = ConsoleNotifier;

    for id in ids {
        let notifier: &mut dyn Notifier = if json { &mut collected } else { &mut console };
        match cart.toggle(id, notifier) {
            Ok(_) | Err(CatalogError::DependencyNotSatisfied { .. }) => {}
            Err(err @ CatalogError::NotFound { .. }) => {
                return Err(err).context("replaying cart");
            }
        }
    }

    let orphaned: Vec<&ServiceId> = cart
        .orphaned_addons()
        .into_iter()
        .map(|service| &service.id)
        .collect();
    if json {
        let report = CartReport {
            notices: &collected,
            selection: cart.selection().ids(),
            orphaned,
            total_price: cart.total_price(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cart.selection().is_empty() {
        println!("cart is empty");
        return Ok(());
    }
    for service in cart.selected_services() {
        println!("  {:<24} {:>6} EUR", service.id, service.price);
    }
    println!("  {:<24} {:>6} EUR", "total", cart.total_price());
    if !orphaned.is_empty() {
        let names: Vec<&str> = orphaned.iter().map(|id| id.as_str()).collect();
        println!("warning: no base service selected for {}", names.join(", "));
    }
    Ok(())
}
