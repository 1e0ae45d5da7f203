//! Atelier operations CLI

use std::process;

use atelier::{
    auth::Actor,
    context::AppContext,
    domain::{
        orders::models::{OrderFilter, OrderStatus},
        products::fixtures,
    },
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atelier", about = "Atelier back-office CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replace the catalogue with the sample collection
    Seed(DatabaseArgs),
    /// Print back-office statistics
    Stats(DatabaseArgs),
    Orders(OrdersCommand),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List(OrdersListArgs),
}

#[derive(Debug, Args)]
struct OrdersListArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Only show orders in this status
    #[arg(long)]
    status: Option<OrderStatus>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Seed(args) => seed(args).await,
        Commands::Stats(args) => stats(args).await,
        Commands::Orders(OrdersCommand {
            command: OrdersSubcommand::List(args),
        }) => list_orders(args).await,
    }
}

async fn context(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url)
        .await
        .map_err(|error| format!("failed to initialise services: {error}"))
}

fn cli_admin() -> Actor {
    Actor::admin("atelier-cli")
}

async fn seed(args: DatabaseArgs) -> Result<(), String> {
    let ctx = context(&args.database_url).await?;

    let seeded = ctx
        .products
        .seed_catalogue(&cli_admin(), fixtures::sample_products())
        .await
        .map_err(|error| format!("failed to seed catalogue: {error}"))?;

    println!("seeded {} products", seeded.len());
    for product in seeded {
        println!(
            "  {} - {} ({})",
            product.name,
            rupees(product.price),
            product.category
        );
    }

    Ok(())
}

async fn stats(args: DatabaseArgs) -> Result<(), String> {
    let ctx = context(&args.database_url).await?;
    let admin = cli_admin();

    let orders = ctx
        .orders
        .order_stats(&admin)
        .await
        .map_err(|error| format!("failed to read order stats: {error}"))?;

    println!("orders:");
    for bucket in orders {
        println!(
            "  {:<10} {:>5}  {}",
            bucket.status.to_string(),
            bucket.count,
            rupees(bucket.revenue)
        );
    }

    let catalogue = ctx
        .products
        .catalogue_stats(&admin)
        .await
        .map_err(|error| format!("failed to read catalogue stats: {error}"))?;

    println!("products:");
    println!("  total: {}", catalogue.total);
    println!("  in stock: {}", catalogue.in_stock);
    println!("  out of stock: {}", catalogue.out_of_stock());
    println!("  featured: {}", catalogue.featured);

    let inquiries = ctx
        .inquiries
        .inquiry_stats(&admin)
        .await
        .map_err(|error| format!("failed to read inquiry stats: {error}"))?;

    println!("inquiries:");
    println!("  total: {}", inquiries.total);
    println!("  new: {}", inquiries.new);
    println!("  contacted: {}", inquiries.contacted);
    println!("  resolved: {}", inquiries.resolved);

    Ok(())
}

async fn list_orders(args: OrdersListArgs) -> Result<(), String> {
    let ctx = context(&args.database_url).await?;

    let orders = ctx
        .orders
        .list_orders(
            &cli_admin(),
            OrderFilter {
                status: args.status,
                ..OrderFilter::default()
            },
        )
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    for order in &orders {
        println!(
            "{}  {:<10}  {:>12}  {}",
            order.uuid,
            order.status.to_string(),
            rupees(order.total_amount),
            order.created_at.strftime("%Y-%m-%d %H:%M"),
        );
    }
    println!("{} orders", orders.len());

    Ok(())
}

fn rupees(minor: u64) -> String {
    let units = minor / 100;
    let cents = minor % 100;

    if cents == 0 {
        format!("₹{units}")
    } else {
        format!("₹{units}.{cents:02}")
    }
}
