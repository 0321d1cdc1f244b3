//! Meezy CLI - storefront client for the Meezy API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (token is stored in .meezy-session.json)
//! meezy register -n "Asha" -e asha@example.com -p secret
//!
//! # Browse and fill the cart
//! meezy products
//! meezy cart add 1 --qty 2
//! meezy cart show
//!
//! # Place the order
//! meezy checkout --address "12 MG Road, Pune" --payment card
//! ```
//!
//! The API location and state file come from `--api-url` / `MEEZY_API_URL`
//! and `--state-file` / `MEEZY_STATE_FILE`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use meezy_cli::{ApiClient, DEFAULT_API_URL, DEFAULT_STATE_FILE, Registration, Shop, ShopError};
use meezy_core::{Cart, Product, ProductId, Role};

#[derive(Parser)]
#[command(name = "meezy")]
#[command(author, version, about = "Meezy storefront client")]
struct Cli {
    /// API base URL
    #[arg(long, env = "MEEZY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Where the token, user and cart are kept
    #[arg(long, env = "MEEZY_STATE_FILE", default_value = DEFAULT_STATE_FILE, global = true)]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// `buyer` (default) or `seller`
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored token (the cart is kept)
    Logout,
    /// Show the signed-in user
    Me,
    /// List the catalogue
    Products,
    /// Show one product
    Product { id: ProductId },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Replace the cart with one unit of a product
    BuyNow { id: ProductId },
    /// Place an order for everything in the cart
    Checkout {
        /// Shipping address
        #[arg(long)]
        address: Option<String>,

        #[arg(long, value_enum, default_value_t = Payment::Cod)]
        payment: Payment,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add a product (merges with an existing line)
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product's line
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Payment {
    /// Cash on delivery
    Cod,
    /// Card (simulated)
    Card,
}

impl Payment {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Card => "card",
        }
    }
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meezy_cli=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), ShopError> {
    let client = ApiClient::new(&cli.api_url)?;
    let mut shop = Shop::open(client, cli.state_file).await?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let user = shop
                .register(Registration {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            println!("Registered and signed in as {} <{}> ({})", user.name, user.email, user.role);
        }
        Commands::Login { email, password } => {
            let user = shop.login(&email, &password).await?;
            println!("Signed in as {} <{}>", user.name, user.email);
        }
        Commands::Logout => {
            shop.logout().await?;
            println!("Signed out");
        }
        Commands::Me => match shop.refresh_me().await? {
            Some(user) => println!("#{} {} <{}> ({})", user.id, user.name, user.email, user.role),
            None => println!("Not signed in"),
        },
        Commands::Products => {
            for product in shop.products().await? {
                print_product_line(&product);
            }
        }
        Commands::Product { id } => {
            let product = shop.product(id).await?;
            print_product_line(&product);
            if product.description.is_empty() {
                println!("  No details available");
            } else {
                println!("  {}", product.description);
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Show => print_cart(shop.cart()),
            CartAction::Add { id, qty } => {
                if let Some(line) = shop.add_to_cart(id, qty).await? {
                    println!("Added to cart: {} x {}", line.product.title, line.qty);
                }
            }
            CartAction::Remove { id } => {
                if shop.remove_from_cart(id).await? {
                    println!("Removed product {id}");
                } else {
                    println!("Product {id} is not in the cart");
                }
            }
            CartAction::Clear => {
                shop.clear_cart().await?;
                println!("Cart cleared");
            }
        },
        Commands::BuyNow { id } => {
            let product = shop.buy_now(id).await?;
            println!("Cart now holds 1 x {}; run `meezy checkout` to order", product.title);
        }
        Commands::Checkout { address, payment } => {
            let order = shop.checkout(address, payment.as_str()).await?;
            println!("Order placed: {}", order.id);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_product_line(product: &Product) {
    println!(
        "#{} {} {} by {}",
        product.id, product.title, product.price, product.seller
    );
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("No items");
        return;
    }
    for line in cart.lines() {
        println!(
            "#{} {} x {}  {}",
            line.product.id,
            line.product.title,
            line.qty,
            line.subtotal()
        );
    }
    println!("Total: {}", cart.total());
}
