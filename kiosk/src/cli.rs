use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gradientfx::text_contrast;
use itertools::Itertools;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};
use suds_kiosk::cart::Receipt;
use suds_kiosk::config::KioskConfig;
use suds_kiosk::machines::MachineFilter;
use suds_kiosk::wallet::PRESET_AMOUNTS;
use suds_kiosk::Kiosk;

#[derive(Parser)]
#[command(name = "kiosk-cli")]
#[command(about = "Laundromat kiosk companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List machines at this location
    Machines(MachinesArgs),

    /// Simulate scanning a machine QR code
    Scan,

    /// Inspect and edit the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Wallet balance and top-ups
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Custom home-page background
    #[command(subcommand)]
    Background(BackgroundCommand),
}

#[derive(Args)]
struct MachinesArgs {
    /// all, washers, dryers or available
    #[arg(short, long, default_value = "all")]
    filter: MachineFilter,
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show cart contents and totals
    Show,
    /// Add an available machine to the cart
    Add(CartAddArgs),
    /// Remove a cart line by its number
    Remove { index: usize },
    /// Simulate payment and empty the cart
    Checkout,
}

#[derive(Args)]
struct CartAddArgs {
    machine_id: u32,
    /// Add-on to include, may be repeated
    #[arg(long = "addon")]
    addons: Vec<String>,
}

#[derive(Subcommand)]
enum WalletCommand {
    /// Show balance and top-up history
    Show,
    /// Add simulated funds; without an amount, shows the preset menu
    Topup { amount: Option<f64> },
}

#[derive(Subcommand)]
enum BackgroundCommand {
    /// Show the currently applied background
    Show,
    /// Extract a palette and list the gradient options
    Options { palette: PathBuf },
    /// Pick a gradient option by number and apply it
    Set { palette: PathBuf, index: usize },
    /// Remove the custom background
    Reset,
}

fn accessibility_badge(accessible: bool) -> &'static str {
    if accessible {
        "✓ Accessible"
    } else {
        "⚠ Limited Contrast"
    }
}

fn cmd_machines(kiosk: &Kiosk, args: MachinesArgs) {
    for machine in kiosk.machines(args.filter) {
        println!(
            "{:>2}  {:<12} {:<18} ${:.2}/cycle",
            machine.id,
            machine.name,
            machine.status.label(),
            machine.price
        );
    }
}

async fn cmd_scan(kiosk: &Kiosk) -> Result<(), Box<dyn Error>> {
    println!("Scanning...");
    let machine = kiosk.scan().await?;
    println!(
        "QR code detected! {} is ready at ${:.2}/cycle.",
        machine.name, machine.price
    );
    Ok(())
}

fn print_receipt(receipt: &Receipt) {
    for item in &receipt.items {
        println!("  {:<12} {:<8} ${:.2}", item.name, item.duration, item.line_total());
        if !item.addons.is_empty() {
            println!("    Add-ons: {}", item.addons.iter().join(", "));
        }
    }
    println!("  Subtotal: ${:.2}", receipt.subtotal);
    println!("  Tax:      ${:.2}", receipt.tax);
    println!("  Total:    ${:.2}", receipt.total);
}

fn cmd_cart(kiosk: &mut Kiosk, cmd: CartCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        CartCommand::Show => {
            let cart = kiosk.cart()?;
            if cart.is_empty() {
                println!("Your cart is empty");
                return Ok(());
            }
            for (index, item) in cart.iter().enumerate() {
                println!(
                    "{:>2}  {:<12} {:<8} ${:.2}",
                    index,
                    item.name,
                    item.duration,
                    item.line_total()
                );
                if !item.addons.is_empty() {
                    println!("    Add-ons: {}", item.addons.iter().join(", "));
                }
            }
            println!("Subtotal: ${:.2}", cart.subtotal());
            println!("Tax:      ${:.2}", cart.tax());
            println!("Total:    ${:.2}", cart.total());
        }
        CartCommand::Add(args) => {
            let item = kiosk.add_to_cart(args.machine_id, args.addons)?;
            println!("{} added to cart!", item.name);
        }
        CartCommand::Remove { index } => {
            let item = kiosk.remove_from_cart(index)?;
            println!("Removed {}", item.name);
        }
        CartCommand::Checkout => {
            let receipt = kiosk.checkout()?;
            print_receipt(&receipt);
            println!("Payment processed successfully! Thank you for using SUDS.");
        }
    }
    Ok(())
}

fn cmd_wallet(kiosk: &mut Kiosk, cmd: WalletCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        WalletCommand::Show => {
            let wallet = kiosk.wallet()?;
            println!("Balance: ${:.2}", wallet.balance);
            for top_up in &wallet.ledger {
                println!("  +${:.2} on {}", top_up.amount, top_up.at.format("%Y-%m-%d %H:%M"));
            }
        }
        WalletCommand::Topup { amount: None } => {
            println!("Pick an amount to add:");
            for amount in PRESET_AMOUNTS {
                println!("  ${amount:.2}");
            }
            println!("or pass a custom amount: kiosk-cli wallet topup <amount>");
        }
        WalletCommand::Topup { amount: Some(amount) } => {
            let balance = kiosk.top_up(amount)?;
            println!("Successfully added ${amount:.2} to your wallet!");
            println!("Balance: ${balance:.2}");
        }
    }
    Ok(())
}

async fn cmd_background(kiosk: &mut Kiosk, cmd: BackgroundCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        BackgroundCommand::Show => match kiosk.applied_gradient()? {
            Some(gradient) => {
                println!("{}", gradient.css);
                println!("{}", accessibility_badge(gradient.accessible));
            }
            None => println!("No custom background selected, using the default."),
        },
        BackgroundCommand::Options { palette } => {
            kiosk.load_palette(&palette).await?;

            println!("Extracted colors:");
            for swatch in kiosk.palette().into_iter().flatten() {
                let contrast = text_contrast(swatch.rgb);
                println!(
                    "  {:<12} {}  on black {:.2}, on white {:.2}",
                    swatch.role, swatch.hex, contrast.on_black, contrast.on_white
                );
            }

            println!("Gradient options:");
            for (index, candidate) in kiosk.candidates().iter().enumerate() {
                println!(
                    "{:>2}  [{}] {}",
                    index,
                    accessibility_badge(candidate.accessible),
                    candidate.css
                );
            }
        }
        BackgroundCommand::Set { palette, index } => {
            kiosk.load_palette(&palette).await?;
            kiosk.select_gradient(index)?;
            kiosk.apply_gradient()?;
            println!("Background applied successfully! You will see it on your home page.");
        }
        BackgroundCommand::Reset => {
            kiosk.reset_customization()?;
            println!("Customization reset.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let config = KioskConfig::load()?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            LevelFilter::Debug,
            Config::default(),
            File::create(&config.log_path)?,
        ),
    ])?;

    let cli = Cli::parse();

    let mut builder = Kiosk::builder().profile_path(&config.profile_path);
    if let Some(path) = &config.machines_path {
        builder = builder.machines_from_file(path);
    }
    let mut kiosk = builder.build()?;

    match cli.cmd {
        Commands::Machines(args) => cmd_machines(&kiosk, args),
        Commands::Scan => cmd_scan(&kiosk).await?,
        Commands::Cart(cmd) => cmd_cart(&mut kiosk, cmd)?,
        Commands::Wallet(cmd) => cmd_wallet(&mut kiosk, cmd)?,
        Commands::Background(cmd) => cmd_background(&mut kiosk, cmd).await?,
    }

    Ok(())
}
