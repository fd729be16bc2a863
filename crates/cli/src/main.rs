use anyhow::Context;
use clap::{Parser, Subcommand};
use hl7::MessageStamp;
use labbridge_core::constants::{
    DEFAULT_RECEIVING_APPLICATION, DEFAULT_RECEIVING_FACILITY, DEFAULT_SENDING_APPLICATION,
    DEFAULT_SENDING_FACILITY,
};
use labbridge_core::{
    ensure_sendable, export, CoreConfig, Order, OrderStatus, ResultEntry, CBC_PANEL,
};
use labbridge_transport::ResultsClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "labbridge")]
#[command(about = "LabBridge blood-test result relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported panel parameters and their reference ranges
    Catalog,
    /// Print a blank order file seeded from the catalog
    Template {
        /// Accession number for the new order
        #[arg(default_value = "ACC-0001")]
        accession: String,
    },
    /// Assemble the HL7 message for an order file
    Encode {
        /// Path to the order YAML file
        order_file: PathBuf,
        /// Export the message to a timestamp-named file in this directory
        /// instead of printing it
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Assemble the message and copy it to the system clipboard
    Copy {
        /// Path to the order YAML file
        order_file: PathBuf,
    },
    /// Assemble, validate, and submit the message to the results endpoint
    Send {
        /// Path to the order YAML file
        order_file: PathBuf,
    },
}

/// Environment variables (also loaded from `.env` via dotenvy):
/// - `LABBRIDGE_ENDPOINT`: results endpoint URL
/// - `LABBRIDGE_SENDING_APP` / `LABBRIDGE_SENDING_FACILITY`
/// - `LABBRIDGE_RECEIVING_APP` / `LABBRIDGE_RECEIVING_FACILITY`
fn config_from_env() -> anyhow::Result<CoreConfig> {
    let var = |name: &str, default: &str| {
        std::env::var(name).unwrap_or_else(|_| default.to_string())
    };

    let config = CoreConfig::new(
        var("LABBRIDGE_SENDING_APP", DEFAULT_SENDING_APPLICATION),
        var("LABBRIDGE_SENDING_FACILITY", DEFAULT_SENDING_FACILITY),
        var("LABBRIDGE_RECEIVING_APP", DEFAULT_RECEIVING_APPLICATION),
        var("LABBRIDGE_RECEIVING_FACILITY", DEFAULT_RECEIVING_FACILITY),
        var("LABBRIDGE_ENDPOINT", "http://localhost:8080/api/results"),
    )?;
    Ok(config)
}

fn load_order(path: &PathBuf) -> anyhow::Result<Order> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read order file {}", path.display()))?;
    let order = Order::parse(&text)?;
    Ok(order)
}

fn assemble_order(config: &CoreConfig, order: &Order) -> anyhow::Result<hl7::EncodedMessage> {
    let worksheet = order.worksheet()?;
    let message = worksheet.generate(
        &config.message_header(),
        &order.identity,
        &order.request,
        &MessageStamp::generate(None),
    )?;
    Ok(message)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labbridge=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = config_from_env()?;

    match cli.command {
        Commands::Catalog => {
            for spec in CBC_PANEL {
                println!(
                    "{:<6} {:<44} {:>10}  {}",
                    spec.code, spec.name, spec.unit, spec.reference_display
                );
            }
        }
        Commands::Template { accession } => {
            let order = Order {
                request: hl7::ObservationRequest {
                    accession_number: accession
                        .parse()
                        .context("accession number cannot be empty")?,
                    test_code: "CBC".to_string(),
                    test_name: "Complete Blood Count".to_string(),
                    observed_at: chrono::Utc::now(),
                },
                identity: hl7::PatientIdentity::default(),
                status: OrderStatus::Pending,
                entries: CBC_PANEL
                    .iter()
                    .map(|spec| ResultEntry {
                        code: spec.code.to_string(),
                        value: 0.0,
                        flag_override: None,
                    })
                    .collect(),
            };
            print!("{}", order.render()?);
        }
        Commands::Encode { order_file, out_dir } => {
            let order = load_order(&order_file)?;
            let message = assemble_order(&config, &order)?;
            match out_dir {
                Some(dir) => {
                    let path = export::export_to_file(&dir, &message)?;
                    println!("{}", path.display());
                }
                None => {
                    // Segments are CR-terminated on the wire; print one per
                    // line for the terminal.
                    for segment in message.segments() {
                        println!("{segment}");
                    }
                }
            }
        }
        Commands::Copy { order_file } => {
            let order = load_order(&order_file)?;
            let message = assemble_order(&config, &order)?;
            if export::copy_to_clipboard(&message) {
                println!("message copied to clipboard");
            } else {
                anyhow::bail!("failed to copy message to clipboard");
            }
        }
        Commands::Send { order_file } => {
            let order = load_order(&order_file)?;
            let message = assemble_order(&config, &order)?;
            let message = ensure_sendable(Some(&message), order.status, &order.identity)?;

            let client = ResultsClient::new(config.results_endpoint());
            let receipt = client.submit(message).await?;
            println!(
                "result for {} accepted (status {})",
                order.request.accession_number, receipt.status
            );
        }
    }

    Ok(())
}
