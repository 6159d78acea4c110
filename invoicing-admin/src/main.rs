//! invoicing-admin entry point.

use admin_core::observability::init_tracing;
use clap::{Parser, Subcommand};
use invoicing_admin::config::AdminConfig;
use invoicing_admin::models::{filter_by_term, DocumentRecord};
use invoicing_admin::services::{get_metrics, init_metrics, ApiClient, DetailEditor, ProductCatalog};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "invoicing-admin", version, about = "Inspect and recalculate document totals")]
struct Cli {
    /// Dump Prometheus metrics to stderr before exiting.
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a document's lines and totals.
    Totals { document_id: i64 },
    /// Recompute a document's totals and save them.
    Recalculate { document_id: i64 },
    /// List catalog products, optionally filtered by name, code or category.
    Products { term: Option<String> },
    /// List documents, optionally filtered by id, client id or company id.
    Documents { term: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AdminConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.common.service_name,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api.base_url,
        "Starting invoicing-admin"
    );

    let client = Arc::new(ApiClient::new(&config.api)?);

    match cli.command {
        Command::Totals { document_id } => {
            let editor = DetailEditor::open(client.clone(), client.as_ref(), document_id).await?;
            print_document(&editor)?;
        }
        Command::Recalculate { document_id } => {
            let mut editor =
                DetailEditor::open(client.clone(), client.as_ref(), document_id).await?;
            let saved = editor.save().await?;
            print_document(&editor)?;
            println!(
                "Saved document #{}: IGV S/. {:.2}, total S/. {:.2}",
                saved.id.unwrap_or(document_id),
                saved.tax_amount,
                saved.total_amount
            );
        }
        Command::Products { term } => {
            let products = client.list_products().await?;
            for product in filter_by_term(&products, term.as_deref().unwrap_or_default()) {
                println!(
                    "{:<40} S/. {:>10.2}  stock {:>5}  {}",
                    product.label(),
                    product.price,
                    product.stock,
                    product.category
                );
            }
        }
        Command::Documents { term } => {
            let documents = client.list::<DocumentRecord>().await?;
            for document in filter_by_term(&documents, term.as_deref().unwrap_or_default()) {
                println!(
                    "#{:<6} {}  client {:>5}  company {:>5}  IGV S/. {:>10.2}  total S/. {:>10.2}",
                    document.id.map(|id| id.to_string()).unwrap_or_default(),
                    document.issue_date,
                    document.client_id,
                    document.company_id,
                    document.tax_amount,
                    document.total_amount
                );
            }
        }
    }

    if cli.print_metrics {
        eprintln!("{}", get_metrics());
    }

    Ok(())
}

fn print_document(editor: &DetailEditor) -> anyhow::Result<()> {
    for (index, item) in editor.document().line_items().iter().enumerate() {
        println!(
            "{:>3}  {:<40} {:>5} x S/. {:>10.2}  desc S/. {:>8.2}  IGV S/. {:>8.2}",
            index,
            editor.label_for(item),
            item.quantity(),
            item.unit_price(),
            item.discount(),
            item.tax()
        );
    }

    let totals = editor.totals()?;
    println!("Subtotal:  S/. {:.2}", totals.subtotal);
    println!("IGV (18%): S/. {:.2}", totals.total_tax);
    println!("Total:     S/. {:.2}", totals.grand_total);
    Ok(())
}
