//! Product management CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::App;
use crate::output::{self, OutputFormat};
use expiry_core::error::AppError;
use expiry_core::types::{ProductId, UserId};
use expiry_entity::product::{NewProduct, Product, ProductUpdate};
use expiry_service::ProductWrite;

/// Arguments for product commands
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Owning user
    #[arg(long)]
    pub owner: UserId,

    /// Product subcommand
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List the owner's products
    List,
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
    /// Add a product
    Add {
        /// Product name
        #[arg(long)]
        name: String,
        /// Category
        #[arg(long, default_value = "")]
        category: String,
        /// Batch number
        #[arg(long)]
        batch_no: String,
        /// Barcode
        #[arg(long)]
        barcode: Option<String>,
        /// Manufacture date (YYYY-MM-DD)
        #[arg(long)]
        mfg_date: NaiveDate,
        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        exp_date: NaiveDate,
        /// Units on hand
        #[arg(long, default_value_t = 1)]
        quantity: i32,
    },
    /// Update a product
    Update {
        /// Product ID
        id: ProductId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New batch number
        #[arg(long)]
        batch_no: Option<String>,
        /// New barcode (empty string clears it)
        #[arg(long)]
        barcode: Option<String>,
        /// New manufacture date
        #[arg(long)]
        mfg_date: Option<NaiveDate>,
        /// New expiry date
        #[arg(long)]
        exp_date: Option<NaiveDate>,
        /// New quantity
        #[arg(long)]
        quantity: Option<i32>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

/// Product display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    /// Product ID
    id: String,
    /// Name
    name: String,
    /// Category
    category: String,
    /// Batch
    batch_no: String,
    /// Quantity
    quantity: i32,
    /// Expiry date
    exp_date: String,
    /// Days left
    days_left: i64,
}

impl ProductRow {
    fn new(product: &Product, today: NaiveDate) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            batch_no: product.batch_no.clone(),
            quantity: product.quantity,
            exp_date: product.exp_date.to_string(),
            days_left: product.days_until_expiry(today),
        }
    }
}

/// Execute product commands
pub async fn execute(args: &ProductArgs, app: &App, format: OutputFormat) -> Result<(), AppError> {
    let owner = args.owner;
    let today = app.engine.today();

    match &args.command {
        ProductCommand::List => {
            let products = app.products.list(owner).await?;
            let rows: Vec<ProductRow> =
                products.iter().map(|p| ProductRow::new(p, today)).collect();
            output::print_list(&rows, format);
        }
        ProductCommand::Show { id } => {
            let product = app.products.get(owner, *id).await?;
            print_product(&product, today, format);
        }
        ProductCommand::Add {
            name,
            category,
            batch_no,
            barcode,
            mfg_date,
            exp_date,
            quantity,
        } => {
            let input = NewProduct {
                name: name.clone(),
                category: category.clone(),
                batch_no: batch_no.clone(),
                barcode: barcode.clone(),
                mfg_date: *mfg_date,
                exp_date: *exp_date,
                quantity: *quantity,
            };
            let write = app.products.create(owner, input).await?;
            report_write("created", &write, format);
        }
        ProductCommand::Update {
            id,
            name,
            category,
            batch_no,
            barcode,
            mfg_date,
            exp_date,
            quantity,
        } => {
            let update = ProductUpdate {
                name: name.clone(),
                category: category.clone(),
                batch_no: batch_no.clone(),
                barcode: barcode.clone(),
                mfg_date: *mfg_date,
                exp_date: *exp_date,
                quantity: *quantity,
            };
            let write = app.products.update(owner, *id, update).await?;
            report_write("updated", &write, format);
        }
        ProductCommand::Delete { id } => {
            app.products.delete(owner, *id).await?;
            output::print_success(&format!("Product {id} deleted"));
        }
    }

    Ok(())
}

fn print_product(product: &Product, today: NaiveDate, format: OutputFormat) {
    let rows = [
        ("ID", product.id.to_string()),
        ("Name", product.name.clone()),
        ("Category", product.category.clone()),
        ("Batch", product.batch_no.clone()),
        ("Barcode", product.barcode.clone().unwrap_or_default()),
        ("Manufactured", product.mfg_date.to_string()),
        ("Expires", product.exp_date.to_string()),
        ("Days left", product.days_until_expiry(today).to_string()),
        ("Quantity", product.quantity.to_string()),
    ];
    output::print_record(product, &rows, format);
}

fn report_write(action: &str, write: &ProductWrite, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_record(write, &[], format);
        return;
    }

    output::print_success(&format!("Product {} {action}", write.product.id));
    if write.product.has_inverted_dates() {
        output::print_warning("Expiry date is before the manufacture date.");
    }
    match write.derivation.as_ref().and_then(|d| d.notification.as_ref()) {
        Some(notification) => output::print_kv("Notification", &notification.message),
        None => output::print_kv("Notification", "none"),
    }
}
