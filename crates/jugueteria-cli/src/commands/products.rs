// Catalog browsing commands (public)

use anyhow::Result;
use clap::Subcommand;

use super::{enter, AppContext};
use crate::output::{format_money, print_field, print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List the catalog
    List {
        /// Show only products whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one product, reviews included
    Show {
        /// Product ID
        id: i64,
    },
}

pub async fn run(command: ProductsCommand, ctx: &AppContext) -> Result<()> {
    match command {
        ProductsCommand::List { search } => list(ctx, search).await,
        ProductsCommand::Show { id } => show(ctx, id).await,
    }
}

async fn list(ctx: &AppContext, search: Option<String>) -> Result<()> {
    enter(ctx, "/products")?;

    let mut products = ctx.client.list_products().await?;

    // Filtering happens locally, on the already-fetched list
    if let Some(term) = search {
        let term = term.to_lowercase();
        products.retain(|p| p.name.to_lowercase().contains(&term));
    }

    if ctx.output.is_text() {
        if products.is_empty() {
            println!("No products found");
            return Ok(());
        }
        print_table_header(&[("ID", 6), ("SKU", 12), ("NAME", 32), ("PRICE", 10), ("STOCK", 6)]);
        for product in &products {
            print_table_row(&[
                (&product.id.to_string(), 6),
                (&product.sku, 12),
                (&product.name, 32),
                (&format_money(product.price), 10),
                (&product.stock.to_string(), 6),
            ]);
        }
    } else {
        ctx.output.print_value(&products);
    }
    Ok(())
}

async fn show(ctx: &AppContext, id: i64) -> Result<()> {
    enter(ctx, &format!("/product/{id}"))?;

    let product = ctx.client.get_product(id).await?;
    let reviews = ctx.client.product_reviews(id).await?;

    if ctx.output.is_text() {
        print_field("ID", &product.id.to_string());
        print_field("SKU", &product.sku);
        print_field("Name", &product.name);
        print_field("Price", &format_money(product.price));
        print_field("Stock", &product.stock.to_string());
        print_field("Category", &product.category_name);
        if !product.description.is_empty() {
            print_field("Description", &product.description);
        }
        if reviews.is_empty() {
            println!("No reviews yet");
        } else {
            println!("Reviews:");
            for review in &reviews {
                println!("  [{}/5] {} - {}", review.rating, review.user_name, review.comment);
            }
        }
    } else {
        ctx.output.print_value(&serde_json::json!({
            "product": product,
            "reviews": reviews,
        }));
    }
    Ok(())
}

pub async fn categories(ctx: &AppContext) -> Result<()> {
    enter(ctx, "/products")?;

    let categories = ctx.client.list_categories().await?;

    if ctx.output.is_text() {
        for category in &categories {
            println!("{:<6} {}", category.id, category.name);
        }
    } else {
        ctx.output.print_value(&categories);
    }
    Ok(())
}
