// Shopping cart commands (authenticated)

use anyhow::{bail, Result};
use clap::Subcommand;
use jugueteria_client::{Cart, CartItemRequest};

use super::{enter, AppContext};
use crate::output::{format_money, print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents
    Show,

    /// Add a product (or bump its quantity)
    Add {
        /// Product ID
        product: i64,

        /// Units to add
        #[arg(long, default_value = "1")]
        quantity: u32,
    },

    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        product: i64,

        /// New quantity
        #[arg(long)]
        quantity: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID
        product: i64,
    },

    /// Empty the cart
    Clear,
}

pub async fn run(command: CartCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/cart")?;

    match command {
        CartCommand::Show => {
            let cart = ctx.client.get_cart().await?;
            print_cart(ctx, &cart);
        }
        CartCommand::Add { product, quantity } => {
            if quantity == 0 {
                bail!("quantity must be at least 1");
            }
            let cart = ctx
                .client
                .add_cart_item(&CartItemRequest {
                    product_id: product,
                    quantity,
                })
                .await?;
            print_cart(ctx, &cart);
        }
        CartCommand::Update { product, quantity } => {
            if quantity == 0 {
                bail!("quantity must be at least 1; use remove instead");
            }
            let cart = ctx.client.update_cart_item(product, quantity).await?;
            print_cart(ctx, &cart);
        }
        CartCommand::Remove { product } => {
            let cart = ctx.client.remove_cart_item(product).await?;
            print_cart(ctx, &cart);
        }
        CartCommand::Clear => {
            ctx.client.clear_cart().await?;
            if !ctx.quiet {
                println!("Cart emptied");
            }
        }
    }
    Ok(())
}

fn print_cart(ctx: &AppContext, cart: &Cart) {
    if !ctx.output.is_text() {
        ctx.output.print_value(cart);
        return;
    }
    if cart.items.is_empty() {
        println!("The cart is empty");
        return;
    }
    print_table_header(&[("ID", 6), ("PRODUCT", 32), ("QTY", 5), ("UNIT", 10), ("SUBTOTAL", 10)]);
    for item in &cart.items {
        print_table_row(&[
            (&item.product_id.to_string(), 6),
            (&item.product_name, 32),
            (&item.quantity.to_string(), 5),
            (&format_money(item.unit_price), 10),
            (&format_money(item.subtotal), 10),
        ]);
    }
    println!("Total: {}", format_money(cart.total));
}
