// Own order history commands (authenticated)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use jugueteria_client::Order;

use super::{enter, AppContext};
use crate::output::{format_money, print_field, print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders
    List,

    /// Show one order with its line items
    Show {
        /// Order ID
        id: i64,
    },

    /// Download an order's invoice PDF
    Invoice {
        /// Order ID
        id: i64,

        /// Output file (defaults to invoice-<id>.pdf)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn run(command: OrdersCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/my-orders")?;

    match command {
        OrdersCommand::List => {
            let orders = ctx.client.my_orders().await?;
            print_order_table(ctx, &orders);
        }
        OrdersCommand::Show { id } => {
            let order = ctx.client.get_order(id).await?;
            print_order(ctx, &order);
        }
        OrdersCommand::Invoice { id, out } => {
            let bytes = ctx.client.download_invoice(id).await?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("invoice-{id}.pdf")));
            std::fs::write(&out, bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            if !ctx.quiet {
                println!("Invoice saved to {}", out.display());
            }
        }
    }
    Ok(())
}

pub fn print_order_table(ctx: &AppContext, orders: &[Order]) {
    if !ctx.output.is_text() {
        ctx.output.print_value(&orders);
        return;
    }
    if orders.is_empty() {
        println!("No orders found");
        return;
    }
    print_table_header(&[("ID", 6), ("DATE", 22), ("STATUS", 12), ("TOTAL", 10)]);
    for order in orders {
        print_table_row(&[
            (&order.id.to_string(), 6),
            (&order.placed_at, 22),
            (&order.status, 12),
            (&format_money(order.total), 10),
        ]);
    }
}

pub fn print_order(ctx: &AppContext, order: &Order) {
    if !ctx.output.is_text() {
        ctx.output.print_value(order);
        return;
    }
    print_field("Order", &order.id.to_string());
    print_field("Date", &order.placed_at);
    print_field("Status", &order.status);
    print_field("Address", &order.shipping_address);
    print_field("Total", &format_money(order.total));
    for item in &order.items {
        let returned = match item.returned_quantity {
            Some(qty) if qty > 0 => format!(" ({qty} returned)"),
            _ => String::new(),
        };
        println!(
            "  #{} {} x{} @ {}{}",
            item.id,
            item.product_name,
            item.quantity,
            format_money(item.unit_price),
            returned
        );
    }
}
