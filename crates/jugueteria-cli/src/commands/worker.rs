// Worker panel commands (requires ROLE_ADMIN or ROLE_WORKER)

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use jugueteria_client::{PosOrderRequest, PosSaleItem, ReturnItem, ReturnRequest};

use super::{enter, orders::print_order, AppContext};
use crate::output::{format_money, print_field};

#[derive(Subcommand)]
pub enum WorkerCommand {
    /// Manage order fulfilment
    Orders {
        #[command(subcommand)]
        command: WorkerOrdersCommand,
    },

    /// Ring up an in-store sale at the POS terminal
    Pos {
        /// Item as <product-id>:<quantity> (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },

    /// Process a return against an existing order
    Returns {
        /// Order ID
        #[arg(long)]
        order: i64,

        /// Put the returned units back into sellable stock
        #[arg(long)]
        restock: bool,

        /// Returned line as <order-detail-id>:<quantity>:<reason> (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkerOrdersCommand {
    /// List every order in the system
    List,

    /// Update an order's status
    SetStatus {
        /// Order ID
        id: i64,

        /// New status (e.g. PAGADO, ENVIADO, ENTREGADO, CANCELADO)
        status: String,
    },
}

pub async fn run(command: WorkerCommand, ctx: &AppContext) -> Result<()> {
    match command {
        WorkerCommand::Orders { command } => orders(command, ctx).await,
        WorkerCommand::Pos { items } => pos_sale(ctx, items).await,
        WorkerCommand::Returns {
            order,
            restock,
            items,
        } => process_return(ctx, order, restock, items).await,
    }
}

async fn orders(command: WorkerOrdersCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/worker/orders")?;

    match command {
        WorkerOrdersCommand::List => {
            let orders = ctx.client.list_orders().await?;
            super::orders::print_order_table(ctx, &orders);
        }
        WorkerOrdersCommand::SetStatus { id, status } => {
            let order = ctx.client.update_order_status(id, &status).await?;
            print_order(ctx, &order);
        }
    }
    Ok(())
}

async fn pos_sale(ctx: &AppContext, items: Vec<String>) -> Result<()> {
    enter(ctx, "/worker/pos")?;

    let items = parse_pos_items(&items)?;

    // The POS screen prices items from the live catalog
    let catalog = ctx.client.list_products().await?;
    let prices: HashMap<i64, f64> = catalog.iter().map(|p| (p.id, p.price)).collect();

    let mut total = 0.0;
    for item in &items {
        let price = prices
            .get(&item.product_id)
            .with_context(|| format!("product {} not found in catalog", item.product_id))?;
        total += price * f64::from(item.quantity);
    }

    let order = ctx
        .client
        .create_physical_sale(&PosOrderRequest { total, items })
        .await?;

    if ctx.output.is_text() {
        println!("Sale registered");
        print_field("Order", &order.id.to_string());
        print_field("Total", &format_money(order.total));
    } else {
        ctx.output.print_value(&order);
    }
    Ok(())
}

async fn process_return(
    ctx: &AppContext,
    order_id: i64,
    restock: bool,
    items: Vec<String>,
) -> Result<()> {
    enter(ctx, "/worker/returns")?;

    let items = parse_return_items(&items)?;
    let order = ctx
        .client
        .process_return(&ReturnRequest {
            order_id,
            restock,
            items,
        })
        .await?;

    if !ctx.quiet && ctx.output.is_text() {
        println!("Return processed for order {order_id}");
    }
    print_order(ctx, &order);
    Ok(())
}

/// Parse `<product-id>:<quantity>` sale lines.
fn parse_pos_items(raw: &[String]) -> Result<Vec<PosSaleItem>> {
    raw.iter()
        .map(|entry| {
            let (id, quantity) = entry
                .split_once(':')
                .with_context(|| format!("'{entry}' is not <product-id>:<quantity>"))?;
            let item = PosSaleItem {
                product_id: id
                    .parse()
                    .with_context(|| format!("'{id}' is not a product id"))?,
                quantity: quantity
                    .parse()
                    .with_context(|| format!("'{quantity}' is not a quantity"))?,
            };
            if item.quantity == 0 {
                bail!("quantity must be at least 1 in '{entry}'");
            }
            Ok(item)
        })
        .collect()
}

/// Parse `<order-detail-id>:<quantity>:<reason>` return lines.
fn parse_return_items(raw: &[String]) -> Result<Vec<ReturnItem>> {
    raw.iter()
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let (Some(id), Some(quantity), Some(reason)) =
                (parts.next(), parts.next(), parts.next())
            else {
                bail!("'{entry}' is not <order-detail-id>:<quantity>:<reason>");
            };
            if reason.trim().is_empty() {
                bail!("return reason must not be empty in '{entry}'");
            }
            let item = ReturnItem {
                order_detail_id: id
                    .parse()
                    .with_context(|| format!("'{id}' is not an order detail id"))?,
                quantity: quantity
                    .parse()
                    .with_context(|| format!("'{quantity}' is not a quantity"))?,
                reason: reason.trim().to_string(),
            };
            if item.quantity == 0 {
                bail!("quantity must be at least 1 in '{entry}'");
            }
            Ok(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pos_items() {
        let items = parse_pos_items(&["3:2".to_string(), "7:1".to_string()]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, 3);
        assert_eq!(items[0].quantity, 2);

        assert!(parse_pos_items(&["3".to_string()]).is_err());
        assert!(parse_pos_items(&["3:zero".to_string()]).is_err());
        assert!(parse_pos_items(&["3:0".to_string()]).is_err());
    }

    #[test]
    fn test_parse_return_items() {
        let items = parse_return_items(&["12:1:damaged box".to_string()]).unwrap();
        assert_eq!(items[0].order_detail_id, 12);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].reason, "damaged box");

        // The reason may itself contain colons
        let items = parse_return_items(&["12:1:arrived late: customer refused".to_string()]).unwrap();
        assert_eq!(items[0].reason, "arrived late: customer refused");

        assert!(parse_return_items(&["12:1".to_string()]).is_err());
        assert!(parse_return_items(&["12:1: ".to_string()]).is_err());
        assert!(parse_return_items(&["12:0:reason".to_string()]).is_err());
    }
}
