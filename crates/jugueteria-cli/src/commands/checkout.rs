// Checkout commands (authenticated)
// The payment provider's widget normally produces the card token; here it
// arrives as an argument. The backend builds the preference and the order
// from the server-side cart.

use anyhow::{bail, Result};
use clap::Subcommand;
use jugueteria_client::{OrderRequest, PaymentData};

use super::{enter, AppContext};
use crate::output::{format_money, print_field};

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Review the cart before paying
    Summary,

    /// Create the payment preference and place the order
    Pay {
        /// Shipping address
        #[arg(long)]
        address: String,

        /// Card token issued by the payment widget
        #[arg(long)]
        card_token: String,

        /// Payment method identifier (e.g. visa)
        #[arg(long)]
        payment_method: String,

        /// Number of installments
        #[arg(long, default_value = "1")]
        installments: u32,
    },
}

pub async fn run(command: CheckoutCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/checkout-summary")?;

    match command {
        CheckoutCommand::Summary => summary(ctx).await,
        CheckoutCommand::Pay {
            address,
            card_token,
            payment_method,
            installments,
        } => pay(ctx, address, card_token, payment_method, installments).await,
    }
}

async fn summary(ctx: &AppContext) -> Result<()> {
    let cart = ctx.client.get_cart().await?;

    if ctx.output.is_text() {
        if cart.items.is_empty() {
            println!("The cart is empty; nothing to check out");
            return Ok(());
        }
        for item in &cart.items {
            println!(
                "{} x{} = {}",
                item.product_name,
                item.quantity,
                format_money(item.subtotal)
            );
        }
        print_field("Total", &format_money(cart.total));
    } else {
        ctx.output.print_value(&cart);
    }
    Ok(())
}

async fn pay(
    ctx: &AppContext,
    address: String,
    card_token: String,
    payment_method: String,
    installments: u32,
) -> Result<()> {
    if address.trim().is_empty() {
        bail!("shipping address must not be empty");
    }
    let Some(profile) = ctx.client.session().current_value() else {
        bail!("no active session");
    };

    let preference = ctx.client.create_payment_preference().await?;
    tracing::debug!(preference = %preference.preference_id, "payment preference created");

    let order = ctx
        .client
        .create_order(&OrderRequest {
            shipping_address: address,
            payment_data: PaymentData {
                token: card_token,
                payment_method_id: payment_method,
                installments,
                payer_email: profile.email,
            },
        })
        .await?;

    if ctx.output.is_text() {
        println!("Order placed");
        print_field("Order", &order.id.to_string());
        print_field("Status", &order.status);
        print_field("Total", &format_money(order.total));
    } else {
        ctx.output.print_value(&order);
    }
    Ok(())
}
