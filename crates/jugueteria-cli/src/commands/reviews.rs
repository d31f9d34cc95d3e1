// Review writing (authenticated; reading happens on the product page)

use anyhow::{bail, Result};
use clap::Subcommand;
use jugueteria_client::ReviewRequest;

use super::{enter, AppContext};

#[derive(Subcommand)]
pub enum ReviewsCommand {
    /// Review a product
    Add {
        /// Product ID
        product: i64,

        /// 1-5 stars
        #[arg(long)]
        rating: u8,

        /// Review text
        #[arg(long)]
        comment: String,
    },
}

pub async fn run(command: ReviewsCommand, ctx: &AppContext) -> Result<()> {
    match command {
        ReviewsCommand::Add {
            product,
            rating,
            comment,
        } => {
            if !(1..=5).contains(&rating) {
                bail!("rating must be between 1 and 5");
            }
            if comment.trim().is_empty() {
                bail!("comment must not be empty");
            }
            // Reviews are written from the product page
            enter(ctx, &format!("/product/{product}"))?;

            let review = ctx
                .client
                .create_review(product, &ReviewRequest { rating, comment })
                .await?;

            if ctx.output.is_text() {
                if !ctx.quiet {
                    println!("Review #{} published", review.id);
                }
            } else {
                ctx.output.print_value(&review);
            }
        }
    }
    Ok(())
}
