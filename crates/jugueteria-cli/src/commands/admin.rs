// Administration panel commands (requires ROLE_ADMIN)

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use jugueteria_client::{
    ImageUpload, ProductRequest, UserCreateRequest, UserUpdateRequest,
};

use super::{enter, orders::print_order, validate_email, validate_password, AppContext};
use crate::output::{format_money, print_field, print_table_header, print_table_row};

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },

    /// Manage the product inventory
    Inventory {
        #[command(subcommand)]
        command: InventoryCommand,
    },

    /// Manage orders across all customers
    Orders {
        #[command(subcommand)]
        command: AdminOrdersCommand,
    },

    /// Sales reports
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },

    /// Moderate product reviews
    Reviews {
        #[command(subcommand)]
        command: AdminReviewsCommand,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all accounts
    List,

    /// Create an account with explicit roles
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Role name (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Replace an account's data
    Update {
        /// User ID
        id: i64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// New password; omit to keep the current one
        #[arg(long)]
        password: Option<String>,
        /// Role name (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Delete an account
    Delete {
        /// User ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Create a product
    Create {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: i64,
        /// Stock level that triggers a low-inventory alert
        #[arg(long, default_value = "5")]
        alert_threshold: i64,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        supplier: Option<i64>,
        #[arg(long, default_value = "")]
        image_url: String,
        /// Image file to upload alongside the product data
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Replace a product's data
    Update {
        /// Product ID
        id: i64,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: i64,
        #[arg(long, default_value = "5")]
        alert_threshold: i64,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        supplier: Option<i64>,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum AdminOrdersCommand {
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

#[derive(Subcommand)]
pub enum ReportsCommand {
    /// Aggregated sales for a date range
    Sales {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
}

#[derive(Subcommand)]
pub enum AdminReviewsCommand {
    /// List every review
    List,

    /// Remove a review
    Delete {
        /// Review ID
        id: i64,
    },
}

pub async fn run(command: AdminCommand, ctx: &AppContext) -> Result<()> {
    match command {
        AdminCommand::Users { command } => users(command, ctx).await,
        AdminCommand::Inventory { command } => inventory(command, ctx).await,
        AdminCommand::Orders { command } => orders(command, ctx).await,
        AdminCommand::Reports { command } => reports(command, ctx).await,
        AdminCommand::Reviews { command } => reviews(command, ctx).await,
    }
}

async fn users(command: UsersCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/admin/users")?;

    match command {
        UsersCommand::List => {
            let users = ctx.client.list_users().await?;
            if ctx.output.is_text() {
                print_table_header(&[("ID", 6), ("NAME", 28), ("EMAIL", 30), ("ROLES", 28)]);
                for user in &users {
                    let name = format!("{} {}", user.first_name, user.last_name);
                    print_table_row(&[
                        (&user.id.to_string(), 6),
                        (&name, 28),
                        (&user.email, 30),
                        (&user.roles.join(","), 28),
                    ]);
                }
            } else {
                ctx.output.print_value(&users);
            }
        }
        UsersCommand::Create {
            first_name,
            last_name,
            email,
            password,
            roles,
        } => {
            validate_email(&email)?;
            validate_password(&password)?;
            let user = ctx
                .client
                .create_user(&UserCreateRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    roles,
                })
                .await?;
            if !ctx.quiet {
                println!("Created user {}", user.id);
            }
            ctx.output.print_value(&user);
        }
        UsersCommand::Update {
            id,
            first_name,
            last_name,
            email,
            password,
            roles,
        } => {
            validate_email(&email)?;
            if let Some(ref password) = password {
                validate_password(password)?;
            }
            let user = ctx
                .client
                .update_user(
                    id,
                    &UserUpdateRequest {
                        first_name,
                        last_name,
                        email,
                        password,
                        roles,
                    },
                )
                .await?;
            if !ctx.quiet {
                println!("Updated user {}", user.id);
            }
            ctx.output.print_value(&user);
        }
        UsersCommand::Delete { id } => {
            ctx.client.delete_user(id).await?;
            if !ctx.quiet {
                println!("Deleted user {id}");
            }
        }
    }
    Ok(())
}

async fn inventory(command: InventoryCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/admin/inventory")?;

    match command {
        InventoryCommand::Create {
            sku,
            name,
            description,
            price,
            stock,
            alert_threshold,
            category,
            supplier,
            image_url,
            image,
        } => {
            let request = ProductRequest {
                sku,
                name,
                description,
                price,
                stock,
                alert_threshold,
                category_id: category,
                supplier_id: supplier,
                image_url,
            };
            let product = ctx
                .client
                .create_product(&request, load_image(image)?)
                .await?;
            if !ctx.quiet {
                println!("Created product {}", product.id);
            }
            ctx.output.print_value(&product);
        }
        InventoryCommand::Update {
            id,
            sku,
            name,
            description,
            price,
            stock,
            alert_threshold,
            category,
            supplier,
            image_url,
            image,
        } => {
            let request = ProductRequest {
                sku,
                name,
                description,
                price,
                stock,
                alert_threshold,
                category_id: category,
                supplier_id: supplier,
                image_url,
            };
            let product = ctx
                .client
                .update_product(id, &request, load_image(image)?)
                .await?;
            if !ctx.quiet {
                println!("Updated product {}", product.id);
            }
            ctx.output.print_value(&product);
        }
        InventoryCommand::Delete { id } => {
            ctx.client.delete_product(id).await?;
            if !ctx.quiet {
                println!("Deleted product {id}");
            }
        }
    }
    Ok(())
}

fn load_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes =
        std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(Some(ImageUpload { file_name, bytes }))
}

async fn orders(command: AdminOrdersCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/admin/orders")?;

    match command {
        AdminOrdersCommand::List => {
            let orders = ctx.client.list_orders().await?;
            super::orders::print_order_table(ctx, &orders);
        }
        AdminOrdersCommand::SetStatus { id, status } => {
            let order = ctx.client.update_order_status(id, &status).await?;
            print_order(ctx, &order);
        }
    }
    Ok(())
}

async fn reports(command: ReportsCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/admin/reports")?;

    match command {
        ReportsCommand::Sales { start, end } => {
            let start_date = parse_report_date(&start)?;
            let end_date = parse_report_date(&end)?;
            if end_date < start_date {
                anyhow::bail!("end date is before start date");
            }

            let report = ctx.client.sales_report(&start, &end).await?;

            if ctx.output.is_text() {
                print_field("Period", &format!("{} .. {}", report.start_date, report.end_date));
                print_field("Orders", &report.order_count.to_string());
                print_field("Revenue", &format_money(report.total_sales));
                if !report.daily_sales.is_empty() {
                    println!("Daily sales:");
                    for day in &report.daily_sales {
                        println!("  {}  {}", day.date, format_money(day.total));
                    }
                }
                if !report.top_products.is_empty() {
                    println!("Top products:");
                    for product in &report.top_products {
                        println!(
                            "  {} - {} sold, {}",
                            product.product_name,
                            product.quantity_sold,
                            format_money(product.total_revenue)
                        );
                    }
                }
            } else {
                ctx.output.print_value(&report);
            }
        }
    }
    Ok(())
}

fn parse_report_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("'{input}' is not a valid date (expected YYYY-MM-DD)"))
}

async fn reviews(command: AdminReviewsCommand, ctx: &AppContext) -> Result<()> {
    // Review moderation lives on the admin dashboard
    enter(ctx, "/admin")?;

    match command {
        AdminReviewsCommand::List => {
            let reviews = ctx.client.list_reviews().await?;
            if ctx.output.is_text() {
                for review in &reviews {
                    println!(
                        "#{} [{}/5] {} on {}: {}",
                        review.id,
                        review.rating,
                        review.user_name,
                        review.product_name,
                        review.comment
                    );
                }
            } else {
                ctx.output.print_value(&reviews);
            }
        }
        AdminReviewsCommand::Delete { id } => {
            ctx.client.delete_review(id).await?;
            if !ctx.quiet {
                println!("Deleted review {id}");
            }
        }
    }
    Ok(())
}
