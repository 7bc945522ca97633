use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::debug;

use propnest_client::domain::entities::session::SessionState;
use propnest_client::infra::{
    app::AppContext,
    config::AppConfig,
    setup::{init_app_context, init_tracing},
};
use propnest_types::{LeadSubmission, ListingType, PropertyQuery, Role};

#[derive(Parser)]
#[command(name = "propnest")]
#[command(version)]
#[command(about = "PropNest marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show who is logged in
    Status,
    /// Send a login code to a phone number
    RequestOtp {
        #[arg(value_name = "PHONE")]
        phone_number: String,
    },
    /// Log in with the code received by SMS
    VerifyOtp {
        #[arg(value_name = "PHONE")]
        phone_number: String,
        otp: String,
    },
    /// Pick tenant or owner after the first login
    SelectRole { role: Role },
    /// Forget the stored session
    Logout,
    /// Search listings
    Properties(PropertyArgs),
    /// Like a listing
    Like {
        #[arg(value_name = "PROPERTY_ID")]
        id: String,
    },
    /// Record that a listing was viewed
    TrackView {
        #[arg(value_name = "PROPERTY_ID")]
        id: String,
    },
    /// Send an enquiry about a listing
    Lead {
        #[arg(value_name = "PROPERTY_ID")]
        property_id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "phone")]
        phone_number: String,
        #[arg(long)]
        message: Option<String>,
        /// Preferred visit date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct PropertyArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long = "type")]
    property_type: Option<String>,
    /// rent or sale
    #[arg(long)]
    listing: Option<ListingType>,
    #[arg(long)]
    min_price: Option<u64>,
    #[arg(long)]
    max_price: Option<u64>,
    #[arg(long)]
    bedrooms: Option<u32>,
    #[arg(long, default_value_t = PropertyQuery::DEFAULT_PAGE)]
    page: u32,
    #[arg(long, default_value_t = PropertyQuery::DEFAULT_LIMIT)]
    limit: u32,
}

impl From<PropertyArgs> for PropertyQuery {
    fn from(args: PropertyArgs) -> Self {
        PropertyQuery {
            search: args.search,
            city: args.city,
            property_type: args.property_type,
            listing_type: args.listing,
            min_price: args.min_price,
            max_price: args.max_price,
            bedrooms: args.bedrooms,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_file.as_deref())?;
    debug!(api_url = %config.api_url, "Configuration loaded");

    let mut app = init_app_context(config)?;
    app.start().await;

    let result = run(&app, cli.command).await;
    app.shutdown().await;
    result
}

async fn run(app: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Status => {
            let session = app.session.snapshot();
            match (session.state(), session.user) {
                (SessionState::Authenticated(role), Some(user)) => {
                    println!("Logged in as {} ({role})", user.id);
                    if role.is_unassigned() {
                        println!("Pick a role with `propnest select-role <tenant|owner>`");
                    }
                }
                _ => println!("Not logged in"),
            }
        }
        Commands::RequestOtp { phone_number } => {
            let phone_number = app.auth.request_otp(&phone_number).await?;
            println!("OTP sent to {phone_number}");
        }
        Commands::VerifyOtp { phone_number, otp } => {
            let session = app.auth.verify_otp(&phone_number, &otp).await?;
            if session.needs_role_selection() {
                println!("Logged in. Pick a role with `propnest select-role <tenant|owner>`");
            } else if let Some(role) = session.role() {
                println!("Logged in as {role}");
            }
        }
        Commands::SelectRole { role } => {
            let user = app.auth.select_role_for_current_user(role).await?;
            println!("Role set to {}", user.role);
        }
        Commands::Logout => {
            app.auth.logout().await;
            println!("Logged out");
        }
        Commands::Properties(args) => {
            let page = app.properties.list_properties(&args.into()).await?;
            for listing in &page.properties {
                let price = listing
                    .price
                    .map(|p| format!("₹{p:.0}"))
                    .unwrap_or_else(|| "-".to_string());
                let city = listing.city.as_deref().unwrap_or("-");
                println!("{}  {}  {}  {}", listing.id, listing.title, city, price);
            }
            println!(
                "Page {} of {} ({} results)",
                page.current_page, page.total_pages, page.total_results
            );
        }
        Commands::Like { id } => {
            app.properties.like_property(&id).await?;
            println!("Liked {id}");
        }
        Commands::TrackView { id } => {
            app.properties.track_view(&id).await?;
            println!("View recorded for {id}");
        }
        Commands::Lead {
            property_id,
            name,
            phone_number,
            message,
            date,
        } => {
            let lead = LeadSubmission {
                name,
                phone_number,
                message,
                preferred_date: date,
            };
            let record = app.properties.submit_lead(&property_id, lead).await?;
            println!("Enquiry {} sent", record.id);
        }
    }

    Ok(())
}
