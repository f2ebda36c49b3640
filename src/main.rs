//! Travel Back-Office CLI
//!
//! Drives the admin screens from a terminal against the configured backend.

mod cli;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use travel_backoffice::api::{self, ApiClient};
use travel_backoffice::auth::Session;
use travel_backoffice::config::{Config, LogFormat};
use travel_backoffice::dashboard;
use travel_backoffice::db::{self, Repository};
use travel_backoffice::errors::AppError;
use travel_backoffice::forms::PendingFile;
use travel_backoffice::models::{
    AdventurePost, Banner, BannerInput, CommunityTrip, Coupon, Destination, Expiring, Faq,
    Package, PromoCode, Testimonial,
};
use travel_backoffice::notify::{outcome_notice, Notice};
use travel_backoffice::permissions::PermissionStore;
use travel_backoffice::screens::{
    AdventurePostResource, BannerResource, CommunityTripResource, CouponResource,
    DestinationResource, FaqResource, ListResource, ListScreen, PackageResource,
    PromoCodeResource, TestimonialResource,
};
use travel_backoffice::search::Debouncer;

use cli::{
    BannerAction, Cli, Command, DetailAction, Feature, ListArgs, ModeratedAction,
    PermissionsAction, TableAction, TripAction,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!("Backend: {}", config.api_url);
    tracing::debug!("Storage path: {:?}", config.storage_path);

    let pool = db::init_database(&config.storage_path).await?;
    let session = Session::start(Repository::new(pool)).await?;

    if let Err(e) = run(cli.command, &config, &session).await {
        tracing::debug!("Command failed: {}", e);
        eprintln!("{}", Notice::from_error(&e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, config: &Config, session: &Session) -> Result<(), AppError> {
    if let Some((feature, action)) = command.table_action() {
        let api = session.api_client(config).await?;
        let permissions = session.permissions();
        return match action {
            TableAction::List(args) => {
                args.validate(feature)?;
                list_feature(feature, api, &permissions, config, args).await;
                Ok(())
            }
            TableAction::Delete { id, yes } => {
                let notice = delete_feature(feature, api, &permissions, config, id, *yes).await;
                report(notice)
            }
        };
    }

    match command {
        Command::LoginToken { token } => {
            session.sign_in(&token).await?;
            // Permissions belong to the new token
            let api = session.api_client(config).await?;
            match session.permissions().refresh(&api).await {
                Ok(count) => println!("Signed in ({} permission modules)", count),
                Err(e) => {
                    tracing::warn!("Could not fetch permissions: {}", e);
                    println!("Token stored; permissions could not be fetched");
                }
            }
        }
        Command::Logout => {
            session.sign_out().await?;
            println!("Signed out");
        }
        Command::Permissions { action } => {
            let store = session.permissions();
            if action == Some(PermissionsAction::Refresh) {
                let api = session.api_client(config).await?;
                store.refresh(&api).await?;
            }
            print_permissions(&store).await;
        }
        Command::Banners {
            action: BannerAction::Add { title, image },
        } => {
            let api = session.api_client(config).await?;
            let input = BannerInput {
                title,
                ..Default::default()
            };
            let file = PendingFile::from_path(&image).await?;
            let result = api::create_banner(&api, &input, file).await;
            report(outcome_notice(&result, "Banner created"))?;
        }
        Command::Packages {
            action: DetailAction::Show { id },
        } => {
            let api = session.api_client(config).await?;
            let package = api::get_package(&api, &id).await?;
            println!("{}", serde_json::to_string_pretty(&package)?);
        }
        Command::Destinations {
            action: DetailAction::Show { id },
        } => {
            let api = session.api_client(config).await?;
            let destination = api::get_destination(&api, &id).await?;
            println!("{}", serde_json::to_string_pretty(&destination)?);
        }
        Command::CommunityTrips {
            action: TripAction::Show { id },
        } => {
            let api = session.api_client(config).await?;
            let trip = api::get_community_trip(&api, &id).await?;
            println!("{}", serde_json::to_string_pretty(&trip)?);
        }
        Command::CommunityTrips {
            action: TripAction::Status { id, status },
        } => {
            let status = cli::parse_trip_status(&status)?;
            let api = session.api_client(config).await?;
            let result = api::set_community_trip_status(&api, &id, status).await;
            report(outcome_notice(&result, "Trip status updated"))?;
        }
        Command::Testimonials {
            action: ModeratedAction::Status { id, status },
        } => {
            let status = cli::parse_review_status(&status)?;
            let api = session.api_client(config).await?;
            let result = api::set_testimonial_status(&api, &id, status).await;
            report(outcome_notice(&result, "Testimonial status updated"))?;
        }
        Command::Dashboard => {
            let api = session.api_client(config).await?;
            let sources = api::fetch_dashboard_sources(&api).await;
            let summary = dashboard::summarize(&sources, Utc::now());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        // Table actions were handled above
        Command::Banners { .. }
        | Command::Coupons { .. }
        | Command::PromoCodes { .. }
        | Command::Faqs { .. }
        | Command::Testimonials { .. }
        | Command::CommunityTrips { .. }
        | Command::AdventurePosts { .. }
        | Command::Packages { .. }
        | Command::Destinations { .. } => {}
    }
    Ok(())
}

/// Print a mutation notice; error notices fail the command.
fn report(notice: Notice) -> Result<(), AppError> {
    println!("{}", notice);
    if notice.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

async fn print_permissions(store: &PermissionStore) {
    let permissions = store.snapshot().await;
    if permissions.is_empty() {
        println!("No permissions cached");
        return;
    }
    let flag = |allowed: bool, c: char| if allowed { c } else { '-' };
    for p in permissions {
        println!(
            "{:<14} {}{}{}{}",
            p.module,
            flag(p.create, 'c'),
            flag(p.read, 'r'),
            flag(p.update, 'u'),
            flag(p.delete, 'd')
        );
    }
}

/// One line per record in a list table.
trait Row {
    fn row(&self) -> String;
}

impl Row for Banner {
    fn row(&self) -> String {
        format!("{}  {:<32} #{:<3} {}", self.id, self.title, self.order, self.status.as_str())
    }
}

impl Row for Coupon {
    fn row(&self) -> String {
        format!(
            "{}  {:<16} {:<24} {}",
            self.id,
            self.code,
            self.title,
            self.effective_status(Utc::now()).as_str()
        )
    }
}

impl Row for PromoCode {
    fn row(&self) -> String {
        format!(
            "{}  {:<16} {:<24} {}",
            self.id,
            self.code,
            self.title,
            self.effective_status(Utc::now()).as_str()
        )
    }
}

impl Row for Faq {
    fn row(&self) -> String {
        format!("{}  {}  [{}]", self.id, self.question, self.status.as_str())
    }
}

impl Row for Testimonial {
    fn row(&self) -> String {
        format!(
            "{}  {:<24} {:.1}/5 {}",
            self.id,
            self.name,
            self.rating,
            self.status.as_str()
        )
    }
}

impl Row for CommunityTrip {
    fn row(&self) -> String {
        format!(
            "{}  {:<32} {:<16} {}",
            self.id,
            self.title,
            self.destination,
            self.status.as_str()
        )
    }
}

impl Row for AdventurePost {
    fn row(&self) -> String {
        format!("{}  {:<32} {}", self.id, self.title, self.status.as_str())
    }
}

impl Row for Package {
    fn row(&self) -> String {
        format!(
            "{}  {:<32} {:<10} {:>10.2} {}",
            self.id, self.title, self.duration, self.price.adult, self.price.currency
        )
    }
}

impl Row for Destination {
    fn row(&self) -> String {
        format!(
            "{}  {:<28} {:<8} {}",
            self.id,
            self.display_name(),
            self.kind.as_str(),
            self.places().join(", ")
        )
    }
}

async fn screen_for<R: ListResource>(
    resource: R,
    permissions: &PermissionStore,
    config: &Config,
) -> ListScreen<R> {
    let access = permissions.access(resource.module()).await;
    ListScreen::with_access(
        resource,
        access,
        Debouncer::new(config.search_debounce),
        config.page_limit,
    )
}

async fn list_with<R>(resource: R, permissions: &PermissionStore, config: &Config, args: &ListArgs)
where
    R: ListResource,
    R::Item: Row,
{
    let mut screen = screen_for(resource, permissions, config).await;
    let query = screen.query_mut();
    if let Some(page) = args.page {
        query.page = page.max(1);
    }
    if let Some(search) = &args.search {
        query.search = search.clone();
    }
    if let Some(status) = &args.status {
        query.set_filter("status", status);
    }
    if let Some(kind) = &args.kind {
        query.set_filter("type", kind);
    }
    screen.load().await;

    if screen.items().is_empty() {
        println!("No records found");
    }
    for item in screen.items() {
        println!("{}", item.row());
    }
    let pagination = screen.pagination();
    println!("Page {} of {}", pagination.page, pagination.pages.max(1));
}

async fn delete_with<R: ListResource>(
    resource: R,
    permissions: &PermissionStore,
    config: &Config,
    id: &str,
    confirmed: bool,
) -> Notice {
    let mut screen = screen_for(resource, permissions, config).await;
    if !screen.request_delete(id) {
        return screen
            .take_notice()
            .unwrap_or_else(|| Notice::error("Error", "Delete not allowed"));
    }
    if !confirmed {
        screen.cancel_delete();
        return Notice::info("Cancelled", "Pass --yes to confirm the delete");
    }
    screen
        .confirm_delete()
        .await
        .unwrap_or_else(|| Notice::error("Error", "Nothing to delete"))
}

async fn list_feature(
    feature: Feature,
    api: ApiClient,
    permissions: &PermissionStore,
    config: &Config,
    args: &ListArgs,
) {
    match feature {
        Feature::Banners => list_with(BannerResource::new(api), permissions, config, args).await,
        Feature::Coupons => list_with(CouponResource::new(api), permissions, config, args).await,
        Feature::PromoCodes => {
            list_with(PromoCodeResource::new(api), permissions, config, args).await
        }
        Feature::Faqs => list_with(FaqResource::new(api), permissions, config, args).await,
        Feature::Testimonials => {
            list_with(TestimonialResource::new(api), permissions, config, args).await
        }
        Feature::CommunityTrips => {
            list_with(CommunityTripResource::new(api), permissions, config, args).await
        }
        Feature::AdventurePosts => {
            list_with(AdventurePostResource::new(api), permissions, config, args).await
        }
        Feature::Packages => list_with(PackageResource::new(api), permissions, config, args).await,
        Feature::Destinations => {
            list_with(DestinationResource::new(api), permissions, config, args).await
        }
    }
}

async fn delete_feature(
    feature: Feature,
    api: ApiClient,
    permissions: &PermissionStore,
    config: &Config,
    id: &str,
    confirmed: bool,
) -> Notice {
    match feature {
        Feature::Banners => {
            delete_with(BannerResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::Coupons => {
            delete_with(CouponResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::PromoCodes => {
            delete_with(PromoCodeResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::Faqs => {
            delete_with(FaqResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::Testimonials => {
            delete_with(TestimonialResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::CommunityTrips => {
            delete_with(CommunityTripResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::AdventurePosts => {
            delete_with(AdventurePostResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::Packages => {
            delete_with(PackageResource::new(api), permissions, config, id, confirmed).await
        }
        Feature::Destinations => {
            delete_with(DestinationResource::new(api), permissions, config, id, confirmed).await
        }
    }
}
