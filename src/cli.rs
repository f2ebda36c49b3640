//! Command line definition for the `backoffice` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use travel_backoffice::errors::AppError;
use travel_backoffice::models::{
    ActiveStatus, CouponStatus, DestinationKind, ReviewStatus, TripStatus,
};

#[derive(Debug, Parser)]
#[command(name = "backoffice", about = "Travel booking admin back-office")]
pub struct Cli {
    /// Backend base URL; overrides the configured one
    #[arg(long, global = true, env = "BACKOFFICE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Store the admin bearer token
    LoginToken { token: String },
    /// Forget the token and cached permissions
    Logout,
    /// Show cached module permissions
    Permissions {
        #[command(subcommand)]
        action: Option<PermissionsAction>,
    },
    #[command(alias = "banner")]
    Banners {
        #[command(subcommand)]
        action: BannerAction,
    },
    #[command(alias = "coupon")]
    Coupons {
        #[command(subcommand)]
        action: TableAction,
    },
    #[command(aliases = ["promo-code", "promos"])]
    PromoCodes {
        #[command(subcommand)]
        action: TableAction,
    },
    #[command(alias = "faq")]
    Faqs {
        #[command(subcommand)]
        action: TableAction,
    },
    #[command(alias = "testimonial")]
    Testimonials {
        #[command(subcommand)]
        action: ModeratedAction,
    },
    #[command(aliases = ["community-trip", "trips"])]
    CommunityTrips {
        #[command(subcommand)]
        action: TripAction,
    },
    #[command(alias = "adventure-post")]
    AdventurePosts {
        #[command(subcommand)]
        action: TableAction,
    },
    #[command(alias = "package")]
    Packages {
        #[command(subcommand)]
        action: DetailAction,
    },
    #[command(alias = "destination")]
    Destinations {
        #[command(subcommand)]
        action: DetailAction,
    },
    /// Print the dashboard summary
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PermissionsAction {
    /// Re-fetch permissions for the stored token
    Refresh,
}

/// Filters for one list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
}

/// Actions every table offers.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TableAction {
    /// List one page of records
    List(ListArgs),
    /// Delete a record; needs --yes to go through
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum BannerAction {
    #[command(flatten)]
    Table(TableAction),
    /// Create a banner from a title and an image file
    Add { title: String, image: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum DetailAction {
    #[command(flatten)]
    Table(TableAction),
    /// Print one record as JSON
    Show { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ModeratedAction {
    #[command(flatten)]
    Table(TableAction),
    /// Approve or reject
    Status { id: String, status: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TripAction {
    #[command(flatten)]
    Table(TableAction),
    /// Print one trip as JSON
    Show { id: String },
    /// Moderate a trip
    Status { id: String, status: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Banners,
    Coupons,
    PromoCodes,
    Faqs,
    Testimonials,
    CommunityTrips,
    AdventurePosts,
    Packages,
    Destinations,
}

impl Command {
    /// The feature and list/delete action, for commands that target a table.
    pub fn table_action(&self) -> Option<(Feature, &TableAction)> {
        match self {
            Command::Banners {
                action: BannerAction::Table(action),
            } => Some((Feature::Banners, action)),
            Command::Coupons { action } => Some((Feature::Coupons, action)),
            Command::PromoCodes { action } => Some((Feature::PromoCodes, action)),
            Command::Faqs { action } => Some((Feature::Faqs, action)),
            Command::Testimonials {
                action: ModeratedAction::Table(action),
            } => Some((Feature::Testimonials, action)),
            Command::CommunityTrips {
                action: TripAction::Table(action),
            } => Some((Feature::CommunityTrips, action)),
            Command::AdventurePosts { action } => Some((Feature::AdventurePosts, action)),
            Command::Packages {
                action: DetailAction::Table(action),
            } => Some((Feature::Packages, action)),
            Command::Destinations {
                action: DetailAction::Table(action),
            } => Some((Feature::Destinations, action)),
            _ => None,
        }
    }
}

fn usage_error(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

impl ListArgs {
    /// Reject filter values the feature's records can never carry.
    pub fn validate(&self, feature: Feature) -> Result<(), AppError> {
        if let Some(status) = &self.status {
            let known = match feature {
                Feature::Coupons | Feature::PromoCodes => CouponStatus::from_str(status).is_some(),
                Feature::Testimonials => ReviewStatus::from_str(status).is_some(),
                Feature::CommunityTrips => TripStatus::from_str(status).is_some(),
                _ => ActiveStatus::from_str(status).is_some(),
            };
            if !known {
                return Err(usage_error(format!("Unknown status: {}", status)));
            }
        }
        if let Some(kind) = &self.kind {
            if feature != Feature::Destinations {
                return Err(usage_error("--type only applies to destinations"));
            }
            if DestinationKind::from_str(kind).is_none() {
                return Err(usage_error(format!("Unknown destination type: {}", kind)));
            }
        }
        Ok(())
    }
}

pub fn parse_review_status(raw: &str) -> Result<ReviewStatus, AppError> {
    ReviewStatus::from_str(raw).ok_or_else(|| usage_error(format!("Unknown status: {}", raw)))
}

pub fn parse_trip_status(raw: &str) -> Result<TripStatus, AppError> {
    TripStatus::from_str(raw).ok_or_else(|| usage_error(format!("Unknown status: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("backoffice").chain(line.split_whitespace()))
    }

    #[test]
    fn test_list_flags() {
        let cli = parse("coupons list --page 2 --search summer --status active").unwrap();
        let (feature, action) = cli.command.table_action().unwrap();
        assert_eq!(feature, Feature::Coupons);
        assert_eq!(
            action,
            &TableAction::List(ListArgs {
                page: Some(2),
                search: Some("summer".into()),
                status: Some("active".into()),
                kind: None,
            })
        );
        assert!(parse("coupons list --page two").is_err());
        assert!(parse("coupons list --search").is_err());
    }

    #[test]
    fn test_delete_needs_explicit_yes() {
        let cli = parse("faqs delete f1").unwrap();
        assert_eq!(
            cli.command.table_action(),
            Some((
                Feature::Faqs,
                &TableAction::Delete {
                    id: "f1".into(),
                    yes: false
                }
            ))
        );
        let cli = parse("faq delete f1 --yes").unwrap();
        assert!(matches!(
            cli.command.table_action(),
            Some((Feature::Faqs, TableAction::Delete { yes: true, .. }))
        ));
    }

    #[test]
    fn test_feature_specific_commands() {
        assert_eq!(
            parse("package show p1").unwrap().command,
            Command::Packages {
                action: DetailAction::Show { id: "p1".into() }
            }
        );
        assert!(matches!(
            parse("banners add Summer ./summer.png").unwrap().command,
            Command::Banners {
                action: BannerAction::Add { .. }
            }
        ));
        assert!(parse("faqs add x y").is_err());
        assert!(parse("spaceships list").is_err());
        assert_eq!(
            parse("permissions refresh").unwrap().command,
            Command::Permissions {
                action: Some(PermissionsAction::Refresh)
            }
        );
        assert!(parse("login-token").is_err());
    }

    #[test]
    fn test_status_filters_checked_per_feature() {
        let args = ListArgs {
            status: Some("approved".into()),
            ..Default::default()
        };
        assert!(args.validate(Feature::Testimonials).is_ok());
        assert!(args.validate(Feature::CommunityTrips).is_ok());
        assert!(args.validate(Feature::Banners).is_err());

        let args = ListArgs {
            status: Some("expired".into()),
            ..Default::default()
        };
        assert!(args.validate(Feature::PromoCodes).is_ok());

        let args = ListArgs {
            kind: Some("season".into()),
            ..Default::default()
        };
        assert!(args.validate(Feature::Destinations).is_ok());
        assert!(args.validate(Feature::Packages).is_err());
        assert!(parse_trip_status("completed").is_ok());
        assert!(parse_review_status("completed").is_err());
    }
}
