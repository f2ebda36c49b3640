//! Dashboard aggregation.
//!
//! Everything here is derived client-side from the raw collections: counts,
//! revenue, a payment histogram, a seven day trend and the leaderboards.
//! `now` is passed in so the day windows are testable.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::api::DashboardSources;
use crate::models::{parse_timestamp, Booking, CouponStatus, Expiring};

const POPULAR_LIMIT: usize = 10;
const LEADERBOARD_LIMIT: usize = 5;
const TREND_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTotals {
    pub bookings: usize,
    pub trips: usize,
    pub users: usize,
    pub captains: usize,
    pub vendors: usize,
    pub packages: usize,
    pub coupons: usize,
    pub promos: usize,
    pub blogs: usize,
    pub articles: usize,
    pub testimonials: usize,
    pub faqs: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PaymentHistogram {
    pub paid: usize,
    pub pending: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short weekday label for the chart axis
    pub label: String,
    pub bookings: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PopularDestination {
    pub name: String,
    pub bookings: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaptainRank {
    pub id: String,
    pub name: String,
    pub bookings: usize,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorRank {
    pub id: String,
    pub name: String,
    pub bookings: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: CollectionTotals,
    pub bookings_today: usize,
    pub bookings_this_week: usize,
    pub total_revenue: f64,
    pub revenue_today: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub active_coupons: usize,
    pub active_promos: usize,
    pub payment_status: PaymentHistogram,
    pub trend: Vec<TrendPoint>,
    pub popular_destinations: Vec<PopularDestination>,
    pub top_captains: Vec<CaptainRank>,
    pub top_vendors: Vec<VendorRank>,
    /// Sources whose fetch failed
    pub unavailable: Vec<&'static str>,
}

fn booking_day(booking: &Booking) -> Option<NaiveDate> {
    booking
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .map(|ts| ts.date_naive())
}

fn len_of<T>(source: &Option<Vec<T>>) -> usize {
    source.as_ref().map_or(0, Vec::len)
}

/// Build the whole summary from whatever sources arrived.
pub fn summarize(sources: &DashboardSources, now: DateTime<Utc>) -> DashboardSummary {
    let empty = Vec::new();
    let bookings = sources.bookings.as_ref().unwrap_or(&empty);
    let today = now.date_naive();

    let totals = CollectionTotals {
        bookings: len_of(&sources.bookings),
        trips: len_of(&sources.trips),
        users: len_of(&sources.users),
        captains: len_of(&sources.captains),
        vendors: len_of(&sources.vendors),
        packages: len_of(&sources.packages),
        coupons: len_of(&sources.coupons),
        promos: len_of(&sources.promos),
        blogs: len_of(&sources.blogs),
        articles: len_of(&sources.articles),
        testimonials: len_of(&sources.testimonials),
        faqs: len_of(&sources.faqs),
    };

    let week_start = today - Duration::days(TREND_DAYS - 1);
    let bookings_today = bookings
        .iter()
        .filter(|b| booking_day(b) == Some(today))
        .count();
    let bookings_this_week = bookings
        .iter()
        .filter(|b| booking_day(b).is_some_and(|d| d >= week_start && d <= today))
        .count();

    let total_revenue: f64 = bookings.iter().map(Booking::amount).sum();
    let revenue_today: f64 = bookings
        .iter()
        .filter(|b| booking_day(b) == Some(today))
        .map(Booking::amount)
        .sum();

    let total_income: f64 = sources
        .income
        .iter()
        .flatten()
        .map(|entry| entry.amount)
        .sum();
    let total_expenses: f64 = sources
        .expenses
        .iter()
        .flatten()
        .map(|entry| entry.amount)
        .sum();

    let active_coupons = sources
        .coupons
        .iter()
        .flatten()
        .filter(|c| c.effective_status(now) == CouponStatus::Active)
        .count();
    let active_promos = sources
        .promos
        .iter()
        .flatten()
        .filter(|p| p.effective_status(now) == CouponStatus::Active)
        .count();

    let mut unavailable = Vec::new();
    for (name, missing) in [
        ("bookings", sources.bookings.is_none()),
        ("trips", sources.trips.is_none()),
        ("income", sources.income.is_none()),
        ("expenses", sources.expenses.is_none()),
        ("users", sources.users.is_none()),
        ("captains", sources.captains.is_none()),
        ("vendors", sources.vendors.is_none()),
        ("packages", sources.packages.is_none()),
        ("coupons", sources.coupons.is_none()),
        ("promos", sources.promos.is_none()),
        ("blogs", sources.blogs.is_none()),
        ("articles", sources.articles.is_none()),
        ("testimonials", sources.testimonials.is_none()),
        ("faqs", sources.faqs.is_none()),
    ] {
        if missing {
            unavailable.push(name);
        }
    }

    DashboardSummary {
        totals,
        bookings_today,
        bookings_this_week,
        total_revenue,
        revenue_today,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        active_coupons,
        active_promos,
        payment_status: payment_histogram(bookings),
        trend: booking_trend(bookings, today),
        popular_destinations: popular_destinations(bookings),
        top_captains: top_captains(bookings, sources.captains.as_deref().unwrap_or(&[])),
        top_vendors: top_vendors(bookings, sources.vendors.as_deref().unwrap_or(&[])),
        unavailable,
    }
}

/// Paid / pending / failed counts. A missing status counts as pending;
/// statuses outside the three buckets are not counted.
pub fn payment_histogram(bookings: &[Booking]) -> PaymentHistogram {
    let mut histogram = PaymentHistogram::default();
    for booking in bookings {
        match booking
            .payment_status
            .as_deref()
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("pending") => histogram.pending += 1,
            Some("paid") => histogram.paid += 1,
            Some("failed") => histogram.failed += 1,
            Some(_) => {}
        }
    }
    histogram
}

/// Bookings and revenue per calendar day for the week ending `today`,
/// oldest first.
pub fn booking_trend(bookings: &[Booking], today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (count, revenue) = bookings
                .iter()
                .filter(|b| booking_day(b) == Some(date))
                .fold((0usize, 0.0f64), |(n, sum), b| (n + 1, sum + b.amount()));
            TrendPoint {
                date,
                label: date.format("%a").to_string(),
                bookings: count,
                revenue,
            }
        })
        .collect()
}

/// Bookings grouped by package name, most booked first, top ten. Ties keep
/// first-seen order.
pub fn popular_destinations(bookings: &[Booking]) -> Vec<PopularDestination> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for name in bookings
        .iter()
        .filter_map(|b| b.package_name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        let count = counts.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<PopularDestination> = order
        .into_iter()
        .map(|name| {
            let bookings = counts[&name];
            PopularDestination { name, bookings }
        })
        .collect();
    ranked.sort_by(|a, b| b.bookings.cmp(&a.bookings));
    ranked.truncate(POPULAR_LIMIT);
    ranked
}

/// Captains by booking count, then rating.
pub fn top_captains(bookings: &[Booking], captains: &[crate::models::Captain]) -> Vec<CaptainRank> {
    let mut ranked: Vec<CaptainRank> = captains
        .iter()
        .map(|captain| CaptainRank {
            id: captain.id.clone(),
            name: captain.name.clone(),
            bookings: bookings
                .iter()
                .filter(|b| b.captain_id.as_deref() == Some(captain.id.as_str()))
                .count(),
            rating: captain.rating.unwrap_or(0.0),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.bookings
            .cmp(&a.bookings)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
    ranked.truncate(LEADERBOARD_LIMIT);
    ranked
}

/// Vendors by revenue, then booking count.
pub fn top_vendors(bookings: &[Booking], vendors: &[crate::models::Vendor]) -> Vec<VendorRank> {
    let mut ranked: Vec<VendorRank> = vendors
        .iter()
        .map(|vendor| {
            let (count, revenue) = bookings
                .iter()
                .filter(|b| b.vendor_id.as_deref() == Some(vendor.id.as_str()))
                .fold((0usize, 0.0f64), |(n, sum), b| (n + 1, sum + b.amount()));
            VendorRank {
                id: vendor.id.clone(),
                name: vendor.name.clone(),
                bookings: count,
                revenue,
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| b.bookings.cmp(&a.bookings))
    });
    ranked.truncate(LEADERBOARD_LIMIT);
    ranked
}
