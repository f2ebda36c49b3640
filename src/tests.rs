//! Integration tests against an in-process fake of the admin backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, OriginalUri, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::api::{self, ApiClient};
use crate::auth::Session;
use crate::dashboard::summarize;
use crate::db::{init_database, Repository};
use crate::errors::AppError;
use crate::forms::{
    DestinationForm, DestinationPage, FormMode, PackageForm, PendingFile, SeasonDestinationForm,
};
use crate::models::{
    modules, AdventurePostInput, BannerInput, DestinationKind, DiscountCodeInput, FaqInput,
    ListQuery, Permission, ReviewStatus, TestimonialInput, TripStatus,
};
use crate::permissions::PermissionStore;
use crate::screens::{BannerResource, FaqResource, ListScreen};
use crate::search::Debouncer;

const TOKEN: &str = "test-token";

/// A multipart request the fake backend received.
#[derive(Debug, Clone)]
struct Upload {
    path: String,
    fields: HashMap<String, String>,
    files: Vec<(String, String)>,
}

#[derive(Default)]
struct Backend {
    banners: Vec<Value>,
    requests: Vec<String>,
    uploads: Vec<Upload>,
    json_bodies: Vec<(String, Value)>,
    next_id: u32,
}

type Shared = Arc<Mutex<Backend>>;

async fn read_multipart(path: &str, mut multipart: Multipart) -> Upload {
    let mut upload = Upload {
        path: path.to_string(),
        fields: HashMap::new(),
        files: Vec::new(),
    };
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                field.bytes().await.unwrap();
                upload.files.push((name, file_name));
            }
            None => {
                let value = field.text().await.unwrap();
                upload.fields.insert(name, value);
            }
        }
    }
    upload
}

async fn record_and_authorize(State(state): State<Shared>, req: Request, next: Next) -> Response {
    state
        .lock()
        .unwrap()
        .requests
        .push(format!("{} {}", req.method(), req.uri().path()));

    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": false, "message": "Invalid token" })),
        )
            .into_response();
    }
    next.run(req).await
}

async fn list_banners(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let search = params.get("search").cloned().unwrap_or_default().to_lowercase();
    let banners: Vec<Value> = state
        .lock()
        .unwrap()
        .banners
        .iter()
        .filter(|b| b["title"].as_str().unwrap_or("").to_lowercase().contains(&search))
        .cloned()
        .collect();
    Json(json!({
        "status": true,
        "data": banners,
        "pagination": { "page": 1, "pages": 1, "total": banners.len(), "limit": 10 }
    }))
}

async fn add_banner(State(state): State<Shared>, multipart: Multipart) -> Json<Value> {
    let upload = read_multipart("/api/admin/banner/add", multipart).await;
    let mut backend = state.lock().unwrap();
    backend.next_id += 1;
    let banner = json!({
        "_id": format!("b{}", backend.next_id),
        "title": upload.fields.get("title").cloned().unwrap_or_default(),
        "image": upload.files.first().map(|(_, f)| format!("/uploads/{}", f)),
        "status": upload.fields.get("status").cloned().unwrap_or_else(|| "active".into()),
    });
    backend.banners.push(banner);
    backend.uploads.push(upload);
    Json(json!({ "status": true, "message": "Banner created successfully" }))
}

async fn delete_banner(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = state.lock().unwrap();
    let before = backend.banners.len();
    backend.banners.retain(|b| b["_id"] != id.as_str());
    if backend.banners.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": false, "message": "Banner not found" })),
        )
            .into_response();
    }
    Json(json!({ "status": true, "message": "Banner deleted successfully" })).into_response()
}

async fn permissions() -> Json<Value> {
    Json(json!({
        "status": true,
        "data": [
            { "module": "content", "create": true, "read": true, "update": true, "delete": true },
            { "module": "packages", "create": true, "read": true, "update": true, "delete": false }
        ]
    }))
}

async fn package_detail(Json(body): Json<Value>) -> Response {
    if body["id"] != "p1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": false, "message": "Package not found" })),
        )
            .into_response();
    }
    Json(json!({
        "status": true,
        "data": {
            "_id": "p1",
            "title": "Goa Beach Escape",
            "duration": "4D/3N",
            "source": "Mumbai",
            "destination": "Goa",
            "category": "weekend",
            "price": { "adult": 14999 },
            "selectedDestinations": [
                { "destinationId": "d1", "name": "Goa", "places": ["Goa"] }
            ]
        }
    }))
    .into_response()
}

async fn list_destinations() -> Json<Value> {
    Json(json!({
        "status": true,
        "data": [
            { "_id": "d1", "type": "popular", "name": "Goa" },
            {
                "_id": "d2",
                "type": "season",
                "name": "Himachal",
                "placesDetails": [{ "placeName": "Manali" }, { "placeName": "Shimla" }]
            }
        ]
    }))
}

async fn record_upload(
    State(state): State<Shared>,
    OriginalUri(uri): OriginalUri,
    multipart: Multipart,
) -> Json<Value> {
    let upload = read_multipart(uri.path(), multipart).await;
    state.lock().unwrap().uploads.push(upload);
    Json(json!({ "status": true, "message": "Saved" }))
}

async fn record_json(
    State(state): State<Shared>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .lock()
        .unwrap()
        .json_bodies
        .push((uri.path().to_string(), body));
    Json(json!({ "status": true, "message": "Saved" }))
}

async fn list_faqs() -> Json<Value> {
    // Virtual `id` alongside `_id`, as toJSON with virtuals emits
    Json(json!({
        "status": true,
        "data": [
            { "_id": "f1", "id": "f1", "question": "Visa on arrival?", "answer": "No" }
        ],
        "pagination": { "page": 1, "pages": 1, "total": 1, "limit": 10 }
    }))
}

async fn trip_detail(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "status": true,
        "data": {
            "_id": body["id"],
            "title": "Spiti bike ride",
            "destination": "Spiti",
            "maxMembers": 6,
            "members": [{ "_id": "u1", "name": "Kabir" }],
            "status": "pending"
        }
    }))
}

async fn destination_detail(Json(body): Json<Value>) -> Response {
    if body["id"] != "d1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": false, "message": "Destination not found" })),
        )
            .into_response();
    }
    Json(json!({
        "status": true,
        "data": {
            "_id": "d1",
            "type": "popular",
            "name": "Goa",
            "description": "Beaches and forts",
            "location": "India",
            "images": ["/uploads/goa.jpg"],
            "hotels": [{ "name": "Taj Exotica", "image": "/uploads/taj.jpg" }]
        }
    }))
    .into_response()
}

async fn bookings() -> Json<Value> {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    Json(json!({
        "status": true,
        "data": [
            {
                "_id": "k1", "packageName": "Goa", "createdAt": today,
                "totalAmount": 1000.0, "paymentStatus": "paid"
            },
            { "_id": "k2", "packageName": "Goa", "createdAt": today, "finalAmount": 500.0 },
            {
                "_id": "k3", "packageName": "Kerala", "createdAt": "2020-01-01",
                "totalAmount": 200.0, "paymentStatus": "failed"
            }
        ]
    }))
}

async fn broken() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": false, "message": "database offline" })),
    )
        .into_response()
}

/// Test fixture for integration tests.
struct TestFixture {
    base_url: String,
    state: Shared,
    _temp_dir: TempDir,
    repo: Repository,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("state.sqlite"))
            .await
            .expect("Failed to init DB");
        let repo = Repository::new(pool);

        let state: Shared = Arc::new(Mutex::new(Backend::default()));
        let admin = Router::new()
            .route("/banner", get(list_banners))
            .route("/banner/add", post(add_banner))
            .route("/banner/{id}", delete(delete_banner))
            .route("/permissions", get(permissions))
            .route("/package/detail", post(package_detail))
            .route("/package/add", post(record_upload))
            .route("/package/{id}", patch(record_upload))
            .route("/destination", get(list_destinations))
            .route("/destination/add", post(record_upload))
            .route("/destination/detail", post(destination_detail))
            .route("/destination/{id}", put(record_upload))
            .route("/coupon/add", post(record_json))
            .route("/coupon/{id}", put(record_json))
            .route("/promo-code/add", post(record_json))
            .route("/promo-code/{id}", put(record_json))
            .route("/faq", get(list_faqs))
            .route("/faq/add", post(record_json))
            .route("/faq/{id}", put(record_json))
            .route("/testimonial/add", post(record_upload))
            .route("/testimonial/{id}", put(record_upload))
            .route("/testimonial/{id}/status", put(record_json))
            .route("/adventure-post/add", post(record_upload))
            .route("/adventure-post/{id}", put(record_upload))
            .route("/community-trip/detail", post(trip_detail))
            .route("/community-trip/{id}/status", put(record_json))
            .route("/bookings", get(bookings))
            .route("/captains", get(broken))
            .with_state(state.clone());
        let app = Router::new()
            .nest("/api/admin", admin)
            .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestFixture {
            base_url: format!("http://{}", addr),
            state,
            _temp_dir: temp_dir,
            repo,
        }
    }

    fn client(&self, token: Option<&str>) -> ApiClient {
        ApiClient::new(&self.base_url, token, Duration::from_secs(5)).unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    fn uploads(&self) -> Vec<Upload> {
        self.state.lock().unwrap().uploads.clone()
    }

    fn upload_at(&self, path: &str) -> Upload {
        self.uploads()
            .into_iter()
            .find(|u| u.path == path)
            .unwrap_or_else(|| panic!("no upload at {}", path))
    }

    fn json_body(&self, path: &str) -> Value {
        self.state
            .lock()
            .unwrap()
            .json_bodies
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .unwrap_or_else(|| panic!("no JSON body at {}", path))
    }
}

fn content_admin() -> PermissionStore {
    PermissionStore::detached(vec![Permission {
        module: modules::CONTENT.to_string(),
        create: true,
        read: true,
        update: true,
        delete: true,
    }])
}

#[tokio::test]
async fn test_banner_create_list_delete() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let input = BannerInput {
        title: "Summer Sale".to_string(),
        ..Default::default()
    };
    let message = api::create_banner(&api, &input, PendingFile::new("summer.png", vec![0x89, 0x50]))
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Banner created successfully"));

    let upload = &fixture.uploads()[0];
    assert_eq!(upload.fields.get("title").map(String::as_str), Some("Summer Sale"));
    assert_eq!(upload.files, vec![("image".to_string(), "summer.png".to_string())]);

    let permissions = content_admin();
    let mut screen = ListScreen::mount(
        BannerResource::new(api.clone()),
        &permissions,
        Debouncer::new(Duration::from_millis(500)),
        10,
    )
    .await;
    assert_eq!(screen.items().len(), 1);
    assert_eq!(screen.items()[0].title, "Summer Sale");
    assert_eq!(screen.items()[0].image.as_deref(), Some("/uploads/summer.png"));

    let id = screen.items()[0].id.clone();
    assert!(screen.request_delete(&id));
    let notice = screen.confirm_delete().await.unwrap();
    assert!(!notice.is_error());
    assert_eq!(notice.message, "Banner deleted successfully");
    assert!(screen.items().is_empty());

    let deletes = fixture
        .requests()
        .into_iter()
        .filter(|r| r.starts_with("DELETE"))
        .count();
    assert_eq!(deletes, 1);
}

#[tokio::test]
async fn test_delete_failure_surfaces_notice() {
    let fixture = TestFixture::new().await;
    let permissions = content_admin();
    let mut screen = ListScreen::mount(
        BannerResource::new(fixture.client(Some(TOKEN))),
        &permissions,
        Debouncer::new(Duration::from_millis(500)),
        10,
    )
    .await;

    screen.request_delete("missing");
    let notice = screen.confirm_delete().await.unwrap();
    assert!(notice.is_error());
    // no re-fetch after a failed delete
    assert_eq!(screen.fetch_count(), 1);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(None);

    let err = api::list_banners(&api, &ListQuery::new(10)).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Invalid token"));

    // list screens stay quiet on GET failures
    let permissions = content_admin();
    let mut screen = ListScreen::mount(
        BannerResource::new(api),
        &permissions,
        Debouncer::new(Duration::from_millis(500)),
        10,
    )
    .await;
    assert!(screen.items().is_empty());
    assert!(screen.take_notice().is_none());
}

#[tokio::test]
async fn test_invalid_package_sends_nothing() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let mut form = PackageForm::load(&api, FormMode::Create).await.unwrap();
    assert_eq!(form.catalogue().len(), 2);
    form.update(|p| p.title = "Goa Beach Escape".into()).unwrap();

    let err = form.submit(&api).await.unwrap_err();
    assert!(err.is_validation());
    assert!(!fixture
        .requests()
        .iter()
        .any(|r| r.contains("/package/add")));
}

#[tokio::test]
async fn test_package_edit_patches() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let mut form = PackageForm::load(&api, FormMode::Edit("p1".into()))
        .await
        .unwrap();
    assert_eq!(form.package().title, "Goa Beach Escape");
    assert_eq!(form.catalogue().len(), 2);

    assert!(form.select_destination_by_id("d2").unwrap());
    form.update(|p| p.title = "Goa & Himachal".into()).unwrap();
    let message = form.submit(&api).await.unwrap();
    assert_eq!(message.as_deref(), Some("Saved"));

    assert!(fixture.requests().contains(&"PATCH /api/admin/package/p1".to_string()));
    let upload = fixture
        .uploads()
        .into_iter()
        .find(|u| u.path == "/api/admin/package/p1")
        .unwrap();
    assert_eq!(upload.fields.get("title").map(String::as_str), Some("Goa & Himachal"));
    let selected: Value = serde_json::from_str(&upload.fields["selectedDestinations"]).unwrap();
    assert_eq!(selected[1]["places"], json!(["Manali", "Shimla"]));
}

#[tokio::test]
async fn test_package_view_and_missing() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let form = PackageForm::load(&api, FormMode::View("p1".into()))
        .await
        .unwrap();
    assert!(form.is_read_only());
    assert!(form.submit(&api).await.unwrap_err().is_validation());

    let err = PackageForm::load(&api, FormMode::Edit("nope".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_season_destination_upload_fields() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let mut form = SeasonDestinationForm::new();
    form.title = "Himalayan Summer".into();
    form.header.description = "Cool mountain towns".into();
    form.header.location = "Himachal Pradesh".into();
    form.places.begin_add().place_name = "Manali".into();
    form.places
        .attach_file(PendingFile::new("manali.jpg", vec![1]))
        .unwrap();
    form.places.commit().unwrap();
    let manali = form.places.begin_edit(0).unwrap();
    manali.collections.hotels.begin_add().name = "Snow Valley Resort".into();
    manali
        .collections
        .hotels
        .attach_file(PendingFile::new("snow.jpg", vec![2]))
        .unwrap();
    manali.collections.hotels.commit().unwrap();
    form.places.commit().unwrap();

    form.submit(&api).await.unwrap();

    let upload = fixture
        .uploads()
        .into_iter()
        .find(|u| u.path == "/api/admin/destination/add")
        .unwrap();
    assert_eq!(upload.fields.get("type").map(String::as_str), Some("season"));
    let names: Vec<&str> = upload.files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["placeImages", "places[0][hotelImages]"]);
}

#[tokio::test]
async fn test_sign_in_refreshes_permissions() {
    let fixture = TestFixture::new().await;
    let session = Session::start(fixture.repo.clone()).await.unwrap();
    session.sign_in(TOKEN).await.unwrap();

    let api = fixture.client(session.token(None).await.unwrap().as_deref());
    assert!(api.is_authenticated());
    let count = session.permissions().refresh(&api).await.unwrap();
    assert_eq!(count, 2);

    let packages = session.permissions().access(modules::PACKAGES).await;
    assert!(packages.update && !packages.delete);

    let persisted = PermissionStore::hydrate(fixture.repo.clone()).await.unwrap();
    assert!(persisted.access(modules::CONTENT).await.delete);
}

#[tokio::test]
async fn test_dashboard_survives_failed_sources() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let sources = api::fetch_dashboard_sources(&api).await;
    assert!(sources.bookings.is_some());
    assert!(sources.captains.is_none());

    let summary = summarize(&sources, Utc::now());
    assert_eq!(summary.totals.bookings, 3);
    assert_eq!(summary.bookings_today, 2);
    assert_eq!(summary.revenue_today, 1500.0);
    assert_eq!(summary.total_revenue, 1700.0);
    assert_eq!(summary.payment_status.paid, 1);
    assert_eq!(summary.payment_status.pending, 1);
    assert_eq!(summary.payment_status.failed, 1);
    assert_eq!(summary.popular_destinations[0].name, "Goa");
    assert!(summary.unavailable.contains(&"captains"));
    assert!(summary.top_captains.is_empty());
}

#[tokio::test]
async fn test_discount_code_and_faq_send_json() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let coupon = DiscountCodeInput {
        code: "GOA10".into(),
        title: "Goa ten".into(),
        discount_value: 10.0,
        valid_until: Some("2030-01-01".into()),
        ..Default::default()
    };
    api::create_coupon(&api, &coupon).await.unwrap();
    api::update_coupon(&api, "c1", &coupon).await.unwrap();
    api::create_promo_code(&api, &coupon).await.unwrap();
    api::update_promo_code(&api, "pc1", &coupon).await.unwrap();

    let faq = FaqInput {
        question: "Visa on arrival?".into(),
        answer: "Yes, for most passports".into(),
        ..Default::default()
    };
    api::create_faq(&api, &faq).await.unwrap();
    api::update_faq(&api, "f1", &faq).await.unwrap();

    let requests = fixture.requests();
    for expected in [
        "POST /api/admin/coupon/add",
        "PUT /api/admin/coupon/c1",
        "POST /api/admin/promo-code/add",
        "PUT /api/admin/promo-code/pc1",
        "POST /api/admin/faq/add",
        "PUT /api/admin/faq/f1",
    ] {
        assert!(requests.contains(&expected.to_string()), "missing {}", expected);
    }

    let body = fixture.json_body("/api/admin/coupon/c1");
    assert_eq!(body["code"], "GOA10");
    assert_eq!(body["discountType"], "percentage");
    assert_eq!(body["validUntil"], "2030-01-01");
    assert!(body.get("minPurchase").is_none());
    assert_eq!(fixture.json_body("/api/admin/promo-code/add")["discountValue"], 10.0);
    assert_eq!(fixture.json_body("/api/admin/faq/f1")["answer"], "Yes, for most passports");
    assert!(fixture.uploads().is_empty());
}

#[tokio::test]
async fn test_testimonial_and_adventure_post_uploads() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let testimonial = TestimonialInput {
        name: "Asha".into(),
        message: "Loved the houseboat".into(),
        rating: 5,
        ..Default::default()
    };
    let photo = PendingFile::new("asha.jpg", vec![1]);
    api::create_testimonial(&api, &testimonial, Some(photo))
        .await
        .unwrap();
    api::update_testimonial(&api, "t1", &testimonial, None)
        .await
        .unwrap();
    api::set_testimonial_status(&api, "t1", ReviewStatus::Approved)
        .await
        .unwrap();

    let created = fixture.upload_at("/api/admin/testimonial/add");
    assert_eq!(created.fields.get("rating").map(String::as_str), Some("5"));
    assert_eq!(created.files, vec![("image".to_string(), "asha.jpg".to_string())]);
    assert!(fixture.upload_at("/api/admin/testimonial/t1").files.is_empty());
    assert_eq!(
        fixture.json_body("/api/admin/testimonial/t1/status"),
        json!({ "status": "approved" })
    );

    let post = AdventurePostInput {
        title: "Rafting".into(),
        description: "Rishikesh rapids".into(),
        existing_images: vec!["/uploads/raft.jpg".into()],
        ..Default::default()
    };
    let images = vec![
        PendingFile::new("one.jpg", vec![1]),
        PendingFile::new("two.jpg", vec![2]),
    ];
    api::create_adventure_post(&api, &post, images).await.unwrap();
    api::update_adventure_post(&api, "a1", &post, Vec::new())
        .await
        .unwrap();

    let created = fixture.upload_at("/api/admin/adventure-post/add");
    let names: Vec<&str> = created.files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["images", "images"]);
    let updated = fixture.upload_at("/api/admin/adventure-post/a1");
    let kept: Value = serde_json::from_str(&updated.fields["existingImages"]).unwrap();
    assert_eq!(kept, json!(["/uploads/raft.jpg"]));

    let requests = fixture.requests();
    assert!(requests.contains(&"PUT /api/admin/testimonial/t1".to_string()));
    assert!(requests.contains(&"PUT /api/admin/adventure-post/a1".to_string()));
}

#[tokio::test]
async fn test_community_trip_detail_and_moderation() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let trip = api::get_community_trip(&api, "t9").await.unwrap();
    assert_eq!(trip.id, "t9");
    assert_eq!(trip.title, "Spiti bike ride");
    assert_eq!(trip.open_seats(), Some(5));

    api::set_community_trip_status(&api, "t9", TripStatus::Rejected)
        .await
        .unwrap();
    assert!(fixture
        .requests()
        .contains(&"POST /api/admin/community-trip/detail".to_string()));
    assert_eq!(
        fixture.json_body("/api/admin/community-trip/t9/status"),
        json!({ "status": "rejected" })
    );
}

#[tokio::test]
async fn test_destination_edit_route_refetches_and_puts() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    // The stored record decides the shape, not the requested kind
    let edit = FormMode::Edit("d1".into());
    let mut page = DestinationPage::load(&api, edit, DestinationKind::Season)
        .await
        .unwrap();
    assert_eq!(page.form().kind(), DestinationKind::Popular);
    match page.form_mut().unwrap() {
        DestinationForm::Popular(form) => {
            assert_eq!(form.collections.hotels.len(), 1);
            form.header.description = "Beaches, forts and spice farms".into();
        }
        DestinationForm::Season(_) => panic!("expected popular form"),
    }
    page.submit(&api).await.unwrap();

    let upload = fixture.upload_at("/api/admin/destination/d1");
    assert_eq!(
        upload.fields.get("description").map(String::as_str),
        Some("Beaches, forts and spice farms")
    );
    let kept: Value = serde_json::from_str(&upload.fields["existingImages"]).unwrap();
    assert_eq!(kept, json!(["/uploads/goa.jpg"]));
    assert!(fixture
        .requests()
        .contains(&"POST /api/admin/destination/detail".to_string()));
}

#[tokio::test]
async fn test_destination_view_route_and_missing_record() {
    let fixture = TestFixture::new().await;
    let api = fixture.client(Some(TOKEN));

    let view = FormMode::View("d1".into());
    let mut page = DestinationPage::load(&api, view, DestinationKind::Popular)
        .await
        .unwrap();
    assert!(page.is_read_only());
    assert!(page.form_mut().unwrap_err().is_validation());
    let sent = fixture.requests().len();
    assert!(page.submit(&api).await.unwrap_err().is_validation());
    assert_eq!(fixture.requests().len(), sent);

    let err = DestinationPage::load(&api, FormMode::Edit("nope".into()), DestinationKind::Popular)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_faq_inline_edit_refetches() {
    let fixture = TestFixture::new().await;
    let permissions = content_admin();
    let mut screen = ListScreen::mount(
        FaqResource::new(fixture.client(Some(TOKEN))),
        &permissions,
        Debouncer::new(Duration::from_millis(500)),
        10,
    )
    .await;
    assert_eq!(screen.items().len(), 1);
    assert_eq!(screen.items()[0].id, "f1");

    let mut input = screen.edit_prefill("f1").unwrap();
    assert_eq!(input.question, "Visa on arrival?");
    input.answer = "Yes, for 30 days".into();
    let notice = screen.submit_edit("f1", &input, Vec::new()).await;
    assert!(!notice.is_error());
    assert_eq!(notice.message, "Saved");

    assert_eq!(fixture.json_body("/api/admin/faq/f1")["answer"], "Yes, for 30 days");
    let lists = fixture
        .requests()
        .into_iter()
        .filter(|r| r == "GET /api/admin/faq")
        .count();
    assert_eq!(lists, 2);
    assert_eq!(screen.fetch_count(), 2);
}
