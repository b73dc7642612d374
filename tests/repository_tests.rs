//! Repository integration tests against a mock backend

use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use system_library_client::{
    config::{ApiConfig, AppConfig, AuthConfig},
    models::{
        Book, BookCopy, CheckOut, CheckOutView, NewCheckOut, Notification, PageRequest,
        PatronAccount, Publisher, Status,
    },
    repository::{LibraryGateway, Repository},
    AppError,
};

fn repository(server: &MockServer) -> Repository {
    let config = AppConfig {
        api: ApiConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        auth: AuthConfig {
            token: Some("test-token".to_string()),
        },
        ..Default::default()
    };
    Repository::new(&config).expect("client builds")
}

#[tokio::test]
async fn test_get_book_with_embedded_copies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/3"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "title": "Dune",
            "bookCopies": [
                { "id": 1, "yearPublished": 2020, "amount": 3, "image": "a.png" },
                { "id": 2, "yearPublished": null, "amount": 0 }
            ],
            "authors": [{ "id": 1, "name": "Frank Herbert" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let book = repository(&server).fetch_book(3).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.copies().len(), 2);
    assert_eq!(book.author_names(), "Frank Herbert");
}

#[tokio::test]
async fn test_missing_book_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Not Found",
            "detail": "Book 99 does not exist"
        })))
        .mount(&server)
        .await;

    let err = repository(&server).fetch_book(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_reads_total_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/publishers"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .and(query_param("sort", "id,asc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "42")
                .set_body_json(json!([{ "id": 1, "name": "Pub A" }])),
        )
        .mount(&server)
        .await;

    let page = repository(&server)
        .publishers
        .list(&PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 42);
    assert_eq!(page.items[0].name, "Pub A");
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/publishers"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "2")
                .set_body_json(json!([{ "id": 1, "name": "Pub A" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/publishers"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "2")
                .set_body_json(json!([{ "id": 2, "name": "Pub B" }])),
        )
        .mount(&server)
        .await;

    let publishers = repository(&server).list_publishers().await.unwrap();
    let names: Vec<_> = publishers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pub A", "Pub B"]);
}

#[tokio::test]
async fn test_publish_year_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/book-copies/publish-year"))
        .and(query_param("bookId", "3"))
        .and(query_param("year", "2020"))
        .and(query_param("publisherId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "yearPublished": 2020, "amount": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/book-copies/publish-year"))
        .and(query_param("year", "2019"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let repository = repository(&server);
    let found = repository.find_copy(3, 2020, 1).await.unwrap();
    assert_eq!(found.and_then(|c| c.amount), Some(3));

    let missing = repository.find_copy(3, 2019, 1).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_check_book_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/book-copies/check-book-available"))
        .and(query_param("bookId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let copies = repository(&server).check_book_available(3).await.unwrap();
    assert!(copies.is_empty());
}

#[tokio::test]
async fn test_create_check_out_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-outs"))
        .and(body_json(json!({
            "endTime": "2024-06-01T00:00:00.000Z",
            "bookCopy": { "id": 1, "yearPublished": 2020, "amount": 3 },
            "patronAccount": { "cardNumber": "C-001" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "endTime": "2024-06-01T00:00:00Z",
            "status": "Pending",
            "isReturned": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = NewCheckOut {
        end_time: "2024-06-01T00:00:00.000Z".to_string(),
        book_copy: BookCopy {
            id: Some(1),
            year_published: Some(2020),
            amount: Some(3),
            ..Default::default()
        },
        patron_account: PatronAccount {
            card_number: "C-001".to_string(),
            ..Default::default()
        },
    };
    let created = repository(&server).create_check_out(&request).await.unwrap();
    assert_eq!(created.id, Some(10));
    assert_eq!(created.status(), Status::Pending);
}

#[tokio::test]
async fn test_create_rejects_existing_id() {
    let server = MockServer::start().await;
    let publisher = Publisher {
        id: Some(4),
        name: "Pub".to_string(),
    };
    let err = repository(&server).publishers.create(&publisher).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let book = Book {
        id: Some(1),
        title: String::new(),
        ..Default::default()
    };
    let err = repository(&server).books.update(&book).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_partial_update_uses_merge_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/publishers/4"))
        .and(header("content-type", "application/merge-patch+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "name": "Renamed" })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = repository(&server)
        .publishers
        .partial_update(&Publisher {
            id: Some(4),
            name: "Renamed".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[tokio::test]
async fn test_patron_check_out_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check-outs-client"))
        .and(query_param("returned", "true"))
        .and(query_param("cardNumber", "C-001"))
        .and(query_param("status", "Confirmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "status": "Confirmed", "isReturned": true }
        ])))
        .mount(&server)
        .await;

    let page = repository(&server)
        .check_outs
        .list_for_patron("C-001", CheckOutView::Returned)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].returned());
}

#[tokio::test]
async fn test_current_patron_and_wait_list_purge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/patron-accounts/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cardNumber": "C-001",
            "user": { "id": 1, "login": "patron" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/wait-lists/delete-all"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let repository = repository(&server);
    let patron = repository.current_patron().await.unwrap();
    assert_eq!(patron.login(), Some("patron"));
    repository.wait_lists.delete_all().await.unwrap();
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check-outs/status"))
        .and(query_param("Status", "Pending"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = repository(&server)
        .check_outs
        .list_by_status(Status::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_check_out_round_trips_through_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/check-outs/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "status": "Refused"
        })))
        .mount(&server)
        .await;

    let check_out = CheckOut {
        id: Some(5),
        status: Some(Status::Refused),
        ..Default::default()
    };
    let updated = repository(&server).check_outs.update(&check_out).await.unwrap();
    assert_eq!(updated.status(), Status::Refused);
}

#[tokio::test]
async fn test_search_sends_query_and_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/_search/books"))
        .and(query_param("query", "dune"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .and(query_param("sort", "id,asc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "1")
                .set_body_json(json!([{ "id": 3, "title": "Dune" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = repository(&server)
        .books
        .search("dune", &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].title, "Dune");
}

#[tokio::test]
async fn test_copies_listed_by_book() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/book-copies/book"))
        .and(query_param("bookId", "3"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "6")
                .set_body_json(json!([{ "id": 6, "yearPublished": 2019, "amount": 1 }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = PageRequest {
        page: 1,
        size: 5,
        sort: None,
    };
    let page = repository(&server)
        .book_copies
        .list_by_book(3, &request)
        .await
        .unwrap();
    assert_eq!(page.total_items, 6);
    assert_eq!(page.items[0].year_published, Some(2019));
}

#[tokio::test]
async fn test_image_upload_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/images/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"cover.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://cdn.example/cover.png"))
        .expect(1)
        .mount(&server)
        .await;

    let url = repository(&server)
        .images
        .upload("cover.png", b"png-bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.example/cover.png");
}

#[tokio::test]
async fn test_image_upload_without_url_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/images/upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = repository(&server)
        .images
        .upload("cover.png", b"png-bytes".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_patron_activation_toggle() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/patron-accounts-status/C-001"))
        .and(query_param("activated", "false"))
        .and(body_json(json!({ "cardNumber": "C-001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cardNumber": "C-001",
            "user": { "id": 1, "login": "patron" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repository = repository(&server);
    let account = PatronAccount {
        card_number: "C-001".to_string(),
        ..Default::default()
    };
    let updated = repository
        .patron_accounts
        .set_activated(&account, false)
        .await
        .unwrap();
    assert_eq!(updated.login(), Some("patron"));

    let err = repository
        .patron_accounts
        .set_activated(&PatronAccount::default(), true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_patrons_below_borrowing_conditions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/patron-accounts/not-enough-condition"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "2")
                .set_body_json(json!([{ "cardNumber": "C-002" }, { "cardNumber": "C-003" }])),
        )
        .mount(&server)
        .await;

    let page = repository(&server)
        .patron_accounts
        .not_enough_condition(&PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[1].card_number, "C-003");
}

#[tokio::test]
async fn test_check_outs_by_patron_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/check-outs/patron-account"))
        .and(query_param("patronNumber", "C-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "status": "Confirmed", "isReturned": false },
            { "id": 2, "status": "Refused", "isReturned": false }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repository = repository(&server);
    let check_outs = repository
        .check_outs
        .list_by_patron_number(" C-001 ")
        .await
        .unwrap();
    assert_eq!(check_outs.len(), 2);
    assert_eq!(check_outs[1].status(), Status::Refused);

    let err = repository
        .check_outs
        .list_by_patron_number("")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_notifications_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "sentAt": "2024-06-01T08:00:00Z",
            "type": "Email",
            "patronAccount": { "cardNumber": "C-001" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications"))
        .and(body_json(json!({ "type": "Sms" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "type": "Sms" })))
        .expect(1)
        .mount(&server)
        .await;

    let repository = repository(&server);
    let notification = repository.notifications.get(4).await.unwrap();
    assert_eq!(notification.kind.as_deref(), Some("Email"));
    assert_eq!(
        notification.patron_account.map(|p| p.card_number).as_deref(),
        Some("C-001")
    );

    let created = repository
        .notifications
        .create(&Notification {
            kind: Some("Sms".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(5));
}
