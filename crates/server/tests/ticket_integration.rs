//! HTTP-level tests for the ticket lifecycle.

mod common;

use axum::http::StatusCode;
use common::TestFixture;
use parlance_core::ProviderError;
use serde_json::json;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_ticket_returns_created() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/tickets",
            json!({
                "originalText": "Hello world",
                "sourceLang": "en",
                "targetLang": "pt-BR"
            }),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert!(response.body["id"].as_i64().is_some());
    assert_eq!(response.body["originalText"], "Hello world");
    assert_eq!(response.body["sourceLang"], "en");
    assert_eq!(response.body["targetLang"], "pt-BR");
    assert_eq!(response.body["status"], "CREATED");
    assert!(response.body["translatedText"].is_null());
    assert!(response.body["translatedAt"].is_null());
    assert!(response.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_ticket_blank_field_rejected() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/tickets",
            json!({
                "originalText": "   ",
                "sourceLang": "en",
                "targetLang": "pt"
            }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_code!(response, "BAD_REQUEST");
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("originalText"));
}

#[tokio::test]
async fn test_create_ticket_missing_field_rejected() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/tickets",
            json!({
                "originalText": "Hello",
                "sourceLang": "en"
            }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("targetLang"));
}

#[tokio::test]
async fn test_create_ticket_malformed_json() {
    let fixture = TestFixture::new();

    let response = fixture.post_raw("/tickets", "{not json").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_code!(response, "BAD_REQUEST");
    assert_eq!(response.body["message"], "Malformed JSON request body");
}

// ============================================================================
// Get / List
// ============================================================================

#[tokio::test]
async fn test_get_ticket() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Good morning", "en", "es").await;

    let response = fixture.get(&format!("/tickets/{}", id)).await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["originalText"], "Good morning");
}

#[tokio::test]
async fn test_get_missing_ticket_is_not_found() {
    let fixture = TestFixture::new();

    let response = fixture.get("/tickets/999").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_error_code!(response, "NOT_FOUND");
    assert_eq!(response.body["message"], "Ticket with id 999 not found");
}

#[tokio::test]
async fn test_invalid_ticket_id() {
    let fixture = TestFixture::new();

    let response = fixture.get("/tickets/abc").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid ticket id");
}

#[tokio::test]
async fn test_list_tickets_with_status_filter() {
    let fixture = TestFixture::new();
    let first = fixture.create_ticket("One", "en", "de").await;
    let second = fixture.create_ticket("Two", "en", "de").await;

    fixture.provider.set_translation("Zwei").await;
    let response = fixture
        .post_empty(&format!("/tickets/{}/translate", second))
        .await;
    assert_status!(response, StatusCode::OK);

    let all = fixture.get("/tickets").await;
    assert_status!(all, StatusCode::OK);
    let all = all.body.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], first);
    assert_eq!(all[1]["id"], second);

    let created = fixture.get("/tickets?status=created").await;
    assert_status!(created, StatusCode::OK);
    let created = created.body.as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["id"], first);

    let translated = fixture.get("/tickets?status=TRANSLATED").await;
    let translated = translated.body.as_array().unwrap();
    assert_eq!(translated.len(), 1);
    assert_eq!(translated[0]["translatedText"], "Zwei");

    let blank = fixture.get("/tickets?status=").await;
    assert_status!(blank, StatusCode::OK);
    assert_eq!(blank.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_tickets_invalid_status() {
    let fixture = TestFixture::new();

    let response = fixture.get("/tickets?status=bogus").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid status: bogus");
}

// ============================================================================
// Translate
// ============================================================================

#[tokio::test]
async fn test_translate_then_conflict() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "pt-BR").await;
    fixture.provider.set_translation("Olá").await;

    let response = fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "TRANSLATED");
    assert_eq!(response.body["translatedText"], "Olá");
    assert!(response.body["translatedAt"].is_string());

    let calls = fixture.provider.recorded_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "Hello");
    assert_eq!(calls[0].source_lang.as_deref(), Some("en"));
    assert_eq!(calls[0].target_lang.as_deref(), Some("pt-BR"));

    let again = fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    assert_status!(again, StatusCode::CONFLICT);
    assert_error_code!(again, "CONFLICT");
    assert_eq!(
        again.body["message"],
        format!("Ticket with id {} is already translated", id)
    );
    assert_eq!(fixture.provider.call_count().await, 1);
}

#[tokio::test]
async fn test_translate_missing_ticket() {
    let fixture = TestFixture::new();

    let response = fixture.post_empty("/tickets/42/translate").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(fixture.provider.call_count().await, 0);
}

#[tokio::test]
async fn test_translate_provider_failure_marks_failed() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "fr").await;
    fixture
        .provider
        .set_failure(ProviderError::Api {
            status: 403,
            body: "Forbidden".to_string(),
        })
        .await;

    let response = fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    assert_status!(response, StatusCode::BAD_GATEWAY);
    assert_error_code!(response, "BAD_GATEWAY");
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("Provider HTTP 403: Forbidden"));

    let ticket = fixture.get(&format!("/tickets/{}", id)).await;
    assert_eq!(ticket.body["status"], "FAILED");
    assert!(ticket.body["translatedText"].is_null());
}

#[tokio::test]
async fn test_failed_ticket_can_be_retried() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "it").await;
    fixture
        .provider
        .set_next_error(ProviderError::Timeout("deadline".to_string()))
        .await;

    let first = fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;
    assert_status!(first, StatusCode::BAD_GATEWAY);

    fixture.provider.set_translation("Ciao").await;
    let second = fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    assert_status!(second, StatusCode::OK);
    assert_eq!(second.body["status"], "TRANSLATED");
    assert_eq!(second.body["translatedText"], "Ciao");
}

// ============================================================================
// Delivery / Status
// ============================================================================

#[tokio::test]
async fn test_delivery_requires_translation() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "pt").await;

    let response = fixture.get(&format!("/tickets/{}/delivery", id)).await;

    assert_status!(response, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        format!("Ticket with id {} is not translated yet", id)
    );
}

#[tokio::test]
async fn test_delivery_is_repeatable() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "pt").await;
    fixture.provider.set_translation("Olá").await;
    fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    for _ in 0..2 {
        let response = fixture.get(&format!("/tickets/{}/delivery", id)).await;

        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["delivered"], true);
        assert_eq!(response.body["ticketId"], id);
        assert!(response.body["deliveredAt"].is_string());
        assert_eq!(response.body["payload"]["originalText"], "Hello");
        assert_eq!(response.body["payload"]["translatedText"], "Olá");
        assert_eq!(response.body["payload"]["sourceLang"], "en");
        assert_eq!(response.body["payload"]["targetLang"], "pt");
    }

    let ticket = fixture.get(&format!("/tickets/{}", id)).await;
    assert_eq!(ticket.body["status"], "TRANSLATED");
}

#[tokio::test]
async fn test_translation_status_view() {
    let fixture = TestFixture::new();
    let id = fixture.create_ticket("Hello", "en", "nl").await;

    let before = fixture.get(&format!("/tickets/{}/status", id)).await;
    assert_status!(before, StatusCode::OK);
    assert_eq!(before.body["id"], id);
    assert_eq!(before.body["status"], "CREATED");
    assert!(before.body["translatedText"].is_null());

    fixture.provider.set_translation("Hallo").await;
    fixture
        .post_empty(&format!("/tickets/{}/translate", id))
        .await;

    let after = fixture.get(&format!("/tickets/{}/status", id)).await;
    assert_eq!(after.body["status"], "TRANSLATED");
    assert_eq!(after.body["translatedText"], "Hallo");
}

// ============================================================================
// Operational endpoints
// ============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_hides_api_key() {
    let fixture = TestFixture::new();

    let response = fixture.get("/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["provider"]["api_key_configured"], false);
    assert!(response.body["provider"].get("api_key").is_none());
}

#[tokio::test]
async fn test_metrics_exposes_ticket_counts() {
    let fixture = TestFixture::new();
    fixture.create_ticket("Hello", "en", "pt").await;

    let (status, body) = fixture.get_text("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("parlance_tickets_by_status"));
    assert!(body.contains("parlance_tickets_created_total"));
}
