// Integration tests against a mocked backend
// The mock server stands in for the jugueteria REST API; these tests pin the
// wire contract (paths, bodies, bearer header) and the login flow end to end.

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use jugueteria_client::{ApiClient, ApiError, LoginRequest};
use jugueteria_core::{
    MemoryTokenStore, NavTarget, Router, SessionManager, TokenClaims, ROLE_ADMIN,
};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mint_token(email: &str, name: &str, roles: &[&str]) -> String {
    let claims = TokenClaims {
        sub: email.to_string(),
        nombre: name.to_string(),
        authorities: roles.iter().map(|r| r.to_string()).collect(),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

fn new_client(base_url: &str) -> (ApiClient, UnboundedReceiver<NavTarget>) {
    let (session, redirects) = SessionManager::new(Box::new(MemoryTokenStore::new()));
    (ApiClient::new(base_url, Arc::new(session)), redirects)
}

fn order_body(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fechaPedido": "2025-10-05T12:00:00Z",
        "estado": status,
        "total": 59.90,
        "direccionEnvio": "Av. Siempre Viva 742",
        "detalles": []
    })
}

#[tokio::test]
async fn test_login_establishes_session_and_opens_back_office() {
    let server = MockServer::start().await;
    let token = mint_token("a@b.com", "Ana", &[ROLE_ADMIN]);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(&server)
        .await;

    let (client, mut redirects) = new_client(&server.uri());
    let profile = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(profile.email, "a@b.com");
    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.roles, vec![ROLE_ADMIN.to_string()]);

    // The broadcast channel carries the decoded roles
    let rx = client.session().subscribe();
    assert_eq!(
        rx.borrow().as_ref().unwrap().roles,
        vec![ROLE_ADMIN.to_string()]
    );

    // An admin session passes both back-office subtrees: /admin requires
    // ROLE_ADMIN, /worker accepts ROLE_ADMIN or ROLE_WORKER
    let router = Router::new(client.session().clone());
    assert!(router.navigate("/admin").is_allowed());
    assert!(router.navigate("/worker").is_allowed());

    // A successful login never fires the forced-login redirect
    assert!(redirects.try_recv().is_err());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let (client, mut redirects) = new_client(&server.uri());
    let err = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "bad credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.session().is_authenticated());
    assert!(redirects.try_recv().is_err());
}

#[tokio::test]
async fn test_undecodable_login_token_evicts_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "garbage"})))
        .mount(&server)
        .await;

    let (client, mut redirects) = new_client(&server.uri());
    let err = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Session(_)));
    assert!(!client.session().is_authenticated());
    assert_eq!(redirects.try_recv().unwrap(), NavTarget::Login);
}

#[tokio::test]
async fn test_bearer_header_attached_when_authenticated() {
    let server = MockServer::start().await;
    let token = mint_token("a@b.com", "Ana", &[]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client.session().establish(&token).unwrap();

    let products = client.list_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client.list_categories().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_error_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());

    match client.list_products().await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        client.get_product(99).await.unwrap_err(),
        ApiError::NotFound
    ));
}

#[tokio::test]
async fn test_order_status_update_sends_bare_json_string() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/orders/5/status"))
        .and(body_json(json!("ENVIADO")))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body(5, "ENVIADO")))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client
        .session()
        .establish(&mint_token("w@b.com", "Wil", &["ROLE_WORKER"]))
        .unwrap();

    let order = client.update_order_status(5, "ENVIADO").await.unwrap();
    assert_eq!(order.status, "ENVIADO");
    assert_eq!(order.shipping_address, "Av. Siempre Viva 742");
}

#[tokio::test]
async fn test_invoice_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.4 fake invoice".to_vec();

    Mock::given(method("GET"))
        .and(path("/orders/7/invoice"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf.clone()))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client
        .session()
        .establish(&mint_token("a@b.com", "Ana", &[]))
        .unwrap();

    assert_eq!(client.download_invoice(7).await.unwrap(), pdf);
}

#[tokio::test]
async fn test_sales_report_passes_date_range_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales"))
        .and(query_param("startDate", "2025-10-01"))
        .and(query_param("endDate", "2025-10-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fechaInicio": "2025-10-01",
            "fechaFin": "2025-10-31",
            "numeroPedidos": 12,
            "totalVentas": 1234.5,
            "ventasPorDia": [{"date": "2025-10-01", "total": 100.0}],
            "topProductosVendidos": [
                {"productName": "Dino Set", "quantitySold": 4, "totalRevenue": 200.0}
            ]
        })))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client
        .session()
        .establish(&mint_token("a@b.com", "Ana", &[ROLE_ADMIN]))
        .unwrap();

    let report = client.sales_report("2025-10-01", "2025-10-31").await.unwrap();
    assert_eq!(report.order_count, 12);
    assert_eq!(report.daily_sales.len(), 1);
    assert_eq!(report.top_products[0].product_name, "Dino Set");
}

#[tokio::test]
async fn test_create_payment_preference_posts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/create-preference"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"preferenceId": "pref-1"})))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client
        .session()
        .establish(&mint_token("a@b.com", "Ana", &[]))
        .unwrap();

    let preference = client.create_payment_preference().await.unwrap();
    assert_eq!(preference.preference_id, "pref-1");
}

#[tokio::test]
async fn test_cart_mutations_return_updated_cart() {
    let server = MockServer::start().await;
    let cart = json!({
        "items": [{
            "productoId": 3,
            "productoNombre": "Tren de madera",
            "precioUnitario": 19.90,
            "cantidad": 2,
            "subtotal": 39.80,
            "productoImageUrl": null,
            "productoStock": 8
        }],
        "total": 39.80
    });

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .and(body_json(json!({"productoId": 3, "cantidad": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart.clone()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/cart/items/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0.0})))
        .mount(&server)
        .await;

    let (client, _redirects) = new_client(&server.uri());
    client
        .session()
        .establish(&mint_token("a@b.com", "Ana", &[]))
        .unwrap();

    let updated = client
        .add_cart_item(&jugueteria_client::CartItemRequest {
            product_id: 3,
            quantity: 2,
        })
        .await
        .unwrap();
    assert_eq!(updated.items[0].product_name, "Tren de madera");
    assert_eq!(updated.total, 39.80);

    let emptied = client.remove_cart_item(3).await.unwrap();
    assert!(emptied.items.is_empty());
}
