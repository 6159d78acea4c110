mod common;

use admin_core::error::AppError;
use invoicing_admin::config::ApiSettings;
use invoicing_admin::models::{
    Client, Company, DetailRecord, DocumentRecord, LineItem, Product, ProductRef,
};
use invoicing_admin::services::{ApiClient, DetailEditor, DocumentRepository, ProductCatalog};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiSettings {
        base_url: format!("{}/api/", server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

fn header_json() -> serde_json::Value {
    json!({
        "id": 9,
        "fechaEmision": "2025-03-14",
        "importeTotal": 0.0,
        "importeIGV": 0.0,
        "idCliente": 1,
        "idEmpresa": 2,
        "idTipoDocumento": 1,
        "idFormaPago": 1
    })
}

fn details_json() -> serde_json::Value {
    json!([
        {"id": 1, "idDocumento": 9, "idProducto": 1, "cantidad": 2, "precioUnitario": 100.0, "descuento": 0.0, "igvDetalle": 36.0},
        {"id": 2, "idDocumento": 9, "idProducto": 2, "cantidad": 3, "precioUnitario": 50.0, "descuento": 20.0, "igvDetalle": 23.4}
    ])
}

fn products_json() -> serde_json::Value {
    json!([
        {"id": 1, "nombre": "Laptop", "codigo": "LP-01", "precio": 100.0, "stock": 5, "categoria": "Computo", "descripcion": "Laptop 14 pulgadas"},
        {"id": 2, "nombre": "Monitor", "codigo": "MN-02", "precio": 50.0, "stock": 12, "categoria": "Computo", "descripcion": "Monitor 24 pulgadas"}
    ])
}

#[tokio::test]
async fn test_list_details_for_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/detalles/documento/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json()))
        .expect(1)
        .mount(&server)
        .await;

    let details = client_for(&server).list_details(9).await.unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(details[1].product_ref, ProductRef(2));
    assert_eq!(details[1].discount, dec!(20));
    assert_eq!(details[1].tax, dec!(23.4));
}

#[tokio::test]
async fn test_catalog_lists_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .mount(&server)
        .await;

    let products = client_for(&server).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].label(), "Laptop - LP-01");
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documentos/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_document(404).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_server_error_is_reported_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documentos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list::<DocumentRecord>()
        .await
        .unwrap_err();

    match err {
        AppError::Upstream { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list::<Product>().await.unwrap_err();

    assert_eq!(err.error_type(), "decode");
}

#[tokio::test]
async fn test_invalid_product_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut product = common::test_products().remove(0);
    product.id = None;
    product.stock = -1;

    let err = client_for(&server).create(&product).await.unwrap_err();

    assert_eq!(err.error_type(), "validation");
}

#[tokio::test]
async fn test_create_detail_posts_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/detalles"))
        .and(body_partial_json(json!({
            "idDocumento": 9,
            "idProducto": 2,
            "cantidad": 3,
            "precioUnitario": 50.0,
            "descuento": 20.0,
            "igvDetalle": 23.4
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 31, "idDocumento": 9, "idProducto": 2, "cantidad": 3,
            "precioUnitario": 50.0, "descuento": 20.0, "igvDetalle": 23.4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = LineItem::create(ProductRef(2), 3, dec!(50), dec!(20)).unwrap();
    let record = DetailRecord::from_line_item(&item, Some(9));

    let created = client_for(&server).create_detail(&record).await.unwrap();

    assert_eq!(created.id, Some(31));
    assert_eq!(created.tax, dec!(23.4));
}

#[tokio::test]
async fn test_delete_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/detalles/31"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/detalles/32"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    client.delete_detail(31).await.unwrap();
    let err = client.delete_detail(32).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_resource_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/clientes/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/productos/6"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/empresas/7"))
        .respond_with(ResponseTemplate::new(409).set_body_string("company has documents"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    client.delete::<Client>(5).await.unwrap();

    let err = client.delete::<Product>(6).await.unwrap_err();
    assert_eq!(err.error_type(), "not_found");

    let err = client
        .delete::<Company>(7)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream { status: 409, .. }));
}

#[tokio::test]
async fn test_save_without_id_creates_document() {
    let server = MockServer::start().await;
    let mut created = header_json();
    created["id"] = json!(15);
    Mock::given(method("POST"))
        .and(path("/api/documentos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;

    let mut header = common::test_header();
    header.id = None;

    let saved = client_for(&server).save_document(&header).await.unwrap();

    assert_eq!(saved.id, Some(15));
}

#[tokio::test]
async fn test_recalculate_document_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documentos/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(header_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/detalles/documento/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .mount(&server)
        .await;

    let mut saved = header_json();
    saved["importeIGV"] = json!(59.4);
    saved["importeTotal"] = json!(389.4);
    Mock::given(method("PUT"))
        .and(path("/api/documentos/9"))
        .and(body_partial_json(json!({"importeIGV": 59.4, "importeTotal": 389.4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));
    let mut editor = DetailEditor::open(client.clone(), client.as_ref(), 9)
        .await
        .unwrap();

    assert_eq!(editor.document().len(), 2);
    assert_eq!(editor.label_for(&editor.document().line_items()[1]), "Monitor - MN-02");

    let saved = editor.save().await.unwrap();

    assert_eq!(saved.tax_amount, dec!(59.4));
    assert_eq!(saved.total_amount, dec!(389.4));
    // The response carried no details, so the edited lines stay as they were.
    assert_eq!(editor.document().len(), 2);
}
