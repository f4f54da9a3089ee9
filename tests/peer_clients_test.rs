use ecom_interlink::domain::peers::{
    InitPaymentParams, MediaFile, OrderItem, ReservationAction, SettlementDetail, SkuReservation,
    UserInfo,
};
use ecom_interlink::domain::ports::{MediaService, OrderService, ProductService, TransactionService};
use ecom_interlink::utils::error::ErrorCategory;
use ecom_interlink::{
    index_by_product, InterlinkError, MediaClient, OrderClient, ProductClient, TransactionClient,
    Transport,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn transport() -> Transport {
    Transport::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_update_order_status_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/v1/orders/admin/update_status")
            .header("authorization", "Bearer sys-token")
            .header("content-type", "application/json")
            .json_body(json!({"status": "shipped", "shop_order_id": "ord-42"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"success","message":"updated","code":0,"error":"","result":null}"#);
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let result = client
        .update_order_status("sys-token", "ord-42", "shipped")
        .await
        .unwrap();

    mock.assert();
    assert!(result.is_success());
    assert_eq!(result.status, "success");
    assert_eq!(result.message, "updated");
    assert!(result.error.is_empty());
    assert_eq!(result.failure_reason(), None);
    assert_eq!(result.http_status, Some(200));
}

#[tokio::test]
async fn test_remote_failure_is_data_not_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/v1/orders/admin/update_status");
        then.status(200).body(
            r#"{"status":"error","message":"invalid transition","code":409,"error":"invalid transition","result":null}"#,
        );
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let result = client
        .update_order_status("sys-token", "ord-42", "delivered")
        .await
        .expect("a failed operation still decodes");

    mock.assert();
    assert_eq!(result.status, "error");
    assert_eq!(result.code, 409);
    assert_eq!(result.failure_reason(), Some("invalid transition"));
}

#[tokio::test]
async fn test_error_envelope_with_non_2xx_status_is_still_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/v1/orders/callback_payment_online/ord-7");
        then.status(400).json_body(json!({
            "status": "error",
            "message": "order already paid",
            "code": 400,
            "error": "order already paid"
        }));
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let result = client.confirm_online_payment("ord-7").await.unwrap();

    assert!(result.is_failure());
    assert_eq!(result.http_status, Some(400));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/v1/orders/admin/update_status");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"status": "success"}));
    });

    let transport = Transport::new(Duration::from_millis(200)).unwrap();
    let client = OrderClient::new(&server.base_url(), &transport).unwrap();

    let started = std::time::Instant::now();
    let err = client
        .update_order_status("sys-token", "ord-1", "shipped")
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = OrderClient::new("http://127.0.0.1:1", &transport()).unwrap();

    let err = client.confirm_online_payment("ord-1").await.unwrap_err();

    assert!(matches!(err, InterlinkError::Transport { .. }));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/v1/orders/admin/update_status");
        then.status(200).body("<html>bad gateway</html>");
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let err = client
        .update_order_status("sys-token", "ord-1", "shipped")
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Decode);
    assert!(!err.is_transport());
    match err {
        InterlinkError::Decode { http_status, url, .. } => {
            assert_eq!(http_status, 200);
            assert!(url.ends_with("/v1/orders/admin/update_status"));
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_500_is_decode_error_with_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/product/getsku/sku-1");
        then.status(500).body("internal error");
    });

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    let err = client.get_sku("sku-1").await.unwrap_err();

    assert!(matches!(err, InterlinkError::Decode { http_status: 500, .. }));
}

#[tokio::test]
async fn test_empty_identifier_sends_nothing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"status": "success"}));
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let err = client
        .update_order_status("sys-token", "  ", "shipped")
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RequestBuild);
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_dot_identifier_sends_nothing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"status": "success"}));
    });

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    for dots in ["..", "."] {
        let err = client.get_sku(dots).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::RequestBuild);
    }

    mock.assert_hits(0);
}

#[tokio::test]
async fn test_get_sku_decodes_typed_result() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/product/getsku/sku-1");
        then.status(200).json_body(json!({
            "status": "success",
            "message": "ok",
            "code": 200,
            "result": {"data": {
                "id": "sku-1",
                "product_id": "p-1",
                "sku_code": "RED-M",
                "price": 19.5,
                "quantity": 10,
                "quantity_reserver": 4,
                "create_date": "2025-01-02T03:04:05Z"
            }}
        }));
    });

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    let result = client.get_sku("sku-1").await.unwrap();

    mock.assert();
    let sku = result.result.unwrap().data;
    assert_eq!(sku.sku_code, "RED-M");
    assert_eq!(sku.available(), 6);
}

#[tokio::test]
async fn test_get_product_detail_with_missing_sections() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/product/getdetail_with_id/p-1");
        then.status(200).json_body(json!({
            "status": "success",
            "message": "ok",
            "code": 200,
            "result": {"data": {
                "product": {
                    "id": "p-1",
                    "name": "Tee",
                    "media": "https://cdn/a.png, https://cdn/b.png,"
                }
            }}
        }));
    });

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    let result = client.get_product_detail("p-1").await.unwrap();

    mock.assert();
    assert_eq!(result.http_status, Some(200));
    let detail = result.result.unwrap().data;
    assert_eq!(detail.product.name, "Tee");
    assert_eq!(
        detail.product.media_urls(),
        vec!["https://cdn/a.png", "https://cdn/b.png"]
    );
    assert!(detail.brand.is_none());
    assert!(detail.sku.is_empty());
}

#[tokio::test]
async fn test_success_with_wrong_payload_shape_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/product/getdetail_with_id/p-1");
        then.status(200).json_body(json!({
            "status": "success",
            "result": {"data": "not a product"}
        }));
    });

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    let err = client.get_product_detail("p-1").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Decode);
}

#[tokio::test]
async fn test_sku_reservation_sends_bearer_and_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/product/update_sku_reserver")
            .header("authorization", "Bearer svc-token")
            .json_body(json!({
                "status": "hold",
                "data": [
                    {"sku_id": "sku-1", "quantity_reserver": 2},
                    {"sku_id": "sku-2", "quantity_reserver": 1}
                ]
            }));
        then.status(200).json_body(json!({"status": "success", "message": "held"}));
    });

    let items = vec![
        SkuReservation {
            sku_id: "sku-1".to_string(),
            quantity: 2,
        },
        SkuReservation {
            sku_id: "sku-2".to_string(),
            quantity: 1,
        },
    ];

    let client = ProductClient::new(&server.base_url(), &transport()).unwrap();
    let result = client
        .update_sku_reservation("svc-token", ReservationAction::Hold, &items)
        .await
        .unwrap();

    mock.assert();
    assert!(result.is_success());
}

#[tokio::test]
async fn test_sku_reservation_requires_token() {
    let client = ProductClient::new("http://product.invalid", &transport()).unwrap();
    let items = vec![SkuReservation {
        sku_id: "sku-1".to_string(),
        quantity: 1,
    }];

    let err = client
        .update_sku_reservation("", ReservationAction::Commit, &items)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RequestBuild);
}

#[tokio::test]
async fn test_update_order_status_requires_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({"status": "success"}));
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let err = client
        .update_order_status("", "ord-42", "shipped")
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RequestBuild);
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_bulk_total_sold() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/orders/get_product_total_sold")
            .json_body(json!({"product_ids": ["p-1", "p-2"]}));
        then.status(200).json_body(json!({
            "status": "success",
            "code": 200,
            "result": {"data": [
                {"product_id": "p-1", "total_sold": 12},
                {"product_id": "p-2", "total_sold": 0}
            ]}
        }));
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let ids = vec!["p-1".to_string(), "p-2".to_string()];
    let result = client.get_product_total_sold(&ids).await.unwrap();

    mock.assert();
    let index = index_by_product(result.result.unwrap().data);
    assert_eq!(index["p-1"].total_sold, 12);
    assert_eq!(index["p-2"].total_sold, 0);
}

#[tokio::test]
async fn test_bulk_with_no_ids_is_answered_locally() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(500);
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let result = client.get_bulk_rating_stats(&[]).await.unwrap();

    mock.assert_hits(0);
    assert!(result.is_success());
    assert_eq!(result.http_status, None);
    assert!(result.result.unwrap().data.is_empty());
}

#[tokio::test]
async fn test_rating_stats_failure_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/comments/bulk-stats");
        then.status(200).json_body(json!({
            "status": "error",
            "message": "database unavailable",
            "code": 500,
            "result": {}
        }));
    });

    let client = OrderClient::new(&server.base_url(), &transport()).unwrap();
    let result = client
        .get_bulk_rating_stats(&["p-1".to_string()])
        .await
        .unwrap();

    assert!(result.is_failure());
    assert!(result.result.is_none());
    assert_eq!(result.failure_reason(), Some("database unavailable"));
}

fn payment_params() -> InitPaymentParams {
    InitPaymentParams {
        order_id: "ord-9".to_string(),
        amount: 120.0,
        payment_method_id: "pm-momo".to_string(),
        items: vec![OrderItem {
            product_id: "p-1".to_string(),
            name: "Lamp".to_string(),
            image_url: String::new(),
            quantity: 1,
            price: 100.0,
        }],
        site_order_voucher_discount_amount: 0.0,
        site_promotion_discount_amount: 0.0,
        site_shipping_discount_amount: 0.0,
        total_site_funded_product_discount: 0.0,
        settlement_details: vec![SettlementDetail {
            shop_order_id: "shop-ord-1".to_string(),
            order_subtotal: 100.0,
            shipping_fee: 20.0,
            commission_fee: 5.0,
            net_settled_amount: 95.0,
            ..Default::default()
        }],
        user_info: UserInfo {
            name: "An".to_string(),
            phone_number: "0900000000".to_string(),
            address: "1 Le Loi".to_string(),
        },
    }
}

#[tokio::test]
async fn test_init_transaction() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/transaction/init")
            .header("authorization", "Bearer user-jwt")
            .body_contains(r#""order_id":"ord-9""#)
            .body_contains(r#""phoneNumber":"0900000000""#);
        then.status(201).json_body(json!({
            "status": "success",
            "code": 200,
            "result": {"data": {
                "orderId": "ord-9",
                "amount": 120.0,
                "payUrl": "https://pay.example/ord-9",
                "resultCode": 0
            }}
        }));
    });

    let client = TransactionClient::new(&server.base_url(), &transport()).unwrap();
    let result = client
        .init_transaction("user-jwt", &payment_params())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(result.http_status, Some(201));
    assert_eq!(
        result.result.unwrap().data.pay_url,
        "https://pay.example/ord-9"
    );
}

#[tokio::test]
async fn test_init_transaction_requires_settlement() {
    let client = TransactionClient::new("http://payment.invalid", &transport()).unwrap();
    let mut params = payment_params();
    params.settlement_details.clear();

    let err = client.init_transaction("jwt", &params).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RequestBuild);
}

#[tokio::test]
async fn test_get_payment_method() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/transaction/payment_method/pm-cod");
        then.status(200).json_body(json!({
            "status": "success",
            "result": {"data": {
                "id": "pm-cod",
                "name": "Cash on delivery",
                "code": "COD",
                "type": "OFFLINE",
                "is_active": true
            }}
        }));
    });

    let client = TransactionClient::new(&server.base_url(), &transport()).unwrap();
    let method = client
        .get_payment_method("pm-cod")
        .await
        .unwrap()
        .result
        .unwrap()
        .data;

    assert_eq!(method.kind, "OFFLINE");
    assert!(method.is_active);
}

#[tokio::test]
async fn test_upload_images_multipart() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/media/uploads")
            .header("authorization", "Bearer tok")
            .body_contains(r#"name="media"; filename="a.png""#)
            .body_contains(r#"name="media"; filename="b.jpg""#);
        then.status(200).json_body(json!({
            "status": "success",
            "result": {"urls": ["https://cdn/a.png", "https://cdn/b.jpg"]}
        }));
    });

    let files = vec![
        MediaFile::new("a.png", vec![0x89, 0x50]).with_content_type("image/png"),
        MediaFile::new("b.jpg", vec![0xff, 0xd8]),
    ];

    let client = MediaClient::new(&server.base_url(), &transport()).unwrap();
    let result = client.upload_images("tok", files).await.unwrap();

    mock.assert();
    assert_eq!(result.result.unwrap().urls.len(), 2);
}

#[tokio::test]
async fn test_clients_share_one_transport() {
    let server = MockServer::start();
    let order_mock = server.mock(|when, then| {
        when.method(PUT).path("/v1/orders/callback_payment_online/ord-1");
        then.status(200).json_body(json!({"status": "success"}));
    });
    let product_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/product/getsku/sku-1");
        then.status(200).json_body(json!({"status": "error", "message": "not found", "code": 404}));
    });

    let shared = transport();
    let order = OrderClient::new(&server.base_url(), &shared).unwrap();
    let product = ProductClient::new(&server.base_url(), &shared).unwrap();

    let (paid, sku) = tokio::join!(order.confirm_online_payment("ord-1"), product.get_sku("sku-1"));

    order_mock.assert();
    product_mock.assert();
    assert!(paid.unwrap().is_success());
    assert!(sku.unwrap().is_failure());
}
