//! Product listing and creation over real HTTP.

use stockroom_integration_tests::{TestApp, body, location};

#[tokio::test]
async fn test_product_pages_require_login() {
    let app = TestApp::spawn().await;

    for path in ["/products", "/add_product"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), 303, "{path}");
        assert_eq!(location(&response), "/login");
    }

    let response = app.add_product("Widget", "19.99", "5").await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/login");
    assert_eq!(app.product_count().await, 0);
}

#[tokio::test]
async fn test_widget_scenario() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    let response = app.add_product("Widget", "19.99", "5").await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/products");

    let page = body(app.get("/products").await).await;
    assert!(page.contains("Widget"));
    assert!(page.contains("added."));
    assert!(page.contains("19.99"));
    assert!(page.contains(">5<"));

    let response = app.add_product("Bad", "x", "5").await;
    assert_eq!(response.status(), 422);
    let form = body(response).await;
    assert!(form.contains("Price must be a number and quantity must be a whole number."));
    assert!(form.contains(r#"value="Bad""#));

    assert_eq!(app.product_count().await, 1);
    let page = body(app.get("/products").await).await;
    assert!(!page.contains("Bad"));
}

#[tokio::test]
async fn test_non_integer_quantity_rejected() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    for quantity in ["2.5", "five", ""] {
        let response = app.add_product("Bolt", "1.00", quantity).await;
        assert_eq!(response.status(), 422, "{quantity:?}");
    }
    assert_eq!(app.product_count().await, 0);
}

#[tokio::test]
async fn test_listing_is_sorted_by_name() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    for name in ["Washer", "Bolt", "Mallet"] {
        assert_eq!(app.add_product(name, "1", "1").await.status(), 303);
    }
    // Drain the "added" flashes, which also mention the names.
    app.get("/products").await;

    let page = body(app.get("/products").await).await;
    let bolt = page.find("Bolt").unwrap();
    let mallet = page.find("Mallet").unwrap();
    let washer = page.find("Washer").unwrap();
    assert!(bolt < mallet && mallet < washer);
}

#[tokio::test]
async fn test_listing_only_shows_own_products() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;
    app.add_product("Alice's lamp", "10", "1").await;

    let bob = TestApp::browser();
    app.post_form_with(&bob, "/register", &[("username", "bob"), ("password", "hunter2")])
        .await;
    app.post_form_with(&bob, "/login", &[("username", "bob"), ("password", "hunter2")])
        .await;
    app.post_form_with(
        &bob,
        "/add_product",
        &[("name", "Bob's chair"), ("price", "20"), ("quantity", "2")],
    )
    .await;

    let page = body(app.get_with(&bob, "/products").await).await;
    assert!(page.contains("chair"));
    assert!(!page.contains("lamp"));
}

#[tokio::test]
async fn test_duplicate_reference_conflicts() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    let fields = [
        ("name", "Widget"),
        ("price", "1"),
        ("quantity", "1"),
        ("reference", "W-1"),
    ];
    assert_eq!(app.post_form("/add_product", &fields).await.status(), 303);

    let response = app.post_form("/add_product", &fields).await;
    assert_eq!(response.status(), 409);
    assert!(body(response).await.contains("W-1"));
    assert_eq!(app.product_count().await, 1);
}

#[tokio::test]
async fn test_product_names_are_escaped() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    app.add_product("<script>alert(1)</script>", "1", "1").await;

    let page = body(app.get("/products").await).await;
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_listing_shows_exact_price() {
    let app = TestApp::spawn().await;
    app.register_and_login("alice", "abcdef").await;

    assert_eq!(app.add_product("Gizmo", "19.999", "1").await.status(), 303);
    assert_eq!(app.add_product("Pin", "0.004", "1").await.status(), 303);

    let page = body(app.get("/products").await).await;
    assert!(page.contains("19.999"));
    assert!(page.contains("0.004"));
    assert!(!page.contains("20.00"));
    assert!(!page.contains("0.00<"));
}
