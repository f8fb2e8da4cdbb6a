//! Integration tests for screen, category and dish editing.
//!
//! Every mutation is a form POST that redirects back to the editor; the
//! tests assert on the persisted document as well, through the same store
//! the server writes to.

use gastroboard_core::{Rotation, ScreenKind};
use gastroboard_integration_tests::TestApp;
use reqwest::StatusCode;

// ============================================================================
// Screen Tests
// ============================================================================

#[tokio::test]
async fn test_add_screen_opens_it_in_the_editor() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens", app.base_url))
        .form(&[("kind", "PROMO")])
        .send()
        .await
        .expect("Failed to post add-screen form");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("4. АКЦИЯ"));
    assert!(body.contains("Сохранить акцию"));
    assert!(body.contains("ЗАГОЛОВОК АКЦИИ"));

    let config = app.store.load();
    assert_eq!(config.screens.len(), 4);
    let added = config.screens.last().expect("no screens");
    assert_eq!(added.kind(), ScreenKind::Promo);
    assert_eq!(added.duration_secs, Some(20));
    assert_eq!(added.display_frequency, 1);
}

#[tokio::test]
async fn test_add_screen_rejects_unknown_kind() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens", app.base_url))
        .form(&[("kind", "TICKER")])
        .send()
        .await
        .expect("Failed to post add-screen form");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.load().screens.len(), 3);
}

#[tokio::test]
async fn test_update_screen_settings() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-1/update", app.base_url))
        .form(&[
            ("duration", "25"),
            ("display_frequency", "3"),
            ("content_scale", "1.5"),
            ("rotation", "90"),
        ])
        .send()
        .await
        .expect("Failed to post settings form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let screen = config.screens.first().expect("no screens");
    assert_eq!(screen.duration_secs, Some(25));
    assert_eq!(screen.display_frequency, 3);
    assert_eq!(screen.content_scale, Some(1.5));
    assert_eq!(screen.rotation, Rotation::R90);

    // The display picks the new duration up on the next page.
    let board = TestApp::client()
        .get(format!("{}/", app.base_url))
        .send()
        .await
        .expect("Failed to get board")
        .text()
        .await
        .expect("Failed to read body");
    assert!(board.contains("data-duration-secs=\"25\""));
}

#[tokio::test]
async fn test_blank_duration_inherits_the_global_default() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-1/update", app.base_url))
        .form(&[
            ("duration", ""),
            ("display_frequency", "1"),
            ("content_scale", ""),
            ("rotation", "0"),
        ])
        .send()
        .await
        .expect("Failed to post settings form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let screen = config.screens.first().expect("no screens");
    assert_eq!(screen.duration_secs, None);
    assert_eq!(screen.content_scale, None);

    let board = TestApp::client()
        .get(format!("{}/", app.base_url))
        .send()
        .await
        .expect("Failed to get board")
        .text()
        .await
        .expect("Failed to read body");
    assert!(board.contains("data-duration-secs=\"20\""));
}

#[tokio::test]
async fn test_update_missing_screen_is_not_found() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/no-such-screen/update", app.base_url))
        .form(&[("duration", "10")])
        .send()
        .await
        .expect("Failed to post settings form");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_move_screen_up() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-2/move", app.base_url))
        .form(&[("direction", "up")])
        .send()
        .await
        .expect("Failed to post move form");
    assert_eq!(resp.status(), StatusCode::OK);

    let ids: Vec<String> = app
        .store
        .load()
        .screens
        .iter()
        .map(|screen| screen.id.to_string())
        .collect();
    assert_eq!(ids, vec!["screen-2", "screen-1", "screen-3"]);

    // Moving the first screen further up is a silent no-op.
    let resp = client
        .post(format!("{}/admin/screens/screen-2/move", app.base_url))
        .form(&[("direction", "up")])
        .send()
        .await
        .expect("Failed to post move form");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        app.store
            .load()
            .screens
            .first()
            .expect("no screens")
            .id
            .to_string(),
        "screen-2"
    );
}

#[tokio::test]
async fn test_delete_screen() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-1/delete", app.base_url))
        .send()
        .await
        .expect("Failed to post delete form");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/admin");

    let config = app.store.load();
    assert_eq!(config.screens.len(), 2);
    assert!(
        config
            .screens
            .iter()
            .all(|screen| screen.id.as_str() != "screen-1")
    );
}

#[tokio::test]
async fn test_editor_lists_screens_and_falls_back_on_stale_selection() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let body = client
        .get(format!("{}/admin?screen=long-gone", app.base_url))
        .send()
        .await
        .expect("Failed to get editor")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.contains("1. МЕНЮ"));
    assert!(body.contains("2. МЕНЮ"));
    assert!(body.contains("3. АКЦИЯ"));
    // The stale selection falls back to the first screen.
    assert!(body.contains(r#"screen-item selected" href="/admin?screen=screen-1""#));
}

// ============================================================================
// Promo Tests
// ============================================================================

#[tokio::test]
async fn test_update_promo_content() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-3/promo", app.base_url))
        .form(&[
            ("text", "ДЕСЕРТ В ПОДАРОК"),
            ("qr_url", ""),
            ("footer_text", ""),
        ])
        .send()
        .await
        .expect("Failed to post promo form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let promo = config
        .screens
        .get(2)
        .and_then(|screen| screen.content.as_promo())
        .expect("no promo screen");
    assert_eq!(promo.text, "ДЕСЕРТ В ПОДАРОК");
    assert!(!promo.has_qr());

    // Without a QR target the slide renders no QR image at all.
    let board = TestApp::client()
        .get(format!("{}/?i=2&l=1", app.base_url))
        .send()
        .await
        .expect("Failed to get board")
        .text()
        .await
        .expect("Failed to read body");
    assert!(board.contains("ДЕСЕРТ В ПОДАРОК"));
    assert!(!board.contains("api.qrserver.com"));
}

#[tokio::test]
async fn test_promo_update_on_menu_screen_is_rejected() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/screens/screen-1/promo", app.base_url))
        .form(&[("text", "x"), ("qr_url", ""), ("footer_text", "")])
        .send()
        .await
        .expect("Failed to post promo form");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Category and Dish Tests
// ============================================================================

#[tokio::test]
async fn test_category_and_dish_editing_flow() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    // Add a category; it lands at the end with the placeholder title.
    let resp = client
        .post(format!("{}/admin/screens/screen-1/categories", app.base_url))
        .send()
        .await
        .expect("Failed to post add-category form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let menu = config
        .screens
        .first()
        .and_then(|screen| screen.content.as_menu())
        .expect("no menu screen");
    assert_eq!(menu.categories.len(), 3);
    let category = menu.categories.last().expect("no categories");
    assert_eq!(category.title, "НОВАЯ КАТЕГОРИЯ");
    assert!(category.dishes.is_empty());
    let category_id = category.id.to_string();

    // Rename it.
    let resp = client
        .post(format!(
            "{}/admin/screens/screen-1/categories/{category_id}/rename",
            app.base_url
        ))
        .form(&[("title", "НАПИТКИ")])
        .send()
        .await
        .expect("Failed to post rename form");
    assert_eq!(resp.status(), StatusCode::OK);

    // Add a dish; it starts from the placeholder values.
    let resp = client
        .post(format!(
            "{}/admin/screens/screen-1/categories/{category_id}/dishes",
            app.base_url
        ))
        .send()
        .await
        .expect("Failed to post add-dish form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let category = config
        .screens
        .first()
        .and_then(|screen| screen.content.as_menu())
        .and_then(|menu| menu.categories.last())
        .expect("no categories");
    assert_eq!(category.title, "НАПИТКИ");
    let dish = category.dishes.first().expect("no dishes");
    assert_eq!(dish.name, "Новое блюдо");
    assert_eq!(dish.weight, "200г");
    let dish_id = dish.id.to_string();

    // Fill the dish in, half portion included.
    let resp = client
        .post(format!(
            "{}/admin/screens/screen-1/categories/{category_id}/dishes/{dish_id}/update",
            app.base_url
        ))
        .form(&[
            ("name", "Морс клюквенный"),
            ("weight", "400мл"),
            ("price", "450.50"),
            ("half_portion", "on"),
        ])
        .send()
        .await
        .expect("Failed to post dish form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let dish = config
        .screens
        .first()
        .and_then(|screen| screen.content.as_menu())
        .and_then(|menu| menu.categories.last())
        .and_then(|category| category.dishes.first())
        .expect("no dishes");
    assert_eq!(dish.name, "Морс клюквенный");
    // The document stores prices as JSON numbers, so the scale normalizes.
    assert_eq!(dish.price.to_string(), "450.5");
    assert!(dish.half_portion);

    // The board renders the derived full/half texts.
    let board = TestApp::client()
        .get(format!("{}/", app.base_url))
        .send()
        .await
        .expect("Failed to get board")
        .text()
        .await
        .expect("Failed to read body");
    assert!(board.contains("НАПИТКИ"));
    assert!(board.contains("400/200мл"));
    assert!(board.contains("450.5/225 ₽"));

    // Delete the dish, then the category.
    let resp = client
        .post(format!(
            "{}/admin/screens/screen-1/categories/{category_id}/dishes/{dish_id}/delete",
            app.base_url
        ))
        .send()
        .await
        .expect("Failed to post dish delete form");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!(
            "{}/admin/screens/screen-1/categories/{category_id}/delete",
            app.base_url
        ))
        .send()
        .await
        .expect("Failed to post category delete form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let menu = config
        .screens
        .first()
        .and_then(|screen| screen.content.as_menu())
        .expect("no menu screen");
    assert_eq!(menu.categories.len(), 2);
}

#[tokio::test]
async fn test_unchecked_half_portion_clears_the_flag() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    // Борщ домашний on screen-2 starts as a half-portion dish.
    let resp = client
        .post(format!(
            "{}/admin/screens/screen-2/categories/cat-3/dishes/d-6/update",
            app.base_url
        ))
        .form(&[
            ("name", "Борщ домашний"),
            ("weight", "350г"),
            ("price", "300"),
        ])
        .send()
        .await
        .expect("Failed to post dish form");
    assert_eq!(resp.status(), StatusCode::OK);

    let config = app.store.load();
    let dish = config
        .screens
        .get(1)
        .and_then(|screen| screen.content.as_menu())
        .and_then(|menu| menu.categories.first())
        .and_then(|category| category.dishes.first())
        .expect("no dishes");
    assert!(!dish.half_portion);
}

// ============================================================================
// Global Settings Tests
// ============================================================================

#[tokio::test]
async fn test_global_duration_update_and_junk_fallback() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    let resp = client
        .post(format!("{}/admin/settings", app.base_url))
        .form(&[("default_duration", "45")])
        .send()
        .await
        .expect("Failed to post settings form");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(app.store.load().default_duration_secs, 45);

    // Junk input keeps the stored value.
    let resp = client
        .post(format!("{}/admin/settings", app.base_url))
        .form(&[("default_duration", "abc")])
        .send()
        .await
        .expect("Failed to post settings form");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(app.store.load().default_duration_secs, 45);
}

#[tokio::test]
async fn test_operator_can_edit_screens() {
    let app = TestApp::spawn().await;
    let client = app.sign_in("operator", "123").await;

    let resp = client
        .post(format!("{}/admin/settings", app.base_url))
        .form(&[("default_duration", "25")])
        .send()
        .await
        .expect("Failed to post settings form");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(app.store.load().default_duration_secs, 25);
}

#[tokio::test]
async fn test_deleting_every_screen_leaves_the_placeholder_board() {
    let app = TestApp::spawn().await;
    let client = app.admin_client().await;

    for id in ["screen-1", "screen-2", "screen-3"] {
        let resp = client
            .post(format!("{}/admin/screens/{id}/delete", app.base_url))
            .send()
            .await
            .expect("Failed to post delete form");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert!(app.store.load().screens.is_empty());

    let board = TestApp::client()
        .get(format!("{}/", app.base_url))
        .send()
        .await
        .expect("Failed to get board")
        .text()
        .await
        .expect("Failed to read body");
    assert!(board.contains("Нет активных экранов."));
}
