//! TV display route handlers.
//!
//! The slideshow is plain server-rendered HTML driven by two URLs: `/`
//! renders the screen at the cursor carried in the query string, `/next`
//! advances the cursor and redirects back to `/`. Each page arms a timer for
//! its screen's duration and polls `/version` to reload after an edit.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use gastroboard_core::{
    Category, Screen, ScreenContent,
    display::format_dish,
    scheduler::{self, Cursor},
};

use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Cursor carried through the slideshow URLs.
///
/// Both values arrive as text and parse leniently: a missing or mangled
/// value falls back to the start of the rotation instead of a 400, so a TV
/// opening a stale bookmark still comes up.
#[derive(Debug, Default, Deserialize)]
pub struct CursorQuery {
    /// Screen index.
    pub i: Option<String>,
    /// One-based loop number.
    pub l: Option<String>,
}

impl CursorQuery {
    fn cursor(&self) -> Cursor {
        let screen_index = self
            .i
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);
        let loop_number: u64 = self
            .l
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1);
        Cursor {
            screen_index,
            loop_number: loop_number.max(1),
        }
    }
}

/// Body of the `/version` poll.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: u64,
}

// =============================================================================
// Templates
// =============================================================================

/// Menu board page.
#[derive(Template, WebTemplate)]
#[template(path = "display/menu.html")]
pub struct MenuTemplate {
    pub version: u64,
    pub screen_id: String,
    pub screen_index: usize,
    pub loop_number: u64,
    pub duration_secs: u32,
    pub next_url: String,
    pub categories: Vec<CategoryView>,
}

/// Promo slide page.
#[derive(Template, WebTemplate)]
#[template(path = "display/promo.html")]
pub struct PromoTemplate {
    pub version: u64,
    pub screen_id: String,
    pub screen_index: usize,
    pub loop_number: u64,
    pub duration_secs: u32,
    pub next_url: String,
    pub text: String,
    pub footer_text: String,
    pub qr_image_url: Option<String>,
    pub transform: String,
    pub portrait: bool,
}

/// Placeholder page shown while no screens are configured.
#[derive(Template, WebTemplate)]
#[template(path = "display/empty.html")]
pub struct EmptyTemplate {
    pub version: u64,
}

/// One menu category with preformatted dish rows.
pub struct CategoryView {
    pub title: String,
    pub dishes: Vec<DishView>,
}

/// One dish row with display texts precomputed.
pub struct DishView {
    pub name: String,
    pub weight_text: String,
    pub price_text: String,
}

fn category_view(category: &Category) -> CategoryView {
    CategoryView {
        title: category.title.clone(),
        dishes: category
            .dishes
            .iter()
            .map(|dish| {
                let display = format_dish(dish);
                DishView {
                    name: dish.name.clone(),
                    weight_text: display.weight_text,
                    price_text: display.price_text,
                }
            })
            .collect(),
    }
}

// =============================================================================
// Rendering Helpers
// =============================================================================

/// Pixel size of the generated QR image.
const QR_SIZE: u32 = 500;

/// Build the QR image URL for a promo target.
///
/// Uses the public api.qrserver.com generator, black on white.
fn qr_image_url(target: &str) -> String {
    format!(
        "https://api.qrserver.com/v1/create-qr-code/?size={QR_SIZE}x{QR_SIZE}&data={}&color=000000&bgcolor=ffffff",
        urlencoding::encode(target)
    )
}

/// CSS transform for a promo slide. Menu boards are never transformed.
fn content_transform(screen: &Screen) -> String {
    format!(
        "rotate({}deg) scale({})",
        screen.rotation.degrees(),
        screen.effective_scale()
    )
}

// =============================================================================
// Display Routes
// =============================================================================

/// Render the screen at the cursor.
///
/// An out-of-range index renders the first screen; an empty screen list
/// renders the placeholder page. Neither is an error: the TV keeps going
/// whatever the editor does to the list.
pub async fn board(State(state): State<AppState>, Query(query): Query<CursorQuery>) -> Response {
    let config = state.current();
    let version = state.version();

    if config.screens.is_empty() {
        return EmptyTemplate { version }.into_response();
    }

    let mut cursor = query.cursor();
    if cursor.screen_index >= config.screens.len() {
        cursor.screen_index = 0;
    }
    let Some(screen) = config.screens.get(cursor.screen_index) else {
        return EmptyTemplate { version }.into_response();
    };

    let duration_secs = screen.effective_duration_secs(config.default_duration_secs);
    let next_url = format!("/next?i={}&l={}", cursor.screen_index, cursor.loop_number);

    match &screen.content {
        ScreenContent::Menu(menu) => MenuTemplate {
            version,
            screen_id: screen.id.to_string(),
            screen_index: cursor.screen_index,
            loop_number: cursor.loop_number,
            duration_secs,
            next_url,
            categories: menu.categories.iter().map(category_view).collect(),
        }
        .into_response(),
        ScreenContent::Promo(promo) => PromoTemplate {
            version,
            screen_id: screen.id.to_string(),
            screen_index: cursor.screen_index,
            loop_number: cursor.loop_number,
            duration_secs,
            next_url,
            text: promo.text.clone(),
            footer_text: promo.footer_text.clone(),
            qr_image_url: promo.has_qr().then(|| qr_image_url(&promo.qr_url)),
            transform: content_transform(screen),
            portrait: screen.rotation.is_portrait(),
        }
        .into_response(),
    }
}

/// Advance the cursor and redirect back to the board.
pub async fn next(State(state): State<AppState>, Query(query): Query<CursorQuery>) -> Redirect {
    let config = state.current();
    let cursor = scheduler::advance(&config.screens, query.cursor());
    Redirect::to(&format!(
        "/?i={}&l={}",
        cursor.screen_index, cursor.loop_number
    ))
}

/// Configuration version for the reload poll.
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.version(),
    })
}
