//! Admin editor route handlers.
//!
//! The editor is a classic form-posting panel: every change is a POST that
//! redirects back to `/admin?screen=<id>` so the edited screen stays open.
//! Numeric form fields arrive as text and parse leniently; a blank or
//! mangled value falls back instead of rejecting the whole form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use gastroboard_core::{
    CategoryId, DishId, EditError, MoveDirection, Role, Rotation, Screen, ScreenId, ScreenKind,
    ScreenSettings, UserId,
};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::state::AppState;

use super::auth::MessageQuery;

// =============================================================================
// Form Types
// =============================================================================

/// Add-screen form data.
#[derive(Debug, Deserialize)]
pub struct AddScreenForm {
    /// `MENU` or `PROMO`.
    pub kind: String,
}

/// Screen settings form data. All numeric fields arrive as text.
#[derive(Debug, Deserialize)]
pub struct ScreenSettingsForm {
    /// Seconds on air; blank inherits the global default.
    pub duration: Option<String>,
    /// Show on every Nth loop; blank or invalid means every loop.
    pub display_frequency: Option<String>,
    /// Content scale factor; blank means no scaling.
    pub content_scale: Option<String>,
    /// Rotation in degrees (0, 90, 180, 270).
    pub rotation: Option<String>,
}

impl ScreenSettingsForm {
    fn settings(&self) -> ScreenSettings {
        ScreenSettings {
            duration_secs: parse_positive_u32(self.duration.as_deref()),
            display_frequency: parse_positive_u32(self.display_frequency.as_deref()).unwrap_or(1),
            content_scale: parse_scale(self.content_scale.as_deref()),
            rotation: parse_rotation(self.rotation.as_deref()),
        }
    }
}

/// Promo content form data.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    pub text: String,
    pub qr_url: String,
    pub footer_text: String,
}

/// Move-screen form data.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    pub direction: MoveDirection,
}

/// Category rename form data.
#[derive(Debug, Deserialize)]
pub struct RenameForm {
    pub title: String,
}

/// Dish form data.
#[derive(Debug, Deserialize)]
pub struct DishForm {
    pub name: String,
    pub weight: String,
    pub price: String,
    /// Checkbox; present means enabled.
    pub half_portion: Option<String>,
}

/// Global settings form data.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub default_duration: Option<String>,
}

/// Add-user form data.
#[derive(Debug, Deserialize)]
pub struct UserAddForm {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Update-user form data.
#[derive(Debug, Deserialize)]
pub struct UserUpdateForm {
    /// Blank keeps the current password.
    pub password: Option<String>,
    pub role: String,
}

/// Query parameters for the editor page.
#[derive(Debug, Deserialize)]
pub struct EditorQuery {
    /// Id of the screen open in the editor.
    pub screen: Option<String>,
}

// =============================================================================
// Form Parsing
// =============================================================================

fn parse_positive_u32(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

fn parse_scale(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|scale| scale.is_finite() && *scale > 0.0)
}

fn parse_rotation(raw: Option<&str>) -> Rotation {
    raw.and_then(|raw| raw.trim().parse::<u16>().ok())
        .and_then(|degrees| Rotation::try_from(degrees).ok())
        .unwrap_or_default()
}

// =============================================================================
// Templates
// =============================================================================

/// Editor page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/editor.html")]
pub struct EditorTemplate {
    pub username: String,
    pub is_admin: bool,
    pub default_duration_secs: u32,
    pub screens: Vec<ScreenListItem>,
    pub selected: Option<SelectedScreen>,
}

/// User management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub username: String,
    pub error: Option<String>,
    pub users: Vec<UserRow>,
}

/// Sidebar entry for one screen.
pub struct ScreenListItem {
    pub id: String,
    pub label: String,
    pub is_selected: bool,
}

/// The screen open in the editor, with form values preformatted.
pub struct SelectedScreen {
    pub id: String,
    pub kind_label: String,
    /// Duration input value; empty string inherits the global default.
    pub duration_value: String,
    pub display_frequency: u32,
    /// Scale input value; empty string means unscaled.
    pub content_scale_value: String,
    pub rotation_degrees: u16,
    pub is_first: bool,
    pub is_last: bool,
    pub is_menu: bool,
    pub categories: Vec<CategoryEdit>,
    /// Promo form values, empty strings on a menu screen.
    pub promo_text: String,
    pub promo_qr_url: String,
    pub promo_footer_text: String,
}

/// One category with its dish rows in the editor.
pub struct CategoryEdit {
    pub id: String,
    pub title: String,
    pub dishes: Vec<DishEdit>,
}

/// One dish row in the editor.
pub struct DishEdit {
    pub id: String,
    pub name: String,
    pub weight: String,
    pub price_value: String,
    pub half_portion: bool,
}

/// Row of the users table.
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub is_admin_role: bool,
    pub is_self: bool,
}

const fn kind_label(kind: ScreenKind) -> &'static str {
    match kind {
        ScreenKind::Menu => "МЕНЮ",
        ScreenKind::Promo => "АКЦИЯ",
    }
}

fn selected_screen_view(screen: &Screen, index: usize, screen_count: usize) -> SelectedScreen {
    let categories = screen
        .content
        .as_menu()
        .map(|menu| {
            menu.categories
                .iter()
                .map(|category| CategoryEdit {
                    id: category.id.to_string(),
                    title: category.title.clone(),
                    dishes: category
                        .dishes
                        .iter()
                        .map(|dish| DishEdit {
                            id: dish.id.to_string(),
                            name: dish.name.clone(),
                            weight: dish.weight.clone(),
                            price_value: dish.price.normalize().to_string(),
                            half_portion: dish.half_portion,
                        })
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    let promo = screen.content.as_promo();

    SelectedScreen {
        id: screen.id.to_string(),
        kind_label: kind_label(screen.kind()).to_string(),
        duration_value: screen
            .duration_secs
            .map(|secs| secs.to_string())
            .unwrap_or_default(),
        display_frequency: screen.display_frequency,
        content_scale_value: screen
            .content_scale
            .map(|scale| scale.to_string())
            .unwrap_or_default(),
        rotation_degrees: screen.rotation.degrees(),
        is_first: index == 0,
        is_last: index + 1 == screen_count,
        is_menu: screen.content.as_menu().is_some(),
        categories,
        promo_text: promo.map(|promo| promo.text.clone()).unwrap_or_default(),
        promo_qr_url: promo.map(|promo| promo.qr_url.clone()).unwrap_or_default(),
        promo_footer_text: promo
            .map(|promo| promo.footer_text.clone())
            .unwrap_or_default(),
    }
}

/// Map an `?error=` key to the message shown on the users page.
fn users_error_message(key: &str) -> String {
    match key {
        "credentials" => "Укажите логин и пароль".to_string(),
        "username_taken" => "Такой логин уже занят".to_string(),
        "own_account" => "Нельзя удалить собственную учётную запись".to_string(),
        _ => "Не удалось сохранить изменения".to_string(),
    }
}

fn redirect_to_screen(id: &ScreenId) -> Redirect {
    Redirect::to(&format!("/admin?screen={id}"))
}

// =============================================================================
// Editor Routes
// =============================================================================

/// Display the editor.
///
/// A stale or missing `?screen=` selection falls back to the first screen.
pub async fn editor(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<EditorQuery>,
) -> EditorTemplate {
    let config = state.current();

    let selected_index = query
        .screen
        .as_deref()
        .and_then(|raw| config.screen_index(&ScreenId::new(raw)))
        .unwrap_or(0);

    let screens = config
        .screens
        .iter()
        .enumerate()
        .map(|(index, screen)| ScreenListItem {
            id: screen.id.to_string(),
            label: format!("{}. {}", index + 1, kind_label(screen.kind())),
            is_selected: index == selected_index,
        })
        .collect();

    let selected = config
        .screens
        .get(selected_index)
        .map(|screen| selected_screen_view(screen, selected_index, config.screens.len()));

    EditorTemplate {
        username: user.username,
        is_admin: user.role.is_admin(),
        default_duration_secs: config.default_duration_secs,
        screens,
        selected,
    }
}

/// Add a screen and open it in the editor.
pub async fn add_screen(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<AddScreenForm>,
) -> Result<Redirect> {
    let kind: ScreenKind = form
        .kind
        .parse()
        .map_err(|_| AppError::BadRequest("Unknown screen kind".to_string()))?;

    let id = state.update(|config| Ok(config.add_screen(kind))).await?;
    Ok(redirect_to_screen(&id))
}

/// Save the settings panel of a screen.
pub async fn update_screen(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ScreenId>,
    Form(form): Form<ScreenSettingsForm>,
) -> Result<Redirect> {
    let settings = form.settings();
    state
        .update(|config| config.update_screen(&id, settings))
        .await?;
    Ok(redirect_to_screen(&id))
}

/// Save the promo fields of a promo screen.
pub async fn update_promo(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ScreenId>,
    Form(form): Form<PromoForm>,
) -> Result<Redirect> {
    state
        .update(|config| config.update_promo(&id, form.text, form.qr_url, form.footer_text))
        .await?;
    Ok(redirect_to_screen(&id))
}

/// Move a screen up or down in the loop.
pub async fn move_screen(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ScreenId>,
    Form(form): Form<MoveForm>,
) -> Result<Redirect> {
    state
        .update(|config| config.move_screen(&id, form.direction))
        .await?;
    Ok(redirect_to_screen(&id))
}

/// Delete a screen.
pub async fn delete_screen(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ScreenId>,
) -> Result<Redirect> {
    state.update(|config| config.remove_screen(&id)).await?;
    Ok(Redirect::to("/admin"))
}

// =============================================================================
// Category and Dish Routes
// =============================================================================

/// Add a category to a menu screen.
pub async fn add_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<ScreenId>,
) -> Result<Redirect> {
    state.update(|config| config.add_category(&id)).await?;
    Ok(redirect_to_screen(&id))
}

/// Rename a category.
pub async fn rename_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((screen_id, category_id)): Path<(ScreenId, CategoryId)>,
    Form(form): Form<RenameForm>,
) -> Result<Redirect> {
    state
        .update(|config| config.rename_category(&screen_id, &category_id, form.title))
        .await?;
    Ok(redirect_to_screen(&screen_id))
}

/// Delete a category with its dishes.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((screen_id, category_id)): Path<(ScreenId, CategoryId)>,
) -> Result<Redirect> {
    state
        .update(|config| config.remove_category(&screen_id, &category_id))
        .await?;
    Ok(redirect_to_screen(&screen_id))
}

/// Add a dish to a category.
pub async fn add_dish(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((screen_id, category_id)): Path<(ScreenId, CategoryId)>,
) -> Result<Redirect> {
    state
        .update(|config| config.add_dish(&screen_id, &category_id))
        .await?;
    Ok(redirect_to_screen(&screen_id))
}

/// Save a dish row.
pub async fn update_dish(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((screen_id, category_id, dish_id)): Path<(ScreenId, CategoryId, DishId)>,
    Form(form): Form<DishForm>,
) -> Result<Redirect> {
    let price = form.price.trim().parse().unwrap_or(Decimal::ZERO);
    let half_portion = form.half_portion.is_some();
    state
        .update(|config| {
            config.update_dish(
                &screen_id,
                &category_id,
                &dish_id,
                form.name,
                form.weight,
                price,
                half_portion,
            )
        })
        .await?;
    Ok(redirect_to_screen(&screen_id))
}

/// Delete a dish.
pub async fn delete_dish(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((screen_id, category_id, dish_id)): Path<(ScreenId, CategoryId, DishId)>,
) -> Result<Redirect> {
    state
        .update(|config| config.remove_dish(&screen_id, &category_id, &dish_id))
        .await?;
    Ok(redirect_to_screen(&screen_id))
}

/// Save global settings.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect> {
    let parsed = parse_positive_u32(form.default_duration.as_deref());
    state
        .update(|config| {
            let value = parsed.unwrap_or(config.default_duration_secs);
            config.set_default_duration(value);
            Ok(())
        })
        .await?;
    Ok(Redirect::to("/admin"))
}

// =============================================================================
// User Routes
// =============================================================================

/// Display the user management page.
pub async fn users_page(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> UsersTemplate {
    let config = state.current();

    let users = config
        .users
        .iter()
        .map(|user| UserRow {
            id: user.id.to_string(),
            username: user.username.clone(),
            is_admin_role: user.role.is_admin(),
            is_self: user.id == admin.id,
        })
        .collect();

    UsersTemplate {
        username: admin.username,
        error: query.error.as_deref().map(users_error_message),
        users,
    }
}

/// Add a user.
pub async fn add_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<UserAddForm>,
) -> Result<Response> {
    let role = form.role.parse().unwrap_or(Role::Operator);
    let result = state
        .update(|config| config.add_user(&form.username, &form.password, role))
        .await;

    match result {
        Ok(_) => Ok(Redirect::to("/admin/users").into_response()),
        Err(AppError::Edit(EditError::MissingCredentials)) => {
            Ok(Redirect::to("/admin/users?error=credentials").into_response())
        }
        Err(AppError::Edit(EditError::UsernameTaken)) => {
            Ok(Redirect::to("/admin/users?error=username_taken").into_response())
        }
        Err(err) => Err(err),
    }
}

/// Change a user's role, optionally resetting the password.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
    Form(form): Form<UserUpdateForm>,
) -> Result<Redirect> {
    let role = form.role.parse().unwrap_or(Role::Operator);
    let password = form.password.filter(|password| !password.is_empty());
    state
        .update(|config| config.update_user(&id, password, role))
        .await?;
    Ok(Redirect::to("/admin/users"))
}

/// Delete a user. Deleting the signed-in account is refused.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> Result<Response> {
    let result = state
        .update(|config| config.remove_user(&id, &admin.id))
        .await;

    match result {
        Ok(()) => Ok(Redirect::to("/admin/users").into_response()),
        Err(AppError::Edit(EditError::OwnAccount)) => {
            Ok(Redirect::to("/admin/users?error=own_account").into_response())
        }
        Err(err) => Err(err),
    }
}
