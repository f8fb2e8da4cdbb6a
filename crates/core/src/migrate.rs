//! Forward migration of persisted configuration documents.
//!
//! The document shape grew over time: early versions had no `users`, wrote
//! the display frequency under `frequency`, and promo screens predate
//! `footerText`. Instead of scattering presence checks through the typed
//! model, everything historical is captured here in one loose raw shape and
//! mapped to the current [`AppConfig`] in a single pass.
//!
//! Migration is lenient per field: an unusable value degrades to its
//! documented default instead of failing the document. Whole entries are
//! dropped only when they cannot be identified at all (a screen without a
//! known `type`, a user without credentials). The result is saved back in
//! the current shape on the next write, so migrating twice is a no-op.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::defaults;
use crate::types::{
    AppConfig, Category, CategoryId, Dish, DishId, MenuContent, PromoContent, Role, Rotation,
    Screen, ScreenContent, ScreenId, ScreenKind, User, UserId,
};

/// Map a parsed document of any historical shape to the current config.
///
/// Total: anything unusable degrades to defaults. A document that is not an
/// object at all yields the built-in configuration.
#[must_use]
pub fn migrate(value: Value) -> AppConfig {
    let Ok(raw) = serde_json::from_value::<RawConfig>(value) else {
        return defaults::default_config();
    };

    let screens = raw
        .screens
        .into_iter()
        .filter_map(screen_from_value)
        .collect();

    // Only a literally absent `users` key synthesizes the default accounts.
    // An explicitly empty list stays empty; `gb-cli user add` is the
    // recovery path for a locked-out document.
    let users = match raw.users {
        None => defaults::default_users(),
        Some(entries) => entries.into_iter().filter_map(user_from_value).collect(),
    };

    AppConfig {
        screens,
        default_duration_secs: raw
            .default_duration
            .as_ref()
            .and_then(coerce_positive_u32)
            .unwrap_or(defaults::DEFAULT_DURATION_SECS),
        users,
    }
}

// ----------------------------------------------------------------------
// Raw document shapes
// ----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    screens: Vec<Value>,
    default_duration: Option<Value>,
    users: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawScreen {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    duration: Option<Value>,
    display_frequency: Option<Value>,
    /// Legacy key written by early panel versions.
    frequency: Option<Value>,
    content_scale: Option<Value>,
    rotation: Option<Value>,
    categories: Option<Vec<Value>>,
    text: Option<String>,
    qr_url: Option<String>,
    footer_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCategory {
    id: Option<String>,
    title: Option<String>,
    dishes: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDish {
    id: Option<String>,
    name: Option<String>,
    weight: Option<String>,
    price: Option<Value>,
    is_half_portion: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawUser {
    id: Option<String>,
    username: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

// ----------------------------------------------------------------------
// Entry conversion
// ----------------------------------------------------------------------

fn screen_from_value(value: Value) -> Option<Screen> {
    let raw = serde_json::from_value::<RawScreen>(value).ok()?;
    let kind = raw.kind.as_deref()?.parse::<ScreenKind>().ok()?;

    let content = match kind {
        ScreenKind::Menu => ScreenContent::Menu(MenuContent {
            categories: raw
                .categories
                .unwrap_or_default()
                .into_iter()
                .filter_map(category_from_value)
                .collect(),
        }),
        ScreenKind::Promo => ScreenContent::Promo(PromoContent {
            text: raw.text.unwrap_or_default(),
            qr_url: raw.qr_url.unwrap_or_default(),
            footer_text: raw
                .footer_text
                .unwrap_or_else(|| defaults::DEFAULT_FOOTER_TEXT.to_owned()),
        }),
    };

    Some(Screen {
        id: id_or_generate(raw.id, ScreenId::generate),
        duration_secs: raw.duration.as_ref().and_then(coerce_positive_u32),
        display_frequency: raw
            .display_frequency
            .or(raw.frequency)
            .as_ref()
            .and_then(coerce_positive_u32)
            .unwrap_or(1),
        content_scale: raw.content_scale.as_ref().and_then(coerce_scale),
        rotation: raw.rotation.as_ref().and_then(coerce_rotation).unwrap_or_default(),
        content,
    })
}

fn category_from_value(value: Value) -> Option<Category> {
    let raw = serde_json::from_value::<RawCategory>(value).ok()?;
    Some(Category {
        id: id_or_generate(raw.id, CategoryId::generate),
        title: raw.title.unwrap_or_default(),
        dishes: raw
            .dishes
            .unwrap_or_default()
            .into_iter()
            .filter_map(dish_from_value)
            .collect(),
    })
}

fn dish_from_value(value: Value) -> Option<Dish> {
    let raw = serde_json::from_value::<RawDish>(value).ok()?;
    Some(Dish {
        id: id_or_generate(raw.id, DishId::generate),
        name: raw.name.unwrap_or_default(),
        weight: raw.weight.unwrap_or_default(),
        price: raw.price.as_ref().and_then(coerce_decimal).unwrap_or(Decimal::ZERO),
        half_portion: matches!(raw.is_half_portion, Some(Value::Bool(true))),
    })
}

fn user_from_value(value: Value) -> Option<User> {
    let raw = serde_json::from_value::<RawUser>(value).ok()?;
    let username = raw.username.filter(|name| !name.trim().is_empty())?;
    let password = raw.password.filter(|password| !password.is_empty())?;
    Some(User {
        id: id_or_generate(raw.id, UserId::generate),
        username,
        password,
        role: raw
            .role
            .and_then(|role| role.parse::<Role>().ok())
            .unwrap_or(Role::Operator),
    })
}

fn id_or_generate<T: From<String>>(raw: Option<String>, generate: fn() -> T) -> T {
    match raw.filter(|id| !id.trim().is_empty()) {
        Some(id) => T::from(id),
        None => generate(),
    }
}

// ----------------------------------------------------------------------
// Field coercion
// ----------------------------------------------------------------------

/// Integer reading of a JSON value: numbers truncate, numeric strings parse.
#[allow(clippy::cast_possible_truncation)]
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

fn coerce_positive_u32(value: &Value) -> Option<u32> {
    coerce_i64(value)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_scale(value: &Value) -> Option<f64> {
    coerce_f64(value).filter(|scale| scale.is_finite() && *scale > 0.0)
}

fn coerce_rotation(value: &Value) -> Option<Rotation> {
    let degrees = u16::try_from(coerce_i64(value)?).ok()?;
    Rotation::try_from(degrees).ok()
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(Decimal::from)
            .or_else(|| number.as_u64().map(Decimal::from))
            .or_else(|| number.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(text) => text.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}
