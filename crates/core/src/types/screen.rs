//! Screen types: the slides shown in the TV rotation.
//!
//! A [`Screen`] is either a menu board (categories of dishes) or a promo
//! slide (headline text plus an optional QR code). Serde attributes follow
//! the persisted document's camelCase field names, with the screen kind
//! carried in a `"type"` tag.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CategoryId, DishId, ScreenId};

/// A single menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    /// Display name, e.g. "Борщ домашний".
    pub name: String,
    /// Free-text portion size, e.g. "350г" or "1 шт". Not necessarily numeric.
    pub weight: String,
    /// Price in the venue's currency, persisted as a JSON number. Display
    /// derivations live in [`crate::display`].
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Whether a half portion is offered at roughly half price/weight.
    #[serde(rename = "isHalfPortion")]
    pub half_portion: bool,
}

/// A titled group of dishes on a menu board. Vec order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// Heading shown above the dish list, e.g. "САЛАТЫ".
    pub title: String,
    pub dishes: Vec<Dish>,
}

/// The two kinds of screen content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenKind {
    #[serde(rename = "MENU")]
    Menu,
    #[serde(rename = "PROMO")]
    Promo,
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Menu => write!(f, "MENU"),
            Self::Promo => write!(f, "PROMO"),
        }
    }
}

impl std::str::FromStr for ScreenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MENU" => Ok(Self::Menu),
            "PROMO" => Ok(Self::Promo),
            _ => Err(format!("invalid screen kind: {s}")),
        }
    }
}

/// Physical orientation of the display output, in degrees clockwise.
///
/// Applied as a CSS transform by the renderer; the scheduler ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

/// Error for rotation values other than 0, 90, 180, or 270.
#[derive(Debug, Error)]
#[error("invalid rotation: {0} (expected 0, 90, 180, or 270)")]
pub struct InvalidRotation(pub u16);

impl Rotation {
    /// The rotation angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Whether the rotated frame swaps width and height.
    #[must_use]
    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            other => Err(InvalidRotation(other)),
        }
    }
}

/// Content of a menu screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuContent {
    pub categories: Vec<Category>,
}

/// Content of a promo screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoContent {
    /// Headline text. Newlines are preserved by the renderer.
    pub text: String,
    /// Target URL encoded into the QR code. Blank or whitespace-only
    /// means no QR is shown.
    pub qr_url: String,
    /// Caption under the QR code. Empty means no caption line.
    pub footer_text: String,
}

impl PromoContent {
    /// Whether the slide has a QR target worth rendering.
    #[must_use]
    pub fn has_qr(&self) -> bool {
        !self.qr_url.trim().is_empty()
    }
}

/// Kind-specific screen content, tagged as `"type": "MENU" | "PROMO"` in
/// the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScreenContent {
    #[serde(rename = "MENU")]
    Menu(MenuContent),
    #[serde(rename = "PROMO")]
    Promo(PromoContent),
}

impl ScreenContent {
    /// The kind tag for this content.
    #[must_use]
    pub const fn kind(&self) -> ScreenKind {
        match self {
            Self::Menu(_) => ScreenKind::Menu,
            Self::Promo(_) => ScreenKind::Promo,
        }
    }

    /// Menu categories, if this is a menu screen.
    #[must_use]
    pub const fn as_menu(&self) -> Option<&MenuContent> {
        match self {
            Self::Menu(menu) => Some(menu),
            Self::Promo(_) => None,
        }
    }

    /// Promo fields, if this is a promo screen.
    #[must_use]
    pub const fn as_promo(&self) -> Option<&PromoContent> {
        match self {
            Self::Promo(promo) => Some(promo),
            Self::Menu(_) => None,
        }
    }
}

/// One slide in the rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: ScreenId,
    /// How long the screen stays up, in seconds. `None` means the global
    /// default applies.
    #[serde(rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    /// Show this screen every Nth loop; 1 = every loop. Normalized to be
    /// at least 1 on load and on edit.
    pub display_frequency: u32,
    /// Uniform content zoom applied by the renderer. `None` means 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_scale: Option<f64>,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(flatten)]
    pub content: ScreenContent,
}

impl Screen {
    /// The kind tag for this screen.
    #[must_use]
    pub const fn kind(&self) -> ScreenKind {
        self.content.kind()
    }

    /// The duration this screen stays up, falling back to the global
    /// default when no per-screen value is set.
    #[must_use]
    pub fn effective_duration_secs(&self, default_secs: u32) -> u32 {
        self.duration_secs.unwrap_or(default_secs)
    }

    /// The content scale the renderer should apply.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        self.content_scale.unwrap_or(1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn menu_screen_json() -> serde_json::Value {
        serde_json::json!({
            "id": "screen-1",
            "type": "MENU",
            "duration": 20,
            "displayFrequency": 2,
            "contentScale": 1.0,
            "rotation": 90,
            "categories": [
                {
                    "id": "cat-1",
                    "title": "САЛАТЫ",
                    "dishes": [
                        {
                            "id": "d-1",
                            "name": "Цезарь с курицей",
                            "weight": "250г",
                            "price": 350,
                            "isHalfPortion": false
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_menu_screen_deserializes_from_document_shape() {
        let screen: Screen = serde_json::from_value(menu_screen_json()).unwrap();

        assert_eq!(screen.id, ScreenId::new("screen-1"));
        assert_eq!(screen.kind(), ScreenKind::Menu);
        assert_eq!(screen.duration_secs, Some(20));
        assert_eq!(screen.display_frequency, 2);
        assert_eq!(screen.rotation, Rotation::R90);

        let menu = screen.content.as_menu().unwrap();
        let category = menu.categories.first().unwrap();
        assert_eq!(category.title, "САЛАТЫ");
        let dish = category.dishes.first().unwrap();
        assert_eq!(dish.weight, "250г");
        assert_eq!(dish.price, Decimal::from(350));
        assert!(!dish.half_portion);
    }

    #[test]
    fn test_promo_screen_round_trips_with_type_tag() {
        let screen = Screen {
            id: ScreenId::new("screen-3"),
            duration_secs: None,
            display_frequency: 1,
            content_scale: None,
            rotation: Rotation::R0,
            content: ScreenContent::Promo(PromoContent {
                text: "ВСТУПИТЬ В ГРУППУ TELEGRAM".to_owned(),
                qr_url: "https://t.me/your_restaurant_channel".to_owned(),
                footer_text: "НАВЕДИТЕ КАМЕРУ НА QR-КОД".to_owned(),
            }),
        };

        let value = serde_json::to_value(&screen).unwrap();
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("PROMO"));
        assert_eq!(
            value.get("qrUrl").and_then(|v| v.as_str()),
            Some("https://t.me/your_restaurant_channel")
        );
        assert_eq!(value.get("rotation").and_then(|v| v.as_u64()), Some(0));

        let back: Screen = serde_json::from_value(value).unwrap();
        assert_eq!(back, screen);
    }

    #[test]
    fn test_rotation_rejects_odd_angles() {
        let result: Result<Screen, _> = serde_json::from_value(serde_json::json!({
            "id": "s",
            "type": "PROMO",
            "duration": 10,
            "displayFrequency": 1,
            "rotation": 45,
            "text": "",
            "qrUrl": "",
            "footerText": ""
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rotation_portrait_detection() {
        assert!(!Rotation::R0.is_portrait());
        assert!(Rotation::R90.is_portrait());
        assert!(!Rotation::R180.is_portrait());
        assert!(Rotation::R270.is_portrait());
    }

    #[test]
    fn test_effective_duration_falls_back_to_default() {
        let mut screen: Screen = serde_json::from_value(menu_screen_json()).unwrap();
        assert_eq!(screen.effective_duration_secs(99), 20);

        screen.duration_secs = None;
        assert_eq!(screen.effective_duration_secs(99), 99);
    }

    #[test]
    fn test_has_qr_ignores_whitespace() {
        let promo = PromoContent {
            text: String::new(),
            qr_url: "   ".to_owned(),
            footer_text: String::new(),
        };
        assert!(!promo.has_qr());

        let promo = PromoContent {
            qr_url: "https://example.com".to_owned(),
            ..promo
        };
        assert!(promo.has_qr());
    }
}
