//! Built-in configuration and fresh-entity seed values.
//!
//! [`default_config`] is the document a brand-new install starts from, and
//! the fallback when the persisted document is missing or unreadable. The
//! seed constants are what the editor fills into newly created entities.

use rust_decimal::Decimal;

use crate::types::{
    AppConfig, Category, Dish, MenuContent, PromoContent, Role, Rotation, Screen, ScreenContent,
    User,
};

/// Global screen duration when the document carries none, in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 20;

/// Caption synthesized for promo screens that predate the footer field.
pub const DEFAULT_FOOTER_TEXT: &str = "НАВЕДИТЕ КАМЕРУ НА QR-КОД";

/// Placeholder headline for a freshly created promo screen.
pub const NEW_PROMO_TEXT: &str = "ЗАГОЛОВОК АКЦИИ";

/// Placeholder QR target for a freshly created promo screen.
pub const NEW_PROMO_QR_URL: &str = "https://example.com";

/// Title for a freshly created category.
pub const NEW_CATEGORY_TITLE: &str = "НОВАЯ КАТЕГОРИЯ";

/// Name for a freshly created dish.
pub const NEW_DISH_NAME: &str = "Новое блюдо";

/// Weight for a freshly created dish.
pub const NEW_DISH_WEIGHT: &str = "200г";

/// The accounts synthesized when a document has no `users` list.
///
/// These are also the first-run credentials; the admin panel is where they
/// get changed.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: "u1".into(),
            username: "admin".to_owned(),
            password: "123".to_owned(),
            role: Role::Admin,
        },
        User {
            id: "u2".into(),
            username: "operator".to_owned(),
            password: "123".to_owned(),
            role: Role::Operator,
        },
    ]
}

/// The demo board a new install boots with: two menu screens and one promo
/// slide, in Russian, ready to be edited.
#[must_use]
pub fn default_config() -> AppConfig {
    AppConfig {
        screens: vec![
            menu_screen(
                "screen-1",
                vec![
                    category(
                        "cat-1",
                        "САЛАТЫ",
                        vec![
                            dish("d-1", "Цезарь с курицей", "250г", 350, false),
                            dish("d-2", "Греческий", "200г", 280, false),
                            dish("d-3", "Оливье", "200г", 220, false),
                        ],
                    ),
                    category(
                        "cat-2",
                        "ВЫПЕЧКА",
                        vec![
                            dish("d-4", "Круассан", "80г", 150, false),
                            dish("d-5", "Пирожок с мясом", "100г", 90, false),
                        ],
                    ),
                ],
            ),
            menu_screen(
                "screen-2",
                vec![
                    category(
                        "cat-3",
                        "ПЕРВЫЕ БЛЮДА",
                        vec![
                            dish("d-6", "Борщ домашний", "350г", 300, true),
                            dish("d-7", "Солянка сборная", "350г", 350, true),
                            dish("d-8", "Крем-суп грибной", "300г", 280, false),
                        ],
                    ),
                    category(
                        "cat-4",
                        "ГАРНИРЫ",
                        vec![
                            dish("d-9", "Картофельное пюре", "150г", 120, false),
                            dish("d-10", "Гречка с маслом", "150г", 100, false),
                        ],
                    ),
                ],
            ),
            Screen {
                id: "screen-3".into(),
                duration_secs: Some(DEFAULT_DURATION_SECS),
                display_frequency: 1,
                content_scale: Some(1.0),
                rotation: Rotation::R0,
                content: ScreenContent::Promo(PromoContent {
                    text: "ВСТУПИТЬ В ГРУППУ TELEGRAM\nГДЕ ВЫХОДЯТ ВСЕ ОБНОВЛЕНИЯ".to_owned(),
                    qr_url: "https://t.me/your_restaurant_channel".to_owned(),
                    footer_text: DEFAULT_FOOTER_TEXT.to_owned(),
                }),
            },
        ],
        default_duration_secs: DEFAULT_DURATION_SECS,
        users: default_users(),
    }
}

fn menu_screen(id: &str, categories: Vec<Category>) -> Screen {
    Screen {
        id: id.into(),
        duration_secs: Some(DEFAULT_DURATION_SECS),
        display_frequency: 1,
        content_scale: Some(1.0),
        rotation: Rotation::R0,
        content: ScreenContent::Menu(MenuContent { categories }),
    }
}

fn category(id: &str, title: &str, dishes: Vec<Dish>) -> Category {
    Category {
        id: id.into(),
        title: title.to_owned(),
        dishes,
    }
}

fn dish(id: &str, name: &str, weight: &str, price: u32, half_portion: bool) -> Dish {
    Dish {
        id: id.into(),
        name: name.to_owned(),
        weight: weight.to_owned(),
        price: Decimal::from(price),
        half_portion,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ScreenKind;

    #[test]
    fn test_default_config_shape() {
        let config = default_config();

        assert_eq!(config.screens.len(), 3);
        assert_eq!(config.default_duration_secs, 20);
        assert_eq!(
            config
                .screens
                .iter()
                .map(crate::types::Screen::kind)
                .collect::<Vec<_>>(),
            vec![ScreenKind::Menu, ScreenKind::Menu, ScreenKind::Promo]
        );

        let first_menu = config.screens[0].content.as_menu().unwrap();
        assert_eq!(first_menu.categories.len(), 2);
        assert_eq!(first_menu.categories[0].title, "САЛАТЫ");
        assert_eq!(first_menu.categories[0].dishes.len(), 3);
    }

    #[test]
    fn test_default_config_has_half_portion_soups() {
        let config = default_config();
        let soups = config.screens[1].content.as_menu().unwrap();

        let half: Vec<_> = soups.categories[0]
            .dishes
            .iter()
            .filter(|dish| dish.half_portion)
            .map(|dish| dish.name.as_str())
            .collect();
        assert_eq!(half, vec!["Борщ домашний", "Солянка сборная"]);
    }

    #[test]
    fn test_default_users_are_one_admin_one_operator() {
        let users = default_users();
        assert_eq!(users.len(), 2);
        assert!(users[0].role.is_admin());
        assert_eq!(users[0].username, "admin");
        assert!(!users[1].role.is_admin());
        assert_eq!(users[1].username, "operator");
    }

    #[test]
    fn test_promo_screen_carries_footer() {
        let config = default_config();
        let promo = config.screens[2].content.as_promo().unwrap();
        assert!(promo.has_qr());
        assert_eq!(promo.footer_text, DEFAULT_FOOTER_TEXT);
    }
}
