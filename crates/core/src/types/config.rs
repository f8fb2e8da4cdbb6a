//! The persisted configuration aggregate and its edit operations.
//!
//! [`AppConfig`] is the whole document: the ordered screen list, the global
//! default duration, and the editor accounts. Every editor mutation in the
//! server goes through the methods here, so ordering and normalization rules
//! live in one place and stay testable without HTTP.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults;

use super::id::{CategoryId, DishId, ScreenId, UserId};
use super::screen::{
    Category, Dish, MenuContent, PromoContent, Rotation, Screen, ScreenContent, ScreenKind,
};
use super::user::{Role, User};

/// The whole persisted document.
///
/// Screen order is loop order. `default_duration_secs` applies to screens
/// without their own duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub screens: Vec<Screen>,
    #[serde(rename = "defaultDuration")]
    pub default_duration_secs: u32,
    pub users: Vec<User>,
}

/// Direction for reordering a screen within the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Common per-screen settings written by the editor in one submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSettings {
    /// `None` means "use the global default".
    pub duration_secs: Option<u32>,
    pub display_frequency: u32,
    pub content_scale: Option<f64>,
    pub rotation: Rotation,
}

/// Failure of an edit operation. Mapped to HTTP statuses by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("screen not found")]
    ScreenNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("dish not found")]
    DishNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("screen has no categories")]
    NotAMenuScreen,
    #[error("screen has no promo fields")]
    NotAPromoScreen,
    #[error("username and password must not be empty")]
    MissingCredentials,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("cannot delete the signed-in account")]
    OwnAccount,
}

impl AppConfig {
    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    #[must_use]
    pub fn screen(&self, id: &ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|screen| screen.id == *id)
    }

    #[must_use]
    pub fn screen_index(&self, id: &ScreenId) -> Option<usize> {
        self.screens.iter().position(|screen| screen.id == *id)
    }

    fn screen_mut(&mut self, id: &ScreenId) -> Result<&mut Screen, EditError> {
        self.screens
            .iter_mut()
            .find(|screen| screen.id == *id)
            .ok_or(EditError::ScreenNotFound)
    }

    fn menu_mut(&mut self, id: &ScreenId) -> Result<&mut MenuContent, EditError> {
        match &mut self.screen_mut(id)?.content {
            ScreenContent::Menu(menu) => Ok(menu),
            ScreenContent::Promo(_) => Err(EditError::NotAMenuScreen),
        }
    }

    /// The account matching the given credentials, if any.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users.iter().find(|user| user.matches(username, password))
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == *id)
    }

    // ------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------

    /// Append a fresh screen of the given kind and return its id.
    ///
    /// New screens snapshot the current global duration, run every loop,
    /// and start unrotated.
    pub fn add_screen(&mut self, kind: ScreenKind) -> ScreenId {
        let id = ScreenId::generate();
        let content = match kind {
            ScreenKind::Menu => ScreenContent::Menu(MenuContent { categories: Vec::new() }),
            ScreenKind::Promo => ScreenContent::Promo(PromoContent {
                text: defaults::NEW_PROMO_TEXT.to_owned(),
                qr_url: defaults::NEW_PROMO_QR_URL.to_owned(),
                footer_text: defaults::DEFAULT_FOOTER_TEXT.to_owned(),
            }),
        };
        self.screens.push(Screen {
            id: id.clone(),
            duration_secs: Some(self.default_duration_secs),
            display_frequency: 1,
            content_scale: None,
            rotation: Rotation::R0,
            content,
        });
        id
    }

    pub fn remove_screen(&mut self, id: &ScreenId) -> Result<(), EditError> {
        let index = self.screen_index(id).ok_or(EditError::ScreenNotFound)?;
        self.screens.remove(index);
        Ok(())
    }

    /// Swap the screen with its neighbor. Moves past either end are no-ops.
    pub fn move_screen(&mut self, id: &ScreenId, direction: MoveDirection) -> Result<(), EditError> {
        let index = self.screen_index(id).ok_or(EditError::ScreenNotFound)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => {
                let next = index + 1;
                (next < self.screens.len()).then_some(next)
            }
        };
        if let Some(target) = target {
            self.screens.swap(index, target);
        }
        Ok(())
    }

    /// Overwrite a screen's common settings, normalizing the frequency to
    /// at least 1.
    pub fn update_screen(
        &mut self,
        id: &ScreenId,
        settings: ScreenSettings,
    ) -> Result<(), EditError> {
        let screen = self.screen_mut(id)?;
        screen.duration_secs = settings.duration_secs;
        screen.display_frequency = settings.display_frequency.max(1);
        screen.content_scale = settings.content_scale;
        screen.rotation = settings.rotation;
        Ok(())
    }

    pub fn update_promo(
        &mut self,
        id: &ScreenId,
        text: String,
        qr_url: String,
        footer_text: String,
    ) -> Result<(), EditError> {
        match &mut self.screen_mut(id)?.content {
            ScreenContent::Promo(promo) => {
                promo.text = text;
                promo.qr_url = qr_url;
                promo.footer_text = footer_text;
                Ok(())
            }
            ScreenContent::Menu(_) => Err(EditError::NotAPromoScreen),
        }
    }

    // ------------------------------------------------------------------
    // Categories and dishes
    // ------------------------------------------------------------------

    pub fn add_category(&mut self, screen_id: &ScreenId) -> Result<CategoryId, EditError> {
        let menu = self.menu_mut(screen_id)?;
        let id = CategoryId::generate();
        menu.categories.push(Category {
            id: id.clone(),
            title: defaults::NEW_CATEGORY_TITLE.to_owned(),
            dishes: Vec::new(),
        });
        Ok(id)
    }

    pub fn rename_category(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
        title: String,
    ) -> Result<(), EditError> {
        self.category_mut(screen_id, category_id)?.title = title;
        Ok(())
    }

    pub fn remove_category(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
    ) -> Result<(), EditError> {
        let menu = self.menu_mut(screen_id)?;
        let index = menu
            .categories
            .iter()
            .position(|category| category.id == *category_id)
            .ok_or(EditError::CategoryNotFound)?;
        menu.categories.remove(index);
        Ok(())
    }

    fn category_mut(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
    ) -> Result<&mut Category, EditError> {
        self.menu_mut(screen_id)?
            .categories
            .iter_mut()
            .find(|category| category.id == *category_id)
            .ok_or(EditError::CategoryNotFound)
    }

    pub fn add_dish(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
    ) -> Result<DishId, EditError> {
        let category = self.category_mut(screen_id, category_id)?;
        let id = DishId::generate();
        category.dishes.push(Dish {
            id: id.clone(),
            name: defaults::NEW_DISH_NAME.to_owned(),
            weight: defaults::NEW_DISH_WEIGHT.to_owned(),
            price: Decimal::ZERO,
            half_portion: false,
        });
        Ok(id)
    }

    pub fn update_dish(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
        dish_id: &DishId,
        name: String,
        weight: String,
        price: Decimal,
        half_portion: bool,
    ) -> Result<(), EditError> {
        let category = self.category_mut(screen_id, category_id)?;
        let dish = category
            .dishes
            .iter_mut()
            .find(|dish| dish.id == *dish_id)
            .ok_or(EditError::DishNotFound)?;
        dish.name = name;
        dish.weight = weight;
        dish.price = price;
        dish.half_portion = half_portion;
        Ok(())
    }

    pub fn remove_dish(
        &mut self,
        screen_id: &ScreenId,
        category_id: &CategoryId,
        dish_id: &DishId,
    ) -> Result<(), EditError> {
        let category = self.category_mut(screen_id, category_id)?;
        let index = category
            .dishes
            .iter()
            .position(|dish| dish.id == *dish_id)
            .ok_or(EditError::DishNotFound)?;
        category.dishes.remove(index);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Users and settings
    // ------------------------------------------------------------------

    /// Create an account. The username is trimmed and must be unique;
    /// neither field may be empty.
    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<UserId, EditError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(EditError::MissingCredentials);
        }
        if self.users.iter().any(|user| user.username == username) {
            return Err(EditError::UsernameTaken);
        }
        let id = UserId::generate();
        self.users.push(User {
            id: id.clone(),
            username: username.to_owned(),
            password: password.to_owned(),
            role,
        });
        Ok(id)
    }

    /// Change an account's role and, when given, its password.
    pub fn update_user(
        &mut self,
        id: &UserId,
        password: Option<String>,
        role: Role,
    ) -> Result<(), EditError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or(EditError::UserNotFound)?;
        if let Some(password) = password {
            user.password = password;
        }
        user.role = role;
        Ok(())
    }

    /// Delete an account. The acting account cannot delete itself.
    pub fn remove_user(&mut self, id: &UserId, actor: &UserId) -> Result<(), EditError> {
        if id == actor {
            return Err(EditError::OwnAccount);
        }
        let index = self
            .users
            .iter()
            .position(|user| user.id == *id)
            .ok_or(EditError::UserNotFound)?;
        self.users.remove(index);
        Ok(())
    }

    /// Set the global default duration, kept at least one second.
    pub fn set_default_duration(&mut self, secs: u32) {
        self.default_duration_secs = secs.max(1);
    }
}
