//! Popup menus. Menu identities are a separate positive namespace per
//! display.

use crate::error::{DisplayError, Result};
use crate::geometry::Point;
use crate::ownership::{DisplayKey, MenuId, MenuKey};
use crate::render::Renderer;
use crate::window::WindowManager;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub text: String,
    pub enabled: bool,
    pub submenu: Option<MenuKey>,
}

impl MenuItem {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            enabled: true,
            submenu: None,
        }
    }

    pub fn separator() -> Self {
        Self::new("")
    }

    /// Items without text render as separators.
    pub fn is_separator(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    id: MenuId,
    display: DisplayKey,
    pub items: Vec<MenuItem>,
    shown_at: Option<Point>,
}

impl Menu {
    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn display(&self) -> DisplayKey {
        self.display
    }

    /// Desktop point the menu is open at, if open.
    pub fn shown_at(&self) -> Option<Point> {
        self.shown_at
    }
}

impl<R: Renderer> WindowManager<R> {
    pub fn create_menu(&mut self, display: DisplayKey, id: MenuId) -> Result<MenuKey> {
        let disp = self
            .displays
            .get(display)
            .ok_or(DisplayError::InvalidState("unknown display"))?;
        disp.menus().check(id.get())?;
        let key = self.menus.insert(Menu {
            id,
            display,
            items: Vec::new(),
            shown_at: None,
        });
        if let Some(d) = self.displays.get_mut(display) {
            d.menus_mut().add(id.get(), key)?;
        }
        tracing::debug!(menu = ?key, id = id.get(), "created menu");
        Ok(key)
    }

    pub fn destroy_menu(&mut self, key: MenuKey) -> Result<()> {
        let menu = self
            .menus
            .remove(key)
            .ok_or(DisplayError::InvalidState("unknown menu"))?;
        if let Some(d) = self.displays.get_mut(menu.display) {
            d.menus_mut().remove(menu.id.get());
        }
        for (_, m) in self.menus.iter_mut() {
            for item in m.items.iter_mut() {
                if item.submenu == Some(key) {
                    item.submenu = None;
                }
            }
        }
        tracing::debug!(menu = ?key, "destroyed menu");
        Ok(())
    }

    pub fn menu(&self, key: MenuKey) -> Option<&Menu> {
        self.menus.get(key)
    }

    pub fn menu_mut(&mut self, key: MenuKey) -> Option<&mut Menu> {
        self.menus.get_mut(key)
    }

    /// Open `key` at a desktop point. A submenu must belong to the same
    /// display.
    pub fn show_menu(&mut self, key: MenuKey, at: Point) -> Result<()> {
        let at = at.validate()?;
        let menu = self
            .menus
            .get_mut(key)
            .ok_or(DisplayError::InvalidState("unknown menu"))?;
        menu.shown_at = Some(at);
        Ok(())
    }

    pub fn set_submenu(&mut self, key: MenuKey, index: usize, sub: Option<MenuKey>) -> Result<()> {
        let display = self
            .menus
            .get(key)
            .ok_or(DisplayError::InvalidState("unknown menu"))?
            .display;
        if let Some(s) = sub {
            let submenu = self
                .menus
                .get(s)
                .ok_or(DisplayError::InvalidState("unknown menu"))?;
            if submenu.display != display {
                return Err(DisplayError::CrossDisplay);
            }
            if s == key {
                return Err(DisplayError::InvalidParent("a menu cannot be its own submenu"));
            }
        }
        let item = self
            .menus
            .get_mut(key)
            .and_then(|m| m.items.get_mut(index))
            .ok_or(DisplayError::InvalidState("no menu item at index"))?;
        item.submenu = sub;
        Ok(())
    }

    /// Close every open menu of `display`.
    pub fn dismiss_menus(&mut self, display: DisplayKey) {
        for (_, m) in self.menus.iter_mut() {
            if m.display == display {
                m.shown_at = None;
            }
        }
    }

    pub fn any_menus_open(&self, display: DisplayKey) -> bool {
        self.menus
            .values()
            .any(|m| m.display == display && m.shown_at.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_identities_are_positive_and_unique() {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let m = wm.create_menu(d, MenuId::new(1)).unwrap();
        assert_eq!(
            wm.create_menu(d, MenuId::new(1)).err(),
            Some(DisplayError::IdentityConflict(1))
        );
        assert!(wm.create_menu(d, MenuId::new(0)).is_err());
        assert!(wm.create_menu(d, MenuId::new(-1)).is_err());
        assert_eq!(wm.display(d).unwrap().menu(MenuId::new(1)), Some(m));
        wm.destroy_menu(m).unwrap();
        assert_eq!(wm.display(d).unwrap().menu(MenuId::new(1)), None);
        wm.create_menu(d, MenuId::new(1)).unwrap();
    }

    #[test]
    fn items_submenus_and_dismiss() {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let file = wm.create_menu(d, MenuId::new(1)).unwrap();
        let recent = wm.create_menu(d, MenuId::new(2)).unwrap();
        let items = &mut wm.menu_mut(file).unwrap().items;
        items.push(MenuItem::new("Open"));
        items.push(MenuItem::separator());
        items.push(MenuItem::new("Recent"));
        wm.set_submenu(file, 2, Some(recent)).unwrap();
        assert!(wm.set_submenu(file, 2, Some(file)).is_err());
        assert!(wm.menu(file).unwrap().items[1].is_separator());

        wm.show_menu(file, Point::new(3.0, 4.0)).unwrap();
        assert!(wm.any_menus_open(d));
        wm.dismiss_menus(d);
        assert!(!wm.any_menus_open(d));

        wm.destroy_menu(recent).unwrap();
        assert_eq!(wm.menu(file).unwrap().items[2].submenu, None);
    }
}
