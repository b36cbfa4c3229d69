//! Editor facade
//!
//! Ties a session to its devices and keeps the menu in step with it. The
//! menu layer only needs [`Editor::menu`] to draw and [`Editor::select`]
//! when the user picks a line.

use nvedit_hal::{SettingsStore, SmBus, StoreError};
use rand_core::RngCore;

use crate::config::EditorConfig;
use crate::error::ApplyError;
use crate::menu::{build_menu, Menu, MenuAction};
use crate::session::{ApplyReport, SettingsSession};

/// Settings editor over a settings store, an SMBus and a random source
pub struct Editor<S, B, R> {
    session: SettingsSession,
    menu: Menu,
    store: S,
    bus: B,
    rng: R,
}

impl<S, B, R> Editor<S, B, R>
where
    S: SettingsStore,
    B: SmBus,
    R: RngCore,
{
    /// Load settings and build the first menu
    ///
    /// The factory block is not touched until the first apply.
    pub fn activate(mut store: S, bus: B, rng: R, config: EditorConfig) -> Result<Self, StoreError> {
        let session = SettingsSession::activate(&mut store, config)?;
        let menu = build_menu(&session);
        Ok(Self {
            session,
            menu,
            store,
            bus,
            rng,
        })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn session(&self) -> &SettingsSession {
        &self.session
    }

    /// Run the action of line `index`
    ///
    /// Display lines and indices past the end do nothing and return
    /// `Ok(None)`.
    pub fn select(&mut self, index: usize) -> Result<Option<ApplyReport>, ApplyError> {
        match self.menu.action(index) {
            Some(action) => self.perform(action),
            None => Ok(None),
        }
    }

    /// Run an action and rebuild the menu
    ///
    /// The menu is rebuilt even when apply fails, so it keeps showing the
    /// unsaved state.
    pub fn perform(&mut self, action: MenuAction) -> Result<Option<ApplyReport>, ApplyError> {
        let result = match action {
            MenuAction::Apply => self
                .session
                .apply(&mut self.store, &mut self.bus)
                .map(Some),
            MenuAction::Step(setting) => {
                self.session.step(setting, &mut self.rng);
                Ok(None)
            }
        };

        #[cfg(feature = "defmt")]
        if let Err(e) = &result {
            defmt::warn!("{} failed: {}", action, e);
        }

        self.menu = build_menu(&self.session);
        result
    }

    /// Give back the owned devices
    pub fn into_parts(self) -> (S, B, R) {
        (self.store, self.bus, self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvedit_hal::mock::{MockEeprom, MockSettingsStore};
    use nvedit_hal::{SettingKey, SmBusError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::session::Setting;

    type TestEditor = Editor<MockSettingsStore, MockEeprom, StdRng>;

    fn editor(store: MockSettingsStore) -> TestEditor {
        Editor::activate(
            store,
            MockEeprom::new(0xA8),
            StdRng::seed_from_u64(3),
            EditorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_activate_does_not_touch_eeprom() {
        let editor = editor(MockSettingsStore::new());
        assert_eq!(editor.menu().len(), 17);
        let (_, eeprom, _) = editor.into_parts();
        assert!(eeprom.ops.is_empty());
    }

    #[test]
    fn test_select_display_line_is_noop() {
        let mut editor = editor(MockSettingsStore::new());
        assert_eq!(editor.select(0), Ok(None));
        assert_eq!(editor.select(99), Ok(None));
        assert!(!editor.session().is_dirty());
    }

    #[test]
    fn test_select_regenerates_menu() {
        let mut store = MockSettingsStore::new();
        store.set_dword(SettingKey::DvdRegion, 6);
        let mut editor = editor(store);
        assert_eq!(editor.menu().get(3).unwrap().text, "DVD Region: 6 China");

        editor.select(3).unwrap();
        assert_eq!(editor.menu().get(1).unwrap().text, "Apply unsaved changes");
        assert_eq!(editor.menu().get(3).unwrap().text, "DVD Region: 0 None");
    }

    #[test]
    fn test_failed_apply_keeps_unsaved_label() {
        let mut editor = Editor::activate(
            MockSettingsStore::new(),
            {
                let mut eeprom = MockEeprom::new(0xA8);
                eeprom.fail_at(0x30, SmBusError::Other, None);
                eeprom
            },
            StdRng::seed_from_u64(3),
            EditorConfig::default(),
        )
        .unwrap();

        editor
            .perform(MenuAction::Step(Setting::RefreshRate))
            .unwrap();
        assert!(editor.perform(MenuAction::Apply).is_err());
        assert_eq!(editor.menu().get(1).unwrap().text, "Apply unsaved changes");
    }
}
