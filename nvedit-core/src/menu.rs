//! Menu line binding
//!
//! Turns a session into the ordered lines the menu layer shows. Lines are
//! rebuilt from scratch after every action; a line either just displays
//! text or carries the action selecting it performs.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::session::{Setting, SettingsSession};
use crate::settings::{AvRegion, GameRegion, VideoMode};

/// Line capacity of the menu widget
pub const MAX_MENU_LINES: usize = 32;

/// Text capacity of the menu widget, one terminator byte per line included
pub const MAX_MENU_TEXT: usize = 512;

/// What selecting a line does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Persist the session
    Apply,
    /// Step a setting
    Step(Setting),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub text: String,
    /// `None` for headers and read-only summaries
    pub action: Option<MenuAction>,
}

/// Ordered menu lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    lines: Vec<MenuLine>,
}

impl Menu {
    pub fn lines(&self) -> &[MenuLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuLine> {
        self.lines.get(index)
    }

    /// Action bound to line `index`, if any
    pub fn action(&self, index: usize) -> Option<MenuAction> {
        self.lines.get(index).and_then(|line| line.action)
    }

    /// Text footprint as the widget counts it (one terminator per line)
    pub fn text_bytes(&self) -> usize {
        self.lines.iter().map(|line| line.text.len() + 1).sum()
    }

    fn push(&mut self, action: Option<MenuAction>, args: core::fmt::Arguments<'_>) {
        let mut text = String::new();
        // writing into a String cannot fail
        let _ = text.write_fmt(args);
        self.lines.push(MenuLine { text, action });
    }
}

fn step(setting: Setting) -> Option<MenuAction> {
    Some(MenuAction::Step(setting))
}

/// DVD region label, number included
pub fn dvd_region_label(index: u8) -> &'static str {
    match index {
        0 => "0 None",
        1 => "1 USA, Canada",
        2 => "2 Europe, Japan, Middle East",
        3 => "3 Southeast Asia, South Korea",
        4 => "4 Latin America, Australia",
        5 => "5 Eastern Europe, Russia, Africa",
        6 => "6 China",
        _ => "Unknown",
    }
}

/// Language label, number included
pub fn language_label(index: u8) -> &'static str {
    match index {
        0 => "0 Not Set",
        1 => "1 English",
        2 => "2 Japanese",
        3 => "3 German",
        4 => "4 French",
        5 => "5 Spanish",
        6 => "6 Italian",
        7 => "7 Korean",
        8 => "8 Chinese",
        9 => "9 Portuguese",
        _ => "Unknown",
    }
}

/// Writes a bias in minutes as signed hours with one decimal (`-300` -> `5.0`)
struct Hours(i32);

impl core::fmt::Display for Hours {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // the displayed offset is the negated bias, rounded half away from zero
        let scaled = -(self.0 as i64) * 10;
        let tenths = (scaled + scaled.signum() * 30) / 60;
        let sign = if tenths < 0 { "-" } else { "" };
        let tenths = tenths.unsigned_abs();
        write!(f, "{}{}.{}", sign, tenths / 10, tenths % 10)
    }
}

/// Build the menu for the current session state
pub fn build_menu(session: &SettingsSession) -> Menu {
    let snap = session.snapshot();
    let video = snap.video_flags;
    let audio = snap.audio_flags;
    let mut menu = Menu::default();

    menu.push(None, format_args!("EEPROM Settings"));
    if session.is_dirty() {
        menu.push(Some(MenuAction::Apply), format_args!("Apply unsaved changes"));
    } else {
        menu.push(Some(MenuAction::Apply), format_args!("Apply"));
    }

    let game_region = snap.game_region().map_or("Unknown", GameRegion::label);
    menu.push(None, format_args!("Game Region: {}", game_region));

    menu.push(
        step(Setting::DvdRegion),
        format_args!("DVD Region: {}", dvd_region_label(snap.dvd_region)),
    );
    menu.push(
        step(Setting::Language),
        format_args!("Language: {}", language_label(snap.language)),
    );

    let av_region = snap.av_region().map_or("Invalid Region", AvRegion::label);
    menu.push(
        step(Setting::AvRegion),
        format_args!("Video Region: {}", av_region),
    );

    menu.push(None, format_args!("Video Flags: 0x{:08x}", video.bits()));
    menu.push(
        step(Setting::AspectRatio),
        format_args!("  Aspect Ratio: {}", video.aspect().label()),
    );
    menu.push(
        step(Setting::RefreshRate),
        format_args!("  Refresh Rate: {}", video.refresh_rate().label()),
    );
    for mode in [VideoMode::P480, VideoMode::P720, VideoMode::I1080] {
        let mark = if video.is_enabled(mode) { 'x' } else { ' ' };
        menu.push(
            step(Setting::VideoMode(mode)),
            format_args!("  {}: [{}]", mode.label(), mark),
        );
    }

    menu.push(None, format_args!("Audio Flags: 0x{:08x}", audio.bits()));
    menu.push(
        step(Setting::AudioChannel),
        format_args!("  Channel Configuration: {}", audio.channel().label()),
    );
    menu.push(
        step(Setting::AudioEncoding),
        format_args!("  Encoding: {}", audio.encoding().label()),
    );

    menu.push(
        step(Setting::MacAddress),
        format_args!("MAC Address: {}", snap.mac_address),
    );
    menu.push(
        step(Setting::TimeZone),
        format_args!("Time Zone Offset: {} hours", Hours(snap.time_zone_bias)),
    );

    debug_assert!(menu.len() <= MAX_MENU_LINES);
    debug_assert!(menu.text_bytes() <= MAX_MENU_TEXT);

    #[cfg(feature = "defmt")]
    defmt::debug!("Menu rebuilt: {} lines, {} bytes", menu.len(), menu.text_bytes());

    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    use crate::config::EditorConfig;
    use crate::settings::{
        AudioFlags, MacAddress, SettingsSnapshot, VideoFlags, DVD_REGION_COUNT,
    };

    fn texts(menu: &Menu) -> Vec<&str> {
        menu.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_default_menu_layout() {
        let session = SettingsSession::new(SettingsSnapshot::default(), EditorConfig::default());
        let menu = build_menu(&session);

        assert_eq!(
            texts(&menu),
            [
                "EEPROM Settings",
                "Apply",
                "Game Region: Unknown",
                "DVD Region: 0 None",
                "Language: 0 Not Set",
                "Video Region: Invalid Region",
                "Video Flags: 0x00000000",
                "  Aspect Ratio: Normal",
                "  Refresh Rate: Not set",
                "  480p: [ ]",
                "  720p: [ ]",
                "  1080i: [ ]",
                "Audio Flags: 0x00000000",
                "  Channel Configuration: Stereo",
                "  Encoding: None",
                "MAC Address: 00:00:00:00:00:00",
                "Time Zone Offset: 0.0 hours",
            ]
        );
    }

    #[test]
    fn test_actions_bound_to_lines() {
        let session = SettingsSession::new(SettingsSnapshot::default(), EditorConfig::default());
        let menu = build_menu(&session);

        assert_eq!(menu.action(0), None);
        assert_eq!(menu.action(1), Some(MenuAction::Apply));
        assert_eq!(menu.action(2), None);
        assert_eq!(menu.action(3), Some(MenuAction::Step(Setting::DvdRegion)));
        assert_eq!(menu.action(6), None);
        assert_eq!(
            menu.action(10),
            Some(MenuAction::Step(Setting::VideoMode(VideoMode::P720)))
        );
        assert_eq!(menu.action(12), None);
        assert_eq!(menu.action(16), Some(MenuAction::Step(Setting::TimeZone)));
        assert_eq!(menu.action(17), None);
    }

    #[test]
    fn test_populated_menu_text() {
        let snapshot = SettingsSnapshot {
            dvd_region: 2,
            language: 1,
            video_flags: VideoFlags(0x0001_0000 | 0x00C0_0000 | 0x0008_0000),
            audio_flags: AudioFlags(0x0003_0002),
            av_region: AvRegion::PalM.as_raw(),
            game_region: GameRegion::Europe.as_raw(),
            mac_address: MacAddress([0x00, 0x12, 0x5A, 0x0F, 0xA0, 0x01]),
            time_zone_bias: -330,
        };
        let mut session = SettingsSession::new(snapshot, EditorConfig::default());
        session.increment_language();
        let menu = build_menu(&session);
        let lines = texts(&menu);

        assert_eq!(lines[1], "Apply unsaved changes");
        assert_eq!(lines[2], "Game Region: Europe and Australia");
        assert_eq!(lines[3], "DVD Region: 2 Europe, Japan, Middle East");
        assert_eq!(lines[4], "Language: 2 Japanese");
        assert_eq!(lines[5], "Video Region: PAL Brazil");
        assert_eq!(lines[6], "Video Flags: 0x00c90000");
        assert_eq!(lines[7], "  Aspect Ratio: Widescreen");
        assert_eq!(lines[8], "  Refresh Rate: 50Hz / 60Hz");
        assert_eq!(lines[9], "  480p: [x]");
        assert_eq!(lines[12], "Audio Flags: 0x00030002");
        assert_eq!(lines[13], "  Channel Configuration: Surround");
        assert_eq!(lines[14], "  Encoding: AC3 / DTS");
        assert_eq!(lines[15], "MAC Address: 00:12:5a:0f:a0:01");
        assert_eq!(lines[16], "Time Zone Offset: 5.5 hours");
    }

    #[test]
    fn test_time_zone_hours() {
        assert_eq!(Hours(0).to_string(), "0.0");
        assert_eq!(Hours(30).to_string(), "-0.5");
        assert_eq!(Hours(-720).to_string(), "12.0");
        assert_eq!(Hours(720).to_string(), "-12.0");
        assert_eq!(Hours(-90).to_string(), "1.5");
        // off-grid biases round to the nearest tenth
        assert_eq!(Hours(5).to_string(), "-0.1");
        assert_eq!(Hours(-3).to_string(), "0.1");
        assert_eq!(Hours(2).to_string(), "0.0");
        assert_eq!(Hours(-44).to_string(), "0.7");
        assert_eq!(Hours(i32::MIN).to_string(), "35791394.1");
    }

    #[test]
    fn test_longest_labels_fit_capacity() {
        let snapshot = SettingsSnapshot {
            dvd_region: 5,
            language: 9,
            video_flags: VideoFlags(u32::MAX),
            audio_flags: AudioFlags(u32::MAX),
            // unmatched, shows "Invalid Region"
            av_region: 0xDEAD_BEEF,
            game_region: GameRegion::Europe.as_raw(),
            mac_address: MacAddress([0xFF; 6]),
            time_zone_bias: i32::MIN,
        };
        let mut session = SettingsSession::new(snapshot, EditorConfig::default());
        // a full cycle lands back on region 5 with the session dirty
        for _ in 0..DVD_REGION_COUNT {
            session.increment_dvd_region();
        }
        let menu = build_menu(&session);

        assert_eq!(menu.get(5).unwrap().text, "Video Region: Invalid Region");
        assert_eq!(
            menu.get(16).unwrap().text,
            "Time Zone Offset: 35791394.1 hours"
        );
        assert!(menu.len() <= MAX_MENU_LINES);
        assert!(menu.text_bytes() <= MAX_MENU_TEXT);
    }
}
