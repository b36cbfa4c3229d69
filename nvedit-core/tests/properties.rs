//! Step-rule properties

use nvedit_core::checksum;
use nvedit_core::settings::{
    next_dvd_region, next_language, next_time_zone, AudioFlags, AvRegion, GameRegion, VideoFlags,
    VideoMode,
};
use nvedit_core::{EditorConfig, SettingsSession, SettingsSnapshot};
use proptest::prelude::*;

proptest! {
    #[test]
    fn dvd_region_has_period_seven(v in 0u8..7) {
        prop_assert_eq!(next_dvd_region(v), (v + 1) % 7);
        let mut x = v;
        for _ in 0..7 {
            x = next_dvd_region(x);
        }
        prop_assert_eq!(x, v);
    }

    #[test]
    fn language_has_period_ten(v in 0u8..10) {
        let mut x = v;
        for step in 1..=10 {
            x = next_language(x);
            if step < 10 {
                prop_assert_ne!(x, v);
            }
        }
        prop_assert_eq!(x, v);
    }

    #[test]
    fn time_zone_stays_in_domain(k in -24i32..=24) {
        let v = k * 30;
        let next = next_time_zone(v);
        prop_assert!((-720..=720).contains(&next));
        if v == -720 {
            prop_assert_eq!(next, 720);
        } else {
            prop_assert_eq!(next, v - 30);
        }
    }

    #[test]
    fn regions_always_land_in_their_sets(raw in any::<u32>()) {
        prop_assert!(AvRegion::from_raw(AvRegion::successor_of(raw).as_raw()).is_some());
        prop_assert!(GameRegion::from_raw(GameRegion::successor_of(raw).as_raw()).is_some());
    }

    #[test]
    fn av_region_has_period_four_from_any_member(i in 0usize..4) {
        let start = AvRegion::CYCLE[i];
        let mut raw = start.as_raw();
        for _ in 0..4 {
            raw = AvRegion::successor_of(raw).as_raw();
        }
        prop_assert_eq!(raw, start.as_raw());
    }

    #[test]
    fn video_steps_touch_only_their_bits(bits in any::<u32>()) {
        let refresh = 0x00C0_0000u32;
        let aspect = 0x0011_0000u32;

        let mut flags = VideoFlags(bits);
        flags.step_refresh_rate();
        prop_assert_eq!(flags.bits() & !refresh, bits & !refresh);

        let mut flags = VideoFlags(bits);
        flags.step_aspect();
        prop_assert_eq!(flags.bits() & !aspect, bits & !aspect);

        let mut flags = VideoFlags(bits);
        flags.toggle(VideoMode::P480);
        flags.toggle(VideoMode::P480);
        prop_assert_eq!(flags.bits(), bits);
    }

    #[test]
    fn aspect_cycles_with_period_three_from_normal(bits in any::<u32>()) {
        let start = bits & !0x0011_0000;
        let mut flags = VideoFlags(start);
        for _ in 0..3 {
            flags.step_aspect();
        }
        prop_assert_eq!(flags.bits(), start);
    }

    #[test]
    fn audio_steps_touch_only_their_bits(bits in any::<u32>()) {
        let mut flags = AudioFlags(bits);
        flags.step_channel();
        prop_assert_eq!(flags.bits() & !0x3, bits & !0x3);
        prop_assert!((flags.bits() & 0x3) < 3);

        let mut flags = AudioFlags(bits);
        flags.step_encoding();
        prop_assert_eq!(flags.bits() & !0x0003_0000, bits & !0x0003_0000);
    }

    #[test]
    fn sealed_checksum_verifies(payload in proptest::collection::vec(any::<u8>(), 44)) {
        let sum = checksum::compute(&payload);
        prop_assert!(checksum::verify(&payload, sum));

        let mut tampered = payload.clone();
        tampered[0] ^= 0x01;
        prop_assert!(!checksum::verify(&tampered, sum));
    }

    #[test]
    fn any_mutation_marks_dirty(choice in 0usize..4) {
        let mut session = SettingsSession::new(SettingsSnapshot::default(), EditorConfig::default());
        match choice {
            0 => session.increment_dvd_region(),
            1 => session.increment_audio_encoding(),
            2 => session.increment_game_region(),
            _ => session.toggle_video_mode(VideoMode::I1080),
        }
        prop_assert!(session.is_dirty());
    }
}

#[test]
fn av_region_from_ntsc_visits_fixed_order() {
    let mut raw = AvRegion::Ntsc.as_raw();
    let mut seen = Vec::new();
    for _ in 0..4 {
        let next = AvRegion::successor_of(raw);
        seen.push(next);
        raw = next.as_raw();
    }
    assert_eq!(
        seen,
        [AvRegion::Pal, AvRegion::NtscJapan, AvRegion::PalM, AvRegion::Ntsc]
    );
}
