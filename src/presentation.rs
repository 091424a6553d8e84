//! Pure layout derivations for cards and their controls.

use crate::carousel::CardPosition;

pub const CARD_WIDTH_PX: u32 = 390;
pub const CARD_HEIGHT: &str = "43.75rem";
pub const NAV_BUTTON_OFFSET_PX: u32 = 84;

const INACTIVE_SCALE: f64 = 0.6;
const PRESSED_SCALE: f64 = 0.45;

fn translate_px(position: CardPosition) -> i32 {
    match position.get() {
        -3 => -996,
        -2 => -722,
        -1 => -448,
        1 => 448,
        2 => 722,
        3 => 996,
        _ => 0,
    }
}

/// CSS transform for a card. Pressed neighbours shrink a little further.
pub fn transform(position: CardPosition, is_pressed: bool) -> String {
    let translate = translate_px(position);
    let scale = if position.is_active() {
        1.0
    } else if is_pressed && position.is_adjacent() {
        PRESSED_SCALE
    } else {
        INACTIVE_SCALE
    };
    if translate == 0 {
        format!("translateX(0) scale({scale})")
    } else {
        format!("translateX({translate}px) scale({scale})")
    }
}

/// Cards closer to the centre stack on top.
pub fn z_index(position: CardPosition) -> i32 {
    3 - i32::from(position.get().abs())
}

pub fn frame_style(position: CardPosition, is_pressed: bool) -> String {
    format!(
        "width: {w}px; height: {h}; transform: {t}; z-index: {z}; left: 50%; margin-left: -{half}px;",
        w = CARD_WIDTH_PX,
        h = CARD_HEIGHT,
        t = transform(position, is_pressed),
        z = z_index(position),
        half = CARD_WIDTH_PX / 2,
    )
}

/// Value a progress segment reports: full for watched substories, live
/// progress for the current one, empty for the rest.
pub fn segment_value(segment: usize, current: usize, progress: f64) -> f64 {
    use std::cmp::Ordering;
    match segment.cmp(&current) {
        Ordering::Less => 100.0,
        Ordering::Equal => progress.clamp(0.0, 100.0),
        Ordering::Greater => 0.0,
    }
}

pub fn play_pause_label(is_playing: bool) -> &'static str {
    if is_playing {
        "Pause video"
    } else {
        "Play video"
    }
}

pub fn mute_label(is_muted: bool) -> &'static str {
    if is_muted {
        "Unmute video"
    } else {
        "Mute video"
    }
}
