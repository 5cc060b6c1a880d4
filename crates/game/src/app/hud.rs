use std::time::Duration;

use kart_engine::{text_height_px, text_width_px, Rgba, TextLabel, Vec2};

use super::layout::Layout;
use super::race::{GamePhase, Player, RaceSession};

const PROMPT_YELLOW: [f32; 3] = [0.825, 0.825, 0.0];
const PLACE_YELLOW: [f32; 3] = [0.8, 0.8, 0.0];
const SUBTITLE: &str = "Two player split keyboard racing";

/// Text for the current phase. Positions are baselines in world space.
pub(crate) fn labels(session: &RaceSession, layout: &Layout, now: Duration) -> Vec<TextLabel> {
    match session.phase() {
        GamePhase::Start => start_labels(layout),
        GamePhase::CharacterSelect => character_select_labels(session, layout),
        GamePhase::Play => play_labels(session, layout, now),
        GamePhase::Over => over_labels(layout),
    }
}

fn start_labels(layout: &Layout) -> Vec<TextLabel> {
    let mid_x = layout.world_size.x * 0.5;
    vec![
        centered("Press 'space' to start!", mid_x, 200.0, 3, rgb(PROMPT_YELLOW)),
        centered("Blob Kart", mid_x, 545.0, 6, Rgba::BLACK),
        centered(SUBTITLE, mid_x, 500.0, 2, Rgba::BLACK),
        label("Player 1: WASD", Vec2::new(20.0, 25.0), 2, red()),
        right_aligned(
            "Player 2: Arrow Keys",
            layout.world_size.x - 20.0,
            25.0,
            2,
            blue(),
        ),
    ]
}

fn character_select_labels(session: &RaceSession, layout: &Layout) -> Vec<TextLabel> {
    let mut labels = vec![centered(
        "Play",
        layout.button.area.center.x,
        35.0,
        3,
        Rgba::WHITE,
    )];
    labels.extend(layout.boxes.iter().zip(&layout.roster).map(|(character_box, blob)| {
        centered(
            format!("{} Blob", blob.name),
            character_box.area.center.x,
            character_box.area.bottom() - 22.0,
            2,
            Rgba::from_unit(0.0, 0.1, 0.0),
        )
    }));
    let prompt = match session.selection().active_picker() {
        Some(Player::One) => Some(("Player 1 pick", Rgba::from_unit(0.9, 0.0, 0.0))),
        Some(Player::Two) => Some(("Player 2 pick", blue())),
        None => None,
    };
    if let Some((text, color)) = prompt {
        labels.push(centered(text, layout.world_size.x * 0.5, 50.0, 3, color));
    }
    labels
}

fn play_labels(session: &RaceSession, layout: &Layout, now: Duration) -> Vec<TextLabel> {
    let race = session.race_config();
    let timers = session.timers();
    let lap_text = |player: Player| {
        let laps = session.cart(player).progress.laps().max(1);
        format!("{}: Lap {laps}/{}", player.cart_name(), race.laps_to_finish)
    };

    let mut labels = vec![
        label(lap_text(Player::One), Vec2::new(40.0, 10.0), 2, Rgba::WHITE),
        right_aligned(
            lap_text(Player::Two),
            layout.world_size.x - 40.0,
            10.0,
            2,
            Rgba::WHITE,
        ),
        label(
            format!("Time: {}", timers.race_seconds(now)),
            Vec2::new(40.0, layout.world_size.y - 36.0),
            2,
            Rgba::WHITE,
        ),
    ];

    let banner = match timers.countdown_digit(now, race.countdown_seconds) {
        Some(digit) => Some(digit.to_string()),
        None if timers.show_go_banner(now, race.go_banner_seconds) => Some("GO!".to_string()),
        None => None,
    };
    if let Some(text) = banner {
        let scale = 9;
        let baseline = layout.world_size.y * 0.5 - text_height_px(scale) as f32 * 0.5;
        labels.push(centered(
            text,
            layout.world_size.x * 0.5,
            baseline,
            scale,
            rgb(PROMPT_YELLOW),
        ));
    }
    labels
}

fn over_labels(layout: &Layout) -> Vec<TextLabel> {
    let mut labels = vec![centered(
        "Main Menu",
        layout.button.area.center.x,
        38.0,
        2,
        Rgba::WHITE,
    )];
    let places = [
        ("1", layout.podium[1]),
        ("2", layout.podium[2]),
        ("3", layout.podium[0]),
    ];
    labels.extend(places.into_iter().map(|(place, block)| {
        centered(place, block.center.x, block.top() - 70.0, 6, rgb(PLACE_YELLOW))
    }));
    labels
}

fn label(text: impl Into<String>, position: Vec2, scale: u8, color: Rgba) -> TextLabel {
    TextLabel {
        text: text.into(),
        position,
        scale,
        color,
    }
}

fn centered(
    text: impl Into<String>,
    center_x: f32,
    baseline: f32,
    scale: u8,
    color: Rgba,
) -> TextLabel {
    let text = text.into();
    let width = text_width_px(&text, scale) as f32;
    label(text, Vec2::new(center_x - width * 0.5, baseline), scale, color)
}

fn right_aligned(
    text: impl Into<String>,
    right_x: f32,
    baseline: f32,
    scale: u8,
    color: Rgba,
) -> TextLabel {
    let text = text.into();
    let width = text_width_px(&text, scale) as f32;
    label(text, Vec2::new(right_x - width, baseline), scale, color)
}

fn rgb([r, g, b]: [f32; 3]) -> Rgba {
    Rgba::from_unit(r, g, b)
}

fn red() -> Rgba {
    Rgba::from_unit(1.0, 0.0, 0.0)
}

fn blue() -> Rgba {
    Rgba::from_unit(0.0, 0.0, 1.0)
}
