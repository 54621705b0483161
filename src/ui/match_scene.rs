//! Two-lane match screen.
//!
//! Each lane is a bordered block with its own cell canvas: sky (day or
//! night), parallax dots, the scrolling floor, the session's sprites and the
//! score. Prompts for ready-up, countdown and game over are drawn on top.

use super::canvas::{Cell, CellCanvas};
use super::layout::{
    create_match_layout, render_centered_line, render_info_panel_frame, render_outcome_banner,
    render_status_bar,
};
use dino_jockey::core::PlayerSlot;
use dino_jockey::runner::{Match, MatchOutcome, Session, SessionState};
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FLOOR_CHAR: char = '▓';
const FLOOR_SUB: char = '░';
/// Pixels between floor texture marks.
const FLOOR_MARK_SPACING: f64 = 50.0;

const DAY_SKY: Color = Color::Reset;
const NIGHT_SKY: Color = Color::Rgb(12, 12, 32);

/// Background dots `(x, y)` as fractions of the lane, drifting with parallax.
const BACKGROUND_DOTS: [(f64, f64); 6] = [
    (0.08, 0.15),
    (0.23, 0.32),
    (0.41, 0.10),
    (0.57, 0.25),
    (0.74, 0.18),
    (0.90, 0.36),
];

pub fn key_label(slot: PlayerSlot) -> &'static str {
    match slot {
        PlayerSlot::One => "[Up]",
        PlayerSlot::Two => "[W]",
    }
}

fn slot_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => Color::LightYellow,
        PlayerSlot::Two => Color::LightCyan,
    }
}

/// Render the whole match.
pub fn render_match<R: Rng>(frame: &mut Frame, area: Rect, game: &Match<R>) {
    let layout = create_match_layout(frame, area, " Dino Jockey ", Color::LightYellow, 22);

    for slot in PlayerSlot::ALL {
        render_lane(frame, layout.lanes[slot.index()], game.session(slot));
    }
    render_match_status(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);

    if let Some(outcome) = game.outcome() {
        let (color, title, message) = match outcome {
            MatchOutcome::Winner(slot) => (
                slot_color(slot),
                format!("{} WINS!", slot.name().to_uppercase()),
                format!(
                    "{} to {}",
                    game.session(slot).score(),
                    game.session(slot.opponent()).score()
                ),
            ),
            MatchOutcome::Draw => (
                Color::Yellow,
                "DRAW".to_string(),
                format!("Both on {}", game.session(PlayerSlot::One).score()),
            ),
        };
        let lanes = Rect {
            height: layout.lanes[0].height + layout.lanes[1].height,
            ..layout.lanes[0]
        };
        render_outcome_banner(frame, lanes, color, &title, &message);
    }
}

fn render_lane(frame: &mut Frame, area: Rect, session: &Session) {
    let slot = session.slot();
    let block = Block::default()
        .title(format!(" {} {} ", slot.name(), key_label(slot)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(slot_color(slot)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 10 || inner.height < 3 {
        return;
    }

    let mut canvas = paint_lane(session, inner.width, inner.height);
    session.draw(&mut canvas);
    canvas.put_text_right(0, &format!("Score: {}", session.score()), Color::White);
    canvas.render(frame, inner);

    if let Some((text, color)) = lane_prompt(session) {
        render_centered_line(frame, inner, &text, color);
    }
}

/// Sky, parallax dots and floor, before any sprite.
fn paint_lane(session: &Session, cols: u16, rows: u16) -> CellCanvas {
    let viewport = session.viewport();
    let sky = if session.is_night() { NIGHT_SKY } else { DAY_SKY };
    let mut canvas = CellCanvas::new(viewport, cols, rows, sky);

    let dot_color = if session.is_night() {
        Color::Rgb(200, 200, 120)
    } else {
        Color::Rgb(70, 70, 70)
    };
    let drift = session.background_offset();
    for (fx, fy) in BACKGROUND_DOTS {
        let x = (fx * viewport.width - drift).rem_euclid(viewport.width) + viewport.left();
        let y = viewport.top() + fy * viewport.height;
        canvas.put(canvas.col_of(x), canvas.row_of(y), '.', dot_color);
    }

    let floor_row = canvas.row_of(viewport.floor_line(session.config().floor_height));
    let scroll = session.floor_offset();
    for row in floor_row..canvas.rows() as i32 {
        let surface = row == floor_row;
        let cols = canvas.cols().max(1) as f64;
        canvas.fill_row(row, |col| {
            let x = col as f64 / cols * viewport.width + scroll;
            let mark = (x / FLOOR_MARK_SPACING) as i64 % 2 == 0;
            if surface {
                Cell {
                    ch: if mark { FLOOR_SUB } else { '▁' },
                    fg: Color::Rgb(90, 70, 50),
                    bg: sky,
                }
            } else {
                Cell {
                    ch: FLOOR_CHAR,
                    fg: if mark {
                        Color::Rgb(90, 70, 50)
                    } else {
                        Color::Rgb(70, 55, 40)
                    },
                    bg: Color::Rgb(50, 40, 30),
                }
            }
        });
    }
    canvas
}

fn lane_prompt(session: &Session) -> Option<(String, Color)> {
    let slot = session.slot();
    match session.state() {
        SessionState::Waiting => Some((
            format!("Press {} when ready", key_label(slot)),
            Color::White,
        )),
        SessionState::ReadyToStart => Some(("READY!".to_string(), Color::Green)),
        SessionState::Counting { .. } => session
            .countdown()
            .map(|n| (n.to_string(), Color::LightYellow)),
        SessionState::Starting => Some(("GO!".to_string(), Color::Green)),
        SessionState::Playing => None,
        SessionState::GameOver if session.wants_rematch() => {
            Some(("GAME OVER - rematch?".to_string(), Color::Red))
        }
        SessionState::GameOver => Some(("GAME OVER".to_string(), Color::Red)),
        SessionState::Winner => Some(("WINNER!".to_string(), slot_color(slot))),
    }
}

fn render_match_status<R: Rng>(frame: &mut Frame, area: Rect, game: &Match<R>) {
    let sessions = game.sessions();
    let controls: &[(&str, &str)] = &[
        ("[Up]", "Player 1"),
        ("[W]", "Player 2"),
        ("[Esc]", "Quit"),
    ];

    let (text, color) = if game.outcome().is_some() {
        ("Press jump to request a rematch", Color::White)
    } else if sessions.iter().any(Session::is_running) {
        ("Jump! Hold longer to jump higher", Color::LightYellow)
    } else if sessions.iter().all(Session::is_ready) {
        ("Both ready...", Color::Green)
    } else if sessions.iter().any(|s| s.countdown().is_some()) {
        ("Get set!", Color::LightYellow)
    } else {
        ("Waiting for both players", Color::White)
    };
    render_status_bar(frame, area, text, color, controls);
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, game: &Match<R>) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = Vec::new();
    for session in game.sessions() {
        let slot = session.slot();
        lines.push(Line::from(Span::styled(
            slot.name(),
            Style::default()
                .fg(slot_color(slot))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                session.score().to_string(),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Speed: ", label),
            Span::styled(
                format!("{:.0}", session.speed()),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let night = game.sessions().iter().any(Session::is_night);
    lines.push(Line::from(vec![
        Span::styled("Time: ", label),
        Span::styled(
            if night { "Night" } else { "Day" },
            Style::default().fg(Color::White),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_jockey::core::{GameConfig, JumpInput, Viewport};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> Session {
        Session::new(
            PlayerSlot::One,
            Viewport::sized(1280.0, 352.0),
            &GameConfig::default(),
        )
        .expect("valid session")
    }

    fn lane_canvas(session: &Session, cols: u16, rows: u16) -> CellCanvas {
        let mut canvas = paint_lane(session, cols, rows);
        session.draw(&mut canvas);
        canvas
    }

    #[test]
    fn test_floor_painted_below_floor_line() {
        let session = session();
        let canvas = lane_canvas(&session, 128, 22);
        // Floor line at y = 320 -> row 20 of 22
        let surface = canvas.get(5, 20).map(|c| c.ch);
        assert!(matches!(surface, Some(FLOOR_SUB) | Some('▁')));
        assert_eq!(canvas.get(5, 21).map(|c| c.ch), Some(FLOOR_CHAR));
        assert_eq!(canvas.get(5, 19).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_prompts_follow_state() {
        let mut session = session();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(lane_prompt(&session)
            .map(|(text, _)| text.contains("[Up]"))
            .unwrap_or(false));

        session.update(0.016, &JumpInput::PRESS, &mut rng);
        assert_eq!(
            lane_prompt(&session).map(|(text, _)| text),
            Some("READY!".to_string())
        );

        session.begin_countdown(3.0);
        session.update(0.016, &JumpInput::IDLE, &mut rng);
        assert_eq!(
            lane_prompt(&session).map(|(text, _)| text),
            Some("3".to_string())
        );
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(PlayerSlot::One), "[Up]");
        assert_eq!(key_label(PlayerSlot::Two), "[W]");
    }
}
