use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Padding, Paragraph, Widget},
};
use tetrino_engine::{Phase, Snapshot};

use super::{BoardDisplay, StatsDisplay, style};

/// The whole play screen: board, stats and the phase overlay.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    snapshot: Snapshot<'a>,
}

impl<'a> GameDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        Self { snapshot }
    }
}

/// Text shown over the board, if the phase or pause state calls for it.
fn overlay_text(snapshot: &Snapshot<'_>) -> Option<Text<'static>> {
    if snapshot.is_paused() {
        return Some(Text::from(Line::styled("PAUSED", style::TITLE)));
    }
    match snapshot.phase() {
        Phase::Start => Some(Text::from(vec![
            Line::styled("PRESS SPACE", style::TITLE),
            Line::styled("TO START", style::TITLE),
            Line::default(),
            Line::styled(format!("LEVEL {}", snapshot.start_level()), style::DEFAULT),
            Line::styled("↑/↓ to change", style::EMPTY),
        ])),
        Phase::GameOver => Some(Text::from(vec![
            Line::styled("GAME OVER", style::GAME_OVER),
            Line::default(),
            Line::styled(format!("POINTS {}", snapshot.points()), style::DEFAULT),
            Line::styled("PRESS SPACE", style::EMPTY),
        ])),
        Phase::Play | Phase::Line => None,
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = &self.snapshot;

        let board = BoardDisplay::new(snapshot.board())
            .falling_piece(snapshot.piece())
            .ghost(snapshot.ghost())
            .pending_lines(snapshot.pending_lines())
            .block(
                BlockWidget::bordered()
                    .title("TETRINO")
                    .title_alignment(HorizontalAlignment::Center)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(snapshot).block(
            BlockWidget::bordered()
                .title("STATS")
                .padding(Padding::horizontal(1))
                .style(style::DEFAULT),
        );

        let (board_width, board_height) = (board.width(), board.height());
        let stats_height = stats.height();

        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board_width),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area.centered_vertically(Constraint::Length(board_height)));

        let text_area = board_area.inner(Margin::new(1, 1));
        board.render(board_area, buf);
        stats.render(
            Rect {
                height: stats_height.min(stats_area.height),
                ..stats_area
            },
            buf,
        );

        if let Some(text) = overlay_text(snapshot) {
            let height = u16::try_from(text.height()).unwrap_or(u16::MAX) + 2;
            let overlay_area = text_area.centered_vertically(Constraint::Length(height));
            Clear.render(overlay_area, buf);
            Paragraph::new(text)
                .centered()
                .block(BlockWidget::bordered().style(style::DEFAULT))
                .render(overlay_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tetrino_engine::{Button, Buttons, Game, GameConfig, InputSnapshot, PieceSeed};

    use super::*;

    fn game(start_level: usize) -> Game {
        Game::new(&GameConfig {
            start_level,
            seed: Some(PieceSeed::from_bytes([3; 16])),
        })
    }

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_start_overlay_shows_level() {
        let game = game(7);
        let text = overlay_text(&game.snapshot()).unwrap();
        assert!(plain(&text).contains(&"LEVEL 7".to_owned()));
    }

    #[test]
    fn test_no_overlay_while_playing() {
        let mut game = game(0);
        game.advance(
            &InputSnapshot::pressed(Buttons::NONE.with(Button::HardDrop)),
            0.0,
        );
        assert!(overlay_text(&game.snapshot()).is_none());

        game.toggle_pause();
        let text = overlay_text(&game.snapshot()).unwrap();
        assert_eq!(plain(&text), ["PAUSED"]);
    }

    #[test]
    fn test_render_start_screen() {
        let game = game(0);
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(game.snapshot()).render(area, &mut buf);

        let lines: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        assert!(lines.iter().any(|line| line.contains("PRESS SPACE")));
        assert!(lines.iter().any(|line| line.contains("STATS")));
        assert!(lines.iter().any(|line| line.contains("LEVEL 0")));
    }
}
