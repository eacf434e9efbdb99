use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and what they do, e.g. `(&["←", "→"], "Move")`.
pub type KeyBinding = (&'static [&'static str], &'static str);

/// A one-line centered list of key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay {
    bindings: &'static [KeyBinding],
}

impl KeyBindingDisplay {
    pub fn new(bindings: &'static [KeyBinding]) -> Self {
        Self { bindings }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            let keys = keys.iter().copied().map(|key| Span::styled(key, KEY_STYLE));
            spans.extend(intersperse(keys, Span::styled("/", SEPARATOR_STYLE)));
            spans.push(Span::styled(format!(" {desc}"), DESCRIPTION_STYLE));
        }
        spans
    }
}

fn intersperse<'a>(
    spans: impl Iterator<Item = Span<'a>>,
    separator: Span<'a>,
) -> Vec<Span<'a>> {
    let mut out = vec![];
    for (i, span) in spans.enumerate() {
        if i > 0 {
            out.push(separator.clone());
        }
        out.push(span);
    }
    out
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::Gray);

impl Widget for KeyBindingDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(self.spans()).centered().render(area, buf);
    }
}
