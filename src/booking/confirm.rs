use super::Confirmation;
use crate::theme::{BASE_STYLE, HINT_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ConfirmationPopup<'a>(pub(crate) &'a Confirmation);

impl Widget for ConfirmationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = self
            .0
            .lines()
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                if i == 0 {
                    Line::styled(s, TITLE_STYLE)
                } else {
                    Line::styled(s, BASE_STYLE)
                }
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::styled("Press the Any Key to continue.", HINT_STYLE));
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let [popup_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(popup_area);
        Clear.render(popup_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Booked ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(BASE_STYLE)
            .render(popup_area, buf);
    }
}
