use crate::booking::TimeSlot;
use crate::theme::{popup::ACTIVE_ITEM_STYLE, BASE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

/// Columns of padding around each slot's label
const SLOT_PADDING: u16 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SlotPicker<'a> {
    slots: &'a [TimeSlot],
}

impl<'a> SlotPicker<'a> {
    pub(crate) fn new(slots: &'a [TimeSlot]) -> Self {
        SlotPicker { slots }
    }
}

impl StatefulWidget for SlotPicker<'_> {
    type State = SlotPickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let lines = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let style = if i == state.index {
                    ACTIVE_ITEM_STYLE
                } else {
                    BASE_STYLE
                };
                Line::styled(slot.to_string(), style)
            })
            .collect::<Vec<_>>();
        let text = Text::from(lines).centered();
        let title = " Time Slot ";
        let inner_width = u16::try_from(text.width().max(title.len()))
            .unwrap_or(u16::MAX)
            .saturating_add(SLOT_PADDING * 2);
        // Outer margin + border on each side
        let width = inner_width.saturating_add(4).min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.height);
        let [outer_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [outer_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center);
        let text_area = block.inner(block_area);
        block.render(block_area, buf);
        text.render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SlotPickerState {
    index: usize,
    len: usize,
}

impl SlotPickerState {
    /// Start a picker over `len` slots with the cursor on `current`, if any
    pub(crate) fn new(len: usize, current: Option<usize>) -> SlotPickerState {
        SlotPickerState {
            index: current.filter(|&i| i < len).unwrap_or_default(),
            len,
        }
    }

    pub(crate) fn handle_input(&mut self, input: SlotInput) -> SlotOutput {
        match input {
            SlotInput::Up if self.index > 0 => {
                self.index -= 1;
                SlotOutput::Ok
            }
            SlotInput::Down if self.index + 1 < self.len => {
                self.index += 1;
                SlotOutput::Ok
            }
            SlotInput::Enter if self.index < self.len => SlotOutput::Choose(self.index),
            _ => SlotOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SlotInput {
    Up,
    Down,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SlotOutput {
    Ok,
    Invalid,
    Choose(usize),
}
