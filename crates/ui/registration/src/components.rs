use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::{Rect, Size};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    core::FormSnapshot,
    style::Theme,
    tui::{Event, EventResponse, Frame},
};

pub mod registration;

/// A visual and interactive element of the UI.
///
/// Components never own form state. They receive the current `FormSnapshot`
/// for every event and every frame, and express user intent as `Action`s.
pub trait Component {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        let _ = tx;
        Ok(())
    }

    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        let _ = theme;
        Ok(())
    }

    fn init(&mut self, _area: Size) -> Result<()> {
        Ok(())
    }

    fn handle_events(
        &mut self,
        event: Event,
        snapshot: &FormSnapshot,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, snapshot)?,
            Event::Mouse(mouse_event) => self.handle_mouse_events(mouse_event, snapshot)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _snapshot: &FormSnapshot,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_mouse_events(
        &mut self,
        _mouse: MouseEvent,
        _snapshot: &FormSnapshot,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, snapshot: &FormSnapshot) -> Result<()>;
}
