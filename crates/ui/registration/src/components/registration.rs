use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler as _;

use super::Component;
use crate::{
    action::Action,
    core::{FormSnapshot, SubmissionOutcome},
    domain::{Field, StrengthEstimator, StrengthIndicator, ZxcvbnEstimator},
    style::{Role, Theme},
    tui::{EventResponse, Frame},
};

pub const TITLE: &str = "Create Your Account";
pub const SUBMIT_LABEL: &str = "[ Register ]";
pub const PENDING_LABEL: &str = "Submitting…";
pub const SUCCESS_TITLE: &str = "Registration successful!";
pub const BACK_LABEL: &str = "← Back";

const COLUMN_WIDTH: u16 = 50;
const INPUT_WIDTH: u16 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input(Field),
    Register,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Input(Field::Name),
        Focus::Input(Field::Email),
        Focus::Input(Field::Password),
        Focus::Input(Field::ConfirmPassword),
        Focus::Register,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

fn slot(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Email => 1,
        Field::Password => 2,
        Field::ConfirmPassword => 3,
    }
}

/// The registration form and its success view.
pub struct RegistrationComponent {
    theme: Theme,
    estimator: Arc<dyn StrengthEstimator>,
    inputs: [Input; 4],
    focus: Focus,
    // zuletzt bewertetes Passwort + Ergebnis
    strength: Option<(String, Option<StrengthIndicator>)>,
}

impl Default for RegistrationComponent {
    fn default() -> Self {
        Self::new(Arc::new(ZxcvbnEstimator))
    }
}

impl RegistrationComponent {
    pub fn new(estimator: Arc<dyn StrengthEstimator>) -> Self {
        Self {
            theme: Theme::default(),
            estimator,
            inputs: Default::default(),
            focus: Focus::Input(Field::Name),
            strength: None,
        }
    }

    fn input(&self, field: Field) -> &Input {
        &self.inputs[slot(field)]
    }

    /// Bring the inputs in line with the snapshot (after reset or success).
    fn sync_inputs(&mut self, snapshot: &FormSnapshot) {
        for field in Field::ALL {
            let value = snapshot.value(field);
            if self.inputs[slot(field)].value() != value {
                self.inputs[slot(field)] = Input::new(value.to_string());
            }
        }
    }

    fn indicator(&mut self, password: &str) -> Option<StrengthIndicator> {
        match &self.strength {
            Some((seen, indicator)) if seen == password => indicator.clone(),
            _ => {
                let indicator =
                    StrengthIndicator::from_assessment(&self.estimator.estimate(password));
                self.strength = Some((password.to_string(), indicator.clone()));
                indicator
            }
        }
    }

    fn handle_success_keys(&mut self, key: KeyEvent) -> Option<EventResponse<Action>> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(EventResponse::Stop(Action::Back)),
            _ => None,
        }
    }
}

impl Component for RegistrationComponent {
    fn register_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        snapshot: &FormSnapshot,
    ) -> Result<Option<EventResponse<Action>>> {
        if snapshot.outcome.is_success() {
            return Ok(self.handle_success_keys(key));
        }
        self.sync_inputs(snapshot);

        let response = match key.code {
            KeyCode::Tab | KeyCode::Down => Some(EventResponse::Stop(Action::FocusNext)),
            KeyCode::BackTab | KeyCode::Up => Some(EventResponse::Stop(Action::FocusPrev)),
            KeyCode::Enter => Some(EventResponse::Stop(Action::Submit)),
            _ => match self.focus {
                Focus::Input(field) => {
                    let input = &mut self.inputs[slot(field)];
                    let before = input.value().to_string();
                    input.handle_event(&crossterm::event::Event::Key(key));
                    if input.value() != before {
                        Some(EventResponse::Continue(Action::UpdateField(
                            field,
                            input.value().to_string(),
                        )))
                    } else {
                        None
                    }
                }
                Focus::Register => None,
            },
        };
        Ok(response)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::Back | Action::SubmissionSucceeded => {
                self.focus = Focus::Input(Field::Name);
                self.strength = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, snapshot: &FormSnapshot) -> Result<()> {
        let bg = Block::default().style(Style::default().bg(self.theme.roles.background));
        frame.render_widget(bg, area);

        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(COLUMN_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        if snapshot.outcome.is_success() {
            self.render_success(frame, column);
            return Ok(());
        }

        self.sync_inputs(snapshot);

        let width = column.width;
        let error_rows = |field: Field| {
            snapshot
                .error(field)
                .map_or(1, |err| wrapped_height(&err.to_string(), width).max(1))
        };
        let pw = snapshot.value(Field::Password).to_string();
        let indicator = self.indicator(&pw);
        let strength_rows = indicator
            .as_ref()
            .map_or(1, |i| 1 + wrapped_height(&i.guidance, width));
        let (status_text, status_role) = status_line(&snapshot.outcome);
        let status_rows = wrapped_height(status_text, width).max(1);

        let [
            _,
            title,
            _,
            name,
            name_err,
            email,
            email_err,
            password,
            password_err,
            strength,
            confirm,
            confirm_err,
            _,
            button,
            status,
            hint,
            _,
        ] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1), // Titel
            Constraint::Length(1),
            Constraint::Length(3), // Name
            Constraint::Length(error_rows(Field::Name)),
            Constraint::Length(3), // Email
            Constraint::Length(error_rows(Field::Email)),
            Constraint::Length(3), // Password
            Constraint::Length(error_rows(Field::Password)),
            Constraint::Length(strength_rows),
            Constraint::Length(3), // Confirm
            Constraint::Length(error_rows(Field::ConfirmPassword)),
            Constraint::Length(1),
            Constraint::Length(1), // Register
            Constraint::Length(status_rows),
            Constraint::Length(1), // Hinweise
            Constraint::Fill(1),
        ])
        .areas(column);

        frame.render_widget(
            Paragraph::new(TITLE).centered().style(
                self.theme
                    .style(Role::Primary)
                    .add_modifier(Modifier::BOLD),
            ),
            title,
        );

        for (field, input_area, error_area) in [
            (Field::Name, name, name_err),
            (Field::Email, email, email_err),
            (Field::Password, password, password_err),
            (Field::ConfirmPassword, confirm, confirm_err),
        ] {
            self.render_input(frame, input_area, field, snapshot);
            self.render_field_error(frame, error_area, field, snapshot);
        }

        if let Some(indicator) = &indicator {
            self.render_strength(frame, strength, indicator);
        }

        self.render_button(frame, button, snapshot);
        frame.render_widget(
            Paragraph::new(status_text)
                .centered()
                .wrap(Wrap { trim: true })
                .style(self.theme.style(status_role)),
            status,
        );
        frame.render_widget(
            Paragraph::new("Tab next · Shift+Tab back · Enter register · Ctrl+C quit")
                .centered()
                .style(self.theme.style(Role::Muted)),
            hint,
        );
        Ok(())
    }
}

impl RegistrationComponent {
    fn render_input(&self, frame: &mut Frame, area: Rect, field: Field, snapshot: &FormSnapshot) {
        let [_, area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(INPUT_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        let focused = self.focus == Focus::Input(field);
        let input = self.input(field);
        // 2 für den Rahmen, 1 für den Cursor
        let width = area.width.max(3) - 3;
        let (cursor, scroll) = cursor_and_scroll(input, field.is_secret(), width as usize);

        let title_style = if focused {
            self.theme.style(Role::Primary).add_modifier(Modifier::BOLD)
        } else {
            self.theme.style(Role::SubtleText)
        };
        let border_style = if focused {
            self.theme.style(Role::Primary)
        } else if snapshot.error(field).is_some() {
            self.theme.style(Role::Danger)
        } else {
            self.theme.style(Role::Muted)
        };
        let text = if field.is_secret() {
            input.value().chars().map(|_| '•').collect()
        } else {
            input.value().to_string()
        };

        let widget = Paragraph::new(text)
            .scroll((0, scroll as u16))
            .style(self.theme.style(Role::Text))
            .block(
                Block::bordered()
                    .title(field.label())
                    .title_style(title_style)
                    .border_set(border::ROUNDED)
                    .border_style(border_style),
            );
        frame.render_widget(widget, area);

        if focused {
            let x = cursor.max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1));
        }
    }

    fn render_field_error(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: Field,
        snapshot: &FormSnapshot,
    ) {
        if let Some(err) = snapshot.error(field) {
            frame.render_widget(
                Paragraph::new(err.to_string())
                    .centered()
                    .wrap(Wrap { trim: true })
                    .style(self.theme.style(Role::Danger)),
                area,
            );
        }
    }

    fn render_strength(&self, frame: &mut Frame, area: Rect, indicator: &StrengthIndicator) {
        let [headline, guidance] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        let marker = Style::default().fg(indicator.label.color(&self.theme.roles));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("● ", marker),
                Span::styled(indicator.headline(), self.theme.style(Role::Text)),
            ]))
            .centered(),
            headline,
        );
        if !indicator.guidance.is_empty() {
            frame.render_widget(
                Paragraph::new(indicator.guidance.as_str())
                    .centered()
                    .wrap(Wrap { trim: true })
                    .style(self.theme.style(Role::SubtleText)),
                guidance,
            );
        }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect, snapshot: &FormSnapshot) {
        // Enter bleibt aktiv, damit ungültige Felder ihre Fehler zeigen
        let role = if snapshot.outcome.is_pending() || !snapshot.is_submittable() {
            Role::Muted
        } else {
            Role::Primary
        };
        let mut style = self.theme.style(role);
        if self.focus == Focus::Register {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        frame.render_widget(Paragraph::new(SUBMIT_LABEL).centered().style(style), area);
    }

    fn render_success(&self, frame: &mut Frame, column: Rect) {
        let [_, title, _, back, hint, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(column);

        frame.render_widget(
            Paragraph::new(SUCCESS_TITLE).centered().style(
                self.theme
                    .style(Role::Success)
                    .add_modifier(Modifier::BOLD),
            ),
            title,
        );
        frame.render_widget(
            Paragraph::new(BACK_LABEL).centered().style(
                self.theme
                    .style(Role::Primary)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            back,
        );
        frame.render_widget(
            Paragraph::new("Enter/Esc back · Ctrl+C quit")
                .centered()
                .style(self.theme.style(Role::Muted)),
            hint,
        );
    }
}

/// Rows `text` occupies when wrapped to `width` (0 for empty text).
fn wrapped_height(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    let lines = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .line_count(width);
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn status_line(outcome: &SubmissionOutcome) -> (&str, Role) {
    match outcome {
        SubmissionOutcome::Pending => (PENDING_LABEL, Role::Info),
        SubmissionOutcome::Error(msg) => (msg.as_str(), Role::Danger),
        _ => ("", Role::SubtleText),
    }
}

/// Cursor column and horizontal scroll of `input`.
///
/// Masked fields draw one `•` per char, so their positions count chars
/// instead of display width.
fn cursor_and_scroll(input: &Input, masked: bool, width: usize) -> (usize, usize) {
    if masked {
        let cursor = input.cursor();
        (cursor, cursor.saturating_sub(width))
    } else {
        (input.visual_cursor(), input.visual_scroll(width))
    }
}
