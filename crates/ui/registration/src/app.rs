use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{Component, registration::RegistrationComponent},
    config::Config,
    core::{FormController, effects::Effect, executor::SubmissionExecutor, intent::Intent},
    domain::ZxcvbnEstimator,
    services::submission::SubmissionClient,
    style::Theme,
    tui::{Event, Tui},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    controller: FormController,
    form: RegistrationComponent,
    should_quit: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(
        config: Config,
        client: SubmissionClient,
        tick_rate: f64,
        frame_rate: f64,
    ) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Ok(Self {
            config,
            tick_rate,
            frame_rate,
            controller: FormController::new(client),
            form: RegistrationComponent::new(Arc::new(ZxcvbnEstimator)),
            should_quit: false,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let executor =
            SubmissionExecutor::new(self.controller.client().clone(), self.action_tx.clone());

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        self.form.register_action_handler(self.action_tx.clone())?;
        self.form.register_theme(Theme::by_name(&self.config.theme))?;
        self.form.init(tui.size()?)?;
        info!(mode = %self.config.mode, "registration form ready");
        let _ = self.action_tx.send(Action::ClearScreen);
        let _ = self.action_tx.send(Action::Render);

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui, &executor)?;
            if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Quit => action_tx.send(Action::Quit)?,
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::Key(key) if is_quit(&key) => {
                action_tx.send(Action::Quit)?;
                return Ok(());
            }
            _ => {}
        }
        if let Some(response) = self.form.handle_events(event, self.controller.state())? {
            action_tx.send(response.into_inner())?;
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui, executor: &SubmissionExecutor) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                // nur der Variantenname, niemals Feldwerte
                debug!("{action}");
            }
            match &action {
                Action::Tick => {}
                Action::Quit => self.should_quit = true,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, *w, *h)?,
                Action::Render => self.render(tui)?,
                Action::Error(msg) => error!("{msg}"),
                other => {
                    if let Some(intent) = Intent::from_action(other) {
                        self.apply(intent, executor);
                    }
                }
            }
            if let Some(follow_up) = self.form.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, intent: Intent, executor: &SubmissionExecutor) {
        for effect in self.controller.dispatch(intent) {
            if let Effect::Submit(record) = effect {
                let id = executor.spawn(record);
                debug!("scheduled submission task {id}");
            }
        }
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        let snapshot = self.controller.state();
        let form = &mut self.form;
        tui.draw(|frame| {
            if let Err(err) = form.draw(frame, frame.area(), snapshot) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", err)));
            }
        })?;
        Ok(())
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}
