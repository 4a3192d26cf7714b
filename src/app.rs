// /app.rs
use crate::context::Context;
use crate::tui::{Tui, TuiEvent};
use crate::ui::{Component, ComponentEnum, RosterView, spinner::Spinner};
use crate::{
    error::{GatewayError, Result},
    gateway::{HttpGateway, RosterGateway},
    ruleset::Ruleset,
    settings::Settings,
    store::{LoadTicket, Store},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use tokio::sync::mpsc;

pub enum Action {
    Quit,
    SwitchComponent(ComponentEnum),
    Load,
    Save,
    Loaded(LoadTicket, Result<Vec<Value>, GatewayError>),
    Saved(Result<(), GatewayError>),
}

pub struct App {
    running: bool,
    component: ComponentEnum,

    settings: Settings,
    store: Store,
    gateway: HttpGateway,

    spinner: Spinner,

    action_sender: mpsc::UnboundedSender<Action>,
    action_receiver: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: Settings, ruleset: Ruleset) -> Result<Self> {
        let (action_sender, action_receiver) = mpsc::unbounded_channel();
        let gateway = HttpGateway::from_settings(&settings)?;

        Ok(Self {
            running: true,
            component: ComponentEnum::from(RosterView::new()),
            settings,
            store: Store::new(ruleset),
            gateway,
            spinner: Spinner::new(),
            action_sender,
            action_receiver,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(8.0) // spinner speed
            .frame_rate(30.0);

        tui.enter()?;
        self.handle_action(Action::Load);

        while self.running {
            tui.draw(|frame| {
                let context = Context {
                    store: &mut self.store,
                    settings: &self.settings,
                    spinner: &self.spinner,
                };
                self.component
                    .render(frame.area(), frame.buffer_mut(), &context)
            })?;

            tokio::select! {
                event = tui.next() => match event {
                    Some(event) => self.handle_tui_event(event),
                    None => self.running = false,
                },
                Some(action) = self.action_receiver.recv() => self.handle_action(action),
            }
        }

        tui.exit()?;
        log::info!("Character Forge exit: {}", chrono::Local::now());
        Ok(())
    }

    fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) => self.on_key(key_event),
            TuiEvent::Tick => {
                if self.store.is_busy() {
                    self.spinner.next_frame();
                }
            }
            TuiEvent::Error => log::warn!("Failed to read a terminal event"),
            TuiEvent::Init | TuiEvent::Render | TuiEvent::Resize(_, _) => {}
        }
    }

    pub fn on_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.handle_action(Action::Quit);
            return;
        }

        let mut context = Context {
            store: &mut self.store,
            settings: &self.settings,
            spinner: &self.spinner,
        };
        if let Some(action) = self.component.on_key(key_event, &mut context) {
            self.handle_action(action)
        };
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchComponent(component) => self.component = component,
            Action::Load => self.spawn_load(),
            Action::Save => self.spawn_save(),
            Action::Loaded(ticket, fetched) => {
                // Failures are already logged and surfaced through the store status.
                let _ = self.store.finish_load(ticket, fetched);
            }
            Action::Saved(result) => {
                let _ = self.store.finish_save(result);
            }
        }
    }

    fn spawn_load(&mut self) {
        let ticket = self.store.begin_load();
        let gateway = self.gateway.clone();
        let sender = self.action_sender.clone();
        log::info!("Loading roster from {}", gateway.url());
        tokio::spawn(async move {
            let fetched = gateway.fetch().await;
            if sender.send(Action::Loaded(ticket, fetched)).is_err() {
                log::debug!("App closed before the roster load finished");
            }
        });
    }

    // Every save is sent in trigger order; overlapping saves are neither
    // cancelled nor merged.
    fn spawn_save(&mut self) {
        let snapshot = self.store.begin_save();
        let gateway = self.gateway.clone();
        let sender = self.action_sender.clone();
        log::info!("Saving {} characters to {}", snapshot.len(), gateway.url());
        tokio::spawn(async move {
            let result = gateway.push(&snapshot).await;
            if sender.send(Action::Saved(result)).is_err() {
                log::debug!("App closed before the roster save finished");
            }
        });
    }
}
