//! # Application Controller
//!
//! Owns one lookup session and drives it: the bulk load on start-up, then a loop
//! that maps key presses to command events, applies them to the session state,
//! collects finished background lookups and hands every resulting view event to
//! the renderer.

use crate::config::AppConfig;
use crate::repl::{
    commands::{CommandContext, CommandRegistry},
    events::{CommandEvent, ViewEvent},
    io::{EventStream, RenderStream},
    models::{DatasetCache, SessionState},
    services::{CountryClient, LookupResponse, Services},
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use std::time::Duration;

/// How long one loop iteration waits for input before checking lookups
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs a session between an input stream and a renderer
pub struct AppController<ES: EventStream, RS: RenderStream> {
    session: SessionState,
    cache: DatasetCache,
    services: Services,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller with injected I/O streams
    pub fn with_io_streams(config: &AppConfig, event_stream: ES, render_stream: RS) -> Result<Self> {
        let client = CountryClient::new(&config.base_url, config.user_agent.as_deref())?;
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        Ok(Self {
            session: SessionState::new(),
            cache: DatasetCache::new(),
            services: Services::new(client),
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the session until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;

        let outcome = self.event_loop().await;
        if let Err(e) = &outcome {
            tracing::error!("Session ended with error: {e:#}");
        }

        self.view_renderer.cleanup()?;
        outcome
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.load_dataset().await?;

        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) => self.process_key_event(key_event)?,
                    Event::Resize(width, height) => {
                        self.view_renderer.update_size(width, height);
                        self.view_renderer.render_full()?;
                    }
                    _ => {}
                }
            }

            self.collect_lookup_responses()?;
        }

        tracing::info!("Session closed");
        Ok(())
    }

    /// Bulk-load the dataset. A failed load is shown to the user and the session
    /// continues with an empty cache.
    pub async fn load_dataset(&mut self) -> Result<()> {
        let events = self.session.begin_loading();
        self.render(&events)?;

        let outcome = self.cache.load(self.services.client()).await;
        let events = self.session.finish_loading(outcome);
        self.render(&events)
    }

    /// Map one key press to command events and apply them
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::new(self.session.snapshot());
        let events = self.command_registry.process_event(key_event, &context)?;

        for event in events {
            self.apply_command_event(event)?;
        }
        Ok(())
    }

    fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        if !self.session.phase().accepts_input() && event != CommandEvent::QuitRequested {
            tracing::debug!("Ignoring {:?} during {:?}", event, self.session.phase());
            return Ok(());
        }

        let view_events = match event {
            CommandEvent::QueryEdited { text } => {
                self.session
                    .input_changed(text, &self.cache, &self.services.suggestions)
            }
            CommandEvent::SuggestionHighlightMoved { delta } => self.session.move_highlight(delta),
            CommandEvent::SuggestionAccepted { index } => self.session.accept_suggestion(index),
            CommandEvent::SearchRequested => {
                let (ticket, events) = self.session.begin_search();
                if let Some(ticket) = ticket {
                    self.services
                        .detail
                        .execute_async(ticket.name, ticket.generation);
                }
                events
            }
            CommandEvent::ListRequested => self.session.list(&self.cache),
            CommandEvent::PageRequested { page } => self.session.select_page(page),
            CommandEvent::PageStepRequested { delta } => self.session.step_page(delta),
            CommandEvent::ClearRequested => self.session.clear(),
            CommandEvent::QuitRequested => {
                self.should_quit = true;
                Vec::new()
            }
            CommandEvent::NoAction => Vec::new(),
        };

        self.render(&view_events)
    }

    /// Apply every lookup that has already finished
    pub fn collect_lookup_responses(&mut self) -> Result<()> {
        while let Some(response) = self.services.detail.poll_response() {
            self.complete_lookup(response)?;
        }
        Ok(())
    }

    /// Wait for every lookup still in flight and apply it
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(response) = self.services.detail.next_response().await {
            self.complete_lookup(response)?;
        }
        Ok(())
    }

    fn complete_lookup(&mut self, response: LookupResponse) -> Result<()> {
        tracing::debug!(
            "Lookup #{} for '{}' finished in {} ms",
            response.generation,
            response.query,
            response.duration_ms
        );
        let events = self.session.complete_search(response);
        self.render(&events)
    }

    fn render(&mut self, events: &[ViewEvent]) -> Result<()> {
        for event in events {
            self.view_renderer.handle_view_event(event)?;
        }
        Ok(())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Check if the application should quit (for testing)
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
