//! Search suggestion controller
//!
//! Ties together keystroke coalescing, single-flight fetching, the keyboard
//! cursor and dropdown visibility for one input/dropdown pair.
//!
//! The controller is single-threaded and event driven. The host feeds it UI
//! events directly and forwards [`Wakeup`]s from the channel returned by
//! [`Controller::attach`]; timers and network calls run as tokio tasks that
//! only ever talk back through that channel, so all state changes happen on
//! the host's event loop.

mod coalescer;
mod events;
mod list_state;
mod scheduler;

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::AutocompleteConfig;
use crate::error::FetchError;
use crate::fetch::{SuggestionFetcher, SuggestionRequest};
use crate::suggestion::{Suggestion, SuggestionSet};
use crate::timer::TimerSlot;
use crate::view::DropdownView;

pub use coalescer::QueryCoalescer;
pub use events::{Key, KeyOutcome, UiEvent, Wakeup};
pub use list_state::SuggestionListState;
pub use scheduler::{Completion, CycleToken, Dispatch, RequestScheduler};

pub struct Controller<V: DropdownView> {
    config: AutocompleteConfig,
    view: V,
    fetcher: Arc<dyn SuggestionFetcher>,
    wakeups: UnboundedSender<Wakeup>,
    coalescer: QueryCoalescer,
    scheduler: RequestScheduler,
    list: SuggestionListState,
    blur_grace: TimerSlot,
    /// Set when attachment failed or after detach; all events are ignored
    inert: bool,
}

impl<V: DropdownView> Controller<V> {
    /// Attach to a view
    ///
    /// Never fails: a view reporting missing attachment points is logged and
    /// the controller stays inert. Returns the receiver the host must pump
    /// into [`Controller::on_wakeup`].
    pub fn attach(
        config: AutocompleteConfig,
        view: V,
        fetcher: Arc<dyn SuggestionFetcher>,
    ) -> (Self, UnboundedReceiver<Wakeup>) {
        let (wakeups, wakeup_rx) = mpsc::unbounded_channel();

        let inert = match view.attachment() {
            Ok(()) => false,
            Err(e) => {
                log::error!("[search-suggest] {}", e);
                true
            }
        };

        let controller = Self {
            coalescer: QueryCoalescer::new(config.delay()),
            config,
            view,
            fetcher,
            wakeups,
            scheduler: RequestScheduler::new(),
            list: SuggestionListState::new(),
            blur_grace: TimerSlot::new(),
            inert,
        };
        (controller, wakeup_rx)
    }

    /// Dispatch a UI event to its handler
    pub fn handle(&mut self, event: UiEvent) -> KeyOutcome {
        match event {
            UiEvent::InputKeyUp { key, value } => {
                self.on_input_key_up(key, &value);
                KeyOutcome::Ignored
            }
            UiEvent::InputKeyDown { key } => self.on_input_key_down(key),
            UiEvent::InputBlur => {
                self.on_blur();
                KeyOutcome::Ignored
            }
            UiEvent::InputFocus | UiEvent::DropdownFocus => {
                self.on_focus();
                KeyOutcome::Ignored
            }
            UiEvent::DropdownKeyDown { key } => self.on_dropdown_key_down(key),
        }
    }

    pub fn on_input_key_up(&mut self, key: Key, value: &str) {
        if self.inert {
            return;
        }
        self.coalescer
            .on_keystroke(key, value, &mut self.scheduler, &self.wakeups);
    }

    pub fn on_input_key_down(&mut self, key: Key) -> KeyOutcome {
        if self.inert {
            return KeyOutcome::Ignored;
        }

        match key {
            Key::ArrowDown => {
                self.cycle(1);
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.cycle(-1);
                KeyOutcome::Handled
            }
            Key::Enter if self.list.position() != 0 => {
                self.pick_active();
                KeyOutcome::Handled
            }
            Key::Escape => {
                self.on_input_escape();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn on_dropdown_key_down(&mut self, key: Key) -> KeyOutcome {
        if self.inert || key != Key::Escape {
            return KeyOutcome::Ignored;
        }
        self.on_dropdown_key_escape();
        KeyOutcome::Handled
    }

    /// Escape in the input: drop everything
    pub fn on_input_escape(&mut self) {
        self.coalescer.cancel();
        self.dismiss();
    }

    /// Escape on a dropdown row: drop everything and hand focus back to the input
    pub fn on_dropdown_key_escape(&mut self) {
        self.on_input_escape();
        self.view.focus_input();
    }

    /// Input lost focus
    ///
    /// The hide decision waits for the grace delay, since a pointer press on
    /// a dropdown row blurs the input before focus lands on the row.
    pub fn on_blur(&mut self) {
        if self.inert {
            return;
        }
        self.coalescer.cancel();
        self.blur_grace
            .schedule(self.config.blur_grace(), &self.wakeups, Wakeup::BlurGrace);
    }

    /// Focus returned to the input or moved into the dropdown
    pub fn on_focus(&mut self) {
        if self.blur_grace.cancel() {
            log::debug!("Focus regained within grace period");
        }
    }

    /// Feed back a timer firing or a finished request
    pub fn on_wakeup(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::Debounce(token) => {
                if self.coalescer.fire(token) && !self.inert {
                    self.drain();
                }
            }
            Wakeup::BlurGrace(token) => {
                if !self.blur_grace.fire(token) || self.inert {
                    return;
                }
                if self.view.focus_within() {
                    log::debug!("Blur was transient, keeping suggestions");
                } else {
                    self.dismiss();
                }
            }
            Wakeup::Fetched {
                cycle,
                query,
                outcome,
            } => self.on_fetched(cycle, &query, outcome),
        }
    }

    /// Start the next request if none is in flight
    pub fn drain(&mut self) {
        let Some(dispatch) = self.scheduler.drain() else {
            return;
        };

        self.view.set_pending(true);
        let request = SuggestionRequest {
            q: dispatch.query.clone(),
            fq: self.config.fq.clone(),
            locale: self.config.locale.clone(),
        };
        log::debug!("Requesting suggestions for {:?}", request.q);

        let fetch = self.fetcher.fetch(request);
        let timeout = self.config.request_timeout();
        let wakeups = self.wakeups.clone();
        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, fetch).await {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Timeout(timeout)),
            };
            let _ = wakeups.send(Wakeup::Fetched {
                cycle: dispatch.cycle,
                query: dispatch.query,
                outcome,
            });
        });
    }

    fn on_fetched(
        &mut self,
        cycle: CycleToken,
        query: &str,
        outcome: Result<SuggestionSet, FetchError>,
    ) {
        let completion = self.scheduler.complete(cycle);
        self.view.set_pending(false);

        match outcome {
            Ok(set) if completion == Completion::Fresh && !self.inert => {
                self.list.rebuild(set, query, &mut self.view);
            }
            Ok(_) => log::debug!("Dropping stale suggestions for {:?}", query),
            Err(e) => log::error!("Suggestion request for {:?} failed: {}", query, e),
        }

        if !self.inert {
            self.drain();
        }
    }

    /// Move the keyboard cursor
    pub fn cycle(&mut self, step: isize) {
        self.list.cycle(step, &mut self.view);
    }

    /// Navigate to the suggestion under the cursor, if any
    pub fn pick_active(&mut self) {
        if let Some(suggestion) = self.list.pick_active() {
            log::info!("Following {}", suggestion.href);
            self.view.navigate(&suggestion.href);
        }
    }

    /// Navigate to a row by flat index, as when a row is clicked
    pub fn follow_row(&mut self, index: usize) {
        match self.list.suggestions().get(index) {
            Some(suggestion) => {
                log::info!("Following {}", suggestion.href);
                self.view.navigate(&suggestion.href);
            }
            None => log::error!(
                "Row {} is out of bounds for {} suggestions",
                index,
                self.list.len()
            ),
        }
    }

    /// Hide and clear the dropdown; late responses for this cycle are dropped
    fn dismiss(&mut self) {
        self.scheduler.invalidate();
        self.list.reset(&mut self.view);
    }

    /// Tear down: cancel timers, drop in-flight results, clear the dropdown
    pub fn detach(&mut self) {
        self.coalescer.cancel();
        self.blur_grace.cancel();
        self.dismiss();
        self.inert = true;
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn active_position(&self) -> usize {
        self.list.position()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.list.suggestions()
    }

    pub fn pending_queries(&self) -> &[String] {
        self.scheduler.pending()
    }

    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy()
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
