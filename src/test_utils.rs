#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use futures::FutureExt;
    use futures::future::BoxFuture;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::Instant;

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use reqwest::Url;

    use crate::app::App;
    use crate::config::{AutocompleteConfig, Config};
    use crate::controller::{Controller, Key, KeyOutcome, UiEvent, Wakeup};
    use crate::error::FetchError;
    use crate::fetch::{SuggestionFetcher, SuggestionRequest};
    use crate::suggestion::{SectionKind, Suggestion, SuggestionSet};
    use crate::view::DropdownModel;

    pub const LATENCY: Duration = Duration::from_millis(50);

    /// The two-row result used throughout the controller tests
    pub fn climate_set() -> SuggestionSet {
        SuggestionSet::from_sections(vec![
            (
                SectionKind::Datasets,
                vec![Suggestion::new("Climate data", "/d1")],
            ),
            (
                SectionKind::Categories,
                vec![Suggestion::new("Climate", "/c1").with_kind("tag")],
            ),
        ])
    }

    struct Script {
        latency: Duration,
        outcome: Result<SuggestionSet, FetchError>,
    }

    /// Fetcher answering from a per-query script after a simulated latency
    ///
    /// Unscripted queries succeed with an empty set.
    pub struct ScriptedFetcher {
        latency: Duration,
        scripts: Mutex<HashMap<String, Script>>,
        requests: Mutex<Vec<SuggestionRequest>>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
    }

    /// Decrements the in-flight counter even if the fetch future is dropped
    struct InFlightGuard(Arc<AtomicUsize>);

    impl Drop for InFlightGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl ScriptedFetcher {
        pub fn new(latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                latency,
                scripts: Mutex::new(HashMap::new()),
                requests: Mutex::new(Vec::new()),
                in_flight: Arc::new(AtomicUsize::new(0)),
                max_in_flight: Arc::new(AtomicUsize::new(0)),
            })
        }

        pub fn respond(&self, query: &str, outcome: Result<SuggestionSet, FetchError>) {
            self.respond_after(query, self.latency, outcome);
        }

        pub fn respond_after(
            &self,
            query: &str,
            latency: Duration,
            outcome: Result<SuggestionSet, FetchError>,
        ) {
            self.scripts
                .lock()
                .unwrap()
                .insert(query.to_string(), Script { latency, outcome });
        }

        /// Queries in dispatch order
        pub fn queries(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.q.clone())
                .collect()
        }

        pub fn requests(&self) -> Vec<SuggestionRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    impl SuggestionFetcher for ScriptedFetcher {
        fn fetch(
            &self,
            request: SuggestionRequest,
        ) -> BoxFuture<'static, Result<SuggestionSet, FetchError>> {
            let (latency, outcome) = match self.scripts.lock().unwrap().get(&request.q) {
                Some(script) => (script.latency, script.outcome.clone()),
                None => (self.latency, Ok(SuggestionSet::new())),
            };
            self.requests.lock().unwrap().push(request);

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let guard = InFlightGuard(Arc::clone(&self.in_flight));

            async move {
                let _guard = guard;
                tokio::time::sleep(latency).await;
                outcome
            }
            .boxed()
        }
    }

    /// Controller over an in-memory view, driven on a paused tokio clock
    pub struct Harness {
        pub controller: Controller<DropdownModel>,
        pub wakeups: UnboundedReceiver<Wakeup>,
        pub fetcher: Arc<ScriptedFetcher>,
    }

    impl Harness {
        pub fn new(fetcher: Arc<ScriptedFetcher>) -> Self {
            Self::with_config(AutocompleteConfig::default(), fetcher)
        }

        pub fn with_config(config: AutocompleteConfig, fetcher: Arc<ScriptedFetcher>) -> Self {
            let (controller, wakeups) =
                Controller::attach(config, DropdownModel::new(), fetcher.clone());
            Self {
                controller,
                wakeups,
                fetcher,
            }
        }

        /// Key-up in the input after typing so the input reads `value`
        pub fn type_value(&mut self, value: &str) {
            let key = value.chars().last().map(Key::Char).unwrap_or(Key::Backspace);
            self.controller.handle(UiEvent::InputKeyUp {
                key,
                value: value.to_string(),
            });
        }

        pub fn key_down(&mut self, key: Key) -> KeyOutcome {
            self.controller.handle(UiEvent::InputKeyDown { key })
        }

        pub fn view(&self) -> &DropdownModel {
            self.controller.view()
        }

        /// Let `duration` of virtual time pass, delivering wakeups as they arrive
        pub async fn run_for(&mut self, duration: Duration) {
            let deadline = Instant::now() + duration;
            loop {
                tokio::select! {
                    biased;
                    Some(wakeup) = self.wakeups.recv() => self.controller.on_wakeup(wakeup),
                    _ = tokio::time::sleep_until(deadline) => break,
                }
            }
        }

        pub async fn run_ms(&mut self, millis: u64) {
            self.run_for(Duration::from_millis(millis)).await;
        }
    }

    pub const TEST_SITE: &str = "https://demo.ckan.org/";

    /// Terminal host over a scripted fetcher, driven on a paused tokio clock
    pub struct AppHarness {
        pub app: App,
        pub wakeups: UnboundedReceiver<Wakeup>,
        pub fetcher: Arc<ScriptedFetcher>,
    }

    impl AppHarness {
        pub fn new(fetcher: Arc<ScriptedFetcher>) -> Self {
            let site = Url::parse(TEST_SITE).unwrap();
            let (app, wakeups) = App::new(&Config::default(), site, fetcher.clone());
            Self {
                app,
                wakeups,
                fetcher,
            }
        }

        pub fn press(&mut self, code: KeyCode) {
            self.press_with(code, KeyModifiers::NONE);
        }

        pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            self.app
                .handle_terminal_event(Event::Key(KeyEvent::new(code, modifiers)));
        }

        pub fn type_str(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c));
            }
        }

        pub async fn run_ms(&mut self, millis: u64) {
            let deadline = Instant::now() + Duration::from_millis(millis);
            loop {
                tokio::select! {
                    biased;
                    Some(wakeup) = self.wakeups.recv() => self.app.on_wakeup(wakeup),
                    _ = tokio::time::sleep_until(deadline) => break,
                }
            }
        }
    }

    /// Draw the app on a test terminal and return the buffer as text
    pub fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal.backend().to_string()
    }
}
