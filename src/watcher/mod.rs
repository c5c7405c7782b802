//! Toggle enhancement watcher
//!
//! A process-wide service that keeps visibility-toggle behavior bound across
//! a mutating document tree. Started once at boot; every structural mutation
//! batch triggers a re-scan of the current tree, and binding is idempotent,
//! so late-inserted elements are picked up without re-registration and no
//! element is ever bound twice. Only one watcher may observe a given subtree;
//! overlapping observers would race to bind the same elements.

use crate::consts::toggle;
use crate::dom::{Document, InputType, NodeId, Selector};
use crate::logging::LogLevel;
use crate::reporter::{ErrorReporter, ReportPhase};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub struct ToggleWatcher {
    document: Arc<Mutex<Document>>,
    selector: Selector,
    reporter: ErrorReporter,
    started: AtomicBool,
}

impl ToggleWatcher {
    pub fn new(document: Arc<Mutex<Document>>, selector: Selector, reporter: ErrorReporter) -> Self {
        Self {
            document,
            selector,
            reporter,
            started: AtomicBool::new(false),
        }
    }

    /// Bind every current match, then keep watching structural mutations for
    /// the lifetime of the document. Returns `None` if already active; there
    /// is no way to stop a started watcher.
    pub async fn start(&self) -> Option<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            return None;
        }

        let receiver = {
            let mut document = self.document.lock().await;
            let receiver = document.observe();
            bind_matching(&mut document, &self.selector);
            receiver
        };

        let document = self.document.clone();
        let selector = self.selector.clone();
        let reporter = self.reporter.clone();
        Some(tokio::spawn(async move {
            let mut receiver = receiver;
            loop {
                match receiver.recv().await {
                    Ok(_batch) => {
                        let mut document = document.lock().await;
                        bind_matching(&mut document, &selector);
                    }
                    Err(RecvError::Lagged(missed)) => {
                        reporter.report(
                            ReportPhase::Enhancement,
                            LogLevel::Debug,
                            format!("mutation stream lagged by {missed} batches, rescanning"),
                        );
                        let mut document = document.lock().await;
                        bind_matching(&mut document, &selector);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }))
    }
}

/// Bind the toggle behavior to every currently attached match that does not
/// have it yet. Returns how many new bindings were attached.
pub(crate) fn bind_matching(document: &mut Document, selector: &Selector) -> usize {
    let mut bound = 0;
    for id in document.query_all(selector) {
        if document.bind(id, Arc::new(toggle_visibility)) {
            bound += 1;
        }
    }
    bound
}

/// Flip the sibling input between masked and plain, and swap the toggle
/// glyph. The branch is derived from the input's current mode, so external
/// mode changes between activations are tolerated. A toggle without the
/// expected surrounding structure does nothing.
fn toggle_visibility(document: &mut Document, toggle: NodeId) {
    let Some(parent) = document.parent(toggle) else {
        return;
    };
    let Some(input) = document.find_descendant(parent, &Selector::tag("input")) else {
        return;
    };

    match document.input_type(input) {
        Some(InputType::Password) => {
            document.set_input_type(input, InputType::Text);
            document.set_text(toggle, toggle::GLYPH_REVEALED);
        }
        Some(InputType::Text) => {
            document.set_input_type(input, InputType::Password);
            document.set_text(toggle, toggle::GLYPH_MASKED);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn toggle_selector() -> Selector {
        toggle::TOGGLE_SELECTOR
            .parse()
            .expect("default selector should parse")
    }

    /// Build `<div><input type=password><span.o_toggle_password></div>`
    /// detached from the document.
    fn password_group(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let wrapper = doc.create_element("div");
        let input = doc.create_element("input");
        doc.set_input_type(input, InputType::Password);
        let toggle = doc.create_element("span");
        doc.add_class(toggle, "o_toggle_password");
        doc.set_text(toggle, toggle::GLYPH_MASKED);
        doc.append_child(wrapper, input);
        doc.append_child(wrapper, toggle);
        (wrapper, input, toggle)
    }

    async fn wait_until_bound(document: &Arc<Mutex<Document>>, toggle: NodeId) {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                if document.lock().await.is_bound(toggle) {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("toggle should become bound");
    }

    #[tokio::test]
    async fn binds_elements_present_at_start() {
        let document = Arc::new(Mutex::new(Document::new()));
        let toggle = {
            let mut doc = document.lock().await;
            let (wrapper, _input, toggle) = password_group(&mut doc);
            let root = doc.root();
            doc.append_child(root, wrapper);
            toggle
        };

        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");

        assert!(document.lock().await.is_bound(toggle));
    }

    #[tokio::test]
    async fn binds_elements_inserted_after_start() {
        let document = Arc::new(Mutex::new(Document::new()));
        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");

        let toggle = {
            let mut doc = document.lock().await;
            let (wrapper, _input, toggle) = password_group(&mut doc);
            let root = doc.root();
            doc.append_child(root, wrapper);
            toggle
        };

        wait_until_bound(&document, toggle).await;
    }

    #[tokio::test]
    async fn activation_round_trips_the_input_mode() {
        let document = Arc::new(Mutex::new(Document::new()));
        let (input, toggle) = {
            let mut doc = document.lock().await;
            let (wrapper, input, toggle) = password_group(&mut doc);
            let root = doc.root();
            doc.append_child(root, wrapper);
            (input, toggle)
        };

        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");

        let mut doc = document.lock().await;
        doc.activate(toggle);
        assert_eq!(doc.input_type(input), Some(InputType::Text));
        assert_eq!(doc.text(toggle), toggle::GLYPH_REVEALED);

        doc.activate(toggle);
        assert_eq!(doc.input_type(input), Some(InputType::Password));
        assert_eq!(doc.text(toggle), toggle::GLYPH_MASKED);
    }

    #[tokio::test]
    async fn tolerates_missing_input_structure() {
        let document = Arc::new(Mutex::new(Document::new()));
        let toggle = {
            let mut doc = document.lock().await;
            let wrapper = doc.create_element("div");
            let toggle = doc.create_element("span");
            doc.add_class(toggle, "o_toggle_password");
            doc.append_child(wrapper, toggle);
            let root = doc.root();
            doc.append_child(root, wrapper);
            toggle
        };

        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");

        let mut doc = document.lock().await;
        assert!(doc.is_bound(toggle));
        doc.activate(toggle);
        assert_eq!(doc.text(toggle), "");
    }

    #[tokio::test]
    async fn rescans_never_double_bind() {
        let document = Arc::new(Mutex::new(Document::new()));
        let toggle = {
            let mut doc = document.lock().await;
            let (wrapper, _input, toggle) = password_group(&mut doc);
            let root = doc.root();
            doc.append_child(root, wrapper);
            toggle
        };

        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");
        wait_until_bound(&document, toggle).await;

        // Unrelated mutations trigger rescans that must leave the binding alone.
        {
            let mut doc = document.lock().await;
            let stray = doc.create_element("div");
            let root = doc.root();
            doc.append_child(root, stray);
        }

        let mut doc = document.lock().await;
        assert_eq!(bind_matching(&mut doc, &toggle_selector()), 0);
    }

    #[tokio::test]
    async fn reinserted_elements_are_rebound() {
        let document = Arc::new(Mutex::new(Document::new()));
        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());
        watcher.start().await.expect("first start should activate");

        let (wrapper, toggle) = {
            let mut doc = document.lock().await;
            let (wrapper, _input, toggle) = password_group(&mut doc);
            let root = doc.root();
            doc.append_child(root, wrapper);
            (wrapper, toggle)
        };
        wait_until_bound(&document, toggle).await;

        {
            let mut doc = document.lock().await;
            doc.detach(wrapper);
            assert!(!doc.is_bound(toggle));
            let root = doc.root();
            doc.append_child(root, wrapper);
        }
        wait_until_bound(&document, toggle).await;
    }

    #[tokio::test]
    async fn second_start_is_refused() {
        let document = Arc::new(Mutex::new(Document::new()));
        let watcher = ToggleWatcher::new(document.clone(), toggle_selector(), ErrorReporter::new());

        assert!(watcher.start().await.is_some());
        assert!(watcher.start().await.is_none());
    }
}
