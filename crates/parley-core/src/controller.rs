//! Intent handling for the chat widget

use std::sync::Arc;

use parking_lot::Mutex;
use parley_client::{ChatRequest, Error as ClientError, MENU_COMMAND, Reply, RetryingClient};
use tokio::sync::broadcast;

use crate::{
    config::{ControllerConfig, DispatchPolicy, Fallbacks},
    events::{ConversationEvent, IntentKind},
    message::{ConversationState, Message},
    store::ConversationStore,
    unread::UnreadTracker,
};

/// Result of dispatching an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank input, nothing happened
    Ignored,
    /// Another exchange is pending and the policy rejects overlap
    Busy,
    /// Exchange settled and a bot message was appended
    Settled(Outcome),
    /// Controller shut down while the exchange was waiting to retry
    Aborted,
}

/// How a settled exchange ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    ApplicationError,
    TransportError,
}

/// A network intent with its payload
#[derive(Debug, Clone)]
enum Intent {
    Send(String),
    Select(String),
    Menu,
}

impl Intent {
    fn kind(&self) -> IntentKind {
        match self {
            Intent::Send(_) => IntentKind::SendMessage,
            Intent::Select(_) => IntentKind::SelectMenuOption,
            Intent::Menu => IntentKind::RequestMenu,
        }
    }

    fn payload(&self) -> &str {
        match self {
            Intent::Send(text) | Intent::Select(text) => text,
            Intent::Menu => MENU_COMMAND,
        }
    }

    /// Menu requests are not echoed and do not hide the current menu
    fn echoes_user(&self) -> bool {
        !matches!(self, Intent::Menu)
    }

    fn transport_fallback<'a>(&self, fallbacks: &'a Fallbacks) -> &'a str {
        match self {
            Intent::Send(_) => &fallbacks.send_failed,
            Intent::Select(_) => &fallbacks.selection_failed,
            Intent::Menu => &fallbacks.menu_failed,
        }
    }

    fn application_fallback<'a>(&self, fallbacks: &'a Fallbacks) -> &'a str {
        match self {
            Intent::Menu => &fallbacks.menu_error,
            _ => &fallbacks.server_error,
        }
    }
}

/// Mutable state behind the controller
#[derive(Default)]
struct Inner {
    store: ConversationStore,
    unread: UnreadTracker,
    widget_open: bool,
    in_flight: usize,
}

/// Owns the conversation state and turns UI intents into exchanges.
///
/// Cloning is cheap; all clones drive the same conversation. The rendering
/// layer reads [`ConversationController::snapshot`] and listens to
/// [`ConversationController::subscribe`].
#[derive(Clone)]
pub struct ConversationController {
    client: RetryingClient,
    config: Arc<ControllerConfig>,
    inner: Arc<Mutex<Inner>>,
    event_tx: broadcast::Sender<ConversationEvent>,
}

impl ConversationController {
    pub fn new(client: RetryingClient, config: ControllerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let inner = Inner {
            widget_open: config.widget_open,
            ..Default::default()
        };
        Self {
            client,
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(inner)),
            event_tx,
        }
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.event_tx.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ConversationState {
        let inner = self.inner.lock();
        ConversationState {
            messages: inner.store.messages().to_vec(),
            menu_visible: inner.store.menu_visible(),
            loading: inner.in_flight > 0,
            unread_count: inner.unread.count(),
            widget_open: inner.widget_open,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().in_flight > 0
    }

    pub fn unread_count(&self) -> usize {
        self.inner.lock().unread.count()
    }

    /// Endpoint the client posts to
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Send typed text. Blank input is dropped silently.
    pub async fn send_message(&self, text: &str) -> Dispatch {
        if text.trim().is_empty() {
            return Dispatch::Ignored;
        }
        self.dispatch(Intent::Send(text.to_string())).await
    }

    /// Send the command of a chosen menu option
    pub async fn select_menu_option(&self, command: &str) -> Dispatch {
        if command.trim().is_empty() {
            return Dispatch::Ignored;
        }
        self.dispatch(Intent::Select(command.to_string())).await
    }

    /// Ask the backend for its menu
    pub async fn request_menu(&self) -> Dispatch {
        self.dispatch(Intent::Menu).await
    }

    /// Wipe the history and hide the menu. Pending exchanges still append
    /// their reply when they settle.
    pub fn clear_conversation(&self) {
        let mut inner = self.inner.lock();
        inner.store.clear();
        inner.unread.rewind();
        self.emit(ConversationEvent::Cleared);
        self.emit(ConversationEvent::MenuVisibilityChanged { visible: false });
        tracing::debug!("Conversation cleared");
    }

    /// Expand the widget; resets the unread count
    pub fn open_widget(&self) {
        let mut inner = self.inner.lock();
        if inner.widget_open {
            return;
        }
        inner.widget_open = true;
        let len = inner.store.len();
        let reset = inner.unread.open(len);
        self.emit(ConversationEvent::WidgetToggled { open: true });
        if reset {
            self.emit(ConversationEvent::UnreadChanged { count: 0 });
        }
    }

    /// Collapse the widget
    pub fn close_widget(&self) {
        let mut inner = self.inner.lock();
        if !inner.widget_open {
            return;
        }
        inner.widget_open = false;
        let len = inner.store.len();
        inner.unread.close(len);
        self.emit(ConversationEvent::WidgetToggled { open: false });
    }

    /// Flip widget visibility
    pub fn toggle_widget(&self) {
        let open = self.inner.lock().widget_open;
        if open {
            self.close_widget();
        } else {
            self.open_widget();
        }
    }

    /// Abort exchanges waiting on a backoff delay. Used when the host goes
    /// away; aborted exchanges append nothing.
    pub fn shutdown(&self) {
        self.client.cancel_token().cancel();
    }

    async fn dispatch(&self, intent: Intent) -> Dispatch {
        let guard = {
            let mut inner = self.inner.lock();

            if inner.in_flight > 0 && self.config.dispatch == DispatchPolicy::Reject {
                tracing::warn!("Rejected {:?}: an exchange is already pending", intent.kind());
                self.emit(ConversationEvent::DispatchRejected {
                    intent: intent.kind(),
                });
                return Dispatch::Busy;
            }

            if intent.echoes_user() {
                self.append(&mut inner, Message::user(intent.payload()));
                if inner.store.set_menu_visible(false) {
                    self.emit(ConversationEvent::MenuVisibilityChanged { visible: false });
                }
            }

            inner.in_flight += 1;
            if inner.in_flight == 1 {
                self.emit(ConversationEvent::LoadingChanged { loading: true });
            }
            PendingGuard { controller: self }
        };

        tracing::debug!("Dispatching {:?}", intent.kind());
        let result = self.client.execute(&ChatRequest::new(intent.payload())).await;
        let dispatch = self.settle(&intent, result);
        drop(guard);
        dispatch
    }

    fn settle(&self, intent: &Intent, result: Result<Reply, ClientError>) -> Dispatch {
        let fallbacks = &self.config.fallbacks;
        let (message, outcome, show_menu) = match result {
            Ok(Reply::Answer(answer)) => {
                let show_menu = matches!(intent, Intent::Menu) || answer.has_menu();
                (Message::from(answer), Outcome::Answered, show_menu)
            }
            Ok(Reply::Failure { message }) => {
                let text = message.unwrap_or_else(|| intent.application_fallback(fallbacks).to_string());
                (Message::bot_error(text), Outcome::ApplicationError, false)
            }
            Err(ClientError::Aborted) => {
                tracing::debug!("{:?} aborted", intent.kind());
                return Dispatch::Aborted;
            }
            Err(ClientError::Decode(reason)) => {
                tracing::warn!("Undecodable reply to {:?}: {}", intent.kind(), reason);
                let text = intent.application_fallback(fallbacks);
                (Message::bot_error(text), Outcome::ApplicationError, false)
            }
            Err(e) => {
                tracing::error!("{:?} failed: {}", intent.kind(), e);
                let text = intent.transport_fallback(fallbacks);
                (Message::bot_error(text), Outcome::TransportError, false)
            }
        };

        let mut inner = self.inner.lock();
        self.append(&mut inner, message);
        if show_menu && inner.store.set_menu_visible(true) {
            self.emit(ConversationEvent::MenuVisibilityChanged { visible: true });
        }
        tracing::debug!("{:?} settled: {:?}", intent.kind(), outcome);
        Dispatch::Settled(outcome)
    }

    /// Append and let the unread tracker look at the new tail
    fn append(&self, inner: &mut Inner, message: Message) {
        let index = inner.store.push(message.clone());
        self.emit(ConversationEvent::MessageAppended { index, message });

        let open = inner.widget_open;
        let Inner { store, unread, .. } = inner;
        if unread.observe(store.messages(), open) {
            self.emit(ConversationEvent::UnreadChanged {
                count: unread.count(),
            });
        }
    }

    fn emit(&self, event: ConversationEvent) {
        // No receivers is fine
        let _ = self.event_tx.send(event);
    }
}

/// Returns the controller to idle however the exchange ends, including
/// when the dispatching future is dropped or unwinds.
struct PendingGuard<'a> {
    controller: &'a ConversationController,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.controller.inner.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.in_flight == 0 {
            self.controller
                .emit(ConversationEvent::LoadingChanged { loading: false });
        }
    }
}
