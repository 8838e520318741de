//! Serial task queue
//!
//! Persona turns of one conversation run strictly one at a time, in
//! submission order. A single worker task drains an unbounded channel:
//!
//! ```text
//! submit(task) ──▶ [ t1 | t2 | t3 ] ──▶ worker: resolve context
//!                                               → completion call
//!                                               → continuation
//!                                               → resolve ticket
//! ```
//!
//! Failed and empty turns are logged and skipped without running their
//! continuation; the worker moves on to the next task. A continuation may
//! submit further tasks, which land at the tail.

use super::completion_client::CompletionClient;
use crate::ports::completion_gateway::CompletionError;
use agora_domain::{Act, ConversationContext, Persona};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Errors surfaced by the queue itself (never by a completion call)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Task queue is closed")]
    Closed,

    #[error("Task was abandoned before it resolved")]
    Abandoned,
}

/// Why a task finished without running its continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The call succeeded but carried no usable generated text
    EmptyResponse,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::EmptyResponse => "empty_response",
        }
    }
}

/// Final state of one queued task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// Generated text; the continuation has run
    Completed(String),
    Skipped(SkipReason),
    Failed(CompletionError),
    /// The queue shut down before the task finished
    Cancelled,
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }
}

/// Where a task takes its conversation context from
pub enum ContextSource {
    /// A context fixed at submission time
    Snapshot(ConversationContext),
    /// Resolved when the worker dispatches the task, so turns appended by
    /// earlier continuations are included
    Live(Arc<dyn Fn() -> ConversationContext + Send + Sync>),
}

impl ContextSource {
    pub fn live<F>(f: F) -> Self
    where
        F: Fn() -> ConversationContext + Send + Sync + 'static,
    {
        ContextSource::Live(Arc::new(f))
    }

    fn resolve(&self) -> ConversationContext {
        match self {
            ContextSource::Snapshot(context) => context.clone(),
            ContextSource::Live(f) => f(),
        }
    }
}

impl fmt::Debug for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSource::Snapshot(context) => {
                write!(f, "Snapshot({} entries)", context.len())
            }
            ContextSource::Live(_) => write!(f, "Live(..)"),
        }
    }
}

type Continuation = Box<dyn FnOnce(&str) + Send>;

/// A pending persona turn
pub struct QueuedTask {
    persona: Arc<Persona>,
    act: Act,
    content: String,
    context: ContextSource,
    on_response: Option<Continuation>,
}

impl QueuedTask {
    pub fn new(
        persona: Arc<Persona>,
        act: Act,
        content: impl Into<String>,
        context: ContextSource,
    ) -> Self {
        Self {
            persona,
            act,
            content: content.into(),
            context,
            on_response: None,
        }
    }

    /// Run `f` with the generated text once the call succeeds
    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) + Send + 'static,
    {
        self.on_response = Some(Box::new(f));
        self
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn act(&self) -> Act {
        self.act
    }
}

impl fmt::Debug for QueuedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedTask")
            .field("persona", &self.persona.name())
            .field("act", &self.act)
            .field("content", &self.content)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Resolves once the submitted task has finished
pub struct TaskTicket {
    receiver: oneshot::Receiver<TaskOutcome>,
}

impl Future for TaskTicket {
    type Output = Result<TaskOutcome, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|_| QueueError::Abandoned))
    }
}

struct Envelope {
    task: QueuedTask,
    reply: oneshot::Sender<TaskOutcome>,
}

/// Handle to one conversation's queue; clones share the same worker
#[derive(Clone)]
pub struct SerialTaskQueue {
    sender: mpsc::UnboundedSender<Envelope>,
    pending: Arc<AtomicUsize>,
    cancel: CancellationToken,
}

impl SerialTaskQueue {
    /// Start the worker on the current tokio runtime
    pub fn spawn(client: Arc<CompletionClient>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();

        tokio::spawn(drain(client, receiver, pending.clone(), cancel.clone()));

        Self {
            sender,
            pending,
            cancel,
        }
    }

    /// Append a task to the tail of the queue
    pub fn submit(&self, task: QueuedTask) -> Result<TaskTicket, QueueError> {
        if self.is_shut_down() {
            return Err(QueueError::Closed);
        }

        let (reply, receiver) = oneshot::channel();
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(Envelope { task, reply }).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(QueueError::Closed);
        }
        Ok(TaskTicket { receiver })
    }

    /// Queued plus in-flight tasks
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Stop the worker. The in-flight call is abandoned and every queued
    /// task resolves [`TaskOutcome::Cancelled`] without its continuation.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

async fn drain(
    client: Arc<CompletionClient>,
    mut receiver: mpsc::UnboundedReceiver<Envelope>,
    pending: Arc<AtomicUsize>,
    cancel: CancellationToken,
) {
    loop {
        let envelope = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = receiver.recv() => match next {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let outcome = run_task(&client, envelope.task, &cancel).await;
        pending.fetch_sub(1, Ordering::SeqCst);
        // The submitter may have stopped waiting
        let _ = envelope.reply.send(outcome);
    }

    receiver.close();
    while let Ok(envelope) = receiver.try_recv() {
        pending.fetch_sub(1, Ordering::SeqCst);
        let _ = envelope.reply.send(TaskOutcome::Cancelled);
    }
    debug!("Task queue worker stopped");
}

async fn run_task(
    client: &CompletionClient,
    task: QueuedTask,
    cancel: &CancellationToken,
) -> TaskOutcome {
    let QueuedTask {
        persona,
        act,
        content,
        context,
        on_response,
    } = task;

    let context = context.resolve();
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => return TaskOutcome::Cancelled,
        result = client.complete(&persona, act, &content, &context) => result,
    };

    match result {
        Ok(response) => match response.generated_text() {
            Some(text) => {
                if cancel.is_cancelled() {
                    return TaskOutcome::Cancelled;
                }
                if let Some(continuation) = on_response {
                    continuation(text);
                }
                TaskOutcome::Completed(text.to_string())
            }
            None => {
                warn!("{} returned no usable text, skipping turn", persona.name());
                TaskOutcome::Skipped(SkipReason::EmptyResponse)
            }
        },
        Err(e) => {
            warn!("Turn for {} failed, skipping: {}", persona.name(), e);
            TaskOutcome::Failed(e)
        }
    }
}
