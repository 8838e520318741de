use super::*;
use crate::config::{CompletionParams, Pacing};
use crate::ports::completion_gateway::{
    CompletionError, CompletionGateway, CompletionRequest, CompletionResponse,
};
use agora_domain::{Act, DialoguePolicy, Persona, Role, Transition};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ==================== Test Mocks ====================

/// Replies from a script; an exhausted script answers with no choices
struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<CompletionResponse, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    fn new(replies: Vec<Result<CompletionResponse, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| Ok(CompletionResponse::from_text(*t)))
                .collect(),
        )
    }

    fn push(&self, reply: Result<CompletionResponse, CompletionError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CompletionResponse::empty()))
    }
}

struct HangingGateway;

#[async_trait]
impl CompletionGateway for HangingGateway {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        std::future::pending().await
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DialogueNotifier for RecordingNotifier {
    fn on_turn_appended(&self, index: usize, turn: &Turn) {
        self.events
            .lock()
            .unwrap()
            .push(format!("turn {} {}", index, turn.speaker()));
    }

    fn on_turn_started(&self, persona: &Persona, act: Act) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {}", persona.name(), act.number()));
    }

    fn on_act_changed(&self, transition: &Transition) {
        self.events
            .lock()
            .unwrap()
            .push(format!("act {} -> {}", transition.from, transition.to));
    }

    fn on_dialogue_complete(&self) {
        self.events.lock().unwrap().push("complete".to_string());
    }
}

#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

fn session_over(gateway: Arc<dyn CompletionGateway>, policy: DialoguePolicy) -> DialogueSession {
    let client = CompletionClient::new(gateway, CompletionParams::default());
    let config = DialogueConfig::default()
        .with_policy(policy)
        .with_pacing(Pacing::none());
    let cast = ["Protagoras", "Thales", "Diogenes"].map(String::from);
    let roster = Roster::socratic_with(&config.policy, &cast).unwrap();
    DialogueSession::new(Arc::new(client), roster, config)
}

fn speakers(session: &DialogueSession) -> Vec<String> {
    session
        .transcript()
        .iter()
        .map(|t| t.speaker().to_string())
        .collect()
}

const JOB_OFFERS: &str = "I'm stuck deciding between two job offers.";

// ==================== Act 1 ====================

#[tokio::test]
async fn test_job_offer_scenario_reaches_summary() {
    let gateway = Arc::new(ScriptedGateway::texts(&[
        "What draws you to each offer?",
        "Which matters more, salary or growth?",
        "How would each role look in five years?",
        "The Inquirer weighs two offers: one pays more, the other promises growth.",
    ]));
    let session = session_over(gateway.clone(), DialoguePolicy::default());

    let outcome = session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::AwaitingInput);
    assert_eq!(session.phase().clarification_count, 1);
    assert_eq!(session.stage(), Stage::Act1Clarify);

    session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(session.phase().clarification_count, 2);
    assert_eq!(session.stage(), Stage::Act1Clarify);

    // Script runs out at the first discussant
    let outcome = session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Stalled {
            stage: Stage::Act2Discuss
        }
    );

    let phase = session.phase();
    assert_eq!(phase.clarification_count, 3);
    assert_eq!(phase.stage(), Stage::Act2Discuss);
    assert!(phase.summary_provided);
    assert_eq!(phase.discussion_round, 0);

    let transcript = session.transcript();
    assert_eq!(
        speakers(&session),
        vec![
            "Inquirer", "Socrates", "Inquirer", "Socrates", "Inquirer", "Socrates", "System",
            "System", "System", "Socrates",
        ]
    );
    assert_eq!(transcript[6].content(), "Protagoras joined the chat");
    assert_eq!(transcript[7].content(), "Thales joined the chat");
    assert_eq!(transcript[8].content(), "Diogenes joined the chat");
    assert_eq!(transcript[9].role(), Role::Assistant);
    assert!(transcript[9].content().starts_with("The Inquirer weighs"));

    // Summary call sees every prior turn, then the Act 2 instruction
    let requests = gateway.requests();
    let summary = &requests[3];
    assert_eq!(summary.messages.len(), 9 + 2);
    assert_eq!(summary.messages[8].content, "System: Diogenes joined the chat");
    assert_eq!(
        summary.messages[9].content,
        PromptTemplate::moderator_instruction(Act::Discuss, "ready to summarize")
    );
    assert_eq!(summary.messages[10].content, PromptTemplate::summary_request());
}

#[tokio::test]
async fn test_clarification_request_envelope() {
    let gateway = Arc::new(ScriptedGateway::texts(&["Why?"]));
    let session = session_over(gateway.clone(), DialoguePolicy::default());

    session.submit("  I want to move abroad.  ").await.unwrap();

    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "Inquirer: I want to move abroad.");
    assert_eq!(messages[1].role, Role::System);
    assert_eq!(
        messages[1].content,
        PromptTemplate::moderator_instruction(Act::Clarify, "ready to summarize")
    );
    assert_eq!(messages[2].content, "I want to move abroad.");
}

#[tokio::test]
async fn test_trigger_phrase_moves_to_discussion_early() {
    let gateway = Arc::new(ScriptedGateway::texts(&[
        "I think I am Ready To Summarize.",
    ]));
    let session = session_over(gateway, DialoguePolicy::default());

    let outcome = session.submit(JOB_OFFERS).await.unwrap();

    // Summary call got an empty reply
    assert_eq!(
        outcome,
        SubmitOutcome::Stalled {
            stage: Stage::Act2Discuss
        }
    );
    let phase = session.phase();
    assert_eq!(phase.clarification_count, 1);
    assert!(!phase.summary_provided);
}

#[tokio::test]
async fn test_configured_trigger_phrase_reaches_moderator() {
    let gateway = Arc::new(ScriptedGateway::texts(&["Enough said, friend."]));
    let policy = DialoguePolicy::default().with_trigger_phrase("enough said");
    let session = session_over(gateway.clone(), policy);

    session.submit(JOB_OFFERS).await.unwrap();

    let requests = gateway.requests();
    let instruction = &requests[0].messages[1].content;
    assert!(instruction.contains("\"enough said\""));
    assert!(!instruction.contains("ready to summarize"));
    assert_eq!(session.phase().clarification_count, 1);
    assert_eq!(session.stage(), Stage::Act2Discuss);
}

#[tokio::test]
async fn test_empty_response_adds_no_turns() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(CompletionResponse::empty())]));
    let logger = Arc::new(RecordingLogger::default());
    let session = session_over(gateway, DialoguePolicy::default())
        .with_conversation_logger(logger.clone());

    let outcome = session.submit(JOB_OFFERS).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Stalled {
            stage: Stage::Act1Clarify
        }
    );
    // Only the inquirer's own turn
    assert_eq!(speakers(&session), vec!["Inquirer"]);
    assert_eq!(session.phase(), PhaseState::default());
    assert!(logger.events.lock().unwrap().contains(&"turn_skipped"));
}

#[tokio::test]
async fn test_failed_call_is_skipped_and_next_submission_retries() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Err(CompletionError::Transport("connection reset".to_string())),
        Ok(CompletionResponse::from_text("What matters most?")),
    ]));
    let session = session_over(gateway, DialoguePolicy::default());

    let outcome = session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Stalled {
            stage: Stage::Act1Clarify
        }
    );
    assert_eq!(session.phase().clarification_count, 0);

    let outcome = session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::AwaitingInput);
    assert_eq!(session.phase().clarification_count, 1);
    assert_eq!(speakers(&session), vec!["Inquirer", "Inquirer", "Socrates"]);
}

// ==================== Acts 2 and 3 ====================

#[tokio::test]
async fn test_full_dialogue_runs_to_completion() {
    let mut replies = vec![
        "Tell me more.",
        "And then?",
        "I see.",
        "Summary of the situation.",
    ];
    let round_replies: Vec<String> = (0..3)
        .flat_map(|round| {
            ["Protagoras", "Thales", "Diogenes"]
                .into_iter()
                .map(move |name| format!("{} in round {}", name, round))
        })
        .collect();
    replies.extend(round_replies.iter().map(String::as_str));
    replies.extend(["Closing P", "Closing T", "Closing D", "Final synthesis."]);

    let gateway = Arc::new(ScriptedGateway::texts(&replies));
    let notifier = Arc::new(RecordingNotifier::default());
    let session =
        session_over(gateway.clone(), DialoguePolicy::default()).with_notifier(notifier.clone());

    assert_eq!(
        session.submit(JOB_OFFERS).await.unwrap(),
        SubmitOutcome::AwaitingInput
    );
    assert_eq!(
        session.submit(JOB_OFFERS).await.unwrap(),
        SubmitOutcome::AwaitingInput
    );
    assert_eq!(
        session.submit(JOB_OFFERS).await.unwrap(),
        SubmitOutcome::Complete
    );

    assert!(session.is_complete());
    assert_eq!(session.stage(), Stage::Complete);
    assert_eq!(gateway.requests().len(), 3 + 1 + 9 + 3 + 1);

    let transcript = session.transcript();
    // 3 x (inquirer + moderator) + 3 joined + summary + 9 round turns
    // + 3 closing remarks + synthesis + conclusion
    assert_eq!(transcript.len(), 6 + 3 + 1 + 9 + 3 + 1 + 1);

    let round_speakers: Vec<_> = transcript[10..19].iter().map(|t| t.speaker()).collect();
    assert_eq!(
        round_speakers,
        vec![
            "Protagoras", "Thales", "Diogenes", "Protagoras", "Thales", "Diogenes",
            "Protagoras", "Thales", "Diogenes",
        ]
    );
    assert_eq!(transcript[18].content(), "Diogenes in round 2");
    assert_eq!(transcript[19].content(), "Closing P");
    assert_eq!(transcript[22].speaker(), "Socrates");
    assert_eq!(transcript[22].content(), "Final synthesis.");
    assert_eq!(transcript[23].role(), Role::System);
    assert_eq!(transcript[23].content(), "The dialogue has concluded.");

    // Round 0 and later rounds carry different directives
    let requests = gateway.requests();
    assert_eq!(
        requests[4].messages.last().unwrap().content,
        PromptTemplate::round_directive(0)
    );
    assert_eq!(
        requests[7].messages.last().unwrap().content,
        PromptTemplate::round_directive(1)
    );
    assert_eq!(
        requests[16].messages.last().unwrap().content,
        PromptTemplate::synthesis_request()
    );

    let events = notifier.events();
    let acts: Vec<_> = events.iter().filter(|e| e.starts_with("act ")).collect();
    assert_eq!(
        acts,
        vec![
            "act Act1_Clarify -> Act2_Discuss",
            "act Act2_Discuss -> Act3_Close",
            "act Act3_Close -> Complete",
        ]
    );
    assert_eq!(events.last().map(String::as_str), Some("complete"));
    assert!(events.contains(&"start Diogenes 3".to_string()));

    // Terminal: no further calls
    assert_eq!(
        session.submit("One more thing").await,
        Err(DialogueError::Complete)
    );
    assert_eq!(gateway.requests().len(), 17);
}

#[tokio::test]
async fn test_stalled_round_resumes_without_repeating_speakers() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(CompletionResponse::from_text("Ready to summarize.")),
        Ok(CompletionResponse::from_text("Summary.")),
        Ok(CompletionResponse::from_text("Protagoras speaks.")),
        Err(CompletionError::Timeout),
    ]));
    let policy = DialoguePolicy::default().with_discussion_rounds(1);
    let session = session_over(gateway.clone(), policy);

    let outcome = session.submit(JOB_OFFERS).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Stalled {
            stage: Stage::Act2Discuss
        }
    );
    assert_eq!(session.phase().discussion_round, 0);

    for text in [
        "Thales speaks.",
        "Diogenes speaks.",
        "Closing P",
        "Closing T",
        "Closing D",
        "Synthesis.",
    ] {
        gateway.push(Ok(CompletionResponse::from_text(text)));
    }

    let outcome = session.submit("Please go on.").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Complete);

    let requests = gateway.requests();
    // The retried call goes to Thales, not back to Protagoras
    let thales = Roster::socratic()
        .find("Thales")
        .unwrap()
        .instruction_for(Act::Discuss);
    let retried = &requests[4].messages;
    assert_eq!(retried[retried.len() - 2].content, thales);

    let protagoras_turns = session
        .transcript()
        .iter()
        .filter(|t| t.speaker() == "Protagoras")
        .count();
    // one round turn plus one closing remark
    assert_eq!(protagoras_turns, 2);
    let joined = session
        .transcript()
        .iter()
        .filter(|t| t.content().ends_with("joined the chat"))
        .count();
    assert_eq!(joined, 3);
}

// ==================== Submission rules ====================

#[tokio::test]
async fn test_blank_input_is_rejected() {
    let gateway = Arc::new(ScriptedGateway::texts(&[]));
    let session = session_over(gateway.clone(), DialoguePolicy::default());

    assert_eq!(session.submit("   \n").await, Err(DialogueError::EmptyInput));
    assert!(session.transcript().is_empty());
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn test_interruption_appends_apology_and_restores_phase() {
    let gateway = Arc::new(ScriptedGateway::texts(&["unused"]));
    let logger = Arc::new(RecordingLogger::default());
    let session = session_over(gateway.clone(), DialoguePolicy::default())
        .with_conversation_logger(logger.clone());
    session.shutdown();

    let result = session.submit(JOB_OFFERS).await;

    assert!(matches!(result, Err(DialogueError::Interrupted(_))));
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].role(), Role::System);
    assert_eq!(
        transcript[1].content(),
        "Our dialogue was interrupted by an error."
    );
    assert_eq!(session.phase(), PhaseState::default());
    assert!(!session.is_busy());
    assert!(gateway.requests().is_empty());
    assert!(
        logger
            .events
            .lock()
            .unwrap()
            .contains(&"submission_interrupted")
    );
}

#[tokio::test]
async fn test_concurrent_submission_is_rejected_while_busy() {
    let session = Arc::new(session_over(
        Arc::new(HangingGateway),
        DialoguePolicy::default(),
    ));

    let running = {
        let session = session.clone();
        tokio::spawn(async move { session.submit(JOB_OFFERS).await })
    };
    while !session.is_busy() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert_eq!(session.submit("Hello?").await, Err(DialogueError::Busy));

    session.shutdown();
    let outcome = running.await.unwrap();
    assert_eq!(outcome, Ok(SubmitOutcome::Cancelled));
    assert_eq!(session.phase().clarification_count, 0);
    assert_eq!(speakers(&session), vec!["Inquirer"]);
}

#[tokio::test]
async fn test_context_window_limits_entries() {
    let gateway = Arc::new(ScriptedGateway::texts(&["One?", "Two?"]));
    let client = CompletionClient::new(gateway.clone(), CompletionParams::default());
    let config = DialogueConfig::default()
        .with_pacing(Pacing::none())
        .with_context_window(Some(2));
    let session = DialogueSession::new(Arc::new(client), Roster::socratic(), config);

    session.submit("first").await.unwrap();
    session.submit("second").await.unwrap();

    let requests = gateway.requests();
    let messages = &requests[1].messages;
    // window of 2 + instruction + content
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].content, "Socrates: One?");
    assert_eq!(messages[1].content, "Inquirer: second");
}
