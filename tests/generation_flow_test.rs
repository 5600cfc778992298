use async_trait::async_trait;
use quizgen::api::GenerationRequest;
use quizgen::error::NO_QUESTIONS_MESSAGE;
use quizgen::models::FileRef;
use quizgen::{
    Action, AnswerOption, Difficulty, GenerateError, GenerateTransport, GenerationSession,
    GenerationSettings, InputItem, ModelVersion, Phase, QuestionRecord,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio_test::{assert_err, assert_ok};

type Outcome = Result<Vec<QuestionRecord>, GenerateError>;

/// 按顺序返回预设结果，并记录收到的请求
#[derive(Default)]
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedTransport {
    fn with(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::default(),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl GenerateTransport for ScriptedTransport {
    async fn generate(&self, request: GenerationRequest) -> Outcome {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerateError::MissingQuestions))
    }
}

/// 文本输入为 "slow" 的请求永远不会完成
struct StallingTransport;

#[async_trait]
impl GenerateTransport for StallingTransport {
    async fn generate(&self, request: GenerationRequest) -> Outcome {
        if request.text_field("text_input") == Some("slow") {
            std::future::pending::<()>().await;
        }
        Ok(vec![question("fast")])
    }
}

fn question(stem: &str) -> QuestionRecord {
    QuestionRecord::new(
        stem,
        vec![
            AnswerOption::new("right", true),
            AnswerOption::new("wrong", false),
        ],
    )
}

fn photosynthesis_session(transport: Arc<dyn GenerateTransport>) -> GenerationSession {
    let mut session = GenerationSession::new(transport);
    session
        .dispatch(Action::AddInput(InputItem::text(
            "Pasted Text",
            "Photosynthesis converts light to energy.",
        )))
        .unwrap();
    session
}

fn scenario_a_settings() -> GenerationSettings {
    GenerationSettings::new(40, Difficulty::Medium, ModelVersion::T5SmallDgrace)
}

#[tokio::test]
async fn empty_inputs_never_reach_the_network() {
    let transport = ScriptedTransport::with(vec![Ok(vec![question("q")])]);
    let mut session = GenerationSession::new(transport.clone());

    let err = session
        .generate(&GenerationSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::NoInputs));
    assert_eq!(err.to_string(), "Please upload content first.");
    assert_eq!(transport.calls(), 0);
    assert_eq!(session.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn scenario_a_request_fields() {
    let transport = ScriptedTransport::with(vec![Ok(vec![question("q")])]);
    let mut session = photosynthesis_session(transport.clone());

    let phase = session.generate(&scenario_a_settings()).await.unwrap();
    assert_eq!(phase, Phase::Result);

    let request = transport.last_request();
    assert_eq!(request.text_field("question_count"), Some("40"));
    assert_eq!(request.text_field("difficulty"), Some("Medium"));
    assert_eq!(request.text_field("version"), Some("t5-small-dgrace"));
    assert_eq!(
        request.text_field("text_input"),
        Some("Photosynthesis converts light to energy.")
    );
    assert_eq!(request.files().count(), 0);
}

#[tokio::test]
async fn mixed_inputs_send_files_and_joined_text() {
    let transport = ScriptedTransport::with(vec![Ok(vec![])]);
    let mut session = GenerationSession::new(transport.clone());
    session
        .dispatch(Action::AddInput(InputItem::text("a", "Part one.")))
        .unwrap();
    session
        .dispatch(Action::AddInput(InputItem::file(FileRef::new(
            "notes.pdf",
            b"%PDF-1.4".to_vec(),
        ))))
        .unwrap();
    session
        .dispatch(Action::AddInput(InputItem::text("b", "Part two.")))
        .unwrap();

    session.generate(&GenerationSettings::default()).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.text_field("text_input"), Some("Part one.\n\nPart two."));
    let files: Vec<_> = request.files().collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "notes.pdf");
    assert_eq!(files[0].mime, Some("application/pdf"));
    assert_eq!(request.text_field("question_count"), Some("20"));
}

#[tokio::test]
async fn every_outcome_leaves_loading() {
    let expected = [
        (Phase::Result, None),
        (Phase::Error, Some("error sending request")),
        (Phase::Error, Some("model unavailable")),
        (Phase::Error, Some(NO_QUESTIONS_MESSAGE)),
    ];

    let transport = ScriptedTransport::with(vec![
        Ok(vec![question("q1"), question("q2")]),
        Err(GenerateError::Transport("error sending request".to_string())),
        Err(GenerateError::Server {
            status: 500,
            message: "model unavailable".to_string(),
        }),
        Err(GenerateError::MissingQuestions),
    ]);
    let mut session = photosynthesis_session(transport);
    for ((phase, message), count) in expected.into_iter().zip([1u32, 50, 100, 7]) {
        let settings = GenerationSettings::new(count, Difficulty::Hard, ModelVersion::T5BaseSciq);
        let got = session.generate(&settings).await.unwrap();
        assert_eq!(got, phase);
        assert!(!session.state().is_loading());
        assert_eq!(session.state().error_message(), message);
    }
}

#[tokio::test]
async fn error_keeps_previous_questions_until_start_over() {
    let transport = ScriptedTransport::with(vec![
        Ok(vec![question("kept")]),
        Err(GenerateError::MissingQuestions),
    ]);
    let mut session = photosynthesis_session(transport);

    session.generate(&scenario_a_settings()).await.unwrap();
    session.generate(&scenario_a_settings()).await.unwrap();

    assert_eq!(session.state().phase(), Phase::Error);
    assert_eq!(session.state().questions().len(), 1);

    session.dispatch(Action::StartOver).unwrap();
    assert!(session.state().questions().is_empty());
    assert!(session.state().error_message().is_none());
    assert_eq!(session.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn superseded_request_is_aborted_and_ignored() {
    let transport = Arc::new(StallingTransport);
    let mut session = GenerationSession::new(transport.clone());
    session
        .dispatch(Action::AddInput(InputItem::text("slow", "slow")))
        .unwrap();

    let first = session.start(&GenerationSettings::default()).unwrap();

    session.dispatch(Action::RemoveInput(0)).unwrap();
    session
        .dispatch(Action::AddInput(InputItem::text("fast", "fast")))
        .unwrap();
    let second = session.start(&GenerationSettings::default()).unwrap();
    assert!(second > first);

    let phase = session.wait().await;

    assert_eq!(phase, Phase::Result);
    assert_eq!(session.state().questions()[0].question, "fast");
    assert_eq!(session.state().latest_token(), Some(second));
}

#[tokio::test]
async fn cancel_returns_to_idle() {
    let transport = Arc::new(StallingTransport);
    let mut session = GenerationSession::new(transport);
    session
        .dispatch(Action::AddInput(InputItem::text("slow", "slow")))
        .unwrap();

    session.start(&GenerationSettings::default()).unwrap();
    assert!(session.state().is_loading());

    assert!(session.cancel());
    assert_eq!(session.state().phase(), Phase::Idle);
    assert!(!session.cancel());
    assert_eq!(session.wait().await, Phase::Idle);
}

#[tokio::test]
async fn scenario_e_delete_middle_question() {
    let transport = ScriptedTransport::with(vec![Ok((0..5)
        .map(|i| question(&format!("Q{i}")))
        .collect())]);
    let mut session = photosynthesis_session(transport);
    session.generate(&scenario_a_settings()).await.unwrap();

    assert!(session.dispatch(Action::DeleteQuestion(2)).unwrap());

    let stems: Vec<_> = session
        .state()
        .questions()
        .iter()
        .map(|q| q.question.as_str())
        .collect();
    assert_eq!(stems, vec!["Q0", "Q1", "Q3", "Q4"]);
}

#[tokio::test]
async fn edits_after_generation() {
    let transport = ScriptedTransport::with(vec![Ok(vec![question("Old stem")])]);
    let mut session = photosynthesis_session(transport);
    session.generate(&scenario_a_settings()).await.unwrap();

    assert_ok!(session.dispatch(Action::UpdateStem(0, "New stem".to_string())));
    session
        .dispatch(Action::UpdateOptionText {
            question: 0,
            option: 1,
            text: "still wrong".to_string(),
        })
        .unwrap();

    let q = &session.state().questions()[0];
    assert_eq!(q.question, "New stem");
    assert_eq!(q.answers[1], AnswerOption::new("still wrong", false));
    assert_err!(session.dispatch(Action::UpdateStem(3, "x".to_string())));
}
