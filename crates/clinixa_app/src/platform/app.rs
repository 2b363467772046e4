use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clinixa_core::{Field, FieldErrors, RawForm, SessionPhase};
use clinixa_engine::{
    AnalysisClient, ReqwestAnalysisClient, SessionController, HEALTH_CHECK_FAILED,
};
use clinixa_logging::{clinixa_info, clinixa_warn};

use super::prompt::Prompter;
use super::ui::constants::{FORM_HEADING, KEEP_OR_CLEAR_HINT, LOADING_TEXT};
use super::ui::render;
use crate::config::{AppConfig, Command};

/// Exit status when the form itself was rejected.
const EXIT_INVALID_INPUT: u8 = 2;

pub async fn run_app(command: Command, config: AppConfig) -> anyhow::Result<ExitCode> {
    clinixa_info!("clinixa starting api_url={}", config.client.base_url);
    let client =
        ReqwestAnalysisClient::new(config.client).context("failed to build HTTP client")?;

    match command {
        Command::Interactive => {
            let mut controller = SessionController::new(client);
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
            run_interactive(&mut controller, &mut prompter).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze(args) => {
            let controller = SessionController::new(client);
            run_analyze(
                controller,
                RawForm::from(args),
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await
        }
        Command::Health => run_health(&client, &mut io::stdout(), &mut io::stderr()).await,
    }
}

async fn run_interactive<C, R, W>(
    controller: &mut SessionController<C>,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()>
where
    C: AnalysisClient,
    R: BufRead,
    W: Write,
{
    prompter.print_lines(render::banner())?;
    let mut pending: Vec<Field> = Field::ALL.to_vec();

    loop {
        if !pending.is_empty() {
            prompter.print_lines([FORM_HEADING, KEEP_OR_CLEAR_HINT])?;
        }
        for field in pending.drain(..) {
            let view = controller.view();
            let answer = prompter.ask_field(
                field,
                view.form.get(field),
                view.field_errors.get(field),
            )?;
            let Some(value) = answer else {
                return Ok(());
            };
            controller.edit(field, value);
        }

        let phase = match submit_with_indicator(controller, prompter).await? {
            Ok(phase) => phase,
            Err(errors) => {
                pending = errors.fields().collect();
                continue;
            }
        };
        prompter.print_lines(render::render(&controller.view()))?;

        let next = match phase {
            SessionPhase::Result => {
                prompter.choose("What next?", &[('n', "New analysis"), ('q', "Quit")])?
            }
            SessionPhase::Error => prompter.choose(
                "What next?",
                &[('e', "Edit and retry"), ('r', "Retry"), ('q', "Quit")],
            )?,
            SessionPhase::Idle | SessionPhase::Loading => {
                clinixa_warn!("submission ended in non-terminal phase {:?}", phase);
                None
            }
        };

        match next {
            Some('n') => {
                controller.reset();
                pending = Field::ALL.to_vec();
            }
            Some('e') => {
                controller.dismiss_error();
                pending = Field::ALL.to_vec();
            }
            // Same form, submitted again.
            Some('r') => controller.dismiss_error(),
            _ => return Ok(()),
        }
    }
}

/// Submits the current form, printing the loading text while the call is in flight.
async fn submit_with_indicator<C, R, W>(
    controller: &mut SessionController<C>,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Result<SessionPhase, FieldErrors>>
where
    C: AnalysisClient,
    R: BufRead,
    W: Write,
{
    let mut observer = controller.subscribe();
    let submit = controller.submit();
    tokio::pin!(submit);

    loop {
        tokio::select! {
            biased;
            outcome = &mut submit => {
                return Ok(outcome.map(|session| session.phase()));
            }
            Ok(()) = observer.changed() => {
                let loading = observer.borrow_and_update().is_loading();
                if loading {
                    prompter.print_lines([LOADING_TEXT])?;
                }
            }
        }
    }
}

async fn run_analyze<C: AnalysisClient>(
    mut controller: SessionController<C>,
    form: RawForm,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let outcome = controller
        .submit_form(form)
        .await
        .map(|session| session.phase());
    let view = controller.view();

    match outcome {
        Err(_) => {
            writeln!(err, "Invalid input:")?;
            for line in render::render_field_errors(&view) {
                writeln!(err, "{line}")?;
            }
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
        Ok(SessionPhase::Result) => {
            for line in render::render(&view) {
                writeln!(out, "{line}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(_) => {
            for line in render::render(&view) {
                writeln!(err, "{line}")?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_health<C: AnalysisClient>(
    client: &C,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match client.health().await {
        Ok(body) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            clinixa_warn!("health check failed: {}", failure);
            writeln!(err, "{HEALTH_CHECK_FAILED}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::sync::Mutex;

    use clinixa_core::{AnalysisResult, Likelihood, PossibleDisease, SymptomRequest};
    use clinixa_engine::{FailureKind, TransportError, SERVER_UNREACHABLE};
    use serde_json::json;

    use super::*;

    struct StubClient {
        answers: Mutex<VecDeque<Result<AnalysisResult, TransportError>>>,
        requests: Mutex<Vec<SymptomRequest>>,
        healthy: bool,
    }

    impl StubClient {
        fn answering(answers: Vec<Result<AnalysisResult, TransportError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                requests: Mutex::new(Vec::new()),
                healthy: true,
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl AnalysisClient for StubClient {
        async fn analyze(
            &self,
            request: &SymptomRequest,
        ) -> Result<AnalysisResult, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected analysis call")
        }

        async fn health(&self) -> Result<serde_json::Value, TransportError> {
            if self.healthy {
                Ok(json!({ "status": "healthy" }))
            } else {
                Err(unreachable_error())
            }
        }
    }

    fn flu_result() -> AnalysisResult {
        AnalysisResult {
            possible_diseases: vec![PossibleDisease {
                name: "Influenza".into(),
                likelihood: Likelihood::Medium,
                description: "Viral infection".into(),
            }],
            precautions: vec!["Rest".into()],
            when_to_seek_help: "If breathing is difficult".into(),
            disclaimer: "Not a diagnosis.".into(),
        }
    }

    fn unreachable_error() -> TransportError {
        TransportError {
            kind: FailureKind::Unreachable,
            message: "connection refused".into(),
        }
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    #[tokio::test]
    async fn interactive_session_renders_results() {
        let mut controller = SessionController::new(StubClient::answering(vec![Ok(flu_result())]));
        let mut p = prompter("fever, chills\n30\nfemale\n3 days\nq\n");

        run_interactive(&mut controller, &mut p).await.unwrap();

        let output = output_of(&mut p);
        assert!(output.contains("Important: This tool provides general health information only."));
        assert!(output.contains("  1. Influenza [medium likelihood]"));
        assert!(output.contains("Disclaimer: Not a diagnosis."));

        let requests = controller.client().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].symptoms(), "fever, chills");
        assert_eq!(requests[0].age(), Some(30));
    }

    #[tokio::test]
    async fn invalid_fields_are_asked_again_before_any_call() {
        let mut controller = SessionController::new(StubClient::answering(vec![Ok(flu_result())]));
        // Blank symptoms and age 150, then fix both.
        let mut p = prompter("\n150\n\n\ncough\n40\nq\n");

        run_interactive(&mut controller, &mut p).await.unwrap();

        let output = output_of(&mut p);
        assert!(output.contains("  ! Please describe your symptoms"));
        assert!(output.contains("  ! Please enter a valid age (0-120)"));
        assert_eq!(controller.client().request_count(), 1);
        assert_eq!(controller.view().form.age, "40");
    }

    #[tokio::test]
    async fn error_can_be_retried_with_same_form() {
        let mut controller = SessionController::new(StubClient::answering(vec![
            Err(unreachable_error()),
            Ok(flu_result()),
        ]));
        let mut p = prompter("cough\n\n\n\nr\nn\n");

        run_interactive(&mut controller, &mut p).await.unwrap();

        let output = output_of(&mut p);
        assert!(output.contains(&format!("Error: {SERVER_UNREACHABLE}")));
        assert!(!output.contains("connection refused"));
        assert!(output.contains("Analysis Results"));
        assert_eq!(controller.client().request_count(), 2);
        // 'n' reset the session, then input ended at the next prompt.
        assert_eq!(controller.view().phase, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn analyze_command_exit_codes() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let controller = SessionController::new(StubClient::answering(vec![Ok(flu_result())]));
        let form = RawForm {
            symptoms: "cough".into(),
            ..RawForm::default()
        };
        let code = run_analyze(controller, form, &mut out, &mut err).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(String::from_utf8_lossy(&out).contains("Influenza [medium likelihood]"));

        let controller =
            SessionController::new(StubClient::answering(vec![Err(unreachable_error())]));
        let form = RawForm {
            symptoms: "cough".into(),
            ..RawForm::default()
        };
        let code = run_analyze(controller, form, &mut out, &mut err).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(String::from_utf8_lossy(&err).contains(SERVER_UNREACHABLE));

        let controller = SessionController::new(StubClient::answering(Vec::new()));
        let code = run_analyze(controller, RawForm::default(), &mut out, &mut err)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::from(EXIT_INVALID_INPUT));
        assert!(String::from_utf8_lossy(&err).contains("Please describe your symptoms"));
    }

    #[tokio::test]
    async fn health_command_prints_body_or_fixed_message() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let client = StubClient::answering(Vec::new());
        let code = run_health(&client, &mut out, &mut err).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(String::from_utf8_lossy(&out).contains("\"status\": \"healthy\""));

        let client = StubClient {
            healthy: false,
            ..StubClient::answering(Vec::new())
        };
        let code = run_health(&client, &mut out, &mut err).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(String::from_utf8_lossy(&err).trim(), HEALTH_CHECK_FAILED);
    }
}
