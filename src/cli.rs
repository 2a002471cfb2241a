//! Interactive terminal interview — the local counterpart of the REST flow.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::Error;
use crate::form::Form;
use crate::interview::{InterviewDriver, InterviewState};
use crate::store::FormStore;

const ASSISTANT_NAME: &str = "Flowly";

/// Run one interview over stdin/stdout: intake, the question/answer loop,
/// then transcript export to the responses directory.
pub async fn run(driver: &InterviewDriver, store: &FormStore) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    let form = read_form(&mut lines).await?;
    store.save_form(&form).await?;
    eprintln!("Form saved as {}\n", form.form_id);

    let mut state = InterviewState::new(form);
    while !state.complete {
        let question = match driver.next_question(&mut state).await {
            Ok(question) => question,
            Err(e) => {
                eprintln!("⚠️  {e}");
                eprintln!("   Press Enter to retry.");
                if lines.next_line().await?.is_none() {
                    return Ok(());
                }
                continue;
            }
        };
        println!("\n{ASSISTANT_NAME}: {question}");
        if state.complete {
            break;
        }

        eprint!("> ");
        let Some(reply) = lines.next_line().await? else {
            eprintln!("\nInterview abandoned.");
            return Ok(());
        };
        if let Err(e) = driver.submit_reply(&mut state, &reply) {
            match e {
                Error::Interview(_) => eprintln!("⚠️  {e}"),
                other => return Err(other.into()),
            }
        }
    }

    println!("\nAll set — your responses have been recorded");
    let path = store
        .save_transcript(&state.form.form_id, &state.transcript)
        .await?;
    println!("Conversation saved to {}", path.display());
    Ok(())
}

/// Intake: read the goal, then question lines until a blank line or EOF.
/// Re-prompts until at least one non-blank question is entered.
async fn read_form(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<Form> {
    eprint!("What's your goal? ");
    let goal = lines
        .next_line()
        .await?
        .context("stdin closed during intake")?;

    loop {
        eprintln!("Your questions (one per line, blank line to finish):");
        let mut text = String::new();
        loop {
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                break;
            }
            text.push_str(&line);
            text.push('\n');
        }

        match Form::new(&goal, &text) {
            Ok(form) => return Ok(form),
            Err(e) => eprintln!("⚠️  {e}"),
        }
    }
}
