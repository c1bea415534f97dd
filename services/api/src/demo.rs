use clap::Args;

use mason_ivr::config::SessionConfig;
use mason_ivr::dialogue::{content, DialogueEngine, Language, SessionId};
use mason_ivr::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Dialogue language for the scripted conversation (en, hi, or ta)
    #[arg(long, default_value = "en", value_parser = parse_language)]
    pub(crate) language: Option<Language>,
    /// Deliberately answer "no" to the first confirmation to show the retry path
    #[arg(long)]
    pub(crate) with_correction: bool,
}

fn parse_language(raw: &str) -> Result<Language, String> {
    Language::from_code(raw).map_err(|err| err.to_string())
}

/// Drive a complete applicant conversation through the engine and print
/// the transcript. Keyword replies come from the language's own content
/// table so the same script works in every language.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let language = args.language.unwrap_or_default();
    let text = content(language);
    let yes = text.affirmative[0];
    let no = text.negative[0];

    let engine = DialogueEngine::new(SessionConfig::default());
    let session = SessionId::from("demo-session");

    println!("Mason IVR demo ({language})");
    println!("========================");

    let reply = engine.start(&session, language);
    println!("[mason]  {}", reply.assistant_text);

    let mut script: Vec<&str> = vec!["Ravi Kumar"];
    if args.with_correction {
        script.push(no);
        script.push("Ravi Varma");
    }
    script.extend([
        yes,
        "32",
        yes,
        "98765 43210",
        yes,
        "14 Anna Salai, Chennai",
        yes,
        "22000",
        yes,
    ]);

    for utterance in script {
        println!("[caller] {utterance}");
        let reply = engine.process_turn(&session, utterance);
        println!("[mason]  {}", reply.assistant_text);
        if reply.finished {
            println!();
            println!("collected fields:");
            let rendered =
                serde_json::to_string_pretty(&reply.fields).map_err(std::io::Error::other)?;
            println!("{rendered}");
            break;
        }
    }

    Ok(())
}
