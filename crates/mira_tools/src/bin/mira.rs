#![forbid(unsafe_code)]

use std::env;
use std::io::{self, BufRead, IsTerminal};

use mira_kernel_contracts::capture::CaptureLocale;
use mira_kernel_contracts::section::SectionId;
use mira_os::router::{RouterRuntime, RouterState};
use mira_os::voice::VoiceTurnWiring;
use mira_tools::storefront::MemoryStorefront;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

fn run() -> Result<(), String> {
    let mut locale_tag = "ar".to_string();
    let mut section = SectionId::LipColor;
    let mut transcripts: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        if let Some(tag) = arg.strip_prefix("--locale=") {
            locale_tag = tag.to_string();
        } else if let Some(path) = arg.strip_prefix("--section=") {
            section = SectionId::from_path_segment(path)
                .ok_or_else(|| format!("unknown section: {path}"))?;
        } else if arg == "--help" {
            return Err("usage: mira [--locale=TAG] [--section=NAME] [transcript...]".to_string());
        } else {
            transcripts.push(arg);
        }
    }

    let locale = CaptureLocale::v1(locale_tag).map_err(|e| e.to_string())?;
    if transcripts.is_empty() {
        if io::stdin().is_terminal() {
            return Err("usage: mira [--locale=TAG] [--section=NAME] [transcript...]".to_string());
        }
        for line in io::stdin().lock().lines() {
            let line = line.map_err(|e| e.to_string())?;
            if !line.trim().is_empty() {
                transcripts.push(line);
            }
        }
    }

    let wiring = VoiceTurnWiring::default();
    let router = RouterRuntime::new();
    let mut storefront = MemoryStorefront::with_demo_catalog(section);
    let mut state = RouterState::v1();

    for transcript in transcripts {
        println!("> {transcript}");
        let intents = wiring.interpret(&transcript, &locale);
        if intents.is_empty() {
            println!("  (no command recognized)");
            continue;
        }
        let outcomes = router.dispatch(&intents, &mut state, &mut storefront);
        for (intent, outcome) in intents.iter().zip(outcomes.iter()) {
            println!("  {intent:?} -> {outcome:?}");
        }
        if let Some(active) = state.active_section {
            println!("  {}: {:?}", active.as_str(), storefront.selection(active));
        }
    }
    if !storefront.cart().is_empty() {
        println!("cart: {:?}", storefront.cart());
    }
    Ok(())
}
