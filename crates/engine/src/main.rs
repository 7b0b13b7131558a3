//! LevelUp Engine - line-driven level-up wizard.
//!
//! `levelup-engine <character-id>` runs the wizard for one stored character,
//! reading one command per line from stdin. `levelup-engine --list` lists the
//! stored characters.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use levelup_domain::CharacterId;
use levelup_engine::infrastructure::settings::EngineSettings;
use levelup_engine::use_cases::level_up::{
    ImprovementView, ListRow, StepView, WizardInput, WizardSignal, WizardView,
};
use levelup_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: levelup-engine <character-id> | --list";

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "levelup_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = EngineSettings::from_env();
    tracing::debug!(?settings, "Loaded settings");
    let app = App::new(settings);

    let arg = std::env::args().nth(1).context(USAGE)?;
    if arg == "--list" {
        return list_characters(&app);
    }

    let character_id: CharacterId = arg
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid character id {arg:?}: {e}"))?;
    run_wizard(&app, character_id)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for path in [
        repo_root.join(".env.local"),
        repo_root.join(".env"),
        std::path::PathBuf::from(".env"),
    ] {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn list_characters(app: &App) -> anyhow::Result<()> {
    let characters = app
        .repositories
        .character
        .list()
        .context("failed to list characters")?;
    if characters.is_empty() {
        println!(
            "No characters in {}",
            app.settings.characters_dir.display()
        );
    }
    for character in characters {
        println!(
            "{}  {} ({} {})",
            character.id(),
            character.name(),
            character.class_name(),
            character.level()
        );
    }
    Ok(())
}

fn run_wizard(app: &App, character_id: CharacterId) -> anyhow::Result<()> {
    let mut wizard = app
        .use_cases
        .level_up
        .start_by_id(character_id)
        .context("failed to start level-up")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_view(&wizard.view());
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("Input closed; nothing was changed.");
            return Ok(());
        };
        let inputs = match parse_line(&line?) {
            Ok(inputs) => inputs,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        for input in inputs {
            match wizard.handle_input(input)? {
                WizardSignal::Continue => {}
                WizardSignal::Finished => {
                    let character = wizard.character();
                    println!(
                        "{} is now level {} with {} hit points.",
                        character.name(),
                        character.level(),
                        character.hit_points().max
                    );
                    return Ok(());
                }
                WizardSignal::Abandoned => {
                    println!("Level-up cancelled; nothing was changed.");
                    return Ok(());
                }
            }
        }
    }
}

/// One line is either a command word or `type <text>`.
fn parse_line(line: &str) -> Result<Vec<WizardInput>, String> {
    let line = line.trim();
    if let Some(text) = line.strip_prefix("type ") {
        return Ok(text.chars().map(WizardInput::Char).collect());
    }
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.parse::<WizardInput>().map(|input| vec![input])
}

fn print_view(view: &WizardView) {
    println!();
    println!(
        "== {} the {}: level {} -> {} ==",
        view.character_name, view.class_name, view.from_level, view.to_level
    );
    println!(
        "Step {}/{}: {}",
        view.position,
        view.steps.len(),
        view.step.title()
    );

    match &view.body {
        StepView::HitPoints {
            die,
            constitution_modifier,
            methods,
            locked,
        } => {
            println!("Hit die d{die}, Constitution modifier {constitution_modifier:+}");
            print_rows(methods);
            if let Some(gain) = locked {
                println!(
                    "Locked: {} {:+} = {} (select to continue, back to re-roll)",
                    gain.raw, gain.constitution_modifier, gain.total
                );
            }
        }
        StepView::Subclass { options, staged } => {
            print_rows(options);
            if let Some(name) = staged {
                println!("Chosen: {name} (select to continue)");
            }
        }
        StepView::AbilityOrFeat(ImprovementView::AbilityScores {
            pattern,
            rows,
            continue_highlighted,
            complete,
        }) => {
            println!("[Ability Scores] Feat    pattern: {}", pattern.label());
            for row in rows {
                println!(
                    "{} {} {:>2}{}{}",
                    marker(row.highlighted),
                    row.ability.as_str(),
                    row.score,
                    if row.delta > 0 {
                        format!(" +{}", row.delta)
                    } else {
                        String::new()
                    },
                    if row.capped { " (max)" } else { "" }
                );
            }
            println!(
                "{} Continue{}",
                marker(*continue_highlighted),
                if *complete { "" } else { " (incomplete)" }
            );
        }
        StepView::AbilityOrFeat(ImprovementView::Feat {
            query,
            rows,
            prompt,
            chosen,
        }) => {
            println!("Ability Scores [Feat]    search: {query}_");
            match prompt {
                Some(prompt) => {
                    println!("Choose the ability {} increases:", prompt.feat_name);
                    print_rows(&prompt.options);
                }
                None => print_rows(rows),
            }
            if let Some(name) = chosen {
                println!("Chosen: {name} (select to continue)");
            }
        }
        StepView::FeatureReview { features } => print_rows(features),
        StepView::SpellSlotReview { rows } => {
            for row in rows {
                println!(
                    "  Level {}: {} -> {}",
                    row.spell_level, row.before, row.after
                );
            }
        }
        StepView::Confirm { summary } => {
            for line in summary {
                println!("  {line}");
            }
            println!("Select to apply, back to review.");
        }
        StepView::Error { message } => {
            println!("{message}");
            println!("Select or back to exit.");
        }
    }

    if let Some(notice) = &view.notice {
        println!("! {notice}");
    }
}

fn print_rows(rows: &[ListRow]) {
    for row in rows {
        let check = if row.selected { "*" } else { " " };
        match &row.detail {
            Some(detail) => println!("{}{} {}  {}", marker(row.highlighted), check, row.label, detail),
            None => println!("{}{} {}", marker(row.highlighted), check, row.label),
        }
    }
}

fn marker(highlighted: bool) -> &'static str {
    if highlighted {
        ">"
    } else {
        " "
    }
}
