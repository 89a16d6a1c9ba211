use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use fathom_core::{Engine, EngineError, GameState, Turn};

pub fn run(dir: &Path, load: Option<&Path>) -> Result<(), String> {
    let (story, vocabulary) = super::load_story(dir)?;
    let title = story.meta.title.clone();

    let mut engine = match load {
        Some(file) => Engine::restore(story, read_state(file)?),
        None => Engine::new(story),
    };

    println!("  {}", title.bold());
    println!("  Type 'save <file>', 'load <file>', or 'quit' at any prompt.\n");

    if load.is_some() {
        println!("  Resuming in '{}'.\n", engine.state().current_scene);
    } else {
        let opening = engine.start().map_err(|e| e.to_string())?;
        print_turn(&opening);
        if opening.ended {
            println!("  {}", "The End.".bold());
            return Ok(());
        }
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }
        if let Some(file) = input.strip_prefix("save ") {
            let file = file.trim();
            match save_state(engine.state(), Path::new(file)) {
                Ok(()) => println!("  Saved to {file}\n"),
                Err(e) => println!("{}\n", e.yellow()),
            }
            continue;
        }
        if let Some(file) = input.strip_prefix("load ") {
            let file = file.trim();
            match read_state(Path::new(file)) {
                Ok(state) => {
                    engine = Engine::restore(engine.story().clone(), state);
                    println!("  Loaded {file}. Resuming in '{}'.\n", engine.state().current_scene);
                }
                Err(e) => println!("{}\n", e.yellow()),
            }
            continue;
        }

        match engine.perform(&vocabulary.action_key(input)) {
            Ok(turn) => {
                print_turn(&turn);
                if turn.ended {
                    println!("  {}", "The End.".bold());
                    break;
                }
            }
            Err(EngineError::StoryOver) => {
                println!("{}\n", "The story has already ended.".yellow());
                break;
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}

fn print_turn(turn: &Turn) {
    for paragraph in &turn.narration {
        println!("{paragraph}\n");
    }
}

fn read_state(path: &Path) -> Result<GameState, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid save file {}: {e}", path.display()))
}

fn save_state(state: &GameState, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(state).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
