use log::{error, info};
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::process;
use std::rc::Rc;

use marquee::events::{Channel, EventHandler};
use marquee::game::daily_selector;
use marquee::game::settings::Settings;
use marquee::game::{FileSlotStore, GameEngine, Persistence};
use marquee::model::{GameEngineCommand, GameEngineEvent, PuzzleCorpus};
use marquee::ui::{dispatch_input, TerminalUI};

const APP_VERSION: &str = env!("APP_VERSION");

fn init_logging() {
    env_logger::init();
}

fn load_corpus() -> PuzzleCorpus {
    match Settings::corpus_path_from_env() {
        Some(path) => match PuzzleCorpus::from_path(&path) {
            Ok(corpus) => corpus,
            Err(e) => {
                error!("Could not load puzzle corpus from {}: {}", path.display(), e);
                eprintln!("marquee: cannot read puzzles from {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => PuzzleCorpus::embedded(),
    }
}

fn main() {
    init_logging();

    let data_dir = Settings::data_dir();
    info!("Using data directory {}", data_dir.display());
    let settings = Settings::load_from(&data_dir);
    let corpus = load_corpus();
    info!("Loaded {} puzzles", corpus.len());
    let today = daily_selector::today();

    let (command_emitter, command_observer) = Channel::<GameEngineCommand>::new();
    let (event_emitter, event_observer) = Channel::<GameEngineEvent>::new();

    let ui = Rc::new(RefCell::new(TerminalUI::new(
        io::stdout(),
        today,
        settings.show_stats_on_finish,
    )));
    let ui_handler = ui.clone();
    let ui_subscription = event_observer.subscribe(move |event: &GameEngineEvent| {
        ui_handler.borrow_mut().handle_event(event);
    });

    let engine = GameEngine::new(
        &corpus,
        today,
        Settings::puzzle_override_from_env(),
        Persistence::new(FileSlotStore::new(&data_dir)),
        settings,
        command_observer,
        event_emitter,
    );

    ui.borrow_mut()
        .write(&format!("marquee {} (/help for commands)\n", APP_VERSION));
    command_emitter.emit(GameEngineCommand::InitDisplay);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };
        if !dispatch_input(&line, &command_emitter, &ui) {
            break;
        }
    }

    engine.borrow_mut().shutdown();
    ui_subscription.unsubscribe();
}
