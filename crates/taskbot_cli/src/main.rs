use clap::Parser as ClapParser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use taskbot_cli::cli::Cli;
use taskbot_cli::ui;
use taskbot_core::config::{self, Config};
use taskbot_core::error::AppError;
use taskbot_core::interpreter::Parser;
use taskbot_core::model::TaskList;
use taskbot_core::storage;

/// Flag beats config beats environment/default.
fn resolve_save_path(cli: &Cli, config: &Config) -> Result<PathBuf, AppError> {
    if let Some(path) = &cli.save_file {
        return Ok(path.clone());
    }

    if let Some(path) = &config.save_path
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    storage::save_path()
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        ui::warn(err);
    }
    let config = config_load.config;

    let save_path = resolve_save_path(&cli, &config)?;
    let mut tasks = match storage::load_list(&save_path)? {
        Some(list) => list,
        None => {
            let list = TaskList::new();
            storage::save_list(&save_path, &list)?;
            ui::say_new_file(&save_path);
            list
        }
    };

    if !cli.plain {
        ui::greet();
    }

    let stdin = io::stdin();
    let mut input = String::new();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = config.expand_alias(input.trim());
        if line.is_empty() {
            continue;
        }

        let parser = match Parser::parse(&line) {
            Ok(parser) => parser,
            Err(err) => {
                ui::warn(&err);
                continue;
            }
        };

        if parser.is_bye() {
            break;
        }

        match parser.respond(&mut tasks) {
            Ok(response) => {
                ui::render(&response);
                // Applied mutations stay even if the save fails; the
                // next mutating command retries the write.
                if parser.needs_save()
                    && let Err(err) = storage::save_list(&save_path, &tasks)
                {
                    ui::warn(&err);
                }
            }
            Err(err) => ui::warn(&err),
        }
    }

    ui::farewell();
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
