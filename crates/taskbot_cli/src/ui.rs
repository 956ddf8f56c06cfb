use std::path::Path;
use taskbot_core::error::AppError;
use taskbot_core::interpreter::Response;

const BANNER: &str = r" _            _    _           _
| |_ __ _ ___| | _| |__   ___ | |_
| __/ _` / __| |/ / '_ \ / _ \| __|
| || (_| \__ \   <| |_) | (_) | |_
 \__\__,_|___/_|\_\_.__/ \___/ \__|";

pub fn greet() {
    println!("{BANNER}");
    println!("How can I help you today?");
}

pub fn farewell() {
    println!("See you again!");
}

pub fn say_new_file(path: &Path) {
    println!(
        "No save file found; starting a new one at {}",
        path.display()
    );
}

pub fn render(response: &Response) {
    match response {
        Response::Message(text) => println!("{text}"),
        Response::List { header, lines } => {
            println!("{header}");
            for line in lines {
                println!("  {line}");
            }
        }
    }
}

pub fn warn(err: &AppError) {
    eprintln!("ERROR: {err}");
}
