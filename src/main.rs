use adaptive_pq::script::{self, ScriptQueue};
use std::env;
use std::process;

fn main() {
    pretty_env_logger::init();

    let filename = match env::args().nth(1) {
        Some(filename) => filename,
        None => {
            eprintln!("usage: apq-script <script file>");
            process::exit(2);
        }
    };

    let commands = match script::read_from_file(&filename) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };
    log::info!("Running {} commands from {}", commands.len(), filename);

    let mut queue = ScriptQueue::new();
    for outcome in script::run(&commands, &mut queue) {
        println!("{}", outcome);
    }

    log::info!("{} values left in the queue", queue.len());
}
