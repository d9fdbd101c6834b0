//! HBnB console - an interactive command interpreter over an object store.

use hbnb_console::cli::{Cli, InputSource};
use hbnb_console::config::Config;
use hbnb_console::console::Console;
use hbnb_console::error::{ConsoleError, Result};
use hbnb_console::logging::{self, LogTarget};
use hbnb_console::persistence::FileStorage;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    logging::init_logging(LogTarget::from_flag(cli.log_stderr));

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Load configuration file
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // Store path precedence: --file / HBNB_FILE, then the config file
    let store_path = cli.store_path(&config);
    let store = FileStorage::open(store_path)?;
    info!(
        "Opened store at {} ({} objects)",
        store.path().display(),
        store.all().len()
    );

    let mut console = Console::new(store);
    let mut stdout = io::stdout().lock();

    match cli.input_source() {
        InputSource::Terminal => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                console = console.with_prompt(config.console.prompt.clone());
            }
            console.run(stdin.lock(), &mut stdout)
        }
        InputSource::Stdin => console.run(io::stdin().lock(), &mut stdout),
        InputSource::File(path) => {
            let file = File::open(&path).map_err(|e| {
                ConsoleError::config(format!("Cannot open script {}: {e}", path.display()))
            })?;
            console.run(BufReader::new(file), &mut stdout)
        }
    }
}
