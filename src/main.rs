mod utils;
mod models;
use dotenv::dotenv;
use log::{debug, error, info};
use simplelog::{Config, TermLogger, TerminalMode};
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader};
use crate::utils::config::Settings;
use crate::utils::form::FormSession;

// Runs the form on a single-threaded runtime: one input line is handled to completion before the next is read.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    // Reads the log level and colour choice, falling back to defaults for unset variables.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error reading configuration: {:#}", e);
            return;
        }
    };

    // Initializes logging with simplelog to the terminal with mixed output and the configured level and colours.
    if let Err(e) = TermLogger::init(settings.log_level, Config::default(), TerminalMode::Mixed, settings.color) {
        eprintln!("Error initialising the logger: {}", e);
        return;
    }

    // Builds the form with its single default course and computes the first GPA.
    let mut form = match FormSession::new() {
        Ok(form) => form,
        Err(e) => {
            error!("Error building the form: {:#}", e);
            return;
        }
    };

    info!("GPA calculator ready, type 'help' for the list of commands");

    // Hands control to the input loop until the user quits or stdin closes.
    if let Err(e) = run(&mut form).await {
        error!("Form session stopped: {:#}", e);
    }
}

async fn run(form: &mut FormSession) -> anyhow::Result<()> {
    let mut out = stdout();
    let mut lines = BufReader::new(stdin()).lines();

    // Shows the initial form before the first prompt.
    out.write_all(format!("{}\n> ", form.render()).as_bytes()).await?;
    out.flush().await?;

    // Ends on EOF or an explicit quit.
    while let Some(line) = lines.next_line().await? {
        // Applies the command; a `None` means the user asked to leave.
        let output = match form.handle_line(&line) {
            Some(output) => output,
            None => break,
        };
        // Prints the redrawn form, or the notice explaining why nothing changed.
        if !output.is_empty() {
            out.write_all(format!("{}\n", output).as_bytes()).await?;
        }
        out.write_all(b"> ").await?;
        out.flush().await?;
    }

    // Logs the final state of the form on the way out.
    debug!("Leaving with {} rows, GPA {}", form.courses().len(), form.gpa());
    Ok(())
}
