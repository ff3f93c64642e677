use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use tilewalk_engine::{parse_action_line, run_frames, InputAction};
use tracing::{error, info, warn};

use super::bootstrap::AppWiring;

pub(crate) fn run(mut app: AppWiring) -> ExitCode {
    let reader: Box<dyn BufRead> = match &app.script {
        Some(path) => match File::open(path) {
            Ok(file) => {
                info!(path = %path.display(), "script_opened");
                Box::new(BufReader::new(file))
            }
            Err(err) => {
                error!(error = %err, path = %path.display(), "startup_failed");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run_frames(&app.loop_config, &mut app.session, frames(reader), &mut out) {
        error!(error = %err, "frame_loop_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// One frame per input line. Comment lines are skipped; blank lines are idle
/// frames. A read error ends input like end of file.
fn frames<R: BufRead>(reader: R) -> impl Iterator<Item = Vec<InputAction>> {
    reader
        .lines()
        .enumerate()
        .map_while(|(index, line)| match line {
            Ok(line) => Some((index + 1, line)),
            Err(err) => {
                warn!(error = %err, line = index + 1, "input_read_failed");
                None
            }
        })
        .filter(|(_, line)| !line.trim_start().starts_with('#'))
        .map(|(line_number, line)| {
            let parsed = parse_action_line(&line);
            for token in &parsed.unknown_tokens {
                warn!(token = %token, line = line_number, "unknown_input_token");
            }
            parsed.actions
        })
}
