use std::process::ExitCode;

fn main() -> ExitCode {
    match g2p_eval::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
