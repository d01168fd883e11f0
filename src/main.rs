use std::process::ExitCode;

fn main() -> ExitCode {
    match kiroku_nav::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            kiroku_nav::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
