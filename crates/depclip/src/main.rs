use std::process::ExitCode;

fn main() -> ExitCode {
    depclip::init();
    depclip::cli::run()
}
