//! qrattend entrypoint.

use qrattend::run;
use qrattend::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
