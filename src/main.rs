use colored::Colorize;

fn main() {
    if let Err(e) = yield_ledger::run() {
        match e.code() {
            Some(code) => eprintln!("{} {} (err u{})", "✗".bright_red(), e, code),
            None => eprintln!("{} {}", "✗".bright_red(), e),
        }
        std::process::exit(1);
    }
}
