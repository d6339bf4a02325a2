use clap::Parser;

/// Evaluate a decision read as JSON from stdin and write the result to stdout
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let _args = Args::parse();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    decision_rs::run(stdin.lock(), stdout.lock())?;

    Ok(())
}
