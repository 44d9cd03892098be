use clap::Parser;
use tales::cli::{handle_capsule, handle_list, handle_read, handle_serve, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve {
            bind,
            file,
            admin_key,
        } => handle_serve(bind, file, admin_key),
        Commands::Capsule { bind, no_seed } => handle_capsule(bind, no_seed),
        Commands::List { file, json } => handle_list(file, json),
        Commands::Read { id, file } => handle_read(id, file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
