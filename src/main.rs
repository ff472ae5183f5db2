use clap::Parser;
use miette::Result;
use parts::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    parts::cli::logging::init(global.verbose);

    match cli.command {
        Commands::Init(args) => parts::cli::commands::init::run(args),
        Commands::Form(args) => parts::cli::commands::form::run(args, &global),
        Commands::Add(args) => parts::cli::commands::add::run(args, &global),
        Commands::List(args) => parts::cli::commands::list::run(args, &global),
        Commands::Update(args) => parts::cli::commands::update::run(args, &global),
        Commands::Delete(args) => parts::cli::commands::delete::run(args, &global),
        Commands::Config(cmd) => parts::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => parts::cli::commands::completions::run(args),
    }
}
