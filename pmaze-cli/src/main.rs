use pmaze_cli::{
    commands::{self, CliError, Command},
    logging,
    settings::Settings,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "pmaze")]
struct Args {
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More log output, can be repeated")]
    verbose: u8,
    #[clap(subcommand)]
    command: Option<Command>,
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();

    if args.reset_config {
        Settings::reset_config(&Settings::default_path())?;
        return Ok(());
    }

    if args.show_config_path {
        let settings_path = Settings::default_path();
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(Settings::default_path()));
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(Settings::default_path())?;
    logging::init(logging::with_verbosity(
        settings.get_log_level(),
        args.verbose,
    ));

    let command = args
        .command
        .unwrap_or_else(|| Command::Generate(Default::default()));
    commands::run(command, &settings)
}
