use clap::{Arg, ArgAction, ArgMatches, Command, crate_description, crate_version};
use colored::Colorize;
use dialoguer::Confirm;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use utix::{Error, PathSetup, Result, ensure_utils_dir, store};

fn build_cli() -> Command {
    Command::new("utix")
        .version(crate_version!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List all installed utilities")
                .alias("ls"),
        )
        .subcommand(
            Command::new("add")
                .about("Install a utility into the utilities directory")
                .long_about(
                    "Installs the specified file into the utilities directory, \
                     stripping its extension, lowercasing the name and replacing \
                     underscores with dashes, and marking it executable.",
                )
                .alias("install")
                .arg(
                    Arg::new("utility")
                        .help("Path to the file to install")
                        .required(true),
                )
                .arg(
                    Arg::new("force")
                        .help("Force overwrite if the utility already exists")
                        .long("force")
                        .short('f')
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("copy")
                        .help("Copy the file instead of moving it")
                        .long("copy")
                        .short('c')
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an installed utility")
                .aliases(["rm", "uninstall"])
                .arg(
                    Arg::new("utility")
                        .help("Name of the utility to remove")
                        .required(true),
                )
                .arg(
                    Arg::new("yes")
                        .help("Skip the confirmation prompt")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    clap_complete::CompleteEnv::with_factory(build_cli).complete();
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("UTIX_LOG_LEVEL", "error"))
        .init();

    if let Err(err) = run() {
        eprintln!("{} {err}", "ERROR:".red().bold());
        process::exit(err.exit_code());
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let (dir, setup) = ensure_utils_dir()?;
    if let Some(setup) = setup {
        report_path_setup(&setup);
    }

    match matches.subcommand() {
        Some(("list", _)) => list_cmd(&dir),
        Some(("add", sub)) => add_cmd(&dir, sub),
        Some(("remove", sub)) => remove_cmd(&dir, sub),
        _ => unreachable!("subcommand is required"),
    }
}

fn list_cmd(dir: &Path) -> Result<()> {
    for path in store::list(dir) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("{}", name.cyan().bold());
    }
    Ok(())
}

fn add_cmd(dir: &Path, matches: &ArgMatches) -> Result<()> {
    let raw = matches.get_one::<String>("utility").unwrap();
    let copy = matches.get_flag("copy");
    let force = matches.get_flag("force");

    let source = shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|_| Error::SourceNotFound(PathBuf::from(raw)))?;
    if !source.is_file() {
        return Err(Error::SourceNotFound(source));
    }

    let target = store::install(dir, &source, copy, force)?;
    let name = target.file_name().unwrap_or_default().to_string_lossy();

    println!(
        "{}{}{}",
        "Added utility ".cyan(),
        name.magenta().bold(),
        " to the utilities directory.".cyan()
    );
    println!("You can now run it with: '{name} ...args'");
    Ok(())
}

fn remove_cmd(dir: &Path, matches: &ArgMatches) -> Result<()> {
    let name = matches.get_one::<String>("utility").unwrap();

    if !matches.get_flag("yes") {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove utility '{name}'?"))
            .default(false)
            .interact()
            .map_err(io::Error::other)?;
        if !confirmed {
            println!("{}", "Aborted.".red());
            process::exit(1);
        }
    }

    let removed = store::remove(dir, name)?;
    let name = removed.file_name().unwrap_or_default().to_string_lossy();

    println!(
        "{}{}{}",
        "Removed utility ".cyan(),
        name.magenta().bold(),
        " from the utilities directory.".cyan()
    );
    Ok(())
}

/// Tells the user their startup file was patched (or already was) and
/// how to pick the change up without restarting the terminal.
fn report_path_setup(setup: &PathSetup) {
    let rc = setup.rc_file.display().to_string();
    if setup.already_present {
        println!(
            "{}{}{}",
            "Utilities directory already added to ".yellow().bold(),
            rc.green().bold(),
            ". Please refresh your shell.".yellow().bold()
        );
    } else {
        println!(
            "{}{}{}",
            "Utilities directory added to ".cyan().bold(),
            rc.magenta().bold(),
            ". Please refresh your shell.".cyan().bold()
        );
    }
    println!("{}", "Example:".bold());
    println!();
    println!("exec $SHELL");
    println!();
    println!("{}", "or:".bold());
    println!();
    println!("{}", setup.fallback);
}
