use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "fragz",
    bin_name = "fragz",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Page through text files and split them into fragments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json (defaults to $FRAGZ_HOME, then the platform config dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Fragment Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "split" | "delete" | "shell" => Some(CommandGroup::Core),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Core, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("fragz {version}\n"));
    output.push_str("Page through text files and split them into fragments\n");
    output.push('\n');
    output.push_str("Usage: fragz [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Selections:\n");
    output.push_str("  3 5-7        Positions as shown in listings (1-based), ranges included\n");
    output.push_str("  notes/a.txt  Anything else is taken as a fragment id\n");
    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --config-dir <DIR>  Directory holding config.json\n");
    output.push_str("  -v, --verbose           Verbose output\n");
    output.push_str("  -h, --help              Print help\n");
    output.push_str("  -V, --version           Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Prints help for the parsed subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Core(c)) => match c {
            CoreCommands::List { .. } => "list",
            CoreCommands::Split { .. } => "split",
            CoreCommands::Delete { .. } => "delete",
            CoreCommands::Shell { .. } => "shell",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
            MiscCommands::SplitWorker { .. } => "split-worker",
        },
        None => {
            print_grouped_help();
            return;
        }
    };
    print_help_for_command(name);
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Load files and print one page of fragments
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Files to load
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Page to show (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Load files and split the selected fragments
    #[command(display_order = 2)]
    Split {
        /// Files to load
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Fragments to split (e.g. 1 3-5 notes/a.txt); all when omitted
        #[arg(short, long, num_args = 1..)]
        select: Vec<String>,

        /// Splitting mode passed to the fragmenter (e.g. size, row)
        #[arg(short, long)]
        mode: Option<String>,

        /// Target fragment size
        #[arg(short, long, allow_negative_numbers = true)]
        target: Option<i64>,

        /// Allowed deviation from the target
        #[arg(long, allow_negative_numbers = true)]
        tolerance: Option<i64>,

        /// Page of the result to show (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Load files and remove the selected fragments
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Files to load
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Fragments to delete (e.g. 1 3-5 notes/a.txt)
        #[arg(short, long, required = true, num_args = 1..)]
        select: Vec<String>,
    },

    /// Interactive session over stdin
    #[command(display_order = 4)]
    Shell {
        /// Files to load on start
        paths: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 10)]
    Config {
        /// Configuration key (e.g., items-per-page)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for fragz or a subcommand
    #[command(display_order = 11)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },

    /// Split stdin and print the pieces as JSON (the built-in fragmenter)
    #[command(hide = true, name = "split-worker")]
    SplitWorker {
        mode: String,

        #[arg(allow_hyphen_values = true)]
        target: String,

        #[arg(allow_hyphen_values = true)]
        tolerance: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_split_with_selection() {
        let cli = parse(&[
            "fragz", "split", "a.txt", "b.txt", "--select", "1", "2-3", "--mode", "row",
        ]);
        match cli.command {
            Some(Commands::Core(CoreCommands::Split {
                paths,
                select,
                mode,
                target,
                ..
            })) => {
                assert_eq!(paths, vec!["a.txt", "b.txt"]);
                assert_eq!(select, vec!["1", "2-3"]);
                assert_eq!(mode.as_deref(), Some("row"));
                assert_eq!(target, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn delete_requires_selection() {
        assert!(Cli::try_parse_from(["fragz", "delete", "a.txt"]).is_err());
    }

    #[test]
    fn worker_accepts_negative_numbers() {
        let cli = parse(&["fragz", "split-worker", "size", "-5", "2"]);
        match cli.command {
            Some(Commands::Misc(MiscCommands::SplitWorker { target, .. })) => {
                assert_eq!(target, "-5")
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["fragz", "list", "a.txt", "--config-dir", "/tmp/x", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn grouped_help_hides_worker() {
        let help = get_grouped_help();
        assert!(help.contains("Fragment Commands:"));
        assert!(help.contains("split"));
        assert!(!help.contains("split-worker"));
    }
}
