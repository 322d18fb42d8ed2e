//! # CLI Layer
//!
//! This module is **one possible UI client** for fragz. It is the only place
//! that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Every one-shot command (`list`, `split`, `delete`) builds a fresh session,
//! loads the given files and then acts on them. `shell` keeps one session
//! across many commands.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{print_messages, render_config, render_derived, render_fragment_list};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands,
    CoreCommands, MiscCommands,
};
use super::shell::{page_number, run_shell};
use super::worker;
use clap::Parser;
use env_logger::Env;
use fragz::api::{self, CmdResult, ConfigAction, FragzApi};
use fragz::config::FragzConfig;
use fragz::error::{FragzError, Result};
use fragz::fragmenter::process::ProcessFragmenter;
use fragz::fragmenter::FragmentParams;
use fragz::init::{initialize, resolve_config_dir};
use fragz::source::fs::FileReader;
use std::io::IsTerminal;
use std::path::Path;

struct AppContext {
    api: FragzApi<FileReader, ProcessFragmenter>,
    config: FragzConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    // The worker talks JSON over stdio and needs no context
    if let Some(Commands::Misc(MiscCommands::SplitWorker {
        mode,
        target,
        tolerance,
    })) = &cli.command
    {
        let code = worker::run(mode, target, tolerance);
        if code != 0 {
            std::process::exit(code);
        }
        return Ok(());
    }

    match cli.command {
        Some(Commands::Core(cmd)) => {
            let mut ctx = init_context(cli.config_dir.as_deref())?;
            match cmd {
                CoreCommands::List { paths, page } => handle_list(&mut ctx, paths, page),
                CoreCommands::Split {
                    paths,
                    select,
                    mode,
                    target,
                    tolerance,
                    page,
                } => {
                    let params = FragmentParams::new(
                        mode.unwrap_or_else(|| ctx.config.default_mode.clone()),
                        target.unwrap_or(ctx.config.default_target),
                        tolerance.unwrap_or(ctx.config.default_tolerance),
                    );
                    handle_split(&mut ctx, paths, select, params, page)
                }
                CoreCommands::Delete { paths, select } => handle_delete(&mut ctx, paths, select),
                CoreCommands::Shell { paths } => handle_shell(&mut ctx, paths),
            }
        }
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => {
                handle_config(cli.config_dir.as_deref(), key, value)
            }
            MiscCommands::Help { command } => handle_help(command),
            MiscCommands::SplitWorker { .. } => Ok(()),
        },
        None => {
            print_grouped_help();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn init_context(config_dir: Option<&Path>) -> Result<AppContext> {
    let ctx = initialize(config_dir)?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn print_result(result: &CmdResult) {
    if !result.derived.is_empty() {
        print!("{}", render_derived(&result.derived));
    }
    if result.page.is_some() {
        print!(
            "{}",
            render_fragment_list(&result.listed_fragments, result.page)
        );
    }
    print_messages(&result.messages);
}

/// Loads `paths`, printing the skipped-file warnings right away.
fn load(ctx: &mut AppContext, paths: &[String]) -> CmdResult {
    let mut result = ctx.api.load(paths);
    let (warnings, rest): (Vec<_>, Vec<_>) = result
        .messages
        .drain(..)
        .partition(|m| m.level == api::MessageLevel::Warning);
    print_messages(&warnings);
    result.messages = rest;
    result
}

/// Moves to the 1-based `page` when one was asked for.
fn goto_page(ctx: &mut AppContext, page: Option<usize>, result: CmdResult) -> Result<CmdResult> {
    match page {
        Some(page) => {
            let total = ctx.api.total_pages();
            let index = match i64::try_from(page) {
                Ok(number) => page_number(number, total)?,
                Err(_) => return Err(FragzError::page_out_of_range(page, total)),
            };
            let mut paged = ctx.api.set_page(index)?;
            paged.derived = result.derived;
            paged.messages = result.messages;
            Ok(paged)
        }
        None => Ok(result),
    }
}

fn handle_list(ctx: &mut AppContext, paths: Vec<String>, page: Option<usize>) -> Result<()> {
    let loaded = load(ctx, &paths);
    let result = goto_page(ctx, page, loaded)?;
    print_result(&result);
    Ok(())
}

fn handle_split(
    ctx: &mut AppContext,
    paths: Vec<String>,
    select: Vec<String>,
    params: FragmentParams,
    page: Option<usize>,
) -> Result<()> {
    load(ctx, &paths);
    let result = if select.is_empty() {
        let ids = ctx.api.all_ids();
        ctx.api.fragment_texts(&ids, &params)?
    } else {
        ctx.api.fragment_selected(&select, &params)?
    };
    let result = goto_page(ctx, page, result)?;
    print_result(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, paths: Vec<String>, select: Vec<String>) -> Result<()> {
    load(ctx, &paths);
    let result = ctx.api.delete_selected(&select)?;
    print_result(&result);
    Ok(())
}

fn handle_shell(ctx: &mut AppContext, paths: Vec<String>) -> Result<()> {
    if !paths.is_empty() {
        let result = ctx.api.load(&paths);
        print_result(&result);
    }
    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = std::io::stdout();
    run_shell(&mut ctx.api, stdin.lock(), &mut stdout, prompt)?;
    Ok(())
}

fn handle_config(
    config_dir: Option<&Path>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let dir = resolve_config_dir(config_dir)?;
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api::config(&dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<String>) -> Result<()> {
    match command {
        Some(name) => print_help_for_command(&name),
        None => print_grouped_help(),
    }
    Ok(())
}
