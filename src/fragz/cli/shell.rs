//! # Interactive Shell
//!
//! `fragz shell` keeps one session alive across commands read line by line
//! from stdin. A failing command prints its error and the loop carries on
//! with the session unchanged.
//!
//! The loop is generic over the API's collaborators and over its input and
//! output, so tests can drive it with in-memory sources and a local
//! fragmenter.

use super::render::{render_derived, render_fragment_list, render_full_fragment, render_messages};
use fragz::api::{CmdResult, FragzApi};
use fragz::error::{FragzError, Result};
use fragz::fragmenter::{FragmentParams, Fragmenter};
use fragz::source::SourceReader;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "fragz> ";

const HELP: &str = "\
Commands:
  load PATH...                      Replace the collection with these files
  list                              Show the current page
  page N                            Go to page N
  next | prev                       Move one page
  show N                            Print fragment N in full
  split MODE TARGET TOL [SEL...]    Split the selection (all when omitted)
  delete SEL...                     Remove the selection
  help                              This text
  quit                              Leave the shell
Selections are positions (3, 5-7) or fragment ids.
";

enum Outcome {
    Continue,
    Quit,
}

pub fn run_shell<R, F, I, O>(
    api: &mut FragzApi<R, F>,
    input: I,
    out: &mut O,
    prompt: bool,
) -> io::Result<()>
where
    R: SourceReader,
    F: Fragmenter,
    I: BufRead,
    O: Write,
{
    if prompt {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if let Some((command, args)) = words.split_first() {
            match execute(api, command, args, out) {
                Ok(Outcome::Quit) => return Ok(()),
                Ok(Outcome::Continue) => {}
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }
        if prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn execute<R, F, O>(
    api: &mut FragzApi<R, F>,
    command: &str,
    args: &[&str],
    out: &mut O,
) -> Result<Outcome>
where
    R: SourceReader,
    F: Fragmenter,
    O: Write,
{
    let result = match command {
        "quit" | "exit" | "q" => return Ok(Outcome::Quit),
        "help" | "?" => {
            write!(out, "{}", HELP)?;
            return Ok(Outcome::Continue);
        }
        "load" => api.load(args),
        "list" | "ls" => api.paginated_data(),
        "page" => {
            let [page] = args else {
                return Err(usage("page N"));
            };
            let page = page_index(page, api.total_pages())?;
            api.set_page(page)?
        }
        "next" | "n" => {
            let page = page_number(api.current_page() as i64 + 2, api.total_pages())?;
            api.set_page(page)?
        }
        "prev" | "p" => {
            let page = page_number(api.current_page() as i64, api.total_pages())?;
            api.set_page(page)?
        }
        "show" => {
            let [position] = args else {
                return Err(usage("show N"));
            };
            let index = position
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| FragzError::Api(format!("Invalid position: {}", position)))?;
            let result = api.get_text(index)?;
            if let Some(fragment) = &result.fragment {
                write!(out, "{}", render_full_fragment(fragment))?;
            }
            result
        }
        "split" => {
            let [mode, target, tolerance, selectors @ ..] = args else {
                return Err(usage("split MODE TARGET TOL [SEL...]"));
            };
            let params = FragmentParams::new(*mode, number(target)?, number(tolerance)?);
            if selectors.is_empty() {
                let ids = api.all_ids();
                api.fragment_texts(&ids, &params)?
            } else {
                api.fragment_selected(selectors, &params)?
            }
        }
        "delete" | "rm" => {
            if args.is_empty() {
                return Err(usage("delete SEL..."));
            }
            api.delete_selected(args)?
        }
        other => {
            return Err(FragzError::Api(format!(
                "Unknown command: {} (try 'help')",
                other
            )))
        }
    };

    write_result(&result, out)?;
    Ok(Outcome::Continue)
}

fn write_result<O: Write>(result: &CmdResult, out: &mut O) -> io::Result<()> {
    if !result.derived.is_empty() {
        write!(out, "{}", render_derived(&result.derived))?;
    }
    if result.page.is_some() {
        write!(
            out,
            "{}",
            render_fragment_list(&result.listed_fragments, result.page)
        )?;
    }
    write!(out, "{}", render_messages(&result.messages))
}

/// Converts a 1-based page typed by the user into a page index.
pub fn page_index(input: &str, total: usize) -> Result<usize> {
    let page: i64 = input
        .parse()
        .map_err(|_| FragzError::Api(format!("Invalid page: {}", input)))?;
    page_number(page, total)
}

/// Checks a 1-based page against `total` so errors quote what the user sees.
pub fn page_number(page: i64, total: usize) -> Result<usize> {
    if page < 1 || page as u64 > total as u64 {
        return Err(FragzError::page_out_of_range(page, total));
    }
    Ok((page - 1) as usize)
}

fn number(input: &str) -> Result<i64> {
    input
        .parse()
        .map_err(|_| FragzError::Api(format!("Invalid number: {}", input)))
}

fn usage(text: &str) -> FragzError {
    FragzError::Api(format!("Usage: {}", text))
}
