//! Choosing one container out of the search results

use std::io::{BufRead, Write};

use rx_core::error::ResolveError;
use rx_core::Container;

use crate::output::format_containers;

/// Number of prompts before giving up on an invalid answer
pub const MAX_SELECTION_ATTEMPTS: usize = 3;

/// Pick the target container for `query`
///
/// A single match is taken as is. Several matches are listed and the user is
/// asked for a 1-based index on `input`.
pub fn select_container<R, W>(
    query: &str,
    mut candidates: Vec<Container>,
    input: &mut R,
    out: &mut W,
) -> Result<Container, ResolveError>
where
    R: BufRead,
    W: Write,
{
    match candidates.len() {
        0 => return Err(ResolveError::NotFound(query.to_string())),
        1 => return Ok(candidates.remove(0)),
        _ => {}
    }

    writeln!(out, "We found more than one containers in system:")?;
    writeln!(out, "{}", format_containers(&candidates))?;

    let count = candidates.len();
    for _ in 0..MAX_SELECTION_ATTEMPTS {
        write!(out, "Which one you want to connect: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(ResolveError::Selection("no selection made".to_string()));
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=count).contains(&choice) => {
                return Ok(candidates.swap_remove(choice - 1));
            }
            _ => writeln!(out, "Please enter a number between 1 and {}", count)?,
        }
    }

    Err(ResolveError::Selection(format!(
        "no valid choice after {} attempts",
        MAX_SELECTION_ATTEMPTS
    )))
}
