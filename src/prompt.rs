//! Console questions. Every function hands the answer back to its caller;
//! none of them terminates the process.

use std::io::{self, BufRead, Write};

/// Asks `question [Y/N]: ` until the reply starts with `y` or `n`.
/// End of input counts as "no".
pub fn yes_or_no<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    loop {
        write!(output, "{} [Y/N]: ", question)?;
        output.flush()?;

        let mut reply = String::new();
        if input.read_line(&mut reply)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }

        let reply = reply.trim().to_lowercase();
        if reply.starts_with('y') {
            return Ok(true);
        }
        if reply.starts_with('n') {
            return Ok(false);
        }
    }
}

/// Reads one line after a `>>` marker. Empty lines and end of input give `None`.
pub fn read_input<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<String>> {
    write!(output, ">>")?;
    output.flush()?;

    let mut reply = String::new();
    if input.read_line(&mut reply)? == 0 {
        return Ok(None);
    }

    let reply = reply.trim_end_matches(['\r', '\n']);
    if reply.is_empty() {
        return Ok(None);
    }
    Ok(Some(reply.to_string()))
}

/// Collects paths one at a time until the user confirms the list is complete.
pub fn collect_paths<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Vec<String>> {
    let mut paths = Vec::new();
    loop {
        writeln!(output, "Please provide a path to the file you want to benchmark:")?;
        if let Some(path) = read_input(input, output)? {
            writeln!(output, "You entered: {}", path)?;
            paths.push(path);
        }

        if yes_or_no(input, output, "Did you enter all paths you want to benchmark?")? {
            break;
        }
    }
    Ok(paths)
}
