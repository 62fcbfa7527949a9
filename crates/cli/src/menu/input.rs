use std::io::{BufRead, Write};

use script_menu_core::error::{Error, Result};
use script_menu_core::execution::CANCEL_SENTINEL;

/// Reads one line without its line ending. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(Error::Stdio)?;

    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
}

/// Asks for the argument line for a leaf command.
///
/// End of input is answered with the cancel sentinel.
pub fn prompt_arguments<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    display_name: &str,
) -> Result<String> {
    write!(
        output,
        "Arguments for {display_name} (Enter for none, '{CANCEL_SENTINEL}' to cancel): "
    )
    .map_err(Error::Stdio)?;
    output.flush().map_err(Error::Stdio)?;

    Ok(read_line(input)?.unwrap_or_else(|| CANCEL_SENTINEL.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut input = Cursor::new("h2\r\n  spaced  \n");
        assert_eq!(read_line(&mut input).unwrap(), Some("h2".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), Some("  spaced  ".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_prompt_arguments() {
        let mut input = Cursor::new("10.0.0.1 3\n");
        let mut output = Vec::new();

        let line = prompt_arguments(&mut input, &mut output, "Ping.sh").unwrap();

        assert_eq!(line, "10.0.0.1 3");
        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.starts_with("Arguments for Ping.sh"));
        assert!(prompt.contains("'c' to cancel"));
    }

    #[test]
    fn test_prompt_arguments_end_of_input_cancels() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let line = prompt_arguments(&mut input, &mut output, "Ping.sh").unwrap();
        assert_eq!(line, CANCEL_SENTINEL);
    }
}
