/*
    lgptool

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/
use std::io::{self, BufRead, Write};

/// Print `message` and read one line of operator input, without its line ending.
/// End of input is returned as an empty line, which ends every prompt loop.
pub(crate) fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> io::Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(String::new());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn prompt_stdin(message: &str) -> io::Result<String> {
    prompt(&mut io::stdin().lock(), &mut io::stdout(), message)
}

/// Yields names from the command line if any were given, otherwise prompts for names until an
/// empty one is entered.
pub(crate) enum NameSource<T> {
    Batch(std::vec::IntoIter<T>),
    Interactive(&'static str),
}

impl<T> NameSource<T> {
    pub(crate) fn new(names: Vec<T>, message: &'static str) -> Self {
        if names.is_empty() {
            NameSource::Interactive(message)
        }
        else {
            NameSource::Batch(names.into_iter())
        }
    }

    pub(crate) fn is_interactive(&self) -> bool {
        matches!(self, NameSource::Interactive(_))
    }
}

impl<T: From<String>> NameSource<T> {
    /// Get the next name, or `None` when the names are exhausted or an empty name was entered.
    pub(crate) fn next_name(&mut self) -> io::Result<Option<T>> {
        match self {
            NameSource::Batch(names) => Ok(names.next()),
            NameSource::Interactive(message) => {
                println!();
                let name = prompt_stdin(message)?;
                if name.is_empty() {
                    Ok(None)
                }
                else {
                    Ok(Some(T::from(name)))
                }
            }
        }
    }
}
