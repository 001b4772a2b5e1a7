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

use std::{
    fmt::{Display, Formatter},
    io::Write,
    path::PathBuf,
};

use crate::{
    convert::args::{convert_parser, ConvertParams},
    read::args::{read_parser, ReadParams},
};
use bpaf::*;

#[derive(Clone, Debug)]
pub(crate) enum Command {
    Version,
    Convert(ConvertParams),
    Read(ReadParams),
    Ports,
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Version => write!(f, "version"),
            Command::Convert(_) => write!(f, "convert"),
            Command::Read(_) => write!(f, "read"),
            Command::Ports => write!(f, "ports"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct AppParams {
    pub global:  GlobalOptions,
    pub command: Command,
}

#[derive(Debug)]
pub struct GlobalOptions {
    pub silent: bool,
}

impl GlobalOptions {
    pub fn loud<F: FnMut()>(&self, mut f: F) {
        if !self.silent {
            f();
            let _ = std::io::stdout().flush();
        }
    }
}

pub fn global_options_parser() -> impl Parser<GlobalOptions> {
    let silent = long("silent")
        .help("Suppress all output except prompts and required output")
        .switch(); // Switch returns a bool, true if the flag is present

    construct!(GlobalOptions { silent })
}

/// Tape names are given without suffix; the suffix of each file is chosen by the command.
pub(crate) fn names_parser() -> impl Parser<Vec<PathBuf>> {
    positional::<PathBuf>("NAME")
        .help("Tape file name(s) without suffix. If none are given, names are prompted for.")
        .many()
}

pub(crate) fn command_parser() -> impl Parser<AppParams> {
    let global = global_options_parser();

    let version = pure(Command::Version)
        .to_options()
        .command("version")
        .help("Display version information and exit");

    let convert = construct!(Command::Convert(convert_parser()))
        .to_options()
        .command("convert")
        .help("Convert raw tape images (.raw) to Flexowriter code (.flx2) and ASCII (.asc2)");

    let read = construct!(Command::Read(read_parser()))
        .to_options()
        .command("read")
        .help("Read tapes from a serial tape reader to .raw, .flx and .asc files");

    let ports = pure(Command::Ports)
        .to_options()
        .command("ports")
        .help("List the serial ports on this system");

    let command = construct!([version, convert, read, ports]);

    construct!(AppParams { global, command })
}
